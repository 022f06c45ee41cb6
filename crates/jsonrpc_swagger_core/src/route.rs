//! Route-related structure definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::SchemaRef;

/// Content type used for every JSON-RPC request and response body.
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
            Self::Head => write!(f, "HEAD"),
            Self::Options => write!(f, "OPTIONS"),
            Self::Trace => write!(f, "TRACE"),
        }
    }
}

impl TryFrom<&str> for HttpMethod {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "TRACE" => Ok(Self::Trace),
            other => Err(format!("unknown HTTP method: {other}")),
        }
    }
}

/// Parameter location in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

/// Parameter definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter location
    pub r#in: ParameterLocation,
    /// Parameter description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Schema reference or inline schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,
    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

/// Request body definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// Request body description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the request body is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Schema per Content-Type
    pub content: BTreeMap<String, MediaType>,
}

impl RequestBody {
    /// Request body carrying a single `application/json` schema.
    #[must_use]
    pub fn json(schema: SchemaRef) -> Self {
        Self {
            description: None,
            required: None,
            content: BTreeMap::from([(APPLICATION_JSON.to_string(), MediaType::schema(schema))]),
        }
    }

    /// Schema of the `application/json` content, if any.
    pub fn json_schema(&self) -> Option<&SchemaRef> {
        self.content.get(APPLICATION_JSON)?.schema.as_ref()
    }
}

/// Media type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaType {
    /// Schema reference or inline schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,
    /// Example
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl MediaType {
    #[must_use]
    pub const fn schema(schema: SchemaRef) -> Self {
        Self {
            schema: Some(schema),
            example: None,
        }
    }
}

/// Response definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Response description
    pub description: String,
    /// Schema per Content-Type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, MediaType>>,
}

impl Response {
    /// Successful response carrying a single `application/json` schema.
    #[must_use]
    pub fn json(description: impl Into<String>, schema: SchemaRef) -> Self {
        Self {
            description: description.into(),
            content: Some(BTreeMap::from([(
                APPLICATION_JSON.to_string(),
                MediaType::schema(schema),
            )])),
        }
    }

    /// Schema of the `application/json` content, if any.
    pub fn json_schema(&self) -> Option<&SchemaRef> {
        self.content
            .as_ref()?
            .get(APPLICATION_JSON)?
            .schema
            .as_ref()
    }
}

/// `OpenAPI` Operation definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Operation ID (unique identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// List of tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// List of parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    /// Request body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Response definitions (status code -> Response)
    pub responses: BTreeMap<String, Response>,
    /// Deprecated flag
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

/// Path Item definition (all HTTP methods for a specific path)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathItem {
    /// GET method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// POST method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// PUT method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// PATCH method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// DELETE method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// HEAD method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// OPTIONS method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// TRACE method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Path item holding a single POST operation.
    #[must_use]
    pub fn post(operation: Operation) -> Self {
        Self {
            post: Some(operation),
            ..Self::default()
        }
    }

    /// Set an operation for a specific HTTP method
    pub fn set_operation(&mut self, method: HttpMethod, operation: Operation) {
        *self.slot_mut(method) = Some(operation);
    }

    /// Get an operation for a specific HTTP method
    #[must_use]
    pub const fn get_operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Number of HTTP methods with an operation on this path.
    pub fn operation_count(&self) -> usize {
        [
            &self.get,
            &self.post,
            &self.put,
            &self.patch,
            &self.delete,
            &self.head,
            &self.options,
            &self.trace,
        ]
        .iter()
        .filter(|op| op.is_some())
        .count()
    }

    fn slot_mut(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Trace => &mut self.trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Schema;
    use rstest::rstest;

    #[rstest]
    #[case("GET", HttpMethod::Get)]
    #[case("post", HttpMethod::Post)]
    #[case("Put", HttpMethod::Put)]
    #[case("PATCH", HttpMethod::Patch)]
    #[case("delete", HttpMethod::Delete)]
    #[case("HEAD", HttpMethod::Head)]
    #[case("options", HttpMethod::Options)]
    #[case("Trace", HttpMethod::Trace)]
    fn test_http_method_from_str(#[case] input: &str, #[case] expected: HttpMethod) {
        assert_eq!(HttpMethod::try_from(input).unwrap(), expected);
        assert_eq!(expected.to_string(), input.to_uppercase());
    }

    #[test]
    fn test_http_method_from_invalid_str() {
        assert!(HttpMethod::try_from("CONNECT").is_err());
    }

    #[test]
    fn test_path_item_post_only() {
        let item = PathItem::post(Operation {
            operation_id: Some("ping".to_string()),
            ..Operation::default()
        });
        assert_eq!(item.operation_count(), 1);
        assert_eq!(
            item.get_operation(HttpMethod::Post)
                .and_then(|op| op.operation_id.as_deref()),
            Some("ping")
        );
        assert!(item.get_operation(HttpMethod::Get).is_none());
    }

    #[test]
    fn test_set_operation_overwrites() {
        let mut item = PathItem::default();
        for id in ["first", "second"] {
            item.set_operation(
                HttpMethod::Get,
                Operation {
                    operation_id: Some(id.to_string()),
                    ..Operation::default()
                },
            );
        }
        assert_eq!(item.operation_count(), 1);
        assert_eq!(
            item.get.as_ref().unwrap().operation_id.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_deprecated_only_serialized_when_set() {
        let mut op = Operation::default();
        let json = serde_json::to_value(&op).unwrap();
        assert!(json.get("deprecated").is_none());

        op.deprecated = true;
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["deprecated"], true);
    }

    #[test]
    fn test_json_body_and_response_helpers() {
        let body = RequestBody::json(SchemaRef::Inline(Box::new(Schema::string())));
        assert!(body.json_schema().is_some());

        let response = Response::json("Success", SchemaRef::reference("Foo"));
        match response.json_schema() {
            Some(SchemaRef::Ref(r)) => assert_eq!(r.ref_path, "#/components/schemas/Foo"),
            other => panic!("unexpected schema: {other:?}"),
        }
    }
}

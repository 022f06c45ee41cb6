//! Schema-related structure definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Schema reference or inline schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaRef {
    /// Schema reference (e.g., "#/components/schemas/User")
    Ref(Reference),
    /// Inline schema
    Inline(Box<Schema>),
}

impl SchemaRef {
    /// Reference to a schema registered under `name` in the components section.
    #[must_use]
    pub fn reference(name: &str) -> Self {
        Self::Ref(Reference::schema(name))
    }

    #[must_use]
    pub fn inline(schema: Schema) -> Self {
        Self::Inline(Box::new(schema))
    }

    /// Component name targeted by a reference, `None` for inline schemas.
    pub fn component_name(&self) -> Option<&str> {
        match self {
            Self::Ref(reference) => reference.component_name(),
            Self::Inline(_) => None,
        }
    }
}

/// Reference definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Reference path (e.g., "#/components/schemas/User")
    #[serde(rename = "$ref")]
    pub ref_path: String,
}

impl Reference {
    const SCHEMA_PREFIX: &'static str = "#/components/schemas/";

    /// Create a new reference
    #[must_use]
    pub const fn new(ref_path: String) -> Self {
        Self { ref_path }
    }

    /// Create a component schema reference
    #[must_use]
    pub fn schema(name: &str) -> Self {
        Self::new(format!("{}{name}", Self::SCHEMA_PREFIX))
    }

    pub fn component_name(&self) -> Option<&str> {
        self.ref_path.strip_prefix(Self::SCHEMA_PREFIX)
    }
}

/// JSON Schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// Value of the `type` keyword: one type, or several when a schema also
/// accepts `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaTypes {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl SchemaTypes {
    /// First type other than `null`, or `null` when that is the only one.
    pub fn primary(&self) -> Option<SchemaType> {
        match self {
            Self::Single(ty) => Some(*ty),
            Self::Multiple(types) => types
                .iter()
                .copied()
                .find(|ty| *ty != SchemaType::Null)
                .or_else(|| types.first().copied()),
        }
    }

    pub fn contains(&self, ty: SchemaType) -> bool {
        match self {
            Self::Single(single) => *single == ty,
            Self::Multiple(types) => types.contains(&ty),
        }
    }

    /// The same types with `null` appended.
    #[must_use]
    pub fn or_null(self) -> Self {
        if self.contains(SchemaType::Null) {
            return self;
        }
        match self {
            Self::Single(ty) => Self::Multiple(vec![ty, SchemaType::Null]),
            Self::Multiple(mut types) => {
                types.push(SchemaType::Null);
                Self::Multiple(types)
            }
        }
    }
}

impl From<SchemaType> for SchemaTypes {
    fn from(ty: SchemaType) -> Self {
        Self::Single(ty)
    }
}

/// JSON Schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Schema type
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaTypes>,
    /// Format (for numbers or strings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    /// Array item schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaRef>>,
    /// Property definitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaRef>>,
    /// List of required properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Whether additional properties are allowed (can be boolean or `SchemaRef`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<serde_json::Value>,
    /// Enum values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#enum: Option<Vec<serde_json::Value>>,
}

impl Schema {
    /// Create a new schema
    #[must_use]
    pub const fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(SchemaTypes::Single(schema_type)),
            format: None,
            title: None,
            description: None,
            example: None,
            items: None,
            properties: None,
            required: None,
            additional_properties: None,
            r#enum: None,
        }
    }

    /// Create a string schema
    #[must_use]
    pub const fn string() -> Self {
        Self::new(SchemaType::String)
    }

    /// Create an integer schema
    #[must_use]
    pub const fn integer() -> Self {
        Self::new(SchemaType::Integer)
    }

    /// Create a number schema
    #[must_use]
    pub const fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    /// Create a boolean schema
    #[must_use]
    pub const fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    /// Schema of a method result that carries no value.
    #[must_use]
    pub const fn no_content() -> Self {
        Self::new(SchemaType::Null)
    }

    /// Create an array schema
    #[must_use]
    pub fn array(items: SchemaRef) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(SchemaType::Array)
        }
    }

    /// Create an object schema
    #[must_use]
    pub fn object() -> Self {
        Self {
            properties: Some(BTreeMap::new()),
            required: Some(Vec::new()),
            ..Self::new(SchemaType::Object)
        }
    }

    /// Object schema that rejects properties it does not declare.
    #[must_use]
    pub fn closed_object() -> Self {
        Self {
            additional_properties: Some(serde_json::Value::Bool(false)),
            ..Self::object()
        }
    }

    /// Declared type other than `null`.
    pub fn primary_type(&self) -> Option<SchemaType> {
        self.schema_type.as_ref().and_then(SchemaTypes::primary)
    }

    pub fn is_nullable(&self) -> bool {
        self.schema_type
            .as_ref()
            .is_some_and(|types| types.contains(SchemaType::Null))
    }

    /// Also accept `null`. Untyped schemas accept it already.
    pub fn make_nullable(&mut self) {
        self.schema_type = self.schema_type.take().map(SchemaTypes::or_null);
    }

    /// Add a property, creating the property map when missing.
    pub fn insert_property(&mut self, name: impl Into<String>, schema: SchemaRef) {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), schema);
    }

    /// Names of the declared properties in map order.
    pub fn property_names(&self) -> Vec<&str> {
        self.properties
            .as_ref()
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// `OpenAPI` Components (reusable components)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// Schema definitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<BTreeMap<String, Schema>>,
}

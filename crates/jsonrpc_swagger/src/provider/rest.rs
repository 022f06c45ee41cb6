//! Native OpenAPI documents for the host's REST actions.

use std::collections::BTreeMap;
use std::sync::Arc;

use jsonrpc_swagger_core::openapi::{OpenApi, OpenApiVersion, Server};
use jsonrpc_swagger_core::route::{Operation, PathItem, RequestBody, Response};
use jsonrpc_swagger_core::schema::Components;
use tracing::{debug, info};

use super::{SwaggerProvider, generate_parameters};
use crate::api_description::{ApiDescription, ApiDescriptionProvider, BindingSource};
use crate::config::GeneratorOptions;
use crate::error::{SwaggerError, SwaggerResult};
use crate::naming::NamingPolicy;
use crate::schema_generator::{DefaultSchemaGenerator, SchemaGenerator};
use crate::schema_repository::SchemaRepository;
use crate::xml_docs::{XmlDocumentation, XmlDocumentationService};

const SUCCESS: &str = "Success";

/// One operation per (path, verb) for every description included in the
/// requested document. Documents are rebuilt on every request.
pub struct RestSwaggerGenerator {
    api_descriptions: Arc<dyn ApiDescriptionProvider>,
    documentation: Arc<dyn XmlDocumentation>,
    schema_generator: Option<Arc<dyn SchemaGenerator>>,
    options: GeneratorOptions,
}

impl RestSwaggerGenerator {
    pub fn new(
        api_descriptions: impl ApiDescriptionProvider + 'static,
        options: GeneratorOptions,
    ) -> Self {
        Self {
            api_descriptions: Arc::new(api_descriptions),
            documentation: Arc::new(XmlDocumentationService::empty()),
            schema_generator: None,
            options,
        }
    }

    /// Doc-comments used for operation summaries and schema descriptions.
    #[must_use]
    pub fn with_documentation(mut self, documentation: Arc<dyn XmlDocumentation>) -> Self {
        self.documentation = documentation;
        self
    }

    /// Replace the default schema generator.
    #[must_use]
    pub fn with_schema_generator(mut self, generator: impl SchemaGenerator + 'static) -> Self {
        self.schema_generator = Some(Arc::new(generator));
        self
    }

    fn generator(&self) -> Arc<dyn SchemaGenerator> {
        match &self.schema_generator {
            Some(generator) => Arc::clone(generator),
            None => Arc::new(
                DefaultSchemaGenerator::new(NamingPolicy::CamelCase)
                    .with_documentation(Arc::clone(&self.documentation)),
            ),
        }
    }

    fn operation(
        &self,
        description: &ApiDescription,
        generator: &dyn SchemaGenerator,
        repository: &mut SchemaRepository,
    ) -> SwaggerResult<Operation> {

        let parameters = generate_parameters(
            description,
            |p| !matches!(p.source, BindingSource::Body | BindingSource::Form),
            &self.options,
            generator,
            repository,
        )?;

        let request_body = match description
            .parameters
            .iter()
            .find(|p| p.source == BindingSource::Body && p.is_bindable())
        {
            Some(body) => {
                let schema = match &body.ty {
                    Some(ty) => Some(generator.generate_schema(ty, repository)?),
                    None => None,
                };
                schema.map(|schema| RequestBody {
                    required: Some(body.required),
                    ..RequestBody::json(schema)
                })
            }
            None => None,
        };

        let response = match &description.response_type {
            Some(ty) => Response::json(SUCCESS, generator.generate_schema(ty, repository)?),
            None => Response {
                description: SUCCESS.to_string(),
                content: None,
            },
        };

        let summary = self.documentation.summary_for_action(description);
        Ok(Operation {
            operation_id: self.options.operation_id(description),
            summary: (!summary.is_empty()).then_some(summary),
            tags: Some(self.options.tags(description)),
            parameters: (!parameters.is_empty()).then_some(parameters),
            request_body,
            responses: BTreeMap::from([("200".to_string(), response)]),
            deprecated: description.obsolete,
            ..Operation::default()
        })
    }
}

impl SwaggerProvider for RestSwaggerGenerator {
    fn get_swagger(
        &self,
        document_name: &str,
        host: Option<&str>,
        base_path: Option<&str>,
    ) -> SwaggerResult<Arc<OpenApi>> {
        let info = self.options.info(document_name)?;

        let generator = self.generator();
        let mut repository = SchemaRepository::new();
        let mut paths: BTreeMap<String, PathItem> = BTreeMap::new();
        let descriptions = self
            .api_descriptions
            .api_descriptions()
            .into_iter()
            .filter(|d| self.options.includes(document_name, d) && !self.options.skips(d));
        for description in descriptions {
            let path = description.path();
            debug!(path = %path, method = %description.http_method, "Mapping REST action");

            let item = paths.entry(path).or_default();
            if item.get_operation(description.http_method).is_some() {
                return Err(SwaggerError::DuplicatePath(format!(
                    "{} {}",
                    description.http_method,
                    description.path()
                )));
            }
            let operation = self.operation(&description, generator.as_ref(), &mut repository)?;
            item.set_operation(description.http_method, operation);
        }

        let document = OpenApi {
            openapi: OpenApiVersion::default(),
            info: info.clone(),
            servers: server_url(host, base_path).map(|url| vec![Server::new(url)]),
            paths,
            components: Some(Components {
                schemas: Some(repository.into_schemas()),
            }),
        };
        info!(
            document = document_name,
            operations = document.operation_count(),
            "Built REST document"
        );
        Ok(Arc::new(document))
    }
}

/// `host` joined with `base_path`, if either is given.
fn server_url(host: Option<&str>, base_path: Option<&str>) -> Option<String> {
    let base_path = base_path
        .map(|path| path.trim_end_matches('/'))
        .filter(|path| !path.is_empty());
    match (host, base_path) {
        (Some(host), Some(path)) => Some(format!(
            "{}/{}",
            host.trim_end_matches('/'),
            path.trim_start_matches('/')
        )),
        (Some(host), None) => Some(host.to_string()),
        (None, Some(path)) => Some(path.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_description::{ApiDescriptionCollection, ApiParameterDescription};
    use crate::test_helpers::rpc_options;
    use jsonrpc_swagger_core::route::{HttpMethod, ParameterLocation};
    use rstest::rstest;

    fn collection() -> ApiDescriptionCollection {
        ApiDescriptionCollection::from_descriptions([
            ApiDescription::new(HttpMethod::Get, "api/weather", "Weather", "Get")
                .group("json")
                .route_name("GetWeatherForecast")
                .parameter(ApiParameterDescription::typed::<String>("city", BindingSource::Query))
                .responds_with::<Vec<f64>>(),
            ApiDescription::new(HttpMethod::Post, "api/weather/put", "Weather", "Put")
                .group("json")
                .declared_in("app::controllers::Weather")
                .parameter(ApiParameterDescription::typed::<String>("login", BindingSource::Body).required()),
            ApiDescription::new(HttpMethod::Post, "api/weather/old", "Weather", "Old")
                .group("json")
                .obsolete(),
            ApiDescription::new(HttpMethod::Post, "api/jsonrpc/weather", "Weather", "Rpc"),
        ])
    }

    #[test]
    fn test_includes_descriptions_of_the_document_group() {
        let generator = RestSwaggerGenerator::new(collection(), rpc_options());
        let document = generator.get_swagger("json", None, None).unwrap();

        assert_eq!(
            document.paths.keys().collect::<Vec<_>>(),
            vec!["/api/weather", "/api/weather/old", "/api/weather/put"]
        );
        assert_eq!(document.operation_count(), 3);
        assert!(document.paths["/api/weather/old"].post.as_ref().unwrap().deprecated);
    }

    #[test]
    fn test_obsolete_actions_can_be_ignored() {
        let generator =
            RestSwaggerGenerator::new(collection(), rpc_options().ignore_obsolete_actions());
        let document = generator.get_swagger("json", None, None).unwrap();
        assert!(!document.paths.contains_key("/api/weather/old"));
    }

    #[test]
    fn test_operation_shape() {
        let generator = RestSwaggerGenerator::new(collection(), rpc_options());
        let document = generator.get_swagger("json", None, None).unwrap();

        let get = document.paths["/api/weather"].get.as_ref().unwrap();
        assert_eq!(get.operation_id.as_deref(), Some("GetWeatherForecast"));
        assert_eq!(get.tags, Some(vec!["Weather".to_string()]));
        let parameters = get.parameters.as_ref().unwrap();
        assert_eq!(parameters[0].r#in, ParameterLocation::Query);
        assert!(get.responses["200"].json_schema().is_some());
        assert!(get.request_body.is_none());

        let put = document.paths["/api/weather/put"].post.as_ref().unwrap();
        assert!(put.parameters.is_none());
        let body = put.request_body.as_ref().unwrap();
        assert_eq!(body.required, Some(true));
        assert!(body.json_schema().is_some());
        assert!(put.responses["200"].content.is_none());
    }

    #[test]
    fn test_summaries_come_from_documentation() {
        let docs = XmlDocumentationService::from_xml(
            r#"<doc><members>
                <member name="M:app.controllers.Weather.Put(std.string.String)">
                    <summary>Stores <paramref name="login"/>.</summary>
                </member>
            </members></doc>"#,
        )
        .unwrap();

        let undocumented = RestSwaggerGenerator::new(collection(), rpc_options());
        let document = undocumented.get_swagger("json", None, None).unwrap();
        assert_eq!(document.paths["/api/weather/put"].post.as_ref().unwrap().summary, None);

        let generator =
            RestSwaggerGenerator::new(collection(), rpc_options()).with_documentation(Arc::new(docs));
        let document = generator.get_swagger("json", None, None).unwrap();
        assert_eq!(
            document.paths["/api/weather/put"].post.as_ref().unwrap().summary.as_deref(),
            Some("Stores login.")
        );
        assert_eq!(document.paths["/api/weather"].get.as_ref().unwrap().summary, None);
    }

    #[test]
    fn test_duplicate_route_is_an_error() {
        let collection = collection();
        collection.push(ApiDescription::new(HttpMethod::Get, "/api/weather", "Weather", "Again").group("json"));
        let generator = RestSwaggerGenerator::new(collection, rpc_options());
        assert!(matches!(
            generator.get_swagger("json", None, None),
            Err(SwaggerError::DuplicatePath(path)) if path == "GET /api/weather"
        ));
    }

    #[test]
    fn test_unknown_document() {
        let generator = RestSwaggerGenerator::new(collection(), rpc_options());
        assert!(matches!(
            generator.get_swagger("v3", None, None),
            Err(SwaggerError::UnknownDocument { .. })
        ));
    }

    #[rstest]
    #[case(None, None, None)]
    #[case(Some("https://api.example.com"), None, Some("https://api.example.com"))]
    #[case(Some("https://api.example.com/"), Some("/v1/"), Some("https://api.example.com/v1"))]
    #[case(None, Some("/v1"), Some("/v1"))]
    #[case(Some("http://localhost"), Some("/"), Some("http://localhost"))]
    fn test_server_url(
        #[case] host: Option<&str>,
        #[case] base_path: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(server_url(host, base_path).as_deref(), expected);
    }
}

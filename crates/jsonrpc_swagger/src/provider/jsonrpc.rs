//! OpenAPI documents for JSON-RPC methods.
//!
//! Every RPC method is published as a `POST` operation under its unique
//! synthetic path (see [`crate::unique`]). The request body is the JSON-RPC
//! request envelope and the `200` response is the JSON-RPC response envelope:
//!
//! ```text
//! request_{key}:  { id, jsonrpc, method, params: {key} }
//! {key}:          { <param>: <schema>, ... }
//! response_{key}: { id, jsonrpc, result }
//! ```
//!
//! `key` is the path with `/` replaced by `_` and `#` by `|`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use jsonrpc_swagger_core::openapi::{Info, OpenApi, OpenApiVersion, Server};
use jsonrpc_swagger_core::route::{HttpMethod, Operation, PathItem, RequestBody, Response};
use jsonrpc_swagger_core::schema::{Components, Schema, SchemaRef};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{SwaggerProvider, generate_parameters};
use crate::api_description::{ApiDescription, ApiDescriptionProvider};
use crate::config::{GeneratorOptions, SwaggerConfiguration};
use crate::descriptor::TypeDescriptor;
use crate::error::{SwaggerError, SwaggerResult};
use crate::method::{MethodDescriptor, RpcMethodProvider};
use crate::schema_generator::{DefaultSchemaGenerator, SchemaGenerator, parse_example};
use crate::schema_repository::SchemaRepository;
use crate::unique::{UniqueMethodEntry, unique_methods};
use crate::xml_docs::{XmlDocumentation, XmlDocumentationService};

const JSONRPC_VERSION: &str = "2.0";
const SUCCESS: &str = "Success";

/// Builds and memoizes the JSON-RPC document.
pub struct JsonRpcSwaggerProvider {
    methods: Arc<dyn RpcMethodProvider>,
    api_descriptions: Arc<dyn ApiDescriptionProvider>,
    documentation: Arc<dyn XmlDocumentation>,
    schema_generator: Option<Arc<dyn SchemaGenerator>>,
    configuration: SwaggerConfiguration,
    options: GeneratorOptions,
    /// document id -> built document; the lock is held for a whole build
    cache: Mutex<BTreeMap<String, Arc<OpenApi>>>,
}

impl JsonRpcSwaggerProvider {
    pub fn new(
        methods: impl RpcMethodProvider + 'static,
        api_descriptions: impl ApiDescriptionProvider + 'static,
        configuration: SwaggerConfiguration,
        options: GeneratorOptions,
    ) -> Self {
        Self {
            methods: Arc::new(methods),
            api_descriptions: Arc::new(api_descriptions),
            documentation: Arc::new(XmlDocumentationService::empty()),
            schema_generator: None,
            configuration,
            options,
            cache: Mutex::new(BTreeMap::new()),
        }
    }

    /// Doc-comments used for summaries and examples.
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

    /// Drop every memoized document.
    pub fn invalidate(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn generator(&self) -> Arc<dyn SchemaGenerator> {
        match &self.schema_generator {
            Some(generator) => Arc::clone(generator),
            None => Arc::new(
                DefaultSchemaGenerator::new(self.configuration.naming_policy)
                    .with_documentation(Arc::clone(&self.documentation)),
            ),
        }
    }

    /// POST descriptions that RPC methods may be correlated with.
    fn applicable_descriptions(&self) -> Vec<ApiDescription> {
        self.api_descriptions
            .api_descriptions()
            .into_iter()
            .filter(|d| d.http_method == HttpMethod::Post)
            .filter(|d| !self.options.skips(d))
            .collect()
    }

    /// Returns the document and the number of applicable descriptions it was built against.
    fn build(&self, info: &Info) -> SwaggerResult<(OpenApi, usize)> {
        let metadata = self.methods.route_metadata()?;
        let descriptions = self.applicable_descriptions();
        let generator = self.generator();
        let mut repository = SchemaRepository::new();
        let mut paths = BTreeMap::new();

        for entry in unique_methods(&metadata, &self.configuration.naming_policy) {
            let description = descriptions
                .iter()
                .find(|d| d.describes(&entry.method.handle));
            if description.is_none() {
                warn!(
                    url = %entry.url,
                    handle = entry.method.handle.name(),
                    "No REST action description matches RPC method, tags and parameters left empty"
                );
            }

            if paths.contains_key(&entry.url) {
                return Err(SwaggerError::DuplicatePath(entry.url));
            }
            let operation =
                self.operation(&entry, description, generator.as_ref(), &mut repository)?;
            paths.insert(entry.url.clone(), PathItem::post(operation));
        }

        let servers = (!self.configuration.endpoints.is_empty()).then(|| {
            self.configuration
                .endpoints
                .iter()
                .map(Server::new)
                .collect()
        });

        let document = OpenApi {
            openapi: OpenApiVersion::default(),
            info: info.clone(),
            servers,
            paths,
            components: Some(Components {
                schemas: Some(repository.into_schemas()),
            }),
        };
        Ok((document, descriptions.len()))
    }

    fn operation(
        &self,
        entry: &UniqueMethodEntry<'_>,
        description: Option<&ApiDescription>,
        generator: &dyn SchemaGenerator,
        repository: &mut SchemaRepository,
    ) -> SwaggerResult<Operation> {
        let key = entry.schema_key();
        let method = entry.method;
        debug!(url = %entry.url, key = %key, "Mapping RPC method");

        let parameters = description
            .map(|d| generate_parameters(d, |_| true, &self.options, generator, repository))
            .transpose()?;
        let summary = self.documentation.summary_for_method(method);
        let request = self.request_schema(&key, method, generator, repository)?;
        let response = self.response_schema(&key, method, generator, repository)?;

        Ok(Operation {
            operation_id: description.and_then(|d| self.options.operation_id(d)),
            tags: Some(description.map(|d| self.options.tags(d)).unwrap_or_default()),
            summary: (!summary.is_empty()).then_some(summary),
            parameters,
            request_body: Some(RequestBody::json(request)),
            responses: BTreeMap::from([("200".to_string(), Response::json(SUCCESS, response))]),
            deprecated: description.is_some_and(|d| d.obsolete),
            ..Operation::default()
        })
    }

    fn request_schema(
        &self,
        key: &str,
        method: &MethodDescriptor,
        generator: &dyn SchemaGenerator,
        repository: &mut SchemaRepository,
    ) -> SwaggerResult<SchemaRef> {
        let policy = &self.configuration.naming_policy;

        let mut params = Schema::closed_object();
        for parameter in &method.parameters {
            let mut schema = generator.generate_schema(&parameter.ty, repository)?;
            let example = self.documentation.parameter_example(method, parameter);
            if !example.is_empty()
                && let SchemaRef::Inline(inline) = &mut schema
            {
                inline.example = Some(parse_example(example));
            }
            params.insert_property(policy.convert_name(&parameter.name), schema);
        }
        let params = repository.add_definition(key, params)?;

        let mut request = Schema::closed_object();
        request.insert_property("id", string_schema(generator, repository)?);
        request.insert_property("jsonrpc", string_schema(generator, repository)?);
        request.insert_property("method", string_schema(generator, repository)?);
        request.insert_property("params", params);

        let request_key = format!("request_{key}");
        let request = repository.add_definition(&request_key, request)?;
        inject_envelope_examples(
            repository,
            &request_key,
            Some(&policy.convert_name(&method.name)),
        );
        Ok(request)
    }

    fn response_schema(
        &self,
        key: &str,
        method: &MethodDescriptor,
        generator: &dyn SchemaGenerator,
        repository: &mut SchemaRepository,
    ) -> SwaggerResult<SchemaRef> {
        let result = generator.generate_schema(&method.return_kind.unwrap_result(), repository)?;

        let mut response = Schema::closed_object();
        response.insert_property("id", string_schema(generator, repository)?);
        response.insert_property("jsonrpc", string_schema(generator, repository)?);
        response.insert_property("result", result);

        let response_key = format!("response_{key}");
        let response = repository.add_definition(&response_key, response)?;
        inject_envelope_examples(repository, &response_key, None);
        Ok(response)
    }
}

impl SwaggerProvider for JsonRpcSwaggerProvider {
    fn get_swagger(
        &self,
        document_name: &str,
        _host: Option<&str>,
        _base_path: Option<&str>,
    ) -> SwaggerResult<Arc<OpenApi>> {
        let info = self.options.info(document_name)?;

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(document) = cache.get(document_name) {
            debug!(document = document_name, "Serving cached JSON-RPC document");
            return Ok(Arc::clone(document));
        }

        let (document, applicable) = self.build(info)?;
        let document = Arc::new(document);
        info!(
            document = document_name,
            paths = document.paths.len(),
            schemas = document.schemas().map_or(0, BTreeMap::len),
            "Built JSON-RPC document"
        );

        if applicable == 0 {
            warn!(
                document = document_name,
                "No POST action descriptions registered yet, document will be rebuilt on next request"
            );
        } else {
            cache.insert(document_name.to_string(), Arc::clone(&document));
        }
        Ok(document)
    }
}

fn string_schema(
    generator: &dyn SchemaGenerator,
    repository: &mut SchemaRepository,
) -> SwaggerResult<SchemaRef> {
    generator.generate_schema(&TypeDescriptor::String(None), repository)
}

/// Set `id`, `jsonrpc` and `method` examples on whichever of those inline
/// properties the registered schema `schema_id` declares.
fn inject_envelope_examples(
    repository: &mut SchemaRepository,
    schema_id: &str,
    method: Option<&str>,
) {
    let Some(properties) = repository
        .get_mut(schema_id)
        .and_then(|schema| schema.properties.as_mut())
    else {
        return;
    };

    let examples = [
        ("id", Some(Value::String(Uuid::new_v4().to_string()))),
        ("jsonrpc", Some(Value::from(JSONRPC_VERSION))),
        ("method", method.map(Value::from)),
    ];
    for (name, example) in examples {
        if let Some(example) = example
            && let Some(SchemaRef::Inline(property)) = properties.get_mut(name)
        {
            property.example = Some(example);
        }
    }
}

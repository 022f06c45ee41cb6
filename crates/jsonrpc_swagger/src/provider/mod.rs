//! Document providers.
//!
//! - [`JsonRpcSwaggerProvider`] publishes the RPC methods of a registry
//! - [`RestSwaggerGenerator`] publishes the host's REST actions
//! - [`CompositeSwaggerProvider`] routes a document request to one of the two

mod composite;
mod jsonrpc;
mod rest;

use std::sync::Arc;

use jsonrpc_swagger_core::openapi::OpenApi;
use jsonrpc_swagger_core::route::{Parameter, ParameterLocation};

use crate::api_description::{ApiDescription, ApiParameterDescription};
use crate::config::{GeneratorOptions, ParameterFilterContext};
use crate::error::SwaggerResult;
use crate::schema_generator::SchemaGenerator;
use crate::schema_repository::SchemaRepository;

pub use composite::{CompositeSwaggerProvider, DEFAULT_RPC_DOCUMENT};
pub use jsonrpc::JsonRpcSwaggerProvider;
pub use rest::RestSwaggerGenerator;

/// Source of OpenAPI documents by document id.
pub trait SwaggerProvider: Send + Sync {
    /// Build (or return the cached) document `document_name`.
    ///
    /// `host` and `base_path` describe how the document was requested and may
    /// be used for the server list.
    fn get_swagger(
        &self,
        document_name: &str,
        host: Option<&str>,
        base_path: Option<&str>,
    ) -> SwaggerResult<Arc<OpenApi>>;
}

impl<T: SwaggerProvider + ?Sized> SwaggerProvider for Arc<T> {
    fn get_swagger(
        &self,
        document_name: &str,
        host: Option<&str>,
        base_path: Option<&str>,
    ) -> SwaggerResult<Arc<OpenApi>> {
        (**self).get_swagger(document_name, host, base_path)
    }
}

/// Operation parameters for the bindable parameters of `description` accepted by `include`.
pub(crate) fn generate_parameters(
    description: &ApiDescription,
    include: impl Fn(&ApiParameterDescription) -> bool,
    options: &GeneratorOptions,
    generator: &dyn SchemaGenerator,
    repository: &mut SchemaRepository,
) -> SwaggerResult<Vec<Parameter>> {
    description
        .parameters
        .iter()
        .filter(|parameter| parameter.is_bindable() && include(parameter))
        .map(|parameter| generate_parameter(description, parameter, options, generator, repository))
        .collect()
}

fn generate_parameter(
    description: &ApiDescription,
    parameter_description: &ApiParameterDescription,
    options: &GeneratorOptions,
    generator: &dyn SchemaGenerator,
    repository: &mut SchemaRepository,
) -> SwaggerResult<Parameter> {
    let location = parameter_description
        .source
        .location()
        .unwrap_or(ParameterLocation::Query);
    let schema = parameter_description
        .ty
        .as_ref()
        .map(|ty| generator.generate_schema(ty, repository))
        .transpose()?;

    let mut parameter = Parameter {
        name: parameter_description.name.clone(),
        r#in: location,
        description: None,
        // path segments are always required
        required: Some(parameter_description.required || location == ParameterLocation::Path),
        schema,
        example: None,
    };

    let mut context = ParameterFilterContext {
        api_description: description,
        parameter_description,
        schema_repository: repository,
    };
    for filter in &options.parameter_filters {
        filter.apply(&mut parameter, &mut context)?;
    }
    Ok(parameter)
}

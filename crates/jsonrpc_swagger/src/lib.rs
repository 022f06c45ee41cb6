//! OpenAPI (Swagger) documents for JSON-RPC methods.
//!
//! JSON-RPC methods registered in a [`method::MethodRegistry`] are published
//! as synthetic `POST` operations next to the host's ordinary REST document:
//!
//! - [`provider::JsonRpcSwaggerProvider`] builds and memoizes the RPC document
//! - [`provider::RestSwaggerGenerator`] builds the REST document from
//!   [`api_description::ApiDescription`]s
//! - [`provider::CompositeSwaggerProvider`] picks one of the two per document id
//!
//! Types describe their shape through [`Describe`], usually derived:
//!
//! ```ignore
//! use jsonrpc_swagger::Describe;
//!
//! #[derive(Describe, serde::Serialize)]
//! #[serde(rename_all = "camelCase")]
//! pub struct Forecast {
//!     pub city_name: String,
//!     pub temperature_c: f64,
//! }
//! ```

// lets `#[derive(Describe)]` resolve `::jsonrpc_swagger` paths inside this crate
extern crate self as jsonrpc_swagger;

pub mod api_description;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod method;
pub mod naming;
pub mod provider;
pub mod schema_generator;
pub mod schema_repository;
pub mod unique;
pub mod xml_docs;

mod test_helpers;

pub use jsonrpc_swagger_core::{openapi, route, schema};
pub use jsonrpc_swagger_macro::Describe;

pub use api_description::{
    ApiDescription, ApiDescriptionCollection, ApiDescriptionProvider, ApiParameterDescription,
    BindingSource,
};
pub use config::{GeneratorOptions, ParameterFilter, ParameterFilterContext, SwaggerConfiguration};
pub use descriptor::{Describe, TypeDescriptor};
pub use error::{ConfigError, DocumentationError, SwaggerError, SwaggerResult};
pub use method::{MethodDescriptor, MethodHandle, MethodRegistry, ReturnKind, RpcMethodProvider};
pub use naming::NamingPolicy;
pub use provider::{
    CompositeSwaggerProvider, DEFAULT_RPC_DOCUMENT, JsonRpcSwaggerProvider, RestSwaggerGenerator,
    SwaggerProvider,
};
pub use schema_generator::{DefaultSchemaGenerator, SchemaGenerator};
pub use schema_repository::SchemaRepository;
pub use xml_docs::{XmlDocumentation, XmlDocumentationService};

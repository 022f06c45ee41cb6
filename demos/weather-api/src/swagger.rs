//! Swagger documents for the host.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jsonrpc_swagger::openapi::Info;
use jsonrpc_swagger::{
    CompositeSwaggerProvider, DEFAULT_RPC_DOCUMENT, GeneratorOptions, JsonRpcSwaggerProvider,
    RestSwaggerGenerator, SwaggerConfiguration, SwaggerError, SwaggerProvider,
    XmlDocumentation, XmlDocumentationService,
};
use serde::Serialize;
use tracing::error;

use crate::controllers;

/// Doc-comments shipped with the demo.
pub const DOCUMENTATION: &str = include_str!("../docs/weather_api.xml");

pub const REST_DOCUMENT: &str = "json";

pub fn generator_options() -> GeneratorOptions {
    GeneratorOptions::new()
        .swagger_doc(
            DEFAULT_RPC_DOCUMENT,
            Info::new("JSON-RPC Core API", "v1").with_description("JSON-RPC API"),
        )
        .swagger_doc(REST_DOCUMENT, Info::new("REST JSON Core API", "v1"))
}

/// Composite provider serving `jsonrpc` from the RPC registry and every
/// other document from the REST descriptions.
pub fn swagger_provider(
    configuration: SwaggerConfiguration,
    documentation: XmlDocumentationService,
) -> CompositeSwaggerProvider {
    let descriptions = Arc::new(controllers::api_descriptions());
    let documentation: Arc<dyn XmlDocumentation> = Arc::new(documentation);
    let rpc = JsonRpcSwaggerProvider::new(
        controllers::rpc_methods(),
        Arc::clone(&descriptions),
        configuration,
        generator_options(),
    )
    .with_documentation(Arc::clone(&documentation));
    let rest = RestSwaggerGenerator::new(descriptions, generator_options())
        .with_documentation(documentation);
    CompositeSwaggerProvider::new(rpc, rest)
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct SwaggerFailure(SwaggerError);

impl IntoResponse for SwaggerFailure {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SwaggerError::UnknownDocument { .. } => StatusCode::NOT_FOUND,
            other => {
                error!(error = %other, "Failed to build swagger document");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// `GET /swagger/{document}/swagger.json`
pub async fn swagger_json(
    State(provider): State<Arc<dyn SwaggerProvider>>,
    Path(document): Path<String>,
) -> Result<Json<serde_json::Value>, SwaggerFailure> {
    let openapi = provider
        .get_swagger(&document, None, None)
        .map_err(SwaggerFailure)?;
    let value = serde_json::to_value(&*openapi).map_err(|e| SwaggerFailure(e.into()))?;
    Ok(Json(value))
}

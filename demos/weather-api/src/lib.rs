pub mod controllers;
pub mod models;
pub mod swagger;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use jsonrpc_swagger::{SwaggerConfiguration, SwaggerProvider, XmlDocumentationService};
use tracing::warn;

/// Create the application router.
pub fn create_app(
    configuration: SwaggerConfiguration,
    documentation: XmlDocumentationService,
) -> Router {
    let provider: Arc<dyn SwaggerProvider> =
        Arc::new(swagger::swagger_provider(configuration, documentation));

    Router::new()
        .route("/api/WeatherForecast", get(controllers::get))
        .route("/api/WeatherForecast/PutThere", post(controllers::put_there))
        .route(
            "/api/WeatherForecast/PutSomething",
            post(controllers::put_something),
        )
        .route(
            "/swagger/{document}/swagger.json",
            get(swagger::swagger_json),
        )
        .with_state(provider)
}

/// Router documented with the bundled doc-comments.
pub fn create_default_app() -> Router {
    create_app(SwaggerConfiguration::default(), bundled_documentation())
}

/// The bundled doc-comments, or none if they fail to parse.
pub fn bundled_documentation() -> XmlDocumentationService {
    XmlDocumentationService::from_xml(swagger::DOCUMENTATION).unwrap_or_else(|e| {
        warn!(error = %e, "Bundled documentation is malformed, doc-comments disabled");
        XmlDocumentationService::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_documentation_parses() {
        assert_eq!(bundled_documentation().len(), 6);
    }
}

use anyhow::Context;
use jsonrpc_swagger::{SwaggerConfiguration, XmlDocumentationService};
use tracing::info;
use tracing_subscriber::EnvFilter;
use weather_api::{create_app, swagger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let configuration =
        SwaggerConfiguration::from_env().context("Failed to read swagger configuration")?;
    let mut documentation = XmlDocumentationService::for_entry_binary()
        .context("Failed to load documentation next to the executable")?;
    if documentation.is_empty() {
        info!("No documentation next to the executable, using the bundled doc-comments");
        documentation = XmlDocumentationService::from_xml(swagger::DOCUMENTATION)
            .context("Failed to parse bundled documentation")?;
    }
    let app = create_app(configuration, documentation);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Swagger documents at http://localhost:3000/swagger/{{jsonrpc,json}}/swagger.json");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

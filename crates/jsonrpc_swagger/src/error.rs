//! Error types.
//!
//! Document builds fail fast: any [`SwaggerError`] raised while mapping one
//! method aborts the whole document. Missing documentation never produces an
//! error, only empty strings.

use thiserror::Error;

/// Result type for document generation.
pub type SwaggerResult<T> = Result<T, SwaggerError>;

#[derive(Debug, Error)]
pub enum SwaggerError {
    #[error("Unknown Swagger document - \"{document}\". Known Swagger documents: {}", known.join(","))]
    UnknownDocument { document: String, known: Vec<String> },

    #[error("Schema id \"{0}\" is already registered")]
    DuplicateSchemaId(String),

    #[error(
        "Conflicting schema ids: identical id \"{schema_id}\" used for types \"{existing}\" and \"{requested}\""
    )]
    ConflictingSchemaIds {
        schema_id: String,
        existing: String,
        requested: String,
    },

    #[error("Map keys must serialize as strings, \"{0}\" cannot be described")]
    UnsupportedMapKey(String),

    #[error("Path \"{0}\" is generated more than once")]
    DuplicatePath(String),

    #[error("RPC method registry failed: {0}")]
    Registry(String),

    #[error("Failed to serialize schema: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures while loading an XML documentation file.
#[derive(Debug, Error)]
pub enum DocumentationError {
    #[error("Failed to read documentation file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse documentation XML: {0}")]
    Parse(#[from] roxmltree::Error),
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration value '{key}': {details}")]
    Parse { key: String, details: String },

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

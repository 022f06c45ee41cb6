use std::sync::Arc;

use jsonrpc_swagger_core::openapi::OpenApi;

use super::SwaggerProvider;
use crate::error::SwaggerResult;

/// Document id served by the JSON-RPC provider unless configured otherwise.
pub const DEFAULT_RPC_DOCUMENT: &str = "jsonrpc";

/// Serves one reserved document id from the JSON-RPC provider and every
/// other id from the REST generator, so a single UI can browse both.
pub struct CompositeSwaggerProvider {
    rpc: Arc<dyn SwaggerProvider>,
    rest: Arc<dyn SwaggerProvider>,
    rpc_document: String,
}

impl CompositeSwaggerProvider {
    pub fn new(
        rpc: impl SwaggerProvider + 'static,
        rest: impl SwaggerProvider + 'static,
    ) -> Self {
        Self {
            rpc: Arc::new(rpc),
            rest: Arc::new(rest),
            rpc_document: DEFAULT_RPC_DOCUMENT.to_string(),
        }
    }

    #[must_use]
    pub fn with_rpc_document(mut self, document: impl Into<String>) -> Self {
        self.rpc_document = document.into();
        self
    }

    pub fn rpc_document(&self) -> &str {
        &self.rpc_document
    }
}

impl SwaggerProvider for CompositeSwaggerProvider {
    fn get_swagger(
        &self,
        document_name: &str,
        host: Option<&str>,
        base_path: Option<&str>,
    ) -> SwaggerResult<Arc<OpenApi>> {
        if document_name == self.rpc_document {
            self.rpc.get_swagger(document_name, host, base_path)
        } else {
            self.rest.get_swagger(document_name, host, base_path)
        }
    }
}

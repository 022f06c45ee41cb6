#![cfg(test)]
//! Shared test utilities.
//!
//! - [`rpc_options`] - generator options with the `jsonrpc` and `json` documents
//! - [`CountingMethodProvider`] - registry wrapper that counts metadata requests
//! - [`envelope_properties`] - assert a schema is a closed envelope and list its properties
//! - [`inline_example`] - example of an inline property

use std::sync::atomic::{AtomicUsize, Ordering};

use jsonrpc_swagger_core::openapi::Info;
use jsonrpc_swagger_core::schema::{Schema, SchemaRef, SchemaType};

use crate::config::GeneratorOptions;
use crate::error::SwaggerResult;
use crate::method::{MethodRegistry, RouteMetadata, RpcMethodProvider};

/// Options declaring the `jsonrpc` and `json` documents.
pub fn rpc_options() -> GeneratorOptions {
    GeneratorOptions::new()
        .swagger_doc(
            "jsonrpc",
            Info::new("JSON-RPC Core API", "v1").with_description("JSON-RPC API"),
        )
        .swagger_doc("json", Info::new("REST JSON Core API", "v1"))
}

/// Registry wrapper that counts how often the method set was requested.
#[derive(Debug, Default)]
pub struct CountingMethodProvider {
    inner: MethodRegistry,
    calls: AtomicUsize,
}

impl CountingMethodProvider {
    pub fn new(inner: MethodRegistry) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RpcMethodProvider for CountingMethodProvider {
    fn route_metadata(&self) -> SwaggerResult<RouteMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.route_metadata()
    }
}

/// Assert `schema` is a closed object and return its property names.
pub fn envelope_properties(schema: &Schema) -> Vec<&str> {
    assert_eq!(schema.primary_type(), Some(SchemaType::Object), "envelope type");
    assert_eq!(
        schema.additional_properties,
        Some(serde_json::Value::Bool(false)),
        "envelope must reject additional properties"
    );
    assert_eq!(schema.required, Some(Vec::new()), "envelope required list");
    schema.property_names()
}

/// Example of the inline property `name`, `None` when absent or a reference.
pub fn inline_example(schema: &Schema, name: &str) -> Option<serde_json::Value> {
    match schema.properties.as_ref()?.get(name)? {
        SchemaRef::Inline(property) => property.example.clone(),
        SchemaRef::Ref(_) => None,
    }
}

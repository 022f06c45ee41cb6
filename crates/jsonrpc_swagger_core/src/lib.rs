//! jsonrpc_swagger core - OpenAPI structure definitions
//!
//! Serde model of the parts of the OpenAPI 3.1 document that JSON-RPC and
//! REST document generation emit.

pub mod openapi;
pub mod route;
pub mod schema;

pub use openapi::*;
pub use route::*;
pub use schema::*;

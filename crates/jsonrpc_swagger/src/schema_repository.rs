//! Per-build store of named schema definitions.

use std::collections::BTreeMap;

use jsonrpc_swagger_core::schema::{Schema, SchemaRef};

use crate::error::{SwaggerError, SwaggerResult};

/// Named schemas collected while one document is built.
///
/// Definitions are append-only: a schema id is registered once and every
/// later use of the same type resolves to a `$ref` to it.
#[derive(Debug, Clone, Default)]
pub struct SchemaRepository {
    schemas: BTreeMap<String, Schema>,
    /// schema id -> full name of the type that claimed it
    reserved: BTreeMap<String, String>,
}

impl SchemaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `schema_id` for the type `full_name`.
    ///
    /// Returns `Ok(true)` when the id was free, `Ok(false)` when the same type
    /// already holds it, and an error when a different type does.
    pub fn reserve(&mut self, schema_id: &str, full_name: &str) -> SwaggerResult<bool> {
        match self.reserved.get(schema_id) {
            Some(existing) if existing == full_name => Ok(false),
            Some(existing) => Err(SwaggerError::ConflictingSchemaIds {
                schema_id: schema_id.to_string(),
                existing: existing.clone(),
                requested: full_name.to_string(),
            }),
            None => {
                self.reserved
                    .insert(schema_id.to_string(), full_name.to_string());
                Ok(true)
            }
        }
    }

    /// Register `schema` under `schema_id` and return a reference to it.
    pub fn add_definition(&mut self, schema_id: &str, schema: Schema) -> SwaggerResult<SchemaRef> {
        if self.schemas.contains_key(schema_id) {
            return Err(SwaggerError::DuplicateSchemaId(schema_id.to_string()));
        }
        self.schemas.insert(schema_id.to_string(), schema);
        Ok(SchemaRef::reference(schema_id))
    }

    pub fn get(&self, schema_id: &str) -> Option<&Schema> {
        self.schemas.get(schema_id)
    }

    pub fn get_mut(&mut self, schema_id: &str) -> Option<&mut Schema> {
        self.schemas.get_mut(schema_id)
    }

    /// Follow a reference to its definition; inline schemas resolve to themselves.
    pub fn resolve<'a>(&'a self, schema: &'a SchemaRef) -> Option<&'a Schema> {
        match schema {
            SchemaRef::Inline(inline) => Some(&**inline),
            SchemaRef::Ref(reference) => self.get(reference.component_name()?),
        }
    }

    pub fn contains(&self, schema_id: &str) -> bool {
        self.schemas.contains_key(schema_id)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn into_schemas(self) -> BTreeMap<String, Schema> {
        self.schemas
    }
}

//! Configuration.
//!
//! [`SwaggerConfiguration`] holds the JSON-RPC specific settings and can be
//! read from JSON or from the environment. [`GeneratorOptions`] carries the
//! document catalogue and the selector hooks shared by both providers.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::sync::Arc;

use jsonrpc_swagger_core::openapi::Info;
use jsonrpc_swagger_core::route::Parameter;
use serde::Deserialize;

use crate::api_description::{ApiDescription, ApiParameterDescription};
use crate::error::{ConfigError, SwaggerError, SwaggerResult};
use crate::naming::NamingPolicy;
use crate::schema_repository::SchemaRepository;

/// Comma separated server base URLs
pub const ENDPOINTS_VAR: &str = "JSONRPC_SWAGGER_ENDPOINTS";
/// Naming policy name, see [`NamingPolicy`]
pub const NAMING_POLICY_VAR: &str = "JSONRPC_SWAGGER_NAMING_POLICY";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwaggerConfiguration {
    /// Server base URLs published in the document
    pub endpoints: Vec<String>,
    /// Applied to method, parameter and property names
    pub naming_policy: NamingPolicy,
}

impl SwaggerConfiguration {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read [`ENDPOINTS_VAR`] and [`NAMING_POLICY_VAR`]; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoints = env::var(ENDPOINTS_VAR)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let naming_policy = match env::var(NAMING_POLICY_VAR) {
            Ok(value) => value.parse::<NamingPolicy>().map_err(|e| ConfigError::Parse {
                key: NAMING_POLICY_VAR.to_string(),
                details: e.to_string(),
            })?,
            Err(_) => NamingPolicy::default(),
        };

        Ok(Self {
            endpoints,
            naming_policy,
        })
    }

    #[must_use]
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoints.push(url.into());
        self
    }

    #[must_use]
    pub const fn naming_policy(mut self, naming_policy: NamingPolicy) -> Self {
        self.naming_policy = naming_policy;
        self
    }
}

/// Everything a parameter filter may inspect or extend.
pub struct ParameterFilterContext<'a> {
    pub api_description: &'a ApiDescription,
    pub parameter_description: &'a ApiParameterDescription,
    pub schema_repository: &'a mut SchemaRepository,
}

/// Post-processing hook run on every generated operation parameter.
pub trait ParameterFilter: Send + Sync {
    fn apply(
        &self,
        parameter: &mut Parameter,
        context: &mut ParameterFilterContext<'_>,
    ) -> SwaggerResult<()>;
}

pub type OperationIdSelector = Arc<dyn Fn(&ApiDescription) -> Option<String> + Send + Sync>;
pub type TagsSelector = Arc<dyn Fn(&ApiDescription) -> Vec<String> + Send + Sync>;
pub type DocInclusionPredicate = Arc<dyn Fn(&str, &ApiDescription) -> bool + Send + Sync>;

/// Document catalogue and generation hooks.
#[derive(Clone)]
pub struct GeneratorOptions {
    /// document id -> info block
    pub swagger_docs: BTreeMap<String, Info>,
    pub operation_id_selector: OperationIdSelector,
    pub tags_selector: TagsSelector,
    pub parameter_filters: Vec<Arc<dyn ParameterFilter>>,
    pub ignore_obsolete_actions: bool,
    pub doc_inclusion_predicate: DocInclusionPredicate,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            swagger_docs: BTreeMap::new(),
            operation_id_selector: Arc::new(default_operation_id),
            tags_selector: Arc::new(default_tags),
            parameter_filters: Vec::new(),
            ignore_obsolete_actions: false,
            doc_inclusion_predicate: Arc::new(default_doc_inclusion),
        }
    }
}

impl fmt::Debug for GeneratorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorOptions")
            .field("swagger_docs", &self.swagger_docs)
            .field("parameter_filters", &self.parameter_filters.len())
            .field("ignore_obsolete_actions", &self.ignore_obsolete_actions)
            .finish_non_exhaustive()
    }
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document id.
    #[must_use]
    pub fn swagger_doc(mut self, document: impl Into<String>, info: Info) -> Self {
        self.swagger_docs.insert(document.into(), info);
        self
    }

    #[must_use]
    pub fn custom_operation_ids(
        mut self,
        selector: impl Fn(&ApiDescription) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.operation_id_selector = Arc::new(selector);
        self
    }

    #[must_use]
    pub fn tag_actions_by(
        mut self,
        selector: impl Fn(&ApiDescription) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.tags_selector = Arc::new(selector);
        self
    }

    #[must_use]
    pub fn parameter_filter(mut self, filter: impl ParameterFilter + 'static) -> Self {
        self.parameter_filters.push(Arc::new(filter));
        self
    }

    #[must_use]
    pub const fn ignore_obsolete_actions(mut self) -> Self {
        self.ignore_obsolete_actions = true;
        self
    }

    #[must_use]
    pub fn doc_inclusion_predicate(
        mut self,
        predicate: impl Fn(&str, &ApiDescription) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.doc_inclusion_predicate = Arc::new(predicate);
        self
    }

    /// Info block of `document`, or `UnknownDocument` listing the configured ids.
    pub fn info(&self, document: &str) -> SwaggerResult<&Info> {
        self.swagger_docs
            .get(document)
            .ok_or_else(|| SwaggerError::UnknownDocument {
                document: document.to_string(),
                known: self.swagger_docs.keys().cloned().collect(),
            })
    }

    pub fn operation_id(&self, description: &ApiDescription) -> Option<String> {
        (self.operation_id_selector)(description)
    }

    pub fn tags(&self, description: &ApiDescription) -> Vec<String> {
        (self.tags_selector)(description)
    }

    pub fn includes(&self, document: &str, description: &ApiDescription) -> bool {
        (self.doc_inclusion_predicate)(document, description)
    }

    /// Whether obsolete actions are dropped and `description` is one.
    pub const fn skips(&self, description: &ApiDescription) -> bool {
        self.ignore_obsolete_actions && description.obsolete
    }
}

fn default_operation_id(description: &ApiDescription) -> Option<String> {
    description.route_name.clone()
}

fn default_tags(description: &ApiDescription) -> Vec<String> {
    let tag = description
        .display_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .or_else(|| Some(description.controller.as_str()).filter(|name| !name.is_empty()))
        .unwrap_or("default");
    vec![tag.to_string()]
}

fn default_doc_inclusion(document: &str, description: &ApiDescription) -> bool {
    description.group_name.as_deref() == Some(document)
}

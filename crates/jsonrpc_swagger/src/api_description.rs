//! REST action descriptions published by the hosting framework.
//!
//! These play the role of the host's API explorer: one [`ApiDescription`] per
//! routable action, carrying the handler identity so that JSON-RPC methods
//! exposed by the same handler can borrow its tags, operation id and
//! parameters.

use std::borrow::Cow;
use std::sync::{Arc, PoisonError, RwLock};

use jsonrpc_swagger_core::route::{HttpMethod, ParameterLocation};

use crate::descriptor::{Describe, TypeDescriptor};
use crate::method::MethodHandle;

/// Where a parameter value is bound from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingSource {
    Query,
    Header,
    Path,
    Body,
    Form,
    Custom(String),
}

impl BindingSource {
    /// OpenAPI location for sources that have one.
    pub const fn location(&self) -> Option<ParameterLocation> {
        match self {
            Self::Query => Some(ParameterLocation::Query),
            Self::Header => Some(ParameterLocation::Header),
            Self::Path => Some(ParameterLocation::Path),
            Self::Body | Self::Form | Self::Custom(_) => None,
        }
    }
}

/// One bindable parameter of a REST action.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiParameterDescription {
    pub name: String,
    pub source: BindingSource,
    pub required: bool,
    /// Explicitly excluded from binding
    pub bind_never: bool,
    /// Binding metadata allows the value to be bound
    pub binding_allowed: bool,
    pub ty: Option<TypeDescriptor>,
    /// Reflected type text, part of the action's signature
    pub type_name: Option<String>,
}

impl ApiParameterDescription {
    pub fn new(name: impl Into<String>, source: BindingSource) -> Self {
        Self {
            name: name.into(),
            source,
            required: false,
            bind_never: false,
            binding_allowed: true,
            ty: None,
            type_name: None,
        }
    }

    pub fn typed<T: Describe + ?Sized>(name: impl Into<String>, source: BindingSource) -> Self {
        Self {
            ty: Some(T::describe()),
            type_name: Some(T::type_name()),
            ..Self::new(name, source)
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn bind_never(mut self) -> Self {
        self.bind_never = true;
        self
    }

    #[must_use]
    pub const fn binding_disallowed(mut self) -> Self {
        self.binding_allowed = false;
        self
    }

    /// Whether the parameter takes part in request binding at all.
    pub const fn is_bindable(&self) -> bool {
        !self.bind_never && self.binding_allowed
    }
}

/// A routable REST action.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDescription {
    pub http_method: HttpMethod,
    /// Route template relative to the application root, e.g. `api/weather/{id}`
    pub relative_path: String,
    /// Document the action is published in
    pub group_name: Option<String>,
    pub controller: String,
    /// Full path of the type declaring the handler, e.g. `app::controllers::Weather`.
    /// Falls back to `controller` when doc-comments are looked up.
    pub declaring_type: Option<String>,
    pub action: String,
    /// Route name, used as the default operation id
    pub route_name: Option<String>,
    pub handle: Option<MethodHandle>,
    pub obsolete: bool,
    pub display_name: Option<String>,
    pub parameters: Vec<ApiParameterDescription>,
    /// Type written to the success response body
    pub response_type: Option<TypeDescriptor>,
    signature: Option<String>,
}

impl ApiDescription {
    pub fn new(
        http_method: HttpMethod,
        relative_path: impl Into<String>,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            http_method,
            relative_path: relative_path.into(),
            group_name: None,
            controller: controller.into(),
            declaring_type: None,
            action: action.into(),
            route_name: None,
            handle: None,
            obsolete: false,
            display_name: None,
            parameters: Vec::new(),
            response_type: None,
            signature: None,
        }
    }

    #[must_use]
    pub fn declared_in(mut self, declaring_type: impl Into<String>) -> Self {
        self.declaring_type = Some(declaring_type.into());
        self
    }

    /// Override the reflected signature used for doc-comment lookups.
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    #[must_use]
    pub fn group(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = Some(group_name.into());
        self
    }

    #[must_use]
    pub fn route_name(mut self, route_name: impl Into<String>) -> Self {
        self.route_name = Some(route_name.into());
        self
    }

    #[must_use]
    pub fn handle(mut self, handle: MethodHandle) -> Self {
        self.handle = Some(handle);
        self
    }

    #[must_use]
    pub fn handler<F: 'static>(self, handler: &F) -> Self {
        self.handle(MethodHandle::of(handler))
    }

    #[must_use]
    pub const fn obsolete(mut self) -> Self {
        self.obsolete = true;
        self
    }

    #[must_use]
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub fn parameter(mut self, parameter: ApiParameterDescription) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn responds_with<T: Describe + ?Sized>(mut self) -> Self {
        self.response_type = Some(T::describe());
        self
    }

    /// Route template with a leading slash.
    pub fn path(&self) -> String {
        format!("/{}", self.relative_path.trim_start_matches('/'))
    }

    /// Reflected signature text: `Action(Type1, Type2)` over the typed parameters.
    pub fn signature(&self) -> Cow<'_, str> {
        match &self.signature {
            Some(signature) => Cow::Borrowed(signature),
            None => {
                let params = self
                    .parameters
                    .iter()
                    .filter_map(|p| p.type_name.as_deref())
                    .collect::<Vec<_>>()
                    .join(", ");
                Cow::Owned(format!("{}({params})", self.action))
            }
        }
    }

    /// Type the handler is declared in.
    pub fn declaring_type(&self) -> &str {
        self.declaring_type.as_deref().unwrap_or(&self.controller)
    }

    /// Whether this description was produced for `handle`.
    pub fn describes(&self, handle: &MethodHandle) -> bool {
        self.handle.as_ref() == Some(handle)
    }
}

/// Source of the host's current action descriptions.
pub trait ApiDescriptionProvider: Send + Sync {
    fn api_descriptions(&self) -> Vec<ApiDescription>;
}

impl<T: ApiDescriptionProvider + ?Sized> ApiDescriptionProvider for Arc<T> {
    fn api_descriptions(&self) -> Vec<ApiDescription> {
        (**self).api_descriptions()
    }
}

/// Shared, growable description list.
///
/// Hosts that finish registering their actions after the provider was built
/// push into the same collection; readers always see the current list.
#[derive(Debug, Clone, Default)]
pub struct ApiDescriptionCollection {
    items: Arc<RwLock<Vec<ApiDescription>>>,
}

impl ApiDescriptionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_descriptions(descriptions: impl IntoIterator<Item = ApiDescription>) -> Self {
        let collection = Self::new();
        collection.extend(descriptions);
        collection
    }

    pub fn push(&self, description: ApiDescription) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(description);
    }

    pub fn extend(&self, descriptions: impl IntoIterator<Item = ApiDescription>) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(descriptions);
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ApiDescriptionProvider for ApiDescriptionCollection {
    fn api_descriptions(&self) -> Vec<ApiDescription> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

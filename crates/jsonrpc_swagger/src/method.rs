//! RPC method registry model.
//!
//! The registry is the source of truth for which JSON-RPC methods exist and
//! under which route path they are reachable. Document builders only read it.

use std::any::TypeId;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::descriptor::{Describe, TypeDescriptor};
use crate::error::SwaggerResult;

/// Identity of the callable behind an RPC method or a REST action.
///
/// Two handles are equal when they were created from the same function item
/// (or with the same explicit name), which is what correlates an RPC method
/// with the REST description of the same handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodHandle {
    id: Option<TypeId>,
    name: Cow<'static, str>,
}

impl MethodHandle {
    /// Handle of a function item or closure.
    pub fn of<F: 'static>(_handler: &F) -> Self {
        Self {
            id: Some(TypeId::of::<F>()),
            name: Cow::Borrowed(std::any::type_name::<F>()),
        }
    }

    /// Handle identified only by name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One declared parameter of an RPC method.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
    /// Reflected type text, used to resolve documentation member names
    pub type_name: String,
}

impl ParameterDescriptor {
    pub fn of<T: Describe + ?Sized>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: T::describe(),
            type_name: T::type_name(),
        }
    }
}

/// How a method hands back its result.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnKind {
    /// Returns `T` directly
    Value(TypeDescriptor),
    /// Returns a future resolving to `T`
    AsyncValue(TypeDescriptor),
    /// Returns a future resolving to nothing
    AsyncVoid,
}

impl ReturnKind {
    /// The type carried in the JSON-RPC `result` member.
    pub fn unwrap_result(&self) -> TypeDescriptor {
        match self {
            Self::Value(ty) | Self::AsyncValue(ty) => ty.clone(),
            Self::AsyncVoid => TypeDescriptor::Unit,
        }
    }
}

impl Default for ReturnKind {
    fn default() -> Self {
        Self::Value(TypeDescriptor::Unit)
    }
}

/// A registered RPC method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    pub name: String,
    /// Path of the declaring controller, e.g. `weather_api::controllers::WeatherForecast`
    pub controller: String,
    pub handle: MethodHandle,
    pub parameters: Vec<ParameterDescriptor>,
    pub return_kind: ReturnKind,
    signature: Option<String>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, controller: impl Into<String>) -> Self {
        let name = name.into();
        let controller = controller.into();
        Self {
            handle: MethodHandle::named(format!("{controller}::{name}")),
            name,
            controller,
            parameters: Vec::new(),
            return_kind: ReturnKind::default(),
            signature: None,
        }
    }

    #[must_use]
    pub fn handle(mut self, handle: MethodHandle) -> Self {
        self.handle = handle;
        self
    }

    /// Use the identity of `handler` as this method's handle.
    #[must_use]
    pub fn handler<F: 'static>(self, handler: &F) -> Self {
        self.handle(MethodHandle::of(handler))
    }

    #[must_use]
    pub fn param<T: Describe + ?Sized>(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(ParameterDescriptor::of::<T>(name));
        self
    }

    #[must_use]
    pub fn returns<T: Describe + ?Sized>(mut self) -> Self {
        self.return_kind = ReturnKind::Value(T::describe());
        self
    }

    #[must_use]
    pub fn returns_async<T: Describe + ?Sized>(mut self) -> Self {
        self.return_kind = ReturnKind::AsyncValue(T::describe());
        self
    }

    #[must_use]
    pub fn returns_async_void(mut self) -> Self {
        self.return_kind = ReturnKind::AsyncVoid;
        self
    }

    /// Override the reflected signature text, e.g. `Add(Int32, Int32)`.
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Reflected signature text: `Name(Type1, Type2)`.
    pub fn signature(&self) -> Cow<'_, str> {
        match &self.signature {
            Some(signature) => Cow::Borrowed(signature),
            None => {
                let params = self
                    .parameters
                    .iter()
                    .map(|p| p.type_name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Cow::Owned(format!("{}({params})", self.name))
            }
        }
    }
}

/// Every registered method, split into the pathless base route and the
/// methods reachable under each route path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMetadata {
    pub base_route: Vec<MethodDescriptor>,
    pub path_routes: BTreeMap<String, Vec<MethodDescriptor>>,
}

impl RouteMetadata {
    pub fn method_count(&self) -> usize {
        self.base_route.len() + self.path_routes.values().map(Vec::len).sum::<usize>()
    }
}

/// Supplies the current method set on demand.
pub trait RpcMethodProvider: Send + Sync {
    fn route_metadata(&self) -> SwaggerResult<RouteMetadata>;
}

impl<T: RpcMethodProvider + ?Sized> RpcMethodProvider for Arc<T> {
    fn route_metadata(&self) -> SwaggerResult<RouteMetadata> {
        (**self).route_metadata()
    }
}

/// In-memory method registry.
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    metadata: RouteMetadata,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method reachable without a route path.
    pub fn base_method(&mut self, method: MethodDescriptor) -> &mut Self {
        self.metadata.base_route.push(method);
        self
    }

    /// Register a method under `path`. Leading and trailing slashes are ignored.
    pub fn route_method(&mut self, path: &str, method: MethodDescriptor) -> &mut Self {
        self.metadata
            .path_routes
            .entry(normalize_path(path))
            .or_default()
            .push(method);
        self
    }

    /// Register every method of a controller under `path`.
    pub fn route(
        &mut self,
        path: &str,
        methods: impl IntoIterator<Item = MethodDescriptor>,
    ) -> &mut Self {
        for method in methods {
            self.route_method(path, method);
        }
        self
    }
}

impl RpcMethodProvider for MethodRegistry {
    fn route_metadata(&self) -> SwaggerResult<RouteMetadata> {
        Ok(self.metadata.clone())
    }
}

fn normalize_path(path: &str) -> String {
    path.trim_matches('/').to_string()
}

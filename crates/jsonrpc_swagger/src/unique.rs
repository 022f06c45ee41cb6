//! Unique URL keys for RPC methods.
//!
//! JSON-RPC methods have no URL of their own, so each one is published under a
//! synthetic path `/{route}#{method}`. Overloads sharing a name within the same
//! route get a `#N` suffix, counted from 1 in registration order.

use crate::method::{MethodDescriptor, RouteMetadata};
use crate::naming::NamingPolicy;

/// A method paired with its unique path key.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueMethodEntry<'a> {
    pub url: String,
    pub method: &'a MethodDescriptor,
}

impl UniqueMethodEntry<'_> {
    /// Key used for schema ids: `/` becomes `_` and `#` becomes `|`.
    pub fn schema_key(&self) -> String {
        schema_key(&self.url)
    }
}

pub fn schema_key(url: &str) -> String {
    url.replace('/', "_").replace('#', "|")
}

/// Entries for the base route followed by every path route.
pub fn unique_methods<'a>(
    metadata: &'a RouteMetadata,
    naming_policy: &NamingPolicy,
) -> Vec<UniqueMethodEntry<'a>> {
    let mut entries = scope_entries(&metadata.base_route, "", naming_policy);
    for (path, methods) in &metadata.path_routes {
        entries.extend(scope_entries(methods, path, naming_policy));
    }
    entries
}

/// Group by declared name in first-appearance order and number the collisions.
fn scope_entries<'a>(
    methods: &'a [MethodDescriptor],
    path: &str,
    naming_policy: &NamingPolicy,
) -> Vec<UniqueMethodEntry<'a>> {
    let mut groups: Vec<(&str, Vec<&'a MethodDescriptor>)> = Vec::new();
    for method in methods {
        match groups.iter_mut().find(|(name, _)| *name == method.name) {
            Some((_, group)) => group.push(method),
            None => groups.push((&method.name, vec![method])),
        }
    }

    let mut entries = Vec::with_capacity(methods.len());
    for (_, group) in groups {
        let numbered = group.len() > 1;
        for (index, method) in group.into_iter().enumerate() {
            let mut url = format!("/{path}#{}", naming_policy.convert_name(&method.name));
            if numbered {
                url.push_str(&format!("#{}", index + 1));
            }
            entries.push(UniqueMethodEntry { url, method });
        }
    }
    entries
}

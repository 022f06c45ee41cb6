//! Doc-comment lookup backed by an XML documentation file.
//!
//! The file follows the usual doc-comment layout:
//!
//! ```xml
//! <doc>
//!   <members>
//!     <member name="M:weather_api.controllers.Weather.forecast(str)">
//!       <summary>Returns the forecast for a city.</summary>
//!       <param name="city" example="Berlin">City name</param>
//!     </member>
//!   </members>
//! </doc>
//! ```
//!
//! Every lookup answers with an empty string when the file, the member or the
//! requested child is missing.

mod humanize;
pub mod member_name;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::api_description::ApiDescription;
use crate::descriptor::{FieldDescriptor, ObjectDescriptor, TypeDescriptor};
use crate::error::DocumentationError;
use crate::method::{MethodDescriptor, ParameterDescriptor};

/// Point lookups into doc-comments.
pub trait XmlDocumentation: Send + Sync {
    /// `<summary>` of a named object or enum type.
    fn summary_for_type(&self, ty: &TypeDescriptor) -> String;

    /// `<summary>` of an RPC method.
    fn summary_for_method(&self, method: &MethodDescriptor) -> String;

    /// `<summary>` of the handler behind a REST action.
    fn summary_for_action(&self, description: &ApiDescription) -> String;

    /// `example` attribute of the method's `<param>` entry for `parameter`.
    fn parameter_example(&self, method: &MethodDescriptor, parameter: &ParameterDescriptor)
    -> String;

    /// `<example>` of a property.
    fn property_example(&self, object: &ObjectDescriptor, field: &FieldDescriptor) -> String;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MemberDoc {
    summary: Option<String>,
    example: Option<String>,
    /// parameter name -> `example` attribute
    param_examples: HashMap<String, String>,
}

/// Immutable index of one documentation file.
#[derive(Debug, Clone, Default)]
pub struct XmlDocumentationService {
    members: HashMap<String, MemberDoc>,
}

impl XmlDocumentationService {
    /// Service that knows nothing; every lookup yields an empty string.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `path`. A missing file yields an empty service.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentationError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "Documentation file not found, doc-comments disabled");
            return Ok(Self::empty());
        }
        let text = std::fs::read_to_string(path).map_err(|source| DocumentationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let service = Self::from_xml(&text)?;
        debug!(
            path = %path.display(),
            members = service.members.len(),
            "Loaded documentation file"
        );
        Ok(service)
    }

    /// Parse documentation XML held in memory.
    pub fn from_xml(xml: &str) -> Result<Self, DocumentationError> {
        let document = roxmltree::Document::parse(xml)?;
        let root = document.root_element();
        if !root.has_tag_name("doc") {
            return Ok(Self::empty());
        }

        let mut members = HashMap::new();
        let entries = root
            .children()
            .filter(|n| n.has_tag_name("members"))
            .flat_map(|n| n.children())
            .filter(|n| n.has_tag_name("member"));
        for entry in entries {
            let Some(name) = entry.attribute("name") else {
                continue;
            };
            // first entry wins
            members
                .entry(name.to_string())
                .or_insert_with(|| parse_member(entry));
        }
        Ok(Self { members })
    }

    /// Load the file named after the running executable from the executable's directory.
    pub fn for_entry_binary() -> Result<Self, DocumentationError> {
        match std::env::current_exe() {
            Ok(exe) => Self::for_executable(exe),
            Err(e) => {
                warn!(error = %e, "Cannot locate the running executable, doc-comments disabled");
                Ok(Self::empty())
            }
        }
    }

    /// Load `<stem>.xml` next to the executable at `exe`.
    pub fn for_executable(exe: impl AsRef<Path>) -> Result<Self, DocumentationError> {
        match doc_path_for(exe.as_ref()) {
            Some(path) => Self::from_path(path),
            None => Ok(Self::empty()),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn member(&self, member_id: &str) -> Option<&MemberDoc> {
        self.members.get(member_id)
    }

    fn method_member(&self, method: &MethodDescriptor) -> Option<&MemberDoc> {
        let member_id =
            member_name::for_method(&method.controller, &method.name, &method.signature());
        self.member(&member_id)
    }
}

impl XmlDocumentation for XmlDocumentationService {
    fn summary_for_type(&self, ty: &TypeDescriptor) -> String {
        let full_name = match ty {
            TypeDescriptor::Object(object) => &object.full_name,
            TypeDescriptor::Enum(enumeration) => &enumeration.full_name,
            _ => return String::new(),
        };
        self.member(&member_name::for_type(full_name))
            .and_then(|member| member.summary.clone())
            .unwrap_or_default()
    }

    fn summary_for_method(&self, method: &MethodDescriptor) -> String {
        self.method_member(method)
            .and_then(|member| member.summary.clone())
            .unwrap_or_default()
    }

    fn summary_for_action(&self, description: &ApiDescription) -> String {
        let member_id = member_name::for_method(
            description.declaring_type(),
            &description.action,
            &description.signature(),
        );
        self.member(&member_id)
            .and_then(|member| member.summary.clone())
            .unwrap_or_default()
    }

    fn parameter_example(
        &self,
        method: &MethodDescriptor,
        parameter: &ParameterDescriptor,
    ) -> String {
        self.method_member(method)
            .and_then(|member| member.param_examples.get(&parameter.name).cloned())
            .unwrap_or_default()
    }

    fn property_example(&self, object: &ObjectDescriptor, field: &FieldDescriptor) -> String {
        self.member(&member_name::for_property(&object.full_name, &field.name))
            .and_then(|member| member.example.clone())
            .unwrap_or_default()
    }
}

fn parse_member(entry: roxmltree::Node<'_, '_>) -> MemberDoc {
    let child = |tag: &str| entry.children().find(|n| n.has_tag_name(tag));
    MemberDoc {
        summary: child("summary").map(humanize::humanize),
        example: child("example").map(humanize::humanize),
        param_examples: entry
            .children()
            .filter(|n| n.has_tag_name("param"))
            .filter_map(|n| Some((n.attribute("name")?, n.attribute("example")?)))
            .fold(HashMap::new(), |mut examples, (name, example)| {
                examples
                    .entry(name.to_string())
                    .or_insert_with(|| example.to_string());
                examples
            }),
    }
}

/// Documentation file of the running executable: `<exe dir>/<exe stem>.xml`.
pub fn entry_binary_doc_path() -> Option<PathBuf> {
    doc_path_for(&std::env::current_exe().ok()?)
}

fn doc_path_for(exe: &Path) -> Option<PathBuf> {
    let stem = exe.file_stem()?;
    let mut path = exe.parent()?.join(stem);
    path.set_extension("xml");
    Some(path)
}

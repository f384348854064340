//! Core abstractions for backend emission
//!
//! This crate defines the contract between the marked-template IR and the
//! concrete backend emitters (dom, ssr), plus the binding-descriptor
//! generator every backend's emissions feed into.
//!
//! ## Key Abstractions
//!
//! - **`TemplateEmitter`**: Trait for serializing the IR into one target dialect
//! - **`Emission`**: One backend's output text plus the slots it omitted
//! - **`EmitOptions`**: Per-backend option bag
//! - **`descriptor`**: Binding descriptor generation

pub mod descriptor;
pub mod escape;
mod error;

pub use descriptor::{BindingDescriptor, BindingEntry, SlotBinding};
pub use error::EmitError;

use marq_ir::MarkedTemplate;
use marq_types::SlotId;

/// One backend's serialized output for one component.
#[derive(Debug, Clone)]
pub struct Emission {
    /// Backend identifier, e.g. `"dom"` or `"ssr"`.
    pub backend: &'static str,
    /// The emitted template text.
    pub source: String,
    /// Slots this backend could not represent and omitted. The binding
    /// descriptor records these so the client runtime can still patch them
    /// from the client bundle.
    pub omitted: Vec<SlotId>,
}

/// Per-backend emission options, populated from the build configuration's
/// adapter option bag.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Module specifier the dom backend imports its runtime from.
    pub runtime_module: String,
    /// Collapse indentation in the ssr backend's output.
    pub minify: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            runtime_module: "@marq/runtime".to_string(),
            minify: false,
        }
    }
}

impl EmitOptions {
    /// Reads options from one backend's adapter option object. Unknown keys
    /// are ignored; the config file's own validation is out of scope.
    pub fn from_adapter_options(value: &serde_json::Value) -> Self {
        let mut options = Self::default();
        if let Some(module) = value.get("runtimeModule").and_then(|v| v.as_str()) {
            options.runtime_module = module.to_string();
        }
        if let Some(minify) = value.get("minify").and_then(|v| v.as_bool()) {
            options.minify = minify;
        }
        options
    }
}

/// A serializer translating the shared IR into one target template dialect.
///
/// Emitters are pure: identical IR and options yield identical output. Each
/// emitter must preserve the slot identifier set and order, the scope
/// attribute on the root element, and the skeleton's element/attribute
/// structure; they differ only in surface syntax, escaping, and event
/// handling. New backends are added by implementing this trait, never by
/// branching inside extraction.
pub trait TemplateEmitter: Send + Sync {
    /// Stable backend identifier used in artifact naming and descriptors.
    fn backend_id(&self) -> &'static str;

    /// Serializes one marked template.
    fn emit(&self, template: &MarkedTemplate, options: &EmitOptions)
    -> Result<Emission, EmitError>;

    /// Output file name for one component, derived deterministically from
    /// the component name so rebuilds overwrite.
    fn file_name(&self, component: &str) -> String;
}

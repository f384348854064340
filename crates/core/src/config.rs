//! Project build configuration.
//!
//! A project is an ordered list of component sources (files, or directories
//! scanned for `.mq` files) plus an output directory. Backend-specific knobs
//! live in per-backend option bags keyed by backend identifier, so adding a
//! backend never changes the config shape.

use crate::error::CompileError;
use marq_emit_core::EmitOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Component sources to compile. A directory entry stands for the `.mq`
    /// files directly inside it.
    pub components: Vec<PathBuf>,
    /// Directory every artifact is written into.
    pub out_dir: PathBuf,
    /// Per-backend option bags, keyed by backend identifier.
    #[serde(default)]
    pub adapter_options: BTreeMap<String, serde_json::Value>,
}

impl ProjectConfig {
    pub fn new(components: Vec<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        ProjectConfig {
            components,
            out_dir: out_dir.into(),
            adapter_options: BTreeMap::new(),
        }
    }

    /// Loads a JSON project config from disk.
    pub fn from_file(path: &Path) -> Result<Self, CompileError> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            CompileError::Config(format!("invalid project config {}: {}", path.display(), e))
        })
    }

    /// Resolved emission options for one backend. Backends without an
    /// option bag get the defaults.
    pub fn options_for(&self, backend: &str) -> EmitOptions {
        self.adapter_options
            .get(backend)
            .map(EmitOptions::from_adapter_options)
            .unwrap_or_default()
    }
}

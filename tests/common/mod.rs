pub mod fixtures;

use marq::{Artifact, CompileError, CompiledComponent, Compiler};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around one compiled component with artifact lookup helpers
pub struct Compiled {
    pub component: CompiledComponent,
}

impl Compiled {
    pub fn artifact(&self, suffix: &str) -> &Artifact {
        self.component
            .artifacts
            .iter()
            .find(|a| a.file_name.ends_with(suffix))
            .unwrap_or_else(|| panic!("no artifact ending in '{}'", suffix))
    }

    pub fn has_artifact(&self, suffix: &str) -> bool {
        self.component
            .artifacts
            .iter()
            .any(|a| a.file_name.ends_with(suffix))
    }

    /// The dom backend's JSX module
    pub fn jsx(&self) -> &str {
        &self.artifact(".client.jsx").contents
    }

    /// The ssr backend's HTML template
    pub fn html(&self) -> &str {
        &self.artifact(".server.html").contents
    }

    /// The binding descriptor, parsed back from its JSON artifact
    pub fn descriptor(&self) -> Value {
        serde_json::from_str(&self.artifact(".bindings.json").contents)
            .expect("descriptor artifact should be valid JSON")
    }

    /// Slot entries from the descriptor, in table order
    pub fn descriptor_slots(&self) -> Vec<Value> {
        self.descriptor()["slots"]
            .as_array()
            .expect("descriptor should carry a slot array")
            .clone()
    }
}

/// Compile one component source through the stock backend set
pub fn compile(source: &str) -> Result<Compiled, CompileError> {
    Compiler::new()
        .compile_source(source)
        .map(|component| Compiled { component })
}

pub fn compile_ok(source: &str) -> Compiled {
    match compile(source) {
        Ok(compiled) => compiled,
        Err(e) => panic!("component should compile, got: {}", e),
    }
}

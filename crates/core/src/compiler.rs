//! The compilation pipeline for a single component source.
//!
//! `parse -> analyze -> extract -> emit` with every stage pure; the same
//! source and options always produce byte-identical artifacts. The compiler
//! owns the backend set, so callers never branch on target syntax.

use crate::config::ProjectConfig;
use crate::error::CompileError;
use marq_analysis::Analysis;
use marq_emit_core::{BindingDescriptor, EmitOptions, Emission, TemplateEmitter};
use marq_emit_dom::JsxEmitter;
use marq_emit_ssr::SsrEmitter;
use marq_ir::MarkedTemplate;
use marq_syntax::parse_component;
use marq_types::RenderMode;
use std::collections::HashMap;

/// The one backend that only exists client-side; server-only components
/// skip it.
const CLIENT_BACKEND: &str = "dom";

/// One output file, still in memory.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub contents: String,
}

/// Everything the pipeline produced for one component.
#[derive(Debug)]
pub struct CompiledComponent {
    pub component: String,
    pub mode: RenderMode,
    pub template: MarkedTemplate,
    pub descriptor: BindingDescriptor,
    /// Backend templates plus the binding descriptor, in emission order.
    pub artifacts: Vec<Artifact>,
}

/// Compiles component sources through the configured backend set.
pub struct Compiler {
    emitters: Vec<Box<dyn TemplateEmitter>>,
    options: HashMap<String, EmitOptions>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// A compiler with the stock dom and ssr backends and default options.
    pub fn new() -> Self {
        Compiler {
            emitters: vec![Box::new(JsxEmitter), Box::new(SsrEmitter)],
            options: HashMap::new(),
        }
    }

    /// A compiler whose backend options come from the project config's
    /// adapter option bags.
    pub fn from_config(config: &ProjectConfig) -> Self {
        let mut compiler = Self::new();
        let backends: Vec<&'static str> = compiler
            .emitters
            .iter()
            .map(|emitter| emitter.backend_id())
            .collect();
        for backend in backends {
            compiler
                .options
                .insert(backend.to_string(), config.options_for(backend));
        }
        compiler
    }

    /// Registers an additional backend.
    pub fn with_emitter(mut self, emitter: Box<dyn TemplateEmitter>) -> Self {
        self.emitters.push(emitter);
        self
    }

    /// Overrides one backend's emission options.
    pub fn with_options(mut self, backend: &str, options: EmitOptions) -> Self {
        self.options.insert(backend.to_string(), options);
        self
    }

    fn options_for(&self, backend: &str) -> EmitOptions {
        self.options.get(backend).cloned().unwrap_or_default()
    }

    /// Runs the full pipeline on one component source. Any stage error
    /// aborts the component; no partial artifacts are produced.
    pub fn compile_source(&self, source: &str) -> Result<CompiledComponent, CompileError> {
        let component = parse_component(source)?;
        let analysis = Analysis::analyze(&component)?;
        let template = marq_extract::extract(&component, &analysis)?;
        let name = template.component.clone();
        log::debug!(
            "component '{}': {} slots, mode {:?}",
            name,
            template.slots.len(),
            template.mode
        );

        let mut emissions: Vec<Emission> = Vec::new();
        let mut artifacts: Vec<Artifact> = Vec::new();
        for emitter in &self.emitters {
            if template.mode == RenderMode::ServerOnly && emitter.backend_id() == CLIENT_BACKEND {
                log::debug!("skipping dom emission for server-only component '{}'", name);
                continue;
            }
            let options = self.options_for(emitter.backend_id());
            let emission = emitter.emit(&template, &options)?;
            artifacts.push(Artifact {
                file_name: emitter.file_name(&name),
                contents: emission.source.clone(),
            });
            emissions.push(emission);
        }

        let descriptor = BindingDescriptor::generate(&template, &emissions);
        artifacts.push(Artifact {
            file_name: BindingDescriptor::file_name(&name),
            contents: descriptor.to_json()?,
        });

        Ok(CompiledComponent {
            component: name,
            mode: template.mode,
            template,
            descriptor,
            artifacts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTER: &str = r#"
"use client";

component Counter() {
    let count = signal(0);
    let doubled = derived(count * 2);

    <div class="counter">
        <span>{count}</span>
        <span>{doubled}</span>
        <button onClick={count = count + 1}>+</button>
        <button onClick={count = count - 1}>-</button>
        <button onClick={count = 0}>reset</button>
    </div>
}
"#;

    #[test]
    fn test_counter_produces_three_artifacts() {
        let compiled = Compiler::new().compile_source(COUNTER).unwrap();
        let names: Vec<&str> = compiled
            .artifacts
            .iter()
            .map(|a| a.file_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Counter.client.jsx",
                "Counter.server.html",
                "Counter.bindings.json",
            ]
        );
    }

    #[test]
    fn test_server_only_skips_dom_backend() {
        let compiled = Compiler::new()
            .compile_source(
                r#""use server";

                component Page(title) {
                    let visits = signal(0);
                    <main><h1>{title}</h1><p>{visits}</p></main>
                }"#,
            )
            .unwrap();
        assert!(
            compiled
                .artifacts
                .iter()
                .all(|a| !a.file_name.ends_with(".client.jsx"))
        );
        assert_eq!(compiled.artifacts.len(), 2);
    }

    #[test]
    fn test_cycle_yields_cyclic_dependency_error() {
        let err = Compiler::new()
            .compile_source(
                r#"component C() {
                    let a = derived(b + 1);
                    let b = derived(a + 1);
                    <p>{a}</p>
                }"#,
            )
            .unwrap_err();
        assert!(matches!(err, CompileError::CyclicDependency { .. }));
    }

    #[test]
    fn test_spread_yields_unsupported_error() {
        let err = Compiler::new()
            .compile_source(
                r#"component C(rest) {
                    <div {...rest}>x</div>
                }"#,
            )
            .unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedPattern { .. }));
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let a = Compiler::new().compile_source(COUNTER).unwrap();
        let b = Compiler::new().compile_source(COUNTER).unwrap();
        for (x, y) in a.artifacts.iter().zip(&b.artifacts) {
            assert_eq!(x.file_name, y.file_name);
            assert_eq!(x.contents, y.contents);
        }
    }

    #[test]
    fn test_minify_option_applies_to_ssr_only() {
        let minified = Compiler::new()
            .with_options(
                "ssr",
                EmitOptions {
                    minify: true,
                    ..EmitOptions::default()
                },
            )
            .compile_source(COUNTER)
            .unwrap();
        let html = minified
            .artifacts
            .iter()
            .find(|a| a.file_name.ends_with(".server.html"))
            .unwrap();
        assert!(html.contents.lines().all(|line| !line.starts_with(' ')));
    }
}

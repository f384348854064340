//! # marq
//!
//! Compiler for reactive UI components. A component source file declares
//! signals and derived values and renders a markup body; the compiler
//! partitions that body into a static skeleton and a table of dynamic
//! slots, then emits the skeleton for every configured backend (a JSX
//! module for the client dom, a tag-delimited HTML template for the
//! server) plus one binding descriptor the client runtime uses to wire
//! updates at mount time.
//!
//! ## Usage
//!
//! ```no_run
//! use marq::ProjectBuilder;
//!
//! fn main() -> Result<(), marq::CompileError> {
//!     let report = ProjectBuilder::new()
//!         .with_component("src/Counter.mq")
//!         .with_out_dir("dist")
//!         .build()?;
//!     assert!(report.is_success());
//!     Ok(())
//! }
//! ```
//!
//! Single sources compile in memory through [`Compiler::compile_source`];
//! whole projects go through [`ProjectBuilder`], which reads a config,
//! compiles every file on the configured executor, and writes artifacts.

pub mod builder;

pub use builder::ProjectBuilder;

// Core pipeline
pub use marq_core::{
    Artifact, BuildFailure, BuildReport, BuiltComponent, CompileError, CompiledComponent,
    Compiler, ProjectConfig, build_project,
};

// Execution strategies
pub use marq_executor::{Executor, ExecutorImpl, SyncExecutor};
#[cfg(feature = "rayon")]
pub use marq_executor::RayonExecutor;

// Frontend
pub use marq_analysis::{Analysis, AnalysisError};
pub use marq_syntax::{Component, ParseError, parse_component};

// IR and backends
pub use marq_emit_core::{
    BindingDescriptor, EmitError, EmitOptions, Emission, TemplateEmitter,
};
pub use marq_emit_dom::JsxEmitter;
pub use marq_emit_ssr::SsrEmitter;
pub use marq_extract::extract;
pub use marq_ir::MarkedTemplate;
pub use marq_types::{BindingKind, RenderMode, SCOPE_ATTR, SLOT_ATTR, SlotId, SlotKind, UpdateKind};

//! # marq-core
//!
//! Integration layer for the marq component compiler.
//!
//! This crate wires the pipeline crates together:
//! - **compiler**: `parse -> analyze -> extract -> emit` for one source
//! - **build**: parallel whole-project builds with per-file failure isolation
//! - **config**: project configuration and per-backend option bags
//! - **error**: the unified error taxonomy for every stage
//!
//! ## Design Principle
//!
//! Everything below this crate is pure: the frontend and backend crates
//! never touch the filesystem. File reading, artifact writing, and
//! parallelism live here, so every other crate stays trivially testable.

// Re-export pipeline crates
pub use marq_analysis as analysis;
pub use marq_emit_core as emit;
pub use marq_ir as ir;
pub use marq_syntax as syntax;
pub use marq_types as types;

pub mod build;
pub mod compiler;
pub mod config;
pub mod error;

// Re-export from internal modules
pub use build::{BuildFailure, BuildReport, BuiltComponent, build_project};
pub use compiler::{Artifact, CompiledComponent, Compiler};
pub use config::ProjectConfig;
pub use error::CompileError;

// Re-export the executor abstraction
pub use marq_executor::{Executor, ExecutorImpl, SyncExecutor};

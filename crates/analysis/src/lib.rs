//! Reactive dependency analysis.
//!
//! Walks a component's declaration sites, builds the reactive binding table,
//! and resolves every expression's transitive signal dependencies, rejecting
//! cyclic derived bindings.

pub mod analyzer;
pub mod error;

pub use analyzer::{Analysis, ReactiveBinding};
pub use error::AnalysisError;

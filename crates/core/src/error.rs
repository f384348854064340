//! Defines the unified error types for all compiler operations.
//!
//! The frontend and backend crates each carry their own error enums; this
//! module funnels them into one taxonomy so callers match on failure
//! category, not on pipeline stage.

use marq_analysis::AnalysisError;
use marq_emit_core::EmitError;
use marq_extract::ExtractError;
use marq_ir::IrError;
use marq_syntax::{Location, ParseError};
use thiserror::Error;

/// The main error enum for all high-level compiler operations.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Syntax error: {message}{}", fmt_location(.location))]
    Syntax {
        message: String,
        location: Option<Location>,
    },
    #[error("Unsupported pattern: {construct}{}", fmt_location(.location))]
    UnsupportedPattern {
        construct: String,
        location: Option<Location>,
    },
    #[error("Cyclic dependency: {}", .chain.join(" -> "))]
    CyclicDependency { chain: Vec<String> },
    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),
    #[error("Output conflict: components '{first}' and '{second}' both produce '{file}'")]
    OutputConflict {
        first: String,
        second: String,
        file: String,
    },
    #[error("Emission error: {0}")]
    Emit(#[from] EmitError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompileError {
    /// Fatal errors abort the whole project build; everything else is
    /// isolated to the component file that caused it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CompileError::OutputConflict { .. } | CompileError::Config(_)
        )
    }
}

fn fmt_location(location: &Option<Location>) -> String {
    match location {
        Some(location) => format!(" at {}", location),
        None => String::new(),
    }
}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Syntax { message, location } => CompileError::Syntax {
                message,
                location: Some(location),
            },
            ParseError::Unsupported {
                construct,
                location,
            } => CompileError::UnsupportedPattern {
                construct,
                location: Some(location),
            },
            ParseError::Expression {
                expr,
                message,
                location,
            } => CompileError::Syntax {
                message: format!("in expression '{}': {}", expr, message),
                location: Some(location),
            },
        }
    }
}

impl From<AnalysisError> for CompileError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::CyclicDependency { chain } => CompileError::CyclicDependency { chain },
            AnalysisError::DuplicateBinding(name) => CompileError::Syntax {
                message: format!("binding '{}' is declared twice", name),
                location: None,
            },
        }
    }
}

impl From<ExtractError> for CompileError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::Unsupported {
                construct,
                location,
            } => CompileError::UnsupportedPattern {
                construct,
                location,
            },
            ExtractError::Ir(e) => e.into(),
        }
    }
}

impl From<IrError> for CompileError {
    fn from(e: IrError) -> Self {
        match e {
            IrError::InternalConsistency(message) => CompileError::InternalConsistency(message),
        }
    }
}

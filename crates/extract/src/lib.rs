//! Slot extraction.
//!
//! Converts a dependency-annotated component AST into the static skeleton
//! and ordered slot table the marked-template IR is built from.

pub mod error;
pub mod extractor;

pub use error::ExtractError;
pub use extractor::extract;

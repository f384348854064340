use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrError {
    /// An IR invariant was violated. This signals a defect in extraction,
    /// not a user error; it is always fatal to the file's compilation.
    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),
}

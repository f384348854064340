use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Emission failed for backend '{backend}': {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },
}

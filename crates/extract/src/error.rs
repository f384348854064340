use marq_ir::IrError;
use marq_syntax::Location;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unsupported pattern: {construct}{}", fmt_location(.location))]
    Unsupported {
        construct: String,
        location: Option<Location>,
    },

    #[error(transparent)]
    Ir(#[from] IrError),
}

fn fmt_location(location: &Option<Location>) -> String {
    match location {
        Some(location) => format!(" at {}", location),
        None => String::new(),
    }
}

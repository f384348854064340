use thiserror::Error;

/// A line/column position in a component source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

impl From<(usize, usize)> for Location {
    fn from((line, col): (usize, usize)) -> Self {
        Location { line, col }
    }
}

/// Errors produced while parsing one component source file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Syntax error: {message} at {location}")]
    Syntax { message: String, location: Location },

    #[error("Unsupported pattern: {construct} at {location}")]
    Unsupported { construct: String, location: Location },

    #[error("Expression parse error in '{expr}': {message} at {location}")]
    Expression {
        expr: String,
        message: String,
        location: Location,
    },
}

impl ParseError {
    pub fn location(&self) -> Location {
        match self {
            ParseError::Syntax { location, .. }
            | ParseError::Unsupported { location, .. }
            | ParseError::Expression { location, .. } => *location,
        }
    }
}

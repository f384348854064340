use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Cyclic dependency between derived bindings: {}", .chain.join(" -> "))]
    CyclicDependency { chain: Vec<String> },

    #[error("Duplicate reactive binding '{0}'")]
    DuplicateBinding(String),
}

//! Work-stealing thread pool execution via rayon.

use crate::Executor;
use rayon::prelude::*;

/// Executes work items on rayon's global thread pool. Results come back in
/// input order regardless of completion order.
#[derive(Clone, Debug, Default)]
pub struct RayonExecutor;

impl RayonExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for RayonExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        log::debug!("rayon executor mapping {} items", items.len());
        items.into_par_iter().map(f).collect()
    }

    fn execute_all_fallible<T, R, E, F>(&self, items: Vec<T>, f: F) -> Vec<Result<R, E>>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
        F: Fn(T) -> Result<R, E> + Send + Sync + Clone + 'static,
    {
        items.into_par_iter().map(f).collect()
    }

    fn parallelism(&self) -> usize {
        rayon::current_num_threads()
    }

    fn name(&self) -> &'static str {
        "rayon"
    }
}

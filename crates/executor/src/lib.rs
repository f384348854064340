//! Executor implementations for the marq build pipeline.
//!
//! Component files compile independently, so a project build is a map over
//! its file list. This crate provides the execution strategies for that map.
//!
//! ## Available Executors
//!
//! - [`RayonExecutor`]: Work-stealing thread pool (feature: `rayon`)
//! - [`SyncExecutor`]: Sequential execution
//!
//! ## Usage
//!
//! ```ignore
//! use marq_executor::{Executor, ExecutorImpl};
//!
//! let executor = ExecutorImpl::default();
//! let results = executor.execute_all(vec![1, 2, 3], |x| x * 2);
//! ```

#[cfg(feature = "rayon")]
mod rayon_executor;

#[cfg(feature = "rayon")]
pub use rayon_executor::RayonExecutor;

/// Strategy for executing a batch of independent work items.
pub trait Executor: Send + Sync {
    /// Applies `f` to every item, preserving input order in the results.
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static;

    /// Applies a fallible `f` to every item. One item's failure never stops
    /// the others; every result comes back in input order.
    fn execute_all_fallible<T, R, E, F>(&self, items: Vec<T>, f: F) -> Vec<Result<R, E>>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
        F: Fn(T) -> Result<R, E> + Send + Sync + Clone + 'static;

    /// Number of work items this executor runs concurrently.
    fn parallelism(&self) -> usize;

    /// Short identifier for logs.
    fn name(&self) -> &'static str;
}

/// Sequential executor. Deterministic scheduling, no thread overhead;
/// the right choice for small projects and for debugging.
#[derive(Clone, Debug, Default)]
pub struct SyncExecutor;

impl SyncExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SyncExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        items.into_iter().map(f).collect()
    }

    fn execute_all_fallible<T, R, E, F>(&self, items: Vec<T>, f: F) -> Vec<Result<R, E>>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
        F: Fn(T) -> Result<R, E> + Send + Sync + Clone + 'static,
    {
        items.into_iter().map(f).collect()
    }

    fn parallelism(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "sync"
    }
}

/// Runtime choice between the available executors.
///
/// [`Executor`] has methods generic over the work item, so there is no
/// object-safe `dyn Executor`; callers that pick a strategy at runtime hold
/// this enum instead and every call lands on the selected variant.
#[derive(Clone, Debug)]
pub enum ExecutorImpl {
    /// Runs items one after another on the calling thread.
    Sync(SyncExecutor),

    /// Fans items out across the rayon thread pool.
    #[cfg(feature = "rayon")]
    Rayon(RayonExecutor),
}

impl Default for ExecutorImpl {
    /// The rayon pool when the feature is on, otherwise sequential.
    fn default() -> Self {
        #[cfg(feature = "rayon")]
        {
            ExecutorImpl::Rayon(RayonExecutor::new())
        }
        #[cfg(not(feature = "rayon"))]
        {
            ExecutorImpl::Sync(SyncExecutor::new())
        }
    }
}

macro_rules! with_executor {
    ($self:expr, $exec:ident => $call:expr) => {
        match $self {
            ExecutorImpl::Sync($exec) => $call,
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon($exec) => $call,
        }
    };
}

impl Executor for ExecutorImpl {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        with_executor!(self, exec => exec.execute_all(items, f))
    }

    fn execute_all_fallible<T, R, E, F>(&self, items: Vec<T>, f: F) -> Vec<Result<R, E>>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
        F: Fn(T) -> Result<R, E> + Send + Sync + Clone + 'static,
    {
        with_executor!(self, exec => exec.execute_all_fallible(items, f))
    }

    fn parallelism(&self) -> usize {
        with_executor!(self, exec => exec.parallelism())
    }

    fn name(&self) -> &'static str {
        with_executor!(self, exec => exec.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_preserves_order() {
        let results = SyncExecutor::new().execute_all(vec![1, 2, 3], |x| x * 2);
        assert_eq!(results, vec![2, 4, 6]);
    }

    #[test]
    fn test_sync_fallible_isolates_failures() {
        let results = SyncExecutor::new().execute_all_fallible(vec![1, 2, 3], |x| {
            if x == 2 { Err("two") } else { Ok(x) }
        });
        assert_eq!(results, vec![Ok(1), Err("two"), Ok(3)]);
    }

    #[test]
    fn test_default_impl_runs() {
        let results = ExecutorImpl::default().execute_all(vec![1, 2, 3], |x| x + 1);
        assert_eq!(results, vec![2, 3, 4]);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_rayon_preserves_order() {
        let items: Vec<u32> = (0..100).collect();
        let results = RayonExecutor::new().execute_all(items.clone(), |x| x * 2);
        let expected: Vec<u32> = items.iter().map(|x| x * 2).collect();
        assert_eq!(results, expected);
    }
}

//! Fluent construction of project builds.

use marq_core::{BuildReport, CompileError, ProjectConfig, build_project};
use marq_executor::ExecutorImpl;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A builder for configuring and running one project build.
///
/// Wraps [`ProjectConfig`] plus an executor choice; `build` consumes the
/// builder, compiles every component, and writes the artifacts.
pub struct ProjectBuilder {
    config: ProjectConfig,
    executor: ExecutorImpl,
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self {
            config: ProjectConfig::new(Vec::new(), "dist"),
            executor: ExecutorImpl::default(),
        }
    }
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts from a JSON project config on disk.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, CompileError> {
        Ok(Self {
            config: ProjectConfig::from_file(path.as_ref())?,
            executor: ExecutorImpl::default(),
        })
    }

    /// Starts from an already-constructed config.
    pub fn from_config(config: ProjectConfig) -> Self {
        Self {
            config,
            executor: ExecutorImpl::default(),
        }
    }

    /// Adds one component source file.
    pub fn with_component<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.components.push(path.into());
        self
    }

    /// Sets the artifact output directory.
    pub fn with_out_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.out_dir = dir.into();
        self
    }

    /// Sets one backend's adapter option bag.
    pub fn with_adapter_options(mut self, backend: &str, options: Value) -> Self {
        self.config
            .adapter_options
            .insert(backend.to_string(), options);
        self
    }

    /// Selects the execution strategy for the build.
    pub fn with_executor(mut self, executor: ExecutorImpl) -> Self {
        self.executor = executor;
        self
    }

    /// Compiles every configured component and writes the artifacts.
    pub fn build(self) -> Result<BuildReport, CompileError> {
        build_project(&self.config, &self.executor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marq_executor::SyncExecutor;
    use std::fs;

    #[test]
    fn test_builder_accumulates_config() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("Counter.mq");
        fs::write(
            &src,
            r#"component Counter() {
                let count = signal(0);
                <button onClick={count = count + 1}>{count}</button>
            }"#,
        )
        .unwrap();

        let report = ProjectBuilder::new()
            .with_component(&src)
            .with_out_dir(dir.path().join("dist"))
            .with_adapter_options("ssr", serde_json::json!({ "minify": true }))
            .with_executor(ExecutorImpl::Sync(SyncExecutor::new()))
            .build()
            .unwrap();
        assert!(report.is_success());
        let html = fs::read_to_string(dir.path().join("dist/Counter.server.html")).unwrap();
        assert!(html.lines().all(|line| !line.starts_with(' ')));
    }
}

//! Whole-project builds.
//!
//! Component files compile independently, so the build is a parallel map
//! over the config's file list. One file's failure never stops the others;
//! the report carries every failure alongside every success. The only
//! project-level failure is an output conflict, detected before anything is
//! written so a conflicting build leaves no partial output.

use crate::compiler::{CompiledComponent, Compiler};
use crate::config::ProjectConfig;
use crate::error::CompileError;
use marq_executor::{Executor, ExecutorImpl};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of one project build.
#[derive(Debug)]
pub struct BuildReport {
    /// Successfully built components, in config order.
    pub built: Vec<BuiltComponent>,
    /// Per-file failures, in config order.
    pub failures: Vec<BuildFailure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct BuiltComponent {
    pub component: String,
    /// Artifact paths written under the output directory.
    pub files: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct BuildFailure {
    pub path: PathBuf,
    pub error: CompileError,
}

/// Compiles every component in the config and writes the artifacts to the
/// output directory. Returns `Err` only for project-level failures; per-file
/// errors land in the report.
pub fn build_project(
    config: &ProjectConfig,
    executor: &ExecutorImpl,
) -> Result<BuildReport, CompileError> {
    let sources = collect_sources(config)?;
    log::info!(
        "building {} components on the '{}' executor (parallelism {})",
        sources.len(),
        executor.name(),
        executor.parallelism()
    );

    let compiler = Arc::new(Compiler::from_config(config));
    let results = executor.execute_all_fallible(sources, move |path| {
        match compile_file(&compiler, &path) {
            Ok(compiled) => Ok((path, compiled)),
            Err(error) => Err(BuildFailure { path, error }),
        }
    });

    let mut compiled: Vec<(PathBuf, CompiledComponent)> = Vec::new();
    let mut failures: Vec<BuildFailure> = Vec::new();
    for result in results {
        match result {
            Ok(entry) => compiled.push(entry),
            Err(failure) => {
                log::warn!("{}: {}", failure.path.display(), failure.error);
                failures.push(failure);
            }
        }
    }

    check_output_conflicts(&compiled)?;

    std::fs::create_dir_all(&config.out_dir)?;
    let mut built = Vec::with_capacity(compiled.len());
    for (_, component) in compiled {
        let mut files = Vec::with_capacity(component.artifacts.len());
        for artifact in &component.artifacts {
            let path = config.out_dir.join(&artifact.file_name);
            std::fs::write(&path, &artifact.contents)?;
            files.push(path);
        }
        log::info!(
            "built component '{}' ({} artifacts)",
            component.component,
            files.len()
        );
        built.push(BuiltComponent {
            component: component.component,
            files,
        });
    }

    Ok(BuildReport { built, failures })
}

/// Expands the config's component list into concrete source files. A
/// directory entry contributes every `.mq` file directly inside it, in
/// sorted path order so the expansion is deterministic.
fn collect_sources(config: &ProjectConfig) -> Result<Vec<PathBuf>, CompileError> {
    let mut sources = Vec::new();
    for entry in &config.components {
        if entry.is_dir() {
            let mut found = Vec::new();
            for child in std::fs::read_dir(entry)? {
                let path = child?.path();
                if path.extension().is_some_and(|ext| ext == "mq") {
                    found.push(path);
                }
            }
            found.sort();
            log::debug!(
                "{}: {} component sources",
                entry.display(),
                found.len()
            );
            sources.extend(found);
        } else {
            sources.push(entry.clone());
        }
    }
    Ok(sources)
}

fn compile_file(compiler: &Compiler, path: &Path) -> Result<CompiledComponent, CompileError> {
    let source = std::fs::read_to_string(path)?;
    compiler.compile_source(&source)
}

/// Two components writing the same artifact would make the build order
/// observable. Fatal, and checked before any write happens.
fn check_output_conflicts(
    compiled: &[(PathBuf, CompiledComponent)],
) -> Result<(), CompileError> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    for (_, component) in compiled {
        for artifact in &component.artifacts {
            if let Some(first) = owners.insert(&artifact.file_name, &component.component) {
                return Err(CompileError::OutputConflict {
                    first: first.to_string(),
                    second: component.component.clone(),
                    file: artifact.file_name.clone(),
                });
            }
        }
    }
    Ok(())
}

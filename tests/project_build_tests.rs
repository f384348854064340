//! Whole-project builds through the public builder API: parallel
//! compilation, per-file failure isolation, and artifact writing.

mod common;

use common::TestResult;
use common::fixtures::{COUNTER, SERVER_PAGE, TODO_LIST};
use marq::{CompileError, ExecutorImpl, ProjectBuilder, SyncExecutor};
use std::fs;
use std::path::{Path, PathBuf};

fn write_component(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn test_project_build_writes_every_artifact() -> TestResult {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("dist");
    let report = ProjectBuilder::new()
        .with_component(write_component(dir.path(), "Counter.mq", COUNTER))
        .with_component(write_component(dir.path(), "TodoList.mq", TODO_LIST))
        .with_component(write_component(dir.path(), "Page.mq", SERVER_PAGE))
        .with_out_dir(&out)
        .build()?;

    assert!(report.is_success());
    assert_eq!(report.built.len(), 3);
    for name in [
        "Counter.client.jsx",
        "Counter.server.html",
        "Counter.bindings.json",
        "TodoList.client.jsx",
        "Page.server.html",
        "Page.bindings.json",
    ] {
        assert!(out.join(name).exists(), "missing {}", name);
    }
    // Server-only component has no client module.
    assert!(!out.join("Page.client.jsx").exists());
    Ok(())
}

#[test]
fn test_failures_reported_per_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let bad = write_component(
        dir.path(),
        "Bad.mq",
        r#"component Bad(rest) {
            <div {...rest}>x</div>
        }"#,
    );
    let report = ProjectBuilder::new()
        .with_component(write_component(dir.path(), "Counter.mq", COUNTER))
        .with_component(bad.clone())
        .with_out_dir(dir.path().join("dist"))
        .with_executor(ExecutorImpl::Sync(SyncExecutor::new()))
        .build()?;

    assert!(!report.is_success());
    assert_eq!(report.built.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, bad);
    assert!(matches!(
        report.failures[0].error,
        CompileError::UnsupportedPattern { .. }
    ));
    // The good component still built.
    assert!(dir.path().join("dist/Counter.client.jsx").exists());
    Ok(())
}

#[test]
fn test_duplicate_component_names_abort_the_build() -> TestResult {
    let dir = tempfile::tempdir()?;
    let err = ProjectBuilder::new()
        .with_component(write_component(dir.path(), "A.mq", COUNTER))
        .with_component(write_component(dir.path(), "B.mq", COUNTER))
        .with_out_dir(dir.path().join("dist"))
        .build()
        .unwrap_err();

    assert!(matches!(err, CompileError::OutputConflict { .. }));
    assert!(err.is_fatal());
    assert!(!dir.path().join("dist").exists());
    Ok(())
}

#[test]
fn test_adapter_options_reach_their_backend() -> TestResult {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("dist");
    ProjectBuilder::new()
        .with_component(write_component(dir.path(), "Counter.mq", COUNTER))
        .with_out_dir(&out)
        .with_adapter_options("ssr", serde_json::json!({ "minify": true }))
        .with_adapter_options("dom", serde_json::json!({ "runtimeModule": "@acme/rt" }))
        .build()?;

    let html = fs::read_to_string(out.join("Counter.server.html"))?;
    assert!(html.lines().all(|line| !line.starts_with(' ')));
    let jsx = fs::read_to_string(out.join("Counter.client.jsx"))?;
    assert!(jsx.starts_with("import * as __marq from \"@acme/rt\";"));
    Ok(())
}

#[test]
fn test_rebuild_overwrites_in_place() -> TestResult {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("dist");
    let builder = || {
        ProjectBuilder::new()
            .with_component(dir.path().join("Counter.mq"))
            .with_out_dir(&out)
    };
    write_component(dir.path(), "Counter.mq", COUNTER);
    builder().build()?;
    let first = fs::read_to_string(out.join("Counter.client.jsx"))?;
    builder().build()?;
    let second = fs::read_to_string(out.join("Counter.client.jsx"))?;
    assert_eq!(first, second);
    Ok(())
}

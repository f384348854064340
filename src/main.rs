use marq::{CompileError, ProjectBuilder};
use std::env;

/// A simple CLI to build a marq project from a JSON config.
fn main() -> Result<(), CompileError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Compiles reactive component sources into backend templates.");
        eprintln!();
        eprintln!("Usage: {} [path/to/marq.json]", args[0]);
        std::process::exit(1);
    }
    let config_path = args.get(1).map(String::as_str).unwrap_or("marq.json");

    let report = ProjectBuilder::from_config_file(config_path)?.build()?;

    for built in &report.built {
        println!("built {} ({} artifacts)", built.component, built.files.len());
    }
    for failure in &report.failures {
        eprintln!("error: {}: {}", failure.path.display(), failure.error);
    }
    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

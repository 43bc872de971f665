// src/lib.rs

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod types;

use std::path::Path;
use std::time::Instant;

use tracing::{debug, error, info};

use crate::analysis::{analyze, AnalysisReport};
use crate::cli::CliArgs;
use crate::config::loader::COMMAND_LINE_SOURCE;
use crate::config::{configure, from_arguments, Configuration};
use crate::engine::{CatalogEngine, TabularEngine};
use crate::errors::{AnalysisError, Result};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - configuration from a file or from CLI flags
/// - dry-run printing
/// - the catalog engine and the analysis run
pub fn run(args: CliArgs) -> Result<()> {
    let config = configuration_from_args(&args)?;

    if args.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    let mut engine = CatalogEngine::new();
    run_timed(&mut engine, &config)?;
    Ok(())
}

/// Build the configuration described by `args`.
pub fn configuration_from_args(args: &CliArgs) -> Result<Configuration> {
    match (&args.config, &args.output) {
        (Some(path), _) => configure(path),
        (None, Some(output)) => from_arguments(
            output,
            args.input.clone(),
            args.tree.as_deref(),
            &args.histo,
        ),
        // clap requires one of the two.
        (None, None) => Err(AnalysisError::MissingOutput {
            file: COMMAND_LINE_SOURCE.to_string(),
        }),
    }
}

/// Parse `path` and run it against `engine`, reporting any failure.
///
/// Returns `true` only if every projection was written.
pub fn run_config_file<E: TabularEngine>(path: impl AsRef<Path>, engine: &mut E) -> bool {
    let result = configure(path).and_then(|config| run_timed(engine, &config));
    match result {
        Ok(_) => true,
        Err(e) => {
            error!(error = %e, "simple-analysis failed");
            false
        }
    }
}

fn run_timed<E: TabularEngine>(engine: &mut E, config: &Configuration) -> Result<AnalysisReport> {
    let start = Instant::now();
    let report = analyze(engine, config)?;
    info!(
        output = %report.output_artifact_path,
        projections = report.persisted.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "analysis complete"
    );
    Ok(report)
}

/// Simple dry-run output: print what would be read and projected.
fn print_dry_run(config: &Configuration) {
    println!("simple-analysis dry-run");
    println!("  source = {}", config.input_file_name);
    println!("  output = {}", config.output_artifact_path);
    if config.dataset_name.is_empty() {
        println!("  dataset = (from first input)");
    } else {
        println!("  dataset = {} (or first input, if it is a file)", config.dataset_name);
    }
    println!();

    println!("inputs ({}):", config.input_files.len());
    for input in &config.input_files {
        println!("  - {input}");
    }
    println!();

    println!("projections ({}):", config.projections.len());
    for p in &config.projections {
        println!("  - {}", p.name);
        println!("      expression: {}", p.expression);
        if p.has_filter() {
            println!("      filter: {}", p.filter);
        }
    }

    debug!("dry-run complete (no data read)");
}

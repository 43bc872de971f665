// src/config/loader.rs

use std::path::Path;

use tracing::debug;

use crate::config::expression::parse_expression;
use crate::config::machine::ConfigMachine;
use crate::config::model::Configuration;
use crate::errors::{AnalysisError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// Source name used for configurations assembled from CLI flags.
pub const COMMAND_LINE_SOURCE: &str = "<command line>";

/// Read and parse a configuration file from disk.
///
/// This is the recommended entry point for the rest of the application.
/// Parsing is all-or-nothing: the first bad line aborts with an error that
/// names the file and line.
pub fn configure(path: impl AsRef<Path>) -> Result<Configuration> {
    configure_with(&RealFileSystem, path)
}

/// Same as [`configure`], reading through the given filesystem.
pub fn configure_with(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Configuration> {
    let path = path.as_ref();
    let file = path.display().to_string();

    let contents = fs.read_to_string(path).map_err(|e| {
        debug!(error = %e, "cannot read configuration");
        AnalysisError::FileNotFound {
            file: file.clone(),
            reason: format!("{e:#}"),
        }
    })?;

    parse_str(file, &contents)
}

/// Parse configuration text. `source_name` is only used in diagnostics.
pub fn parse_str(source_name: impl Into<String>, contents: &str) -> Result<Configuration> {
    let mut machine = ConfigMachine::new(source_name);
    for raw_line in contents.lines() {
        machine.feed(raw_line)?;
    }
    machine.finish()
}

/// Assemble a configuration from command-line pieces.
///
/// Each entry of `projections` goes through the same projection parser as a
/// file line; its 1-based position stands in for the line number.
pub fn from_arguments<I, S>(
    output: &str,
    input_files: Vec<String>,
    dataset_name: Option<&str>,
    projections: I,
) -> Result<Configuration>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config = Configuration::new(COMMAND_LINE_SOURCE);
    config.output_artifact_path = output.trim().to_string();
    config.dataset_name = dataset_name.map(str::trim).unwrap_or_default().to_string();
    config.input_files = input_files;

    if config.output_artifact_path.is_empty() {
        return Err(AnalysisError::MissingOutput {
            file: COMMAND_LINE_SOURCE.to_string(),
        });
    }

    for (i, raw) in projections.into_iter().enumerate() {
        let line = i + 1;
        let projection = parse_expression(raw.as_ref().trim())
            .map_err(|e| e.at(COMMAND_LINE_SOURCE, line))?;
        config
            .projections
            .insert(projection)
            .map_err(|dup| AnalysisError::DuplicateName {
                name: dup.name,
                file: COMMAND_LINE_SOURCE.to_string(),
                line,
            })?;
    }

    Ok(config)
}

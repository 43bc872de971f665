// src/analysis/resolve.rs

//! Deciding what the dataset-name line really was.
//!
//! The configuration format lets the dataset name be omitted, in which case
//! the line read as a dataset name is in fact the first input file. The only
//! way to tell is to try opening it. A `--tree` flag is always a dataset
//! name, so command-line configurations skip the probe.

use tracing::{debug, info};

use crate::config::loader::COMMAND_LINE_SOURCE;
use crate::config::Configuration;
use crate::engine::TabularEngine;
use crate::errors::{AnalysisError, Result};

/// Dataset name and chain order after disambiguation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub dataset_name: String,
    pub input_files: Vec<String>,
}

/// Resolve the dataset name and the full input list for `config`.
pub fn resolve_source<E: TabularEngine>(
    engine: &mut E,
    config: &Configuration,
) -> Result<ResolvedSource> {
    let mut dataset_name = config.dataset_name.clone();
    let mut input_files = config.input_files.clone();
    let mut first_file = None;

    let may_be_file = config.input_file_name != COMMAND_LINE_SOURCE;
    if !dataset_name.is_empty() && may_be_file {
        match engine.try_open(&dataset_name) {
            Ok(file) => {
                info!(
                    file = %dataset_name,
                    "dataset line names a readable file; treating it as the first input"
                );
                input_files.insert(0, std::mem::take(&mut dataset_name));
                first_file = Some(file);
            }
            Err(e) => {
                debug!(dataset = %dataset_name, error = %e, "not a file; keeping as dataset name");
            }
        }
    }

    let Some(first) = input_files.first() else {
        return Err(AnalysisError::SourceLoadFailed {
            dataset: dataset_name,
            reason: "no input files".to_string(),
        });
    };

    if first.contains('=') {
        return Err(AnalysisError::InputIsExpression {
            input: first.clone(),
        });
    }

    if dataset_name.is_empty() {
        let file = match first_file {
            Some(file) => file,
            None => engine.try_open(first).map_err(|e| AnalysisError::SourceLoadFailed {
                dataset: String::new(),
                reason: format!("cannot open {first}: {e}"),
            })?,
        };
        dataset_name = find_single_dataset(engine, &file, first)?;
        info!(dataset = %dataset_name, file = %first, "dataset name derived from first input");
    }

    Ok(ResolvedSource {
        dataset_name,
        input_files,
    })
}

/// Name of the one dataset stored in `file`.
pub fn find_single_dataset<E: TabularEngine>(
    engine: &mut E,
    file: &E::File,
    file_name: &str,
) -> Result<String> {
    let mut candidates: Vec<String> = engine
        .list_stored_objects(file)?
        .into_iter()
        .filter(|o| o.kind.is_dataset())
        .map(|o| o.name)
        .collect();

    match candidates.len() {
        0 => Err(AnalysisError::NoDatasetFound {
            file: file_name.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(AnalysisError::AmbiguousDatasetName {
            file: file_name.to_string(),
            candidates,
        }),
    }
}

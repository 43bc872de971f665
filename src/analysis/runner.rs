// src/analysis/runner.rs

//! Building the chain and running every projection into the output.

use tracing::{debug, info, warn};

use crate::analysis::resolve::ResolvedSource;
use crate::config::ProjectionRegistry;
use crate::engine::{DrawMode, ProjectionRequest, TabularEngine};
use crate::errors::{AnalysisError, Result};

/// Open the concatenated data source for a resolved input list.
pub fn build_source<E: TabularEngine>(engine: &mut E, resolved: &ResolvedSource) -> Result<E::Source> {
    engine
        .open_data_source(&resolved.dataset_name, &resolved.input_files)
        .map_err(|e| AnalysisError::SourceLoadFailed {
            dataset: resolved.dataset_name.clone(),
            reason: format!("{e:#}"),
        })
}

/// Project every registry entry into a fresh output container at `output_path`.
///
/// Stops at the first projection that yields nothing. The container is
/// closed on every path out of this function.
pub fn run_projections<E: TabularEngine>(
    engine: &mut E,
    source: &mut E::Source,
    output_path: &str,
    projections: &ProjectionRegistry,
) -> Result<Vec<String>> {
    if projections.is_empty() {
        warn!(output = %output_path, "no projections; output will be empty");
    }
    let output = engine.create_output_container(output_path)?;
    let mut guard = OutputGuard {
        engine,
        output: Some(output),
    };

    let result = match guard.output.as_mut() {
        Some(output) => project_all(&mut *guard.engine, source, output, projections),
        None => Ok(Vec::new()),
    };
    let closed = guard.close();

    match result {
        Ok(persisted) => {
            closed?;
            Ok(persisted)
        }
        Err(e) => {
            if let Err(close_err) = closed {
                warn!(output = %output_path, error = %close_err, "closing output after failure");
            }
            Err(e)
        }
    }
}

/// Open output container that is closed when dropped, so an unwinding
/// engine still leaves a closed artifact behind.
struct OutputGuard<'a, E: TabularEngine> {
    engine: &'a mut E,
    output: Option<E::Output>,
}

impl<E: TabularEngine> OutputGuard<'_, E> {
    fn close(mut self) -> Result<()> {
        match self.output.take() {
            Some(output) => Ok(self.engine.close_output(output)?),
            None => Ok(()),
        }
    }
}

impl<E: TabularEngine> Drop for OutputGuard<'_, E> {
    fn drop(&mut self) {
        if let Some(output) = self.output.take() {
            if let Err(e) = self.engine.close_output(output) {
                warn!(error = %e, "closing output during unwind");
            }
        }
    }
}

fn project_all<E: TabularEngine>(
    engine: &mut E,
    source: &mut E::Source,
    output: &mut E::Output,
    projections: &ProjectionRegistry,
) -> Result<Vec<String>> {
    let mut persisted = Vec::with_capacity(projections.len());

    for projection in projections {
        let request = ProjectionRequest {
            expression: &projection.expression,
            destination: &projection.name,
            filter: &projection.filter,
            mode: DrawMode::Batch,
        };

        let object = match engine.project(source, &request) {
            Ok(Some(object)) => object,
            Ok(None) => {
                return Err(AnalysisError::ProjectionFailed {
                    name: projection.name.clone(),
                });
            }
            Err(e) => {
                warn!(name = %projection.name, error = %e, "engine failed to project");
                return Err(AnalysisError::ProjectionFailed {
                    name: projection.name.clone(),
                });
            }
        };

        engine.persist(output, object)?;
        debug!(name = %projection.name, "persisted");
        persisted.push(projection.name.clone());
    }

    info!(count = persisted.len(), "all projections persisted");
    Ok(persisted)
}

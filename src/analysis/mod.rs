// src/analysis/mod.rs

//! Running a parsed configuration against a tabular engine.
//!
//! ```text
//! Init ─► SourceResolved ─► SourceBuilt ─► Projecting ─► Done
//!   └──────────┴─────────────────┴─────────────┴──────► Failed
//! ```
//!
//! There are no retries: the first error ends the run.
//!
//! - [`resolve`] works out whether the dataset-name line was a file.
//! - [`runner`] builds the chain and writes each projection.

pub mod resolve;
pub mod runner;

use std::fmt;

use tracing::{debug, info};

use crate::config::Configuration;
use crate::engine::TabularEngine;
use crate::errors::Result;

pub use resolve::{find_single_dataset, resolve_source, ResolvedSource};
pub use runner::{build_source, run_projections};

/// Progress of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Init,
    SourceResolved,
    SourceBuilt,
    Projecting,
    Done,
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalysisStage::Init => "init",
            AnalysisStage::SourceResolved => "source-resolved",
            AnalysisStage::SourceBuilt => "source-built",
            AnalysisStage::Projecting => "projecting",
            AnalysisStage::Done => "done",
        };
        f.write_str(s)
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub dataset_name: String,
    pub input_files: Vec<String>,
    pub output_artifact_path: String,
    /// Projection names, in the order they were written.
    pub persisted: Vec<String>,
}

/// Run every projection of `config` and write the results to its output.
pub fn analyze<E: TabularEngine>(engine: &mut E, config: &Configuration) -> Result<AnalysisReport> {
    let mut stage = AnalysisStage::Init;
    let result = run_stages(engine, config, &mut stage);

    if let Err(ref e) = result {
        debug!(stage = %stage, error = %e, "analysis stopped");
    }
    result
}

fn run_stages<E: TabularEngine>(
    engine: &mut E,
    config: &Configuration,
    stage: &mut AnalysisStage,
) -> Result<AnalysisReport> {
    let resolved = resolve_source(engine, config)?;
    advance(stage, AnalysisStage::SourceResolved);

    let mut source = build_source(engine, &resolved)?;
    advance(stage, AnalysisStage::SourceBuilt);

    advance(stage, AnalysisStage::Projecting);
    let persisted = run_projections(
        engine,
        &mut source,
        &config.output_artifact_path,
        &config.projections,
    )?;
    advance(stage, AnalysisStage::Done);

    Ok(AnalysisReport {
        dataset_name: resolved.dataset_name,
        input_files: resolved.input_files,
        output_artifact_path: config.output_artifact_path.clone(),
        persisted,
    })
}

fn advance(stage: &mut AnalysisStage, next: AnalysisStage) {
    info!(from = %stage, to = %next, "analysis stage");
    *stage = next;
}

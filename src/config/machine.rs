// src/config/machine.rs

//! Positional line router for the configuration format.
//!
//! The meaning of a line depends on how far the reader has got:
//!
//! ```text
//! Output ──► TreeName ──► InputFiles ──► Expressions ──► Done
//!               │                            ▲
//!               └──── line contains '=' ─────┘
//! ```
//!
//! [`transition`] is a pure function of the current section and one
//! normalised line. [`ConfigMachine`] owns the parse cursor and applies the
//! resulting actions to a [`Configuration`].

use std::fmt;

use tracing::{debug, info, warn};

use crate::config::expression::parse_expression;
use crate::config::model::Configuration;
use crate::config::normalize::normalize;
use crate::errors::{AnalysisError, Result};

/// Section of the configuration currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Output,
    TreeName,
    InputFiles,
    Expressions,
    Done,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Section::Output => "output",
            Section::TreeName => "tree-name",
            Section::InputFiles => "input-files",
            Section::Expressions => "expressions",
            Section::Done => "done",
        };
        f.write_str(s)
    }
}

/// What to do with one normalised line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    /// Blank or comment-only line.
    Skip,
    SetOutput,
    SetDatasetName,
    AddInputFile,
    ParseExpression,
}

fn is_assignment(line: &str) -> bool {
    line.contains('=')
}

/// Route one normalised line given the current section.
pub fn transition(section: Section, line: &str) -> (Section, LineAction) {
    if line.is_empty() {
        return (section, LineAction::Skip);
    }

    match section {
        Section::Output => (Section::TreeName, LineAction::SetOutput),
        Section::TreeName if is_assignment(line) => {
            (Section::Expressions, LineAction::ParseExpression)
        }
        Section::TreeName => (Section::InputFiles, LineAction::SetDatasetName),
        Section::InputFiles if is_assignment(line) => {
            (Section::Expressions, LineAction::ParseExpression)
        }
        Section::InputFiles => (Section::InputFiles, LineAction::AddInputFile),
        Section::Expressions => (Section::Expressions, LineAction::ParseExpression),
        Section::Done => (Section::Done, LineAction::Skip),
    }
}

/// Stateful reader that consumes raw lines one at a time.
#[derive(Debug)]
pub struct ConfigMachine {
    section: Section,
    /// Physical lines consumed so far, including skipped ones.
    line_number: usize,
    config: Configuration,
}

impl ConfigMachine {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            section: Section::Output,
            line_number: 0,
            config: Configuration::new(source_name),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Consume one physical line.
    pub fn feed(&mut self, raw_line: &str) -> Result<()> {
        self.line_number += 1;
        let line = normalize(raw_line);
        let (next, action) = transition(self.section, &line);

        if next != self.section {
            debug!(
                line = self.line_number,
                from = %self.section,
                to = %next,
                "section transition"
            );
            self.section = next;
        }

        match action {
            LineAction::Skip => {}
            LineAction::SetOutput => self.config.output_artifact_path = line,
            LineAction::SetDatasetName => self.config.dataset_name = line,
            LineAction::AddInputFile => self.config.input_files.push(line),
            LineAction::ParseExpression => self.add_projection(&line)?,
        }

        Ok(())
    }

    fn add_projection(&mut self, line: &str) -> Result<()> {
        let file = &self.config.input_file_name;
        let projection = parse_expression(line).map_err(|e| e.at(file, self.line_number))?;

        debug!(
            line = self.line_number,
            name = %projection.name,
            expression = %projection.expression,
            filter = %projection.filter,
            "projection"
        );

        self.config
            .projections
            .insert(projection)
            .map_err(|dup| AnalysisError::DuplicateName {
                name: dup.name,
                file: file.clone(),
                line: self.line_number,
            })
    }

    /// Close the parse and hand back the configuration.
    pub fn finish(mut self) -> Result<Configuration> {
        self.section = Section::Done;

        if self.config.output_artifact_path.is_empty() {
            return Err(AnalysisError::MissingOutput {
                file: self.config.input_file_name,
            });
        }
        if self.config.projections.is_empty() {
            warn!(
                file = %self.config.input_file_name,
                "configuration declares no projections"
            );
        }

        info!(
            file = %self.config.input_file_name,
            lines = self.line_number,
            inputs = self.config.input_files.len(),
            projections = self.config.projections.len(),
            "configuration parsed"
        );
        Ok(self.config)
    }
}

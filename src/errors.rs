// src/errors.rs

//! Crate-wide error type.
//!
//! Parse-time variants always carry the configuration source and the 1-based
//! line number. Analysis-time variants name the dataset, file or projection
//! involved.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("configuration file {file} not found or not readable: {reason}")]
    FileNotFound { file: String, reason: String },

    #[error("missing '=' in projection at {file}:{line}")]
    MissingAssignment { file: String, line: usize },

    #[error("no projection name found at {file}:{line}")]
    MissingName { file: String, line: usize },

    #[error("no projection expression found at {file}:{line}")]
    MissingExpression { file: String, line: usize },

    #[error("empty filter after 'if' at {file}:{line}")]
    InvalidFilterSyntax { file: String, line: usize },

    #[error("duplicate projection name '{name}' at {file}:{line}")]
    DuplicateName {
        name: String,
        file: String,
        line: usize,
    },

    #[error("{file} does not name an output artifact")]
    MissingOutput { file: String },

    #[error("input file '{input}' looks like a projection; is the output or dataset line missing?")]
    InputIsExpression { input: String },

    #[error("no dataset found in {file}")]
    NoDatasetFound { file: String },

    #[error("more than one dataset in {file} ({candidates:?}); name one explicitly")]
    AmbiguousDatasetName {
        file: String,
        candidates: Vec<String>,
    },

    #[error("cannot load dataset '{dataset}': {reason}")]
    SourceLoadFailed { dataset: String, reason: String },

    #[error("projection '{name}' produced no object")]
    ProjectionFailed { name: String },

    #[error(transparent)]
    Engine(#[from] anyhow::Error),
}

/// Fieldless view of [`AnalysisError`], handy for matching in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    MissingAssignment,
    MissingName,
    MissingExpression,
    InvalidFilterSyntax,
    DuplicateName,
    MissingOutput,
    InputIsExpression,
    NoDatasetFound,
    AmbiguousDatasetName,
    SourceLoadFailed,
    ProjectionFailed,
    Engine,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::FileNotFound { .. } => ErrorKind::FileNotFound,
            AnalysisError::MissingAssignment { .. } => ErrorKind::MissingAssignment,
            AnalysisError::MissingName { .. } => ErrorKind::MissingName,
            AnalysisError::MissingExpression { .. } => ErrorKind::MissingExpression,
            AnalysisError::InvalidFilterSyntax { .. } => ErrorKind::InvalidFilterSyntax,
            AnalysisError::DuplicateName { .. } => ErrorKind::DuplicateName,
            AnalysisError::MissingOutput { .. } => ErrorKind::MissingOutput,
            AnalysisError::InputIsExpression { .. } => ErrorKind::InputIsExpression,
            AnalysisError::NoDatasetFound { .. } => ErrorKind::NoDatasetFound,
            AnalysisError::AmbiguousDatasetName { .. } => ErrorKind::AmbiguousDatasetName,
            AnalysisError::SourceLoadFailed { .. } => ErrorKind::SourceLoadFailed,
            AnalysisError::ProjectionFailed { .. } => ErrorKind::ProjectionFailed,
            AnalysisError::Engine(_) => ErrorKind::Engine,
        }
    }

    /// Source line of a parse-time error, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            AnalysisError::MissingAssignment { line, .. }
            | AnalysisError::MissingName { line, .. }
            | AnalysisError::MissingExpression { line, .. }
            | AnalysisError::InvalidFilterSyntax { line, .. }
            | AnalysisError::DuplicateName { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

// src/config/expression.rs

//! Splitting a projection line into name, expression and optional filter.
//!
//! The expression and filter are opaque: they are located by textual
//! boundaries only and forwarded verbatim to the tabular engine.
//!
//! ```text
//! hpx = px if px < -3
//! ^^^   ^^    ^^^^^^^
//! name  expr  filter
//! ```

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::errors::AnalysisError;

/// Word that introduces a filter after the expression.
pub const FILTER_INTRODUCER: &str = "if";

/// `if` as a standalone word: preceded by whitespace (or the start of the
/// text after `=`) and followed by whitespace or the end of the line.
static FILTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:^|\s){FILTER_INTRODUCER}(?:\s|$)"))
        .expect("filter introducer pattern is valid")
});

/// A single named projection, as written in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Projection {
    pub name: String,
    pub expression: String,
    /// Empty means "no filter".
    pub filter: String,
}

impl Projection {
    pub fn has_filter(&self) -> bool {
        !self.filter.is_empty()
    }
}

/// Why a projection line was rejected.
///
/// Carries no location; callers attach the source name and line with
/// [`ExpressionError::at`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("missing '='")]
    MissingAssignment,
    #[error("missing name before '='")]
    MissingName,
    #[error("missing expression after '='")]
    MissingExpression,
    #[error("missing filter after 'if'")]
    InvalidFilterSyntax,
}

impl ExpressionError {
    pub fn at(self, file: &str, line: usize) -> AnalysisError {
        let file = file.to_string();
        match self {
            ExpressionError::MissingAssignment => AnalysisError::MissingAssignment { file, line },
            ExpressionError::MissingName => AnalysisError::MissingName { file, line },
            ExpressionError::MissingExpression => AnalysisError::MissingExpression { file, line },
            ExpressionError::InvalidFilterSyntax => {
                AnalysisError::InvalidFilterSyntax { file, line }
            }
        }
    }
}

/// Parse `name = expr [if filter]`.
pub fn parse_expression(line: &str) -> Result<Projection, ExpressionError> {
    let (name, rest) = line
        .split_once('=')
        .ok_or(ExpressionError::MissingAssignment)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ExpressionError::MissingName);
    }

    let (expression, filter) = match FILTER_RE.find(rest) {
        Some(m) => (&rest[..m.start()], Some(&rest[m.end()..])),
        None => (rest, None),
    };

    let expression = expression.trim();
    if expression.is_empty() {
        return Err(ExpressionError::MissingExpression);
    }

    let filter = match filter.map(str::trim) {
        Some("") => return Err(ExpressionError::InvalidFilterSyntax),
        Some(f) => f.to_string(),
        None => String::new(),
    };

    Ok(Projection {
        name: name.to_string(),
        expression: expression.to_string(),
        filter,
    })
}

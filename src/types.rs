use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of an object stored in a tabular file.
///
/// - `Tree`: a row-oriented dataset that can feed a data source.
/// - `Histogram`: a materialised projection.
/// - `Other`: anything else; ignored when looking for datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Tree,
    Histogram,
    Other,
}

impl ObjectKind {
    pub fn is_dataset(self) -> bool {
        self == ObjectKind::Tree
    }
}

impl Default for ObjectKind {
    fn default() -> Self {
        ObjectKind::Other
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectKind::Tree => "tree",
            ObjectKind::Histogram => "histogram",
            ObjectKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// How the engine should materialise a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// No interactive or graphical output.
    #[default]
    Batch,
    Interactive,
}

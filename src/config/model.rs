// src/config/model.rs

use crate::config::registry::ProjectionRegistry;

/// Everything read from one configuration source.
///
/// Mirrors the file layout:
///
/// ```text
/// result.dat          # output artifact
/// ntuple              # dataset name (optional)
/// data1.dat           # input files, in chain order
/// data2.dat
/// hpx = px if px < -3 # projections
/// hpxpy = px:py
/// ```
///
/// `dataset_name` is taken as written. Whether it really is a dataset name
/// or the first input file is only decided at analysis time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    /// Where the configuration came from (a path, or `<command line>`).
    pub input_file_name: String,
    pub output_artifact_path: String,
    /// Possibly empty until resolved.
    pub dataset_name: String,
    pub input_files: Vec<String>,
    pub projections: ProjectionRegistry,
}

impl Configuration {
    /// Empty configuration for the given source name.
    pub fn new(input_file_name: impl Into<String>) -> Self {
        Self {
            input_file_name: input_file_name.into(),
            ..Self::default()
        }
    }
}

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub use simple_analysis_test_utils::init_tracing;

/// Write `contents` to a fresh temporary config file.
pub fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

/// TOML catalog holding one tree.
pub fn tree_catalog(name: &str, entries: u64) -> String {
    format!("[[objects]]\nname = \"{name}\"\nkind = \"tree\"\nentries = {entries}\n")
}

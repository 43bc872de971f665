// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Two mutually exclusive ways to describe an analysis:
//! - a configuration file as the single positional argument, or
//! - `--output`, `--input`, `--tree` and `--histo` flags.

use clap::{ArgGroup, Parser, ValueEnum};

/// Command-line arguments for `simple-analysis`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "simple-analysis",
    version,
    about = "Project a chained tabular dataset into named histograms.",
    long_about = None
)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["config", "output"])
))]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(value_name = "CONFIG", conflicts_with_all = ["output", "input", "tree", "histo"])]
    pub config: Option<String>,

    /// Output artifact to (re)create.
    #[arg(short, long, value_name = "PATH", requires = "input")]
    pub output: Option<String>,

    /// Input files, in chain order.
    #[arg(short, long, value_name = "FILE", num_args = 1..)]
    pub input: Vec<String>,

    /// Dataset name; may be omitted when the first input holds exactly one.
    #[arg(short, long, value_name = "NAME")]
    pub tree: Option<String>,

    /// Projections in the form `NAME=EXPRESSION[ if FILTER]`.
    #[arg(long, value_name = "PROJECTION", num_args = 1..)]
    pub histo: Vec<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SIMPLE_ANALYSIS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse and print the configuration, but don't touch any data.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

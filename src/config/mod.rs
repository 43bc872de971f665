// src/config/mod.rs

//! Configuration reading for simple-analysis.
//!
//! Responsibilities:
//! - Strip comments and whitespace from raw lines (`normalize.rs`).
//! - Split projection lines into name / expression / filter (`expression.rs`).
//! - Keep projections unique and ordered (`registry.rs`).
//! - Route lines to the right section (`machine.rs`).
//! - Load a config file, or assemble one from CLI flags (`loader.rs`).

pub mod expression;
pub mod loader;
pub mod machine;
pub mod model;
pub mod normalize;
pub mod registry;

pub use expression::{parse_expression, ExpressionError, Projection};
pub use loader::{configure, configure_with, from_arguments, parse_str};
pub use machine::{ConfigMachine, LineAction, Section};
pub use model::Configuration;
pub use normalize::normalize;
pub use registry::ProjectionRegistry;

// src/engine/mod.rs

//! Tabular engine abstraction.
//!
//! The analysis talks to a `TabularEngine` instead of a concrete storage
//! backend. It owns file access, chaining of datasets, projection into
//! histograms and the output container.
//!
//! - [`catalog::CatalogEngine`] is the implementation used by the binary.
//!   It reads and writes TOML catalogs through a [`crate::fs::FileSystem`].
//! - Tests can provide their own engine that records calls and serves
//!   canned objects.
//!
//! Every call is synchronous. `project` may rely on nothing else running
//! against the engine at the same time.

pub mod catalog;

pub use crate::types::{DrawMode, ObjectKind};
pub use catalog::{Catalog, CatalogEngine, CatalogEntry, Histogram};

/// Name and declared type of an object stored in a tabular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub name: String,
    pub kind: ObjectKind,
}

impl StoredObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One projection as handed to the engine. The strings are opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionRequest<'a> {
    pub expression: &'a str,
    /// Name under which the materialised object is created.
    pub destination: &'a str,
    /// Empty means unconditional.
    pub filter: &'a str,
    pub mode: DrawMode,
}

/// Operations the analysis needs from a tabular-data backend.
pub trait TabularEngine {
    /// Handle to an opened tabular file.
    type File;
    /// Concatenated data source over several files.
    type Source;
    /// Output container being written.
    type Output;
    /// A materialised projection.
    type Object;

    /// Open `path` as a tabular file.
    ///
    /// Also used as a probe: a failure here must leave the engine usable.
    fn try_open(&mut self, path: &str) -> anyhow::Result<Self::File>;

    fn list_stored_objects(&mut self, file: &Self::File) -> anyhow::Result<Vec<StoredObject>>;

    /// Chain `dataset` across `files`, in order.
    fn open_data_source(&mut self, dataset: &str, files: &[String]) -> anyhow::Result<Self::Source>;

    /// Create the output container, replacing anything already at `path`.
    fn create_output_container(&mut self, path: &str) -> anyhow::Result<Self::Output>;

    /// Materialise one projection. `Ok(None)` means the engine produced
    /// nothing under `request.destination`.
    fn project(
        &mut self,
        source: &mut Self::Source,
        request: &ProjectionRequest<'_>,
    ) -> anyhow::Result<Option<Self::Object>>;

    fn persist(&mut self, output: &mut Self::Output, object: Self::Object) -> anyhow::Result<()>;

    /// Flush and release the output container.
    fn close_output(&mut self, output: Self::Output) -> anyhow::Result<()>;
}

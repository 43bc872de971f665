// src/engine/catalog.rs

//! File-backed engine over TOML catalogs.
//!
//! A tabular file is a catalog of stored objects:
//!
//! ```toml
//! [[objects]]
//! name = "ntuple"
//! kind = "tree"
//! entries = 25000
//! ```
//!
//! The `objects` key is required, so an empty or unrelated TOML file is not
//! a catalog. The output artifact uses the same format; every persisted projection is
//! written as a `histogram` object carrying its expression and filter.
//! The catalog is rewritten in full on every persist, so the artifact on disk
//! is always a complete catalog.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::{ObjectKind, ProjectionRequest, StoredObject, TabularEngine};
use crate::fs::{FileSystem, RealFileSystem};

/// Parsed contents of one tabular file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub objects: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Insert `entry`, replacing an object of the same name.
    pub fn upsert(&mut self, entry: CatalogEntry) {
        match self.objects.iter_mut().find(|o| o.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.objects.push(entry),
        }
    }
}

/// `[[objects]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,

    #[serde(default)]
    pub kind: ObjectKind,

    /// Number of rows (trees) or filled rows (histograms).
    #[serde(default)]
    pub entries: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Dataset a histogram was projected from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
}

impl CatalogEntry {
    pub fn tree(name: impl Into<String>, entries: u64) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Tree,
            entries,
            expression: None,
            filter: None,
            dataset: None,
        }
    }
}

/// Projection materialised by [`CatalogEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    pub name: String,
    pub expression: String,
    pub filter: String,
    pub dataset: String,
    /// Rows available to the projection across the chain.
    pub entries: u64,
}

impl From<Histogram> for CatalogEntry {
    fn from(h: Histogram) -> Self {
        Self {
            name: h.name,
            kind: ObjectKind::Histogram,
            entries: h.entries,
            expression: Some(h.expression),
            filter: (!h.filter.is_empty()).then_some(h.filter),
            dataset: Some(h.dataset),
        }
    }
}

/// An opened catalog file.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    pub path: PathBuf,
    pub catalog: Catalog,
}

/// Chain of files sharing one dataset name.
///
/// Only the first file is checked when the chain is opened; the rest are
/// read when a projection runs.
#[derive(Debug, Clone)]
pub struct Chain {
    pub dataset: String,
    pub files: Vec<PathBuf>,
}

/// Output artifact being written.
#[derive(Debug)]
pub struct CatalogOutput {
    path: PathBuf,
    catalog: Catalog,
}

impl CatalogOutput {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

/// Tabular engine reading and writing TOML catalogs.
#[derive(Debug, Clone, Default)]
pub struct CatalogEngine<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl CatalogEngine<RealFileSystem> {
    pub fn new() -> Self {
        Self::with_fs(RealFileSystem)
    }
}

impl<F: FileSystem> CatalogEngine<F> {
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Read and parse a catalog.
    pub fn read_catalog(&self, path: &Path) -> Result<Catalog> {
        if !self.fs.is_file(path) {
            bail!("no such file: {:?}", path);
        }
        let contents = self.fs.read_to_string(path)?;
        toml::from_str(&contents).with_context(|| format!("{:?} is not a catalog file", path))
    }

    fn write_catalog(&self, path: &Path, catalog: &Catalog) -> Result<()> {
        let text = toml::to_string(catalog)
            .with_context(|| format!("serialising catalog for {:?}", path))?;
        self.fs.write(path, text.as_bytes())
    }

    /// Entries of `dataset` in `path`, or an error if the file cannot
    /// supply it.
    fn dataset_entries(&self, path: &Path, dataset: &str) -> Result<u64> {
        let catalog = self.read_catalog(path)?;
        match catalog.find(dataset) {
            Some(entry) if entry.kind.is_dataset() => Ok(entry.entries),
            Some(entry) => Err(anyhow!(
                "'{}' in {:?} is a {}, not a tree",
                dataset,
                path,
                entry.kind
            )),
            None => Err(anyhow!("no '{}' in {:?}", dataset, path)),
        }
    }
}

impl<F: FileSystem> TabularEngine for CatalogEngine<F> {
    type File = CatalogFile;
    type Source = Chain;
    type Output = CatalogOutput;
    type Object = Histogram;

    fn try_open(&mut self, path: &str) -> Result<CatalogFile> {
        let path = PathBuf::from(path);
        let catalog = self.read_catalog(&path)?;
        debug!(path = ?path, objects = catalog.objects.len(), "opened catalog");
        Ok(CatalogFile { path, catalog })
    }

    fn list_stored_objects(&mut self, file: &CatalogFile) -> Result<Vec<StoredObject>> {
        Ok(file
            .catalog
            .objects
            .iter()
            .map(|o| StoredObject::new(o.name.clone(), o.kind))
            .collect())
    }

    fn open_data_source(&mut self, dataset: &str, files: &[String]) -> Result<Chain> {
        let first = files
            .first()
            .ok_or_else(|| anyhow!("no input files"))?;

        let entries = self.dataset_entries(Path::new(first), dataset)?;
        if entries == 0 {
            bail!("'{}' in {} has no entries", dataset, first);
        }

        info!(dataset = %dataset, files = files.len(), "chain opened");
        Ok(Chain {
            dataset: dataset.to_string(),
            files: files.iter().map(PathBuf::from).collect(),
        })
    }

    fn create_output_container(&mut self, path: &str) -> Result<CatalogOutput> {
        let output = CatalogOutput {
            path: PathBuf::from(path),
            catalog: Catalog::default(),
        };
        self.write_catalog(&output.path, &output.catalog)?;
        debug!(path = %path, "output container created");
        Ok(output)
    }

    fn project(
        &mut self,
        source: &mut Chain,
        request: &ProjectionRequest<'_>,
    ) -> Result<Option<Histogram>> {
        let mut entries = 0u64;
        for file in &source.files {
            match self.dataset_entries(file, &source.dataset) {
                Ok(n) => {
                    entries = entries.checked_add(n).ok_or_else(|| {
                        anyhow!(
                            "entry count of '{}' overflows at {:?}",
                            source.dataset,
                            file
                        )
                    })?;
                }
                Err(e) => {
                    warn!(
                        destination = %request.destination,
                        error = %e,
                        "chain element unusable; nothing drawn"
                    );
                    return Ok(None);
                }
            }
        }

        debug!(
            destination = %request.destination,
            expression = %request.expression,
            filter = %request.filter,
            mode = ?request.mode,
            entries,
            "projection drawn"
        );

        Ok(Some(Histogram {
            name: request.destination.to_string(),
            expression: request.expression.to_string(),
            filter: request.filter.to_string(),
            dataset: source.dataset.clone(),
            entries,
        }))
    }

    fn persist(&mut self, output: &mut CatalogOutput, object: Histogram) -> Result<()> {
        output.catalog.upsert(object.into());
        self.write_catalog(&output.path, &output.catalog)
    }

    fn close_output(&mut self, output: CatalogOutput) -> Result<()> {
        self.write_catalog(&output.path, &output.catalog)?;
        debug!(
            path = ?output.path,
            objects = output.catalog.objects.len(),
            "output container closed"
        );
        Ok(())
    }
}

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use simple_analysis::engine::{
    DrawMode, ObjectKind, ProjectionRequest, StoredObject, TabularEngine,
};

/// One call made against [`FakeEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    TryOpen(String),
    ListStoredObjects(String),
    OpenDataSource { dataset: String, files: Vec<String> },
    CreateOutput(String),
    Project {
        destination: String,
        expression: String,
        filter: String,
        mode: DrawMode,
    },
    Persist(String),
    CloseOutput(String),
}

/// Materialised object handed out by [`FakeEngine::project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeObject {
    pub name: String,
    pub expression: String,
    pub filter: String,
}

#[derive(Debug)]
pub struct FakeOutput {
    path: String,
}

#[derive(Debug)]
pub struct FakeSource {
    pub dataset: String,
    pub files: Vec<String>,
}

/// An in-memory engine that:
/// - serves files declared with [`FakeEngine::with_file`]
/// - records every call it receives
/// - keeps the objects persisted into each output path
#[derive(Debug, Clone, Default)]
pub struct FakeEngine {
    files: HashMap<String, Vec<StoredObject>>,
    empty_projections: HashSet<String>,
    failing_projections: HashSet<String>,
    panicking_projections: HashSet<String>,
    fail_close: bool,
    calls: Arc<Mutex<Vec<EngineCall>>>,
    outputs: Arc<Mutex<HashMap<String, Vec<FakeObject>>>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a readable file holding `objects`.
    pub fn with_file(mut self, path: &str, objects: &[(&str, ObjectKind)]) -> Self {
        let objects = objects
            .iter()
            .map(|(name, kind)| StoredObject::new(*name, *kind))
            .collect();
        self.files.insert(path.to_string(), objects);
        self
    }

    /// Make projections into `name` yield nothing.
    pub fn without_result_for(mut self, name: &str) -> Self {
        self.empty_projections.insert(name.to_string());
        self
    }

    /// Make projections into `name` return an engine error.
    pub fn failing_for(mut self, name: &str) -> Self {
        self.failing_projections.insert(name.to_string());
        self
    }

    /// Make projections into `name` panic.
    pub fn panicking_for(mut self, name: &str) -> Self {
        self.panicking_projections.insert(name.to_string());
        self
    }

    /// Make every `close_output` call fail (after recording it).
    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Names of the objects currently stored at `path`.
    pub fn output_names(&self, path: &str) -> Option<Vec<String>> {
        let outputs = self.outputs.lock().unwrap();
        outputs
            .get(path)
            .map(|objects| objects.iter().map(|o| o.name.clone()).collect())
    }

    pub fn output_objects(&self, path: &str) -> Option<Vec<FakeObject>> {
        self.outputs.lock().unwrap().get(path).cloned()
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl TabularEngine for FakeEngine {
    type File = String;
    type Source = FakeSource;
    type Output = FakeOutput;
    type Object = FakeObject;

    fn try_open(&mut self, path: &str) -> Result<String> {
        self.record(EngineCall::TryOpen(path.to_string()));
        if self.files.contains_key(path) {
            Ok(path.to_string())
        } else {
            Err(anyhow!("cannot open {path}"))
        }
    }

    fn list_stored_objects(&mut self, file: &String) -> Result<Vec<StoredObject>> {
        self.record(EngineCall::ListStoredObjects(file.clone()));
        self.files
            .get(file)
            .cloned()
            .ok_or_else(|| anyhow!("unknown file {file}"))
    }

    fn open_data_source(&mut self, dataset: &str, files: &[String]) -> Result<FakeSource> {
        self.record(EngineCall::OpenDataSource {
            dataset: dataset.to_string(),
            files: files.to_vec(),
        });

        let first = files.first().ok_or_else(|| anyhow!("no input files"))?;
        let has_dataset = self
            .files
            .get(first)
            .is_some_and(|objs| objs.iter().any(|o| o.name == dataset && o.kind.is_dataset()));
        if !has_dataset {
            return Err(anyhow!("no tree '{dataset}' in {first}"));
        }

        Ok(FakeSource {
            dataset: dataset.to_string(),
            files: files.to_vec(),
        })
    }

    fn create_output_container(&mut self, path: &str) -> Result<FakeOutput> {
        self.record(EngineCall::CreateOutput(path.to_string()));
        self.outputs
            .lock()
            .unwrap()
            .insert(path.to_string(), Vec::new());
        Ok(FakeOutput {
            path: path.to_string(),
        })
    }

    fn project(
        &mut self,
        _source: &mut FakeSource,
        request: &ProjectionRequest<'_>,
    ) -> Result<Option<FakeObject>> {
        self.record(EngineCall::Project {
            destination: request.destination.to_string(),
            expression: request.expression.to_string(),
            filter: request.filter.to_string(),
            mode: request.mode,
        });

        if self.panicking_projections.contains(request.destination) {
            panic!("fake engine panicked projecting {}", request.destination);
        }
        if self.failing_projections.contains(request.destination) {
            return Err(anyhow!("fake engine cannot project {}", request.destination));
        }
        if self.empty_projections.contains(request.destination) {
            return Ok(None);
        }
        Ok(Some(FakeObject {
            name: request.destination.to_string(),
            expression: request.expression.to_string(),
            filter: request.filter.to_string(),
        }))
    }

    fn persist(&mut self, output: &mut FakeOutput, object: FakeObject) -> Result<()> {
        self.record(EngineCall::Persist(object.name.clone()));
        self.outputs
            .lock()
            .unwrap()
            .entry(output.path.clone())
            .or_default()
            .push(object);
        Ok(())
    }

    fn close_output(&mut self, output: FakeOutput) -> Result<()> {
        self.record(EngineCall::CloseOutput(output.path.clone()));
        if self.fail_close {
            return Err(anyhow!("fake engine cannot close {}", output.path));
        }
        Ok(())
    }
}

//! CSV adapters for the hierarchy and scenario stores.
//!
//! Three files, all keyed by simplified ids (`ROOT`, `R01`, `C01`, `I01`):
//! - structure: `SimplifiedID,ParentID,Weight,Type,Name`
//! - functions: `SimplifiedID,X_Sat_0,X_Sat_1,Units,P,K,C`
//! - scenario: `SimplifiedID,Value`
//!
//! The reader/writer functions work on any `Read`/`Write`; the stores bind
//! them to paths on disk. A scenario store obtained from
//! [`CsvHierarchyStore::scenario_store`] keys its file with the same ids as
//! the structure file last loaded or saved, even when that file does not
//! number its nodes in pre-order.

mod functions;
mod scenario;
mod structure;

pub use functions::{read_functions, write_functions};
pub use scenario::{read_scenario, write_scenario};
pub use structure::{read_structure, write_structure, ImportedStructure};

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::foundation::NodeId;
use crate::domain::hierarchy::{HierarchyNode, SimplifiedIds};
use crate::ports::{HierarchyStore, ScenarioStore, StoreError};

/// ParentID written for the root row.
const NO_PARENT: &str = "None";

fn line_of(record: &::csv::StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

impl From<::csv::Error> for StoreError {
    fn from(err: ::csv::Error) -> Self {
        match err.kind() {
            ::csv::ErrorKind::Io(io) => StoreError::io(io.to_string()),
            _ => StoreError::csv(err.to_string()),
        }
    }
}

/// Simplified ids of the tree a hierarchy store last loaded or saved.
#[derive(Debug, Clone, Default)]
struct LabelBook(Arc<RwLock<SimplifiedIds>>);

impl LabelBook {
    fn record(&self, ids: SimplifiedIds) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = ids;
    }

    /// The recorded ids when they name every indicator of `root`, otherwise
    /// a fresh pre-order numbering.
    fn ids_for(&self, root: &HierarchyNode) -> SimplifiedIds {
        let recorded = self.0.read().unwrap_or_else(PoisonError::into_inner);
        let covers = !recorded.is_empty()
            && root
                .indicators()
                .all(|indicator| recorded.label_of(indicator.id()).is_some());
        if covers {
            recorded.clone()
        } else {
            SimplifiedIds::assign(root)
        }
    }
}

/// Stores a tree as a structure file plus a function file.
#[derive(Debug, Clone)]
pub struct CsvHierarchyStore {
    structure_path: PathBuf,
    functions_path: PathBuf,
    labels: LabelBook,
}

impl CsvHierarchyStore {
    /// Create a store over two files.
    ///
    /// # Example
    /// ```ignore
    /// let store = CsvHierarchyStore::new("bridge_structure.csv", "bridge_functions.csv");
    /// let root = store.load()?;
    /// ```
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(structure_path: P, functions_path: Q) -> Self {
        Self {
            structure_path: structure_path.as_ref().to_path_buf(),
            functions_path: functions_path.as_ref().to_path_buf(),
            labels: LabelBook::default(),
        }
    }

    /// A scenario store keyed by the same simplified ids as this store's files.
    pub fn scenario_store<P: AsRef<Path>>(&self, path: P) -> CsvScenarioStore {
        CsvScenarioStore {
            path: path.as_ref().to_path_buf(),
            labels: self.labels.clone(),
        }
    }

    pub fn structure_path(&self) -> &Path {
        &self.structure_path
    }

    pub fn functions_path(&self) -> &Path {
        &self.functions_path
    }
}

impl HierarchyStore for CsvHierarchyStore {
    /// Loads the structure, then applies the function file if it exists.
    ///
    /// A missing function file leaves every indicator on default parameters.
    fn load(&self) -> Result<HierarchyNode, StoreError> {
        let structure = File::open(&self.structure_path)?;
        let (mut root, ids) = read_structure(BufReader::new(structure))?.into_parts();

        match File::open(&self.functions_path) {
            Ok(file) => {
                let resolve = |label: &str| ids.node_of(label);
                let applied = read_functions(BufReader::new(file), &mut root, resolve)?;
                tracing::debug!(applied, "value functions applied");
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.functions_path.display(),
                    "no function file, indicators keep default parameters"
                );
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(
            path = %self.structure_path.display(),
            nodes = root.iter().count(),
            "hierarchy imported"
        );
        self.labels.record(ids);
        Ok(root)
    }

    fn save(&self, root: &HierarchyNode) -> Result<(), StoreError> {
        let ids = SimplifiedIds::assign(root);
        write_structure(BufWriter::new(File::create(&self.structure_path)?), root, &ids)?;
        write_functions(BufWriter::new(File::create(&self.functions_path)?), root, &ids)?;

        tracing::info!(
            path = %self.structure_path.display(),
            nodes = ids.len(),
            "hierarchy exported"
        );
        self.labels.record(ids);
        Ok(())
    }
}

/// Stores one scenario's raw indicator values.
#[derive(Debug, Clone)]
pub struct CsvScenarioStore {
    path: PathBuf,
    labels: LabelBook,
}

impl CsvScenarioStore {
    /// A standalone store, keyed by a fresh pre-order numbering of the tree.
    ///
    /// Use [`CsvHierarchyStore::scenario_store`] when the tree came from a
    /// structure file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            labels: LabelBook::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScenarioStore for CsvScenarioStore {
    fn load_values(&self, root: &HierarchyNode) -> Result<HashMap<NodeId, f64>, StoreError> {
        let ids = self.labels.ids_for(root);
        let resolve = |label: &str| {
            ids.node_of(label)
                .filter(|id| root.find(*id).is_some_and(|node| node.kind().is_indicator()))
        };
        let values = read_scenario(BufReader::new(File::open(&self.path)?), resolve)?;

        tracing::info!(path = %self.path.display(), values = values.len(), "scenario imported");
        Ok(values)
    }

    fn save_values(
        &self,
        root: &HierarchyNode,
        values: &HashMap<NodeId, f64>,
    ) -> Result<(), StoreError> {
        let ids = self.labels.ids_for(root);
        write_scenario(BufWriter::new(File::create(&self.path)?), root, &ids, values)?;

        tracing::info!(path = %self.path.display(), "scenario exported");
        Ok(())
    }
}

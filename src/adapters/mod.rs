//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `csv` - Structure, function and scenario files keyed by simplified ids

pub mod csv;

pub use self::csv::{CsvHierarchyStore, CsvScenarioStore};

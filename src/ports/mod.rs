//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `HierarchyStore` - Load and save a whole MIVES tree with its value functions
//! - `ScenarioStore` - Load and save raw indicator inputs for one tree
//! - `StoreError` - Failures shared by both stores

mod hierarchy_store;
mod scenario_store;
mod store_error;

pub use hierarchy_store::HierarchyStore;
pub use scenario_store::ScenarioStore;
pub use store_error::StoreError;

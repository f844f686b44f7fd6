//! Field visibility and ordering engine
//!
//! `field-order` tracks, for a fixed catalog of named fields, two independent
//! projections (`collapsedHeader` and `samplePane`). Each projection has a
//! visibility flag and an order per field.
//!
//! # Architecture
//!
//! - **Dense orders**: after every mutation the orders of visible fields in a
//!   projection are exactly `1..=k`, no gaps, no duplicates
//! - **Validate then write**: a rejected mutation leaves state untouched
//! - **Observable**: [`FieldStore::subscribe`] delivers every committed change
//!   with the post-mutation snapshot
//! - **Pluggable persistence**: [`FieldConfigStorage`] with in-memory and YAML
//!   file backends

pub mod action;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod reorder;
pub mod service;
pub mod set;
pub mod storage;
pub mod store;
pub mod types;

pub use action::{parse_actions, FieldAction};
pub use catalog::{default_catalog, CatalogEntry, FieldCatalog};
pub use config::{FieldOrderConfig, StorageConfig};
pub use error::{FieldOrderError, Result};
pub use logging::Pretty;
pub use reorder::{is_dense, reorder};
pub use service::{FieldConfigService, SyncStatus};
pub use set::{FieldChange, FieldSet};
pub use storage::{FieldConfigStorage, InMemoryFieldStorage, YamlFieldStorage};
pub use store::{FieldStore, StoreEvent, DEFAULT_EVENT_CAPACITY, MAX_EVENT_CAPACITY};
pub use types::{FieldId, FieldRecord, Projection, ProjectionState};

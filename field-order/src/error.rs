//! Error types for the field ordering engine

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{FieldId, Projection};

/// Result type for field ordering operations
pub type Result<T> = std::result::Result<T, FieldOrderError>;

/// Errors that can occur in field ordering operations.
///
/// Every mutator validates before touching state, so any of these errors
/// leaves the store exactly as it was.
#[derive(Debug, Error)]
pub enum FieldOrderError {
    /// No record with this id
    #[error("field not found: {id}")]
    NotFound { id: FieldId },

    /// Unrecognized projection key
    #[error("invalid projection: '{0}' (expected collapsedHeader or samplePane)")]
    InvalidProjection(String),

    /// Order mutation on a record that is hidden in that projection
    #[error("field {id} is not visible in {projection}")]
    InvalidState { id: FieldId, projection: Projection },

    /// Requested order lies outside the currently assignable range
    #[error("order {order} out of range 1..={max}")]
    InvalidOrder { order: u32, max: u32 },

    /// Two records share one id
    #[error("duplicate field id: {id}")]
    DuplicateId { id: FieldId },

    /// An action inside a batch failed; nothing in the batch was applied
    #[error("action #{index} failed: {source}")]
    BatchFailed {
        index: usize,
        #[source]
        source: Box<FieldOrderError>,
    },

    /// Storage file does not exist yet
    #[error("field storage not initialized: {path}")]
    StorageNotInitialized { path: PathBuf },

    /// Storage backend error
    #[error("storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Event buffer size outside `1..=max`
    #[error("event capacity {capacity} out of range 1..={max}")]
    InvalidCapacity { capacity: usize, max: usize },

    /// Configuration could not be extracted
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for FieldOrderError {
    fn from(error: figment::Error) -> Self {
        FieldOrderError::Config(Box::new(error))
    }
}

//! Error types for the tank store

use thiserror::Error;

/// Failure in the durable key/value backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by [`crate::store::TankStore`] operations.
///
/// Missing ids are not errors; those operations report `None`/`false`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Reading position {position} is out of range (have {len} readings)")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Task id mismatch: key='{expected}', payload='{found}'")]
    IdMismatch { expected: String, found: String },

    #[error("Unknown phase {phase_id} (timeline has {phases} phases)")]
    UnknownPhase { phase_id: usize, phases: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

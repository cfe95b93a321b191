//! Error handling for contentsync-store
//!
//! Snapshot read and parse failures are raised as core `SyncError` variants
//! and converted into `ExError` with the store operation attached.

use contentsync_core::errors::{ExError, ExErrorKind, SyncError};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error for a read of `path`
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::from(SyncError::SnapshotRead {
        path: path.display().to_string(),
        message: err.to_string(),
    })
    .with_op(operation)
}

/// Create an IO error for a write step of persisting to `path`
pub fn write_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::from(SyncError::SnapshotWrite {
        path: path.display().to_string(),
        message: err.to_string(),
    })
    .with_op(operation)
}

/// Create a parse error for snapshot content that is not valid JSON
pub fn parse_error(path: &str, err: &serde_json::Error) -> ExError {
    invalid_snapshot(path, &err.to_string())
}

/// Create a parse error for valid JSON that is not a snapshot
pub fn invalid_snapshot(path: &str, reason: &str) -> ExError {
    SyncError::SnapshotParse {
        path: path.to_string(),
        message: reason.to_string(),
    }
    .into()
}

/// Create a serialization error
pub fn serialization_error(err: &serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("write_snapshot")
        .with_message(err.to_string())
}

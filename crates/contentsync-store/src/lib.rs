//! contentsync Store - snapshot file persistence
//!
//! Provides:
//! - Snapshot loading with load-time record classification
//! - Atomic snapshot writing (temp file + rename)

pub mod errors;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use snapshot::{load_snapshot, parse_snapshot_str, write_snapshot};

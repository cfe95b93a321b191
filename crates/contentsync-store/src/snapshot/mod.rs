//! Snapshot file persistence
//!
//! - [`load`]: read and classify a snapshot file
//! - [`persist`]: write a snapshot atomically

pub mod load;
pub mod persist;

pub use load::{load_snapshot, parse_snapshot_str, parse_snapshot_value};
pub use persist::write_snapshot;

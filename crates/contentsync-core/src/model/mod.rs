//! Snapshot data model
//!
//! A snapshot holds every exported entry, grouped first by model group and
//! then by model UID. Records are classified into [`ModelRecord`] variants
//! once, when the snapshot is loaded.

pub mod group;
pub mod record;
pub mod snapshot;

pub use group::{Group, RecordKind};
pub use record::{
    classify_record, collection_entries, CollectionMeta, CollectionRecord, ModelRecord,
    PaginationSummary, SingleMeta, SingleRecord,
};
pub use snapshot::{Snapshot, SnapshotMeta, FORMAT_VERSION, META_KEY};

//! contentsync Core - snapshot model and replay engine
//!
//! This crate provides the network-agnostic parts of contentsync,
//! including:
//! - Snapshot data model with load-time record classification
//! - Field sanitization with depth-aware policies
//! - Protection guard (configured and runtime-detected protected models)
//! - Deterministic model ordering with a manual priority list
//! - Replay executor with per-entity failure isolation
//! - Pagination walker and snapshot exporter
//!
//! All network access goes through the [`api::ContentApi`] trait.

pub mod api;
pub mod config;
pub mod errors;
pub mod export;
pub mod logging_facility;
pub mod model;
pub mod ordering;
pub mod pagination;
pub mod protection;
pub mod replay;
pub mod sanitize;

// Re-export commonly used types
pub use api::{ContentApi, ContentTypeRef};
pub use config::{ExportConfig, ReplayConfig};
pub use errors::{ExError, ExErrorKind, Result, SyncError};
pub use export::{export_snapshot, ExportReport};
pub use model::{Group, ModelRecord, RecordKind, Snapshot};
pub use protection::{ProtectionConfig, ProtectionGuard};
pub use replay::{replay_snapshot, ReplayReport, ReplayStats};
pub use sanitize::SanitizePolicy;

//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across the import and export
//! paths so log consumers can filter on them.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_RUN_ID: &str = "run_id";

// Model and entity identifiers
pub const FIELD_UID: &str = "uid";
pub const FIELD_GROUP: &str = "group";
pub const FIELD_INDEX: &str = "index";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Per-entity outcome event names
pub const EVENT_ENTITY_CREATED: &str = "entity_created";
pub const EVENT_ENTITY_FAILED: &str = "entity_failed";
pub const EVENT_MODEL_SKIPPED: &str = "model_skipped";
pub const EVENT_PROTECTION_DETECTED: &str = "protection_detected";
pub const EVENT_MODEL_EXPORTED: &str = "model_exported";

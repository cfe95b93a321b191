//! Snapshot loader
//!
//! Reads an export file and classifies every record once, so the replay
//! side only ever sees [`ModelRecord`] variants.

use crate::errors::{invalid_snapshot, io_error, parse_error, Result};
use contentsync_core::model::{Group, ModelRecord, Snapshot, SnapshotMeta, META_KEY};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load a snapshot file from disk
///
/// # Errors
///
/// Returns `ERR_FILE` when the file cannot be read and `ERR_PARSE` when its
/// content is not a JSON object.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = fs::read_to_string(path).map_err(|e| io_error("read_snapshot", path, e))?;
    let snapshot = parse_snapshot_str(&content, &path.display().to_string())?;

    tracing::info!(
        path = %path.display(),
        collection_types = snapshot.collection_types.len(),
        single_types = snapshot.single_types.len(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

/// Parse snapshot text; `origin` names the source in errors and logs
///
/// # Errors
///
/// Returns `ERR_PARSE` for invalid JSON or a non-object root.
pub fn parse_snapshot_str(content: &str, origin: &str) -> Result<Snapshot> {
    let root: Value = serde_json::from_str(content).map_err(|e| parse_error(origin, &e))?;
    parse_snapshot_value(&root, origin)
}

/// Build a snapshot from an already parsed JSON document
///
/// Missing groups load empty. A group that is not an object is logged and
/// treated as empty. Records keyed `meta` are ignored.
///
/// # Errors
///
/// Returns `ERR_PARSE` when the root is not an object.
pub fn parse_snapshot_value(root: &Value, origin: &str) -> Result<Snapshot> {
    let Some(object) = root.as_object() else {
        return Err(invalid_snapshot(origin, "snapshot root is not a JSON object"));
    };

    let meta: SnapshotMeta = object
        .get(META_KEY)
        .cloned()
        .and_then(|meta| serde_json::from_value(meta).ok())
        .unwrap_or_default();
    let mut snapshot = Snapshot::new(meta);

    for group in Group::ALL {
        let models = match object.get(group.as_str()) {
            None | Some(Value::Null) => continue,
            Some(Value::Object(models)) => models,
            Some(other) => {
                tracing::warn!(
                    origin,
                    group = group.as_str(),
                    found = json_type(other),
                    "Snapshot group is not an object, treating as empty"
                );
                continue;
            }
        };

        for (uid, payload) in models {
            if uid == META_KEY {
                continue;
            }
            let record = ModelRecord::from_payload(payload, Some(group));
            if record.kind().group() != group {
                tracing::debug!(
                    uid = uid.as_str(),
                    group = group.as_str(),
                    kind = record.kind().as_str(),
                    "Record kind tag differs from its group"
                );
            }
            snapshot.insert(group, uid.clone(), record);
        }
    }

    Ok(snapshot)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

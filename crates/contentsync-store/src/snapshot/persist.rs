//! Snapshot writer
//!
//! Uses temp→rename so a crash never leaves a half-written snapshot behind.

use crate::errors::{serialization_error, write_error, Result};
use contentsync_core::model::Snapshot;
use std::fs;
use std::path::Path;

/// Write a snapshot as pretty-printed JSON, atomically
///
/// The temp file lives next to the target so the final rename never
/// crosses a filesystem boundary.
///
/// # Errors
///
/// Returns `ERR_FILE` on any I/O failure and `ERR_SERIALIZATION` if the
/// snapshot cannot be encoded.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let mut content =
        serde_json::to_vec_pretty(&snapshot.to_value()).map_err(|e| serialization_error(&e))?;
    content.push(b'\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_error("create_snapshot_dir", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &content)
        .map_err(|e| write_error("write_snapshot_temp", &temp_path, e))?;
    if let Err(e) = fs::rename(&temp_path, path) {
        fs::remove_file(&temp_path).ok();
        return Err(write_error("rename_snapshot_temp", path, e));
    }

    tracing::info!(
        path = %path.display(),
        bytes = content.len(),
        models = snapshot.model_count(),
        "Snapshot written"
    );
    Ok(())
}

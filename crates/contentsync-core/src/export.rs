//! Snapshot exporter
//!
//! Reads every requested content type from the source instance and builds a
//! [`Snapshot`] in memory. Persisting it is the store's job.

use crate::api::{ContentApi, ContentTypeRef};
use crate::config::ExportConfig;
use crate::errors::Result;
use crate::model::{
    CollectionMeta, CollectionRecord, Group, ModelRecord, SingleMeta, SingleRecord, Snapshot,
    SnapshotMeta, FORMAT_VERSION, META_KEY,
};
use crate::pagination::fetch_collection;
use crate::{log_model_event, log_op_end, log_op_error, log_op_start};
use chrono::{SecondsFormat, Utc};
use contentsync_core_types::schema::EVENT_MODEL_EXPORTED;
use contentsync_core_types::RunId;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::Level;

/// Outcome counters of one export run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub run_id: String,
    pub exported: u64,
    pub failed: u64,
    /// UIDs that could not be fetched
    pub failed_uids: Vec<String>,
}

impl ExportReport {
    pub fn is_failure(&self) -> bool {
        self.failed > 0
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Export the given content types into a snapshot
///
/// Collection types are fetched page by page, single types with one request.
/// A model that fails to fetch is logged and left out; the others continue.
pub fn export_snapshot<A: ContentApi + ?Sized>(
    api: &mut A,
    types: &[ContentTypeRef],
    config: &ExportConfig,
    run_id: &RunId,
) -> (Snapshot, ExportReport) {
    let started = Instant::now();
    let mut targets: Vec<&ContentTypeRef> = types.iter().filter(|t| t.uid != META_KEY).collect();
    targets.sort();
    targets.dedup();

    let model_count = targets.len() as u64;
    log_op_start!("export", run_id = %run_id, models = model_count);

    let mut snapshot = Snapshot::new(SnapshotMeta {
        exported_at: Some(now_rfc3339()),
        source: Some(config.source.clone()),
        format_version: Some(FORMAT_VERSION),
        page_size: Some(config.page_size),
    });
    let mut report = ExportReport {
        run_id: run_id.to_string(),
        ..ExportReport::default()
    };

    for target in targets {
        let model_started = Instant::now();
        let fetched = match target.group {
            Group::CollectionTypes => export_collection(api, &target.uid, config.page_size),
            Group::SingleTypes => export_single(api, &target.uid, config.page_size),
        };
        match fetched {
            Ok(record) => {
                log_model_event!(
                    Level::INFO,
                    EVENT_MODEL_EXPORTED,
                    run_id,
                    target.group,
                    target.uid.as_str(),
                    entries = record.skip_weight(),
                    "Exported {}",
                    target.uid
                );
                snapshot.insert(target.group, target.uid.clone(), record);
                report.exported += 1;
            }
            Err(err) => {
                let elapsed_ms = model_started.elapsed().as_millis() as u64;
                log_op_error!(
                    "export_model",
                    err,
                    duration_ms = elapsed_ms,
                    uid = target.uid.as_str(),
                    group = target.group.as_str()
                );
                report.failed += 1;
                report.failed_uids.push(target.uid.clone());
            }
        }
    }

    let elapsed_ms = started.elapsed().as_millis() as u64;
    log_op_end!(
        "export",
        duration_ms = elapsed_ms,
        run_id = %run_id,
        exported = report.exported,
        failed = report.failed
    );
    (snapshot, report)
}

fn export_collection<A: ContentApi + ?Sized>(
    api: &mut A,
    uid: &str,
    page_size: u32,
) -> Result<ModelRecord> {
    let pages = fetch_collection(api, uid, page_size)?;
    Ok(ModelRecord::Collection(CollectionRecord {
        meta: CollectionMeta {
            count: Some(pages.entries.len()),
            pagination: pages.pagination,
            fetched_at: Some(now_rfc3339()),
        },
        entries: pages.entries,
    }))
}

fn export_single<A: ContentApi + ?Sized>(
    api: &mut A,
    uid: &str,
    page_size: u32,
) -> Result<ModelRecord> {
    let payload = api.fetch_page(Group::SingleTypes, uid, None, page_size)?;
    let data = match payload.get("data") {
        Some(Value::Null) => None,
        Some(data) => Some(data.clone()),
        None if payload.is_null() => None,
        None => Some(payload),
    };
    Ok(ModelRecord::Single(SingleRecord {
        meta: SingleMeta {
            fetched_at: Some(now_rfc3339()),
        },
        data,
    }))
}

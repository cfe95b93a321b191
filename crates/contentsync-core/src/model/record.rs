//! Per-model export records and their classification

use super::group::{Group, RecordKind};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Field names that may hold the entry list of a collection record.
/// Checked in order; older exports used `results` or `entries`.
const ENTRY_FIELDS: [&str; 3] = ["results", "data", "entries"];

/// Pagination summary as reported by the admin listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default)]
    pub pagination: Option<PaginationSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
}

/// All entries of one collection type, in stored order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionRecord {
    pub meta: CollectionMeta,
    pub entries: Vec<Value>,
}

/// The one entry of a single type, if the export captured it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleRecord {
    pub meta: SingleMeta,
    pub data: Option<Value>,
}

/// A classified export record
#[derive(Debug, Clone, PartialEq)]
pub enum ModelRecord {
    Collection(CollectionRecord),
    Single(SingleRecord),
}

impl ModelRecord {
    /// Classify and extract a raw record payload
    pub fn from_payload(payload: &Value, group: Option<Group>) -> Self {
        match classify_record(payload, group) {
            RecordKind::Collection => ModelRecord::Collection(CollectionRecord {
                meta: meta_of(payload),
                entries: collection_entries(payload),
            }),
            RecordKind::Single => ModelRecord::Single(SingleRecord {
                meta: meta_of(payload),
                data: single_data(payload),
            }),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            ModelRecord::Collection(_) => RecordKind::Collection,
            ModelRecord::Single(_) => RecordKind::Single,
        }
    }

    /// Number of entities this record stands for when skipped as a whole
    ///
    /// An empty collection still counts as one skipped unit.
    pub fn skip_weight(&self) -> u64 {
        match self {
            ModelRecord::Collection(record) => record.entries.len().max(1) as u64,
            ModelRecord::Single(_) => 1,
        }
    }

    /// Serialized form written to snapshot files
    pub fn to_value(&self) -> Value {
        match self {
            ModelRecord::Collection(record) => json!({
                "kind": RecordKind::Collection.as_str(),
                "meta": record.meta,
                "data": record.entries,
                "results": record.entries,
            }),
            ModelRecord::Single(record) => json!({
                "kind": RecordKind::Single.as_str(),
                "meta": record.meta,
                "data": record.data,
            }),
        }
    }
}

/// Decide whether a raw payload is a collection or a single record
///
/// Rule order: explicit `kind` tag, then group context, then shape (an
/// array under `results` or `data` means collection).
pub fn classify_record(payload: &Value, group: Option<Group>) -> RecordKind {
    if let Some(kind) = payload
        .get("kind")
        .and_then(Value::as_str)
        .and_then(RecordKind::parse)
    {
        return kind;
    }
    if let Some(group) = group {
        return group.default_kind();
    }
    let has_list = ["results", "data"]
        .iter()
        .any(|field| payload.get(field).map(Value::is_array).unwrap_or(false));
    if has_list {
        RecordKind::Collection
    } else {
        RecordKind::Single
    }
}

/// Entry list of a collection payload, taken from the first array-valued
/// field among `results`, `data`, `entries`
pub fn collection_entries(payload: &Value) -> Vec<Value> {
    ENTRY_FIELDS
        .iter()
        .find_map(|field| payload.get(field).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default()
}

fn single_data(payload: &Value) -> Option<Value> {
    let Some(object) = payload.as_object() else {
        return None;
    };
    let candidate = match object.get("data") {
        Some(data) => data,
        // A bare entity with no wrapper is the record itself
        None if !object.contains_key("kind") => payload,
        None => return None,
    };
    candidate.is_object().then(|| candidate.clone())
}

fn meta_of<T: for<'de> Deserialize<'de> + Default>(payload: &Value) -> T {
    payload
        .get("meta")
        .cloned()
        .and_then(|meta| serde_json::from_value(meta).ok())
        .unwrap_or_default()
}

//! Snapshot root type

use super::group::Group;
use super::record::ModelRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Current snapshot format version
pub const FORMAT_VERSION: u32 = 1;

/// Reserved key: never a model UID, neither at the root nor inside a group
pub const META_KEY: &str = "meta";

/// Export metadata written at the snapshot root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// A loaded (or freshly exported) snapshot
///
/// Both group maps always exist; a snapshot file that omits one loads
/// with an empty map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub meta: SnapshotMeta,
    pub collection_types: BTreeMap<String, ModelRecord>,
    pub single_types: BTreeMap<String, ModelRecord>,
}

impl Snapshot {
    pub fn new(meta: SnapshotMeta) -> Self {
        Self {
            meta,
            ..Self::default()
        }
    }

    pub fn group(&self, group: Group) -> &BTreeMap<String, ModelRecord> {
        match group {
            Group::CollectionTypes => &self.collection_types,
            Group::SingleTypes => &self.single_types,
        }
    }

    pub fn group_mut(&mut self, group: Group) -> &mut BTreeMap<String, ModelRecord> {
        match group {
            Group::CollectionTypes => &mut self.collection_types,
            Group::SingleTypes => &mut self.single_types,
        }
    }

    /// Insert a record; the reserved `meta` key is refused
    pub fn insert(&mut self, group: Group, uid: impl Into<String>, record: ModelRecord) -> bool {
        let uid = uid.into();
        if uid == META_KEY {
            return false;
        }
        self.group_mut(group).insert(uid, record);
        true
    }

    /// Iterate every record with its group, collection types first
    pub fn records(&self) -> impl Iterator<Item = (Group, &str, &ModelRecord)> {
        Group::ALL.into_iter().flat_map(move |group| {
            self.group(group)
                .iter()
                .map(move |(uid, record)| (group, uid.as_str(), record))
        })
    }

    /// Number of models across both groups
    pub fn model_count(&self) -> usize {
        self.collection_types.len() + self.single_types.len()
    }

    /// Serialized form written to snapshot files
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        root.insert(
            META_KEY.to_string(),
            serde_json::to_value(&self.meta).unwrap_or(Value::Null),
        );
        for group in Group::ALL {
            let records: Map<String, Value> = self
                .group(group)
                .iter()
                .map(|(uid, record)| (uid.clone(), record.to_value()))
                .collect();
            root.insert(group.as_str().to_string(), Value::Object(records));
        }
        Value::Object(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{CollectionRecord, SingleRecord};

    #[test]
    fn test_insert_refuses_meta_key() {
        let mut snapshot = Snapshot::default();
        let inserted = snapshot.insert(
            Group::CollectionTypes,
            META_KEY,
            ModelRecord::Collection(CollectionRecord::default()),
        );
        assert!(!inserted);
        assert_eq!(snapshot.model_count(), 0);
    }

    #[test]
    fn test_records_iterates_collections_first() {
        let mut snapshot = Snapshot::default();
        snapshot.insert(
            Group::SingleTypes,
            "api::a.a",
            ModelRecord::Single(SingleRecord::default()),
        );
        snapshot.insert(
            Group::CollectionTypes,
            "api::z.z",
            ModelRecord::Collection(CollectionRecord::default()),
        );

        let order: Vec<_> = snapshot.records().map(|(g, uid, _)| (g, uid)).collect();
        assert_eq!(
            order,
            vec![
                (Group::CollectionTypes, "api::z.z"),
                (Group::SingleTypes, "api::a.a")
            ]
        );
    }

    #[test]
    fn test_to_value_always_has_both_groups() {
        let value = Snapshot::new(SnapshotMeta {
            format_version: Some(FORMAT_VERSION),
            ..SnapshotMeta::default()
        })
        .to_value();

        assert!(value["collection-types"].is_object());
        assert!(value["single-types"].is_object());
        assert_eq!(value["meta"]["formatVersion"], 1);
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Model group, as it appears in admin API paths and snapshot keys
///
/// Ordering puts collection types first; the replay plan relies on it when
/// the same UID exists in both groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Group {
    #[serde(rename = "collection-types")]
    CollectionTypes,
    #[serde(rename = "single-types")]
    SingleTypes,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::CollectionTypes, Group::SingleTypes];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::CollectionTypes => "collection-types",
            Group::SingleTypes => "single-types",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "collection-types" => Some(Group::CollectionTypes),
            "single-types" => Some(Group::SingleTypes),
            _ => None,
        }
    }

    /// Record kind implied by membership in this group
    pub fn default_kind(&self) -> RecordKind {
        match self {
            Group::CollectionTypes => RecordKind::Collection,
            Group::SingleTypes => RecordKind::Single,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit `kind` tag carried by exported records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "collectionType")]
    Collection,
    #[serde(rename = "singleType")]
    Single,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Collection => "collectionType",
            RecordKind::Single => "singleType",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "collectionType" => Some(RecordKind::Collection),
            "singleType" => Some(RecordKind::Single),
            _ => None,
        }
    }

    /// Group whose write endpoint accepts records of this kind
    pub fn group(&self) -> Group {
        match self {
            RecordKind::Collection => Group::CollectionTypes,
            RecordKind::Single => Group::SingleTypes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_round_trips_through_str() {
        for group in Group::ALL {
            assert_eq!(Group::parse(group.as_str()), Some(group));
        }
        assert_eq!(Group::parse("meta"), None);
    }

    #[test]
    fn test_collection_group_sorts_first() {
        assert!(Group::CollectionTypes < Group::SingleTypes);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(RecordKind::parse("collectionType"), Some(RecordKind::Collection));
        assert_eq!(RecordKind::parse("singleType"), Some(RecordKind::Single));
        assert_eq!(RecordKind::parse("component"), None);
        assert_eq!(RecordKind::Single.group(), Group::SingleTypes);
    }
}

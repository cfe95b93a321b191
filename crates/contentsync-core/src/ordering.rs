//! Deterministic model ordering
//!
//! Operators list models that must be replayed first (parents before
//! children); every other model follows in lexicographic order.

use crate::model::{Group, ModelRecord, Snapshot, META_KEY};
use std::collections::HashMap;

/// Rank lookup built from an operator priority list
///
/// A UID listed more than once keeps its first position.
#[derive(Debug, Clone)]
pub struct PriorityOrder {
    ranks: HashMap<String, usize>,
    unlisted: usize,
}

impl PriorityOrder {
    pub fn new<S: AsRef<str>>(priority: &[S]) -> Self {
        let mut ranks = HashMap::new();
        for (index, uid) in priority.iter().enumerate() {
            ranks.entry(uid.as_ref().to_string()).or_insert(index);
        }
        Self {
            ranks,
            unlisted: priority.len(),
        }
    }

    /// Position in the priority list, or the list length when unlisted
    pub fn rank(&self, uid: &str) -> usize {
        self.ranks.get(uid).copied().unwrap_or(self.unlisted)
    }
}

/// Order UIDs by priority rank, then lexicographically; `meta` is dropped
pub fn order_uids<I, S, P>(uids: I, priority: &[P]) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    P: AsRef<str>,
{
    let order = PriorityOrder::new(priority);
    let mut uids: Vec<String> = uids
        .into_iter()
        .map(Into::into)
        .filter(|uid| uid != META_KEY)
        .collect();
    uids.sort_by(|a, b| order.rank(a).cmp(&order.rank(b)).then_with(|| a.cmp(b)));
    uids.dedup();
    uids
}

/// One model scheduled for replay
#[derive(Debug, Clone, Copy)]
pub struct PlannedModel<'a> {
    pub uid: &'a str,
    pub group: Group,
    pub record: &'a ModelRecord,
}

/// Replay plan over both groups of a snapshot
///
/// Ties on UID (a model present in both groups) keep collection types first.
pub fn build_plan<'a, P: AsRef<str>>(snapshot: &'a Snapshot, priority: &[P]) -> Vec<PlannedModel<'a>> {
    let order = PriorityOrder::new(priority);
    let mut plan: Vec<PlannedModel<'a>> = snapshot
        .records()
        .filter(|(_, uid, _)| *uid != META_KEY)
        .map(|(group, uid, record)| PlannedModel { uid, group, record })
        .collect();
    plan.sort_by(|a, b| {
        order
            .rank(a.uid)
            .cmp(&order.rank(b.uid))
            .then_with(|| a.uid.cmp(b.uid))
            .then_with(|| a.group.cmp(&b.group))
    });
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CollectionRecord, SingleRecord};

    #[test]
    fn test_no_priority_is_alphabetical() {
        let ordered = order_uids(["c", "a", "b"], &[] as &[&str]);
        assert_eq!(ordered, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_priority_first_then_rest_alphabetical() {
        let ordered = order_uids(["a", "b", "c", "d"], &["d", "b"]);
        assert_eq!(ordered, vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_priority_entries_absent_from_input_are_ignored() {
        let ordered = order_uids(["a", "b"], &["zzz", "b"]);
        assert_eq!(ordered, vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_priority_keeps_first_position() {
        let ordered = order_uids(["a", "b"], &["b", "a", "b"]);
        assert_eq!(ordered, vec!["b", "a"]);
    }

    #[test]
    fn test_meta_is_never_a_uid() {
        let ordered = order_uids(["meta", "a"], &["meta"]);
        assert_eq!(ordered, vec!["a"]);
    }

    #[test]
    fn test_plan_spans_both_groups() {
        let mut snapshot = Snapshot::default();
        snapshot.insert(
            Group::CollectionTypes,
            "api::b.b",
            ModelRecord::Collection(CollectionRecord::default()),
        );
        snapshot.insert(
            Group::SingleTypes,
            "api::a.a",
            ModelRecord::Single(SingleRecord::default()),
        );
        snapshot.insert(
            Group::SingleTypes,
            "api::b.b",
            ModelRecord::Single(SingleRecord::default()),
        );

        let plan = build_plan(&snapshot, &["api::b.b"]);
        let order: Vec<_> = plan.iter().map(|m| (m.uid, m.group)).collect();
        assert_eq!(
            order,
            vec![
                ("api::b.b", Group::CollectionTypes),
                ("api::b.b", Group::SingleTypes),
                ("api::a.a", Group::SingleTypes),
            ]
        );
    }
}

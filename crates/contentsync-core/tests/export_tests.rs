#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::RecordingApi;
use contentsync_core::config::ExportConfig;
use contentsync_core::export::export_snapshot;
use contentsync_core::model::{Group, ModelRecord};
use contentsync_core::ContentTypeRef;
use contentsync_core_types::RunId;
use serde_json::json;

#[test]
fn test_export_collects_both_groups() {
    let mut api = RecordingApi::new();
    api.serve_pages(
        "api::article.article",
        vec![json!({
            "results": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}],
            "meta": {"pagination": {"page": 1, "pageSize": 250, "pageCount": 1, "total": 2}}
        })],
    );
    api.serve_pages("api::home.home", vec![json!({"data": {"id": 1, "hero": "Hello"}})]);

    let types = vec![
        ContentTypeRef::new(Group::CollectionTypes, "api::article.article"),
        ContentTypeRef::new(Group::SingleTypes, "api::home.home"),
    ];
    let (snapshot, report) =
        export_snapshot(&mut api, &types, &ExportConfig::default(), &RunId::new());

    assert_eq!(report.exported, 2);
    assert!(!report.is_failure());

    let article = &snapshot.collection_types["api::article.article"];
    match article {
        ModelRecord::Collection(record) => {
            assert_eq!(record.entries.len(), 2);
            assert_eq!(record.meta.count, Some(2));
            assert_eq!(
                record.meta.pagination.as_ref().and_then(|p| p.total),
                Some(2)
            );
        }
        other => panic!("expected collection, got {:?}", other),
    }

    let value = snapshot.to_value();
    assert_eq!(value["collection-types"]["api::article.article"]["data"][1]["title"], "B");
    assert_eq!(value["collection-types"]["api::article.article"]["results"][0]["title"], "A");
    assert_eq!(value["single-types"]["api::home.home"]["data"]["hero"], "Hello");
    assert_eq!(value["meta"]["formatVersion"], 1);
}

#[test]
fn test_failed_model_is_omitted() {
    let mut api = RecordingApi::new();
    let types = vec![ContentTypeRef::new(Group::CollectionTypes, "api::missing.missing")];

    let (snapshot, report) =
        export_snapshot(&mut api, &types, &ExportConfig::default(), &RunId::new());

    assert_eq!(snapshot.model_count(), 0);
    assert_eq!(report.failed, 1);
    assert!(report.is_failure());
}

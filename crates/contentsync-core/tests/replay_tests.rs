#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{snapshot_from, Call, RecordingApi};
use contentsync_core::config::ReplayConfig;
use contentsync_core::protection::ProtectionConfig;
use contentsync_core::replay::replay_snapshot;
use contentsync_core::sanitize::SanitizePolicy;
use contentsync_core::ReplayStats;
use contentsync_core_types::RunId;
use serde_json::json;

fn run(api: &mut RecordingApi, snapshot: serde_json::Value, config: &ReplayConfig) -> ReplayStats {
    replay_snapshot(api, &snapshot_from(snapshot), config, RunId::new()).stats
}

#[test]
fn test_articles_end_to_end() {
    let mut api = RecordingApi::new();
    let stats = run(
        &mut api,
        json!({
            "collection-types": {
                "articles": {
                    "data": [
                        {"id": 1, "title": "A", "createdAt": "t"},
                        {"id": 2, "title": "B"}
                    ]
                }
            }
        }),
        &ReplayConfig::default(),
    );

    assert_eq!(
        api.calls,
        vec![
            Call::Create {
                uid: "articles".to_string(),
                body: json!({"title": "A"})
            },
            Call::Create {
                uid: "articles".to_string(),
                body: json!({"title": "B"})
            },
        ]
    );
    assert_eq!(
        stats,
        ReplayStats {
            items: 2,
            created: 2,
            skipped: 0,
            failed: 0
        }
    );
}

#[test]
fn test_results_listing_strips_document_ids() {
    let mut api = RecordingApi::new();
    let stats = run(
        &mut api,
        json!({
            "collection-types": {
                "api::article.article": {
                    "results": [
                        {"id": 1, "documentId": "d1", "title": "A"},
                        {"id": 2, "documentId": "d2", "title": "B"}
                    ]
                }
            }
        }),
        &ReplayConfig::default(),
    );

    assert_eq!(
        api.bodies_for("api::article.article"),
        vec![json!({"title": "A"}), json!({"title": "B"})]
    );
    assert_eq!(
        stats,
        ReplayStats {
            items: 2,
            created: 2,
            skipped: 0,
            failed: 0
        }
    );
}

#[test]
fn test_first_write_405_skips_rest_of_model() {
    let mut api = RecordingApi::new();
    api.fail_with("api::menu.menu", 405);

    let snapshot = snapshot_from(json!({
        "collection-types": {
            "api::menu.menu": {"data": [{"title": "1"}, {"title": "2"}, {"title": "3"}]},
            "api::page.page": {"data": [{"title": "p"}]}
        }
    }));
    let report = replay_snapshot(&mut api, &snapshot, &ReplayConfig::default(), RunId::new());

    assert_eq!(api.writes_for("api::menu.menu"), 1);
    assert_eq!(api.writes_for("api::page.page"), 1);
    assert_eq!(report.stats.skipped, 3);
    assert_eq!(report.stats.failed, 0);
    assert_eq!(report.stats.created, 1);
    assert_eq!(report.detected_protected, vec!["api::menu.menu".to_string()]);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_mid_model_405_counts_attempted_and_remaining() {
    let mut api = RecordingApi::new();
    api.script("api::tag.tag", Ok(json!({"data": {}})));
    api.fail_with("api::tag.tag", 405);

    let stats = run(
        &mut api,
        json!({
            "collection-types": {
                "api::tag.tag": {"data": [{"n": 1}, {"n": 2}, {"n": 3}, {"n": 4}]}
            }
        }),
        &ReplayConfig::default(),
    );

    assert_eq!(api.writes_for("api::tag.tag"), 2);
    assert_eq!(stats.created, 1);
    assert_eq!(stats.skipped, 3);
    assert_eq!(stats.items, 2);
}

#[test]
fn test_single_type_405_counts_one_skip() {
    let mut api = RecordingApi::new();
    api.fail_with("api::home.home", 405);

    let stats = run(
        &mut api,
        json!({"single-types": {"api::home.home": {"data": {"id": 9, "hero": "x"}}}}),
        &ReplayConfig::default(),
    );

    assert_eq!(api.bodies_for("api::home.home"), vec![json!({"hero": "x"})]);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.failed, 0);
}

#[test]
fn test_empty_models_are_skipped_without_requests() {
    let mut api = RecordingApi::new();
    let stats = run(
        &mut api,
        json!({
            "collection-types": {"api::empty.empty": {"data": []}},
            "single-types": {"api::blank.blank": {"data": null}}
        }),
        &ReplayConfig::default(),
    );

    assert!(api.calls.is_empty());
    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.items, 0);
}

#[test]
fn test_protected_models_are_never_written() {
    let mut api = RecordingApi::new();
    let stats = run(
        &mut api,
        json!({
            "collection-types": {
                "api::dealer-list.dealer-list": {"data": [{"a": 1}, {"a": 2}]},
                "api::custom.custom": {"data": [{"a": 1}]}
            },
            "single-types": {"api::global.global": {"data": {"siteName": "x"}}}
        }),
        &ReplayConfig {
            protection: ProtectionConfig {
                include_protected: false,
                extra_uids: vec!["api::custom.custom".to_string()],
            },
            ..ReplayConfig::default()
        },
    );

    assert!(api.calls.is_empty());
    assert_eq!(stats.skipped, 4);
}

#[test]
fn test_include_protected_writes_default_list() {
    let mut api = RecordingApi::new();
    let stats = run(
        &mut api,
        json!({"single-types": {"api::global.global": {"data": {"siteName": "x"}}}}),
        &ReplayConfig {
            protection: ProtectionConfig {
                include_protected: true,
                extra_uids: Vec::new(),
            },
            ..ReplayConfig::default()
        },
    );

    assert_eq!(api.writes_for("api::global.global"), 1);
    assert_eq!(stats.created, 1);
}

#[test]
fn test_failed_entry_does_not_stop_siblings() {
    let mut api = RecordingApi::new();
    api.fail_with("api::post.post", 400);
    api.fail_with("api::post.post", 500);

    let snapshot = snapshot_from(json!({
        "collection-types": {
            "api::post.post": {"data": [{"n": 1}, {"n": 2}, {"n": 3}]}
        }
    }));
    let report = replay_snapshot(&mut api, &snapshot, &ReplayConfig::default(), RunId::new());

    assert_eq!(api.writes_for("api::post.post"), 3);
    assert_eq!(report.stats.failed, 2);
    assert_eq!(report.stats.created, 1);
    assert_eq!(report.stats.items, 3);
    assert!(report.detected_protected.is_empty());
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_manual_order_puts_parents_first() {
    let mut api = RecordingApi::new();
    run(
        &mut api,
        json!({
            "collection-types": {
                "api::article.article": {"data": [{"t": 1}]},
                "api::author.author": {"data": [{"t": 1}]},
                "api::category.category": {"data": [{"t": 1}]}
            },
            "single-types": {"api::about.about": {"data": {"t": 1}}}
        }),
        &ReplayConfig {
            order: vec![
                "api::category.category".to_string(),
                "api::author.author".to_string(),
            ],
            ..ReplayConfig::default()
        },
    );

    assert_eq!(
        api.write_order(),
        vec![
            "api::category.category",
            "api::author.author",
            "api::about.about",
            "api::article.article",
        ]
    );
}

#[test]
fn test_custom_sanitize_policy_applies() {
    let mut api = RecordingApi::new();
    run(
        &mut api,
        json!({
            "collection-types": {
                "api::doc.doc": {"data": [{"id": 1, "slug": "s", "seo": {"id": 2, "slug": "n"}}]}
            }
        }),
        &ReplayConfig {
            sanitize: SanitizePolicy::default().with_root_fields(["slug"]),
            ..ReplayConfig::default()
        },
    );

    assert_eq!(
        api.bodies_for("api::doc.doc"),
        vec![json!({"seo": {"slug": "n"}})]
    );
}

#[test]
fn test_detection_persists_across_runs_of_same_guard() {
    use contentsync_core::ordering::build_plan;
    use contentsync_core::protection::ProtectionGuard;
    use contentsync_core::replay::ReplayExecutor;

    let mut api = RecordingApi::new();
    api.fail_with("api::faq.faq", 405);

    let snapshot = snapshot_from(json!({
        "collection-types": {"api::faq.faq": {"data": [{"q": 1}, {"q": 2}]}}
    }));
    let plan = build_plan(&snapshot, &[] as &[&str]);

    let mut executor = ReplayExecutor::new(
        &mut api,
        ProtectionGuard::new(&ProtectionConfig::default()),
        SanitizePolicy::default(),
    );
    executor.replay_model(&plan[0]);
    executor.replay_model(&plan[0]);

    assert!(executor.guard().is_protected("api::faq.faq"));
    assert_eq!(executor.stats().skipped, 4);
    drop(executor);
    assert_eq!(api.writes_for("api::faq.faq"), 1);
}

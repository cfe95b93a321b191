//! Replay (import) engine
//!
//! - [`ReplayExecutor`]: per-entity submission with failure isolation
//! - [`ReplayStats`] / [`ReplayReport`]: run accounting
//! - [`replay_snapshot`]: plan + guard + executor wired from a [`ReplayConfig`]

pub mod executor;
pub mod stats;

pub use executor::ReplayExecutor;
pub use stats::{ReplayReport, ReplayStats};

use crate::api::ContentApi;
use crate::config::ReplayConfig;
use crate::model::Snapshot;
use crate::ordering::build_plan;
use crate::protection::ProtectionGuard;
use contentsync_core_types::RunId;

/// Replay a whole snapshot against the target API
pub fn replay_snapshot<A: ContentApi + ?Sized>(
    api: &mut A,
    snapshot: &Snapshot,
    config: &ReplayConfig,
    run_id: RunId,
) -> ReplayReport {
    if config.protection.include_protected {
        tracing::warn!("include-protected enabled: default protected UID list disabled");
    }
    let guard = ProtectionGuard::new(&config.protection);
    let plan = build_plan(snapshot, &config.order);
    ReplayExecutor::new(api, guard, config.sanitize.clone())
        .with_run_id(run_id)
        .run(&plan)
}

//! Replay executor
//!
//! Walks a replay plan model by model, one request at a time. A failed entry
//! never stops its siblings; a 405 stops only the rest of its own model.

use crate::api::ContentApi;
use crate::errors::SyncError;
use crate::model::{CollectionRecord, Group, ModelRecord, SingleRecord};
use crate::ordering::PlannedModel;
use crate::protection::ProtectionGuard;
use crate::replay::stats::{ReplayReport, ReplayStats};
use crate::sanitize::SanitizePolicy;
use crate::{log_model_event, log_op_end, log_op_start};
use contentsync_core_types::schema::{
    EVENT_ENTITY_CREATED, EVENT_ENTITY_FAILED, EVENT_MODEL_SKIPPED, EVENT_PROTECTION_DETECTED,
};
use contentsync_core_types::RunId;
use serde_json::Value;
use std::time::Instant;
use tracing::Level;

/// Outcome of a single write
enum WriteOutcome {
    Created,
    Protected,
    Failed,
}

pub struct ReplayExecutor<'a, A: ContentApi + ?Sized> {
    api: &'a mut A,
    guard: ProtectionGuard,
    sanitizer: SanitizePolicy,
    stats: ReplayStats,
    run_id: RunId,
}

impl<'a, A: ContentApi + ?Sized> ReplayExecutor<'a, A> {
    pub fn new(api: &'a mut A, guard: ProtectionGuard, sanitizer: SanitizePolicy) -> Self {
        Self {
            api,
            guard,
            sanitizer,
            stats: ReplayStats::default(),
            run_id: RunId::new(),
        }
    }

    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = run_id;
        self
    }

    pub fn stats(&self) -> &ReplayStats {
        &self.stats
    }

    pub fn guard(&self) -> &ProtectionGuard {
        &self.guard
    }

    /// Replay every planned model in order and return the final report
    pub fn run(mut self, plan: &[PlannedModel<'_>]) -> ReplayReport {
        let started = Instant::now();
        let models = plan.len() as u64;
        log_op_start!("replay", run_id = %self.run_id, models = models);

        for model in plan {
            self.replay_model(model);
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        log_op_end!(
            "replay",
            duration_ms = elapsed_ms,
            run_id = %self.run_id,
            items = self.stats.items,
            created = self.stats.created,
            skipped = self.stats.skipped,
            failed = self.stats.failed
        );
        self.finish()
    }

    /// Replay one model, honoring the guard
    pub fn replay_model(&mut self, model: &PlannedModel<'_>) {
        if self.guard.is_protected(model.uid) {
            let weight = model.record.skip_weight();
            log_model_event!(
                Level::WARN,
                EVENT_MODEL_SKIPPED,
                self.run_id,
                model.group,
                model.uid,
                skipped = weight,
                "Skipping protected model {}",
                model.uid
            );
            self.stats.skipped += weight;
            return;
        }

        match model.record {
            ModelRecord::Collection(record) => self.replay_collection(model.uid, model.group, record),
            ModelRecord::Single(record) => self.replay_single(model.uid, model.group, record),
        }
    }

    fn replay_collection(&mut self, uid: &str, group: Group, record: &CollectionRecord) {
        let total = record.entries.len();
        if total == 0 {
            log_model_event!(
                Level::INFO,
                EVENT_MODEL_SKIPPED,
                self.run_id,
                group,
                uid,
                skipped = 1u64,
                "No entries found for {}, skipping",
                uid
            );
            self.stats.skipped += 1;
            return;
        }

        tracing::info!(run_id = %self.run_id, uid, "Importing {} entries for {}", total, uid);
        for (index, entry) in record.entries.iter().enumerate() {
            let body = self.sanitizer.sanitize(entry);
            self.stats.items += 1;

            let result = self.api.create_entry(uid, &body);
            match self.settle(uid, group, index + 1, total, result) {
                WriteOutcome::Created | WriteOutcome::Failed => {}
                WriteOutcome::Protected => {
                    let remaining = (total - index) as u64;
                    tracing::warn!(
                        run_id = %self.run_id,
                        uid,
                        skipped = remaining,
                        "Skipping remaining entries of {}",
                        uid
                    );
                    self.stats.skipped += remaining;
                    return;
                }
            }
        }
    }

    fn replay_single(&mut self, uid: &str, group: Group, record: &SingleRecord) {
        let Some(data) = record.data.as_ref().filter(|data| data.is_object()) else {
            log_model_event!(
                Level::INFO,
                EVENT_MODEL_SKIPPED,
                self.run_id,
                group,
                uid,
                skipped = 1u64,
                "No data for single type {}, skipping",
                uid
            );
            self.stats.skipped += 1;
            return;
        };

        let body = self.sanitizer.sanitize(data);
        self.stats.items += 1;

        let result = self.api.upsert_single(uid, &body);
        if let WriteOutcome::Protected = self.settle(uid, group, 1, 1, result) {
            self.stats.skipped += 1;
        }
    }

    /// Account for one write response
    fn settle(
        &mut self,
        uid: &str,
        group: Group,
        index: usize,
        total: usize,
        result: crate::errors::Result<Value>,
    ) -> WriteOutcome {
        let position = index as u64;
        match result {
            Ok(_) => {
                self.stats.created += 1;
                log_model_event!(
                    Level::INFO,
                    EVENT_ENTITY_CREATED,
                    self.run_id,
                    group,
                    uid,
                    index = position,
                    "({}/{}) {}",
                    index,
                    total,
                    uid
                );
                WriteOutcome::Created
            }
            Err(err) if err.is_method_not_allowed() => {
                let newly = self.guard.record_detection(uid);
                let detected = SyncError::ProtectionDetected {
                    uid: uid.to_string(),
                };
                log_model_event!(
                    Level::WARN,
                    EVENT_PROTECTION_DETECTED,
                    self.run_id,
                    group,
                    uid,
                    index = position,
                    newly_detected = newly,
                    "{}",
                    detected
                );
                WriteOutcome::Protected
            }
            Err(err) => {
                self.stats.failed += 1;
                let body = err.body().cloned().unwrap_or(Value::Null);
                log_model_event!(
                    Level::ERROR,
                    EVENT_ENTITY_FAILED,
                    self.run_id,
                    group,
                    uid,
                    index = position,
                    status = ?err.status(),
                    body = %body,
                    "Failed to import {} entry {}: {}",
                    uid,
                    index,
                    err
                );
                WriteOutcome::Failed
            }
        }
    }

    /// Consume the executor and report
    pub fn finish(self) -> ReplayReport {
        ReplayReport {
            run_id: self.run_id,
            stats: self.stats,
            detected_protected: self.guard.detected().iter().cloned().collect(),
        }
    }
}

use contentsync_core_types::RunId;
use serde::Serialize;
use std::fmt;

/// Counters accumulated over one replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    /// Entities a write was attempted for
    pub items: u64,
    /// Successful writes
    pub created: u64,
    /// Entities deliberately not written (protected or empty)
    pub skipped: u64,
    /// Write attempts that errored
    pub failed: u64,
}

impl ReplayStats {
    /// A run fails when any write failed; skips never fail a run
    pub fn is_failure(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for ReplayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "created: {}, skipped: {}, failed: {}, processed entries: {}",
            self.created, self.skipped, self.failed, self.items
        )
    }
}

/// Final outcome of a replay run
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub run_id: RunId,
    pub stats: ReplayStats,
    /// Models that answered 405 during this run
    pub detected_protected: Vec<String>,
}

impl ReplayReport {
    pub fn is_failure(&self) -> bool {
        self.stats.is_failure()
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        if self.is_failure() {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_ignores_skips() {
        let stats = ReplayStats {
            items: 3,
            created: 3,
            skipped: 10,
            failed: 0,
        };
        assert!(!stats.is_failure());

        let stats = ReplayStats {
            failed: 1,
            ..stats
        };
        assert!(stats.is_failure());
    }

    #[test]
    fn test_summary_line() {
        let stats = ReplayStats {
            items: 2,
            created: 1,
            skipped: 4,
            failed: 1,
        };
        assert_eq!(
            stats.to_string(),
            "created: 1, skipped: 4, failed: 1, processed entries: 2"
        );
    }

    #[test]
    fn test_exit_code() {
        let report = ReplayReport {
            run_id: RunId::from_string("r".to_string()),
            stats: ReplayStats::default(),
            detected_protected: Vec::new(),
        };
        assert_eq!(report.exit_code(), 0);

        let failed = ReplayReport {
            stats: ReplayStats {
                failed: 2,
                ..ReplayStats::default()
            },
            ..report
        };
        assert_eq!(failed.exit_code(), 1);
    }
}

//! Protection guard
//!
//! Decides whether entries of a model may be written. The guard starts from
//! the configured protected set and learns exactly one thing at runtime:
//! models whose write endpoint answered 405. Both sets only grow.

use std::collections::BTreeSet;

/// System-critical models that are never written unless the operator opts in
pub const DEFAULT_PROTECTED_UIDS: [&str; 4] = [
    "api::header.header",
    "api::footer.footer",
    "api::global.global",
    "api::dealer-list.dealer-list",
];

/// Static part of the protected set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectionConfig {
    /// Drop the built-in default list (operator additions still apply)
    pub include_protected: bool,
    /// Operator-supplied UIDs, from environment and CLI combined
    pub extra_uids: Vec<String>,
}

/// Write gate for model UIDs
///
/// # Example
/// ```
/// use contentsync_core::protection::{ProtectionConfig, ProtectionGuard};
///
/// let mut guard = ProtectionGuard::new(&ProtectionConfig::default());
/// assert!(guard.is_protected("api::global.global"));
/// assert!(!guard.is_protected("api::article.article"));
///
/// guard.record_detection("api::article.article");
/// assert!(guard.is_protected("api::article.article"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProtectionGuard {
    configured: BTreeSet<String>,
    detected: BTreeSet<String>,
}

impl ProtectionGuard {
    pub fn new(config: &ProtectionConfig) -> Self {
        let mut configured = BTreeSet::new();
        if !config.include_protected {
            configured.extend(DEFAULT_PROTECTED_UIDS.iter().map(|uid| uid.to_string()));
        }
        configured.extend(
            config
                .extra_uids
                .iter()
                .map(|uid| uid.trim())
                .filter(|uid| !uid.is_empty())
                .map(str::to_string),
        );
        Self {
            configured,
            detected: BTreeSet::new(),
        }
    }

    /// True if the UID is configured as protected or was detected this run
    pub fn is_protected(&self, uid: &str) -> bool {
        self.configured.contains(uid) || self.detected.contains(uid)
    }

    /// Remember that the target rejected writes for `uid`
    ///
    /// Returns `true` the first time a UID is recorded.
    pub fn record_detection(&mut self, uid: &str) -> bool {
        if self.configured.contains(uid) {
            return false;
        }
        self.detected.insert(uid.to_string())
    }

    pub fn configured(&self) -> &BTreeSet<String> {
        &self.configured
    }

    /// UIDs learned from 405 responses during this run
    pub fn detected(&self) -> &BTreeSet<String> {
        &self.detected
    }
}

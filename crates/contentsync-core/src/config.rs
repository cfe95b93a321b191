//! Run configuration
//!
//! Values are resolved once at startup (CLI flags over environment) and
//! passed explicitly to the components that need them.

use crate::errors::{Result, SyncError};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::protection::ProtectionConfig;
use crate::sanitize::SanitizePolicy;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:1337";

/// Snapshot path used when none is configured
pub const DEFAULT_SNAPSHOT_FILE: &str = "./strapi-export.json";

/// Everything the replay engine needs besides the API and the snapshot
#[derive(Debug, Clone, Default)]
pub struct ReplayConfig {
    pub protection: ProtectionConfig,
    /// Manual processing order (priority list of UIDs)
    pub order: Vec<String>,
    pub sanitize: SanitizePolicy,
}

/// Everything the exporter needs besides the API
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Origin recorded in the snapshot meta
    pub source: String,
    pub page_size: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Split a comma-separated list, trimming items and dropping blanks
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a permissive boolean (`true/1/yes/y/on`, `false/0/no/n/off`)
///
/// # Errors
///
/// Returns `InvalidConfig` for any other value.
pub fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "0" | "no" | "n" | "off" => Ok(false),
        other => Err(SyncError::InvalidConfig {
            name: "boolean flag".to_string(),
            reason: format!("'{}' is not one of true/false/1/0/yes/no/y/n/on/off", other),
        }),
    }
}

/// Pick the first non-blank credential from the candidates, in order
///
/// # Errors
///
/// Returns `MissingConfig` when no candidate holds a value.
pub fn require_token<I>(candidates: I) -> Result<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
        .ok_or_else(|| SyncError::MissingConfig {
            name: "admin token".to_string(),
            hint: "Provide --token, STRAPI_ADMIN_TOKEN, or STRAPI_TOKEN.".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list(" api::a.a, ,api::b.b ,"),
            vec!["api::a.a".to_string(), "api::b.b".to_string()]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        for yes in ["true", "1", "YES", "y", "On"] {
            assert!(parse_flag(yes).unwrap(), "{}", yes);
        }
        for no in ["false", "0", "no", "N", "off"] {
            assert!(!parse_flag(no).unwrap(), "{}", no);
        }
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_require_token_order_and_blanks() {
        let token = require_token([None, Some("  ".to_string()), Some("b".to_string())]).unwrap();
        assert_eq!(token, "b");

        let err = require_token([None, None]).unwrap_err();
        assert!(matches!(err, SyncError::MissingConfig { .. }));
    }
}

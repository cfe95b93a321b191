//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "contentsync=info,contentsync_core=info,contentsync_store=info,contentsync_http=info";

/// Output format of the stderr log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Human-readable lines for interactive runs
    #[default]
    Text,
    /// One JSON object per event, for CI pipelines and log shippers
    Json,
}

impl Profile {
    /// Map a `--log-format` value to a profile
    pub fn from_format(format: &str) -> Option<Self> {
        match format.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Some(Profile::Text),
            "json" => Some(Profile::Json),
            _ => None,
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup. Later calls are no-ops. Both profiles write to
/// stderr so stdout carries only the run summary. `RUST_LOG` overrides the
/// default filter. Tests install `init_test_capture()` instead.
///
/// # Example
///
/// ```
/// use contentsync_core::logging_facility::{init, Profile};
///
/// init(Profile::Text);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        };
        match profile {
            Profile::Text => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter())
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Json => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter())
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    });
}

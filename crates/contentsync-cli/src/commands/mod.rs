pub mod export;
pub mod import;

use clap::Args;
use contentsync_core::config::{require_token, DEFAULT_BASE_URL};
use contentsync_core_types::Sensitive;
use contentsync_http::{AdminClient, ClientOptions};
use std::time::Duration;

/// Target instance and credentials, shared by every command
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Base URL of the CMS instance
    #[arg(long, env = "STRAPI_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Admin API token
    #[arg(long, env = "STRAPI_ADMIN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Fallback token source, read only from the environment
    #[arg(long = "fallback-token", env = "STRAPI_TOKEN", hide = true, hide_env_values = true)]
    pub fallback_token: Option<String>,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "STRAPI_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    /// Resolve the credential and build the admin client
    ///
    /// No request is sent here; a missing token fails before any network
    /// activity.
    pub fn connect(self) -> Result<AdminClient, Box<dyn std::error::Error>> {
        let token = require_token([self.token, self.fallback_token])?;
        let client = AdminClient::new(ClientOptions {
            base_url: self.url,
            token: Sensitive::new(token),
            timeout: self.timeout_secs.map(Duration::from_secs),
        })?;
        Ok(client)
    }
}

/// Trim list items and drop blanks
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

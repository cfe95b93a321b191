//! Admin API client
//!
//! One blocking request at a time, authenticated with a bearer token.
//! Model UIDs are percent-encoded as a single path segment.

use crate::response::{error_message, safe_parse};
use contentsync_core::errors::{Result, SyncError};
use contentsync_core::model::{Group, RecordKind};
use contentsync_core::{ContentApi, ContentTypeRef};
use contentsync_core_types::Sensitive;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value;
use std::time::{Duration, Instant};

const JSON: &str = "application/json";
const CONTENT_TYPES_PATH: &str = "/content-manager/content-types";

/// Connection settings for [`AdminClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub token: Sensitive<String>,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

/// Blocking client for the content-manager admin endpoints
pub struct AdminClient {
    http: Client,
    base_url: String,
    token: Sensitive<String>,
}

impl AdminClient {
    /// Build a client
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the base URL is not an absolute http(s)
    /// URL, and `Internal` when the HTTP stack cannot be initialised.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let base_url = options.base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|e| SyncError::InvalidConfig {
            name: "url".to_string(),
            reason: format!("'{}' is not a valid URL: {}", base_url, e),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SyncError::InvalidConfig {
                name: "url".to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let http = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| SyncError::Internal {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url,
            token: options.token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path of a model endpoint, with the UID percent-encoded
    pub fn model_path(group: Group, uid: &str) -> String {
        format!(
            "/content-manager/{}/{}",
            group.as_str(),
            urlencoding::encode(uid)
        )
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let started = Instant::now();
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .bearer_auth(self.token.expose())
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().map_err(|e| SyncError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            status: e.status().map(|s| s.as_u16()),
            body: Value::Null,
            message: if e.is_timeout() {
                format!("request timed out: {}", e)
            } else {
                e.to_string()
            },
        })?;

        let status = response.status();
        let text = response.text().map_err(|e| SyncError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            status: Some(status.as_u16()),
            body: Value::Null,
            message: format!("failed to read response body: {}", e),
        })?;
        let payload = safe_parse(&text);

        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::debug!(
            method = %method,
            path,
            status = status.as_u16(),
            duration_ms = elapsed_ms,
            "admin request"
        );

        if status.is_success() {
            return Ok(payload);
        }
        let reason = status.canonical_reason().unwrap_or("request failed");
        Err(SyncError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            status: Some(status.as_u16()),
            message: error_message(&payload, reason),
            body: payload,
        })
    }
}

impl ContentApi for AdminClient {
    fn create_entry(&mut self, uid: &str, body: &Value) -> Result<Value> {
        let path = Self::model_path(Group::CollectionTypes, uid);
        self.send(Method::POST, &path, &[], Some(body))
    }

    fn upsert_single(&mut self, uid: &str, body: &Value) -> Result<Value> {
        let path = Self::model_path(Group::SingleTypes, uid);
        self.send(Method::PUT, &path, &[], Some(body))
    }

    fn fetch_page(
        &mut self,
        group: Group,
        uid: &str,
        page: Option<u32>,
        page_size: u32,
    ) -> Result<Value> {
        let path = Self::model_path(group, uid);
        let mut query = vec![
            ("populate", "*".to_string()),
            ("pagination[pageSize]", page_size.to_string()),
        ];
        if let Some(page) = page {
            query.push(("pagination[page]", page.to_string()));
        }
        self.send(Method::GET, &path, &query, None)
    }

    fn list_content_types(&mut self) -> Result<Vec<ContentTypeRef>> {
        let payload = self.send(Method::GET, CONTENT_TYPES_PATH, &[], None)?;
        Ok(parse_content_types(&payload))
    }
}

/// Displayed API content types in a content-types listing, sorted
///
/// Accepts either `{data: [...]}` or a bare array. Entries without a UID or
/// with an unknown kind are dropped, as are those with `isDisplayed: false`.
pub fn parse_content_types(payload: &Value) -> Vec<ContentTypeRef> {
    let items = payload
        .get("data")
        .and_then(Value::as_array)
        .or_else(|| payload.as_array());
    let Some(items) = items else {
        return Vec::new();
    };

    let mut types: Vec<ContentTypeRef> = items
        .iter()
        .filter(|item| item.get("isDisplayed").and_then(Value::as_bool) != Some(false))
        .filter_map(|item| {
            let uid = item.get("uid").and_then(Value::as_str)?;
            let kind = item
                .get("kind")
                .and_then(Value::as_str)
                .and_then(RecordKind::parse)?;
            Some(ContentTypeRef::new(kind.group(), uid))
        })
        .collect();
    types.sort();
    types.dedup();
    types
}

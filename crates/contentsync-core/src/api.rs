//! Admin API seam
//!
//! The replay executor and the exporter talk to the content-management
//! backend only through [`ContentApi`]. The HTTP implementation lives in
//! `contentsync-http`; tests substitute an in-memory recorder.

use crate::errors::Result;
use crate::model::Group;
use serde_json::Value;

/// A content model discovered on the source instance
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContentTypeRef {
    pub group: Group,
    pub uid: String,
}

impl ContentTypeRef {
    pub fn new(group: Group, uid: impl Into<String>) -> Self {
        Self {
            group,
            uid: uid.into(),
        }
    }
}

/// Operations the admin API must support
///
/// Every call blocks until the response arrives. A non-2xx response is
/// returned as [`SyncError::Transport`](crate::errors::SyncError::Transport)
/// carrying the status and the (parsed or raw) body.
pub trait ContentApi {
    /// `POST /content-manager/collection-types/{uid}`
    fn create_entry(&mut self, uid: &str, body: &Value) -> Result<Value>;

    /// `PUT /content-manager/single-types/{uid}`
    fn upsert_single(&mut self, uid: &str, body: &Value) -> Result<Value>;

    /// `GET /content-manager/{group}/{uid}?populate=*&pagination[pageSize]=N[&pagination[page]=P]`
    fn fetch_page(
        &mut self,
        group: Group,
        uid: &str,
        page: Option<u32>,
        page_size: u32,
    ) -> Result<Value>;

    /// Content types visible in the admin content manager
    fn list_content_types(&mut self) -> Result<Vec<ContentTypeRef>>;
}

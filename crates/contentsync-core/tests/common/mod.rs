use contentsync_core::errors::{Result, SyncError};
use contentsync_core::model::{Group, ModelRecord, Snapshot};
use contentsync_core::{ContentApi, ContentTypeRef};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};

/// One request seen by the recorder
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { uid: String, body: Value },
    Upsert { uid: String, body: Value },
    Fetch {
        group: Group,
        uid: String,
        page: Option<u32>,
    },
    ListTypes,
}

/// In-memory admin API that records every request
///
/// Writes succeed unless a response has been scripted for the UID; scripted
/// responses are consumed in order, after which writes succeed again.
#[derive(Default)]
pub struct RecordingApi {
    pub calls: Vec<Call>,
    scripted: HashMap<String, VecDeque<Result<Value>>>,
    pages: HashMap<String, Vec<Value>>,
}

#[allow(dead_code)]
impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next write to `uid`
    pub fn script(&mut self, uid: &str, response: Result<Value>) -> &mut Self {
        self.scripted
            .entry(uid.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Queue an HTTP error status for the next write to `uid`
    pub fn fail_with(&mut self, uid: &str, status: u16) -> &mut Self {
        self.script(uid, Err(http_error("POST", uid, status)))
    }

    /// Serve these payloads for successive page fetches of `uid`
    pub fn serve_pages(&mut self, uid: &str, pages: Vec<Value>) -> &mut Self {
        self.pages.insert(uid.to_string(), pages);
        self
    }

    /// Bodies written to a UID, in order
    pub fn bodies_for(&self, uid: &str) -> Vec<Value> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Create { uid: u, body } | Call::Upsert { uid: u, body } if u == uid => {
                    Some(body.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Number of write requests sent for a UID
    pub fn writes_for(&self, uid: &str) -> usize {
        self.bodies_for(uid).len()
    }

    /// UIDs in the order their first write was sent
    pub fn write_order(&self) -> Vec<String> {
        let mut order: Vec<String> = Vec::new();
        for call in &self.calls {
            let uid = match call {
                Call::Create { uid, .. } | Call::Upsert { uid, .. } => uid,
                _ => continue,
            };
            if !order.contains(uid) {
                order.push(uid.clone());
            }
        }
        order
    }

    fn respond(&mut self, uid: &str) -> Result<Value> {
        self.scripted
            .get_mut(uid)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(json!({"data": {"id": 1}})))
    }
}

impl ContentApi for RecordingApi {
    fn create_entry(&mut self, uid: &str, body: &Value) -> Result<Value> {
        self.calls.push(Call::Create {
            uid: uid.to_string(),
            body: body.clone(),
        });
        self.respond(uid)
    }

    fn upsert_single(&mut self, uid: &str, body: &Value) -> Result<Value> {
        self.calls.push(Call::Upsert {
            uid: uid.to_string(),
            body: body.clone(),
        });
        self.respond(uid)
    }

    fn fetch_page(
        &mut self,
        group: Group,
        uid: &str,
        page: Option<u32>,
        _page_size: u32,
    ) -> Result<Value> {
        self.calls.push(Call::Fetch {
            group,
            uid: uid.to_string(),
            page,
        });
        let index = page.unwrap_or(1).saturating_sub(1) as usize;
        self.pages
            .get(uid)
            .and_then(|pages| pages.get(index))
            .cloned()
            .ok_or_else(|| http_error("GET", uid, 404))
    }

    fn list_content_types(&mut self) -> Result<Vec<ContentTypeRef>> {
        self.calls.push(Call::ListTypes);
        Ok(Vec::new())
    }
}

/// Transport error as the HTTP adapter would produce it
pub fn http_error(method: &str, uid: &str, status: u16) -> SyncError {
    SyncError::Transport {
        method: method.to_string(),
        path: format!("/content-manager/collection-types/{}", uid),
        status: Some(status),
        body: json!({"error": {"status": status, "message": "scripted"}}),
        message: format!("status {}", status),
    }
}

/// Build a snapshot from `{"collection-types": {...}, "single-types": {...}}` JSON
#[allow(dead_code)]
pub fn snapshot_from(value: Value) -> Snapshot {
    let mut snapshot = Snapshot::default();
    for group in Group::ALL {
        if let Some(models) = value.get(group.as_str()).and_then(Value::as_object) {
            for (uid, payload) in models {
                snapshot.insert(
                    group,
                    uid.clone(),
                    ModelRecord::from_payload(payload, Some(group)),
                );
            }
        }
    }
    snapshot
}

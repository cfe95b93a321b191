//! In-memory event capture for log assertions in tests
//!
//! One process-wide layer records every event. Tests share it, so queries
//! filter by a UID, run id or operation name unique to the test.

use contentsync_core_types::schema::{FIELD_EVENT, FIELD_OP, FIELD_RUN_ID, FIELD_UID};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event, fields rendered as strings
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    pub fn uid(&self) -> Option<&str> {
        self.field(FIELD_UID)
    }

    pub fn run_id(&self) -> Option<&str> {
        self.field(FIELD_RUN_ID)
    }
}

struct FieldRecorder<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldRecorder<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        let captured = CapturedEvent {
            level: *event.metadata().level(),
            fields,
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Handle onto the captured events
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn matching(&self, predicate: impl Fn(&CapturedEvent) -> bool) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| predicate(e)).collect()
    }

    /// Events named `event` that were logged for model `uid`
    pub fn events_for_uid(&self, uid: &str, event: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.uid() == Some(uid) && e.event() == Some(event))
    }

    /// Every event stamped with `run_id`
    pub fn events_for_run(&self, run_id: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.run_id() == Some(run_id))
    }

    /// Boundary events (`start`, `end`, `end_error`) of operation `op`
    pub fn op_events(&self, op: &str, event: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.op() == Some(op) && e.event() == Some(event))
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer on first use and return the shared handle
///
/// ```
/// use contentsync_core::logging_facility::test_capture::init_test_capture;
/// use contentsync_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_capture_op");
/// assert_eq!(capture.op_events("doc_capture_op", "start").len(), 1);
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Arc::new(Mutex::new(Vec::new()));
            let layer = CaptureLayer {
                events: events.clone(),
            };
            tracing_subscriber::registry().with(layer).init();
            TestCapture { events }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_event_accessors() {
        let fields = BTreeMap::from([
            ("uid".to_string(), "api::article.article".to_string()),
            ("event".to_string(), "entity_created".to_string()),
        ]);
        let event = CapturedEvent {
            level: Level::INFO,
            fields,
        };

        assert_eq!(event.uid(), Some("api::article.article"));
        assert_eq!(event.event(), Some("entity_created"));
        assert_eq!(event.op(), None);
        assert_eq!(event.run_id(), None);
    }
}

//! In-memory event capture for log assertions in tests
//!
//! Every event is flattened to string fields. The canonical `component`,
//! `op` and `event` fields are lifted out so tests can select the events of
//! one operation, then narrow by snapshot or test name.

use dbsnap_core_types::schema::{
    FIELD_COMPONENT, FIELD_EVENT, FIELD_OP, FIELD_SNAPSHOT_NAME, FIELD_TEST_NAME,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event, with every field rendered as a string
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Rendered value of a field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Whether this is an `event` of operation `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct StringFields(HashMap<String, String>);

impl StringFields {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for StringFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

/// Subscriber layer appending every event to a shared buffer
pub struct TestCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: Arc::clone(&events),
            },
            TestCapture { events },
        )
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = StringFields::default();
        event.record(&mut fields);
        let fields = fields.0;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        };

        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Read side of the capture buffer
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events of one operation and event type
    pub fn events_for(&self, op: &str, event: &str) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| e.is(op, event)).collect()
    }

    /// `record_snapshot` events for one snapshot name
    pub fn snapshot_events(&self, event: &str, snapshot: &str) -> Vec<CapturedEvent> {
        self.events_for("record_snapshot", event)
            .into_iter()
            .filter(|e| e.field(FIELD_SNAPSHOT_NAME) == Some(snapshot))
            .collect()
    }

    /// `snapshot_test` events for one test name
    pub fn test_events(&self, event: &str, test_name: &str) -> Vec<CapturedEvent> {
        self.events_for("snapshot_test", event)
            .into_iter()
            .filter(|e| e.field(FIELD_TEST_NAME) == Some(test_name))
            .collect()
    }

    /// # Panics
    ///
    /// Panics if no `event` of operation `op` was captured
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer globally (once) and return its handle.
///
/// Parallel tests share the buffer; select events by a snapshot or test
/// name unique to the test.
///
/// ```
/// use dbsnap_core::logging_facility::test_capture::init_test_capture;
/// use dbsnap_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("record_snapshot", snapshot = "doc_capture");
/// assert_eq!(capture.snapshot_events("start", "doc_capture").len(), 1);
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            // Events go uncaptured if another global subscriber is already set
            let _ = tracing_subscriber::registry().with(layer).try_init();
            capture
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(op: &str, kind: &str, snapshot: &str) -> CapturedEvent {
        let mut fields = HashMap::new();
        fields.insert(FIELD_SNAPSHOT_NAME.to_string(), snapshot.to_string());
        CapturedEvent {
            level: Level::INFO,
            component: None,
            op: Some(op.to_string()),
            event: Some(kind.to_string()),
            fields,
        }
    }

    #[test]
    fn test_snapshot_events_filters_by_name() {
        let (_layer, capture) = TestCaptureLayer::new();
        {
            let mut events = capture.events.lock().unwrap();
            events.push(event("record_snapshot", "start", "a"));
            events.push(event("record_snapshot", "start", "b"));
            events.push(event("snapshot_test", "start", "a"));
        }

        let found = capture.snapshot_events("start", "a");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field(FIELD_SNAPSHOT_NAME), Some("a"));
        assert!(found[0].is("record_snapshot", "start"));
    }
}

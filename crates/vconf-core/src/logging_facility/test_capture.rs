//! In-memory event capture for log assertions in tests.

use crate::schema::field;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// One recorded event. Every field is kept in its rendered form.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// True for the `event` boundary of operation `op`.
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct FieldRecorder(HashMap<String, String>);

impl Visit for FieldRecorder {
    // Numbers and booleans reach here through the default `record_*` methods
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

type Sink = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    sink: Sink,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        let fields = recorder.0;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: fields.get(field::COMPONENT).cloned(),
            op: fields.get(field::OP).cloned(),
            event: fields.get(field::EVENT).cloned(),
            fields,
        };
        lock(&self.sink).push(captured);
    }
}

fn lock(sink: &Sink) -> MutexGuard<'_, Vec<CapturedEvent>> {
    sink.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared view of everything captured so far.
///
/// Tests in one binary share a single capture, so filter by a unique op name
/// or field value rather than counting all events.
#[derive(Clone, Default)]
pub struct TestCapture {
    sink: Sink,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.sink).clone()
    }

    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        lock(&self.sink)
            .iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .cloned()
            .collect()
    }

    /// First `event` boundary recorded for `op`.
    pub fn find(&self, op: &str, event: &str) -> Option<CapturedEvent> {
        lock(&self.sink).iter().find(|e| e.is(op, event)).cloned()
    }

    /// # Panics
    ///
    /// Panics if no `event` boundary was recorded for `op`.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = lock(&self.sink);
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "no op={} event={} among {} captured events",
            op,
            event,
            events.len()
        );
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        lock(&self.sink).iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&self) {
        lock(&self.sink).clear();
    }

    fn layer(&self) -> CaptureLayer {
        CaptureLayer {
            sink: Arc::clone(&self.sink),
        }
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber and return its handle.
///
/// Every call returns the same capture.
///
/// ```
/// use vconf_core::logging_facility::init_test_capture;
/// use vconf_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc.capture");
/// capture.assert_event_exists("doc.capture", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let capture = TestCapture::default();
            // Keeps any subscriber already installed in this process
            let _ = tracing_subscriber::registry()
                .with(capture.layer())
                .try_init();
            capture
        })
        .clone()
}

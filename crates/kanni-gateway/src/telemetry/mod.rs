//! Structured event logs.
//!
//! Client events are logged on [`EVENTS_TARGET`]. [`EventLogLayer`] turns
//! those tracing events into [`LogRecord`]s and hands them to a channel;
//! in production the receiving end is the OTLP exporter.

pub mod otlp;

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as fmt_layer, EnvFilter, Layer};

pub use otlp::OtlpExporter;

pub const EVENTS_TARGET: &str = "kanni::events";

/// One event log line, flattened to string attributes.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub time_unix_nano: u128,
    pub level: Level,
    pub body: String,
    pub attributes: Vec<(String, String)>,
}

impl LogRecord {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct FieldCollector {
    body: String,
    attributes: Vec<(String, String)>,
}

impl FieldCollector {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.body = value;
        } else {
            self.attributes.push((field.name().to_string(), value));
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }
}

/// Forwards every event on [`EVENTS_TARGET`] as a [`LogRecord`].
///
/// Sending never blocks: when the channel is full or closed the record is
/// dropped.
pub struct EventLogLayer {
    tx: mpsc::Sender<LogRecord>,
}

impl EventLogLayer {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<LogRecord>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl<S: Subscriber> Layer<S> for EventLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if meta.target() != EVENTS_TARGET {
            return;
        }
        let mut fields = FieldCollector::default();
        event.record(&mut fields);
        let record = LogRecord {
            time_unix_nano: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0),
            level: *meta.level(),
            body: fields.body,
            attributes: fields.attributes,
        };
        let _ = self.tx.try_send(record);
    }
}

/// Console logging from `RUST_LOG`, plus event shipping when an exporter is
/// given. Must run inside the tokio runtime when `exporter` is set.
pub fn init(exporter: Option<OtlpExporter>) {
    let console = fmt_layer::layer().with_filter(EnvFilter::from_default_env());
    let shipping = exporter.map(OtlpExporter::spawn);
    tracing_subscriber::registry().with(console).with(shipping).init();
}

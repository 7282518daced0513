//! Recorder strategies selected once from the `enable_metrics` flag.
//!
//! `LiveRecorder` writes through to its store. `DisabledRecorder` keeps a
//! parked store untouched and exports a placeholder body, so re-enabling
//! later resumes from exactly the state that existed when it was disabled.

use super::export::{self, ExportInfo, DISABLED_BODY};
use super::store::MetricsStore;

pub trait Recorder: Send {
    fn increment_counter(&mut self, name: &str, delta: f64, labels: &[(&str, &str)]);
    fn set_gauge(&mut self, name: &str, value: f64, labels: &[(&str, &str)]);
    fn record_histogram(&mut self, name: &str, value: f64, labels: &[(&str, &str)]);

    /// Render the exposition document at `now_ms`.
    fn export(&self, info: &ExportInfo, now_ms: i64) -> String;

    fn is_enabled(&self) -> bool;
    fn store(&self) -> &MetricsStore;
    fn into_store(self: Box<Self>) -> MetricsStore;
}

pub struct LiveRecorder {
    store: MetricsStore,
}

impl LiveRecorder {
    pub fn new(store: MetricsStore) -> Self {
        Self { store }
    }
}

impl Recorder for LiveRecorder {
    fn increment_counter(&mut self, name: &str, delta: f64, labels: &[(&str, &str)]) {
        self.store.increment_counter(name, delta, labels);
    }

    fn set_gauge(&mut self, name: &str, value: f64, labels: &[(&str, &str)]) {
        self.store.set_gauge(name, value, labels);
    }

    fn record_histogram(&mut self, name: &str, value: f64, labels: &[(&str, &str)]) {
        self.store.record_histogram(name, value, labels);
    }

    fn export(&self, info: &ExportInfo, now_ms: i64) -> String {
        export::render(&self.store, info, now_ms)
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn store(&self) -> &MetricsStore {
        &self.store
    }

    fn into_store(self: Box<Self>) -> MetricsStore {
        self.store
    }
}

pub struct DisabledRecorder {
    parked: MetricsStore,
}

impl DisabledRecorder {
    pub fn new(parked: MetricsStore) -> Self {
        Self { parked }
    }
}

impl Recorder for DisabledRecorder {
    fn increment_counter(&mut self, _name: &str, _delta: f64, _labels: &[(&str, &str)]) {}

    fn set_gauge(&mut self, _name: &str, _value: f64, _labels: &[(&str, &str)]) {}

    fn record_histogram(&mut self, _name: &str, _value: f64, _labels: &[(&str, &str)]) {}

    fn export(&self, _info: &ExportInfo, _now_ms: i64) -> String {
        DISABLED_BODY.to_string()
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn store(&self) -> &MetricsStore {
        &self.parked
    }

    fn into_store(self: Box<Self>) -> MetricsStore {
        self.parked
    }
}

/// The only place the enable flag is consulted.
pub fn recorder_for(enabled: bool, store: MetricsStore) -> Box<dyn Recorder> {
    if enabled {
        Box::new(LiveRecorder::new(store))
    } else {
        Box::new(DisabledRecorder::new(store))
    }
}

//! In-process metrics store: counters, gauges and bounded histogram windows.
//!
//! One store lives for the whole process. Writes are synchronous and total;
//! the store has a single logical writer (callers serialize access), so no
//! interior locking is done here.

use std::collections::{BTreeMap, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

use super::labels::MetricKey;

/// Samples kept per histogram series; older samples are evicted first.
pub const HISTOGRAM_WINDOW: usize = 1000;

/// Distinct label sets allowed per metric name before new ones fold into
/// the overflow series.
pub const DEFAULT_SERIES_LIMIT: usize = 500;

/// Label value carried by every label of the overflow series.
pub const OVERFLOW_LABEL: &str = "__overflow__";

/// Milliseconds since the Unix epoch (0 if the clock is before the epoch).
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub timestamp_ms: i64,
}

#[derive(Debug, Clone)]
pub struct MetricsStore {
    counters: BTreeMap<MetricKey, f64>,
    gauges: BTreeMap<MetricKey, f64>,
    histograms: BTreeMap<MetricKey, VecDeque<Sample>>,
    started_at_ms: i64,
    series_limit: usize,
}

impl Default for MetricsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsStore {
    pub fn new() -> Self {
        Self::started_at(now_millis())
    }

    /// Build a store with an explicit start time (uptime is measured from it).
    pub fn started_at(started_at_ms: i64) -> Self {
        Self {
            counters: BTreeMap::new(),
            gauges: BTreeMap::new(),
            histograms: BTreeMap::new(),
            started_at_ms,
            series_limit: DEFAULT_SERIES_LIMIT,
        }
    }

    /// Cap the number of series per metric name. Once a name has `limit`
    /// series, writes with an unseen label set land on one overflow series
    /// whose label values are all [`OVERFLOW_LABEL`].
    pub fn with_series_limit(mut self, limit: usize) -> Self {
        self.series_limit = limit;
        self
    }

    pub fn started_at_ms(&self) -> i64 {
        self.started_at_ms
    }

    pub fn series_limit(&self) -> usize {
        self.series_limit
    }

    /// Add `delta` to a counter, creating it at `delta`.
    ///
    /// Negative deltas are accepted: `active_users` is modeled as a counter
    /// that moves both ways.
    pub fn increment_counter(&mut self, name: &str, delta: f64, labels: &[(&str, &str)]) {
        let key = limited(&self.counters, MetricKey::new(name, labels), self.series_limit);
        *self.counters.entry(key).or_insert(0.0) += delta;
    }

    pub fn set_gauge(&mut self, name: &str, value: f64, labels: &[(&str, &str)]) {
        let key = limited(&self.gauges, MetricKey::new(name, labels), self.series_limit);
        self.gauges.insert(key, value);
    }

    pub fn record_histogram(&mut self, name: &str, value: f64, labels: &[(&str, &str)]) {
        self.record_histogram_at(name, value, labels, now_millis());
    }

    pub fn record_histogram_at(
        &mut self,
        name: &str,
        value: f64,
        labels: &[(&str, &str)],
        timestamp_ms: i64,
    ) {
        let key = limited(&self.histograms, MetricKey::new(name, labels), self.series_limit);
        let series = self
            .histograms
            .entry(key)
            .or_insert_with(|| VecDeque::with_capacity(16));
        series.push_back(Sample { value, timestamp_ms });
        while series.len() > HISTOGRAM_WINDOW {
            series.pop_front();
        }
    }

    pub fn counter(&self, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
        self.counters.get(&MetricKey::new(name, labels)).copied()
    }

    pub fn gauge(&self, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
        self.gauges.get(&MetricKey::new(name, labels)).copied()
    }

    pub fn histogram(&self, name: &str, labels: &[(&str, &str)]) -> Option<&VecDeque<Sample>> {
        self.histograms.get(&MetricKey::new(name, labels))
    }

    pub fn counters(&self) -> impl Iterator<Item = (&MetricKey, f64)> {
        self.counters.iter().map(|(k, v)| (k, *v))
    }

    pub fn gauges(&self) -> impl Iterator<Item = (&MetricKey, f64)> {
        self.gauges.iter().map(|(k, v)| (k, *v))
    }

    pub fn histograms(&self) -> impl Iterator<Item = (&MetricKey, &VecDeque<Sample>)> {
        self.histograms.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty() && self.gauges.is_empty() && self.histograms.is_empty()
    }
}

fn family_len<T>(map: &BTreeMap<MetricKey, T>, name: &str) -> usize {
    map.range(MetricKey::family_start(name)..)
        .take_while(|(k, _)| k.name == name)
        .count()
}

/// Resolve `key` to itself, or to its overflow twin when the family is full.
fn limited<T>(map: &BTreeMap<MetricKey, T>, key: MetricKey, limit: usize) -> MetricKey {
    if map.contains_key(&key) || family_len(map, &key.name) < limit {
        return key;
    }
    key.overflowed(OVERFLOW_LABEL)
}

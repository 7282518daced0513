//! In-process metrics and Prometheus text export.
//!
//! Series are keyed by [`MetricKey`] (name + sorted labels) and held in a
//! [`MetricsStore`]. Writes go through a [`Recorder`] chosen once from the
//! enable flag; [`AppMetrics`] layers the application's named events on top.

pub mod app;
pub mod export;
pub mod labels;
pub mod recorder;
pub mod store;

pub use app::{is_supabase_url, supabase_operation, AppMetrics};
pub use export::{render, ExportInfo, DISABLED_BODY, HTTP_DURATION_BUCKETS, HTTP_DURATION_METRIC};
pub use labels::{LabelSet, MetricKey};
pub use recorder::{recorder_for, DisabledRecorder, LiveRecorder, Recorder};
pub use store::{MetricsStore, Sample, DEFAULT_SERIES_LIMIT, HISTOGRAM_WINDOW, OVERFLOW_LABEL};

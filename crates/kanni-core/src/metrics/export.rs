//! Prometheus text exposition of a [`MetricsStore`].
//!
//! Families are written in a fixed order: `app_info`, counters, gauges,
//! histograms, `app_uptime_seconds`. HELP/TYPE appear once per family name and
//! each family block is terminated by a blank line.

use std::collections::VecDeque;
use std::fmt::Write;

use super::labels::{escape_label, MetricKey};
use super::store::{MetricsStore, Sample};

/// The one histogram series rendered with real buckets (values in seconds).
pub const HTTP_DURATION_METRIC: &str = "http_request_duration_seconds";

/// Upper bounds (seconds) for [`HTTP_DURATION_METRIC`].
pub const HTTP_DURATION_BUCKETS: [f64; 11] =
    [0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// Samples considered for `_avg`/`_max`/`_min` summaries.
pub const SUMMARY_WINDOW: usize = 100;

/// Body served when metrics collection is turned off.
pub const DISABLED_BODY: &str = "# metrics collection is disabled\n";

/// Labels carried by the synthetic `app_info` gauge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportInfo {
    pub version: String,
    pub service: String,
    pub environment: String,
}

impl ExportInfo {
    pub fn new(service: impl Into<String>, version: impl Into<String>, production: bool) -> Self {
        Self {
            version: version.into(),
            service: service.into(),
            environment: if production { "production" } else { "development" }.to_string(),
        }
    }
}

impl Default for ExportInfo {
    fn default() -> Self {
        Self::new("kanni-ai-frontend", "1.0.0", false)
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Counter,
    Gauge,
}

impl Kind {
    fn as_str(self) -> &'static str {
        match self {
            Kind::Counter => "counter",
            Kind::Gauge => "gauge",
        }
    }

    fn help(self, name: &str) -> String {
        match self {
            Kind::Counter => {
                let base = name.strip_suffix("_total").unwrap_or(name);
                format!("Total count of {}", humanize(base))
            }
            Kind::Gauge => format!("Current value of {}", humanize(name)),
        }
    }
}

fn humanize(name: &str) -> String {
    name.replace('_', " ")
}

/// Integers stay integers; non-finite values use Prometheus spellings.
fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{}", v)
    }
}

fn write_header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

/// Render the whole document at `now_ms`.
pub fn render(store: &MetricsStore, info: &ExportInfo, now_ms: i64) -> String {
    let mut out = String::new();

    write_header(&mut out, "app_info", "Application information", "gauge");
    let _ = writeln!(
        out,
        "app_info{{version=\"{}\",service=\"{}\",environment=\"{}\"}} 1\n",
        escape_label(&info.version),
        escape_label(&info.service),
        escape_label(&info.environment),
    );

    render_scalars(&mut out, store.counters(), Kind::Counter);
    render_scalars(&mut out, store.gauges(), Kind::Gauge);
    render_histograms(&mut out, store);

    let uptime = now_ms.saturating_sub(store.started_at_ms()).max(0) as f64 / 1000.0;
    write_header(&mut out, "app_uptime_seconds", "Application uptime in seconds", "gauge");
    let _ = writeln!(out, "app_uptime_seconds {:.2}\n", uptime);

    out
}

fn render_scalars<'a>(
    out: &mut String,
    series: impl Iterator<Item = (&'a MetricKey, f64)>,
    kind: Kind,
) {
    let mut current: Option<&str> = None;
    for (key, value) in series {
        if current != Some(key.name.as_str()) {
            if current.is_some() {
                out.push('\n');
            }
            write_header(out, &key.name, &kind.help(&key.name), kind.as_str());
            current = Some(key.name.as_str());
        }
        let _ = writeln!(out, "{}{} {}", key.name, key.labels, fmt_value(value));
    }
    if current.is_some() {
        out.push('\n');
    }
}

type Series<'a> = (&'a MetricKey, &'a VecDeque<Sample>);

fn render_histograms(out: &mut String, store: &MetricsStore) {
    let mut group: Vec<Series<'_>> = Vec::new();
    for (key, samples) in store.histograms() {
        if samples.is_empty() {
            continue;
        }
        if group.first().is_some_and(|(k, _)| k.name != key.name) {
            render_histogram_family(out, &group);
            group.clear();
        }
        group.push((key, samples));
    }
    if !group.is_empty() {
        render_histogram_family(out, &group);
    }
}

/// `group` is non-empty and every entry shares one name.
fn render_histogram_family(out: &mut String, group: &[Series<'_>]) {
    let Some((first, _)) = group.first() else { return };
    let name = first.name.as_str();

    if name == HTTP_DURATION_METRIC {
        write_header(out, name, &format!("Distribution of {}", humanize(name)), "histogram");
        for (key, samples) in group {
            write_buckets(out, key, samples);
        }
        out.push('\n');
        return;
    }

    let summaries: [(&str, &str, fn(&[f64]) -> String); 3] = [
        ("avg", "Average of", |v: &[f64]| format!("{:.2}", v.iter().sum::<f64>() / v.len() as f64)),
        ("max", "Maximum of", |v: &[f64]| fmt_value(v.iter().copied().fold(f64::NEG_INFINITY, f64::max))),
        ("min", "Minimum of", |v: &[f64]| fmt_value(v.iter().copied().fold(f64::INFINITY, f64::min))),
    ];

    for (suffix, help, compute) in summaries {
        let family = format!("{}_{}", name, suffix);
        write_header(out, &family, &format!("{} {}", help, humanize(name)), "gauge");
        for (key, samples) in group {
            let recent: Vec<f64> = samples
                .iter()
                .skip(samples.len().saturating_sub(SUMMARY_WINDOW))
                .map(|s| s.value)
                .collect();
            let _ = writeln!(out, "{}{} {}", family, key.labels, compute(&recent));
        }
        out.push('\n');
    }
}

fn write_buckets(out: &mut String, key: &MetricKey, samples: &VecDeque<Sample>) {
    let name = key.name.as_str();
    let mut prefix = String::new();
    key.labels.write_pairs(&mut prefix);
    if !prefix.is_empty() {
        prefix.push(',');
    }

    // Cumulative: each bucket counts every sample <= its bound.
    for le in HTTP_DURATION_BUCKETS {
        let count = samples.iter().filter(|s| s.value <= le).count();
        let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
    }
    let count = samples.len();
    let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

    let sum: f64 = samples.iter().map(|s| s.value).sum();
    let _ = writeln!(out, "{}_sum{} {:.6}", name, key.labels, sum);
    let _ = writeln!(out, "{}_count{} {}", name, key.labels, count);
}

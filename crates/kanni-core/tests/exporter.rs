//! Prometheus text exposition output.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use kanni_core::metrics::{render, AppMetrics, ExportInfo, MetricsStore, DISABLED_BODY};

fn type_lines(doc: &str) -> Vec<&str> {
    doc.lines().filter(|l| l.starts_with("# TYPE ")).collect()
}

fn line_for<'a>(doc: &'a str, prefix: &str) -> &'a str {
    doc.lines()
        .find(|l| l.starts_with(prefix))
        .unwrap_or_else(|| panic!("missing line starting with {prefix}\n{doc}"))
}

fn metrics() -> AppMetrics {
    AppMetrics::with_store(true, ExportInfo::default(), MetricsStore::started_at(1_000))
}

#[test]
fn empty_store_renders_only_synthetic_families() {
    let doc = render(&MetricsStore::started_at(1_000), &ExportInfo::default(), 3_500);
    let expected = "\
# HELP app_info Application information
# TYPE app_info gauge
app_info{version=\"1.0.0\",service=\"kanni-ai-frontend\",environment=\"development\"} 1

# HELP app_uptime_seconds Application uptime in seconds
# TYPE app_uptime_seconds gauge
app_uptime_seconds 2.50

";
    assert_eq!(doc, expected);
    assert_eq!(type_lines(&doc).len(), 2);
}

#[test]
fn production_flag_selects_environment_label() {
    let info = ExportInfo::new("svc", "2.1.0", true);
    let doc = render(&MetricsStore::started_at(0), &info, 0);
    assert_eq!(
        line_for(&doc, "app_info{"),
        "app_info{version=\"2.1.0\",service=\"svc\",environment=\"production\"} 1"
    );
}

#[test]
fn uptime_never_negative() {
    let doc = render(&MetricsStore::started_at(10_000), &ExportInfo::default(), 5_000);
    assert_eq!(line_for(&doc, "app_uptime_seconds "), "app_uptime_seconds 0.00");
}

#[test]
fn uptime_survives_extreme_start_times() {
    let doc = render(&MetricsStore::started_at(i64::MIN), &ExportInfo::default(), i64::MAX);
    let secs: f64 = line_for(&doc, "app_uptime_seconds ")["app_uptime_seconds ".len()..].parse().unwrap();
    assert!(secs > 9.0e15);

    let doc = render(&MetricsStore::started_at(i64::MAX), &ExportInfo::default(), i64::MIN);
    assert_eq!(line_for(&doc, "app_uptime_seconds "), "app_uptime_seconds 0.00");
}

#[test]
fn http_duration_histogram_buckets() {
    let mut m = metrics();
    for ms in [10.0, 20.0, 30.0] {
        m.record_http_request("GET", "/v1/events", 202, ms);
    }
    let doc = m.export_prometheus_at(2_000);

    assert!(doc.contains("# TYPE http_request_duration_seconds histogram\n"));
    let base = "http_request_duration_seconds";
    let labels = "method=\"GET\",route=\"/v1/events\"";
    let expect = [
        ("0.005", 0),
        ("0.01", 1),
        ("0.025", 2),
        ("0.05", 3),
        ("0.1", 3),
        ("0.25", 3),
        ("0.5", 3),
        ("1", 3),
        ("2.5", 3),
        ("5", 3),
        ("10", 3),
        ("+Inf", 3),
    ];
    for (le, count) in expect {
        let line = format!("{base}_bucket{{{labels},le=\"{le}\"}} {count}");
        assert!(doc.lines().any(|l| l == line), "missing {line}\n{doc}");
    }
    assert_eq!(line_for(&doc, &format!("{base}_sum")), format!("{base}_sum{{{labels}}} 0.060000"));
    assert_eq!(line_for(&doc, &format!("{base}_count")), format!("{base}_count{{{labels}}} 3"));
    assert_eq!(
        line_for(&doc, "http_requests_total{"),
        "http_requests_total{method=\"GET\",route=\"/v1/events\",status=\"202\"} 3"
    );
}

#[test]
fn other_histograms_render_as_summary_gauges() {
    let mut m = metrics();
    for ms in [10.0, 20.0, 40.0] {
        m.record_supabase_latency("rest_get", ms, true);
    }
    let doc = m.export_prometheus_at(1_000);
    let expected = "\
# HELP supabase_request_duration_ms_avg Average of supabase request duration ms
# TYPE supabase_request_duration_ms_avg gauge
supabase_request_duration_ms_avg{operation=\"rest_get\"} 23.33

# HELP supabase_request_duration_ms_max Maximum of supabase request duration ms
# TYPE supabase_request_duration_ms_max gauge
supabase_request_duration_ms_max{operation=\"rest_get\"} 40

# HELP supabase_request_duration_ms_min Minimum of supabase request duration ms
# TYPE supabase_request_duration_ms_min gauge
supabase_request_duration_ms_min{operation=\"rest_get\"} 10

";
    assert!(doc.contains(expected), "{doc}");
}

#[test]
fn summary_gauges_use_last_hundred_samples() {
    let mut store = MetricsStore::started_at(0);
    for i in 0..150 {
        store.record_histogram_at("supabase_request_duration_ms", i as f64, &[], i);
    }
    let doc = render(&store, &ExportInfo::default(), 0);
    assert_eq!(line_for(&doc, "supabase_request_duration_ms_avg "), "supabase_request_duration_ms_avg 99.50");
    assert_eq!(line_for(&doc, "supabase_request_duration_ms_max "), "supabase_request_duration_ms_max 149");
    assert_eq!(line_for(&doc, "supabase_request_duration_ms_min "), "supabase_request_duration_ms_min 50");
}

#[test]
fn family_header_written_once_per_name() {
    let mut m = metrics();
    m.record_page_view("home");
    m.record_page_view("about");
    m.record_page_view("home");
    let doc = m.export_prometheus_at(1_000);

    let block = "\
# HELP page_views_total Total count of page views
# TYPE page_views_total counter
page_views_total{page=\"about\"} 1
page_views_total{page=\"home\"} 2

";
    assert!(doc.contains(block), "{doc}");
    assert_eq!(doc.matches("# TYPE page_views_total").count(), 1);
}

#[test]
fn families_are_ordered_with_synthetic_bookends() {
    let mut m = metrics();
    m.set_backend_connected(true);
    m.record_user_login();
    m.record_supabase_latency("auth_login", 12.0, true);
    let doc = m.export_prometheus_at(1_000);
    let types = type_lines(&doc);

    assert_eq!(types.first(), Some(&"# TYPE app_info gauge"));
    assert_eq!(types.last(), Some(&"# TYPE app_uptime_seconds gauge"));
    let pos = |needle: &str| types.iter().position(|l| l.contains(needle)).unwrap();
    assert!(pos("user_logins_total counter") < pos("supabase_connected gauge"));
    assert!(pos("supabase_connected gauge") < pos("supabase_request_duration_ms_avg gauge"));
    assert_eq!(line_for(&doc, "supabase_connected "), "supabase_connected 1");
    assert_eq!(
        line_for(&doc, "# HELP supabase_connected"),
        "# HELP supabase_connected Current value of supabase connected"
    );
}

#[test]
fn label_values_are_escaped() {
    let mut m = metrics();
    m.record_error("bad \"quote\"\nline");
    let doc = m.export_prometheus_at(1_000);
    assert_eq!(
        line_for(&doc, "errors_total{"),
        "errors_total{type=\"bad \\\"quote\\\"\\nline\"} 1"
    );
}

#[test]
fn fractional_counters_keep_precision() {
    let mut m = metrics();
    m.increment_counter("tokens_total", 0.25, &[]);
    m.increment_counter("tokens_total", 1.0, &[]);
    let doc = m.export_prometheus_at(1_000);
    assert_eq!(line_for(&doc, "tokens_total "), "tokens_total 1.25");
}

#[test]
fn disabled_body_is_single_line() {
    let m = AppMetrics::with_store(false, ExportInfo::default(), MetricsStore::started_at(0));
    let doc = m.export_prometheus_at(5_000);
    assert_eq!(doc, DISABLED_BODY);
    assert_eq!(doc.lines().count(), 1);
}

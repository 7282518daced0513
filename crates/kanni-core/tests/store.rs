//! Metrics store write semantics.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use kanni_core::metrics::{MetricKey, MetricsStore, DEFAULT_SERIES_LIMIT, HISTOGRAM_WINDOW, OVERFLOW_LABEL};

#[test]
fn counter_is_running_sum_of_deltas() {
    let mut s = MetricsStore::started_at(0);
    s.increment_counter("active_users", 5.0, &[]);
    s.increment_counter("active_users", -3.0, &[]);
    assert_eq!(s.counter("active_users", &[]), Some(2.0));
    s.increment_counter("active_users", 2.0, &[]);
    s.increment_counter("active_users", -4.5, &[]);
    assert_eq!(s.counter("active_users", &[]), Some(-0.5));
}

#[test]
fn counter_created_at_first_delta() {
    let mut s = MetricsStore::started_at(0);
    assert_eq!(s.counter("errors_total", &[("type", "500")]), None);
    s.increment_counter("errors_total", 3.0, &[("type", "500")]);
    assert_eq!(s.counter("errors_total", &[("type", "500")]), Some(3.0));
    assert_eq!(s.counter("errors_total", &[]), None);
}

#[test]
fn label_order_does_not_split_series() {
    let mut s = MetricsStore::started_at(0);
    s.increment_counter("http_requests_total", 1.0, &[("route", "/a"), ("method", "GET")]);
    s.increment_counter("http_requests_total", 1.0, &[("method", "GET"), ("route", "/a")]);
    assert_eq!(s.counters().count(), 1);
    assert_eq!(
        s.counter("http_requests_total", &[("method", "GET"), ("route", "/a")]),
        Some(2.0)
    );
    assert_eq!(
        MetricKey::new("x", &[("b", "2"), ("a", "1")]).to_string(),
        "x{a=\"1\",b=\"2\"}"
    );
}

#[test]
fn gauge_keeps_only_latest_value() {
    let mut s = MetricsStore::started_at(0);
    s.set_gauge("supabase_connected", 1.0, &[]);
    s.set_gauge("supabase_connected", 0.0, &[]);
    assert_eq!(s.gauge("supabase_connected", &[]), Some(0.0));
    assert_eq!(s.gauges().count(), 1);
}

#[test]
fn histogram_evicts_oldest_first() {
    let mut s = MetricsStore::started_at(0);
    let total = HISTOGRAM_WINDOW + 5;
    for i in 0..total {
        s.record_histogram_at("lat", i as f64, &[("op", "x")], i as i64);
    }
    let series = s.histogram("lat", &[("op", "x")]).unwrap();
    assert_eq!(series.len(), HISTOGRAM_WINDOW);
    assert_eq!(series.front().unwrap().value, 5.0);
    assert_eq!(series.back().unwrap().value, (total - 1) as f64);
    assert!(series
        .iter()
        .zip(series.iter().skip(1))
        .all(|(a, b)| a.value < b.value && a.timestamp_ms < b.timestamp_ms));
}

#[test]
fn fresh_store_is_empty() {
    let s = MetricsStore::new();
    assert!(s.is_empty());
    assert!(s.started_at_ms() > 0);
}

#[test]
fn series_past_limit_fold_into_overflow() {
    let mut s = MetricsStore::started_at(0).with_series_limit(3);
    for i in 0..10 {
        let route = format!("/r{i}");
        s.increment_counter("http_requests_total", 1.0, &[("method", "GET"), ("route", &route)]);
        s.record_histogram_at("lat", i as f64, &[("route", &route)], i);
    }
    // an existing series keeps counting after the family is full
    s.increment_counter("http_requests_total", 1.0, &[("route", "/r0"), ("method", "GET")]);

    assert_eq!(s.counters().count(), 4);
    assert_eq!(s.counter("http_requests_total", &[("method", "GET"), ("route", "/r0")]), Some(2.0));
    assert_eq!(
        s.counter("http_requests_total", &[("method", OVERFLOW_LABEL), ("route", OVERFLOW_LABEL)]),
        Some(7.0)
    );
    assert_eq!(s.histograms().count(), 4);
    assert_eq!(s.histogram("lat", &[("route", OVERFLOW_LABEL)]).unwrap().len(), 7);
}

#[test]
fn series_limit_is_per_family() {
    let mut s = MetricsStore::started_at(0).with_series_limit(1);
    s.increment_counter("a_total", 1.0, &[("k", "1")]);
    s.increment_counter("b_total", 1.0, &[("k", "1")]);
    s.set_gauge("g", 1.0, &[("k", "1")]);
    s.set_gauge("g", 2.0, &[("k", "2")]);

    assert_eq!(s.counter("b_total", &[("k", "1")]), Some(1.0));
    assert_eq!(s.gauge("g", &[("k", "1")]), Some(1.0));
    assert_eq!(s.gauge("g", &[("k", OVERFLOW_LABEL)]), Some(2.0));
    assert_eq!(MetricsStore::new().series_limit(), DEFAULT_SERIES_LIMIT);
}

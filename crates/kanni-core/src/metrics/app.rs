//! Application-level metrics: the business events the frontend reports.
//!
//! `AppMetrics` is built once at startup and handed to every call site by
//! the owner (the gateway keeps it in `AppState`). There is no global.

use super::export::{ExportInfo, HTTP_DURATION_METRIC};
use super::recorder::{recorder_for, Recorder};
use super::store::{now_millis, MetricsStore};

pub const PAGE_VIEWS: &str = "page_views_total";
pub const USER_LOGINS: &str = "user_logins_total";
pub const USER_LOGOUTS: &str = "user_logouts_total";
pub const ACTIVE_USERS: &str = "active_users";
pub const INTERESTS_CREATED: &str = "interests_created_total";
pub const INTERESTS_DELETED: &str = "interests_deleted_total";
pub const TIPS_GENERATED: &str = "tips_generated_total";
pub const ERRORS: &str = "errors_total";
pub const HTTP_REQUESTS: &str = "http_requests_total";
pub const RESPONSE_TIME: &str = "http_request_duration_ms";
pub const SUPABASE_REQUESTS: &str = "supabase_requests_total";
pub const SUPABASE_DURATION: &str = "supabase_request_duration_ms";
pub const SUPABASE_CONNECTED: &str = "supabase_connected";

pub struct AppMetrics {
    recorder: Box<dyn Recorder>,
    info: ExportInfo,
}

impl AppMetrics {
    pub fn new(enabled: bool, info: ExportInfo) -> Self {
        Self::with_store(enabled, info, MetricsStore::new())
    }

    pub fn with_store(enabled: bool, info: ExportInfo, store: MetricsStore) -> Self {
        Self {
            recorder: recorder_for(enabled, store),
            info,
        }
    }

    pub fn info(&self) -> &ExportInfo {
        &self.info
    }

    pub fn is_enabled(&self) -> bool {
        self.recorder.is_enabled()
    }

    /// Swap the recording strategy, carrying the current store across.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.recorder.is_enabled() {
            return;
        }
        let parked = std::mem::replace(
            &mut self.recorder,
            recorder_for(false, MetricsStore::started_at(0)),
        );
        self.recorder = recorder_for(enabled, parked.into_store());
        tracing::info!(enabled, "metrics recording toggled");
    }

    /// Read-only view for inspection; writes go through the recorder.
    pub fn store(&self) -> &MetricsStore {
        self.recorder.store()
    }

    pub fn increment_counter(&mut self, name: &str, delta: f64, labels: &[(&str, &str)]) {
        self.recorder.increment_counter(name, delta, labels);
    }

    pub fn set_gauge(&mut self, name: &str, value: f64, labels: &[(&str, &str)]) {
        self.recorder.set_gauge(name, value, labels);
    }

    pub fn record_histogram(&mut self, name: &str, value: f64, labels: &[(&str, &str)]) {
        self.recorder.record_histogram(name, value, labels);
    }

    pub fn record_page_view(&mut self, page: &str) {
        self.increment_counter(PAGE_VIEWS, 1.0, &[("page", page)]);
    }

    pub fn record_user_login(&mut self) {
        self.increment_counter(USER_LOGINS, 1.0, &[]);
        self.increment_counter(ACTIVE_USERS, 1.0, &[]);
    }

    /// `active_users` is decremented through the counter path.
    pub fn record_user_logout(&mut self) {
        self.increment_counter(USER_LOGOUTS, 1.0, &[]);
        self.increment_counter(ACTIVE_USERS, -1.0, &[]);
    }

    pub fn record_interest_created(&mut self) {
        self.increment_counter(INTERESTS_CREATED, 1.0, &[]);
    }

    pub fn record_interest_deleted(&mut self) {
        self.increment_counter(INTERESTS_DELETED, 1.0, &[]);
    }

    pub fn record_tip_generated(&mut self) {
        self.increment_counter(TIPS_GENERATED, 1.0, &[]);
    }

    pub fn record_error(&mut self, kind: &str) {
        self.increment_counter(ERRORS, 1.0, &[("type", kind)]);
    }

    /// Count the request and feed the bucketed duration histogram (seconds).
    pub fn record_http_request(&mut self, method: &str, route: &str, status: u16, duration_ms: f64) {
        let status = status.to_string();
        self.increment_counter(
            HTTP_REQUESTS,
            1.0,
            &[("method", method), ("route", route), ("status", &status)],
        );
        self.record_histogram(
            HTTP_DURATION_METRIC,
            duration_ms / 1000.0,
            &[("method", method), ("route", route)],
        );
    }

    /// Client-measured latency of one endpoint, kept in milliseconds.
    pub fn record_response_time(&mut self, endpoint: &str, duration_ms: f64) {
        self.record_histogram(RESPONSE_TIME, duration_ms, &[("endpoint", endpoint)]);
    }

    pub fn record_supabase_latency(&mut self, operation: &str, duration_ms: f64, success: bool) {
        let status = if success { "success" } else { "error" };
        self.increment_counter(
            SUPABASE_REQUESTS,
            1.0,
            &[("operation", operation), ("status", status)],
        );
        self.record_histogram(SUPABASE_DURATION, duration_ms, &[("operation", operation)]);
    }

    pub fn set_backend_connected(&mut self, connected: bool) {
        self.set_gauge(SUPABASE_CONNECTED, if connected { 1.0 } else { 0.0 }, &[]);
    }

    pub fn export_prometheus(&self) -> String {
        self.export_prometheus_at(now_millis())
    }

    pub fn export_prometheus_at(&self, now_ms: i64) -> String {
        self.recorder.export(&self.info, now_ms)
    }
}

pub fn is_supabase_url(url: &str) -> bool {
    url.contains("supabase.co")
}

/// Classify a Supabase request URL into an operation label.
pub fn supabase_operation(url: &str, method: &str) -> String {
    let method = method.to_ascii_lowercase();
    if url.contains("/auth/v1") {
        let op = if method == "post" { "auth_login" } else { "auth_check" };
        op.to_string()
    } else if url.contains("/rest/v1") {
        format!("rest_{method}")
    } else if url.contains("/storage/v1") {
        format!("storage_{method}")
    } else {
        format!("supabase_{method}")
    }
}

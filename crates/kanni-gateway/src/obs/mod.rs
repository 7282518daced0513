//! Request observation.
//!
//! Every routed request except the scrape endpoint itself is reported into
//! `AppMetrics::record_http_request` with its matched route template.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use tokio::time::Instant;

use crate::app_state::AppState;
use crate::events::labels::method_label;

const UNMATCHED_ROUTE: &str = "unmatched";

pub async fn track_request(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
    if route == "/metrics" {
        return next.run(req).await;
    }
    let method = method_label(req.method().as_str());

    let started = Instant::now();
    let resp = next.run(req).await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let status = resp.status().as_u16();

    tracing::debug!(%method, %route, status, elapsed_ms, "request served");
    state
        .metrics()
        .lock()
        .await
        .record_http_request(method, &route, status, elapsed_ms);
    resp
}

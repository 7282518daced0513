use axum::{extract::State, http::StatusCode, Json};
use bytes::Bytes;
use serde_json::{json, Value};

use kanni_core::error::KanniError;
use kanni_core::metrics::{is_supabase_url, supabase_operation, AppMetrics};

use crate::app_state::AppState;
use crate::error::ApiError;

use crate::telemetry::EVENTS_TARGET;

use super::labels::{bounded, method_label, route_label};
use super::schema::ClientEvent;

/// Error kind recorded for client-reported application errors.
const APP_ERROR_KIND: &str = "500";

pub async fn ingest(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let event: ClientEvent = serde_json::from_slice(&body)
        .map_err(|e| KanniError::BadRequest(format!("invalid event: {e}")))?;

    {
        let metrics = state.metrics();
        let mut metrics = metrics.lock().await;
        apply(&mut metrics, &event);
    }
    log_event(&event);

    Ok((StatusCode::ACCEPTED, Json(json!({ "accepted": true }))))
}

/// Translate one client event into metric writes.
///
/// Client strings pass through [`super::labels`] before becoming label values.
pub fn apply(metrics: &mut AppMetrics, event: &ClientEvent) {
    match event {
        ClientEvent::PageView { page, .. } => metrics.record_page_view(&bounded(page)),
        ClientEvent::UserLogin { .. } => metrics.record_user_login(),
        ClientEvent::UserLogout { .. } => metrics.record_user_logout(),
        ClientEvent::InterestCreated { .. } => metrics.record_interest_created(),
        ClientEvent::InterestDeleted { .. } => metrics.record_interest_deleted(),
        ClientEvent::TipGenerated { .. } => metrics.record_tip_generated(),
        ClientEvent::AppError { .. } => metrics.record_error(APP_ERROR_KIND),
        ClientEvent::HttpRequest { method, url, status, duration_ms } => {
            let status = if *status == 0 { 500 } else { *status };
            let method = method_label(method);
            metrics.record_http_request(method, &route_label(url), status, *duration_ms);
            if is_supabase_url(url) {
                let op = supabase_operation(url, method);
                metrics.record_supabase_latency(&op, *duration_ms, status < 400);
            }
        }
        ClientEvent::ResponseTime { endpoint, duration_ms } => {
            metrics.record_response_time(&route_label(endpoint), *duration_ms)
        }
        ClientEvent::BackendStatus { connected, .. } => metrics.set_backend_connected(*connected),
    }
}

/// Emit the structured log line for `event` on the events target.
pub fn log_event(event: &ClientEvent) {
    let kind = event.kind();
    match event {
        ClientEvent::PageView { page, url } => {
            tracing::info!(
                target: EVENTS_TARGET,
                {
                    page.name = %page,
                    page.url = url.as_deref().unwrap_or(""),
                    "event.type" = kind,
                },
                "Page view"
            );
        }
        ClientEvent::UserLogin { user, method } => {
            tracing::info!(
                target: EVENTS_TARGET,
                {
                    user.id = user.id(),
                    user.email = user.email(),
                    user.name = user.display_name(),
                    auth.method = method.as_deref().unwrap_or("supabase"),
                    "event.type" = kind,
                },
                "User logged in successfully"
            );
        }
        ClientEvent::UserLogout { user } => {
            tracing::info!(
                target: EVENTS_TARGET,
                {
                    user.id = user.id(),
                    user.email = user.email(),
                    user.name = user.display_name(),
                    "event.type" = kind,
                },
                "User logged out"
            );
        }
        ClientEvent::InterestCreated { user, interest } => {
            tracing::info!(
                target: EVENTS_TARGET,
                {
                    user.id = user.id(),
                    user.email = user.email(),
                    user.name = user.display_name(),
                    interest.id = interest.id.as_deref().unwrap_or("unknown"),
                    interest.name = interest.name.as_deref().unwrap_or("unknown"),
                    "event.type" = kind,
                },
                "Interest created"
            );
        }
        ClientEvent::InterestDeleted { user, interest_id } => {
            tracing::info!(
                target: EVENTS_TARGET,
                {
                    user.id = user.id(),
                    user.email = user.email(),
                    user.name = user.display_name(),
                    interest.id = %interest_id,
                    "event.type" = kind,
                },
                "Interest deleted"
            );
        }
        ClientEvent::TipGenerated { user, interest_id, tip_length } => {
            tracing::info!(
                target: EVENTS_TARGET,
                {
                    user.id = user.id(),
                    user.email = user.email(),
                    user.name = user.display_name(),
                    interest.id = %interest_id,
                    tip.length = *tip_length as u64,
                    "event.type" = kind,
                },
                "Tip generated successfully"
            );
        }
        ClientEvent::AppError { context, message } => {
            let context = context.as_deref().unwrap_or("unknown");
            tracing::error!(
                target: EVENTS_TARGET,
                {
                    "error.type" = APP_ERROR_KIND,
                    error.context = context,
                    error.message = %message,
                    "event.type" = kind,
                },
                "Application error in {}",
                context
            );
        }
        ClientEvent::HttpRequest { method, url, status, duration_ms } => {
            tracing::debug!(
                target: EVENTS_TARGET,
                {
                    http.method = %method,
                    http.url = %url,
                    http.status = *status as u64,
                    duration_ms = *duration_ms,
                    "event.type" = kind,
                },
                "Client HTTP request"
            );
        }
        ClientEvent::ResponseTime { endpoint, duration_ms } => {
            tracing::debug!(
                target: EVENTS_TARGET,
                { http.endpoint = %endpoint, duration_ms = *duration_ms, "event.type" = kind },
                "Client response time"
            );
        }
        ClientEvent::BackendStatus { connected, duration_ms } => {
            if *connected {
                tracing::info!(
                    target: EVENTS_TARGET,
                    { duration_ms = *duration_ms, "event.type" = kind },
                    "Backend connected"
                );
            } else {
                tracing::warn!(
                    target: EVENTS_TARGET,
                    { duration_ms = *duration_ms, "event.type" = kind },
                    "Backend unreachable"
                );
            }
        }
    }
}

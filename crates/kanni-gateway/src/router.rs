//! Axum router wiring.
//!
//! Ops endpoints, client event ingestion and tip planning, wrapped by the
//! request-metrics middleware.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, events, obs, ops, services};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .route("/v1/events", post(events::ingest))
        .route("/v1/tips/plan", post(services::tips::plan))
        .layer(middleware::from_fn_with_state(state.clone(), obs::track_request))
        .with_state(state)
}

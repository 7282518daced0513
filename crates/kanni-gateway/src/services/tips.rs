//! `POST /v1/tips/plan`: pick interests and build prompts for one tip.
//!
//! The LLM call itself is made by the caller; this only returns the plan.

use axum::Json;
use bytes::Bytes;
use serde::Deserialize;

use kanni_core::error::KanniError;
use kanni_core::tips::{plan_tip, TipPlan};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanReq {
    interests: Vec<String>,
}

pub async fn plan(body: Bytes) -> Result<Json<TipPlan>, ApiError> {
    let req: PlanReq = serde_json::from_slice(&body)
        .map_err(|e| KanniError::BadRequest(format!("tips.plan invalid data: {e}")))?;

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let plan = plan_tip(&req.interests, &today, &mut rand::thread_rng())?;

    tracing::info!(
        offered = req.interests.len(),
        selected = plan.selected_interests.len(),
        cohesive = plan.is_cohesive,
        "tip planned"
    );
    Ok(Json(plan))
}

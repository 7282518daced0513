//! Tip planning: choose which interests a tip covers and build the prompts.
//!
//! Roughly 60% of tips focus on a single interest; the rest try to combine
//! two or three of them. Randomness is injected so callers can seed it.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::error::{KanniError, Result};

pub const MODEL: &str = "gpt-3.5-turbo";
pub const MAX_TOKENS: u32 = 150;
pub const TEMPERATURE: f32 = 0.9;

/// Rolls above this threshold ask for a combined tip.
const COHESIVE_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Serialize)]
pub struct TipPlan {
    pub selected_interests: Vec<String>,
    pub is_cohesive: bool,
    pub system_prompt: String,
    pub user_prompt: String,
    pub model: &'static str,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// `today` is an ISO date (`YYYY-MM-DD`) embedded in the system prompt.
pub fn plan_tip<R: Rng + ?Sized>(interests: &[String], today: &str, rng: &mut R) -> Result<TipPlan> {
    let pool: Vec<&str> = interests
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if pool.is_empty() {
        return Err(KanniError::BadRequest("interests must not be empty".into()));
    }

    let wants_cohesive = rng.gen::<f64>() > COHESIVE_THRESHOLD;
    let selected: Vec<String> = if wants_cohesive && pool.len() >= 2 {
        let n = pool.len().min(rng.gen_range(2..=3));
        pool.choose_multiple(rng, n).map(|s| s.to_string()).collect()
    } else {
        let one = pool
            .choose(rng)
            .ok_or_else(|| KanniError::Internal("interest pool drained".into()))?;
        vec![one.to_string()]
    };

    let is_cohesive = wants_cohesive && selected.len() > 1;
    let topics = selected.join(" and ");

    let system_prompt = format!(
        "You are a helpful learning assistant that provides short, actionable daily tips. \
         Always include references to real, current resources from trusted sources like Wikipedia, \
         Coursera, Medium, YouTube channels, official documentation, or reputable educational \
         platforms. Current date: {today}"
    );
    let user_prompt = if is_cohesive {
        format!(
            "Generate one creative and cohesive learning tip that COMBINES these interests: {topics}. \
             Show how these topics can be connected in a meaningful way. Make it actionable and under \
             100 tokens. Include a specific resource they can explore."
        )
    } else {
        format!(
            "Generate one short, actionable learning tip specifically about: {topics}. Focus ONLY on \
             this topic. Keep it under 100 tokens and include a specific reference to a real resource \
             (Wikipedia, Coursera, Medium article, or YouTube channel) that they can explore today."
        )
    };

    Ok(TipPlan {
        selected_interests: selected,
        is_cohesive,
        system_prompt,
        user_prompt,
        model: MODEL,
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    })
}

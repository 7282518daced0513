//! Tip planning over seeded RNGs.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use kanni_core::tips::{plan_tip, MAX_TOKENS, MODEL};

fn interests(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_or_blank_interests_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    let err = plan_tip(&[], "2026-10-14", &mut rng).unwrap_err();
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    let err = plan_tip(&interests(&["  ", ""]), "2026-10-14", &mut rng).unwrap_err();
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn single_interest_is_never_cohesive() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = plan_tip(&interests(&["rust"]), "2026-10-14", &mut rng).unwrap();
        assert_eq!(plan.selected_interests, vec!["rust".to_string()]);
        assert!(!plan.is_cohesive);
        assert!(plan.user_prompt.contains("specifically about: rust."));
    }
}

#[test]
fn selections_are_distinct_members_of_the_pool() {
    let pool = interests(&["rust", "chess", "cooking", "jazz"]);
    let mut saw_single = false;
    let mut saw_cohesive = false;

    for seed in 0..500 {
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = plan_tip(&pool, "2026-10-14", &mut rng).unwrap();
        let n = plan.selected_interests.len();

        assert!((1..=3).contains(&n), "seed={seed}");
        assert_eq!(plan.is_cohesive, n > 1, "seed={seed}");
        assert!(plan.selected_interests.iter().all(|i| pool.contains(i)));
        let mut dedup = plan.selected_interests.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), n, "seed={seed}");

        if plan.is_cohesive {
            saw_cohesive = true;
            assert!(plan.user_prompt.contains("COMBINES these interests"));
            assert!(plan.user_prompt.contains(&plan.selected_interests.join(" and ")));
        } else {
            saw_single = true;
        }
    }
    assert!(saw_single && saw_cohesive);
}

#[test]
fn prompt_carries_date_and_model_parameters() {
    let mut rng = StdRng::seed_from_u64(7);
    let plan = plan_tip(&interests(&[" gardening "]), "2026-10-14", &mut rng).unwrap();
    assert!(plan.system_prompt.ends_with("Current date: 2026-10-14"));
    assert_eq!(plan.selected_interests, vec!["gardening".to_string()]);
    assert_eq!(plan.model, MODEL);
    assert_eq!(plan.max_tokens, MAX_TOKENS);

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["model"], "gpt-3.5-turbo");
    assert_eq!(json["is_cohesive"], false);
}

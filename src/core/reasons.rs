use crate::core::normalize::{shared_in_order, NormalizedProfile};
use crate::models::ScoreBreakdown;

/// Upper bound on reasons attached to one match
pub const MAX_REASONS: usize = 3;

/// Build up to three human-readable reasons for a match
///
/// Conditions are checked in a fixed order and each one can fire
/// independently. The two generic fallbacks only apply when nothing
/// specific fired.
pub fn generate_match_reasons(
    breakdown: &ScoreBreakdown,
    requester: &NormalizedProfile<'_>,
    candidate: &NormalizedProfile<'_>,
) -> Vec<String> {
    let mut reasons = Vec::with_capacity(MAX_REASONS);
    let me = requester.profile;
    let them = candidate.profile;

    if breakdown.interests >= 70.0 {
        let shared = shared_in_order(&me.interests, &candidate.interests);
        if !shared.is_empty() {
            reasons.push(format!("You both love {}", first_two(&shared).join(" and ")));
        }
    }

    if breakdown.traits >= 70.0 {
        let shared = shared_in_order(&me.traits, &candidate.traits);
        if !shared.is_empty() {
            reasons.push(format!("Similar personalities: {}", first_two(&shared).join(", ")));
        }
    }

    if breakdown.goals >= 80.0 {
        if let (Some(mine), Some(theirs)) = (me.relationship_goal, them.relationship_goal) {
            if mine == theirs {
                reasons.push(format!("Both looking for {}", mine.as_str()));
            }
        }
    }

    if breakdown.location >= 80.0 {
        reasons.push("Lives nearby".to_string());
    }

    if breakdown.age >= 90.0 {
        reasons.push("Similar age".to_string());
    }

    if breakdown.lifestyle >= 70.0 {
        // Two unset habits compare equal here
        let mut habits = Vec::with_capacity(2);
        if me.smoking == them.smoking {
            habits.push("lifestyle");
        }
        if me.drinking == them.drinking {
            habits.push("social habits");
        }
        if !habits.is_empty() {
            reasons.push(format!("Compatible {}", habits.join(" and ")));
        }
    }

    if reasons.is_empty() {
        if breakdown.interests >= 60.0 {
            reasons.push("Some shared interests".to_string());
        }
        if breakdown.traits >= 60.0 {
            reasons.push("Complementary personalities".to_string());
        }
    }

    reasons.truncate(MAX_REASONS);
    reasons
}

#[inline]
fn first_two<'a>(items: &'a [&'a str]) -> &'a [&'a str] {
    &items[..items.len().min(2)]
}

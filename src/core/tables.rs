//! Fixed compatibility tables used by the scorer.

use crate::models::RelationshipGoal;

/// Score used when a goal pair has no entry
pub const NEUTRAL_GOAL_SCORE: f64 = 50.0;

/// Goal compatibility, rows = requester, columns = candidate.
/// Order follows `RelationshipGoal::ALL`.
const GOAL_COMPATIBILITY: [[u8; 5]; 5] = [
    // marriage, relationship, casual, friendship, not-sure
    [100, 80, 20, 30, 50],  // marriage
    [80, 100, 60, 40, 70],  // relationship
    [20, 60, 100, 70, 80],  // casual
    [30, 40, 70, 100, 60],  // friendship
    [50, 70, 80, 60, 90],   // not-sure
];

/// Traits that pair well with a given requester trait
const COMPLEMENTARY_TRAITS: &[(&str, &[&str])] = &[
    ("adventurous", &["spontaneous", "outdoorsy", "active"]),
    ("introverted", &["thoughtful", "creative", "calm"]),
    ("extroverted", &["outgoing", "social", "energetic"]),
    ("ambitious", &["driven", "motivated", "goal-oriented"]),
    ("creative", &["artistic", "imaginative", "expressive"]),
    ("intellectual", &["curious", "analytical", "thoughtful"]),
];

/// Look up how well two relationship goals fit together
#[inline]
pub fn goal_compatibility(requester: RelationshipGoal, candidate: RelationshipGoal) -> f64 {
    GOAL_COMPATIBILITY
        .get(requester.index())
        .and_then(|row| row.get(candidate.index()))
        .map(|score| *score as f64)
        .unwrap_or(NEUTRAL_GOAL_SCORE)
}

/// Complements for a lowercased trait, empty when the trait is not in the table
pub fn complementary_traits(trait_name: &str) -> &'static [&'static str] {
    COMPLEMENTARY_TRAITS
        .iter()
        .find(|(name, _)| *name == trait_name)
        .map(|(_, complements)| *complements)
        .unwrap_or(&[])
}

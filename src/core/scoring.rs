use std::collections::HashSet;

use crate::core::{
    distance::distance_between,
    normalize::NormalizedProfile,
    reasons::generate_match_reasons,
    tables::{complementary_traits, goal_compatibility, NEUTRAL_GOAL_SCORE},
};
use crate::models::{
    AgeRange, GeoPoint, Habit, MatchScore, RelationshipGoal, ScoreBreakdown, ScoringWeights,
    UserProfile,
};

/// Returned when a factor cannot be judged from the available data
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Score when either side has no coordinates
pub const NEUTRAL_LOCATION_SCORE: f64 = 70.0;

/// Used when the requester has no (positive) max distance configured
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 50.0;

/// Score assigned to candidates outside the requester's age range
pub const OUT_OF_RANGE_AGE_SCORE: f64 = 30.0;

/// Calculate the compatibility (0-100) of `candidate` for `requester`
///
/// Scoring formula:
/// score = round(
///     interests * 0.25 +     # Jaccard overlap plus shared-count bonus
///     traits * 0.20 +        # shared and complementary traits
///     goals * 0.20 +         # relationship goal matrix
///     location * 0.15 +      # linear decay up to max distance
///     age * 0.10 +           # age gap bands
///     lifestyle * 0.10       # smoking, drinking, education
/// )
///
/// Weights come from `weights`; the figures above are the defaults.
pub fn calculate_match_score(
    requester: &UserProfile,
    candidate: &UserProfile,
    weights: &ScoringWeights,
) -> MatchScore {
    let requester = NormalizedProfile::new(requester);
    let candidate = NormalizedProfile::new(candidate);
    score_normalized(&requester, &candidate, weights)
}

/// Same as [`calculate_match_score`] for profiles that are already normalized
pub fn score_normalized(
    requester: &NormalizedProfile<'_>,
    candidate: &NormalizedProfile<'_>,
    weights: &ScoringWeights,
) -> MatchScore {
    let breakdown = calculate_breakdown(requester, candidate);
    let total = weighted_total(&breakdown, weights);
    let reasons = generate_match_reasons(&breakdown, requester, candidate);

    MatchScore {
        user_id: candidate.profile.id.clone(),
        score: total.round().clamp(0.0, 100.0) as u8,
        breakdown,
        reasons,
    }
}

/// All six sub-scores for one pair
pub fn calculate_breakdown(
    requester: &NormalizedProfile<'_>,
    candidate: &NormalizedProfile<'_>,
) -> ScoreBreakdown {
    let max_distance = requester
        .profile
        .max_distance_km()
        .unwrap_or(DEFAULT_MAX_DISTANCE_KM);

    ScoreBreakdown {
        interests: calculate_interests_score(&requester.interests, &candidate.interests),
        traits: calculate_traits_score(&requester.traits, &candidate.traits),
        goals: calculate_goals_score(
            requester.profile.relationship_goal,
            candidate.profile.relationship_goal,
        ),
        location: calculate_location_score(
            requester.profile.coordinates(),
            candidate.profile.coordinates(),
            max_distance,
        ),
        age: calculate_age_score(
            requester.profile.age,
            candidate.profile.age,
            requester.profile.age_range(),
        ),
        lifestyle: calculate_lifestyle_score(requester.profile, candidate.profile),
    }
}

#[inline]
fn weighted_total(breakdown: &ScoreBreakdown, weights: &ScoringWeights) -> f64 {
    breakdown.interests * weights.interests
        + breakdown.traits * weights.traits
        + breakdown.goals * weights.goals
        + breakdown.location * weights.location
        + breakdown.age * weights.age
        + breakdown.lifestyle * weights.lifestyle
}

/// Interests score (0-100) from lowercased interest sets
///
/// Jaccard similarity scaled to 100, plus 5 per shared interest (at most 20).
pub fn calculate_interests_score(requester: &HashSet<String>, candidate: &HashSet<String>) -> f64 {
    if requester.is_empty() || candidate.is_empty() {
        return NEUTRAL_SCORE;
    }

    let shared = requester.intersection(candidate).count();
    let union = requester.union(candidate).count();

    let similarity = (shared as f64 / union as f64) * 100.0;
    let bonus = (shared as f64 * 5.0).min(20.0);

    (similarity + bonus).min(100.0)
}

/// Personality traits score (0-100) from lowercased trait sets
pub fn calculate_traits_score(requester: &HashSet<String>, candidate: &HashSet<String>) -> f64 {
    if requester.is_empty() || candidate.is_empty() {
        return NEUTRAL_SCORE;
    }

    let mut score = NEUTRAL_SCORE;

    // Direct matches
    score += requester.intersection(candidate).count() as f64 * 10.0;

    // Complementary traits
    for trait_name in requester {
        let hits = complementary_traits(trait_name)
            .iter()
            .filter(|complement| candidate.contains(**complement))
            .count();
        score += hits as f64 * 5.0;
    }

    score.min(100.0)
}

/// Relationship goals score (0-100)
#[inline]
pub fn calculate_goals_score(
    requester: Option<RelationshipGoal>,
    candidate: Option<RelationshipGoal>,
) -> f64 {
    match (requester, candidate) {
        (Some(requester), Some(candidate)) => goal_compatibility(requester, candidate),
        _ => NEUTRAL_GOAL_SCORE,
    }
}

/// Location score (0-100)
///
/// 100 at 0 km decaying linearly to 50 at `max_distance_km`, 0 beyond it.
pub fn calculate_location_score(
    requester: Option<&GeoPoint>,
    candidate: Option<&GeoPoint>,
    max_distance_km: f64,
) -> f64 {
    let (Some(requester), Some(candidate)) = (requester, candidate) else {
        return NEUTRAL_LOCATION_SCORE;
    };

    let max_distance_km = if max_distance_km > 0.0 {
        max_distance_km
    } else {
        DEFAULT_MAX_DISTANCE_KM
    };

    let distance = distance_between(requester, candidate);
    if distance > max_distance_km {
        return 0.0;
    }

    (100.0 - (distance / max_distance_km) * 50.0).max(50.0)
}

/// Age score (0-100)
///
/// Usable on its own: the out-of-range penalty applies whenever `age_range`
/// is given, independent of any upstream filtering.
pub fn calculate_age_score(requester_age: u8, candidate_age: u8, age_range: Option<&AgeRange>) -> f64 {
    if let Some(range) = age_range {
        if !range.contains(candidate_age) {
            return OUT_OF_RANGE_AGE_SCORE;
        }
    }

    match requester_age.abs_diff(candidate_age) {
        0..=2 => 100.0,
        3..=5 => 90.0,
        6..=10 => 70.0,
        11..=15 => 50.0,
        _ => 30.0,
    }
}

/// Lifestyle score (0-100)
///
/// Education only counts when both sides filled it in; the values themselves
/// are not compared.
pub fn calculate_lifestyle_score(requester: &UserProfile, candidate: &UserProfile) -> f64 {
    let mut score = NEUTRAL_SCORE;

    score += habit_adjustment(requester.smoking, candidate.smoking);
    score += habit_adjustment(requester.drinking, candidate.drinking);

    if requester.education().is_some() && candidate.education().is_some() {
        score += 10.0;
    }

    score.clamp(0.0, 100.0)
}

#[inline]
fn habit_adjustment(requester: Option<Habit>, candidate: Option<Habit>) -> f64 {
    match (requester, candidate) {
        (Some(a), Some(b)) if a == b => 15.0,
        (Some(Habit::Never), Some(Habit::Regularly))
        | (Some(Habit::Regularly), Some(Habit::Never)) => -10.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalize::lowercase_set;
    use crate::models::{Gender, Location, Preferences};

    fn set(items: &[&str]) -> HashSet<String> {
        let owned: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        lowercase_set(&owned)
    }

    fn create_test_profile(id: &str, age: u8) -> UserProfile {
        UserProfile::new(id, age, Gender::Female)
    }

    #[test]
    fn test_interests_neutral_when_empty() {
        assert_eq!(calculate_interests_score(&set(&[]), &set(&["music"])), 50.0);
        assert_eq!(calculate_interests_score(&set(&["music"]), &set(&[])), 50.0);
    }

    #[test]
    fn test_interests_jaccard_plus_bonus() {
        let score = calculate_interests_score(&set(&["music", "art"]), &set(&["Music", "ART", "gaming"]));
        // 2/3 * 100 + 10
        assert!((score - 76.666_666).abs() < 1e-3, "got {}", score);
    }

    #[test]
    fn test_interests_capped_at_100() {
        let interests = set(&["a", "b", "c", "d", "e"]);
        assert_eq!(calculate_interests_score(&interests, &interests), 100.0);
    }

    #[test]
    fn test_interests_no_overlap_is_zero() {
        assert_eq!(calculate_interests_score(&set(&["chess"]), &set(&["surfing"])), 0.0);
    }

    #[test]
    fn test_traits_neutral_when_empty() {
        assert_eq!(calculate_traits_score(&set(&[]), &set(&["calm"])), 50.0);
    }

    #[test]
    fn test_traits_direct_and_complementary() {
        // creative shared (+10), artistic + imaginative complement creative (+10)
        let score = calculate_traits_score(
            &set(&["Creative"]),
            &set(&["creative", "artistic", "imaginative"]),
        );
        assert_eq!(score, 70.0);
    }

    #[test]
    fn test_traits_complements_are_directional() {
        // Only the requester's traits are looked up in the complement table
        assert_eq!(calculate_traits_score(&set(&["artistic"]), &set(&["creative"])), 50.0);
        assert_eq!(calculate_traits_score(&set(&["creative"]), &set(&["artistic"])), 55.0);
    }

    #[test]
    fn test_traits_capped_at_100() {
        let traits = set(&["adventurous", "spontaneous", "outdoorsy", "active", "calm", "driven"]);
        assert_eq!(calculate_traits_score(&traits, &traits), 100.0);
    }

    #[test]
    fn test_goals_neutral_when_missing() {
        assert_eq!(calculate_goals_score(None, Some(RelationshipGoal::Casual)), 50.0);
        assert_eq!(calculate_goals_score(Some(RelationshipGoal::Casual), None), 50.0);
        assert_eq!(
            calculate_goals_score(Some(RelationshipGoal::Casual), Some(RelationshipGoal::Marriage)),
            20.0
        );
    }

    #[test]
    fn test_location_neutral_without_coordinates() {
        let point = GeoPoint::new(40.7128, -74.0060);
        assert_eq!(calculate_location_score(None, Some(&point), 50.0), 70.0);
        assert_eq!(calculate_location_score(Some(&point), None, 50.0), 70.0);
    }

    #[test]
    fn test_location_decay() {
        let here = GeoPoint::new(40.7128, -74.0060);
        assert_eq!(calculate_location_score(Some(&here), Some(&here), 50.0), 100.0);

        // ~0.9 km away
        let near = GeoPoint::new(40.72, -74.01);
        let score = calculate_location_score(Some(&here), Some(&near), 50.0);
        assert!(score > 98.0 && score < 100.0, "got {}", score);

        // LA is far beyond 50 km
        let far = GeoPoint::new(34.0522, -118.2437);
        assert_eq!(calculate_location_score(Some(&here), Some(&far), 50.0), 0.0);
    }

    #[test]
    fn test_location_floor_near_boundary() {
        let here = GeoPoint::new(0.0, 0.0);
        // ~0.9 degrees of latitude ≈ 100 km
        let there = GeoPoint::new(0.9, 0.0);
        let distance = distance_between(&here, &there);
        let score = calculate_location_score(Some(&here), Some(&there), distance + 0.001);
        assert!((score - 50.0).abs() < 0.01, "got {}", score);
    }

    #[test]
    fn test_location_non_positive_max_uses_default() {
        let here = GeoPoint::new(0.0, 0.0);
        assert_eq!(calculate_location_score(Some(&here), Some(&here), 0.0), 100.0);
    }

    #[test]
    fn test_age_bands() {
        assert_eq!(calculate_age_score(30, 30, None), 100.0);
        assert_eq!(calculate_age_score(30, 33, None), 90.0);
        assert_eq!(calculate_age_score(30, 37, None), 70.0);
        assert_eq!(calculate_age_score(30, 42, None), 50.0);
        assert_eq!(calculate_age_score(30, 50, None), 30.0);
    }

    #[test]
    fn test_age_out_of_range_penalty() {
        let range = AgeRange { min: 30, max: 40 };
        assert_eq!(calculate_age_score(35, 22, Some(&range)), 30.0);
        assert_eq!(calculate_age_score(35, 36, Some(&range)), 100.0);
    }

    #[test]
    fn test_lifestyle_neutral_by_default() {
        let a = create_test_profile("a", 30);
        let b = create_test_profile("b", 30);
        assert_eq!(calculate_lifestyle_score(&a, &b), 50.0);
    }

    #[test]
    fn test_lifestyle_matching_habits_and_education() {
        let mut a = create_test_profile("a", 30);
        let mut b = create_test_profile("b", 30);
        a.smoking = Some(Habit::Never);
        b.smoking = Some(Habit::Never);
        a.drinking = Some(Habit::Socially);
        b.drinking = Some(Habit::Socially);
        a.education = Some("BSc".to_string());
        b.education = Some("PhD".to_string());

        assert_eq!(calculate_lifestyle_score(&a, &b), 90.0);
    }

    #[test]
    fn test_lifestyle_clash_either_direction() {
        let mut a = create_test_profile("a", 30);
        let mut b = create_test_profile("b", 30);
        a.smoking = Some(Habit::Regularly);
        b.smoking = Some(Habit::Never);
        a.drinking = Some(Habit::Never);
        b.drinking = Some(Habit::Regularly);

        assert_eq!(calculate_lifestyle_score(&a, &b), 30.0);
    }

    #[test]
    fn test_lifestyle_empty_education_ignored() {
        let mut a = create_test_profile("a", 30);
        let mut b = create_test_profile("b", 30);
        a.education = Some(String::new());
        b.education = Some("MSc".to_string());

        assert_eq!(calculate_lifestyle_score(&a, &b), 50.0);
    }

    #[test]
    fn test_calculate_match_score_uses_weights() {
        let mut requester = create_test_profile("me", 25);
        requester.interests = vec!["music".to_string(), "art".to_string()];
        requester.traits = vec!["creative".to_string()];
        requester.relationship_goal = Some(RelationshipGoal::Relationship);

        let mut candidate = create_test_profile("them", 27);
        candidate.interests = vec!["music".to_string(), "art".to_string(), "gaming".to_string()];
        candidate.traits = vec!["creative".to_string(), "social".to_string()];
        candidate.relationship_goal = Some(RelationshipGoal::Relationship);

        let result = calculate_match_score(&requester, &candidate, &ScoringWeights::default());

        assert_eq!(result.user_id, "them");
        assert_eq!(result.breakdown.traits, 60.0);
        assert_eq!(result.breakdown.goals, 100.0);
        assert_eq!(result.breakdown.location, 70.0);
        assert_eq!(result.breakdown.age, 100.0);
        assert_eq!(result.breakdown.lifestyle, 50.0);
        assert_eq!(result.score, 77);
    }

    #[test]
    fn test_max_distance_preference_applies() {
        let mut requester = create_test_profile("me", 30);
        requester.location = Some(Location {
            coordinates: Some(GeoPoint::new(40.7128, -74.0060)),
            ..Location::default()
        });
        requester.preferences = Some(Preferences {
            max_distance: Some(0.5),
            ..Preferences::default()
        });

        // ~0.9 km away
        let mut candidate = create_test_profile("them", 30);
        candidate.location = Some(Location {
            coordinates: Some(GeoPoint::new(40.72, -74.01)),
            ..Location::default()
        });

        let result = calculate_match_score(&requester, &candidate, &ScoringWeights::default());
        assert_eq!(result.breakdown.location, 0.0);
    }
}

use validator::Validate;

use crate::core::{
    filters::passes_hard_filters,
    normalize::NormalizedProfile,
    scoring::{calculate_match_score, score_normalized},
};
use crate::error::MatchError;
use crate::models::{MatchScore, ScoringWeights, UserProfile};

/// Number of matches returned when the caller does not ask for a limit
pub const DEFAULT_LIMIT: usize = 20;

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Input validation (limit, profile preconditions)
/// 2. Hard filters (self, gender preference, age range)
/// 3. Scoring of every survivor
/// 4. Stable sort by score and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single candidate for a requester with this matcher's weights
    pub fn calculate_match_score(&self, requester: &UserProfile, candidate: &UserProfile) -> MatchScore {
        calculate_match_score(requester, candidate, &self.weights)
    }

    /// Find the best matches for `requester` among `candidates`
    ///
    /// # Arguments
    /// * `requester` - The user matches are computed for
    /// * `candidates` - Candidate pool, in the order the store returned them
    /// * `limit` - Maximum number of matches to return, at least 1
    ///
    /// # Returns
    /// Matches sorted by descending score; equal scores keep pool order.
    /// An empty list is a valid outcome when every candidate is filtered out.
    pub fn find_best_matches(
        &self,
        requester: &UserProfile,
        candidates: &[UserProfile],
        limit: usize,
    ) -> Result<Vec<MatchScore>, MatchError> {
        if limit == 0 {
            return Err(MatchError::InvalidLimit(limit));
        }

        requester
            .validate()
            .map_err(|e| MatchError::invalid_profile(&requester.id, e))?;
        for candidate in candidates {
            candidate
                .validate()
                .map_err(|e| MatchError::invalid_profile(&candidate.id, e))?;
        }

        let normalized_requester = NormalizedProfile::new(requester);

        let mut matches: Vec<MatchScore> = candidates
            .iter()
            .filter(|candidate| passes_hard_filters(requester, candidate))
            .map(|candidate| {
                score_normalized(&normalized_requester, &NormalizedProfile::new(candidate), &self.weights)
            })
            .collect();

        tracing::debug!(
            "Scored {} of {} candidates for {}",
            matches.len(),
            candidates.len(),
            requester.id
        );

        // sort_by is stable, ties keep pool order
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(limit);

        Ok(matches)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// [`Matcher::find_best_matches`] with the default weights
pub fn find_best_matches(
    requester: &UserProfile,
    candidates: &[UserProfile],
    limit: usize,
) -> Result<Vec<MatchScore>, MatchError> {
    Matcher::with_default_weights().find_best_matches(requester, candidates, limit)
}

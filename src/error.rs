use thiserror::Error;

/// Precondition failures reported by the matching core
///
/// An empty match list is never an error; these only fire when the input
/// itself breaks the scorer's contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("limit must be at least 1, got {0}")]
    InvalidLimit(usize),

    #[error("invalid profile '{user_id}': {reason}")]
    InvalidProfile { user_id: String, reason: String },

    #[error("invalid scoring weights: {0}")]
    InvalidWeights(String),
}

impl MatchError {
    pub fn invalid_profile(user_id: &str, errors: validator::ValidationErrors) -> Self {
        MatchError::InvalidProfile {
            user_id: user_id.to_string(),
            reason: errors.to_string(),
        }
    }
}

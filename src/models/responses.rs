use serde::{Deserialize, Serialize};

use crate::core::{get_match_color, get_match_quality, MatchColor};
use crate::models::domain::{MatchScore, ScoreBreakdown, UserProfile};

/// One ranked profile in a discovery response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredMatch {
    pub user: UserProfile,
    pub match_score: u8,
    pub match_breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
    pub match_quality: String,
    pub match_color: MatchColor,
}

impl DiscoveredMatch {
    pub fn new(user: UserProfile, score: MatchScore) -> Self {
        Self {
            user,
            match_score: score.score,
            match_breakdown: score.breakdown,
            reasons: score.reasons,
            match_quality: get_match_quality(score.score).to_string(),
            match_color: get_match_color(score.score),
        }
    }
}

/// Response for the discovery endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub matches: Vec<DiscoveredMatch>,
    pub total: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub cache_entries: u64,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl ToString, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            status_code,
        }
    }
}

/// Result of liking a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub is_match: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

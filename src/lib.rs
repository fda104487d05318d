//! CharacterMatch - compatibility scoring and discovery service
//!
//! The core is a pure scoring engine: given a requesting user and a pool of
//! candidate profiles it computes six weighted sub-scores, explains the match
//! in a few short reasons, filters by hard preferences and ranks the result.
//! Around it sits a small actix-web service that reads profiles from
//! PostgreSQL and records likes.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    calculate_match_score, find_best_matches, generate_match_reasons, get_match_color,
    get_match_quality, haversine_distance, MatchColor, Matcher,
};
pub use error::MatchError;
pub use models::{MatchScore, ScoreBreakdown, ScoringWeights, UserProfile};

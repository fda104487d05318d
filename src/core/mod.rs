// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod normalize;
pub mod quality;
pub mod reasons;
pub mod scoring;
pub mod tables;

pub use distance::{distance_between, haversine_distance};
pub use filters::{matches_age_preference, matches_gender_preference, passes_hard_filters};
pub use matcher::{find_best_matches, Matcher, DEFAULT_LIMIT};
pub use normalize::NormalizedProfile;
pub use quality::{get_match_color, get_match_quality, MatchColor};
pub use reasons::generate_match_reasons;
pub use scoring::{
    calculate_age_score, calculate_goals_score, calculate_interests_score,
    calculate_lifestyle_score, calculate_location_score, calculate_match_score,
    calculate_traits_score,
};

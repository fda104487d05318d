// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeRange, Gender, GeoPoint, Habit, Location, MatchScore, Preferences, RelationshipGoal,
    ScoreBreakdown, ScoringWeights, UserProfile, MIN_AGE,
};
pub use requests::{DiscoverQuery, LikeQuery, LikeRequest, MatchesQuery};
pub use responses::{
    DiscoverResponse, DiscoveredMatch, ErrorResponse, HealthResponse, LikeResponse,
    MessageResponse,
};

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query for the discovery endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiscoverQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Query for listing mutual matches
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchesQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// Request to like a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LikeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "liked_user_id", rename = "likedUserId")]
    pub liked_user_id: String,
}

/// Query identifying a like to remove
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LikeQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "liked_user_id", rename = "likedUserId")]
    pub liked_user_id: String,
}

// Service exports
pub mod cache;
pub mod postgres;

pub use cache::{CacheError, CacheKey, DiscoveryCache};
pub use postgres::{CandidateFilter, LikeOutcome, ProfileStore, StoreError};

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::DiscoverResponse;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Cached discovery payload is unreadable: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Local invalidation failed: {0}")]
    LocalInvalidation(String),
}

/// Keys under which discovery results are cached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKey<'a> {
    /// Ranked discovery page for one user at one page size
    Discover { user_id: &'a str, limit: usize },
    /// Every discovery page of one user
    DiscoverUser { user_id: &'a str },
}

impl CacheKey<'_> {
    /// Rendered key; a `DiscoverUser` key is a prefix of every matching `Discover` key
    pub fn render(&self) -> String {
        match self {
            CacheKey::Discover { user_id, limit } => format!("discover:{}:{}", user_id, limit),
            CacheKey::DiscoverUser { user_id } => format!("discover:{}:", user_id),
        }
    }
}

/// Ranked discovery results, cached per (user, limit)
///
/// The local tier holds decoded responses in moka; Redis is shared between
/// instances and holds the JSON. A user's pages are dropped as soon as that
/// user likes or unlikes someone.
pub struct DiscoveryCache {
    redis: ConnectionManager,
    local: moka::future::Cache<String, Arc<DiscoverResponse>>,
    ttl: Duration,
}

impl DiscoveryCache {
    pub async fn connect(redis_url: &str, local_capacity: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;
        let ttl = Duration::from_secs(ttl_secs);

        let local = moka::future::CacheBuilder::new(local_capacity)
            .time_to_live(ttl)
            .support_invalidation_closures()
            .build();

        Ok(Self { redis, local, ttl })
    }

    /// Cached page for `user_id`, if either tier still has it
    pub async fn lookup(&self, user_id: &str, limit: usize) -> Result<Option<Arc<DiscoverResponse>>, CacheError> {
        let key = CacheKey::Discover { user_id, limit }.render();

        if let Some(page) = self.local.get(&key).await {
            tracing::trace!("Local discovery hit: {}", key);
            return Ok(Some(page));
        }

        let mut conn = self.redis.clone();
        let stored: Option<String> = conn.get(&key).await?;
        let Some(json) = stored else {
            return Ok(None);
        };

        tracing::trace!("Redis discovery hit: {}", key);
        let page = Arc::new(serde_json::from_str::<DiscoverResponse>(&json)?);
        self.local.insert(key, Arc::clone(&page)).await;

        Ok(Some(page))
    }

    /// Cache a freshly ranked page in both tiers
    pub async fn store(&self, user_id: &str, limit: usize, page: DiscoverResponse) -> Result<(), CacheError> {
        let key = CacheKey::Discover { user_id, limit }.render();
        let json = serde_json::to_string(&page)?;

        self.local.insert(key.clone(), Arc::new(page)).await;

        let mut conn = self.redis.clone();
        let _: () = conn.set_ex(&key, json, self.ttl.as_secs()).await?;

        Ok(())
    }

    /// Drop every cached page of `user_id`
    pub async fn forget_user(&self, user_id: &str) -> Result<(), CacheError> {
        let prefix = CacheKey::DiscoverUser { user_id }.render();

        let local_prefix = prefix.clone();
        self.local
            .invalidate_entries_if(move |key, _| key.starts_with(&local_prefix))
            .map_err(|e| CacheError::LocalInvalidation(e.to_string()))?;

        let mut conn = self.redis.clone();
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(format!("{}*", prefix))
            .query_async(&mut conn)
            .await?;

        if !keys.is_empty() {
            let _: () = conn.del(keys).await?;
        }

        tracing::debug!("Dropped cached discovery pages for {}", user_id);
        Ok(())
    }

    /// Pages currently held by the local tier
    pub fn entry_count(&self) -> u64 {
        self.local.entry_count()
    }
}

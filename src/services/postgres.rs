use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::core::filters::EVERYONE;
use crate::models::UserProfile;

/// Errors that can occur when interacting with the profile store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Outcome of recording a like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeOutcome {
    /// Both users have now liked each other
    pub is_match: bool,
    /// The like existed before this call; nothing was written
    pub already_liked: bool,
}

/// A requester's hard preferences as bound into the candidate query
///
/// Mirrors `passes_hard_filters` so the row limit only counts profiles the
/// matcher would keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Accepted genders, `None` for anyone
    pub genders: Option<Vec<String>>,
    /// Inclusive age bounds
    pub age_bounds: Option<(i32, i32)>,
}

impl CandidateFilter {
    pub fn for_requester(requester: &UserProfile) -> Self {
        let shown = requester.shown_genders();
        let genders = if shown.is_empty() || shown.iter().any(|g| g == EVERYONE) {
            None
        } else {
            Some(shown.to_vec())
        };

        Self {
            genders,
            age_bounds: requester
                .age_range()
                .map(|range| (i32::from(range.min), i32::from(range.max))),
        }
    }
}

/// PostgreSQL-backed profile store
///
/// Profiles live as JSONB documents keyed by user id. Likes are one row per
/// ordered (user, liked user) pair; `is_match` is set on both rows once the
/// like is reciprocated.
pub struct ProfileStore {
    pool: PgPool,
}

impl ProfileStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL profile store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Fetch one profile by user id
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, StoreError> {
        let query = r#"
            SELECT p.profile || jsonb_build_object('id', p.id, 'profileCompleted', p.profile_completed) AS profile
            FROM profiles p
            WHERE p.id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("profile {}", user_id)))?;

        decode_profile(&row)
    }

    /// Completed profiles the requester has not liked yet and whose gender
    /// and age pass the requester's preferences, newest first
    pub async fn get_discovery_candidates(
        &self,
        requester: &UserProfile,
        limit: usize,
    ) -> Result<Vec<UserProfile>, StoreError> {
        let filter = CandidateFilter::for_requester(requester);
        let (min_age, max_age) = filter.age_bounds.unzip();

        let query = r#"
            SELECT p.profile || jsonb_build_object('id', p.id, 'profileCompleted', p.profile_completed) AS profile
            FROM profiles p
            WHERE p.id <> $1
              AND p.profile_completed
              AND ($3::text[] IS NULL OR p.profile->>'gender' = ANY($3::text[]))
              AND ($4::int IS NULL OR (
                  jsonb_typeof(p.profile->'age') = 'number'
                  AND (p.profile->>'age')::numeric BETWEEN $4::int AND $5::int
              ))
              AND NOT EXISTS (
                  SELECT 1 FROM likes l
                  WHERE l.user_id = $1 AND l.liked_user_id = p.id
              )
            ORDER BY p.updated_at DESC
            LIMIT $2
        "#;

        let rows = sqlx::query(query)
            .bind(&requester.id)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(filter.genders)
            .bind(min_age)
            .bind(max_age)
            .fetch_all(&self.pool)
            .await?;

        let candidates = decode_profiles(&rows);

        tracing::debug!("Loaded {} discovery candidates for {}", candidates.len(), requester.id);

        Ok(candidates)
    }

    /// Record that `user_id` likes `liked_user_id`
    ///
    /// Marks both rows as a match when the other user already liked back.
    /// Liking twice is a no-op that reports the existing state.
    pub async fn record_like(
        &self,
        user_id: &str,
        liked_user_id: &str,
    ) -> Result<LikeOutcome, StoreError> {
        if user_id == liked_user_id {
            return Err(StoreError::InvalidInput("cannot like yourself".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let target_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM profiles WHERE id = $1)")
                .bind(liked_user_id)
                .fetch_one(&mut *tx)
                .await?;
        if !target_exists {
            return Err(StoreError::NotFound(format!("profile {}", liked_user_id)));
        }

        // A->B and B->A take the same lock and run one after the other
        let (first, second) = like_pair(user_id, liked_user_id);
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1), hashtext($2))")
            .bind(first)
            .bind(second)
            .execute(&mut *tx)
            .await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO likes (user_id, liked_user_id, is_match, created_at)
            VALUES ($1, $2, FALSE, NOW())
            ON CONFLICT (user_id, liked_user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(liked_user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        if !inserted {
            let is_match: bool = sqlx::query_scalar(
                "SELECT is_match FROM likes WHERE user_id = $1 AND liked_user_id = $2",
            )
            .bind(user_id)
            .bind(liked_user_id)
            .fetch_one(&mut *tx)
            .await?;
            tx.commit().await?;

            return Ok(LikeOutcome {
                is_match,
                already_liked: true,
            });
        }

        let reciprocal: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND liked_user_id = $2)",
        )
        .bind(liked_user_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if reciprocal {
            sqlx::query(
                r#"
                UPDATE likes SET is_match = TRUE
                WHERE (user_id = $1 AND liked_user_id = $2)
                   OR (user_id = $2 AND liked_user_id = $1)
                "#,
            )
            .bind(user_id)
            .bind(liked_user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            "Recorded like: {} -> {} (match: {})",
            user_id,
            liked_user_id,
            reciprocal
        );

        Ok(LikeOutcome {
            is_match: reciprocal,
            already_liked: false,
        })
    }

    /// Remove a like, clearing the match flag on the reciprocal row
    ///
    /// Returns `false` when there was nothing to remove.
    pub async fn remove_like(&self, user_id: &str, liked_user_id: &str) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND liked_user_id = $2")
            .bind(user_id)
            .bind(liked_user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if deleted {
            sqlx::query("UPDATE likes SET is_match = FALSE WHERE user_id = $1 AND liked_user_id = $2")
                .bind(liked_user_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(deleted)
    }

    /// Profiles the user has a mutual match with, most recent first
    pub async fn get_mutual_matches(&self, user_id: &str) -> Result<Vec<UserProfile>, StoreError> {
        let query = r#"
            SELECT p.profile || jsonb_build_object('id', p.id, 'profileCompleted', p.profile_completed) AS profile
            FROM likes l
            JOIN profiles p ON p.id = l.liked_user_id
            WHERE l.user_id = $1 AND l.is_match
            ORDER BY l.created_at DESC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        Ok(decode_profiles(&rows))
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn decode_profile(row: &PgRow) -> Result<UserProfile, StoreError> {
    let Json(profile) = row.try_get::<Json<UserProfile>, _>("profile")?;
    Ok(profile)
}

/// Decode a batch, skipping documents that no longer match the profile shape
fn decode_profiles(rows: &[PgRow]) -> Vec<UserProfile> {
    rows.iter()
        .filter_map(|row| match decode_profile(row) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!("Skipping malformed profile document: {}", e);
                None
            }
        })
        .collect()
}

/// Unordered pair key for a like, identical for both directions
fn like_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

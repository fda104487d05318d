// Route exports
pub mod discover;
pub mod matches;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::HealthResponse;
use crate::services::{DiscoveryCache, ProfileStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProfileStore>,
    pub cache: Arc<DiscoveryCache>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(discover::configure)
            .configure(matches::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache_entries: state.cache.entry_count(),
    })
}

use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use validator::Validate;

use crate::models::{DiscoverQuery, DiscoverResponse, DiscoveredMatch, ErrorResponse, UserProfile};
use crate::routes::AppState;
use crate::services::StoreError;

/// Configure discovery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/discover", web::get().to(discover));
}

/// Discovery endpoint
///
/// GET /api/v1/discover?userId={userId}&limit={limit}
///
/// Returns the best-scoring profiles the user has not liked yet, with the
/// score breakdown, reasons and quality label for each.
async fn discover(state: web::Data<AppState>, query: web::Query<DiscoverQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Validation failed", errors, 400));
    }

    let user_id = &query.user_id;
    let limit = query
        .limit
        .unwrap_or_else(|| state.matching.default_limit())
        .min(state.matching.max_limit()) as usize;

    match state.cache.lookup(user_id, limit).await {
        Ok(Some(cached)) => {
            tracing::debug!("Serving cached discovery for {}", user_id);
            return HttpResponse::Ok().json(&*cached);
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Discovery cache lookup failed for {}: {}", user_id, e),
    }

    tracing::info!("Discovering matches for user: {}, limit: {}", user_id, limit);

    let requester = match state.store.get_profile(user_id).await {
        Ok(profile) => profile,
        Err(StoreError::NotFound(_)) => {
            return HttpResponse::NotFound().json(ErrorResponse::new(
                "User not found",
                format!("No profile for {}", user_id),
                404,
            ));
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to fetch user profile",
                e,
                500,
            ));
        }
    };

    let pool_size = state.matching.candidate_pool_size(limit);
    let candidates = match state.store.get_discovery_candidates(&requester, pool_size).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query candidates for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to query candidates",
                e,
                500,
            ));
        }
    };

    // Stored documents that break the scorer's input contract are skipped
    let candidates: Vec<UserProfile> = candidates
        .into_iter()
        .filter(|candidate| match candidate.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Skipping invalid candidate {}: {}", candidate.id, e);
                false
            }
        })
        .collect();

    let total_candidates = candidates.len();

    let matches = match state.matcher.find_best_matches(&requester, &candidates, limit) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Cannot score matches for {}: {}", user_id, e);
            return HttpResponse::UnprocessableEntity().json(ErrorResponse::new(
                "Invalid matching input",
                e,
                422,
            ));
        }
    };

    let mut by_id: HashMap<String, UserProfile> = candidates
        .into_iter()
        .map(|candidate| (candidate.id.clone(), candidate))
        .collect();

    let matches: Vec<DiscoveredMatch> = matches
        .into_iter()
        .filter_map(|score| {
            by_id
                .remove(&score.user_id)
                .map(|user| DiscoveredMatch::new(user, score))
        })
        .collect();

    let response = DiscoverResponse {
        total: matches.len(),
        matches,
    };

    if let Err(e) = state.cache.store(user_id, limit, response.clone()).await {
        tracing::warn!("Failed to cache discovery for {}: {}", user_id, e);
    }

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates)",
        response.total,
        user_id,
        total_candidates
    );

    HttpResponse::Ok().json(response)
}

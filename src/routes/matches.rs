use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, LikeQuery, LikeRequest, LikeResponse, MatchesQuery, MessageResponse};
use crate::routes::AppState;
use crate::services::StoreError;

/// Configure like/match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/matches")
            .route(web::get().to(list_matches))
            .route(web::post().to(like_user))
            .route(web::delete().to(unlike_user)),
    );
}

/// List mutual matches
///
/// GET /api/v1/matches?userId={userId}
async fn list_matches(state: web::Data<AppState>, query: web::Query<MatchesQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Validation failed", errors, 400));
    }

    match state.store.get_mutual_matches(&query.user_id).await {
        Ok(profiles) => HttpResponse::Ok().json(profiles),
        Err(e) => {
            tracing::error!("Failed to fetch matches for {}: {}", query.user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to fetch matches", e, 500))
        }
    }
}

/// Like a user
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "likedUserId": "string"
/// }
/// ```
async fn like_user(state: web::Data<AppState>, req: web::Json<LikeRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Validation failed", errors, 400));
    }

    if req.user_id == req.liked_user_id {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Invalid like",
            "Cannot like yourself",
            400,
        ));
    }

    let outcome = match state.store.record_like(&req.user_id, &req.liked_user_id).await {
        Ok(outcome) => outcome,
        Err(StoreError::NotFound(message)) => {
            return HttpResponse::NotFound().json(ErrorResponse::new("User not found", message, 404));
        }
        Err(StoreError::InvalidInput(message)) => {
            return HttpResponse::BadRequest().json(ErrorResponse::new("Invalid like", message, 400));
        }
        Err(e) => {
            tracing::error!("Failed to record like {} -> {}: {}", req.user_id, req.liked_user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to create like",
                e,
                500,
            ));
        }
    };

    if outcome.already_liked {
        return HttpResponse::Ok().json(LikeResponse {
            is_match: outcome.is_match,
            message: "Already liked".to_string(),
        });
    }

    // The liked profile must drop out of this user's discovery results
    invalidate_discovery(&state, &req.user_id).await;

    let message = if outcome.is_match { "It's a match!" } else { "Like sent" };
    tracing::info!("{} liked {} (match: {})", req.user_id, req.liked_user_id, outcome.is_match);

    HttpResponse::Created().json(LikeResponse {
        is_match: outcome.is_match,
        message: message.to_string(),
    })
}

/// Remove a like
///
/// DELETE /api/v1/matches?userId={userId}&likedUserId={likedUserId}
async fn unlike_user(state: web::Data<AppState>, query: web::Query<LikeQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Validation failed", errors, 400));
    }

    match state.store.remove_like(&query.user_id, &query.liked_user_id).await {
        Ok(true) => {
            invalidate_discovery(&state, &query.user_id).await;
            HttpResponse::Ok().json(MessageResponse {
                message: "Like removed successfully".to_string(),
            })
        }
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse::new(
            "Like not found",
            format!("{} has not liked {}", query.user_id, query.liked_user_id),
            404,
        )),
        Err(e) => {
            tracing::error!("Failed to remove like {} -> {}: {}", query.user_id, query.liked_user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to remove like", e, 500))
        }
    }
}

async fn invalidate_discovery(state: &AppState, user_id: &str) {
    if let Err(e) = state.cache.forget_user(user_id).await {
        tracing::warn!("Failed to invalidate discovery cache for {}: {}", user_id, e);
    }
}

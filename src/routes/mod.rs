use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    api::AppState,
    middleware::{make_span_with_request_id, request_id_middleware},
};

pub mod cache;
pub mod movies;
pub mod users;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/movies", get(movies::list_movies))
        .route("/movies/:movie_id", get(movies::get_movie))
        .route("/movies/:movie_id/credits", get(movies::get_movie_credits))
        .route("/genres", get(movies::list_genres))
        // Users
        .route("/users/:user_id/ratings", get(users::get_user_ratings))
        .route(
            "/users/:user_id/recommendations",
            get(users::get_recommendations),
        )
        // Cache
        .route("/cache/reload", post(cache::reload))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    api::AppState,
    error::AppResult,
    middleware::RequestId,
    models::{RecommendationItem, UserRating},
    services::{ratings, recommendations},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub n: Option<usize>,
}

/// Handler for a user's rating history
pub async fn get_user_ratings(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<UserRating>>> {
    let ratings = state
        .run_blocking(move |store, _| ratings::get_user_ratings(store, user_id))
        .await?;
    Ok(Json(ratings))
}

/// Handler for recommendations endpoint
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<i64>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<RecommendationItem>>> {
    let n = query.n.unwrap_or(state.default_recommendation_count);

    tracing::info!(
        request_id = %request_id,
        user_id,
        n,
        "Processing recommendation request"
    );

    let items = state
        .run_blocking(move |store, recommender| {
            recommendations::get_movie_recommendations(store, recommender, user_id, n)
        })
        .await?;

    Ok(Json(items))
}

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    api::AppState,
    error::{AppError, AppResult},
    models::{CastCrew, Movie, MovieMetadata},
    services::catalog::{self, MovieFilter},
};

/// Handler for browsing the catalog
pub async fn list_movies(
    State(state): State<AppState>,
    Query(filter): Query<MovieFilter>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = state
        .run_blocking(move |store, _| catalog::list_movies(store, &filter))
        .await?;
    Ok(Json(movies))
}

/// Handler for a single movie's metadata
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<MovieMetadata>> {
    state
        .run_blocking(move |store, _| catalog::get_movie_metadata(store, movie_id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", movie_id)))
}

/// Handler for a movie's cast and crew rows
pub async fn get_movie_credits(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<Vec<CastCrew>>> {
    let credits = state
        .run_blocking(move |store, _| catalog::get_movie_credits(store, movie_id))
        .await?;
    Ok(Json(credits))
}

/// Handler for the list of catalog genres
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let genres = state
        .run_blocking(|store, _| catalog::list_genres(store))
        .await?;
    Ok(Json(genres))
}

use std::collections::HashSet;

use crate::{
    error::{AppError, AppResult},
    models::RecommendationItem,
    services::{catalog::distinct_movies, recommenders::Recommender},
    store::RecordStore,
};

/// Generates `n` movie recommendations for a user
///
/// Duplicate movie rows count once, keeping the first in file order. Fails
/// with `InsufficientCatalog` when there are fewer than `n` distinct movies
/// instead of returning a shorter list. Scoring is left to the configured
/// strategy, whose output is checked against the contract before it is
/// returned.
pub fn get_movie_recommendations(
    store: &dyn RecordStore,
    recommender: &dyn Recommender,
    user_id: i64,
    n: usize,
) -> AppResult<Vec<RecommendationItem>> {
    let catalog = distinct_movies(&store.load_movies()?);

    if n > catalog.len() {
        return Err(AppError::InsufficientCatalog {
            requested: n,
            available: catalog.len(),
        });
    }

    let items = recommender.recommend(user_id, &catalog, n)?;

    if items.len() != n {
        tracing::error!(
            strategy = recommender.name(),
            requested = n,
            returned = items.len(),
            "Recommender returned the wrong number of items"
        );
        return Err(AppError::Internal(format!(
            "recommender '{}' returned {} items, expected {}",
            recommender.name(),
            items.len(),
            n
        )));
    }

    let distinct_ids = items.iter().map(|i| i.movie_id).collect::<HashSet<_>>();
    if distinct_ids.len() != items.len() {
        tracing::error!(
            strategy = recommender.name(),
            returned = items.len(),
            distinct = distinct_ids.len(),
            "Recommender returned duplicate movies"
        );
        return Err(AppError::Internal(format!(
            "recommender '{}' returned duplicate movie ids",
            recommender.name()
        )));
    }

    tracing::info!(
        user_id,
        count = items.len(),
        strategy = recommender.name(),
        "Generated recommendations"
    );

    Ok(items)
}

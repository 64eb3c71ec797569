use crate::{
    error::AppResult,
    models::UserRating,
    services::catalog::index_movies,
    store::RecordStore,
};

/// Fetches a user's ratings with the title of each rated movie
///
/// Ratings keep their order from the ratings file. A rating whose movie is
/// not in the catalog is dropped rather than failing the whole query, since
/// the source datasets are not guaranteed to be consistent with each other.
pub fn get_user_ratings(store: &dyn RecordStore, user_id: i64) -> AppResult<Vec<UserRating>> {
    let ratings = store.load_ratings()?;
    let movies = store.load_movies()?;
    let movie_index = index_movies(&movies);

    let mut result = Vec::new();
    let mut dangling = 0usize;

    for rating in ratings.iter().filter(|r| r.user_id == user_id) {
        match movie_index.get(&rating.movie_id) {
            Some(movie) => result.push(UserRating::new(rating, movie.title.clone())),
            None => dangling += 1,
        }
    }

    if dangling > 0 {
        tracing::debug!(
            user_id,
            skipped = dangling,
            "Skipped ratings referencing unknown movies"
        );
    }

    tracing::debug!(user_id, rating_count = result.len(), "Fetched user ratings");

    Ok(result)
}

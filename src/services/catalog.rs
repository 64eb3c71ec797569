use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{CastCrew, Movie, MovieMetadata},
    store::RecordStore,
};

/// Criteria for browsing the catalog. Unset fields match everything.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MovieFilter {
    /// Exact genre name, compared case-insensitively
    pub genre: Option<String>,
    pub year: Option<i32>,
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

impl MovieFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(genre) = &self.genre {
            if !movie.has_genre(genre) {
                return false;
            }
        }

        if let Some(year) = self.year {
            if movie.year != Some(year) {
                return false;
            }
        }

        if let Some(title) = &self.title {
            if !movie.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// Joins a movie with its poster link.
///
/// Returns `None` when no movie has this id. Duplicate movie or poster rows
/// resolve to the first one in file order, and a movie without a poster row
/// gets no poster.
pub fn get_movie_metadata(
    store: &dyn RecordStore,
    movie_id: i64,
) -> AppResult<Option<MovieMetadata>> {
    let movies = store.load_movies()?;
    let Some(movie) = movies.iter().find(|m| m.movie_id == movie_id) else {
        tracing::debug!(movie_id, "Movie not found");
        return Ok(None);
    };

    let poster_links = store.load_poster_links()?;
    let poster_link = poster_links
        .iter()
        .find(|p| p.movie_id == movie_id)
        .map(|p| p.poster_link.clone());

    Ok(Some(MovieMetadata::new(movie.clone(), poster_link)))
}

/// Movie rows keyed by id, keeping the first row for each id
pub(crate) fn index_movies(movies: &[Movie]) -> HashMap<i64, &Movie> {
    let mut index = HashMap::with_capacity(movies.len());
    for movie in movies {
        index.entry(movie.movie_id).or_insert(movie);
    }
    index
}

/// The catalog with one row per movie id, keeping the first row in file order
pub(crate) fn distinct_movies(movies: &[Movie]) -> Vec<Movie> {
    let mut seen = HashSet::with_capacity(movies.len());
    movies
        .iter()
        .filter(|m| seen.insert(m.movie_id))
        .cloned()
        .collect()
}

/// Lists catalog movies matching the filter, in file order
pub fn list_movies(store: &dyn RecordStore, filter: &MovieFilter) -> AppResult<Vec<Movie>> {
    let movies = store.load_movies()?;

    let matching = movies
        .iter()
        .filter(|m| filter.matches(m))
        .skip(filter.offset)
        .take(filter.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect::<Vec<_>>();

    tracing::debug!(
        catalog_size = movies.len(),
        returned = matching.len(),
        "Listed movies"
    );

    Ok(matching)
}

/// Every distinct genre in the catalog, sorted
pub fn list_genres(store: &dyn RecordStore) -> AppResult<Vec<String>> {
    let movies = store.load_movies()?;
    let genres: BTreeSet<&str> = movies
        .iter()
        .flat_map(|m| m.genres.iter().map(String::as_str))
        .collect();

    Ok(genres.into_iter().map(str::to_string).collect())
}

/// Cast and crew rows for a movie, in file order
pub fn get_movie_credits(store: &dyn RecordStore, movie_id: i64) -> AppResult<Vec<CastCrew>> {
    let credits = store.load_cast_crew()?;
    Ok(credits
        .iter()
        .filter(|c| c.movie_id == movie_id)
        .cloned()
        .collect())
}

use super::{RecordStore, Rows};
use crate::{
    error::AppResult,
    models::{CastCrew, Movie, PosterLink, Rating},
};

/// Record store serving rows held in memory.
///
/// Stands in for a database in tests and demos. Tables never change after
/// construction, so nothing needs invalidating.
#[derive(Debug, Clone)]
pub struct MemoryRecordStore {
    movies: Rows<Movie>,
    ratings: Rows<Rating>,
    poster_links: Rows<PosterLink>,
    cast_crew: Rows<CastCrew>,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl MemoryRecordStore {
    pub fn new(movies: Vec<Movie>, ratings: Vec<Rating>) -> Self {
        Self {
            movies: movies.into(),
            ratings: ratings.into(),
            poster_links: Vec::new().into(),
            cast_crew: Vec::new().into(),
        }
    }

    pub fn with_poster_links(mut self, poster_links: Vec<PosterLink>) -> Self {
        self.poster_links = poster_links.into();
        self
    }

    pub fn with_cast_crew(mut self, cast_crew: Vec<CastCrew>) -> Self {
        self.cast_crew = cast_crew.into();
        self
    }
}

impl RecordStore for MemoryRecordStore {
    fn check_data_files(&self) -> AppResult<()> {
        Ok(())
    }

    fn load_movies(&self) -> AppResult<Rows<Movie>> {
        Ok(self.movies.clone())
    }

    fn load_ratings(&self) -> AppResult<Rows<Rating>> {
        Ok(self.ratings.clone())
    }

    fn load_poster_links(&self) -> AppResult<Rows<PosterLink>> {
        Ok(self.poster_links.clone())
    }

    fn load_cast_crew(&self) -> AppResult<Rows<CastCrew>> {
        Ok(self.cast_crew.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

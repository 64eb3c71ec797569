//! Record storage for the movie, rating, poster and cast/crew tables.
//!
//! Callers only see the [`RecordStore`] trait. `CsvRecordStore` reads the
//! extracted dataset files, `MemoryRecordStore` serves fixed rows, and
//! `CachedRecordStore` keeps any store's tables in memory between calls.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::{
    error::AppResult,
    models::{CastCrew, Movie, PosterLink, Rating},
};

pub mod cache;
pub mod csv_store;
pub mod memory;

pub use cache::CachedRecordStore;
pub use csv_store::CsvRecordStore;
pub use memory::MemoryRecordStore;

/// Shared, immutable table contents
pub type Rows<T> = Arc<[T]>;

/// The tables a store can load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Movies,
    Ratings,
    PosterLinks,
    CastCrew,
}

impl Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Movies => write!(f, "movies"),
            TableKind::Ratings => write!(f, "ratings"),
            TableKind::PosterLinks => write!(f, "poster_links"),
            TableKind::CastCrew => write!(f, "cast_crew"),
        }
    }
}

/// Version of a table's source, compared to decide whether a cached copy is stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceVersion {
    pub modified: SystemTime,
    pub len: u64,
}

impl From<&std::fs::Metadata> for SourceVersion {
    fn from(metadata: &std::fs::Metadata) -> Self {
        Self {
            // Filesystems without mtimes still get size-based versions
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            len: metadata.len(),
        }
    }
}

/// Read interface over the record tables
///
/// Every load returns the whole table or an error, never a partial table.
/// Rows come back in source order.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore: Send + Sync {
    /// Fails with `MissingDataFiles` naming every required source that is absent
    fn check_data_files(&self) -> AppResult<()>;

    fn load_movies(&self) -> AppResult<Rows<Movie>>;

    fn load_ratings(&self) -> AppResult<Rows<Rating>>;

    fn load_poster_links(&self) -> AppResult<Rows<PosterLink>>;

    fn load_cast_crew(&self) -> AppResult<Rows<CastCrew>>;

    /// Version of a table's source, used to invalidate cached copies.
    ///
    /// `None` means the store cannot tell when its data changes.
    fn version(&self, _table: TableKind) -> AppResult<Option<SourceVersion>> {
        Ok(None)
    }

    /// Drops any cached tables so the next load reads the source again
    fn invalidate(&self) {}

    /// Store name for logging
    fn name(&self) -> &'static str;
}

/// Locations of the dataset files under a data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub movies: PathBuf,
    pub ratings: PathBuf,
    pub links: PathBuf,
    pub tags: PathBuf,
    pub poster_links: PathBuf,
    pub cast_crew: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let movielens = data_dir.join("ml-latest-small");
        let tmdb = data_dir.join("tmdb_metadata");

        Self {
            movies: movielens.join("movies.csv"),
            ratings: movielens.join("ratings.csv"),
            links: movielens.join("links.csv"),
            tags: movielens.join("tags.csv"),
            poster_links: tmdb.join("poster_links.csv"),
            cast_crew: tmdb.join("movie_cast_and_crew.csv"),
        }
    }

    /// All files that must exist before any table is read
    pub fn required(&self) -> [&Path; 6] {
        [
            &self.movies,
            &self.ratings,
            &self.links,
            &self.tags,
            &self.poster_links,
            &self.cast_crew,
        ]
    }

    pub fn for_table(&self, table: TableKind) -> &Path {
        match table {
            TableKind::Movies => &self.movies,
            TableKind::Ratings => &self.ratings,
            TableKind::PosterLinks => &self.poster_links,
            TableKind::CastCrew => &self.cast_crew,
        }
    }

    /// Required files that do not exist, in declaration order
    pub fn missing(&self) -> Vec<PathBuf> {
        self.required()
            .into_iter()
            .filter(|path| !path.exists())
            .map(Path::to_path_buf)
            .collect()
    }
}

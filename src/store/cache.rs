use parking_lot::RwLock;

use super::{RecordStore, Rows, SourceVersion, TableKind};
use crate::{
    error::AppResult,
    models::{CastCrew, Movie, PosterLink, Rating},
};

/// A loaded table and the source version it was read at
struct CachedTable<T> {
    version: Option<SourceVersion>,
    rows: Rows<T>,
}

type Slot<T> = RwLock<Option<CachedTable<T>>>;

/// Process-wide read-through cache over another record store.
///
/// A table is reloaded when the inner store reports a different source
/// version (modification time or size) than the one it was cached with.
/// Tables from stores without versions stay cached until [`RecordStore::invalidate`] is called.
/// The file check is never cached.
pub struct CachedRecordStore<S> {
    inner: S,
    movies: Slot<Movie>,
    ratings: Slot<Rating>,
    poster_links: Slot<PosterLink>,
    cast_crew: Slot<CastCrew>,
}

impl<S: RecordStore> CachedRecordStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            movies: RwLock::new(None),
            ratings: RwLock::new(None),
            poster_links: RwLock::new(None),
            cast_crew: RwLock::new(None),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns the cached table if it is still current, otherwise reloads it
    fn read_through<T>(
        &self,
        slot: &Slot<T>,
        table: TableKind,
        load: impl FnOnce(&S) -> AppResult<Rows<T>>,
    ) -> AppResult<Rows<T>> {
        self.inner.check_data_files()?;
        let version = self.inner.version(table)?;

        if let Some(cached) = slot.read().as_ref() {
            if version.is_none() || cached.version == version {
                tracing::trace!(table = %table, "Cache hit");
                return Ok(cached.rows.clone());
            }
        }

        tracing::debug!(table = %table, store = self.inner.name(), "Cache miss, loading table");

        let rows = load(&self.inner)?;
        *slot.write() = Some(CachedTable {
            version,
            rows: rows.clone(),
        });

        Ok(rows)
    }
}

impl<S: RecordStore> RecordStore for CachedRecordStore<S> {
    fn check_data_files(&self) -> AppResult<()> {
        self.inner.check_data_files()
    }

    fn load_movies(&self) -> AppResult<Rows<Movie>> {
        self.read_through(&self.movies, TableKind::Movies, |s| s.load_movies())
    }

    fn load_ratings(&self) -> AppResult<Rows<Rating>> {
        self.read_through(&self.ratings, TableKind::Ratings, |s| s.load_ratings())
    }

    fn load_poster_links(&self) -> AppResult<Rows<PosterLink>> {
        self.read_through(&self.poster_links, TableKind::PosterLinks, |s| {
            s.load_poster_links()
        })
    }

    fn load_cast_crew(&self) -> AppResult<Rows<CastCrew>> {
        self.read_through(&self.cast_crew, TableKind::CastCrew, |s| s.load_cast_crew())
    }

    fn version(&self, table: TableKind) -> AppResult<Option<SourceVersion>> {
        self.inner.version(table)
    }

    fn invalidate(&self) {
        *self.movies.write() = None;
        *self.ratings.write() = None;
        *self.poster_links.write() = None;
        *self.cast_crew.write() = None;
        self.inner.invalidate();
        tracing::info!(store = self.inner.name(), "Record cache invalidated");
    }

    fn name(&self) -> &'static str {
        "cached"
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;
    use std::time::{Duration, SystemTime};

    use super::*;
    use crate::error::AppError;
    use crate::store::csv_store::test_support::write_dataset;
    use crate::store::{CsvRecordStore, MockRecordStore};
    use tempfile::tempdir;

    fn movie(movie_id: i64, title: &str) -> Movie {
        Movie {
            movie_id,
            title: title.to_string(),
            year: None,
            genres: vec![],
        }
    }

    /// Pushes a file's mtime forward so the change is visible regardless of timestamp resolution
    fn touch_later(path: &std::path::Path) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(60))
            .unwrap();
    }

    #[test]
    fn test_unversioned_store_loads_once_until_invalidated() {
        let mut mock = MockRecordStore::new();
        mock.expect_check_data_files().returning(|| Ok(()));
        mock.expect_version().returning(|_| Ok(None));
        mock.expect_name().return_const("mock");
        mock.expect_invalidate().return_const(());
        mock.expect_load_movies()
            .times(2)
            .returning(|| Ok(Arc::from(vec![movie(1, "Heat")])));

        let cache = CachedRecordStore::new(mock);

        assert_eq!(cache.load_movies().unwrap().len(), 1);
        assert_eq!(cache.load_movies().unwrap().len(), 1);
        assert_eq!(cache.load_movies().unwrap().len(), 1);

        cache.invalidate();
        assert_eq!(cache.load_movies().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_files_bypass_cache() {
        let mut mock = MockRecordStore::new();
        mock.expect_check_data_files()
            .returning(|| Err(AppError::MissingDataFiles(vec!["ratings.csv".into()])));
        mock.expect_load_ratings().never();

        let cache = CachedRecordStore::new(mock);
        assert!(matches!(
            cache.load_ratings(),
            Err(AppError::MissingDataFiles(_))
        ));
    }

    #[test]
    fn test_file_change_triggers_reload() {
        let dir = tempdir().unwrap();
        let paths = write_dataset(dir.path());
        let cache = CachedRecordStore::new(CsvRecordStore::new(dir.path()));

        let first = cache.load_movies().unwrap();
        assert_eq!(first.len(), 4);

        // Unchanged file: same allocation comes back
        let second = cache.load_movies().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        fs::write(&paths.movies, "movieId,title,genres\n42,Heat (1995),Action|Crime\n").unwrap();
        touch_later(&paths.movies);

        let reloaded = cache.load_movies().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].title, "Heat");
        assert_eq!(reloaded[0].year, Some(1995));
    }

    #[test]
    fn test_size_change_with_preserved_mtime_triggers_reload() {
        let dir = tempdir().unwrap();
        let paths = write_dataset(dir.path());
        let cache = CachedRecordStore::new(CsvRecordStore::new(dir.path()));

        assert_eq!(cache.load_movies().unwrap().len(), 4);
        let mtime = fs::metadata(&paths.movies).unwrap().modified().unwrap();

        fs::write(&paths.movies, "movieId,title,genres\n42,Heat (1995),Action|Crime\n").unwrap();
        let file = fs::File::options().write(true).open(&paths.movies).unwrap();
        file.set_modified(mtime).unwrap();
        drop(file);

        let reloaded = cache.load_movies().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].movie_id, 42);
    }

    #[test]
    fn test_invalidate_forces_reload_of_csv_tables() {
        let dir = tempdir().unwrap();
        write_dataset(dir.path());
        let cache = CachedRecordStore::new(CsvRecordStore::new(dir.path()));

        let first = cache.load_ratings().unwrap();
        cache.invalidate();
        let second = cache.load_ratings().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }
}

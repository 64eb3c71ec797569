use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use serde::{de::DeserializeOwned, Deserialize};

use super::{DataPaths, RecordStore, Rows, SourceVersion, TableKind};
use crate::{
    error::{AppError, AppResult},
    models::{CastCrew, Movie, PosterLink, Rating},
};

const MOVIE_ID_COLUMN: &str = "movieId";

/// Raw row of the movies file, before title and genre parsing
#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(rename = "movieId")]
    movie_id: i64,
    title: String,
    #[serde(default)]
    genres: String,
}

impl From<MovieRecord> for Movie {
    fn from(record: MovieRecord) -> Self {
        Movie::from_raw(record.movie_id, &record.title, &record.genres)
    }
}

/// Record store backed by the extracted CSV dataset.
///
/// Every load re-reads its file. Wrap it in a `CachedRecordStore` to keep
/// tables between calls.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    paths: DataPaths,
}

impl CsvRecordStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            paths: DataPaths::new(data_dir),
        }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Deserializes every row of a headered CSV file
    fn read_rows<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
        let mut reader = csv::Reader::from_path(path)?;
        let rows = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
        Ok(rows)
    }

    fn load_table<T: DeserializeOwned, R>(
        &self,
        table: TableKind,
        convert: impl Fn(T) -> R,
    ) -> AppResult<Rows<R>> {
        self.check_data_files()?;

        let start = Instant::now();
        let path = self.paths.for_table(table);
        let rows: Vec<R> = Self::read_rows::<T>(path)?
            .into_iter()
            .map(convert)
            .collect();

        tracing::debug!(
            table = %table,
            path = %path.display(),
            row_count = rows.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Loaded table from CSV"
        );

        Ok(rows.into())
    }
}

impl RecordStore for CsvRecordStore {
    fn check_data_files(&self) -> AppResult<()> {
        let missing = self.paths.missing();
        if missing.is_empty() {
            return Ok(());
        }

        tracing::warn!(missing_count = missing.len(), "Required data files are missing");
        Err(AppError::MissingDataFiles(missing))
    }

    fn load_movies(&self) -> AppResult<Rows<Movie>> {
        self.load_table(TableKind::Movies, |record: MovieRecord| Movie::from(record))
    }

    fn load_ratings(&self) -> AppResult<Rows<Rating>> {
        self.load_table(TableKind::Ratings, |rating: Rating| rating)
    }

    fn load_poster_links(&self) -> AppResult<Rows<PosterLink>> {
        self.load_table(TableKind::PosterLinks, |link: PosterLink| link)
    }

    fn load_cast_crew(&self) -> AppResult<Rows<CastCrew>> {
        self.check_data_files()?;

        let path = &self.paths.cast_crew;
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let id_index = headers
            .iter()
            .position(|h| h == MOVIE_ID_COLUMN)
            .ok_or_else(|| {
                invalid_data(format!(
                    "{} has no {} column",
                    path.display(),
                    MOVIE_ID_COLUMN
                ))
            })?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let raw_id = record.get(id_index).unwrap_or_default().trim();
            let movie_id = raw_id.parse::<i64>().map_err(|e| {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                invalid_data(format!(
                    "{} line {}: invalid {} {:?}: {}",
                    path.display(),
                    line,
                    MOVIE_ID_COLUMN,
                    raw_id,
                    e
                ))
            })?;

            let fields: BTreeMap<String, String> = headers
                .iter()
                .zip(record.iter())
                .enumerate()
                .filter(|(i, _)| *i != id_index)
                .map(|(_, (header, value))| (header.to_string(), value.to_string()))
                .collect();

            rows.push(CastCrew { movie_id, fields });
        }

        tracing::debug!(
            table = %TableKind::CastCrew,
            path = %path.display(),
            row_count = rows.len(),
            "Loaded table from CSV"
        );

        Ok(rows.into())
    }

    fn version(&self, table: TableKind) -> AppResult<Option<SourceVersion>> {
        let metadata = fs::metadata(self.paths.for_table(table))?;
        Ok(Some(SourceVersion::from(&metadata)))
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

fn invalid_data(message: String) -> AppError {
    AppError::Io(io::Error::new(io::ErrorKind::InvalidData, message))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::Path;

    use super::DataPaths;

    pub const MOVIES_CSV: &str = "movieId,title,genres
1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
2,Jumanji (1995),Adventure|Children|Fantasy
3,Grumpier Old Men (1995),Comedy|Romance
4,Untitled Project,(no genres listed)
";

    pub const RATINGS_CSV: &str = "userId,movieId,rating,timestamp
1,1,4.0,964982703
1,3,4.0,964981247
1,999,5.0,964982224
2,2,3.5,1445714835
";

    pub const POSTER_LINKS_CSV: &str = "movieId,poster_link
1,https://image.tmdb.org/t/p/w500/toy_story.jpg
1,https://image.tmdb.org/t/p/w500/toy_story_alt.jpg
3,https://image.tmdb.org/t/p/w500/grumpier.jpg
";

    pub const CAST_CREW_CSV: &str = "movieId,director,cast
1,John Lasseter,Tom Hanks|Tim Allen
2,Joe Johnston,Robin Williams
";

    /// Writes a complete dataset under `dir`
    pub fn write_dataset(dir: &Path) -> DataPaths {
        let paths = DataPaths::new(dir);
        for path in paths.required() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
        }

        fs::write(&paths.movies, MOVIES_CSV).unwrap();
        fs::write(&paths.ratings, RATINGS_CSV).unwrap();
        fs::write(&paths.links, "movieId,imdbId,tmdbId\n1,0114709,862\n").unwrap();
        fs::write(&paths.tags, "userId,movieId,tag,timestamp\n").unwrap();
        fs::write(&paths.poster_links, POSTER_LINKS_CSV).unwrap();
        fs::write(&paths.cast_crew, CAST_CREW_CSV).unwrap();
        paths
    }
}

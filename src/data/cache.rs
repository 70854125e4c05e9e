use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::DataLoadError;
use super::model::{Movie, MovieRow, MovieTable, FIELD_SEPARATOR};

/// Flat on-disk form of one expanded row.
#[derive(Debug, Serialize, Deserialize)]
struct CachedRow {
    movie_id: usize,
    genre: String,
    title: String,
    cast: String,
    director: String,
    runtime: f64,
    production_companies: String,
    release_date: NaiveDate,
    release_month: u32,
    release_year: i32,
    vote_count: u32,
    vote_average: f64,
    popularity: f64,
    budget: Option<f64>,
    revenue: Option<f64>,
    budget_adj: f64,
    revenue_adj: f64,
    profit: f64,
}

impl From<&MovieRow> for CachedRow {
    fn from(row: &MovieRow) -> Self {
        let m = &row.movie;
        CachedRow {
            movie_id: m.movie_id,
            genre: row.genre.clone(),
            title: m.title.clone(),
            cast: m.cast.clone(),
            director: m.director.clone(),
            runtime: m.runtime,
            production_companies: m.production_companies.clone(),
            release_date: m.release_date,
            release_month: m.release_month,
            release_year: m.release_year,
            vote_count: m.vote_count,
            vote_average: m.vote_average,
            popularity: m.popularity,
            budget: m.budget,
            revenue: m.revenue,
            budget_adj: m.budget_adj,
            revenue_adj: m.revenue_adj,
            profit: m.profit,
        }
    }
}

impl CachedRow {
    fn into_movie(self, genres: String) -> Movie {
        Movie {
            movie_id: self.movie_id,
            title: self.title,
            cast: self.cast,
            director: self.director,
            runtime: self.runtime,
            genres,
            production_companies: self.production_companies,
            release_date: self.release_date,
            release_month: self.release_month,
            release_year: self.release_year,
            vote_count: self.vote_count,
            vote_average: self.vote_average,
            popularity: self.popularity,
            budget: self.budget,
            revenue: self.revenue,
            budget_adj: self.budget_adj,
            revenue_adj: self.revenue_adj,
            profit: self.profit,
        }
    }
}

fn cache_error(path: &Path, reason: impl ToString) -> DataLoadError {
    DataLoadError::Cache {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write expanded rows as flat CSV, one line per (movie, genre) pair.
///
/// Used both for the processed-table cache and for exporting a filtered
/// view. Missing parent directories are created.
pub fn write_rows<'a, I>(path: &Path, rows: I) -> Result<usize, DataLoadError>
where
    I: IntoIterator<Item = &'a MovieRow>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DataLoadError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| cache_error(path, e))?;
    let mut written = 0;
    for row in rows {
        writer
            .serialize(CachedRow::from(row))
            .map_err(|e| cache_error(path, e))?;
        written += 1;
    }
    writer.flush().map_err(|e| cache_error(path, e))?;

    log::debug!("wrote {written} rows to {}", path.display());
    Ok(written)
}

// ---------------------------------------------------------------------------
// Source stamp
// ---------------------------------------------------------------------------

/// Identity of the source file a cache was built from: canonical path,
/// modification time and length. A cache is only valid for an identical
/// stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStamp {
    pub path: String,
    pub modified_secs: u64,
    pub modified_nanos: u32,
    pub len: u64,
}

impl SourceStamp {
    /// Stamp the file currently at `path`.
    pub fn of(path: &Path) -> io::Result<Self> {
        let canonical = fs::canonicalize(path)?;
        let metadata = fs::metadata(&canonical)?;
        let modified = metadata
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map_err(io::Error::other)?;
        Ok(SourceStamp {
            path: canonical.to_string_lossy().into_owned(),
            modified_secs: modified.as_secs(),
            modified_nanos: modified.subsec_nanos(),
            len: metadata.len(),
        })
    }
}

/// Sidecar file holding the stamp of `cache_path`.
pub fn stamp_path(cache_path: &Path) -> PathBuf {
    let mut name = cache_path.as_os_str().to_owned();
    name.push(".source");
    PathBuf::from(name)
}

/// The stamp recorded next to a cache, if there is a readable one.
pub fn read_stamp(cache_path: &Path) -> Option<SourceStamp> {
    let mut reader = csv::Reader::from_path(stamp_path(cache_path)).ok()?;
    reader.deserialize::<SourceStamp>().next()?.ok()
}

/// Write `rows` as the cache for the source identified by `stamp`.
///
/// The old stamp is removed first and the new one written last, so an
/// interrupted write never leaves a cache that looks valid.
pub fn write_cache<'a, I>(
    cache_path: &Path,
    rows: I,
    stamp: &SourceStamp,
) -> Result<usize, DataLoadError>
where
    I: IntoIterator<Item = &'a MovieRow>,
{
    let sidecar = stamp_path(cache_path);
    match fs::remove_file(&sidecar) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(cache_error(&sidecar, e)),
    }

    let written = write_rows(cache_path, rows)?;

    let mut writer = csv::Writer::from_path(&sidecar).map_err(|e| cache_error(&sidecar, e))?;
    writer.serialize(stamp).map_err(|e| cache_error(&sidecar, e))?;
    writer.flush().map_err(|e| cache_error(&sidecar, e))?;
    Ok(written)
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read a table previously written by [`write_rows`].
///
/// Consecutive rows with the same `movie_id` are regrouped into one shared
/// `Movie` whose genre list is rebuilt from their tokens.
pub fn read_table(path: &Path) -> Result<MovieTable, DataLoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| cache_error(path, e))?;

    let mut groups: Vec<Vec<CachedRow>> = Vec::new();
    for result in reader.deserialize::<CachedRow>() {
        let cached = result.map_err(|e| cache_error(path, e))?;
        match groups.last_mut() {
            Some(group) if group[0].movie_id == cached.movie_id => group.push(cached),
            _ => groups.push(vec![cached]),
        }
    }

    let mut rows = Vec::new();
    for group in groups {
        let tokens: Vec<String> = group.iter().map(|r| r.genre.clone()).collect();
        let separator = FIELD_SEPARATOR.to_string();
        let mut group = group.into_iter();
        let Some(first) = group.next() else {
            continue;
        };
        let movie = Arc::new(first.into_movie(tokens.join(&separator)));
        for genre in tokens {
            rows.push(MovieRow {
                genre,
                movie: Arc::clone(&movie),
            });
        }
    }

    Ok(MovieTable::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::data::expand::expand_genres;
    use crate::data::model::fixtures::movie;

    fn sample_table() -> MovieTable {
        let mut first = movie(0, "Action|Adventure", (2015, 6, 9));
        first.cast = "Chris Pratt|Bryce Dallas Howard".to_string();
        first.budget = Some(150_000_000.0);
        first.budget_adj = 137_999_939.28;
        first.revenue_adj = 1_392_445_892.52;
        first.profit = first.revenue_adj - first.budget_adj;
        expand_genres(vec![
            first,
            movie(3, "", (1999, 2, 1)),
            movie(5, "Drama|Drama", (2003, 11, 30)),
        ])
    }

    #[test]
    fn round_trip_preserves_rows_and_genres() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("processed").join("movies.csv");
        let table = sample_table();

        let written = write_rows(&path, table.rows()).unwrap();
        assert_eq!(written, table.len());

        let restored = read_table(&path).unwrap();
        assert_eq!(restored.rows(), table.rows());
        assert_eq!(restored.genres(), table.genres());
        assert_eq!(restored.movie_count(), 3);
    }

    #[test]
    fn regrouped_rows_share_one_movie() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        write_rows(&path, sample_table().rows()).unwrap();

        let restored = read_table(&path).unwrap();
        assert!(Arc::ptr_eq(&restored.rows()[0].movie, &restored.rows()[1].movie));
        assert_eq!(restored.rows()[0].movie.genres, "Action|Adventure");
    }

    #[test]
    fn garbage_cache_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        fs::write(&path, "movie_id,genre\nnot-a-number,Drama\n").unwrap();

        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::Cache { .. }));
    }

    #[test]
    fn stamp_is_written_beside_the_cache() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("movies.csv");
        fs::write(&source, "anything").unwrap();
        let cache_path = dir.path().join("cache").join("processed.csv");

        let stamp = SourceStamp::of(&source).unwrap();
        assert_eq!(stamp.len, 8);
        assert!(read_stamp(&cache_path).is_none());

        write_cache(&cache_path, sample_table().rows(), &stamp).unwrap();
        assert_eq!(read_stamp(&cache_path), Some(stamp));
        assert_eq!(
            stamp_path(&cache_path),
            dir.path().join("cache").join("processed.csv.source")
        );
    }

    #[test]
    fn stamps_differ_between_sources() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, "same").unwrap();
        fs::write(&b, "same").unwrap();
        assert_ne!(SourceStamp::of(&a).unwrap(), SourceStamp::of(&b).unwrap());
    }
}

use std::path::{Path, PathBuf};

use super::cache::{self, SourceStamp};
use super::error::DataLoadError;
use super::expand::expand_genres;
use super::loader::read_raw;
use super::model::MovieTable;
use super::normalize::normalize;

/// Where the base table comes from.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Raw source CSV.
    pub source: PathBuf,
    /// Processed-table cache; `None` disables it.
    pub cache: Option<PathBuf>,
}

/// The immutable dataset every view is computed from. Built once at
/// startup and shared read-only with the UI.
#[derive(Debug)]
pub struct DataContext {
    pub table: MovieTable,
    pub source: PathBuf,
    pub from_cache: bool,
}

impl DataContext {
    /// Wrap an already built table.
    pub fn new(table: MovieTable, source: PathBuf) -> Self {
        DataContext {
            table,
            source,
            from_cache: false,
        }
    }
}

/// Run loader, normalizer and expander on a source file.
pub fn build_table(source: &Path) -> Result<MovieTable, DataLoadError> {
    let raw = read_raw(source)?;
    let movies = normalize(raw)?;
    Ok(expand_genres(movies))
}

/// Build the base table, going through the processed cache when allowed.
///
/// The source must exist even when a cache is present. The cache is used
/// only when its recorded source stamp (canonical path, mtime, length)
/// matches the source; otherwise, or when it is unreadable, the table is
/// rebuilt. Failing to write the cache only logs a warning.
pub fn load_context(options: &LoadOptions) -> Result<DataContext, DataLoadError> {
    let stamp = SourceStamp::of(&options.source).map_err(|source| DataLoadError::Io {
        path: options.source.clone(),
        source,
    })?;

    if let Some(cache_path) = &options.cache {
        match cache::read_stamp(cache_path) {
            Some(recorded) if recorded == stamp => match cache::read_table(cache_path) {
                Ok(table) => {
                    log::info!(
                        "loaded {} rows from cache {}",
                        table.len(),
                        cache_path.display()
                    );
                    return Ok(DataContext {
                        table,
                        source: options.source.clone(),
                        from_cache: true,
                    });
                }
                Err(e) => log::warn!("ignoring cache: {e}"),
            },
            Some(recorded) => log::info!(
                "cache {} was built from {}, rebuilding",
                cache_path.display(),
                recorded.path
            ),
            None => log::debug!("no usable cache at {}", cache_path.display()),
        }
    }

    let table = build_table(&options.source)?;
    log::info!(
        "built {} rows ({} movies, {} genres) from {}",
        table.len(),
        table.movie_count(),
        table.genres().len(),
        options.source.display()
    );

    if let Some(cache_path) = &options.cache {
        if let Err(e) = cache::write_cache(cache_path, table.rows(), &stamp) {
            log::warn!("could not write cache: {e}");
        }
    }

    Ok(DataContext::new(table, options.source.clone()))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::time::{Duration, SystemTime};

    use tempfile::tempdir;

    use super::*;
    use crate::data::loader::tests::HEADER;

    const ROWS: [&str; 4] = [
        "1,32.98,150000000,1513528810,Jurassic World,Chris Pratt|Bryce Dallas Howard|Irrfan Khan,Colin Trevorrow,124,Action|Adventure|Science Fiction|Thriller,Universal Studios,6/9/2015,5562,6.5,2015,137999939.3,1392445893",
        "2,28.41,150000000,378436354,Mad Max: Fury Road,Tom Hardy|Charlize Theron,George Miller,120,Action|Adventure,Village Roadshow Pictures,5/13/2015,6185,7.1,2015,137999939.3,348161292.5",
        "3,0.2,0,0,Unknown Money,Someone,Nobody,90,Drama,,1/1/1980,10,5.0,1980,0,0",
        "4,1.1,1000,2000,Genreless,Chris Pratt,Someone,80,,,12/31/2000,40,6.0,2000,1500,3000",
    ];

    fn write_source(dir: &Path) -> PathBuf {
        write_named_source(dir, "movies.csv", &ROWS)
    }

    fn write_named_source(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut body = String::from(HEADER);
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        body.push('\n');
        fs::write(&path, body).unwrap();
        path
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn builds_the_base_table() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path());

        let table = build_table(&source).unwrap();
        assert_eq!(table.movie_count(), 3);
        assert_eq!(table.len(), 4 + 2 + 1);
        assert!(table.genres().contains(""));
        for row in table.rows() {
            assert_ne!(row.movie.budget_adj, 0.0);
            assert_ne!(row.movie.revenue_adj, 0.0);
            assert_eq!(row.movie.profit, row.movie.revenue_adj - row.movie.budget_adj);
        }
    }

    #[test]
    fn missing_source_is_fatal_even_with_cache() {
        let dir = tempdir().unwrap();
        let options = LoadOptions {
            source: dir.path().join("absent.csv"),
            cache: Some(dir.path().join("cache.csv")),
        };
        let err = load_context(&options).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn writes_then_reuses_the_cache() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path());
        let cache_path = dir.path().join("processed").join("movies.csv");
        let options = LoadOptions {
            source,
            cache: Some(cache_path.clone()),
        };

        let first = load_context(&options).unwrap();
        assert!(!first.from_cache);
        assert!(cache_path.exists());
        assert!(cache::stamp_path(&cache_path).exists());

        let second = load_context(&options).unwrap();
        assert!(second.from_cache);
        assert_eq!(second.table.rows(), first.table.rows());
    }

    #[test]
    fn cache_of_another_source_is_not_served() {
        let dir = tempdir().unwrap();
        let row = |title: &str| {
            format!("1,1.0,10,20,{title},Someone,Director,90,Drama,Co,3/4/2001,20,7.1,2001,10,20")
        };
        let alpha = write_named_source(dir.path(), "a.csv", &[&row("Alpha")]);
        let beta = write_named_source(dir.path(), "b.csv", &[&row("Beta")]);
        set_mtime(&beta, SystemTime::now() - Duration::from_secs(3600));
        let cache_path = dir.path().join("shared-cache.csv");

        let titles = |context: &DataContext| -> Vec<String> {
            context.table.rows().iter().map(|r| r.movie.title.clone()).collect()
        };

        let a = load_context(&LoadOptions {
            source: alpha.clone(),
            cache: Some(cache_path.clone()),
        })
        .unwrap();
        assert_eq!(titles(&a), vec!["Alpha"]);

        let b = load_context(&LoadOptions {
            source: beta,
            cache: Some(cache_path.clone()),
        })
        .unwrap();
        assert!(!b.from_cache);
        assert_eq!(titles(&b), vec!["Beta"]);

        // The cache now belongs to b.csv, so a.csv is rebuilt too.
        let again = load_context(&LoadOptions {
            source: alpha,
            cache: Some(cache_path),
        })
        .unwrap();
        assert!(!again.from_cache);
        assert_eq!(titles(&again), vec!["Alpha"]);
    }

    #[test]
    fn edited_source_invalidates_the_cache() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path());
        let cache_path = dir.path().join("cache.csv");
        let options = LoadOptions {
            source: source.clone(),
            cache: Some(cache_path),
        };
        load_context(&options).unwrap();

        write_named_source(dir.path(), "movies.csv", &ROWS[..2]);
        set_mtime(&source, SystemTime::now() - Duration::from_secs(7200));

        let context = load_context(&options).unwrap();
        assert!(!context.from_cache);
        assert_eq!(context.table.movie_count(), 2);
    }

    #[test]
    fn unstamped_cache_is_rebuilt() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path());
        let cache_path = dir.path().join("cache.csv");
        fs::write(&cache_path, "movie_id,genre\n").unwrap();

        let options = LoadOptions {
            source,
            cache: Some(cache_path.clone()),
        };
        let context = load_context(&options).unwrap();
        assert!(!context.from_cache);
        assert_eq!(context.table.movie_count(), 3);
        assert!(cache::read_stamp(&cache_path).is_some());
    }

    #[test]
    fn rebuilding_is_byte_identical() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path());
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");

        cache::write_rows(&a, build_table(&source).unwrap().rows()).unwrap();
        cache::write_rows(&b, build_table(&source).unwrap().rows()).unwrap();

        assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
    }
}

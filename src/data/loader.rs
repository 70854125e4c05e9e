use std::fs::File;
use std::path::Path;

use super::error::DataLoadError;
use super::model::RawMovie;

/// Columns every source file must carry. `title` may also be spelled
/// `original_title` (the TMDB export name).
pub const REQUIRED_COLUMNS: [&str; 13] = [
    "title",
    "cast",
    "director",
    "runtime",
    "genres",
    "production_companies",
    "release_date",
    "vote_count",
    "vote_average",
    "release_year",
    "budget_adj",
    "revenue_adj",
    "popularity",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read the source CSV into raw records.
///
/// The whole file is rejected when it cannot be opened, lacks a required
/// column, or any record has the wrong field count or an unparseable
/// numeric field.
pub fn read_raw(path: &Path) -> Result<Vec<RawMovie>, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| DataLoadError::Record { row: 0, source })?
        .clone();
    check_columns(path, &headers)?;

    let mut movies = Vec::new();
    for (i, result) in reader.deserialize::<RawMovie>().enumerate() {
        let movie = result.map_err(|source| DataLoadError::Record { row: i + 1, source })?;
        movies.push(movie);
    }

    log::debug!("read {} raw records from {}", movies.len(), path.display());
    Ok(movies)
}

fn check_columns(path: &Path, headers: &csv::StringRecord) -> Result<(), DataLoadError> {
    let has = |name: &str| headers.iter().any(|h| h == name);
    for column in REQUIRED_COLUMNS {
        let present = match column {
            "title" => has("title") || has("original_title"),
            other => has(other),
        };
        if !present {
            return Err(DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }
    Ok(())
}

use chrono::{Datelike, NaiveDate};

use super::error::DataLoadError;
use super::model::{Movie, RawMovie};

/// Textual layout of `release_date` in the source file.
pub const RELEASE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Clean raw records into movies.
///
/// Records with a zero adjusted budget or revenue carry no usable financial
/// data and are dropped silently. Every kept record must have a parseable
/// release date; one bad date fails the whole batch. `movie_id` is the
/// record's position in `raw`, so ids survive the filtering.
pub fn normalize(raw: Vec<RawMovie>) -> Result<Vec<Movie>, DataLoadError> {
    let total = raw.len();
    let mut movies = Vec::with_capacity(total);

    for (movie_id, record) in raw.into_iter().enumerate() {
        if record.budget_adj == 0.0 || record.revenue_adj == 0.0 {
            continue;
        }

        let release_date = NaiveDate::parse_from_str(record.release_date.trim(), RELEASE_DATE_FORMAT)
            .map_err(|source| DataLoadError::InvalidDate {
                row: movie_id + 1,
                value: record.release_date.clone(),
                source,
            })?;

        movies.push(Movie {
            movie_id,
            profit: record.revenue_adj - record.budget_adj,
            release_month: release_date.month(),
            release_date,
            title: record.title,
            cast: record.cast,
            director: record.director,
            runtime: record.runtime,
            genres: record.genres,
            production_companies: record.production_companies,
            release_year: record.release_year,
            vote_count: record.vote_count,
            vote_average: record.vote_average,
            popularity: record.popularity,
            budget: record.budget,
            revenue: record.revenue,
            budget_adj: record.budget_adj,
            revenue_adj: record.revenue_adj,
        });
    }

    log::debug!(
        "normalized {} of {} records ({} without financial data)",
        movies.len(),
        total,
        total - movies.len()
    );
    Ok(movies)
}

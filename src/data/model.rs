use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

/// Separator used by the multi-valued text fields (`genres`, `cast`,
/// `production_companies`).
pub const FIELD_SEPARATOR: char = '|';

/// Split a pipe-delimited field into its tokens.
///
/// An empty field yields a single empty token, never zero tokens.
pub fn split_tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split(FIELD_SEPARATOR)
}

// ---------------------------------------------------------------------------
// RawMovie – one record of the source CSV
// ---------------------------------------------------------------------------

/// A record exactly as it appears in the source file, before cleaning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMovie {
    #[serde(alias = "original_title")]
    pub title: String,
    pub cast: String,
    pub director: String,
    pub runtime: f64,
    pub genres: String,
    pub production_companies: String,
    /// `month/day/year` text, parsed during normalization.
    pub release_date: String,
    pub vote_count: u32,
    pub vote_average: f64,
    pub release_year: i32,
    /// Unadjusted figures are optional in the source.
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub revenue: Option<f64>,
    pub budget_adj: f64,
    pub revenue_adj: f64,
    pub popularity: f64,
}

// ---------------------------------------------------------------------------
// Movie – a normalized record
// ---------------------------------------------------------------------------

/// A movie that passed normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    /// Zero-based position of the record in the source file.
    pub movie_id: usize,
    pub title: String,
    pub cast: String,
    pub director: String,
    pub runtime: f64,
    /// Pipe-delimited genre list, as in the source.
    pub genres: String,
    pub production_companies: String,
    pub release_date: NaiveDate,
    /// 1–12, derived from `release_date`.
    pub release_month: u32,
    pub release_year: i32,
    pub vote_count: u32,
    pub vote_average: f64,
    pub popularity: f64,
    pub budget: Option<f64>,
    pub revenue: Option<f64>,
    pub budget_adj: f64,
    pub revenue_adj: f64,
    /// `revenue_adj - budget_adj`.
    pub profit: f64,
}

// ---------------------------------------------------------------------------
// MovieRow – one (movie, genre) pair
// ---------------------------------------------------------------------------

/// One expanded row. Rows expanded from the same movie share the same
/// `Movie` and therefore the same `movie_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRow {
    pub genre: String,
    pub movie: Arc<Movie>,
}

// ---------------------------------------------------------------------------
// MovieTable – the base table
// ---------------------------------------------------------------------------

/// The immutable, normalized and expanded dataset.
#[derive(Debug, Clone, Default)]
pub struct MovieTable {
    rows: Vec<MovieRow>,
    genres: BTreeSet<String>,
}

impl MovieTable {
    /// Build the table and its genre index from expanded rows.
    pub fn from_rows(rows: Vec<MovieRow>) -> Self {
        let genres = rows.iter().map(|row| row.genre.clone()).collect();
        MovieTable { rows, genres }
    }

    pub fn rows(&self) -> &[MovieRow] {
        &self.rows
    }

    /// Iterate the rows selected by a filtered index view.
    pub fn rows_at<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a MovieRow> + 'a {
        indices.iter().filter_map(|&i| self.rows.get(i))
    }

    /// Every distinct genre token observed during expansion.
    pub fn genres(&self) -> &BTreeSet<String> {
        &self.genres
    }

    /// Number of expanded rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct source movies.
    pub fn movie_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.movie.movie_id)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Smallest and largest `release_year`, if any rows exist.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let years = self.rows.iter().map(|row| row.movie.release_year);
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }

    /// Smallest and largest `budget_adj`, if any rows exist.
    pub fn budget_bounds(&self) -> Option<(f64, f64)> {
        self.rows.iter().map(|row| row.movie.budget_adj).fold(None, |acc, b| match acc {
            None => Some((b, b)),
            Some((lo, hi)) => Some((lo.min(b), hi.max(b))),
        })
    }
}

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use super::model::{MovieRow, MovieTable};

// ---------------------------------------------------------------------------
// Range predicates
// ---------------------------------------------------------------------------

/// Inclusive range of release years.
///
/// A row matches when the calendar year of its `release_date` lies in
/// `[min, max]`, i.e. `Jan 1 of min <= release_date <= Dec 31 of max`.
/// An inverted range matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        YearRange { min, max }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.min..=self.max).contains(&date.year())
    }
}

/// Inclusive range over `budget_adj`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    pub fn new(min: f64, max: f64) -> Self {
        BudgetRange { min, max }
    }

    pub fn contains(&self, budget: f64) -> bool {
        budget >= self.min && budget <= self.max
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// A predicate over expanded rows.
pub trait RowFilter {
    fn matches(&self, row: &MovieRow) -> bool;
}

/// Dashboard query: year range plus a multi-genre selection.
///
/// An empty genre selection selects nothing, it is not "no filter".
#[derive(Debug, Clone, PartialEq)]
pub struct GenreQuery {
    pub years: YearRange,
    pub genres: BTreeSet<String>,
}

impl RowFilter for GenreQuery {
    fn matches(&self, row: &MovieRow) -> bool {
        self.years.contains(row.movie.release_date) && self.genres.contains(&row.genre)
    }
}

/// Actor drill-down query: one genre, a budget window and the year range.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorQuery {
    pub years: YearRange,
    pub genre: String,
    pub budget: BudgetRange,
}

impl RowFilter for ActorQuery {
    fn matches(&self, row: &MovieRow) -> bool {
        row.genre == self.genre
            && self.years.contains(row.movie.release_date)
            && self.budget.contains(row.movie.budget_adj)
    }
}

/// Return indices of rows that satisfy `query`. The table is not touched.
pub fn filtered_indices<Q: RowFilter>(table: &MovieTable, query: &Q) -> Vec<usize> {
    table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| query.matches(row))
        .map(|(i, _)| i)
        .collect()
}

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures while building the base table.
///
/// None of these are retried: the source is a local static file, so a
/// failure is reported once and the process stops before the UI opens.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("malformed record at row {row}")]
    Record {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("row {row}: release date '{value}' is not in month/day/year form")]
    InvalidDate {
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("processed cache {} is unusable: {reason}", path.display())]
    Cache { path: PathBuf, reason: String },
}

use std::sync::Arc;

use super::model::{split_tokens, Movie, MovieRow, MovieTable};

/// Explode each movie's pipe-delimited genre list into one row per genre.
///
/// A movie with N tokens yields N rows sharing the same `Movie`. An empty
/// genre field is a single empty token and still yields one row. Repeated
/// tokens are kept as repeated rows. Source order is preserved.
pub fn expand_genres(movies: Vec<Movie>) -> MovieTable {
    let mut rows = Vec::with_capacity(movies.len());
    for movie in movies {
        let movie = Arc::new(movie);
        for genre in split_tokens(&movie.genres) {
            rows.push(MovieRow {
                genre: genre.to_string(),
                movie: Arc::clone(&movie),
            });
        }
    }
    MovieTable::from_rows(rows)
}

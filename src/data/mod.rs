/// Data layer: loading, cleaning, expansion, querying and summaries.
///
/// Architecture:
/// ```text
///  tmdb_movies_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawMovie>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  drop zero-money rows, parse dates → Vec<Movie>
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  expand   │  one row per (movie, genre) → MovieTable
///   └──────────┘          │
///        │                └──► cache (processed CSV)
///        ▼
///   ┌──────────┐
///   │  filter   │  year / genre / budget predicates → row indices
///   └──────────┘
///        │
///        ├──► aggregate  (chart series, heatmap)
///        └──► actors     (cast frequency ranking)
/// ```

pub mod actors;
pub mod aggregate;
pub mod cache;
pub mod context;
pub mod error;
pub mod expand;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;

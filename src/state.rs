use std::collections::BTreeSet;
use std::sync::Arc;

use crate::color::GenreColors;
use crate::data::actors::{rank_actors, top_actors, ActorCount};
use crate::data::context::DataContext;
use crate::data::filter::{filtered_indices, ActorQuery, BudgetRange, GenreQuery, YearRange};

/// Year range shown before the user touches the sliders.
pub const DEFAULT_YEARS: (i32, i32) = (2000, 2010);

/// How the actor table slices the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorTableOptions {
    /// Entries shown.
    pub count: usize,
    /// Leading ranks left out.
    pub skip: usize,
}

impl Default for ActorTableOptions {
    fn default() -> Self {
        ActorTableOptions { count: 5, skip: 0 }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Immutable base table, shared with every view.
    pub context: Arc<DataContext>,

    pub years: YearRange,

    /// Genres shown in the charts.
    pub selected_genres: BTreeSet<String>,

    /// Genre the actor table drills into; always one of `selected_genres`.
    pub drill_genre: Option<String>,

    pub budget: BudgetRange,

    pub actor_options: ActorTableOptions,

    /// Indices of rows passing the dashboard query.
    pub visible_indices: Vec<usize>,

    /// Actors shown in the drill-down table.
    pub top_actors: Vec<ActorCount>,

    pub colors: GenreColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(context: Arc<DataContext>, actor_options: ActorTableOptions) -> Self {
        let table = &context.table;
        let selected_genres = table.genres().clone();
        let (lo, hi) = table.year_bounds().unwrap_or(DEFAULT_YEARS);
        let years = YearRange::new(DEFAULT_YEARS.0.clamp(lo, hi), DEFAULT_YEARS.1.clamp(lo, hi));
        let (b_lo, b_hi) = table.budget_bounds().unwrap_or((0.0, 0.0));
        let colors = GenreColors::new(table.genres());

        let mut state = AppState {
            context,
            years,
            selected_genres,
            drill_genre: None,
            budget: BudgetRange::new(b_lo, b_hi),
            actor_options,
            visible_indices: Vec::new(),
            top_actors: Vec::new(),
            colors,
            status_message: None,
        };
        state.sync_drill_genre();
        state.refilter();
        state
    }

    /// Recompute every view from the base table.
    pub fn refilter(&mut self) {
        let table = &self.context.table;
        let query = GenreQuery {
            years: self.years,
            genres: self.selected_genres.clone(),
        };
        self.visible_indices = filtered_indices(table, &query);

        self.top_actors = match &self.drill_genre {
            Some(genre) => {
                let query = ActorQuery {
                    years: self.years,
                    genre: genre.clone(),
                    budget: self.budget,
                };
                let indices = filtered_indices(table, &query);
                let ranking = rank_actors(table.rows_at(&indices));
                top_actors(&ranking, self.actor_options.skip, self.actor_options.count).to_vec()
            }
            None => Vec::new(),
        };

        log::debug!(
            "refilter: years {}-{}, {} genres → {} rows, {} actors",
            self.years.min,
            self.years.max,
            self.selected_genres.len(),
            self.visible_indices.len(),
            self.top_actors.len()
        );
    }

    /// Keep the drill-down genre inside the current selection, falling back
    /// to the first selected genre.
    fn sync_drill_genre(&mut self) {
        let still_selected = self
            .drill_genre
            .as_ref()
            .is_some_and(|g| self.selected_genres.contains(g));
        if !still_selected {
            self.drill_genre = self.selected_genres.iter().next().cloned();
        }
    }

    pub fn set_years(&mut self, years: YearRange) {
        self.years = years;
        self.refilter();
    }

    pub fn set_budget(&mut self, budget: BudgetRange) {
        self.budget = budget;
        self.refilter();
    }

    /// Toggle a single genre in the selection.
    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.selected_genres.remove(genre) {
            self.selected_genres.insert(genre.to_string());
        }
        self.sync_drill_genre();
        self.refilter();
    }

    /// Select every observed genre.
    pub fn select_all(&mut self) {
        self.selected_genres = self.context.table.genres().clone();
        self.sync_drill_genre();
        self.refilter();
    }

    /// Deselect every genre.
    pub fn select_none(&mut self) {
        self.selected_genres.clear();
        self.sync_drill_genre();
        self.refilter();
    }

    /// Pick the drill-down genre; ignored unless it is selected.
    pub fn set_drill_genre(&mut self, genre: &str) {
        if self.selected_genres.contains(genre) {
            self.drill_genre = Some(genre.to_string());
            self.refilter();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::expand::expand_genres;
    use crate::data::model::fixtures::movie;

    fn state() -> AppState {
        let mut a = movie(0, "Action|Drama", (2005, 5, 5));
        a.cast = "Star|Sidekick".to_string();
        let mut b = movie(1, "Action", (2008, 8, 8));
        b.cast = "Star|Villain".to_string();
        b.budget_adj = 5_000_000.0;
        let mut c = movie(2, "Comedy", (1995, 1, 1));
        c.cast = "Clown".to_string();
        let table = expand_genres(vec![a, b, c]);
        let context = Arc::new(DataContext::new(table, PathBuf::from("movies.csv")));
        AppState::new(context, ActorTableOptions::default())
    }

    fn actor_names(state: &AppState) -> Vec<&str> {
        state.top_actors.iter().map(|a| a.actor.as_str()).collect()
    }

    #[test]
    fn defaults_select_everything_in_default_years() {
        let state = state();
        assert_eq!(state.selected_genres.len(), 3);
        assert_eq!(state.years, YearRange::new(2000, 2008));
        assert_eq!(state.budget, BudgetRange::new(1_000_000.0, 5_000_000.0));
        assert_eq!(state.drill_genre.as_deref(), Some("Action"));
        assert_eq!(state.visible_indices.len(), 3);
        assert_eq!(actor_names(&state), vec!["Star", "Sidekick", "Villain"]);
    }

    #[test]
    fn select_none_empties_every_view() {
        let mut state = state();
        state.select_none();
        assert!(state.visible_indices.is_empty());
        assert!(state.drill_genre.is_none());
        assert!(state.top_actors.is_empty());

        state.select_all();
        assert_eq!(state.visible_indices.len(), 3);
        assert_eq!(state.drill_genre.as_deref(), Some("Action"));
    }

    #[test]
    fn drill_genre_follows_selection() {
        let mut state = state();
        state.toggle_genre("Action");
        assert_eq!(state.drill_genre.as_deref(), Some("Comedy"));

        state.set_drill_genre("Drama");
        assert_eq!(state.drill_genre.as_deref(), Some("Drama"));
        assert_eq!(actor_names(&state), vec!["Star", "Sidekick"]);

        state.set_drill_genre("Action");
        assert_eq!(state.drill_genre.as_deref(), Some("Drama"));
    }

    #[test]
    fn budget_window_narrows_actor_table() {
        let mut state = state();
        state.set_budget(BudgetRange::new(0.0, 2_000_000.0));
        assert_eq!(actor_names(&state), vec!["Star", "Sidekick"]);
    }

    #[test]
    fn widening_years_brings_rows_back() {
        let mut state = state();
        state.set_years(YearRange::new(1990, 2010));
        assert_eq!(state.visible_indices.len(), 4);
    }

    #[test]
    fn skip_option_drops_leading_actor() {
        let mut state = state();
        state.actor_options = ActorTableOptions { count: 5, skip: 1 };
        state.refilter();
        assert_eq!(actor_names(&state), vec!["Sidekick", "Villain"]);
    }
}

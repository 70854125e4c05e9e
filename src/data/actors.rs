use std::collections::HashMap;

use super::model::{split_tokens, MovieRow};

/// How many movies in a view an actor appears in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorCount {
    pub actor: String,
    pub count: usize,
}

/// Count cast members across `rows` and rank them by frequency.
///
/// Ties keep the order in which actors were first met while walking the
/// rows' cast lists in sequence. Names are compared verbatim, so `" B"`
/// and `"B"` are different actors; empty names are skipped.
pub fn rank_actors<'a, I>(rows: I) -> Vec<ActorCount>
where
    I: IntoIterator<Item = &'a MovieRow>,
{
    let mut ranking: Vec<ActorCount> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        for name in split_tokens(&row.movie.cast) {
            if name.is_empty() {
                continue;
            }
            match positions.get(name) {
                Some(&i) => ranking[i].count += 1,
                None => {
                    positions.insert(name.to_string(), ranking.len());
                    ranking.push(ActorCount {
                        actor: name.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    // sort_by is stable: equal counts stay in encounter order.
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking
}

/// The slice of a ranking shown in the actor table: `n` entries after
/// skipping the first `skip`.
pub fn top_actors(ranking: &[ActorCount], skip: usize, n: usize) -> &[ActorCount] {
    let start = skip.min(ranking.len());
    let end = start.saturating_add(n).min(ranking.len());
    &ranking[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{movie, row};

    fn cast_rows(casts: &[&str]) -> Vec<MovieRow> {
        casts
            .iter()
            .enumerate()
            .map(|(i, cast)| {
                let mut m = movie(i, "Drama", (2000, 1, 1));
                m.cast = cast.to_string();
                row("Drama", m)
            })
            .collect()
    }

    fn counts(ranking: &[ActorCount]) -> Vec<(&str, usize)> {
        ranking.iter().map(|a| (a.actor.as_str(), a.count)).collect()
    }

    #[test]
    fn ranks_by_frequency_with_encounter_order_ties() {
        let rows = cast_rows(&["A|B", "B|C", "B"]);
        let ranking = rank_actors(&rows);
        assert_eq!(counts(&ranking), vec![("B", 3), ("A", 1), ("C", 1)]);
    }

    #[test]
    fn blank_cast_entries_are_ignored() {
        let rows = cast_rows(&["", "X||Y", "Y"]);
        let ranking = rank_actors(&rows);
        assert_eq!(counts(&ranking), vec![("Y", 2), ("X", 1)]);
    }

    #[test]
    fn names_are_counted_verbatim() {
        let rows = cast_rows(&["A| B", "B", " B|B"]);
        let ranking = rank_actors(&rows);
        assert_eq!(counts(&ranking), vec![(" B", 2), ("B", 2), ("A", 1)]);
    }

    #[test]
    fn empty_view_ranks_nobody() {
        assert!(rank_actors(&Vec::<MovieRow>::new()).is_empty());
    }

    #[test]
    fn top_actors_default_shows_leaders() {
        let rows = cast_rows(&["A|B|C|D|E|F|G", "A|B|C", "A"]);
        let ranking = rank_actors(&rows);
        let shown = top_actors(&ranking, 0, 5);
        assert_eq!(
            counts(shown),
            vec![("A", 3), ("B", 2), ("C", 2), ("D", 1), ("E", 1)]
        );
    }

    #[test]
    fn top_actors_can_skip_the_leader() {
        let rows = cast_rows(&["A|B|C|D|E|F|G", "A|B|C", "A"]);
        let ranking = rank_actors(&rows);
        let shown = top_actors(&ranking, 1, 5);
        assert_eq!(
            counts(shown),
            vec![("B", 2), ("C", 2), ("D", 1), ("E", 1), ("F", 1)]
        );
    }

    #[test]
    fn top_actors_clamps_to_ranking_length() {
        let rows = cast_rows(&["A|B"]);
        let ranking = rank_actors(&rows);
        assert_eq!(top_actors(&ranking, 1, 5).len(), 1);
        assert!(top_actors(&ranking, 3, 5).is_empty());
    }
}

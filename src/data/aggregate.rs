//! Chart-ready summaries of a filtered view.

use std::collections::BTreeMap;

use super::model::MovieRow;

// ---------------------------------------------------------------------------
// Per-genre line series
// ---------------------------------------------------------------------------

/// One line of a per-genre chart: `[x, y]` points sorted by x.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreSeries {
    pub genre: String,
    pub points: Vec<[f64; 2]>,
}

/// Mean `budget_adj` per `release_year`, one series per genre.
pub fn mean_budget_by_year<'a, I>(rows: I) -> Vec<GenreSeries>
where
    I: IntoIterator<Item = &'a MovieRow>,
{
    let mut sums: BTreeMap<&str, BTreeMap<i32, (f64, usize)>> = BTreeMap::new();
    for row in rows {
        let slot = sums
            .entry(row.genre.as_str())
            .or_default()
            .entry(row.movie.release_year)
            .or_insert((0.0, 0));
        slot.0 += row.movie.budget_adj;
        slot.1 += 1;
    }

    sums.into_iter()
        .map(|(genre, years)| GenreSeries {
            genre: genre.to_string(),
            points: years
                .into_iter()
                .map(|(year, (sum, n))| [year as f64, sum / n as f64])
                .collect(),
        })
        .collect()
}

/// Median `profit` per `release_month`, one series per genre.
pub fn median_profit_by_month<'a, I>(rows: I) -> Vec<GenreSeries>
where
    I: IntoIterator<Item = &'a MovieRow>,
{
    let mut profits: BTreeMap<&str, BTreeMap<u32, Vec<f64>>> = BTreeMap::new();
    for row in rows {
        profits
            .entry(row.genre.as_str())
            .or_default()
            .entry(row.movie.release_month)
            .or_default()
            .push(row.movie.profit);
    }

    profits
        .into_iter()
        .map(|(genre, months)| GenreSeries {
            genre: genre.to_string(),
            points: months
                .into_iter()
                .map(|(month, mut values)| [month as f64, median(&mut values)])
                .collect(),
        })
        .collect()
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

// ---------------------------------------------------------------------------
// Vote-average heatmap
// ---------------------------------------------------------------------------

/// Row count for one (genre, vote bin) cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    pub genre: String,
    /// Lower edge of the bin; the bin spans `[bin_start, bin_start + step)`.
    pub bin_start: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoteHeatmap {
    pub step: f64,
    /// Genres present, sorted; a cell's row is its genre's index here.
    pub genres: Vec<String>,
    pub cells: Vec<HeatmapCell>,
}

impl VoteHeatmap {
    pub fn max_count(&self) -> usize {
        self.cells.iter().map(|c| c.count).max().unwrap_or(0)
    }
}

/// Bin `vote_average` into at most `max_bins` equal-width bins and count
/// rows per (genre, bin).
pub fn vote_heatmap<'a, I>(rows: I, max_bins: usize) -> VoteHeatmap
where
    I: IntoIterator<Item = &'a MovieRow>,
{
    let rows: Vec<&MovieRow> = rows.into_iter().collect();
    let Some((lo, hi)) = rows.iter().map(|r| r.movie.vote_average).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
    }) else {
        return VoteHeatmap::default();
    };

    // Aligning `start` down to the step can push the extent past `max_bins`
    // steps; widen the step until the aligned range fits.
    let max_bins = max_bins.max(1);
    let mut step = nice_step(hi - lo, max_bins);
    let (start, n_bins) = loop {
        let start = (lo / step).floor() * step;
        let n_bins = (((hi - start) / step).ceil() as usize).max(1);
        if n_bins <= max_bins {
            break (start, n_bins);
        }
        step = nice_step(hi - start, max_bins);
    };

    let mut counts: BTreeMap<(&str, usize), usize> = BTreeMap::new();
    for row in &rows {
        let bin = (((row.movie.vote_average - start) / step).floor() as usize).min(n_bins - 1);
        *counts.entry((row.genre.as_str(), bin)).or_insert(0) += 1;
    }

    let mut genres: Vec<String> = counts.keys().map(|(g, _)| g.to_string()).collect();
    genres.dedup();

    VoteHeatmap {
        step,
        genres,
        cells: counts
            .into_iter()
            .map(|((genre, bin), count)| HeatmapCell {
                genre: genre.to_string(),
                bin_start: start + bin as f64 * step,
                count,
            })
            .collect(),
    }
}

/// Smallest step of the form {1, 2, 5} × 10^k that covers `extent` in at
/// most `max_bins` bins.
fn nice_step(extent: f64, max_bins: usize) -> f64 {
    if extent <= 0.0 || max_bins == 0 {
        return 1.0;
    }
    let raw = extent / max_bins as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw)
        .unwrap_or(10.0 * magnitude)
}

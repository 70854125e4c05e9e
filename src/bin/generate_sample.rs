//! Writes a deterministic, TMDB-shaped movie CSV for trying the dashboard
//! without the real dataset. Run with `--help` for the arguments.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(about = "Write a synthetic TMDB-style movie CSV")]
struct Args {
    /// Where to write the CSV; parent directories are created.
    #[clap(default_value = "data/raw/tmdb_movies_data.csv")]
    output: PathBuf,

    /// Number of movies to generate.
    #[clap(default_value_t = 2000, value_parser = clap::value_parser!(u64).range(1..))]
    count: u64,
}

const GENRES: [&str; 12] = [
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Drama",
    "Family",
    "Fantasy",
    "Horror",
    "Romance",
    "Science Fiction",
    "Thriller",
];

const FIRST_NAMES: [&str; 10] = [
    "Ava", "Ben", "Chloe", "Dev", "Elena", "Farid", "Grace", "Hugo", "Iris", "Jonas",
];
const LAST_NAMES: [&str; 8] = [
    "Moreno", "Okafor", "Lindqvist", "Tanaka", "Brennan", "Costa", "Weber", "Shah",
];
const STUDIOS: [&str; 5] = [
    "Northlight Pictures",
    "Harbor Films",
    "Red Canyon",
    "Blue Owl Studios",
    "Meridian",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

/// 1–3 distinct genres, occasionally none.
fn genres(rng: &mut SimpleRng) -> String {
    if rng.next_f64() < 0.03 {
        return String::new();
    }
    let n = 1 + rng.below(3);
    let mut picked: Vec<&str> = Vec::new();
    while picked.len() < n {
        let g = rng.pick(&GENRES);
        if !picked.contains(&g) {
            picked.push(g);
        }
    }
    picked.join("|")
}

fn cast(rng: &mut SimpleRng) -> String {
    (0..1 + rng.below(5))
        .map(|_| format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES)))
        .collect::<Vec<_>>()
        .join("|")
}

fn main() -> Result<()> {
    let Args { output, count } = Args::parse();

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    writer.write_record([
        "id",
        "popularity",
        "budget",
        "revenue",
        "original_title",
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
    ])?;

    for id in 1..=count {
        let year = 1960 + rng.below(56) as i32;
        let month = 1 + rng.below(12);
        let day = 1 + rng.below(28);

        // About one in five movies has no financial data, like the real set.
        let (budget, revenue) = if rng.next_f64() < 0.2 {
            (0.0, 0.0)
        } else {
            let budget = (1.0 + rng.next_f64() * 199.0).round() * 1_000_000.0;
            let revenue = (budget * rng.next_f64() * 4.0).round();
            (budget, revenue.max(1.0))
        };
        // Rough CPI adjustment towards 2010 dollars.
        let inflation = 1.0 + (2010 - year).max(0) as f64 * 0.035;

        writer.write_record([
            id.to_string(),
            format!("{:.6}", rng.next_f64() * 10.0),
            budget.to_string(),
            revenue.to_string(),
            format!("Sample Movie {id}"),
            cast(&mut rng),
            format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES)),
            (80 + rng.below(80)).to_string(),
            genres(&mut rng),
            rng.pick(&STUDIOS).to_string(),
            format!("{month}/{day}/{year}"),
            (10 + rng.below(5000)).to_string(),
            format!("{:.1}", 3.0 + rng.next_f64() * 6.0),
            year.to_string(),
            format!("{:.2}", budget * inflation),
            format!("{:.2}", revenue * inflation),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {count} movies to {}", output.display());
    Ok(())
}

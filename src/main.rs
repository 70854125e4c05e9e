mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use app::MoviePlannerApp;
use clap::Parser;
use data::context::{load_context, LoadOptions};
use eframe::egui;
use state::{ActorTableOptions, AppState};

#[derive(Parser, Debug)]
#[clap(version, about)]
struct CliArgs {
    /// Path to the raw TMDB movies CSV.
    #[clap(default_value = "data/raw/tmdb_movies_data.csv")]
    pub data: PathBuf,

    /// Where the processed table is cached between runs.
    #[clap(long, default_value = "data/processed/processed_movie_data.csv")]
    pub cache: PathBuf,

    /// Always rebuild from the raw CSV and do not write the cache.
    #[clap(long)]
    pub no_cache: bool,

    /// Number of actors listed in the drill-down table.
    #[clap(long, default_value_t = 5)]
    pub top_actors: usize,

    /// Leave the most frequent actor out of the drill-down table.
    #[clap(long)]
    pub skip_top_actor: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let options = LoadOptions {
        source: args.data.clone(),
        cache: (!args.no_cache).then(|| args.cache.clone()),
    };
    let context = load_context(&options)
        .with_context(|| format!("loading movie data from {}", args.data.display()))
        .inspect_err(|e| log::error!("{e:#}"))?;

    if context.table.is_empty() {
        log::warn!("{} has no movies with budget and revenue data", args.data.display());
    }

    let actor_options = ActorTableOptions {
        count: args.top_actors,
        skip: usize::from(args.skip_top_actor),
    };
    let state = AppState::new(Arc::new(context), actor_options);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Movie Production Planner",
        options,
        Box::new(|_cc| Ok(Box::new(MoviePlannerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}

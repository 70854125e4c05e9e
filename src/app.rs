use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MoviePlannerApp {
    pub state: AppState,
}

impl MoviePlannerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for MoviePlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        let state = &self.state;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Movie Production Planner");
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.columns(2, |cols| {
                        plot::vote_heatmap_chart(&mut cols[0], state);
                        plot::budget_chart(&mut cols[1], state);
                    });
                    ui.add_space(12.0);
                    ui.columns(2, |cols| {
                        table::actor_table(&mut cols[0], state);
                        plot::profit_chart(&mut cols[1], state);
                    });
                });
        });
    }
}

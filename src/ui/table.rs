use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::color::genre_label;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

/// Top actors for the drill-down genre, budget window and years.
pub fn actor_table(ui: &mut Ui, state: &AppState) {
    match &state.drill_genre {
        Some(genre) => ui.strong(format!("Top Actors in {}", genre_label(genre))),
        None => ui.strong("Top Actors"),
    };

    if state.top_actors.is_empty() {
        ui.weak("No actors match the drill-down filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::remainder().at_least(160.0))
        .column(Column::auto())
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("Actor");
            });
            header.col(|ui| {
                ui.strong("No. of Movies");
            });
        })
        .body(|mut body| {
            for entry in &state.top_actors {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(&entry.actor);
                    });
                    row.col(|ui| {
                        ui.label(entry.count.to_string());
                    });
                });
            }
        });
}

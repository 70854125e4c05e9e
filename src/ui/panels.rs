use std::sync::Arc;

use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Slider, Ui};

use crate::color::genre_label;
use crate::data::cache::write_rows;
use crate::data::filter::{BudgetRange, YearRange};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Own handle so `state` stays mutable while iterating genres.
    let context = Arc::clone(&state.context);
    let table = &context.table;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Years ----
            ui.strong("Years");
            if let Some((lo, hi)) = table.year_bounds() {
                let mut years = state.years;
                let from = ui.add(Slider::new(&mut years.min, lo..=hi).text("from"));
                let to = ui.add(Slider::new(&mut years.max, lo..=hi).text("to"));
                if from.changed() || to.changed() {
                    if from.changed() && years.min > years.max {
                        years.max = years.min;
                    } else if years.max < years.min {
                        years.min = years.max;
                    }
                    state.set_years(YearRange::new(years.min, years.max));
                }
            }
            ui.separator();

            // ---- Genres (collapsible) ----
            let header = format!(
                "Genres  ({}/{})",
                state.selected_genres.len(),
                table.genres().len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("genres")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_none();
                        }
                    });

                    for genre in table.genres() {
                        let mut checked = state.selected_genres.contains(genre);
                        let text = RichText::new(genre_label(genre)).color(state.colors.color_for(genre));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_genre(genre);
                        }
                    }
                });
            ui.separator();

            // ---- Actor drill-down ----
            ui.strong("Actor drill-down");
            let current = state.drill_genre.clone().unwrap_or_default();
            let mut picked: Option<String> = None;
            egui::ComboBox::from_id_salt("drill_genre")
                .selected_text(genre_label(&current))
                .show_ui(ui, |ui: &mut Ui| {
                    for genre in &state.selected_genres {
                        if ui.selectable_label(current == *genre, genre_label(genre)).clicked() {
                            picked = Some(genre.clone());
                        }
                    }
                });
            if let Some(genre) = picked {
                state.set_drill_genre(&genre);
            }

            let mut budget = state.budget;
            let mut changed = false;
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Budget from");
                changed |= ui
                    .add(DragValue::new(&mut budget.min).speed(100_000.0).prefix("$"))
                    .changed();
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Budget to");
                changed |= ui
                    .add(DragValue::new(&mut budget.max).speed(100_000.0).prefix("$"))
                    .changed();
            });
            if changed {
                state.set_budget(BudgetRange::new(budget.min, budget.max));
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered view…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let context = &state.context;
        let origin = if context.from_cache { " (cached)" } else { "" };
        ui.label(format!("{}{origin}", context.source.display()));
        ui.separator();

        let table = &context.table;
        ui.label(format!(
            "{} movies ({} genre rows), {} rows visible",
            table.movie_count(),
            table.len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered view")
        .set_file_name("filtered_movies.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        return;
    };

    let table = &state.context.table;
    match write_rows(&path, table.rows_at(&state.visible_indices)) {
        Ok(n) => {
            log::info!("Exported {n} rows to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export view: {e:#}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

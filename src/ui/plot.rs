use eframe::egui::{Stroke, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::{genre_label, heat_color};
use crate::data::aggregate::{
    mean_budget_by_year, median_profit_by_month, vote_heatmap, GenreSeries,
};
use crate::state::AppState;

/// Upper bound on vote-average bins in the heatmap.
const VOTE_MAX_BINS: usize = 40;

const CHART_HEIGHT: f32 = 320.0;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn empty_note(ui: &mut Ui, state: &AppState) {
    if state.visible_indices.is_empty() {
        ui.weak("No movies match the current filters.");
    }
}

/// Draw one line plus point markers per genre series.
fn draw_series(plot_ui: &mut egui_plot::PlotUi, state: &AppState, series: Vec<GenreSeries>) {
    for s in series {
        let color = state.colors.color_for(&s.genre);
        let name = genre_label(&s.genre).to_string();
        plot_ui.line(
            Line::new(PlotPoints::from(s.points.clone()))
                .name(&name)
                .color(color)
                .width(1.5),
        );
        plot_ui.points(
            Points::new(PlotPoints::from(s.points))
                .name(&name)
                .color(color)
                .radius(3.0),
        );
    }
}

// ---------------------------------------------------------------------------
// Mean budget by release year
// ---------------------------------------------------------------------------

pub fn budget_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("Mean Budget by Release Year");
    empty_note(ui, state);

    let table = &state.context.table;
    let series = mean_budget_by_year(table.rows_at(&state.visible_indices));

    Plot::new("budget_by_year")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Release Year")
        .y_axis_label("Adjusted Mean Budget ($)")
        .show(ui, |plot_ui| draw_series(plot_ui, state, series));
}

// ---------------------------------------------------------------------------
// Median profit by release month
// ---------------------------------------------------------------------------

pub fn profit_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("Median Profit by Release Month");
    empty_note(ui, state);

    let table = &state.context.table;
    let series = median_profit_by_month(table.rows_at(&state.visible_indices));

    Plot::new("profit_by_month")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Release Month")
        .y_axis_label("Adjusted Profit ($)")
        .x_axis_formatter(|mark: GridMark, _range| month_label(mark.value))
        .show(ui, |plot_ui| draw_series(plot_ui, state, series));
}

fn month_label(value: f64) -> String {
    if value.fract() != 0.0 || !(1.0..=12.0).contains(&value) {
        return String::new();
    }
    MONTHS[value as usize - 1].to_string()
}

// ---------------------------------------------------------------------------
// Vote average heatmap
// ---------------------------------------------------------------------------

pub fn vote_heatmap_chart(ui: &mut Ui, state: &AppState) {
    ui.strong("Vote Average by Genre");
    empty_note(ui, state);

    let table = &state.context.table;
    let heatmap = vote_heatmap(table.rows_at(&state.visible_indices), VOTE_MAX_BINS);
    let max_count = heatmap.max_count().max(1) as f32;
    let labels: Vec<String> = heatmap
        .genres
        .iter()
        .map(|g| genre_label(g).to_string())
        .collect();

    Plot::new("vote_heatmap")
        .height(CHART_HEIGHT)
        .x_axis_label("Vote Average")
        .show_grid(false)
        .y_axis_formatter(move |mark: GridMark, _range| {
            if mark.value.fract() != 0.0 || mark.value < 0.0 {
                return String::new();
            }
            labels.get(mark.value as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for cell in &heatmap.cells {
                let Some(row) = heatmap.genres.iter().position(|g| *g == cell.genre) else {
                    continue;
                };
                let (x0, x1) = (cell.bin_start, cell.bin_start + heatmap.step);
                let (y0, y1) = (row as f64 - 0.5, row as f64 + 0.5);
                let color = heat_color(cell.count as f32 / max_count);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]))
                        .fill_color(color)
                        .stroke(Stroke::NONE),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new((x0 + x1) / 2.0, row as f64),
                    cell.count.to_string(),
                ));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_labels_only_on_whole_months() {
        assert_eq!(month_label(1.0), "Jan");
        assert_eq!(month_label(12.0), "Dec");
        assert_eq!(month_label(6.5), "");
        assert_eq!(month_label(0.0), "");
        assert_eq!(month_label(13.0), "");
    }
}

use eframe::egui::{self, ScrollArea, Ui};

use crate::charts::{Chart, SeriesKey, Tab};
use crate::config::DashboardConfig;
use crate::data::model::{ColumnId, Dataset};
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Central panel – the active tab's charts
// ---------------------------------------------------------------------------

/// Render the active tab.
pub fn central_panel(ui: &mut Ui, state: &mut AppState, config: &DashboardConfig) {
    if state.dataset.is_none() {
        let message = state
            .status_message
            .clone()
            .unwrap_or_else(|| "No dataset loaded.".to_string());
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(message);
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if state.active_tab == Tab::CustomExploration {
                explorer_pickers(ui, state);
                ui.separator();
            }

            state.refresh_charts();
            let state: &AppState = state;
            for (i, rendered) in state.charts().iter().enumerate() {
                ui.add_space(8.0);
                ui.heading(rendered.title);
                let id = format!("{:?}_{i}", state.active_tab);
                draw_chart(ui, &id, &rendered.chart, state, config);
            }
        });
}

fn draw_chart(ui: &mut Ui, id: &str, chart: &Chart, state: &AppState, config: &DashboardConfig) {
    let height = config.chart_height;
    match chart {
        Chart::Bars(data) => {
            let map = data
                .series_column
                .as_deref()
                .and_then(|col| state.color_map(col));
            plot::bar_chart(ui, id, data, map.as_ref(), height);
        }
        Chart::Histogram(data) => {
            let map = state.color_map(&data.series_column);
            plot::histogram(ui, id, data, map.as_ref(), height);
        }
        Chart::Boxes(data) => plot::box_plot(ui, id, data, height),
        Chart::Scatter(data) => {
            let by_value = data
                .series
                .iter()
                .any(|s| matches!(s.key, SeriesKey::Value(_)));
            let map = if by_value {
                state.color_map(&data.color_column)
            } else {
                None
            };
            plot::scatter(ui, id, data, map.as_ref(), height);
        }
        Chart::Table => {
            if let Some(view) = &state.filtered {
                table::data_table(ui, view, config.table_max_height);
            }
        }
        Chart::Correlation(matrix) => table::correlation_table(ui, matrix),
    }
}

// ---------------------------------------------------------------------------
// Custom exploration pickers
// ---------------------------------------------------------------------------

fn explorer_pickers(ui: &mut Ui, state: &mut AppState) {
    let (Some(dataset), Some(mut axes)) = (state.dataset.clone(), state.explorer) else {
        return;
    };

    let mut changed = false;
    changed |= column_picker(ui, "Select X-Axis", "explorer_x", &dataset, &mut axes.x);
    changed |= column_picker(ui, "Select Y-Axis", "explorer_y", &dataset, &mut axes.y);
    changed |= column_picker(ui, "Color By", "explorer_color", &dataset, &mut axes.color);

    if changed {
        log::info!(
            "Explorer: {} vs {} by {}",
            dataset.column(axes.x).name,
            dataset.column(axes.y).name,
            dataset.column(axes.color).name
        );
        state.set_explorer_axes(axes);
    }
}

/// A drop-down over every column of the dataset. Returns whether the pick
/// changed.
fn column_picker(
    ui: &mut Ui,
    label: &str,
    id_salt: &str,
    dataset: &Dataset,
    current: &mut ColumnId,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id_salt)
            .selected_text(dataset.column(*current).name.as_str())
            .height(320.0)
            .show_ui(ui, |ui: &mut Ui| {
                for id in dataset.column_ids() {
                    let name = dataset.column(id).name.as_str();
                    changed |= ui.selectable_value(current, id, name).changed();
                }
            });
    });
    changed
}

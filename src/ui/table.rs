use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::charts::correlation::CorrelationMatrix;
use crate::color;
use crate::data::filter::FilteredDataset;
use crate::data::model::CellValue;

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 20.0;

fn cell_text(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// Every visible row, virtualised so only on-screen rows are laid out.
pub fn data_table(ui: &mut Ui, view: &FilteredDataset, max_height: f32) {
    let dataset = view.source();
    let rows = view.row_indices();
    ui.label(format!("{} rows × {} columns", rows.len(), dataset.columns().len()));

    ui.push_id("data_table", |ui: &mut Ui| {
        ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(max_height)
                .columns(Column::auto().at_least(60.0), dataset.columns().len())
                .header(HEADER_HEIGHT, |mut header| {
                    for column in dataset.columns() {
                        header.col(|ui: &mut Ui| {
                            ui.strong(column.name.as_str());
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                        let record = dataset.record(rows[row.index()]);
                        for cell in &record.cells {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell_text(cell));
                            });
                        }
                    });
                });
        });
    });
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Correlation coefficients as a table with diverging cell colours.
pub fn correlation_table(ui: &mut Ui, matrix: &CorrelationMatrix) {
    if matrix.is_empty() {
        ui.label("No numeric columns to correlate.");
        return;
    }

    ui.push_id("correlation_table", |ui: &mut Ui| {
        ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(false)
                .vscroll(false)
                .column(Column::auto().at_least(140.0))
                .columns(Column::auto().at_least(56.0), matrix.columns.len())
                .header(HEADER_HEIGHT, |mut header| {
                    header.col(|_ui: &mut Ui| {});
                    for name in &matrix.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name.as_str());
                        });
                    }
                })
                .body(|mut body| {
                    for (name, values) in matrix.columns.iter().zip(&matrix.values) {
                        body.row(ROW_HEIGHT, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.strong(name.as_str());
                            });
                            for &r in values {
                                row.col(|ui: &mut Ui| {
                                    let text = if r.is_nan() {
                                        "NaN".to_string()
                                    } else {
                                        format!("{r:+.2}")
                                    };
                                    ui.label(
                                        RichText::new(text)
                                            .monospace()
                                            .color(Color32::BLACK)
                                            .background_color(color::diverging(r)),
                                    );
                                });
                            }
                        });
                    }
                });
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_cells_render_blank() {
        assert_eq!(cell_text(&CellValue::Null), "");
        assert_eq!(cell_text(&CellValue::Integer(42)), "42");
        assert_eq!(cell_text(&CellValue::from("Sales")), "Sales");
    }
}

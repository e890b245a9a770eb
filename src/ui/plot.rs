use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use crate::charts::bars::{BarGroups, BarSeries};
use crate::charts::boxplot::BoxPlotData;
use crate::charts::histogram::NumericHistogram;
use crate::charts::scatter::ScatterData;
use crate::charts::{BarMode, SeriesKey};
use crate::color::{self, ColorMap};

/// Share of a category slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

fn series_color(map: Option<&ColorMap>, key: &SeriesKey, index: usize, count: usize) -> Color32 {
    match (map, key) {
        (Some(map), key) => map.series_color(key),
        (None, SeriesKey::Value(_)) => color::generate_palette(count)
            .get(index)
            .copied()
            .unwrap_or(Color32::GRAY),
        (None, SeriesKey::Band { index, of }) => color::sequential(*index, *of),
        (None, SeriesKey::Single) => Color32::LIGHT_BLUE,
    }
}

/// Label for a category axis tick; blank between categories.
fn category_label(categories: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories
        .get(rounded as usize)
        .cloned()
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Bars
// ---------------------------------------------------------------------------

/// Turn series into bar charts at the given `(centre, width)` slots.
fn build_bar_charts(
    series: &[BarSeries],
    slots: &[(f64, f64)],
    mode: BarMode,
    map: Option<&ColorMap>,
    slot_name: impl Fn(usize) -> String,
) -> Vec<BarChart> {
    let k = series.len().max(1) as f64;
    let mut charts: Vec<BarChart> = Vec::with_capacity(series.len());

    for (s, ser) in series.iter().enumerate() {
        let mut color = series_color(map, &ser.key, s, series.len());
        if mode == BarMode::Overlay {
            color = color.gamma_multiply(0.6);
        }

        let bars: Vec<Bar> = ser
            .values
            .iter()
            .zip(slots)
            .enumerate()
            .map(|(i, (&value, &(centre, width)))| {
                let (x, w) = match mode {
                    BarMode::Group => {
                        let w = width / k;
                        (centre - width / 2.0 + (s as f64 + 0.5) * w, w)
                    }
                    BarMode::Overlay | BarMode::Stack => (centre, width),
                };
                Bar::new(x, value)
                    .width(w)
                    .name(format!("{} · {}", slot_name(i), ser.label))
            })
            .collect();

        let mut chart = BarChart::new(bars).name(&ser.label).color(color);
        if mode == BarMode::Stack {
            let below: Vec<&BarChart> = charts.iter().collect();
            chart = chart.stack_on(&below);
        }
        charts.push(chart);
    }
    charts
}

/// Bars over named categories (grouped histograms, counts, rates).
pub fn bar_chart(ui: &mut Ui, id: &str, data: &BarGroups, map: Option<&ColorMap>, height: f32) {
    let slots: Vec<(f64, f64)> = (0..data.categories.len())
        .map(|i| (i as f64, GROUP_WIDTH))
        .collect();
    let charts = build_bar_charts(&data.series, &slots, data.mode, map, |i| {
        data.categories[i].clone()
    });
    let categories = data.categories.clone();

    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label(data.x_label.as_str())
        .y_axis_label(data.y_label.as_str())
        .x_axis_formatter(move |mark, _range| category_label(&categories, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Binned numeric distribution.
pub fn histogram(
    ui: &mut Ui,
    id: &str,
    data: &NumericHistogram,
    map: Option<&ColorMap>,
    height: f32,
) {
    let slots: Vec<(f64, f64)> = data
        .edges
        .windows(2)
        .map(|w| ((w[0] + w[1]) / 2.0, w[1] - w[0]))
        .collect();
    let charts = build_bar_charts(&data.series, &slots, data.mode, map, |i| {
        format!("{:.1} – {:.1}", data.edges[i], data.edges[i + 1])
    });

    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label(data.x_label.as_str())
        .y_axis_label("count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

pub fn box_plot(ui: &mut Ui, id: &str, data: &BoxPlotData, height: f32) {
    let elems: Vec<BoxElem> = data
        .boxes
        .iter()
        .enumerate()
        .map(|(i, b)| {
            BoxElem::new(
                i as f64,
                BoxSpread::new(b.lower_whisker, b.q1, b.median, b.q3, b.upper_whisker),
            )
            .name(&b.label)
            .box_width(0.5)
            .whisker_width(0.3)
        })
        .collect();
    let outliers: Vec<[f64; 2]> = data
        .boxes
        .iter()
        .enumerate()
        .flat_map(|(i, b)| b.outliers.iter().map(move |&v| [i as f64, v]))
        .collect();
    let categories: Vec<String> = data.boxes.iter().map(|b| b.label.clone()).collect();

    Plot::new(id)
        .height(height)
        .x_axis_label(data.x_label.as_str())
        .y_axis_label(data.y_label.as_str())
        .x_axis_formatter(move |mark, _range| category_label(&categories, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(
                BoxPlot::new(elems)
                    .name(&data.y_label)
                    .color(Color32::LIGHT_BLUE),
            );
            if !outliers.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::new(outliers))
                        .radius(2.5)
                        .color(Color32::LIGHT_BLUE)
                        .name("outliers"),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

pub fn scatter(ui: &mut Ui, id: &str, data: &ScatterData, map: Option<&ColorMap>, height: f32) {
    let mut plot = Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label(data.x_label.as_str())
        .y_axis_label(data.y_label.as_str())
        .allow_scroll(false)
        .allow_boxed_zoom(true);
    if let Some(categories) = data.x_categories.clone() {
        plot = plot.x_axis_formatter(move |mark, _range| category_label(&categories, mark.value));
    }
    if let Some(categories) = data.y_categories.clone() {
        plot = plot.y_axis_formatter(move |mark, _range| category_label(&categories, mark.value));
    }

    plot.show(ui, |plot_ui| {
        for (i, series) in data.series.iter().enumerate() {
            let color = series_color(map, &series.key, i, data.series.len());
            plot_ui.points(
                Points::new(PlotPoints::new(series.points.clone()))
                    .radius(2.0)
                    .color(color)
                    .name(&series.label),
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ticks_only_on_integer_positions() {
        let categories = vec!["No".to_string(), "Yes".to_string()];
        assert_eq!(category_label(&categories, 0.0), "No");
        assert_eq!(category_label(&categories, 1.0), "Yes");
        assert_eq!(category_label(&categories, 0.5), "");
        assert_eq!(category_label(&categories, 2.0), "");
        assert_eq!(category_label(&categories, -1.0), "");
    }

    #[test]
    fn grouped_bars_split_the_slot() {
        let series = vec![
            BarSeries {
                label: "No".into(),
                key: SeriesKey::Single,
                values: vec![3.0],
            },
            BarSeries {
                label: "Yes".into(),
                key: SeriesKey::Single,
                values: vec![1.0],
            },
        ];
        let charts = build_bar_charts(&series, &[(0.0, 0.8)], BarMode::Group, None, |_| {
            "Sales".to_string()
        });
        assert_eq!(charts.len(), 2);
    }
}

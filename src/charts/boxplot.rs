use std::collections::BTreeMap;

use crate::data::filter::FilteredDataset;
use crate::data::model::CellValue;

/// Five-number summary plus outliers for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub label: String,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlotData {
    pub x_label: String,
    pub y_label: String,
    pub boxes: Vec<BoxSummary>,
}

/// Quantile of sorted data by linear interpolation between order statistics.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
        }
    }
}

/// Summarise one group; `None` when it holds no values.
pub fn summarize(label: String, mut values: Vec<f64>) -> Option<BoxSummary> {
    values.retain(|v| v.is_finite());
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let q1 = quantile(&values, 0.25);
    let median = quantile(&values, 0.5);
    let q3 = quantile(&values, 0.75);
    let reach = 1.5 * (q3 - q1);
    let (low_fence, high_fence) = (q1 - reach, q3 + reach);

    let inside = |v: &&f64| **v >= low_fence && **v <= high_fence;
    let lower_whisker = values.iter().find(inside).copied().unwrap_or(q1);
    let upper_whisker = values.iter().rev().find(inside).copied().unwrap_or(q3);
    let outliers = values
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(BoxSummary {
        label,
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
        count: values.len(),
    })
}

/// One box of numeric column `y` per distinct value of `x`.
pub fn box_plot(view: &FilteredDataset, x: &str, y: &str) -> BoxPlotData {
    let mut groups: BTreeMap<&CellValue, Vec<f64>> = BTreeMap::new();
    for (xv, yv) in view.values_of(x).zip(view.values_of(y)) {
        if let (false, Some(v)) = (xv.is_null(), yv.as_f64()) {
            groups.entry(xv).or_default().push(v);
        }
    }

    BoxPlotData {
        x_label: x.to_string(),
        y_label: y.to_string(),
        boxes: groups
            .into_iter()
            .filter_map(|(key, values)| summarize(key.to_string(), values))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::data::model::columns;

    #[test]
    fn quantiles_interpolate_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.75), 3.25);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn whiskers_stop_at_last_point_inside_fences() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let summary = summarize("No".into(), values).unwrap();
        assert_eq!(summary.median, 3.5);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 5.0);
        assert_eq!(summary.outliers, vec![100.0]);
        assert_eq!(summary.count, 6);
    }

    #[test]
    fn empty_group_has_no_box() {
        assert!(summarize("Yes".into(), vec![f64::NAN]).is_none());
    }

    #[test]
    fn one_box_per_attrition_value() {
        let view = FilteredDataset::full(fixtures::sample_dataset());
        let plot = box_plot(&view, columns::ATTRITION, columns::DISTANCE_FROM_HOME);
        let labels: Vec<&str> = plot.boxes.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["No", "Yes"]);
        assert_eq!(plot.boxes[0].count + plot.boxes[1].count, view.len());
        // Leavers: 1, 2, 24.
        assert_eq!(plot.boxes[1].median, 2.0);
    }

    #[test]
    fn text_y_column_yields_no_boxes() {
        let view = FilteredDataset::full(fixtures::sample_dataset());
        assert!(box_plot(&view, columns::ATTRITION, columns::JOB_ROLE).boxes.is_empty());
    }
}

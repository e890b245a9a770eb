use std::collections::{BTreeMap, BTreeSet};

use super::bars::BarSeries;
use super::{BarMode, SeriesKey};
use crate::data::filter::FilteredDataset;
use crate::data::model::CellValue;

/// Largest integer span still drawn with one bar per integer.
const MAX_UNIT_BINS: f64 = 60.0;
const MAX_AUTO_BINS: usize = 50;

/// How a numeric axis is cut into bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinRule {
    Auto,
    Count(usize),
}

/// Counts of a numeric column over contiguous bins, split by a colour column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericHistogram {
    /// `edges.len() == bins + 1`, ascending.
    pub edges: Vec<f64>,
    pub series: Vec<BarSeries>,
    pub series_column: String,
    pub mode: BarMode,
    pub x_label: String,
}

impl NumericHistogram {
    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }
}

/// Compute bin edges for `values` (assumed finite).
pub fn bin_edges(values: &[f64], rule: BinRule) -> Vec<f64> {
    let Some(min) = values.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = values.iter().copied().fold(min, f64::max);

    if min == max {
        return vec![min - 0.5, max + 0.5];
    }

    let bins = match rule {
        BinRule::Count(n) => n.max(1),
        BinRule::Auto => {
            let integral = values.iter().all(|v| v.fract() == 0.0);
            if integral && max - min + 1.0 <= MAX_UNIT_BINS {
                let n = (max - min) as usize + 1;
                return (0..=n).map(|i| min - 0.5 + i as f64).collect();
            }
            ((values.len() as f64).sqrt().ceil() as usize).clamp(1, MAX_AUTO_BINS)
        }
    };

    let width = (max - min) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| min + i as f64 * width).collect();
    edges.push(max);
    edges
}

/// Index of the bin holding `v`; the last bin is closed on the right.
fn bin_index(edges: &[f64], v: f64) -> Option<usize> {
    let (first, last) = (*edges.first()?, *edges.last()?);
    if v < first || v > last {
        return None;
    }
    let bins = edges.len() - 1;
    let i = edges.partition_point(|&e| e <= v).saturating_sub(1);
    Some(i.min(bins - 1))
}

/// Histogram of numeric column `x`, one series per value of `color`.
/// Non-numeric `x` cells are ignored.
pub fn numeric_histogram(
    view: &FilteredDataset,
    x: &str,
    color: &str,
    rule: BinRule,
    mode: BarMode,
) -> NumericHistogram {
    let pairs: Vec<(f64, &CellValue)> = view
        .values_of(x)
        .zip(view.values_of(color))
        .filter_map(|(xv, cv)| xv.as_f64().filter(|v| v.is_finite()).map(|v| (v, cv)))
        .filter(|(_, cv)| !cv.is_null())
        .collect();

    let values: Vec<f64> = pairs.iter().map(|&(v, _)| v).collect();
    let edges = bin_edges(&values, rule);
    let bins = edges.len().saturating_sub(1);

    let keys: BTreeSet<&CellValue> = pairs.iter().map(|&(_, cv)| cv).collect();
    let mut counts: BTreeMap<&CellValue, Vec<f64>> =
        keys.iter().map(|&k| (k, vec![0.0; bins])).collect();
    for &(v, cv) in &pairs {
        if let (Some(i), Some(row)) = (bin_index(&edges, v), counts.get_mut(cv)) {
            row[i] += 1.0;
        }
    }

    NumericHistogram {
        edges,
        series: counts
            .into_iter()
            .map(|(key, values)| BarSeries {
                label: key.to_string(),
                key: SeriesKey::Value(key.clone()),
                values,
            })
            .collect(),
        series_column: color.to_string(),
        mode,
        x_label: x.to_string(),
    }
}

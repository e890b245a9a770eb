use std::collections::{BTreeMap, HashMap};

use super::SeriesKey;
use crate::data::filter::FilteredDataset;
use crate::data::model::{columns, CellValue, ColumnId, ColumnKind, Dataset};

/// Colour columns with more distinct numeric values than this are banded.
const MAX_COLOR_CATEGORIES: usize = 12;
const COLOR_BANDS: usize = 8;

// ---------------------------------------------------------------------------
// Explorer axes
// ---------------------------------------------------------------------------

/// Columns picked for the custom scatter plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExplorerAxes {
    pub x: ColumnId,
    pub y: ColumnId,
    pub color: ColumnId,
}

impl ExplorerAxes {
    /// First column against second, coloured by attrition when present.
    pub fn defaults(dataset: &Dataset) -> Option<Self> {
        let mut ids = dataset.column_ids();
        let x = ids.next()?;
        let y = ids.next().unwrap_or(x);
        let color = dataset.column_id(columns::ATTRITION).unwrap_or(x);
        Some(Self { x, y, color })
    }
}

// ---------------------------------------------------------------------------
// Scatter data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: String,
    pub key: SeriesKey,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterData {
    pub x_label: String,
    pub y_label: String,
    /// Tick labels when the axis is categorical; position `i` is label `i`.
    pub x_categories: Option<Vec<String>>,
    pub y_categories: Option<Vec<String>>,
    pub color_column: String,
    pub series: Vec<ScatterSeries>,
}

/// Maps the cells of one column onto a plot axis.
enum Axis<'a> {
    Numeric,
    Categorical(HashMap<&'a CellValue, usize>),
}

impl<'a> Axis<'a> {
    fn new(dataset: &'a Dataset, id: ColumnId) -> Self {
        if dataset.column(id).kind.is_numeric() {
            Axis::Numeric
        } else {
            Axis::Categorical(
                dataset
                    .unique_values(id)
                    .iter()
                    .filter(|v| !v.is_null())
                    .enumerate()
                    .map(|(i, v)| (v, i))
                    .collect(),
            )
        }
    }

    fn position(&self, value: &CellValue) -> Option<f64> {
        match self {
            Axis::Numeric => value.as_f64(),
            Axis::Categorical(index) => index.get(value).map(|&i| i as f64),
        }
    }

    fn labels(&self, dataset: &Dataset, id: ColumnId) -> Option<Vec<String>> {
        match self {
            Axis::Numeric => None,
            Axis::Categorical(_) => Some(
                dataset
                    .unique_values(id)
                    .iter()
                    .filter(|v| !v.is_null())
                    .map(|v| v.to_string())
                    .collect(),
            ),
        }
    }
}

/// How points are split into coloured series.
enum ColorGrouping {
    ByValue,
    Bands { min: f64, width: f64, integral: bool },
}

impl ColorGrouping {
    fn new(dataset: &Dataset, id: ColumnId) -> Self {
        let column = dataset.column(id);
        let uniques = dataset.unique_values(id);
        let distinct = uniques.iter().filter(|v| !v.is_null()).count();
        if !column.kind.is_numeric() || distinct <= MAX_COLOR_CATEGORIES {
            return ColorGrouping::ByValue;
        }
        let mut numbers = uniques.iter().filter_map(CellValue::as_f64);
        let Some(first) = numbers.next() else {
            return ColorGrouping::ByValue;
        };
        let (min, max) = numbers.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        ColorGrouping::Bands {
            min,
            width: (max - min) / COLOR_BANDS as f64,
            integral: column.kind == ColumnKind::Integer,
        }
    }

    fn band(&self, value: &CellValue) -> Option<usize> {
        match *self {
            ColorGrouping::Bands { min, width, .. } => {
                let v = value.as_f64()?;
                let i = if width > 0.0 {
                    ((v - min) / width).floor() as usize
                } else {
                    0
                };
                Some(i.min(COLOR_BANDS - 1))
            }
            ColorGrouping::ByValue => None,
        }
    }

    fn band_label(&self, index: usize) -> String {
        match *self {
            ColorGrouping::Bands { min, width, integral } => {
                let lo = min + index as f64 * width;
                let hi = lo + width;
                if integral {
                    format!("{lo:.0} – {hi:.0}")
                } else {
                    format!("{lo:.2} – {hi:.2}")
                }
            }
            ColorGrouping::ByValue => String::new(),
        }
    }
}

/// Scatter of `x` against `y` for the visible rows, split by `color`.
///
/// Text axes are placed at the index of each value among the column's
/// distinct values; rows with a missing coordinate are skipped.
pub fn scatter(view: &FilteredDataset, axes: ExplorerAxes) -> ScatterData {
    let dataset = view.source();
    let x_axis = Axis::new(dataset, axes.x);
    let y_axis = Axis::new(dataset, axes.y);
    let grouping = ColorGrouping::new(dataset, axes.color);

    let mut by_value: BTreeMap<&CellValue, Vec<[f64; 2]>> = BTreeMap::new();
    let mut by_band: BTreeMap<usize, Vec<[f64; 2]>> = BTreeMap::new();

    for record in view.records() {
        let (Some(px), Some(py)) = (
            x_axis.position(record.get(axes.x)),
            y_axis.position(record.get(axes.y)),
        ) else {
            continue;
        };
        let color = record.get(axes.color);
        match grouping.band(color) {
            Some(band) => by_band.entry(band).or_default().push([px, py]),
            None => by_value.entry(color).or_default().push([px, py]),
        }
    }

    let mut series: Vec<ScatterSeries> = by_value
        .into_iter()
        .map(|(value, points)| ScatterSeries {
            label: value.to_string(),
            key: SeriesKey::Value(value.clone()),
            points,
        })
        .collect();
    series.extend(by_band.into_iter().map(|(index, points)| ScatterSeries {
        label: grouping.band_label(index),
        key: SeriesKey::Band {
            index,
            of: COLOR_BANDS,
        },
        points,
    }));

    ScatterData {
        x_label: dataset.column(axes.x).name.clone(),
        y_label: dataset.column(axes.y).name.clone(),
        x_categories: x_axis.labels(dataset, axes.x),
        y_categories: y_axis.labels(dataset, axes.y),
        color_column: dataset.column(axes.color).name.clone(),
        series,
    }
}

/// Scatter over named columns; empty when any of them is absent.
pub fn scatter_named(view: &FilteredDataset, x: &str, y: &str, color: &str) -> ScatterData {
    let dataset = view.source();
    match (
        dataset.column_id(x),
        dataset.column_id(y),
        dataset.column_id(color),
    ) {
        (Some(x), Some(y), Some(color)) => scatter(view, ExplorerAxes { x, y, color }),
        _ => ScatterData::default(),
    }
}

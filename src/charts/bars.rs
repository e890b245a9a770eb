use std::collections::{BTreeMap, BTreeSet};

use super::{BarMode, SeriesKey};
use crate::data::filter::FilteredDataset;
use crate::data::model::{columns, CellValue};

/// One coloured series of a bar chart; `values[i]` belongs to category `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub label: String,
    pub key: SeriesKey,
    pub values: Vec<f64>,
}

/// Bars over categorical x positions.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroups {
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
    /// Column whose values coloured the series, if any.
    pub series_column: Option<String>,
    pub mode: BarMode,
    pub x_label: String,
    pub y_label: String,
}

/// Count rows per `(x, colour)` pair, e.g. Department split by Attrition.
///
/// Categories and series are the distinct non-null values present in the
/// view, sorted.
pub fn category_histogram(
    view: &FilteredDataset,
    x: &str,
    color: &str,
    mode: BarMode,
) -> BarGroups {
    let mut counts: BTreeMap<(&CellValue, &CellValue), usize> = BTreeMap::new();
    let mut categories: BTreeSet<&CellValue> = BTreeSet::new();
    let mut keys: BTreeSet<&CellValue> = BTreeSet::new();

    for (xv, cv) in view.values_of(x).zip(view.values_of(color)) {
        if xv.is_null() || cv.is_null() {
            continue;
        }
        categories.insert(xv);
        keys.insert(cv);
        *counts.entry((xv, cv)).or_default() += 1;
    }

    let series = keys
        .iter()
        .map(|&key| BarSeries {
            label: key.to_string(),
            key: SeriesKey::Value(key.clone()),
            values: categories
                .iter()
                .map(|&cat| counts.get(&(cat, key)).copied().unwrap_or(0) as f64)
                .collect(),
        })
        .collect();

    BarGroups {
        categories: categories.iter().map(|c| c.to_string()).collect(),
        series,
        series_column: Some(color.to_string()),
        mode,
        x_label: x.to_string(),
        y_label: "count".to_string(),
    }
}

/// Occurrences of each value of `column`, most frequent first.
pub fn value_counts(view: &FilteredDataset, column: &str) -> Vec<(CellValue, usize)> {
    let mut counts: BTreeMap<&CellValue, usize> = BTreeMap::new();
    for value in view.values_of(column).filter(|v| !v.is_null()) {
        *counts.entry(value).or_default() += 1;
    }
    let mut counts: Vec<(CellValue, usize)> =
        counts.into_iter().map(|(v, n)| (v.clone(), n)).collect();
    // Stable sort keeps value order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn attrition_counts(view: &FilteredDataset) -> BarGroups {
    let counts = value_counts(view, columns::ATTRITION);
    BarGroups {
        categories: counts.iter().map(|(v, _)| v.to_string()).collect(),
        series: vec![BarSeries {
            label: "count".to_string(),
            key: SeriesKey::Single,
            values: counts.iter().map(|&(_, n)| n as f64).collect(),
        }],
        series_column: None,
        mode: BarMode::Group,
        x_label: columns::ATTRITION.to_string(),
        y_label: "count".to_string(),
    }
}

/// Share of leavers per department among the visible rows.
///
/// Departments without visible rows have no rate and are left out.
pub fn attrition_rates(view: &FilteredDataset) -> Vec<(CellValue, f64)> {
    let yes = CellValue::from(columns::ATTRITION_YES);
    let mut tally: BTreeMap<&CellValue, (usize, usize)> = BTreeMap::new();
    for (dept, attrition) in view
        .values_of(columns::DEPARTMENT)
        .zip(view.values_of(columns::ATTRITION))
    {
        if dept.is_null() {
            continue;
        }
        let (left, total) = tally.entry(dept).or_default();
        *total += 1;
        if *attrition == yes {
            *left += 1;
        }
    }
    tally
        .into_iter()
        .map(|(dept, (left, total))| (dept.clone(), left as f64 / total as f64))
        .collect()
}

/// Attrition rate of a single department, `None` when it has no rows.
pub fn attrition_rate_for(view: &FilteredDataset, department: &CellValue) -> Option<f64> {
    attrition_rates(view)
        .into_iter()
        .find(|(dept, _)| dept == department)
        .map(|(_, rate)| rate)
}

pub fn department_attrition_rates(view: &FilteredDataset) -> BarGroups {
    let rates = attrition_rates(view);
    BarGroups {
        categories: rates.iter().map(|(d, _)| d.to_string()).collect(),
        series: vec![BarSeries {
            label: "attrition rate".to_string(),
            key: SeriesKey::Single,
            values: rates.iter().map(|&(_, r)| r).collect(),
        }],
        series_column: None,
        mode: BarMode::Group,
        x_label: columns::DEPARTMENT.to_string(),
        y_label: "rate".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, FilterDimension, FilterSelection};
    use crate::data::fixtures;

    fn rate_fixture() -> FilteredDataset {
        let ds = fixtures::dataset(
            &["Department", "Attrition", "Gender", "EducationField"],
            &[
                &["Sales", "Yes", "Male", "Medical"],
                &["Sales", "No", "Female", "Medical"],
                &["Sales", "No", "Male", "Other"],
                &["HR", "Yes", "Female", "Other"],
            ],
        );
        FilteredDataset::full(ds)
    }

    #[test]
    fn department_rate_is_share_of_leavers() {
        let view = rate_fixture();
        let sales = attrition_rate_for(&view, &CellValue::from("Sales")).unwrap();
        let hr = attrition_rate_for(&view, &CellValue::from("HR")).unwrap();
        assert!((sales - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(hr, 1.0);
    }

    #[test]
    fn departments_without_rows_have_no_rate() {
        let view = rate_fixture();
        let mut selection = FilterSelection::all_observed(view.source());
        selection.set(
            FilterDimension::Department,
            [CellValue::from("Sales")].into_iter().collect(),
        );
        let sales_only = view.filter(&selection);

        assert_eq!(attrition_rate_for(&sales_only, &CellValue::from("HR")), None);
        let chart = department_attrition_rates(&sales_only);
        assert_eq!(chart.categories, vec!["Sales".to_string()]);
        assert_eq!(chart.series[0].values.len(), 1);
    }

    #[test]
    fn department_without_leavers_has_zero_rate() {
        let view = rate_fixture();
        let mut selection = FilterSelection::all_observed(view.source());
        selection.set(
            FilterDimension::Gender,
            [CellValue::from("Female")].into_iter().collect(),
        );
        let view = view.filter(&selection);
        assert_eq!(attrition_rate_for(&view, &CellValue::from("Sales")), Some(0.0));
    }

    #[test]
    fn grouped_histogram_counts_each_pair() {
        let ds = fixtures::sample_dataset();
        let view = FilteredDataset::full(ds);
        let chart = category_histogram(&view, columns::DEPARTMENT, columns::ATTRITION, BarMode::Group);

        assert_eq!(
            chart.categories,
            vec!["Human Resources", "Research & Development", "Sales"]
        );
        let labels: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["No", "Yes"]);
        assert_eq!(chart.series[0].values, vec![1.0, 2.0, 2.0]);
        assert_eq!(chart.series[1].values, vec![1.0, 1.0, 1.0]);
        assert_eq!(chart.series_column.as_deref(), Some(columns::ATTRITION));
    }

    #[test]
    fn histogram_of_empty_view_has_no_bars() {
        let ds = fixtures::sample_dataset();
        let view = filter(&ds, &FilterSelection::none());
        let chart = category_histogram(&view, columns::GENDER, columns::ATTRITION, BarMode::Group);
        assert!(chart.categories.is_empty());
        assert!(chart.series.is_empty());
    }

    #[test]
    fn value_counts_are_most_frequent_first() {
        let view = FilteredDataset::full(fixtures::sample_dataset());
        let counts = value_counts(&view, columns::ATTRITION);
        assert_eq!(
            counts,
            vec![(CellValue::from("No"), 5), (CellValue::from("Yes"), 3)]
        );
        let chart = attrition_counts(&view);
        assert_eq!(chart.categories, vec!["No", "Yes"]);
        assert_eq!(chart.series[0].values, vec![5.0, 3.0]);
    }
}

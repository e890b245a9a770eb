use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::model::{columns, CellValue, ColumnId, Dataset, Record, NULL};

// ---------------------------------------------------------------------------
// Filter dimensions
// ---------------------------------------------------------------------------

/// The categorical columns offered as sidebar filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterDimension {
    Department,
    Gender,
    EducationField,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 3] = [
        FilterDimension::Department,
        FilterDimension::Gender,
        FilterDimension::EducationField,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            FilterDimension::Department => columns::DEPARTMENT,
            FilterDimension::Gender => columns::GENDER,
            FilterDimension::EducationField => columns::EDUCATION_FIELD,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterDimension::Department => "Select Department",
            FilterDimension::Gender => "Select Gender",
            FilterDimension::EducationField => "Select Education Field",
        }
    }
}

// ---------------------------------------------------------------------------
// Filter selection: which values are allowed per dimension
// ---------------------------------------------------------------------------

/// Allowed values per filter dimension.
///
/// An empty set for a dimension lets nothing through; there is no implicit
/// "select all".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    selected: BTreeMap<FilterDimension, BTreeSet<CellValue>>,
}

impl FilterSelection {
    /// A selection with every value observed in `dataset` allowed.
    pub fn all_observed(dataset: &Dataset) -> Self {
        let selected = FilterDimension::ALL
            .into_iter()
            .map(|dim| (dim, observed_values(dataset, dim)))
            .collect();
        Self { selected }
    }

    /// A selection that allows nothing.
    pub fn none() -> Self {
        Self {
            selected: FilterDimension::ALL
                .into_iter()
                .map(|dim| (dim, BTreeSet::new()))
                .collect(),
        }
    }

    pub fn selected(&self, dim: FilterDimension) -> &BTreeSet<CellValue> {
        &self.selected[&dim]
    }

    pub fn allows(&self, dim: FilterDimension, value: &CellValue) -> bool {
        self.selected[&dim].contains(value)
    }

    pub fn set(&mut self, dim: FilterDimension, values: BTreeSet<CellValue>) {
        self.selected.insert(dim, values);
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle(&mut self, dim: FilterDimension, value: &CellValue) {
        let selected = self.selected.entry(dim).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
    }

    /// Select every value of `dim` observed in `dataset`.
    pub fn select_all(&mut self, dim: FilterDimension, dataset: &Dataset) {
        self.set(dim, observed_values(dataset, dim));
    }

    /// Deselect every value of `dim`.
    pub fn select_none(&mut self, dim: FilterDimension) {
        self.set(dim, BTreeSet::new());
    }
}

fn observed_values(dataset: &Dataset, dim: FilterDimension) -> BTreeSet<CellValue> {
    dataset
        .column_id(dim.column_name())
        .map(|id| dataset.unique_values(id).clone())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// The rows of a shared dataset that passed a selection.
#[derive(Debug, Clone)]
pub struct FilteredDataset {
    source: Arc<Dataset>,
    rows: Vec<usize>,
}

impl PartialEq for FilteredDataset {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source, &other.source) && self.rows == other.rows
    }
}

impl FilteredDataset {
    /// The unfiltered view of `source`.
    pub fn full(source: Arc<Dataset>) -> Self {
        let rows = (0..source.len()).collect();
        Self { source, rows }
    }

    pub fn source(&self) -> &Dataset {
        &self.source
    }

    /// Indices into the source dataset, in source order.
    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.rows.iter().map(|&i| self.source.record(i))
    }

    /// The cells of one column for every visible row.
    pub fn column_values(&self, id: ColumnId) -> impl Iterator<Item = &CellValue> + '_ {
        self.records().map(move |r| r.get(id))
    }

    /// Cells of the named column, or nothing when the column is absent.
    pub fn values_of<'a>(&'a self, name: &str) -> Box<dyn Iterator<Item = &'a CellValue> + 'a> {
        match self.source.column_id(name) {
            Some(id) => Box::new(self.column_values(id)),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Narrow this view further with `selection`.
    pub fn filter(&self, selection: &FilterSelection) -> FilteredDataset {
        let keys: Vec<(FilterDimension, Option<ColumnId>)> = FilterDimension::ALL
            .into_iter()
            .map(|dim| (dim, self.source.column_id(dim.column_name())))
            .collect();

        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&i| {
                let record = self.source.record(i);
                keys.iter().all(|(dim, id)| {
                    // A record without the column passes only if null is selected.
                    let value = id.map_or(&NULL, |id| record.get(id));
                    selection.allows(*dim, value)
                })
            })
            .collect();

        FilteredDataset {
            source: Arc::clone(&self.source),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Return the rows of `dataset` allowed by every dimension of `selection`.
pub fn filter(dataset: &Arc<Dataset>, selection: &FilterSelection) -> FilteredDataset {
    FilteredDataset::full(Arc::clone(dataset)).filter(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn only(dim: FilterDimension, values: &[&str], ds: &Dataset) -> FilterSelection {
        let mut selection = FilterSelection::all_observed(ds);
        selection.set(dim, values.iter().map(|v| CellValue::from(*v)).collect());
        selection
    }

    #[test]
    fn all_observed_keeps_every_row() {
        let ds = fixtures::sample_dataset();
        let view = filter(&ds, &FilterSelection::all_observed(&ds));
        assert_eq!(view.len(), ds.len());
        assert_eq!(view, FilteredDataset::full(ds.clone()));
    }

    #[test]
    fn any_empty_dimension_yields_no_rows() {
        let ds = fixtures::sample_dataset();
        for dim in FilterDimension::ALL {
            let mut selection = FilterSelection::all_observed(&ds);
            selection.select_none(dim);
            assert!(filter(&ds, &selection).is_empty(), "{dim:?}");
        }
        assert!(filter(&ds, &FilterSelection::none()).is_empty());
    }

    #[test]
    fn dimensions_combine_with_and_values_with_or() {
        let ds = fixtures::sample_dataset();
        let mut selection = only(FilterDimension::Department, &["Sales", "Human Resources"], &ds);
        selection.set(
            FilterDimension::Gender,
            [CellValue::from("Female")].into_iter().collect(),
        );
        let view = filter(&ds, &selection);

        let dept = ds.column_id(columns::DEPARTMENT).unwrap();
        let gender = ds.column_id(columns::GENDER).unwrap();
        assert_eq!(view.row_indices(), &[0, 6]);
        for record in view.records() {
            assert_eq!(record.get(gender), &CellValue::from("Female"));
            assert_ne!(record.get(dept), &CellValue::from("Research & Development"));
        }
    }

    #[test]
    fn filtered_rows_are_a_subset_in_source_order() {
        let ds = fixtures::sample_dataset();
        let selection = only(FilterDimension::EducationField, &["Medical", "Other"], &ds);
        let view = filter(&ds, &selection);

        assert!(view.row_indices().windows(2).all(|w| w[0] < w[1]));
        for (&i, record) in view.row_indices().iter().zip(view.records()) {
            assert_eq!(record, ds.record(i));
        }
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = fixtures::sample_dataset();
        let selection = only(FilterDimension::Department, &["Research & Development"], &ds);
        let once = filter(&ds, &selection);
        let twice = once.filter(&selection);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn unknown_values_match_nothing() {
        let ds = fixtures::sample_dataset();
        let selection = only(FilterDimension::Gender, &["Unknown"], &ds);
        assert!(filter(&ds, &selection).is_empty());
    }

    #[test]
    fn null_cells_pass_only_when_null_is_selected() {
        let ds = fixtures::dataset(
            &["Department", "Gender", "EducationField"],
            &[&["Sales", "Male", "Medical"], &["", "Female", "Medical"]],
        );
        let mut selection = FilterSelection::all_observed(&ds);
        assert_eq!(filter(&ds, &selection).len(), 2);

        selection.toggle(FilterDimension::Department, &CellValue::Null);
        assert_eq!(filter(&ds, &selection).row_indices(), &[0]);
    }

    #[test]
    fn toggle_and_select_all_round_trip() {
        let ds = fixtures::sample_dataset();
        let mut selection = FilterSelection::all_observed(&ds);
        let sales = CellValue::from("Sales");

        selection.toggle(FilterDimension::Department, &sales);
        assert!(!selection.allows(FilterDimension::Department, &sales));
        assert_eq!(filter(&ds, &selection).len(), 5);

        selection.select_all(FilterDimension::Department, &ds);
        assert_eq!(selection, FilterSelection::all_observed(&ds));
    }
}

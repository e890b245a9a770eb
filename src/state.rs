use std::sync::Arc;

use crate::charts::scatter::ExplorerAxes;
use crate::charts::{compute_tab, RenderedChart, Tab};
use crate::color::ColorMap;
use crate::data::error::DataLoadError;
use crate::data::filter::{filter, FilterDimension, FilterSelection, FilteredDataset};
use crate::data::model::{CellValue, ColumnId, Dataset};

const MAX_COLOR_MAP_VALUES: usize = 64;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Charts computed for one tab, reused until the inputs change.
struct TabView {
    tab: Tab,
    axes: Option<ExplorerAxes>,
    charts: Vec<RenderedChart>,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None when loading failed).
    pub dataset: Option<Arc<Dataset>>,

    /// Sidebar selections.
    pub selection: FilterSelection,

    /// Rows passing the current selection.
    pub filtered: Option<FilteredDataset>,

    pub active_tab: Tab,

    /// Columns picked in the custom exploration tab.
    pub explorer: Option<ExplorerAxes>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    tab_view: Option<TabView>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: FilterSelection::none(),
            filtered: None,
            active_tab: Tab::Overview,
            explorer: None,
            status_message: None,
            tab_view: None,
        }
    }
}

impl AppState {
    /// State for a load attempt: either a dataset or the error to show.
    pub fn from_load(result: Result<Arc<Dataset>, DataLoadError>) -> Self {
        let mut state = Self::default();
        match result {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                let e = anyhow::Error::from(e);
                log::error!("Failed to load data: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
        state
    }

    /// Ingest a loaded dataset: select everything and pick default axes.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.selection = FilterSelection::all_observed(&dataset);
        self.explorer = ExplorerAxes::defaults(&dataset);
        self.filtered = Some(FilteredDataset::full(Arc::clone(&dataset)));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.tab_view = None;
    }

    /// Recompute the filtered rows after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            let view = filter(ds, &self.selection);
            log::info!("Filter matches {} of {} records", view.len(), ds.len());
            self.filtered = Some(view);
            self.tab_view = None;
        }
    }

    pub fn visible_count(&self) -> usize {
        self.filtered.as_ref().map_or(0, FilteredDataset::len)
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle_filter_value(&mut self, dim: FilterDimension, value: &CellValue) {
        self.selection.toggle(dim, value);
        self.refilter();
    }

    /// Select all values of a dimension.
    pub fn select_all(&mut self, dim: FilterDimension) {
        if let Some(ds) = &self.dataset {
            self.selection.select_all(dim, ds);
            self.refilter();
        }
    }

    /// Deselect all values of a dimension.
    pub fn select_none(&mut self, dim: FilterDimension) {
        self.selection.select_none(dim);
        self.refilter();
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Replace the explorer axes; ignored before a dataset is loaded.
    pub fn set_explorer_axes(&mut self, axes: ExplorerAxes) {
        if self.dataset.is_some() {
            self.explorer = Some(axes);
        }
    }

    /// Recompute the active tab's charts if the selection, tab or explorer
    /// axes changed since they were last computed.
    pub fn refresh_charts(&mut self) {
        let Some(view) = &self.filtered else {
            self.tab_view = None;
            return;
        };
        let stale = match &self.tab_view {
            Some(cached) => cached.tab != self.active_tab || cached.axes != self.explorer,
            None => true,
        };
        if stale {
            log::debug!(
                "Computing {} charts for {} rows",
                self.active_tab.label(),
                view.len()
            );
            self.tab_view = Some(TabView {
                tab: self.active_tab,
                axes: self.explorer,
                charts: compute_tab(self.active_tab, view, self.explorer),
            });
        }
    }

    /// Charts last computed by [`refresh_charts`](Self::refresh_charts).
    pub fn charts(&self) -> &[RenderedChart] {
        match &self.tab_view {
            Some(cached) => &cached.charts,
            None => &[],
        }
    }

    pub fn active_charts(&mut self) -> &[RenderedChart] {
        self.refresh_charts();
        self.charts()
    }

    /// Colour map for a column of the full dataset; `None` for unknown
    /// columns and for columns with too many values to tell apart.
    pub fn color_map(&self, column: &str) -> Option<ColorMap> {
        let ds = self.dataset.as_ref()?;
        let id: ColumnId = ds.column_id(column)?;
        let values = ds.unique_values(id);
        (values.len() <= MAX_COLOR_MAP_VALUES).then(|| ColorMap::new(column, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::data::model::columns;

    fn loaded() -> AppState {
        AppState::from_load(Ok(fixtures::sample_dataset()))
    }

    #[test]
    fn load_selects_everything() {
        let state = loaded();
        assert_eq!(state.visible_count(), fixtures::SAMPLE_ROWS.len());
        assert!(state.status_message.is_none());
        assert!(state.explorer.is_some());
    }

    #[test]
    fn load_failure_is_reported() {
        let state = AppState::from_load(Err(DataLoadError::MissingColumns(vec![
            "Department".to_string(),
        ])));
        assert!(state.dataset.is_none());
        assert_eq!(state.visible_count(), 0);
        let message = state.status_message.unwrap();
        assert!(message.contains("Department"), "{message}");
    }

    #[test]
    fn load_failure_message_includes_the_cause() {
        let state = AppState::from_load(Err(DataLoadError::Io {
            path: "EA.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        }));
        let message = state.status_message.unwrap();
        assert!(message.starts_with("Error: reading EA.csv"), "{message}");
        assert!(message.contains("permission denied"), "{message}");
    }

    #[test]
    fn filter_changes_recompute_rows_and_charts() {
        let mut state = loaded();
        let before = state.active_charts().to_vec();

        state.select_none(FilterDimension::Gender);
        assert_eq!(state.visible_count(), 0);
        let after = state.active_charts().to_vec();
        assert_ne!(before, after);

        state.select_all(FilterDimension::Gender);
        assert_eq!(state.visible_count(), fixtures::SAMPLE_ROWS.len());
        assert_eq!(state.active_charts(), before.as_slice());
    }

    #[test]
    fn toggling_a_value_hides_its_rows() {
        let mut state = loaded();
        state.toggle_filter_value(FilterDimension::Department, &CellValue::from("Sales"));
        assert_eq!(state.visible_count(), 5);
    }

    #[test]
    fn charts_follow_the_active_tab_and_axes() {
        let mut state = loaded();
        state.set_tab(Tab::CustomExploration);
        assert_eq!(state.active_charts().len(), Tab::CustomExploration.charts().len());
        assert_eq!(state.active_charts()[0].title, "16. Explore Any Two Variables");

        let ds = state.dataset.clone().unwrap();
        let mut axes = state.explorer.unwrap();
        axes.color = ds.column_id(columns::GENDER).unwrap();
        state.set_explorer_axes(axes);
        match &state.active_charts()[0].chart {
            crate::charts::Chart::Scatter(data) => assert_eq!(data.color_column, columns::GENDER),
            other => panic!("unexpected chart {other:?}"),
        }
    }

    #[test]
    fn color_map_uses_full_dataset_values() {
        let mut state = loaded();
        state.select_none(FilterDimension::Department);
        let map = state.color_map(columns::ATTRITION).unwrap();
        assert_ne!(
            map.color_for(&CellValue::from("Yes")),
            map.color_for(&CellValue::from("No"))
        );
        assert!(state.color_map("Missing").is_none());
    }
}

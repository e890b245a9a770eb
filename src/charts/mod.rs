//! Chart layer: turns a filtered view into plain chart data.
//!
//! Nothing here touches egui; `ui::plot` and `ui::table` draw the results.
//! Every chart is a pure function of the [`FilteredDataset`] (and, for the
//! explorer, of the columns picked from the full schema).

pub mod bars;
pub mod boxplot;
pub mod correlation;
pub mod histogram;
pub mod scatter;

use crate::data::filter::FilteredDataset;
use crate::data::model::{columns, CellValue};

use bars::BarGroups;
use boxplot::BoxPlotData;
use correlation::CorrelationMatrix;
use histogram::{BinRule, NumericHistogram};
use scatter::{ExplorerAxes, ScatterData};

// ---------------------------------------------------------------------------
// Shared chart vocabulary
// ---------------------------------------------------------------------------

/// How several bar series share an x position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarMode {
    Group,
    Overlay,
    Stack,
}

/// What decides a series' colour.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesKey {
    /// A value of the colour column.
    Value(CellValue),
    /// Band `index` of `of` equal-width numeric bands.
    Band { index: usize, of: usize },
    /// Single-series chart.
    Single,
}

// ---------------------------------------------------------------------------
// Tabs and chart catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Overview,
    AttritionDrivers,
    SalarySatisfaction,
    ExperienceTenure,
    CustomExploration,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::AttritionDrivers,
        Tab::SalarySatisfaction,
        Tab::ExperienceTenure,
        Tab::CustomExploration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::AttritionDrivers => "Attrition Drivers",
            Tab::SalarySatisfaction => "Salary & Satisfaction",
            Tab::ExperienceTenure => "Experience & Tenure",
            Tab::CustomExploration => "Custom Exploration",
        }
    }

    /// Charts shown on this tab, in display order.
    pub fn charts(self) -> &'static [ChartDef] {
        match self {
            Tab::Overview => OVERVIEW,
            Tab::AttritionDrivers => DRIVERS,
            Tab::SalarySatisfaction => SALARY,
            Tab::ExperienceTenure => TENURE,
            Tab::CustomExploration => EXPLORATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Row counts of a categorical column split by attrition.
    CategoryHistogram { x: &'static str, mode: BarMode },
    /// Binned numeric column split by attrition.
    NumericHistogram {
        x: &'static str,
        bins: BinRule,
        mode: BarMode,
    },
    /// Distribution of a numeric column per attrition value.
    BoxPlot { y: &'static str },
    Scatter { x: &'static str, y: &'static str },
    CustomScatter,
    RawTable,
    AttritionCounts,
    DepartmentAttritionRate,
    CorrelationHeatmap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartDef {
    pub title: &'static str,
    pub kind: ChartKind,
}

const fn grouped(title: &'static str, x: &'static str) -> ChartDef {
    ChartDef {
        title,
        kind: ChartKind::CategoryHistogram {
            x,
            mode: BarMode::Group,
        },
    }
}

const fn stacked(title: &'static str, x: &'static str, bins: BinRule) -> ChartDef {
    ChartDef {
        title,
        kind: ChartKind::NumericHistogram {
            x,
            bins,
            mode: BarMode::Stack,
        },
    }
}

const fn boxed(title: &'static str, y: &'static str) -> ChartDef {
    ChartDef {
        title,
        kind: ChartKind::BoxPlot { y },
    }
}

const OVERVIEW: &[ChartDef] = &[
    grouped("1. Attrition Rate by Department", columns::DEPARTMENT),
    ChartDef {
        title: "2. Age Distribution",
        kind: ChartKind::NumericHistogram {
            x: columns::AGE,
            bins: BinRule::Auto,
            mode: BarMode::Overlay,
        },
    },
    grouped("3. Gender Distribution", columns::GENDER),
];

const DRIVERS: &[ChartDef] = &[
    grouped("4. Attrition by Job Role", columns::JOB_ROLE),
    grouped("5. Attrition by Overtime", columns::OVER_TIME),
    boxed("6. Attrition by Distance From Home", columns::DISTANCE_FROM_HOME),
    grouped("7. Attrition by Business Travel", columns::BUSINESS_TRAVEL),
];

const SALARY: &[ChartDef] = &[
    boxed("8. Monthly Income Distribution", columns::MONTHLY_INCOME),
    ChartDef {
        title: "9. Satisfaction vs Monthly Income",
        kind: ChartKind::Scatter {
            x: columns::MONTHLY_INCOME,
            y: columns::JOB_SATISFACTION,
        },
    },
    stacked("10. Job Satisfaction Distribution", columns::JOB_SATISFACTION, BinRule::Auto),
    stacked("11. Work-Life Balance Distribution", columns::WORK_LIFE_BALANCE, BinRule::Auto),
];

const TENURE: &[ChartDef] = &[
    boxed("12. Total Working Years vs Attrition", columns::TOTAL_WORKING_YEARS),
    stacked("13. Years at Company", columns::YEARS_AT_COMPANY, BinRule::Count(20)),
    stacked("14. Years in Current Role", columns::YEARS_IN_CURRENT_ROLE, BinRule::Count(15)),
    stacked("15. Years with Current Manager", columns::YEARS_WITH_CURR_MANAGER, BinRule::Auto),
];

const EXPLORATION: &[ChartDef] = &[
    ChartDef {
        title: "16. Explore Any Two Variables",
        kind: ChartKind::CustomScatter,
    },
    ChartDef {
        title: "17. Data Table View",
        kind: ChartKind::RawTable,
    },
    ChartDef {
        title: "18. Attrition Counts",
        kind: ChartKind::AttritionCounts,
    },
    ChartDef {
        title: "19. Department-wise Attrition %",
        kind: ChartKind::DepartmentAttritionRate,
    },
    ChartDef {
        title: "20. Correlation Heatmap",
        kind: ChartKind::CorrelationHeatmap,
    },
];

// ---------------------------------------------------------------------------
// Computed charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bars(BarGroups),
    Histogram(NumericHistogram),
    Boxes(BoxPlotData),
    Scatter(ScatterData),
    /// Drawn straight from the filtered rows.
    Table,
    Correlation(CorrelationMatrix),
}

impl ChartDef {
    pub fn compute(&self, view: &FilteredDataset, axes: Option<ExplorerAxes>) -> Chart {
        match self.kind {
            ChartKind::CategoryHistogram { x, mode } => {
                Chart::Bars(bars::category_histogram(view, x, columns::ATTRITION, mode))
            }
            ChartKind::NumericHistogram { x, bins, mode } => Chart::Histogram(
                histogram::numeric_histogram(view, x, columns::ATTRITION, bins, mode),
            ),
            ChartKind::BoxPlot { y } => Chart::Boxes(boxplot::box_plot(view, columns::ATTRITION, y)),
            ChartKind::Scatter { x, y } => {
                Chart::Scatter(scatter::scatter_named(view, x, y, columns::ATTRITION))
            }
            ChartKind::CustomScatter => Chart::Scatter(
                axes.map(|axes| scatter::scatter(view, axes))
                    .unwrap_or_default(),
            ),
            ChartKind::RawTable => Chart::Table,
            ChartKind::AttritionCounts => Chart::Bars(bars::attrition_counts(view)),
            ChartKind::DepartmentAttritionRate => {
                Chart::Bars(bars::department_attrition_rates(view))
            }
            ChartKind::CorrelationHeatmap => {
                Chart::Correlation(correlation::correlation_matrix(view))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub title: &'static str,
    pub chart: Chart,
}

/// Compute every chart of `tab` from the current view.
pub fn compute_tab(
    tab: Tab,
    view: &FilteredDataset,
    axes: Option<ExplorerAxes>,
) -> Vec<RenderedChart> {
    tab.charts()
        .iter()
        .map(|def| RenderedChart {
            title: def.title,
            chart: def.compute(view, axes),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, FilterSelection};
    use crate::data::fixtures;

    #[test]
    fn catalogue_has_twenty_numbered_charts() {
        let titles: Vec<&str> = Tab::ALL
            .iter()
            .flat_map(|tab| tab.charts().iter().map(|c| c.title))
            .collect();
        assert_eq!(titles.len(), 20);
        for (i, title) in titles.iter().enumerate() {
            assert!(title.starts_with(&format!("{}. ", i + 1)), "{title}");
        }
    }

    #[test]
    fn every_tab_computes_on_full_and_empty_views() {
        let ds = fixtures::sample_dataset();
        let axes = scatter::ExplorerAxes::defaults(&ds);
        let full = FilteredDataset::full(ds.clone());
        let empty = filter(&ds, &FilterSelection::none());
        for tab in Tab::ALL {
            assert_eq!(compute_tab(tab, &full, axes).len(), tab.charts().len());
            assert_eq!(compute_tab(tab, &empty, axes).len(), tab.charts().len());
        }
    }

    #[test]
    fn fixed_charts_colour_by_attrition() {
        let view = FilteredDataset::full(fixtures::sample_dataset());
        match OVERVIEW[0].compute(&view, None) {
            Chart::Bars(bars) => {
                assert_eq!(bars.series_column.as_deref(), Some(columns::ATTRITION));
                assert_eq!(bars.mode, BarMode::Group);
            }
            other => panic!("unexpected chart {other:?}"),
        }
        match TENURE[1].compute(&view, None) {
            Chart::Histogram(hist) => assert_eq!(hist.bin_count(), 20),
            other => panic!("unexpected chart {other:?}"),
        }
    }

    #[test]
    fn custom_scatter_without_axes_is_empty() {
        let view = FilteredDataset::full(fixtures::sample_dataset());
        assert_eq!(
            EXPLORATION[0].compute(&view, None),
            Chart::Scatter(ScatterData::default())
        );
    }
}

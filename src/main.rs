use std::path::Path;

use attrition_dashboard::app::AttritionDashboardApp;
use attrition_dashboard::config::{DashboardConfig, CONFIG_FILE};
use attrition_dashboard::data::loader::DatasetCache;
use attrition_dashboard::state::AppState;
use attrition_dashboard::ui::panels::TITLE;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));
    log::info!("Loading data from {}", config.data_path.display());

    // Process-wide dataset: loaded once here, shared read-only afterwards.
    let cache = DatasetCache::new(&config.data_path);
    let state = AppState::from_load(cache.load());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(AttritionDashboardApp::new(state, config)))),
    )
}

mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::PowerMetricsApp;
use config::AppConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::from_args(std::env::args().skip(1));
    let path = config.data_path.clone();

    // A dataset that cannot be read ends the session before any window opens.
    let dataset = data::loader::load_file(&path)
        .with_context(|| format!("loading results from {}", path.display()))?;
    log::info!(
        "Loaded {} results from {} with columns {:?}",
        dataset.len(),
        path.display(),
        dataset.columns()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };
    let title = config.title.clone();

    let mut state = AppState::new(config);
    state.set_dataset(path, dataset);

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the header image.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(PowerMetricsApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the UI: {e}"))
}

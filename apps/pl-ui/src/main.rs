#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::PhyslabApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    // Optional lab config path as the only argument.
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match pl_app::load_config_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to default config");
            pl_app::LabConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("physlab"),
        ..Default::default()
    };

    eframe::run_native(
        "physlab",
        options,
        Box::new(|cc| Ok(Box::new(PhyslabApp::new(cc, config, config_path)))),
    )
}

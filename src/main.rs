//! Data Graph Explorer - CSV Data Exploration & Interactive Graph Viewer
//!
//! Load a CSV from a URL or a local file, pick two columns and a chart type,
//! and get the chart plus a one-line interpretation.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use config::ExplorerConfig;
use eframe::egui;
use gui::ExplorerApp;
use tracing::info;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init();
}

fn main() -> eframe::Result<()> {
    init_tracing();

    let config = ExplorerConfig::default();
    info!(default_url = %config.default_url, "starting Data Graph Explorer");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title("Data Graph Explorer"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Data Graph Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(config)))),
    )
}

//! US Population Dashboard
//!
//! Interactive view of US state population figures with year-over-year
//! migration metrics, a choropleth map, a heatmap and a ranked table.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::{anyhow, Context};
use config::DashboardConfig;
use data::DataLoader;
use eframe::egui;
use gui::PopulationDashboard;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DashboardConfig::load().context("invalid dashboard configuration")?;
    info!(path = %config.data_path.display(), theme = %config.theme, "starting dashboard");

    let table = DataLoader::new(config.data_path.clone())
        .load()
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;
    info!(
        records = table.len(),
        years = table.years().len(),
        states = table.states().len(),
        "dataset ready"
    );

    let app = PopulationDashboard::new(table, &config).context("failed to build initial view")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("US Population Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "US Population Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("eframe error: {e}"))
}

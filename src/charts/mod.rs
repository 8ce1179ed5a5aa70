//! Charts module - descriptors, themes and rendering

mod descriptor;
mod format;
mod plotter;
mod renderer;
mod theme;
mod tiles;

pub use descriptor::DashboardView;
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use theme::{ColorTheme, UnknownTheme};

//! US Population Dashboard Main Application
//! Main window with the control panel and the dashboard columns.

use crate::charts::{DashboardView, StaticChartRenderer};
use crate::config::DashboardConfig;
use crate::data::PopulationTable;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, StatusKind};
use crate::stats::SelectionError;
use egui::SidePanel;
use std::path::Path;
use tracing::{debug, error};

const SNAPSHOT_WIDTH: u32 = 1400;
const SNAPSHOT_HEIGHT: u32 = 1000;

/// Main application window.
pub struct PopulationDashboard {
    table: PopulationTable,
    migration_threshold: i64,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl PopulationDashboard {
    /// Build the dashboard with the newest year selected.
    pub fn new(table: PopulationTable, config: &DashboardConfig) -> Result<Self, SelectionError> {
        let control_panel = ControlPanel::new(table.years_descending(), config.theme);
        let view = DashboardView::build(
            &table,
            control_panel.selected_year,
            control_panel.theme,
            config.migration_threshold,
        )?;

        Ok(Self {
            table,
            migration_threshold: config.migration_threshold,
            control_panel,
            chart_viewer: ChartViewer::new(view),
        })
    }

    /// Rebuild descriptors for the current year and theme.
    fn rebuild_view(&mut self) {
        let year = self.control_panel.selected_year;
        let theme = self.control_panel.theme;
        match DashboardView::build(&self.table, year, theme, self.migration_threshold) {
            Ok(view) => {
                debug!(year, %theme, "rebuilt dashboard view");
                self.chart_viewer.set_view(view);
                self.control_panel
                    .set_status(StatusKind::Info, format!("Showing {year}"));
            }
            Err(e) => {
                error!(year, error = %e, "failed to rebuild dashboard view");
                self.control_panel
                    .set_status(StatusKind::Error, format!("Error: {e}"));
            }
        }
    }

    fn handle_export_png(&mut self) {
        let Some(view) = self.chart_viewer.view() else {
            self.control_panel
                .set_status(StatusKind::Error, "Nothing to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("us_population_{}.png", view.year))
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        self.export_png_to(&output_path);
    }

    fn export_png_to(&mut self, path: &Path) {
        let Some(view) = self.chart_viewer.view() else {
            return;
        };
        match StaticChartRenderer::render_snapshot_png(view, path, SNAPSHOT_WIDTH, SNAPSHOT_HEIGHT)
        {
            Ok(()) => self
                .control_panel
                .set_status(StatusKind::Success, format!("Snapshot saved: {}", path.display())),
            Err(e) => {
                error!(path = %path.display(), error = %e, "snapshot export failed");
                self.control_panel
                    .set_status(StatusKind::Error, format!("Render error: {e}"));
            }
        }
    }

    fn handle_export_json(&mut self) {
        let Some(view) = self.chart_viewer.view() else {
            self.control_panel
                .set_status(StatusKind::Error, "Nothing to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(format!("us_population_{}.json", view.year))
            .save_file()
        {
            Some(path) => path,
            None => return,
        };

        self.export_json_to(&output_path);
    }

    fn export_json_to(&mut self, path: &Path) {
        let Some(view) = self.chart_viewer.view() else {
            return;
        };
        match StaticChartRenderer::write_json(view, path) {
            Ok(()) => self
                .control_panel
                .set_status(StatusKind::Success, format!("Dashboard saved: {}", path.display())),
            Err(e) => {
                error!(path = %path.display(), error = %e, "json export failed");
                self.control_panel
                    .set_status(StatusKind::Error, format!("Export error: {e}"));
            }
        }
    }
}

impl eframe::App for PopulationDashboard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::SelectionChanged => self.rebuild_view(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::ExportJson => self.handle_export_json(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ColorTheme;
    use crate::data::sample_table;

    fn app() -> PopulationDashboard {
        PopulationDashboard::new(sample_table(), &DashboardConfig::default()).unwrap()
    }

    #[test]
    fn test_starts_on_newest_year() {
        let app = app();
        let view = app.chart_viewer.view().unwrap();
        assert_eq!(view.year, 2012);
        assert_eq!(view.theme, ColorTheme::Blues);
    }

    #[test]
    fn test_selection_change_rebuilds_view() {
        let mut app = app();
        app.control_panel.select_year(2010);
        app.control_panel.select_theme(ColorTheme::Inferno);
        app.rebuild_view();

        let view = app.chart_viewer.view().unwrap();
        assert_eq!(view.year, 2010);
        assert_eq!(view.theme, ColorTheme::Inferno);
        assert!(!view.summary.applicable);
        assert_eq!(app.control_panel.status_kind, StatusKind::Info);
    }

    #[test]
    fn test_export_json_reports_success() {
        let mut app = app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        app.export_json_to(&path);

        assert!(path.exists());
        assert_eq!(app.control_panel.status_kind, StatusKind::Success);
    }

    #[test]
    fn test_export_json_reports_failure() {
        let mut app = app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");

        app.export_json_to(&path);

        assert_eq!(app.control_panel.status_kind, StatusKind::Error);
        assert!(app.control_panel.status.starts_with("Export error"));
    }
}

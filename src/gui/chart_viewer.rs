//! Chart Viewer Widget
//! Central area laid out as three columns with width ratio 1.5 : 4.5 : 2.

use crate::charts::{ChartPlotter, DashboardView};
use egui::{RichText, ScrollArea};

const COLUMN_RATIO: [f32; 3] = [1.5, 4.5, 2.0];
const COLUMN_SPACING: f32 = 15.0;
const MAP_HEIGHT: f32 = 360.0;
const HEATMAP_HEIGHT: f32 = 320.0;

/// Split `total` width into the three column widths.
pub fn column_widths(total: f32) -> [f32; 3] {
    let usable = (total - 2.0 * COLUMN_SPACING).max(0.0);
    let sum: f32 = COLUMN_RATIO.iter().sum();
    COLUMN_RATIO.map(|r| usable * r / sum)
}

/// Displays the descriptors of the current selection.
#[derive(Default)]
pub struct ChartViewer {
    view: Option<DashboardView>,
}

impl ChartViewer {
    pub fn new(view: DashboardView) -> Self {
        Self { view: Some(view) }
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn set_view(&mut self, view: DashboardView) {
        self.view = Some(view);
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let [left, middle, right] = column_widths(ui.available_width());

        ScrollArea::vertical()
            .id_salt("dashboard")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(left);
                        Self::gains_losses_column(ui, view);
                    });
                    ui.add_space(COLUMN_SPACING);
                    ui.vertical(|ui| {
                        ui.set_width(middle);
                        Self::population_column(ui, view);
                    });
                    ui.add_space(COLUMN_SPACING);
                    ui.vertical(|ui| {
                        ui.set_width(right);
                        Self::top_states_column(ui, view);
                    });
                });
            });
    }

    fn gains_losses_column(ui: &mut egui::Ui, view: &DashboardView) {
        ui.label(RichText::new("Gains/Losses").size(16.0).strong());
        ui.add_space(5.0);
        for card in &view.gains_losses {
            ChartPlotter::draw_metric_card(ui, card);
            ui.add_space(8.0);
        }

        ui.add_space(10.0);
        ui.label(RichText::new("States Migration").size(16.0).strong());
        ui.add_space(5.0);
        ui.vertical_centered(|ui| {
            ui.label("Inbound");
            ChartPlotter::draw_donut(ui, &view.inbound);
            ui.add_space(5.0);
            ui.label("Outbound");
            ChartPlotter::draw_donut(ui, &view.outbound);
        });
    }

    fn population_column(ui: &mut egui::Ui, view: &DashboardView) {
        ui.label(RichText::new("Total Population").size(16.0).strong());
        ui.add_space(5.0);
        ChartPlotter::draw_choropleth(ui, &view.choropleth, MAP_HEIGHT);
        ui.add_space(10.0);
        ChartPlotter::draw_heatmap(ui, &view.heatmap, HEATMAP_HEIGHT);
    }

    fn top_states_column(ui: &mut egui::Ui, view: &DashboardView) {
        ui.label(RichText::new("Top States").size(16.0).strong());
        ui.add_space(5.0);
        ui.allocate_ui(
            egui::vec2(ui.available_width(), MAP_HEIGHT + HEATMAP_HEIGHT - 80.0),
            |ui| ChartPlotter::draw_top_states(ui, &view.top_states),
        );

        ui.add_space(10.0);
        egui::CollapsingHeader::new("About")
            .default_open(true)
            .show(ui, |ui| {
                for line in &view.about {
                    ui.label(RichText::new(line).size(12.0));
                    ui.add_space(3.0);
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_widths_follow_ratio() {
        let [a, b, c] = column_widths(830.0);
        assert!((a - 150.0).abs() < 1e-3);
        assert!((b - 450.0).abs() < 1e-3);
        assert!((c - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_column_widths_never_negative() {
        assert_eq!(column_widths(10.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_viewer() {
        assert!(ChartViewer::default().view().is_none());
    }
}

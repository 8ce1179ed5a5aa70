//! Control Panel Widget
//! Left sidebar with the year and theme selectors, export actions and status.

use crate::charts::ColorTheme;
use egui::{Color32, ComboBox, RichText};

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    fn color(self) -> Color32 {
        match self {
            StatusKind::Info => Color32::GRAY,
            StatusKind::Success => Color32::from_rgb(40, 167, 69),
            StatusKind::Error => Color32::from_rgb(220, 53, 69),
        }
    }
}

/// Sidebar state: the selectable years (newest first) and the current choices.
pub struct ControlPanel {
    pub years: Vec<i64>,
    pub selected_year: i64,
    pub theme: ColorTheme,
    pub status: String,
    pub status_kind: StatusKind,
}

impl ControlPanel {
    /// `years` must be non-empty; the newest year is selected first.
    pub fn new(years: Vec<i64>, theme: ColorTheme) -> Self {
        let selected_year = years.first().copied().unwrap_or_default();
        Self {
            years,
            selected_year,
            theme,
            status: "Ready".to_string(),
            status_kind: StatusKind::Info,
        }
    }

    pub fn set_status(&mut self, kind: StatusKind, status: impl Into<String>) {
        self.status_kind = kind;
        self.status = status.into();
    }

    /// Select `year` if it is one of the listed years.
    pub fn select_year(&mut self, year: i64) -> bool {
        if self.years.contains(&year) && year != self.selected_year {
            self.selected_year = year;
            true
        } else {
            false
        }
    }

    pub fn select_theme(&mut self, theme: ColorTheme) -> bool {
        let changed = theme != self.theme;
        self.theme = theme;
        changed
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏂 US Population Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(41, 181, 232)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        let label_width = 90.0;
        let combo_width = 150.0;

        // Year, newest first
        let mut picked_year = None;
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select a year"));
            ComboBox::from_id_salt("year")
                .width(combo_width)
                .selected_text(self.selected_year.to_string())
                .show_ui(ui, |ui| {
                    for &year in &self.years {
                        if ui
                            .selectable_label(self.selected_year == year, year.to_string())
                            .clicked()
                        {
                            picked_year = Some(year);
                        }
                    }
                });
        });
        if let Some(year) = picked_year {
            if self.select_year(year) {
                action = ControlPanelAction::SelectionChanged;
            }
        }

        ui.add_space(5.0);

        let mut picked_theme = None;
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Color theme"));
            ComboBox::from_id_salt("theme")
                .width(combo_width)
                .selected_text(self.theme.name())
                .show_ui(ui, |ui| {
                    for theme in ColorTheme::ALL {
                        if ui
                            .selectable_label(self.theme == theme, theme.name())
                            .clicked()
                        {
                            picked_theme = Some(theme);
                        }
                    }
                });
        });
        if let Some(theme) = picked_theme {
            if self.select_theme(theme) {
                action = ControlPanelAction::SelectionChanged;
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.label(RichText::new("📤 Export").size(14.0).strong());
        ui.add_space(5.0);
        ui.vertical_centered(|ui| {
            let png = egui::Button::new(RichText::new("🖼 Snapshot PNG").size(14.0))
                .min_size(egui::vec2(170.0, 30.0));
            if ui.add(png).clicked() {
                action = ControlPanelAction::ExportPng;
            }
            ui.add_space(5.0);
            let json = egui::Button::new(RichText::new("📄 Dashboard JSON").size(14.0))
                .min_size(egui::vec2(170.0, 30.0));
            if ui.add(json).clicked() {
                action = ControlPanelAction::ExportJson;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(
            RichText::new(&self.status)
                .size(11.0)
                .color(self.status_kind.color()),
        );

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    ExportPng,
    ExportJson,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ControlPanel {
        ControlPanel::new(vec![2019, 2018, 2017], ColorTheme::Blues)
    }

    #[test]
    fn test_newest_year_selected_first() {
        let panel = panel();
        assert_eq!(panel.selected_year, 2019);
        assert_eq!(panel.status, "Ready");
    }

    #[test]
    fn test_select_year() {
        let mut panel = panel();
        assert!(panel.select_year(2017));
        assert_eq!(panel.selected_year, 2017);

        assert!(!panel.select_year(2017));
        assert!(!panel.select_year(2009));
        assert_eq!(panel.selected_year, 2017);
    }

    #[test]
    fn test_select_theme() {
        let mut panel = panel();
        assert!(!panel.select_theme(ColorTheme::Blues));
        assert!(panel.select_theme(ColorTheme::Viridis));
        assert_eq!(panel.theme, ColorTheme::Viridis);
    }

    #[test]
    fn test_status() {
        let mut panel = panel();
        panel.set_status(StatusKind::Error, "Error: disk full");
        assert_eq!(panel.status_kind, StatusKind::Error);
        assert_eq!(panel.status, "Error: disk full");
    }
}

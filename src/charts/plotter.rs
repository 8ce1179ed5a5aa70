//! Chart Plotter Module
//! Draws dashboard descriptors with egui and egui_plot.

use crate::charts::descriptor::{
    ChoroplethMap, DonutChart, Heatmap, MetricCard, TopStatesTable,
};
use crate::charts::format::{format_number, format_thousands};
use crate::charts::tiles::{GRID_COLS, GRID_ROWS};
use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Shape, Stroke, Vec2};
use egui_plot::{GridMark, Plot, PlotPoints, Polygon};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Text color used inside the donuts
pub const DONUT_TEXT_COLOR: Color32 = Color32::from_rgb(41, 181, 232);
pub const GAIN_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
pub const LOSS_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

const DONUT_SIZE: f32 = 130.0;
const DONUT_RING_WIDTH: f32 = 20.0;
const LEGEND_STEPS: usize = 48;

/// Draws dashboard panels from descriptors.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Metric card: label, large value, colored delta.
    pub fn draw_metric_card(ui: &mut egui::Ui, card: &MetricCard) {
        let delta_color = match card.trend {
            Some(t) if t > 0 => GAIN_COLOR,
            Some(t) if t < 0 => LOSS_COLOR,
            _ => Color32::GRAY,
        };
        let arrow = match card.trend {
            Some(t) if t > 0 => "↑ ",
            Some(t) if t < 0 => "↓ ",
            _ => "",
        };

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(&card.label).size(13.0).color(Color32::GRAY));
                ui.label(RichText::new(&card.value).size(26.0).strong());
                ui.label(
                    RichText::new(format!("{}{}", arrow, card.delta))
                        .size(13.0)
                        .color(delta_color),
                );
            });
    }

    /// Points along an arc, clockwise from twelve o'clock.
    pub fn arc_points(center: Pos2, radius: f32, fraction: f32) -> Vec<Pos2> {
        let fraction = fraction.clamp(0.0, 1.0);
        let segments = ((64.0 * fraction).ceil() as usize).max(1);
        let start = -FRAC_PI_2;
        let sweep = TAU * fraction;

        (0..=segments)
            .map(|i| {
                let angle = start + sweep * i as f32 / segments as f32;
                center + Vec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect()
    }

    /// Donut with the percentage in the middle.
    pub fn draw_donut(ui: &mut egui::Ui, donut: &DonutChart) {
        let (rect, response) =
            ui.allocate_exact_size(Vec2::splat(DONUT_SIZE), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = DONUT_SIZE / 2.0 - DONUT_RING_WIDTH / 2.0 - 2.0;

        painter.circle_stroke(
            center,
            radius,
            Stroke::new(DONUT_RING_WIDTH, donut.shade.to_color32()),
        );

        if donut.percent > 0 {
            let points = Self::arc_points(center, radius, donut.fraction());
            painter.add(Shape::line(
                points,
                Stroke::new(DONUT_RING_WIDTH, donut.highlight.to_color32()),
            ));
        }

        painter.text(
            center,
            Align2::CENTER_CENTER,
            format!("{} %", donut.percent),
            FontId::proportional(26.0),
            DONUT_TEXT_COLOR,
        );

        response.on_hover_text(&donut.title);
    }

    /// Tile-grid choropleth with a color legend underneath.
    pub fn draw_choropleth(ui: &mut egui::Ui, map: &ChoroplethMap, height: f32) {
        let width = ui.available_width();
        let tile = (width / GRID_COLS as f32)
            .min(height / GRID_ROWS as f32)
            .max(8.0);
        let grid_size = Vec2::new(tile * GRID_COLS as f32, tile * GRID_ROWS as f32);

        let (rect, response) = ui.allocate_exact_size(
            Vec2::new(width, grid_size.y),
            Sense::hover(),
        );
        let origin = Pos2::new(rect.center().x - grid_size.x / 2.0, rect.top());
        let painter = ui.painter_at(rect);
        let gap = (tile * 0.06).max(1.0);

        let tile_rect = |row: usize, col: usize| {
            Rect::from_min_size(
                origin + Vec2::new(col as f32 * tile, row as f32 * tile),
                Vec2::splat(tile),
            )
            .shrink(gap)
        };

        for t in &map.tiles {
            let r = tile_rect(t.row, t.col);
            painter.rect_filled(r, 3.0, t.color.to_color32());
            painter.text(
                r.center(),
                Align2::CENTER_CENTER,
                &t.state_code,
                FontId::proportional((tile * 0.3).clamp(7.0, 14.0)),
                t.color.contrast_text().to_color32(),
            );
        }

        if let Some(pos) = response.hover_pos() {
            let rel = pos - origin;
            let hovered = (rel.x >= 0.0 && rel.y >= 0.0)
                .then(|| map.tile_at((rel.y / tile) as usize, (rel.x / tile) as usize))
                .flatten();
            if let Some(t) = hovered {
                painter.rect_stroke(tile_rect(t.row, t.col), 3.0, Stroke::new(2.0, Color32::WHITE));
                response.on_hover_text(format!(
                    "{} ({})\nPopulation: {}",
                    t.state,
                    t.state_code,
                    format_thousands(t.population)
                ));
            }
        }

        ui.add_space(6.0);
        Self::draw_legend(ui, map);

        if !map.unplaced.is_empty() {
            ui.label(
                RichText::new(format!("Not on map: {}", map.unplaced.join(", ")))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }
    }

    fn draw_legend(ui: &mut egui::Ui, map: &ChoroplethMap) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format_number(map.range.0)).size(11.0));
            let (rect, _) = ui.allocate_exact_size(Vec2::new(200.0, 12.0), Sense::hover());
            let step = rect.width() / LEGEND_STEPS as f32;
            for i in 0..LEGEND_STEPS {
                let t = i as f64 / (LEGEND_STEPS - 1) as f64;
                let r = Rect::from_min_size(
                    rect.min + Vec2::new(i as f32 * step, 0.0),
                    Vec2::new(step + 0.5, rect.height()),
                );
                ui.painter().rect_filled(r, 0.0, map.theme.sample(t).to_color32());
            }
            ui.label(RichText::new(format_number(map.range.1)).size(11.0));
            ui.label(RichText::new("Population").size(11.0).color(Color32::GRAY));
        });
    }

    /// Years x states heatmap.
    /// X-axis: state codes, Y-axis: years (first year on top)
    pub fn draw_heatmap(ui: &mut egui::Ui, heatmap: &Heatmap, height: f32) {
        let n_years = heatmap.years.len();
        let n_states = heatmap.states.len();
        if n_years == 0 || n_states == 0 {
            ui.label("No Data");
            return;
        }

        let codes = heatmap.codes.clone();
        let states = heatmap.states.clone();
        let years = heatmap.years.clone();
        let y_years = heatmap.years.clone();
        let hover = heatmap.clone();

        let x_marks: Vec<GridMark> = (0..n_states)
            .map(|i| GridMark {
                value: i as f64 + 0.5,
                step_size: 1.0,
            })
            .collect();
        let y_marks: Vec<GridMark> = (0..n_years)
            .map(|i| GridMark {
                value: i as f64 + 0.5,
                step_size: 1.0,
            })
            .collect();

        Plot::new(format!("heatmap_{}", heatmap.theme))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_grid(false)
            .include_x(0.0)
            .include_x(n_states as f64)
            .include_y(0.0)
            .include_y(n_years as f64)
            .y_axis_label("Year")
            .x_grid_spacer(move |_input| x_marks.clone())
            .y_grid_spacer(move |_input| y_marks.clone())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.floor();
                if idx >= 0.0 && (idx as usize) < codes.len() {
                    codes[idx as usize].clone()
                } else {
                    String::new()
                }
            })
            .y_axis_formatter(move |mark, _range| {
                Self::year_for_y(&y_years, mark.value)
                    .map(|y| y.to_string())
                    .unwrap_or_default()
            })
            .label_formatter(move |_name, point| {
                let col = point.x.floor();
                if col < 0.0 || col as usize >= states.len() {
                    return String::new();
                }
                let Some(year) = Self::year_for_y(&years, point.y) else {
                    return String::new();
                };
                let row = years.iter().position(|&y| y == year).unwrap_or(0);
                match hover.cell_at(row, col as usize) {
                    Some(cell) => format!(
                        "{} {}\n{}",
                        cell.state,
                        cell.year,
                        format_thousands(cell.population)
                    ),
                    None => format!("{} {}\nno data", states[col as usize], year),
                }
            })
            .show(ui, |plot_ui| {
                for cell in &heatmap.cells {
                    let x0 = cell.col as f64;
                    let y0 = (n_years - 1 - cell.row) as f64;
                    let points = PlotPoints::from(vec![
                        [x0, y0],
                        [x0 + 1.0, y0],
                        [x0 + 1.0, y0 + 1.0],
                        [x0, y0 + 1.0],
                    ]);
                    plot_ui.polygon(
                        Polygon::new(points)
                            .fill_color(cell.color.to_color32())
                            .stroke(Stroke::new(0.25, Color32::BLACK)),
                    );
                }
            });
    }

    /// Map a plot y coordinate back to a year; rows are drawn newest at the bottom.
    fn year_for_y(years: &[i64], y: f64) -> Option<i64> {
        let n = years.len();
        let band = y.floor();
        if band < 0.0 || band as usize >= n {
            return None;
        }
        Some(years[n - 1 - band as usize])
    }

    /// Ranked table with a population progress column.
    pub fn draw_top_states(ui: &mut egui::Ui, top: &TopStatesTable) {
        egui::ScrollArea::vertical()
            .id_salt("top_states")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("top_states_table")
                    .striped(true)
                    .num_columns(2)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("States").strong().size(12.0));
                        ui.label(RichText::new("Population").strong().size(12.0));
                        ui.end_row();

                        let bar_width = (ui.available_width() - 110.0).max(80.0);
                        for row in &top.rows {
                            ui.label(RichText::new(&row.state).size(12.0));
                            ui.add(
                                egui::ProgressBar::new(row.fraction)
                                    .desired_width(bar_width)
                                    .text(format_thousands(row.population)),
                            );
                            ui.end_row();
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_points_quarter() {
        let center = Pos2::new(0.0, 0.0);
        let points = ChartPlotter::arc_points(center, 10.0, 0.25);

        let first = points[0];
        let last = points[points.len() - 1];
        assert!((first.x - 0.0).abs() < 1e-4 && (first.y + 10.0).abs() < 1e-4);
        assert!((last.x - 10.0).abs() < 1e-3 && last.y.abs() < 1e-3);
    }

    #[test]
    fn test_arc_points_clamped() {
        let points = ChartPlotter::arc_points(Pos2::ZERO, 5.0, 3.0);
        assert_eq!(points.len(), 65);
        assert!(points.iter().all(|p| (p.to_vec2().length() - 5.0).abs() < 1e-3));
    }

    #[test]
    fn test_year_for_y() {
        let years = [2010, 2011, 2012];
        assert_eq!(ChartPlotter::year_for_y(&years, 2.5), Some(2010));
        assert_eq!(ChartPlotter::year_for_y(&years, 0.1), Some(2012));
        assert_eq!(ChartPlotter::year_for_y(&years, 3.0), None);
        assert_eq!(ChartPlotter::year_for_y(&years, -0.5), None);
    }
}

//! Static Chart Renderer
//! Renders the current dashboard selection to a PNG with plotters, and
//! writes the descriptor set as JSON.
//!
//! Layout:
//! 1. Title: "US Population {year}" plus the migration summary line
//! 2. Tile-grid choropleth with a color legend
//! 3. Years x states heatmap

use crate::charts::descriptor::DashboardView;
use crate::charts::format::format_number;
use crate::charts::tiles::{GRID_COLS, GRID_ROWS};
use plotters::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Drawing(e.to_string())
}

const MARGIN: i32 = 20;
const TITLE_H: i32 = 70;
const LEGEND_H: i32 = 30;
const AXIS_LABEL_W: i32 = 50;
const AXIS_LABEL_H: i32 = 24;

/// Pixel geometry of the snapshot image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotLayout {
    pub tile: i32,
    pub map_origin: (i32, i32),
    pub heatmap_origin: (i32, i32),
    pub cell_w: i32,
    pub cell_h: i32,
}

impl SnapshotLayout {
    /// Map takes the upper half below the title, heatmap the rest.
    pub fn new(width: u32, height: u32, n_states: usize, n_years: usize) -> Self {
        let width = width as i32;
        let height = height as i32;
        let content_h = (height - TITLE_H - 2 * MARGIN).max(100);
        let map_h = content_h / 2 - LEGEND_H;

        let tile = ((width - 2 * MARGIN) / GRID_COLS as i32)
            .min(map_h / GRID_ROWS as i32)
            .max(4);
        let map_w = tile * GRID_COLS as i32;
        let map_origin = ((width - map_w) / 2, MARGIN + TITLE_H);

        let heatmap_top = map_origin.1 + tile * GRID_ROWS as i32 + LEGEND_H + MARGIN;
        let heatmap_h = (height - heatmap_top - MARGIN - AXIS_LABEL_H).max(n_years as i32);
        let cell_w = ((width - 2 * MARGIN - AXIS_LABEL_W) / n_states.max(1) as i32).max(1);
        let cell_h = (heatmap_h / n_years.max(1) as i32).max(1);

        Self {
            tile,
            map_origin,
            heatmap_origin: (MARGIN + AXIS_LABEL_W, heatmap_top),
            cell_w,
            cell_h,
        }
    }

    /// Corners of a map tile, with a one-pixel gutter.
    pub fn tile_rect(&self, row: usize, col: usize) -> [(i32, i32); 2] {
        let x = self.map_origin.0 + col as i32 * self.tile;
        let y = self.map_origin.1 + row as i32 * self.tile;
        [(x + 1, y + 1), (x + self.tile - 1, y + self.tile - 1)]
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> [(i32, i32); 2] {
        let x = self.heatmap_origin.0 + col as i32 * self.cell_w;
        let y = self.heatmap_origin.1 + row as i32 * self.cell_h;
        [(x, y), (x + self.cell_w, y + self.cell_h)]
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the map and heatmap of `view` to a PNG file.
    pub fn render_snapshot_png(
        view: &DashboardView,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let heatmap = &view.heatmap;
        let layout = SnapshotLayout::new(width, height, heatmap.states.len(), heatmap.years.len());

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        // Title
        let title_style = ("sans-serif", 28.0).into_font().color(&BLACK);
        root.draw(&Text::new(
            format!("US Population {}", view.year),
            (MARGIN, MARGIN),
            title_style,
        ))
        .map_err(draw_err)?;

        let summary_style = ("sans-serif", 16.0).into_font().color(&BLACK);
        root.draw(&Text::new(
            Self::summary_line(view),
            (MARGIN, MARGIN + 36),
            summary_style,
        ))
        .map_err(draw_err)?;

        // Choropleth
        let tile_font = ("sans-serif", (layout.tile / 3).clamp(8, 16) as f64).into_font();
        for t in &view.choropleth.tiles {
            let [p0, p1] = layout.tile_rect(t.row, t.col);
            root.draw(&Rectangle::new([p0, p1], t.color.to_rgb().filled()))
                .map_err(draw_err)?;
            let text_color = t.color.contrast_text().to_rgb();
            root.draw(&Text::new(
                t.state_code.clone(),
                (p0.0 + 3, p0.1 + 3),
                tile_font.clone().color(&text_color),
            ))
            .map_err(draw_err)?;
        }

        // Legend
        let legend_y = layout.map_origin.1 + layout.tile * GRID_ROWS as i32 + 8;
        let legend_x = layout.map_origin.0;
        let steps = 40;
        for i in 0..steps {
            let t = i as f64 / (steps - 1) as f64;
            let x = legend_x + 60 + i * 5;
            root.draw(&Rectangle::new(
                [(x, legend_y), (x + 5, legend_y + 12)],
                view.choropleth.theme.sample(t).to_rgb().filled(),
            ))
            .map_err(draw_err)?;
        }
        let small = ("sans-serif", 12.0).into_font().color(&BLACK);
        root.draw(&Text::new(
            format_number(view.choropleth.range.0),
            (legend_x, legend_y),
            small.clone(),
        ))
        .map_err(draw_err)?;
        root.draw(&Text::new(
            format_number(view.choropleth.range.1),
            (legend_x + 60 + steps * 5 + 8, legend_y),
            small.clone(),
        ))
        .map_err(draw_err)?;

        // Heatmap
        for cell in &heatmap.cells {
            let [p0, p1] = layout.cell_rect(cell.row, cell.col);
            root.draw(&Rectangle::new([p0, p1], cell.color.to_rgb().filled()))
                .map_err(draw_err)?;
            root.draw(&Rectangle::new([p0, p1], BLACK.mix(0.25).stroke_width(1)))
                .map_err(draw_err)?;
        }
        for (row, year) in heatmap.years.iter().enumerate() {
            let [p0, _] = layout.cell_rect(row, 0);
            root.draw(&Text::new(
                year.to_string(),
                (MARGIN, p0.1 + layout.cell_h / 2 - 6),
                small.clone(),
            ))
            .map_err(draw_err)?;
        }
        let label_font = ("sans-serif", (layout.cell_w - 2).clamp(6, 11) as f64).into_font().color(&BLACK);
        for (col, code) in heatmap.codes.iter().enumerate() {
            let [_, p1] = layout.cell_rect(heatmap.years.len().saturating_sub(1), col);
            root.draw(&Text::new(
                code.clone(),
                (p1.0 - layout.cell_w + 1, p1.1 + 4),
                label_font.clone(),
            ))
            .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
        info!(path = %path.display(), year = view.year, "exported snapshot png");
        Ok(())
    }

    /// One-line migration summary for the snapshot header.
    pub fn summary_line(view: &DashboardView) -> String {
        let share = &view.summary.share;
        let mut line = format!(
            "Theme: {}   Inbound: {} %   Outbound: {} %",
            view.theme, share.inbound_percent, share.outbound_percent
        );
        if let [gain, loss] = view.gains_losses.as_slice() {
            line.push_str(&format!(
                "   Gain: {} {}   Loss: {} {}",
                gain.label, gain.delta, loss.label, loss.delta
            ));
        }
        line
    }

    /// Write the full descriptor set as pretty-printed JSON.
    pub fn write_json(view: &DashboardView, path: &Path) -> Result<(), RenderError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, view)?;
        info!(path = %path.display(), year = view.year, "exported dashboard json");
        Ok(())
    }
}

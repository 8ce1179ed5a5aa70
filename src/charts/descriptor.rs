//! Chart Descriptors
//! Declarative, backend-independent description of every dashboard panel.
//!
//! A [`DashboardView`] is rebuilt whenever the selected year or theme changes
//! and is consumed by both the egui plotter and the static PNG renderer.

use crate::charts::format::{format_delta, format_number};
use crate::charts::theme::{ColorTheme, DonutColor, ThemeColor};
use crate::charts::tiles::tile_position;
use crate::data::PopulationTable;
use crate::stats::{
    Extremes, MigrationCalculator, MigrationRow, MigrationSummary, SelectionError,
};
use serde::Serialize;
use std::collections::BTreeMap;

pub const ABOUT_LINES: [&str; 3] = [
    "Data: U.S. Census Bureau (https://www.census.gov/data/datasets/time-series/demo/popest/2010s-state-total.html).",
    "Gains/Losses: states with high inbound/outbound migration for the selected year.",
    "States Migration: percentage of states with annual inbound/outbound migration above the threshold.",
];

/// A labelled metric with an optional signed delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub delta: String,
    /// Sign of the underlying difference; `None` for the placeholder card.
    pub trend: Option<i8>,
}

impl MetricCard {
    fn placeholder() -> Self {
        Self {
            label: "-".to_string(),
            value: "-".to_string(),
            delta: "-".to_string(),
            trend: None,
        }
    }

    fn from_row(row: &MigrationRow) -> Self {
        Self {
            label: row.state.clone(),
            value: format_number(row.population),
            delta: format_delta(row.population_difference),
            trend: Some(row.population_difference.signum() as i8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonutChart {
    pub title: String,
    pub percent: u8,
    pub color: DonutColor,
    pub highlight: ThemeColor,
    pub shade: ThemeColor,
}

impl DonutChart {
    pub fn new(percent: u8, title: &str, color: DonutColor) -> Self {
        let (highlight, shade) = color.pair();
        Self {
            title: title.to_string(),
            percent: percent.min(100),
            color,
            highlight,
            shade,
        }
    }

    /// Filled share of the ring, 0..=1.
    pub fn fraction(&self) -> f32 {
        self.percent as f32 / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoroplethTile {
    pub state: String,
    pub state_code: String,
    pub population: i64,
    pub row: usize,
    pub col: usize,
    pub color: ThemeColor,
}

/// Tile-grid choropleth of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoroplethMap {
    pub theme: ColorTheme,
    /// Color range, `(0, max population of the year)`.
    pub range: (i64, i64),
    pub tiles: Vec<ChoroplethTile>,
    /// State codes with no tile on the grid.
    pub unplaced: Vec<String>,
}

impl ChoroplethMap {
    pub fn build(table: &PopulationTable, year: i64, theme: ColorTheme) -> Self {
        let max = table.year_slice(year).map(|r| r.population).max().unwrap_or(0);
        let range = (0, max);

        let mut tiles = Vec::new();
        let mut unplaced = Vec::new();
        for record in table.year_slice(year) {
            match tile_position(&record.state_code) {
                Some((row, col)) => tiles.push(ChoroplethTile {
                    state: record.state.clone(),
                    state_code: record.state_code.to_uppercase(),
                    population: record.population,
                    row,
                    col,
                    color: theme.scale(record.population, range.0, range.1),
                }),
                None => unplaced.push(record.state_code.clone()),
            }
        }

        Self {
            theme,
            range,
            tiles,
            unplaced,
        }
    }

    /// Tile at a grid position, if any.
    pub fn tile_at(&self, row: usize, col: usize) -> Option<&ChoroplethTile> {
        self.tiles.iter().find(|t| t.row == row && t.col == col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub year: i64,
    pub state: String,
    pub population: i64,
    /// Index into `Heatmap::years`.
    pub row: usize,
    /// Index into `Heatmap::states`.
    pub col: usize,
    pub color: ThemeColor,
}

/// Years x states heatmap over the full record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub theme: ColorTheme,
    /// Ascending.
    pub years: Vec<i64>,
    /// Alphabetical.
    pub states: Vec<String>,
    /// State code per entry of `states`, for axis labels.
    pub codes: Vec<String>,
    pub range: (i64, i64),
    pub cells: Vec<HeatmapCell>,
}

impl Heatmap {
    /// One cell per (year, state), colored by the maximum population
    /// recorded for that pair.
    pub fn build(table: &PopulationTable, theme: ColorTheme) -> Self {
        let mut aggregated: BTreeMap<(i64, &str), i64> = BTreeMap::new();
        for record in table.records() {
            aggregated
                .entry((record.year, record.state.as_str()))
                .and_modify(|p| *p = (*p).max(record.population))
                .or_insert(record.population);
        }

        let years = table.years().to_vec();
        let mut states = table.states();
        states.sort();
        let codes = states
            .iter()
            .map(|state| {
                table
                    .records()
                    .iter()
                    .find(|r| &r.state == state)
                    .map(|r| r.state_code.to_uppercase())
                    .unwrap_or_default()
            })
            .collect();

        let range = table.population_range();

        let cells = aggregated
            .into_iter()
            .filter_map(|((year, state), population)| {
                let row = years.binary_search(&year).ok()?;
                let col = states.binary_search_by(|s| s.as_str().cmp(state)).ok()?;
                Some(HeatmapCell {
                    year,
                    state: state.to_string(),
                    population,
                    row,
                    col,
                    color: theme.scale(population, range.0, range.1),
                })
            })
            .collect();

        Self {
            theme,
            years,
            states,
            codes,
            range,
            cells,
        }
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&HeatmapCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopStateRow {
    pub state: String,
    pub population: i64,
    /// `population / max_population`, for the progress column.
    pub fraction: f32,
}

/// The selected year's states, most populous first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopStatesTable {
    pub max_population: i64,
    pub rows: Vec<TopStateRow>,
}

impl TopStatesTable {
    pub fn build(table: &PopulationTable, year: i64) -> Self {
        let mut slice: Vec<_> = table.year_slice(year).collect();
        slice.sort_by_key(|r| std::cmp::Reverse(r.population));

        let max_population = slice.first().map(|r| r.population).unwrap_or(0);
        let rows = slice
            .into_iter()
            .map(|r| TopStateRow {
                state: r.state.clone(),
                population: r.population,
                fraction: if max_population > 0 {
                    (r.population as f64 / max_population as f64).clamp(0.0, 1.0) as f32
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            max_population,
            rows,
        }
    }
}

/// Every panel of the dashboard for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub year: i64,
    pub theme: ColorTheme,
    /// Empty for the first year in the dataset.
    pub gains_losses: Vec<MetricCard>,
    pub summary: MigrationSummary,
    pub inbound: DonutChart,
    pub outbound: DonutChart,
    pub choropleth: ChoroplethMap,
    pub heatmap: Heatmap,
    pub top_states: TopStatesTable,
    pub about: Vec<String>,
}

impl DashboardView {
    pub fn build(
        table: &PopulationTable,
        year: i64,
        theme: ColorTheme,
        threshold: i64,
    ) -> Result<Self, SelectionError> {
        let migration = MigrationCalculator::population_difference(table, year)?;
        let summary = MigrationSummary::from_table(&migration, threshold);

        let gains_losses = if summary.applicable {
            match &summary.extremes {
                Extremes::Available { gain, loss } => {
                    vec![MetricCard::from_row(gain), MetricCard::from_row(loss)]
                }
                Extremes::NotApplicable => vec![MetricCard::placeholder(), MetricCard::placeholder()],
            }
        } else {
            Vec::new()
        };

        let inbound = DonutChart::new(
            summary.share.inbound_percent,
            "Inbound Migration",
            DonutColor::Green,
        );
        let outbound = DonutChart::new(
            summary.share.outbound_percent,
            "Outbound Migration",
            DonutColor::Red,
        );

        Ok(Self {
            year,
            theme,
            gains_losses,
            summary,
            inbound,
            outbound,
            choropleth: ChoroplethMap::build(table, year, theme),
            heatmap: Heatmap::build(table, theme),
            top_states: TopStatesTable::build(table, year),
            about: ABOUT_LINES.iter().map(|s| s.to_string()).collect(),
        })
    }
}

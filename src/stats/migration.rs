//! Migration Calculator Module
//! Year-over-year population change per state, ranked by change.

use crate::data::PopulationTable;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid selection: year {year} is not in the dataset ({min}-{max})")]
    InvalidSelection { year: i64, min: i64, max: i64 },
}

impl SelectionError {
    /// Fails with `InvalidSelection` unless `year` is one of the table's years.
    pub fn check(table: &PopulationTable, year: i64) -> Result<(), SelectionError> {
        if table.contains_year(year) {
            Ok(())
        } else {
            Err(SelectionError::InvalidSelection {
                year,
                min: table.min_year(),
                max: table.max_year(),
            })
        }
    }
}

/// A state's population for the selected year and its change from the year before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationRow {
    pub state: String,
    pub state_code: String,
    pub population: i64,
    pub population_difference: i64,
}

/// Ranked migration rows for one selected year.
///
/// `prior_year` is `None` when the selected year is the first year in the
/// dataset; the rows are then empty and no difference is computable. An
/// applicable table may still be empty if no state has a prior-year record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationTable {
    pub year: i64,
    pub prior_year: Option<i64>,
    pub rows: Vec<MigrationRow>,
}

impl MigrationTable {
    pub fn is_applicable(&self) -> bool {
        self.prior_year.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct states among the rows.
    pub fn distinct_states(&self) -> usize {
        let mut states: Vec<&str> = self.rows.iter().map(|r| r.state.as_str()).collect();
        states.sort_unstable();
        states.dedup();
        states.len()
    }

    pub fn largest_gain(&self) -> Option<&MigrationRow> {
        self.rows.first()
    }

    pub fn largest_loss(&self) -> Option<&MigrationRow> {
        self.rows.last()
    }
}

/// Computes ranked year-over-year differences.
pub struct MigrationCalculator;

impl MigrationCalculator {
    /// Join each state's population in `year` with its population in
    /// `year - 1` and rank by the difference, largest gain first.
    ///
    /// States without a prior-year record are dropped. Ties keep file order.
    pub fn population_difference(
        table: &PopulationTable,
        year: i64,
    ) -> Result<MigrationTable, SelectionError> {
        SelectionError::check(table, year)?;

        if year == table.min_year() {
            return Ok(MigrationTable {
                year,
                prior_year: None,
                rows: Vec::new(),
            });
        }

        let prior_year = year - 1;
        let mut prior: HashMap<&str, i64> = HashMap::new();
        for record in table.year_slice(prior_year) {
            prior.entry(record.state.as_str()).or_insert(record.population);
        }

        let mut rows: Vec<MigrationRow> = table
            .year_slice(year)
            .filter_map(|record| {
                let previous = prior.get(record.state.as_str())?;
                Some(MigrationRow {
                    state: record.state.clone(),
                    state_code: record.state_code.clone(),
                    population: record.population,
                    population_difference: record.population - previous,
                })
            })
            .collect();

        // Stable: equal differences keep their input order.
        rows.sort_by_key(|row| Reverse(row.population_difference));

        debug!(year, prior_year, rows = rows.len(), "computed migration table");

        Ok(MigrationTable {
            year,
            prior_year: Some(prior_year),
            rows,
        })
    }
}

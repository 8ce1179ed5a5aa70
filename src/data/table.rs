//! Population Table Module
//! Immutable record set loaded once at startup.

use serde::Serialize;
use std::collections::BTreeSet;

/// One state's population for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulationRecord {
    pub state: String,
    pub state_code: String,
    pub year: i64,
    pub population: i64,
}

impl PopulationRecord {
    pub fn new(state: &str, state_code: &str, year: i64, population: i64) -> Self {
        Self {
            state: state.to_string(),
            state_code: state_code.to_string(),
            year,
            population,
        }
    }
}

/// The full record set, in file order.
///
/// Construction goes through [`PopulationTable::new`], which refuses an empty
/// set, so `min_year` and `max_year` always have a value.
#[derive(Debug, Clone)]
pub struct PopulationTable {
    records: Vec<PopulationRecord>,
    years: Vec<i64>,
}

impl PopulationTable {
    /// Build a table. Returns `None` for an empty record set.
    pub fn new(records: Vec<PopulationRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let years: BTreeSet<i64> = records.iter().map(|r| r.year).collect();

        Some(Self {
            records,
            years: years.into_iter().collect(),
        })
    }

    pub fn records(&self) -> &[PopulationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> &[i64] {
        &self.years
    }

    /// Distinct years, newest first (selector order).
    pub fn years_descending(&self) -> Vec<i64> {
        self.years.iter().rev().copied().collect()
    }

    pub fn min_year(&self) -> i64 {
        self.years[0]
    }

    pub fn max_year(&self) -> i64 {
        self.years[self.years.len() - 1]
    }

    pub fn contains_year(&self, year: i64) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    /// Records for one year, in file order.
    pub fn year_slice(&self, year: i64) -> impl Iterator<Item = &PopulationRecord> {
        self.records.iter().filter(move |r| r.year == year)
    }

    /// Distinct state names in order of first appearance.
    pub fn states(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.state.as_str()))
            .map(|r| r.state.clone())
            .collect()
    }

    /// Smallest and largest population across all records.
    pub fn population_range(&self) -> (i64, i64) {
        let min = self.records.iter().map(|r| r.population).min().unwrap_or(0);
        let max = self.records.iter().map(|r| r.population).max().unwrap_or(0);
        (min, max)
    }
}

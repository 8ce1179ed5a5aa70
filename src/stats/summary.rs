//! Migration Summary Module
//! Extremes and threshold percentages derived from a migration table.

use crate::stats::migration::{MigrationRow, MigrationTable};
use serde::Serialize;

/// Year-over-year change above which a state counts as inbound
/// (and below the negative of which, outbound).
pub const DEFAULT_MIGRATION_THRESHOLD: i64 = 50_000;

/// Largest gain and largest loss of a ranked migration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Extremes {
    NotApplicable,
    Available {
        gain: MigrationRow,
        loss: MigrationRow,
    },
}

impl Extremes {
    pub fn from_table(table: &MigrationTable) -> Self {
        match (table.largest_gain(), table.largest_loss()) {
            (Some(gain), Some(loss)) => Extremes::Available {
                gain: gain.clone(),
                loss: loss.clone(),
            },
            _ => Extremes::NotApplicable,
        }
    }
}

/// Share of states with inbound/outbound migration beyond the threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MigrationShare {
    pub inbound_percent: u8,
    pub outbound_percent: u8,
    pub inbound_states: usize,
    pub outbound_states: usize,
    pub total_states: usize,
}

impl MigrationShare {
    /// Both percentages are 0 when the table is not applicable (first year)
    /// or has no rows.
    pub fn from_table(table: &MigrationTable, threshold: i64) -> Self {
        if !table.is_applicable() || table.is_empty() {
            return Self::default();
        }

        let inbound_states = table
            .rows
            .iter()
            .filter(|r| r.population_difference > threshold)
            .count();
        let outbound_states = table
            .rows
            .iter()
            .filter(|r| r.population_difference < -threshold)
            .count();
        let total_states = table.distinct_states();

        Self {
            inbound_percent: rounded_percentage(inbound_states, total_states),
            outbound_percent: rounded_percentage(outbound_states, total_states),
            inbound_states,
            outbound_states,
            total_states,
        }
    }
}

/// `count / total` as an integer percentage, rounded half to even.
///
/// Clamped to 0..=100; a zero total yields 0.
pub fn rounded_percentage(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }

    let scaled = count.min(total) * 100;
    let quotient = scaled / total;
    let remainder = scaled % total;

    let rounded = match (2 * remainder).cmp(&total) {
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal if quotient % 2 == 1 => quotient + 1,
        _ => quotient,
    };

    rounded as u8
}

/// Everything the "Gains/Losses" and "States Migration" panels need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    pub year: i64,
    pub applicable: bool,
    pub threshold: i64,
    pub extremes: Extremes,
    pub share: MigrationShare,
}

impl MigrationSummary {
    pub fn from_table(table: &MigrationTable, threshold: i64) -> Self {
        Self {
            year: table.year,
            applicable: table.is_applicable(),
            threshold,
            extremes: Extremes::from_table(table),
            share: MigrationShare::from_table(table, threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_table, PopulationRecord, PopulationTable};
    use crate::stats::MigrationCalculator;

    fn row(state: &str, difference: i64) -> MigrationRow {
        MigrationRow {
            state: state.to_string(),
            state_code: state.to_string(),
            population: 1_000_000,
            population_difference: difference,
        }
    }

    fn table_of(rows: Vec<MigrationRow>) -> MigrationTable {
        MigrationTable {
            year: 2011,
            prior_year: Some(2010),
            rows,
        }
    }

    #[test]
    fn test_two_state_example_scaled_threshold() {
        let table = PopulationTable::new(vec![
            PopulationRecord::new("A", "AA", 2000, 100),
            PopulationRecord::new("B", "BB", 2000, 200),
            PopulationRecord::new("A", "AA", 2001, 160),
            PopulationRecord::new("B", "BB", 2001, 140),
        ])
        .unwrap();
        let migration = MigrationCalculator::population_difference(&table, 2001).unwrap();

        let summary = MigrationSummary::from_table(&migration, 50);

        match &summary.extremes {
            Extremes::Available { gain, loss } => {
                assert_eq!(gain.state, "A");
                assert_eq!(loss.state, "B");
            }
            Extremes::NotApplicable => panic!("expected extremes"),
        }
        assert_eq!(summary.share.inbound_states, 1);
        assert_eq!(summary.share.outbound_states, 1);
        assert_eq!(summary.share.inbound_percent, 50);
        assert_eq!(summary.share.outbound_percent, 50);
    }

    #[test]
    fn test_minimum_year_is_zero_and_not_applicable() {
        let migration = MigrationCalculator::population_difference(&sample_table(), 2010).unwrap();

        let summary = MigrationSummary::from_table(&migration, DEFAULT_MIGRATION_THRESHOLD);

        assert!(!summary.applicable);
        assert_eq!(summary.extremes, Extremes::NotApplicable);
        assert_eq!(summary.share.inbound_percent, 0);
        assert_eq!(summary.share.outbound_percent, 0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let table = table_of(vec![row("A", 50_000), row("B", -50_000), row("C", 50_001)]);

        let share = MigrationShare::from_table(&table, DEFAULT_MIGRATION_THRESHOLD);

        assert_eq!(share.inbound_states, 1);
        assert_eq!(share.outbound_states, 0);
        assert_eq!(share.inbound_percent, 33);
    }

    #[test]
    fn test_empty_applicable_table() {
        let table = table_of(Vec::new());

        let summary = MigrationSummary::from_table(&table, DEFAULT_MIGRATION_THRESHOLD);

        assert!(summary.applicable);
        assert_eq!(summary.extremes, Extremes::NotApplicable);
        assert_eq!(summary.share, MigrationShare::default());
    }

    #[test]
    fn test_single_row_is_both_extremes() {
        let table = table_of(vec![row("A", 10)]);

        match Extremes::from_table(&table) {
            Extremes::Available { gain, loss } => assert_eq!(gain, loss),
            Extremes::NotApplicable => panic!("expected extremes"),
        }
    }

    #[test]
    fn test_rounded_percentage_half_to_even() {
        assert_eq!(rounded_percentage(1, 8), 12); // 12.5
        assert_eq!(rounded_percentage(3, 8), 38); // 37.5
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(0, 52), 0);
        assert_eq!(rounded_percentage(52, 52), 100);
        assert_eq!(rounded_percentage(1, 0), 0);
    }

    #[test]
    fn test_percentages_bounded() {
        let rows: Vec<MigrationRow> = (0..52)
            .map(|i| row(&format!("S{}", i), (i as i64 - 26) * 5_000))
            .collect();
        let table = table_of(rows);

        let share = MigrationShare::from_table(&table, DEFAULT_MIGRATION_THRESHOLD);

        assert!(share.inbound_percent <= 100);
        assert!(share.outbound_percent <= 100);
        assert!(share.inbound_percent as u16 + share.outbound_percent as u16 <= 100);
        assert_eq!(share.total_states, 52);
    }
}

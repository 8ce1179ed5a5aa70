//! Stats module - year-over-year migration and derived metrics

mod migration;
mod summary;

pub use migration::{MigrationCalculator, MigrationRow, SelectionError};
pub use summary::{Extremes, MigrationSummary, DEFAULT_MIGRATION_THRESHOLD};

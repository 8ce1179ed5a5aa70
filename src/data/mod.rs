//! Data module - CSV loading and the population table

mod loader;
mod processor;
mod table;

pub use loader::DataLoader;
pub use table::PopulationTable;

#[cfg(test)]
pub(crate) use table::{tests::sample_table, PopulationRecord};

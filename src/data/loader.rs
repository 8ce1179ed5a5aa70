//! CSV Data Loader Module
//! Reads the population CSV with Polars and turns it into a typed table.

use crate::data::processor::DataProcessor;
use crate::data::table::PopulationTable;
use polars::prelude::*;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),
}

/// Handles the one-time CSV load at startup.
pub struct DataLoader {
    file_path: PathBuf,
}

impl DataLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// Read the raw CSV into a DataFrame.
    pub fn read_frame(&self) -> Result<DataFrame, LoaderError> {
        if !self.file_path.is_file() {
            return Err(LoaderError::DataUnavailable(format!(
                "{} does not exist",
                self.file_path.display()
            )));
        }

        let df = LazyCsvReader::new(&self.file_path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        debug!(
            rows = df.height(),
            columns = df.width(),
            "read population csv"
        );
        Ok(df)
    }

    /// Load the CSV and build the immutable population table.
    pub fn load(&self) -> Result<PopulationTable, LoaderError> {
        let raw = self.read_frame()?;
        let df = DataProcessor::normalize(&raw)?;
        let records = DataProcessor::extract_records(&df)?;

        let table = PopulationTable::new(records).ok_or_else(|| {
            LoaderError::DataUnavailable(format!(
                "{} contains no records",
                self.file_path.display()
            ))
        })?;

        info!(
            path = %self.file_path.display(),
            records = table.len(),
            years = table.years().len(),
            "loaded population data"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_canonical_columns() {
        let file = write_csv(
            "state,state_code,year,population\n\
             Alabama,AL,2010,4785437\n\
             Alaska,AK,2010,713910\n\
             Alabama,AL,2011,4799069\n\
             Alaska,AK,2011,722128\n",
        );

        let table = DataLoader::new(file.path()).load().unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.years(), &[2010, 2011]);
        let first = &table.records()[0];
        assert_eq!(first.state, "Alabama");
        assert_eq!(first.state_code, "AL");
        assert_eq!(first.population, 4_785_437);
    }

    #[test]
    fn test_load_alias_column_names() {
        let file = write_csv(
            "states,states_code,id,year,population\n\
             Alabama,AL,1,2010,4785437\n\
             Alaska,AK,2,2010,713910\n",
        );

        let table = DataLoader::new(file.path()).load().unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].state, "Alaska");
        assert_eq!(table.records()[1].state_code, "AK");
    }

    #[test]
    fn test_missing_column() {
        let file = write_csv("state,year,population\nAlabama,2010,4785437\n");

        let err = DataLoader::new(file.path()).load().unwrap_err();

        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "state_code"));
    }

    #[test]
    fn test_header_only_is_unavailable() {
        let file = write_csv("state,state_code,year,population\n");

        let err = DataLoader::new(file.path()).load().unwrap_err();

        assert!(matches!(err, LoaderError::DataUnavailable(_)));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = DataLoader::new("/nonexistent/us-population.csv")
            .load()
            .unwrap_err();

        assert!(matches!(err, LoaderError::DataUnavailable(_)));
    }

    #[test]
    fn test_non_numeric_population_rejected() {
        let file = write_csv(
            "state,state_code,year,population\n\
             Alabama,AL,2010,4785437\n\
             Alaska,AK,2010,lots\n",
        );

        assert!(DataLoader::new(file.path()).load().is_err());
    }
}

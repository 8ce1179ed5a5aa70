//! Data Processor Module
//! Normalizes the raw CSV frame and extracts typed population records.

use crate::data::loader::LoaderError;
use crate::data::table::PopulationRecord;
use polars::prelude::*;

/// Canonical column names and the aliases accepted for each.
const STATE_COLUMNS: [&str; 2] = ["state", "states"];
const STATE_CODE_COLUMNS: [&str; 2] = ["state_code", "states_code"];
const YEAR_COLUMNS: [&str; 1] = ["year"];
const POPULATION_COLUMNS: [&str; 1] = ["population"];

/// Handles column resolution and type conversion.
pub struct DataProcessor;

impl DataProcessor {
    /// Find the first column present in the frame out of `candidates`.
    fn resolve_column(df: &DataFrame, candidates: &[&str]) -> Result<String, LoaderError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        candidates
            .iter()
            .find_map(|candidate| {
                names
                    .iter()
                    .find(|name| name.trim().eq_ignore_ascii_case(candidate))
                    .cloned()
            })
            .ok_or_else(|| LoaderError::MissingColumn(candidates[0].to_string()))
    }

    /// Rebuild the frame with canonical names and types:
    /// `state: str, state_code: str, year: i64, population: i64`.
    ///
    /// Extra columns are dropped.
    pub fn normalize(df: &DataFrame) -> Result<DataFrame, LoaderError> {
        let state_col = Self::resolve_column(df, &STATE_COLUMNS)?;
        let code_col = Self::resolve_column(df, &STATE_CODE_COLUMNS)?;
        let year_col = Self::resolve_column(df, &YEAR_COLUMNS)?;
        let population_col = Self::resolve_column(df, &POPULATION_COLUMNS)?;

        let state = df.column(&state_col)?.cast(&DataType::String)?;
        let code = df.column(&code_col)?.cast(&DataType::String)?;
        let year = df.column(&year_col)?.cast(&DataType::Int64)?;
        let population = df.column(&population_col)?.cast(&DataType::Int64)?;

        let result = DataFrame::new(vec![
            state.with_name("state".into()),
            code.with_name("state_code".into()),
            year.with_name("year".into()),
            population.with_name("population".into()),
        ])?;

        Ok(result)
    }

    /// Extract typed records from a normalized frame, in row order.
    ///
    /// A null cell (missing or unparseable value) makes the data unavailable.
    pub fn extract_records(df: &DataFrame) -> Result<Vec<PopulationRecord>, LoaderError> {
        let state_ca = df.column("state")?.str()?;
        let code_ca = df.column("state_code")?.str()?;
        let year_ca = df.column("year")?.i64()?;
        let population_ca = df.column("population")?.i64()?;

        let mut records = Vec::with_capacity(df.height());

        for i in 0..df.height() {
            let missing = |column: &str| {
                LoaderError::DataUnavailable(format!(
                    "row {} has no valid value in column '{}'",
                    i + 1,
                    column
                ))
            };

            let state = state_ca.get(i).ok_or_else(|| missing("state"))?;
            let code = code_ca.get(i).ok_or_else(|| missing("state_code"))?;
            let year = year_ca.get(i).ok_or_else(|| missing("year"))?;
            let population = population_ca.get(i).ok_or_else(|| missing("population"))?;

            records.push(PopulationRecord::new(
                state.trim().trim_matches('"'),
                code.trim().trim_matches('"'),
                year,
                population,
            ));
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("states".into(), vec!["Ohio", "Utah"]),
            Column::new("states_code".into(), vec!["OH", "UT"]),
            Column::new("id".into(), vec![39i64, 49]),
            Column::new("year".into(), vec![2015i64, 2015]),
            Column::new("population".into(), vec![11_617_527i64, 2_997_366]),
        ])
        .unwrap()
    }

    #[test]
    fn test_normalize_renames_and_drops_extras() {
        let df = DataProcessor::normalize(&raw_frame()).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["state", "state_code", "year", "population"]);
    }

    #[test]
    fn test_extract_records() {
        let df = DataProcessor::normalize(&raw_frame()).unwrap();
        let records = DataProcessor::extract_records(&df).unwrap();

        assert_eq!(
            records,
            vec![
                PopulationRecord::new("Ohio", "OH", 2015, 11_617_527),
                PopulationRecord::new("Utah", "UT", 2015, 2_997_366),
            ]
        );
    }

    #[test]
    fn test_null_population_is_unavailable() {
        let df = DataFrame::new(vec![
            Column::new("state".into(), vec!["Ohio"]),
            Column::new("state_code".into(), vec!["OH"]),
            Column::new("year".into(), vec![2015i64]),
            Column::new("population".into(), vec![None::<i64>]),
        ])
        .unwrap();

        let err = DataProcessor::extract_records(&df).unwrap_err();

        assert!(matches!(err, LoaderError::DataUnavailable(_)));
    }

    #[test]
    fn test_missing_year_column() {
        let df = DataFrame::new(vec![
            Column::new("state".into(), vec!["Ohio"]),
            Column::new("state_code".into(), vec!["OH"]),
            Column::new("population".into(), vec![1i64]),
        ])
        .unwrap();

        let err = DataProcessor::normalize(&df).unwrap_err();

        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "year"));
    }
}

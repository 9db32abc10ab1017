//! CSV Table Loader Module
//! Handles CSV file loading and row extraction using Polars.

use crate::data::model::{RawRow, RawTable};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("No rows in table")]
    NoData,
}

/// Loads indicator tables with Polars and flattens them into raw rows.
pub struct TableLoader;

impl TableLoader {
    /// Load a CSV file and convert it to raw rows in one step.
    pub fn load_table(file_path: &Path) -> Result<RawTable, LoaderError> {
        let df = Self::load_csv(file_path)?;
        let rows = Self::to_rows(&df);
        if rows.is_empty() {
            return Err(LoaderError::NoData);
        }
        tracing::debug!(path = %file_path.display(), rows = rows.len(), "loaded table");
        Ok(rows)
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// Flatten a DataFrame into rows mapping column label -> string cell.
    /// Null cells are left out of the row entirely.
    pub fn to_rows(df: &DataFrame) -> RawTable {
        let columns: Vec<(String, &Series)> = df
            .get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.as_materialized_series()))
            .collect();

        (0..df.height())
            .map(|i| {
                let mut row = RawRow::new();
                for (label, series) in &columns {
                    let Ok(val) = series.get(i) else {
                        continue;
                    };
                    if val.is_null() {
                        continue;
                    }
                    row.insert(
                        label.clone(),
                        val.to_string().trim_matches('"').to_string(),
                    );
                }
                row
            })
            .collect()
    }
}

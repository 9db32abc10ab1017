//! Data Model Module
//! Year-indexed series, entity records, and raw table shapes.

use serde::Serialize;
use std::collections::HashMap;

/// One row of a raw CSV table: column label -> string cell.
pub type RawRow = HashMap<String, String>;

/// A raw table is just its rows; tables are transient merge input.
pub type RawTable = Vec<RawRow>;

/// A raw table whose non-name columns are year labels.
#[derive(Debug, Clone)]
pub struct IndicatorTable {
    pub rows: RawTable,
    /// Label of the column holding the entity name.
    pub name_column: String,
}

/// The table assigning a categorical region group to each entity.
#[derive(Debug, Clone)]
pub struct RegionTable {
    pub rows: RawTable,
    pub name_column: String,
    /// Label of the column holding the group name.
    pub group_column: String,
}

/// Fixed-length sequence of per-year values; `f64::NAN` marks a missing slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct YearSeries(Vec<f64>);

impl YearSeries {
    /// Create a series of `span` slots, all missing.
    pub fn new(span: usize) -> Self {
        Self(vec![f64::NAN; span])
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> f64 {
        self.0[index]
    }

    pub fn set(&mut self, index: usize, value: f64) {
        self.0[index] = value;
    }

    pub fn is_missing(&self, index: usize) -> bool {
        self.0[index].is_nan()
    }

    /// Count of non-missing slots.
    pub fn known_count(&self) -> usize {
        self.0.iter().filter(|v| !v.is_nan()).count()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Minimum over non-missing slots, or `None` if all are missing.
    pub fn min(&self) -> Option<f64> {
        self.0
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.min(v))))
    }

    /// Maximum over non-missing slots, or `None` if all are missing.
    pub fn max(&self) -> Option<f64> {
        self.0
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }
}

/// One country/region with its three aligned indicator series.
///
/// After merging and gap filling, every series has zero missing slots
/// and downstream consumers treat the record as immutable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRecord {
    pub name: String,
    pub group: String,
    pub income: YearSeries,
    pub life_expectancy: YearSeries,
    pub population: YearSeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_series_is_all_missing() {
        let s = YearSeries::new(5);
        assert_eq!(s.len(), 5);
        assert_eq!(s.known_count(), 0);
        assert!((0..5).all(|i| s.is_missing(i)));
    }

    #[test]
    fn known_count_ignores_missing_slots() {
        let mut s = YearSeries::new(4);
        s.set(1, 7.5);
        s.set(3, 0.0);
        assert_eq!(s.known_count(), 2);
        assert!(!s.is_missing(1));
        assert!(s.is_missing(0));
    }

    #[test]
    fn min_max_skip_missing_slots() {
        let s = YearSeries::from_values(vec![f64::NAN, 3.0, f64::NAN, -1.0]);
        assert_eq!(s.min(), Some(-1.0));
        assert_eq!(s.max(), Some(3.0));
        assert_eq!(YearSeries::new(3).min(), None);
    }
}

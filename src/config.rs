//! Chart Configuration Module
//! Year range, validity threshold, and region color table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fallback fill for entities whose group has no palette entry.
pub const UNKNOWN_REGION_COLOR: [u8; 3] = [128, 128, 128];

/// Configuration for the data-preparation pipeline and chart snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// First year of the analyzed range (inclusive).
    pub start_year: i32,
    /// Last year of the analyzed range (inclusive).
    pub end_year: i32,
    /// Minimum count of known values for an indicator series to be usable.
    pub valid_limit: usize,
    /// Region group -> RGB fill color.
    pub region_colors: HashMap<String, [u8; 3]>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let region_colors = [
            ("America", [255, 255, 0]),
            ("East Asia & Pacific", [255, 0, 0]),
            ("Europe & Central Asia", [255, 165, 0]),
            ("Middle East & North Africa", [144, 238, 144]),
            ("South Asia", [135, 206, 235]),
            ("Sub-Saharan Africa", [0, 0, 255]),
        ]
        .into_iter()
        .map(|(name, rgb)| (name.to_string(), rgb))
        .collect();

        Self {
            start_year: 1872,
            end_year: 2018,
            valid_limit: 20,
            region_colors,
        }
    }
}

impl ChartConfig {
    /// Load a config from a JSON file; absent fields keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Number of year slots in the analyzed range.
    pub fn span(&self) -> usize {
        (self.end_year - self.start_year + 1).max(0) as usize
    }

    /// Series slot for a calendar year, if it falls inside the range.
    pub fn slot(&self, year: i32) -> Option<usize> {
        (self.start_year..=self.end_year)
            .contains(&year)
            .then(|| (year - self.start_year) as usize)
    }

    pub fn color_for(&self, group: &str) -> [u8; 3] {
        self.region_colors
            .get(group)
            .copied()
            .unwrap_or(UNKNOWN_REGION_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_span_covers_the_full_range() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.span(), 147);
        assert_eq!(cfg.slot(1872), Some(0));
        assert_eq!(cfg.slot(2018), Some(146));
        assert_eq!(cfg.slot(1871), None);
        assert_eq!(cfg.slot(2019), None);
    }

    #[test]
    fn unknown_region_falls_back_to_gray() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.color_for("Atlantis"), UNKNOWN_REGION_COLOR);
        assert_eq!(cfg.color_for("South Asia"), [135, 206, 235]);
    }

    #[test]
    fn partial_json_keeps_defaults_for_absent_fields() {
        let cfg: ChartConfig = serde_json::from_str(r#"{"valid_limit": 5}"#).unwrap();
        assert_eq!(cfg.valid_limit, 5);
        assert_eq!(cfg.start_year, 1872);
        assert_eq!(cfg.end_year, 2018);
    }
}

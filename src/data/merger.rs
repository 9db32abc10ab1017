//! Dataset Merger Module
//! Combines per-indicator year tables into complete entity records and
//! fills the remaining gaps in place.

use crate::config::ChartConfig;
use crate::data::interpolator::fill_gaps;
use crate::data::model::{EntityRecord, IndicatorTable, RawRow, RegionTable, YearSeries};
use std::collections::HashMap;
use tracing::{debug, info};

/// An entity while its attributes are still being accumulated.
#[derive(Debug, Default)]
struct PartialRecord {
    group: Option<String>,
    income: Option<YearSeries>,
    life_expectancy: Option<YearSeries>,
    population: Option<YearSeries>,
}

/// Which indicator a table feeds during accumulation.
#[derive(Debug, Clone, Copy)]
enum Indicator {
    Income,
    LifeExpectancy,
    Population,
}

/// Merges the four raw tables into fully-populated entity records.
pub struct DatasetMerger;

impl DatasetMerger {
    /// Merge the three indicator tables and the region table.
    ///
    /// Pure and total over well-formed rows: unparsable cells degrade to
    /// missing slots, entities with too little history or an absent
    /// attribute are silently dropped. Every surviving record has all
    /// four attributes and zero missing slots.
    pub fn merge(
        income: &IndicatorTable,
        population: &IndicatorTable,
        life: &IndicatorTable,
        regions: &RegionTable,
        config: &ChartConfig,
    ) -> HashMap<String, EntityRecord> {
        let mut accumulating: HashMap<String, PartialRecord> = HashMap::new();

        // The income table creates entries; the other tables only fill
        // in entities it introduced.
        Self::add_indicator(&mut accumulating, income, Indicator::Income, true, config);
        Self::add_indicator(
            &mut accumulating,
            life,
            Indicator::LifeExpectancy,
            false,
            config,
        );
        Self::add_indicator(
            &mut accumulating,
            population,
            Indicator::Population,
            false,
            config,
        );
        Self::assign_groups(&mut accumulating, regions);

        let candidates = accumulating.len();
        let nations: HashMap<String, EntityRecord> = accumulating
            .into_iter()
            .filter_map(|(name, partial)| {
                let record = Self::finalize(name, partial)?;
                Some((record.name.clone(), record))
            })
            .collect();

        info!(
            kept = nations.len(),
            dropped = candidates - nations.len(),
            "merged indicator tables"
        );
        nations
    }

    fn add_indicator(
        accumulating: &mut HashMap<String, PartialRecord>,
        table: &IndicatorTable,
        indicator: Indicator,
        create_missing: bool,
        config: &ChartConfig,
    ) {
        debug!(rows = table.rows.len(), ?indicator, "adding indicator table");
        for row in &table.rows {
            let Some(name) = row.get(&table.name_column) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            if !create_missing && !accumulating.contains_key(name) {
                continue;
            }
            let series = Self::parse_series(row, &table.name_column, config);
            let record = accumulating.entry(name.clone()).or_default();
            match indicator {
                Indicator::Income => record.income = series,
                Indicator::LifeExpectancy => record.life_expectancy = series,
                Indicator::Population => record.population = series,
            }
        }
    }

    /// Parse one row's year columns into a series, or `None` when fewer
    /// than `valid_limit` cells parse (insufficient history, not an error).
    fn parse_series(row: &RawRow, name_column: &str, config: &ChartConfig) -> Option<YearSeries> {
        let mut series = YearSeries::new(config.span());
        for (label, cell) in row {
            if label == name_column {
                continue;
            }
            let Ok(year) = label.trim().parse::<i32>() else {
                continue;
            };
            let Some(slot) = config.slot(year) else {
                continue;
            };
            series.set(slot, cell.trim().parse::<f64>().unwrap_or(f64::NAN));
        }
        (series.known_count() >= config.valid_limit).then_some(series)
    }

    fn assign_groups(accumulating: &mut HashMap<String, PartialRecord>, regions: &RegionTable) {
        for row in &regions.rows {
            let Some(name) = row.get(&regions.name_column) else {
                continue;
            };
            // Group-only entities are never created.
            if let Some(record) = accumulating.get_mut(name) {
                record.group = row.get(&regions.group_column).cloned();
            }
        }
    }

    /// Promote a partial record, dropping it unless all four attributes
    /// are present, then fill every gap.
    fn finalize(name: String, partial: PartialRecord) -> Option<EntityRecord> {
        let PartialRecord {
            group: Some(group),
            income: Some(mut income),
            life_expectancy: Some(mut life_expectancy),
            population: Some(mut population),
        } = partial
        else {
            debug!(entity = %name, "dropping incomplete entity");
            return None;
        };
        fill_gaps(&mut income);
        fill_gaps(&mut life_expectancy);
        fill_gaps(&mut population);
        Some(EntityRecord {
            name,
            group,
            income,
            life_expectancy,
            population,
        })
    }
}

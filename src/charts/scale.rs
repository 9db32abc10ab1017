//! Chart Scales Module
//! Linear and square-root scales plus dataset extents, used to place
//! entities on the income / life-expectancy plane.

use crate::data::{EntityRecord, YearSeries};
use std::collections::HashMap;

/// Affine mapping from a value domain onto an output range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Scale linear in the square root of the value; keeps bubble area
/// proportional to population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = (self.domain.0.max(0.0).sqrt(), self.domain.1.max(0.0).sqrt());
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value.max(0.0).sqrt() - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Min/max of one indicator across all entities and all year slots.
pub fn attr_extent(
    nations: &HashMap<String, EntityRecord>,
    attr: impl Fn(&EntityRecord) -> &YearSeries,
) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for record in nations.values() {
        let series = attr(record);
        if let (Some(lo), Some(hi)) = (series.min(), series.max()) {
            min = min.min(lo);
            max = max.max(hi);
        }
    }
    if min.is_infinite() {
        return (0.0, 1.0);
    }
    (min, max)
}

/// The three scales of the bubble chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartScales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub r: SqrtScale,
}

impl ChartScales {
    /// Build scales from the dataset extents.
    ///
    /// Domains are padded by one unit so no bubble center sits exactly
    /// on an axis. The radius range starts below zero, so small
    /// populations can map to a non-positive radius; renderers clamp.
    pub fn from_nations(
        nations: &HashMap<String, EntityRecord>,
        inner_width: f64,
        inner_height: f64,
        largest_radius: f64,
    ) -> Self {
        let (income_min, income_max) = attr_extent(nations, |n| &n.income);
        let (life_min, life_max) = attr_extent(nations, |n| &n.life_expectancy);
        let (pop_min, pop_max) = attr_extent(nations, |n| &n.population);
        Self {
            x: LinearScale::new((income_min - 1.0, income_max), (0.0, inner_width)),
            y: LinearScale::new((life_min, life_max + 1.0), (inner_height, 0.0)),
            r: SqrtScale::new((pop_min, pop_max), (-50.0, largest_radius)),
        }
    }
}

/// Pixel position of one entity for every year slot.
pub fn derive_points(record: &EntityRecord, scales: &ChartScales) -> Vec<(f64, f64)> {
    (0..record.income.len())
        .map(|i| {
            (
                scales.x.scale(record.income.get(i)),
                scales.y.scale(record.life_expectancy.get(i)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_scale_is_affine() {
        let s = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(s.scale(0.0), 0.0);
        assert_eq!(s.scale(2.5), 25.0);
        assert_eq!(s.scale(10.0), 100.0);
    }

    #[test]
    fn linear_scale_supports_inverted_ranges() {
        let s = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.scale(0.0), 100.0);
        assert_eq!(s.scale(10.0), 0.0);
    }

    #[test]
    fn sqrt_scale_is_linear_in_the_root() {
        let s = SqrtScale::new((0.0, 100.0), (0.0, 10.0));
        assert_eq!(s.scale(25.0), 5.0);
        assert_eq!(s.scale(100.0), 10.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_midpoint() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 10.0));
        assert_eq!(s.scale(5.0), 5.0);
    }

    fn record(name: &str, income: Vec<f64>, life: Vec<f64>, pop: Vec<f64>) -> EntityRecord {
        EntityRecord {
            name: name.to_string(),
            group: "America".to_string(),
            income: YearSeries::from_values(income),
            life_expectancy: YearSeries::from_values(life),
            population: YearSeries::from_values(pop),
        }
    }

    #[test]
    fn extents_cover_all_entities_and_slots() {
        let mut nations = HashMap::new();
        nations.insert(
            "A".to_string(),
            record("A", vec![1.0, 9.0], vec![40.0, 50.0], vec![10.0, 20.0]),
        );
        nations.insert(
            "B".to_string(),
            record("B", vec![3.0, 12.0], vec![35.0, 45.0], vec![5.0, 8.0]),
        );
        assert_eq!(attr_extent(&nations, |n| &n.income), (1.0, 12.0));
        assert_eq!(attr_extent(&nations, |n| &n.population), (5.0, 20.0));
        assert_eq!(attr_extent(&HashMap::new(), |n| &n.income), (0.0, 1.0));
    }

    #[test]
    fn derived_points_follow_the_scales() {
        let rec = record("A", vec![0.0, 10.0], vec![0.0, 10.0], vec![1.0, 1.0]);
        let scales = ChartScales {
            x: LinearScale::new((0.0, 10.0), (0.0, 100.0)),
            y: LinearScale::new((0.0, 10.0), (100.0, 0.0)),
            r: SqrtScale::new((1.0, 1.0), (0.0, 30.0)),
        };
        assert_eq!(derive_points(&rec, &scales), vec![(0.0, 100.0), (100.0, 0.0)]);
    }
}

//! Gap Interpolator Module
//! Fills missing year slots by linear interpolation between known
//! neighbors, clamping to the nearest known value at the series edges.

use crate::data::YearSeries;

/// The pair of known-slot indices currently used as interpolation
/// endpoints. Advances forward as queries move right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bracket {
    anchor1: usize,
    anchor2: usize,
}

/// Affine index -> value mapping through the two bracket points.
#[derive(Debug, Clone, Copy)]
struct LineMap {
    slope: f64,
    intercept: f64,
}

impl LineMap {
    fn through(values: &[f64], bracket: Bracket) -> Self {
        let (x1, x2) = (bracket.anchor1 as f64, bracket.anchor2 as f64);
        let (y1, y2) = (values[bracket.anchor1], values[bracket.anchor2]);
        if bracket.anchor1 == bracket.anchor2 {
            // Degenerate bracket (single known slot): constant map.
            return Self {
                slope: 0.0,
                intercept: y1,
            };
        }
        let slope = (y2 - y1) / (x2 - x1);
        Self {
            slope,
            intercept: y1 - slope * x1,
        }
    }

    fn apply(&self, index: usize) -> f64 {
        self.slope * index as f64 + self.intercept
    }
}

/// Fills gaps in one entity's series for one indicator.
///
/// Queries must arrive in non-decreasing index order: the bracket only
/// moves forward, so an index left behind by an earlier advancement
/// would be answered from a stale bracket.
#[derive(Debug)]
pub struct GapInterpolator {
    values: Vec<f64>,
    first_known: usize,
    last_known: usize,
    bracket: Bracket,
    map: LineMap,
}

impl GapInterpolator {
    /// Returns `None` when the series has no known slot at all.
    pub fn new(series: &YearSeries) -> Option<Self> {
        let values = series.values().to_vec();
        let first_known = values.iter().position(|v| !v.is_nan())?;
        let last_known = values.iter().rposition(|v| !v.is_nan())?;
        let anchor2 = next_known(&values, first_known).unwrap_or(first_known);
        let bracket = Bracket {
            anchor1: first_known,
            anchor2,
        };
        let map = LineMap::through(&values, bracket);
        Some(Self {
            values,
            first_known,
            last_known,
            bracket,
            map,
        })
    }

    /// Value for `index`, defined for every index in `[0, len)`.
    pub fn value_at(&mut self, index: usize) -> f64 {
        if index < self.first_known {
            return self.values[self.first_known];
        }
        if index > self.last_known {
            return self.values[self.last_known];
        }
        while index > self.bracket.anchor2 {
            let Some(next) = next_known(&self.values, self.bracket.anchor2) else {
                break;
            };
            self.bracket = Bracket {
                anchor1: self.bracket.anchor2,
                anchor2: next,
            };
            self.map = LineMap::through(&self.values, self.bracket);
        }
        self.map.apply(index)
    }
}

fn next_known(values: &[f64], after: usize) -> Option<usize> {
    values[after + 1..]
        .iter()
        .position(|v| !v.is_nan())
        .map(|offset| after + 1 + offset)
}

/// Replace every missing slot of `series` in place, scanning left to right.
pub fn fill_gaps(series: &mut YearSeries) {
    let Some(mut interpolator) = GapInterpolator::new(series) else {
        return;
    };
    for i in 0..series.len() {
        if series.is_missing(i) {
            series.set(i, interpolator.value_at(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> YearSeries {
        YearSeries::from_values(values.to_vec())
    }

    #[test]
    fn clamps_to_nearest_edge_value() {
        let s = series(&[f64::NAN, f64::NAN, 5.0, f64::NAN, 10.0, f64::NAN, f64::NAN]);
        let mut interp = GapInterpolator::new(&s).unwrap();
        assert_eq!(interp.value_at(0), 5.0);
        assert_eq!(interp.value_at(1), 5.0);
        assert_eq!(interp.value_at(5), 10.0);
        assert_eq!(interp.value_at(6), 10.0);
    }

    #[test]
    fn interpolates_interior_gap_linearly() {
        let s = series(&[2.0, f64::NAN, f64::NAN, f64::NAN, 10.0]);
        let mut interp = GapInterpolator::new(&s).unwrap();
        assert_eq!(interp.value_at(2), 6.0);
    }

    #[test]
    fn bracket_advances_across_gaps() {
        let s = series(&[1.0, f64::NAN, 3.0, f64::NAN, f64::NAN, 6.0]);
        let mut interp = GapInterpolator::new(&s).unwrap();
        let got: Vec<f64> = (0..6).map(|i| interp.value_at(i)).collect();
        assert_eq!(got, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn bracket_skips_past_consecutive_known_slots() {
        // Known run at 0..=2, gap at 3, known at 4. The gap must be
        // bracketed by slots 2 and 4, not extrapolated from 1 and 2.
        let s = series(&[1.0, 2.0, 3.0, f64::NAN, 10.0]);
        let mut interp = GapInterpolator::new(&s).unwrap();
        assert_eq!(interp.value_at(3), 6.5);
    }

    #[test]
    fn single_known_slot_clamps_everywhere() {
        let s = series(&[f64::NAN, 4.0, f64::NAN]);
        let mut interp = GapInterpolator::new(&s).unwrap();
        assert_eq!(interp.value_at(0), 4.0);
        assert_eq!(interp.value_at(2), 4.0);
    }

    #[test]
    fn fill_gaps_leaves_no_missing_slot() {
        let mut s = series(&[f64::NAN, 1.0, f64::NAN, 5.0, f64::NAN]);
        fill_gaps(&mut s);
        assert_eq!(s.known_count(), s.len());
        assert_eq!(s.values(), &[1.0, 1.0, 3.0, 5.0, 5.0]);
    }

    #[test]
    fn fill_gaps_preserves_known_values() {
        let mut s = series(&[2.0, f64::NAN, 8.0]);
        fill_gaps(&mut s);
        assert_eq!(s.values(), &[2.0, 5.0, 8.0]);
    }

    #[test]
    fn fill_gaps_is_a_no_op_on_an_all_missing_series() {
        let mut s = YearSeries::new(3);
        fill_gaps(&mut s);
        assert_eq!(s.known_count(), 0);
    }
}

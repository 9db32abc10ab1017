//! Chart Snapshot Module
//! Renders a static bubble-chart PNG for a single year index.

use crate::charts::scale::ChartScales;
use crate::config::ChartConfig;
use crate::data::EntityRecord;
use plotters::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Bubble radius of the most populous entity, in pixels.
pub const LARGEST_RADIUS: f64 = 30.0;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Year index {year_index} outside series span {span}")]
    YearOutOfRange { year_index: usize, span: usize },
    #[error("Chart drawing failed: {0}")]
    Drawing(String),
}

fn drawing(err: impl std::fmt::Display) -> SnapshotError {
    SnapshotError::Drawing(err.to_string())
}

/// Render one year of the dataset as a PNG bubble chart.
///
/// X is income, Y is life expectancy, bubble area tracks population and
/// fill color comes from the configured region palette.
pub fn render_snapshot(
    nations: &HashMap<String, EntityRecord>,
    config: &ChartConfig,
    year_index: usize,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), SnapshotError> {
    let span = config.span();
    if year_index >= span {
        return Err(SnapshotError::YearOutOfRange { year_index, span });
    }

    let scales = ChartScales::from_nations(nations, width as f64, height as f64, LARGEST_RADIUS);

    // Paint large populations first so small bubbles stay visible on top.
    let mut ordered: Vec<&EntityRecord> = nations.values().collect();
    ordered.sort_by(|a, b| {
        b.population
            .get(span - 1)
            .partial_cmp(&a.population.get(span - 1))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let year = config.start_year + year_index as i32;
    let mut chart = ChartBuilder::on(&root)
        .caption(year.to_string(), ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            scales.x.domain.0..scales.x.domain.1,
            scales.y.domain.0..scales.y.domain.1,
        )
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .x_desc("income per capita, inflation-adjusted (dollars)")
        .y_desc("life expectancy (years)")
        .draw()
        .map_err(drawing)?;

    chart
        .draw_series(ordered.iter().map(|nation| {
            let [r, g, b] = config.color_for(&nation.group);
            let radius = scales.r.scale(nation.population.get(year_index)).max(1.0) as i32;
            Circle::new(
                (
                    nation.income.get(year_index),
                    nation.life_expectancy.get(year_index),
                ),
                radius,
                RGBColor(r, g, b).mix(0.8).filled(),
            )
        }))
        .map_err(drawing)?;

    root.present().map_err(drawing)?;
    tracing::info!(year, path = %path.display(), "wrote chart snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::YearSeries;

    #[test]
    fn rejects_year_index_beyond_the_span() {
        let config = ChartConfig {
            start_year: 2000,
            end_year: 2004,
            ..ChartConfig::default()
        };
        let nations = HashMap::from([(
            "A".to_string(),
            EntityRecord {
                name: "A".to_string(),
                group: "America".to_string(),
                income: YearSeries::from_values(vec![1.0; 5]),
                life_expectancy: YearSeries::from_values(vec![50.0; 5]),
                population: YearSeries::from_values(vec![10.0; 5]),
            },
        )]);
        let err = render_snapshot(
            &nations,
            &config,
            5,
            Path::new("/tmp/never-written.png"),
            100,
            100,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::YearOutOfRange { year_index: 5, span: 5 }
        ));
    }
}

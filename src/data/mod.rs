//! Data module - CSV loading, merging, and gap interpolation

mod interpolator;
mod loader;
mod merger;
mod model;

pub use interpolator::{fill_gaps, GapInterpolator};
pub use loader::{LoaderError, TableLoader};
pub use merger::DatasetMerger;
pub use model::{EntityRecord, IndicatorTable, RawRow, RawTable, RegionTable, YearSeries};

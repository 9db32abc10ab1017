//! Charts module - scales and static snapshot rendering

mod scale;
mod snapshot;

pub use scale::{attr_extent, derive_points, ChartScales, LinearScale, SqrtScale};
pub use snapshot::{render_snapshot, SnapshotError, LARGEST_RADIUS};

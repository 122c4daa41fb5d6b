//! Tracker event-group variants
//!
//! Concrete `EventGroup` implementations for tracking-detector data, each
//! with the factory that reconstructs it from a persisted dex record:
//! - `BoxHitGroup` (`"BoxTrackerHit"`): box-shaped hits with position,
//!   dimensions and time
//! - `PointTrajectoryGroup` (`"PointTrajectory"`): track lines as point rows
//!   with named columns
//!
//! The variants register nothing by themselves; application start-up code
//! passes their factories to the registry explicitly.

pub mod box_hit;
pub mod point_trajectory;

pub use box_hit::{BoxHit, BoxHitFactory, BoxHitGroup, BOX_HIT_TYPE};
pub use point_trajectory::{
    PointTrajectoryFactory, PointTrajectoryGroup, Trajectory, POINT_TRAJECTORY_TYPE,
};

use dex_core::DeserializationError;

/// Convert a parsed number sequence into a fixed-width array
pub(crate) fn fixed<const N: usize>(
    values: Vec<f64>,
    field: &'static str,
) -> Result<[f64; N], DeserializationError> {
    let len = values.len();
    values
        .try_into()
        .map_err(|_| DeserializationError::MalformedField {
            field,
            reason: format!("expected {N} numbers, got {len}"),
        })
}

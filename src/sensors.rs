//! This module contains tools for simulating sensors and sensor data

mod lidar;
mod spherical_grid;

pub use lidar::{
    DEFAULT_VERTICAL_OFFSET, ScanObserver, ScanParameters, ScanSession, ScanStatus, SphericalLidar,
    StepOutcome, SweepReport,
};
pub use spherical_grid::{
    AngleConvention, GridResolution, ScanCursor, direction_for, spherical_to_cartesian,
};

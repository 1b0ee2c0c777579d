//! This module contains the angular grid swept by a spherical range sensor. A grid of
//! `rays_per_axis` x `rays_per_axis` cells covers 180 degrees of polar angle (phi) and 360 degrees
//! of azimuth (theta), and each cell maps to a single ray direction.
//!
//! Two angle conventions exist. The incremental sweep centers phi on the horizon and runs theta
//! from +180 degrees down to -180 degrees, while the one-shot finishing sweep runs both angles
//! upwards from zero. The two do not produce the same direction for the same cell.

use crate::{Result, ScanError, UnitVec3, Vector3};
use itertools::iproduct;
use serde::{Deserialize, Serialize};

/// The number of rays cast along each angular axis of the sweep. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct GridResolution(u32);

impl GridResolution {
    pub fn new(rays_per_axis: u32) -> Result<Self> {
        if rays_per_axis < 1 {
            return Err(ScanError::InvalidResolution(rays_per_axis as i64));
        }
        Ok(Self(rays_per_axis))
    }

    pub fn rays_per_axis(&self) -> u32 {
        self.0
    }

    /// The polar angle between adjacent rows of the grid, in degrees
    pub fn phi_step(&self) -> f64 {
        180.0 / self.0 as f64
    }

    /// The azimuth angle between adjacent columns of the grid, in degrees
    pub fn theta_step(&self) -> f64 {
        360.0 / self.0 as f64
    }

    /// The total number of cells in one full sweep
    pub fn cell_count(&self) -> usize {
        self.0 as usize * self.0 as usize
    }

    /// Iterates over every cell of the grid in row-major (phi, then theta) order.
    pub fn cells(&self) -> impl Iterator<Item = ScanCursor> + use<> {
        let n = self.0;
        iproduct!(0..n, 0..n).map(|(i, j)| ScanCursor::new(i, j))
    }
}

impl TryFrom<i64> for GridResolution {
    type Error = ScanError;

    fn try_from(value: i64) -> Result<Self> {
        if value < 1 || value > u32::MAX as i64 {
            return Err(ScanError::InvalidResolution(value));
        }
        Ok(Self(value as u32))
    }
}

impl From<GridResolution> for i64 {
    fn from(value: GridResolution) -> Self {
        value.0 as i64
    }
}

/// The position of a sweep within the angular grid. This is the complete resumable state of a
/// sweep: the cell it points at is the next one to be cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ScanCursor {
    pub phi_index: u32,
    pub theta_index: u32,
}

impl ScanCursor {
    pub const START: ScanCursor = ScanCursor {
        phi_index: 0,
        theta_index: 0,
    };

    pub fn new(phi_index: u32, theta_index: u32) -> Self {
        Self {
            phi_index,
            theta_index,
        }
    }

    /// Returns the cell following this one in row-major order, or `None` if this was the last
    /// cell of the grid.
    ///
    /// # Arguments
    ///
    /// * `resolution`: the grid the cursor is moving through
    ///
    /// returns: Option<ScanCursor>
    ///
    /// # Examples
    ///
    /// ```
    /// use lidarsweep::sensors::{GridResolution, ScanCursor};
    /// let res = GridResolution::new(2).unwrap();
    /// assert_eq!(ScanCursor::new(0, 1).next(res), Some(ScanCursor::new(1, 0)));
    /// assert_eq!(ScanCursor::new(1, 1).next(res), None);
    /// ```
    pub fn next(self, resolution: GridResolution) -> Option<ScanCursor> {
        let n = resolution.rays_per_axis();
        let mut phi_index = self.phi_index;
        let mut theta_index = self.theta_index + 1;
        if theta_index >= n {
            theta_index = 0;
            phi_index += 1;
        }

        if phi_index >= n {
            None
        } else {
            Some(ScanCursor::new(phi_index, theta_index))
        }
    }

    /// The number of cells that come before this one in a sweep of the given resolution.
    pub fn linear_index(&self, resolution: GridResolution) -> usize {
        self.phi_index as usize * resolution.rays_per_axis() as usize + self.theta_index as usize
    }
}

/// Selects which pair of angle formulas turns a grid cell into angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleConvention {
    /// `phi = i * phi_step - 90`, `theta = 180 - j * theta_step`
    Incremental,

    /// `phi = i * phi_step`, `theta = j * theta_step`
    FinishSynchronously,
}

impl AngleConvention {
    /// Returns the (phi, theta) angles of a cell, in degrees.
    pub fn angles(&self, cursor: ScanCursor, resolution: GridResolution) -> (f64, f64) {
        let i = cursor.phi_index as f64;
        let j = cursor.theta_index as f64;
        match self {
            AngleConvention::Incremental => (
                i * resolution.phi_step() - 90.0,
                180.0 - j * resolution.theta_step(),
            ),
            AngleConvention::FinishSynchronously => {
                (i * resolution.phi_step(), j * resolution.theta_step())
            }
        }
    }
}

/// Converts spherical angles, given in degrees, to a direction vector. The parametrization is
/// `x = sin(phi)cos(theta)`, `y = sin(phi)sin(theta)`, `z = cos(phi)`, which is already of unit
/// length for any pair of angles.
pub fn spherical_to_cartesian(phi: f64, theta: f64) -> UnitVec3 {
    let (sp, cp) = phi.to_radians().sin_cos();
    let (st, ct) = theta.to_radians().sin_cos();
    UnitVec3::new_unchecked(Vector3::new(sp * ct, sp * st, cp))
}

/// Returns the ray direction for a grid cell under the given angle convention.
pub fn direction_for(
    cursor: ScanCursor,
    resolution: GridResolution,
    convention: AngleConvention,
) -> UnitVec3 {
    let (phi, theta) = convention.angles(cursor, resolution);
    spherical_to_cartesian(phi, theta)
}

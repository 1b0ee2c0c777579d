//! Configuration for a scanning setup, loadable from JSON. Every field has a default, so a
//! configuration file only needs to mention what it changes.

use crate::sensors::{DEFAULT_VERTICAL_OFFSET, GridResolution, ScanParameters};
use crate::{Point3, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum ray length
    pub range: f64,

    /// Number of rays along each angular axis of the sweep
    pub rays_per_axis: i64,

    /// Minimum real time between two incremental steps, in milliseconds
    pub step_interval_ms: u64,

    /// Downward shift applied to every recorded hit point
    pub vertical_offset: f64,

    /// Position of the sensor in the scene
    pub origin: [f64; 3],

    /// Directory that completed sweeps are written to
    pub output_dir: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            range: 15.0,
            rays_per_axis: 30,
            step_interval_ms: 100,
            vertical_offset: DEFAULT_VERTICAL_OFFSET,
            origin: [0.0; 3],
            output_dir: PathBuf::from("output"),
        }
    }
}

impl ScanConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the range and resolution and returns them as sweep parameters.
    pub fn parameters(&self) -> Result<ScanParameters> {
        let resolution = GridResolution::try_from(self.rays_per_axis)?;
        ScanParameters::new(self.range, resolution)
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn origin(&self) -> Point3 {
        Point3::from(self.origin)
    }
}

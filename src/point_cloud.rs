//! This module contains the ordered accumulator of colored samples produced during a sweep.

use crate::{Point3, Rgb};
use parry3d_f64::bounding_volume::Aabb;
use serde::{Deserialize, Serialize};

/// A single recorded surface point with its sampled color. The `session` field is the id of the
/// sweep that produced the sample, which lets downstream consumers group the samples of one scan
/// together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub position: Point3,
    pub color: Rgb,
    pub session: u32,
}

impl Sample {
    pub fn new(position: Point3, color: Rgb, session: u32) -> Self {
        Self {
            position,
            color,
            session,
        }
    }
}

/// An append-only, ordered collection of samples. Samples are kept in the order they were
/// discovered, with no deduplication or reordering.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    samples: Vec<Sample>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty point cloud which can hold `capacity` samples before reallocating. A full
    /// sweep produces at most one sample per grid cell.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Moves every sample out of the cloud, leaving it empty. The returned samples are in
    /// insertion order.
    pub fn snapshot_and_clear(&mut self) -> Vec<Sample> {
        std::mem::take(&mut self.samples)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn points(&self) -> Vec<Point3> {
        self.samples.iter().map(|s| s.position).collect()
    }

    pub fn colors(&self) -> Vec<Rgb> {
        self.samples.iter().map(|s| s.color).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The axis-aligned bounding box of all sample positions, or `None` for an empty cloud.
    pub fn aabb(&self) -> Option<Aabb> {
        if self.samples.is_empty() {
            return None;
        }
        Some(Aabb::from_points(&self.points()))
    }
}

impl Extend<Sample> for PointCloud {
    fn extend<T: IntoIterator<Item = Sample>>(&mut self, iter: T) {
        self.samples.extend(iter);
    }
}

impl From<Vec<Sample>> for PointCloud {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

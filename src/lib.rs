//! Simulation of a spherical range sensor sweeping a 3D scene, collecting colored surface samples
//! and exporting them as PCD point cloud files.
//!
//! The sweep is driven one grid cell at a time by a [`sensors::SphericalLidar`], which can be
//! paused, resumed, cancelled, or finished in a single burst. A [`session::ScanController`] maps
//! external control signals and text parameters onto the sensor.

pub mod common;
pub mod config;
mod errors;
pub mod io;
pub mod point_cloud;
pub mod scene;
pub mod sensors;
pub mod session;

pub use parry3d_f64::na;

pub use common::Rgb;
pub use config::ScanConfig;
pub use errors::ScanError;
pub use point_cloud::{PointCloud, Sample};

pub type Point3 = parry3d_f64::na::Point3<f64>;
pub type Vector3 = parry3d_f64::na::Vector3<f64>;
pub type UnitVec3 = parry3d_f64::na::Unit<Vector3>;
pub type Iso3 = parry3d_f64::na::Isometry3<f64>;
pub type Point2 = parry3d_f64::na::Point2<f64>;

pub type Result<T> = std::result::Result<T, ScanError>;

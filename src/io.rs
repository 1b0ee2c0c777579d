//! This module has I/O functionality for exporting scanned point clouds

mod pcd;

pub use pcd::{NullExporter, PcdExporter, SweepExporter, write_pcd, write_pcd_to};

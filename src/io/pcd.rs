//! This module writes point clouds in the ASCII flavor of the PCD (Point Cloud Data) v0.7 format.
//!
//! The file consists of an eleven line header followed by one line per point:
//!
//! ```text
//! # .PCD v0.7 - Point Cloud Data file format
//! VERSION 0.7
//! FIELDS x y z rgb
//! SIZE 4 4 4 4
//! TYPE F F F F
//! COUNT 1 1 1 1
//! WIDTH <n>
//! HEIGHT 1
//! VIEWPOINT 0 0 0 1 0 0 0
//! POINTS <n>
//! DATA ascii
//! <x> <y> <z> <rgb>
//! ```
//!
//! Coordinates are written as single precision values with a dot decimal separator and no digit
//! grouping, and `rgb` is the packed `(r << 16) | (g << 8) | b` integer of the sample color.

use crate::{Result, Sample, ScanError};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write the samples as an ASCII PCD document to any writer.
///
/// # Arguments
///
/// * `writer`: the destination of the document
/// * `samples`: the samples to write, in the order they should appear in the file
///
/// returns: Result<(), Error>
pub fn write_pcd_to<W: Write>(writer: &mut W, samples: &[Sample]) -> std::io::Result<()> {
    let n = samples.len();

    writeln!(writer, "# .PCD v0.7 - Point Cloud Data file format")?;
    writeln!(writer, "VERSION 0.7")?;
    writeln!(writer, "FIELDS x y z rgb")?;
    writeln!(writer, "SIZE 4 4 4 4")?;
    writeln!(writer, "TYPE F F F F")?;
    writeln!(writer, "COUNT 1 1 1 1")?;
    writeln!(writer, "WIDTH {n}")?;
    writeln!(writer, "HEIGHT 1")?;
    writeln!(writer, "VIEWPOINT 0 0 0 1 0 0 0")?;
    writeln!(writer, "POINTS {n}")?;
    writeln!(writer, "DATA ascii")?;

    for s in samples {
        let p = &s.position;
        writeln!(
            writer,
            "{} {} {} {}",
            p.x as f32,
            p.y as f32,
            p.z as f32,
            s.color.packed()
        )?;
    }

    writer.flush()
}

/// Write the samples to a PCD file at the given path. The parent directory must already exist;
/// this function does not create it.
pub fn write_pcd(path: &Path, samples: &[Sample]) -> Result<()> {
    let export_err = |source| ScanError::Export {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(export_err)?;
    let mut writer = BufWriter::new(file);
    write_pcd_to(&mut writer, samples).map_err(export_err)?;

    info!("PCD file written to {} ({} points)", path.display(), samples.len());
    Ok(())
}

/// The destination for the samples of a completed sweep.
pub trait SweepExporter {
    /// Export the samples of the sweep with the given session id, returning the location they
    /// were written to, if any.
    fn export(&mut self, session_id: u32, samples: &[Sample]) -> Result<Option<PathBuf>>;
}

/// Writes each completed sweep to `<output_dir>/scan_<id>.pcd`.
#[derive(Debug, Clone)]
pub struct PcdExporter {
    output_dir: PathBuf,
}

impl PcdExporter {
    /// Create an exporter for a directory which is expected to already exist.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Create the output directory (and any missing parents) and return an exporter for it.
    pub fn prepare(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, session_id: u32) -> PathBuf {
        self.output_dir.join(format!("scan_{session_id}.pcd"))
    }
}

impl SweepExporter for PcdExporter {
    fn export(&mut self, session_id: u32, samples: &[Sample]) -> Result<Option<PathBuf>> {
        let path = self.path_for(session_id);
        write_pcd(&path, samples)?;
        Ok(Some(path))
    }
}

/// Discards every sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullExporter;

impl SweepExporter for NullExporter {
    fn export(&mut self, _session_id: u32, _samples: &[Sample]) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

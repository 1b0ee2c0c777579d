//! This module drives a `SphericalLidar` from outside inputs. Once per external tick the
//! controller re-reads the scan parameters from a text source, applies a discrete control signal,
//! and then advances a running sweep at a fixed cadence of real time.
//!
//! Parameters read while a sweep is in progress are kept pending and only take effect when the
//! next sweep starts, so the grid shape of an active sweep can never change under its cursor.

use crate::Result;
use crate::config::ScanConfig;
use crate::io::{PcdExporter, SweepExporter};
use crate::scene::SceneIntersector;
use crate::sensors::{
    GridResolution, ScanParameters, ScanStatus, SphericalLidar, StepOutcome, SweepReport,
};
use log::{debug, warn};
use std::time::Duration;

/// An external request to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// Nothing requested
    Idle,

    /// Start a new sweep, or resume a paused one
    Run,

    /// Pause the running sweep
    Pause,

    /// Complete the remainder of the sweep immediately and export it
    Finish,

    /// Stop the sweep immediately, discarding it
    Cancel,
}

/// A source of scan parameters in text form, such as fields on a form. Either value may be
/// missing or malformed, in which case the previous value is kept.
pub trait ParameterSource {
    fn range_text(&self) -> Option<String>;
    fn rays_per_axis_text(&self) -> Option<String>;
}

/// A parameter source that holds whatever text it was last given.
#[derive(Debug, Clone, Default)]
pub struct StaticParameters {
    pub range: Option<String>,
    pub rays_per_axis: Option<String>,
}

impl StaticParameters {
    pub fn new(range: impl Into<String>, rays_per_axis: impl Into<String>) -> Self {
        Self {
            range: Some(range.into()),
            rays_per_axis: Some(rays_per_axis.into()),
        }
    }

    pub fn set_range(&mut self, text: impl Into<String>) {
        self.range = Some(text.into());
    }

    pub fn set_rays_per_axis(&mut self, text: impl Into<String>) {
        self.rays_per_axis = Some(text.into());
    }
}

impl ParameterSource for StaticParameters {
    fn range_text(&self) -> Option<String> {
        self.range.clone()
    }

    fn rays_per_axis_text(&self) -> Option<String> {
        self.rays_per_axis.clone()
    }
}

pub struct ScanController<S, E, P> {
    lidar: SphericalLidar<S, E>,
    source: P,
    parameters: ScanParameters,
    step_interval: Duration,
    budget: Duration,
}

impl<S: SceneIntersector, E: SweepExporter, P: ParameterSource> ScanController<S, E, P> {
    /// Create a controller around a sensor.
    ///
    /// # Arguments
    ///
    /// * `lidar`: the sensor to drive, which should be idle
    /// * `source`: where scan parameters are read from on every tick
    /// * `parameters`: the parameters to use until the source provides valid ones
    /// * `step_interval`: the minimum real time between two incremental steps
    ///
    /// returns: ScanController<S, E, P>
    pub fn new(
        lidar: SphericalLidar<S, E>,
        source: P,
        parameters: ScanParameters,
        step_interval: Duration,
    ) -> Self {
        Self {
            lidar,
            source,
            parameters,
            step_interval,
            budget: Duration::ZERO,
        }
    }

    pub fn lidar(&self) -> &SphericalLidar<S, E> {
        &self.lidar
    }

    pub fn lidar_mut(&mut self) -> &mut SphericalLidar<S, E> {
        &mut self.lidar
    }

    pub fn source_mut(&mut self) -> &mut P {
        &mut self.source
    }

    /// The parameters the next sweep will start with
    pub fn parameters(&self) -> &ScanParameters {
        &self.parameters
    }

    pub fn status(&self) -> ScanStatus {
        self.lidar.status()
    }

    /// Read the parameter source, keeping the previous value of any field which is missing,
    /// malformed, or out of range. Returns whether the pending parameters changed.
    pub fn refresh_parameters(&mut self) -> bool {
        let mut range = self.parameters.range();
        let mut resolution = self.parameters.resolution();

        if let Some(text) = self.source.range_text() {
            match text.trim().parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => range = value,
                _ => warn!("Ignoring invalid scan range {:?}", text),
            }
        }

        if let Some(text) = self.source.rays_per_axis_text() {
            match text.trim().parse::<i64>().map(GridResolution::try_from) {
                Ok(Ok(value)) => resolution = value,
                _ => warn!("Ignoring invalid rays per axis {:?}", text),
            }
        }

        // Both values were checked above, so this cannot fail
        let Ok(updated) = ScanParameters::new(range, resolution) else {
            return false;
        };

        if updated == self.parameters {
            return false;
        }
        debug!(
            "Scan parameters changed to range {}, {} rays per axis",
            updated.range(),
            updated.resolution().rays_per_axis()
        );
        self.parameters = updated;
        true
    }

    /// Apply a control signal to the sensor. Signals that do not make sense for the current
    /// state are ignored. Returns the report of a sweep completed by the signal.
    pub fn apply(&mut self, signal: ControlSignal) -> Result<Option<SweepReport>> {
        match (signal, self.lidar.status()) {
            (ControlSignal::Run, ScanStatus::Idle) => {
                if self.lidar.start(self.parameters) {
                    self.budget = self.step_interval;
                }
                Ok(None)
            }
            (ControlSignal::Run, ScanStatus::Paused) => {
                if self.lidar.resume() {
                    self.budget = self.step_interval;
                }
                Ok(None)
            }
            (ControlSignal::Pause, ScanStatus::Running) => {
                self.lidar.pause();
                Ok(None)
            }
            (ControlSignal::Finish, ScanStatus::Running | ScanStatus::Paused) => {
                let report = self.lidar.finish_synchronously();
                self.budget = Duration::ZERO;
                report
            }
            (ControlSignal::Cancel, ScanStatus::Running | ScanStatus::Paused) => {
                self.lidar.cancel();
                self.budget = Duration::ZERO;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Let `elapsed` real time pass, taking one step for every full step interval of accumulated
    /// time while the sweep is running. The first step after a start or resume is taken
    /// immediately. Returns the report if the sweep completed.
    pub fn advance(&mut self, elapsed: Duration) -> Result<Option<SweepReport>> {
        if self.lidar.status() != ScanStatus::Running {
            return Ok(None);
        }

        self.budget += elapsed;
        while self.budget >= self.step_interval {
            self.budget -= self.step_interval;
            match self.lidar.step()? {
                StepOutcome::Advanced { .. } => {}
                StepOutcome::Completed(report) => {
                    self.budget = Duration::ZERO;
                    return Ok(Some(report));
                }
                StepOutcome::Inactive => break,
            }
        }
        Ok(None)
    }

    /// One external tick: refresh the parameters, apply the signal, then advance by `elapsed`.
    /// Time elapsed before the sweep was running does not count, so a tick that starts or
    /// resumes a sweep takes exactly its one immediate step.
    pub fn tick(&mut self, signal: ControlSignal, elapsed: Duration) -> Result<Option<SweepReport>> {
        self.refresh_parameters();
        let was_running = self.lidar.status() == ScanStatus::Running;
        if let Some(report) = self.apply(signal)? {
            return Ok(Some(report));
        }
        if was_running {
            self.advance(elapsed)
        } else {
            self.advance(Duration::ZERO)
        }
    }
}

impl<S: SceneIntersector, P: ParameterSource> ScanController<S, PcdExporter, P> {
    /// Build a controller that writes PCD files, set up from a configuration. The output
    /// directory is created if it does not exist yet.
    pub fn from_config(config: &ScanConfig, scene: S, source: P) -> Result<Self> {
        let exporter = PcdExporter::prepare(&config.output_dir)?;
        let lidar = SphericalLidar::new(scene, exporter)
            .with_origin(config.origin())
            .with_vertical_offset(config.vertical_offset);
        Ok(Self::new(
            lidar,
            source,
            config.parameters()?,
            config.step_interval(),
        ))
    }
}

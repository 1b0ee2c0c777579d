//! This module has the incremental scanning engine of a simulated spherical LIDAR. The sensor sits
//! at a fixed origin and sweeps a grid of ray directions covering the full sphere, casting one ray
//! per grid cell into a scene and recording the colored surface points it hits.
//!
//! A sweep is advanced one cell at a time with `step()`, and all of its resumable state lives in
//! the session cursor, so the caller is free to pause between any two steps for as long as it
//! likes. A sweep can also be finished in one uninterrupted burst with `finish_synchronously()`,
//! or abandoned with `cancel()`, which exports nothing.

use super::spherical_grid::{AngleConvention, GridResolution, ScanCursor, direction_for};
use crate::io::SweepExporter;
use crate::scene::SceneIntersector;
use crate::{Point3, PointCloud, Result, Sample, ScanError, UnitVec3, Vector3};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The downward shift applied to every recorded hit point so that scans line up with the frame of
/// the scene they are compared against.
pub const DEFAULT_VERTICAL_OFFSET: f64 = 70.0;

/// The settings of one sweep. They are captured when the sweep starts and stay fixed until it
/// ends, regardless of what happens to the source they were read from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanParameters {
    range: f64,
    resolution: GridResolution,
}

impl ScanParameters {
    pub fn new(range: f64, resolution: GridResolution) -> Result<Self> {
        if !range.is_finite() || range <= 0.0 {
            return Err(ScanError::InvalidRange(range));
        }
        Ok(Self { range, resolution })
    }

    /// The maximum distance a ray can travel before it is considered a miss
    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn resolution(&self) -> GridResolution {
        self.resolution
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Idle,
    Running,
    Paused,

    /// The status of a session whose samples have been handed to the exporter. The sensor itself
    /// goes straight back to `Idle` once a sweep completes.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSession {
    pub id: u32,
    pub cursor: ScanCursor,
    pub status: ScanStatus,
}

/// The summary of a completed sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    pub session_id: u32,

    /// The name under which everything produced by this sweep should be grouped
    pub group: String,

    pub sample_count: usize,

    /// Where the exporter put the samples, if anywhere
    pub path: Option<PathBuf>,
}

impl SweepReport {
    pub fn group_name(session_id: u32) -> String {
        format!("Scan_{session_id}")
    }
}

/// The result of asking the sensor to advance by one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The sensor is not running, nothing was done
    Inactive,

    /// The given cell was cast and the cursor moved on to the next one
    Advanced { cell: ScanCursor, sampled: bool },

    /// The last cell of the grid was cast and the sweep was completed
    Completed(SweepReport),
}

/// Receives visual feedback about a sweep as it happens. Observers see events after the fact and
/// have no way to influence the sweep.
pub trait ScanObserver {
    /// A ray was cast from `origin` along `direction`, reaching at most `range`
    fn on_ray(&mut self, _origin: &Point3, _direction: &UnitVec3, _range: f64) {}

    /// A sample was added to the point cloud
    fn on_sample(&mut self, _sample: &Sample) {}

    /// A sweep finished and its samples were handed to the exporter
    fn on_sweep_complete(&mut self, _report: &SweepReport) {}
}

pub struct SphericalLidar<S, E> {
    scene: S,
    exporter: E,
    observer: Option<Box<dyn ScanObserver>>,
    origin: Point3,
    vertical_offset: f64,

    session: ScanSession,
    next_session_id: u32,
    parameters: Option<ScanParameters>,
    cloud: PointCloud,
    last_completed: Option<ScanSession>,
}

impl<S: SceneIntersector, E: SweepExporter> SphericalLidar<S, E> {
    /// Create an idle sensor at the world origin which will scan `scene` and hand each completed
    /// sweep to `exporter`.
    pub fn new(scene: S, exporter: E) -> Self {
        Self {
            scene,
            exporter,
            observer: None,
            origin: Point3::origin(),
            vertical_offset: DEFAULT_VERTICAL_OFFSET,
            session: ScanSession {
                id: 1,
                cursor: ScanCursor::START,
                status: ScanStatus::Idle,
            },
            next_session_id: 1,
            parameters: None,
            cloud: PointCloud::new(),
            last_completed: None,
        }
    }

    pub fn with_origin(mut self, origin: Point3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_vertical_offset(mut self, vertical_offset: f64) -> Self {
        self.vertical_offset = vertical_offset;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn ScanObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn status(&self) -> ScanStatus {
        self.session.status
    }

    pub fn cursor(&self) -> ScanCursor {
        self.session.cursor
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// The id that the next sweep to start will be given
    pub fn next_session_id(&self) -> u32 {
        self.next_session_id
    }

    /// The most recent session to complete, with its status set to `Completed`
    pub fn last_completed(&self) -> Option<&ScanSession> {
        self.last_completed.as_ref()
    }

    /// The parameters of the current or most recent sweep
    pub fn parameters(&self) -> Option<&ScanParameters> {
        self.parameters.as_ref()
    }

    /// The samples collected so far by the current sweep
    pub fn point_cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    pub fn exporter_mut(&mut self) -> &mut E {
        &mut self.exporter
    }

    /// Begin a new sweep with the given parameters. This only has an effect while the sensor is
    /// idle; returns whether a sweep was started.
    pub fn start(&mut self, parameters: ScanParameters) -> bool {
        if self.session.status != ScanStatus::Idle {
            return false;
        }

        self.session = ScanSession {
            id: self.next_session_id,
            cursor: ScanCursor::START,
            status: ScanStatus::Running,
        };
        self.parameters = Some(parameters);
        self.cloud.clear();

        info!(
            "Starting sweep {} with {} rays per axis, range {}",
            self.session.id,
            parameters.resolution.rays_per_axis(),
            parameters.range
        );
        true
    }

    /// Stop advancing the sweep, keeping the cursor where it is. Only valid while running.
    pub fn pause(&mut self) -> bool {
        if self.session.status != ScanStatus::Running {
            return false;
        }
        self.session.status = ScanStatus::Paused;
        debug!("Paused sweep {} at {:?}", self.session.id, self.session.cursor);
        true
    }

    /// Continue a paused sweep from the stored cursor. Only valid while paused.
    pub fn resume(&mut self) -> bool {
        if self.session.status != ScanStatus::Paused {
            return false;
        }
        self.session.status = ScanStatus::Running;
        debug!("Resumed sweep {} at {:?}", self.session.id, self.session.cursor);
        true
    }

    /// Abandon the current sweep without exporting anything. The cursor and the collected samples
    /// are left untouched until the next `start()` resets them.
    pub fn cancel(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.session.status = ScanStatus::Idle;
        debug!(
            "Cancelled sweep {} at {:?} with {} samples discarded",
            self.session.id,
            self.session.cursor,
            self.cloud.len()
        );
        true
    }

    /// Cast the ray for the cell under the cursor and move the cursor to the next cell. Casting
    /// the last cell of the grid completes the sweep.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.session.status != ScanStatus::Running {
            return Ok(StepOutcome::Inactive);
        }
        let Some(parameters) = self.parameters else {
            return Ok(StepOutcome::Inactive);
        };

        let cell = self.session.cursor;
        let sampled = self.cast_cell(cell, &parameters, AngleConvention::Incremental);

        match cell.next(parameters.resolution) {
            Some(next) => {
                self.session.cursor = next;
                Ok(StepOutcome::Advanced { cell, sampled })
            }
            None => self.complete().map(StepOutcome::Completed),
        }
    }

    /// Cast every remaining cell of the sweep at once and complete it. The remaining cells are
    /// cast with the `FinishSynchronously` angle convention rather than the incremental one.
    /// Returns `None` if there was no sweep in progress.
    pub fn finish_synchronously(&mut self) -> Result<Option<SweepReport>> {
        if !self.is_active() {
            return Ok(None);
        }
        let Some(parameters) = self.parameters else {
            return Ok(None);
        };

        debug!(
            "Finishing sweep {} from {:?}",
            self.session.id, self.session.cursor
        );

        let mut cell = Some(self.session.cursor);
        while let Some(current) = cell {
            self.cast_cell(current, &parameters, AngleConvention::FinishSynchronously);
            cell = current.next(parameters.resolution);
            if let Some(next) = cell {
                self.session.cursor = next;
            }
        }

        self.complete().map(Some)
    }

    /// Start a sweep and step it until it completes, returning its report. Returns `None` if the
    /// sensor was not idle.
    pub fn run_to_completion(&mut self, parameters: ScanParameters) -> Result<Option<SweepReport>> {
        if !self.start(parameters) {
            return Ok(None);
        }
        loop {
            match self.step()? {
                StepOutcome::Completed(report) => return Ok(Some(report)),
                StepOutcome::Advanced { .. } => continue,
                StepOutcome::Inactive => return Ok(None),
            }
        }
    }

    fn is_active(&self) -> bool {
        matches!(
            self.session.status,
            ScanStatus::Running | ScanStatus::Paused
        )
    }

    /// Casts one cell and records its sample, if any. Nothing is modified until the scene has
    /// answered both queries for the cell.
    fn cast_cell(
        &mut self,
        cell: ScanCursor,
        parameters: &ScanParameters,
        convention: AngleConvention,
    ) -> bool {
        let direction = direction_for(cell, parameters.resolution, convention);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_ray(&self.origin, &direction, parameters.range);
        }

        let found = self
            .scene
            .intersect(&self.origin, &direction, parameters.range)
            .and_then(|hit| {
                self.scene
                    .sample_surface_color(&hit)
                    .map(|color| (hit.point, color))
            });

        let Some((point, color)) = found else {
            trace!("Cell {:?}: no sample", cell);
            return false;
        };

        let position = point - Vector3::new(0.0, self.vertical_offset, 0.0);
        let sample = Sample::new(position, color, self.session.id);
        trace!("Cell {:?}: sample at {:?}", cell, position);

        self.cloud.append(sample);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_sample(&sample);
        }
        true
    }

    /// Finalizes the current session and hands its samples to the exporter. The sensor is back
    /// to idle, with a fresh cursor and the next session id, before the export is attempted, so a
    /// failed export never prevents another sweep from starting.
    fn complete(&mut self) -> Result<SweepReport> {
        let session_id = self.session.id;
        let samples = self.cloud.snapshot_and_clear();

        self.last_completed = Some(ScanSession {
            status: ScanStatus::Completed,
            ..self.session
        });
        self.session.cursor = ScanCursor::START;
        self.session.status = ScanStatus::Idle;
        self.next_session_id += 1;

        info!(
            "Sweep {} complete with {} samples",
            session_id,
            samples.len()
        );

        let exported = self.exporter.export(session_id, &samples);
        let report = SweepReport {
            session_id,
            group: SweepReport::group_name(session_id),
            sample_count: samples.len(),
            path: exported.as_ref().ok().cloned().flatten(),
        };

        if let Some(observer) = self.observer.as_mut() {
            observer.on_sweep_complete(&report);
        }

        exported.map(|_| report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::NullExporter;
    use crate::scene::SurfaceHit;
    use crate::{Rgb, ScanError};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// A sphere of fixed radius around the origin. Its color encodes the ray direction, and the
    /// part of it below z = -0.5 has no color to sample.
    struct Shell {
        radius: f64,
    }

    impl SceneIntersector for Shell {
        fn intersect(
            &self,
            origin: &Point3,
            direction: &UnitVec3,
            max_range: f64,
        ) -> Option<SurfaceHit> {
            if self.radius > max_range {
                return None;
            }
            Some(SurfaceHit {
                point: origin + direction.as_ref() * self.radius,
                normal: -*direction,
                distance: self.radius,
                object: 0,
                uv: None,
                has_surface_color: direction.z >= -0.5,
            })
        }

        fn sample_surface_color(&self, hit: &SurfaceHit) -> Option<Rgb> {
            if !hit.has_surface_color {
                return None;
            }
            let d = hit.point.coords / self.radius;
            Some(Rgb::new(
                (d.x as f32 + 1.0) / 2.0,
                (d.y as f32 + 1.0) / 2.0,
                (d.z as f32 + 1.0) / 2.0,
            ))
        }
    }

    #[derive(Default)]
    struct Recorder {
        exports: Vec<(u32, Vec<Sample>)>,
    }

    impl SweepExporter for Recorder {
        fn export(&mut self, session_id: u32, samples: &[Sample]) -> Result<Option<PathBuf>> {
            self.exports.push((session_id, samples.to_vec()));
            Ok(None)
        }
    }

    struct Failing;

    impl SweepExporter for Failing {
        fn export(&mut self, _session_id: u32, _samples: &[Sample]) -> Result<Option<PathBuf>> {
            Err(ScanError::Export {
                path: PathBuf::from("nowhere/scan.pcd"),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    #[derive(Default)]
    struct Events {
        rays: Vec<UnitVec3>,
        samples: usize,
        completed: Vec<SweepReport>,
    }

    struct SharedObserver(Rc<RefCell<Events>>);

    impl ScanObserver for SharedObserver {
        fn on_ray(&mut self, _origin: &Point3, direction: &UnitVec3, _range: f64) {
            self.0.borrow_mut().rays.push(*direction);
        }

        fn on_sample(&mut self, _sample: &Sample) {
            self.0.borrow_mut().samples += 1;
        }

        fn on_sweep_complete(&mut self, report: &SweepReport) {
            self.0.borrow_mut().completed.push(report.clone());
        }
    }

    fn params(n: u32) -> ScanParameters {
        ScanParameters::new(15.0, GridResolution::new(n).unwrap()).unwrap()
    }

    fn lidar() -> SphericalLidar<Shell, Recorder> {
        SphericalLidar::new(Shell { radius: 10.0 }, Recorder::default())
    }

    fn expected_sample(cell: ScanCursor, n: u32, convention: AngleConvention) -> Option<Sample> {
        let res = GridResolution::new(n).unwrap();
        let scene = Shell { radius: 10.0 };
        let d = direction_for(cell, res, convention);
        let hit = scene.intersect(&Point3::origin(), &d, 15.0)?;
        let color = scene.sample_surface_color(&hit)?;
        Some(Sample::new(
            hit.point - Vector3::new(0.0, DEFAULT_VERTICAL_OFFSET, 0.0),
            color,
            1,
        ))
    }

    #[test]
    fn invalid_range_is_rejected() {
        let res = GridResolution::new(3).unwrap();
        assert!(matches!(
            ScanParameters::new(0.0, res),
            Err(ScanError::InvalidRange(_))
        ));
        assert!(ScanParameters::new(f64::NAN, res).is_err());
        assert!(ScanParameters::new(-1.0, res).is_err());
    }

    #[test]
    fn full_sweep_exports_once() {
        let mut lidar = lidar();
        let report = lidar.run_to_completion(params(4)).unwrap().unwrap();

        assert_eq!(report.session_id, 1);
        assert_eq!(report.group, "Scan_1");
        assert_eq!(lidar.status(), ScanStatus::Idle);
        assert_eq!(lidar.cursor(), ScanCursor::START);
        assert!(lidar.point_cloud().is_empty());
        assert_eq!(lidar.next_session_id(), 2);
        assert_eq!(lidar.last_completed().unwrap().status, ScanStatus::Completed);

        let exports = &lidar.exporter().exports;
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].1.len(), report.sample_count);
    }

    #[test]
    fn samples_follow_incremental_convention_in_order() {
        let n = 5;
        let mut lidar = lidar();
        lidar.run_to_completion(params(n)).unwrap();

        let expected = GridResolution::new(n)
            .unwrap()
            .cells()
            .filter_map(|c| expected_sample(c, n, AngleConvention::Incremental))
            .collect::<Vec<_>>();
        assert!(!expected.is_empty());
        assert_eq!(lidar.exporter().exports[0].1, expected);
    }

    #[test]
    fn every_cell_visited_once_in_row_major_order() {
        let n = 6;
        let events = Rc::new(RefCell::new(Events::default()));
        let mut lidar = lidar().with_observer(Box::new(SharedObserver(events.clone())));

        assert!(lidar.start(params(n)));
        let mut visited = Vec::new();
        loop {
            match lidar.step().unwrap() {
                StepOutcome::Advanced { cell, .. } => visited.push(cell),
                StepOutcome::Completed(_) => break,
                StepOutcome::Inactive => panic!("sensor stopped early"),
            }
        }
        visited.push(ScanCursor::new(n - 1, n - 1));

        let res = GridResolution::new(n).unwrap();
        assert_eq!(visited, res.cells().collect::<Vec<_>>());

        let events = events.borrow();
        assert_eq!(events.rays.len(), res.cell_count());
        for (ray, cell) in events.rays.iter().zip(res.cells()) {
            assert_eq!(*ray, direction_for(cell, res, AngleConvention::Incremental));
        }
        assert_eq!(events.completed.len(), 1);
        assert_eq!(events.samples, events.completed[0].sample_count);
    }

    #[test]
    fn pause_resume_at_every_point_matches_uninterrupted() {
        let n = 4;
        let total = (n * n) as usize;

        let mut reference = lidar();
        reference.run_to_completion(params(n)).unwrap();
        let expected = reference.exporter().exports[0].1.clone();

        for k in 0..=total {
            let mut lidar = lidar();
            lidar.start(params(n));
            for _ in 0..k {
                lidar.step().unwrap();
            }
            let cursor = lidar.cursor();
            lidar.pause();
            assert_eq!(lidar.step().unwrap(), StepOutcome::Inactive);
            assert_eq!(lidar.cursor(), cursor);
            lidar.resume();
            for _ in k..total {
                lidar.step().unwrap();
            }

            assert_eq!(lidar.exporter().exports.len(), 1, "k = {k}");
            assert_eq!(lidar.exporter().exports[0].1, expected, "k = {k}");
        }
    }

    #[test]
    fn random_pause_schedules_never_lose_cells() {
        let n = 7;
        let mut reference = lidar();
        reference.run_to_completion(params(n)).unwrap();
        let expected = reference.exporter().exports[0].1.clone();

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let mut lidar = lidar();
            lidar.start(params(n));
            let mut guard = 0;
            while lidar.exporter().exports.is_empty() {
                guard += 1;
                assert!(guard < 10_000);
                if rng.random_bool(0.3) {
                    lidar.pause();
                    for _ in 0..rng.random_range(0..3) {
                        assert_eq!(lidar.step().unwrap(), StepOutcome::Inactive);
                    }
                    lidar.resume();
                }
                lidar.step().unwrap();
            }
            assert_eq!(lidar.exporter().exports[0].1, expected);
        }
    }

    #[test]
    fn finish_uses_its_own_convention_for_remaining_cells() {
        let n = 4;
        let k = 5;
        let mut lidar = lidar();
        lidar.start(params(n));
        for _ in 0..k {
            lidar.step().unwrap();
        }
        lidar.pause();
        let report = lidar.finish_synchronously().unwrap().unwrap();

        let res = GridResolution::new(n).unwrap();
        let expected = res
            .cells()
            .enumerate()
            .filter_map(|(i, c)| {
                let convention = if i < k {
                    AngleConvention::Incremental
                } else {
                    AngleConvention::FinishSynchronously
                };
                expected_sample(c, n, convention)
            })
            .collect::<Vec<_>>();

        assert_eq!(report.sample_count, expected.len());
        assert_eq!(lidar.exporter().exports[0].1, expected);
        assert_eq!(lidar.status(), ScanStatus::Idle);
        assert_eq!(lidar.cursor(), ScanCursor::START);
    }

    #[test]
    fn finish_from_idle_does_nothing() {
        let mut lidar = lidar();
        assert!(lidar.finish_synchronously().unwrap().is_none());
        assert!(lidar.exporter().exports.is_empty());
    }

    #[test]
    fn cancel_discards_without_export() {
        let mut lidar = lidar();
        lidar.start(params(4));
        for _ in 0..3 {
            lidar.step().unwrap();
        }
        assert!(lidar.cancel());

        assert_eq!(lidar.status(), ScanStatus::Idle);
        assert!(!lidar.point_cloud().is_empty());
        assert_eq!(lidar.cursor(), ScanCursor::new(0, 3));
        assert!(lidar.exporter().exports.is_empty());
        assert_eq!(lidar.step().unwrap(), StepOutcome::Inactive);

        assert!(lidar.start(params(4)));
        assert!(lidar.point_cloud().is_empty());
        assert_eq!(lidar.cursor(), ScanCursor::START);
    }

    #[test]
    fn transitions_outside_their_state_are_ignored() {
        let mut lidar = lidar();
        assert!(!lidar.pause());
        assert!(!lidar.resume());
        assert!(!lidar.cancel());
        assert_eq!(lidar.step().unwrap(), StepOutcome::Inactive);

        assert!(lidar.start(params(3)));
        assert!(!lidar.start(params(5)));
        assert!(!lidar.resume());
        assert!(lidar.pause());
        assert!(!lidar.pause());
        assert!(!lidar.start(params(5)));
        assert_eq!(lidar.parameters().unwrap().resolution().rays_per_axis(), 3);
    }

    #[test]
    fn samples_are_shifted_down_and_tagged() {
        let mut lidar = SphericalLidar::new(Shell { radius: 10.0 }, NullExporter)
            .with_origin(Point3::new(1.0, 2.0, 3.0))
            .with_vertical_offset(5.0);
        lidar.start(params(4));
        let first = loop {
            lidar.step().unwrap();
            if let Some(s) = lidar.point_cloud().samples().first() {
                break *s;
            }
        };

        // The first sampled cell is (0, 0): phi = -90, theta = 180, direction +x
        assert_relative_eq!(first.position.x, 11.0, epsilon = 1.0e-9);
        assert_relative_eq!(first.position.y, -3.0, epsilon = 1.0e-9);
        assert_relative_eq!(first.position.z, 3.0, epsilon = 1.0e-9);
        assert_eq!(first.session, 1);
    }

    #[test]
    fn out_of_range_scene_produces_empty_sweep() {
        let mut lidar = SphericalLidar::new(Shell { radius: 20.0 }, Recorder::default());
        let report = lidar.run_to_completion(params(3)).unwrap().unwrap();
        assert_eq!(report.sample_count, 0);
        assert!(lidar.exporter().exports[0].1.is_empty());
    }

    #[test]
    fn session_ids_increment_per_sweep() {
        let mut lidar = lidar();
        lidar.run_to_completion(params(2)).unwrap();
        let report = lidar.run_to_completion(params(2)).unwrap().unwrap();

        assert_eq!(report.session_id, 2);
        let exports = &lidar.exporter().exports;
        assert_eq!(exports[1].0, 2);
        assert!(exports[1].1.iter().all(|s| s.session == 2));
    }

    #[test]
    fn failed_export_leaves_sensor_ready() {
        let mut lidar = SphericalLidar::new(Shell { radius: 10.0 }, Failing);
        let result = lidar.run_to_completion(params(2));
        assert!(matches!(result, Err(ScanError::Export { .. })));

        assert_eq!(lidar.status(), ScanStatus::Idle);
        assert_eq!(lidar.cursor(), ScanCursor::START);
        assert!(lidar.point_cloud().is_empty());
        assert_eq!(lidar.next_session_id(), 2);
        assert!(lidar.start(params(2)));
        assert_eq!(lidar.session().id, 2);
    }

    #[test]
    fn single_cell_grid_completes_on_first_step() {
        let mut lidar = lidar();
        lidar.start(params(1));
        assert!(matches!(lidar.step().unwrap(), StepOutcome::Completed(_)));
    }
}

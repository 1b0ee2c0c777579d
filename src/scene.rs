//! This module contains the contract between the scanning sensor and the scene it measures. The
//! sensor only ever asks two questions of a scene: where does a ray first hit a scannable surface,
//! and what color is the surface at that hit.

mod mesh_scene;
mod texture;

use crate::{Point2, Point3, Rgb, UnitVec3};

pub use mesh_scene::{MeshScene, SceneObject, SurfaceColor};
pub use texture::Texture;

/// The first intersection of a ray with a scannable surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// The world position of the intersection
    pub point: Point3,

    /// The surface normal at the intersection
    pub normal: UnitVec3,

    /// The distance along the ray from its origin to the intersection
    pub distance: f64,

    /// An index identifying the object that was hit, meaningful only to the scene which produced
    /// the hit
    pub object: usize,

    /// The texture coordinate at the hit, if the surface has one
    pub uv: Option<Point2>,

    /// Whether the surface has any source of color that `sample_surface_color` can read
    pub has_surface_color: bool,
}

pub trait SceneIntersector {
    /// Cast a ray from `origin` along `direction` and return the nearest hit no further than
    /// `max_range` away.
    fn intersect(
        &self,
        origin: &Point3,
        direction: &UnitVec3,
        max_range: f64,
    ) -> Option<SurfaceHit>;

    /// Read the surface color at a hit. Surfaces without a color source return `None`, which the
    /// sensor treats as a cell with no sample.
    fn sample_surface_color(&self, hit: &SurfaceHit) -> Option<Rgb>;
}

impl<T: SceneIntersector + ?Sized> SceneIntersector for &T {
    fn intersect(
        &self,
        origin: &Point3,
        direction: &UnitVec3,
        max_range: f64,
    ) -> Option<SurfaceHit> {
        (**self).intersect(origin, direction, max_range)
    }

    fn sample_surface_color(&self, hit: &SurfaceHit) -> Option<Rgb> {
        (**self).sample_surface_color(hit)
    }
}

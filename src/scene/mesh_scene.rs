//! A scene made of triangle meshes, ray cast with parry. Each object carries its own color
//! source: nothing, a uniform color, or a texture addressed through per-vertex UV coordinates.

use super::{SceneIntersector, SurfaceHit, Texture};
use crate::{Iso3, Point2, Point3, Result, Rgb, ScanError, UnitVec3, Vector3};
use parry3d_f64::query::{PointQueryWithLocation, Ray, RayCast};
use parry3d_f64::shape::{Cuboid, FeatureId, TriMesh};

/// Where an object gets the color of its surface from
#[derive(Debug, Clone)]
pub enum SurfaceColor {
    /// The surface has nothing to sample; hits on it produce no sample
    None,

    /// Every point on the surface has the same color
    Uniform(Rgb),

    /// The color is read from a texture at the interpolated UV coordinate of the hit. There is
    /// exactly one UV coordinate for each mesh vertex.
    Textured { uvs: Vec<Point2>, texture: Texture },
}

#[derive(Clone)]
pub struct SceneObject {
    tri_mesh: TriMesh,
    surface: SurfaceColor,
    scannable: bool,
}

impl SceneObject {
    /// Create an uncolored, scannable object from mesh vertices and triangle faces.
    pub fn new(vertices: Vec<Point3>, faces: Vec<[u32; 3]>) -> Result<Self> {
        let tri_mesh =
            TriMesh::new(vertices, faces).map_err(|e| ScanError::Mesh(format!("{e:?}")))?;
        Ok(Self {
            tri_mesh,
            surface: SurfaceColor::None,
            scannable: true,
        })
    }

    /// Create an axis-aligned box centered at `center`.
    pub fn cuboid(center: Point3, half_extents: Vector3) -> Result<Self> {
        let (vertices, faces) = Cuboid::new(half_extents).to_trimesh();
        let vertices = vertices.into_iter().map(|v| v + center.coords).collect();
        Self::new(vertices, faces)
    }

    /// Create a flat rectangle spanning `corner`, `corner + u`, `corner + u + v`, `corner + v`,
    /// with texture coordinates running from (0, 0) at `corner` to (1, 1) at the opposite corner.
    /// Use `with_texture(SceneObject::quad_uvs(), ...)` to texture it.
    pub fn quad(corner: Point3, u: Vector3, v: Vector3) -> Result<Self> {
        let vertices = vec![corner, corner + u, corner + u + v, corner + v];
        Self::new(vertices, vec![[0, 1, 2], [0, 2, 3]])
    }

    /// The texture coordinates matching the vertex order of `quad`
    pub fn quad_uvs() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.surface = SurfaceColor::Uniform(color);
        self
    }

    pub fn with_texture(mut self, uvs: Vec<Point2>, texture: Texture) -> Result<Self> {
        if uvs.len() != self.tri_mesh.vertices().len() {
            return Err(ScanError::Mesh(format!(
                "expected {} UV coordinates, got {}",
                self.tri_mesh.vertices().len(),
                uvs.len()
            )));
        }
        self.surface = SurfaceColor::Textured { uvs, texture };
        Ok(self)
    }

    /// Mark whether rays may hit this object at all. Objects which are not scannable are ignored
    /// entirely, so rays pass through them.
    pub fn with_scannable(mut self, scannable: bool) -> Self {
        self.scannable = scannable;
        self
    }

    pub fn surface(&self) -> &SurfaceColor {
        &self.surface
    }

    pub fn tri_mesh(&self) -> &TriMesh {
        &self.tri_mesh
    }

    fn uv_at(&self, face: u32, point: &Point3) -> Option<Point2> {
        let SurfaceColor::Textured { uvs, .. } = &self.surface else {
            return None;
        };
        let [ia, ib, ic] = *self.tri_mesh.indices().get(face as usize)?;
        let (_, loc) = self
            .tri_mesh
            .triangle(face)
            .project_local_point_and_get_location(point, false);
        let [wa, wb, wc] = loc.barycentric_coordinates()?;
        let uv = uvs[ia as usize].coords * wa
            + uvs[ib as usize].coords * wb
            + uvs[ic as usize].coords * wc;
        Some(Point2::from(uv))
    }
}

/// A collection of scene objects, all expressed in world coordinates.
#[derive(Clone, Default)]
pub struct MeshScene {
    objects: Vec<SceneObject>,
}

impl MeshScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene, returning its index.
    pub fn add(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn with(mut self, object: SceneObject) -> Self {
        self.add(object);
        self
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }
}

impl SceneIntersector for MeshScene {
    fn intersect(
        &self,
        origin: &Point3,
        direction: &UnitVec3,
        max_range: f64,
    ) -> Option<SurfaceHit> {
        let ray = Ray::new(*origin, direction.into_inner());
        let iso = Iso3::identity();

        let mut best: Option<(usize, parry3d_f64::query::RayIntersection)> = None;
        for (i, object) in self.objects.iter().enumerate() {
            if !object.scannable {
                continue;
            }
            let limit = best.map(|(_, ri)| ri.time_of_impact).unwrap_or(max_range);
            if let Some(ri) = object
                .tri_mesh
                .cast_ray_and_get_normal(&iso, &ray, limit, false)
            {
                best = Some((i, ri));
            }
        }

        let (index, ri) = best?;
        let object = &self.objects[index];
        let point = ray.point_at(ri.time_of_impact);

        // Hits on the back of a triangle are reported past the end of the face list
        let face = match ri.feature {
            FeatureId::Face(f) => Some(f % object.tri_mesh.num_triangles() as u32),
            _ => None,
        };

        Some(SurfaceHit {
            point,
            normal: UnitVec3::new_normalize(ri.normal),
            distance: ri.time_of_impact,
            object: index,
            uv: face.and_then(|f| object.uv_at(f, &point)),
            has_surface_color: !matches!(object.surface, SurfaceColor::None),
        })
    }

    fn sample_surface_color(&self, hit: &SurfaceHit) -> Option<Rgb> {
        if !hit.has_surface_color {
            return None;
        }
        match &self.objects.get(hit.object)?.surface {
            SurfaceColor::None => None,
            SurfaceColor::Uniform(color) => Some(*color),
            SurfaceColor::Textured { texture, .. } => hit.uv.map(|uv| texture.sample(&uv)),
        }
    }
}

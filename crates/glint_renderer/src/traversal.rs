//! Nearest-hit queries against a scene.
//!
//! Each mesh is searched according to its optimization level: every
//! triangle, the mesh box then every triangle, or the mesh box then the
//! chunk boxes then only the chunk triangles. Queries take `&self` only and
//! are safe to issue from any number of threads.

use glint_core::{Mesh, MeshId, OptimizationLevel, Scene, TextureSampler, Triangle};
use glint_math::{Ray, Vec3};

use crate::intersect::{hits_box, intersect_triangle};

/// Record of the nearest ray-scene intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// World-space intersection point
    pub point: Vec3,
    pub mesh: MeshId,
    /// Index into the mesh's triangle list
    pub triangle: usize,
    /// Ray parameter of the hit
    pub t: f32,
}

/// Read-only view of a scene and its textures used for tracing.
#[derive(Clone, Copy)]
pub struct Tracer<'a> {
    pub(crate) scene: &'a Scene,
    pub(crate) textures: &'a dyn TextureSampler,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, textures: &'a dyn TextureSampler) -> Self {
        Self { scene, textures }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Globally nearest hit along `ray`, or `None`.
    pub fn intersect(&self, ray: &Ray) -> Option<HitInfo> {
        let mut nearest = None;

        for (id, mesh) in self.scene.meshes().iter().enumerate() {
            match mesh.optimization_level() {
                OptimizationLevel::BruteForce => {
                    closest_in(ray, id, mesh, 0..mesh.triangle_count(), &mut nearest);
                }
                OptimizationLevel::BoundingBox => {
                    if hits_box(ray, mesh.bounding_box()) {
                        closest_in(ray, id, mesh, 0..mesh.triangle_count(), &mut nearest);
                    }
                }
                OptimizationLevel::Octants => {
                    if !hits_box(ray, mesh.bounding_box()) {
                        continue;
                    }
                    for chunk in mesh.chunks() {
                        if hits_box(ray, chunk.bounding_box()) {
                            let indices = chunk.triangle_indices().iter().copied();
                            closest_in(ray, id, mesh, indices, &mut nearest);
                        }
                    }
                }
            }
        }

        nearest
    }

    pub(crate) fn mesh(&self, hit: &HitInfo) -> &'a Mesh {
        &self.scene.meshes()[hit.mesh]
    }

    pub(crate) fn triangle(&self, hit: &HitInfo) -> &'a Triangle {
        &self.mesh(hit).triangles()[hit.triangle]
    }
}

/// True when every vertex normal points away from the ray.
#[inline]
pub fn is_backfacing(ray: &Ray, triangle: &Triangle) -> bool {
    (0..3).all(|i| triangle.normal(i).dot(ray.direction) > 0.0)
}

/// Test the listed triangles of one mesh, keeping the strictly nearest hit.
fn closest_in(
    ray: &Ray,
    mesh_id: MeshId,
    mesh: &Mesh,
    indices: impl Iterator<Item = usize>,
    nearest: &mut Option<HitInfo>,
) {
    let triangles = mesh.triangles();
    for index in indices {
        let Some(triangle) = triangles.get(index) else {
            continue;
        };
        if is_backfacing(ray, triangle) {
            continue;
        }
        let Some(t) = intersect_triangle(ray, triangle.vertices()) else {
            continue;
        };
        if nearest.map_or(true, |hit| t < hit.t) {
            *nearest = Some(HitInfo {
                point: ray.at(t),
                mesh: mesh_id,
                triangle: index,
                t,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{shapes, Color, MeshSettings, SceneBuilder, SceneLimits, TextureSet};

    fn scene_of(meshes: Vec<Vec<Triangle>>) -> Scene {
        let mut builder = SceneBuilder::with_limits(SceneLimits::unbounded());
        for triangles in meshes {
            builder.add_mesh(triangles, MeshSettings::matte()).unwrap();
        }
        builder.build().unwrap().0
    }

    #[test]
    fn test_nearest_of_two_quads() {
        let low = shapes::quad(1.0, Color::ONE);
        let high: Vec<Triangle> = shapes::quad(1.0, Color::ONE)
            .iter()
            .map(|t| t.transformed(&glint_math::Mat4::from_translation(Vec3::Y)))
            .collect();
        let scene = scene_of(vec![low, high]);
        let textures = TextureSet::new();
        let tracer = Tracer::new(&scene, &textures);

        let hit = tracer
            .intersect(&Ray::new(Vec3::new(0.2, 5.0, 0.3), Vec3::NEG_Y))
            .unwrap();
        assert_eq!(hit.mesh, 1);
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.2, 1.0, 0.3)).length() < 1e-5);
    }

    #[test]
    fn test_backface_is_culled() {
        let scene = scene_of(vec![shapes::quad(1.0, Color::ONE)]);
        let textures = TextureSet::new();
        let tracer = Tracer::new(&scene, &textures);

        // From above the quad faces the ray
        assert!(tracer
            .intersect(&Ray::new(Vec3::new(0.1, 1.0, 0.1), Vec3::NEG_Y))
            .is_some());
        // From below all normals point away
        assert!(tracer
            .intersect(&Ray::new(Vec3::new(0.1, -1.0, 0.1), Vec3::Y))
            .is_none());
    }

    #[test]
    fn test_octant_mesh_matches_brute_force() {
        let sphere = shapes::uv_sphere(1.0, 12, 16, Color::ONE);
        let indexed = scene_of(vec![sphere.clone()]);
        assert_eq!(indexed.meshes()[0].optimization_level(), OptimizationLevel::Octants);

        let textures = TextureSet::new();
        let tracer = Tracer::new(&indexed, &textures);

        for i in 0..40 {
            let angle = i as f32 * 0.37;
            let origin = Vec3::new(3.0 * angle.cos(), 0.4 * angle.sin(), 3.0 * angle.sin());
            let ray = Ray::toward(origin, Vec3::new(0.1, -0.2, 0.05));

            let mut expected: Option<HitInfo> = None;
            closest_in(&ray, 0, &indexed.meshes()[0], 0..sphere.len(), &mut expected);
            let (hit, expected) = (tracer.intersect(&ray).unwrap(), expected.unwrap());
            assert!((hit.t - expected.t).abs() < 1e-5);
        }
    }

    #[test]
    fn test_empty_scene_has_no_hits() {
        let scene = scene_of(Vec::new());
        let textures = TextureSet::new();
        let tracer = Tracer::new(&scene, &textures);
        assert!(tracer.intersect(&Ray::new(Vec3::ZERO, Vec3::X)).is_none());
    }
}

//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm. The epsilon gates double as the
//! shadow-acne guard, so rays starting on a surface never hit it again.

use glint_core::BoxMesh;
use glint_math::{Ray, Vec3};

/// Below this `|det|` the ray is treated as parallel to the triangle.
pub const PARALLEL_EPSILON: f32 = 1e-5;

/// Hits closer than this along the ray are ignored.
pub const MIN_HIT_DISTANCE: f32 = 1e-5;

/// Möller-Trumbore ray-triangle intersection.
///
/// Returns the ray parameter `t` of the hit, or `None` for a miss, a
/// near-parallel ray or a hit at `t <= MIN_HIT_DISTANCE`.
pub fn intersect_triangle(ray: &Ray, vertices: [Vec3; 3]) -> Option<f32> {
    let [v0, v1, v2] = vertices;
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < PARALLEL_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > MIN_HIT_DISTANCE).then_some(t)
}

/// True if the ray hits any of the box's 12 triangles.
///
/// A reject test only: the distance of the box hit is not used.
pub fn hits_box(ray: &Ray, bounds: &BoxMesh) -> bool {
    bounds
        .triangles
        .iter()
        .any(|tri| intersect_triangle(ray, tri.vertices()).is_some())
}

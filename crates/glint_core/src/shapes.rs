//! Procedural triangle lists for demos and tests.

use std::f32::consts::PI;

use glint_math::{Aabb, Vec2, Vec3};

use crate::triangle::{Triangle, BOX_FACES};
use crate::Color;

/// Square in the XZ plane at `y = 0`, facing +Y.
///
/// UVs span the full square, `u` along +X and `v` along +Z.
pub fn quad(half_extent: f32, color: Color) -> Vec<Triangle> {
    let h = half_extent;
    let a = Vec3::new(-h, 0.0, h);
    let b = Vec3::new(h, 0.0, h);
    let c = Vec3::new(h, 0.0, -h);
    let d = Vec3::new(-h, 0.0, -h);
    let uv = |p: Vec3| Vec2::new((p.x + h) / (2.0 * h), (p.z + h) / (2.0 * h));

    vec![
        Triangle::flat([a, b, c], [uv(a), uv(b), uv(c)], Vec3::Y, color),
        Triangle::flat([a, c, d], [uv(a), uv(c), uv(d)], Vec3::Y, color),
    ]
}

const FACE_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

fn box_triangles(half_extent: f32, color: Color, inward: bool) -> Vec<Triangle> {
    let corners = Aabb::from_points(Vec3::splat(-half_extent), Vec3::splat(half_extent)).corners();
    let mut triangles = Vec::with_capacity(12);

    for (quad, normal) in BOX_FACES {
        let [a, b, c, d] = quad.map(|i| corners[i]);
        let [ua, ub, uc, ud] = FACE_UVS;
        if inward {
            triangles.push(Triangle::flat([a, c, b], [ua, uc, ub], -normal, color));
            triangles.push(Triangle::flat([a, d, c], [ua, ud, uc], -normal, color));
        } else {
            triangles.push(Triangle::flat([a, b, c], [ua, ub, uc], normal, color));
            triangles.push(Triangle::flat([a, c, d], [ua, uc, ud], normal, color));
        }
    }

    triangles
}

/// Axis-aligned cube centered on the origin with outward normals.
pub fn cube(half_extent: f32, color: Color) -> Vec<Triangle> {
    box_triangles(half_extent, color, false)
}

/// White cube seen from the inside: normals point inward and the winding is
/// reversed. Meant to be added with [`MeshSettings::unlit`](crate::MeshSettings::unlit)
/// and a texture.
pub fn skybox(half_extent: f32) -> Vec<Triangle> {
    box_triangles(half_extent, Color::ONE, true)
}

/// Latitude/longitude sphere with smooth per-vertex normals.
///
/// Produces `2 * segments * (rings - 1)` triangles; the pole rows are fans.
pub fn uv_sphere(radius: f32, rings: u32, segments: u32, color: Color) -> Vec<Triangle> {
    let rings = rings.max(2);
    let segments = segments.max(3);

    let unit = |i: u32, j: u32| {
        let theta = PI * i as f32 / rings as f32;
        let phi = 2.0 * PI * j as f32 / segments as f32;
        Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin())
    };
    let uv = |i: u32, j: u32| Vec2::new(j as f32 / segments as f32, 1.0 - i as f32 / rings as f32);
    let triangle = |ids: [(u32, u32); 3]| {
        let normals = ids.map(|(i, j)| unit(i, j));
        Triangle::new(
            normals.map(|n| n * radius),
            ids.map(|(i, j)| uv(i, j)),
            normals,
            color,
        )
    };

    let mut triangles = Vec::with_capacity((2 * segments * (rings - 1)) as usize);
    for i in 0..rings {
        for j in 0..segments {
            let a = (i, j);
            let b = (i + 1, j);
            let c = (i + 1, j + 1);
            let d = (i, j + 1);
            if i < rings - 1 {
                triangles.push(triangle([a, c, b]));
            }
            if i > 0 {
                triangles.push(triangle([a, d, c]));
            }
        }
    }
    triangles
}

//! Triangle storage and the 12-triangle box meshes used as reject tests.

use bytemuck::{Pod, Zeroable};
use glint_math::{Aabb, Mat4, Mat4Ext, Vec2, Vec3, Vec4};

use crate::Color;

/// A triangle with per-vertex position, UV and normal plus a flat color.
///
/// Positions and normals are stored homogeneously with `w = 1.0`. UVs use
/// only `x` and `y`; the 16-byte lanes keep the struct free of padding so
/// a triangle array can be handed out as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Triangle {
    pub positions: [Vec4; 3],
    pub uvs: [Vec4; 3],
    pub normals: [Vec4; 3],
    pub color: Vec4,
}

impl Triangle {
    /// Create a triangle with per-vertex UVs and normals.
    pub fn new(positions: [Vec3; 3], uvs: [Vec2; 3], normals: [Vec3; 3], color: Color) -> Self {
        Self {
            positions: positions.map(|p| p.extend(1.0)),
            uvs: uvs.map(|uv| Vec4::new(uv.x, uv.y, 0.0, 0.0)),
            normals: normals.map(|n| n.extend(1.0)),
            color: color.extend(1.0),
        }
    }

    /// Create a flat-shaded triangle: one normal shared by all three vertices.
    pub fn flat(positions: [Vec3; 3], uvs: [Vec2; 3], normal: Vec3, color: Color) -> Self {
        Self::new(positions, uvs, [normal; 3], color)
    }

    /// Create a flat-shaded triangle whose normal follows the
    /// counter-clockwise winding of `positions`. UVs are zero.
    pub fn from_positions(positions: [Vec3; 3], color: Color) -> Self {
        let normal = face_normal(positions);
        Self::flat(positions, [Vec2::ZERO; 3], normal, color)
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        self.positions[i].truncate()
    }

    /// The three vertex positions.
    #[inline]
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.position(0), self.position(1), self.position(2)]
    }

    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        self.normals[i].truncate()
    }

    #[inline]
    pub fn uv(&self, i: usize) -> Vec2 {
        Vec2::new(self.uvs[i].x, self.uvs[i].y)
    }

    /// Flat triangle color (RGB).
    #[inline]
    pub fn base_color(&self) -> Color {
        self.color.truncate()
    }

    /// True if any vertex lies inside `bounds` (inclusive).
    pub fn touches(&self, bounds: &Aabb) -> bool {
        self.vertices().iter().any(|v| bounds.contains_point(*v))
    }

    /// Apply a world transform: positions by `matrix`, normals by its
    /// inverse-transpose. UVs and color are unchanged.
    pub fn transformed(&self, matrix: &Mat4) -> Triangle {
        Triangle {
            positions: self
                .positions
                .map(|p| matrix.transform_point3(p.truncate()).extend(1.0)),
            uvs: self.uvs,
            normals: self
                .normals
                .map(|n| matrix.transform_normal3(n.truncate()).extend(1.0)),
            color: self.color,
        }
    }
}

/// Unit normal of a counter-clockwise triangle, or zero if degenerate.
pub fn face_normal(positions: [Vec3; 3]) -> Vec3 {
    let [a, b, c] = positions;
    (b - a).cross(c - a).normalize_or_zero()
}

/// Faces of a box as indices into `Aabb::corners`, counter-clockwise when
/// seen from outside, paired with the outward normal.
///
/// Order: -x, +x, -y, +y, -z, +z.
pub(crate) const BOX_FACES: [([usize; 4], Vec3); 6] = [
    ([0, 4, 6, 2], Vec3::NEG_X),
    ([1, 3, 7, 5], Vec3::X),
    ([0, 1, 5, 4], Vec3::NEG_Y),
    ([2, 6, 7, 3], Vec3::Y),
    ([0, 2, 3, 1], Vec3::NEG_Z),
    ([4, 5, 7, 6], Vec3::Z),
];

/// A closed box made of 12 triangles, two per face.
///
/// Used as a cheap reject test during traversal. Because it is plain
/// triangle geometry it stays valid under any mesh transform, where an
/// axis-aligned slab test would not.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMesh {
    pub triangles: [Triangle; 12],
}

impl BoxMesh {
    /// Build the box spanning `bounds`.
    pub fn from_bounds(bounds: &Aabb) -> Self {
        let corners = bounds.corners();
        let mut triangles = [Triangle::default(); 12];

        for (face, (quad, normal)) in BOX_FACES.iter().enumerate() {
            let [a, b, c, d] = quad.map(|i| corners[i]);
            triangles[face * 2] = Triangle::flat([a, b, c], [Vec2::ZERO; 3], *normal, Color::ZERO);
            triangles[face * 2 + 1] =
                Triangle::flat([a, c, d], [Vec2::ZERO; 3], *normal, Color::ZERO);
        }

        Self { triangles }
    }

    pub fn transformed(&self, matrix: &Mat4) -> BoxMesh {
        BoxMesh {
            triangles: self.triangles.map(|t| t.transformed(matrix)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            [Vec3::ZERO, Vec3::X, Vec3::Y],
            [Vec2::ZERO, Vec2::X, Vec2::Y],
            [Vec3::Z; 3],
            Color::new(1.0, 0.5, 0.25),
        )
    }

    #[test]
    fn test_homogeneous_w_is_one() {
        let tri = unit_triangle();
        for i in 0..3 {
            assert_eq!(tri.positions[i].w, 1.0);
            assert_eq!(tri.normals[i].w, 1.0);
        }
        assert_eq!(tri.vertices(), [Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(tri.uv(1), Vec2::X);
        assert_eq!(tri.base_color(), Color::new(1.0, 0.5, 0.25));
    }

    #[test]
    fn test_triangle_is_padding_free() {
        // 10 lanes of Vec4
        assert_eq!(std::mem::size_of::<Triangle>(), 160);
        let tris = [unit_triangle(); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&tris);
        assert_eq!(bytes.len(), 320);
    }

    #[test]
    fn test_from_positions_ccw_normal() {
        let tri = Triangle::from_positions([Vec3::ZERO, Vec3::X, Vec3::Y], Color::ONE);
        assert_eq!(tri.normal(0), Vec3::Z);

        let degenerate = Triangle::from_positions([Vec3::ZERO, Vec3::X, Vec3::X * 2.0], Color::ONE);
        assert_eq!(degenerate.normal(0), Vec3::ZERO);
    }

    #[test]
    fn test_touches_is_inclusive() {
        let tri = Triangle::from_positions(
            [Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 0.0)],
            Color::ONE,
        );
        let bounds = Aabb::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(tri.touches(&bounds));

        let far = Aabb::from_points(Vec3::new(-2.0, 0.0, 0.0), Vec3::new(0.99, 1.0, 1.0));
        assert!(!tri.touches(&far));
    }

    #[test]
    fn test_transformed_triangle() {
        let matrix = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0))
            * Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2);
        let tri = unit_triangle().transformed(&matrix);

        // +Y rotates onto +Z, then shifts up
        assert!((tri.position(2) - Vec3::new(0.0, 2.0, 1.0)).length() < 1e-5);
        // +Z normal rotates onto -Y
        assert!((tri.normal(0) - Vec3::NEG_Y).length() < 1e-5);
        assert_eq!(tri.positions[2].w, 1.0);
        assert_eq!(tri.normals[0].w, 1.0);
        assert_eq!(tri.uvs, unit_triangle().uvs);
    }

    #[test]
    fn test_box_mesh_faces_point_outward() {
        let bounds = Aabb::from_points(Vec3::splat(-1.0), Vec3::new(2.0, 3.0, 4.0));
        let center = bounds.centroid();
        let boxed = BoxMesh::from_bounds(&bounds);

        for tri in &boxed.triangles {
            let normal = face_normal(tri.vertices());
            let [a, b, c] = tri.vertices();
            let face_center = (a + b + c) / 3.0;
            assert!(normal.dot(face_center - center) > 0.0);
            assert_eq!(normal, tri.normal(0));
            for v in tri.vertices() {
                assert!(bounds.contains_point(v));
            }
        }
    }
}

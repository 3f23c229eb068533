// Transform utilities for Mat4
//
// Extends glam::Mat4 with the helpers needed to pose meshes per frame.
// glam::Mat4 already provides transform_point3(), transform_vector3() and inverse().

use crate::Aabb;
use glam::{Mat3, Mat4, Vec3};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Matrix that maps surface normals: inverse-transpose of the upper 3x3.
    fn normal_matrix(&self) -> Mat3;

    /// Transform a surface normal and renormalize it.
    ///
    /// Returns the input unchanged when the result collapses to zero length
    /// (singular matrix or zero normal).
    fn transform_normal3(&self, normal: Vec3) -> Vec3;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(*self).inverse().transpose()
    }

    fn transform_normal3(&self, normal: Vec3) -> Vec3 {
        let mapped = self.normal_matrix() * normal;
        if mapped.is_finite() && mapped.length_squared() > 0.0 {
            mapped.normalize()
        } else {
            normal
        }
    }

    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if aabb.is_empty() {
            return *aabb;
        }
        Aabb::enclosing(aabb.corners().map(|corner| self.transform_point3(corner)))
    }
}

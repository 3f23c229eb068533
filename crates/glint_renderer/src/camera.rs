//! Pinhole camera described by its four corner rays.

use glint_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Camera placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 6.0),
            center: Vec3::new(0.0, 0.5, 0.0),
            up: Vec3::Y,
            fov_y: 45.0,
        }
    }
}

/// Eye position plus the view directions through the four image corners.
///
/// `ray00` is bottom-left, `ray01` top-left, `ray10` bottom-right and
/// `ray11` top-right. Primary rays interpolate between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRays {
    pub eye: Vec3,
    pub ray00: Vec3,
    pub ray01: Vec3,
    pub ray10: Vec3,
    pub ray11: Vec3,
}

impl CameraRays {
    /// Corner rays for a camera at `eye` looking at `center`.
    ///
    /// The corners lie on the image plane one unit in front of the eye, so
    /// straight lines in the scene stay straight in the image.
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        let forward = (center - eye).normalize_or_zero();
        let right = forward.cross(up).normalize_or_zero();
        let true_up = right.cross(forward);

        let half_height = (fov_y_degrees.to_radians() / 2.0).tan();
        let half_width = half_height * aspect;
        let dx = right * half_width;
        let dy = true_up * half_height;

        Self {
            eye,
            ray00: forward - dx - dy,
            ray01: forward - dx + dy,
            ray10: forward + dx - dy,
            ray11: forward + dx + dy,
        }
    }

    pub fn from_settings(settings: &CameraSettings, aspect: f32) -> Self {
        Self::look_at(
            settings.eye,
            settings.center,
            settings.up,
            settings.fov_y,
            aspect,
        )
    }

    /// Ray through the center of pixel `(x, y)`; row 0 is the top of the
    /// image.
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let s = (x as f32 + 0.5) / width.max(1) as f32;
        let t = 1.0 - (y as f32 + 0.5) / height.max(1) as f32;

        let left = self.ray00.lerp(self.ray01, t);
        let right = self.ray10.lerp(self.ray11, t);
        Ray::new(self.eye, left.lerp(right, s).normalize_or_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> CameraRays {
        CameraRays::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y, 90.0, 2.0)
    }

    #[test]
    fn test_center_ray_hits_target() {
        let rays = camera();
        // Odd resolution puts a pixel center exactly on the image center
        let ray = rays.primary_ray(2, 2, 5, 5);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-6);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_corner_orientation() {
        let rays = camera();
        // fov 90 => half height 1, aspect 2 => half width 2
        assert!((rays.ray01 - Vec3::new(-2.0, 1.0, -1.0)).length() < 1e-5);
        assert!((rays.ray10 - Vec3::new(2.0, -1.0, -1.0)).length() < 1e-5);

        // Top-left pixel looks up and to the left
        let ray = rays.primary_ray(0, 0, 100, 50);
        assert!(ray.direction.x < 0.0);
        assert!(ray.direction.y > 0.0);
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);

        // Bottom-right pixel looks down and to the right
        let ray = rays.primary_ray(99, 49, 100, 50);
        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.y < 0.0);
    }

    #[test]
    fn test_settings_from_json() {
        let settings: CameraSettings =
            serde_json::from_str(r#"{ "eye": [1.0, 2.0, 3.0], "center": [0.0, 0.0, 0.0], "up": [0.0, 1.0, 0.0], "fov_y": 60.0 }"#)
                .unwrap();
        let rays = CameraRays::from_settings(&settings, 1.0);
        assert_eq!(rays.eye, Vec3::new(1.0, 2.0, 3.0));
    }
}

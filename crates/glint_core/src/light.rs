//! Range-limited point lights.

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::Color;

/// A point light with a hard falloff radius.
///
/// Beyond `radius` the light contributes nothing; inside it intensity falls
/// off quadratically toward the edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    pub radius: f32,
    pub brightness: f32,
}

impl Light {
    pub fn new(position: Vec3, color: Color, radius: f32, brightness: f32) -> Self {
        Self {
            position,
            color,
            radius,
            brightness,
        }
    }

    /// White light of unit brightness.
    pub fn white(position: Vec3, radius: f32) -> Self {
        Self::new(position, Color::ONE, radius, 1.0)
    }

    /// Quadratic range attenuation `clamp(1 - (d / radius)^2, 0, 1)`.
    pub fn attenuation(&self, distance: f32) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        let ratio = distance / self.radius;
        (1.0 - ratio * ratio).clamp(0.0, 1.0)
    }

    /// True if a point `distance` away is within the light's radius.
    pub fn reaches(&self, distance: f32) -> bool {
        distance <= self.radius
    }
}

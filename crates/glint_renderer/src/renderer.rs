//! Per-pixel compose and frame output.
//!
//! `trace` combines ambient, direct light and mirror reflections for one
//! primary ray. [`render`] walks every pixel on the calling thread; see
//! [`crate::render_frame`] for the bucketed parallel version.

use glint_math::{Ray, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::camera::CameraRays;
use crate::traversal::Tracer;

/// Ambient tint for non-reflective surfaces.
pub const MATTE_AMBIENT: Vec3 = Vec3::new(0.15, 0.15, 0.3);

/// Ambient factor for reflective surfaces.
pub const REFLECTIVE_AMBIENT: f32 = 0.1;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// RGBA returned for rays that hit nothing
    pub background: Vec4,
    /// Edge length of a square render bucket in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Vec4::ZERO,
            bucket_size: crate::bucket::DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl<'a> Tracer<'a> {
    /// Color seen along a primary ray.
    pub fn trace(&self, ray: &Ray, background: Vec4) -> Vec4 {
        let Some(hit) = self.intersect(ray) else {
            return background;
        };

        let mesh = self.mesh(&hit);
        let surface = self.surface_color(&hit);
        if !mesh.use_effects() {
            return surface.extend(1.0);
        }

        let reflective = mesh.settings().is_reflective();
        let mut color = if reflective {
            surface * REFLECTIVE_AMBIENT
        } else {
            surface * MATTE_AMBIENT
        };

        let mut ended_early = false;
        for light in self.scene.lights() {
            let direct = self.light_contribution(light, &hit, ray.direction);
            if reflective && !ended_early {
                let reflection = self.reflection(light, ray.direction, &hit);
                ended_early = reflection.ended_early();
                color += direct.lerp(reflection.color * surface, 0.5);
            } else {
                color += direct;
            }
        }

        color.extend(1.0)
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a linear color to 8-bit RGBA. No gamma curve is applied.
pub fn color_to_rgba(color: Vec4) -> [u8; 4] {
    color.to_array().map(|c| (255.0 * clamp_01(c) + 0.5) as u8)
}

/// RGBA float image, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec4>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Vec4) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(color_to_rgba(self.get(x, y)))
        })
    }
}

/// Render the entire frame on the calling thread.
pub fn render(tracer: &Tracer, camera: &CameraRays, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.width, config.height);

    for y in 0..config.height {
        for x in 0..config.width {
            let ray = camera.primary_ray(x, y, config.width, config.height);
            image.set(x, y, tracer.trace(&ray, config.background));
        }
    }

    image
}

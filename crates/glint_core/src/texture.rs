//! Per-mesh textures sampled by UV.
//!
//! Image decoding is left to the caller; textures are built from raw RGBA8
//! bytes or an already decoded `image::RgbaImage`. Pixel values are used as
//! they are, without any color space conversion.

use std::collections::HashMap;
use std::sync::Arc;

use glint_math::Vec2;
use thiserror::Error;

use crate::{Color, MeshId};

/// Errors that can occur while building a texture.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    #[error("Texture has no pixels")]
    Empty,

    #[error("Expected {expected} pixel values, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Color lookup for a mesh at a UV coordinate.
///
/// Shared by every render thread, so implementations must be `Sync`.
pub trait TextureSampler: Send + Sync {
    fn sample(&self, mesh: MeshId, uv: Vec2) -> Color;
}

/// RGBA pixel grid with repeat wrapping and bilinear filtering.
///
/// Always at least 1x1; the only way to build one is through the
/// constructors below.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    /// [R, G, B, A] in 0-1, row-major, top row first
    pixels: Vec<[f32; 4]>,
}

impl Texture {
    /// Create a texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> TextureResult<Self> {
        let expected = width as usize * height as usize;
        if expected == 0 {
            return Err(TextureError::Empty);
        }
        if pixels.len() != expected {
            return Err(TextureError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![[color.x, color.y, color.z, 1.0]],
        }
    }

    /// Create a texture from tightly packed RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> TextureResult<Self> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(TextureError::PixelCountMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]].map(|b| b as f32 / 255.0))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Create a texture from a decoded image.
    pub fn from_image(image: &image::RgbaImage) -> TextureResult<Self> {
        let (width, height) = image.dimensions();
        Self::from_rgba8(width, height, image.as_raw())
    }

    /// `cells` x `cells` checkerboard alternating between `a` and `b`,
    /// `cell_size` pixels per cell.
    pub fn checkerboard(cells: u32, cell_size: u32, a: Color, b: Color) -> Self {
        let size = (cells * cell_size).max(1);
        let cell_size = cell_size.max(1);
        let pixels = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size / cell_size, i / size / cell_size);
                let c = if (x + y) % 2 == 0 { a } else { b };
                [c.x, c.y, c.z, 1.0]
            })
            .collect();
        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// Sample the texture at UV coordinates (bilinear filtering).
    ///
    /// UVs wrap with period 1, with (0, 0) at the bottom-left.
    pub fn sample(&self, uv: Vec2) -> Color {
        let u = uv.x.rem_euclid(1.0);
        let v = uv.y.rem_euclid(1.0);

        // Flip V for image coordinates
        let x = u * (self.width as f32 - 1.0);
        let y = (1.0 - v) * (self.height as f32 - 1.0);

        let x0 = (x.floor() as u32).min(self.width - 1);
        let y0 = (y.floor() as u32).min(self.height - 1);
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        let top = self.pixel(x0, y0).lerp(self.pixel(x1, y0), fx);
        let bottom = self.pixel(x0, y1).lerp(self.pixel(x1, y1), fx);
        top.lerp(bottom, fy)
    }

    fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels
            .get(idx)
            .map(|p| Color::new(p[0], p[1], p[2]))
            .unwrap_or(Color::ZERO)
    }
}

impl TextureSampler for Texture {
    fn sample(&self, _mesh: MeshId, uv: Vec2) -> Color {
        Texture::sample(self, uv)
    }
}

/// Textures bound to meshes. Unbound meshes sample white.
#[derive(Clone, Debug, Default)]
pub struct TextureSet {
    textures: HashMap<MeshId, Arc<Texture>>,
}

impl TextureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `texture` to `mesh`, replacing any previous binding.
    pub fn bind(&mut self, mesh: MeshId, texture: Arc<Texture>) {
        self.textures.insert(mesh, texture);
    }

    pub fn get(&self, mesh: MeshId) -> Option<&Arc<Texture>> {
        self.textures.get(&mesh)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureSampler for TextureSet {
    fn sample(&self, mesh: MeshId, uv: Vec2) -> Color {
        match self.textures.get(&mesh) {
            Some(texture) => texture.sample(uv),
            None => Color::ONE,
        }
    }
}

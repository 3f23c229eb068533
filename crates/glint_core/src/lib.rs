//! Glint Core - triangle store and spatial index for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Geometry store**: `Triangle`, `Mesh`, `Chunk`, `Light`, `Scene`
//! - **Spatial index builder**: per-mesh bounding boxes and octant chunks,
//!   chosen from the triangle count
//! - **Textures**: per-mesh texture bindings sampled by UV
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{shapes, Light, MeshSettings, SceneBuilder};
//!
//! let mut builder = SceneBuilder::new();
//! builder.add_mesh(shapes::quad(5.0, Color::ONE), MeshSettings::default())?;
//! builder.add_light(Light::white(Vec3::new(0.0, 4.0, 0.0), 7.0))?;
//! let (scene, report) = builder.build()?;
//! println!("{} meshes, {} triangles", scene.meshes().len(), report.total_triangles());
//! ```

pub mod error;
pub mod index;
pub mod light;
pub mod mesh;
pub mod scene;
pub mod shapes;
pub mod texture;
pub mod triangle;

use glint_math::Vec3;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Index of a mesh within its scene.
pub type MeshId = usize;

// Re-export commonly used types
pub use error::{SceneError, SceneResult};
pub use light::Light;
pub use mesh::{Chunk, Mesh, MeshSettings, OptimizationLevel};
pub use scene::{BuildReport, MeshReport, Scene, SceneBuilder, SceneLimits, Transform};
pub use texture::{Texture, TextureError, TextureResult, TextureSampler, TextureSet};
pub use triangle::{BoxMesh, Triangle};

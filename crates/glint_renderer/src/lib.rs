//! Glint Renderer - CPU Whitted-style ray tracing.
//!
//! Traces one primary ray per pixel against a [`glint_core::Scene`],
//! using the per-mesh bounding boxes and octant chunks built by the core
//! crate. Shading is diffuse plus specular from range-limited point lights,
//! with hard shadows and a bounded number of mirror bounces.
//!
//! # Example
//!
//! ```ignore
//! let tracer = Tracer::new(&scene, &textures);
//! let camera = CameraRays::look_at(eye, center, Vec3::Y, 45.0, config.aspect_ratio());
//! let image = render_frame(&tracer, &camera, &config);
//! image.to_image().save("frame.png")?;
//! ```

mod bucket;
mod camera;
mod intersect;
mod reflection;
mod renderer;
mod shading;
mod traversal;

pub use bucket::{generate_buckets, render_bucket, render_frame, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{CameraRays, CameraSettings};
pub use intersect::{hits_box, intersect_triangle, MIN_HIT_DISTANCE, PARALLEL_EPSILON};
pub use reflection::{BounceState, Reflection};
pub use renderer::{clamp_01, color_to_rgba, render, ImageBuffer, RenderConfig, MATTE_AMBIENT, REFLECTIVE_AMBIENT};
pub use shading::{barycentric, SHADOW_SLACK, SPECULAR_EXPONENT};
pub use traversal::{is_backfacing, HitInfo, Tracer};

/// Re-export common math types from glint_math
pub use glint_math::{Ray, Vec3, Vec4};

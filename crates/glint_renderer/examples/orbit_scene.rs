//! Orbiting camera demo.
//!
//! Builds a small scene (checkered floor, mirrored sphere, spinning cube,
//! sky box), then renders a short camera orbit to PNG files.
//!
//! Usage: `cargo run --example orbit_scene -- [config.json] [frames]`

use std::f32::consts::TAU;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use glint_core::{
    shapes, Color, Light, MeshSettings, SceneBuilder, Texture, TextureSet, Transform, Triangle,
};
use glint_math::{Mat4, Quat, Vec3, Vec4};
use glint_renderer::{render_frame, CameraRays, RenderConfig, Tracer};

fn load_config(path: Option<&str>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig {
            width: 400,
            height: 300,
            background: Vec4::new(0.05, 0.05, 0.1, 1.0),
            ..Default::default()
        });
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path))
}

fn translated(triangles: Vec<Triangle>, offset: Vec3) -> Vec<Triangle> {
    let matrix = Mat4::from_translation(offset);
    triangles.iter().map(|t| t.transformed(&matrix)).collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let frames: u32 = match args.get(1) {
        Some(n) => n.parse().context("Frame count must be a number")?,
        None => 24,
    };

    let mut builder = SceneBuilder::new();
    let floor = builder.add_mesh(shapes::quad(6.0, Color::ONE), MeshSettings::reflective(1))?;
    builder.add_mesh(
        translated(shapes::uv_sphere(1.0, 16, 24, Color::new(0.9, 0.9, 1.0)), Vec3::new(0.0, 1.0, 0.0)),
        MeshSettings::reflective(2),
    )?;
    builder.add_mesh(shapes::cube(0.5, Color::new(1.0, 0.4, 0.2)), MeshSettings::matte())?;
    let sky = builder.add_mesh(shapes::skybox(20.0), MeshSettings::unlit())?;
    builder.add_light(Light::white(Vec3::new(2.0, 4.0, 2.0), 9.0))?;
    builder.add_light(Light::new(Vec3::new(-3.0, 2.0, -1.0), Color::new(0.3, 0.3, 1.0), 6.0, 1.5))?;

    let (scene, report) = builder.build()?;
    let geometry_bytes: usize = scene.meshes().iter().map(|m| m.triangle_bytes().len()).sum();
    log::info!("Scene geometry: {} triangles, {} KiB", report.total_triangles(), geometry_bytes / 1024);
    if let Some(largest) = report.largest_mesh() {
        log::info!(
            "Largest mesh {} has {} triangles in {} chunks",
            largest.mesh,
            largest.triangles,
            largest.chunk_sizes.len()
        );
    }

    let mut textures = TextureSet::new();
    textures.bind(
        floor,
        Arc::new(Texture::checkerboard(8, 4, Color::ONE, Color::splat(0.25))),
    );
    textures.bind(sky, Arc::new(Texture::solid_color(Color::new(0.35, 0.45, 0.7))));

    let out_dir = Path::new("frames");
    std::fs::create_dir_all(out_dir).context("Failed to create output directory")?;

    for frame in 0..frames {
        let phase = frame as f32 / frames.max(1) as f32;

        // Per-frame update: pose meshes and move lights before tracing
        let spin = Transform::from_translation(Vec3::new(2.2, 0.5, 0.0))
            .with_rotation(Quat::from_rotation_y(phase * TAU));
        let posed = scene.posed(&[Mat4::IDENTITY, Mat4::IDENTITY, spin.to_matrix(), Mat4::IDENTITY])?;

        let eye = Vec3::new(7.0 * (phase * TAU).cos(), 3.0, 7.0 * (phase * TAU).sin());
        let camera = CameraRays::look_at(eye, Vec3::new(0.0, 0.5, 0.0), Vec3::Y, 45.0, config.aspect_ratio());

        let tracer = Tracer::new(&posed, &textures);
        let image = render_frame(&tracer, &camera, &config);

        let path = out_dir.join(format!("frame_{:04}.png", frame));
        image
            .to_image()
            .save(&path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        log::info!("Saved {}", path.display());
    }

    Ok(())
}

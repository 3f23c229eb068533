//! Surface color and direct lighting.

use glint_core::{Color, Light, Triangle};
use glint_math::{reflect, Ray, Vec2, Vec3};

use crate::traversal::{HitInfo, Tracer};

/// Exponent of the specular highlight on reflective surfaces.
pub const SPECULAR_EXPONENT: i32 = 64;

/// A shadow ray hit must be at least this much closer to the light than
/// the shaded point to count as an occluder.
pub const SHADOW_SLACK: f32 = 0.1;

/// Barycentric weights of `point` against the triangle's vertex positions.
///
/// Degenerate triangles yield `(1, 0, 0)`.
pub fn barycentric(triangle: &Triangle, point: Vec3) -> Vec3 {
    let [a, b, c] = triangle.vertices();
    let v0 = b - a;
    let v1 = c - a;
    let v2 = point - a;

    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < 1e-12 {
        return Vec3::X;
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    Vec3::new(1.0 - v - w, v, w)
}

impl<'a> Tracer<'a> {
    /// Vertex normals blended at the hit point.
    pub fn interpolated_normal(&self, hit: &HitInfo) -> Vec3 {
        let triangle = self.triangle(hit);
        let w = barycentric(triangle, hit.point);
        (triangle.normal(0) * w.x + triangle.normal(1) * w.y + triangle.normal(2) * w.z)
            .normalize_or_zero()
    }

    /// Vertex UVs blended at the hit point.
    pub fn interpolated_uv(&self, hit: &HitInfo) -> Vec2 {
        let triangle = self.triangle(hit);
        let w = barycentric(triangle, hit.point);
        triangle.uv(0) * w.x + triangle.uv(1) * w.y + triangle.uv(2) * w.z
    }

    /// Texture sample at the hit's UV times the triangle's flat color.
    pub fn surface_color(&self, hit: &HitInfo) -> Color {
        let uv = self.interpolated_uv(hit);
        self.textures.sample(hit.mesh, uv) * self.triangle(hit).base_color()
    }

    /// True if something sits between `light` and `point`.
    ///
    /// The shadow ray is cast from the light toward the point.
    pub fn in_shadow(&self, light: &Light, point: Vec3, distance: f32) -> bool {
        let ray = Ray::toward(light.position, point);
        self.intersect(&ray)
            .is_some_and(|blocker| blocker.t < distance - SHADOW_SLACK)
    }

    /// Diffuse plus, on reflective meshes, specular light from `light`.
    ///
    /// `view_dir` is the direction of the ray that produced `hit`.
    pub fn light_contribution(&self, light: &Light, hit: &HitInfo, view_dir: Vec3) -> Color {
        let to_light = light.position - hit.point;
        let distance = to_light.length();
        if !light.reaches(distance) || self.in_shadow(light, hit.point, distance) {
            return Color::ZERO;
        }

        let l = to_light.normalize_or_zero();
        let n = self.interpolated_normal(hit);
        let diffuse = n.dot(l).clamp(0.0, 1.0);
        let falloff = light.attenuation(distance) * light.brightness;

        let mut color = diffuse * falloff * light.color * self.surface_color(hit);

        if self.mesh(hit).settings().is_reflective() {
            let r = reflect(-l, n);
            let v = -view_dir;
            let specular = r.dot(v).max(0.0).powi(SPECULAR_EXPONENT);
            color += specular * falloff * light.color;
        }

        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{shapes, MeshSettings, Scene, SceneBuilder, Texture, TextureSet};
    use std::sync::Arc;

    fn floor_scene(settings: MeshSettings, color: Color) -> Scene {
        let mut builder = SceneBuilder::new();
        builder.add_mesh(shapes::quad(2.0, color), settings).unwrap();
        builder.build().unwrap().0
    }

    fn hit_at(tracer: &Tracer, x: f32, z: f32) -> HitInfo {
        tracer
            .intersect(&Ray::new(Vec3::new(x, 3.0, z), Vec3::NEG_Y))
            .unwrap()
    }

    #[test]
    fn test_barycentric_weights() {
        let tri = Triangle::from_positions([Vec3::ZERO, Vec3::X, Vec3::Y], Color::ONE);

        assert!((barycentric(&tri, Vec3::ZERO) - Vec3::X).length() < 1e-6);
        assert!((barycentric(&tri, Vec3::X) - Vec3::Y).length() < 1e-6);
        assert!((barycentric(&tri, Vec3::new(0.25, 0.5, 0.0)) - Vec3::new(0.25, 0.25, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_barycentric_degenerate_falls_back() {
        let tri = Triangle::from_positions([Vec3::ZERO, Vec3::X, Vec3::X * 2.0], Color::ONE);
        assert_eq!(barycentric(&tri, Vec3::new(0.5, 0.0, 0.0)), Vec3::X);
    }

    #[test]
    fn test_surface_color_uses_texture_and_flat_color() {
        let scene = floor_scene(MeshSettings::matte(), Color::new(1.0, 0.5, 1.0));
        let mut textures = TextureSet::new();
        textures.bind(0, Arc::new(Texture::solid_color(Color::new(0.5, 1.0, 0.0))));
        let tracer = Tracer::new(&scene, &textures);

        let hit = hit_at(&tracer, 0.3, -0.4);
        assert!((tracer.surface_color(&hit) - Color::new(0.5, 0.5, 0.0)).length() < 1e-5);
        assert!((tracer.interpolated_normal(&hit) - Vec3::Y).length() < 1e-6);

        // u follows x, v follows z over [-2, 2]
        let uv = tracer.interpolated_uv(&hit);
        assert!((uv - Vec2::new(2.3 / 4.0, 1.6 / 4.0)).length() < 1e-5);
    }

    #[test]
    fn test_light_out_of_range_is_dark() {
        let scene = floor_scene(MeshSettings::matte(), Color::ONE);
        let textures = TextureSet::new();
        let tracer = Tracer::new(&scene, &textures);
        let hit = hit_at(&tracer, 0.0, 0.0);

        let light = Light::white(Vec3::new(0.0, 2.0, 0.0), 1.5);
        assert_eq!(tracer.light_contribution(&light, &hit, Vec3::NEG_Y), Color::ZERO);
    }

    #[test]
    fn test_diffuse_matches_formula() {
        let scene = floor_scene(MeshSettings::matte(), Color::new(1.0, 0.8, 0.6));
        let textures = TextureSet::new();
        let tracer = Tracer::new(&scene, &textures);
        let hit = hit_at(&tracer, 0.0, 0.0);

        let light = Light::new(Vec3::new(0.0, 1.0, 0.0), Color::new(1.0, 1.0, 0.5), 2.0, 2.0);
        // N.L = 1, atten = 1 - (1/2)^2 = 0.75
        let expected = 0.75 * 2.0 * Color::new(1.0, 0.8, 0.3);
        let got = tracer.light_contribution(&light, &hit, Vec3::NEG_Y);
        assert!((got - expected).length() < 1e-5);
    }

    #[test]
    fn test_specular_only_on_reflective() {
        let light = Light::white(Vec3::new(0.0, 1.0, 0.0), 4.0);
        let textures = TextureSet::new();

        let matte = floor_scene(MeshSettings::matte(), Color::ONE);
        let tracer = Tracer::new(&matte, &textures);
        let hit = hit_at(&tracer, 0.0, 0.0);
        let matte_color = tracer.light_contribution(&light, &hit, Vec3::NEG_Y);

        let shiny = floor_scene(MeshSettings::reflective(1), Color::ONE);
        let tracer = Tracer::new(&shiny, &textures);
        let hit = hit_at(&tracer, 0.0, 0.0);
        let shiny_color = tracer.light_contribution(&light, &hit, Vec3::NEG_Y);

        // Viewer straight above, mirror direction straight up: R.V = 1
        let atten = 1.0 - (1.0f32 / 4.0).powi(2);
        assert!((shiny_color - matte_color - Color::splat(atten)).length() < 1e-5);
    }
}

//! Scene assembly and per-frame posing.
//!
//! A scene is built once from raw triangle lists through [`SceneBuilder`],
//! which validates capacity limits and runs the spatial index builder for
//! every mesh. After that the geometry is immutable; per-frame state is the
//! light list and one world transform per mesh (see [`Scene::posed`]).

use glint_math::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::index;
use crate::light::Light;
use crate::mesh::{Mesh, MeshSettings, OptimizationLevel};
use crate::triangle::Triangle;
use crate::{MeshId, SceneError, SceneResult};

/// Capacity limits checked while building a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLimits {
    pub max_meshes: usize,
    pub max_lights: usize,
    pub max_triangles_per_mesh: usize,
    pub max_triangles_per_chunk: usize,
}

impl Default for SceneLimits {
    fn default() -> Self {
        Self {
            max_meshes: 10,
            max_lights: 5,
            max_triangles_per_mesh: 1486,
            max_triangles_per_chunk: 400,
        }
    }
}

impl SceneLimits {
    /// No limits at all. Useful for tests and offline tools.
    pub fn unbounded() -> Self {
        Self {
            max_meshes: usize::MAX,
            max_lights: usize::MAX,
            max_triangles_per_mesh: usize::MAX,
            max_triangles_per_chunk: usize::MAX,
        }
    }
}

/// Transform components that can be composed into a matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// What the index builder did with one mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshReport {
    pub mesh: MeshId,
    pub level: OptimizationLevel,
    pub triangles: usize,
    /// Triangle count per octant chunk; empty below the octant level.
    pub chunk_sizes: Vec<usize>,
}

/// Summary of a scene build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildReport {
    pub meshes: Vec<MeshReport>,
}

impl BuildReport {
    pub fn total_triangles(&self) -> usize {
        self.meshes.iter().map(|m| m.triangles).sum()
    }

    /// The mesh with the most triangles. The first one wins ties.
    pub fn largest_mesh(&self) -> Option<&MeshReport> {
        self.meshes
            .iter()
            .fold(None, |best: Option<&MeshReport>, m| match best {
                Some(b) if b.triangles >= m.triangles => Some(b),
                _ => Some(m),
            })
    }

    /// Number of meshes at `level` or above.
    pub fn meshes_at_least(&self, level: OptimizationLevel) -> usize {
        self.meshes.iter().filter(|m| m.level >= level).count()
    }
}

/// Collects meshes and lights, then builds an immutable [`Scene`].
#[derive(Debug, Default)]
pub struct SceneBuilder {
    limits: SceneLimits,
    meshes: Vec<(Vec<Triangle>, MeshSettings)>,
    lights: Vec<Light>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SceneLimits) -> Self {
        Self {
            limits,
            ..Default::default()
        }
    }

    pub fn limits(&self) -> &SceneLimits {
        &self.limits
    }

    /// Queue a mesh and return the id it will have in the built scene.
    pub fn add_mesh(
        &mut self,
        triangles: Vec<Triangle>,
        settings: MeshSettings,
    ) -> SceneResult<MeshId> {
        let id = self.meshes.len();
        if id >= self.limits.max_meshes {
            return Err(SceneError::TooManyMeshes {
                count: id + 1,
                limit: self.limits.max_meshes,
            });
        }
        if triangles.len() > self.limits.max_triangles_per_mesh {
            return Err(SceneError::MeshTooLarge {
                mesh: id,
                triangles: triangles.len(),
                limit: self.limits.max_triangles_per_mesh,
            });
        }
        self.meshes.push((triangles, settings));
        Ok(id)
    }

    pub fn add_light(&mut self, light: Light) -> SceneResult<()> {
        check_light_count(self.lights.len() + 1, &self.limits)?;
        self.lights.push(light);
        Ok(())
    }

    /// Run the index builder over every mesh.
    pub fn build(self) -> SceneResult<(Scene, BuildReport)> {
        let limits = self.limits;
        let meshes = self
            .meshes
            .into_iter()
            .enumerate()
            .map(|(id, (triangles, settings))| index::index_mesh(id, triangles, settings, &limits))
            .collect::<SceneResult<Vec<Mesh>>>()?;

        let report = BuildReport {
            meshes: meshes
                .iter()
                .enumerate()
                .map(|(id, mesh)| MeshReport {
                    mesh: id,
                    level: mesh.optimization_level(),
                    triangles: mesh.triangle_count(),
                    chunk_sizes: mesh.chunks().iter().map(|c| c.len()).collect(),
                })
                .collect(),
        };

        log::info!(
            "Built scene: {} meshes ({} boxed, {} split into octants), {} triangles, {} lights",
            report.meshes.len(),
            report.meshes_at_least(OptimizationLevel::BoundingBox),
            report.meshes_at_least(OptimizationLevel::Octants),
            report.total_triangles(),
            self.lights.len()
        );

        let scene = Scene {
            meshes,
            lights: self.lights,
            limits,
        };
        Ok((scene, report))
    }
}

fn check_light_count(count: usize, limits: &SceneLimits) -> SceneResult<()> {
    if count > limits.max_lights {
        return Err(SceneError::TooManyLights {
            count,
            limit: limits.max_lights,
        });
    }
    Ok(())
}

/// Meshes and lights ready for tracing.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    meshes: Vec<Mesh>,
    lights: Vec<Light>,
    limits: SceneLimits,
}

impl Scene {
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn limits(&self) -> &SceneLimits {
        &self.limits
    }

    /// Get total triangle count across all meshes.
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.triangle_count()).sum()
    }

    /// Replace the light list for the next frame.
    pub fn set_lights(&mut self, lights: Vec<Light>) -> SceneResult<()> {
        check_light_count(lights.len(), &self.limits)?;
        self.lights = lights;
        Ok(())
    }

    /// Copy of the scene with `transforms[i]` applied to mesh `i`.
    ///
    /// Optimization levels and chunk membership come from the initial
    /// build and are not recomputed.
    pub fn posed(&self, transforms: &[Mat4]) -> SceneResult<Scene> {
        if transforms.len() != self.meshes.len() {
            return Err(SceneError::TransformCountMismatch {
                expected: self.meshes.len(),
                actual: transforms.len(),
            });
        }

        Ok(Scene {
            meshes: self
                .meshes
                .iter()
                .zip(transforms)
                .map(|(mesh, matrix)| mesh.transformed(matrix))
                .collect(),
            lights: self.lights.clone(),
            limits: self.limits,
        })
    }
}

//! Mesh representation with its acceleration data.
//!
//! A `Mesh` owns a flat triangle array plus the data the spatial index
//! builder derives from it: exact bounds, a 12-triangle box and, for large
//! meshes, eight octant chunks. Meshes are only produced by
//! [`SceneBuilder`](crate::SceneBuilder), so the acceleration data always
//! matches the triangles.

use glint_math::{Aabb, Mat4, Mat4Ext};
use serde::{Deserialize, Serialize};

use crate::triangle::{BoxMesh, Triangle};

/// Per-mesh acceleration tier, derived from the triangle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptimizationLevel {
    /// Test every triangle.
    BruteForce = 0,
    /// Reject against the mesh box first, then test every triangle.
    BoundingBox = 1,
    /// Mesh box, then eight octant chunk boxes, then chunk triangles.
    Octants = 2,
}

impl OptimizationLevel {
    /// Meshes with at least this many triangles get a bounding box test.
    pub const BOX_THRESHOLD: usize = 50;

    /// Meshes with at least this many triangles are split into octants.
    pub const OCTANT_THRESHOLD: usize = 350;

    /// Level for a mesh with `triangles` triangles. Monotonic in the count.
    pub fn for_triangle_count(triangles: usize) -> Self {
        if triangles >= Self::OCTANT_THRESHOLD {
            OptimizationLevel::Octants
        } else if triangles >= Self::BOX_THRESHOLD {
            OptimizationLevel::BoundingBox
        } else {
            OptimizationLevel::BruteForce
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Ray tracing properties chosen by scene setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    /// When false the surface is shown with its texture color only: no
    /// lighting, no shadows, no reflections.
    pub use_effects: bool,

    /// Maximum number of mirror bounces leaving this surface. 0 = matte.
    pub reflection_level: u32,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            use_effects: true,
            reflection_level: 2,
        }
    }
}

impl MeshSettings {
    /// Lit, non-reflective surface.
    pub fn matte() -> Self {
        Self {
            use_effects: true,
            reflection_level: 0,
        }
    }

    /// Lit surface with `bounces` reflection bounces.
    pub fn reflective(bounces: u32) -> Self {
        Self {
            use_effects: true,
            reflection_level: bounces,
        }
    }

    /// Surface shown with its own color only (sky domes, debug geometry).
    pub fn unlit() -> Self {
        Self {
            use_effects: false,
            reflection_level: 0,
        }
    }

    pub fn is_reflective(&self) -> bool {
        self.reflection_level > 0
    }
}

/// One octant of a mesh's bounding box.
///
/// Holds every triangle with at least one vertex inside the octant, so a
/// triangle straddling a split plane belongs to several chunks.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub(crate) bounds: Aabb,
    pub(crate) triangle_indices: Vec<usize>,
    pub(crate) bounding_box: BoxMesh,
}

impl Chunk {
    /// Octant bounds in the mesh's build space.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Indices into the owning mesh's triangle array.
    pub fn triangle_indices(&self) -> &[usize] {
        &self.triangle_indices
    }

    pub fn bounding_box(&self) -> &BoxMesh {
        &self.bounding_box
    }

    pub fn len(&self) -> usize {
        self.triangle_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_indices.is_empty()
    }

    fn transformed(&self, matrix: &Mat4) -> Chunk {
        Chunk {
            bounds: matrix.transform_aabb(&self.bounds),
            triangle_indices: self.triangle_indices.clone(),
            bounding_box: self.bounding_box.transformed(matrix),
        }
    }
}

/// A triangle mesh together with its acceleration data.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) bounds: Aabb,
    pub(crate) level: OptimizationLevel,
    pub(crate) settings: MeshSettings,
    pub(crate) bounding_box: BoxMesh,
    /// Eight chunks when `level` is `Octants`, otherwise empty.
    pub(crate) chunks: Vec<Chunk>,
}

impl Mesh {
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle(&self, index: usize) -> Option<&Triangle> {
        self.triangles.get(index)
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Axis-aligned bounds of all vertex positions.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn optimization_level(&self) -> OptimizationLevel {
        self.level
    }

    pub fn settings(&self) -> &MeshSettings {
        &self.settings
    }

    pub fn use_effects(&self) -> bool {
        self.settings.use_effects
    }

    pub fn reflection_level(&self) -> u32 {
        self.settings.reflection_level
    }

    pub fn bounding_box(&self) -> &BoxMesh {
        &self.bounding_box
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Raw triangle data, for handing the mesh to an upload collaborator.
    pub fn triangle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Place the mesh in the world with `matrix`.
    ///
    /// Triangles, the mesh box and the chunk boxes are transformed; chunk
    /// membership and the optimization level are kept from the build, so
    /// posing never re-runs the index builder.
    pub fn transformed(&self, matrix: &Mat4) -> Mesh {
        Mesh {
            triangles: self.triangles.iter().map(|t| t.transformed(matrix)).collect(),
            bounds: matrix.transform_aabb(&self.bounds),
            level: self.level,
            settings: self.settings,
            bounding_box: self.bounding_box.transformed(matrix),
            chunks: self.chunks.iter().map(|c| c.transformed(matrix)).collect(),
        }
    }
}

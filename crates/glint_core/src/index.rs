//! Spatial index builder.
//!
//! Two-level acceleration per mesh: a box around the whole mesh and, for
//! large meshes, eight octant chunks each listing the triangles that touch
//! it. Both bounds are stored as 12-triangle box meshes so traversal can
//! reuse the ray-triangle test for its reject checks.

use glint_math::Aabb;

use crate::mesh::{Chunk, Mesh, MeshSettings, OptimizationLevel};
use crate::scene::SceneLimits;
use crate::triangle::{BoxMesh, Triangle};
use crate::{MeshId, SceneError, SceneResult};

/// Bounds of every vertex position of `triangles`.
pub fn mesh_bounds(triangles: &[Triangle]) -> Aabb {
    Aabb::enclosing(triangles.iter().flat_map(|t| t.vertices()))
}

/// Indices of triangles with any vertex inside `bounds` (inclusive).
pub fn chunk_members(triangles: &[Triangle], bounds: &Aabb) -> Vec<usize> {
    triangles
        .iter()
        .enumerate()
        .filter(|(_, tri)| tri.touches(bounds))
        .map(|(i, _)| i)
        .collect()
}

/// Split `bounds` into eight octant chunks.
///
/// Fails if any chunk would hold more than `max_per_chunk` triangles.
pub fn build_chunks(
    mesh: MeshId,
    triangles: &[Triangle],
    bounds: &Aabb,
    max_per_chunk: usize,
) -> SceneResult<Vec<Chunk>> {
    bounds
        .octants()
        .iter()
        .enumerate()
        .map(|(chunk, octant)| {
            let triangle_indices = chunk_members(triangles, octant);
            if triangle_indices.len() > max_per_chunk {
                return Err(SceneError::ChunkOverflow {
                    mesh,
                    chunk,
                    triangles: triangle_indices.len(),
                    limit: max_per_chunk,
                });
            }
            Ok(Chunk {
                bounds: *octant,
                triangle_indices,
                bounding_box: BoxMesh::from_bounds(octant),
            })
        })
        .collect()
}

/// Build a mesh and its acceleration data from raw triangles.
///
/// Deterministic: the same triangles, settings and limits always give an
/// identical mesh.
pub fn index_mesh(
    mesh: MeshId,
    triangles: Vec<Triangle>,
    settings: MeshSettings,
    limits: &SceneLimits,
) -> SceneResult<Mesh> {
    if triangles.len() > limits.max_triangles_per_mesh {
        return Err(SceneError::MeshTooLarge {
            mesh,
            triangles: triangles.len(),
            limit: limits.max_triangles_per_mesh,
        });
    }

    let level = OptimizationLevel::for_triangle_count(triangles.len());
    let bounds = mesh_bounds(&triangles);
    let bounding_box = if bounds.is_empty() {
        BoxMesh::default()
    } else {
        BoxMesh::from_bounds(&bounds)
    };

    let chunks = if level == OptimizationLevel::Octants {
        build_chunks(mesh, &triangles, &bounds, limits.max_triangles_per_chunk)?
    } else {
        Vec::new()
    };

    for (i, chunk) in chunks.iter().enumerate() {
        log::debug!("Mesh {}, chunk {}: {} triangles", mesh, i, chunk.len());
    }
    log::info!(
        "Mesh {}, optimization level {}, triangles {}",
        mesh,
        level.as_u8(),
        triangles.len()
    );

    Ok(Mesh {
        triangles,
        bounds,
        level,
        settings,
        bounding_box,
        chunks,
    })
}

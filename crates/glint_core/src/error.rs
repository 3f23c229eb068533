//! Scene construction errors.
//!
//! Every capacity limit is checked while the scene is being built, so a
//! scene that reaches the tracer is known to fit its limits.

use thiserror::Error;

use crate::MeshId;

/// Errors that can occur while building or posing a scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Scene has {count} meshes, limit is {limit}")]
    TooManyMeshes { count: usize, limit: usize },

    #[error("Scene has {count} lights, limit is {limit}")]
    TooManyLights { count: usize, limit: usize },

    #[error("Mesh {mesh} has {triangles} triangles, limit is {limit}")]
    MeshTooLarge {
        mesh: MeshId,
        triangles: usize,
        limit: usize,
    },

    #[error("Chunk {chunk} of mesh {mesh} holds {triangles} triangles, limit is {limit}")]
    ChunkOverflow {
        mesh: MeshId,
        chunk: usize,
        triangles: usize,
        limit: usize,
    },

    #[error("Expected {expected} mesh transforms, got {actual}")]
    TransformCountMismatch { expected: usize, actual: usize },
}

pub type SceneResult<T> = Result<T, SceneError>;

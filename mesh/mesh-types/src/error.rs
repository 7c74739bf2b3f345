//! Error types for mesh construction and color storage.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while building or editing a [`ColorMesh`](crate::ColorMesh).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MeshError {
    /// A face referenced a vertex that does not exist.
    #[error("invalid vertex index {index} (mesh has {vertex_count} vertices)")]
    InvalidVertexIndex {
        /// The invalid index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A face index was out of range.
    #[error("face index {index} out of bounds (mesh has {face_count} faces)")]
    FaceOutOfBounds {
        /// The invalid face index.
        index: u32,
        /// Total number of faces in the mesh.
        face_count: usize,
    },

    /// A corner index was out of range for its face.
    #[error("corner {corner} out of bounds for face {face} ({corner_count} corners)")]
    CornerOutOfBounds {
        /// The face being edited.
        face: u32,
        /// The invalid corner index.
        corner: usize,
        /// Number of corners on the face.
        corner_count: usize,
    },

    /// A face had fewer than three distinct vertices.
    #[error("degenerate face: {reason}")]
    DegenerateFace {
        /// What was wrong with the face.
        reason: String,
    },
}

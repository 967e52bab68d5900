//! Error types for mesh queries.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors raised by mesh construction and geometric queries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A face index does not exist.
    #[error("face {index} out of range ({count} faces)")]
    FaceOutOfRange {
        /// Requested face.
        index: usize,
        /// Number of faces.
        count: usize,
    },

    /// A vertex index does not exist.
    #[error("vertex {index} out of range ({count} vertices)")]
    VertexOutOfRange {
        /// Requested vertex.
        index: usize,
        /// Number of vertices.
        count: usize,
    },

    /// A face has fewer than 3 corners.
    #[error("face {face} has {corners} corners, need at least 3")]
    DegenerateFace {
        /// Offending face.
        face: usize,
        /// Number of corners.
        corners: usize,
    },
}

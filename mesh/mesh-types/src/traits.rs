//! Traits for mesh types.

use crate::Vertex;

/// Minimal topology interface shared by polygon and triangle meshes.
pub trait MeshTopology {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces.
    fn face_count(&self) -> usize;

    /// Check if the mesh is empty.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get a vertex by index, `None` if out of bounds.
    fn vertex(&self, index: usize) -> Option<&Vertex>;
}

//! Indexed triangle mesh.

use crate::{MeshTopology, Vertex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh, the output of baking a curve.
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, MeshTopology, Vertex};
///
/// let mesh = IndexedMesh {
///     vertices: vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///     ],
///     faces: vec![[0, 1, 2]],
/// };
///
/// assert_eq!(mesh.face_count(), 1);
/// assert_eq!(mesh.signed_volume(), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Signed volume enclosed by the faces, summed as tetrahedra against the
    /// origin. Positive for a closed mesh wound outward. Faces with a dangling
    /// index are skipped.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let corner = |i: u32| self.vertices.get(i as usize).map(|v| v.position.coords);
        self.faces
            .iter()
            .filter_map(|&[a, b, c]| Some((corner(a)?, corner(b)?, corner(c)?)))
            .map(|(a, b, c)| a.dot(&b.cross(&c)))
            .sum::<f64>()
            / 6.0
    }
}

impl MeshTopology for IndexedMesh {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tetrahedron() -> IndexedMesh {
        let mut mesh = IndexedMesh::with_capacity(4, 4);
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0));
        mesh.faces.push([0, 2, 1]);
        mesh.faces.push([0, 1, 3]);
        mesh.faces.push([0, 3, 2]);
        mesh.faces.push([1, 2, 3]);
        mesh
    }

    #[test]
    fn tetrahedron_volume() {
        assert_relative_eq!(tetrahedron().signed_volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_mesh() {
        assert!(IndexedMesh::new().is_empty());
    }
}

//! Polygon mesh with editor selection state.

use crate::{MeshError, MeshResult, MeshTopology, Vertex};
use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polygon face: an ordered loop of vertex indices with a selection flag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    /// Corner vertex indices, counter-clockwise when viewed from outside.
    pub vertices: Vec<u32>,
    /// Selection state in the editor.
    pub selected: bool,
}

impl Face {
    /// Create an unselected face.
    #[must_use]
    pub fn new(vertices: impl Into<Vec<u32>>) -> Self {
        Self {
            vertices: vertices.into(),
            selected: false,
        }
    }

    /// Number of corners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if the face has no corners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Boundary edges in loop order.
    pub fn edges(&self) -> impl Iterator<Item = [u32; 2]> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| [self.vertices[i], self.vertices[(i + 1) % n]])
    }
}

/// A polygon mesh as exposed by an editor: n-gon faces, loose edges, and
/// per-element selection flags.
///
/// Element order is the host's enumeration order and is preserved by every
/// query, so "the first two selected faces" is well defined.
///
/// # Example
///
/// ```
/// use mesh_types::{PolyMesh, Face, MeshTopology};
///
/// let mesh = PolyMesh::from_pydata(
///     &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
///     &[],
///     &[vec![0, 1, 2, 3]],
/// )?;
///
/// assert_eq!(mesh.face_count(), 1);
/// assert_eq!(mesh.edges().len(), 4);
/// # Ok::<(), mesh_types::MeshError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Polygon faces.
    pub faces: Vec<Face>,
    /// Edges that belong to no face.
    pub loose_edges: Vec<[u32; 2]>,
}

impl PolyMesh {
    /// Create an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            loose_edges: Vec::new(),
        }
    }

    /// Build a mesh from raw vertex coordinates, edges and faces.
    ///
    /// Edges already implied by a face are dropped from the loose edge list.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is out of range or a face has fewer than
    /// 3 corners.
    pub fn from_pydata(
        verts: &[[f64; 3]],
        edges: &[[u32; 2]],
        faces: &[Vec<u32>],
    ) -> MeshResult<Self> {
        let mut mesh = Self {
            vertices: verts.iter().map(|&v| Vertex::from(v)).collect(),
            faces: faces.iter().map(|f| Face::new(f.clone())).collect(),
            loose_edges: Vec::new(),
        };

        let face_edges: HashSet<[u32; 2]> = mesh
            .faces
            .iter()
            .flat_map(Face::edges)
            .map(sorted_edge)
            .collect();
        let mut seen = HashSet::new();
        for &edge in edges {
            let key = sorted_edge(edge);
            if !face_edges.contains(&key) && seen.insert(key) {
                mesh.loose_edges.push(edge);
            }
        }

        mesh.validate()?;
        Ok(mesh)
    }

    /// Check that every index is in range and every face is a polygon.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> MeshResult<()> {
        let count = self.vertices.len();
        let check = |index: u32| {
            if (index as usize) < count {
                Ok(())
            } else {
                Err(MeshError::VertexOutOfRange {
                    index: index as usize,
                    count,
                })
            }
        };

        for (face_idx, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::DegenerateFace {
                    face: face_idx,
                    corners: face.len(),
                });
            }
            face.vertices.iter().copied().try_for_each(check)?;
        }
        self.loose_edges.iter().flatten().copied().try_for_each(check)
    }

    /// Select a face together with its corner vertices.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::FaceOutOfRange`] for an unknown face.
    pub fn select_face(&mut self, index: usize) -> MeshResult<()> {
        let count = self.faces.len();
        let face = self
            .faces
            .get_mut(index)
            .ok_or(MeshError::FaceOutOfRange { index, count })?;
        face.selected = true;
        for &v in &face.vertices {
            if let Some(vertex) = self.vertices.get_mut(v as usize) {
                vertex.selected = true;
            }
        }
        Ok(())
    }

    /// Select a single vertex.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexOutOfRange`] for an unknown vertex.
    pub fn select_vertex(&mut self, index: usize) -> MeshResult<()> {
        let count = self.vertices.len();
        self.vertices
            .get_mut(index)
            .ok_or(MeshError::VertexOutOfRange { index, count })?
            .selected = true;
        Ok(())
    }

    /// Clear all selection flags.
    pub fn deselect_all(&mut self) {
        self.faces.iter_mut().for_each(|f| f.selected = false);
        self.vertices.iter_mut().for_each(|v| v.selected = false);
    }

    /// Indices of selected faces, in enumeration order.
    pub fn selected_faces(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.selected)
            .map(|(i, _)| i)
    }

    /// Indices of selected vertices, in enumeration order.
    pub fn selected_vertices(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.selected)
            .map(|(i, _)| i)
    }

    fn face_ref(&self, index: usize) -> MeshResult<&Face> {
        self.faces.get(index).ok_or(MeshError::FaceOutOfRange {
            index,
            count: self.faces.len(),
        })
    }

    fn position(&self, index: u32) -> MeshResult<Point3<f64>> {
        self.vertices
            .get(index as usize)
            .map(|v| v.position)
            .ok_or(MeshError::VertexOutOfRange {
                index: index as usize,
                count: self.vertices.len(),
            })
    }

    /// Corner positions of a face, in loop order.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown face or a dangling vertex index.
    pub fn face_positions(&self, index: usize) -> MeshResult<Vec<Point3<f64>>> {
        self.face_ref(index)?
            .vertices
            .iter()
            .map(|&v| self.position(v))
            .collect()
    }

    /// Median (mean of corner positions) of a face.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown or degenerate face.
    pub fn face_centroid(&self, index: usize) -> MeshResult<Point3<f64>> {
        let positions = self.face_positions(index)?;
        polygon_centroid(&positions).ok_or(MeshError::DegenerateFace {
            face: index,
            corners: positions.len(),
        })
    }

    /// Unit normal of a face by Newell's method, `None` for a face with no
    /// area.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown face.
    pub fn face_normal(&self, index: usize) -> MeshResult<Option<Vector3<f64>>> {
        Ok(newell_normal(&self.face_positions(index)?))
    }

    /// Unique edges: face boundary edges in face order, then loose edges.
    #[must_use]
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut seen = HashSet::new();
        self.faces
            .iter()
            .flat_map(Face::edges)
            .chain(self.loose_edges.iter().copied())
            .filter(|&e| seen.insert(sorted_edge(e)))
            .collect()
    }

    /// Lengths of the edges that touch a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown vertex.
    pub fn incident_edge_lengths(&self, index: usize) -> MeshResult<Vec<f64>> {
        let origin = self.position(index_u32(index, self.vertices.len())?)?;
        self.edges()
            .into_iter()
            .filter_map(|[a, b]| match index {
                i if a as usize == i => Some(b),
                i if b as usize == i => Some(a),
                _ => None,
            })
            .map(|other| self.position(other).map(|p| (p - origin).norm()))
            .collect()
    }

    /// Unit normal at a vertex.
    ///
    /// Uses the stored normal when present, otherwise the angle-weighted sum
    /// of the incident face normals. A vertex without faces falls back to its
    /// normalized position. Returns `None` when no direction can be derived.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown vertex.
    pub fn vertex_normal(&self, index: usize) -> MeshResult<Option<Vector3<f64>>> {
        let target = index_u32(index, self.vertices.len())?;
        let vertex = &self.vertices[index];
        if let Some(normal) = vertex.normal {
            return Ok(normal.try_normalize(f64::EPSILON));
        }

        let mut sum = Vector3::zeros();
        let mut touched = false;
        for face_idx in 0..self.faces.len() {
            let corners = &self.faces[face_idx].vertices;
            let Some(k) = corners.iter().position(|&v| v == target) else {
                continue;
            };
            touched = true;
            let n = corners.len();
            let prev = self.position(corners[(k + n - 1) % n])?;
            let next = self.position(corners[(k + 1) % n])?;
            let (Some(a), Some(b)) = (
                (prev - vertex.position).try_normalize(f64::EPSILON),
                (next - vertex.position).try_normalize(f64::EPSILON),
            ) else {
                continue;
            };
            if let Some(face_normal) = self.face_normal(face_idx)? {
                sum += face_normal * a.dot(&b).clamp(-1.0, 1.0).acos();
            }
        }

        if touched {
            Ok(sum.try_normalize(f64::EPSILON))
        } else {
            Ok(vertex.position.coords.try_normalize(f64::EPSILON))
        }
    }
}

impl MeshTopology for PolyMesh {
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

/// Mean of a set of points, `None` when empty.
#[must_use]
pub fn polygon_centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Unit polygon normal by Newell's method; robust for non-planar and
/// concave polygons. `None` when the polygon has no area.
#[must_use]
pub fn newell_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let cur = points[i];
        let nxt = points[(i + 1) % n];
        normal.x += (cur.y - nxt.y) * (cur.z + nxt.z);
        normal.y += (cur.z - nxt.z) * (cur.x + nxt.x);
        normal.z += (cur.x - nxt.x) * (cur.y + nxt.y);
    }
    normal.try_normalize(f64::EPSILON)
}

fn sorted_edge([a, b]: [u32; 2]) -> [u32; 2] {
    if a <= b { [a, b] } else { [b, a] }
}

fn index_u32(index: usize, count: usize) -> MeshResult<u32> {
    u32::try_from(index)
        .ok()
        .filter(|_| index < count)
        .ok_or(MeshError::VertexOutOfRange { index, count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Unit cube, quads wound outward.
    fn cube() -> PolyMesh {
        PolyMesh::from_pydata(
            &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
                [1.0, 1.0, 1.0],
                [0.0, 1.0, 1.0],
            ],
            &[],
            &[
                vec![0, 3, 2, 1],
                vec![4, 5, 6, 7],
                vec![0, 1, 5, 4],
                vec![2, 3, 7, 6],
                vec![1, 2, 6, 5],
                vec![0, 4, 7, 3],
            ],
        )
        .unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn from_pydata_rejects_bad_index() {
        let err = PolyMesh::from_pydata(&[[0.0; 3]; 3], &[], &[vec![0, 1, 7]]);
        assert_eq!(
            err,
            Err(MeshError::VertexOutOfRange { index: 7, count: 3 })
        );
    }

    #[test]
    fn from_pydata_rejects_two_corner_face() {
        let err = PolyMesh::from_pydata(&[[0.0; 3]; 3], &[], &[vec![0, 1]]);
        assert!(matches!(err, Err(MeshError::DegenerateFace { face: 0, corners: 2 })));
    }

    #[test]
    fn from_pydata_drops_face_edges_from_loose_list() {
        let mesh = PolyMesh::from_pydata(
            &[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [5.0, 0.0, 0.0]],
            &[[1, 0], [0, 3], [3, 0]],
            &[vec![0, 1, 2]],
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(mesh.loose_edges, vec![[0, 3]]);
        assert_eq!(mesh.edges().len(), 4);
    }

    #[test]
    fn cube_edges_are_unique() {
        assert_eq!(cube().edges().len(), 12);
    }

    #[test]
    fn centroid_and_normal_of_top_face() {
        let mesh = cube();
        let c = mesh.face_centroid(1).unwrap_or_else(|e| panic!("{e}"));
        assert_relative_eq!(c.coords, Vector3::new(0.5, 0.5, 1.0));
        let n = mesh.face_normal(1).ok().flatten();
        assert_eq!(n, Some(Vector3::z()));
        let bottom = mesh.face_normal(0).ok().flatten();
        assert_eq!(bottom, Some(-Vector3::z()));
    }

    #[test]
    fn face_out_of_range() {
        assert_eq!(
            cube().face_centroid(6),
            Err(MeshError::FaceOutOfRange { index: 6, count: 6 })
        );
    }

    #[test]
    fn corner_vertex_normal_points_diagonally() {
        let n = cube().vertex_normal(6).ok().flatten();
        let n = n.unwrap_or_else(Vector3::zeros);
        let expected = Vector3::new(1.0, 1.0, 1.0).normalize();
        assert_relative_eq!(n, expected, epsilon = 1e-10);
    }

    #[test]
    fn stored_normal_wins() {
        let mut mesh = cube();
        mesh.vertices[6].normal = Some(Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(mesh.vertex_normal(6), Ok(Some(Vector3::z())));
    }

    #[test]
    fn loose_vertex_normal_uses_position() {
        let mesh = PolyMesh::from_pydata(&[[0.0, 3.0, 0.0]], &[], &[])
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(mesh.vertex_normal(0), Ok(Some(Vector3::y())));
    }

    #[test]
    fn incident_edges_of_cube_corner() {
        let lengths = cube()
            .incident_edge_lengths(0)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(lengths.len(), 3);
        for l in lengths {
            assert_relative_eq!(l, 1.0);
        }
    }

    #[test]
    fn selecting_a_face_selects_its_vertices() {
        let mut mesh = cube();
        mesh.select_face(1).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(mesh.selected_faces().collect::<Vec<_>>(), vec![1]);
        assert_eq!(mesh.selected_vertices().collect::<Vec<_>>(), vec![4, 5, 6, 7]);
        mesh.deselect_all();
        assert_eq!(mesh.selected_vertices().count(), 0);
    }

    #[test]
    fn newell_handles_concave_polygon() {
        let l_shape = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        assert_eq!(newell_normal(&l_shape), Some(Vector3::z()));
        assert_eq!(newell_normal(&l_shape[..2]), None);
    }
}

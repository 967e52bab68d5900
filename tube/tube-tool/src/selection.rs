//! Editor selection and the coarse classification that fixes a tube's mode.

use std::fmt;

use mesh_types::MeshObject;

use crate::error::{SelectionError, SelectionTarget};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The objects the editor exposes for the current interaction, in host
/// order. Only objects in edit mode take part in tube creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSelection {
    /// Candidate objects.
    pub objects: Vec<MeshObject>,
}

impl EditSelection {
    /// Wrap a list of objects.
    #[must_use]
    pub fn new(objects: Vec<MeshObject>) -> Self {
        Self { objects }
    }

    /// Selection made on one object.
    #[must_use]
    pub fn single(object: MeshObject) -> Self {
        Self::new(vec![object])
    }

    /// Selection spanning two objects.
    #[must_use]
    pub fn pair(first: MeshObject, second: MeshObject) -> Self {
        Self::new(vec![first, second])
    }

    /// Objects in edit mode, in host order.
    pub fn edit_objects(&self) -> impl Iterator<Item = &MeshObject> {
        self.objects.iter().filter(|o| o.in_edit_mode)
    }

    /// Look up an object by name.
    #[must_use]
    pub fn object(&self, name: &str) -> Option<&MeshObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Mutable lookup by name, for reselecting geometry between recomputes.
    pub fn object_mut(&mut self, name: &str) -> Option<&mut MeshObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    /// The edit-mode objects `mode` works on.
    ///
    /// # Errors
    ///
    /// Fails when no object, more than two objects, or a different number of
    /// objects than `mode` needs are in edit mode.
    pub fn objects_for(&self, mode: SelectionMode) -> Result<Vec<&MeshObject>, SelectionError> {
        let objects = self.checked_edit_objects()?;
        if objects.len() == mode.object_count() {
            Ok(objects)
        } else {
            Err(SelectionError::ObjectCountMismatch {
                mode,
                expected: mode.object_count(),
                actual: objects.len(),
            })
        }
    }

    fn checked_edit_objects(&self) -> Result<Vec<&MeshObject>, SelectionError> {
        let objects: Vec<_> = self.edit_objects().collect();
        match objects.len() {
            0 => Err(SelectionError::NothingInEditMode),
            1 | 2 => Ok(objects),
            count => Err(SelectionError::TooManyObjects { count }),
        }
    }
}

/// How a tube derives its two anchors. Decided once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SelectionMode {
    /// Two selected faces on one mesh.
    SingleObjectTwoFaces,
    /// Two selected vertices on one mesh.
    SingleObjectTwoVertices,
    /// One selected face on each of two meshes.
    TwoObjectsFaceEach,
    /// One selected vertex on each of two meshes.
    TwoObjectsVertexEach,
}

impl SelectionMode {
    /// Classify a fresh selection.
    ///
    /// One object in edit mode gives a single-object mode, preferring faces
    /// when at least two are selected. Two objects give a two-object mode,
    /// preferring faces when both objects have one selected.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] when the selection fits no mode.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{MeshObject, PolyMesh};
    /// use tube_tool::{EditSelection, SelectionMode};
    ///
    /// let mut mesh = PolyMesh::from_pydata(
    ///     &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    ///     &[[0, 1], [1, 2]],
    ///     &[],
    /// )?;
    /// mesh.select_vertex(0)?;
    /// mesh.select_vertex(2)?;
    ///
    /// let selection = EditSelection::single(MeshObject::new("Wire", mesh));
    /// assert_eq!(
    ///     SelectionMode::classify(&selection),
    ///     Ok(SelectionMode::SingleObjectTwoVertices)
    /// );
    /// # Ok::<(), mesh_types::MeshError>(())
    /// ```
    pub fn classify(selection: &EditSelection) -> Result<Self, SelectionError> {
        let objects = selection.checked_edit_objects()?;
        let face_counts: Vec<usize> = objects
            .iter()
            .map(|o| o.mesh.selected_faces().count())
            .collect();
        let vertex_counts: Vec<usize> = objects
            .iter()
            .map(|o| o.mesh.selected_vertices().count())
            .collect();

        if let [faces] = face_counts[..] {
            let verts = vertex_counts[0];
            return if faces >= 2 {
                Ok(Self::SingleObjectTwoFaces)
            } else if verts >= 2 {
                Ok(Self::SingleObjectTwoVertices)
            } else {
                Err(SelectionError::NotEnoughSelected {
                    mode: SelectionTarget::Classification,
                    element: "faces or vertices",
                    required: 2,
                    found: verts,
                })
            };
        }

        if face_counts.iter().all(|&n| n >= 1) {
            Ok(Self::TwoObjectsFaceEach)
        } else if vertex_counts.iter().all(|&n| n >= 1) {
            Ok(Self::TwoObjectsVertexEach)
        } else {
            Err(SelectionError::NotEnoughSelected {
                mode: SelectionTarget::Classification,
                element: "face or vertex on each object",
                required: 1,
                found: vertex_counts.iter().copied().min().unwrap_or(0),
            })
        }
    }

    /// Objects in edit mode this mode needs.
    #[must_use]
    pub const fn object_count(self) -> usize {
        match self {
            Self::SingleObjectTwoFaces | Self::SingleObjectTwoVertices => 1,
            Self::TwoObjectsFaceEach | Self::TwoObjectsVertexEach => 2,
        }
    }

    /// Whether anchors come from faces rather than vertices.
    #[must_use]
    pub const fn uses_faces(self) -> bool {
        matches!(self, Self::SingleObjectTwoFaces | Self::TwoObjectsFaceEach)
    }

    /// Whether anchor positions are in world space. Single-object anchors
    /// stay in the object's local space and the curve inherits its transform.
    #[must_use]
    pub const fn is_world_space(self) -> bool {
        self.object_count() == 2
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SingleObjectTwoFaces => "single object, two faces",
            Self::SingleObjectTwoVertices => "single object, two vertices",
            Self::TwoObjectsFaceEach => "two objects, one face each",
            Self::TwoObjectsVertexEach => "two objects, one vertex each",
        })
    }
}

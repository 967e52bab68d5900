//! Mesh objects placed in a scene.

use crate::{PolyMesh, Transform3D};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named mesh with its object-to-world transform and edit-mode state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshObject {
    /// Object name, unique within a scene.
    pub name: String,
    /// Mesh data in object space.
    pub mesh: PolyMesh,
    /// Object-to-world transform.
    pub world: Transform3D,
    /// Whether the object is currently being edited.
    pub in_edit_mode: bool,
}

impl MeshObject {
    /// Create an object at the origin, in edit mode.
    #[must_use]
    pub fn new(name: impl Into<String>, mesh: PolyMesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            world: Transform3D::identity(),
            in_edit_mode: true,
        }
    }

    /// Set the object-to-world transform.
    #[must_use]
    pub fn with_world(mut self, world: Transform3D) -> Self {
        self.world = world;
        self
    }

    /// Set the edit-mode state.
    #[must_use]
    pub fn with_edit_mode(mut self, in_edit_mode: bool) -> Self {
        self.in_edit_mode = in_edit_mode;
        self
    }

    /// Object-space point to world space.
    #[must_use]
    pub fn to_world(&self, point: &Point3<f64>) -> Point3<f64> {
        self.world.transform_point(point)
    }

    /// Object-space normal to world space.
    #[must_use]
    pub fn normal_to_world(&self, normal: &Vector3<f64>) -> Option<Vector3<f64>> {
        self.world.transform_normal(normal)
    }
}

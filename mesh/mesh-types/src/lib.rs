//! Core mesh types for the tube tool.
//!
//! This crate provides the mesh-side types the tube tool reads from and
//! writes to:
//!
//! - [`PolyMesh`] - An editable polygon mesh with face/vertex selection
//! - [`MeshObject`] - A named mesh with its world transform
//! - [`Transform3D`] - Affine object-to-world transforms
//! - [`IndexedMesh`] - A triangle mesh, the output of baking a curve
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**; normals point
//! outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{MeshObject, PolyMesh, Transform3D};
//!
//! let mut mesh = PolyMesh::from_pydata(
//!     &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
//!     &[],
//!     &[vec![0, 1, 2]],
//! )?;
//! mesh.select_face(0)?;
//!
//! let object = MeshObject::new("Plane", mesh).with_world(Transform3D::uniform_scale(2.0));
//! assert_eq!(object.mesh.selected_faces().count(), 1);
//! # Ok::<(), mesh_types::MeshError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::cast_precision_loss)]

mod error;
mod mesh;
mod object;
mod poly;
mod traits;
mod transform;
mod vertex;

pub use error::{MeshError, MeshResult};
pub use mesh::IndexedMesh;
pub use object::MeshObject;
pub use poly::{newell_normal, polygon_centroid, Face, PolyMesh};
pub use traits::MeshTopology;
pub use transform::Transform3D;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

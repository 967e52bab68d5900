//! Bevelled Bézier tubes anchored to selected mesh geometry.
//!
//! A tube is a two-point Bézier curve whose ends sit on two selected faces
//! or vertices, tangent to their normals and scaled to their local size.
//! The derivation runs in three steps on every recompute:
//!
//! 1. [`extract_anchors`] reads a position, normal and reference length per
//!    end from the live [`EditSelection`], according to a [`SelectionMode`]
//!    fixed when the tube was created.
//! 2. [`Orientation`] decides which anchor is first (`flip_u`) and which
//!    spline end each anchor is written to (`flip_v`).
//! 3. [`build_endpoints`] turns the anchors and [`ScaleParameters`] into two
//!    [`EndpointDescriptor`]s, collected with the resolutions into a
//!    [`TubeSpec`] that [`CurveObject::apply`] writes in one step.
//!
//! [`Tube`] ties the steps to a curve object and the interactive
//! [`TubeAction`]s; [`TubeSet`] owns all tubes of a session.
//!
//! # Example
//!
//! ```
//! use mesh_types::{MeshObject, PolyMesh, Transform3D};
//! use tube_tool::{EditSelection, TubeAction, TubeSet, TubeSettings};
//!
//! let quad = |z: f64| {
//!     PolyMesh::from_pydata(
//!         &[[0.0, 0.0, z], [1.0, 0.0, z], [1.0, 1.0, z], [0.0, 1.0, z]],
//!         &[],
//!         &[vec![0, 1, 2, 3]],
//!     )
//! };
//! let mut a = quad(0.0)?;
//! a.select_face(0)?;
//! let mut b = quad(0.0)?;
//! b.select_face(0)?;
//!
//! let selection = EditSelection::pair(
//!     MeshObject::new("A", a),
//!     MeshObject::new("B", b).with_world(Transform3D::translation(0.0, 0.0, 6.0)),
//! );
//!
//! let mut tubes = TubeSet::new();
//! let name = tubes.create(&selection, TubeSettings::default())?.name().to_owned();
//! tubes.dispatch(&name, TubeAction::Finalize, &selection)?;
//! assert!(tubes.get(&name).is_some_and(|t| t.curve().hidden));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::cast_precision_loss, clippy::module_name_repetitions)]

mod action;
mod anchor;
mod curve;
mod endpoint;
mod error;
mod orientation;
mod selection;
mod settings;
mod tube;
mod tube_set;
mod tube_spec;

pub use action::{ActionOutcome, ResettableProperty, TubeAction};
pub use anchor::{extract_anchors, Anchor, ExtractOptions};
pub use curve::{BakedMesh, CurveObject, BAKED_PREFIX};
pub use endpoint::{build_endpoints, scale_ratio, EndpointDescriptor, Endpoints, ScaleParameters};
pub use error::{DegenerateGeometryError, SelectionError, SelectionTarget, TubeError, TubeResult};
pub use orientation::{Orientation, SplineSlot};
pub use selection::{EditSelection, SelectionMode};
pub use settings::{
    TubeSettings, VertexNormalSpace, BEVEL_RESOLUTION_RANGE, HANDLE_EXT_RANGE, SCALE_RANGE,
    U_RESOLUTION_RANGE,
};
pub use tube::Tube;
pub use tube_set::{TubeSet, OBJECT_PREFIX};
pub use tube_spec::TubeSpec;

//! Bake bevelled curves into triangle meshes.
//!
//! A curve object with a full round bevel is displayed as a tube whose
//! cross-section radius is `bevel_depth` times each control point's radius.
//! This crate turns such a curve into an independent [`IndexedMesh`]:
//!
//! - **Tessellation**: each Bézier segment is sampled at the spline's `resolution_u`
//! - **Variable radius**: point radii are interpolated along every segment
//! - **Parallel transport**: rotation-minimizing frames keep the rings from twisting
//! - **End caps**: optional fans close both ends
//!
//! # Quick Start
//!
//! ```
//! use curve_types::{BezierPoint, BezierSpline};
//! use mesh_from_curves::{bake_bevelled_spline, BevelConfig};
//! use nalgebra::{Point3, Vector3};
//!
//! let spline = BezierSpline::from_points(vec![
//!     BezierPoint::with_aligned_handles(Point3::origin(), Vector3::z(), 2.0),
//!     BezierPoint::with_aligned_handles(Point3::new(0.0, 0.0, 5.0), Vector3::z(), 2.0)
//!         .with_radius(2.0),
//! ])?;
//!
//! let config = BevelConfig::default().with_depth(0.25).with_resolution(2);
//! let mesh = bake_bevelled_spline(&spline, &config)?;
//! assert!(mesh.signed_volume() > 0.0);
//! # Ok::<(), mesh_from_curves::BakeError>(())
//! ```
//!
//! [`IndexedMesh`]: mesh_types::IndexedMesh

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

mod bake;
mod error;
mod frame;

pub use bake::{bake_bevelled_spline, BevelConfig};
pub use error::{BakeError, BakeResult};
pub use frame::{parallel_transport_frames, Frame};

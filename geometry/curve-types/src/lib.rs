//! Bézier curve types for tube curves.
//!
//! This crate models the curve side of a bevelled tube:
//!
//! - [`BezierPoint`] - A control point with two handles and a radius
//! - [`BezierSpline`] - An ordered list of control points, addressed the way
//!   a curve object addresses them (`-1` is the last point)
//! - [`CubicBezier`] - A single segment between two control points
//!
//! All segments implement the [`Curve`] trait for evaluation, tangents and
//! arc length.
//!
//! # Example
//!
//! ```
//! use curve_types::{BezierPoint, BezierSpline, Curve};
//! use nalgebra::{Point3, Vector3};
//!
//! let start = BezierPoint::with_aligned_handles(Point3::origin(), Vector3::z(), 2.0);
//! let end = BezierPoint::with_aligned_handles(Point3::new(0.0, 0.0, 5.0), Vector3::z(), 2.0);
//! let spline = BezierSpline::from_points(vec![start, end])?;
//!
//! let segment = spline.segments().next();
//! assert!(segment.is_some_and(|s| (s.end().z - 5.0).abs() < 1e-10));
//! # Ok::<(), curve_types::CurveError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::cast_precision_loss, clippy::module_name_repetitions)]

mod bezier;
mod error;
mod point;
mod spline;
mod traits;

pub use bezier::CubicBezier;
pub use error::CurveError;
pub use point::BezierPoint;
pub use spline::{BezierSpline, SplineSample};
pub use traits::Curve;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;

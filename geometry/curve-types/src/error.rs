//! Error types for curve operations.

use thiserror::Error;

/// Errors that can occur while building or evaluating tube curves.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// Spline has too few control points to form a segment.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// A control point index does not exist on the spline.
    #[error("point index {index} out of range for spline with {len} points")]
    PointOutOfRange {
        /// Requested index (negative indices count from the end).
        index: isize,
        /// Number of points on the spline.
        len: usize,
    },

    /// Radius must be positive and finite.
    #[error("invalid radius: {0} (must be positive)")]
    InvalidRadius(f64),

    /// A control point coordinate is NaN or infinite.
    #[error("non-finite coordinate on point {index}")]
    NonFinite {
        /// Index of the offending point.
        index: usize,
    },
}

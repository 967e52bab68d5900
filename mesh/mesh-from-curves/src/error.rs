//! Error types for curve baking.

use thiserror::Error;

/// Result type for baking operations.
pub type BakeResult<T> = Result<T, BakeError>;

/// Errors that can occur while baking a curve into a mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BakeError {
    /// The spline itself is unusable.
    #[error(transparent)]
    Curve(#[from] curve_types::CurveError),

    /// Bevel depth is zero, negative or not finite.
    #[error("invalid bevel depth: {0}")]
    InvalidBevelDepth(f64),

    /// Tessellation produced fewer than two rings.
    #[error("spline tessellated to {0} samples, need at least 2")]
    TooFewSamples(usize),
}

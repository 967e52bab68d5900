//! Bézier spline control points.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A control point of a Bézier spline, as stored by a curve object.
///
/// `handle_left` shapes the segment arriving at this point and
/// `handle_right` the segment leaving it. `radius` scales the bevel
/// cross-section at this point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BezierPoint {
    /// Position of the point.
    pub co: Point3<f64>,
    /// Incoming handle.
    pub handle_left: Point3<f64>,
    /// Outgoing handle.
    pub handle_right: Point3<f64>,
    /// Cross-section scale at this point.
    pub radius: f64,
}

impl Default for BezierPoint {
    fn default() -> Self {
        Self::new(Point3::origin())
    }
}

impl BezierPoint {
    /// Create a point with both handles collapsed onto `co` and unit radius.
    #[must_use]
    pub const fn new(co: Point3<f64>) -> Self {
        Self {
            co,
            handle_left: co,
            handle_right: co,
            radius: 1.0,
        }
    }

    /// Create a point with handles placed symmetrically along `direction`.
    ///
    /// `handle_right = co + direction * extent`, `handle_left` mirrors it.
    #[must_use]
    pub fn with_aligned_handles(co: Point3<f64>, direction: Vector3<f64>, extent: f64) -> Self {
        Self {
            co,
            handle_left: co - direction * extent,
            handle_right: co + direction * extent,
            radius: 1.0,
        }
    }

    /// Set the radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Check that every coordinate and the radius are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.co.coords.iter().all(|c| c.is_finite())
            && self.handle_left.coords.iter().all(|c| c.is_finite())
            && self.handle_right.coords.iter().all(|c| c.is_finite())
            && self.radius.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn aligned_handles_are_mirrored() {
        let p = BezierPoint::with_aligned_handles(Point3::new(1.0, 0.0, 0.0), Vector3::z(), 2.0);
        assert_relative_eq!(p.handle_right.coords, Vector3::new(1.0, 0.0, 2.0));
        assert_relative_eq!(p.handle_left.coords, Vector3::new(1.0, 0.0, -2.0));
        assert_relative_eq!(p.radius, 1.0);
    }

    #[test]
    fn nan_is_not_finite() {
        let p = BezierPoint::new(Point3::new(f64::NAN, 0.0, 0.0));
        assert!(!p.is_finite());
        assert!(BezierPoint::default().is_finite());
    }
}

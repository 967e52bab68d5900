//! Host-style Bézier splines.

use crate::{BezierPoint, CubicBezier, Curve, CurveError, Result};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A Bézier spline as held by a curve object: an ordered list of control
/// points plus the tessellation settings used to display it.
///
/// Points are addressed like the host addresses them: non-negative indices
/// from the start, negative indices from the end (`-1` is the last point).
///
/// # Example
///
/// ```
/// use curve_types::BezierSpline;
/// use nalgebra::Point3;
///
/// let mut spline = BezierSpline::with_point_count(2)?;
/// spline.point_mut(-1)?.co = Point3::new(0.0, 0.0, 5.0);
///
/// assert_eq!(spline.segment_count(), 1);
/// assert!((spline.point(1)?.co.z - 5.0).abs() < 1e-12);
/// # Ok::<(), curve_types::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BezierSpline {
    points: Vec<BezierPoint>,
    /// Samples per segment when tessellating.
    pub resolution_u: u32,
    /// Smooth shading of the generated surface.
    pub smooth: bool,
}

/// A tessellated sample on a spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSample {
    /// Position on the spline.
    pub position: Point3<f64>,
    /// Unit tangent in the direction of travel.
    pub tangent: Vector3<f64>,
    /// Radius, interpolated linearly between control points.
    pub radius: f64,
}

impl BezierSpline {
    /// Default samples per segment.
    pub const DEFAULT_RESOLUTION_U: u32 = 12;

    /// Create a spline with `count` points at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] when `count < 2`.
    pub fn with_point_count(count: usize) -> Result<Self> {
        Self::from_points(vec![BezierPoint::default(); count])
    }

    /// Create a spline from explicit control points.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] when fewer than 2 points
    /// are given.
    pub fn from_points(points: Vec<BezierPoint>) -> Result<Self> {
        if points.len() < 2 {
            return Err(CurveError::InsufficientPoints {
                required: 2,
                actual: points.len(),
            });
        }
        Ok(Self {
            points,
            resolution_u: Self::DEFAULT_RESOLUTION_U,
            smooth: false,
        })
    }

    /// Number of control points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a spline keeps at least two points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn resolve(&self, index: isize) -> Result<usize> {
        let len = self.points.len();
        let resolved = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs()).filter(|&i| i < len)
        };
        resolved.ok_or(CurveError::PointOutOfRange { index, len })
    }

    /// Get a control point; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::PointOutOfRange`] for an invalid index.
    pub fn point(&self, index: isize) -> Result<&BezierPoint> {
        let i = self.resolve(index)?;
        Ok(&self.points[i])
    }

    /// Get a mutable control point; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::PointOutOfRange`] for an invalid index.
    pub fn point_mut(&mut self, index: isize) -> Result<&mut BezierPoint> {
        let i = self.resolve(index)?;
        Ok(&mut self.points[i])
    }

    /// Number of cubic segments between consecutive points.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Iterate over the cubic segments.
    pub fn segments(&self) -> impl Iterator<Item = CubicBezier> + '_ {
        self.points
            .windows(2)
            .map(|w| CubicBezier::new(w[0].co, w[0].handle_right, w[1].handle_left, w[1].co))
    }

    /// Check that the spline is fit for display: finite coordinates and
    /// positive radii.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        for (index, point) in self.points.iter().enumerate() {
            if !point.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
            if point.radius <= 0.0 {
                return Err(CurveError::InvalidRadius(point.radius));
            }
        }
        Ok(())
    }

    /// Tessellate the spline into `resolution_u` samples per segment plus the
    /// final point.
    ///
    /// A resolution of zero is treated as one sample per segment.
    #[must_use]
    pub fn sample(&self) -> Vec<SplineSample> {
        let steps = self.resolution_u.max(1) as usize;
        let mut samples = Vec::with_capacity(self.segment_count() * steps + 1);

        for (seg_idx, segment) in self.segments().enumerate() {
            let r0 = self.points[seg_idx].radius;
            let r1 = self.points[seg_idx + 1].radius;
            for step in 0..steps {
                let t = step as f64 / steps as f64;
                samples.push(SplineSample {
                    position: segment.point_at(t),
                    tangent: segment.tangent_at(t),
                    radius: r0 + (r1 - r0) * t,
                });
            }
        }

        if let (Some(last_segment), Some(last_point)) = (self.segments().last(), self.points.last())
        {
            samples.push(SplineSample {
                position: last_point.co,
                tangent: last_segment.tangent_at(1.0),
                radius: last_point.radius,
            });
        }

        samples
    }

    /// Total arc length over all segments.
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.segments().map(|s| s.arc_length()).sum()
    }
}

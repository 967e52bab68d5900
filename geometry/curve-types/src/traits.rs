//! Core curve trait.

use nalgebra::{Point3, Vector3};

/// A parametric curve in 3D space, parameterized over `t ∈ [0, 1]`.
pub trait Curve {
    /// Evaluate the curve position at parameter `t`.
    fn point_at(&self, t: f64) -> Point3<f64>;

    /// First derivative (velocity) at parameter `t`.
    fn derivative_at(&self, t: f64) -> Vector3<f64>;

    /// Second derivative (acceleration) at parameter `t`.
    fn second_derivative_at(&self, t: f64) -> Vector3<f64>;

    /// Unit tangent at parameter `t`.
    ///
    /// Falls back to the second derivative where the velocity vanishes,
    /// which happens on Bézier segments whose handles collapse onto the
    /// control point.
    fn tangent_at(&self, t: f64) -> Vector3<f64> {
        let d = self.derivative_at(t);
        if let Some(tangent) = d.try_normalize(1e-10) {
            return tangent;
        }
        self.second_derivative_at(t)
            .try_normalize(1e-10)
            .unwrap_or_else(Vector3::x)
    }

    /// Total arc length, integrated with adaptive Simpson's rule.
    fn arc_length(&self) -> f64 {
        adaptive_arc_length(self, 0.0, 1.0, 1e-10, 20)
    }

    /// Start point (`t = 0`).
    fn start(&self) -> Point3<f64> {
        self.point_at(0.0)
    }

    /// End point (`t = 1`).
    fn end(&self) -> Point3<f64> {
        self.point_at(1.0)
    }
}

fn adaptive_arc_length<C: Curve + ?Sized>(
    curve: &C,
    a: f64,
    b: f64,
    tolerance: f64,
    max_depth: usize,
) -> f64 {
    fn simpson_step<C: Curve + ?Sized>(curve: &C, a: f64, b: f64) -> f64 {
        let mid = (a + b) / 2.0;
        (b - a) / 6.0
            * (curve.derivative_at(a).norm()
                + 4.0 * curve.derivative_at(mid).norm()
                + curve.derivative_at(b).norm())
    }

    fn refine<C: Curve + ?Sized>(
        curve: &C,
        a: f64,
        b: f64,
        tolerance: f64,
        whole: f64,
        depth: usize,
    ) -> f64 {
        let mid = (a + b) / 2.0;
        let left = simpson_step(curve, a, mid);
        let right = simpson_step(curve, mid, b);
        let combined = left + right;

        if depth == 0 || (combined - whole).abs() < 15.0 * tolerance {
            combined + (combined - whole) / 15.0
        } else {
            refine(curve, a, mid, tolerance / 2.0, left, depth - 1)
                + refine(curve, mid, b, tolerance / 2.0, right, depth - 1)
        }
    }

    let whole = simpson_step(curve, a, b);
    refine(curve, a, b, tolerance, whole, max_depth)
}

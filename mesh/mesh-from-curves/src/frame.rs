//! Rotation-minimizing frames along a sampled curve.

use nalgebra::{UnitVector3, Vector3};

/// An orthonormal frame at a curve sample.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Direction of travel.
    pub tangent: Vector3<f64>,
    /// First cross-section axis.
    pub normal: Vector3<f64>,
    /// Second cross-section axis, `tangent × normal`.
    pub binormal: Vector3<f64>,
}

impl Frame {
    /// Build a frame around a tangent, picking a stable perpendicular normal.
    #[must_use]
    pub fn from_tangent(tangent: Vector3<f64>) -> Self {
        let tangent = tangent.try_normalize(f64::EPSILON).unwrap_or(Vector3::z());
        let normal = find_perpendicular(tangent);
        Self {
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        }
    }

    /// Point on the cross-section circle at `angle` with the given radius,
    /// relative to the frame origin.
    #[must_use]
    pub fn ring_offset(&self, angle: f64, radius: f64) -> Vector3<f64> {
        (self.normal * angle.cos() + self.binormal * angle.sin()) * radius
    }

    /// Carry this frame onto a new tangent with the minimal rotation.
    #[must_use]
    pub fn transported_to(&self, new_tangent: Vector3<f64>) -> Self {
        let new_tangent = new_tangent
            .try_normalize(f64::EPSILON)
            .unwrap_or(self.tangent);
        let axis = self.tangent.cross(&new_tangent);

        let Some(axis) = UnitVector3::try_new(axis, f64::EPSILON) else {
            // Parallel or anti-parallel tangents
            let sign = if self.tangent.dot(&new_tangent) >= 0.0 { 1.0 } else { -1.0 };
            return Self {
                tangent: new_tangent,
                normal: self.normal * sign,
                binormal: new_tangent.cross(&(self.normal * sign)),
            };
        };

        let angle = self.tangent.dot(&new_tangent).clamp(-1.0, 1.0).acos();
        let k = axis.into_inner();
        let (sin_a, cos_a) = angle.sin_cos();
        // Rodrigues rotation
        let normal = self.normal * cos_a
            + k.cross(&self.normal) * sin_a
            + k * k.dot(&self.normal) * (1.0 - cos_a);

        Self {
            tangent: new_tangent,
            normal,
            binormal: new_tangent.cross(&normal),
        }
    }
}

fn find_perpendicular(v: Vector3<f64>) -> Vector3<f64> {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
    let axis = if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&axis)
        .try_normalize(f64::EPSILON)
        .unwrap_or(Vector3::y())
}

/// Parallel-transport a frame along a sequence of tangents.
///
/// Returns one frame per tangent; empty input gives no frames.
#[must_use]
pub fn parallel_transport_frames(tangents: &[Vector3<f64>]) -> Vec<Frame> {
    let Some(&first) = tangents.first() else {
        return Vec::new();
    };
    let mut frames = Vec::with_capacity(tangents.len());
    let mut current = Frame::from_tangent(first);
    frames.push(current);
    for &tangent in &tangents[1..] {
        current = current.transported_to(tangent);
        frames.push(current);
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_orthonormal(frame: &Frame) {
        assert_relative_eq!(frame.tangent.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(frame.normal.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(frame.binormal.norm(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(frame.tangent.dot(&frame.normal), 0.0, epsilon = 1e-10);
        assert_relative_eq!(frame.tangent.dot(&frame.binormal), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn from_tangent_is_orthonormal() {
        for t in [Vector3::x(), Vector3::y(), Vector3::z(), Vector3::new(1.0, 2.0, 3.0)] {
            assert_orthonormal(&Frame::from_tangent(t));
        }
    }

    #[test]
    fn straight_line_keeps_normal() {
        let frames = parallel_transport_frames(&[Vector3::x(); 4]);
        assert_eq!(frames.len(), 4);
        for f in &frames {
            assert_relative_eq!(f.normal, frames[0].normal, epsilon = 1e-12);
        }
    }

    #[test]
    fn quarter_turn_stays_orthonormal() {
        let tangents = [
            Vector3::x(),
            Vector3::new(1.0, 1.0, 0.0).normalize(),
            Vector3::y(),
        ];
        let frames = parallel_transport_frames(&tangents);
        for f in &frames {
            assert_orthonormal(f);
        }
        assert_relative_eq!(frames[2].tangent, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn reversal_flips_normal() {
        let frames = parallel_transport_frames(&[Vector3::z(), -Vector3::z()]);
        assert_relative_eq!(frames[1].normal, -frames[0].normal, epsilon = 1e-12);
        assert_orthonormal(&frames[1]);
    }

    #[test]
    fn empty_input() {
        assert!(parallel_transport_frames(&[]).is_empty());
    }

    #[test]
    fn ring_offset_has_radius() {
        let f = Frame::from_tangent(Vector3::z());
        assert_relative_eq!(f.ring_offset(0.7, 2.5).norm(), 2.5, epsilon = 1e-12);
        assert_relative_eq!(f.ring_offset(0.7, 2.5).dot(&f.tangent), 0.0, epsilon = 1e-12);
    }
}

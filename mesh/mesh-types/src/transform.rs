//! Object-to-world transforms.

use nalgebra::{Matrix4, Point3, Vector3, Vector4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An affine object-to-world transform stored as a 4x4 matrix.
///
/// Non-uniform scale is allowed, which is why normals go through
/// [`Transform3D::transform_normal`] rather than [`Transform3D::transform_vector`].
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Transform3D};
///
/// let world = Transform3D::translation(1.0, 0.0, 0.0).then(&Transform3D::uniform_scale(2.0));
/// let p = world.transform_point(&Point3::new(1.0, 0.0, 0.0));
/// assert!((p.x - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform3D {
    matrix: Matrix4<f64>,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// A translation.
    #[must_use]
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self {
            matrix: Matrix4::new_translation(&Vector3::new(tx, ty, tz)),
        }
    }

    /// A uniform scale about the origin.
    #[must_use]
    pub fn uniform_scale(factor: f64) -> Self {
        Self::scale(factor, factor, factor)
    }

    /// A non-uniform scale about the origin.
    #[must_use]
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)),
        }
    }

    /// A rotation of `angle` radians about `axis`; identity for a zero axis.
    #[must_use]
    pub fn rotation_axis(axis: Vector3<f64>, angle: f64) -> Self {
        axis.try_normalize(f64::EPSILON)
            .map_or_else(Self::identity, |axis| Self {
                matrix: Matrix4::new_rotation(axis * angle),
            })
    }

    /// The underlying matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Compose: the result applies `self` first, then `other`.
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Transform a point (applies translation).
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let r = self.matrix * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(r.x, r.y, r.z)
    }

    /// Transform a direction (ignores translation).
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        let r = self.matrix * Vector4::new(vector.x, vector.y, vector.z, 0.0);
        Vector3::new(r.x, r.y, r.z)
    }

    /// Transform a surface normal by the inverse transpose of the linear part
    /// and renormalize. `None` if the matrix is singular or the result has no
    /// length.
    #[must_use]
    pub fn transform_normal(&self, normal: &Vector3<f64>) -> Option<Vector3<f64>> {
        let linear = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        linear
            .try_inverse()
            .and_then(|inv| (inv.transpose() * normal).try_normalize(f64::EPSILON))
    }
}

//! Endpoint parameter building: anchors and scales in, Bezier ends out.

use nalgebra::{Point3, Vector3};

use crate::anchor::Anchor;
use crate::error::DegenerateGeometryError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Radius controls owned by the operator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaleParameters {
    /// Global radius multiplier.
    pub main_scale: f64,
    /// Radius multiplier at the first anchor.
    pub point1_scale: f64,
    /// Radius multiplier at the second anchor.
    pub point2_scale: f64,
    /// Force both radii to `main_scale`.
    pub equal_radii: bool,
}

impl Default for ScaleParameters {
    fn default() -> Self {
        Self {
            main_scale: 1.0,
            point1_scale: 1.0,
            point2_scale: 1.0,
            equal_radii: false,
        }
    }
}

/// One Bezier end of the tube.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EndpointDescriptor {
    /// Control point.
    pub position: Point3<f64>,
    /// Left handle.
    pub handle_in: Point3<f64>,
    /// Right handle.
    pub handle_out: Point3<f64>,
    /// Radius multiplier on the bevel depth.
    pub radius: f64,
}

impl EndpointDescriptor {
    fn along_normal(
        position: Point3<f64>,
        normal: &Vector3<f64>,
        signed_ext: f64,
        radius: f64,
    ) -> Self {
        Self {
            position,
            handle_in: position - normal * signed_ext,
            handle_out: position + normal * signed_ext,
            radius,
        }
    }
}

/// Both ends plus the bevel depth they are relative to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoints {
    /// Ends in anchor order.
    pub endpoints: [EndpointDescriptor; 2],
    /// Reference length of the first anchor.
    pub bevel_depth: f64,
}

/// Ratio of the second anchor's reference length to the first.
///
/// # Errors
///
/// Returns [`DegenerateGeometryError::ZeroReferenceLength`] when the first
/// anchor's length is zero or not finite.
pub fn scale_ratio(anchor0: &Anchor, anchor1: &Anchor) -> Result<f64, DegenerateGeometryError> {
    if !anchor0.has_usable_length() {
        return Err(DegenerateGeometryError::ZeroReferenceLength {
            anchor: 0,
            length: anchor0.reference_length,
        });
    }
    Ok(anchor1.reference_length / anchor0.reference_length)
}

/// Build both Bezier ends.
///
/// The first end's handles run `position ∓ normal * handle_ext_1`; the second
/// end mirrors the sign so both handles lean into the tube body. Pure: equal
/// inputs give bit-identical output.
///
/// # Errors
///
/// Returns [`DegenerateGeometryError::ZeroReferenceLength`] when either
/// anchor's reference length is zero or not finite.
///
/// # Example
///
/// ```
/// use nalgebra::{Point3, Vector3};
/// use tube_tool::{build_endpoints, Anchor, ScaleParameters};
///
/// let a = Anchor::new(Point3::origin(), Vector3::z(), 1.0);
/// let b = Anchor::new(Point3::new(0.0, 0.0, 5.0), -Vector3::z(), 2.0);
/// let ends = build_endpoints(&a, &b, &ScaleParameters::default(), 2.0, 2.0)?;
///
/// assert_eq!(ends.bevel_depth, 1.0);
/// assert_eq!(ends.endpoints[1].radius, 2.0);
/// assert_eq!(ends.endpoints[1].handle_in, Point3::new(0.0, 0.0, 3.0));
/// # Ok::<(), tube_tool::DegenerateGeometryError>(())
/// ```
pub fn build_endpoints(
    anchor0: &Anchor,
    anchor1: &Anchor,
    scale: &ScaleParameters,
    handle_ext_1: f64,
    handle_ext_2: f64,
) -> Result<Endpoints, DegenerateGeometryError> {
    let ratio = scale_ratio(anchor0, anchor1)?;
    if !anchor1.has_usable_length() {
        return Err(DegenerateGeometryError::ZeroReferenceLength {
            anchor: 1,
            length: anchor1.reference_length,
        });
    }

    let (radius0, radius1) = if scale.equal_radii {
        (scale.main_scale, scale.main_scale)
    } else {
        (
            scale.main_scale * scale.point1_scale,
            ratio * scale.main_scale * scale.point2_scale,
        )
    };

    Ok(Endpoints {
        endpoints: [
            EndpointDescriptor::along_normal(
                anchor0.position,
                &anchor0.normal,
                handle_ext_1,
                radius0,
            ),
            EndpointDescriptor::along_normal(
                anchor1.position,
                &anchor1.normal,
                -handle_ext_2,
                radius1,
            ),
        ],
        bevel_depth: anchor0.reference_length,
    })
}

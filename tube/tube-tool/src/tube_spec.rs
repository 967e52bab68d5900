//! The derived description of a tube, applied to its curve in one step.

use curve_types::{BezierPoint, BezierSpline, CurveError};
use tracing::debug;

use crate::anchor::Anchor;
use crate::endpoint::{build_endpoints, EndpointDescriptor};
use crate::error::DegenerateGeometryError;
use crate::orientation::{Orientation, SplineSlot};
use crate::settings::TubeSettings;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything the curve object needs for one recompute.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TubeSpec {
    /// Ends in anchor order.
    pub endpoints: [EndpointDescriptor; 2],
    /// Global bevel depth, the first anchor's reference length.
    pub bevel_depth: f64,
    /// Profile subdivision.
    pub bevel_resolution: u32,
    /// Samples per spline segment.
    pub u_resolution: u32,
    /// Smooth shading.
    pub smooth: bool,
    /// Slot placement of the ends.
    pub orientation: Orientation,
}

impl TubeSpec {
    /// Build a spec from two anchors and the live settings.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateGeometryError::ZeroReferenceLength`] when either
    /// anchor cannot scale a radius.
    pub fn build(
        anchors: &[Anchor; 2],
        settings: &TubeSettings,
    ) -> Result<Self, DegenerateGeometryError> {
        let ends = build_endpoints(
            &anchors[0],
            &anchors[1],
            &settings.scale_parameters(),
            settings.handle_ext_1,
            settings.handle_ext_2,
        )?;
        debug!(
            "Built tube spec: bevel depth {:.4}, radii {:.4} / {:.4}",
            ends.bevel_depth, ends.endpoints[0].radius, ends.endpoints[1].radius
        );
        Ok(Self {
            endpoints: ends.endpoints,
            bevel_depth: ends.bevel_depth,
            bevel_resolution: settings.bevel_resolution,
            u_resolution: settings.u_resolution,
            smooth: settings.smooth,
            orientation: settings.orientation(),
        })
    }

    /// The endpoint written to `slot`.
    #[must_use]
    pub fn endpoint_at(&self, slot: SplineSlot) -> &EndpointDescriptor {
        if slot == self.orientation.slots()[0] {
            &self.endpoints[0]
        } else {
            &self.endpoints[1]
        }
    }

    /// Endpoints in spline order, point 0 first.
    #[must_use]
    pub fn spline_order(&self) -> [EndpointDescriptor; 2] {
        self.orientation.to_spline_order(self.endpoints)
    }

    /// Write both ends into `spline` and set its tessellation.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError`] when the spline has no point for a slot.
    pub fn write_to(&self, spline: &mut BezierSpline) -> Result<(), CurveError> {
        for (endpoint, slot) in self.endpoints.iter().zip(self.orientation.slots()) {
            *spline.point_mut(slot.index())? = BezierPoint {
                co: endpoint.position,
                handle_left: endpoint.handle_in,
                handle_right: endpoint.handle_out,
                radius: endpoint.radius,
            };
        }
        spline.resolution_u = self.u_resolution;
        spline.smooth = self.smooth;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    fn anchors() -> [Anchor; 2] {
        [
            Anchor::new(Point3::origin(), Vector3::z(), 1.0),
            Anchor::new(Point3::new(0.0, 0.0, 5.0), -Vector3::z(), 2.0),
        ]
    }

    #[test]
    fn carries_settings() {
        let settings = TubeSettings::new().with_resolution(2, 7).with_smooth(true);
        let spec = TubeSpec::build(&anchors(), &settings).unwrap_or_else(|e| panic!("{e}"));
        assert_relative_eq!(spec.bevel_depth, 1.0);
        assert_eq!(spec.bevel_resolution, 2);
        assert_eq!(spec.u_resolution, 7);
        assert!(spec.smooth);
    }

    #[test]
    fn flip_v_writes_anchor_zero_last() {
        let settings = TubeSettings::new().with_flips(false, true);
        let spec = TubeSpec::build(&anchors(), &settings).unwrap_or_else(|e| panic!("{e}"));
        let mut spline = BezierSpline::with_point_count(2).unwrap_or_else(|e| panic!("{e}"));
        spec.write_to(&mut spline).unwrap_or_else(|e| panic!("{e}"));

        let last = spline.point(-1).unwrap_or_else(|e| panic!("{e}"));
        assert_relative_eq!(last.co, Point3::origin());
        assert_relative_eq!(last.handle_left, Point3::new(0.0, 0.0, -2.0));
        let first = spline.point(0).unwrap_or_else(|e| panic!("{e}"));
        assert_relative_eq!(first.radius, 2.0);
        assert_eq!(spec.endpoint_at(SplineSlot::First), &spec.endpoints[1]);
        assert_eq!(spec.spline_order()[0], spec.endpoints[1]);
    }

    #[test]
    fn last_slot_is_last_point() {
        let spec =
            TubeSpec::build(&anchors(), &TubeSettings::default()).unwrap_or_else(|e| panic!("{e}"));
        let mut spline = BezierSpline::with_point_count(3).unwrap_or_else(|e| panic!("{e}"));
        spec.write_to(&mut spline).unwrap_or_else(|e| panic!("{e}"));
        assert_relative_eq!(spline.point(2).unwrap_or_else(|e| panic!("{e}")).co.z, 5.0);
        assert_eq!(spline.resolution_u, 12);
    }
}

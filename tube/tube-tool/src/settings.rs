//! Live operator settings for a tube.

use std::ops::RangeInclusive;

use crate::anchor::ExtractOptions;
use crate::endpoint::ScaleParameters;
use crate::orientation::Orientation;

#[cfg(feature = "serde")]
use crate::error::{TubeError, TubeResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Range of the profile subdivision ("V" resolution).
pub const BEVEL_RESOLUTION_RANGE: RangeInclusive<u32> = 0..=16;
/// Range of the per-segment sample count ("U" resolution).
pub const U_RESOLUTION_RANGE: RangeInclusive<u32> = 0..=30;
/// Range of both handle extensions.
pub const HANDLE_EXT_RANGE: RangeInclusive<f64> = -8.0..=8.0;
/// Range of the three radius scales.
pub const SCALE_RANGE: RangeInclusive<f64> = 0.0001..=5.0;

/// Space of the anchor normal in two-object vertex mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VertexNormalSpace {
    /// Keep the object-space normal.
    #[default]
    Local,
    /// Transform the normal by the inverse transpose of the object matrix.
    World,
}

/// Operator state that persists across recomputes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TubeSettings {
    /// Name the curve object is derived from.
    pub base_name: String,
    /// Profile subdivision of the bevel.
    pub bevel_resolution: u32,
    /// Samples per spline segment.
    pub u_resolution: u32,
    /// Handle length at the first anchor.
    pub handle_ext_1: f64,
    /// Handle length at the second anchor.
    pub handle_ext_2: f64,
    /// Global radius multiplier.
    pub main_scale: f64,
    /// Radius multiplier at the first anchor.
    pub point1_scale: f64,
    /// Radius multiplier at the second anchor.
    pub point2_scale: f64,
    /// Force both radii to `main_scale`.
    pub equal_radii: bool,
    /// Smooth shading.
    pub smooth: bool,
    /// Draw the curve wireframe.
    pub show_wire: bool,
    /// Swap which physical anchor is first.
    pub flip_u: bool,
    /// Swap which spline slot each anchor is written to.
    pub flip_v: bool,
    /// Normal space for two-object vertex mode.
    pub vertex_normal_space: VertexNormalSpace,
}

impl Default for TubeSettings {
    fn default() -> Self {
        Self {
            base_name: "TT_tube".to_owned(),
            bevel_resolution: 4,
            u_resolution: 12,
            handle_ext_1: 2.0,
            handle_ext_2: 2.0,
            main_scale: 1.0,
            point1_scale: 1.0,
            point2_scale: 1.0,
            equal_radii: false,
            smooth: false,
            show_wire: false,
            flip_u: false,
            flip_v: false,
            vertex_normal_space: VertexNormalSpace::Local,
        }
    }
}

impl TubeSettings {
    /// Create settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base name.
    #[must_use]
    pub fn with_base_name(mut self, name: impl Into<String>) -> Self {
        self.base_name = name.into();
        self
    }

    /// Set both handle extensions.
    #[must_use]
    pub const fn with_handle_ext(mut self, first: f64, second: f64) -> Self {
        self.handle_ext_1 = first;
        self.handle_ext_2 = second;
        self
    }

    /// Set the radius scales.
    #[must_use]
    pub const fn with_scales(mut self, main: f64, point1: f64, point2: f64) -> Self {
        self.main_scale = main;
        self.point1_scale = point1;
        self.point2_scale = point2;
        self
    }

    /// Set whether both radii equal `main_scale`.
    #[must_use]
    pub const fn with_equal_radii(mut self, equal: bool) -> Self {
        self.equal_radii = equal;
        self
    }

    /// Set the flip toggles.
    #[must_use]
    pub const fn with_flips(mut self, flip_u: bool, flip_v: bool) -> Self {
        self.flip_u = flip_u;
        self.flip_v = flip_v;
        self
    }

    /// Set the bevel and sample resolutions.
    #[must_use]
    pub const fn with_resolution(mut self, bevel: u32, u: u32) -> Self {
        self.bevel_resolution = bevel;
        self.u_resolution = u;
        self
    }

    /// Set smooth shading.
    #[must_use]
    pub const fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    /// Set the two-object vertex normal space.
    #[must_use]
    pub const fn with_vertex_normal_space(mut self, space: VertexNormalSpace) -> Self {
        self.vertex_normal_space = space;
        self
    }

    /// Clamp every numeric field into its host range. Non-finite values
    /// fall back to the default.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.bevel_resolution = clamp_u32(self.bevel_resolution, &BEVEL_RESOLUTION_RANGE);
        self.u_resolution = clamp_u32(self.u_resolution, &U_RESOLUTION_RANGE);
        self.handle_ext_1 = clamp_f64(self.handle_ext_1, defaults.handle_ext_1, &HANDLE_EXT_RANGE);
        self.handle_ext_2 = clamp_f64(self.handle_ext_2, defaults.handle_ext_2, &HANDLE_EXT_RANGE);
        self.main_scale = clamp_f64(self.main_scale, defaults.main_scale, &SCALE_RANGE);
        self.point1_scale = clamp_f64(self.point1_scale, defaults.point1_scale, &SCALE_RANGE);
        self.point2_scale = clamp_f64(self.point2_scale, defaults.point2_scale, &SCALE_RANGE);
        if self.base_name.is_empty() {
            self.base_name = defaults.base_name;
        }
        self
    }

    /// The radius inputs of the endpoint builder.
    #[must_use]
    pub const fn scale_parameters(&self) -> ScaleParameters {
        ScaleParameters {
            main_scale: self.main_scale,
            point1_scale: self.point1_scale,
            point2_scale: self.point2_scale,
            equal_radii: self.equal_radii,
        }
    }

    /// The flip toggles.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        Orientation {
            flip_u: self.flip_u,
            flip_v: self.flip_v,
        }
    }

    /// How anchors are read from the selection.
    #[must_use]
    pub const fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            flip_u: self.flip_u,
            vertex_normal_space: self.vertex_normal_space,
        }
    }

    /// Load a JSON preset. Missing fields take their defaults and the result
    /// is sanitized.
    ///
    /// # Errors
    ///
    /// Returns [`TubeError::Preset`] when the text is not a valid preset.
    ///
    /// # Example
    ///
    /// ```
    /// use tube_tool::TubeSettings;
    ///
    /// let settings = TubeSettings::from_json(r#"{ "main_scale": 9.0, "flip_v": true }"#)?;
    /// assert_eq!(settings.main_scale, 5.0);
    /// assert!(settings.flip_v);
    /// assert_eq!(settings.u_resolution, 12);
    /// # Ok::<(), tube_tool::TubeError>(())
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> TubeResult<Self> {
        serde_json::from_str::<Self>(text)
            .map(Self::sanitized)
            .map_err(|e| TubeError::Preset(e.to_string()))
    }

    /// Serialize to a JSON preset.
    ///
    /// # Errors
    ///
    /// Returns [`TubeError::Preset`] if serialization fails.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> TubeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TubeError::Preset(e.to_string()))
    }
}

fn clamp_u32(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

fn clamp_f64(value: f64, fallback: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_operator() {
        let s = TubeSettings::default();
        assert_eq!(s.base_name, "TT_tube");
        assert_eq!(s.bevel_resolution, 4);
        assert_eq!(s.u_resolution, 12);
        assert_relative_eq!(s.handle_ext_1, 2.0);
        assert_relative_eq!(s.point2_scale, 1.0);
        assert!(!s.equal_radii);
        assert_eq!(s.vertex_normal_space, VertexNormalSpace::Local);
    }

    #[test]
    fn sanitized_clamps() {
        let s = TubeSettings::new()
            .with_resolution(40, 99)
            .with_handle_ext(-20.0, f64::NAN)
            .with_scales(0.0, 7.0, 1.5)
            .with_base_name("")
            .sanitized();
        assert_eq!(s.bevel_resolution, 16);
        assert_eq!(s.u_resolution, 30);
        assert_relative_eq!(s.handle_ext_1, -8.0);
        assert_relative_eq!(s.handle_ext_2, 2.0);
        assert_relative_eq!(s.main_scale, 0.0001);
        assert_relative_eq!(s.point1_scale, 5.0);
        assert_relative_eq!(s.point2_scale, 1.5);
        assert_eq!(s.base_name, "TT_tube");
    }

    #[test]
    fn views() {
        let s = TubeSettings::new().with_flips(true, false).with_equal_radii(true);
        assert!(s.scale_parameters().equal_radii);
        assert!(s.orientation().flip_u);
        assert!(!s.orientation().flip_v);
        assert!(s.extract_options().flip_u);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_preset() {
        let s = TubeSettings::new()
            .with_smooth(true)
            .with_vertex_normal_space(VertexNormalSpace::World);
        let text = s.to_json().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(TubeSettings::from_json(&text), Ok(s));
        assert!(matches!(TubeSettings::from_json("[1, 2"), Err(TubeError::Preset(_))));
    }
}

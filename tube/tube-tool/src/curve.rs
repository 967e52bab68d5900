//! Host objects the tube writes to: the bevelled curve and its baked mesh.

use curve_types::{BezierSpline, CurveError};
use mesh_from_curves::{bake_bevelled_spline, BakeResult, BevelConfig};
use mesh_types::{IndexedMesh, Transform3D};

use crate::tube_spec::TubeSpec;

/// Prefix of the baked mesh name.
pub const BAKED_PREFIX: &str = "MESHED_";

/// A curve object holding one two-point bevelled spline.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveObject {
    /// Object name.
    pub name: String,
    /// The tube's spline. Always two points.
    pub spline: BezierSpline,
    /// Base cross-section radius.
    pub bevel_depth: f64,
    /// Profile subdivision.
    pub bevel_resolution: u32,
    /// Fill the full round profile.
    pub full_fill: bool,
    /// Draw the wireframe.
    pub show_wire: bool,
    /// Hidden after finalize.
    pub hidden: bool,
    /// Object-to-world transform.
    pub world: Transform3D,
}

impl CurveObject {
    /// Create an empty two-point curve.
    ///
    /// # Errors
    ///
    /// Propagates spline construction errors.
    pub fn new(name: impl Into<String>, world: Transform3D) -> Result<Self, CurveError> {
        Ok(Self {
            name: name.into(),
            spline: BezierSpline::with_point_count(2)?,
            bevel_depth: 0.0,
            bevel_resolution: 0,
            full_fill: true,
            show_wire: false,
            hidden: false,
            world,
        })
    }

    /// Write a [`TubeSpec`]. The curve is untouched when this fails.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError`] when the written spline is invalid.
    pub fn apply(&mut self, spec: &TubeSpec) -> Result<(), CurveError> {
        let mut spline = self.spline.clone();
        spec.write_to(&mut spline)?;
        spline.validate()?;
        self.spline = spline;
        self.bevel_depth = spec.bevel_depth;
        self.bevel_resolution = spec.bevel_resolution;
        Ok(())
    }

    /// Bevel settings for baking.
    #[must_use]
    pub fn bevel_config(&self) -> BevelConfig {
        BevelConfig::default()
            .with_depth(self.bevel_depth)
            .with_resolution(self.bevel_resolution)
    }

    /// Bake into a standalone mesh. Does not hide the curve.
    ///
    /// # Errors
    ///
    /// Returns an error when the curve cannot be tessellated.
    pub fn bake(&self) -> BakeResult<BakedMesh> {
        let mesh = bake_bevelled_spline(&self.spline, &self.bevel_config())?;
        Ok(BakedMesh {
            name: format!("{BAKED_PREFIX}{}", self.name),
            mesh,
            world: self.world,
        })
    }
}

/// The static mesh produced by finalizing a tube.
#[derive(Debug, Clone, PartialEq)]
pub struct BakedMesh {
    /// `MESHED_` + curve name.
    pub name: String,
    /// Triangulated tube.
    pub mesh: IndexedMesh,
    /// Copied from the curve.
    pub world: Transform3D,
}

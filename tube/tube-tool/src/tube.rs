//! A live tube: fixed mode, operator settings and the curve it drives.

use mesh_types::{MeshTopology, Transform3D};
use tracing::{debug, info, warn};

use crate::action::{ActionOutcome, ResettableProperty, TubeAction};
use crate::anchor::extract_anchors;
use crate::curve::{BakedMesh, CurveObject};
use crate::error::TubeResult;
use crate::selection::{EditSelection, SelectionMode};
use crate::settings::TubeSettings;
use crate::tube_spec::TubeSpec;

/// One tube and the curve object it owns.
///
/// The selection mode is classified once by [`Tube::create`] and stays with
/// the tube until it is dropped.
///
/// # Example
///
/// ```
/// use mesh_types::{MeshObject, PolyMesh};
/// use tube_tool::{EditSelection, SelectionMode, Tube, TubeAction, TubeSettings};
///
/// let mut mesh = PolyMesh::from_pydata(
///     &[
///         [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0],
///         [0.0, 0.0, 3.0], [1.0, 0.0, 3.0], [1.0, 1.0, 3.0], [0.0, 1.0, 3.0],
///     ],
///     &[],
///     &[vec![0, 1, 2, 3], vec![4, 5, 6, 7]],
/// )?;
/// mesh.select_face(0)?;
/// mesh.select_face(1)?;
/// let selection = EditSelection::single(MeshObject::new("Slab", mesh));
///
/// let mut tube = Tube::create("Obj_TT_tube", &selection, TubeSettings::default())?;
/// assert_eq!(tube.mode(), SelectionMode::SingleObjectTwoFaces);
///
/// tube.settings_mut().main_scale = 2.0;
/// tube.dispatch(TubeAction::Recompute, &selection)?;
/// assert_eq!(tube.revision(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Tube {
    name: String,
    mode: SelectionMode,
    settings: TubeSettings,
    curve: CurveObject,
    spec: TubeSpec,
    revision: u64,
}

impl Tube {
    /// Classify `selection`, derive the first [`TubeSpec`] and create the curve.
    /// Nothing is created when any step fails.
    ///
    /// # Errors
    ///
    /// Returns the selection, geometry or curve error that stopped creation.
    pub fn create(
        name: impl Into<String>,
        selection: &EditSelection,
        settings: TubeSettings,
    ) -> TubeResult<Self> {
        let name = name.into();
        match Self::try_create(name.clone(), selection, settings) {
            Ok(tube) => {
                info!("Created tube '{}' ({})", tube.name, tube.mode);
                Ok(tube)
            }
            Err(e) => {
                warn!("Tube '{}' was not created: {}", name, e);
                Err(e)
            }
        }
    }

    fn try_create(
        name: String,
        selection: &EditSelection,
        settings: TubeSettings,
    ) -> TubeResult<Self> {
        let settings = settings.sanitized();
        let mode = SelectionMode::classify(selection)?;
        let spec = derive_spec(mode, selection, &settings)?;

        let mut curve = CurveObject::new(name.clone(), curve_transform(mode, selection)?)?;
        curve.apply(&spec)?;
        curve.show_wire = settings.show_wire;

        Ok(Self {
            name,
            mode,
            settings,
            curve,
            spec,
            revision: 1,
        })
    }

    /// Tube name, also the curve object's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mode fixed at creation.
    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Live operator settings.
    #[must_use]
    pub const fn settings(&self) -> &TubeSettings {
        &self.settings
    }

    /// Mutable operator settings. Changes take effect on the next recompute.
    pub fn settings_mut(&mut self) -> &mut TubeSettings {
        &mut self.settings
    }

    /// The curve object.
    #[must_use]
    pub const fn curve(&self) -> &CurveObject {
        &self.curve
    }

    /// Last successfully applied [`TubeSpec`].
    #[must_use]
    pub const fn spec(&self) -> &TubeSpec {
        &self.spec
    }

    /// Number of times the curve was rewritten, creation included.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Re-derive the tube from the live selection and settings.
    ///
    /// On failure the curve and the last good [`TubeSpec`] are kept.
    ///
    /// # Errors
    ///
    /// Returns the selection, geometry or curve error that stopped the update.
    pub fn recompute(&mut self, selection: &EditSelection) -> TubeResult<&TubeSpec> {
        self.settings = self.settings.clone().sanitized();
        match self.try_recompute(selection) {
            Ok(()) => Ok(&self.spec),
            Err(e) => {
                warn!("Tube '{}' kept its last shape: {}", self.name, e);
                Err(e)
            }
        }
    }

    fn try_recompute(&mut self, selection: &EditSelection) -> TubeResult<()> {
        let spec = derive_spec(self.mode, selection, &self.settings)?;

        let mut curve = self.curve.clone();
        curve.world = curve_transform(self.mode, selection)?;
        curve.apply(&spec)?;
        curve.show_wire = self.settings.show_wire;

        self.curve = curve;
        self.spec = spec;
        self.revision += 1;
        debug!(
            "Tube '{}' at revision {}, length {:.4}",
            self.name,
            self.revision,
            self.curve.spline.arc_length()
        );
        Ok(())
    }

    /// Run one action. Resets and recomputes rewrite the curve exactly once.
    ///
    /// # Errors
    ///
    /// Returns the error of the recompute or bake the action ran.
    pub fn dispatch(
        &mut self,
        action: TubeAction,
        selection: &EditSelection,
    ) -> TubeResult<ActionOutcome> {
        match action {
            TubeAction::Recompute => {}
            TubeAction::Reset(property) => {
                debug!("Resetting {} on '{}'", property, self.name);
                property.apply_default(&mut self.settings);
            }
            TubeAction::ResetRadii => {
                debug!("Resetting radii on '{}'", self.name);
                for property in ResettableProperty::RADII {
                    property.apply_default(&mut self.settings);
                }
            }
            TubeAction::Finalize => return self.finalize().map(ActionOutcome::Finalized),
        }
        self.recompute(selection)?;
        Ok(ActionOutcome::Updated)
    }

    /// Bake the curve into a mesh and hide the curve.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TubeError::Bake`] when the curve cannot be baked; the
    /// curve stays visible.
    pub fn finalize(&mut self) -> TubeResult<BakedMesh> {
        let baked = self.curve.bake()?;
        self.curve.hidden = true;
        info!(
            "Finalized tube '{}' into '{}' ({} faces)",
            self.name,
            baked.name,
            baked.mesh.face_count()
        );
        Ok(baked)
    }
}

fn derive_spec(
    mode: SelectionMode,
    selection: &EditSelection,
    settings: &TubeSettings,
) -> TubeResult<TubeSpec> {
    let anchors = extract_anchors(mode, selection, settings.extract_options())?;
    Ok(TubeSpec::build(&anchors, settings)?)
}

/// Single-object curves share their object's transform; two-object curves
/// live in world space.
fn curve_transform(mode: SelectionMode, selection: &EditSelection) -> TubeResult<Transform3D> {
    let objects = selection.objects_for(mode)?;
    Ok(if mode.is_world_space() {
        Transform3D::identity()
    } else {
        objects[0].world
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DegenerateGeometryError, SelectionError, TubeError};
    use approx::assert_relative_eq;
    use mesh_types::{MeshObject, PolyMesh};
    use nalgebra::Point3;

    fn slab() -> PolyMesh {
        PolyMesh::from_pydata(
            &[
                [0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 4.0],
                [1.0, 0.0, 4.0],
                [1.0, 1.0, 4.0],
                [0.0, 1.0, 4.0],
            ],
            &[],
            &[vec![0, 1, 2, 3], vec![4, 5, 6, 7]],
        )
        .unwrap_or_else(|e| panic!("{e}"))
    }

    fn two_face_selection(world: Transform3D) -> EditSelection {
        let mut mesh = slab();
        mesh.select_face(0).unwrap_or_else(|e| panic!("{e}"));
        mesh.select_face(1).unwrap_or_else(|e| panic!("{e}"));
        EditSelection::single(MeshObject::new("Slab", mesh).with_world(world))
    }

    #[test]
    fn single_object_curve_copies_transform() {
        let world = Transform3D::translation(0.0, 3.0, 0.0);
        let tube = Tube::create("Obj_TT_tube", &two_face_selection(world), TubeSettings::default())
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(tube.curve().world, world);
        assert_relative_eq!(tube.curve().bevel_depth, 0.5_f64.sqrt());
        let first = tube.curve().spline.point(0).unwrap_or_else(|e| panic!("{e}"));
        assert_relative_eq!(first.co, Point3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn failed_create_builds_nothing() {
        let mut mesh = slab();
        mesh.select_vertex(0).unwrap_or_else(|e| panic!("{e}"));
        let sel = EditSelection::single(MeshObject::new("Slab", mesh));
        assert!(matches!(
            Tube::create("t", &sel, TubeSettings::default()),
            Err(TubeError::Selection(SelectionError::NotEnoughSelected { .. }))
        ));
    }

    #[test]
    fn failed_recompute_keeps_last_good() {
        let mut sel = two_face_selection(Transform3D::identity());
        let mut tube =
            Tube::create("t", &sel, TubeSettings::default()).unwrap_or_else(|e| panic!("{e}"));
        let curve = tube.curve().clone();
        let spec = *tube.spec();

        // Collapse the first face onto a point.
        if let Some(obj) = sel.object_mut("Slab") {
            for v in &mut obj.mesh.vertices[0..4] {
                v.position = Point3::origin();
            }
        }
        let err = tube.dispatch(TubeAction::Recompute, &sel);
        assert!(matches!(
            err,
            Err(TubeError::DegenerateGeometry(DegenerateGeometryError::ZeroNormal { anchor: 0 }))
        ));
        assert_eq!(tube.curve(), &curve);
        assert_eq!(tube.spec(), &spec);
        assert_eq!(tube.revision(), 1);
    }

    #[test]
    fn zero_length_first_anchor_keeps_last_good() {
        // Two loose edges; the selected vertices start and end the tube.
        let mut mesh = PolyMesh::from_pydata(
            &[[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 4.0, 0.0]],
            &[[0, 1], [2, 3]],
            &[],
        )
        .unwrap_or_else(|e| panic!("{e}"));
        mesh.select_vertex(0).unwrap_or_else(|e| panic!("{e}"));
        mesh.select_vertex(2).unwrap_or_else(|e| panic!("{e}"));
        let mut sel = EditSelection::single(MeshObject::new("Wires", mesh));

        let mut tube =
            Tube::create("t", &sel, TubeSettings::default()).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(tube.mode(), SelectionMode::SingleObjectTwoVertices);
        let curve = tube.curve().clone();
        let spec = *tube.spec();

        // Fold the first anchor's only edge onto it.
        if let Some(obj) = sel.object_mut("Wires") {
            obj.mesh.vertices[1].position = Point3::new(1.0, 0.0, 0.0);
        }
        assert!(matches!(
            tube.recompute(&sel),
            Err(TubeError::DegenerateGeometry(
                DegenerateGeometryError::ZeroReferenceLength { anchor: 0, .. }
            ))
        ));
        assert_eq!(tube.curve(), &curve);
        assert_eq!(tube.spec(), &spec);
        assert_eq!(tube.revision(), 1);
    }

    #[test]
    fn mode_is_fixed() {
        let sel = two_face_selection(Transform3D::identity());
        let mut tube =
            Tube::create("t", &sel, TubeSettings::default()).unwrap_or_else(|e| panic!("{e}"));

        let mut other = slab();
        other.select_face(0).unwrap_or_else(|e| panic!("{e}"));
        let mut both = sel.clone();
        both.objects.push(MeshObject::new("Other", other));

        assert!(matches!(
            tube.recompute(&both),
            Err(TubeError::Selection(SelectionError::ObjectCountMismatch {
                expected: 1,
                actual: 2,
                ..
            }))
        ));
        assert_eq!(tube.mode(), SelectionMode::SingleObjectTwoFaces);
    }

    #[test]
    fn reset_radii_restores_all_three() {
        let sel = two_face_selection(Transform3D::identity());
        let settings = TubeSettings::new().with_scales(2.0, 3.0, 4.0).with_handle_ext(1.0, 1.0);
        let mut tube = Tube::create("t", &sel, settings).unwrap_or_else(|e| panic!("{e}"));

        let outcome = tube.dispatch(TubeAction::ResetRadii, &sel).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(outcome, ActionOutcome::Updated);
        assert_relative_eq!(tube.settings().main_scale, 1.0);
        assert_relative_eq!(tube.settings().point1_scale, 1.0);
        assert_relative_eq!(tube.settings().point2_scale, 1.0);
        assert_relative_eq!(tube.settings().handle_ext_1, 1.0);
        assert_eq!(tube.revision(), 2);
        assert_relative_eq!(tube.spec().endpoints[0].radius, 1.0);
    }

    #[test]
    fn finalize_hides_curve() {
        let sel = two_face_selection(Transform3D::identity());
        let mut tube = Tube::create("Obj_TT_tube", &sel, TubeSettings::default().with_smooth(true))
            .unwrap_or_else(|e| panic!("{e}"));
        let ActionOutcome::Finalized(baked) =
            tube.dispatch(TubeAction::Finalize, &sel).unwrap_or_else(|e| panic!("{e}"))
        else {
            panic!("expected a baked mesh");
        };
        assert_eq!(baked.name, "MESHED_Obj_TT_tube");
        assert!(baked.mesh.vertices.iter().all(|v| v.normal.is_some()));
        assert!(tube.curve().hidden);
        assert_eq!(tube.revision(), 1);
    }
}

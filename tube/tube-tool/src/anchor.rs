//! Anchor extraction: one position, normal and reference length per tube end.
//!
//! All four selection modes go through [`extract_anchors`]. Single-object
//! anchors are expressed in the object's local space; two-object anchors in
//! world space.

use mesh_types::{
    newell_normal, polygon_centroid, MeshError, MeshObject, MeshTopology, Transform3D,
};
use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

use crate::error::{DegenerateGeometryError, SelectionError, SelectionTarget, TubeResult};
use crate::selection::{EditSelection, SelectionMode};
use crate::settings::VertexNormalSpace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tube end derived from selected geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor {
    /// Face centroid or vertex position.
    pub position: Point3<f64>,
    /// Unit normal.
    pub normal: Vector3<f64>,
    /// Local size estimate used to scale the tube at this end.
    pub reference_length: f64,
}

impl Anchor {
    /// Create an anchor. `normal` is used as given.
    #[must_use]
    pub const fn new(position: Point3<f64>, normal: Vector3<f64>, reference_length: f64) -> Self {
        Self {
            position,
            normal,
            reference_length,
        }
    }

    /// Whether the reference length can scale a radius.
    #[must_use]
    pub fn has_usable_length(&self) -> bool {
        self.reference_length.is_finite() && self.reference_length > 0.0
    }
}

/// Options that change how anchors are read from a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Reverse the qualifying elements (or the object order) before taking
    /// the first two.
    pub flip_u: bool,
    /// Space of the normal in two-object vertex mode.
    pub vertex_normal_space: VertexNormalSpace,
}

/// Extract the two anchors `mode` reads from `selection`.
///
/// Extra qualifying elements beyond the first two are ignored.
///
/// # Errors
///
/// Returns [`SelectionError`] when the selection does not have the shape
/// `mode` requires, and [`DegenerateGeometryError::ZeroNormal`] when an
/// anchor has no usable normal.
pub fn extract_anchors(
    mode: SelectionMode,
    selection: &EditSelection,
    options: ExtractOptions,
) -> TubeResult<[Anchor; 2]> {
    let mut objects = selection.objects_for(mode)?;

    let anchors = match mode {
        SelectionMode::SingleObjectTwoFaces | SelectionMode::SingleObjectTwoVertices => {
            let object = objects[0];
            let mut picked: Vec<usize> = if mode.uses_faces() {
                object.mesh.selected_faces().collect()
            } else {
                object.mesh.selected_vertices().collect()
            };
            if options.flip_u {
                picked.reverse();
            }
            let [first, second, ..] = picked[..] else {
                let element = if mode.uses_faces() { "faces" } else { "vertices" };
                return Err(not_enough(mode, element, 2, picked.len()).into());
            };
            if mode.uses_faces() {
                [
                    face_anchor(object, first, None, 0)?,
                    face_anchor(object, second, None, 1)?,
                ]
            } else {
                [
                    vertex_anchor(object, first, false, 0)?,
                    vertex_anchor(object, second, false, 1)?,
                ]
            }
        }
        SelectionMode::TwoObjectsFaceEach | SelectionMode::TwoObjectsVertexEach => {
            if options.flip_u {
                objects.reverse();
            }
            let mut out = [Anchor::new(Point3::origin(), Vector3::z(), 0.0); 2];
            for (slot, object) in objects.iter().enumerate() {
                out[slot] = if mode.uses_faces() {
                    let face = object
                        .mesh
                        .selected_faces()
                        .next()
                        .ok_or_else(|| not_enough(mode, "face on each object", 1, 0))?;
                    face_anchor(object, face, Some(&object.world), slot)?
                } else {
                    let vertex = object
                        .mesh
                        .selected_vertices()
                        .next()
                        .ok_or_else(|| not_enough(mode, "vertex on each object", 1, 0))?;
                    let world_normal = options.vertex_normal_space == VertexNormalSpace::World;
                    let mut anchor = vertex_anchor(object, vertex, world_normal, slot)?;
                    anchor.position = object.to_world(&anchor.position);
                    anchor
                };
            }
            out
        }
    };

    debug!(
        "Extracted anchors ({}): ref lengths {:.4} / {:.4}",
        mode, anchors[0].reference_length, anchors[1].reference_length
    );
    Ok(anchors)
}

fn not_enough(
    mode: SelectionMode,
    element: &'static str,
    required: usize,
    found: usize,
) -> SelectionError {
    SelectionError::NotEnoughSelected {
        mode: SelectionTarget::Mode(mode),
        element,
        required,
        found,
    }
}

/// Host meshes are trusted to be consistent; a dangling index is reported
/// as a selection error so the tube keeps its last shape.
fn invalid_mesh(object: &MeshObject) -> impl FnOnce(MeshError) -> SelectionError + '_ {
    move |source| {
        warn!("Mesh '{}' is inconsistent: {}", object.name, source);
        SelectionError::InvalidMesh {
            object: object.name.clone(),
            source,
        }
    }
}

/// Centroid, Newell normal and centroid-to-first-corner distance. With a
/// transform the corners are moved first, so non-uniform scale is honored.
fn face_anchor(
    object: &MeshObject,
    face: usize,
    world: Option<&Transform3D>,
    slot: usize,
) -> TubeResult<Anchor> {
    let mut corners = object.mesh.face_positions(face).map_err(invalid_mesh(object))?;
    if let Some(world) = world {
        for p in &mut corners {
            *p = world.transform_point(p);
        }
    }

    let normal =
        newell_normal(&corners).ok_or(DegenerateGeometryError::ZeroNormal { anchor: slot })?;
    // face_positions never returns an empty polygon for a valid mesh
    let centroid = polygon_centroid(&corners).unwrap_or_else(Point3::origin);
    let reference_length = corners.first().map_or(0.0, |p| (centroid - p).norm());

    Ok(Anchor::new(centroid, normal, reference_length))
}

/// Local position and half the mean incident edge length. The normal is
/// moved to world space only when `world_normal` is set.
fn vertex_anchor(
    object: &MeshObject,
    vertex: usize,
    world_normal: bool,
    slot: usize,
) -> TubeResult<Anchor> {
    let mesh = &object.mesh;
    let position = mesh
        .vertex(vertex)
        .map(|v| v.position)
        .ok_or(MeshError::VertexOutOfRange {
            index: vertex,
            count: mesh.vertex_count(),
        })
        .map_err(invalid_mesh(object))?;

    let local_normal = mesh.vertex_normal(vertex).map_err(invalid_mesh(object))?;
    let normal = if world_normal {
        local_normal.and_then(|n| object.normal_to_world(&n))
    } else {
        local_normal
    }
    .ok_or(DegenerateGeometryError::ZeroNormal { anchor: slot })?;

    let lengths = mesh.incident_edge_lengths(vertex).map_err(invalid_mesh(object))?;
    let reference_length = if lengths.is_empty() {
        0.0
    } else {
        0.5 * lengths.iter().sum::<f64>() / lengths.len() as f64
    };

    Ok(Anchor::new(position, normal, reference_length))
}

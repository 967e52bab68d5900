//! Baking bevelled Bézier splines into triangle meshes.

use curve_types::BezierSpline;
use mesh_types::{IndexedMesh, Vertex};
use nalgebra::Point3;
use tracing::debug;

use crate::error::{BakeError, BakeResult};
use crate::frame::{parallel_transport_frames, Frame};

/// Cross-section settings for baking a spline.
#[derive(Debug, Clone, PartialEq)]
pub struct BevelConfig {
    /// Base cross-section radius, multiplied by each point's radius.
    pub bevel_depth: f64,
    /// Extra profile points per quarter circle.
    pub bevel_resolution: u32,
    /// Whether to close both ends with a fan.
    pub capped: bool,
}

impl Default for BevelConfig {
    fn default() -> Self {
        Self {
            bevel_depth: 1.0,
            bevel_resolution: 4,
            capped: true,
        }
    }
}

impl BevelConfig {
    /// Set the bevel depth.
    #[must_use]
    pub fn with_depth(mut self, bevel_depth: f64) -> Self {
        self.bevel_depth = bevel_depth;
        self
    }

    /// Set the profile resolution.
    #[must_use]
    pub fn with_resolution(mut self, bevel_resolution: u32) -> Self {
        self.bevel_resolution = bevel_resolution;
        self
    }

    /// Leave the tube ends open.
    #[must_use]
    pub fn uncapped(mut self) -> Self {
        self.capped = false;
        self
    }

    /// Number of vertices around a full round profile.
    #[must_use]
    pub const fn profile_segments(&self) -> usize {
        4 + 2 * self.bevel_resolution as usize
    }
}

/// Bake a spline into a closed (or open) tube mesh.
///
/// The spline is tessellated at its own `resolution_u`; each sample becomes a
/// ring of [`BevelConfig::profile_segments`] vertices whose radius is
/// `bevel_depth * sample.radius`. Smooth splines get outward vertex normals;
/// flat ones leave normals unset so faces shade flat.
///
/// # Errors
///
/// Returns an error if the spline has a non-finite coordinate or a
/// non-positive radius, or if the bevel depth is not positive.
///
/// # Example
///
/// ```
/// use curve_types::{BezierPoint, BezierSpline};
/// use mesh_from_curves::{bake_bevelled_spline, BevelConfig};
/// use nalgebra::{Point3, Vector3};
///
/// let spline = BezierSpline::from_points(vec![
///     BezierPoint::with_aligned_handles(Point3::origin(), Vector3::z(), 1.0),
///     BezierPoint::with_aligned_handles(Point3::new(0.0, 0.0, 4.0), Vector3::z(), 1.0),
/// ])?;
///
/// let mesh = bake_bevelled_spline(&spline, &BevelConfig::default().with_depth(0.5))?;
/// assert!(!mesh.faces.is_empty());
/// # Ok::<(), mesh_from_curves::BakeError>(())
/// ```
pub fn bake_bevelled_spline(
    spline: &BezierSpline,
    config: &BevelConfig,
) -> BakeResult<IndexedMesh> {
    spline.validate()?;
    if config.bevel_depth <= 0.0 || !config.bevel_depth.is_finite() {
        return Err(BakeError::InvalidBevelDepth(config.bevel_depth));
    }

    let samples = spline.sample();
    if samples.len() < 2 {
        return Err(BakeError::TooFewSamples(samples.len()));
    }

    let tangents: Vec<_> = samples.iter().map(|s| s.tangent).collect();
    let frames = parallel_transport_frames(&tangents);

    let n_rings = samples.len();
    let n_segs = config.profile_segments();
    let mut mesh = IndexedMesh::with_capacity(n_rings * n_segs + 2, 2 * n_rings * n_segs);

    for (ring_idx, (sample, frame)) in samples.iter().zip(&frames).enumerate() {
        let radius = config.bevel_depth * sample.radius;
        for seg_idx in 0..n_segs {
            let angle = std::f64::consts::TAU * seg_idx as f64 / n_segs as f64;
            let offset = frame.ring_offset(angle, radius);
            let position = sample.position + offset;

            let vertex = if spline.smooth {
                Vertex::with_normal(position, frame.ring_offset(angle, 1.0))
            } else {
                Vertex::new(position)
            };
            mesh.vertices.push(vertex);

            if ring_idx + 1 < n_rings {
                let curr = (ring_idx * n_segs + seg_idx) as u32;
                let next_seg = (ring_idx * n_segs + (seg_idx + 1) % n_segs) as u32;
                let next_ring = ((ring_idx + 1) * n_segs + seg_idx) as u32;
                let next_both = ((ring_idx + 1) * n_segs + (seg_idx + 1) % n_segs) as u32;

                mesh.faces.push([curr, next_seg, next_ring]);
                mesh.faces.push([next_seg, next_both, next_ring]);
            }
        }
    }

    if config.capped {
        let last = n_rings - 1;
        add_cap(&mut mesh, &frames[0], samples[0].position, n_segs, 0, true, spline.smooth);
        add_cap(
            &mut mesh,
            &frames[last],
            samples[last].position,
            n_segs,
            last * n_segs,
            false,
            spline.smooth,
        );
    }

    debug!(
        "Baked spline: {} rings x {} segments -> {} vertices, {} faces",
        n_rings,
        n_segs,
        mesh.vertices.len(),
        mesh.faces.len()
    );

    Ok(mesh)
}

/// Close one end of the tube with a triangle fan around its center.
fn add_cap(
    mesh: &mut IndexedMesh,
    frame: &Frame,
    center: Point3<f64>,
    n_segs: usize,
    ring_start: usize,
    is_start: bool,
    smooth: bool,
) {
    let outward = if is_start { -frame.tangent } else { frame.tangent };
    let center_idx = mesh.vertices.len() as u32;
    mesh.vertices.push(if smooth {
        Vertex::with_normal(center, outward)
    } else {
        Vertex::new(center)
    });

    for seg_idx in 0..n_segs {
        let curr = (ring_start + seg_idx) as u32;
        let next = (ring_start + (seg_idx + 1) % n_segs) as u32;
        if is_start {
            mesh.faces.push([center_idx, next, curr]);
        } else {
            mesh.faces.push([center_idx, curr, next]);
        }
    }
}

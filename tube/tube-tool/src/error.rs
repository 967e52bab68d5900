//! Error types for tube operations.

use thiserror::Error;

use crate::SelectionMode;

/// Result type for tube operations.
pub type TubeResult<T> = Result<T, TubeError>;

/// The live selection does not have the shape a mode requires.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// No object is in edit mode.
    #[error("no mesh object is in edit mode")]
    NothingInEditMode,

    /// More than two objects are in edit mode.
    #[error("{count} objects are in edit mode, a tube connects at most two")]
    TooManyObjects {
        /// Objects in edit mode.
        count: usize,
    },

    /// The fixed mode needs a different number of objects.
    #[error("{mode} needs {expected} object(s) in edit mode, found {actual}")]
    ObjectCountMismatch {
        /// Mode fixed at creation.
        mode: SelectionMode,
        /// Objects the mode needs.
        expected: usize,
        /// Objects in edit mode.
        actual: usize,
    },

    /// Too few qualifying faces or vertices are selected.
    #[error("{mode}: select {required} {element}, found {found}")]
    NotEnoughSelected {
        /// What the count was checked against.
        mode: SelectionTarget,
        /// Element kind that was counted.
        element: &'static str,
        /// Count the mode needs.
        required: usize,
        /// Count found.
        found: usize,
    },

    /// The host mesh refers to missing elements.
    #[error("object '{object}' has invalid mesh data: {source}")]
    InvalidMesh {
        /// Offending object.
        object: String,
        /// Underlying mesh error.
        source: mesh_types::MeshError,
    },
}

/// What a selection count was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTarget {
    /// Classifying a fresh selection.
    Classification,
    /// Re-validating against a fixed mode.
    Mode(SelectionMode),
}

impl std::fmt::Display for SelectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classification => f.write_str("cannot create tube"),
            Self::Mode(mode) => write!(f, "{mode}"),
        }
    }
}

/// The selected geometry cannot define a tube end.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DegenerateGeometryError {
    /// Reference length is zero or not finite (coincident vertices,
    /// collapsed face, isolated vertex).
    #[error("anchor {anchor} has reference length {length}, cannot scale radii")]
    ZeroReferenceLength {
        /// Anchor index after flipping.
        anchor: usize,
        /// Offending length.
        length: f64,
    },

    /// No normal can be derived for the anchor.
    #[error("anchor {anchor} has no usable normal")]
    ZeroNormal {
        /// Anchor index after flipping.
        anchor: usize,
    },
}

/// Errors surfaced at the recompute boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TubeError {
    /// Selection shape does not match the mode.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Selected geometry is degenerate.
    #[error(transparent)]
    DegenerateGeometry(#[from] DegenerateGeometryError),

    /// The curve object rejected the built spline.
    #[error("curve update failed: {0}")]
    Curve(#[from] curve_types::CurveError),

    /// Baking the curve into a mesh failed.
    #[error("finalize failed: {0}")]
    Bake(#[from] mesh_from_curves::BakeError),

    /// A settings preset could not be parsed.
    #[cfg(feature = "serde")]
    #[error("invalid settings preset: {0}")]
    Preset(String),
}

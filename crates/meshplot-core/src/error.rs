//! Error types for meshplot.

use thiserror::Error;

/// The main error type for meshplot operations.
#[derive(Error, Debug)]
pub enum MeshplotError {
    /// A color could not be parsed from the given specification.
    #[error("invalid color '{0}': expected a color name, '#RRGGBB' hex string, or RGB triple in [0, 1]")]
    InvalidColorSpec(String),

    /// A font family other than courier, times or arial was requested.
    #[error("invalid font '{0}': font must be one of \"courier\", \"times\" or \"arial\"")]
    InvalidFontSpec(String),

    /// A named scalar array is not present in the point or cell data.
    #[error("scalar array '{0}' not found in point or cell data")]
    ScalarArrayNotFound(String),

    /// Scalar data matches neither the point count nor the cell count.
    #[error("number of scalars ({actual}) must match either the number of points ({points}) or the number of cells ({cells})")]
    ScalarSizeMismatch {
        actual: usize,
        points: usize,
        cells: usize,
    },

    /// Scalars were updated on a dataset with no active array of that association.
    #[error("no active scalars in {0:?} data to update")]
    NoActiveScalars(crate::mesh::Association),

    /// No actor with the given name was added to the session.
    #[error("no mesh actor named '{0}'")]
    UnknownActor(String),

    /// Every colorbar slot is already taken.
    #[error("maximum number of color bars reached ({capacity})")]
    ColorbarCapacityExceeded { capacity: usize },

    /// A colormap with the given name is not registered.
    #[error("colormap '{0}' not found")]
    UnknownColorMap(String),

    /// A representation style other than surface, wireframe or points was requested.
    #[error("invalid style '{0}': must be one of \"surface\", \"wireframe\" or \"points\"")]
    InvalidStyle(String),

    /// A theme preset with the given name does not exist.
    #[error("theme '{0}' not found")]
    UnknownTheme(String),

    /// Multi-block datasets can only be colored by a named array.
    #[error("scalar array must be given as a string name for multi-block datasets")]
    MultiBlockScalarsMustBeNamed,

    /// A scalar bar was requested before any mapper existed.
    #[error("mapper does not exist - add a mesh with scalars first")]
    NoMapper,

    /// A legend was requested with no labels to show.
    #[error("no labels to show - add meshes with a label or pass labels explicitly")]
    NoLegendLabels,

    /// The plotting session has been closed.
    #[error("plotting session is closed")]
    SessionClosed,

    /// Rendering backend error.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for meshplot operations.
pub type Result<T> = std::result::Result<T, MeshplotError>;

//! Core abstractions for meshplot.
//!
//! This crate holds the engine-independent parts of mesh plotting:
//! - Color and font resolution ([`ColorResolver`], [`FontFamily`])
//! - The mesh data model with point and cell arrays ([`Mesh`], [`DataSet`])
//! - Scalar binding: array selection, range, and lookup table ([`ScalarBinder`])
//! - Colorbar slot bookkeeping with shared ranges ([`ColorbarSlotManager`])
//! - Theme configuration ([`Theme`])

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Theme structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Exact zero comparison is the point of the zero-range check
#![allow(clippy::float_cmp)]

pub mod color;
pub mod color_maps;
pub mod colorbar;
pub mod error;
pub mod mapper;
pub mod mesh;
pub mod scalars;
pub mod theme;

pub use color::{parse_color, parse_font_family, ColorResolver, ColorSpec, FontFamily};
pub use color_maps::{ColorMap, ColorMapRegistry, LookupTable, Rgba8};
pub use colorbar::{
    clamp_to_viewport, slot_position, ColorbarEntry, ColorbarSlotManager, Orientation,
    MAX_COLOR_BARS,
};
pub use error::{MeshplotError, Result};
pub use mapper::{MapperHandle, MapperState, ScalarMode, ScalarRange};
pub use mesh::{
    ArrayStore, ArrayValues, Association, Block, DataArray, DataSet, Mesh, MeshKind, MultiBlock,
};
pub use scalars::{
    associate, lookup_array, update_active_scalars, BindRequest, RangeSpec, ScalarBinder, ScalarBinding, ScalarSpec,
    DEFAULT_N_COLORS, DEFAULT_SCALAR_TITLE,
};
pub use theme::{ColorbarLayout, FontTheme, Theme};

// Re-export glam types for convenience
pub use glam::{Vec3, Vec4};

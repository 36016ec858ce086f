//! meshplot: mesh plotting with shared scalar bars on top of an external 3D
//! rendering engine.
//!
//! # Quick Start
//!
//! ```
//! use meshplot::*;
//!
//! fn main() -> Result<()> {
//!     let mut plotter = Plotter::headless()?;
//!
//!     let points = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
//!     let cells = vec![vec![0, 1, 2], vec![0, 2, 3]];
//!     let mut mesh = Mesh::new(points, cells);
//!     mesh.add_point_array("height", vec![0.0_f64, 0.0, 1.0, 2.0]);
//!
//!     plotter.add_mesh(&mut mesh, &MeshOptions::default().scalars("height"))?;
//!     assert_eq!(plotter.colorbars().slot_of("height"), Some(0));
//!
//!     plotter.close();
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Plotter`] - a plotting session: adds meshes and scalar bars to a
//!   [`SceneRenderer`] and keeps colorbar bookkeeping
//! - [`ScalarBinder`] - decides which array colors a mesh, over which range
//! - [`ColorbarSlotManager`] - at most ten scalar bars, one per title, with
//!   ranges shared across all meshes using a title
//! - [`sessions`] - explicit process-wide registry of open sessions

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod input;
pub mod options;
pub mod plotter;
pub mod sessions;

pub use meshplot_core::{
    color::{parse_color, parse_font_family, ColorResolver, ColorSpec, FontFamily},
    color_maps::{ColorMap, ColorMapRegistry, LookupTable, Rgba8},
    colorbar::{ColorbarSlotManager, Orientation, MAX_COLOR_BARS},
    error::{MeshplotError, Result},
    mapper::{MapperHandle, ScalarMode, ScalarRange},
    mesh::{ArrayValues, Association, DataArray, DataSet, Mesh, MeshKind, MultiBlock},
    scalars::{BindRequest, RangeSpec, ScalarBinder, ScalarBinding, ScalarSpec},
    theme::{ColorbarLayout, FontTheme, Theme},
    Vec3, Vec4,
};

pub use meshplot_render::{
    Actor, ActorProperty, HeadlessRenderer, LegendActor, MeshActor, RenderError, Representation,
    ScalarBarActor, SceneRenderer, TextStyle,
};

pub use input::{normalize, Normalized, PlotInput};
pub use options::{LegendOptions, MeshOptions, ScalarBarOptions};
pub use plotter::{Plotter, MULTI_COLORS};

/// Installs the `env_logger` logger, configured from `RUST_LOG`.
///
/// Does nothing if a logger is already installed.
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::info!("meshplot logging initialized");
    }
}

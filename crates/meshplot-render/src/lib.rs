//! Rendering boundary for meshplot.
//!
//! This crate defines what plotting hands to a rendering engine:
//! - Actor types (meshes, scalar bars, legends) and their display properties
//! - The [`SceneRenderer`] trait a rendering engine implements
//! - [`HeadlessRenderer`], an in-memory scene for tests and batch use

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::struct_excessive_bools)]

pub mod actor;
pub mod error;
pub mod headless;
pub mod renderer;

pub use actor::{
    Actor, ActorProperty, LegendActor, MeshActor, Representation, ScalarBarActor, TextStyle,
};
pub use error::{RenderError, RenderResult};
pub use headless::HeadlessRenderer;
pub use renderer::SceneRenderer;

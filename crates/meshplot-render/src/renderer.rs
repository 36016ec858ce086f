//! The scene renderer boundary.
//!
//! Everything that actually draws lives behind [`SceneRenderer`]. Plotting
//! only adds, replaces and removes named actors and asks for frames.

use std::any::Any;

use glam::Vec3;

use crate::actor::Actor;
use crate::error::RenderResult;

/// A rendering engine that owns the scene graph.
pub trait SceneRenderer: Any + Send {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to self as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Adds `actor` under `name`, replacing any actor with the same name.
    fn add_or_replace_actor(&mut self, name: &str, actor: Actor) -> RenderResult<()>;

    /// Removes the actor called `name`. Returns false if there was none.
    fn remove_actor(&mut self, name: &str) -> bool;

    /// Removes every actor.
    fn remove_all_actors(&mut self);

    /// Sets the background color.
    fn set_background(&mut self, color: Vec3);

    /// Fits the camera to the visible actors.
    fn reset_camera(&mut self) {}

    /// Renders one frame.
    fn render(&mut self) -> RenderResult<()>;

    /// Shows the scene interactively, blocking until the window closes.
    ///
    /// Renderers without a window render one frame.
    fn show(&mut self) -> RenderResult<()> {
        self.render()
    }

    /// Releases window and interactor resources. Further calls may fail.
    fn finalize(&mut self);
}

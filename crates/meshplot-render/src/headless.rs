//! A renderer that keeps the scene in memory without drawing.
//!
//! Useful for integration tests, batch processing, and inspecting what a
//! plotting session would hand to a real engine.

use std::any::Any;

use glam::Vec3;

use crate::actor::Actor;
use crate::error::{RenderError, RenderResult};
use crate::renderer::SceneRenderer;

/// In-memory scene: named actors in insertion order.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    actors: Vec<(String, Actor)>,
    background: Vec3,
    frames: usize,
    camera_resets: usize,
    finalized: bool,
}

impl HeadlessRenderer {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets an actor by name.
    pub fn actor(&self, name: &str) -> Option<&Actor> {
        self.actors.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    /// Returns actor names in insertion order.
    pub fn actor_names(&self) -> Vec<&str> {
        self.actors.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns all actors in insertion order.
    pub fn actors(&self) -> impl Iterator<Item = (&str, &Actor)> {
        self.actors.iter().map(|(n, a)| (n.as_str(), a))
    }

    /// Returns the number of actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Returns true if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Returns the background color.
    pub fn background(&self) -> Vec3 {
        self.background
    }

    /// Returns the number of frames rendered.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Returns how many times the camera was reset.
    pub fn camera_resets(&self) -> usize {
        self.camera_resets
    }

    /// Returns whether [`SceneRenderer::finalize`] was called.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

impl SceneRenderer for HeadlessRenderer {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn add_or_replace_actor(&mut self, name: &str, actor: Actor) -> RenderResult<()> {
        if self.finalized {
            return Err(RenderError::Finalized);
        }
        log::debug!("headless: add {} actor '{name}'", actor.kind());
        if let Some(slot) = self.actors.iter_mut().find(|(n, _)| n == name) {
            slot.1 = actor;
        } else {
            self.actors.push((name.to_string(), actor));
        }
        Ok(())
    }

    fn remove_actor(&mut self, name: &str) -> bool {
        let before = self.actors.len();
        self.actors.retain(|(n, _)| n != name);
        before != self.actors.len()
    }

    fn remove_all_actors(&mut self) {
        self.actors.clear();
    }

    fn set_background(&mut self, color: Vec3) {
        self.background = color;
    }

    fn reset_camera(&mut self) {
        self.camera_resets += 1;
    }

    fn render(&mut self) -> RenderResult<()> {
        if self.finalized {
            return Err(RenderError::Finalized);
        }
        self.frames += 1;
        Ok(())
    }

    fn finalize(&mut self) {
        self.finalized = true;
    }
}

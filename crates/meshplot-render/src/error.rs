//! Rendering error types.

use meshplot_core::MeshplotError;
use thiserror::Error;

/// Errors reported by a scene renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The renderer was finalized and accepts no more work.
    #[error("renderer has been finalized")]
    Finalized,

    /// The backend refused an actor.
    #[error("actor '{0}' rejected: {1}")]
    ActorRejected(String, String),

    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

impl From<RenderError> for MeshplotError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Finalized => MeshplotError::SessionClosed,
            other => MeshplotError::RenderError(other.to_string()),
        }
    }
}

//! # Rendering System
//!
//! The engine describes what to draw; a [`RenderBackend`] decides how. Each
//! frame the backend receives the scene graph and a [`Camera`], which
//! [`OrbitControls`] move in response to pointer input.
//!
//! [`SceneStatsRenderer`] is the headless backend: it walks the graph and
//! records what a GPU backend would submit.

mod camera;
mod orbit;
mod backend;

pub use camera::Camera;
pub use orbit::OrbitControls;
pub use backend::{BackendResult, FrameStats, RenderBackend, SceneStatsRenderer};

use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Renderer initialization failed during setup
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),

    /// A frame could not be drawn
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// Backend-specific error occurred
    #[error("Backend error: {0}")]
    BackendError(String),
}

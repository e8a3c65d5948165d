//! Application-level errors and events

use thiserror::Error;

use crate::assets::AssetError;
use crate::audio::AudioError;
use crate::config::ConfigError;
use crate::input::{KeyCode, MouseButton};
use crate::render::RenderError;
use crate::scene::SceneError;

/// Any failure an application built on the engine reports
#[derive(Error, Debug)]
pub enum AppError {
    /// A texture or clip could not be found or read
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// The output device failed
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// The configuration file is unreadable or invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A node id did not belong to the graph
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// The backend could not draw a frame
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Scene setup found an inconsistency
    #[error("Setup error: {0}")]
    Setup(String),
}

/// Window and input events forwarded by a host
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Viewport size changed, in logical pixels
    WindowResized {
        /// Width
        width: u32,
        /// Height
        height: u32,
        /// Physical pixels per logical pixel on the current display
        device_pixel_ratio: f32,
    },

    /// The user asked to close the window
    WindowCloseRequested,

    /// Key went down
    KeyPressed(KeyCode),

    /// Pointer button changed state
    MouseButton {
        /// Which button
        button: MouseButton,
        /// `true` on press, `false` on release
        pressed: bool,
    },

    /// Pointer moved, in window coordinates
    MouseMoved {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },

    /// Wheel scrolled
    MouseWheel {
        /// Vertical scroll amount in notches
        delta_y: f64,
    },
}

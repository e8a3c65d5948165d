//! Audio system
//!
//! Ambient playback for scenes: a clip is loaded in the background, an
//! [`AmbientTrack`] tracks whether it is ready, and an [`backend::AudioBackend`]
//! plays it. Playback is optional; every failure degrades to silence.

pub mod asset;
pub mod backend;
pub mod ambient;

pub use asset::{AudioAsset, AudioFormat};
pub use backend::{AudioBackend, AudioBackendConfig, SoundHandle};
pub use ambient::{AmbientTrack, AudioReadiness, PlaybackState};

use thiserror::Error;

/// Audio subsystem errors
#[derive(Error, Debug)]
pub enum AudioError {
    /// The backend was used before `initialize`
    #[error("Audio backend not initialized")]
    BackendNotInitialized,

    /// The output device could not be opened
    #[error("Audio backend initialization failed: {0}")]
    BackendInitFailed(String),

    /// No playback backend was compiled in
    #[error("Audio playback unavailable: {0}")]
    Unavailable(String),

    /// Decoding or sink creation failed
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// The handle does not refer to an active sound
    #[error("Invalid sound handle")]
    InvalidHandle,
}

//! Playback devices
//!
//! [`AmbientTrack`](crate::audio::AmbientTrack) talks to an [`AudioBackend`]
//! so tests can swap the device for an in-memory fake.

#[cfg(feature = "rodio")]
pub mod rodio_backend;

use crate::audio::AudioError;

/// Reference to one sound started by a backend
///
/// The generation distinguishes sounds that reuse the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle {
    /// Slot id
    pub id: u32,
    /// Reuse counter of the slot
    pub generation: u32,
}

impl SoundHandle {
    /// Handle from its parts
    pub fn new(id: u32, generation: u32) -> Self {
        Self { id, generation }
    }
}

/// An output device that plays encoded clips
///
/// Not `Send`; the backend lives on the thread that drives the frame loop.
pub trait AudioBackend {
    /// Open the device; calling it again on an open device succeeds
    fn initialize(&mut self, config: &AudioBackendConfig) -> Result<(), AudioError>;

    /// Stop everything and release the device
    fn shutdown(&mut self);

    /// Whether the device is open
    fn is_initialized(&self) -> bool;

    /// Forget sounds that finished; called between frames
    fn update(&mut self);

    /// Stop every sound
    fn stop_all(&mut self);

    /// Decode `data` and start it, repeating forever when `looping`
    fn play_sound(&mut self, data: &[u8], looping: bool) -> Result<SoundHandle, AudioError>;

    /// Hold a sound at its current position
    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Continue a held sound
    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Stop and forget a sound; unknown handles are ignored
    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Linear gain of a sound, `1.0` being the clip's own level
    fn set_volume(&mut self, handle: SoundHandle, volume: f32) -> Result<(), AudioError>;

    /// Whether a sound is audible right now
    fn is_playing(&self, handle: SoundHandle) -> bool;
}

/// Preferred output format
///
/// Backends that negotiate the format with the device may ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBackendConfig {
    /// Frames per second
    pub sample_rate: u32,
    /// Output channels
    pub channels: u16,
}

impl Default for AudioBackendConfig {
    fn default() -> Self {
        Self { sample_rate: 44_100, channels: 2 }
    }
}

/// Open the default output device
#[cfg(feature = "rodio")]
pub fn create_backend(config: &AudioBackendConfig) -> Result<Box<dyn AudioBackend>, AudioError> {
    let mut backend = rodio_backend::RodioBackend::new();
    backend.initialize(config)?;
    Ok(Box::new(backend))
}

/// Open the default output device
///
/// Built without the `rodio` feature there is no device to open.
#[cfg(not(feature = "rodio"))]
pub fn create_backend(_config: &AudioBackendConfig) -> Result<Box<dyn AudioBackend>, AudioError> {
    Err(AudioError::Unavailable("built without the `rodio` feature".to_string()))
}

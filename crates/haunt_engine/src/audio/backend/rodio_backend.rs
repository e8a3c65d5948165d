//! Rodio playback
//!
//! Every sound gets its own [`Sink`] stored in a slot map; the slot key is
//! split into the id and generation of the [`SoundHandle`], so a handle to a
//! finished sound never reaches a sink that later reused its slot.
//!
//! ```no_run
//! use haunt_engine::audio::backend::{AudioBackend, AudioBackendConfig};
//! use haunt_engine::audio::backend::rodio_backend::RodioBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut backend = RodioBackend::new();
//! backend.initialize(&AudioBackendConfig::default())?;
//! let clip = std::fs::read("static/audio/ambient.ogg")?;
//! let handle = backend.play_sound(&clip, true)?;
//! backend.set_volume(handle, 0.7)?;
//! # Ok(())
//! # }
//! ```

use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use slotmap::{DefaultKey, Key, KeyData, SlotMap};

use super::{AudioBackend, AudioBackendConfig, SoundHandle};
use crate::audio::AudioError;

/// Open output device; the stream stops when dropped
struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// Audio backend on the default output device
#[derive(Default)]
pub struct RodioBackend {
    output: Option<Output>,
    sinks: SlotMap<DefaultKey, Sink>,
}

fn to_handle(key: DefaultKey) -> SoundHandle {
    let bits = key.data().as_ffi();
    SoundHandle::new(bits as u32, (bits >> 32) as u32)
}

fn to_key(handle: SoundHandle) -> DefaultKey {
    KeyData::from_ffi((u64::from(handle.generation) << 32) | u64::from(handle.id)).into()
}

fn playback(context: &str, e: impl std::fmt::Display) -> AudioError {
    AudioError::PlaybackFailed(format!("{}: {}", context, e))
}

impl RodioBackend {
    /// Backend with no device open yet
    pub fn new() -> Self {
        Self::default()
    }

    fn sink(&self, handle: SoundHandle) -> Result<&Sink, AudioError> {
        self.sinks.get(to_key(handle)).ok_or(AudioError::InvalidHandle)
    }
}

impl AudioBackend for RodioBackend {
    fn initialize(&mut self, _config: &AudioBackendConfig) -> Result<(), AudioError> {
        if self.output.is_some() {
            return Ok(());
        }
        // Rodio picks the device's own rate and channel layout
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| AudioError::BackendInitFailed(e.to_string()))?;
        self.output = Some(Output { _stream: stream, handle });
        log::info!("Opened default audio output");
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.output.is_none() {
            return;
        }
        self.stop_all();
        self.output = None;
        log::info!("Closed audio output");
    }

    fn is_initialized(&self) -> bool {
        self.output.is_some()
    }

    fn update(&mut self) {
        // Looped sources never drain
        self.sinks.retain(|_, sink| !sink.empty());
    }

    fn stop_all(&mut self) {
        for (_, sink) in self.sinks.drain() {
            sink.stop();
        }
    }

    fn play_sound(&mut self, data: &[u8], looping: bool) -> Result<SoundHandle, AudioError> {
        let output = self.output.as_ref().ok_or(AudioError::BackendNotInitialized)?;
        let sink = Sink::try_new(&output.handle).map_err(|e| playback("sink", e))?;

        let bytes = Cursor::new(data.to_vec());
        if looping {
            sink.append(Decoder::new_looped(bytes).map_err(|e| playback("decode", e))?);
        } else {
            sink.append(Decoder::new(bytes).map_err(|e| playback("decode", e))?);
        }
        Ok(to_handle(self.sinks.insert(sink)))
    }

    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        self.sink(handle)?.pause();
        Ok(())
    }

    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        self.sink(handle)?.play();
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        if let Some(sink) = self.sinks.remove(to_key(handle)) {
            sink.stop();
        }
        Ok(())
    }

    fn set_volume(&mut self, handle: SoundHandle, volume: f32) -> Result<(), AudioError> {
        self.sink(handle)?.set_volume(volume);
        Ok(())
    }

    fn is_playing(&self, handle: SoundHandle) -> bool {
        self.sink(handle).is_ok_and(|sink| !sink.is_paused() && !sink.empty())
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_round_trips_through_slot_key() {
        let mut slots: SlotMap<DefaultKey, ()> = SlotMap::new();
        let first = slots.insert(());
        slots.remove(first);
        let reused = slots.insert(());

        let handle = to_handle(reused);
        assert_eq!(to_key(handle), reused);
        assert_eq!(handle.id, to_handle(first).id);
        assert_ne!(handle.generation, to_handle(first).generation);
    }

    #[test]
    fn test_play_before_initialize_fails() {
        let mut backend = RodioBackend::new();
        assert!(!backend.is_initialized());
        assert!(matches!(backend.play_sound(b"OggS", true), Err(AudioError::BackendNotInitialized)));
    }

    #[test]
    fn test_unknown_handle_is_rejected() {
        let mut backend = RodioBackend::new();
        let handle = SoundHandle::new(42, 1);
        assert!(matches!(backend.pause(handle), Err(AudioError::InvalidHandle)));
        assert!(backend.stop(handle).is_ok());
        assert!(!backend.is_playing(handle));
    }

    #[test]
    fn test_initialize_is_idempotent_when_a_device_exists() {
        let mut backend = RodioBackend::new();
        // CI machines usually have no output device
        if backend.initialize(&AudioBackendConfig::default()).is_ok() {
            assert!(backend.initialize(&AudioBackendConfig::default()).is_ok());
            backend.shutdown();
            assert!(!backend.is_initialized());
        }
    }
}

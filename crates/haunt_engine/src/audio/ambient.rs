//! Looping ambient track
//!
//! The clip starts loading as soon as the track is created. Readiness is
//! only observed through [`AmbientTrack::poll`], which the frame loop calls
//! between ticks. A track whose clip or output device is unavailable stays
//! silent for the rest of the session.

use crate::assets::{AssetPaths, LoadEvent, PendingLoad, spawn_load};
use crate::audio::backend::{self, AudioBackend, AudioBackendConfig, SoundHandle};
use crate::audio::AudioAsset;
use crate::core::config::AudioConfig;

/// Whether the clip can be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioReadiness {
    /// Clip is still loading
    Loading,
    /// Clip is loaded
    Ready,
    /// Load finished without a playable clip
    Absent,
}

/// Playback state of the track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Never started
    NotPlaying,
    /// Audible
    Playing,
    /// Started, then paused
    Paused,
}

/// A single looping background clip
pub struct AmbientTrack {
    backend: Option<Box<dyn AudioBackend>>,
    pending: Option<PendingLoad<AudioAsset>>,
    clip: Option<AudioAsset>,
    readiness: AudioReadiness,
    state: PlaybackState,
    handle: Option<SoundHandle>,
    volume: f32,
}

impl AmbientTrack {
    /// Create a track fed by `pending`, playing through `backend` if present
    pub fn new(
        backend: Option<Box<dyn AudioBackend>>,
        pending: PendingLoad<AudioAsset>,
        volume: f32,
    ) -> Self {
        Self {
            backend,
            pending: Some(pending),
            clip: None,
            readiness: AudioReadiness::Loading,
            state: PlaybackState::NotPlaying,
            handle: None,
            volume,
        }
    }

    /// Open the default output device and start loading the configured clip
    ///
    /// A device that cannot be opened is logged; the clip still loads so the
    /// readiness flag settles either way.
    pub fn load(config: &AudioConfig, paths: &AssetPaths) -> Self {
        let backend = match backend::create_backend(&AudioBackendConfig::default()) {
            Ok(backend) => Some(backend),
            Err(e) => {
                log::warn!("Ambient audio disabled: {}", e);
                None
            }
        };
        let path = paths.resolve(&config.ambient_clip);
        log::info!("Loading ambient clip {}", path.display());
        Self::new(backend, spawn_load(path), config.volume)
    }

    /// A track with nothing to play
    pub fn silent() -> Self {
        Self {
            backend: None,
            pending: None,
            clip: None,
            readiness: AudioReadiness::Absent,
            state: PlaybackState::NotPlaying,
            handle: None,
            volume: 0.0,
        }
    }

    /// Drain load events that arrived since the last call
    pub fn poll(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };

        for event in pending.poll() {
            match event {
                LoadEvent::Progress { loaded, total } => {
                    log::trace!("Ambient clip: {} of {:?} bytes", loaded, total);
                }
                LoadEvent::Loaded(asset) => {
                    log::info!("Ambient clip loaded ({:?})", asset.format());
                    self.clip = Some(asset);
                    self.readiness = AudioReadiness::Ready;
                }
                LoadEvent::Failed(e) => {
                    log::warn!("Ambient clip unavailable, continuing silently: {}", e);
                    self.readiness = AudioReadiness::Absent;
                }
            }
        }

        if pending.is_finished() {
            self.pending = None;
        }
    }

    /// Load progress of the clip
    pub fn readiness(&self) -> AudioReadiness {
        self.readiness
    }

    /// Whether the clip is loaded and there is a device to play it on
    pub fn is_ready(&self) -> bool {
        self.readiness == AudioReadiness::Ready && self.backend.is_some()
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the clip is audible
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Start looping playback if ready and never started
    ///
    /// Returns whether playback began. Backend failures are logged, not
    /// returned.
    pub fn start(&mut self) -> bool {
        if !self.is_ready() || self.state != PlaybackState::NotPlaying {
            return false;
        }
        let (Some(backend), Some(clip)) = (self.backend.as_mut(), self.clip.as_ref()) else {
            return false;
        };

        match backend.play_sound(clip.data(), true) {
            Ok(handle) => {
                if let Err(e) = backend.set_volume(handle, self.volume) {
                    log::warn!("Could not set ambient volume: {}", e);
                }
                self.handle = Some(handle);
                self.state = PlaybackState::Playing;
                log::info!("Ambient audio playing");
                true
            }
            Err(e) => {
                log::warn!("Ambient audio failed to start: {}", e);
                false
            }
        }
    }

    /// Toggle between playing and paused
    ///
    /// Does nothing while the clip is not ready. A track that was never
    /// started is started.
    pub fn toggle(&mut self) -> PlaybackState {
        if !self.is_ready() {
            return self.state;
        }

        if self.state == PlaybackState::NotPlaying {
            self.start();
            return self.state;
        }
        let (Some(handle), Some(backend)) = (self.handle, self.backend.as_mut()) else {
            return self.state;
        };

        match self.state {
            PlaybackState::Playing => match backend.pause(handle) {
                Ok(()) => {
                    self.state = PlaybackState::Paused;
                    log::info!("Ambient audio paused");
                }
                Err(e) => log::warn!("Could not pause ambient audio: {}", e),
            },
            PlaybackState::Paused => match backend.resume(handle) {
                Ok(()) => {
                    self.state = PlaybackState::Playing;
                    log::info!("Ambient audio resumed");
                }
                Err(e) => log::warn!("Could not resume ambient audio: {}", e),
            },
            PlaybackState::NotPlaying => {}
        }
        self.state
    }

    /// Let the backend reclaim finished sounds
    pub fn update(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            backend.update();
        }
    }
}

impl std::fmt::Debug for AmbientTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmbientTrack")
            .field("readiness", &self.readiness)
            .field("state", &self.state)
            .field("has_backend", &self.backend.is_some())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::assets::AssetError;
    use crate::audio::{AudioError, AudioFormat};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Backend that records every call instead of making sound
    #[derive(Default)]
    pub(crate) struct RecordingBackend {
        pub(crate) calls: Rc<RefCell<Vec<String>>>,
    }

    impl AudioBackend for RecordingBackend {
        fn initialize(&mut self, _config: &AudioBackendConfig) -> Result<(), AudioError> {
            Ok(())
        }
        fn shutdown(&mut self) {}
        fn is_initialized(&self) -> bool {
            true
        }
        fn update(&mut self) {}
        fn stop_all(&mut self) {}
        fn play_sound(&mut self, data: &[u8], looping: bool) -> Result<SoundHandle, AudioError> {
            self.calls.borrow_mut().push(format!("play {} looping={}", data.len(), looping));
            Ok(SoundHandle::new(1, 0))
        }
        fn pause(&mut self, _handle: SoundHandle) -> Result<(), AudioError> {
            self.calls.borrow_mut().push("pause".to_string());
            Ok(())
        }
        fn resume(&mut self, _handle: SoundHandle) -> Result<(), AudioError> {
            self.calls.borrow_mut().push("resume".to_string());
            Ok(())
        }
        fn stop(&mut self, _handle: SoundHandle) -> Result<(), AudioError> {
            Ok(())
        }
        fn set_volume(&mut self, _handle: SoundHandle, volume: f32) -> Result<(), AudioError> {
            self.calls.borrow_mut().push(format!("volume {}", volume));
            Ok(())
        }
        fn is_playing(&self, _handle: SoundHandle) -> bool {
            false
        }
    }

    fn clip() -> AudioAsset {
        AudioAsset::new(b"OggS-clip".to_vec(), AudioFormat::Ogg)
    }

    fn track() -> (std::sync::mpsc::Sender<LoadEvent<AudioAsset>>, AmbientTrack, Rc<RefCell<Vec<String>>>) {
        let backend = RecordingBackend::default();
        let calls = Rc::clone(&backend.calls);
        let (sender, pending) = PendingLoad::channel("ambient.ogg");
        (sender, AmbientTrack::new(Some(Box::new(backend)), pending, 0.5), calls)
    }

    #[test]
    fn test_not_ready_until_polled() {
        let (sender, mut track, _) = track();
        sender.send(LoadEvent::Loaded(clip())).unwrap();
        assert!(!track.is_ready());
        track.poll();
        assert!(track.is_ready());
        assert_eq!(track.readiness(), AudioReadiness::Ready);
    }

    #[test]
    fn test_start_before_ready_does_nothing() {
        let (_sender, mut track, calls) = track();
        assert!(!track.start());
        assert_eq!(track.state(), PlaybackState::NotPlaying);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_start_plays_looping_at_volume() {
        let (sender, mut track, calls) = track();
        sender.send(LoadEvent::Loaded(clip())).unwrap();
        track.poll();
        assert!(track.start());
        assert!(track.is_playing());
        assert_eq!(*calls.borrow(), vec!["play 9 looping=true".to_string(), "volume 0.5".to_string()]);
        // Starting twice is a no-op
        assert!(!track.start());
    }

    #[test]
    fn test_toggle_cycles_pause_and_resume() {
        let (sender, mut track, calls) = track();
        sender.send(LoadEvent::Loaded(clip())).unwrap();
        track.poll();
        track.start();

        assert_eq!(track.toggle(), PlaybackState::Paused);
        assert_eq!(track.toggle(), PlaybackState::Playing);
        assert_eq!(&calls.borrow()[2..], &["pause".to_string(), "resume".to_string()]);
    }

    #[test]
    fn test_toggle_while_loading_is_ignored() {
        let (_sender, mut track, calls) = track();
        assert_eq!(track.toggle(), PlaybackState::NotPlaying);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_failed_load_settles_absent() {
        let (sender, mut track, _) = track();
        sender.send(LoadEvent::Failed(AssetError::NotFound("ambient.ogg".to_string()))).unwrap();
        track.poll();
        assert_eq!(track.readiness(), AudioReadiness::Absent);
        assert!(!track.is_ready());
        assert_eq!(track.toggle(), PlaybackState::NotPlaying);
    }

    #[test]
    fn test_loaded_clip_without_device_is_not_ready() {
        let (sender, pending) = PendingLoad::channel("ambient.ogg");
        let mut track = AmbientTrack::new(None, pending, 1.0);
        sender.send(LoadEvent::Loaded(clip())).unwrap();
        track.poll();
        assert_eq!(track.readiness(), AudioReadiness::Ready);
        assert!(!track.is_ready());
        assert!(!track.start());
    }

    #[test]
    fn test_silent_track_never_plays() {
        let mut track = AmbientTrack::silent();
        track.poll();
        assert_eq!(track.readiness(), AudioReadiness::Absent);
        assert!(!track.start());
    }
}

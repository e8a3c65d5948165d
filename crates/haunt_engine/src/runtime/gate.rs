//! One-way startup gate
//!
//! Nothing is animated or drawn until the user has answered the audio
//! prompt. Either answer opens the gate, and it never closes again.

use crate::audio::AmbientTrack;
use crate::runtime::FrameScheduler;

/// Whether the frame loop may run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Prompt shown, no frames
    AwaitingChoice,
    /// Frame loop running
    Running,
}

/// Answer to the startup prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupChoice {
    /// Start with ambient audio
    EnableAudio,
    /// Start without audio
    Silent,
}

/// Gate between the startup prompt and the frame loop
#[derive(Debug, Clone)]
pub struct StartupGate {
    state: GateState,
    audio_requested: bool,
}

impl StartupGate {
    /// Closed gate
    pub fn new() -> Self {
        Self {
            state: GateState::AwaitingChoice,
            audio_requested: false,
        }
    }

    /// Current state
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Whether the frame loop may run
    pub fn is_running(&self) -> bool {
        self.state == GateState::Running
    }

    /// Whether the prompt should be shown
    pub fn prompt_visible(&self) -> bool {
        !self.is_running()
    }

    /// Whether the user asked for audio
    pub fn audio_requested(&self) -> bool {
        self.audio_requested
    }

    /// Answer the prompt and open the gate
    ///
    /// Audio starts only if it was asked for and the clip is already
    /// loaded; a clip that finishes later is not started. The first frame is
    /// requested from `scheduler`. Returns `false` if the gate was already
    /// open, in which case nothing happens.
    pub fn choose(
        &mut self,
        choice: StartupChoice,
        audio: &mut AmbientTrack,
        scheduler: &mut dyn FrameScheduler,
    ) -> bool {
        if self.is_running() {
            log::debug!("Startup choice {:?} ignored, already running", choice);
            return false;
        }

        self.state = GateState::Running;
        self.audio_requested = choice == StartupChoice::EnableAudio;
        log::info!("Starting ({:?})", choice);

        if self.audio_requested {
            if audio.is_ready() {
                audio.start();
            } else {
                log::info!("Ambient audio not ready yet; continuing without it");
            }
        }

        scheduler.request_frame();
        true
    }
}

impl Default for StartupGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{LoadEvent, PendingLoad};
    use crate::audio::ambient::tests::RecordingBackend;
    use crate::audio::{AudioAsset, AudioFormat, PlaybackState};
    use crate::runtime::FrameRequests;

    fn loaded_track() -> AmbientTrack {
        let (sender, pending) = PendingLoad::channel("ambient.ogg");
        let mut track = AmbientTrack::new(Some(Box::new(RecordingBackend::default())), pending, 1.0);
        sender.send(LoadEvent::Loaded(AudioAsset::new(b"OggS".to_vec(), AudioFormat::Ogg))).unwrap();
        track.poll();
        track
    }

    #[test]
    fn test_silent_choice_opens_gate_without_audio() {
        let mut gate = StartupGate::new();
        let mut track = loaded_track();
        let mut frames = FrameRequests::new();

        assert!(gate.prompt_visible());
        assert!(gate.choose(StartupChoice::Silent, &mut track, &mut frames));
        assert!(gate.is_running());
        assert!(!gate.prompt_visible());
        assert!(!gate.audio_requested());
        assert_eq!(track.state(), PlaybackState::NotPlaying);
        assert!(frames.take());
    }

    #[test]
    fn test_audio_choice_plays_loaded_clip() {
        let mut gate = StartupGate::new();
        let mut track = loaded_track();
        let mut frames = FrameRequests::new();

        gate.choose(StartupChoice::EnableAudio, &mut track, &mut frames);
        assert!(gate.audio_requested());
        assert_eq!(track.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_gate_never_closes() {
        let mut gate = StartupGate::new();
        let mut track = loaded_track();
        let mut frames = FrameRequests::new();

        gate.choose(StartupChoice::Silent, &mut track, &mut frames);
        assert!(!gate.choose(StartupChoice::EnableAudio, &mut track, &mut frames));
        assert_eq!(gate.state(), GateState::Running);
        assert!(!gate.audio_requested());
        assert_eq!(track.state(), PlaybackState::NotPlaying);
        assert_eq!(frames.total(), 1);
    }

    #[test]
    fn test_audio_chosen_before_load_is_not_retried() {
        let (sender, pending) = PendingLoad::channel("ambient.ogg");
        let mut track = AmbientTrack::new(Some(Box::new(RecordingBackend::default())), pending, 1.0);
        let mut gate = StartupGate::new();
        let mut frames = FrameRequests::new();

        gate.choose(StartupChoice::EnableAudio, &mut track, &mut frames);
        assert!(gate.is_running());
        assert!(!track.is_ready());
        assert!(!track.is_playing());

        sender.send(LoadEvent::Loaded(AudioAsset::new(b"OggS".to_vec(), AudioFormat::Ogg))).unwrap();
        track.poll();
        assert!(track.is_ready());
        assert!(!track.is_playing());
    }
}

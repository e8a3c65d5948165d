//! Application state and the per-frame update

use std::time::Duration;

use haunt_engine::audio::{AmbientTrack, PlaybackState};
use haunt_engine::core::config::RendererConfig;
use haunt_engine::debug::ParameterPanel;
use haunt_engine::foundation::math::Vec3;
use haunt_engine::foundation::time::Clock;
use haunt_engine::input::{InputManager, KeyCode, MouseButton};
use haunt_engine::render::{Camera, OrbitControls, RenderBackend};
use haunt_engine::runtime::{FrameScheduler, StartupChoice, StartupGate};
use haunt_engine::{AppError, AppEvent};

use crate::config::HauntedConfig;
use crate::ghosts::place_ghosts;
use crate::panel::build_panel;
use crate::scene_builder::HauntedScene;

/// Everything that changes while the scene runs
pub struct HauntedHouse {
    scene: HauntedScene,
    panel: ParameterPanel,
    gate: StartupGate,
    audio: AmbientTrack,
    clock: Clock,
    camera: Camera,
    controls: OrbitControls,
    input: InputManager,
    renderer_config: RendererConfig,
    toggle_key: KeyCode,
}

impl HauntedHouse {
    /// Wrap a built scene, waiting for the startup choice
    ///
    /// Panel overrides from the configuration are applied here.
    pub fn new(config: &HauntedConfig, scene: HauntedScene, audio: AmbientTrack) -> Self {
        let panel = build_panel(&scene);
        let applied = panel.apply_overrides(&config.panel);
        if applied > 0 {
            log::info!("Applied {} panel overrides", applied);
        }

        let camera_config = &config.camera;
        let camera = Camera::perspective(
            camera_config.position(),
            camera_config.fov,
            config.window.aspect(),
            camera_config.near,
            camera_config.far,
        );
        let mut controls = OrbitControls::new(Vec3::zeros());
        if camera_config.damping > 0.0 {
            controls = controls.with_damping(camera_config.damping);
        }
        controls.set_viewport_height(config.window.height as f32);

        Self {
            scene,
            panel,
            gate: StartupGate::new(),
            audio,
            clock: Clock::new(),
            camera,
            controls,
            input: InputManager::new(),
            renderer_config: config.renderer.clone(),
            toggle_key: config.audio.toggle_key,
        }
    }

    /// The scene
    pub fn scene(&self) -> &HauntedScene {
        &self.scene
    }

    /// Debug panel bound to the scene
    pub fn panel(&self) -> &ParameterPanel {
        &self.panel
    }

    /// Startup gate
    pub fn gate(&self) -> &StartupGate {
        &self.gate
    }

    /// Ambient audio
    pub fn audio(&self) -> &AmbientTrack {
        &self.audio
    }

    /// Animation clock
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Answer the startup prompt; the first tick is requested from `scheduler`
    pub fn choose(&mut self, choice: StartupChoice, scheduler: &mut dyn FrameScheduler) -> bool {
        self.gate.choose(choice, &mut self.audio, scheduler)
    }

    /// Pick up audio load progress; call between ticks
    pub fn poll_audio(&mut self) {
        self.audio.poll();
        self.audio.update();
    }

    /// Run one frame
    ///
    /// Before the gate opens this does nothing and requests no further tick.
    /// Otherwise the clock advances by `delta`, the ghosts and camera move,
    /// one frame is rendered and the next tick is requested. A render
    /// failure is returned without requesting another tick.
    pub fn tick(
        &mut self,
        delta: Duration,
        renderer: &mut dyn RenderBackend,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<(), AppError> {
        if !self.gate.is_running() {
            log::trace!("Tick ignored while awaiting startup choice");
            return Ok(());
        }

        self.clock.advance(delta);
        let elapsed = self.clock.elapsed_secs();
        place_ghosts(&mut self.scene.graph, &self.scene.ghosts, elapsed)?;
        self.controls.update(&mut self.camera);

        renderer.render(&self.scene.graph, &self.camera)?;
        log::trace!("Frame {} at {:.3}s", self.clock.frame_count(), elapsed);

        scheduler.request_frame();
        Ok(())
    }

    /// React to a window or input event
    pub fn handle_event(&mut self, event: &AppEvent, renderer: &mut dyn RenderBackend) {
        match *event {
            AppEvent::WindowResized { width, height, device_pixel_ratio } => {
                if width == 0 || height == 0 {
                    return;
                }
                self.camera.set_aspect_ratio(width as f32 / height as f32);
                self.controls.set_viewport_height(height as f32);
                renderer.resize(width, height, self.renderer_config.effective_pixel_ratio(device_pixel_ratio));
            }
            AppEvent::KeyPressed(key) if key == self.toggle_key => {
                if !self.gate.is_running() {
                    return;
                }
                let state = self.audio.toggle();
                if state == PlaybackState::NotPlaying {
                    log::debug!("Audio toggle ignored, ambient audio not available");
                }
            }
            AppEvent::MouseButton { button, pressed } => self.input.handle_mouse_button(button, pressed),
            AppEvent::MouseMoved { x, y } => {
                if let Some(drag) = self.input.handle_mouse_move(x, y) {
                    if drag.button == MouseButton::Left {
                        self.controls.rotate(drag.dx as f32, drag.dy as f32);
                    }
                }
            }
            AppEvent::MouseWheel { delta_y } => self.controls.zoom(delta_y as f32),
            AppEvent::KeyPressed(_) | AppEvent::WindowCloseRequested => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tests::library;
    use crate::scene_builder::build_scene;
    use approx::assert_relative_eq;
    use haunt_engine::assets::{LoadEvent, PendingLoad};
    use haunt_engine::audio::backend::SoundHandle;
    use haunt_engine::audio::{AudioAsset, AudioBackend, AudioBackendConfig, AudioError, AudioFormat};
    use haunt_engine::render::{BackendResult, RenderError};
    use haunt_engine::runtime::FrameRequests;
    use haunt_engine::scene::SceneGraph;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
        fail: bool,
        resized: Option<(u32, u32, f32)>,
    }

    impl RenderBackend for CountingRenderer {
        fn render(&mut self, _scene: &SceneGraph, _camera: &Camera) -> BackendResult<()> {
            if self.fail {
                return Err(RenderError::RenderingFailed("device lost".to_string()));
            }
            self.frames += 1;
            Ok(())
        }

        fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
            self.resized = Some((width, height, pixel_ratio));
        }
    }

    /// Audio device that accepts everything
    #[derive(Default)]
    struct NullDevice {
        next: u32,
    }

    impl AudioBackend for NullDevice {
        fn initialize(&mut self, _config: &AudioBackendConfig) -> Result<(), AudioError> {
            Ok(())
        }
        fn shutdown(&mut self) {}
        fn is_initialized(&self) -> bool {
            true
        }
        fn update(&mut self) {}
        fn stop_all(&mut self) {}
        fn play_sound(&mut self, _data: &[u8], _looping: bool) -> Result<SoundHandle, AudioError> {
            self.next += 1;
            Ok(SoundHandle::new(self.next, 0))
        }
        fn pause(&mut self, _handle: SoundHandle) -> Result<(), AudioError> {
            Ok(())
        }
        fn resume(&mut self, _handle: SoundHandle) -> Result<(), AudioError> {
            Ok(())
        }
        fn stop(&mut self, _handle: SoundHandle) -> Result<(), AudioError> {
            Ok(())
        }
        fn set_volume(&mut self, _handle: SoundHandle, _volume: f32) -> Result<(), AudioError> {
            Ok(())
        }
        fn is_playing(&self, _handle: SoundHandle) -> bool {
            true
        }
    }

    fn clip() -> AudioAsset {
        AudioAsset::new(b"OggS....".to_vec(), AudioFormat::Ogg)
    }

    fn app_with(audio: AmbientTrack) -> HauntedHouse {
        let config = HauntedConfig::default();
        let scene = build_scene(&config, &mut library(), &mut StdRng::seed_from_u64(11)).unwrap();
        HauntedHouse::new(&config, scene, audio)
    }

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_ticks_before_choice_do_nothing() {
        let mut app = app_with(AmbientTrack::silent());
        let mut renderer = CountingRenderer::default();
        let mut frames = FrameRequests::new();

        for _ in 0..5 {
            app.tick(FRAME, &mut renderer, &mut frames).unwrap();
        }
        assert_eq!(renderer.frames, 0);
        assert_eq!(frames.total(), 0);
        assert_eq!(app.clock().elapsed(), Duration::ZERO);
        assert!(app.gate().prompt_visible());
    }

    #[test]
    fn test_silent_start_runs_the_loop() {
        let mut app = app_with(AmbientTrack::silent());
        let mut renderer = CountingRenderer::default();
        let mut frames = FrameRequests::new();

        for _ in 0..5 {
            app.tick(FRAME, &mut renderer, &mut frames).unwrap();
        }
        assert!(app.choose(StartupChoice::Silent, &mut frames));
        assert!(!app.gate().audio_requested());
        assert!(app.gate().is_running());

        let mut ticks = 0;
        while ticks < 3 && frames.take() {
            app.tick(FRAME, &mut renderer, &mut frames).unwrap();
            ticks += 1;
        }
        assert_eq!(renderer.frames, 3);
        assert_eq!(app.clock().elapsed(), Duration::from_millis(48));
        assert!(frames.is_pending());
        assert!(!app.audio().is_playing());
    }

    #[test]
    fn test_ghosts_follow_the_clock() {
        let mut app = app_with(AmbientTrack::silent());
        let mut renderer = CountingRenderer::default();
        let mut frames = FrameRequests::new();
        app.choose(StartupChoice::Silent, &mut frames);

        app.tick(Duration::from_millis(1500), &mut renderer, &mut frames).unwrap();
        let ghost = &app.scene().ghosts[0];
        let p = app.scene().graph.world_position(ghost.node).unwrap();
        assert_relative_eq!(p.x, 4.0 * 0.75_f32.cos(), epsilon = 1e-4);
        assert_relative_eq!(p.z, 4.0 * 0.75_f32.sin(), epsilon = 1e-4);
    }

    #[test]
    fn test_audio_chosen_before_clip_loads_stays_silent() {
        let (sender, pending) = PendingLoad::channel("audio/ambient.ogg");
        let track = AmbientTrack::new(Some(Box::new(NullDevice::default())), pending, 0.7);
        let mut app = app_with(track);
        let mut renderer = CountingRenderer::default();
        let mut frames = FrameRequests::new();

        assert!(app.choose(StartupChoice::EnableAudio, &mut frames));
        assert!(app.gate().is_running());
        assert!(!app.audio().is_ready());
        assert!(!app.audio().is_playing());

        sender.send(LoadEvent::Loaded(clip())).unwrap();
        app.poll_audio();
        app.tick(FRAME, &mut renderer, &mut frames).unwrap();
        assert!(app.audio().is_ready());
        assert!(!app.audio().is_playing());
    }

    #[test]
    fn test_toggle_key_pauses_and_resumes() {
        let (sender, pending) = PendingLoad::channel("audio/ambient.ogg");
        let track = AmbientTrack::new(Some(Box::new(NullDevice::default())), pending, 0.7);
        sender.send(LoadEvent::Loaded(clip())).unwrap();
        let mut app = app_with(track);
        let mut renderer = CountingRenderer::default();
        let mut frames = FrameRequests::new();
        app.poll_audio();

        // The key does nothing until the gate opens
        app.handle_event(&AppEvent::KeyPressed(KeyCode::M), &mut renderer);
        assert_eq!(app.audio().state(), PlaybackState::NotPlaying);

        app.choose(StartupChoice::EnableAudio, &mut frames);
        assert_eq!(app.audio().state(), PlaybackState::Playing);
        app.handle_event(&AppEvent::KeyPressed(KeyCode::M), &mut renderer);
        assert_eq!(app.audio().state(), PlaybackState::Paused);
        app.handle_event(&AppEvent::KeyPressed(KeyCode::M), &mut renderer);
        assert_eq!(app.audio().state(), PlaybackState::Playing);
        app.handle_event(&AppEvent::KeyPressed(KeyCode::Space), &mut renderer);
        assert_eq!(app.audio().state(), PlaybackState::Playing);
    }

    #[test]
    fn test_toggle_without_audio_is_harmless() {
        let mut app = app_with(AmbientTrack::silent());
        let mut renderer = CountingRenderer::default();
        let mut frames = FrameRequests::new();
        app.choose(StartupChoice::EnableAudio, &mut frames);

        app.handle_event(&AppEvent::KeyPressed(KeyCode::M), &mut renderer);
        assert_eq!(app.audio().state(), PlaybackState::NotPlaying);
        assert!(app.gate().is_running());
    }

    #[test]
    fn test_render_failure_propagates_without_rescheduling() {
        let mut app = app_with(AmbientTrack::silent());
        let mut renderer = CountingRenderer { fail: true, ..Default::default() };
        let mut frames = FrameRequests::new();
        app.choose(StartupChoice::Silent, &mut frames);
        assert!(frames.take());

        let result = app.tick(FRAME, &mut renderer, &mut frames);
        assert!(matches!(result, Err(AppError::Render(_))));
        assert!(!frames.is_pending());
    }

    #[test]
    fn test_resize_caps_pixel_ratio_and_updates_aspect() {
        let mut app = app_with(AmbientTrack::silent());
        let mut renderer = CountingRenderer::default();
        app.handle_event(
            &AppEvent::WindowResized { width: 1000, height: 500, device_pixel_ratio: 3.0 },
            &mut renderer,
        );
        assert_eq!(renderer.resized, Some((1000, 500, 2.0)));
        assert_relative_eq!(app.camera().aspect, 2.0);
    }

    #[test]
    fn test_drag_orbits_the_camera() {
        let mut app = app_with(AmbientTrack::silent());
        let mut renderer = CountingRenderer::default();
        let mut frames = FrameRequests::new();
        app.choose(StartupChoice::Silent, &mut frames);
        let before = app.camera().position;

        app.handle_event(&AppEvent::MouseMoved { x: 100.0, y: 100.0 }, &mut renderer);
        app.handle_event(&AppEvent::MouseButton { button: MouseButton::Left, pressed: true }, &mut renderer);
        app.handle_event(&AppEvent::MouseMoved { x: 160.0, y: 100.0 }, &mut renderer);
        app.tick(FRAME, &mut renderer, &mut frames).unwrap();

        let after = app.camera().position;
        assert!((after - before).norm() > 1e-3);
        assert_relative_eq!(after.norm(), before.norm(), epsilon = 1e-3);
    }

    #[test]
    fn test_panel_overrides_apply_at_startup() {
        let mut config = HauntedConfig::default();
        config.panel.insert("fog density".to_string(), haunt_engine::debug::ParamValue::Float(0.02));
        let scene = build_scene(&config, &mut library(), &mut StdRng::seed_from_u64(2)).unwrap();
        let app = HauntedHouse::new(&config, scene, AmbientTrack::silent());
        assert_relative_eq!(app.scene().fog.borrow().density, 0.02);
    }
}

//! Windowed host using GLFW
//!
//! The window is an input and resize source; frames still go to the
//! statistics renderer. Until the startup choice is made, `Y` starts with
//! ambient audio and `N` starts silently.

use std::thread;

use glfw::{Action, WindowEvent};
use haunt_engine::core::config::WindowConfig;
use haunt_engine::foundation::time::FrameTimer;
use haunt_engine::input::{KeyCode, MouseButton};
use haunt_engine::render::SceneStatsRenderer;
use haunt_engine::runtime::{FrameRequests, StartupChoice};
use haunt_engine::AppEvent;

use crate::app::HauntedHouse;
use crate::config::HauntedConfig;
use crate::host::{report, HostError, RunOptions};

/// GLFW window with event polling enabled
struct WindowHost {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
}

impl WindowHost {
    fn open(config: &WindowConfig) -> Result<Self, HostError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| HostError::Window(format!("GLFW initialization failed: {:?}", e)))?;

        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or_else(|| HostError::Window("Window creation failed".to_string()))?;

        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_size_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_scroll_polling(true);

        log::info!("Opened {}x{} window '{}'", config.width, config.height, config.title);
        Ok(Self { glfw, window, events })
    }

    fn size_event(&self) -> AppEvent {
        let (width, height) = self.window.get_size();
        let (scale, _) = self.window.get_content_scale();
        AppEvent::WindowResized {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
            device_pixel_ratio: scale,
        }
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn close(&mut self) {
        self.window.set_should_close(true);
    }

    fn poll(&mut self) -> Vec<AppEvent> {
        self.glfw.poll_events();
        let (scale, _) = self.window.get_content_scale();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| translate(event, scale))
            .collect()
    }
}

fn translate(event: WindowEvent, scale: f32) -> Option<AppEvent> {
    match event {
        WindowEvent::Size(width, height) => Some(AppEvent::WindowResized {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
            device_pixel_ratio: scale,
        }),
        WindowEvent::Close => Some(AppEvent::WindowCloseRequested),
        WindowEvent::Key(key, _, Action::Press, _) => key_code(key).map(AppEvent::KeyPressed),
        WindowEvent::MouseButton(button, action, _) => {
            let button = match button {
                glfw::MouseButton::Button1 => MouseButton::Left,
                glfw::MouseButton::Button2 => MouseButton::Right,
                glfw::MouseButton::Button3 => MouseButton::Middle,
                _ => return None,
            };
            Some(AppEvent::MouseButton { button, pressed: action == Action::Press })
        }
        WindowEvent::CursorPos(x, y) => Some(AppEvent::MouseMoved { x, y }),
        WindowEvent::Scroll(_, y) => Some(AppEvent::MouseWheel { delta_y: y }),
        _ => None,
    }
}

fn key_code(key: glfw::Key) -> Option<KeyCode> {
    use glfw::Key;
    Some(match key {
        Key::A => KeyCode::A,
        Key::B => KeyCode::B,
        Key::C => KeyCode::C,
        Key::D => KeyCode::D,
        Key::E => KeyCode::E,
        Key::F => KeyCode::F,
        Key::G => KeyCode::G,
        Key::H => KeyCode::H,
        Key::I => KeyCode::I,
        Key::J => KeyCode::J,
        Key::K => KeyCode::K,
        Key::L => KeyCode::L,
        Key::M => KeyCode::M,
        Key::N => KeyCode::N,
        Key::O => KeyCode::O,
        Key::P => KeyCode::P,
        Key::Q => KeyCode::Q,
        Key::R => KeyCode::R,
        Key::S => KeyCode::S,
        Key::T => KeyCode::T,
        Key::U => KeyCode::U,
        Key::V => KeyCode::V,
        Key::W => KeyCode::W,
        Key::X => KeyCode::X,
        Key::Y => KeyCode::Y,
        Key::Z => KeyCode::Z,
        Key::Space => KeyCode::Space,
        Key::Escape => KeyCode::Escape,
        _ => return None,
    })
}

/// Run in a window until it is closed or the frame limit is reached
///
/// Returns the number of frames rendered.
pub fn run_windowed(config: &HauntedConfig, mut app: HauntedHouse, options: RunOptions) -> Result<u64, HostError> {
    let mut host = WindowHost::open(&config.window)?;
    let mut renderer = SceneStatsRenderer::with_config(config.renderer.clone());
    let mut frames = FrameRequests::new();
    app.handle_event(&host.size_event(), &mut renderer);

    match options.choice {
        Some(choice) => {
            app.poll_audio();
            app.choose(choice, &mut frames);
        }
        None => log::info!("Press Y to start with ambient audio, N to start silently"),
    }

    let interval = config.window.frame_interval();
    let mut timer = FrameTimer::new();
    let mut rendered = 0;

    while !host.should_close() && !options.done(rendered) {
        for event in host.poll() {
            match event {
                AppEvent::WindowCloseRequested | AppEvent::KeyPressed(KeyCode::Escape) => host.close(),
                AppEvent::KeyPressed(KeyCode::Y) if !app.gate().is_running() => {
                    app.choose(StartupChoice::EnableAudio, &mut frames);
                    timer.reset();
                }
                AppEvent::KeyPressed(KeyCode::N) if !app.gate().is_running() => {
                    app.choose(StartupChoice::Silent, &mut frames);
                    timer.reset();
                }
                other => app.handle_event(&other, &mut renderer),
            }
        }
        app.poll_audio();

        if frames.take() {
            let delta = timer.update();
            app.tick(delta, &mut renderer, &mut frames)?;
            rendered += 1;
        }
        thread::sleep(interval);
    }

    report(&renderer, &timer);
    Ok(rendered)
}

//! Frame loop hosts
//!
//! The host owns the display clock: it waits for each refresh, measures the
//! real time since the previous one and runs a tick only when the previous
//! tick asked for it. The headless host stands in for a display with a
//! sleep of one refresh interval.

use std::io::{self, BufRead, Write};
use std::thread;

use haunt_engine::foundation::time::FrameTimer;
use haunt_engine::render::SceneStatsRenderer;
use haunt_engine::runtime::{FrameRequests, StartupChoice};
use haunt_engine::{AppError, AppEvent};
use thiserror::Error;

use crate::app::HauntedHouse;
use crate::config::HauntedConfig;

/// Host failures
#[derive(Error, Debug)]
pub enum HostError {
    /// The application failed
    #[error(transparent)]
    App(#[from] AppError),

    /// The startup prompt could not be answered
    #[error("Startup prompt failed: {0}")]
    Prompt(#[from] io::Error),

    /// The window could not be opened
    #[cfg(feature = "windowed")]
    #[error("Window error: {0}")]
    Window(String),
}

/// How a host runs the loop
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Answer to the startup prompt; asked interactively when `None`
    pub choice: Option<StartupChoice>,
    /// Stop after this many rendered frames
    pub max_frames: Option<u64>,
}

impl RunOptions {
    /// Whether `rendered` frames reach the frame limit
    pub fn done(&self, rendered: u64) -> bool {
        self.max_frames.is_some_and(|max| rendered >= max)
    }
}

/// Ask on standard input whether to play ambient audio
///
/// End of input counts as a silent start.
pub fn prompt() -> Result<StartupChoice, io::Error> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("Enable ambient audio? [y/n] ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(StartupChoice::Silent);
        }
        if let Some(choice) = parse_choice(&line) {
            return Ok(choice);
        }
    }
}

fn parse_choice(answer: &str) -> Option<StartupChoice> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(StartupChoice::EnableAudio),
        "n" | "no" => Some(StartupChoice::Silent),
        _ => None,
    }
}

/// Log what the last frame contained
pub fn report(renderer: &SceneStatsRenderer, timer: &FrameTimer) {
    let stats = renderer.last_frame();
    log::info!(
        "{} frames, {:.1} fps: {} draw calls, {} triangles, {} lights, {} shadow maps, {} missing textures",
        renderer.frames_rendered(),
        timer.average_fps(),
        stats.draw_calls,
        stats.triangles,
        stats.lights,
        stats.shadow_maps,
        stats.missing_textures
    );
}

/// Run without a window against the statistics renderer
///
/// Returns the number of frames rendered.
pub fn run_headless(config: &HauntedConfig, mut app: HauntedHouse, options: RunOptions) -> Result<u64, HostError> {
    let mut renderer = SceneStatsRenderer::with_config(config.renderer.clone());
    app.handle_event(
        &AppEvent::WindowResized {
            width: config.window.width,
            height: config.window.height,
            device_pixel_ratio: 1.0,
        },
        &mut renderer,
    );

    let choice = match options.choice {
        Some(choice) => choice,
        None => prompt()?,
    };
    let mut frames = FrameRequests::new();
    app.poll_audio();
    app.choose(choice, &mut frames);

    let interval = config.window.frame_interval();
    let report_every = u64::from(config.window.refresh_hz.max(1)) * 5;
    let mut timer = FrameTimer::new();
    let mut rendered = 0;

    while !options.done(rendered) && frames.take() {
        thread::sleep(interval);
        let delta = timer.update();
        app.tick(delta, &mut renderer, &mut frames)?;
        app.poll_audio();

        rendered += 1;
        if rendered % report_every == 0 {
            report(&renderer, &timer);
        }
    }

    report(&renderer, &timer);
    Ok(rendered)
}

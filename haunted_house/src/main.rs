//! Haunted house scene
//!
//! Builds the scene from a configuration file, waits for the audio choice
//! and then animates the ghosts until the window closes or the frame limit
//! is reached.

use std::path::PathBuf;

use clap::Parser;
use haunt_engine::assets::{AssetPaths, ImageTextureLoader, TextureLibrary};
use haunt_engine::audio::AmbientTrack;
use haunt_engine::config::Config;
use haunt_engine::debug::ParameterPanel;
use haunt_engine::foundation::logging;
use haunt_engine::runtime::StartupChoice;
use haunt_engine::AppError;
use rand::rngs::StdRng;
use rand::SeedableRng;

use haunted_house::app::HauntedHouse;
use haunted_house::config::HauntedConfig;
use haunted_house::host::{HostError, RunOptions};
use haunted_house::scene_builder::build_scene;

#[cfg(not(feature = "windowed"))]
use haunted_house::host::run_headless as run_host;
#[cfg(feature = "windowed")]
use haunted_house::window::run_windowed as run_host;

/// Haunted house scene with orbiting ghost lights
#[derive(Parser, Debug)]
#[command(name = "haunted_house", version, about)]
struct Cli {
    /// Scene configuration (.toml or .ron); defaults are used if it does not exist
    #[arg(short, long, value_name = "PATH", default_value = "haunted_house.toml")]
    config: PathBuf,

    /// Start with ambient audio without asking
    #[arg(long, conflicts_with = "silent")]
    audio: bool,

    /// Start without audio without asking
    #[arg(long)]
    silent: bool,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    frames: Option<u64>,

    /// Seed for the grave layout
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Print the debug panel entries and exit
    #[arg(long)]
    list_params: bool,
}

impl Cli {
    fn choice(&self) -> Option<StartupChoice> {
        if self.audio {
            Some(StartupChoice::EnableAudio)
        } else if self.silent {
            Some(StartupChoice::Silent)
        } else {
            None
        }
    }
}

fn print_panel(panel: &ParameterPanel) {
    println!("{}", panel.title());
    for entry in panel.entries() {
        let value = entry.value.to_string();
        match entry.range {
            Some(range) => println!(
                "  {:<28} {:>8}   [{} .. {}, step {}]",
                entry.label, value, range.min, range.max, range.step
            ),
            None => println!("  {:<28} {:>8}", entry.label, value),
        }
    }
}

fn run(cli: &Cli) -> Result<(), HostError> {
    let config = HauntedConfig::load_or_default(&cli.config).map_err(AppError::from)?;
    config.validate().map_err(AppError::from)?;

    let paths = AssetPaths::new(&config.assets);
    let audio = if cli.list_params {
        AmbientTrack::silent()
    } else {
        AmbientTrack::load(&config.audio, &paths)
    };

    let mut textures = TextureLibrary::new(ImageTextureLoader, paths);
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let scene = build_scene(&config, &mut textures, &mut rng)?;
    let app = HauntedHouse::new(&config, scene, audio);

    if cli.list_params {
        print_panel(app.panel());
        return Ok(());
    }

    let options = RunOptions {
        choice: cli.choice(),
        max_frames: cli.frames,
    };
    let rendered = run_host(&config, app, options)?;
    log::info!("Rendered {} frames", rendered);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init();

    log::info!("Starting Haunted House");
    match run(&cli) {
        Ok(()) => {
            log::info!("Haunted House finished");
            Ok(())
        }
        Err(e) => {
            log::error!("Haunted House failed: {}", e);
            Err(e.into())
        }
    }
}

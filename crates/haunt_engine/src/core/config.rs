//! # Unified Configuration Types
//!
//! Subsystem configuration structures that applications embed in their own
//! configuration files. Every type is serializable and has defaults matching
//! a desktop window at 60 Hz.
//!
//! ## Configuration Categories
//!
//! - **Window Config**: title, size, refresh interval
//! - **Renderer Config**: pixel ratio cap, shadow maps
//! - **Asset Config**: search paths for textures and audio
//! - **Audio Config**: ambient clip, volume, toggle key

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::input::KeyCode;

pub use crate::config::{Config, ConfigError};

/// # Window Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial width in logical pixels
    pub width: u32,
    /// Initial height in logical pixels
    pub height: u32,
    /// Display refresh rate the headless host paces frames to
    pub refresh_hz: u32,
}

impl WindowConfig {
    /// Time between display refresh ticks
    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.refresh_hz.max(1)))
    }

    /// Initial aspect ratio
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid("Window size must be non-zero".to_string()));
        }
        if self.refresh_hz == 0 {
            return Err(ConfigError::Invalid("Refresh rate must be at least 1 Hz".to_string()));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Haunt Engine Application".to_string(),
            width: 1280,
            height: 720,
            refresh_hz: 60,
        }
    }
}

/// Shadow-map filtering requested from the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadowMapType {
    /// Single sample, hard edges
    Basic,
    /// Percentage-closer filtering
    Pcf,
    /// Percentage-closer filtering with softened edges
    PcfSoft,
}

/// # Renderer Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Upper bound on the device pixel ratio handed to the backend
    pub max_pixel_ratio: f32,
    /// Whether shadow maps are generated at all
    pub shadows_enabled: bool,
    /// Shadow-map filtering
    pub shadow_map_type: ShadowMapType,
}

impl RendererConfig {
    /// Pixel ratio the backend should use for a device ratio
    pub fn effective_pixel_ratio(&self, device_pixel_ratio: f32) -> f32 {
        device_pixel_ratio.min(self.max_pixel_ratio)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
            shadows_enabled: true,
            shadow_map_type: ShadowMapType::PcfSoft,
        }
    }
}

/// # Asset Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directories searched, in order, for relative asset paths
    pub search_paths: Vec<PathBuf>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            search_paths: vec![PathBuf::from("static"), PathBuf::from("resources")],
        }
    }
}

/// # Audio Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Ambient clip, relative to the asset search paths
    pub ambient_clip: PathBuf,
    /// Playback volume (0.0 - 1.0)
    pub volume: f32,
    /// Key that pauses and resumes ambient playback
    pub toggle_key: KeyCode,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            ambient_clip: PathBuf::from("audio/ambient.ogg"),
            volume: 0.7,
            toggle_key: KeyCode::M,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval_from_refresh_rate() {
        let window = WindowConfig { refresh_hz: 50, ..Default::default() };
        assert_eq!(window.frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_zero_sized_window_is_invalid() {
        let window = WindowConfig { width: 0, ..Default::default() };
        assert!(window.validate().is_err());
        assert!(WindowConfig::default().validate().is_ok());
    }

    #[test]
    fn test_pixel_ratio_is_capped() {
        let renderer = RendererConfig::default();
        assert_eq!(renderer.effective_pixel_ratio(3.0), 2.0);
        assert_eq!(renderer.effective_pixel_ratio(1.25), 1.25);
    }
}

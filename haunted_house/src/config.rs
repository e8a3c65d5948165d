//! Scene configuration
//!
//! Every constant of the scene lives here with its default. A TOML or RON
//! file may override any subset; missing sections keep their defaults.

use std::collections::BTreeMap;

use haunt_engine::config::{Config, ConfigError};
use haunt_engine::core::config::{AssetConfig, AudioConfig, RendererConfig, WindowConfig};
use haunt_engine::debug::ParamValue;
use haunt_engine::foundation::math::{Color, Vec3};
use haunt_engine::scene::{Fog, ShadowParams, SkyParams};
use serde::{Deserialize, Deserializer, Serialize};

use crate::assets::{default_surfaces, Surface, SurfaceConfig};
use crate::ghosts::{default_ghosts, GhostConfig};

/// Placement of the grave stones
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraveLayout {
    /// Number of graves
    pub count: usize,
    /// Inner radius of the ring around the house
    pub min_radius: f32,
    /// Width of the ring
    pub radius_range: f32,
    /// Upper bound of the random height above the ground
    pub max_height: f32,
    /// Full width of the random tilt on each axis, in radians
    pub jitter: f32,
}

impl Default for GraveLayout {
    fn default() -> Self {
        Self {
            count: 35,
            min_radius: 4.0,
            radius_range: 6.0,
            max_height: 0.4,
            jitter: 0.4,
        }
    }
}

/// Ambient fill light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLightConfig {
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
}

/// Moonlight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLightConfig {
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
    /// Position; the light aims at the origin
    pub position: [f32; 3],
    /// Shadow map settings
    pub shadow: ShadowParams,
}

/// Warm light above the door
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorLightConfig {
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
    /// Position relative to the house
    pub position: [f32; 3],
}

/// Static lights and the ghosts' shadow settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    /// Ambient light
    pub ambient: AmbientLightConfig,
    /// Directional light
    pub directional: DirectionalLightConfig,
    /// Door light
    pub door: DoorLightConfig,
    /// Shadow map settings shared by the ghosts
    pub ghost_shadow: ShadowParams,
}

impl Default for LightsConfig {
    fn default() -> Self {
        let moonlight = Color::from_hex(0x86cdff);
        Self {
            ambient: AmbientLightConfig { color: moonlight, intensity: 0.275 },
            directional: DirectionalLightConfig {
                color: moonlight,
                intensity: 1.0,
                position: [3.0, 2.0, -8.0],
                shadow: ShadowParams { map_size: 256, near: 0.5, far: 20.0, extent: 8.0 },
            },
            door: DoorLightConfig {
                color: Color::from_hex(0xff7d46),
                intensity: 5.0,
                position: [0.0, 2.2, 2.5],
            },
            ghost_shadow: ShadowParams { map_size: 256, near: 0.5, far: 20.0, ..ShadowParams::default() },
        }
    }
}

/// Perspective camera and orbit controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Initial position; the camera looks at the origin
    pub position: [f32; 3],
    /// Orbit damping factor; zero disables damping
    pub damping: f32,
}

impl CameraConfig {
    /// Initial position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 100.0,
            position: [4.0, 2.0, 8.0],
            damping: 0.05,
        }
    }
}

/// Sky dome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Scattering parameters
    pub params: SkyParams,
    /// Uniform scale of the dome
    pub scale: f32,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self { params: SkyParams::default(), scale: 100.0 }
    }
}

fn surfaces_over_defaults<'de, D>(deserializer: D) -> Result<BTreeMap<Surface, SurfaceConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut surfaces = default_surfaces();
    surfaces.extend(BTreeMap::<Surface, SurfaceConfig>::deserialize(deserializer)?);
    Ok(surfaces)
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HauntedConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Renderer settings
    pub renderer: RendererConfig,
    /// Asset search paths
    pub assets: AssetConfig,
    /// Texture set per surface; listed surfaces replace their default set
    #[serde(deserialize_with = "surfaces_over_defaults")]
    pub textures: BTreeMap<Surface, SurfaceConfig>,
    /// Ambient audio
    pub audio: AudioConfig,
    /// Grave placement
    pub layout: GraveLayout,
    /// Ghost orbits and lights
    pub ghosts: Vec<GhostConfig>,
    /// Static lights
    pub lights: LightsConfig,
    /// Camera
    pub camera: CameraConfig,
    /// Scene fog
    pub fog: Fog,
    /// Sky dome
    pub sky: SkyConfig,
    /// Panel values applied at startup, by label
    pub panel: BTreeMap<String, ParamValue>,
}

impl Default for HauntedConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                title: "Haunted House".to_string(),
                ..WindowConfig::default()
            },
            renderer: RendererConfig::default(),
            assets: AssetConfig::default(),
            textures: default_surfaces(),
            audio: AudioConfig::default(),
            layout: GraveLayout::default(),
            ghosts: default_ghosts(),
            lights: LightsConfig::default(),
            camera: CameraConfig::default(),
            fog: Fog::exp2(Color::from_hex(0x02343f), 0.08),
            sky: SkyConfig::default(),
            panel: BTreeMap::new(),
        }
    }
}

impl Config for HauntedConfig {}

impl HauntedConfig {
    /// Check values the scene cannot be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        if self.layout.radius_range < 0.0 || self.layout.min_radius < 0.0 {
            return Err(ConfigError::Invalid("Grave radii must not be negative".to_string()));
        }
        if self.layout.max_height < 0.0 || self.layout.jitter < 0.0 {
            return Err(ConfigError::Invalid("Grave height and jitter must not be negative".to_string()));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return Err(ConfigError::Invalid(format!(
                "Camera clip planes {}..{} are not a valid range",
                self.camera.near, self.camera.far
            )));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ConfigError::Invalid(format!("Audio volume {} outside 0..1", self.audio.volume)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults_describe_the_scene() {
        let config = HauntedConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.layout.count, 35);
        assert_eq!(config.ghosts.len(), 3);
        assert_eq!(config.fog.color.to_hex(), 0x02343f);
        assert_eq!(config.lights.directional.shadow.extent, 8.0);
        assert_eq!(config.window.title, "Haunted House");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let text = r##"
[layout]
count = 10

[fog]
color = "#000000"
density = 0.02

[panel]
"fog density" = 0.1
"moonlight shadows" = false
"##;
        let config = HauntedConfig::from_str_for_path(Path::new("haunted.toml"), text).unwrap();
        assert_eq!(config.layout.count, 10);
        assert_eq!(config.layout.min_radius, 4.0);
        assert_eq!(config.fog.density, 0.02);
        assert_eq!(config.panel["fog density"], ParamValue::Float(0.1));
        assert_eq!(config.panel["moonlight shadows"], ParamValue::Bool(false));
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_ron_overrides_one_texture_set() {
        let text = r#"(
            textures: {
                roof: (color: Some("roof/plain.png"), repeat: (3.0, 1.0)),
            },
        )"#;
        let config = HauntedConfig::from_str_for_path(Path::new("haunted.ron"), text).unwrap();
        assert_eq!(config.textures.len(), Surface::ALL.len());
        assert_eq!(config.textures[&Surface::Roof].repeat, [3.0, 1.0]);
        assert!(config.textures[&Surface::Roof].normal.is_none());
        assert_eq!(config.textures[&Surface::Ground], default_surfaces()[&Surface::Ground]);
    }

    #[test]
    fn test_scene_builds_from_one_texture_override() {
        use crate::assets::tests::library;
        use crate::scene_builder::build_scene;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let text = r#"(
            textures: {
                door: (color: Some("door/plain.png")),
            },
        )"#;
        let config = HauntedConfig::from_str_for_path(Path::new("haunted.ron"), text).unwrap();
        let scene = build_scene(&config, &mut library(), &mut StdRng::seed_from_u64(3)).unwrap();
        assert!(scene.material(Surface::Ground).is_some());
        assert!(scene.material(Surface::Door).is_some());
    }

    #[test]
    fn test_invalid_clip_planes_are_rejected() {
        let mut config = HauntedConfig::default();
        config.camera.near = 5.0;
        config.camera.far = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}

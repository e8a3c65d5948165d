//! Light sources
//!
//! Lights sit in the scene graph like any other node; their position is the
//! node's world translation. The [`Light`] itself only carries photometric and
//! shadow parameters and is shared so the parameter panel can edit it.

use serde::{Deserialize, Serialize};

use crate::foundation::collections::Shared;
use crate::foundation::math::{Color, Vec3};

/// Light types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction, no position
    Ambient,
    /// Parallel rays from the node position toward `target`
    Directional {
        /// World-space point the light aims at
        target: Vec3,
    },
    /// Omnidirectional light with a falloff
    Point {
        /// Range after which the light contributes nothing (0 = infinite)
        distance: f32,
        /// Falloff exponent
        decay: f32,
    },
}

/// Shadow map projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowParams {
    /// Square shadow map resolution
    pub map_size: u32,
    /// Near plane of the shadow camera
    pub near: f32,
    /// Far plane of the shadow camera
    pub far: f32,
    /// Orthographic half-extent, used by directional lights
    pub extent: f32,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            map_size: 512,
            near: 0.5,
            far: 500.0,
            extent: 5.0,
        }
    }
}

impl ShadowParams {
    /// Orthographic frustum bounds as (left, right, top, bottom)
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (-self.extent, self.extent, self.extent, -self.extent)
    }
}

/// Light source
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
    /// Light type
    pub kind: LightKind,
    /// Whether the light renders a shadow map
    pub cast_shadow: bool,
    /// Shadow map parameters, used while `cast_shadow` is set
    pub shadow: ShadowParams,
}

/// Shared light handle
pub type LightHandle = Shared<Light>;

impl Light {
    /// Create an ambient light
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::new(LightKind::Ambient, color, intensity)
    }

    /// Create a directional light aimed at `target`
    pub fn directional(color: Color, intensity: f32, target: Vec3) -> Self {
        Self::new(LightKind::Directional { target }, color, intensity)
    }

    /// Create a point light with quadratic decay
    pub fn point(color: Color, intensity: f32, distance: f32) -> Self {
        Self::new(LightKind::Point { distance, decay: 2.0 }, color, intensity)
    }

    fn new(kind: LightKind, color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind,
            cast_shadow: false,
            shadow: ShadowParams::default(),
        }
    }

    /// Enable shadow casting with the given parameters
    ///
    /// Ambient lights never cast.
    #[must_use]
    pub fn with_shadow(mut self, shadow: ShadowParams) -> Self {
        self.cast_shadow = !matches!(self.kind, LightKind::Ambient);
        self.shadow = shadow;
        self
    }

    /// Wrap in a shared handle
    pub fn into_handle(self) -> LightHandle {
        Shared::new(self)
    }

    /// Whether this light currently renders a shadow map
    pub fn casts_shadow(&self) -> bool {
        self.cast_shadow && !matches!(self.kind, LightKind::Ambient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_light_never_casts() {
        let light = Light::ambient(Color::from_hex(0x86cdff), 0.275).with_shadow(ShadowParams::default());
        assert!(!light.casts_shadow());
    }

    #[test]
    fn test_directional_shadow_bounds() {
        let light = Light::directional(Color::WHITE, 1.0, Vec3::zeros()).with_shadow(ShadowParams {
            map_size: 256,
            near: 0.5,
            far: 20.0,
            extent: 8.0,
        });
        assert!(light.casts_shadow());
        assert_eq!(light.shadow.bounds(), (-8.0, 8.0, 8.0, -8.0));
    }

    #[test]
    fn test_point_light_defaults_to_quadratic_decay() {
        let light = Light::point(Color::from_hex(0xff00ff), 2.0, 3.0);
        assert_eq!(light.kind, LightKind::Point { distance: 3.0, decay: 2.0 });
        assert!(!light.cast_shadow);
    }
}

//! Scene-wide atmosphere: fog and the sky dome

use serde::{Deserialize, Serialize};

use crate::foundation::collections::Shared;
use crate::foundation::math::{Color, Vec3};

/// Exponential-squared distance fog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fog {
    /// Fog color
    pub color: Color,
    /// Density; visibility falls off as `exp(-(density * distance)^2)`
    pub density: f32,
}

impl Fog {
    /// Create exponential-squared fog
    pub fn exp2(color: Color, density: f32) -> Self {
        Self { color, density }
    }

    /// Fraction of an object's own color left at `distance`
    pub fn visibility(&self, distance: f32) -> f32 {
        let d = self.density * distance;
        (-d * d).exp()
    }
}

/// Shared fog handle
pub type FogHandle = Shared<Fog>;

/// Atmospheric scattering parameters for the sky dome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyParams {
    /// Haze amount
    pub turbidity: f32,
    /// Rayleigh scattering strength
    pub rayleigh: f32,
    /// Mie scattering coefficient
    pub mie_coefficient: f32,
    /// Mie directional anisotropy
    pub mie_directional_g: f32,
    /// Direction toward the sun
    pub sun_position: [f32; 3],
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 3.0,
            mie_coefficient: 0.1,
            mie_directional_g: 0.9,
            sun_position: [0.3, -0.038, -0.95],
        }
    }
}

impl SkyParams {
    /// Sun direction as a vector
    pub fn sun_direction(&self) -> Vec3 {
        Vec3::from(self.sun_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fog_visibility_falls_off() {
        let fog = Fog::exp2(Color::from_hex(0x02343f), 0.08);
        assert_relative_eq!(fog.visibility(0.0), 1.0);
        assert_relative_eq!(fog.visibility(10.0), (-0.64_f32).exp(), epsilon = 1e-6);
        assert!(fog.visibility(20.0) < fog.visibility(10.0));
    }

    #[test]
    fn test_partial_sky_fills_defaults() {
        let sky: SkyParams = ron::from_str("(turbidity: 4.5)").unwrap();
        assert_eq!(sky.turbidity, 4.5);
        assert_eq!(sky.rayleigh, 3.0);
        assert_eq!(sky.sun_position, [0.3, -0.038, -0.95]);
    }
}

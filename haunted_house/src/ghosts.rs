//! Ghost lights circling the house
//!
//! Each ghost is a point light on a horizontal circle around the origin.
//! Positions are closed-form functions of elapsed time, so any frame can be
//! reproduced from the clock alone.

use haunt_engine::foundation::math::{Color, Vec3};
use haunt_engine::scene::{LightHandle, NodeId, SceneError, SceneGraph};
use serde::{Deserialize, Serialize};

/// Vertical motion of a ghost over time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bob {
    /// `sin(a·t) + sin(b·t)`
    Sum(f32, f32),
    /// `sin(θ) · sin(a·t) · sin(b·t)`, where `θ` is the orbit angle
    Modulated(f32, f32),
}

impl Bob {
    fn height(self, elapsed: f32, angle: f32) -> f32 {
        match self {
            Self::Sum(a, b) => (elapsed * a).sin() + (elapsed * b).sin(),
            Self::Modulated(a, b) => angle.sin() * (elapsed * a).sin() * (elapsed * b).sin(),
        }
    }
}

/// One ghost: its orbit and its light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostConfig {
    /// Radians per second; negative orbits clockwise seen from above
    pub angular_speed: f32,
    /// Orbit radius
    pub radius: f32,
    /// Vertical motion
    pub bob: Bob,
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
    /// Light range
    pub distance: f32,
}

impl GhostConfig {
    /// Orbit angle at `elapsed` seconds
    pub fn angle(&self, elapsed: f32) -> f32 {
        elapsed * self.angular_speed
    }

    /// Position at `elapsed` seconds
    pub fn position(&self, elapsed: f32) -> Vec3 {
        let angle = self.angle(elapsed);
        Vec3::new(
            angle.cos() * self.radius,
            self.bob.height(elapsed, angle),
            angle.sin() * self.radius,
        )
    }
}

/// The three ghosts of the default scene
pub fn default_ghosts() -> Vec<GhostConfig> {
    let ghost = |angular_speed, radius, bob, hex| GhostConfig {
        angular_speed,
        radius,
        bob,
        color: Color::from_hex(hex),
        intensity: 2.0,
        distance: 3.0,
    };
    vec![
        ghost(0.5, 4.0, Bob::Sum(3.0, 2.5), 0xff00ff),
        ghost(-0.32, 5.0, Bob::Sum(4.0, 2.5), 0x00ffff),
        ghost(0.23, 6.0, Bob::Modulated(2.0, 2.5), 0xffff00),
    ]
}

/// A ghost placed in a scene graph
#[derive(Debug, Clone)]
pub struct Ghost {
    /// Light node moved every frame
    pub node: NodeId,
    /// The ghost's light, shared with the panel
    pub light: LightHandle,
    /// Orbit parameters
    pub orbit: GhostConfig,
}

/// Move every ghost to its position at `elapsed` seconds
pub fn place_ghosts(graph: &mut SceneGraph, ghosts: &[Ghost], elapsed: f32) -> Result<(), SceneError> {
    for ghost in ghosts {
        graph.set_position(ghost.node, ghost.orbit.position(elapsed))?;
    }
    Ok(())
}

//! Damped orbit camera controls
//!
//! Pointer input accumulates rotation and zoom requests; [`OrbitControls::update`]
//! applies them to the camera once per frame. With damping enabled only a
//! fraction of the outstanding rotation is applied each frame and the rest
//! decays, so the camera keeps gliding after the pointer stops.

use std::f32::consts::TAU;

use crate::foundation::math::Vec3;
use crate::render::Camera;

const MAX_ELEVATION: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
const ZOOM_STEP: f32 = 0.95;
const EPSILON: f32 = 1e-4;

/// Orbit, zoom and damping around a target point
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point the camera orbits
    pub target: Vec3,
    /// Whether rotation glides to a stop
    pub enable_damping: bool,
    /// Fraction of outstanding rotation applied per update
    pub damping_factor: f32,
    /// Multiplier on pointer rotation
    pub rotate_speed: f32,
    /// Closest allowed distance to the target
    pub min_distance: f32,
    /// Farthest allowed distance to the target
    pub max_distance: f32,
    azimuth_delta: f32,
    elevation_delta: f32,
    zoom_scale: f32,
    viewport_height: f32,
}

impl OrbitControls {
    /// Controls orbiting `target`, without damping
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            azimuth_delta: 0.0,
            elevation_delta: 0.0,
            zoom_scale: 1.0,
            viewport_height: 600.0,
        }
    }

    /// Builder: enable damping with the given factor
    #[must_use]
    pub fn with_damping(mut self, factor: f32) -> Self {
        self.enable_damping = true;
        self.damping_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Viewport height in pixels; a drag of that length is one full turn
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(1.0);
    }

    /// Queue rotation from a pointer drag in pixels
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        let per_pixel = TAU * self.rotate_speed / self.viewport_height;
        self.azimuth_delta -= dx * per_pixel;
        self.elevation_delta += dy * per_pixel;
    }

    /// Queue a zoom step; positive moves away from the target
    pub fn zoom(&mut self, steps: f32) {
        self.zoom_scale *= ZOOM_STEP.powf(-steps);
    }

    /// Apply queued input to the camera
    ///
    /// Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let offset = camera.position - self.target;
        let mut radius = offset.norm();
        let mut azimuth = f32::atan2(offset.x, offset.z);
        let horizontal = (offset.x * offset.x + offset.z * offset.z).sqrt();
        let mut elevation = f32::atan2(offset.y, horizontal);

        let applied = if self.enable_damping { self.damping_factor } else { 1.0 };
        azimuth += self.azimuth_delta * applied;
        elevation = (elevation + self.elevation_delta * applied).clamp(-MAX_ELEVATION, MAX_ELEVATION);
        radius = (radius * self.zoom_scale).clamp(self.min_distance, self.max_distance);

        let position = self.target
            + Vec3::new(
                radius * elevation.cos() * azimuth.sin(),
                radius * elevation.sin(),
                radius * elevation.cos() * azimuth.cos(),
            );

        if self.enable_damping {
            self.azimuth_delta *= 1.0 - self.damping_factor;
            self.elevation_delta *= 1.0 - self.damping_factor;
        } else {
            self.azimuth_delta = 0.0;
            self.elevation_delta = 0.0;
        }
        self.zoom_scale = 1.0;

        let moved = (position - camera.position).norm() > EPSILON || camera.target != self.target;
        camera.position = position;
        camera.target = self.target;
        moved
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}

//! Perspective camera
//!
//! Handed to the rendering backend every frame along with the scene graph.
//! Matrices are computed when asked for.

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Perspective camera aimed at a target point
///
/// Right-handed and Y-up. [`OrbitControls`](crate::render::OrbitControls)
/// move `position` around `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye point
    pub position: Vec3,
    /// Look-at point
    pub target: Vec3,
    /// World up
    pub up: Vec3,
    /// Vertical field of view, radians
    pub fov: f32,
    /// Viewport width over height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Camera {
    /// Camera at `position` looking at the origin, field of view in degrees
    ///
    /// ```rust
    /// use haunt_engine::foundation::math::Vec3;
    /// use haunt_engine::render::Camera;
    ///
    /// let camera = Camera::perspective(Vec3::new(4.0, 2.0, 8.0), 75.0, 16.0 / 9.0, 0.1, 100.0);
    /// assert_eq!(camera.target, Vec3::zeros());
    /// ```
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    /// Follow a viewport resize
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("Camera aspect {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Distance from the camera to its target
    pub fn distance_to_target(&self) -> f32 {
        (self.position - self.target).norm()
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(self.position), &Point3::from(self.target), &self.up)
    }

    /// Camera-to-clip transform
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Combined `projection × view`
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(Vec3::new(0.0, 3.0, 3.0), 45.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

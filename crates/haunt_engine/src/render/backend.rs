//! Backend abstraction for the rendering system
//!
//! A backend receives the whole scene graph and the camera once per frame.
//! It owns everything graphics-API specific, including shadow map generation
//! from the per-light [`ShadowParams`](crate::scene::ShadowParams).

use crate::core::config::RendererConfig;
use crate::render::{Camera, RenderError};
use crate::scene::{NodeKind, SceneGraph, ShadowFlags};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Main rendering backend trait
pub trait RenderBackend {
    /// Draw one frame of `scene` as seen from `camera`
    fn render(&mut self, scene: &SceneGraph, camera: &Camera) -> BackendResult<()>;

    /// Resize the drawing surface
    ///
    /// `pixel_ratio` is the device pixel ratio already capped by the caller.
    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32);
}

/// What one frame contained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Mesh nodes drawn
    pub draw_calls: u32,
    /// Triangles submitted
    pub triangles: u32,
    /// Lights contributing
    pub lights: u32,
    /// Shadow maps rendered
    pub shadow_maps: u32,
    /// Meshes drawn into shadow maps
    pub shadow_casters: u32,
    /// Bound texture slots whose image is missing
    pub missing_textures: u32,
}

/// Headless backend that walks the scene and records frame statistics
///
/// Used when no window is available and by tests.
#[derive(Debug)]
pub struct SceneStatsRenderer {
    config: RendererConfig,
    width: u32,
    height: u32,
    pixel_ratio: f32,
    frames_rendered: u64,
    last_frame: FrameStats,
}

impl SceneStatsRenderer {
    /// Renderer with default settings
    pub fn new() -> Self {
        Self::with_config(RendererConfig::default())
    }

    /// Renderer with the given settings
    pub fn with_config(config: RendererConfig) -> Self {
        Self {
            config,
            width: 0,
            height: 0,
            pixel_ratio: 1.0,
            frames_rendered: 0,
            last_frame: FrameStats::default(),
        }
    }

    /// Frames drawn so far
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Statistics of the most recent frame
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    /// Drawing buffer size in physical pixels
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| (v as f32 * self.pixel_ratio).round() as u32;
        (scale(self.width), scale(self.height))
    }

    fn collect(&self, scene: &SceneGraph) -> FrameStats {
        let mut stats = FrameStats::default();
        for id in scene.traverse() {
            let Some(node) = scene.get(id) else { continue };
            if !node.visible {
                continue;
            }
            match &node.kind {
                NodeKind::Mesh { geometry, material } => {
                    stats.draw_calls += 1;
                    stats.triangles += geometry.triangle_count();
                    stats.missing_textures += material.borrow().missing_slots().len() as u32;
                    if node.shadows.contains(ShadowFlags::CAST) {
                        stats.shadow_casters += 1;
                    }
                }
                NodeKind::Light(light) => {
                    let light = light.borrow();
                    stats.lights += 1;
                    if self.config.shadows_enabled && light.casts_shadow() {
                        stats.shadow_maps += 1;
                    }
                }
                NodeKind::Sky(_) => {
                    stats.draw_calls += 1;
                    stats.triangles += 12;
                }
                NodeKind::Group => {}
            }
        }
        if !self.config.shadows_enabled {
            stats.shadow_casters = 0;
        }
        stats
    }
}

impl Default for SceneStatsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for SceneStatsRenderer {
    fn render(&mut self, scene: &SceneGraph, camera: &Camera) -> BackendResult<()> {
        let view_projection = camera.view_projection_matrix();
        if view_projection.iter().any(|v| !v.is_finite()) {
            return Err(RenderError::RenderingFailed(format!(
                "Degenerate camera at {:?} looking at {:?}",
                camera.position, camera.target
            )));
        }

        self.last_frame = self.collect(scene);
        self.frames_rendered += 1;
        log::trace!("Frame {}: {:?}", self.frames_rendered, self.last_frame);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.width = width;
        self.height = height;
        self.pixel_ratio = pixel_ratio;
        log::debug!("Render surface resized to {}x{} @{}x", width, height, pixel_ratio);
    }
}

//! Texture descriptors and loading
//!
//! A [`Texture`] records where the image came from, how it is sampled and
//! whether it could be read. Failed loads do not abort scene construction:
//! the texture is kept with [`TextureStatus::Missing`] and the rendering
//! backend decides how to draw the slot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::assets::{AssetError, AssetPaths};
use crate::foundation::collections::Shared;

/// How texel values are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Gamma-encoded color data
    Srgb,
    /// Linear data (normals, roughness, masks)
    Linear,
}

/// Texture coordinate wrapping outside `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Clamp coordinates to the edge texel
    ClampToEdge,
    /// Tile the image
    Repeat,
}

/// Outcome of loading the image behind a texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureStatus {
    /// Image decoded successfully
    Loaded {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// Image could not be loaded; holds the diagnostic
    Missing(String),
}

/// Texture resource with sampling parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    /// Resolved file path
    pub path: PathBuf,
    /// Color interpretation
    pub color_space: ColorSpace,
    /// Wrapping along U
    pub wrap_s: WrapMode,
    /// Wrapping along V
    pub wrap_t: WrapMode,
    /// UV repeat factors
    pub repeat: [f32; 2],
    /// Load outcome
    pub status: TextureStatus,
}

/// Shared texture handle; sampling edits are seen by every material using it
pub type TextureHandle = Shared<Texture>;

impl Texture {
    /// Create a texture description with default sampling
    pub fn new(path: impl Into<PathBuf>, status: TextureStatus) -> Self {
        Self {
            path: path.into(),
            color_space: ColorSpace::Linear,
            wrap_s: WrapMode::ClampToEdge,
            wrap_t: WrapMode::ClampToEdge,
            repeat: [1.0, 1.0],
            status,
        }
    }

    /// Whether the image loaded
    pub fn is_loaded(&self) -> bool {
        matches!(self.status, TextureStatus::Loaded { .. })
    }

    /// Tile `x` times along U and `y` times along V
    ///
    /// Only axes with a factor other than one switch to [`WrapMode::Repeat`].
    pub fn set_repeat(&mut self, x: f32, y: f32) {
        self.repeat = [x, y];
        if (x - 1.0).abs() > f32::EPSILON {
            self.wrap_s = WrapMode::Repeat;
        }
        if (y - 1.0).abs() > f32::EPSILON {
            self.wrap_t = WrapMode::Repeat;
        }
    }
}

/// Source of image metadata for textures
pub trait TextureLoader {
    /// Read the image at `path`, returning its dimensions
    fn load(&mut self, path: &Path) -> Result<(u32, u32), AssetError>;
}

/// Texture loader backed by the `image` crate
///
/// Only the image header is decoded; pixel upload belongs to the backend.
#[derive(Debug, Default)]
pub struct ImageTextureLoader;

impl TextureLoader for ImageTextureLoader {
    fn load(&mut self, path: &Path) -> Result<(u32, u32), AssetError> {
        if !path.exists() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }
        image::image_dimensions(path)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to read image {}: {}", path.display(), e)))
    }
}

/// Loads textures once per path and hands out shared handles
pub struct TextureLibrary<L: TextureLoader> {
    loader: L,
    paths: AssetPaths,
    cache: HashMap<PathBuf, TextureHandle>,
    failures: usize,
}

impl<L: TextureLoader> TextureLibrary<L> {
    /// Create a library that resolves paths and loads through `loader`
    pub fn new(loader: L, paths: AssetPaths) -> Self {
        Self {
            loader,
            paths,
            cache: HashMap::new(),
            failures: 0,
        }
    }

    /// Load a texture, reusing the handle if this path was loaded before
    ///
    /// A failed load is logged and yields a texture marked missing.
    pub fn load(&mut self, path: impl AsRef<Path>, color_space: ColorSpace) -> TextureHandle {
        let resolved = self.paths.resolve(path);
        if let Some(handle) = self.cache.get(&resolved) {
            return handle.clone();
        }

        let status = match self.loader.load(&resolved) {
            Ok((width, height)) => {
                log::debug!("Loaded texture {} ({}x{})", resolved.display(), width, height);
                TextureStatus::Loaded { width, height }
            }
            Err(e) => {
                log::error!("Texture load failed: {}", e);
                self.failures += 1;
                TextureStatus::Missing(e.to_string())
            }
        };

        let mut texture = Texture::new(resolved.clone(), status);
        texture.color_space = color_space;
        let handle = Shared::new(texture);
        self.cache.insert(resolved, handle.clone());
        handle
    }

    /// Number of distinct textures requested so far
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether no texture has been requested
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Number of textures that failed to load
    pub fn failures(&self) -> usize {
        self.failures
    }
}

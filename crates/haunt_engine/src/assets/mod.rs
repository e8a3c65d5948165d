//! Asset management system
//!
//! Textures are loaded synchronously at scene construction through a
//! [`TextureLoader`]; larger assets such as audio clips are read on a
//! background thread by [`loader::spawn_load`] and reported over a channel.

pub mod texture;
pub mod loader;

pub use texture::{
    ColorSpace, WrapMode, Texture, TextureHandle, TextureStatus,
    TextureLoader, ImageTextureLoader, TextureLibrary,
};
pub use loader::{LoadEvent, PendingLoad, spawn_load};

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::config::AssetConfig;

/// Asset trait for loadable resources
pub trait Asset: Send + Sync + 'static {
    /// Load asset from raw bytes
    fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> where Self: Sized;
}

/// Resolves relative asset paths against the configured search paths
#[derive(Debug, Clone)]
pub struct AssetPaths {
    search_paths: Vec<PathBuf>,
}

impl AssetPaths {
    /// Create a resolver from the asset configuration
    pub fn new(config: &AssetConfig) -> Self {
        Self { search_paths: config.search_paths.clone() }
    }

    /// First existing candidate under the search paths, or the path itself
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            return path.to_path_buf();
        }
        self.search_paths
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.exists())
            .unwrap_or_else(|| path.to_path_buf())
    }
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_falls_back_to_given_path() {
        let paths = AssetPaths::new(&AssetConfig { search_paths: vec![PathBuf::from("no/such/dir")] });
        assert_eq!(paths.resolve("door/color.jpg"), PathBuf::from("door/color.jpg"));
    }

    #[test]
    fn test_resolve_finds_file_in_search_path() {
        let dir = std::env::temp_dir().join("haunt_engine_asset_paths_test");
        std::fs::create_dir_all(dir.join("wall")).unwrap();
        std::fs::write(dir.join("wall/diff.jpg"), b"x").unwrap();

        let paths = AssetPaths::new(&AssetConfig {
            search_paths: vec![PathBuf::from("no/such/dir"), dir.clone()],
        });
        assert_eq!(paths.resolve("wall/diff.jpg"), dir.join("wall/diff.jpg"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

//! # Haunted House
//!
//! A textured house on a patch of ground, surrounded by graves, bushes and
//! three ghost lights that circle it. Built on `haunt_engine`.
//!
//! - [`scene_builder`] turns a [`config::HauntedConfig`] into a scene graph
//! - [`panel`] exposes the tweakable fields of that scene
//! - [`app`] holds the running state and the per-frame [`app::HauntedHouse::tick`]
//! - [`host`] and, with the `windowed` feature, `window` drive the frame loop

#![warn(missing_docs)]

pub mod app;
pub mod assets;
pub mod config;
pub mod ghosts;
pub mod host;
pub mod panel;
pub mod scene_builder;
#[cfg(feature = "windowed")]
pub mod window;

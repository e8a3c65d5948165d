//! # Haunt Engine
//!
//! A small retained-mode scene engine for decorative real-time scenes.
//!
//! ## Features
//!
//! - **Scene Graph**: arena-backed node tree with on-demand world transforms
//! - **Shared Materials**: one material or light instance referenced by many nodes
//! - **Frame Loop**: start gate and self-rescheduling frame requests
//! - **Ambient Audio**: background clip loading with a non-blocking readiness flag
//! - **Debug Panel**: live-editable parameter bindings on shared objects
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use haunt_engine::prelude::*;
//!
//! let mut scene = SceneGraph::new();
//! let material = MaterialDescriptor::standard().with_name("stone").into_handle();
//! let root = scene.root();
//! scene.spawn(
//!     root,
//!     SceneNode::mesh("block", Geometry::cuboid(1.0, 1.0, 1.0), material),
//! ).unwrap();
//!
//! let camera = Camera::perspective(Vec3::new(4.0, 2.0, 8.0), 75.0, 16.0 / 9.0, 0.1, 100.0);
//! let mut renderer = SceneStatsRenderer::new();
//! renderer.render(&scene, &camera).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod audio;
pub mod scene;
pub mod render;
pub mod input;
pub mod debug;
pub mod runtime;

mod application;

pub use application::{AppError, AppEvent};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, AppEvent,
        foundation::{
            math::{Vec3, Mat4, Transform, Color},
            time::{Clock, FrameTimer},
            collections::Shared,
        },
        scene::{
            SceneGraph, SceneNode, NodeId, NodeKind, ShadowFlags,
            Geometry, MaterialDescriptor, MaterialHandle,
            Light, LightHandle, LightKind, ShadowParams,
            Fog, SkyParams,
        },
        render::{Camera, OrbitControls, RenderBackend, SceneStatsRenderer},
        input::{KeyCode, MouseButton},
        runtime::{StartupGate, StartupChoice, GateState, FrameScheduler, FrameRequests},
        audio::{AmbientTrack, PlaybackState},
        debug::{ParameterPanel, ParamRange, ParamValue},
        config::Config,
        core::config::{WindowConfig, RendererConfig, AssetConfig, AudioConfig},
    };
}

//! Scene management system
//!
//! ```text
//! SceneGraph ── root
//!               ├── Mesh  (GeometryHandle, MaterialHandle)
//!               ├── Group
//!               │    └── Light (LightHandle)
//!               └── Sky   (SkyParams)
//! ```
//!
//! Materials and lights are shared by reference; geometry may be shared by
//! several meshes. Fog is a scene-wide setting held next to the tree.

mod node;
mod graph;
mod geometry;
mod material;
mod light;
mod environment;

pub use node::{NodeId, NodeKind, SceneNode, ShadowFlags};
pub use graph::SceneGraph;
pub use geometry::{Geometry, GeometryHandle};
pub use material::{MaterialDescriptor, MaterialHandle, TextureSlot};
pub use light::{Light, LightHandle, LightKind, ShadowParams};
pub use environment::{Fog, FogHandle, SkyParams};

use thiserror::Error;

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not name a node of this graph
    #[error("Unknown scene node {0:?}")]
    UnknownNode(NodeId),
}

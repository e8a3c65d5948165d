//! Scene nodes

use bitflags::bitflags;

use crate::foundation::collections::new_key_type;
use crate::foundation::math::{Transform, Vec3};
use crate::scene::environment::SkyParams;
use crate::scene::geometry::{Geometry, GeometryHandle};
use crate::scene::light::LightHandle;
use crate::scene::material::MaterialHandle;

new_key_type! {
    /// Stable identifier of a node in a [`SceneGraph`](crate::scene::SceneGraph)
    pub struct NodeId;
}

bitflags! {
    /// Shadow participation of a node
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShadowFlags: u8 {
        /// Occludes light in shadow maps
        const CAST = 1 << 0;
        /// Darkened by shadow maps
        const RECEIVE = 1 << 1;
        /// Both casts and receives
        const BOTH = Self::CAST.bits() | Self::RECEIVE.bits();
    }
}

/// What a node contributes to the frame
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Pure transform, draws nothing
    Group,
    /// Drawable shape with a surface
    Mesh {
        /// Shape, possibly shared with other meshes
        geometry: GeometryHandle,
        /// Surface, shared by reference
        material: MaterialHandle,
    },
    /// Light source positioned by the node transform
    Light(LightHandle),
    /// Sky dome; the node scale sets its size
    Sky(SkyParams),
}

/// A transformable element of the scene
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Name for lookup and diagnostics
    pub name: String,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Node payload
    pub kind: NodeKind,
    /// Shadow participation
    pub shadows: ShadowFlags,
    /// Whether the node and its subtree are drawn
    pub visible: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl SceneNode {
    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            kind,
            shadows: ShadowFlags::empty(),
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Empty grouping node
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    /// Drawable mesh
    pub fn mesh(name: impl Into<String>, geometry: impl Into<GeometryHandle>, material: MaterialHandle) -> Self {
        Self::new(name, NodeKind::Mesh { geometry: geometry.into(), material })
    }

    /// Light source
    pub fn light(name: impl Into<String>, light: LightHandle) -> Self {
        Self::new(name, NodeKind::Light(light))
    }

    /// Sky dome of the given size
    pub fn sky(params: SkyParams, scale: f32) -> Self {
        let mut node = Self::new("sky", NodeKind::Sky(params));
        node.transform = node.transform.with_uniform_scale(scale);
        node
    }

    /// Builder: replace the local transform
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: set the local position
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Builder: set shadow participation
    #[must_use]
    pub fn with_shadows(mut self, shadows: ShadowFlags) -> Self {
        self.shadows = shadows;
        self
    }

    /// Parent node; `None` only for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Light carried by this node
    pub fn light_handle(&self) -> Option<&LightHandle> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    /// Geometry and material of a mesh node
    pub fn mesh_parts(&self) -> Option<(&Geometry, &MaterialHandle)> {
        match &self.kind {
            NodeKind::Mesh { geometry, material } => Some((geometry.as_ref(), material)),
            _ => None,
        }
    }
}

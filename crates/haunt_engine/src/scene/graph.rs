//! Arena-backed scene graph
//!
//! Nodes live in a [`SlotMap`] and refer to each other by [`NodeId`]. A node
//! can only be created under an existing parent and never moves, so the
//! graph is a tree with a single root. World transforms are composed from
//! the ancestors each time they are asked for.

use crate::foundation::collections::{Shared, SlotMap};
use crate::foundation::math::{Mat4, Vec3};
use crate::scene::environment::{Fog, FogHandle};
use crate::scene::node::{NodeId, SceneNode};
use crate::scene::SceneError;

/// Tree of scene nodes plus scene-wide settings
#[derive(Debug)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
    root: NodeId,
    fog: Option<FogHandle>,
}

impl SceneGraph {
    /// Create a graph holding only the root group
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::group("root"));
        Self { nodes, root, fog: None }
    }

    /// Root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Insert `node` as the last child of `parent`
    pub fn spawn(&mut self, parent: NodeId, mut node: SceneNode) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(id);
        }
        Ok(id)
    }

    /// Node by id
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Node by id, or an error naming it
    pub fn node(&self, id: NodeId) -> Result<&SceneNode, SceneError> {
        self.nodes.get(id).ok_or(SceneError::UnknownNode(id))
    }

    /// Move a node relative to its parent
    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::UnknownNode(id))?;
        node.transform.position = position;
        Ok(())
    }

    /// Direct children of a node
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], SceneError> {
        Ok(self.node(id)?.children())
    }

    /// Local-to-world matrix of a node
    pub fn world_transform(&self, id: NodeId) -> Result<Mat4, SceneError> {
        let mut node = self.node(id)?;
        let mut matrix = node.transform.to_matrix();
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            matrix = node.transform.to_matrix() * matrix;
        }
        Ok(matrix)
    }

    /// World-space origin of a node
    pub fn world_position(&self, id: NodeId) -> Result<Vec3, SceneError> {
        let matrix = self.world_transform(id)?;
        Ok(Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]))
    }

    /// Depth-first, pre-order walk from the root
    ///
    /// Children are visited in insertion order. Invisible nodes are yielded
    /// but their subtrees are skipped.
    pub fn traverse(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else { continue };
            order.push(id);
            if node.visible {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// Every node, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter()
    }

    /// First node with the given name, in traversal order
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.traverse().into_iter().find(|&id| self.nodes[id].name == name)
    }

    /// Number of nodes, including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has no children
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Install scene-wide fog, returning the shared handle
    pub fn set_fog(&mut self, fog: Fog) -> FogHandle {
        let handle = Shared::new(fog);
        self.fog = Some(handle.clone());
        handle
    }

    /// Scene-wide fog
    pub fn fog(&self) -> Option<&FogHandle> {
        self.fog.as_ref()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

//! Flat scene graph keyed by object handle.
//!
//! Nodes are kept in handle order so traversal, and therefore ray queries
//! and rendering, are deterministic.

use std::collections::BTreeMap;

use super::collaborator::ObjectHandle;
use super::node::{NodeContent, SceneNode};

/// CPU-side container of scene nodes.
#[derive(Debug)]
pub struct SceneGraph {
    nodes: BTreeMap<ObjectHandle, SceneNode>,
    next_id: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Allocate a fresh node ID.
    fn alloc_id(&mut self) -> ObjectHandle {
        let id = ObjectHandle(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a node. Returns its handle.
    pub fn insert(&mut self, name: impl Into<String>, content: NodeContent) -> ObjectHandle {
        let id = self.alloc_id();
        self.nodes.insert(id, SceneNode::new(id, name, content));
        id
    }

    /// Remove a node, returning it if it existed.
    pub fn remove(&mut self, id: ObjectHandle) -> Option<SceneNode> {
        self.nodes.remove(&id)
    }

    pub fn get(&self, id: ObjectHandle) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in handle order
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vec3;
    use crate::math::Aabb;

    fn prop() -> NodeContent {
        NodeContent::Prop(Aabb::new(Vec3::ZERO, Vec3::ONE))
    }

    #[test]
    fn test_insert_allocates_unique_ids() {
        let mut graph = SceneGraph::new();
        let a = graph.insert("a", prop());
        let b = graph.insert("b", prop());
        assert_ne!(a, b);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get(a).map(|n| n.name.as_str()), Some("a"));
    }

    #[test]
    fn test_remove() {
        let mut graph = SceneGraph::new();
        let a = graph.insert("a", prop());
        assert!(graph.remove(a).is_some());
        assert!(graph.remove(a).is_none());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut graph = SceneGraph::new();
        let a = graph.insert("a", prop());
        graph.remove(a);
        let b = graph.insert("b", prop());
        assert_ne!(a, b);
    }

    #[test]
    fn test_iter_in_handle_order() {
        let mut graph = SceneGraph::new();
        let ids: Vec<_> = (0..5).map(|i| graph.insert(format!("n{}", i), prop())).collect();
        let seen: Vec<_> = graph.iter().map(|n| n.id).collect();
        assert_eq!(ids, seen);
    }
}

//! Scene graph: ordered hierarchy of the nodes placed for a chunk.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::types::DVec3;
use super::node::{LocalTransform, NodeContent, SceneNode, SceneNodeId};

/// Nodes in insertion order with parent/child links.
///
/// Serializes as the flat node list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<SceneNode>", into = "Vec<SceneNode>")]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    index: HashMap<SceneNodeId, usize>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, node: SceneNode) -> SceneNodeId {
        let id = node.id.clone();
        match self.index.get(&id) {
            Some(&slot) => {
                log::warn!("Scene node {} replaced", id);
                self.nodes[slot] = node;
            }
            None => {
                self.index.insert(id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
        id
    }

    /// Add a parentless node.
    pub fn add_root(
        &mut self,
        id: SceneNodeId,
        transform: LocalTransform,
        content: NodeContent,
    ) -> SceneNodeId {
        self.insert(SceneNode::new(id, transform, content))
    }

    /// Add a node under `parent`. A missing parent leaves the node detached.
    pub fn add_child(
        &mut self,
        parent: &SceneNodeId,
        id: SceneNodeId,
        transform: LocalTransform,
        content: NodeContent,
    ) -> SceneNodeId {
        let mut node = SceneNode::new(id, transform, content);
        match self.index.get(parent).copied() {
            Some(slot) => {
                self.nodes[slot].children.push(node.id.clone());
                node.parent = Some(parent.clone());
            }
            None => log::warn!("Parent {} of scene node {} not found", parent, node.id),
        }
        self.insert(node)
    }

    pub fn get(&self, id: &SceneNodeId) -> Option<&SceneNode> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    /// Iterate over the children of a node.
    pub fn children(&self, id: &SceneNodeId) -> impl Iterator<Item = &SceneNode> + '_ {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|c| self.get(c))
    }

    /// Nodes without a parent, in insertion order
    pub fn roots(&self) -> impl Iterator<Item = &SceneNode> + '_ {
        self.nodes.iter().filter(|n| n.parent.is_none())
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Sum of local translations from the root down to `id`.
    pub fn world_position(&self, id: &SceneNodeId) -> Option<DVec3> {
        let mut node = self.get(id)?;
        let mut position = node.local_transform.position;
        // parent links come from add_child, so the chain is acyclic
        while let Some(parent) = node.parent.as_ref().and_then(|p| self.get(p)) {
            position += parent.local_transform.position;
            node = parent;
        }
        Some(position)
    }
}

impl From<Vec<SceneNode>> for SceneGraph {
    fn from(nodes: Vec<SceneNode>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(slot, n)| (n.id.clone(), slot))
            .collect();
        Self { nodes, index }
    }
}

impl From<SceneGraph> for Vec<SceneNode> {
    fn from(graph: SceneGraph) -> Self {
        graph.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> SceneNodeId {
        SceneNodeId(s.to_string())
    }

    fn two_level() -> SceneGraph {
        let mut graph = SceneGraph::new();
        let root = graph.add_root(
            id("chunk"),
            LocalTransform::from_position(DVec3::new(64.0, 0.0, 0.0)),
            NodeContent::ChunkRoot,
        );
        graph.add_child(
            &root,
            id("child"),
            LocalTransform::from_position(DVec3::new(1.0, 2.0, 3.0)),
            NodeContent::ChunkRoot,
        );
        graph
    }

    #[test]
    fn test_new_scene_graph() {
        let graph = SceneGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.roots().count(), 0);
    }

    #[test]
    fn test_add_child() {
        let graph = two_level();
        assert_eq!(graph.node_count(), 2);
        let child = graph.get(&id("child")).unwrap();
        assert_eq!(child.parent, Some(id("chunk")));
        let children: Vec<_> = graph.children(&id("chunk")).map(|n| n.id.clone()).collect();
        assert_eq!(children, vec![id("child")]);
        assert_eq!(graph.roots().count(), 1);
    }

    #[test]
    fn test_missing_parent_detaches() {
        let mut graph = SceneGraph::new();
        graph.add_child(&id("nope"), id("orphan"), LocalTransform::identity(), NodeContent::ChunkRoot);
        assert!(graph.get(&id("orphan")).unwrap().parent.is_none());
    }

    #[test]
    fn test_world_position() {
        let graph = two_level();
        assert_eq!(graph.world_position(&id("child")), Some(DVec3::new(65.0, 2.0, 3.0)));
        assert_eq!(graph.world_position(&id("missing")), None);
    }

    #[test]
    fn test_serializes_as_node_list() {
        let graph = two_level();
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[0]["id"], "chunk");

        let back: SceneGraph = serde_json::from_value(json).unwrap();
        assert_eq!(back, graph);
        assert!(back.get(&id("child")).is_some());
    }
}

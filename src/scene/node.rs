//! Scene graph node types
//!
//! Node IDs, translations, and the two content variants a generated chunk places:
//! the chunk root and the content node carrying LODs and bounds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::DVec3;
use crate::generation::config::{ChunkCoord, ContentType};
use crate::math::BoundingSphere;
use crate::streaming::lod::LodTable;

/// Unique identifier for a scene graph node, stable across runs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneNodeId(pub String);

impl SceneNodeId {
    /// `chunk_{x}_{y}_{z}`
    pub fn chunk_root(coord: ChunkCoord) -> Self {
        Self(format!("chunk_{}_{}_{}", coord.x, coord.y, coord.z))
    }

    /// `content_{type}_{x}_{y}_{z}`
    pub fn content(content_type: &ContentType, coord: ChunkCoord) -> Self {
        Self(format!(
            "content_{}_{}_{}_{}",
            content_type, coord.x, coord.y, coord.z
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Translation relative to the parent node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalTransform {
    pub position: DVec3,
}

impl LocalTransform {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn from_position(position: DVec3) -> Self {
        Self { position }
    }
}

/// Placed content of one chunk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    pub content_type: ContentType,
    pub lods: LodTable,
    pub bounding_sphere: BoundingSphere,
    pub has_animation: bool,
    pub has_physics: bool,
}

/// What a scene node contains.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeContent {
    /// Grouping node anchored at the chunk origin.
    ChunkRoot,
    Content(ContentNode),
}

/// A single node in the scene graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: SceneNodeId,
    pub parent: Option<SceneNodeId>,
    pub children: Vec<SceneNodeId>,
    pub local_transform: LocalTransform,
    pub content: NodeContent,
}

impl SceneNode {
    pub fn new(id: SceneNodeId, local_transform: LocalTransform, content: NodeContent) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            local_transform,
            content,
        }
    }

    pub fn as_content(&self) -> Option<&ContentNode> {
        match &self.content {
            NodeContent::Content(node) => Some(node),
            NodeContent::ChunkRoot => None,
        }
    }
}

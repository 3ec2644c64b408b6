//! Scene graph of placed chunk content

pub mod graph;
pub mod node;
pub mod zone;

pub use graph::SceneGraph;
pub use node::{ContentNode, LocalTransform, NodeContent, SceneNode, SceneNodeId};
pub use zone::{InteractionZone, ZoneTrigger, ZoneType};

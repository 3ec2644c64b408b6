//! Auto-rigging: one rig joint per skeleton bone

use serde::{Deserialize, Serialize};

use super::skeleton::Skeleton;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigJoint {
    pub id: usize,
    pub name: String,
    pub length: f64,
    pub stiffness: f64,
}

/// Animation rig derived from a skeleton's bones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rig {
    pub joint_count: usize,
    pub joints: Vec<RigJoint>,
}

impl Rig {
    /// Map every bone (not every skeleton joint) to a rig joint named `bone_NNN`.
    pub fn from_skeleton(skeleton: &Skeleton) -> Self {
        let joints: Vec<RigJoint> = skeleton
            .bones
            .iter()
            .enumerate()
            .map(|(id, bone)| RigJoint {
                id,
                name: format!("bone_{:03}", id),
                length: bone.length,
                stiffness: bone.stiffness,
            })
            .collect();
        Self {
            joint_count: joints.len(),
            joints,
        }
    }

    /// Find a rig joint index by name
    pub fn find(&self, name: &str) -> Option<usize> {
        self.joints.iter().position(|j| j.name == name)
    }
}

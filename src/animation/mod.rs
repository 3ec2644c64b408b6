//! Topology and animation layers: skeleton, rig and procedural clips

pub mod skeleton;
pub mod rig;
pub mod clip;

pub use skeleton::{build_skeleton, Bone, Joint, JointType, Skeleton, TopologyParams};
pub use rig::{Rig, RigJoint};
pub use clip::{synthesize_clips, AnimationClip, AnimationParams, ClipSpec, JointRotation, Keyframe};

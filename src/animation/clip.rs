//! Procedural animation clips driven by per-joint sinusoids

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::types::round4;
use super::rig::Rig;

/// Definition of one synthesized clip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipSpec {
    pub name: String,
    pub total_frames: u32,
    /// Peak rotation in radians.
    pub amplitude: f64,
}

impl ClipSpec {
    pub fn new(name: impl Into<String>, total_frames: u32, amplitude: f64) -> Self {
        Self {
            name: name.into(),
            total_frames,
            amplitude,
        }
    }
}

/// Constants of clip synthesis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationParams {
    pub clips: Vec<ClipSpec>,
    pub fps: u32,
    /// A keyframe is stored every `frame_step` frames.
    pub frame_step: u32,
    /// Only the first rig joints up to this count are animated.
    pub max_animated_joints: usize,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            clips: vec![
                ClipSpec::new("idle", 30, 0.05),
                ClipSpec::new("walk", 60, 0.3),
            ],
            fps: 30,
            frame_step: 5,
            max_animated_joints: 16,
        }
    }
}

/// Rotation deltas of one rig joint, in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointRotation {
    pub joint: usize,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

impl JointRotation {
    /// Linearly interpolate two rotations of the same joint
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            joint: a.joint,
            rx: a.rx + (b.rx - a.rx) * t,
            ry: a.ry + (b.ry - a.ry) * t,
            rz: a.rz + (b.rz - a.rz) * t,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub frame: u32,
    pub transforms: Vec<JointRotation>,
}

/// A looping clip of sampled keyframes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    pub fps: u32,
    pub total_frames: u32,
    pub keyframes: Vec<Keyframe>,
}

impl AnimationClip {
    /// Synthesize a clip for `joint_count` joints.
    ///
    /// At frame `f` with `t = f / total_frames`, joint `j` rotates by
    /// `rx = A·sin(2πt + 0.5j)`, `ry = A·cos(2πt + 0.3j)`, `rz = 0`.
    pub fn synthesize(spec: &ClipSpec, fps: u32, frame_step: u32, joint_count: usize) -> Self {
        let step = frame_step.max(1) as usize;
        let keyframes = (0..spec.total_frames)
            .step_by(step)
            .map(|frame| {
                let t = frame as f64 / spec.total_frames as f64;
                let transforms = (0..joint_count)
                    .map(|j| {
                        let j_f = j as f64;
                        JointRotation {
                            joint: j,
                            rx: round4(spec.amplitude * (TAU * t + j_f * 0.5).sin()),
                            ry: round4(spec.amplitude * (TAU * t + j_f * 0.3).cos()),
                            rz: 0.0,
                        }
                    })
                    .collect();
                Keyframe { frame, transforms }
            })
            .collect();

        Self {
            name: spec.name.clone(),
            fps,
            total_frames: spec.total_frames,
            keyframes,
        }
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Clip length in seconds
    pub fn duration(&self) -> f64 {
        if self.fps == 0 {
            return 0.0;
        }
        self.total_frames as f64 / self.fps as f64
    }

    /// Sample joint rotations at a (fractional) frame.
    ///
    /// The clip loops: frames wrap at `total_frames`, and the span after the last
    /// keyframe blends back into the first one.
    pub fn sample(&self, frame: f64) -> Vec<JointRotation> {
        let Some(first) = self.keyframes.first() else {
            return Vec::new();
        };
        if self.total_frames == 0 || self.keyframes.len() == 1 {
            return first.transforms.clone();
        }

        let total = self.total_frames as f64;
        let frame = frame.rem_euclid(total);

        let index = self
            .keyframes
            .iter()
            .rposition(|k| k.frame as f64 <= frame)
            .unwrap_or(0);
        let current = &self.keyframes[index];
        let (next, next_frame) = match self.keyframes.get(index + 1) {
            Some(k) => (k, k.frame as f64),
            None => (first, total + first.frame as f64),
        };

        let span = next_frame - current.frame as f64;
        let t = if span > 0.0 {
            (frame - current.frame as f64) / span
        } else {
            0.0
        };

        current
            .transforms
            .iter()
            .zip(&next.transforms)
            .map(|(a, b)| JointRotation::lerp(a, b, t))
            .collect()
    }
}

/// Synthesize every clip in `params` for `rig`.
pub fn synthesize_clips(rig: &Rig, params: &AnimationParams) -> Vec<AnimationClip> {
    let joint_count = rig.joint_count.min(params.max_animated_joints);
    params
        .clips
        .iter()
        .map(|spec| AnimationClip::synthesize(spec, params.fps, params.frame_step, joint_count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk() -> AnimationClip {
        AnimationClip::synthesize(&ClipSpec::new("walk", 60, 0.3), 30, 5, 16)
    }

    #[test]
    fn test_keyframe_layout() {
        let clip = walk();
        assert_eq!(clip.keyframe_count(), 12);
        assert_eq!(clip.keyframes[0].frame, 0);
        assert_eq!(clip.keyframes[11].frame, 55);
        assert!(clip.keyframes.iter().all(|k| k.transforms.len() == 16));
        assert_eq!(clip.duration(), 2.0);

        let idle = AnimationClip::synthesize(&ClipSpec::new("idle", 30, 0.05), 30, 5, 4);
        assert_eq!(idle.keyframe_count(), 6);
    }

    #[test]
    fn test_curve_values() {
        let clip = walk();
        let k = &clip.keyframes[1];
        assert_eq!(k.frame, 5);
        assert_eq!((k.transforms[0].rx, k.transforms[0].ry), (0.15, 0.2598));
        assert_eq!((k.transforms[1].rx, k.transforms[1].ry), (0.2562, 0.2039));
        assert!(k.transforms.iter().all(|r| r.rz == 0.0));

        let k0 = &clip.keyframes[0].transforms[0];
        assert_eq!((k0.rx, k0.ry), (0.0, 0.3));
    }

    #[test]
    fn test_synthesize_clips_caps_joints() {
        let mut rig = Rig::default();
        rig.joint_count = 40;
        let clips = synthesize_clips(&rig, &AnimationParams::default());
        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].name, "idle");
        assert_eq!(clips[1].name, "walk");
        assert_eq!(clips[0].total_frames, 30);
        assert!(clips[1].keyframes.iter().all(|k| k.transforms.len() == 16));

        rig.joint_count = 3;
        let clips = synthesize_clips(&rig, &AnimationParams::default());
        assert!(clips[0].keyframes.iter().all(|k| k.transforms.len() == 3));
    }

    #[test]
    fn test_no_joints_still_has_keyframes() {
        let clips = synthesize_clips(&Rig::default(), &AnimationParams::default());
        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].keyframe_count(), 6);
        assert!(clips[0].keyframes.iter().all(|k| k.transforms.is_empty()));
    }

    #[test]
    fn test_sample_on_keyframe() {
        let clip = walk();
        assert_eq!(clip.sample(5.0), clip.keyframes[1].transforms);
        assert_eq!(clip.sample(0.0), clip.keyframes[0].transforms);
    }

    #[test]
    fn test_sample_interpolates() {
        let clip = walk();
        let mid = clip.sample(2.5);
        let a = &clip.keyframes[0].transforms[0];
        let b = &clip.keyframes[1].transforms[0];
        assert!((mid[0].rx - (a.rx + b.rx) * 0.5).abs() < 1e-12);
        assert!((mid[0].ry - (a.ry + b.ry) * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sample_wraps() {
        let clip = walk();
        assert_eq!(clip.sample(65.0), clip.sample(5.0));
        assert_eq!(clip.sample(-55.0), clip.sample(5.0));

        // past the last keyframe the clip blends back toward frame 0
        let tail = clip.sample(57.5);
        let last = &clip.keyframes[11].transforms[0];
        let first = &clip.keyframes[0].transforms[0];
        assert!((tail[0].rx - (last.rx + first.rx) * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sample_empty_clip() {
        let clip = AnimationClip {
            name: "empty".into(),
            fps: 30,
            total_frames: 0,
            keyframes: Vec::new(),
        };
        assert!(clip.sample(3.0).is_empty());
    }
}

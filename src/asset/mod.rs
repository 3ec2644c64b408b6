//! Asset layer: procedural textures, auto-rig and animation clips

pub mod texture;

pub use texture::{synthesize_texture, Color, Palette, Texture};

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::animation::clip::{synthesize_clips, AnimationClip, AnimationParams};
use crate::animation::rig::Rig;
use crate::animation::skeleton::Skeleton;
use crate::generation::config::GenerationConfig;
use crate::generation::rng::SeededRng;
use crate::generation::seed::LayerId;

/// Constants of texture synthesis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetParams {
    /// Edge length of the square diffuse texture, in texels.
    pub texture_size: usize,
    /// Brightness offsets are drawn from [-texel_noise, texel_noise].
    pub texel_noise: f64,
}

impl Default for AssetParams {
    fn default() -> Self {
        Self {
            texture_size: 64,
            texel_noise: 0.05,
        }
    }
}

/// Everything the asset layer produces for one chunk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetBundle {
    pub textures: Vec<Texture>,
    pub rig: Rig,
    pub animations: Vec<AnimationClip>,
}

impl AssetBundle {
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    pub fn has_animation(&self) -> bool {
        !self.animations.is_empty()
    }
}

/// Run the asset layer.
///
/// Only texture synthesis consumes random numbers; the rig and clips are pure
/// functions of the skeleton.
pub fn generate_assets(
    config: &GenerationConfig,
    skeleton: &Skeleton,
    params: &AssetParams,
    animation: &AnimationParams,
) -> AssetBundle {
    let start = Instant::now();
    let mut rng = SeededRng::for_layer(config, LayerId::Assets);
    log::info!("[Layer 4] Asset generation (seed={})", config.layer_seeds.get(LayerId::Assets));

    let palette = Palette::for_content(&config.content_type);
    let texture = synthesize_texture(
        format!("{}_diffuse", config.content_type),
        &palette,
        params.texture_size,
        params.texel_noise,
        &mut rng,
    );

    let rig = Rig::from_skeleton(skeleton);
    let animations = synthesize_clips(&rig, animation);

    log::info!(
        "[Layer 4] Generated 1 textures, {} rig joints, {} animations in {:.2?}",
        rig.joint_count,
        animations.len(),
        start.elapsed()
    );

    AssetBundle {
        textures: vec![texture],
        rig,
        animations,
    }
}

//! Procedural palette textures

use serde::{Deserialize, Serialize};

use crate::core::types::round4;
use crate::generation::config::ContentType;
use crate::generation::rng::SeededRng;

/// Linear RGB color with channels in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Add `offset` to every channel and clamp to [0, 1].
    pub fn shifted(self, offset: f64) -> Self {
        Self {
            r: round4((self.r + offset).clamp(0.0, 1.0)),
            g: round4((self.g + offset).clamp(0.0, 1.0)),
            b: round4((self.b + offset).clamp(0.0, 1.0)),
        }
    }
}

/// Three base colors a texture is synthesized from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette(pub [Color; 3]);

impl Palette {
    pub const CREATURE: Palette = Palette([
        Color::new(0.6, 0.4, 0.3),
        Color::new(0.5, 0.35, 0.25),
        Color::new(0.7, 0.5, 0.4),
    ]);

    pub const VEGETATION: Palette = Palette([
        Color::new(0.2, 0.6, 0.2),
        Color::new(0.15, 0.5, 0.15),
        Color::new(0.3, 0.7, 0.1),
    ]);

    pub const MINERAL: Palette = Palette([
        Color::new(0.5, 0.5, 0.55),
        Color::new(0.6, 0.58, 0.55),
        Color::new(0.4, 0.4, 0.45),
    ]);

    /// Palette for a content type; unknown types use the creature palette.
    pub fn for_content(content_type: &ContentType) -> Self {
        match content_type {
            ContentType::Vegetation => Self::VEGETATION,
            ContentType::Mineral => Self::MINERAL,
            ContentType::Creature | ContentType::Other(_) => Self::CREATURE,
        }
    }

    pub fn colors(&self) -> &[Color; 3] {
        &self.0
    }
}

/// A square procedural texture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub texel_count: usize,
    /// Row-major texels.
    pub texels: Vec<Color>,
}

impl Texture {
    /// Texel at column `x`, row `y`
    pub fn texel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.texels.get(y * self.width + x).copied()
    }

    /// The first `n` texels, as reported in chunk summaries
    pub fn sample(&self, n: usize) -> &[Color] {
        &self.texels[..n.min(self.texels.len())]
    }
}

/// Synthesize a `size`×`size` texture.
///
/// Each texel draws a palette index, then a brightness offset in
/// [-noise, noise] applied equally to all three channels.
pub fn synthesize_texture(
    name: impl Into<String>,
    palette: &Palette,
    size: usize,
    noise: f64,
    rng: &mut SeededRng,
) -> Texture {
    let colors = palette.colors();
    let mut texels = Vec::with_capacity(size * size);
    for _y in 0..size {
        for _x in 0..size {
            let index = (rng.next_float() * colors.len() as f64) as usize % colors.len();
            let offset = rng.next_range(-noise, noise);
            texels.push(colors[index].shifted(offset));
        }
    }
    Texture {
        name: name.into(),
        width: size,
        height: size,
        texel_count: texels.len(),
        texels,
    }
}

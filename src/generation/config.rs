//! Generation configuration: the per-chunk configuration packet and the
//! named constants every layer runs with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::animation::clip::AnimationParams;
use crate::animation::skeleton::TopologyParams;
use crate::asset::AssetParams;
use crate::core::{Error, Result};
use crate::core::types::DVec3;
use crate::mesh::TubeParams;
use super::seed::LayerSeeds;
use super::spatial::SpatialParams;
use super::world::WorldParams;

/// Kind of content generated for a chunk.
///
/// Unknown tags are kept verbatim: they name the generated assets and nodes and
/// otherwise behave like `Creature` where a per-type table is consulted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Creature,
    Vegetation,
    Mineral,
    Other(String),
}

impl ContentType {
    /// Parse a content tag. Never fails.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "creature" => Self::Creature,
            "vegetation" => Self::Vegetation,
            "mineral" => Self::Mineral,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Creature => "creature",
            Self::Vegetation => "vegetation",
            Self::Mineral => "mineral",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_creature(&self) -> bool {
        matches!(self, Self::Creature)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ContentType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<ContentType> for String {
    fn from(content: ContentType) -> Self {
        content.as_str().to_string()
    }
}

/// Integer chunk address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// World-space position of the chunk's minimum corner.
    pub fn world_origin(&self, chunk_size: f64) -> DVec3 {
        DVec3::new(
            self.x as f64 * chunk_size,
            self.y as f64 * chunk_size,
            self.z as f64 * chunk_size,
        )
    }
}

impl From<[i32; 3]> for ChunkCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<ChunkCoord> for [i32; 3] {
    fn from(c: ChunkCoord) -> Self {
        [c.x, c.y, c.z]
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for ChunkCoord {
    type Err = Error;

    /// Parse a comma-separated triple such as `"0,-1,2"`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(Error::InvalidArgument(format!(
                "chunk coordinates must be x,y,z, got '{}'",
                s
            )));
        }
        let mut xyz = [0i32; 3];
        for (slot, part) in xyz.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| {
                Error::InvalidArgument(format!("invalid chunk coordinate '{}'", part))
            })?;
        }
        Ok(xyz.into())
    }
}

/// Target export format recorded in the export manifest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Fbx,
    Gltf,
    Glb,
    Obj,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fbx => "fbx",
            Self::Gltf => "gltf",
            Self::Glb => "glb",
            Self::Obj => "obj",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fbx" => Ok(Self::Fbx),
            "gltf" => Ok(Self::Gltf),
            "glb" => Ok(Self::Glb),
            "obj" => Ok(Self::Obj),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Arguments of one pipeline run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub master_seed: u64,
    pub content_type: ContentType,
    pub density: f64,
    pub chunk_coords: ChunkCoord,
    #[serde(default)]
    pub output_format: ExportFormat,
}

impl GenerationRequest {
    pub fn new(
        master_seed: u64,
        content_type: ContentType,
        density: f64,
        chunk_coords: ChunkCoord,
    ) -> Self {
        Self {
            master_seed,
            content_type,
            density,
            chunk_coords,
            output_format: ExportFormat::default(),
        }
    }

    pub fn with_format(mut self, output_format: ExportFormat) -> Self {
        self.output_format = output_format;
        self
    }

    /// Build the per-chunk configuration packet (derives all layer seeds).
    pub fn config(&self) -> GenerationConfig {
        GenerationConfig::new(
            self.master_seed,
            self.content_type.clone(),
            self.density,
            self.chunk_coords,
        )
    }
}

/// Per-chunk configuration packet, immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub master_seed: u64,
    pub content_type: ContentType,
    /// Requested density. Finite values are kept as given and layers clamp them
    /// through [`Self::effective_density`]; NaN and infinities are stored clamped
    /// since JSON cannot carry them.
    pub density: f64,
    pub chunk_coords: ChunkCoord,
    pub layer_seeds: LayerSeeds,
}

impl GenerationConfig {
    pub fn new(
        master_seed: u64,
        content_type: ContentType,
        density: f64,
        chunk_coords: ChunkCoord,
    ) -> Self {
        let mut config = Self {
            master_seed,
            content_type,
            density,
            chunk_coords,
            layer_seeds: LayerSeeds::derive(master_seed, chunk_coords),
        };
        if !density.is_finite() {
            config.density = config.effective_density();
        }
        config
    }

    /// Density clamped to [0, 1]; NaN counts as 0.
    pub fn effective_density(&self) -> f64 {
        if self.density.is_nan() {
            0.0
        } else {
            self.density.clamp(0.0, 1.0)
        }
    }
}

/// Named constants for every layer, passed explicitly into each stage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub spatial: SpatialParams,
    pub topology: TopologyParams,
    pub mesh: TubeParams,
    pub assets: AssetParams,
    pub animation: AnimationParams,
    pub world: WorldParams,
}

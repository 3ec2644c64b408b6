//! Spatial distribution: scatters candidate placement points over a chunk.
//!
//! Grid-jittered sampling: the chunk footprint is cut into square cells, each cell
//! draws one acceptance roll against the density and, if accepted, one jittered
//! point. This approximates blue noise without any minimum-distance guarantee.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::types::{round4, DVec3};
use super::config::{ContentType, GenerationConfig};
use super::rng::SeededRng;
use super::seed::LayerId;

/// Constants of the spatial layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialParams {
    /// Edge length of the chunk footprint in world units.
    pub chunk_size: f64,
    /// Cells per chunk edge at density 1.0.
    pub density_resolution: f64,
    /// Points are offset by at most this much along z.
    pub depth_jitter: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for SpatialParams {
    fn default() -> Self {
        Self {
            chunk_size: 64.0,
            density_resolution: 16.0,
            depth_jitter: 2.0,
            min_scale: 0.5,
            max_scale: 2.0,
        }
    }
}

impl SpatialParams {
    /// Cell edge length for a (clamped) density.
    pub fn cell_size(&self, density: f64) -> f64 {
        let divisions = ((density * self.density_resolution) as i64).max(1);
        (self.chunk_size / divisions as f64).max(1.0)
    }

    /// Cells per chunk edge for a (clamped) density.
    pub fn cells_per_side(&self, density: f64) -> usize {
        (self.chunk_size / self.cell_size(density)) as usize
    }
}

/// A placement candidate in world space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub scale: f64,
    /// Radians in [0, 2π].
    pub rotation: f64,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

impl Point {
    pub fn position(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

/// Scatter points over the chunk of `config`.
///
/// Output is in row-major cell order; the topology layer depends on it.
pub fn distribute_points(config: &GenerationConfig, params: &SpatialParams) -> Vec<Point> {
    let seed = config.layer_seeds.get(LayerId::Spatial);
    let density = config.effective_density();
    log::info!("[Layer 1] Spatial distribution (seed={}, density={})", seed, density);

    if density <= 0.0 {
        log::info!("[Layer 1] Generated 0 distribution points");
        return Vec::new();
    }

    let mut rng = SeededRng::new(seed);
    let cell_size = params.cell_size(density);
    let cells = params.cells_per_side(density);
    let origin = config.chunk_coords.world_origin(params.chunk_size);

    let mut points = Vec::new();
    for row in 0..cells {
        for col in 0..cells {
            if rng.next_float() > density {
                continue;
            }
            let x = (col as f64 + rng.next_float()) * cell_size + origin.x;
            let y = (row as f64 + rng.next_float()) * cell_size + origin.y;
            let z = rng.next_range(-params.depth_jitter, params.depth_jitter) + origin.z;
            let scale = rng.next_range(params.min_scale, params.max_scale);
            let rotation = rng.next_range(0.0, TAU);
            points.push(Point {
                x: round4(x),
                y: round4(y),
                z: round4(z),
                scale: round4(scale),
                rotation: round4(rotation),
                content_type: config.content_type.clone(),
            });
        }
    }

    log::info!("[Layer 1] Generated {} distribution points", points.len());
    points
}

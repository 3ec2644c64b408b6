//! World integration: places a chunk's content into a scene graph with LODs,
//! a bounding sphere, interaction zones and an export manifest.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::asset::AssetBundle;
use crate::core::types::DVec3;
use crate::math::BoundingSphere;
use crate::mesh::Mesh;
use crate::scene::{ContentNode, InteractionZone, LocalTransform, NodeContent, SceneGraph, SceneNodeId};
use crate::streaming::lod::LodTable;
use super::config::{ExportFormat, GenerationConfig};
use super::rng::SeededRng;
use super::seed::LayerId;

/// Constants of the world layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldParams {
    pub chunk_size: f64,
    pub lod_levels: u32,
    /// World units between successive LOD switch distances.
    pub lod_distance_step: f64,
    pub bounding_radius: f64,
    /// Awareness zone radius range (proximity trigger).
    pub awareness_radius: (f64, f64),
    /// Combat zone radius range (aggression trigger).
    pub combat_radius: (f64, f64),
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            chunk_size: 64.0,
            lod_levels: 3,
            lod_distance_step: 50.0,
            bounding_radius: 45.0,
            awareness_radius: (10.0, 30.0),
            combat_radius: (3.0, 8.0),
        }
    }
}

/// Counts an exporter needs to lay out the chunk's assets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub format: ExportFormat,
    pub meshes: usize,
    pub materials: usize,
    pub animations: usize,
    pub lod_levels: usize,
    pub total_vertices: usize,
    pub total_triangles: usize,
}

/// Output of the world layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldIntegration {
    pub scene: SceneGraph,
    pub interaction_zones: Vec<InteractionZone>,
    pub export_manifest: ExportManifest,
}

impl WorldIntegration {
    /// The placed content node
    pub fn content(&self) -> Option<&ContentNode> {
        self.scene.nodes().iter().find_map(|n| n.as_content())
    }
}

/// Run the world layer.
///
/// The world generator is only drawn from for creature chunks with at least one
/// joint: awareness radius first, then combat radius.
pub fn integrate_world(
    config: &GenerationConfig,
    mesh: &Mesh,
    assets: &AssetBundle,
    joint_count: usize,
    format: ExportFormat,
    params: &WorldParams,
) -> WorldIntegration {
    let start = Instant::now();
    let seed = config.layer_seeds.get(LayerId::World);
    log::info!("[Layer 5] World integration (seed={})", seed);

    let coord = config.chunk_coords;
    let origin = coord.world_origin(params.chunk_size);
    let half = params.chunk_size * 0.5;

    let lods = LodTable::build(
        mesh.triangle_count(),
        mesh.vertex_count(),
        params.lod_levels,
        params.lod_distance_step,
    );
    let bounding_sphere = BoundingSphere::new(
        DVec3::new(origin.x + half, origin.y + half, origin.z),
        params.bounding_radius,
    );
    if let Some(bounds) = mesh.bounds() {
        if !bounding_sphere.contains_aabb(&bounds) {
            log::warn!(
                "[Layer 5] Mesh bounds {:?}..{:?} escape bounding sphere of chunk {}",
                bounds.min,
                bounds.max,
                coord
            );
        }
    }

    let mut scene = SceneGraph::new();
    let root = scene.add_root(
        SceneNodeId::chunk_root(coord),
        LocalTransform::from_position(origin),
        NodeContent::ChunkRoot,
    );
    let lod_count = lods.len();
    scene.add_child(
        &root,
        SceneNodeId::content(&config.content_type, coord),
        LocalTransform::identity(),
        NodeContent::Content(ContentNode {
            content_type: config.content_type.clone(),
            lods,
            bounding_sphere,
            has_animation: assets.has_animation(),
            has_physics: config.content_type.is_creature(),
        }),
    );

    let mut interaction_zones = Vec::new();
    if config.content_type.is_creature() && joint_count > 0 {
        let mut rng = SeededRng::new(seed);
        let (lo, hi) = params.awareness_radius;
        interaction_zones.push(InteractionZone::awareness(rng.next_range(lo, hi)));
        let (lo, hi) = params.combat_radius;
        interaction_zones.push(InteractionZone::combat(rng.next_range(lo, hi)));
    }

    let export_manifest = ExportManifest {
        format,
        meshes: 1,
        materials: assets.texture_count(),
        animations: assets.animation_count(),
        lod_levels: lod_count,
        total_vertices: mesh.vertex_count(),
        total_triangles: mesh.triangle_count(),
    };

    log::info!(
        "[Layer 5] Scene: {} nodes, {} LODs, {} interaction zones in {:.2?}",
        scene.node_count(),
        lod_count,
        interaction_zones.len(),
        start.elapsed()
    );

    WorldIntegration {
        scene,
        interaction_zones,
        export_manifest,
    }
}

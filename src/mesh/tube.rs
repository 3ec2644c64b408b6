//! Tube extrusion along skeleton bones.
//!
//! Every bone becomes a tapered tube of stacked vertex rings. Rings are laid out in
//! the X–Z plane around the interpolated bone position regardless of the bone's
//! direction, so tubes that are not vertical look flattened. Changing that would
//! change every generated vertex.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::animation::skeleton::Skeleton;
use crate::core::types::{round4, DVec3};
use crate::generation::config::GenerationConfig;
use crate::generation::rng::SeededRng;
use crate::generation::seed::LayerId;
use super::{Mesh, SkinWeight, TubeSpan};

/// Lower bound for bone length.
pub const MIN_BONE_LENGTH: f64 = 0.001;

/// Constants of the mesh layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TubeParams {
    /// Ring intervals along a bone; `segments_per_bone + 1` rings are emitted.
    pub segments_per_bone: usize,
    /// Vertices per ring.
    pub radial_divisions: usize,
    /// Fraction of the base radius lost at the far end of the bone.
    pub taper: f64,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for TubeParams {
    fn default() -> Self {
        Self {
            segments_per_bone: 6,
            radial_divisions: 8,
            taper: 0.3,
            min_radius: 0.1,
            max_radius: 0.5,
        }
    }
}

impl TubeParams {
    pub fn vertices_per_bone(&self) -> usize {
        (self.segments_per_bone.max(1) + 1) * self.radial_divisions
    }

    pub fn triangles_per_bone(&self) -> usize {
        self.segments_per_bone.max(1) * self.radial_divisions * 2
    }
}

/// Extrude a tube mesh along every bone of `skeleton`.
///
/// Bones whose endpoints fall outside the joint list are skipped and draw no
/// radius. Vertices, indices and weights are emitted in ring order.
pub fn extrude_skeleton(config: &GenerationConfig, skeleton: &Skeleton, params: &TubeParams) -> Mesh {
    let seed = config.layer_seeds.get(LayerId::Mesh);
    let mut rng = SeededRng::new(seed);
    log::info!("[Layer 3] Mesh generation (seed={})", seed);

    let mut mesh = Mesh::default();
    let divisions = params.radial_divisions;
    let segments = params.segments_per_bone.max(1);

    for (bone_index, bone) in skeleton.bones.iter().enumerate() {
        let (Some(from), Some(to)) = (skeleton.joints.get(bone.from), skeleton.joints.get(bone.to)) else {
            log::warn!(
                "[Layer 3] Skipping bone {} with joint indices ({}, {}) outside {} joints",
                bone_index,
                bone.from,
                bone.to,
                skeleton.joints.len()
            );
            continue;
        };

        let start = from.position();
        let dir = to.position() - start;
        let length = dir.length().max(MIN_BONE_LENGTH);
        let base_radius = rng.next_range(params.min_radius, params.max_radius);
        let first_vertex = mesh.vertices.len();

        for seg in 0..=segments {
            let t = seg as f64 / segments as f64;
            let center = start + dir * t;
            let radius = base_radius * (1.0 - params.taper * t);

            for rad in 0..divisions {
                let angle = TAU * rad as f64 / divisions as f64;
                mesh.vertices.push(DVec3::new(
                    round4(center.x + radius * angle.cos()),
                    round4(center.y),
                    round4(center.z + radius * angle.sin()),
                ));
                mesh.skinning_weights.push(SkinWeight {
                    bone_index,
                    weight_from: round4(1.0 - t),
                    weight_to: round4(t),
                });
            }

            if seg < segments {
                let ring = (mesh.vertices.len() - divisions) as u32;
                let next = ring + divisions as u32;
                for rad in 0..divisions as u32 {
                    let rad_next = (rad + 1) % divisions as u32;
                    mesh.indices.extend_from_slice(&[
                        ring + rad, next + rad, next + rad_next,
                        ring + rad, next + rad_next, ring + rad_next,
                    ]);
                }
            }
        }

        mesh.spans.push(TubeSpan {
            bone_index,
            first_vertex,
            vertex_count: mesh.vertices.len() - first_vertex,
            length,
        });
    }

    log::info!(
        "[Layer 3] Generated {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    mesh
}

//! Skinned triangle meshes built from skeletons

pub mod tube;

pub use tube::{extrude_skeleton, TubeParams};

use serde::{Deserialize, Serialize};

use crate::core::types::DVec3;
use crate::math::Aabb;

/// Two-bone blend for one vertex. `weight_from + weight_to == 1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkinWeight {
    #[serde(rename = "bone")]
    pub bone_index: usize,
    pub weight_from: f64,
    pub weight_to: f64,
}

/// Vertex range emitted for one bone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TubeSpan {
    pub bone_index: usize,
    pub first_vertex: usize,
    pub vertex_count: usize,
    /// Distance between the bone's joints, never below [`tube::MIN_BONE_LENGTH`].
    pub length: f64,
}

/// Indexed triangle mesh with one skin weight per vertex.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<DVec3>,
    /// Flat triangle list, three indices per triangle.
    pub indices: Vec<u32>,
    /// Aligned 1:1 with `vertices`.
    pub skinning_weights: Vec<SkinWeight>,
    pub spans: Vec<TubeSpan>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Bounding box of all vertices, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().copied())
    }

    /// Structural checks: weights aligned and normalized, indices in range.
    pub fn is_valid(&self) -> bool {
        let n = self.vertices.len();
        self.skinning_weights.len() == n
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < n)
            && self
                .skinning_weights
                .iter()
                .all(|w| (w.weight_from + w.weight_to - 1.0).abs() < 1e-9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.bounds().is_none());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_is_valid_rejects_bad_index() {
        let mut mesh = Mesh {
            vertices: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            indices: vec![0, 1, 2],
            skinning_weights: vec![
                SkinWeight { bone_index: 0, weight_from: 1.0, weight_to: 0.0 };
                3
            ],
            spans: Vec::new(),
        };
        assert!(mesh.is_valid());
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);

        mesh.indices[2] = 3;
        assert!(!mesh.is_valid());
    }
}

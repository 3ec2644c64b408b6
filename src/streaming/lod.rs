//! Level of Detail (LOD) tables for placed content
//!
//! Each level halves the triangle and vertex budget of the level before it and
//! switches in at a fixed distance step from the viewer.

use serde::{Deserialize, Serialize};

/// One LOD level of a content node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LodLevel {
    pub level: u32,
    /// Viewer distance at which this level takes over.
    pub distance: f64,
    pub triangle_count: usize,
    pub vertex_count: usize,
}

/// LOD levels ordered from full detail to coarsest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LodTable(pub Vec<LodLevel>);

/// Reduction factor for a level: `1 / 2^level`
pub fn reduction_for_level(level: u32) -> f64 {
    1.0 / 2f64.powi(level as i32)
}

impl LodTable {
    /// Build `levels` LODs for a mesh of `triangles` / `vertices`.
    ///
    /// Counts are truncated after reduction and never drop below 1, even for an
    /// empty mesh.
    ///
    /// # Examples
    /// ```
    /// use chunkforge::streaming::lod::LodTable;
    ///
    /// let lods = LodTable::build(10560, 6160, 3, 50.0);
    /// assert_eq!(lods.len(), 3);
    /// assert_eq!(lods.levels()[2].triangle_count, 2640);
    /// assert_eq!(lods.level_for_distance(75.0), 1);
    /// ```
    pub fn build(triangles: usize, vertices: usize, levels: u32, distance_step: f64) -> Self {
        let reduce = |count: usize, level: u32| {
            ((count as f64 * reduction_for_level(level)) as usize).max(1)
        };
        Self(
            (0..levels)
                .map(|level| LodLevel {
                    level,
                    distance: level as f64 * distance_step,
                    triangle_count: reduce(triangles, level),
                    vertex_count: reduce(vertices, level),
                })
                .collect(),
        )
    }

    pub fn levels(&self) -> &[LodLevel] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Coarsest level whose switch distance is at most `distance`.
    ///
    /// Distances below the first threshold (and NaN) select level 0.
    pub fn level_for_distance(&self, distance: f64) -> u32 {
        self.0
            .iter()
            .rev()
            .find(|lod| lod.distance <= distance)
            .map(|lod| lod.level)
            .unwrap_or(0)
    }
}

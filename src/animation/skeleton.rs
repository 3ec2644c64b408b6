//! Skeleton topology: joins distribution points into a bone tree.
//!
//! The tree is a minimum spanning tree grown from point 0 (Prim). Each step adds
//! the out-of-tree point closest to the tree; among equally close pairs the one
//! with the lowest in-tree index wins, then the lowest out-of-tree index. That is
//! the same pair a naive scan over (in-tree i ascending, out-of-tree j ascending)
//! keeping the first strict minimum would pick.

use serde::{Deserialize, Serialize};

use crate::core::types::{round4, DVec3};
use crate::generation::config::GenerationConfig;
use crate::generation::rng::SeededRng;
use crate::generation::seed::LayerId;
use crate::generation::spatial::Point;

/// Maximum number of points joined into one skeleton. Points past the cap are
/// dropped; the tree build is quadratic in the point count.
pub const MAX_SKELETON_POINTS: usize = 256;

/// Constants of the topology layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopologyParams {
    pub max_points: usize,
    pub min_stiffness: f64,
    pub max_stiffness: f64,
}

impl Default for TopologyParams {
    fn default() -> Self {
        Self {
            max_points: MAX_SKELETON_POINTS,
            min_stiffness: 0.3,
            max_stiffness: 1.0,
        }
    }
}

/// Joint role derived from its bone count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointType {
    /// At most one bone.
    Leaf,
    /// Two or three bones.
    Branch,
    /// Four or more bones.
    Hub,
}

impl JointType {
    pub fn from_degree(degree: usize) -> Self {
        match degree {
            0 | 1 => Self::Leaf,
            2 | 3 => Self::Branch,
            _ => Self::Hub,
        }
    }
}

/// A distribution point promoted to a skeleton joint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    #[serde(flatten)]
    pub point: Point,
    pub joint_type: JointType,
    pub connectivity: usize,
}

impl Joint {
    pub fn position(&self) -> DVec3 {
        self.point.position()
    }
}

/// Tree edge between two joints, referenced by index into the joint list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub from: usize,
    pub to: usize,
    pub length: f64,
    /// In [0.3, 1.0] with default params.
    pub stiffness: f64,
}

/// Joint/bone graph produced by the topology layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    pub joints: Vec<Joint>,
    pub bones: Vec<Bone>,
}

impl Skeleton {
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Number of bones touching `joint`
    pub fn degree(&self, joint: usize) -> usize {
        self.bones
            .iter()
            .filter(|b| b.from == joint || b.to == joint)
            .count()
    }

    /// Joint that `joint` was attached to while growing the tree (None for the root)
    pub fn parent_index(&self, joint: usize) -> Option<usize> {
        self.bones.iter().find(|b| b.to == joint).map(|b| b.from)
    }

    /// Joints attached below `joint`
    pub fn children(&self, joint: usize) -> Vec<usize> {
        self.bones
            .iter()
            .filter(|b| b.from == joint)
            .map(|b| b.to)
            .collect()
    }

    /// Sum of bone lengths
    pub fn total_length(&self) -> f64 {
        self.bones.iter().map(|b| b.length).sum()
    }

    /// True when the bones form a single spanning tree over the joints
    /// (exactly n-1 edges, all indices in range, no cycles).
    pub fn is_tree(&self) -> bool {
        let n = self.joints.len();
        if n == 0 {
            return self.bones.is_empty();
        }
        if self.bones.len() != n - 1 {
            return false;
        }

        let mut parent: Vec<usize> = (0..n).collect();
        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }

        for bone in &self.bones {
            if bone.from >= n || bone.to >= n {
                return false;
            }
            let a = find(&mut parent, bone.from);
            let b = find(&mut parent, bone.to);
            if a == b {
                return false;
            }
            parent[a] = b;
        }
        true
    }
}

/// Build the skeleton for `points`, drawing one stiffness per bone from the
/// topology layer's generator.
pub fn build_skeleton(
    config: &GenerationConfig,
    points: &[Point],
    params: &TopologyParams,
) -> Skeleton {
    let seed = config.layer_seeds.get(LayerId::Topology);
    let mut rng = SeededRng::new(seed);
    log::info!("[Layer 2] Skeleton topology (seed={}, points={})", seed, points.len());

    if points.len() < 2 {
        let joints = points
            .iter()
            .map(|p| Joint {
                point: p.clone(),
                joint_type: JointType::Leaf,
                connectivity: 0,
            })
            .collect();
        return Skeleton { joints, bones: Vec::new() };
    }

    if points.len() > params.max_points {
        log::debug!(
            "[Layer 2] Capping {} points to the first {}",
            points.len(),
            params.max_points
        );
    }
    let subset = &points[..points.len().min(params.max_points)];
    let positions: Vec<DVec3> = subset.iter().map(Point::position).collect();
    let n = positions.len();

    let mut in_tree = vec![false; n];
    in_tree[0] = true;
    // Closest tree joint for every joint: (distance, tree index)
    let mut nearest: Vec<(f64, usize)> = positions
        .iter()
        .map(|&p| (positions[0].distance(p), 0))
        .collect();

    let mut bones = Vec::with_capacity(n - 1);
    for _ in 1..n {
        let mut pick: Option<usize> = None;
        for j in (0..n).filter(|&j| !in_tree[j]) {
            pick = match pick {
                Some(p) if !closer(nearest[j], nearest[p]) => Some(p),
                _ => Some(j),
            };
        }
        let Some(j) = pick else { break };

        let (distance, i) = nearest[j];
        in_tree[j] = true;
        bones.push(Bone {
            from: i,
            to: j,
            length: round4(distance),
            stiffness: round4(rng.next_range(params.min_stiffness, params.max_stiffness)),
        });

        for k in (0..n).filter(|&k| !in_tree[k]) {
            let candidate = (positions[j].distance(positions[k]), j);
            if closer(candidate, nearest[k]) {
                nearest[k] = candidate;
            }
        }
    }

    let mut connectivity = vec![0usize; n];
    for bone in &bones {
        connectivity[bone.from] += 1;
        connectivity[bone.to] += 1;
    }

    let joints = subset
        .iter()
        .zip(connectivity)
        .map(|(p, degree)| Joint {
            point: p.clone(),
            joint_type: JointType::from_degree(degree),
            connectivity: degree,
        })
        .collect::<Vec<_>>();

    log::info!("[Layer 2] Built {} bones, {} joints", bones.len(), joints.len());
    Skeleton { joints, bones }
}

/// Strict ordering on (distance, tree index).
fn closer(a: (f64, usize), b: (f64, usize)) -> bool {
    a.0 < b.0 || (a.0 == b.0 && a.1 < b.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::config::{ChunkCoord, ContentType};
    use crate::generation::spatial::{distribute_points, SpatialParams};

    fn config(density: f64) -> GenerationConfig {
        GenerationConfig::new(42, ContentType::Creature, density, ChunkCoord::default())
    }

    fn point(x: f64, y: f64, z: f64) -> Point {
        Point {
            x,
            y,
            z,
            scale: 1.0,
            rotation: 0.0,
            content_type: ContentType::Creature,
        }
    }

    /// Cubic reference: scan every (in-tree, out-of-tree) pair, first minimum wins.
    fn naive_edges(points: &[Point]) -> Vec<(usize, usize, f64)> {
        let n = points.len();
        let mut in_tree = vec![false; n];
        in_tree[0] = true;
        let mut edges = Vec::new();
        for _ in 0..n - 1 {
            let mut best = (f64::INFINITY, 0, 0);
            for i in 0..n {
                if !in_tree[i] {
                    continue;
                }
                for j in 0..n {
                    if in_tree[j] {
                        continue;
                    }
                    let d = points[i].position().distance(points[j].position());
                    if d < best.0 {
                        best = (d, i, j);
                    }
                }
            }
            in_tree[best.2] = true;
            edges.push((best.1, best.2, round4(best.0)));
        }
        edges
    }

    #[test]
    fn test_empty_and_single() {
        let c = config(0.5);
        let empty = build_skeleton(&c, &[], &TopologyParams::default());
        assert!(empty.is_empty());
        assert!(empty.bones.is_empty());
        assert!(empty.is_tree());

        let single = build_skeleton(&c, &[point(1.0, 2.0, 3.0)], &TopologyParams::default());
        assert_eq!(single.joint_count(), 1);
        assert_eq!(single.bone_count(), 0);
        assert_eq!(single.joints[0].joint_type, JointType::Leaf);
    }

    #[test]
    fn test_known_output() {
        let c = config(0.75);
        let points = distribute_points(&c, &SpatialParams::default());
        let skeleton = build_skeleton(&c, &points, &TopologyParams::default());

        assert_eq!(skeleton.joint_count(), 111);
        assert_eq!(skeleton.bone_count(), 110);
        assert!(skeleton.is_tree());

        let first: Vec<(usize, usize, f64, f64)> = skeleton.bones[..3]
            .iter()
            .map(|b| (b.from, b.to, b.length, b.stiffness))
            .collect();
        assert_eq!(
            first,
            vec![
                (0, 8, 3.6392, 0.9037),
                (8, 19, 5.4279, 0.5991),
                (0, 9, 6.1465, 0.6998),
            ]
        );

        let count = |t: JointType| skeleton.joints.iter().filter(|j| j.joint_type == t).count();
        assert_eq!(count(JointType::Leaf), 27);
        assert_eq!(count(JointType::Branch), 82);
        assert_eq!(count(JointType::Hub), 2);
    }

    #[test]
    fn test_matches_naive_scan() {
        for density in [0.3, 0.6, 1.0] {
            let c = config(density);
            let points = distribute_points(&c, &SpatialParams::default());
            let skeleton = build_skeleton(&c, &points, &TopologyParams::default());
            let edges: Vec<(usize, usize, f64)> = skeleton
                .bones
                .iter()
                .map(|b| (b.from, b.to, b.length))
                .collect();
            assert_eq!(edges, naive_edges(&points), "density {}", density);
        }
    }

    #[test]
    fn test_tie_break_prefers_lowest_indices() {
        // Joints 1..=4 are all exactly 1.0 from joint 0
        let points = vec![
            point(0.0, 0.0, 0.0),
            point(1.0, 0.0, 0.0),
            point(-1.0, 0.0, 0.0),
            point(0.0, 1.0, 0.0),
            point(0.0, -1.0, 0.0),
        ];
        let skeleton = build_skeleton(&config(0.5), &points, &TopologyParams::default());
        let edges: Vec<(usize, usize)> = skeleton.bones.iter().map(|b| (b.from, b.to)).collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (0, 3), (0, 4)]);
        assert_eq!(edges, naive_edges(&points).iter().map(|e| (e.0, e.1)).collect::<Vec<_>>());
        assert_eq!(skeleton.joints[0].joint_type, JointType::Hub);
        assert_eq!(skeleton.joints[0].connectivity, 4);
    }

    #[test]
    fn test_point_cap() {
        let c = config(1.0);
        let points: Vec<Point> = (0..300).map(|i| point(i as f64, 0.0, 0.0)).collect();
        let skeleton = build_skeleton(&c, &points, &TopologyParams::default());
        assert_eq!(skeleton.joint_count(), MAX_SKELETON_POINTS);
        assert_eq!(skeleton.bone_count(), MAX_SKELETON_POINTS - 1);
        assert!(skeleton.is_tree());
        for bone in &skeleton.bones {
            assert!(bone.from < MAX_SKELETON_POINTS && bone.to < MAX_SKELETON_POINTS);
        }
    }

    #[test]
    fn test_stiffness_range_and_degrees() {
        let c = config(0.9);
        let points = distribute_points(&c, &SpatialParams::default());
        let skeleton = build_skeleton(&c, &points, &TopologyParams::default());
        for bone in &skeleton.bones {
            assert!(bone.stiffness >= 0.3 && bone.stiffness <= 1.0);
        }
        for (i, joint) in skeleton.joints.iter().enumerate() {
            assert_eq!(joint.connectivity, skeleton.degree(i));
            assert_eq!(joint.joint_type, JointType::from_degree(joint.connectivity));
        }
    }

    #[test]
    fn test_hierarchy() {
        let points = vec![point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0), point(2.5, 0.0, 0.0)];
        let skeleton = build_skeleton(&config(0.5), &points, &TopologyParams::default());
        assert_eq!(skeleton.parent_index(0), None);
        assert_eq!(skeleton.parent_index(1), Some(0));
        assert_eq!(skeleton.parent_index(2), Some(1));
        assert_eq!(skeleton.children(0), vec![1]);
        assert!((skeleton.total_length() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_is_tree_detects_cycles() {
        let points = vec![point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0), point(0.0, 1.0, 0.0)];
        let mut skeleton = build_skeleton(&config(0.5), &points, &TopologyParams::default());
        assert!(skeleton.is_tree());
        skeleton.bones[1] = Bone { from: 1, to: 0, length: 1.0, stiffness: 0.5 };
        assert!(!skeleton.is_tree());
    }
}

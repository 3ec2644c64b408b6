//! Bounding sphere

use serde::{Deserialize, Serialize};

use crate::core::types::DVec3;
use super::Aabb;

/// Sphere used as the coarse bounding volume of placed content
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: DVec3,
    pub radius: f64,
}

impl BoundingSphere {
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn contains_point(&self, p: DVec3) -> bool {
        self.center.distance_squared(p) <= self.radius * self.radius
    }

    /// True when every corner of `aabb` lies inside the sphere
    pub fn contains_aabb(&self, aabb: &Aabb) -> bool {
        aabb.corners().iter().all(|&c| self.contains_point(c))
    }
}

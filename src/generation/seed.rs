//! Seed authority: one sub-seed per generation layer.
//!
//! Seeds are a pure function of `(master_seed, layer, chunk)`, so any layer of any
//! chunk can be regenerated on its own and still agree with a full pipeline run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::Error;
use super::config::ChunkCoord;

/// Number of generation layers (and therefore of derived seeds).
pub const LAYER_COUNT: usize = 6;

/// Generation layers in pipeline order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum LayerId {
    Config = 0,
    Spatial = 1,
    Topology = 2,
    Mesh = 3,
    Assets = 4,
    World = 5,
}

impl LayerId {
    pub const ALL: [LayerId; LAYER_COUNT] = [
        LayerId::Config,
        LayerId::Spatial,
        LayerId::Topology,
        LayerId::Mesh,
        LayerId::Assets,
        LayerId::World,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Derive the seed of one layer for one chunk.
///
/// Hashes `"{master}:{layer}:{x}:{y}:{z}"` with SHA-256 and reads the first 16 hex
/// digits of the digest as an unsigned integer. The first 8 digest bytes read
/// big-endian are exactly those 16 digits, independent of host byte order.
pub fn derive_layer_seed(master_seed: u64, layer_id: u8, x: i32, y: i32, z: i32) -> u64 {
    let raw = format!("{}:{}:{}:{}:{}", master_seed, layer_id, x, y, z);
    let digest = Sha256::digest(raw.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

/// The six derived layer seeds of a chunk, keyed 0..=5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<u8, u64>", try_from = "BTreeMap<u8, u64>")]
pub struct LayerSeeds([u64; LAYER_COUNT]);

impl LayerSeeds {
    /// Derive every layer seed for `coord`.
    pub fn derive(master_seed: u64, coord: ChunkCoord) -> Self {
        let mut seeds = [0u64; LAYER_COUNT];
        for layer in LayerId::ALL {
            seeds[layer.index()] =
                derive_layer_seed(master_seed, layer as u8, coord.x, coord.y, coord.z);
        }
        Self(seeds)
    }

    pub fn get(&self, layer: LayerId) -> u64 {
        self.0[layer.index()]
    }

    pub fn as_array(&self) -> &[u64; LAYER_COUNT] {
        &self.0
    }
}

impl From<LayerSeeds> for BTreeMap<u8, u64> {
    fn from(seeds: LayerSeeds) -> Self {
        seeds.0.iter().enumerate().map(|(i, &s)| (i as u8, s)).collect()
    }
}

impl TryFrom<BTreeMap<u8, u64>> for LayerSeeds {
    type Error = Error;

    fn try_from(map: BTreeMap<u8, u64>) -> Result<Self, Self::Error> {
        if map.len() != LAYER_COUNT {
            return Err(Error::InvalidLayerSeeds(format!(
                "expected {} entries, found {}",
                LAYER_COUNT,
                map.len()
            )));
        }
        let mut seeds = [0u64; LAYER_COUNT];
        for (layer, seed) in map {
            let slot = seeds.get_mut(layer as usize).ok_or_else(|| {
                Error::InvalidLayerSeeds(format!("layer id {} out of range", layer))
            })?;
            *slot = seed;
        }
        Ok(Self(seeds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_is_stable() {
        let a = derive_layer_seed(42, 1, 0, 0, 0);
        let b = derive_layer_seed(42, 1, 0, 0, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_matches_hex_prefix() {
        let raw = "42:3:-1:2:7";
        let hex = hex::encode(Sha256::digest(raw.as_bytes()));
        let expected = u64::from_str_radix(&hex[..16], 16).unwrap();
        assert_eq!(derive_layer_seed(42, 3, -1, 2, 7), expected);
    }

    #[test]
    fn test_every_argument_changes_seed() {
        let base = derive_layer_seed(42, 1, 0, 0, 0);
        assert_ne!(base, derive_layer_seed(43, 1, 0, 0, 0));
        assert_ne!(base, derive_layer_seed(42, 2, 0, 0, 0));
        assert_ne!(base, derive_layer_seed(42, 1, 1, 0, 0));
        assert_ne!(base, derive_layer_seed(42, 1, 0, 1, 0));
        assert_ne!(base, derive_layer_seed(42, 1, 0, 0, 1));
    }

    #[test]
    fn test_no_collisions_across_coords() {
        let mut seen = HashSet::new();
        for x in -11..11 {
            for y in -11..11 {
                for z in -11..11 {
                    let seeds = LayerSeeds::derive(7, ChunkCoord::new(x, y, z));
                    for &s in seeds.as_array() {
                        assert!(seen.insert(s), "collision at ({}, {}, {})", x, y, z);
                    }
                }
            }
        }
        // 22^3 coordinate triples, six layers each
        assert_eq!(seen.len(), 22 * 22 * 22 * LAYER_COUNT);
    }

    #[test]
    fn test_layer_seeds_serialize_as_map() {
        let seeds = LayerSeeds::derive(42, ChunkCoord::new(0, 0, 0));
        let json = serde_json::to_value(seeds).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), LAYER_COUNT);
        for i in 0..LAYER_COUNT {
            assert_eq!(obj[&i.to_string()].as_u64(), Some(seeds.as_array()[i]));
        }

        let back: LayerSeeds = serde_json::from_value(json).unwrap();
        assert_eq!(back, seeds);
    }

    #[test]
    fn test_layer_seeds_reject_bad_keys() {
        let short: std::result::Result<LayerSeeds, _> =
            serde_json::from_str(r#"{"0": 1, "1": 2}"#);
        assert!(short.is_err());

        let out_of_range: std::result::Result<LayerSeeds, _> =
            serde_json::from_str(r#"{"0":1,"1":2,"2":3,"3":4,"4":5,"9":6}"#);
        assert!(out_of_range.is_err());
    }
}

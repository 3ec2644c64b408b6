//! Interaction zones attached to animated content

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    Awareness,
    Combat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneTrigger {
    Proximity,
    Aggression,
}

/// A spherical zone around placed content. The radius is not rounded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionZone {
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    pub radius: f64,
    pub trigger: ZoneTrigger,
}

impl InteractionZone {
    pub fn awareness(radius: f64) -> Self {
        Self {
            zone_type: ZoneType::Awareness,
            radius,
            trigger: ZoneTrigger::Proximity,
        }
    }

    pub fn combat(radius: f64) -> Self {
        Self {
            zone_type: ZoneType::Combat,
            radius,
            trigger: ZoneTrigger::Aggression,
        }
    }
}

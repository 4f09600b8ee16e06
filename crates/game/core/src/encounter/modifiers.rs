//! Typed special modifiers attached to an encounter.

use serde::{Deserialize, Serialize};

/// Stat adjustments and environmental effects carried by an encounter.
///
/// Multipliers are expressed as fractional bonuses/penalties: an
/// `ambush_bonus` of 0.2 means the monster's offense is scaled by 1.2.
/// All fields are optional so older serialized encounters keep decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialModifiers {
    /// Fractional offense bonus for the monster when it ambushes the hero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambush_bonus: Option<f64>,
    /// Fractional offense and HP bonus for boss monsters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boss_bonus: Option<f64>,
    /// Fractional offense penalty for the hero (caught off guard).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_penalty: Option<f64>,
    /// Accuracy malus in dark biomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub darkness_penalty: Option<f64>,
    /// Chance of environmental poison in hazardous biomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poison_chance: Option<f64>,
}

impl SpecialModifiers {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

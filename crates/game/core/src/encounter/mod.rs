//! Procedural encounter selection.
//!
//! Quest nodes carry [`EncounterTags`] describing what kind of battle they
//! should trigger; the selector turns those tags into a concrete
//! [`EncounterResult`] by filtering a weighted rule table and querying the
//! monster catalog. The result is fully serializable: a pending encounter is
//! persisted and resumed from its serialized form alone, never from RNG
//! state.

mod modifiers;
mod rules;
mod select;

pub use modifiers::SpecialModifiers;
pub use rules::EncounterRule;
pub use select::{MonsterCatalog, select_encounter};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::stats::MonsterType;

/// Biomes an encounter can be staged in. `Any` matches every biome in rules.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Biome {
    Forest,
    Cave,
    Dungeon,
    Mountain,
    Swamp,
    Desert,
    Ruins,
    Tower,
    #[default]
    Any,
}

/// Encounter difficulty tier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Boss,
}

impl Difficulty {
    /// Offset applied to a monster's stat average when computing its
    /// effective level.
    pub fn level_offset(self) -> i32 {
        match self {
            Self::Easy => -2,
            Self::Normal => 0,
            Self::Hard => 2,
            Self::Boss => 5,
        }
    }

    /// Maximum |effective level − hero level| for a preferred pick.
    pub fn level_tolerance(self) -> u32 {
        match self {
            Self::Easy => 3,
            Self::Normal => 5,
            Self::Hard => 7,
            Self::Boss => 10,
        }
    }

    pub fn xp_multiplier(self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Normal => 1.5,
            Self::Hard => 2.0,
            Self::Boss => 3.0,
        }
    }

    pub fn gold_multiplier(self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Normal => 1.2,
            Self::Hard => 1.5,
            Self::Boss => 2.0,
        }
    }
}

/// The flavor of battle a rule produces.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EncounterKind {
    #[default]
    Combat,
    Ambush,
    Boss,
    Random,
}

/// Encounter metadata attached to a quest node payload.
///
/// Unknown or absent fields fall back to the defaults (`any`/`normal`/
/// `combat`), mirroring how malformed stored payloads are treated everywhere
/// else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterTags {
    pub biome: Biome,
    pub difficulty: Difficulty,
    #[serde(rename = "type")]
    pub kind: EncounterKind,
}

/// A fully rolled encounter, ready to be fought or persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterResult {
    pub monster_name: String,
    pub monster_type: MonsterType,
    pub kind: EncounterKind,
    pub biome: Biome,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub is_ambush: bool,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default)]
    pub modifiers: SpecialModifiers,
}

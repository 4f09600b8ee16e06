//! Weighted rule table entries for encounter selection.

use serde::{Deserialize, Serialize};

use crate::stats::MonsterType;

use super::{Biome, Difficulty, EncounterKind, EncounterTags};

/// One row of the encounter rule table.
///
/// A rule applies when its biome (exact or `Any`), difficulty, kind, and
/// hero-level bounds all match the requested tags. Among applicable rules one
/// is picked weighted-randomly by `weight`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterRule {
    pub biome: Biome,
    pub difficulty: Difficulty,
    pub kind: EncounterKind,
    /// Monster types this rule may produce.
    pub monster_types: Vec<MonsterType>,
    #[serde(default = "default_min_level")]
    pub min_level: u32,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_min_level() -> u32 {
    1
}

fn default_max_level() -> u32 {
    100
}

fn default_weight() -> u32 {
    100
}

impl EncounterRule {
    pub fn applies_to(&self, hero_level: u32, tags: &EncounterTags) -> bool {
        if self.biome != Biome::Any && self.biome != tags.biome {
            return false;
        }
        if self.difficulty != tags.difficulty || self.kind != tags.kind {
            return false;
        }
        (self.min_level..=self.max_level).contains(&hero_level)
    }
}

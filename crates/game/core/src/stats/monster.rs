//! Monster archetypes and leveled instances.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::encounter::Difficulty;

use super::{CoreStats, DerivedStats, Named};

/// Broad monster classification used by encounter rules.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MonsterType {
    Beast,
    Humanoid,
    Undead,
    Elemental,
    Demon,
}

/// Static description of a monster kind from the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterArchetype {
    pub name: String,
    pub monster_type: MonsterType,
    pub difficulty: Difficulty,
    pub base_stats: CoreStats,
}

impl MonsterArchetype {
    /// Effective level: mean of base stats shifted by a per-difficulty offset.
    ///
    /// The encounter selector compares this against hero level to prefer
    /// appropriately scaled opponents.
    pub fn effective_level(&self, difficulty: Difficulty) -> u32 {
        let base = self.base_stats.average();
        (base + difficulty.level_offset()).max(1) as u32
    }
}

/// A concrete monster rolled for one encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterInstance {
    pub archetype: MonsterArchetype,
    pub level: u32,
}

impl MonsterInstance {
    pub fn new(archetype: MonsterArchetype, difficulty: Difficulty) -> Self {
        let level = archetype.effective_level(difficulty);
        Self { archetype, level }
    }

    pub fn derived(&self) -> DerivedStats {
        DerivedStats::from_core(&self.archetype.base_stats)
    }
}

impl Named for MonsterInstance {
    fn display_name(&self) -> &str {
        &self.archetype.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wolf() -> MonsterArchetype {
        MonsterArchetype {
            name: "Dire Wolf".into(),
            monster_type: MonsterType::Beast,
            difficulty: Difficulty::Normal,
            base_stats: CoreStats::new(6, 8, 2, 5, 4),
        }
    }

    #[test]
    fn effective_level_shifts_with_difficulty() {
        let archetype = wolf();
        // average = (6+8+2+5+4)/5 = 5
        assert_eq!(archetype.effective_level(Difficulty::Easy), 3);
        assert_eq!(archetype.effective_level(Difficulty::Normal), 5);
        assert_eq!(archetype.effective_level(Difficulty::Hard), 7);
        assert_eq!(archetype.effective_level(Difficulty::Boss), 10);
    }

    #[test]
    fn effective_level_never_drops_below_one() {
        let mut archetype = wolf();
        archetype.base_stats = CoreStats::new(1, 1, 1, 1, 1);
        assert_eq!(archetype.effective_level(Difficulty::Easy), 1);
    }
}

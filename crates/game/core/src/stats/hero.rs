//! Durable hero record and its derived views.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quest::{UserId, WorldFlags};

use super::{CoreStats, DerivedStats, Named};

/// Durable record of a hero, as read from and written to persistence.
///
/// World flags and reputation are mutated by quest side effects; current HP
/// is mutated by combat outcomes. Everything else is owned by systems outside
/// the gameplay core (levelling, itemization) and treated as read-only here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeroRecord {
    pub user: UserId,
    pub name: String,
    pub level: u32,
    pub current_hp: u32,
    pub stats: CoreStats,
    /// Persistent string-keyed facts about this hero's history.
    #[serde(default)]
    pub world_flags: WorldFlags,
    /// Faction code to reputation score.
    #[serde(default)]
    pub reputation: BTreeMap<String, i32>,
}

impl HeroRecord {
    pub fn derived(&self) -> DerivedStats {
        DerivedStats::from_core(&self.stats)
    }

    /// True once current HP has reached the derived maximum.
    ///
    /// Recovery gating after a combat defeat keys off this.
    pub fn is_fully_healed(&self) -> bool {
        self.current_hp >= self.derived().hp_max
    }
}

impl Named for HeroRecord {
    fn display_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero(current_hp: u32, vitality: i32) -> HeroRecord {
        HeroRecord {
            user: UserId(1),
            name: "Roderic".into(),
            level: 3,
            current_hp,
            stats: CoreStats::new(8, 6, 4, vitality, 3),
            world_flags: WorldFlags::new(),
            reputation: BTreeMap::new(),
        }
    }

    #[test]
    fn fully_healed_compares_against_derived_max() {
        // hp_max = 20 + 4*10 = 60
        assert!(hero(60, 10).is_fully_healed());
        assert!(!hero(59, 10).is_fully_healed());
        assert!(hero(75, 10).is_fully_healed());
    }
}

//! Stat blocks and derived combat stats.
//!
//! The stat system has two layers: [`CoreStats`] are the stored attribute
//! points (strength, agility, intellect, vitality, luck), and
//! [`DerivedStats`] are recomputed from them whenever a combat snapshot is
//! taken. Derived values are never persisted.

mod hero;
mod monster;

pub use hero::HeroRecord;
pub use monster::{MonsterArchetype, MonsterInstance, MonsterType};

use serde::{Deserialize, Serialize};

/// Stored attribute points shared by heroes and monster archetypes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreStats {
    pub strength: i32,
    pub agility: i32,
    pub intellect: i32,
    pub vitality: i32,
    pub luck: i32,
}

impl CoreStats {
    pub const fn new(strength: i32, agility: i32, intellect: i32, vitality: i32, luck: i32) -> Self {
        Self {
            strength,
            agility,
            intellect,
            vitality,
            luck,
        }
    }

    /// Mean of the five attributes, used as the base for effective level.
    pub fn average(&self) -> i32 {
        (self.strength + self.agility + self.intellect + self.vitality + self.luck) / 5
    }
}

/// Combat stats derived from [`CoreStats`].
///
/// Base formulas:
/// - `hp_max = 20 + 4·VIT`
/// - `atk = 2 + STR`
/// - `mag = 2 + INT`
/// - `crit_chance = min(35, 5 + 0.5·AGI)` percent
/// - `dodge = min(25, 2 + 0.4·AGI)` percent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedStats {
    pub hp_max: u32,
    pub atk: u32,
    pub mag: u32,
    /// Critical hit chance in percent, capped at 35.
    pub crit_chance: f64,
    /// Dodge chance in percent, capped at 25.
    pub dodge: f64,
}

impl DerivedStats {
    pub fn from_core(core: &CoreStats) -> Self {
        Self {
            hp_max: (20 + 4 * core.vitality).max(1) as u32,
            atk: (2 + core.strength).max(0) as u32,
            mag: (2 + core.intellect).max(0) as u32,
            crit_chance: (5.0 + 0.5 * f64::from(core.agility)).min(35.0),
            dodge: (2.0 + 0.4 * f64::from(core.agility)).min(25.0),
        }
    }
}

/// Shared capability for anything that can be named in a step result.
///
/// Both hero and monster records implement this, so consumers never have to
/// probe for whichever name field happens to exist.
pub trait Named {
    fn display_name(&self) -> &str;
}

//! Ephemeral combat session state.

use crate::encounter::{Difficulty, SpecialModifiers};
use crate::quest::HeroDebuff;
use crate::stats::{HeroRecord, MonsterInstance, Named};

/// Snapshot of one side's combat stats.
///
/// Snapshots are taken when the session starts; encounter modifiers and hero
/// debuffs mutate the snapshot, never the durable record behind it.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatantStats {
    pub name: String,
    pub hp_max: u32,
    pub atk: u32,
    pub mag: u32,
    pub crit_chance: f64,
    pub dodge: f64,
}

impl CombatantStats {
    pub fn from_hero(hero: &HeroRecord) -> Self {
        let derived = hero.derived();
        Self {
            name: hero.display_name().to_owned(),
            hp_max: derived.hp_max,
            atk: derived.atk,
            mag: derived.mag,
            crit_chance: derived.crit_chance,
            dodge: derived.dodge,
        }
    }

    pub fn from_monster(monster: &MonsterInstance) -> Self {
        let derived = monster.derived();
        Self {
            name: monster.display_name().to_owned(),
            hp_max: derived.hp_max,
            atk: derived.atk,
            mag: derived.mag,
            crit_chance: derived.crit_chance,
            dodge: derived.dodge,
        }
    }
}

/// Terminal and non-terminal states of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatStatus {
    Ongoing,
    HeroWin,
    MonsterWin,
    HeroFlee,
}

impl CombatStatus {
    pub fn is_terminal(self) -> bool {
        self != Self::Ongoing
    }
}

/// Which side acted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Hero,
    Monster,
}

/// One encounter in progress between a hero and a monster.
#[derive(Clone, Debug)]
pub struct CombatSession {
    pub hero: CombatantStats,
    pub monster: CombatantStats,
    pub hero_hp: u32,
    pub monster_hp: u32,
    pub turn: u32,
    pub hero_defending: bool,
    pub monster_defending: bool,
    pub status: CombatStatus,
    pub log: Vec<String>,
    /// Retained for deterministic reward calculation on victory.
    pub monster_level: u32,
    pub difficulty: Difficulty,
}

impl CombatSession {
    /// Start a session with both HP pools at their derived maximum.
    pub fn new(
        hero: CombatantStats,
        monster: CombatantStats,
        monster_level: u32,
        difficulty: Difficulty,
    ) -> Self {
        let hero_hp = hero.hp_max;
        let monster_hp = monster.hp_max;
        let mut session = Self {
            hero,
            monster,
            hero_hp,
            monster_hp,
            turn: 1,
            hero_defending: false,
            monster_defending: false,
            status: CombatStatus::Ongoing,
            log: Vec::new(),
            monster_level,
            difficulty,
        };
        session.log.push(format!(
            "Battle begins: {} versus {}!",
            session.hero.name, session.monster.name
        ));
        session
    }

    /// Apply the encounter's special modifiers to the snapshots.
    ///
    /// Ambush and boss bonuses scale the monster's offense (and HP for
    /// bosses); the hero penalty scales the hero's offense. Environmental
    /// modifiers (darkness, poison) are flavor carried through to the
    /// presentation layer and do not change the arithmetic here.
    pub fn apply_modifiers(&mut self, modifiers: &SpecialModifiers) {
        if let Some(bonus) = modifiers.ambush_bonus {
            self.monster.atk = scale(self.monster.atk, 1.0 + bonus);
            self.monster.mag = scale(self.monster.mag, 1.0 + bonus);
        }
        if let Some(bonus) = modifiers.boss_bonus {
            self.monster.atk = scale(self.monster.atk, 1.0 + bonus);
            self.monster.mag = scale(self.monster.mag, 1.0 + bonus);
            self.monster.hp_max = scale(self.monster.hp_max, 1.0 + bonus);
            self.monster_hp = self.monster.hp_max;
        }
        if let Some(penalty) = modifiers.hero_penalty {
            self.hero.atk = scale(self.hero.atk, 1.0 - penalty);
            self.hero.mag = scale(self.hero.mag, 1.0 - penalty);
        }
    }

    /// Apply a lingering debuff from an earlier flee to the hero snapshot.
    pub fn apply_hero_debuff(&mut self, debuff: &HeroDebuff) {
        self.hero.atk = scale(self.hero.atk, debuff.atk_multiplier);
        self.hero.mag = scale(self.hero.mag, debuff.atk_multiplier);
        self.hero.crit_chance = (self.hero.crit_chance * debuff.atk_multiplier).max(0.0);
        self.hero.dodge = (self.hero.dodge * (1.0 - debuff.dodge_penalty)).max(0.0);
        if debuff.hp_penalty_percent > 0.0 {
            let adjusted = scale(self.hero_hp, 1.0 - debuff.hp_penalty_percent).max(1);
            self.hero_hp = adjusted;
        }
        self.log.push(format!(
            "{} is weakened from the earlier escape.",
            self.hero.name
        ));
    }

    /// The last few log entries, newest last, for the combat step result.
    pub fn recent_log(&self, count: usize) -> Vec<String> {
        let start = self.log.len().saturating_sub(count);
        self.log[start..].to_vec()
    }
}

fn scale(value: u32, factor: f64) -> u32 {
    (f64::from(value) * factor) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> CombatSession {
        let hero = CombatantStats {
            name: "Hero".into(),
            hp_max: 60,
            atk: 12,
            mag: 10,
            crit_chance: 10.0,
            dodge: 6.0,
        };
        let monster = CombatantStats {
            name: "Wolf".into(),
            hp_max: 40,
            atk: 8,
            mag: 4,
            crit_chance: 8.0,
            dodge: 5.0,
        };
        CombatSession::new(hero, monster, 4, Difficulty::Normal)
    }

    #[test]
    fn boss_bonus_raises_hp_and_refills_the_pool() {
        let mut s = session();
        s.apply_modifiers(&SpecialModifiers {
            boss_bonus: Some(0.5),
            ..SpecialModifiers::default()
        });
        assert_eq!(s.monster.atk, 12);
        assert_eq!(s.monster.hp_max, 60);
        assert_eq!(s.monster_hp, 60);
    }

    #[test]
    fn ambush_scales_monster_offense_and_hero_penalty_scales_hero() {
        let mut s = session();
        s.apply_modifiers(&SpecialModifiers {
            ambush_bonus: Some(0.2),
            hero_penalty: Some(0.1),
            ..SpecialModifiers::default()
        });
        assert_eq!(s.monster.atk, 9); // 8 * 1.2 truncated
        assert_eq!(s.hero.atk, 10); // 12 * 0.9 truncated
    }

    #[test]
    fn debuff_reduces_offense_and_hp_but_never_below_one() {
        let mut s = session();
        s.hero_hp = 2;
        s.apply_hero_debuff(&HeroDebuff::flee_exhaustion());
        assert_eq!(s.hero.atk, 10); // 12 * 0.9
        assert!(s.hero_hp >= 1);
    }

    #[test]
    fn recent_log_returns_the_tail() {
        let mut s = session();
        for i in 0..5 {
            s.log.push(format!("entry {i}"));
        }
        let recent = s.recent_log(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[2], "entry 4");
    }
}

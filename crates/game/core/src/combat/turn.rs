//! Turn execution: hero action, monster reply, end checks.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::roll::{StrikeKind, StrikeRolls, resolve_strike};
use super::session::{CombatSession, CombatStatus, CombatantStats, Side};

/// Fixed probability that a flee attempt succeeds.
pub const FLEE_SUCCESS_CHANCE: f64 = 0.7;

/// Actions available during combat. The monster AI never flees.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CombatAction {
    Attack,
    Magic,
    Defend,
    Flee,
}

/// What a single action did.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionReport {
    pub side: Side,
    pub action: CombatAction,
    pub damage: u32,
    pub critical: bool,
    pub dodged: bool,
    /// `Some(true)` when a flee attempt succeeded, `Some(false)` when it
    /// failed, `None` for non-flee actions.
    pub fled: Option<bool>,
    pub message: String,
}

/// Everything that happened in one full turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub actions: Vec<ActionReport>,
    pub status: CombatStatus,
}

impl CombatSession {
    /// Execute the hero's chosen action.
    pub fn execute_hero_action<R: Rng>(
        &mut self,
        action: CombatAction,
        rng: &mut R,
    ) -> ActionReport {
        match action {
            CombatAction::Defend => {
                self.hero_defending = true;
                self.report(
                    Side::Hero,
                    action,
                    None,
                    format!("{} takes a defensive stance.", self.hero.name),
                )
            }
            CombatAction::Flee => {
                if rng.gen_range(0.0..1.0) < FLEE_SUCCESS_CHANCE {
                    self.status = CombatStatus::HeroFlee;
                    self.report(
                        Side::Hero,
                        action,
                        Some(true),
                        format!("{} flees the battle!", self.hero.name),
                    )
                } else {
                    self.report(
                        Side::Hero,
                        action,
                        Some(false),
                        format!("{} fails to escape!", self.hero.name),
                    )
                }
            }
            CombatAction::Attack | CombatAction::Magic => {
                let rolls = StrikeRolls::sample(rng);
                self.hero_strike(action, &rolls)
            }
        }
    }

    /// Execute the hero's strike with explicit rolls. Exposed for tests and
    /// replays; [`Self::execute_hero_action`] samples rolls and delegates
    /// here.
    pub fn hero_strike(&mut self, action: CombatAction, rolls: &StrikeRolls) -> ActionReport {
        let kind = match action {
            CombatAction::Magic => StrikeKind::Magic,
            _ => StrikeKind::Attack,
        };
        let outcome = resolve_strike(&self.hero, &self.monster, self.monster_defending, kind, rolls);
        // The defend flag is consumed by the first incoming strike.
        self.monster_defending = false;

        if outcome.dodged {
            let message = format!("{} dodges the attack!", self.monster.name);
            return self.dodge_report(Side::Hero, action, message);
        }

        self.monster_hp = self.monster_hp.saturating_sub(outcome.damage);
        let message = strike_message(&self.hero, &self.monster, action, outcome.damage, outcome.critical);
        self.report_strike(Side::Hero, action, outcome.damage, outcome.critical, message)
    }

    /// Execute the monster's AI-chosen action: attack 0.7, magic 0.2,
    /// defend 0.1.
    pub fn execute_monster_action<R: Rng>(&mut self, rng: &mut R) -> ActionReport {
        let roll: f64 = rng.gen_range(0.0..1.0);
        let action = if roll < 0.7 {
            CombatAction::Attack
        } else if roll < 0.9 {
            CombatAction::Magic
        } else {
            CombatAction::Defend
        };

        if action == CombatAction::Defend {
            self.monster_defending = true;
            return self.report(
                Side::Monster,
                action,
                None,
                format!("{} takes a defensive stance.", self.monster.name),
            );
        }

        let rolls = StrikeRolls::sample(rng);
        self.monster_strike(action, &rolls)
    }

    /// Execute the monster's strike with explicit rolls.
    pub fn monster_strike(&mut self, action: CombatAction, rolls: &StrikeRolls) -> ActionReport {
        let kind = match action {
            CombatAction::Magic => StrikeKind::Magic,
            _ => StrikeKind::Attack,
        };
        let outcome = resolve_strike(&self.monster, &self.hero, self.hero_defending, kind, rolls);
        self.hero_defending = false;

        if outcome.dodged {
            let message = format!("{} dodges the attack!", self.hero.name);
            return self.dodge_report(Side::Monster, action, message);
        }

        self.hero_hp = self.hero_hp.saturating_sub(outcome.damage);
        let message = strike_message(&self.monster, &self.hero, action, outcome.damage, outcome.critical);
        self.report_strike(Side::Monster, action, outcome.damage, outcome.critical, message)
    }

    /// Resolve terminal states.
    ///
    /// On a monster win the hero's HP is pinned to exactly 1; the hero
    /// always survives defeat.
    pub fn check_combat_end(&mut self) -> CombatStatus {
        if self.status == CombatStatus::HeroFlee {
            return self.status;
        }
        if self.hero_hp == 0 {
            self.hero_hp = 1;
            self.status = CombatStatus::MonsterWin;
            self.log.push(format!("{} falls in battle.", self.hero.name));
        } else if self.monster_hp == 0 {
            self.status = CombatStatus::HeroWin;
            self.log
                .push(format!("{} is victorious!", self.hero.name));
        }
        self.status
    }

    /// Run one full turn: hero action, end check, monster reply, end check,
    /// then advance the turn counter.
    pub fn play_turn<R: Rng>(&mut self, action: CombatAction, rng: &mut R) -> TurnReport {
        if self.status.is_terminal() {
            return TurnReport {
                actions: Vec::new(),
                status: self.status,
            };
        }

        let mut actions = vec![self.execute_hero_action(action, rng)];
        if self.check_combat_end() == CombatStatus::Ongoing {
            actions.push(self.execute_monster_action(rng));
            self.check_combat_end();
        }

        if self.status == CombatStatus::Ongoing {
            self.turn += 1;
            self.hero_defending = false;
        }

        TurnReport {
            actions,
            status: self.status,
        }
    }

    fn report(
        &mut self,
        side: Side,
        action: CombatAction,
        fled: Option<bool>,
        message: String,
    ) -> ActionReport {
        self.log.push(message.clone());
        ActionReport {
            side,
            action,
            damage: 0,
            critical: false,
            dodged: false,
            fled,
            message,
        }
    }

    fn dodge_report(&mut self, side: Side, action: CombatAction, message: String) -> ActionReport {
        self.log.push(message.clone());
        ActionReport {
            side,
            action,
            damage: 0,
            critical: false,
            dodged: true,
            fled: None,
            message,
        }
    }

    fn report_strike(
        &mut self,
        side: Side,
        action: CombatAction,
        damage: u32,
        critical: bool,
        message: String,
    ) -> ActionReport {
        self.log.push(message.clone());
        ActionReport {
            side,
            action,
            damage,
            critical,
            dodged: false,
            fled: None,
            message,
        }
    }
}

fn strike_message(
    attacker: &CombatantStats,
    defender: &CombatantStats,
    action: CombatAction,
    damage: u32,
    critical: bool,
) -> String {
    let verb = match action {
        CombatAction::Magic => "blasts",
        _ => "strikes",
    };
    let crit_note = if critical { " Critical hit!" } else { "" };
    format!(
        "{} {verb} {} for {damage} damage.{crit_note}",
        attacker.name, defender.name
    )
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use crate::encounter::Difficulty;

    use super::*;

    fn session() -> CombatSession {
        let hero = CombatantStats {
            name: "Hero".into(),
            hp_max: 60,
            atk: 12,
            mag: 10,
            crit_chance: 0.0,
            dodge: 0.0,
        };
        let monster = CombatantStats {
            name: "Wolf".into(),
            hp_max: 40,
            atk: 8,
            mag: 4,
            crit_chance: 0.0,
            dodge: 0.0,
        };
        CombatSession::new(hero, monster, 4, Difficulty::Normal)
    }

    #[test]
    fn hero_strike_with_flat_rolls_deals_atk_damage() {
        let mut s = session();
        let report = s.hero_strike(CombatAction::Attack, &StrikeRolls::flat());
        assert_eq!(report.damage, 12);
        assert_eq!(s.monster_hp, 28);
    }

    #[test]
    fn monster_win_pins_hero_hp_to_one() {
        let mut s = session();
        s.hero_hp = 3;
        s.monster.atk = 50;
        s.monster_strike(CombatAction::Attack, &StrikeRolls::flat());
        assert_eq!(s.check_combat_end(), CombatStatus::MonsterWin);
        assert_eq!(s.hero_hp, 1);
    }

    #[test]
    fn hero_defend_halves_the_monster_reply() {
        let mut s = session();
        let mut rng = SmallRng::seed_from_u64(1);
        s.execute_hero_action(CombatAction::Defend, &mut rng);
        assert!(s.hero_defending);
        s.monster_strike(CombatAction::Attack, &StrikeRolls::flat());
        assert_eq!(s.hero_hp, 56); // 8 / 2 = 4 damage
        assert!(!s.hero_defending);
    }

    #[test]
    fn flee_success_rate_converges_to_seventy_percent() {
        let mut rng = SmallRng::seed_from_u64(42);
        let trials = 10_000;
        let mut successes = 0u32;
        for _ in 0..trials {
            let mut s = session();
            let report = s.execute_hero_action(CombatAction::Flee, &mut rng);
            if report.fled == Some(true) {
                successes += 1;
            }
        }
        let rate = f64::from(successes) / f64::from(trials);
        // Binomial std dev at p=0.7, n=10k is ~0.0046; allow four sigma.
        assert!((rate - FLEE_SUCCESS_CHANCE).abs() < 0.02, "rate was {rate}");
    }

    #[test]
    fn successful_flee_terminates_the_session() {
        let mut s = session();
        let mut rng = SmallRng::seed_from_u64(0);
        loop {
            let report = s.execute_hero_action(CombatAction::Flee, &mut rng);
            if report.fled == Some(true) {
                break;
            }
        }
        assert_eq!(s.check_combat_end(), CombatStatus::HeroFlee);
    }

    #[test]
    fn play_turn_advances_counter_while_ongoing() {
        let mut s = session();
        let mut rng = SmallRng::seed_from_u64(5);
        let report = s.play_turn(CombatAction::Defend, &mut rng);
        if report.status == CombatStatus::Ongoing {
            assert_eq!(s.turn, 2);
            assert!(!s.hero_defending);
        }
    }

    #[test]
    fn terminal_session_ignores_further_turns() {
        let mut s = session();
        s.status = CombatStatus::HeroWin;
        let mut rng = SmallRng::seed_from_u64(5);
        let report = s.play_turn(CombatAction::Attack, &mut rng);
        assert!(report.actions.is_empty());
        assert_eq!(report.status, CombatStatus::HeroWin);
    }
}

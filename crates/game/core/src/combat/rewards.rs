//! Victory rewards.

use serde::{Deserialize, Serialize};

use crate::encounter::Difficulty;

/// Experience and gold granted for a victory.
///
/// Base amounts scale with the defeated monster's level; the difficulty
/// multipliers are applied afterwards and truncated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRewards {
    pub experience: u32,
    pub gold: u32,
}

impl CombatRewards {
    /// Rewards for defeating a monster of the given level and difficulty:
    /// `xp = (10 + 5·level) · xp_mult`, `gold = (5 + 3·level) · gold_mult`.
    pub fn for_monster(level: u32, difficulty: Difficulty) -> Self {
        let base_xp = f64::from(10 + 5 * level);
        let base_gold = f64::from(5 + 3 * level);
        Self {
            experience: (base_xp * difficulty.xp_multiplier()) as u32,
            gold: (base_gold * difficulty.gold_multiplier()) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easy_rewards_are_the_base_amounts() {
        let rewards = CombatRewards::for_monster(4, Difficulty::Easy);
        assert_eq!(rewards.experience, 30);
        assert_eq!(rewards.gold, 17);
    }

    #[test]
    fn normal_rewards_apply_the_default_multipliers() {
        let rewards = CombatRewards::for_monster(4, Difficulty::Normal);
        assert_eq!(rewards.experience, 45); // 30 * 1.5
        assert_eq!(rewards.gold, 20); // 17 * 1.2 truncated
    }

    #[test]
    fn boss_rewards_triple_xp_and_double_gold() {
        let rewards = CombatRewards::for_monster(10, Difficulty::Boss);
        assert_eq!(rewards.experience, 180); // (10 + 50) * 3.0
        assert_eq!(rewards.gold, 70); // (5 + 30) * 2.0
    }

    #[test]
    fn hard_multipliers_truncate() {
        let rewards = CombatRewards::for_monster(3, Difficulty::Hard);
        assert_eq!(rewards.experience, 50); // 25 * 2.0
        assert_eq!(rewards.gold, 21); // 14 * 1.5
    }
}

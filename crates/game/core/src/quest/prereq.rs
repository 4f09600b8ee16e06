//! Quest prerequisites and locked-reason reporting.

use serde::{Deserialize, Serialize};

use crate::stats::HeroRecord;

use super::graph::QuestId;
use super::payload::{lossy, FlagGuard, GuardViolation};

/// Conditions a hero must satisfy before a quest can be started.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestPrereqs {
    /// Quests that must already be completed.
    pub quests_completed: Vec<QuestId>,
    /// Minimum faction reputation, keyed by faction code.
    pub reputation: std::collections::BTreeMap<String, i32>,
    /// World-flag guard, same semantics as connection guards.
    #[serde(deserialize_with = "lossy")]
    pub world_flags: FlagGuard,
}

/// Why a quest cannot be started.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum LockedReason {
    QuestNotCompleted { quest: QuestId },
    ReputationTooLow {
        faction: String,
        required: i32,
        actual: i32,
    },
    WorldFlag { violation: GuardViolation },
}

impl QuestPrereqs {
    /// Evaluate against the hero and their completed-quest list. An empty
    /// result means the quest is unlocked.
    pub fn check(&self, hero: &HeroRecord, completed: &[QuestId]) -> Vec<LockedReason> {
        let mut reasons = Vec::new();

        for quest in &self.quests_completed {
            if !completed.contains(quest) {
                reasons.push(LockedReason::QuestNotCompleted { quest: *quest });
            }
        }

        for (faction, required) in &self.reputation {
            let actual = hero.reputation.get(faction).copied().unwrap_or(0);
            if actual < *required {
                reasons.push(LockedReason::ReputationTooLow {
                    faction: faction.clone(),
                    required: *required,
                    actual,
                });
            }
        }

        for violation in self.world_flags.violations(&hero.world_flags) {
            reasons.push(LockedReason::WorldFlag { violation });
        }

        reasons
    }
}

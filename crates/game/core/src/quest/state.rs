//! Durable per-player quest state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::encounter::EncounterResult;

use super::graph::{NodeId, QuestId, UserId};
use super::payload::lossy;

/// Lifecycle of one (user, quest) pair. Never deleted, only transitioned.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QuestStatus {
    #[default]
    Active,
    Paused,
    Completed,
    Declined,
}

/// Where a stored encounter stands.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EncounterPhase {
    /// Rolled and waiting for the player to engage (or re-engage after a
    /// failed flee).
    #[default]
    Pending,
    /// A combat session is live for this encounter.
    InProgress,
}

/// An encounter rolled for a node, persisted until it resolves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveEncounter {
    pub node_id: NodeId,
    #[serde(default)]
    pub status: EncounterPhase,
    pub encounter: EncounterResult,
}

/// A temporary stat penalty carried into the next combat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroDebuff {
    pub kind: String,
    pub atk_multiplier: f64,
    pub dodge_penalty: f64,
    pub hp_penalty_percent: f64,
}

impl Default for HeroDebuff {
    fn default() -> Self {
        Self {
            kind: String::new(),
            atk_multiplier: 1.0,
            dodge_penalty: 0.0,
            hp_penalty_percent: 0.0,
        }
    }
}

impl HeroDebuff {
    /// Penalty for slipping away from a fight successfully.
    pub fn flee_exhaustion() -> Self {
        Self {
            kind: "flee_exhaustion".into(),
            atk_multiplier: 0.9,
            dodge_penalty: 0.1,
            hp_penalty_percent: 0.15,
        }
    }

    /// Heavier penalty for a failed escape attempt.
    pub fn flee_failure() -> Self {
        Self {
            kind: "flee_failure".into(),
            atk_multiplier: 0.85,
            dodge_penalty: 0.15,
            hp_penalty_percent: 0.10,
        }
    }
}

/// The mutable sub-document of [`PlayerQuestState`].
///
/// Every field decodes lossily: whatever shape was stored, a readable
/// default comes out and play continues.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestProgressState {
    /// Nodes whose encounter has been resolved; non-repeatable nodes never
    /// re-trigger.
    #[serde(deserialize_with = "lossy")]
    pub completed_encounters: BTreeSet<NodeId>,
    #[serde(deserialize_with = "lossy")]
    pub active_encounter: Option<ActiveEncounter>,
    #[serde(deserialize_with = "lossy")]
    pub needs_recovery: bool,
    #[serde(deserialize_with = "lossy")]
    pub recovery_node: Option<NodeId>,
    #[serde(deserialize_with = "lossy")]
    pub hero_debuff: Option<HeroDebuff>,
    #[serde(deserialize_with = "lossy")]
    pub previous_node: Option<NodeId>,
}

/// One row per (user, quest).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerQuestState {
    pub user: UserId,
    pub quest: QuestId,
    pub current_node: NodeId,
    #[serde(default)]
    pub status: QuestStatus,
    /// Ordered visit history; nodes may repeat.
    #[serde(default)]
    pub visited: Vec<NodeId>,
    #[serde(default, deserialize_with = "lossy")]
    pub state: QuestProgressState,
}

impl PlayerQuestState {
    /// Fresh state positioned at the quest's start node.
    pub fn new(user: UserId, quest: QuestId, start_node: NodeId) -> Self {
        Self {
            user,
            quest,
            current_node: start_node,
            status: QuestStatus::Active,
            visited: vec![start_node],
            state: QuestProgressState::default(),
        }
    }

    /// Move to a node, recording the node being left as `previous_node`.
    pub fn advance_to(&mut self, node: NodeId) {
        self.state.previous_node = Some(self.current_node);
        self.current_node = node;
        self.visited.push(node);
    }

    /// Where a successful flee rewinds to: `previous_node` when recorded,
    /// otherwise the most recent visited node distinct from the current one.
    pub fn rewind_target(&self) -> Option<NodeId> {
        self.state.previous_node.or_else(|| {
            self.visited
                .iter()
                .rev()
                .find(|&&node| node != self.current_node)
                .copied()
        })
    }

    /// Rewind after a successful flee: step back to the target node and drop
    /// the abandoned node from the visit history.
    pub fn rewind_to(&mut self, target: NodeId) {
        if let Some(position) = self.visited.iter().rposition(|&n| n == self.current_node) {
            self.visited.remove(position);
        }
        self.current_node = target;
        self.state.previous_node = None;
    }
}

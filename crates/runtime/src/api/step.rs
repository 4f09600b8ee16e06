//! Normalized step results handed to the presentation layer.
//!
//! Nothing in here knows about chat formatting; a renderer turns these into
//! whatever the delivery medium needs.

use game_core::combat::{CombatAction, CombatRewards, CombatSession, CombatStatus};
use game_core::encounter::EncounterResult;
use game_core::quest::{
    ConnectionId, LockedReason, NodeId, NodeKind, QuestDefinition, QuestId, QuestStatus,
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Identity of the quest a step belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestSummary {
    pub id: QuestId,
    pub title: String,
    pub status: QuestStatus,
}

/// The node the player currently stands on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub kind: NodeKind,
    pub title: String,
    pub description: String,
    pub is_final: bool,
}

/// One traversable connection, already guard-filtered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub connection: ConnectionId,
    pub to: NodeId,
    pub label: String,
}

/// Result of a quest operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestStep {
    pub quest: QuestSummary,
    /// Absent when the quest is locked and no state exists.
    pub node: Option<NodeView>,
    /// Connections whose guards pass against current world flags.
    pub choices: Vec<ChoiceView>,
    /// Why the quest cannot be started; empty otherwise.
    pub locked_reasons: Vec<LockedReason>,
    pub completed: bool,
    /// The hero must heal to full before the quest can continue.
    pub recovery_required: bool,
    /// An encounter is rolled and waiting at the current node.
    pub pending_encounter: Option<EncounterResult>,
}

impl QuestStep {
    pub(crate) fn summary(quest: &QuestDefinition, status: QuestStatus) -> QuestSummary {
        QuestSummary {
            id: quest.id,
            title: quest.title.clone(),
            status,
        }
    }

    /// Step for a quest the hero cannot start.
    pub(crate) fn locked(quest: &QuestDefinition, reasons: Vec<LockedReason>) -> Self {
        Self {
            quest: Self::summary(quest, QuestStatus::Active),
            node: None,
            choices: Vec::new(),
            locked_reasons: reasons,
            completed: false,
            recovery_required: false,
            pending_encounter: None,
        }
    }

    /// Step withholding quest content until the hero heals.
    pub(crate) fn recovery_required(quest: &QuestDefinition, status: QuestStatus) -> Self {
        Self {
            quest: Self::summary(quest, status),
            node: None,
            choices: Vec::new(),
            locked_reasons: Vec::new(),
            completed: false,
            recovery_required: true,
            pending_encounter: None,
        }
    }
}

/// Which hero actions a renderer should offer.
fn available_actions() -> Vec<CombatAction> {
    CombatAction::iter().collect()
}

/// Result of a combat operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatStep {
    /// One-line status, e.g. `"Aria 34/60 HP vs Dire Wolf 12/40 HP (turn 3)"`.
    pub summary: String,
    pub available_actions: Vec<CombatAction>,
    /// Tail of the action log, newest last.
    pub recent_log: Vec<String>,
}

impl CombatStep {
    /// How many log lines a step carries.
    const LOG_LINES: usize = 3;

    pub(crate) fn from_session(session: &CombatSession) -> Self {
        Self {
            summary: format!(
                "{} {}/{} HP vs {} {}/{} HP (turn {})",
                session.hero.name,
                session.hero_hp,
                session.hero.hp_max,
                session.monster.name,
                session.monster_hp,
                session.monster.hp_max,
                session.turn,
            ),
            available_actions: if session.status.is_terminal() {
                Vec::new()
            } else {
                available_actions()
            },
            recent_log: session.recent_log(Self::LOG_LINES),
        }
    }
}

/// A full combat turn as seen by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatTurnOutcome {
    pub step: CombatStep,
    pub status: CombatStatusView,
    /// Present exactly when the hero won.
    pub rewards: Option<CombatRewards>,
}

/// Serializable mirror of the session status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatStatusView {
    Ongoing,
    HeroWin,
    MonsterWin,
    HeroFlee,
}

impl From<CombatStatus> for CombatStatusView {
    fn from(status: CombatStatus) -> Self {
        match status {
            CombatStatus::Ongoing => Self::Ongoing,
            CombatStatus::HeroWin => Self::HeroWin,
            CombatStatus::MonsterWin => Self::MonsterWin,
            CombatStatus::HeroFlee => Self::HeroFlee,
        }
    }
}

/// How an encounter ended, reported back to the quest interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterOutcome {
    Victory,
    Defeat,
    FleeSuccess,
    FleeFailure,
}

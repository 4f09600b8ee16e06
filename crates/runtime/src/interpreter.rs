//! The quest graph interpreter.
//!
//! Owns per-player traversal: starting and resuming quests, validating and
//! applying choices, rolling encounters on tagged nodes, and consuming combat
//! outcomes. Every mutating call re-validates the request against stored
//! state before applying anything, so stale or replayed requests cannot
//! re-apply effects.

use std::sync::Arc;

use game_core::encounter::{select_encounter, EncounterRule};
use game_core::quest::{
    ActiveEncounter, ConnectionId, EncounterPhase, HeroDebuff, NodeId, PlayerQuestState,
    QuestCatalog, QuestDefinition, QuestId, QuestNode, QuestStatus, UserId,
};
use game_core::stats::HeroRecord;
use game_core::MonsterCatalog;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::api::{
    ChoiceView, CombatStep, EncounterOutcome, NodeView, QuestStep, Result, RuntimeError,
};
use crate::combat::CombatService;
use crate::repository::{HeroRepository, QuestStateRepository};

/// Orchestrates quest traversal over injected content and persistence.
///
/// Construction order is explicit: build the [`CombatService`] and content
/// catalogs first, then hand them in here.
pub struct QuestInterpreter {
    quests: Arc<dyn QuestCatalog>,
    monsters: Arc<dyn MonsterCatalog>,
    rules: Vec<EncounterRule>,
    quest_states: Arc<dyn QuestStateRepository>,
    heroes: Arc<dyn HeroRepository>,
    combat: Arc<CombatService>,
}

impl QuestInterpreter {
    pub fn new(
        quests: Arc<dyn QuestCatalog>,
        monsters: Arc<dyn MonsterCatalog>,
        rules: Vec<EncounterRule>,
        quest_states: Arc<dyn QuestStateRepository>,
        heroes: Arc<dyn HeroRepository>,
        combat: Arc<CombatService>,
    ) -> Self {
        Self {
            quests,
            monsters,
            rules,
            quest_states,
            heroes,
            combat,
        }
    }

    /// Start a quest, or resume it where the player left off.
    ///
    /// Unmet prerequisites return a locked step without creating state. A
    /// state flagged for recovery withholds quest content until the hero's HP
    /// is back at max, at which point the flag clears transparently.
    pub async fn start(&self, user: UserId, quest_id: QuestId) -> Result<QuestStep> {
        let quest = self.quest_def(quest_id)?;
        let mut hero = self.hero(user).await?;

        if let Some(mut state) = self.quest_states.load(user, quest_id).await? {
            if let Some(step) = self.gate_recovery(quest, &mut state, &hero).await? {
                return Ok(step);
            }
            if quest.node(state.current_node).is_none() {
                // Stored position points at a node the graph no longer has.
                tracing::warn!(
                    user = %user,
                    quest = %quest_id,
                    node = %state.current_node,
                    "stored current node missing from quest graph, resetting to start"
                );
                let start = self.start_node(quest)?;
                state.current_node = start.id;
                state.visited.push(start.id);
                self.quest_states.save(&state).await?;
            }
            return Ok(self.step_at(quest, &state, &hero));
        }

        let completed = self.completed_quests(user).await?;
        let reasons = quest.prereqs.check(&hero, &completed);
        if !reasons.is_empty() {
            return Ok(QuestStep::locked(quest, reasons));
        }

        let start = self.start_node(quest)?;
        let mut state = PlayerQuestState::new(user, quest_id, start.id);
        self.apply_node(quest, &mut state, &mut hero, start);

        self.heroes.save(&hero).await?;
        self.quest_states.save(&state).await?;
        tracing::debug!(user = %user, quest = %quest_id, "quest started");
        Ok(self.step_at(quest, &state, &hero))
    }

    /// Follow a connection from the current node.
    ///
    /// The connection must originate at the stored current node and its guard
    /// must pass against current world flags; anything else is rejected
    /// without mutation. Connection effects apply before destination-node
    /// effects.
    pub async fn make_choice(
        &self,
        user: UserId,
        quest_id: QuestId,
        node: NodeId,
        connection: ConnectionId,
    ) -> Result<QuestStep> {
        let quest = self.quest_def(quest_id)?;
        let mut hero = self.hero(user).await?;
        let mut state = self.quest_state(user, quest_id).await?;

        if matches!(state.status, QuestStatus::Completed | QuestStatus::Declined) {
            return Err(RuntimeError::InvalidAction(format!(
                "quest {quest_id} is already {}",
                state.status
            )));
        }
        if let Some(step) = self.gate_recovery(quest, &mut state, &hero).await? {
            return Ok(step);
        }
        if state.current_node != node {
            return Err(RuntimeError::InvalidAction(format!(
                "current node is {}, not {node}",
                state.current_node
            )));
        }
        if state.state.active_encounter.is_some() {
            // The pending encounter must resolve before the quest advances.
            return Ok(self.step_at(quest, &state, &hero));
        }

        let conn = quest
            .connection(connection)
            .ok_or(RuntimeError::ConnectionNotFound {
                quest: quest_id,
                connection,
            })?;
        if conn.from != node {
            return Err(RuntimeError::InvalidAction(format!(
                "connection {connection} does not originate at node {node}"
            )));
        }
        if !conn.payload.allows(&hero.world_flags) {
            return Err(RuntimeError::InvalidAction(format!(
                "guard on connection {connection} is not met"
            )));
        }
        let dest = quest.node(conn.to).ok_or(RuntimeError::NodeNotFound {
            quest: quest_id,
            node: conn.to,
        })?;

        conn.payload.effects.world_flags.apply(&mut hero.world_flags);
        state.advance_to(dest.id);
        self.apply_node(quest, &mut state, &mut hero, dest);

        self.heroes.save(&hero).await?;
        self.quest_states.save(&state).await?;
        tracing::debug!(
            user = %user,
            quest = %quest_id,
            from = %node,
            to = %dest.id,
            "choice applied"
        );
        Ok(self.step_at(quest, &state, &hero))
    }

    /// Begin combat for the encounter pending at the current node.
    pub async fn engage_encounter(&self, user: UserId, quest_id: QuestId) -> Result<CombatStep> {
        let hero = self.hero(user).await?;
        let mut state = self.quest_state(user, quest_id).await?;

        let Some(active) = state.state.active_encounter.clone() else {
            return Err(RuntimeError::InvalidAction(
                "no encounter is pending for this quest".into(),
            ));
        };

        let step = self.combat.start(
            &hero,
            &active.encounter,
            self.monsters.as_ref(),
            state.state.hero_debuff.as_ref(),
        )?;

        if let Some(active) = state.state.active_encounter.as_mut() {
            active.status = EncounterPhase::InProgress;
        }
        if let Err(err) = self.quest_states.save(&state).await {
            // The stored phase is still pending; drop the session to match.
            self.combat.abandon(user);
            return Err(err.into());
        }
        Ok(step)
    }

    /// Fold a finished encounter back into the quest walk.
    pub async fn resolve_encounter_outcome(
        &self,
        user: UserId,
        quest_id: QuestId,
        node: NodeId,
        outcome: EncounterOutcome,
    ) -> Result<QuestStep> {
        let quest = self.quest_def(quest_id)?;
        let hero = self.hero(user).await?;
        let mut state = self.quest_state(user, quest_id).await?;

        match &state.state.active_encounter {
            Some(active) if active.node_id == node => {}
            Some(active) => {
                return Err(RuntimeError::InvalidAction(format!(
                    "active encounter is at node {}, not {node}",
                    active.node_id
                )));
            }
            None => {
                return Err(RuntimeError::InvalidAction(
                    "no active encounter to resolve".into(),
                ));
            }
        }

        // Whatever the outcome, no combat session should outlive it.
        self.combat.abandon(user);

        match outcome {
            EncounterOutcome::Victory => {
                state.state.completed_encounters.insert(node);
                state.state.active_encounter = None;
                state.state.hero_debuff = None;
            }
            EncounterOutcome::Defeat => {
                state.state.needs_recovery = true;
                state.state.recovery_node = Some(node);
                state.state.active_encounter = None;
                state.state.previous_node = None;
                state.status = QuestStatus::Paused;
            }
            EncounterOutcome::FleeSuccess => {
                if let Some(target) = state.rewind_target() {
                    state.rewind_to(target);
                } else {
                    tracing::warn!(
                        user = %user,
                        quest = %quest_id,
                        "flee with no rewind target, staying in place"
                    );
                }
                state.state.active_encounter = None;
                state.state.hero_debuff = Some(HeroDebuff::flee_exhaustion());
            }
            EncounterOutcome::FleeFailure => {
                if let Some(active) = state.state.active_encounter.as_mut() {
                    active.status = EncounterPhase::Pending;
                }
                state.state.hero_debuff = Some(HeroDebuff::flee_failure());
            }
        }

        self.quest_states.save(&state).await?;
        tracing::debug!(user = %user, quest = %quest_id, ?outcome, "encounter resolved");

        if outcome == EncounterOutcome::Defeat {
            return Ok(QuestStep::recovery_required(quest, state.status));
        }
        Ok(self.step_at(quest, &state, &hero))
    }

    /// Record that the player turned the quest down.
    pub async fn decline(&self, user: UserId, quest_id: QuestId) -> Result<QuestStep> {
        let quest = self.quest_def(quest_id)?;
        let hero = self.hero(user).await?;

        let mut state = match self.quest_states.load(user, quest_id).await? {
            Some(state) if state.status == QuestStatus::Completed => {
                return Err(RuntimeError::InvalidAction(format!(
                    "quest {quest_id} is already completed"
                )));
            }
            Some(state) => state,
            None => {
                let start = self.start_node(quest)?;
                PlayerQuestState::new(user, quest_id, start.id)
            }
        };
        state.status = QuestStatus::Declined;
        self.quest_states.save(&state).await?;
        Ok(self.step_at(quest, &state, &hero))
    }

    // --- internals -------------------------------------------------------

    fn quest_def(&self, quest_id: QuestId) -> Result<&QuestDefinition> {
        self.quests
            .quest(quest_id)
            .ok_or(RuntimeError::QuestNotFound(quest_id))
    }

    fn start_node<'a>(&self, quest: &'a QuestDefinition) -> Result<&'a QuestNode> {
        quest.start_node().ok_or_else(|| {
            RuntimeError::InvalidAction(format!("quest {} has no start node", quest.id))
        })
    }

    async fn hero(&self, user: UserId) -> Result<HeroRecord> {
        self.heroes
            .load(user)
            .await?
            .ok_or(RuntimeError::HeroNotFound(user))
    }

    async fn quest_state(&self, user: UserId, quest_id: QuestId) -> Result<PlayerQuestState> {
        self.quest_states
            .load(user, quest_id)
            .await?
            .ok_or_else(|| {
                RuntimeError::InvalidAction(format!("quest {quest_id} has not been started"))
            })
    }

    async fn completed_quests(&self, user: UserId) -> Result<Vec<QuestId>> {
        Ok(self
            .quest_states
            .for_user(user)
            .await?
            .into_iter()
            .filter(|state| state.status == QuestStatus::Completed)
            .map(|state| state.quest)
            .collect())
    }

    /// Returns a recovery step while the flag is set and the hero is hurt;
    /// clears the flag transparently once HP is back at max.
    async fn gate_recovery(
        &self,
        quest: &QuestDefinition,
        state: &mut PlayerQuestState,
        hero: &HeroRecord,
    ) -> Result<Option<QuestStep>> {
        if !state.state.needs_recovery {
            return Ok(None);
        }
        if !hero.is_fully_healed() {
            return Ok(Some(QuestStep::recovery_required(quest, state.status)));
        }
        state.state.needs_recovery = false;
        state.state.recovery_node = None;
        if state.status == QuestStatus::Paused {
            state.status = QuestStatus::Active;
        }
        self.quest_states.save(state).await?;
        tracing::debug!(user = %state.user, quest = %state.quest, "recovery cleared");
        Ok(None)
    }

    /// Apply a node being entered: world-flag effects, completion on final
    /// nodes, and encounter rolls on tagged nodes.
    fn apply_node(
        &self,
        quest: &QuestDefinition,
        state: &mut PlayerQuestState,
        hero: &mut HeroRecord,
        node: &QuestNode,
    ) {
        node.payload.world_flags.apply(&mut hero.world_flags);

        if node.is_final {
            state.status = QuestStatus::Completed;
            state.state.active_encounter = None;
            if let Some(chain) = &quest.chain {
                for (key, value) in chain.completion_flags() {
                    hero.world_flags.insert(key, value);
                }
            }
            return;
        }

        let Some(tags) = node.payload.encounter_tags else {
            return;
        };
        let resolved_before = state.state.completed_encounters.contains(&node.id);
        if resolved_before && !node.payload.repeatable {
            return;
        }

        let mut rng = SmallRng::from_entropy();
        match select_encounter(hero.level, &tags, &self.rules, self.monsters.as_ref(), &mut rng)
        {
            Some(encounter) => {
                state.state.active_encounter = Some(ActiveEncounter {
                    node_id: node.id,
                    status: EncounterPhase::Pending,
                    encounter,
                });
            }
            None => {
                tracing::warn!(
                    quest = %quest.id,
                    node = %node.id,
                    ?tags,
                    "no encounter rule or archetype matched, node continues without one"
                );
            }
        }
    }

    fn step_at(
        &self,
        quest: &QuestDefinition,
        state: &PlayerQuestState,
        hero: &HeroRecord,
    ) -> QuestStep {
        let node = quest.node(state.current_node).map(|node| NodeView {
            id: node.id,
            kind: node.kind,
            title: node.title.clone(),
            description: node.description.clone(),
            is_final: node.is_final,
        });

        let choices = if state.status == QuestStatus::Active {
            quest
                .connections_from(state.current_node)
                .into_iter()
                .filter(|conn| conn.payload.allows(&hero.world_flags))
                .map(|conn| ChoiceView {
                    connection: conn.id,
                    to: conn.to,
                    label: conn.label.clone().unwrap_or_else(|| "Continue".into()),
                })
                .collect()
        } else {
            Vec::new()
        };

        QuestStep {
            quest: QuestStep::summary(quest, state.status),
            node,
            choices,
            locked_reasons: Vec::new(),
            completed: state.status == QuestStatus::Completed,
            recovery_required: state.state.needs_recovery,
            pending_encounter: state
                .state
                .active_encounter
                .as_ref()
                .map(|active| active.encounter.clone()),
        }
    }
}

//! Combat orchestration: session lifecycle, turns, and reward persistence.

use std::sync::Arc;

use game_core::combat::{
    CombatAction, CombatRewards, CombatSession, CombatStatus, CombatantStats,
};
use game_core::encounter::EncounterResult;
use game_core::quest::{HeroDebuff, UserId};
use game_core::stats::{HeroRecord, MonsterInstance};
use game_core::MonsterCatalog;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::api::{CombatStep, CombatTurnOutcome, Result, RuntimeError};
use crate::repository::HeroRepository;

use super::registry::SessionRegistry;

/// Drives combat sessions against the registry and persists outcomes.
pub struct CombatService {
    registry: Arc<SessionRegistry>,
    heroes: Arc<dyn HeroRepository>,
}

impl CombatService {
    pub fn new(registry: Arc<SessionRegistry>, heroes: Arc<dyn HeroRepository>) -> Self {
        Self { registry, heroes }
    }

    /// Start a session for a rolled encounter.
    ///
    /// Encounter modifiers and any stored debuff apply to the snapshots only;
    /// the durable hero record is untouched until the session ends. Fails
    /// with [`RuntimeError::CombatAlreadyActive`] when the user already has
    /// a live session.
    pub fn start(
        &self,
        hero: &HeroRecord,
        encounter: &EncounterResult,
        catalog: &dyn MonsterCatalog,
        debuff: Option<&HeroDebuff>,
    ) -> Result<CombatStep> {
        let archetype = catalog
            .archetype_by_name(&encounter.monster_name)
            .ok_or_else(|| RuntimeError::ArchetypeNotFound(encounter.monster_name.clone()))?;
        let monster = MonsterInstance::new(archetype, encounter.difficulty);

        let mut session = CombatSession::new(
            CombatantStats::from_hero(hero),
            CombatantStats::from_monster(&monster),
            monster.level,
            encounter.difficulty,
        );
        session.apply_modifiers(&encounter.modifiers);
        if let Some(debuff) = debuff {
            session.apply_hero_debuff(debuff);
        }

        tracing::debug!(
            user = %hero.user,
            monster = %session.monster.name,
            difficulty = %encounter.difficulty,
            "combat session started"
        );

        let step = CombatStep::from_session(&session);
        self.registry.insert(hero.user, session)?;
        Ok(step)
    }

    /// Execute one full turn for the user's live session.
    ///
    /// Returns `Ok(None)` when no session exists: the combat already ended
    /// and the caller just clears its view. On a terminal status the session
    /// is removed from the registry and the hero's HP (plus rewards on a win)
    /// is persisted before the outcome is returned.
    pub async fn hero_turn(
        &self,
        user: UserId,
        action: CombatAction,
    ) -> Result<Option<CombatTurnOutcome>> {
        let Some(handle) = self.registry.get(user) else {
            return Ok(None);
        };

        let mut session = handle.lock().await;
        let mut rng = SmallRng::from_entropy();
        let report = session.play_turn(action, &mut rng);

        let rewards = if report.status == CombatStatus::HeroWin {
            Some(CombatRewards::for_monster(
                session.monster_level,
                session.difficulty,
            ))
        } else {
            None
        };

        let outcome = CombatTurnOutcome {
            step: CombatStep::from_session(&session),
            status: report.status.into(),
            rewards,
        };

        if report.status.is_terminal() {
            let hero_hp = session.hero_hp;
            drop(session);
            self.registry.remove(user);
            self.persist_hero_hp(user, hero_hp).await?;
            tracing::debug!(user = %user, status = ?report.status, "combat session ended");
        }

        Ok(Some(outcome))
    }

    /// Drop a session without resolving it, e.g. when the quest layer aborts
    /// the encounter. Missing session is fine.
    pub fn abandon(&self, user: UserId) {
        self.registry.remove(user);
    }

    async fn persist_hero_hp(&self, user: UserId, hp: u32) -> Result<()> {
        let Some(mut hero) = self.heroes.load(user).await? else {
            return Err(RuntimeError::HeroNotFound(user));
        };
        hero.current_hp = hp.min(hero.derived().hp_max);
        self.heroes.save(&hero).await?;
        Ok(())
    }
}

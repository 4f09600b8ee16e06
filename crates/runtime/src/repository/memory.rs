//! In-memory repository implementations for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use game_core::quest::{PlayerQuestState, QuestId, UserId};
use game_core::stats::HeroRecord;

use super::{HeroRepository, QuestStateRepository, RepositoryError, Result};

/// In-memory implementation of [`QuestStateRepository`].
#[derive(Default)]
pub struct InMemoryQuestStateRepo {
    states: RwLock<HashMap<(UserId, QuestId), PlayerQuestState>>,
}

impl InMemoryQuestStateRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestStateRepository for InMemoryQuestStateRepo {
    async fn load(&self, user: UserId, quest: QuestId) -> Result<Option<PlayerQuestState>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(&(user, quest)).cloned())
    }

    async fn save(&self, state: &PlayerQuestState) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert((state.user, state.quest), state.clone());
        Ok(())
    }

    async fn for_user(&self, user: UserId) -> Result<Vec<PlayerQuestState>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states
            .values()
            .filter(|state| state.user == user)
            .cloned()
            .collect())
    }
}

/// In-memory implementation of [`HeroRepository`].
#[derive(Default)]
pub struct InMemoryHeroRepo {
    heroes: RwLock<HashMap<UserId, HeroRecord>>,
}

impl InMemoryHeroRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a hero record, for test setup.
    pub fn with_hero(hero: HeroRecord) -> Self {
        let repo = Self::new();
        if let Ok(mut heroes) = repo.heroes.write() {
            heroes.insert(hero.user, hero);
        }
        repo
    }
}

#[async_trait]
impl HeroRepository for InMemoryHeroRepo {
    async fn load(&self, user: UserId) -> Result<Option<HeroRecord>> {
        let heroes = self
            .heroes
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(heroes.get(&user).cloned())
    }

    async fn save(&self, hero: &HeroRecord) -> Result<()> {
        let mut heroes = self
            .heroes
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        heroes.insert(hero.user, hero.clone());
        Ok(())
    }
}

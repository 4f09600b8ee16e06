//! Persistence contracts for durable play state.
//!
//! The interpreter and combat service only ever see these traits; storage
//! backends live behind them. Writes must complete before a step result is
//! produced, and a failed write leaves stored state untouched so callers can
//! retry; the interpreter re-validates its preconditions on every call.
//!
//! Operations that touch both records write the hero before the quest state.
//! Flag effects are idempotent map writes, so after a failed quest-state save
//! the retried call re-applies them and continues from the stored node.

mod error;
mod memory;

pub use error::{RepositoryError, Result};
pub use memory::{InMemoryHeroRepo, InMemoryQuestStateRepo};

use async_trait::async_trait;
use game_core::quest::{PlayerQuestState, QuestId, UserId};
use game_core::stats::HeroRecord;

/// Durable storage for per-player quest walks, keyed by (user, quest).
#[async_trait]
pub trait QuestStateRepository: Send + Sync {
    async fn load(&self, user: UserId, quest: QuestId) -> Result<Option<PlayerQuestState>>;

    /// Upsert by the state's (user, quest) key.
    async fn save(&self, state: &PlayerQuestState) -> Result<()>;

    /// All quest states for a user, used for prerequisite checks.
    async fn for_user(&self, user: UserId) -> Result<Vec<PlayerQuestState>>;
}

/// Durable storage for hero records.
#[async_trait]
pub trait HeroRepository: Send + Sync {
    async fn load(&self, user: UserId) -> Result<Option<HeroRecord>>;

    async fn save(&self, hero: &HeroRecord) -> Result<()>;
}

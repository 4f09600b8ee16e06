//! Unified error types surfaced by the runtime API.

use game_core::quest::{ConnectionId, NodeId, QuestId, UserId};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("quest {0} not found")]
    QuestNotFound(QuestId),

    #[error("node {node} not found in quest {quest}")]
    NodeNotFound { quest: QuestId, node: NodeId },

    #[error("connection {connection} not found in quest {quest}")]
    ConnectionNotFound {
        quest: QuestId,
        connection: ConnectionId,
    },

    #[error("hero record for user {0} not found")]
    HeroNotFound(UserId),

    #[error("monster archetype {0:?} not found in catalog")]
    ArchetypeNotFound(String),

    /// The request does not match stored state: wrong current node, a
    /// connection from elsewhere, or an unmet guard.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("a combat session is already active for user {0}")]
    CombatAlreadyActive(UserId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

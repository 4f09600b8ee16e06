//! Quest definitions embedded as JSON.

use game_core::quest::{QuestCatalog, QuestDefinition, QuestId};
use thiserror::Error;

const QUESTS_JSON: &str = include_str!("data/quests.json");

/// Problems with embedded or supplied quest content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("quest content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("quest {quest} has {count} start nodes, expected exactly one")]
    StartNodeCount { quest: QuestId, count: usize },
    #[error("quest {quest} connection {connection} references an unknown node")]
    DanglingConnection { quest: QuestId, connection: u32 },
    #[error("duplicate quest id {quest}")]
    DuplicateQuest { quest: QuestId },
}

/// In-memory catalog of validated quest definitions.
pub struct StaticQuestCatalog {
    quests: Vec<QuestDefinition>,
}

impl StaticQuestCatalog {
    /// Load and validate the builtin quest set.
    pub fn builtin() -> Result<Self, ContentError> {
        let quests: Vec<QuestDefinition> = serde_json::from_str(QUESTS_JSON)?;
        Self::with_quests(quests)
    }

    /// Catalog over explicit definitions, validated the same way.
    pub fn with_quests(quests: Vec<QuestDefinition>) -> Result<Self, ContentError> {
        for (index, quest) in quests.iter().enumerate() {
            if quests[..index].iter().any(|other| other.id == quest.id) {
                return Err(ContentError::DuplicateQuest { quest: quest.id });
            }
            validate(quest)?;
        }
        Ok(Self { quests })
    }
}

fn validate(quest: &QuestDefinition) -> Result<(), ContentError> {
    let starts = quest.nodes.iter().filter(|node| node.is_start).count();
    if starts != 1 {
        return Err(ContentError::StartNodeCount {
            quest: quest.id,
            count: starts,
        });
    }
    for connection in &quest.connections {
        if quest.node(connection.from).is_none() || quest.node(connection.to).is_none() {
            return Err(ContentError::DanglingConnection {
                quest: quest.id,
                connection: connection.id.0,
            });
        }
    }
    Ok(())
}

impl QuestCatalog for StaticQuestCatalog {
    fn quest(&self, id: QuestId) -> Option<&QuestDefinition> {
        self.quests.iter().find(|quest| quest.id == id)
    }

    fn quests(&self) -> Vec<&QuestDefinition> {
        self.quests.iter().collect()
    }
}

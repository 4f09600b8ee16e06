//! Types downstream clients interact with.

mod errors;
mod step;

pub use errors::{RepositoryError, Result, RuntimeError};
pub use step::{
    ChoiceView, CombatStatusView, CombatStep, CombatTurnOutcome, EncounterOutcome, NodeView,
    QuestStep, QuestSummary,
};

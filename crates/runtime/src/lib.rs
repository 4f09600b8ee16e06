//! Async orchestration around the gameplay core.
//!
//! This crate wires static content, persistence contracts, the combat
//! session registry, and the quest graph interpreter into a cohesive API.
//! Consumers build the pieces in dependency order (repositories and content
//! catalogs, then the [`CombatService`], then the [`QuestInterpreter`]) and
//! drive play through the interpreter's operations, receiving normalized
//! step results a presentation layer can render.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the step results and error types clients interact with
//! - [`combat`] hosts the session registry and combat service
//! - [`interpreter`] hosts the quest graph interpreter
//! - [`repository`] provides persistence contracts plus in-memory
//!   implementations

pub mod api;
pub mod combat;
pub mod interpreter;
pub mod repository;

pub use api::{
    ChoiceView, CombatStatusView, CombatStep, CombatTurnOutcome, EncounterOutcome, NodeView,
    QuestStep, QuestSummary, RepositoryError, Result, RuntimeError,
};
pub use combat::{CombatService, SessionHandle, SessionRegistry};
pub use interpreter::QuestInterpreter;
pub use repository::{
    HeroRepository, InMemoryHeroRepo, InMemoryQuestStateRepo, QuestStateRepository,
};

//! Deterministic gameplay logic shared across the runtime and offline tools.
//!
//! `game-core` defines the canonical rules of play: stat derivation, combat
//! resolution, encounter selection, and the quest graph with its guard and
//! effect semantics. Everything here is pure: no I/O, no logging, no global
//! state. Randomness only enters through explicit [`rand::Rng`] parameters or
//! pre-sampled roll structs, so every resolution path can be replayed with
//! fixed inputs in tests.
//!
//! Modules are organized by responsibility:
//! - [`stats`]: core stat blocks and derived combat stats
//! - [`combat`]: the turn-based combat session state machine
//! - [`encounter`]: weighted procedural encounter selection
//! - [`quest`]: quest graph types, guards, and durable player state
pub mod combat;
pub mod encounter;
pub mod quest;
pub mod stats;

pub use combat::{
    CombatRewards, CombatSession, CombatStatus, CombatantStats, StrikeKind, StrikeRolls,
    TurnReport,
};
pub use encounter::{
    Biome, Difficulty, EncounterKind, EncounterResult, EncounterRule, EncounterTags,
    MonsterCatalog, SpecialModifiers, select_encounter,
};
pub use quest::{
    ActiveEncounter, ConnectionId, ConnectionPayload, EncounterPhase, FlagGuard, FlagValue,
    GuardViolation, HeroDebuff, LockedReason, NodeId, NodePayload, PlayerQuestState, QuestCatalog,
    QuestChain, QuestConnection, QuestDefinition, QuestId, QuestNode, QuestPrereqs,
    QuestProgressState, QuestStatus, UserId, WorldFlagEffects, WorldFlags,
};
pub use stats::{
    CoreStats, DerivedStats, HeroRecord, MonsterArchetype, MonsterInstance, MonsterType, Named,
};

//! Quest graphs, guards, prerequisites, and durable player state.
//!
//! A quest is a static directed graph; play is a walk over it, recorded in
//! [`PlayerQuestState`]. Connections carry guard payloads over the hero's
//! world flags and effect payloads that mutate them. Payload and sub-state
//! decoding is deliberately lossy: stored data that does not match the
//! expected shape degrades to documented defaults instead of failing hard,
//! while explicit `has`/`missing` guard entries fail closed.

mod graph;
mod payload;
mod prereq;
mod state;

pub use graph::{
    ConnectionId, ConnectionKind, NodeId, NodeKind, QuestCatalog, QuestChain, QuestConnection,
    QuestDefinition, QuestId, QuestNode, UserId,
};
pub use payload::{
    ConnectionConditions, ConnectionEffects, ConnectionPayload, FlagGuard, FlagValue,
    GuardViolation, NodePayload, WorldFlagEffects, WorldFlags,
};
pub use prereq::{LockedReason, QuestPrereqs};
pub use state::{
    ActiveEncounter, EncounterPhase, HeroDebuff, PlayerQuestState, QuestProgressState, QuestStatus,
};

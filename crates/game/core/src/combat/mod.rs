//! Turn-based combat resolution.
//!
//! A [`CombatSession`] is the ephemeral state of one encounter between a hero
//! and a monster. All resolution is pure: probabilistic inputs are sampled
//! into [`StrikeRolls`] up front, so the same session can be driven with live
//! randomness in play and fixed rolls in tests.
//!
//! Session lifecycle is `Ongoing → {HeroWin, MonsterWin, HeroFlee}`; keeping
//! at most one live session per user is the runtime registry's job, not this
//! module's.

mod rewards;
mod roll;
mod session;
mod turn;

pub use rewards::CombatRewards;
pub use roll::{StrikeKind, StrikeOutcome, StrikeRolls, resolve_strike};
pub use session::{CombatSession, CombatStatus, CombatantStats, Side};
pub use turn::{ActionReport, CombatAction, FLEE_SUCCESS_CHANCE, TurnReport};

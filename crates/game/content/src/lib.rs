//! Static game content: the monster catalog, the encounter rule table, and
//! quest definitions.
//!
//! Content is embedded in the binary (quest graphs as JSON, the catalog and
//! rule table as plain Rust) and exposed through the `game-core` traits so
//! the runtime never depends on where content actually lives.

mod catalog;
mod quests;
mod rules;

pub use catalog::StaticMonsterCatalog;
pub use quests::{ContentError, StaticQuestCatalog};
pub use rules::builtin_rules;

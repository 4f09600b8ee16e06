//! Keyed store of live combat sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use game_core::combat::CombatSession;
use game_core::quest::UserId;
use tokio::sync::Mutex as SessionLock;

use crate::api::{Result, RuntimeError};

/// Shared handle to one live session; lock it to act on it.
pub type SessionHandle = Arc<SessionLock<CombatSession>>;

/// Process-wide registry of combat sessions, at most one per user.
///
/// The outer map lock is held only for lookups; per-session exclusivity comes
/// from each entry's own async mutex, so two actions for the same user
/// serialize while different users proceed in parallel.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<UserId, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session. Rejects when one already exists for the user;
    /// the existing session stays untouched.
    pub fn insert(&self, user: UserId, session: CombatSession) -> Result<SessionHandle> {
        let mut sessions = self.lock();
        if sessions.contains_key(&user) {
            return Err(RuntimeError::CombatAlreadyActive(user));
        }
        let handle = Arc::new(SessionLock::new(session));
        sessions.insert(user, Arc::clone(&handle));
        Ok(handle)
    }

    pub fn get(&self, user: UserId) -> Option<SessionHandle> {
        self.lock().get(&user).cloned()
    }

    pub fn remove(&self, user: UserId) -> Option<SessionHandle> {
        self.lock().remove(&user)
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.lock().contains_key(&user)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, SessionHandle>> {
        // Session state stays consistent even if a holder panicked; keep going.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use game_core::combat::CombatantStats;
    use game_core::encounter::Difficulty;

    use super::*;

    fn session() -> CombatSession {
        let combatant = |name: &str| CombatantStats {
            name: name.into(),
            hp_max: 30,
            atk: 5,
            mag: 5,
            crit_chance: 0.0,
            dodge: 0.0,
        };
        CombatSession::new(combatant("Hero"), combatant("Rat"), 1, Difficulty::Easy)
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let registry = SessionRegistry::new();
        registry.insert(UserId(1), session()).unwrap();

        let second = registry.insert(UserId(1), session());
        assert!(matches!(
            second,
            Err(RuntimeError::CombatAlreadyActive(UserId(1)))
        ));
        assert!(registry.contains(UserId(1)));
    }

    #[test]
    fn remove_frees_the_slot() {
        let registry = SessionRegistry::new();
        registry.insert(UserId(1), session()).unwrap();
        assert!(registry.remove(UserId(1)).is_some());
        assert!(!registry.contains(UserId(1)));
        assert!(registry.insert(UserId(1), session()).is_ok());
    }
}

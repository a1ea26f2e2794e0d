//! Session persistence.
//!
//! The engine writes a player's full [`PlayerState`] after every mutating
//! operation and reads it back when a session is first touched. Storage is
//! synchronous and keyed by user id; [`InMemorySessionStore`] keeps
//! everything in process memory for local runs and tests.

use std::collections::BTreeMap;
use std::sync::RwLock;

use bayou_types::UserId;

use crate::state::PlayerState;

/// Errors a session store can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A writer panicked while holding the store lock.
    #[error("session store lock poisoned")]
    LockPoisoned,
}

/// Durable storage for player state.
pub trait SessionStore: Send + Sync {
    /// Load the state for `user`, if any was saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn load(&self, user: &UserId) -> Result<Option<PlayerState>, StoreError>;

    /// Save `state`, replacing anything stored under the same user id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn save(&self, state: &PlayerState) -> Result<(), StoreError>;

    /// All stored user ids, in order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn list(&self) -> Result<Vec<UserId>, StoreError>;
}

/// In-memory [`SessionStore`].
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    states: RwLock<BTreeMap<UserId, PlayerState>>,
}

impl InMemorySessionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, user: &UserId) -> Result<Option<PlayerState>, StoreError> {
        let states = self.states.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(states.get(user).cloned())
    }

    fn save(&self, state: &PlayerState) -> Result<(), StoreError> {
        let mut states = self.states.write().map_err(|_| StoreError::LockPoisoned)?;
        states.insert(state.user.id.clone(), state.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<UserId>, StoreError> {
        let states = self.states.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(states.keys().cloned().collect())
    }
}

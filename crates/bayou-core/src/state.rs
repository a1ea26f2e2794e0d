//! The persisted state of one player.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use bayou_ledger::Ledger;
use bayou_types::{LoreEntry, LoreId, User, VenueId};
use bayou_world::ContentTables;

/// Everything the engine remembers about one player.
///
/// This is the unit a [`SessionStore`](crate::store::SessionStore) saves
/// and loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// The player's profile and wallet.
    pub user: User,
    /// Venues the player has checked in to at least once.
    pub visited_venues: BTreeSet<VenueId>,
    /// The player's lore journal, newest entries first.
    pub lore: Vec<LoreEntry>,
    /// Every FuX movement since the state was created.
    pub ledger: Ledger,
}

impl PlayerState {
    /// Fresh state for `user`: no visits, the seed lore all locked, and a
    /// ledger opened at the user's current balance.
    pub fn new(user: User, content: &ContentTables) -> Self {
        let ledger = Ledger::new(user.fux_balance);
        Self {
            user,
            visited_venues: BTreeSet::new(),
            lore: content.lore_seed().to_vec(),
            ledger,
        }
    }

    /// Whether the journal holds an unlocked entry with `id`.
    pub fn is_unlocked(&self, id: &LoreId) -> bool {
        self.lore.iter().any(|l| &l.id == id && l.unlocked)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bayou_world::{create_starting_content, demo_player};

    use super::*;

    #[test]
    fn new_state_starts_clean() {
        let content = create_starting_content().unwrap();
        let state = PlayerState::new(demo_player(), &content);

        assert!(state.visited_venues.is_empty());
        assert_eq!(state.lore.len(), 4);
        assert!(state.lore.iter().all(|l| !l.unlocked));
        assert_eq!(state.ledger.opening_balance(), 1000);
        assert!(state.ledger.is_empty());
    }

    #[test]
    fn state_round_trips_through_json() {
        let content = create_starting_content().unwrap();
        let state = PlayerState::new(demo_player(), &content);
        let json = serde_json::to_string(&state).unwrap();
        let back: PlayerState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}

//! The assembled, validated content tables.
//!
//! [`ContentTables`] is loaded once at process start and shared read-only
//! (behind an `Arc`) by every player session. Nothing in here mutates after
//! construction; per-player lore and visitation live in the engine.

use std::collections::BTreeSet;

use bayou_types::{DiscoverableUser, LoreEntry, LoreId, TagId, User, Venue, VenueId};

use crate::error::WorldError;
use crate::symbols::SymbolTable;

/// Which lore entry each engine event unlocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoreTriggers {
    /// Unlocked by the first check-in at any venue.
    pub first_visit: LoreId,
    /// The distinguished venue with its own lore entry.
    pub signature_venue: VenueId,
    /// Unlocked by the first check-in at [`LoreTriggers::signature_venue`].
    pub signature_lore: LoreId,
    /// Unlocked by any winning slot row.
    pub slot_line: LoreId,
    /// Unlocked by going dark (location sharing turned off).
    pub stealth: LoreId,
}

/// Static game content shared by all sessions.
#[derive(Debug, Clone)]
pub struct ContentTables {
    venues: Vec<Venue>,
    lore_seed: Vec<LoreEntry>,
    symbols: SymbolTable,
    directory: Vec<DiscoverableUser>,
    seed_player: User,
    triggers: LoreTriggers,
}

impl ContentTables {
    /// Assemble and validate the content tables.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if a venue has tier 0, two venues share a tag,
    /// two lore entries share an id, or a trigger points at missing content.
    pub fn new(
        venues: Vec<Venue>,
        lore_seed: Vec<LoreEntry>,
        symbols: SymbolTable,
        directory: Vec<DiscoverableUser>,
        seed_player: User,
        triggers: LoreTriggers,
    ) -> Result<Self, WorldError> {
        let mut tags = BTreeSet::new();
        for venue in &venues {
            if venue.tier == 0 {
                return Err(WorldError::ZeroTier(venue.id.clone()));
            }
            if !tags.insert(&venue.nfc_id) {
                return Err(WorldError::DuplicateTag(venue.nfc_id.clone()));
            }
        }

        let mut lore_ids = BTreeSet::new();
        for entry in &lore_seed {
            if !lore_ids.insert(&entry.id) {
                return Err(WorldError::DuplicateLore(entry.id.clone()));
            }
        }

        for lore in [
            &triggers.first_visit,
            &triggers.signature_lore,
            &triggers.slot_line,
            &triggers.stealth,
        ] {
            if !lore_ids.contains(lore) {
                return Err(WorldError::UnknownLore(lore.clone()));
            }
        }

        if !venues.iter().any(|v| v.id == triggers.signature_venue) {
            return Err(WorldError::UnknownVenue(triggers.signature_venue.clone()));
        }

        Ok(Self {
            venues,
            lore_seed,
            symbols,
            directory,
            seed_player,
            triggers,
        })
    }

    /// All venues, in content order.
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Find the venue whose NFC sticker carries `tag`.
    pub fn venue_by_tag(&self, tag: &TagId) -> Option<&Venue> {
        self.venues.iter().find(|v| &v.nfc_id == tag)
    }

    /// The lore collection every new player starts with (all locked).
    pub fn lore_seed(&self) -> &[LoreEntry] {
        &self.lore_seed
    }

    /// The weighted slot symbol table.
    pub const fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Users listed in the discover directory.
    pub fn directory(&self) -> &[DiscoverableUser] {
        &self.directory
    }

    /// The demo player profile.
    pub const fn seed_player(&self) -> &User {
        &self.seed_player
    }

    /// The lore unlock triggers.
    pub const fn triggers(&self) -> &LoreTriggers {
        &self.triggers
    }
}

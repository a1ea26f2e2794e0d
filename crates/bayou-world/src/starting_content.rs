//! Default content for the New Orleans launch: three venues along the
//! parade route, four lore entries, the Mardi Gras reel, a small directory
//! of discoverable users, and the demo player profile.

use std::collections::BTreeSet;

use bayou_types::{DiscoverableUser, LoreEntry, LoreId, TagId, User, UserId, Venue, VenueId};

use crate::content::{ContentTables, LoreTriggers};
use crate::error::WorldError;
use crate::symbols::{SymbolTable, default_symbols};

/// Well-known content identifiers referenced by the unlock triggers.
pub mod ids {
    /// The Iron Jester, the distinguished first venue.
    pub const IRON_JESTER: &str = "v1";
    /// Neon Bayou.
    pub const NEON_BAYOU: &str = "v2";
    /// Voodoo Circuit.
    pub const VOODOO_CIRCUIT: &str = "v3";

    /// "The First Parade" -- any first check-in.
    pub const LORE_FIRST_PARADE: &str = "lore_1";
    /// "Jester Glitch" -- first check-in at The Iron Jester.
    pub const LORE_JESTER_GLITCH: &str = "lore_2";
    /// "The Serpent's Coil" -- any winning slot row.
    pub const LORE_SERPENTS_COIL: &str = "lore_3";
    /// "Stealth Protocol 404" -- going dark.
    pub const LORE_STEALTH_PROTOCOL: &str = "lore_4";

    /// The demo player.
    pub const DEMO_PLAYER: &str = "user_001";
    /// The demo player's patch tag.
    pub const DEMO_PATCH: &str = "patch_404";
}

/// Starting FuX for the demo player.
pub const DEMO_STARTING_BALANCE: u64 = 1000;

/// Helper to build a [`Venue`].
fn venue(id: &str, name: &str, lat: f64, lng: f64, tier: u32, tag: &str) -> Venue {
    Venue {
        id: VenueId::from(id),
        name: name.to_owned(),
        lat,
        lng,
        tier,
        active: true,
        nfc_id: TagId::from(tag),
    }
}

/// Helper to build a locked [`LoreEntry`].
fn lore(id: &str, title: &str, content: &str, requirement: &str) -> LoreEntry {
    LoreEntry {
        id: LoreId::from(id),
        title: title.to_owned(),
        content: content.to_owned(),
        unlocked: false,
        unlock_requirement: requirement.to_owned(),
    }
}

/// Helper to build a [`DiscoverableUser`].
fn reveler(id: &str, name: &str, avatar_seed: &str) -> DiscoverableUser {
    DiscoverableUser {
        id: UserId::from(id),
        display_name: name.to_owned(),
        avatar_url: format!("https://i.pravatar.cc/150?u={avatar_seed}"),
    }
}

/// The launch venues.
pub fn starting_venues() -> Vec<Venue> {
    vec![
        venue(ids::IRON_JESTER, "The Iron Jester", 29.9511, -90.0715, 1, "tag_v1"),
        venue(ids::NEON_BAYOU, "Neon Bayou", 29.9584, -90.0644, 2, "tag_v2"),
        venue(ids::VOODOO_CIRCUIT, "Voodoo Circuit", 29.9620, -90.0550, 3, "tag_v3"),
    ]
}

/// The launch lore journal, all entries locked.
pub fn starting_lore() -> Vec<LoreEntry> {
    vec![
        lore(
            ids::LORE_FIRST_PARADE,
            "The First Parade",
            "Long before the circuits flickered, New Orleans danced in the dust. The First Parade wasn't just a party; it was a pact between the flesh and the future.",
            "Visit your first venue.",
        ),
        lore(
            ids::LORE_JESTER_GLITCH,
            "Jester Glitch",
            "The Iron Jester wasn't always a statue. Legend says he was a hacker who successfully uploaded his consciousness into the city's power grid during a blackout.",
            "Visit \"The Iron Jester\".",
        ),
        lore(
            ids::LORE_SERPENTS_COIL,
            "The Serpent's Coil",
            "FuX Coins aren't just currency; they are compressed data packets containing the residual joy of the revelers. Spend them wisely, for the Serpent is hungry.",
            "Hit a 3-symbol line in the slots.",
        ),
        lore(
            ids::LORE_STEALTH_PROTOCOL,
            "Stealth Protocol 404",
            "In a world of constant surveillance, being invisible is the ultimate luxury. The Safety Core patches were designed to hide the elite, but now they belong to the streets.",
            "Trigger Stealth Mode via NFC.",
        ),
    ]
}

/// Users shown in the discover directory.
pub fn starting_directory() -> Vec<DiscoverableUser> {
    vec![
        reveler("user_002", "Voodoo_Child", "voodoo"),
        reveler("user_003", "Neon_Ghost", "neon"),
        reveler("user_004", "Bead_Hunter", "bead"),
    ]
}

/// The demo player: broadcasting, with one pending request from `user_002`.
pub fn demo_player() -> User {
    User {
        id: UserId::from(ids::DEMO_PLAYER),
        display_name: "Cypher_Mardi".to_owned(),
        avatar_url: "https://i.pravatar.cc/150?u=cypher".to_owned(),
        fux_balance: DEMO_STARTING_BALANCE,
        total_fux_earned: DEMO_STARTING_BALANCE,
        total_venues_visited: 0,
        trust_score: 85,
        location_sharing: true,
        own_patch_id: TagId::from(ids::DEMO_PATCH),
        friends: BTreeSet::new(),
        pending_requests: BTreeSet::from([UserId::from("user_002")]),
    }
}

/// The launch unlock triggers.
pub fn starting_triggers() -> LoreTriggers {
    LoreTriggers {
        first_visit: LoreId::from(ids::LORE_FIRST_PARADE),
        signature_venue: VenueId::from(ids::IRON_JESTER),
        signature_lore: LoreId::from(ids::LORE_JESTER_GLITCH),
        slot_line: LoreId::from(ids::LORE_SERPENTS_COIL),
        stealth: LoreId::from(ids::LORE_STEALTH_PROTOCOL),
    }
}

/// Create the default launch content.
///
/// # Errors
///
/// Returns [`WorldError`] if the content fails validation (should not happen
/// with valid hard-coded data).
pub fn create_starting_content() -> Result<ContentTables, WorldError> {
    ContentTables::new(
        starting_venues(),
        starting_lore(),
        SymbolTable::new(default_symbols())?,
        starting_directory(),
        demo_player(),
        starting_triggers(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starting_content_builds() {
        let content = create_starting_content().unwrap();
        assert_eq!(content.venues().len(), 3);
        assert_eq!(content.lore_seed().len(), 4);
        assert_eq!(content.symbols().len(), 7);
        assert_eq!(content.directory().len(), 3);
    }

    #[test]
    fn all_lore_starts_locked() {
        assert!(starting_lore().iter().all(|l| !l.unlocked));
    }

    #[test]
    fn venue_lookup_by_tag() {
        let content = create_starting_content().unwrap();
        let venue = content.venue_by_tag(&TagId::from("tag_v3")).unwrap();
        assert_eq!(venue.tier, 3);
        assert!(content.venue_by_tag(&TagId::from("mock_tag")).is_none());
    }

    #[test]
    fn duplicate_tags_are_rejected() {
        let mut venues = starting_venues();
        venues.push(venue("v4", "Copycat", 29.95, -90.07, 1, "tag_v1"));
        let symbols = SymbolTable::new(default_symbols()).unwrap();
        let result = ContentTables::new(
            venues,
            starting_lore(),
            symbols,
            starting_directory(),
            demo_player(),
            starting_triggers(),
        );
        assert_eq!(result.err(), Some(WorldError::DuplicateTag(TagId::from("tag_v1"))));
    }

    #[test]
    fn zero_tier_is_rejected() {
        let mut venues = starting_venues();
        venues.push(venue("v0", "Dead Zone", 29.95, -90.07, 0, "tag_v0"));
        let symbols = SymbolTable::new(default_symbols()).unwrap();
        let result = ContentTables::new(
            venues,
            starting_lore(),
            symbols,
            starting_directory(),
            demo_player(),
            starting_triggers(),
        );
        assert_eq!(result.err(), Some(WorldError::ZeroTier(VenueId::from("v0"))));
    }

    #[test]
    fn dangling_trigger_is_rejected() {
        let mut triggers = starting_triggers();
        triggers.stealth = LoreId::from("lore_missing");
        let symbols = SymbolTable::new(default_symbols()).unwrap();
        let result = ContentTables::new(
            starting_venues(),
            starting_lore(),
            symbols,
            starting_directory(),
            demo_player(),
            triggers,
        );
        assert_eq!(
            result.err(),
            Some(WorldError::UnknownLore(LoreId::from("lore_missing")))
        );
    }

    #[test]
    fn demo_player_has_pending_request() {
        let player = demo_player();
        assert!(player.pending_requests.contains(&UserId::from("user_002")));
        assert!(player.friends.is_empty());
        assert_eq!(player.fux_balance, DEMO_STARTING_BALANCE);
    }
}

//! Core entity structs for Cyber Bayou.
//!
//! Field names serialize in `camelCase` to match the mobile web client
//! (`fuXBalance`, `nfcId`, `loreUnlocked`). FuX amounts are whole numbers;
//! the client reads them as plain JSON numbers.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{LedgerEntryKind, TagType};
use crate::ids::{LoreId, SymbolId, TagId, UserId, VenueId};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A player profile: identity, FuX economy, progress, and social graph.
///
/// `fux_balance` is unsigned, so a negative balance is unrepresentable.
/// `total_fux_earned` only ever grows; spending touches the balance alone.
/// A counterpart never appears in both `friends` and `pending_requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct User {
    /// Unique player identifier.
    pub id: UserId,
    /// Public handle shown on the profile and friend lists.
    pub display_name: String,
    /// Avatar image URL (or data URL uploaded from the device).
    pub avatar_url: String,
    /// Spendable FuX.
    #[serde(rename = "fuXBalance")]
    #[ts(type = "number")]
    pub fux_balance: u64,
    /// Lifetime FuX credited (venue rewards, caches, slot wins).
    #[serde(rename = "totalFuXEarned")]
    #[ts(type = "number")]
    pub total_fux_earned: u64,
    /// Number of distinct venues checked into.
    pub total_venues_visited: u32,
    /// Reputation in the range 0 to 100.
    pub trust_score: u8,
    /// Whether the player's location is broadcast on the map.
    pub location_sharing: bool,
    /// Tag id of the player's own scannable patch.
    pub own_patch_id: TagId,
    /// Accepted friends.
    pub friends: BTreeSet<UserId>,
    /// Users waiting for this player to accept their request.
    pub pending_requests: BTreeSet<UserId>,
}

/// A user listed in the "discover" directory of the social screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DiscoverableUser {
    /// The user's identifier.
    pub id: UserId,
    /// Public handle.
    pub display_name: String,
    /// Avatar image URL.
    pub avatar_url: String,
}

// ---------------------------------------------------------------------------
// Venue
// ---------------------------------------------------------------------------

/// A physical check-in location with an NFC tag on site.
///
/// Venues are static content; visitation is tracked per player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Venue {
    /// Unique venue identifier.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Reward tier (1 or greater). Check-in reward scales linearly with it.
    pub tier: u32,
    /// Whether the venue is currently shown on the map.
    pub active: bool,
    /// The tag id printed on the venue's NFC sticker.
    pub nfc_id: TagId,
}

// ---------------------------------------------------------------------------
// Lore
// ---------------------------------------------------------------------------

/// A lore journal entry.
///
/// `unlocked` only ever moves from `false` to `true`. The
/// `unlock_requirement` text is descriptive; unlocking is driven by engine
/// events, never by parsing this text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct LoreEntry {
    /// Unique lore identifier.
    pub id: LoreId,
    /// Entry title.
    pub title: String,
    /// Narrative body text.
    pub content: String,
    /// Whether the entry has been revealed to the player.
    pub unlocked: bool,
    /// Human-readable hint describing how to unlock the entry.
    pub unlock_requirement: String,
}

/// A curated lore entry submitted without an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewLoreEntry {
    /// Entry title.
    pub title: String,
    /// Narrative body text.
    pub content: String,
    /// Initial unlocked state, as chosen by the curator.
    #[serde(default)]
    pub unlocked: bool,
    /// Human-readable unlock hint.
    pub unlock_requirement: String,
}

impl NewLoreEntry {
    /// Attach an id, producing a full [`LoreEntry`].
    pub fn with_id(self, id: LoreId) -> LoreEntry {
        LoreEntry {
            id,
            title: self.title,
            content: self.content,
            unlocked: self.unlocked,
            unlock_requirement: self.unlock_requirement,
        }
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// A reel symbol and its relative selection weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SlotSymbol {
    /// The glyph shown on the reel.
    pub id: SymbolId,
    /// Short English name.
    pub name: String,
    /// Relative selection weight (strictly positive).
    pub weight: u32,
}

/// The outcome of one slot spin. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SlotResult {
    /// Three rows of three symbol ids.
    pub grid: Vec<Vec<SymbolId>>,
    /// Total payout across all matching rows.
    #[ts(type = "number")]
    pub win_amount: u64,
    /// Balance after the bet was debited and winnings credited.
    #[ts(type = "number")]
    pub new_balance: u64,
    /// Indices (0 to 2) of rows with three matching symbols.
    pub lines_hit: Vec<u8>,
    /// One line of atmospheric flavor text from the oracle.
    pub lore_message: String,
    /// Lore entry unlocked by this spin, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore_unlocked: Option<LoreId>,
}

// ---------------------------------------------------------------------------
// Scans
// ---------------------------------------------------------------------------

/// The outcome of scanning an NFC tag. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ScanResponse {
    /// How the tag was classified.
    #[serde(rename = "type")]
    pub tag_type: TagType,
    /// Message to show the player.
    pub message: String,
    /// FuX credited by this scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub reward: Option<u64>,
    /// Nominal FuX penalty of a curse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub penalty: Option<u64>,
    /// Lore entry unlocked by this scan, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore_unlocked: Option<LoreId>,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// One FuX movement on a player's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct LedgerEntry {
    /// Position in the player's ledger, starting at 1.
    #[ts(type = "number")]
    pub sequence: u64,
    /// Why FuX moved.
    pub kind: LedgerEntryKind,
    /// FuX actually moved (a floored curse records the real drain).
    #[ts(type = "number")]
    pub amount: u64,
    /// Wallet balance right after this entry.
    #[ts(type = "number")]
    pub balance_after: u64,
    /// Wall-clock time the entry was recorded.
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn user_wire_names_match_client() {
        let user = User {
            id: UserId::from("user_001"),
            display_name: "Cypher_Mardi".to_owned(),
            avatar_url: String::new(),
            fux_balance: 1000,
            total_fux_earned: 1000,
            total_venues_visited: 0,
            trust_score: 85,
            location_sharing: true,
            own_patch_id: TagId::from("patch_404"),
            friends: BTreeSet::new(),
            pending_requests: BTreeSet::from([UserId::from("user_002")]),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["fuXBalance"], 1000);
        assert_eq!(json["totalFuXEarned"], 1000);
        assert_eq!(json["ownPatchId"], "patch_404");
        assert_eq!(json["pendingRequests"][0], "user_002");
    }

    #[test]
    fn scan_response_omits_absent_fields() {
        let response = ScanResponse {
            tag_type: TagType::Blessing,
            message: "The spirits favor you.".to_owned(),
            reward: None,
            penalty: None,
            lore_unlocked: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "BLESSING");
        assert!(json.get("reward").is_none());
        assert!(json.get("loreUnlocked").is_none());
    }

    #[test]
    fn new_lore_entry_defaults_to_locked() {
        let entry: NewLoreEntry = serde_json::from_str(
            r#"{"title":"Bead Storm","content":"...","unlockRequirement":"Special discovery."}"#,
        )
        .unwrap();
        assert!(!entry.unlocked);

        let full = entry.with_id(LoreId::from("lore_9"));
        assert_eq!(full.id, LoreId::from("lore_9"));
        assert_eq!(full.title, "Bead Storm");
    }
}

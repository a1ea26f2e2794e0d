//! Enumeration types for Cyber Bayou.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Tag classification
// ---------------------------------------------------------------------------

/// Classification of a scanned NFC tag.
///
/// The engine resolves a tag in a fixed order: the player's own patch first,
/// then a known venue, and anything else is a mystery tag that resolves to
/// one of [`TagType::Reward`], [`TagType::Curse`], or [`TagType::Blessing`].
/// There is no "invalid tag" classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum TagType {
    /// The player's own identity patch; toggles stealth mode.
    Patch,
    /// A venue check-in tag; pays a tier-scaled reward.
    Venue,
    /// A hidden FuX cache.
    Reward,
    /// A digital hex that drains FuX (never below zero).
    Curse,
    /// A blessing from the spirits; no economic effect.
    Blessing,
}

/// The result of opening a mystery tag, drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MysteryOutcome {
    /// A hidden FuX cache.
    Reward,
    /// A digital hex.
    Curse,
    /// A blessing with no economic effect.
    Blessing,
}

impl MysteryOutcome {
    /// Every outcome, in draw order.
    pub const ALL: [Self; 3] = [Self::Reward, Self::Curse, Self::Blessing];

    /// The tag classification reported to the client.
    pub const fn tag_type(self) -> TagType {
        match self {
            Self::Reward => TagType::Reward,
            Self::Curse => TagType::Curse,
            Self::Blessing => TagType::Blessing,
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger entry types
// ---------------------------------------------------------------------------

/// The reason a FuX movement was recorded in a player's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum LedgerEntryKind {
    /// Tier reward for scanning a venue tag (credit).
    VenueCheckIn,
    /// Fixed reward from a mystery cache (credit).
    HiddenCache,
    /// Curse penalty, floored at the available balance (debit).
    Curse,
    /// Stake placed on a slot spin (debit).
    SlotBet,
    /// Winnings from matched slot rows (credit).
    SlotWin,
}

impl LedgerEntryKind {
    /// Returns `true` if entries of this kind add FuX to the balance.
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::VenueCheckIn | Self::HiddenCache | Self::SlotWin)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tag_type_uses_screaming_case_on_the_wire() {
        let json = serde_json::to_string(&TagType::Blessing).unwrap();
        assert_eq!(json, "\"BLESSING\"");
    }

    #[test]
    fn mystery_outcomes_map_to_mystery_tags() {
        let tags: Vec<_> = MysteryOutcome::ALL.iter().map(|o| o.tag_type()).collect();
        assert_eq!(tags, vec![TagType::Reward, TagType::Curse, TagType::Blessing]);
    }

    #[test]
    fn credit_kinds() {
        assert!(LedgerEntryKind::SlotWin.is_credit());
        assert!(!LedgerEntryKind::SlotBet.is_credit());
        assert!(!LedgerEntryKind::Curse.is_credit());
    }
}

//! Error types for the `bayou-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use bayou_types::{LoreId, TagId, VenueId};

/// Errors that can occur while building the content tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The slot symbol table has no symbols.
    #[error("slot symbol table is empty")]
    EmptySymbolTable,

    /// The slot symbol weights cannot form a distribution.
    #[error("invalid slot symbol weights: {0}")]
    InvalidSymbolWeights(String),

    /// A venue has a zero tier.
    #[error("venue {0} has tier 0; tiers start at 1")]
    ZeroTier(VenueId),

    /// Two venues share the same NFC tag id.
    #[error("NFC tag {0} is assigned to more than one venue")]
    DuplicateTag(TagId),

    /// Two lore entries share the same id.
    #[error("lore entry {0} is defined more than once")]
    DuplicateLore(LoreId),

    /// An unlock trigger points at a lore entry that does not exist.
    #[error("unlock trigger references unknown lore entry {0}")]
    UnknownLore(LoreId),

    /// An unlock trigger points at a venue that does not exist.
    #[error("unlock trigger references unknown venue {0}")]
    UnknownVenue(VenueId),
}

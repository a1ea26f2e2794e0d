//! Shared type definitions for Cyber Bayou.
//!
//! This crate is the single source of truth for the data that crosses the
//! reward/state engine boundary. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for the mobile web client.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string wrappers for all entity identifiers
//! - [`enums`] -- Tag classification, mystery outcomes and ledger entry kinds
//! - [`structs`] -- Users, venues, lore, slot and scan results, ledger entries

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{LedgerEntryKind, MysteryOutcome, TagType};
pub use ids::{LoreId, SymbolId, TagId, UserId, VenueId};
pub use structs::{
    DiscoverableUser, LedgerEntry, LoreEntry, NewLoreEntry, ScanResponse, SlotResult, SlotSymbol,
    User, Venue,
};

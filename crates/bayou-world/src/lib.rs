//! Static content tables for Cyber Bayou.
//!
//! This crate holds the read-only configuration every player session shares:
//! venues with their NFC tags, the seed lore journal, the weighted slot
//! reel, the discover directory, and the lore unlock triggers.
//!
//! # Modules
//!
//! - [`content`] -- [`ContentTables`] and [`LoreTriggers`], validated once
//!   at construction.
//! - [`error`] -- Error types for content validation.
//! - [`symbols`] -- [`SymbolTable`], the weighted reel distribution.
//! - [`starting_content`] -- The New Orleans launch content.

pub mod content;
pub mod error;
pub mod starting_content;
pub mod symbols;

// Re-export primary types at crate root.
pub use content::{ContentTables, LoreTriggers};
pub use error::WorldError;
pub use starting_content::{create_starting_content, demo_player};
pub use symbols::{SymbolTable, default_symbols};

//! Type-safe identifier wrappers around [`String`].
//!
//! Every entity in Cyber Bayou has a strongly-typed ID to prevent accidental
//! mixing of identifiers at compile time. IDs are plain strings on the wire
//! (`"user_001"`, `"v1"`, `"lore_3"`, `"tag_v2"`) because the seed content and
//! the NFC hardware both hand us human-readable tokens.
//!
//! Only [`LoreId`] is ever minted by the engine (curated journal entries);
//! it uses a UUID v7 suffix so fresh entries are unique and time-ordered.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Wrap an existing identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner [`String`] value.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a player or a discoverable user.
    UserId
}

define_id! {
    /// Unique identifier for a check-in venue.
    VenueId
}

define_id! {
    /// Unique identifier for a lore journal entry.
    LoreId
}

define_id! {
    /// Raw identifier read off an NFC tag (venue tags, patches, stray tags).
    TagId
}

define_id! {
    /// Identifier of a slot symbol (the glyph shown on the reel).
    SymbolId
}

impl LoreId {
    /// Mint a fresh, unique lore identifier (`lore_<uuid-v7>`).
    pub fn generate() -> Self {
        Self(format!("lore_{}", Uuid::now_v7().simple()))
    }
}

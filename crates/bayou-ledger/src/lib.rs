//! FuX wallet bookkeeping for Cyber Bayou.
//!
//! Every FuX movement on a player's wallet goes through this crate. The
//! [`Ledger`] mutates the [`User`] balance fields and appends a
//! [`LedgerEntry`] for each movement, so the balance can always be
//! reconciled against its history.
//!
//! # Modules
//!
//! - [`ledger`] -- The [`Ledger`] struct: credits, debits, floored drains.
//! - [`conservation`] -- Reconciliation of the live balance against history.
//!
//! # Conservation Law
//!
//! For every player:
//!
//! ```text
//! opening_balance + sum(credits) - sum(debits) == fux_balance
//! ```
//!
//! A violation produces a [`LedgerAnomaly`]. The ledger never panics; it
//! returns errors.
//!
//! # Usage
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use bayou_ledger::{ConservationResult, Ledger};
//! use bayou_types::{LedgerEntryKind, TagId, User, UserId};
//!
//! let mut user = User {
//!     id: UserId::from("user_001"),
//!     display_name: "Cypher_Mardi".to_owned(),
//!     avatar_url: String::new(),
//!     fux_balance: 30,
//!     total_fux_earned: 30,
//!     total_venues_visited: 0,
//!     trust_score: 85,
//!     location_sharing: true,
//!     own_patch_id: TagId::from("patch_404"),
//!     friends: BTreeSet::new(),
//!     pending_requests: BTreeSet::new(),
//! };
//! let mut ledger = Ledger::new(user.fux_balance);
//!
//! // A curse of 50 only drains what is there.
//! let drained = ledger.drain(&mut user, LedgerEntryKind::Curse, 50).ok();
//! assert_eq!(drained, Some(30));
//! assert_eq!(user.fux_balance, 0);
//! assert_eq!(ledger.verify_conservation(user.fux_balance), ConservationResult::Balanced);
//! ```

pub mod conservation;
pub mod ledger;

// Re-export primary types at crate root.
pub use conservation::ConservationResult;
pub use ledger::Ledger;

use bayou_types::{LedgerEntryKind, User};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when moving FuX.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The debit exceeds the spendable balance.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// FuX requested.
        requested: u64,
        /// FuX available.
        available: u64,
    },

    /// Amounts must be strictly positive.
    #[error("ledger entry amount must be non-zero")]
    ZeroAmount,

    /// The entry kind does not match the direction of the movement.
    #[error("{kind:?} cannot be recorded as a {direction}")]
    WrongDirection {
        /// The offending entry kind.
        kind: LedgerEntryKind,
        /// The attempted direction (`"credit"` or `"debit"`).
        direction: &'static str,
    },

    /// A balance or counter would exceed `u64::MAX`.
    #[error("FuX arithmetic overflow")]
    Overflow,
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A conservation law violation detected during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAnomaly {
    /// Balance the history says the wallet should hold.
    pub expected_balance: u64,
    /// Balance the wallet actually holds.
    pub actual_balance: u64,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for LedgerAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Returns `true` if the user's spendable balance covers `amount`.
pub const fn can_afford(user: &User, amount: u64) -> bool {
    amount <= user.fux_balance
}

//! Error types for the `bayou-core` crate.

use bayou_ledger::LedgerError;
use bayou_types::UserId;

use crate::store::StoreError;

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The bet exceeds the player's balance. Nothing was changed.
    #[error("insufficient FuX: bet {bet}, balance {balance}")]
    InsufficientFunds {
        /// The requested bet.
        bet: u64,
        /// The balance at the time of the request.
        balance: u64,
    },

    /// No player is registered under this id.
    #[error("unknown user {0}")]
    UnknownUser(UserId),

    /// A player is already registered under this id.
    #[error("user {0} is already registered")]
    AlreadyRegistered(UserId),

    /// A registration carried a profile that breaks the user invariants.
    #[error("invalid user {user}: {reason}")]
    InvalidUser {
        /// The rejected id.
        user: UserId,
        /// Which invariant was broken.
        reason: String,
    },

    /// The randomness source picked a reel position outside the table.
    #[error("reel position {index} is outside the {len}-symbol table")]
    SymbolOutOfRange {
        /// The position that was drawn.
        index: usize,
        /// The table size.
        len: usize,
    },

    /// A ledger operation failed.
    #[error("ledger error: {0}")]
    Ledger(LedgerError),

    /// The session store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<LedgerError> for EngineError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds {
                requested,
                available,
            } => Self::InsufficientFunds {
                bet: requested,
                balance: available,
            },
            other => Self::Ledger(other),
        }
    }
}

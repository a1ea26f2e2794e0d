//! The per-player ledger: an append-only log of FuX movements.
//!
//! # Design
//!
//! - **Append-only**: entries are never modified. [`Ledger::compact`]
//!   folds the oldest entries into the opening balance so a long-lived
//!   wallet keeps a bounded history that still reconciles.
//! - **Checked**: every balance change uses checked arithmetic; an overflow
//!   leaves the wallet untouched.
//! - **Earned total**: credits raise both the balance and the lifetime
//!   earned total; debits touch the balance alone.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use bayou_types::{LedgerEntry, LedgerEntryKind, User};

use crate::LedgerError;
use crate::conservation::{ConservationResult, verify_conservation};

/// A player's FuX ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Balance the wallet held before the first retained entry.
    opening_balance: u64,
    /// Entries folded into `opening_balance` by compaction.
    #[serde(default)]
    compacted: u64,
    /// Retained entries, in insertion order.
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Open a new ledger for a wallet currently holding `opening_balance`.
    pub const fn new(opening_balance: u64) -> Self {
        Self {
            opening_balance,
            compacted: 0,
            entries: Vec::new(),
        }
    }

    /// Return the balance before the first retained entry.
    pub const fn opening_balance(&self) -> u64 {
        self.opening_balance
    }

    /// Return the number of entries folded away by [`Ledger::compact`].
    pub const fn compacted(&self) -> u64 {
        self.compacted
    }

    /// Return the number of retained entries.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether the ledger has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the retained entries, in insertion order.
    pub fn all_entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Credit `amount` FuX to the user's balance and lifetime earnings.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ZeroAmount`] for a zero amount,
    /// [`LedgerError::WrongDirection`] if `kind` is a debit kind, and
    /// [`LedgerError::Overflow`] if either counter would overflow.
    pub fn credit(
        &mut self,
        user: &mut User,
        kind: LedgerEntryKind,
        amount: u64,
    ) -> Result<&LedgerEntry, LedgerError> {
        if !kind.is_credit() {
            return Err(LedgerError::WrongDirection {
                kind,
                direction: "credit",
            });
        }
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let balance = user
            .fux_balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let earned = user
            .total_fux_earned
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        user.fux_balance = balance;
        user.total_fux_earned = earned;
        self.push(kind, amount, balance)
    }

    /// Debit exactly `amount` FuX from the user's balance.
    ///
    /// The affordability check happens before any mutation.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] if the balance is too low,
    /// [`LedgerError::ZeroAmount`] for a zero amount, and
    /// [`LedgerError::WrongDirection`] if `kind` is a credit kind.
    pub fn debit(
        &mut self,
        user: &mut User,
        kind: LedgerEntryKind,
        amount: u64,
    ) -> Result<&LedgerEntry, LedgerError> {
        if kind.is_credit() {
            return Err(LedgerError::WrongDirection {
                kind,
                direction: "debit",
            });
        }
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let balance = user
            .fux_balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds {
                requested: amount,
                available: user.fux_balance,
            })?;

        user.fux_balance = balance;
        self.push(kind, amount, balance)
    }

    /// Drain up to `amount` FuX, flooring the balance at zero.
    ///
    /// Returns the FuX actually removed. Draining an empty wallet records
    /// nothing and returns zero.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::WrongDirection`] if `kind` is a credit kind.
    pub fn drain(
        &mut self,
        user: &mut User,
        kind: LedgerEntryKind,
        amount: u64,
    ) -> Result<u64, LedgerError> {
        let taken = amount.min(user.fux_balance);
        if taken == 0 {
            if kind.is_credit() {
                return Err(LedgerError::WrongDirection {
                    kind,
                    direction: "debit",
                });
            }
            return Ok(0);
        }
        self.debit(user, kind, taken)?;
        Ok(taken)
    }

    /// Verify the live balance against the ledger history.
    pub fn verify_conservation(&self, balance: u64) -> ConservationResult {
        verify_conservation(self.opening_balance, &self.entries, balance)
    }

    /// Keep at most `max_entries` of the newest entries.
    ///
    /// Dropped entries are folded into the opening balance; sequence
    /// numbers keep counting from where they were. Returns how many
    /// entries were dropped.
    pub fn compact(&mut self, max_entries: usize) -> usize {
        let excess = self.entries.len().saturating_sub(max_entries);
        if excess == 0 {
            return 0;
        }

        let dropped: Vec<LedgerEntry> = self.entries.drain(..excess).collect();
        if let Some(last) = dropped.last() {
            self.opening_balance = last.balance_after;
        }
        let folded = u64::try_from(dropped.len()).unwrap_or(u64::MAX);
        self.compacted = self.compacted.saturating_add(folded);

        debug!(
            dropped = dropped.len(),
            opening_balance = self.opening_balance,
            "ledger compacted"
        );
        dropped.len()
    }

    fn push(
        &mut self,
        kind: LedgerEntryKind,
        amount: u64,
        balance_after: u64,
    ) -> Result<&LedgerEntry, LedgerError> {
        let sequence = u64::try_from(self.entries.len())
            .ok()
            .and_then(|n| n.checked_add(self.compacted))
            .and_then(|n| n.checked_add(1))
            .ok_or(LedgerError::Overflow)?;

        debug!(sequence, ?kind, amount, balance_after, "FuX moved");

        self.entries.push(LedgerEntry {
            sequence,
            kind,
            amount,
            balance_after,
            recorded_at: Utc::now(),
        });

        self.entries.last().ok_or(LedgerError::Overflow)
    }
}

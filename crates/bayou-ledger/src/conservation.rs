//! Conservation law verification for a player's ledger.
//!
//! FuX enters a wallet only through credits (venue check-ins, hidden
//! caches, slot wins) and leaves only through debits (slot bets, curses).
//! Replaying the history from the opening balance must land exactly on the
//! live balance:
//!
//! ```text
//! opening_balance + sum(credits) - sum(debits) == fux_balance
//! ```
//!
//! Each entry also records `balance_after`; the replay checks every step,
//! so a corrupted entry is pinpointed by its sequence number.

use bayou_types::LedgerEntry;

use crate::LedgerAnomaly;

/// The result of a conservation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConservationResult {
    /// The live balance matches the replayed history.
    Balanced,
    /// The history and the live balance disagree.
    Anomaly(LedgerAnomaly),
}

/// Replay `entries` from `opening_balance` and compare with `balance`.
pub fn verify_conservation(
    opening_balance: u64,
    entries: &[LedgerEntry],
    balance: u64,
) -> ConservationResult {
    let mut running = opening_balance;

    for entry in entries {
        let next = if entry.kind.is_credit() {
            running.checked_add(entry.amount)
        } else {
            running.checked_sub(entry.amount)
        };

        let Some(next) = next else {
            return anomaly(
                running,
                balance,
                format!(
                    "entry #{} ({:?}) of {} FuX does not fit a balance of {running}",
                    entry.sequence, entry.kind, entry.amount
                ),
            );
        };

        if next != entry.balance_after {
            return anomaly(
                next,
                entry.balance_after,
                format!(
                    "entry #{} ({:?}) recorded balance {} but replay gives {next}",
                    entry.sequence, entry.kind, entry.balance_after
                ),
            );
        }

        running = next;
    }

    if running == balance {
        ConservationResult::Balanced
    } else {
        anomaly(
            running,
            balance,
            format!("wallet holds {balance} FuX but ledger history gives {running}"),
        )
    }
}

fn anomaly(expected: u64, actual: u64, message: String) -> ConservationResult {
    ConservationResult::Anomaly(LedgerAnomaly {
        expected_balance: expected,
        actual_balance: actual,
        message,
    })
}

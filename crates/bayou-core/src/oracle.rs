//! Flavor-text oracle for slot spins.
//!
//! After every spin the engine asks a [`FlavorOracle`] for one short line
//! of cyberpunk prose describing the result. The oracle is purely
//! decorative: a spin's economic outcome is settled before the oracle is
//! asked, and [`generate_flavor`] never fails. Errors, timeouts and blank
//! replies all degrade to the configured fallback line.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bayou_types::SymbolId;
use tracing::warn;

use crate::config::OracleConfig;

/// Errors an oracle backend can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// The backend is not reachable or not configured.
    #[error("flavor oracle unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with something unusable.
    #[error("flavor oracle returned a malformed reply: {0}")]
    Malformed(String),
}

/// A source of flavor text.
pub trait FlavorOracle: Send + Sync {
    /// Produce one line of flavor text for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] if no text could be produced.
    fn flavor_text(&self, prompt: &str) -> impl Future<Output = Result<String, OracleError>> + Send;
}

/// Build the prompt for a finished spin.
pub fn flavor_prompt(grid: &[Vec<SymbolId>], win_amount: u64) -> String {
    let rows = grid
        .iter()
        .map(|row| {
            row.iter()
                .map(SymbolId::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" | ");
    format!(
        "The player spun the Mardi Gras slots and got [{rows}] winning {win_amount} FuX. \
         Give a one-sentence mysterious cyberpunk New Orleans style reaction or lore snippet."
    )
}

/// Ask `oracle` for flavor text, bounded by the configured timeout.
///
/// Always returns a line: the oracle's trimmed reply, or
/// [`OracleConfig::fallback_message`] on error, timeout, or blank reply.
pub async fn generate_flavor<O: FlavorOracle>(
    oracle: &O,
    prompt: &str,
    config: &OracleConfig,
) -> String {
    let deadline = Duration::from_millis(config.timeout_ms);
    match tokio::time::timeout(deadline, oracle.flavor_text(prompt)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_owned(),
        Ok(Ok(_)) => {
            warn!("flavor oracle returned blank text, using fallback");
            config.fallback_message.clone()
        }
        Ok(Err(e)) => {
            warn!(error = %e, "flavor oracle failed, using fallback");
            config.fallback_message.clone()
        }
        Err(_) => {
            warn!(timeout_ms = config.timeout_ms, "flavor oracle timed out, using fallback");
            config.fallback_message.clone()
        }
    }
}

/// Offline oracle that cycles through a fixed set of lines.
#[derive(Debug, Default)]
pub struct CannedOracle {
    lines: Vec<String>,
    next: AtomicUsize,
}

impl CannedOracle {
    /// An oracle that cycles through `lines` in order.
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            next: AtomicUsize::new(0),
        }
    }

    /// The launch set of bayou one-liners.
    pub fn bayou() -> Self {
        Self::new([
            "The Serpent stirs beneath Canal Street; the grid hums your name.",
            "Neon beads rain from a parade no one remembers starting.",
            "A jester's ghost flickers in the streetlights and winks.",
            "The bayou keeps every coin it swallows. Some nights it gives one back.",
            "Static crawls across the masks; somewhere a brass band misses a beat.",
        ])
    }
}

impl FlavorOracle for CannedOracle {
    async fn flavor_text(&self, _prompt: &str) -> Result<String, OracleError> {
        if self.lines.is_empty() {
            return Err(OracleError::Unavailable("no canned lines".to_owned()));
        }
        let turn = self.next.fetch_add(1, Ordering::Relaxed);
        turn.checked_rem(self.lines.len())
            .and_then(|idx| self.lines.get(idx))
            .cloned()
            .ok_or_else(|| OracleError::Malformed("canned line out of range".to_owned()))
    }
}

/// Oracle that is never available. Every spin gets the fallback line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentOracle;

impl FlavorOracle for SilentOracle {
    async fn flavor_text(&self, _prompt: &str) -> Result<String, OracleError> {
        Err(OracleError::Unavailable("oracle disabled".to_owned()))
    }
}

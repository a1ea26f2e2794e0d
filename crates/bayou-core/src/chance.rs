//! Randomness seam for mystery tags and slot reels.
//!
//! Every random draw the engine makes goes through the [`Chance`] trait so
//! sessions can run on real entropy in production, on a seeded generator
//! for reproducible runs, or on a fixed script in tests.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use bayou_types::MysteryOutcome;
use bayou_world::SymbolTable;

/// A source of random outcomes for one player session.
pub trait Chance: Send {
    /// Pick the outcome of an unknown tag.
    fn mystery_outcome(&mut self) -> MysteryOutcome;

    /// Pick a table position for one reel cell.
    fn symbol_index(&mut self, symbols: &SymbolTable) -> usize;
}

/// [`Chance`] backed by a `rand` generator.
///
/// Mystery outcomes are uniform over the three kinds; reel cells follow
/// the symbol weights.
#[derive(Debug, Clone)]
pub struct RngChance<R> {
    rng: R,
}

impl<R: Rng> RngChance<R> {
    /// Wrap a generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngChance<StdRng> {
    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng + Send> Chance for RngChance<R> {
    fn mystery_outcome(&mut self) -> MysteryOutcome {
        MysteryOutcome::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(MysteryOutcome::Blessing)
    }

    fn symbol_index(&mut self, symbols: &SymbolTable) -> usize {
        symbols.sample_index(&mut self.rng)
    }
}

/// [`Chance`] that replays fixed outcomes.
///
/// When a script runs out, mystery tags resolve to
/// [`MysteryOutcome::Blessing`] and reel cells to position 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChance {
    mysteries: VecDeque<MysteryOutcome>,
    cells: VecDeque<usize>,
}

impl ScriptedChance {
    /// An empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue mystery outcomes.
    #[must_use]
    pub fn with_mysteries(mut self, outcomes: impl IntoIterator<Item = MysteryOutcome>) -> Self {
        self.mysteries.extend(outcomes);
        self
    }

    /// Queue reel cells, row by row.
    #[must_use]
    pub fn with_cells(mut self, cells: impl IntoIterator<Item = usize>) -> Self {
        self.cells.extend(cells);
        self
    }
}

impl Chance for ScriptedChance {
    fn mystery_outcome(&mut self) -> MysteryOutcome {
        self.mysteries
            .pop_front()
            .unwrap_or(MysteryOutcome::Blessing)
    }

    fn symbol_index(&mut self, _symbols: &SymbolTable) -> usize {
        self.cells.pop_front().unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use bayou_world::default_symbols;

    use super::*;

    #[test]
    fn rng_mysteries_cover_all_outcomes() {
        let mut chance = RngChance::seeded(9);
        let seen: BTreeSet<_> = (0..300).map(|_| chance.mystery_outcome()).collect();
        assert_eq!(seen, BTreeSet::from(MysteryOutcome::ALL));
    }

    #[test]
    fn seeded_chance_is_reproducible() {
        let symbols = SymbolTable::new(default_symbols()).unwrap();
        let mut a = RngChance::seeded(1234);
        let mut b = RngChance::seeded(1234);
        let draws_a: Vec<_> = (0..50).map(|_| a.symbol_index(&symbols)).collect();
        let draws_b: Vec<_> = (0..50).map(|_| b.symbol_index(&symbols)).collect();
        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().all(|&i| i < symbols.len()));
    }

    #[test]
    fn script_replays_then_falls_back() {
        let symbols = SymbolTable::new(default_symbols()).unwrap();
        let mut chance = ScriptedChance::new()
            .with_mysteries([MysteryOutcome::Curse, MysteryOutcome::Reward])
            .with_cells([3, 5]);

        assert_eq!(chance.mystery_outcome(), MysteryOutcome::Curse);
        assert_eq!(chance.mystery_outcome(), MysteryOutcome::Reward);
        assert_eq!(chance.mystery_outcome(), MysteryOutcome::Blessing);

        assert_eq!(chance.symbol_index(&symbols), 3);
        assert_eq!(chance.symbol_index(&symbols), 5);
        assert_eq!(chance.symbol_index(&symbols), 0);
    }
}

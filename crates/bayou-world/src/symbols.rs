//! The weighted slot symbol table.
//!
//! Each reel cell is drawn independently with probability proportional to
//! its symbol's weight. The distribution is built once when the table is
//! constructed; drawing is O(log n).

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use bayou_types::{SlotSymbol, SymbolId};

use crate::error::WorldError;

/// Read-only table of reel symbols with a prebuilt weighted distribution.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<SlotSymbol>,
    distribution: WeightedIndex<u32>,
}

impl SymbolTable {
    /// Build a table from symbols with strictly positive weights.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptySymbolTable`] for an empty list and
    /// [`WorldError::InvalidSymbolWeights`] if any weight is zero.
    pub fn new(symbols: Vec<SlotSymbol>) -> Result<Self, WorldError> {
        if symbols.is_empty() {
            return Err(WorldError::EmptySymbolTable);
        }
        if let Some(zero) = symbols.iter().find(|s| s.weight == 0) {
            return Err(WorldError::InvalidSymbolWeights(format!(
                "symbol {} ({}) has weight 0",
                zero.id, zero.name
            )));
        }

        let distribution = WeightedIndex::new(symbols.iter().map(|s| s.weight))
            .map_err(|e| WorldError::InvalidSymbolWeights(e.to_string()))?;

        Ok(Self {
            symbols,
            distribution,
        })
    }

    /// All symbols, in table order.
    pub fn symbols(&self) -> &[SlotSymbol] {
        &self.symbols
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Look up a symbol by table position.
    pub fn get(&self, index: usize) -> Option<&SlotSymbol> {
        self.symbols.get(index)
    }

    /// Draw a table position, weighted by symbol weight.
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.distribution.sample(rng)
    }
}

/// Helper to build a [`SlotSymbol`].
fn symbol(glyph: &str, name: &str, weight: u32) -> SlotSymbol {
    SlotSymbol {
        id: SymbolId::from(glyph),
        name: name.to_owned(),
        weight,
    }
}

/// The default Mardi Gras reel: common masks down to the rare inferno.
pub fn default_symbols() -> Vec<SlotSymbol> {
    vec![
        symbol("🎭", "Mask", 10),
        symbol("⚜️", "Fleur", 8),
        symbol("💀", "Skull", 6),
        symbol("🐍", "Serpent", 5),
        symbol("💎", "Gem", 3),
        symbol("🌀", "Void", 2),
        symbol("🔥", "Inferno", 1),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn default_table_builds() {
        let table = SymbolTable::new(default_symbols()).unwrap();
        assert_eq!(table.len(), 7);
        assert!(!table.is_empty());
        assert_eq!(table.get(3).unwrap().name, "Serpent");
        assert!(table.get(7).is_none());
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(
            SymbolTable::new(Vec::new()).err(),
            Some(WorldError::EmptySymbolTable)
        );
    }

    #[test]
    fn zero_weight_is_rejected() {
        let result = SymbolTable::new(vec![symbol("🎭", "Mask", 0)]);
        assert!(matches!(result, Err(WorldError::InvalidSymbolWeights(_))));
    }

    #[test]
    fn sampling_stays_in_bounds() {
        let table = SymbolTable::new(default_symbols()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let idx = table.sample_index(&mut rng);
            assert!(table.get(idx).is_some());
        }
    }

    #[test]
    fn heavy_symbols_dominate() {
        let table =
            SymbolTable::new(vec![symbol("🎭", "Mask", 99), symbol("🔥", "Inferno", 1)]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let masks = (0..2_000)
            .filter(|_| table.sample_index(&mut rng) == 0)
            .count();
        assert!(masks > 1_800, "masks drawn: {masks}");
    }
}

use alloc::vec::Vec;

use super::*;

/// Emits every pair id twice in ascending blocks, then applies an unbiased
/// Fisher-Yates shuffle. Output is fully determined by the seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShuffledDeckGenerator {
    seed: u64,
}

impl ShuffledDeckGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for ShuffledDeckGenerator {
    fn generate(self, config: GameConfig) -> Result<Deck> {
        use rand::prelude::*;

        let total = usize::from(config.total_cards());
        let pair_count = usize::from(config.pair_count());

        let mut ids: Vec<CardId> = Vec::with_capacity(total);
        for id in 0..pair_count {
            ids.push(id as CardId);
            ids.push(id as CardId);
        }
        if ids.len() < total {
            // odd total: one extra id that can never be completed
            ids.push(pair_count as CardId);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in 0..total {
            let j = rng.random_range(i..total);
            ids.swap(i, j);
        }

        Deck::from_ids(config.rows, config.columns, ids)
    }
}

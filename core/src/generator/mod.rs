use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, config: GameConfig) -> Result<Deck>;
}

/// Fixed id sequence, used to rebuild a board from a save record and to
/// script exact layouts in tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresetDeckGenerator {
    ids: Vec<CardId>,
}

impl PresetDeckGenerator {
    pub fn new(ids: Vec<CardId>) -> Self {
        Self { ids }
    }
}

impl DeckGenerator for PresetDeckGenerator {
    fn generate(self, config: GameConfig) -> Result<Deck> {
        Deck::from_ids(config.rows, config.columns, self.ids)
    }
}

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use generator::*;
pub use save::*;
pub use store::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod events;
mod generator;
mod save;
mod store;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub columns: Coord,
    /// Delay before a mismatched pair flips back, in milliseconds.
    pub mismatch_delay_ms: u32,
    pub match_score_value: Score,
}

impl GameConfig {
    pub const DEFAULT_MISMATCH_DELAY_MS: u32 = 600;
    pub const DEFAULT_MATCH_SCORE_VALUE: Score = 10;

    pub const fn new_unchecked(
        rows: Coord,
        columns: Coord,
        mismatch_delay_ms: u32,
        match_score_value: Score,
    ) -> Self {
        Self {
            rows,
            columns,
            mismatch_delay_ms,
            match_score_value,
        }
    }

    /// Rejects degenerate configurations instead of clamping them; a UI may
    /// clamp its own inputs before getting here.
    pub fn new(
        rows: Coord,
        columns: Coord,
        mismatch_delay_ms: u32,
        match_score_value: Score,
    ) -> Result<Self> {
        if rows < 1 || columns < 1 || mismatch_delay_ms == 0 {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self::new_unchecked(
            rows,
            columns,
            mismatch_delay_ms,
            match_score_value,
        ))
    }

    pub const fn total_cards(&self) -> CardCount {
        mult(self.rows, self.columns)
    }

    pub const fn pair_count(&self) -> CardCount {
        self.total_cards() / 2
    }

    /// An odd total leaves exactly one unmatchable filler card on the board.
    pub const fn has_filler(&self) -> bool {
        self.total_cards() % 2 == 1
    }

    pub const fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms as u64)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(
            2,
            2,
            Self::DEFAULT_MISMATCH_DELAY_MS,
            Self::DEFAULT_MATCH_SCORE_VALUE,
        )
    }
}

/// Ordered card ids for one board, as produced by a [`DeckGenerator`] or
/// rebuilt from a save record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    rows: Coord,
    columns: Coord,
    ids: Vec<CardId>,
}

impl Deck {
    pub fn from_ids(rows: Coord, columns: Coord, ids: Vec<CardId>) -> Result<Self> {
        if rows < 1 || columns < 1 {
            return Err(GameError::InvalidConfig);
        }
        if ids.len() != usize::from(mult(rows, columns)) {
            return Err(GameError::DeckSizeMismatch);
        }
        Ok(Self { rows, columns, ids })
    }

    pub fn rows(&self) -> Coord {
        self.rows
    }

    pub fn columns(&self) -> Coord {
        self.columns
    }

    pub fn total_cards(&self) -> CardCount {
        mult(self.rows, self.columns)
    }

    pub fn ids(&self) -> &[CardId] {
        &self.ids
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    /// The reveal was a valid no-op (finished game, matched, face-up, or
    /// locked card).
    Ignored,
    /// First card of a pair is now face up, waiting for the second.
    Waiting,
    Matched,
    /// The pair mismatched; schedule the task after the configured delay.
    Mismatched(FlipBackTask),
    /// The pair matched and completed the board.
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            Ignored => false,
            Waiting => true,
            Matched => true,
            Mismatched(_) => true,
            Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipBackOutcome {
    /// The task belonged to a superseded board, nothing changed.
    NoChange,
    FlippedBack,
}

impl FlipBackOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::FlippedBack => true,
        }
    }
}

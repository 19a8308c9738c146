use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Flat snapshot of an in-progress session. Only pairing ids and matched
/// flags are persisted per card; face-up and locked state is transient and
/// restores face-down (matched cards always render face up).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub rows: Coord,
    pub columns: Coord,
    pub score: Score,
    pub card_ids: Vec<CardId>,
    pub matched_flags: Vec<bool>,
}

impl SaveRecord {
    /// A record is accepted only when its declared shape and both arrays
    /// agree; anything else is treated as corrupt, never partially applied.
    pub fn validate(&self) -> Result<()> {
        if self.rows < 1 || self.columns < 1 {
            return Err(GameError::CorruptSave);
        }
        let total = usize::from(mult(self.rows, self.columns));
        if self.card_ids.len() != total || self.matched_flags.len() != total {
            return Err(GameError::CorruptSave);
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| {
            log::warn!("Failed to encode save record: {err}");
            GameError::CorruptSave
        })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let record: Self = serde_json::from_str(raw).map_err(|err| {
            log::warn!("Rejected save record: {err}");
            GameError::CorruptSave
        })?;
        record.validate()?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn record() -> SaveRecord {
        SaveRecord {
            rows: 2,
            columns: 2,
            score: 10,
            card_ids: vec![1, 0, 0, 1],
            matched_flags: vec![false, true, true, false],
        }
    }

    #[test]
    fn json_round_trip_preserves_fields() {
        let original = record();
        let restored = SaveRecord::from_json(&original.to_json().unwrap()).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn mismatched_array_lengths_are_corrupt() {
        let mut bad = record();
        bad.matched_flags.pop();
        assert_eq!(bad.validate(), Err(GameError::CorruptSave));
    }

    #[test]
    fn declared_shape_must_cover_the_arrays() {
        let mut bad = record();
        bad.rows = 3;
        assert_eq!(bad.validate(), Err(GameError::CorruptSave));

        bad = record();
        bad.columns = 0;
        assert_eq!(bad.validate(), Err(GameError::CorruptSave));
    }

    #[test]
    fn garbage_json_is_corrupt() {
        assert_eq!(SaveRecord::from_json("{not json"), Err(GameError::CorruptSave));
        assert_eq!(SaveRecord::from_json("{}"), Err(GameError::CorruptSave));
    }
}

use serde::{Deserialize, Serialize};

use crate::CardId;

/// Per-card state owned by the match engine. The presentation layer only
/// ever sees shared references to these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    face_up: bool,
    matched: bool,
    locked: bool,
}

impl Card {
    pub(crate) const fn hidden(id: CardId) -> Self {
        Self {
            id,
            face_up: false,
            matched: false,
            locked: false,
        }
    }

    /// A card rebuilt from a save record: matched cards come back face up,
    /// everything else face down.
    pub(crate) const fn restored(id: CardId, matched: bool) -> Self {
        Self {
            id,
            face_up: matched,
            matched,
            locked: false,
        }
    }

    pub const fn id(self) -> CardId {
        self.id
    }

    pub const fn is_face_up(self) -> bool {
        self.face_up
    }

    pub const fn is_matched(self) -> bool {
        self.matched
    }

    pub const fn is_locked(self) -> bool {
        self.locked
    }

    pub const fn is_hidden(self) -> bool {
        !self.face_up && !self.matched && !self.locked
    }

    pub(crate) fn flip_up(&mut self) {
        self.face_up = true;
    }

    pub(crate) fn flip_down(&mut self) {
        self.face_up = false;
    }

    // the only path that sets `matched`, so `matched` always implies `face_up`
    pub(crate) fn set_matched(&mut self) {
        self.matched = true;
        self.face_up = true;
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    pub(crate) fn unlock(&mut self) {
        self.locked = false;
    }
}

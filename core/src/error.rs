use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration")]
    InvalidConfig,
    #[error("Card index out of range")]
    IndexOutOfRange,
    #[error("Deck does not cover the board")]
    DeckSizeMismatch,
    #[error("Save record is corrupt or inconsistent")]
    CorruptSave,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Single board axis used for row and column counts.
pub type Coord = u8;

/// Count type used for total-card arithmetic.
pub type CardCount = u16;

/// Position of a card on the board, stable for the session.
pub type CardIndex = u16;

/// Pairing key shared by the two cards of a pair.
pub type CardId = u16;

/// Accumulated player score.
pub type Score = u32;

pub const fn mult(a: Coord, b: Coord) -> CardCount {
    let a = a as CardCount;
    let b = b as CardCount;
    a.saturating_mul(b)
}

use crate::{cube::Move, notation::format_moves};

/// Scrambles are between these many moves long, inclusive.
pub const SCRAMBLE_LENGTH: std::ops::RangeInclusive<usize> = 23..=30;

/// A random move sequence in which no two consecutive moves turn the same
/// face.
#[must_use]
pub fn random_moves(rng: &mut fastrand::Rng) -> Vec<Move> {
    let length = rng.usize(SCRAMBLE_LENGTH);
    let mut moves: Vec<Move> = Vec::with_capacity(length);
    while moves.len() < length {
        let move_ = Move::ALL[rng.usize(..Move::ALL.len())];
        if moves.last().is_some_and(|last| last.face() == move_.face()) {
            continue;
        }
        moves.push(move_);
    }
    moves
}

/// [`random_moves`] rendered as scramble text.
#[must_use]
pub fn random_scramble(rng: &mut fastrand::Rng) -> String {
    format_moves(&random_moves(rng))
}

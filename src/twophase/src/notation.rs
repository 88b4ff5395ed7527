//! Text <-> move conversion in standard face-turn notation.
//!
//! A scramble is a sequence of face letters (`U L F R B D`), each optionally
//! followed by `2` for a half turn or `'` for a counter-clockwise quarter turn.
//! Whitespace is ignored entirely, so `R U R' U'` and `RUR'U'` are the same
//! scramble.

use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use thiserror::Error;

use crate::cube::{CubeState, Face, Move};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid scramble")]
pub struct ParseScrambleError {
    token: String,
    offset: usize,
}

impl ParseScrambleError {
    /// The text that could not be read as a move.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Character offset of the token in the scramble with whitespace removed.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Parse a scramble into its moves.
///
/// # Errors
///
/// Any character that is not a face letter, or a modifier that does not follow
/// one, makes the whole scramble invalid.
pub fn parse_moves(scramble: &str) -> Result<Vec<Move>, ParseScrambleError> {
    let mut chars = scramble
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .peekable();
    let mut moves = vec![];

    while let Some((offset, letter)) = chars.next() {
        let Some(face) = Face::from_letter(letter) else {
            debug!("Unrecognized move {letter:?} at offset {offset}");
            return Err(ParseScrambleError {
                token: letter.to_string(),
                offset,
            });
        };
        let quarter_turns = match chars.next_if(|&(_, c)| c == '2' || c == '\'') {
            Some((_, '2')) => 2,
            Some(_) => 3,
            None => 1,
        };
        // `quarter_turns` is always in 1..=3
        if let Some(move_) = Move::new(face, quarter_turns) {
            moves.push(move_);
        }
    }

    Ok(moves)
}

/// Fold a scramble into the cube state it produces from solved.
///
/// # Errors
///
/// See [`parse_moves`].
pub fn parse_scramble(scramble: &str) -> Result<CubeState, ParseScrambleError> {
    Ok(CubeState::SOLVED.apply_all(&parse_moves(scramble)?))
}

/// Space separated moves in the notation [`parse_moves`] accepts.
#[must_use]
pub fn format_moves<'a>(moves: impl IntoIterator<Item = &'a Move>) -> String {
    moves.into_iter().map(|move_| move_.name()).join(" ")
}

impl FromStr for Move {
    type Err = ParseScrambleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_moves(s)?.as_slice() {
            &[move_] => Ok(move_),
            _ => Err(ParseScrambleError {
                token: s.to_owned(),
                offset: 0,
            }),
        }
    }
}

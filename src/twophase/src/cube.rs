//! Cubie-level representation of the 3x3 cube and its move algebra.
//!
//! A [`CubeState`] stores, for every edge and corner slot, which piece sits
//! there and how it is twisted. Moves are themselves cube states describing a
//! relative transform of the solved cube, so applying a move and composing
//! two arbitrary states are the same operation.

use std::fmt;

pub const EDGE_COUNT: usize = 12;
pub const CORNER_COUNT: usize = 8;
pub const MOVE_COUNT: usize = 18;

// Edge slots. The last four are the E-slice (middle layer) slots.
pub const UB: u8 = 0;
pub const UR: u8 = 1;
pub const UF: u8 = 2;
pub const UL: u8 = 3;
pub const DF: u8 = 4;
pub const DR: u8 = 5;
pub const DB: u8 = 6;
pub const DL: u8 = 7;
pub const FL: u8 = 8;
pub const FR: u8 = 9;
pub const BR: u8 = 10;
pub const BL: u8 = 11;

// Corner slots
pub const UBL: u8 = 0;
pub const URB: u8 = 1;
pub const UFR: u8 = 2;
pub const ULF: u8 = 3;
pub const DFL: u8 = 4;
pub const DRF: u8 = 5;
pub const DBR: u8 = 6;
pub const DLB: u8 = 7;

/// Number of edges that live in the U and D layers when solved. Edges with an
/// identity at or above this belong to the E-slice.
pub const UD_EDGE_COUNT: usize = FL as usize;

/// Whether the edge with this identity belongs in the E-slice.
#[must_use]
pub const fn is_slice_edge(index: u8) -> bool {
    index >= FL && index <= BL
}

/// The identity of the piece occupying a slot and its orientation (mod 2 for
/// edges, mod 3 for corners).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Piece {
    pub index: u8,
    pub orientation: u8,
}

impl Piece {
    #[must_use]
    pub const fn new(index: u8, orientation: u8) -> Self {
        Piece { index, orientation }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeState {
    pub edges: [Piece; EDGE_COUNT],
    pub corners: [Piece; CORNER_COUNT],
}

impl CubeState {
    pub const SOLVED: Self = {
        let mut edges = [Piece::new(0, 0); EDGE_COUNT];
        let mut corners = [Piece::new(0, 0); CORNER_COUNT];
        let mut i = 0;
        while i < EDGE_COUNT {
            edges[i].index = i as u8;
            i += 1;
        }
        let mut i = 0;
        while i < CORNER_COUNT {
            corners[i].index = i as u8;
            i += 1;
        }
        CubeState { edges, corners }
    };

    /// Apply the relative transform `b` on top of the absolute state `self`.
    ///
    /// Slot `i` of the result receives the piece `self` holds in slot
    /// `b[i].index`, twisted further by `b[i].orientation`. This is not
    /// commutative.
    #[must_use]
    pub const fn compose(&self, b: &CubeState) -> CubeState {
        let mut result = CubeState::SOLVED;
        let mut i = 0;
        while i < EDGE_COUNT {
            let transform = b.edges[i];
            let piece = self.edges[transform.index as usize];
            result.edges[i] = Piece::new(piece.index, (piece.orientation + transform.orientation) % 2);
            i += 1;
        }
        let mut i = 0;
        while i < CORNER_COUNT {
            let transform = b.corners[i];
            let piece = self.corners[transform.index as usize];
            result.corners[i] = Piece::new(piece.index, (piece.orientation + transform.orientation) % 3);
            i += 1;
        }
        result
    }

    #[must_use]
    pub fn apply(&self, move_: Move) -> CubeState {
        self.compose(move_.transform())
    }

    #[must_use]
    pub fn apply_all<'a>(&self, moves: impl IntoIterator<Item = &'a Move>) -> CubeState {
        moves
            .into_iter()
            .fold(*self, |cube, &move_| cube.apply(move_))
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == CubeState::SOLVED
    }

    /// Whether this state is physically reachable: both piece arrays are
    /// permutations, the edge orientation sum is even and the corner
    /// orientation sum is a multiple of three.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        fn is_permutation(pieces: &[Piece]) -> bool {
            let mut seen = 0_u16;
            for piece in pieces {
                if usize::from(piece.index) >= pieces.len() {
                    return false;
                }
                seen |= 1 << piece.index;
            }
            seen.count_ones() as usize == pieces.len()
        }

        let edge_twist: u32 = self.edges.iter().map(|e| u32::from(e.orientation)).sum();
        let corner_twist: u32 = self.corners.iter().map(|c| u32::from(c.orientation)).sum();

        is_permutation(&self.edges)
            && is_permutation(&self.corners)
            && self.edges.iter().all(|e| e.orientation < 2)
            && self.corners.iter().all(|c| c.orientation < 3)
            && edge_twist % 2 == 0
            && corner_twist % 3 == 0
    }
}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::SOLVED
    }
}

impl fmt::Debug for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pieces = |pieces: &[Piece]| {
            pieces
                .iter()
                .map(|p| (p.index, p.orientation))
                .collect::<Vec<_>>()
        };
        f.debug_struct("CubeState")
            .field("edges", &pieces(&self.edges))
            .field("corners", &pieces(&self.corners))
            .finish()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U,
    L,
    F,
    R,
    B,
    D,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, L, F, R, B, D];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::L => 'L',
            Face::F => 'F',
            Face::R => 'R',
            Face::B => 'B',
            Face::D => 'D',
        }
    }

    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(Face::U),
            'L' => Some(Face::L),
            'F' => Some(Face::F),
            'R' => Some(Face::R),
            'B' => Some(Face::B),
            'D' => Some(Face::D),
            _ => None,
        }
    }

    /// Whether this is one of the four faces whose quarter turns break the
    /// phase-1 invariants.
    #[must_use]
    pub const fn is_side(self) -> bool {
        !matches!(self, Face::U | Face::D)
    }
}

/// One of the 18 face turns, numbered in the canonical order
/// `U U2 U' L L2 L' F F2 F' R R2 R' B B2 B' D D2 D'`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u8);

impl Move {
    pub const ALL: [Self; MOVE_COUNT] = {
        let mut all = [Move(0); MOVE_COUNT];
        let mut i = 0;
        while i < MOVE_COUNT {
            all[i] = Move(i as u8);
            i += 1;
        }
        all
    };

    /// The ten moves that preserve every phase-1 invariant, in canonical
    /// order.
    pub const PHASE2: [Self; 10] = {
        let mut moves = [Move(0); 10];
        let mut count = 0;
        let mut i = 0;
        while i < MOVE_COUNT {
            if Move(i as u8).is_phase2() {
                moves[count] = Move(i as u8);
                count += 1;
            }
            i += 1;
        }
        assert!(count == moves.len());
        moves
    };

    #[must_use]
    pub const fn new(face: Face, quarter_turns: u8) -> Option<Self> {
        match quarter_turns {
            1..=3 => Some(Move(face as u8 * 3 + quarter_turns - 1)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn face(self) -> Face {
        Face::ALL[(self.0 / 3) as usize]
    }

    /// Clockwise quarter turns: 1, 2 or 3.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.0 % 3 + 1
    }

    #[must_use]
    pub const fn is_half_turn(self) -> bool {
        self.quarter_turns() == 2
    }

    /// U and D turns of any amount plus half turns of the side faces.
    #[must_use]
    pub const fn is_phase2(self) -> bool {
        !self.face().is_side() || self.is_half_turn()
    }

    #[must_use]
    pub const fn inverse(self) -> Move {
        Move(self.0 / 3 * 3 + (3 - self.quarter_turns()))
    }

    #[must_use]
    pub fn transform(self) -> &'static CubeState {
        &MOVE_TRANSFORMS[self.0 as usize]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        const NAMES: [&str; MOVE_COUNT] = [
            "U", "U2", "U'", "L", "L2", "L'", "F", "F2", "F'", "R", "R2", "R'", "B", "B2", "B'",
            "D", "D2", "D'",
        ];
        NAMES[self.0 as usize]
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const fn quarter_turn(edges: [(u8, u8); EDGE_COUNT], corners: [(u8, u8); CORNER_COUNT]) -> CubeState {
    let mut result = CubeState::SOLVED;
    let mut i = 0;
    while i < EDGE_COUNT {
        result.edges[i] = Piece::new(edges[i].0, edges[i].1);
        i += 1;
    }
    let mut i = 0;
    while i < CORNER_COUNT {
        result.corners[i] = Piece::new(corners[i].0, corners[i].1);
        i += 1;
    }
    result
}

// Clockwise quarter turns, one per face in `Face` order. Each entry names the
// slot the piece comes from. Edges flip under F and B, corners twist under the
// four side faces.
const QUARTER_TURNS: [CubeState; 6] = [
    // U
    quarter_turn(
        [(UL, 0), (UB, 0), (UR, 0), (UF, 0), (DF, 0), (DR, 0), (DB, 0), (DL, 0), (FL, 0), (FR, 0), (BR, 0), (BL, 0)],
        [(ULF, 0), (UBL, 0), (URB, 0), (UFR, 0), (DFL, 0), (DRF, 0), (DBR, 0), (DLB, 0)],
    ),
    // L
    quarter_turn(
        [(UB, 0), (UR, 0), (UF, 0), (BL, 0), (DF, 0), (DR, 0), (DB, 0), (FL, 0), (UL, 0), (FR, 0), (BR, 0), (DL, 0)],
        [(DLB, 2), (URB, 0), (UFR, 0), (UBL, 1), (ULF, 2), (DRF, 0), (DBR, 0), (DFL, 1)],
    ),
    // F
    quarter_turn(
        [(UB, 0), (UR, 0), (FL, 1), (UL, 0), (FR, 1), (DR, 0), (DB, 0), (DL, 0), (DF, 1), (UF, 1), (BR, 0), (BL, 0)],
        [(UBL, 0), (URB, 0), (ULF, 1), (DFL, 2), (DRF, 1), (UFR, 2), (DBR, 0), (DLB, 0)],
    ),
    // R
    quarter_turn(
        [(UB, 0), (FR, 0), (UF, 0), (UL, 0), (DF, 0), (BR, 0), (DB, 0), (DL, 0), (FL, 0), (DR, 0), (UR, 0), (BL, 0)],
        [(UBL, 0), (UFR, 1), (DRF, 2), (ULF, 0), (DFL, 0), (DBR, 1), (URB, 2), (DLB, 0)],
    ),
    // B
    quarter_turn(
        [(BR, 1), (UR, 0), (UF, 0), (UL, 0), (DF, 0), (DR, 0), (BL, 1), (DL, 0), (FL, 0), (FR, 0), (DB, 1), (UB, 1)],
        [(URB, 1), (DBR, 2), (UFR, 0), (ULF, 0), (DFL, 0), (DRF, 0), (DLB, 1), (UBL, 2)],
    ),
    // D
    quarter_turn(
        [(UB, 0), (UR, 0), (UF, 0), (UL, 0), (DL, 0), (DF, 0), (DR, 0), (DB, 0), (FL, 0), (FR, 0), (BR, 0), (BL, 0)],
        [(UBL, 0), (URB, 0), (UFR, 0), (ULF, 0), (DLB, 0), (DFL, 0), (DRF, 0), (DBR, 0)],
    ),
];

static MOVE_TRANSFORMS: [CubeState; MOVE_COUNT] = {
    let mut transforms = [CubeState::SOLVED; MOVE_COUNT];
    let mut face = 0;
    while face < QUARTER_TURNS.len() {
        let quarter = QUARTER_TURNS[face];
        let half = quarter.compose(&quarter);
        transforms[face * 3] = quarter;
        transforms[face * 3 + 1] = half;
        transforms[face * 3 + 2] = half.compose(&quarter);
        face += 1;
    }
    transforms
};

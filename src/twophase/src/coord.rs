//! Projections of a cube state onto small integer coordinates.
//!
//! Each coordinate space has its own lightweight value type holding only the
//! slots it cares about. Decoding a coordinate produces such a value, which is
//! a representative of that coordinate and nothing more: it says nothing about
//! the pieces outside its projection. These values exist to build transition
//! tables, where every coordinate is decoded, moved, and encoded again.

use crate::cube::{CORNER_COUNT, CubeState, EDGE_COUNT, FL, Piece, UD_EDGE_COUNT, is_slice_edge};

const SLICE_EDGE_COUNT: usize = EDGE_COUNT - UD_EDGE_COUNT;

const FACTORIALS: [u32; 13] = {
    let mut arr = [0; 13];
    arr[0] = 1;
    let mut i = 1;
    while i < arr.len() {
        arr[i] = arr[i - 1] * i as u32;
        i += 1;
    }
    arr
};

/// Binomial coefficient `n` choose `k`, zero when `k > n`.
#[must_use]
pub const fn binomial(n: usize, k: usize) -> u32 {
    if k > n {
        return 0;
    }
    let mut result = 1_u32;
    let mut i = 0;
    while i < k {
        // C(n, i) * (n - i) is always divisible by i + 1
        result = result * (n - i) as u32 / (i + 1) as u32;
        i += 1;
    }
    result
}

/// A projection of [`CubeState`] that can be ranked into `0..SIZE`.
pub trait CoordinateSpace: Sized {
    const NAME: &'static str;
    const SIZE: usize;

    /// Keep only the part of `cube` this space looks at.
    fn project(cube: &CubeState) -> Self;

    fn encode(&self) -> u16;

    /// A representative value for `coord`. Only meaningful within this space.
    fn decode(coord: u16) -> Self;

    /// Apply a relative transform, with the same semantics as
    /// [`CubeState::compose`].
    #[must_use]
    fn apply(&self, transform: &CubeState) -> Self;

    fn coordinate(cube: &CubeState) -> u16 {
        Self::project(cube).encode()
    }
}

fn permute<T: Copy, const N: usize>(values: &[T; N], pieces: &[Piece; N]) -> [T; N] {
    pieces.map(|piece| values[usize::from(piece.index)])
}

/// Lehmer code rank of a sequence of distinct values.
fn lehmer_rank(values: &[u8]) -> u16 {
    let n = values.len();
    let rank: u32 = values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let smaller_after = values[i + 1..].iter().filter(|&&v| v < value).count();
            smaller_after as u32 * FACTORIALS[n - i - 1]
        })
        .sum();
    rank as u16
}

/// Inverse of [`lehmer_rank`] over the values `offset..offset + out.len()`.
fn lehmer_unrank(mut rank: u32, offset: u8, out: &mut [u8]) {
    let n = out.len();
    let mut available: Vec<u8> = (0..n as u8).map(|v| v + offset).collect();
    for (i, slot) in out.iter_mut().enumerate() {
        let fact = FACTORIALS[n - i - 1];
        let pos = (rank / fact) as usize;
        rank %= fact;
        *slot = available.remove(pos);
    }
}

/// Edge orientation: eleven binary digits, the twelfth edge's flip follows
/// from the even-parity invariant. 2^11 values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeOrientation([u8; EDGE_COUNT]);

impl CoordinateSpace for EdgeOrientation {
    const NAME: &'static str = "edge orientation";
    const SIZE: usize = 2048;

    fn project(cube: &CubeState) -> Self {
        EdgeOrientation(cube.edges.map(|e| e.orientation))
    }

    fn encode(&self) -> u16 {
        self.0[..EDGE_COUNT - 1]
            .iter()
            .fold(0, |acc, &flip| (acc << 1) | u16::from(flip & 1))
    }

    fn decode(mut coord: u16) -> Self {
        let mut flips = [0; EDGE_COUNT];
        for flip in flips[..EDGE_COUNT - 1].iter_mut().rev() {
            *flip = (coord & 1) as u8;
            coord >>= 1;
        }
        let total: u8 = flips.iter().sum();
        flips[EDGE_COUNT - 1] = total % 2;
        EdgeOrientation(flips)
    }

    fn apply(&self, transform: &CubeState) -> Self {
        let mut flips = permute(&self.0, &transform.edges);
        for (flip, edge) in flips.iter_mut().zip(&transform.edges) {
            *flip = (*flip + edge.orientation) % 2;
        }
        EdgeOrientation(flips)
    }
}

/// Corner orientation: seven base-3 digits, the eighth corner's twist
/// follows from the mod-3 invariant. 3^7 values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerOrientation([u8; CORNER_COUNT]);

impl CoordinateSpace for CornerOrientation {
    const NAME: &'static str = "corner orientation";
    const SIZE: usize = 2187;

    fn project(cube: &CubeState) -> Self {
        CornerOrientation(cube.corners.map(|c| c.orientation))
    }

    fn encode(&self) -> u16 {
        self.0[..CORNER_COUNT - 1]
            .iter()
            .fold(0, |acc, &twist| acc * 3 + u16::from(twist))
    }

    fn decode(mut coord: u16) -> Self {
        let mut twists = [0; CORNER_COUNT];
        for twist in twists[..CORNER_COUNT - 1].iter_mut().rev() {
            *twist = (coord % 3) as u8;
            coord /= 3;
        }
        let total: u8 = twists.iter().sum();
        twists[CORNER_COUNT - 1] = (3 - total % 3) % 3;
        CornerOrientation(twists)
    }

    fn apply(&self, transform: &CubeState) -> Self {
        let mut twists = permute(&self.0, &transform.corners);
        for (twist, corner) in twists.iter_mut().zip(&transform.corners) {
            *twist = (*twist + corner.orientation) % 3;
        }
        CornerOrientation(twists)
    }
}

/// Which four edge slots hold the E-slice edges, ignoring their order. Ranked
/// with the combinatorial number system into 12 choose 4 = 495 values. Zero
/// means all four are somewhere in the slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceOccupancy([bool; EDGE_COUNT]);

impl CoordinateSpace for SliceOccupancy {
    const NAME: &'static str = "E-slice occupancy";
    const SIZE: usize = 495;

    fn project(cube: &CubeState) -> Self {
        SliceOccupancy(cube.edges.map(|e| is_slice_edge(e.index)))
    }

    fn encode(&self) -> u16 {
        let mut result = 0;
        let mut k = 1;
        for (n, _) in self.0.iter().rev().enumerate().filter(|&(_, &occupied)| occupied) {
            result += binomial(n, k);
            k += 1;
        }
        result as u16
    }

    fn decode(coord: u16) -> Self {
        let mut occupied = [false; EDGE_COUNT];
        let mut coord = u32::from(coord);
        for k in (1..=SLICE_EDGE_COUNT).rev() {
            // Terminates: binomial(k - 1, k) is zero
            let mut n = EDGE_COUNT - 1;
            while binomial(n, k) > coord {
                n -= 1;
            }
            coord -= binomial(n, k);
            occupied[EDGE_COUNT - 1 - n] = true;
        }
        SliceOccupancy(occupied)
    }

    fn apply(&self, transform: &CubeState) -> Self {
        SliceOccupancy(permute(&self.0, &transform.edges))
    }
}

/// Lehmer code of the full corner permutation. 8! values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerPermutation([u8; CORNER_COUNT]);

impl CoordinateSpace for CornerPermutation {
    const NAME: &'static str = "corner permutation";
    const SIZE: usize = 40320;

    fn project(cube: &CubeState) -> Self {
        CornerPermutation(cube.corners.map(|c| c.index))
    }

    fn encode(&self) -> u16 {
        lehmer_rank(&self.0)
    }

    fn decode(coord: u16) -> Self {
        let mut corners = [0; CORNER_COUNT];
        lehmer_unrank(u32::from(coord), 0, &mut corners);
        CornerPermutation(corners)
    }

    fn apply(&self, transform: &CubeState) -> Self {
        CornerPermutation(permute(&self.0, &transform.corners))
    }
}

/// Lehmer code of the eight U and D layer edges, read off the eight U and D
/// slots. Only meaningful once those edges are all out of the E-slice, which
/// is what phase 1 guarantees. 8! values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UdEdgePermutation([u8; EDGE_COUNT]);

impl CoordinateSpace for UdEdgePermutation {
    const NAME: &'static str = "U/D edge permutation";
    const SIZE: usize = 40320;

    fn project(cube: &CubeState) -> Self {
        UdEdgePermutation(cube.edges.map(|e| e.index))
    }

    fn encode(&self) -> u16 {
        lehmer_rank(&self.0[..UD_EDGE_COUNT])
    }

    fn decode(coord: u16) -> Self {
        let mut edges = CubeState::SOLVED.edges.map(|e| e.index);
        lehmer_unrank(u32::from(coord), 0, &mut edges[..UD_EDGE_COUNT]);
        UdEdgePermutation(edges)
    }

    fn apply(&self, transform: &CubeState) -> Self {
        UdEdgePermutation(permute(&self.0, &transform.edges))
    }
}

/// Lehmer code of the four E-slice edges within the slice. Only meaningful
/// once they all occupy it. 4! values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlicePermutation([u8; EDGE_COUNT]);

impl CoordinateSpace for SlicePermutation {
    const NAME: &'static str = "E-slice permutation";
    const SIZE: usize = 24;

    fn project(cube: &CubeState) -> Self {
        SlicePermutation(cube.edges.map(|e| e.index))
    }

    fn encode(&self) -> u16 {
        lehmer_rank(&self.0[UD_EDGE_COUNT..])
    }

    fn decode(coord: u16) -> Self {
        let mut edges = CubeState::SOLVED.edges.map(|e| e.index);
        lehmer_unrank(u32::from(coord), FL, &mut edges[UD_EDGE_COUNT..]);
        SlicePermutation(edges)
    }

    fn apply(&self, transform: &CubeState) -> Self {
        SlicePermutation(permute(&self.0, &transform.edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{Face, Move};

    fn round_trips<S: CoordinateSpace>() {
        for coord in 0..S::SIZE as u16 {
            assert_eq!(S::decode(coord).encode(), coord, "{} {coord}", S::NAME);
        }
    }

    #[test]
    fn every_space_round_trips() {
        round_trips::<EdgeOrientation>();
        round_trips::<CornerOrientation>();
        round_trips::<SliceOccupancy>();
        round_trips::<CornerPermutation>();
        round_trips::<UdEdgePermutation>();
        round_trips::<SlicePermutation>();
    }

    fn solved_is_zero<S: CoordinateSpace>() {
        assert_eq!(S::coordinate(&CubeState::SOLVED), 0, "{}", S::NAME);
        assert_eq!(S::decode(0).encode(), 0, "{}", S::NAME);
    }

    #[test]
    fn solved_cube_is_coordinate_zero() {
        solved_is_zero::<EdgeOrientation>();
        solved_is_zero::<CornerOrientation>();
        solved_is_zero::<SliceOccupancy>();
        solved_is_zero::<CornerPermutation>();
        solved_is_zero::<UdEdgePermutation>();
        solved_is_zero::<SlicePermutation>();
    }

    #[test]
    fn coordinates_stay_in_range() {
        let mut cube = CubeState::SOLVED;
        for i in 0..200_usize {
            cube = cube.apply(Move::ALL[(i * 7 + i / 3) % Move::ALL.len()]);
            assert!(usize::from(EdgeOrientation::coordinate(&cube)) < EdgeOrientation::SIZE);
            assert!(usize::from(CornerOrientation::coordinate(&cube)) < CornerOrientation::SIZE);
            assert!(usize::from(SliceOccupancy::coordinate(&cube)) < SliceOccupancy::SIZE);
            assert!(usize::from(CornerPermutation::coordinate(&cube)) < CornerPermutation::SIZE);
            assert!(usize::from(UdEdgePermutation::coordinate(&cube)) < UdEdgePermutation::SIZE);
            assert!(usize::from(SlicePermutation::coordinate(&cube)) < SlicePermutation::SIZE);
        }
    }

    #[test]
    fn decode_is_consistent_with_projection() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        let mut cube = CubeState::SOLVED;
        for _ in 0..500 {
            cube = cube.apply(Move::ALL[rng.usize(..Move::ALL.len())]);

            let eo = EdgeOrientation::project(&cube);
            assert_eq!(EdgeOrientation::decode(eo.encode()), eo);
            let co = CornerOrientation::project(&cube);
            assert_eq!(CornerOrientation::decode(co.encode()), co);
            let slice = SliceOccupancy::project(&cube);
            assert_eq!(SliceOccupancy::decode(slice.encode()), slice);
            let cp = CornerPermutation::project(&cube);
            assert_eq!(CornerPermutation::decode(cp.encode()), cp);
        }
    }

    #[test]
    fn phase2_decode_is_consistent_with_projection() {
        let mut rng = fastrand::Rng::with_seed(0xd0d0);
        let mut cube = CubeState::SOLVED;
        for _ in 0..500 {
            cube = cube.apply(Move::PHASE2[rng.usize(..Move::PHASE2.len())]);

            let ud = UdEdgePermutation::project(&cube);
            assert_eq!(
                UdEdgePermutation::decode(ud.encode()).0[..UD_EDGE_COUNT],
                ud.0[..UD_EDGE_COUNT]
            );
            let slice = SlicePermutation::project(&cube);
            assert_eq!(
                SlicePermutation::decode(slice.encode()).0[UD_EDGE_COUNT..],
                slice.0[UD_EDGE_COUNT..]
            );
        }
    }

    #[test]
    fn apply_matches_compose() {
        let mut cube = CubeState::SOLVED;
        for (i, move_) in Move::ALL.iter().cycle().step_by(5).take(60).enumerate() {
            let next = cube.apply(*move_);
            assert_eq!(
                EdgeOrientation::project(&cube).apply(move_.transform()),
                EdgeOrientation::project(&next),
                "step {i}"
            );
            assert_eq!(
                CornerOrientation::project(&cube).apply(move_.transform()),
                CornerOrientation::project(&next),
                "step {i}"
            );
            assert_eq!(
                SliceOccupancy::project(&cube).apply(move_.transform()),
                SliceOccupancy::project(&next),
                "step {i}"
            );
            cube = next;
        }
    }

    #[test]
    fn quarter_turns_leave_the_slice() {
        // A quarter turn of F pulls two slice edges out, a half turn keeps
        // them in the slice
        let cube = CubeState::SOLVED.apply(Move::new(Face::F, 1).unwrap());
        assert_ne!(SliceOccupancy::coordinate(&cube), 0);
        let cube = CubeState::SOLVED.apply(Move::new(Face::F, 2).unwrap());
        assert_eq!(SliceOccupancy::coordinate(&cube), 0);
    }

    #[test]
    fn binomial_values() {
        assert_eq!(binomial(12, 4), 495);
        assert_eq!(binomial(11, 0), 1);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(8, 8), 1);
        assert_eq!(binomial(10, 3), 120);
    }

    #[test]
    fn lehmer_extremes() {
        assert_eq!(lehmer_rank(&[0, 1, 2, 3, 4, 5, 6, 7]), 0);
        assert_eq!(lehmer_rank(&[7, 6, 5, 4, 3, 2, 1, 0]), 40319);
        assert_eq!(lehmer_rank(&[8, 9, 10, 11]), 0);
        assert_eq!(lehmer_rank(&[11, 10, 9, 8]), 23);
    }
}

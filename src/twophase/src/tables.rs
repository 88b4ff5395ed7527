use std::collections::VecDeque;

use log::debug;

use crate::{
    coord::CoordinateSpace,
    cube::{MOVE_COUNT, Move},
};

/// `[coordinate][move] -> coordinate` for one coordinate space.
pub struct TransitionTable {
    name: &'static str,
    next: Vec<[u16; MOVE_COUNT]>,
}

impl TransitionTable {
    /// Decode every coordinate of `S`, apply each of the 18 moves to the
    /// representative and encode the result.
    #[must_use]
    pub fn build<S: CoordinateSpace>() -> Self {
        let next = (0..S::SIZE)
            .map(|coord| {
                // `SIZE` never exceeds 8!
                let representative = S::decode(coord as u16);
                Move::ALL.map(|move_| representative.apply(move_.transform()).encode())
            })
            .collect();
        TransitionTable { name: S::NAME, next }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, coord: u16, move_: Move) -> u16 {
        self.next[usize::from(coord)][move_.index()]
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.next.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }
}

/// Exact number of moves needed to bring a pair of coordinates to `(0, 0)`,
/// over the product of two coordinate spaces and a fixed move set.
pub struct DistanceTable {
    distances: Vec<u8>,
    stride: usize,
    max_distance: u8,
}

impl DistanceTable {
    /// Marks entries the breadth-first search never reached.
    pub const UNVISITED: u8 = u8::MAX;

    /// Breadth-first search from product coordinate zero, stepping both
    /// components with their transition tables.
    #[must_use]
    pub fn build(first: &TransitionTable, second: &TransitionTable, moves: &[Move]) -> Self {
        let stride = second.len();
        let mut distances = vec![Self::UNVISITED; first.len() * stride];
        let mut max_distance = 0;

        distances[0] = 0;
        let mut queue = VecDeque::from([0_usize]);
        while let Some(current) = queue.pop_front() {
            let depth = distances[current];
            // Both components are below `u16::MAX` by construction
            let a = (current / stride) as u16;
            let b = (current % stride) as u16;

            for &move_ in moves {
                let next = usize::from(first.get(a, move_)) * stride
                    + usize::from(second.get(b, move_));
                if distances[next] == Self::UNVISITED {
                    distances[next] = depth + 1;
                    max_distance = max_distance.max(depth + 1);
                    queue.push_back(next);
                }
            }
        }

        let table = DistanceTable {
            distances,
            stride,
            max_distance,
        };
        debug!(
            "{} x {}: {} entries, {} unreached, max distance {}",
            first.name(),
            second.name(),
            table.len(),
            table.unreached(),
            table.max_distance
        );
        table
    }

    /// Distance of the product coordinate `(a, b)`.
    #[inline]
    #[must_use]
    pub fn get(&self, a: u16, b: u16) -> u8 {
        let distance = self.distances[usize::from(a) * self.stride + usize::from(b)];
        debug_assert_ne!(distance, Self::UNVISITED, "read of unreachable coordinate ({a}, {b})");
        distance
    }

    #[must_use]
    pub fn max_distance(&self) -> u8 {
        self.max_distance
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    #[must_use]
    pub fn unreached(&self) -> usize {
        self.distances
            .iter()
            .filter(|&&d| d == Self::UNVISITED)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{
        CornerOrientation, CornerPermutation, EdgeOrientation, SliceOccupancy, SlicePermutation,
    };

    fn transitions_match<S: CoordinateSpace>() {
        let table = TransitionTable::build::<S>();
        assert_eq!(table.len(), S::SIZE);
        for coord in 0..S::SIZE as u16 {
            let representative = S::decode(coord);
            for move_ in Move::ALL {
                assert_eq!(
                    table.get(coord, move_),
                    representative.apply(move_.transform()).encode(),
                    "{} {coord} {move_}",
                    S::NAME
                );
            }
        }
    }

    #[test]
    fn transition_tables_match_composition() {
        transitions_match::<EdgeOrientation>();
        transitions_match::<CornerOrientation>();
        transitions_match::<SliceOccupancy>();
        transitions_match::<SlicePermutation>();
    }

    #[test]
    fn half_turns_are_involutions() {
        let cp = TransitionTable::build::<CornerPermutation>();
        for move_ in Move::ALL.into_iter().filter(|m| m.is_half_turn()) {
            for coord in (0..CornerPermutation::SIZE as u16).step_by(97) {
                assert_eq!(cp.get(cp.get(coord, move_), move_), coord, "{move_}");
            }
        }
    }

    #[test]
    fn phase2_moves_keep_edges_oriented() {
        let eo = TransitionTable::build::<EdgeOrientation>();
        for move_ in Move::PHASE2 {
            assert_eq!(eo.get(0, move_), 0, "{move_}");
        }
    }

    #[test]
    fn small_product_is_fully_reached() {
        let eo = TransitionTable::build::<EdgeOrientation>();
        let slice = TransitionTable::build::<SliceOccupancy>();
        let table = DistanceTable::build(&eo, &slice, &Move::ALL);

        assert_eq!(table.len(), EdgeOrientation::SIZE * SliceOccupancy::SIZE);
        assert_eq!(table.get(0, 0), 0);
        assert_eq!(table.unreached(), 0);
        assert!(table.max_distance() > 0 && table.max_distance() < 20);
    }

    #[test]
    fn restricted_moves_leave_coordinates_unreached() {
        let eo = TransitionTable::build::<EdgeOrientation>();
        let slice = TransitionTable::build::<SliceOccupancy>();
        // Phase 2 moves never leave (0, 0)
        let table = DistanceTable::build(&eo, &slice, &Move::PHASE2);

        assert_eq!(table.unreached(), table.len() - 1);
        assert_eq!(table.max_distance(), 0);
    }
}

use std::time::Instant;

use log::info;

use crate::{
    coord::{
        CoordinateSpace, CornerOrientation, CornerPermutation, EdgeOrientation, SliceOccupancy,
        SlicePermutation, UdEdgePermutation,
    },
    cube::{CubeState, Move},
    start, success,
    tables::{DistanceTable, TransitionTable},
};

/// The three coordinates phase 1 drives to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Phase1Coords {
    pub eo: u16,
    pub co: u16,
    pub slice: u16,
}

impl Phase1Coords {
    #[must_use]
    pub fn from_cube(cube: &CubeState) -> Self {
        Phase1Coords {
            eo: EdgeOrientation::coordinate(cube),
            co: CornerOrientation::coordinate(cube),
            slice: SliceOccupancy::coordinate(cube),
        }
    }

    #[must_use]
    pub fn is_solved(self) -> bool {
        self.eo == 0 && self.co == 0 && self.slice == 0
    }
}

/// The three coordinates phase 2 drives to zero. Only meaningful for cubes in
/// the phase-2 subgroup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Phase2Coords {
    pub cp: u16,
    pub ud: u16,
    pub slice: u16,
}

impl Phase2Coords {
    #[must_use]
    pub fn from_cube(cube: &CubeState) -> Self {
        Phase2Coords {
            cp: CornerPermutation::coordinate(cube),
            ud: UdEdgePermutation::coordinate(cube),
            slice: SlicePermutation::coordinate(cube),
        }
    }

    #[must_use]
    pub fn is_solved(self) -> bool {
        self.cp == 0 && self.ud == 0 && self.slice == 0
    }
}

/// Every table the search reads. Built once, immutable afterwards, and safe to
/// share between any number of concurrent solves.
pub struct PruningTables {
    pub eo: TransitionTable,
    pub co: TransitionTable,
    pub slice: TransitionTable,
    pub cp: TransitionTable,
    pub ud: TransitionTable,
    pub slice_perm: TransitionTable,
    pub eo_slice: DistanceTable,
    pub co_slice: DistanceTable,
    pub cp_slice_perm: DistanceTable,
    pub ud_slice_perm: DistanceTable,
}

impl PruningTables {
    #[must_use]
    pub fn build() -> Self {
        info!(start!("Generating move and pruning tables"));
        let start = Instant::now();

        let eo = TransitionTable::build::<EdgeOrientation>();
        let co = TransitionTable::build::<CornerOrientation>();
        let slice = TransitionTable::build::<SliceOccupancy>();
        let cp = TransitionTable::build::<CornerPermutation>();
        let ud = TransitionTable::build::<UdEdgePermutation>();
        let slice_perm = TransitionTable::build::<SlicePermutation>();

        let eo_slice = DistanceTable::build(&eo, &slice, &Move::ALL);
        let co_slice = DistanceTable::build(&co, &slice, &Move::ALL);
        let cp_slice_perm = DistanceTable::build(&cp, &slice_perm, &Move::PHASE2);
        let ud_slice_perm = DistanceTable::build(&ud, &slice_perm, &Move::PHASE2);

        info!(
            success!("Generated tables in {:.3}s"),
            start.elapsed().as_secs_f64()
        );
        PruningTables {
            eo,
            co,
            slice,
            cp,
            ud,
            slice_perm,
            eo_slice,
            co_slice,
            cp_slice_perm,
            ud_slice_perm,
        }
    }

    #[inline]
    #[must_use]
    pub fn phase1_move(&self, coords: Phase1Coords, move_: Move) -> Phase1Coords {
        Phase1Coords {
            eo: self.eo.get(coords.eo, move_),
            co: self.co.get(coords.co, move_),
            slice: self.slice.get(coords.slice, move_),
        }
    }

    #[inline]
    #[must_use]
    pub fn phase2_move(&self, coords: Phase2Coords, move_: Move) -> Phase2Coords {
        Phase2Coords {
            cp: self.cp.get(coords.cp, move_),
            ud: self.ud.get(coords.ud, move_),
            slice: self.slice_perm.get(coords.slice, move_),
        }
    }

    /// Admissible lower bound on the moves left in phase 1: solving EO, CO and
    /// the slice together takes at least as long as either pair alone.
    #[inline]
    #[must_use]
    pub fn phase1_heuristic(&self, coords: Phase1Coords) -> u8 {
        self.eo_slice
            .get(coords.eo, coords.slice)
            .max(self.co_slice.get(coords.co, coords.slice))
    }

    /// Admissible lower bound on the phase-2 moves left.
    #[inline]
    #[must_use]
    pub fn phase2_heuristic(&self, coords: Phase2Coords) -> u8 {
        self.cp_slice_perm
            .get(coords.cp, coords.slice)
            .max(self.ud_slice_perm.get(coords.ud, coords.slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::Face;

    #[test]
    fn coords_of_solved_cube() {
        assert!(Phase1Coords::from_cube(&CubeState::SOLVED).is_solved());
        assert!(Phase2Coords::from_cube(&CubeState::SOLVED).is_solved());
    }

    #[test]
    fn quarter_turn_of_side_face_leaves_phase1() {
        let cube = CubeState::SOLVED.apply(Move::new(Face::R, 1).unwrap());
        assert!(!Phase1Coords::from_cube(&cube).is_solved());

        let cube = CubeState::SOLVED.apply(Move::new(Face::R, 2).unwrap());
        assert!(Phase1Coords::from_cube(&cube).is_solved());
        assert!(!Phase2Coords::from_cube(&cube).is_solved());
    }
}

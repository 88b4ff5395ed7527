use std::{fmt, time::Instant};

use log::{debug, info};
use thiserror::Error;

use crate::{
    config::SolverConfig,
    cube::{CubeState, Move},
    notation::{ParseScrambleError, format_moves, parse_scramble},
    pruning::{Phase1Coords, Phase2Coords, PruningTables},
    start, success, working,
};

/// How many nodes the search visits between clock checks.
const DEADLINE_CHECK_INTERVAL: u64 = 4096;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error(transparent)]
    InvalidScramble(#[from] ParseScrambleError),
    #[error("Time limit exceeded")]
    TimeLimitExceeded,
    /// No phase-1 depth below the cap led to a complete solution. This cannot
    /// happen for a cube reached from solved by legal moves.
    #[error("No solution found with phase 1 shorter than {max_depth} moves")]
    SearchExhausted { max_depth: u8 },
}

/// A solution split at the point where the cube entered the phase-2
/// subgroup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    pub phase1: Vec<Move>,
    pub phase2: Vec<Move>,
}

impl Solution {
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.phase1.iter().chain(&self.phase2).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phase1.len() + self.phase2.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The relative transform this solution performs.
    #[must_use]
    pub fn transform(&self) -> CubeState {
        CubeState::SOLVED.apply_all(self.phase1.iter().chain(&self.phase2))
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_moves(self.phase1.iter().chain(&self.phase2)))
    }
}

/// Mutable state of one solve. Each call owns its own, so a [`TwoPhaseSolver`]
/// can be shared freely.
struct SearchState {
    scrambled: CubeState,
    phase1: Vec<Move>,
    phase2: Vec<Move>,
    deadline: Option<Instant>,
    nodes_visited: u64,
}

impl SearchState {
    fn tick(&mut self) -> Result<(), SolveError> {
        self.nodes_visited += 1;
        if self.nodes_visited % DEADLINE_CHECK_INTERVAL == 0 {
            self.check_deadline()?;
        }
        Ok(())
    }

    fn check_deadline(&self) -> Result<(), SolveError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(SolveError::TimeLimitExceeded),
            _ => Ok(()),
        }
    }

    /// Whether `move_` turns the same face as the move before it. The first
    /// phase-2 move is compared against the last phase-1 move.
    fn repeats_face(&self, move_: Move) -> bool {
        self.phase2
            .last()
            .or(self.phase1.last())
            .is_some_and(|last| last.face() == move_.face())
    }
}

/// Kociemba's two-phase algorithm: iterative-deepening search to the phase-2
/// subgroup, then iterative-deepening search within it to solved.
///
/// The first complete solution found is returned. Phase-1 bounds are tried in
/// ascending order and, for each bound, every phase-1 path is tried in move
/// order until one admits a short enough phase 2. The result is usually close
/// to optimal but not guaranteed to be.
pub struct TwoPhaseSolver<'t> {
    tables: &'t PruningTables,
    config: SolverConfig,
}

impl<'t> TwoPhaseSolver<'t> {
    #[must_use]
    pub fn new(tables: &'t PruningTables) -> Self {
        TwoPhaseSolver {
            tables,
            config: SolverConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Parse `scramble` and solve the resulting cube.
    ///
    /// # Errors
    ///
    /// Fails on an unparseable scramble, see [`SolveError`].
    pub fn solve(&self, scramble: &str) -> Result<Solution, SolveError> {
        let cube = parse_scramble(scramble)?;
        self.solve_cube(&cube)
    }

    /// # Errors
    ///
    /// Fails when the configured time limit runs out, or when the phase-1
    /// depth cap is reached without a solution.
    pub fn solve_cube(&self, cube: &CubeState) -> Result<Solution, SolveError> {
        info!(start!("Searching for a two-phase solution"));
        let start = Instant::now();

        let mut state = SearchState {
            scrambled: *cube,
            phase1: vec![],
            phase2: vec![],
            deadline: self.config.time_limit().map(|limit| start + limit),
            nodes_visited: 0,
        };

        let coords = Phase1Coords::from_cube(cube);
        for depth in self.tables.phase1_heuristic(coords)..self.config.phase1_max_depth {
            debug!(working!("Searching phase 1 depth {}..."), depth);
            let depth_start = Instant::now();
            let nodes_start = state.nodes_visited;
            let found = self.search_phase1(&mut state, coords, depth)?;
            debug!(
                working!("Traversed {} nodes in {:.3}s"),
                state.nodes_visited - nodes_start,
                depth_start.elapsed().as_secs_f64()
            );
            if found {
                let solution = Solution {
                    phase1: state.phase1,
                    phase2: state.phase2,
                };
                info!(
                    success!("Found a {} move solution ({} + {}) in {:.3}s"),
                    solution.len(),
                    solution.phase1.len(),
                    solution.phase2.len(),
                    start.elapsed().as_secs_f64()
                );
                return Ok(solution);
            }
        }

        Err(SolveError::SearchExhausted {
            max_depth: self.config.phase1_max_depth,
        })
    }

    /// Depth-first search with exactly `remaining` phase-1 moves left to
    /// place. Returns whether a full solution was found, in which case both
    /// paths in `state` hold it.
    fn search_phase1(
        &self,
        state: &mut SearchState,
        coords: Phase1Coords,
        remaining: u8,
    ) -> Result<bool, SolveError> {
        state.tick()?;

        if remaining == 0 {
            // A phase-2 move here means phase 1 was already complete one move
            // earlier, which the shorter bound has covered
            if state.phase1.last().is_some_and(|last| last.is_phase2()) {
                return Ok(false);
            }
            return self.start_phase2(state);
        }

        for move_ in Move::ALL {
            if state.repeats_face(move_) {
                continue;
            }

            let next = self.tables.phase1_move(coords, move_);
            if self.tables.phase1_heuristic(next) >= remaining {
                continue;
            }

            state.phase1.push(move_);
            if self.search_phase1(state, next, remaining - 1)? {
                return Ok(true);
            }
            state.phase1.pop();
        }

        Ok(false)
    }

    /// Coordinates do not retain the full cube, so replay the phase-1 path on
    /// the scramble and search phase 2 from there.
    fn start_phase2(&self, state: &mut SearchState) -> Result<bool, SolveError> {
        state.check_deadline()?;

        let cube = state.scrambled.apply_all(&state.phase1);
        let coords = Phase2Coords::from_cube(&cube);
        for depth in self.tables.phase2_heuristic(coords)..self.config.phase2_max_depth {
            if self.search_phase2(state, coords, depth)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Nodes are only entered while their heuristic is below `remaining`, so
    /// reaching zero means every phase-2 coordinate is solved.
    fn search_phase2(
        &self,
        state: &mut SearchState,
        coords: Phase2Coords,
        remaining: u8,
    ) -> Result<bool, SolveError> {
        state.tick()?;

        if remaining == 0 {
            return Ok(true);
        }

        for move_ in Move::PHASE2 {
            if state.repeats_face(move_) {
                continue;
            }

            let next = self.tables.phase2_move(coords, move_);
            if self.tables.phase2_heuristic(next) >= remaining {
                continue;
            }

            state.phase2.push(move_);
            if self.search_phase2(state, next, remaining - 1)? {
                return Ok(true);
            }
            state.phase2.pop();
        }

        Ok(false)
    }
}

//! A 3x3 Rubik's cube solver using Kociemba's two-phase algorithm.
//!
//! ```no_run
//! let solution = twophase::solve("R U R' U'").unwrap();
//! println!("{solution}");
//! ```

pub mod config;
pub mod coord;
pub mod cube;
pub mod host;
pub mod notation;
pub mod pruning;
pub mod scramble;
pub mod solver;
pub mod tables;

use std::sync::LazyLock;

pub use config::SolverConfig;
pub use cube::{CubeState, Face, Move};
pub use notation::ParseScrambleError;
pub use pruning::PruningTables;
pub use solver::{Solution, SolveError, TwoPhaseSolver};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

static TABLES: LazyLock<PruningTables> = LazyLock::new(PruningTables::build);

/// The process-wide tables, generated on first use.
pub fn tables() -> &'static PruningTables {
    &TABLES
}

/// A solver with default limits over the process-wide tables.
#[must_use]
pub fn default_solver() -> TwoPhaseSolver<'static> {
    TwoPhaseSolver::new(tables())
}

/// Solve a scramble given in standard notation, returning the solution in the
/// same notation. An empty scramble gives an empty solution.
///
/// # Errors
///
/// Fails with [`SolveError::InvalidScramble`] if any token is not a move.
pub fn solve(scramble: &str) -> Result<String, SolveError> {
    Ok(default_solver().solve(scramble)?.to_string())
}

//! Entry point for embedding hosts, which want a plain result with timing and
//! an error string rather than a typed error.

use std::time::{Duration, Instant};

use crate::{default_solver, solver::TwoPhaseSolver};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedSolution {
    pub solution: String,
    pub elapsed: Duration,
    pub move_count: usize,
}

/// Solve `scramble` with the shared tables and report how long it took.
///
/// # Errors
///
/// The error's message, e.g. `invalid scramble`.
pub fn solve_timed(scramble: &str) -> Result<TimedSolution, String> {
    solve_timed_with(&default_solver(), scramble)
}

/// [`solve_timed`] with a caller-configured solver.
///
/// # Errors
///
/// The error's message.
pub fn solve_timed_with(solver: &TwoPhaseSolver, scramble: &str) -> Result<TimedSolution, String> {
    let start = Instant::now();
    let solution = solver.solve(scramble).map_err(|err| err.to_string())?;
    Ok(TimedSolution {
        move_count: solution.len(),
        solution: solution.to_string(),
        elapsed: start.elapsed(),
    })
}

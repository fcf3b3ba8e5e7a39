//! Solutions for the grid puzzles.
//!
//! This module provides [`run_day`] to dynamically run a solution by its day.
//!
//! Steps to make a solution available to run:
//! 1. Make a submodule to hold the solution implementation.
//! 2. Have the submodule implement [`Puzzles<DAY>`] for its day as a [`SolutionRunner`] taking
//!    [`Settings`] as its context.
//! 3. Import the submodule below `IMPORT SUBMODULES HERE`
//! 4. Add a match case to run [`Puzzles<DAY>`] for a day, below `MATCH SOLUTIONS HERE`:
//!
//! ```ignore
//! // matching for day 10
//! 10 => Puzzles::<10>::run(input, settings, handler, timed),
//! ```

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use puzzle_framework::DynamicResult;
use puzzle_framework::runner::{OutputHandler, SolutionRunner};
use thiserror::Error;

use crate::settings::Settings;

// --- IMPORT SUBMODULES HERE ---
mod day10;
mod day11;

/// A structure collecting solutions by day.
///
/// In a submodule, implement this as a [`SolutionRunner`] for the day.
///
/// Use [`#[solution_runner]`][puzzle_framework::runner::solution_runner] for convenience:
///
/// ```ignore
/// // in a submodule "day10.rs"
/// use puzzle_framework::runner::solution_runner;
///
/// #[solution_runner(name = "Day 10", context = Settings, parsed = PipeMaze, part_one = Day10)]
/// impl super::Puzzles<10> {}
/// ```
struct Puzzles<const DAY: u8>;

/// A solution for a day is not available.
#[derive(Error, Debug)]
#[error("no solution available for day {0}")]
pub struct DayNotAvailable(u8);

/// Run a solution based on the day.
///
/// # Errors
///
/// If the solution for the given day is not available, a [`DayNotAvailable`] error is returned.
///
/// Any dynamically dispatched error from running the solution is propagated.
pub fn run_day(
    day: u8,
    input: &str,
    settings: &Settings,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()> {
    match day {
        // --- MATCH SOLUTIONS HERE ---
        10 => Puzzles::<10>::run(input, settings, handler, timed),
        11 => Puzzles::<11>::run(input, settings, handler, timed),
        _ => Err(DayNotAvailable(day).into()),
    }
}

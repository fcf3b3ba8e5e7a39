//! Functions and traits for running solutions.
//!
//! # Quick Start
//!
//! A structure or impl-block can be annotated with the [`#[solution_runner]`][solution_runner]
//! attribute macro with appropriate properties:
//!
//! ```
//! # use puzzle_framework::runner::solution_runner;
//! # use puzzle_framework::{DynamicResult, PartOne, Solution};
//! #
//! struct Lines;
//!
//! impl Solution<PartOne> for Lines {
//!     type Input = str;
//!     type Context = ();
//!     /* ... */
//! #    type Output = usize;
//! #    fn solve(input: &Self::Input, _context: &()) -> DynamicResult<usize> {
//! #        Ok(input.lines().count())
//! #    }
//! }
//!
//! #[solution_runner(name = "Lines", part_one = Lines)]
//! struct LinesRunner;
//! ```
//!
//! Solutions taking settings name their context type:
//!
//! ```ignore
//! #[solution_runner(name = "Day 11", context = Settings, parsed = Image, part_one = Day11)]
//! impl Puzzles<11> {}
//! ```

use std::fmt::Display;
use std::time::Duration;

use tracing::{debug, info_span};

use crate::{DynamicResult, ParseData, Part, PartKind, PartOne, PartTwo, Solution};

// re-export procedural macro
pub use puzzle_framework_macros::solution_runner;

/// A trait for an output events handler.
///
/// When a solution runs, the steps of running the solution leads to events to output through a
/// handler as feedback.
pub trait OutputHandler {
    /// Called to output the name of the solution, at the start of running the solution.
    fn solution_name(&mut self, name: &str);

    /// Called when the solution starts parsing input.
    fn parse_start(&mut self);

    /// Called when parsing input is finished.
    ///
    /// The duration taken to parse is optionally passed.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// Called when a solution part starts, with a [`PartKind`] to identify the part.
    fn part_start(&mut self, part: PartKind);

    /// Called when a part finishes to output the result, with a [`PartKind`] to identify the part.
    ///
    /// The duration taken to run the part is optionally passed.
    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration_opt: Option<Duration>);
}

/// Measure the duration of an expression.
///
/// The macro evaluates the given expression once and returns a tuple of the expression's result and
/// the elapsed [`Duration`][std::time::Duration].
macro_rules! measure_duration {
    ($expr:expr) => {{
        let start = ::std::time::Instant::now();
        let result = $expr;
        let elapsed = start.elapsed();
        (result, elapsed)
    }};
}

/// A macro to optionally measure the duration of an expression.
///
/// If the `$timed` flag evaluates to `true`, the duration of the expression's evaluation is
/// measured and returned with the result, otherwise the duration is `None`.
macro_rules! measure_with_optional_duration {
    ($expr:expr, $timed:expr) => {{
        if $timed {
            let (result, duration) = measure_duration!($expr);
            (result, Some(duration))
        } else {
            ($expr, None)
        }
    }};
}

/// Run a solution part, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
fn run_part<S, P>(
    input: &S::Input,
    context: &S::Context,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    P: Part,
    S: Solution<P>,
{
    let part = P::kind();
    let _span = info_span!("part", %part).entered();
    handler.part_start(part);
    let (result, duration_opt) = measure_with_optional_duration!(S::solve(input, context), timed);
    let output = result?;
    debug!(%output, ?duration_opt, "part solved");
    handler.part_output(part, &output, duration_opt);
    Ok(())
}

/// Run a solution's parse step, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing is propagated.
fn run_parse<D: ParseData>(
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<D> {
    handler.parse_start();
    let (result, duration_opt) = measure_with_optional_duration!(D::parse(input), timed);
    let parsed = result?;
    debug!(bytes = input.len(), ?duration_opt, "input parsed");
    handler.parse_end(duration_opt);
    Ok(parsed)
}

/// Run a solution that only implements part one and accepts string input.
///
/// # Arguments
///
/// - `name` - The solution's name to output.
/// - `input` - The input string to solve.
/// - `context` - The settings passed to the solution.
/// - `handler` - The output handler to output events to.
/// - `timed` - A flag to measure the time to solve then output the elapsed time to the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
pub fn solve_half_solution<C, S1>(
    name: &str,
    input: &str,
    context: &C,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    C: ?Sized,
    S1: Solution<PartOne, Input = str, Context = C>,
{
    let _span = info_span!("solution", name).entered();
    handler.solution_name(name);
    run_part::<S1, PartOne>(input, context, handler, timed)
}

/// Run a solution that implements both parts and accepts string input.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution parts is propagated.
pub fn solve_full_solution<C, S1, S2>(
    name: &str,
    input: &str,
    context: &C,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    C: ?Sized,
    S1: Solution<PartOne, Input = str, Context = C>,
    S2: Solution<PartTwo, Input = str, Context = C>,
{
    let _span = info_span!("solution", name).entered();
    handler.solution_name(name);
    run_part::<S1, PartOne>(input, context, handler, timed)?;
    run_part::<S2, PartTwo>(input, context, handler, timed)
}

/// Run a solution that implements part one and has a parse data step for input.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution is propagated.
pub fn solve_parsed_half_solution<C, D, S1>(
    name: &str,
    input: &str,
    context: &C,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    C: ?Sized,
    D: ParseData,
    S1: Solution<PartOne, Input = D, Context = C>,
{
    let _span = info_span!("solution", name).entered();
    handler.solution_name(name);
    let parsed = run_parse::<D>(input, handler, timed)?;
    run_part::<S1, PartOne>(&parsed, context, handler, timed)
}

/// Run a solution that implements both parts and has a parse data step for input.
///
/// The input is parsed once and shared by both parts.
///
/// # Arguments
///
/// - `name` - The solution's name to output.
/// - `input` - The input string to solve.
/// - `context` - The settings passed to both parts.
/// - `handler` - The output handler to output events to.
/// - `timed` - A flag to measure the time to parse data & solve parts then output the elapsed times
///   to the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution parts is propagated.
pub fn solve_parsed_full_solution<C, D, S1, S2>(
    name: &str,
    input: &str,
    context: &C,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    C: ?Sized,
    D: ParseData,
    S1: Solution<PartOne, Input = D, Context = C>,
    S2: Solution<PartTwo, Input = D, Context = C>,
{
    let _span = info_span!("solution", name).entered();
    handler.solution_name(name);
    let parsed = run_parse::<D>(input, handler, timed)?;
    run_part::<S1, PartOne>(&parsed, context, handler, timed)?;
    run_part::<S2, PartTwo>(&parsed, context, handler, timed)
}

/// A trait for solutions that can be run with a context of type `C`.
///
/// The trait can be implemented with the [`solution_runner`] attribute macro.
pub trait SolutionRunner<C: ?Sized> {
    /// Run the solution.
    ///
    /// # Arguments
    ///
    /// - `input` - The input string to solve.
    /// - `context` - The settings passed to the solution's parts.
    /// - `handler` - The output handler to output events to.
    /// - `timed` - A flag to measure the time to process steps then output the elapsed times to the
    ///   handler.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from running the solution is propagated.
    fn run(
        input: &str,
        context: &C,
        handler: &mut dyn OutputHandler,
        timed: bool,
    ) -> DynamicResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An output handler recording events as strings.
    #[derive(Default)]
    struct RecordingHandler {
        events: Vec<String>,
    }

    impl OutputHandler for RecordingHandler {
        fn solution_name(&mut self, name: &str) {
            self.events.push(format!("name {name}"));
        }

        fn parse_start(&mut self) {
            self.events.push("parse start".to_string());
        }

        fn parse_end(&mut self, duration_opt: Option<Duration>) {
            self.events
                .push(format!("parse end timed={}", duration_opt.is_some()));
        }

        fn part_start(&mut self, part: PartKind) {
            self.events.push(format!("{part} start"));
        }

        fn part_output(
            &mut self,
            part: PartKind,
            output: &dyn Display,
            duration_opt: Option<Duration>,
        ) {
            self.events.push(format!(
                "{part} output {output} timed={}",
                duration_opt.is_some()
            ));
        }
    }

    struct Digits(Vec<u32>);

    impl ParseData for Digits {
        fn parse(input: &str) -> DynamicResult<Self> {
            input
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_digit(10).ok_or_else(|| format!("not a digit: {c:?}").into()))
                .collect::<DynamicResult<_>>()
                .map(Self)
        }
    }

    struct Multiplier(u32);

    struct DigitSum;

    impl Solution<PartOne> for DigitSum {
        type Input = Digits;
        type Context = Multiplier;
        type Output = u32;

        fn solve(input: &Digits, context: &Multiplier) -> DynamicResult<u32> {
            Ok(input.0.iter().sum::<u32>() * context.0)
        }
    }

    impl Solution<PartTwo> for DigitSum {
        type Input = Digits;
        type Context = Multiplier;
        type Output = u32;

        fn solve(input: &Digits, context: &Multiplier) -> DynamicResult<u32> {
            Ok(input.0.iter().max().copied().unwrap_or(0) * context.0)
        }
    }

    struct LineCount;

    impl Solution<PartOne> for LineCount {
        type Input = str;
        type Context = ();
        type Output = usize;

        fn solve(input: &str, _context: &()) -> DynamicResult<usize> {
            Ok(input.lines().count())
        }
    }

    #[test]
    fn parsed_full_solution_reports_events_in_order() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_parsed_full_solution::<_, Digits, DigitSum, DigitSum>(
            "Digits",
            "1234",
            &Multiplier(2),
            &mut handler,
            false,
        )?;
        assert_eq!(
            handler.events,
            vec![
                "name Digits",
                "parse start",
                "parse end timed=false",
                "Part 1 start",
                "Part 1 output 20 timed=false",
                "Part 2 start",
                "Part 2 output 8 timed=false",
            ]
        );
        Ok(())
    }

    #[test]
    fn timed_runs_pass_durations() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_half_solution::<_, LineCount>("Lines", "a\nb\nc", &(), &mut handler, true)?;
        assert_eq!(
            handler.events,
            vec!["name Lines", "Part 1 start", "Part 1 output 3 timed=true"]
        );
        Ok(())
    }

    #[test]
    fn parse_errors_stop_the_run() {
        let mut handler = RecordingHandler::default();
        let result = solve_parsed_half_solution::<_, Digits, DigitSum>(
            "Digits",
            "12x",
            &Multiplier(1),
            &mut handler,
            false,
        );
        assert!(result.is_err());
        assert_eq!(handler.events, vec!["name Digits", "parse start"]);
    }
}

use grid_region::{PipeGrid, Shape, count_enclosed, enclosed_cells, render_loop, trace_loop};
use puzzle_framework::parsing::parse_input_lines;
use puzzle_framework::runner::solution_runner;
use puzzle_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use tracing::{Level, debug, trace};

use crate::settings::Settings;

#[solution_runner(
    name = "Day 10: Pipe Maze",
    context = Settings,
    parsed = PipeMaze,
    part_one = Day10,
    part_two = Day10
)]
impl super::Puzzles<10> {}

/*
Input is a grid of pipes and an animal that enters the pipes.

Various characters are used for representation:

- `.` is a space clear of anything relevant.
- `|` and `-` are straight pipes connecting north-south and east-west respectively.
- `L`, `J`, `7`, `F` are 90 degree bends connecting north-east, north-west, south-west, and
  south-east respectively.
- `S` marks where the animal starts, standing in for whichever pipe closes the loop.
*/

/// The pipe grid parsed from input, with the start's pipe shape resolved.
struct PipeMaze(PipeGrid);

impl ParseData for PipeMaze {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let rows = parse_input_lines(input, |_, line| Shape::parse_row(line))
            .collect::<Result<Vec<_>, _>>()?;
        let grid = PipeGrid::from_rows(rows)?;
        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            start = %grid.start(),
            shape = %grid.shape(grid.start()),
            "parsed pipe maze"
        );
        Ok(Self(grid))
    }
}

/*
For part 1, determine the farthest grid cell for the animal to reach when following the pipe loop,
then return the number of steps to reach that cell.
*/

struct Day10;

impl Solution<PartOne> for Day10 {
    type Input = PipeMaze;
    type Context = Settings;
    type Output = usize;

    fn solve(input: &Self::Input, _context: &Settings) -> DynamicResult<Self::Output> {
        let pipe_loop = trace_loop(&input.0)?;
        // a closed loop on a grid always has an even length
        Ok(pipe_loop.farthest_steps())
    }
}

/*
For part 2, determine the number of cells enclosed by the pipe loop.
*/

impl Solution<PartTwo> for Day10 {
    type Input = PipeMaze;
    type Context = Settings;
    type Output = usize;

    fn solve(input: &Self::Input, context: &Settings) -> DynamicResult<Self::Output> {
        let pipe_loop = trace_loop(&input.0)?;
        let count = count_enclosed(&input.0, &pipe_loop, context.enclosure);

        if tracing::enabled!(Level::TRACE) {
            let enclosed = enclosed_cells(&input.0, &pipe_loop);
            trace!(
                "enclosed region:\n{}",
                render_loop(&input.0, &pipe_loop, Some(&enclosed))
            );
        }

        Ok(count)
    }
}

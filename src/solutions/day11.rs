use grid_region::SpaceImage;
use puzzle_framework::parsing::parse_input_lines;
use puzzle_framework::runner::solution_runner;
use puzzle_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use rayon::ThreadPoolBuilder;
use tracing::debug;

use crate::settings::{DistanceMethod, Settings};

#[solution_runner(
    name = "Day 11: Cosmic Expansion",
    context = Settings,
    parsed = Observatory,
    part_one = Day11,
    part_two = Day11
)]
impl super::Puzzles<11> {}

/*
Input is an image formatted into a character grid. There are `.` for empty space and `#` to
represent galaxies.
*/

/// The input observatory image, parsed from a character grid.
#[derive(Debug)]
struct Observatory(SpaceImage);

impl ParseData for Observatory {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let rows = parse_input_lines(input, |_, line| SpaceImage::parse_row(line))
            .collect::<Result<Vec<_>, _>>()?;
        let image = SpaceImage::from_rows(&rows)?;
        debug!(
            rows = image.rows(),
            cols = image.cols(),
            galaxies = image.galaxies().len(),
            empty_rows = image.empty_rows().len(),
            empty_cols = image.empty_cols().len(),
            "parsed observatory image"
        );
        Ok(Self(image))
    }
}

/*
Rows and columns without galaxies expand: each costs the expansion factor to step into. Part 1
expands by 2 and part 2 by 1,000,000 unless the settings choose otherwise.

Find the sum of lengths of shortest paths between pairs of galaxies.
*/

impl Observatory {
    /// Sum the distances between every pair of galaxies with the method chosen by the settings.
    ///
    /// With a worker count set, the sum runs on a pool of that many threads.
    fn sum_distances(&self, expansion: u64, settings: &Settings) -> DynamicResult<u64> {
        let sum = || match settings.distance {
            DistanceMethod::Search => self.0.sum_galaxy_distances(expansion),
            DistanceMethod::ClosedForm => self.0.sum_expanded_manhattan(expansion),
        };

        let total = match settings.workers {
            Some(workers) => ThreadPoolBuilder::new()
                .num_threads(workers.get())
                .build()?
                .install(sum)?,
            None => sum()?,
        };
        Ok(total)
    }
}

struct Day11;

impl Solution<PartOne> for Day11 {
    type Input = Observatory;
    type Context = Settings;
    type Output = u64;

    fn solve(input: &Self::Input, context: &Settings) -> DynamicResult<Self::Output> {
        input.sum_distances(context.part_one_expansion, context)
    }
}

impl Solution<PartTwo> for Day11 {
    type Input = Observatory;
    type Context = Settings;
    type Output = u64;

    fn solve(input: &Self::Input, context: &Settings) -> DynamicResult<Self::Output> {
        input.sum_distances(context.part_two_expansion, context)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    const EXAMPLE_INPUT: &str = r"...#......
.......#..
#.........
..........
......#...
.#........
.........#
..........
.......#..
#...#.....
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Observatory::parse(EXAMPLE_INPUT)?;
        let result = <Day11 as Solution<PartOne>>::solve(&parsed, &Settings::default())?;
        assert_eq!(result, 374);
        Ok(())
    }

    #[test]
    fn part_two_solves_two_galaxy_cases() -> DynamicResult<()> {
        let settings = Settings::default();

        {
            let horizontal_input = "#.#";
            let parsed = Observatory::parse(horizontal_input)?;
            let result = <Day11 as Solution<PartTwo>>::solve(&parsed, &settings)?;
            assert_eq!(result, 1_000_001, "failed horizontal case");
        };

        {
            let vertical_input = "#\n.\n.\n#";
            let parsed = Observatory::parse(vertical_input)?;
            let result = <Day11 as Solution<PartTwo>>::solve(&parsed, &settings)?;
            assert_eq!(result, 2_000_001, "failed vertical case");
        };

        {
            let combined_input = "#....\n.....\n....#";
            let parsed = Observatory::parse(combined_input)?;
            let result = <Day11 as Solution<PartTwo>>::solve(&parsed, &settings)?;
            assert_eq!(result, 4_000_002, "failed combined axes case");
        };

        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Observatory::parse(EXAMPLE_INPUT)?;
        let result = <Day11 as Solution<PartTwo>>::solve(&parsed, &Settings::default())?;
        assert_eq!(result, 82_000_210);
        Ok(())
    }

    #[test]
    fn methods_and_pools_agree() -> DynamicResult<()> {
        let parsed = Observatory::parse(EXAMPLE_INPUT)?;
        for distance in [DistanceMethod::Search, DistanceMethod::ClosedForm] {
            for workers in [None, NonZeroUsize::new(1), NonZeroUsize::new(3)] {
                let settings = Settings {
                    distance,
                    workers,
                    part_one_expansion: 10,
                    part_two_expansion: 100,
                    ..Settings::default()
                };
                assert_eq!(
                    <Day11 as Solution<PartOne>>::solve(&parsed, &settings)?,
                    1030
                );
                assert_eq!(
                    <Day11 as Solution<PartTwo>>::solve(&parsed, &settings)?,
                    8410
                );
            }
        }
        Ok(())
    }

    #[test]
    fn rejects_zero_expansion() -> DynamicResult<()> {
        let parsed = Observatory::parse(EXAMPLE_INPUT)?;
        let settings = Settings {
            part_one_expansion: 0,
            ..Settings::default()
        };
        assert!(<Day11 as Solution<PartOne>>::solve(&parsed, &settings).is_err());
        Ok(())
    }
}

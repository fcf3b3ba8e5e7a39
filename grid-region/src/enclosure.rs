//! Classifying the cells of a pipe grid as enclosed by a loop or not.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use crate::pipe_grid::PipeGrid;
use crate::shape::{Direction, Position, Shape};
use crate::tracer::PipeLoop;

/// The algorithm used to find the cells enclosed by a loop.
///
/// Both give the same count for a well formed loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnclosureStrategy {
    /// Seed from cells on the inner side of the loop, then flood fill.
    CornerCasting,
    /// Scan each row, tracking the parity of loop crossings.
    #[default]
    ScanlineParity,
}

/// Count the cells enclosed by the loop, with the chosen strategy.
#[must_use]
pub fn count_enclosed(
    grid: &PipeGrid,
    pipe_loop: &PipeLoop,
    strategy: EnclosureStrategy,
) -> usize {
    let count = match strategy {
        EnclosureStrategy::CornerCasting => enclosed_cells(grid, pipe_loop).len(),
        EnclosureStrategy::ScanlineParity => count_enclosed_by_scanline(grid, pipe_loop),
    };
    debug!(?strategy, count, "counted enclosed cells");
    count
}

/// Find the set of cells enclosed by the loop.
///
/// Walking the loop, the enclosed side is to the right for a clockwise loop and to the left
/// otherwise. Any cell that is not on the loop and lies on the enclosed side of a step, or
/// diagonally in the concave side of a bend turning toward the enclosed side, seeds a flood fill.
/// The fill spreads to neighbors in the four directions and stops at the loop.
#[must_use]
pub fn enclosed_cells(grid: &PipeGrid, pipe_loop: &PipeLoop) -> HashSet<Position> {
    let inward: fn(Direction) -> Direction = if pipe_loop.is_clockwise() {
        Direction::turn_right
    } else {
        Direction::turn_left
    };

    let not_on_loop = |position: &Position| !pipe_loop.contains(*position);

    let mut seeds = Vec::new();
    let cells = pipe_loop.cells();
    for (index, cell) in cells.iter().enumerate() {
        let position = cell.position;
        let previous = cells[(index + cells.len() - 1) % cells.len()].position;
        let next = cells[(index + 1) % cells.len()].position;
        let (Some(arrive), Some(leave)) =
            (previous.direction_to(position), position.direction_to(next))
        else {
            continue;
        };

        seeds.extend(
            [inward(arrive), inward(leave)]
                .into_iter()
                .filter_map(|side| grid.neighbor(position, side))
                .filter(not_on_loop),
        );

        // a bend toward the enclosed side has its concave diagonal enclosed
        if leave == inward(arrive)
            && let Some(diagonal) = grid
                .neighbor(position, arrive.opposite())
                .and_then(|beside| grid.neighbor(beside, leave))
            && not_on_loop(&diagonal)
        {
            seeds.push(diagonal);
        }
    }
    trace!(seeds = seeds.len(), "seeded enclosed cells");

    let mut enclosed = HashSet::new();
    let mut to_visit: VecDeque<_> = seeds.into();
    while let Some(position) = to_visit.pop_front() {
        if !enclosed.insert(position) {
            continue;
        }
        to_visit.extend(
            Direction::ALL
                .into_iter()
                .filter_map(|direction| grid.neighbor(position, direction))
                .filter(|neighbor| not_on_loop(neighbor) && !enclosed.contains(neighbor)),
        );
    }

    enclosed
}

/// Count the cells enclosed by the loop by scanning across each row.
///
/// A row is only scanned from the loop's leftmost cell on the row up to its rightmost cell; rows
/// the loop does not touch enclose nothing. Scanning left to right, the loop is crossed at a
/// vertical pipe, or at a horizontal run of pipe whose end bends go opposite ways vertically
/// (`L-7` or `F-J`). A cell off the loop, ground or junk pipe, is enclosed when the loop has been
/// crossed an odd number of times before it, the same as a ray cast from it to the right crossing
/// the loop an odd number of times.
#[must_use]
pub fn count_enclosed_by_scanline(grid: &PipeGrid, pipe_loop: &PipeLoop) -> usize {
    let mut enclosed_count = 0;

    for row in 0..grid.rows() {
        let mut loop_cols =
            (0..grid.cols()).filter(|&col| pipe_loop.contains(Position::new(row, col)));
        let Some(leftmost) = loop_cols.next() else {
            continue;
        };
        let rightmost = loop_cols.last().unwrap_or(leftmost);

        // track the state of scanning through enclosed space
        let mut enclosed_state = false;
        // track the bend that started a horizontal run of pipe
        let mut run_start_shape = None;
        for col in leftmost..rightmost {
            let position = Position::new(row, col);

            if pipe_loop.contains(position) {
                let shape = grid.shape(position);
                match shape {
                    Shape::NorthSouth => enclosed_state = !enclosed_state,
                    Shape::NorthEast | Shape::SouthEast => run_start_shape = Some(shape),
                    Shape::NorthWest | Shape::SouthWest => {
                        // the loop is crossed if the start and end bends of the run have
                        // opposing vertical connections
                        if let Some(start_shape) = run_start_shape.take()
                            && shape.connects_to(Direction::North)
                                != start_shape.connects_to(Direction::North)
                        {
                            enclosed_state = !enclosed_state;
                        }
                    }
                    _ => {}
                }
            } else if enclosed_state {
                enclosed_count += 1;
            }
        }
    }

    enclosed_count
}

/// Render the grid showing only the loop's pipes, with enclosed cells marked `I` and all other
/// cells as `.`.
#[must_use]
pub fn render_loop(
    grid: &PipeGrid,
    pipe_loop: &PipeLoop,
    enclosed: Option<&HashSet<Position>>,
) -> String {
    let mut rendered = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let position = Position::new(row, col);
            let character = if pipe_loop.contains(position) {
                char::from(grid.shape(position))
            } else if enclosed.is_some_and(|cells| cells.contains(&position)) {
                'I'
            } else {
                '.'
            };
            rendered.push(character);
        }
        rendered.push('\n');
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::trace_loop;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn count_both(input: &str) -> Result<(usize, usize), Box<dyn std::error::Error>> {
        let grid: PipeGrid = input.parse()?;
        let pipe_loop = trace_loop(&grid)?;
        Ok((
            count_enclosed(&grid, &pipe_loop, EnclosureStrategy::CornerCasting),
            count_enclosed(&grid, &pipe_loop, EnclosureStrategy::ScanlineParity),
        ))
    }

    #[test]
    fn square_loop_encloses_one_cell() -> TestResult {
        let input = ".....\n.S-7.\n.|.|.\n.L-J.\n.....";
        assert_eq!(count_both(input)?, (1, 1));

        let grid: PipeGrid = input.parse()?;
        let pipe_loop = trace_loop(&grid)?;
        assert_eq!(
            enclosed_cells(&grid, &pipe_loop),
            HashSet::from([Position::new(2, 2)])
        );
        Ok(())
    }

    #[test]
    fn open_channel_example_encloses_four() -> TestResult {
        let input = r"...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
";
        assert_eq!(count_both(input)?, (4, 4));
        Ok(())
    }

    #[test]
    fn squeezed_channel_example_encloses_four() -> TestResult {
        let input = r"..........
.S------7.
.|F----7|.
.||....||.
.||....||.
.|L-7F-J|.
.|..||..|.
.L--JL--J.
..........
";
        assert_eq!(count_both(input)?, (4, 4));
        Ok(())
    }

    #[test]
    fn larger_example_encloses_eight() -> TestResult {
        let input = r".F----7F7F7F7F-7....
.|F--7||||||||FJ....
.||.FJ||||||||L7....
FJL7L7LJLJ||LJ.L-7..
L--J.L7...LJS7F-7L7.
....F-J..F7FJ|L7L7L7
....L7.F7||L7|.L7L7|
.....|FJLJ|FJ|F7|.LJ
....FJL-7.||.||||...
....L---J.LJ.LJLJ...
";
        assert_eq!(count_both(input)?, (8, 8));
        Ok(())
    }

    #[test]
    fn junk_example_encloses_ten() -> TestResult {
        let input = r"FF7FSF7F7F7F7F7F---7
L|LJ||||||||||||F--J
FL-7LJLJ||||||LJL-77
F--JF--7||LJLJ7F7FJ-
L---JF-JLJ.||-FJLJJ7
|F|F-JF---7F7-L7L|7|
|FFJF7L7F-JF7|JL---7
7-L-JL7||F7|L7F-7F7|
L.L7LFJ|||||FJL7||LJ
L7JLJL-JLJLJL--JLJ.L
";
        assert_eq!(count_both(input)?, (10, 10));
        Ok(())
    }

    #[test]
    fn rows_off_the_loop_enclose_nothing() -> TestResult {
        let grid: PipeGrid = "...\n...\nS7.\nLJ.\n...".parse()?;
        let pipe_loop = trace_loop(&grid)?;
        assert_eq!(count_enclosed_by_scanline(&grid, &pipe_loop), 0);
        assert!(enclosed_cells(&grid, &pipe_loop).is_empty());
        Ok(())
    }

    #[test]
    fn classification_is_repeatable() -> TestResult {
        let grid: PipeGrid = ".....\n.S-7.\n.|.|.\n.L-J.\n.....".parse()?;
        let pipe_loop = trace_loop(&grid)?;
        for strategy in [
            EnclosureStrategy::CornerCasting,
            EnclosureStrategy::ScanlineParity,
        ] {
            let first = count_enclosed(&grid, &pipe_loop, strategy);
            let second = count_enclosed(&grid, &pipe_loop, strategy);
            assert_eq!(first, second);
        }
        Ok(())
    }

    #[test]
    fn renders_loop_and_enclosed_cells() -> TestResult {
        let grid: PipeGrid = "-L|F7\n7S-7|\nL|7||\n-L-J|\nL|-JF".parse()?;
        let pipe_loop = trace_loop(&grid)?;
        let enclosed = enclosed_cells(&grid, &pipe_loop);
        assert_eq!(
            render_loop(&grid, &pipe_loop, Some(&enclosed)),
            ".....\n.F-7.\n.|I|.\n.L-J.\n.....\n"
        );
        Ok(())
    }
}

//! Tracing the closed loop of pipes that passes through the start.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::pipe_grid::PipeGrid;
use crate::shape::{Cell, Position};

/// An error tracing a pipe loop.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LoopError {
    #[error("pipe path dead ends at {at} after {steps} steps without returning to the start")]
    DeadEnd { at: Position, steps: usize },

    #[error("no pipe loop closed within {limit} steps")]
    Unclosed { limit: usize },
}

/// A closed loop of connected pipe cells, beginning at the start.
#[derive(Debug, Clone)]
pub struct PipeLoop {
    /// The cells in the order they're traveled, the start first.
    cells: Vec<Cell>,
    /// The positions of the cells for membership checks.
    members: HashSet<Position>,
}

impl PipeLoop {
    /// The number of cells in the loop.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A traced loop always has cells, this exists for completeness with [`PipeLoop::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cells in travel order, starting at the start. The last cell connects back to the
    /// first.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Check if a position is part of the loop.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.members.contains(&position)
    }

    /// The number of steps along the loop to reach the cell farthest from the start.
    ///
    /// Loops on a square grid always have an even length, so this is exactly half the length.
    #[must_use]
    pub fn farthest_steps(&self) -> usize {
        self.cells.len() / 2
    }

    /// Iterate each cell of the loop paired with the cell traveled to next, wrapping around from
    /// the last cell to the start.
    pub fn steps(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        self.cells
            .iter()
            .copied()
            .zip(self.cells.iter().copied().cycle().skip(1))
    }

    /// Check if the loop travels clockwise on a grid drawn with row 0 at the top.
    ///
    /// Found from the sign of the loop's area by the shoelace formula.
    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        let (forward, backward) =
            self.steps()
                .fold((0u128, 0u128), |(forward, backward), (from, to)| {
                    let (from, to) = (from.position, to.position);
                    (
                        forward + from.col as u128 * to.row as u128,
                        backward + to.col as u128 * from.row as u128,
                    )
                });
        forward > backward
    }
}

/// Trace the loop of pipes through the grid's start.
///
/// From the start, each step follows the current pipe's connections (in the shape's direction
/// order) to a neighbor that connects back and has not been visited yet. The loop closes when the
/// start is reached again after at least 3 cells.
///
/// # Errors
///
/// - [`LoopError::DeadEnd`] when the path has nowhere left to go before closing.
/// - [`LoopError::Unclosed`] when more steps are taken than the grid has cells. Cells are never
///   revisited, so a path runs out of unvisited neighbors and dead ends before reaching this cap;
///   the cap only bounds the walk should that ever stop holding.
pub fn trace_loop(grid: &PipeGrid) -> Result<PipeLoop, LoopError> {
    let start = grid.start();
    let limit = grid.rows() * grid.cols();

    let mut cells = vec![grid.cell(start)];
    let mut members = HashSet::from([start]);
    let mut current = start;

    while cells.len() <= limit {
        let mut next_position = None;
        for (_, neighbor) in grid.fitting_neighbors(current) {
            // need at least three cells to form a loop
            if neighbor == start && cells.len() >= 3 {
                debug!(length = cells.len(), "traced pipe loop");
                return Ok(PipeLoop { cells, members });
            }
            if !members.contains(&neighbor) {
                // assume only one path continues on; take the first
                next_position = Some(neighbor);
                break;
            }
        }

        let next = next_position.ok_or(LoopError::DeadEnd {
            at: current,
            steps: cells.len() - 1,
        })?;
        trace!(%next, "loop step");
        members.insert(next);
        cells.push(grid.cell(next));
        current = next;
    }

    Err(LoopError::Unclosed { limit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe_grid::PipeGridError;
    use crate::shape::Shape;

    const SQUARE_LOOP: &str = r".....
.S-7.
.|.|.
.L-J.
.....
";

    const JUNK_SQUARE_LOOP: &str = r"-L|F7
7S-7|
L|7||
-L-J|
L|-JF
";

    const COMPLEX_LOOP: &str = r"7-F7-
.FJ|7
SJLL7
|F--J
LJ.LJ
";

    #[test]
    fn traces_square_loop() -> Result<(), Box<dyn std::error::Error>> {
        let grid: PipeGrid = SQUARE_LOOP.parse()?;
        let pipe_loop = trace_loop(&grid)?;

        assert_eq!(pipe_loop.len(), 8);
        assert_eq!(pipe_loop.farthest_steps(), 4);
        assert_eq!(
            pipe_loop.cells()[0],
            Cell {
                position: Position::new(1, 1),
                shape: Shape::SouthEast
            }
        );
        // the first connection of `F` is south
        assert_eq!(pipe_loop.cells()[1].position, Position::new(2, 1));
        assert!(!pipe_loop.contains(Position::new(2, 2)));
        Ok(())
    }

    #[test]
    fn junk_pipes_are_not_part_of_loop() -> Result<(), Box<dyn std::error::Error>> {
        let grid: PipeGrid = JUNK_SQUARE_LOOP.parse()?;
        let pipe_loop = trace_loop(&grid)?;
        assert_eq!(pipe_loop.farthest_steps(), 4);
        assert!(!pipe_loop.contains(Position::new(0, 0)));
        Ok(())
    }

    #[test]
    fn traces_complex_loop() -> Result<(), Box<dyn std::error::Error>> {
        let grid: PipeGrid = COMPLEX_LOOP.parse()?;
        let pipe_loop = trace_loop(&grid)?;
        assert_eq!(pipe_loop.len(), 16);
        assert_eq!(pipe_loop.farthest_steps(), 8);
        Ok(())
    }

    #[test]
    fn loop_steps_are_adjacent_and_connected() -> Result<(), Box<dyn std::error::Error>> {
        let grid: PipeGrid = COMPLEX_LOOP.parse()?;
        let pipe_loop = trace_loop(&grid)?;

        for (from, to) in pipe_loop.steps() {
            let direction = from
                .position
                .direction_to(to.position)
                .ok_or("loop cells should be adjacent")?;
            assert!(from.shape.connects_to(direction));
            assert!(to.shape.connects_to(direction.opposite()));
        }

        let unique: HashSet<_> = pipe_loop.cells().iter().collect();
        assert_eq!(unique.len(), pipe_loop.len());
        Ok(())
    }

    #[test]
    fn winding_follows_travel_direction() -> Result<(), Box<dyn std::error::Error>> {
        // `F` leaves south first, down the left side, so the loop runs counterclockwise
        let grid: PipeGrid = SQUARE_LOOP.parse()?;
        let pipe_loop = trace_loop(&grid)?;
        assert!(!pipe_loop.is_clockwise());

        // `7` leaves south first, down the right side, so the loop runs clockwise
        let grid: PipeGrid = ".....\n.F-S.\n.|.|.\n.L-J.\n.....".parse()?;
        let pipe_loop = trace_loop(&grid)?;
        assert!(pipe_loop.is_clockwise());
        Ok(())
    }

    #[test]
    fn straight_pipe_dead_ends_before_cap() -> Result<(), PipeGridError> {
        // the start fits `|` but the pipes above and below lead nowhere
        let grid: PipeGrid = "|\nS\n|".parse()?;
        let result = trace_loop(&grid);
        assert!(matches!(
            result,
            Err(LoopError::DeadEnd { at, steps: 1 }) if at == Position::new(0, 0)
        ));
        Ok(())
    }

    #[test]
    fn broken_loop_dead_ends() -> Result<(), PipeGridError> {
        // the bottom right bend is missing so the path stops
        let grid: PipeGrid = ".....\n.S-7.\n.|.|.\n.L-..\n.....".parse()?;
        let result = trace_loop(&grid);
        assert!(matches!(result, Err(LoopError::DeadEnd { .. })));
        Ok(())
    }
}

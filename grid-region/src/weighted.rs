//! Shortest paths across a grid where expanded rows and columns cost more to enter.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use nalgebra::DMatrix;
use rayon::prelude::*;
use tracing::debug;

use crate::checked_sum::CheckedSum;
use crate::shape::{Direction, Position};

/// An error finding weighted distances.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DistanceError {
    #[error("expansion factor must be at least 1")]
    InvalidExpansion,

    #[error("position {position} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        position: Position,
        rows: usize,
        cols: usize,
    },

    #[error("no path from {from} to {to}")]
    Unreachable { from: Position, to: Position },

    #[error("distance overflowed")]
    Overflow,
}

/// A grid where a cell in an expanded row or column costs the expansion factor, and any other
/// cell costs 1.
///
/// A cell in both an expanded row and an expanded column still costs the factor once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedGrid {
    expanded_rows: Vec<bool>,
    expanded_cols: Vec<bool>,
    expansion: u64,
}

/// An entry in the search frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    /// The cost so far plus the lower bound of the cost remaining.
    estimate: u64,
    cost: u64,
    position: Position,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // flip estimate comparison for min-heap on it
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| self.position.cmp(&other.position))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn to_cost(value: usize) -> Result<u64, DistanceError> {
    u64::try_from(value).map_err(|_| DistanceError::Overflow)
}

impl WeightedGrid {
    /// Create a grid with the rows and columns flagged as expanded.
    ///
    /// The grid's size is the number of row flags by the number of column flags.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::InvalidExpansion`] if the expansion factor is 0.
    pub fn new(
        expanded_rows: Vec<bool>,
        expanded_cols: Vec<bool>,
        expansion: u64,
    ) -> Result<Self, DistanceError> {
        if expansion == 0 {
            return Err(DistanceError::InvalidExpansion);
        }
        Ok(Self {
            expanded_rows,
            expanded_cols,
            expansion,
        })
    }

    /// The number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.expanded_rows.len()
    }

    /// The number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.expanded_cols.len()
    }

    /// The weight of an expanded cell.
    #[must_use]
    pub fn expansion(&self) -> u64 {
        self.expansion
    }

    /// The weight of the cell at a position.
    #[must_use]
    pub fn cost(&self, position: Position) -> u64 {
        let expanded = self.expanded_rows.get(position.row).copied().unwrap_or(false)
            || self.expanded_cols.get(position.col).copied().unwrap_or(false);
        if expanded { self.expansion } else { 1 }
    }

    /// The cost a path already carries at its first cell: that cell's cost, less the 1 every
    /// path is reduced by.
    fn start_cost(&self, position: Position) -> u64 {
        self.cost(position) - 1
    }

    fn check_bounds(&self, position: Position) -> Result<(), DistanceError> {
        if position.row < self.rows() && position.col < self.cols() {
            Ok(())
        } else {
            Err(DistanceError::OutOfBounds {
                position,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| position.step(direction, self.rows(), self.cols()))
    }

    /// Find the cost of the cheapest path between two positions.
    ///
    /// Paths move between neighbors in the four directions, and the cost of a path is the sum of
    /// the costs of every cell on it, both ends included, less 1. Counting both ends makes the
    /// cost the same in either direction. It's an A* search, using the Manhattan
    /// distance as a lower bound since every step costs at least 1.
    ///
    /// # Errors
    ///
    /// - [`DistanceError::OutOfBounds`] if either position is outside the grid.
    /// - [`DistanceError::Unreachable`] if no path exists.
    /// - [`DistanceError::Overflow`] if a path cost overflows.
    pub fn distance(&self, from: Position, to: Position) -> Result<u64, DistanceError> {
        self.check_bounds(from)?;
        self.check_bounds(to)?;

        let start_cost = self.start_cost(from);
        let mut costs = HashMap::from([(from, start_cost)]);
        let mut heap = BinaryHeap::from([Frontier {
            estimate: start_cost
                .checked_add(to_cost(from.manhattan_distance(to))?)
                .ok_or(DistanceError::Overflow)?,
            cost: start_cost,
            position: from,
        }]);

        while let Some(Frontier { cost, position, .. }) = heap.pop() {
            if position == to {
                return Ok(cost);
            }

            if costs
                .get(&position)
                .is_some_and(|&existing_cost| cost > existing_cost)
            {
                continue;
            }

            for next in self.neighbors(position) {
                let next_cost = cost
                    .checked_add(self.cost(next))
                    .ok_or(DistanceError::Overflow)?;

                if costs
                    .get(&next)
                    .is_none_or(|&existing_cost| next_cost < existing_cost)
                {
                    costs.insert(next, next_cost);
                    let estimate = next_cost
                        .checked_add(to_cost(next.manhattan_distance(to))?)
                        .ok_or(DistanceError::Overflow)?;
                    heap.push(Frontier {
                        estimate,
                        cost: next_cost,
                        position: next,
                    });
                }
            }
        }

        Err(DistanceError::Unreachable { from, to })
    }

    /// Find the cost of the cheapest path from a source to every cell, with Dijkstra's search.
    ///
    /// Path costs are counted the same as [`WeightedGrid::distance`]. Cells that cannot be reached
    /// hold `None`.
    ///
    /// # Errors
    ///
    /// - [`DistanceError::OutOfBounds`] if the source is outside the grid.
    /// - [`DistanceError::Overflow`] if a path cost overflows.
    pub fn distances_from(&self, source: Position) -> Result<DMatrix<Option<u64>>, DistanceError> {
        self.check_bounds(source)?;

        let mut costs = DMatrix::from_element(self.rows(), self.cols(), None);
        let start_cost = self.start_cost(source);
        costs[(source.row, source.col)] = Some(start_cost);
        let mut heap = BinaryHeap::from([Frontier {
            estimate: start_cost,
            cost: start_cost,
            position: source,
        }]);

        while let Some(Frontier { cost, position, .. }) = heap.pop() {
            if costs[(position.row, position.col)].is_some_and(|existing_cost| cost > existing_cost)
            {
                continue;
            }

            for next in self.neighbors(position) {
                let next_cost = cost
                    .checked_add(self.cost(next))
                    .ok_or(DistanceError::Overflow)?;

                let existing = &mut costs[(next.row, next.col)];
                if existing.is_none_or(|existing_cost| next_cost < existing_cost) {
                    *existing = Some(next_cost);
                    heap.push(Frontier {
                        estimate: next_cost,
                        cost: next_cost,
                        position: next,
                    });
                }
            }
        }

        Ok(costs)
    }

    /// Sum the cheapest path costs between every unordered pair of points, once per pair.
    ///
    /// Work is split by the first point of each pair: each point runs one search to all cells,
    /// then adds up the costs to the points after it. The searches run on the current rayon
    /// thread pool.
    ///
    /// # Errors
    ///
    /// - [`DistanceError::OutOfBounds`] if any point is outside the grid.
    /// - [`DistanceError::Unreachable`] if any pair is not connected.
    /// - [`DistanceError::Overflow`] if the total overflows.
    pub fn sum_pairwise_distances(&self, points: &[Position]) -> Result<u64, DistanceError> {
        for &point in points {
            self.check_bounds(point)?;
        }
        debug!(
            points = points.len(),
            threads = rayon::current_num_threads(),
            expansion = self.expansion,
            "summing pairwise distances"
        );

        let partial_sums = (0..points.len())
            .into_par_iter()
            .map(|index| -> Result<u64, DistanceError> {
                let source = points[index];
                let costs = self.distances_from(source)?;
                points[index + 1..]
                    .iter()
                    .map(|&target| {
                        costs[(target.row, target.col)].ok_or(DistanceError::Unreachable {
                            from: source,
                            to: target,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?
                    .into_iter()
                    .checked_sum()
                    .ok_or(DistanceError::Overflow)
            })
            .collect::<Result<Vec<_>, _>>()?;

        partial_sums
            .into_iter()
            .checked_sum()
            .ok_or(DistanceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(length: usize, expanded: &[usize]) -> Vec<bool> {
        (0..length).map(|index| expanded.contains(&index)).collect()
    }

    #[test]
    fn unexpanded_distance_is_manhattan() -> Result<(), DistanceError> {
        let grid = WeightedGrid::new(vec![false; 6], vec![false; 7], 5)?;
        let a = Position::new(0, 6);
        let b = Position::new(5, 1);
        assert_eq!(grid.distance(a, b)?, 10);
        assert_eq!(grid.distance(a, a)?, 0);
        Ok(())
    }

    #[test]
    fn expanded_row_costs_expansion() -> Result<(), DistanceError> {
        // a vertical path must enter row 1 once
        let grid = WeightedGrid::new(flags(3, &[1]), vec![false; 1], 10)?;
        assert_eq!(grid.distance(Position::new(0, 0), Position::new(2, 0))?, 11);
        Ok(())
    }

    #[test]
    fn crossing_expanded_row_and_column_costs_both() -> Result<(), DistanceError> {
        let grid = WeightedGrid::new(flags(3, &[1]), flags(3, &[1]), 2)?;
        let a = Position::new(0, 0);
        let b = Position::new(2, 2);
        // 4 steps, 2 of which enter an expanded cell
        assert_eq!(grid.distance(a, b)?, 6);
        assert_eq!(grid.distance(b, a)?, 6);
        Ok(())
    }

    #[test]
    fn moving_along_expanded_row_costs_each_cell() -> Result<(), DistanceError> {
        // 4 cells of cost 3, less 1
        let grid = WeightedGrid::new(flags(1, &[0]), vec![false; 4], 3)?;
        assert_eq!(grid.distance(Position::new(0, 0), Position::new(0, 3))?, 11);
        assert_eq!(grid.distance(Position::new(0, 3), Position::new(0, 0))?, 11);
        Ok(())
    }

    #[test]
    fn expanded_endpoint_costs_the_same_both_ways() -> Result<(), DistanceError> {
        let grid = WeightedGrid::new(flags(2, &[0]), vec![false; 1], 1_000_000)?;
        let expanded = Position::new(0, 0);
        let plain = Position::new(1, 0);
        assert_eq!(grid.distance(expanded, plain)?, 1_000_000);
        assert_eq!(grid.distance(plain, expanded)?, 1_000_000);

        let from_expanded = grid.distances_from(expanded)?;
        let from_plain = grid.distances_from(plain)?;
        assert_eq!(from_expanded[(1, 0)], from_plain[(0, 0)]);
        Ok(())
    }

    #[test]
    fn single_source_matches_pair_search() -> Result<(), DistanceError> {
        let grid = WeightedGrid::new(flags(5, &[1, 3]), flags(6, &[2]), 4)?;
        let source = Position::new(4, 5);
        let costs = grid.distances_from(source)?;
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let target = Position::new(row, col);
                assert_eq!(costs[(row, col)], Some(grid.distance(source, target)?));
            }
        }
        Ok(())
    }

    #[test]
    fn sums_each_pair_once() -> Result<(), DistanceError> {
        let grid = WeightedGrid::new(vec![false; 3], vec![false; 3], 1)?;
        let points = [
            Position::new(0, 0),
            Position::new(0, 2),
            Position::new(2, 2),
        ];
        // 2 + 4 + 2
        assert_eq!(grid.sum_pairwise_distances(&points)?, 8);
        assert_eq!(grid.sum_pairwise_distances(&points[..1])?, 0);
        assert_eq!(grid.sum_pairwise_distances(&[])?, 0);
        Ok(())
    }

    #[test]
    fn zero_expansion_is_invalid() {
        assert_eq!(
            WeightedGrid::new(vec![false], vec![false], 0),
            Err(DistanceError::InvalidExpansion)
        );
    }

    #[test]
    fn outside_positions_are_errors() -> Result<(), DistanceError> {
        let grid = WeightedGrid::new(vec![false; 2], vec![false; 2], 1)?;
        let outside = Position::new(2, 0);
        assert_eq!(
            grid.distance(Position::new(0, 0), outside),
            Err(DistanceError::OutOfBounds {
                position: outside,
                rows: 2,
                cols: 2
            })
        );
        assert!(matches!(
            grid.sum_pairwise_distances(&[Position::new(0, 0), outside]),
            Err(DistanceError::OutOfBounds { .. })
        ));
        Ok(())
    }

    #[test]
    fn huge_expansion_overflows() -> Result<(), DistanceError> {
        let grid = WeightedGrid::new(vec![true; 3], vec![true; 1], u64::MAX)?;
        assert_eq!(
            grid.distance(Position::new(0, 0), Position::new(2, 0)),
            Err(DistanceError::Overflow)
        );
        Ok(())
    }
}

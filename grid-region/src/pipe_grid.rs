//! The grid of pipes, parsed from a character grid with one start marker.

use std::str::FromStr;

use nalgebra::DMatrix;
use tracing::debug;

use crate::InvalidRow;
use crate::shape::{Cell, Direction, Position, Shape, ShapeFromCharError};

/// An error building a [`PipeGrid`].
#[derive(thiserror::Error, Debug)]
pub enum PipeGridError {
    #[error(transparent)]
    InvalidRow(#[from] InvalidRow<ShapeFromCharError>),

    #[error("grid has no cells")]
    Empty,

    #[error("expected grid width to be {expected} across rows, but row {} has width {found}", .row_index.saturating_add(1))]
    UnequalWidth {
        row_index: usize,
        expected: usize,
        found: usize,
    },

    #[error("detected a second start after first (at {first}): {second}")]
    SecondStart { first: Position, second: Position },

    #[error("grid is missing a start")]
    MissingStart,

    #[error("no pipe shape fits the start at {0}")]
    NoFittingStartShape(Position),

    #[error("more than one pipe shape fits the start at {start}: {candidates:?}")]
    AmbiguousStartShape {
        start: Position,
        candidates: Vec<Shape>,
    },
}

/// A rectangular grid of pipe shapes.
///
/// The start marker is replaced by the pipe shape that fits its neighbors while building the
/// grid, so every cell on a loop through the start holds a real pipe.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeGrid {
    shapes: DMatrix<Shape>,
    start: Position,
}

impl PipeGrid {
    /// Build a grid from rows of shapes, resolving the shape of the start.
    ///
    /// # Errors
    ///
    /// The rows must be non-empty and of equal width, and contain exactly one [`Shape::Start`]
    /// which exactly one pipe shape fits.
    pub fn from_rows(rows: Vec<Vec<Shape>>) -> Result<Self, PipeGridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(PipeGridError::Empty);
        }

        let mut tracked_start = None;
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(PipeGridError::UnequalWidth {
                    row_index,
                    expected: width,
                    found: row.len(),
                });
            }

            for (col, shape) in row.iter().enumerate() {
                if *shape == Shape::Start {
                    let position = Position::new(row_index, col);
                    // expect only one start
                    if let Some(first) = tracked_start {
                        return Err(PipeGridError::SecondStart {
                            first,
                            second: position,
                        });
                    }
                    tracked_start = Some(position);
                }
            }
        }
        let start = tracked_start.ok_or(PipeGridError::MissingStart)?;

        let resolved = resolve_start_shape(&rows, start)?;
        debug!(%start, shape = %resolved, "resolved start shape");

        let shapes = DMatrix::from_row_iterator(
            height,
            width,
            rows.into_iter().flatten().map(|shape| {
                if shape == Shape::Start {
                    resolved
                } else {
                    shape
                }
            }),
        );

        Ok(Self { shapes, start })
    }

    /// The number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.shapes.nrows()
    }

    /// The number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.shapes.ncols()
    }

    /// The position of the start, which holds its resolved pipe shape.
    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    /// Get the shape at a position, treating positions outside the grid as ground.
    #[must_use]
    pub fn shape(&self, position: Position) -> Shape {
        self.shapes
            .get((position.row, position.col))
            .copied()
            .unwrap_or(Shape::Ground)
    }

    /// Get the cell at a position.
    #[must_use]
    pub fn cell(&self, position: Position) -> Cell {
        Cell {
            position,
            shape: self.shape(position),
        }
    }

    /// Step from a position in a direction, staying within the grid.
    #[must_use]
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        position.step(direction, self.rows(), self.cols())
    }

    /// Iterate the neighbors of a position that its shape connects to and that connect back.
    ///
    /// Neighbors are produced in the order of the shape's connecting directions.
    pub fn fitting_neighbors(
        &self,
        position: Position,
    ) -> impl Iterator<Item = (Direction, Position)> + '_ {
        self.shape(position)
            .connecting_directions()
            .into_iter()
            .flatten()
            .filter_map(move |direction| {
                let next = self.neighbor(position, direction)?;
                self.shape(next)
                    .connects_to(direction.opposite())
                    .then_some((direction, next))
            })
    }

    /// Iterate all cells row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.cols()).map(move |col| self.cell(Position::new(row, col)))
        })
    }
}

/// Work out which pipe shape the start must be, from which neighbors connect back to it.
fn resolve_start_shape(rows: &[Vec<Shape>], start: Position) -> Result<Shape, PipeGridError> {
    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);

    let connects_back = |direction: Direction| {
        start
            .step(direction, height, width)
            .is_some_and(|next| rows[next.row][next.col].connects_to(direction.opposite()))
    };

    let candidates: Vec<_> = Shape::PIPES
        .into_iter()
        .filter(|shape| {
            shape
                .connecting_directions()
                .is_some_and(|directions| directions.into_iter().all(&connects_back))
        })
        .collect();

    match candidates.len() {
        0 => Err(PipeGridError::NoFittingStartShape(start)),
        1 => Ok(candidates[0]),
        _ => Err(PipeGridError::AmbiguousStartShape { start, candidates }),
    }
}

impl FromStr for PipeGrid {
    type Err = PipeGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .enumerate()
            .map(|(row_index, line)| {
                Shape::parse_row(line).map_err(|source| InvalidRow { row_index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }
}

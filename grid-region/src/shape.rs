//! Directions, pipe shapes, and the positioned cells of a grid.

use std::fmt::{self, Display};

/*
Various characters are used for pipe shapes:

- `.` is ground, a cell clear of any pipe.
- `|` and `-` are straight pipes connecting north-south and east-west respectively.
- `L`, `J`, `7`, `F` are 90 degree bends connecting north-east, north-west, south-west, and
  south-east respectively.
- `S` marks the start, a pipe of a shape to be worked out from its neighbors.
*/

/// A cardinal direction. North faces toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Find the opposite direction to self.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Get the direction when turning left.
    #[must_use]
    pub fn turn_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }

    /// Get the direction when turning right.
    #[must_use]
    pub fn turn_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }
}

/// The shape held by a cell of a pipe grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shape {
    Ground,
    Start,
    NorthSouth,
    EastWest,
    NorthEast,
    NorthWest,
    SouthWest,
    SouthEast,
}

/// An error creating a [`Shape`] from a [`char`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ShapeFromCharError {
    #[error("character is invalid for a pipe shape: {0:?}")]
    InvalidChar(char),
}

impl TryFrom<char> for Shape {
    type Error = ShapeFromCharError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '.' => Ok(Self::Ground),
            'S' => Ok(Self::Start),
            '|' => Ok(Self::NorthSouth),
            '-' => Ok(Self::EastWest),
            'L' => Ok(Self::NorthEast),
            'J' => Ok(Self::NorthWest),
            '7' => Ok(Self::SouthWest),
            'F' => Ok(Self::SouthEast),
            _ => Err(ShapeFromCharError::InvalidChar(value)),
        }
    }
}

impl From<Shape> for char {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Ground => '.',
            Shape::Start => 'S',
            Shape::NorthSouth => '|',
            Shape::EastWest => '-',
            Shape::NorthEast => 'L',
            Shape::NorthWest => 'J',
            Shape::SouthWest => '7',
            Shape::SouthEast => 'F',
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

impl Shape {
    /// The pipe shapes, in the order they are tried when resolving the start's shape.
    pub const PIPES: [Self; 6] = [
        Self::NorthSouth,
        Self::EastWest,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Parse a line of characters into a row of shapes.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeFromCharError`] for the first character that is not a shape.
    pub fn parse_row(line: &str) -> Result<Vec<Self>, ShapeFromCharError> {
        line.chars().map(Self::try_from).collect()
    }

    /// Determine if the shape connects to a direction.
    ///
    /// Ground and an unresolved start connect to nothing.
    #[must_use]
    pub fn connects_to(self, direction: Direction) -> bool {
        self.connecting_directions()
            .is_some_and(|directions| directions.contains(&direction))
    }

    /// Get the directions this shape connects to. Either the shape is a pipe with 2 connections,
    /// or not a pipe so has `None` connections.
    #[must_use]
    pub fn connecting_directions(self) -> Option<[Direction; 2]> {
        match self {
            Self::NorthSouth => Some([Direction::North, Direction::South]),
            Self::EastWest => Some([Direction::East, Direction::West]),
            Self::NorthEast => Some([Direction::North, Direction::East]),
            Self::NorthWest => Some([Direction::North, Direction::West]),
            Self::SouthWest => Some([Direction::South, Direction::West]),
            Self::SouthEast => Some([Direction::South, Direction::East]),
            Self::Ground | Self::Start => None,
        }
    }

    /// Check if the shape is one of the pipes.
    #[must_use]
    pub fn is_pipe(self) -> bool {
        self.connecting_directions().is_some()
    }
}

/// A position in a grid, ordered by row then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row {}, col {})", self.row, self.col)
    }
}

impl Position {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step to the neighboring position in `direction`, within a grid of `rows` by `cols`.
    /// Returns `None` if the step would leave the grid.
    #[must_use]
    pub fn step(self, direction: Direction, rows: usize, cols: usize) -> Option<Self> {
        let next = match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self { row, ..self }),
            Direction::East => self.col.checked_add(1).map(|col| Self { col, ..self }),
            Direction::South => self.row.checked_add(1).map(|row| Self { row, ..self }),
            Direction::West => self.col.checked_sub(1).map(|col| Self { col, ..self }),
        }?;
        (next.row < rows && next.col < cols).then_some(next)
    }

    /// The direction to step from self to reach an adjacent position, or `None` if the
    /// positions are not adjacent.
    #[must_use]
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        match (
            other.row.checked_sub(self.row),
            self.row.checked_sub(other.row),
            other.col.checked_sub(self.col),
            self.col.checked_sub(other.col),
        ) {
            (_, Some(1), Some(0), _) => Some(Direction::North),
            (Some(0), _, Some(1), _) => Some(Direction::East),
            (Some(1), _, Some(0), _) => Some(Direction::South),
            (Some(0), _, _, Some(1)) => Some(Direction::West),
            _ => None,
        }
    }

    /// Calculate the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// A cell of a grid: its position and the shape at that position.
///
/// Equality, ordering, and hashing compare the position first, so cells of one grid can key sets
/// and maps by where they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub position: Position,
    pub shape: Shape,
}

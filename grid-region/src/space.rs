//! An image of space with galaxies, whose galaxy-free rows and columns expand.

use std::collections::HashSet;
use std::str::FromStr;

use tracing::debug;

use crate::InvalidRow;
use crate::checked_sum::CheckedSum;
use crate::shape::Position;
use crate::weighted::{DistanceError, WeightedGrid};

/*
An image is formatted as a character grid. There are `.` for empty space and `#` to represent
galaxies.
*/

/// A character in an image is neither empty space nor a galaxy.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unexpected character in image: {0:?}")]
pub struct UnexpectedChar(pub char);

/// An error building a [`SpaceImage`].
#[derive(thiserror::Error, Debug)]
pub enum SpaceImageError {
    #[error(transparent)]
    InvalidRow(#[from] InvalidRow<UnexpectedChar>),

    #[error("image has no pixels")]
    Empty,

    #[error("expected image width to be {expected} across rows, but row {} has width {found}", .row_index.saturating_add(1))]
    UnequalWidth {
        row_index: usize,
        expected: usize,
        found: usize,
    },
}

/// An image of space, tracking the galaxies in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceImage {
    rows: usize,
    cols: usize,
    /// Positions of galaxies, in reading order.
    galaxies: Vec<Position>,
    /// Rows that do not contain galaxies, in ascending order.
    empty_rows: Vec<usize>,
    /// Columns that do not contain galaxies, in ascending order.
    empty_cols: Vec<usize>,
}

/// With a sorted slice of numbers, count how many lie strictly between two values.
fn count_between(sorted_numbers: &[usize], a: usize, b: usize) -> usize {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let below_high = sorted_numbers.partition_point(|&number| number < high);
    let up_to_low = sorted_numbers.partition_point(|&number| number <= low);
    below_high.saturating_sub(up_to_low)
}

impl SpaceImage {
    /// Parse a line of characters into a row of flags, `true` where there is a galaxy.
    ///
    /// # Errors
    ///
    /// Returns [`UnexpectedChar`] for the first character that is not `.` or `#`.
    pub fn parse_row(line: &str) -> Result<Vec<bool>, UnexpectedChar> {
        line.chars()
            .map(|c| match c {
                '#' => Ok(true),
                '.' => Ok(false),
                _ => Err(UnexpectedChar(c)),
            })
            .collect()
    }

    /// Build an image from rows of galaxy flags.
    ///
    /// # Errors
    ///
    /// The rows must be non-empty and of equal width.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, SpaceImageError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(SpaceImageError::Empty);
        }

        let mut galaxies = Vec::new();
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(SpaceImageError::UnequalWidth {
                    row_index,
                    expected: cols,
                    found: row.len(),
                });
            }
            galaxies.extend(
                row.iter()
                    .enumerate()
                    .filter(|&(_, &galaxy)| galaxy)
                    .map(|(col, _)| Position::new(row_index, col)),
            );
        }

        let (used_rows, used_cols) = galaxies.iter().fold(
            (HashSet::new(), HashSet::new()),
            |(mut acc_rows, mut acc_cols), position| {
                acc_rows.insert(position.row);
                acc_cols.insert(position.col);
                (acc_rows, acc_cols)
            },
        );
        let empty_rows = (0..rows.len()).filter(|row| !used_rows.contains(row)).collect();
        let empty_cols = (0..cols).filter(|col| !used_cols.contains(col)).collect();

        Ok(Self {
            rows: rows.len(),
            cols,
            galaxies,
            empty_rows,
            empty_cols,
        })
    }

    /// The number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Positions of galaxies, in reading order.
    #[must_use]
    pub fn galaxies(&self) -> &[Position] {
        &self.galaxies
    }

    /// Rows without galaxies, in ascending order.
    #[must_use]
    pub fn empty_rows(&self) -> &[usize] {
        &self.empty_rows
    }

    /// Columns without galaxies, in ascending order.
    #[must_use]
    pub fn empty_cols(&self) -> &[usize] {
        &self.empty_cols
    }

    /// Create a weighted grid of the image where rows and columns without galaxies are expanded
    /// by a factor.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::InvalidExpansion`] if the expansion factor is 0.
    pub fn weighted(&self, expansion: u64) -> Result<WeightedGrid, DistanceError> {
        let expanded_rows = (0..self.rows)
            .map(|row| self.empty_rows.binary_search(&row).is_ok())
            .collect();
        let expanded_cols = (0..self.cols)
            .map(|col| self.empty_cols.binary_search(&col).is_ok())
            .collect();
        WeightedGrid::new(expanded_rows, expanded_cols, expansion)
    }

    /// Sum the cheapest path lengths between every pair of galaxies by searching the expanded
    /// image.
    ///
    /// # Errors
    ///
    /// Any [`DistanceError`] from [`SpaceImage::weighted`] or
    /// [`WeightedGrid::sum_pairwise_distances`] is propagated.
    pub fn sum_galaxy_distances(&self, expansion: u64) -> Result<u64, DistanceError> {
        self.weighted(expansion)?
            .sum_pairwise_distances(&self.galaxies)
    }

    /// Calculate the cheapest path length between two positions without searching.
    ///
    /// The Manhattan distance is a lower bound, and a path must enter each expanded row and
    /// column between the positions at least once. Each of those adds `expansion - 1`.
    ///
    /// # Errors
    ///
    /// - [`DistanceError::InvalidExpansion`] if the expansion factor is 0.
    /// - [`DistanceError::Overflow`] if the distance overflows.
    pub fn expanded_manhattan(
        &self,
        a: Position,
        b: Position,
        expansion: u64,
    ) -> Result<u64, DistanceError> {
        let extra_per_crossing = expansion
            .checked_sub(1)
            .ok_or(DistanceError::InvalidExpansion)?;
        let crossings = count_between(&self.empty_rows, a.row, b.row)
            + count_between(&self.empty_cols, a.col, b.col);

        let manhattan =
            u64::try_from(a.manhattan_distance(b)).map_err(|_| DistanceError::Overflow)?;
        let crossings = u64::try_from(crossings).map_err(|_| DistanceError::Overflow)?;
        crossings
            .checked_mul(extra_per_crossing)
            .and_then(|extra| extra.checked_add(manhattan))
            .ok_or(DistanceError::Overflow)
    }

    /// Sum [`SpaceImage::expanded_manhattan`] over every pair of galaxies.
    ///
    /// # Errors
    ///
    /// - [`DistanceError::InvalidExpansion`] if the expansion factor is 0.
    /// - [`DistanceError::Overflow`] if the total overflows.
    pub fn sum_expanded_manhattan(&self, expansion: u64) -> Result<u64, DistanceError> {
        debug!(
            galaxies = self.galaxies.len(),
            expansion, "summing closed form galaxy distances"
        );
        let mut distances = Vec::new();
        // iterate unique pairs of galaxy positions
        for (index, a) in self.galaxies.iter().enumerate() {
            for b in &self.galaxies[index + 1..] {
                distances.push(self.expanded_manhattan(*a, *b, expansion)?);
            }
        }
        distances
            .into_iter()
            .checked_sum()
            .ok_or(DistanceError::Overflow)
    }
}

impl FromStr for SpaceImage {
    type Err = SpaceImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .enumerate()
            .map(|(row_index, line)| {
                Self::parse_row(line).map_err(|source| InvalidRow { row_index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const EXAMPLE_IMAGE: &str = r"...#......
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
    fn finds_galaxies_and_empty_lines() -> TestResult {
        let image: SpaceImage = EXAMPLE_IMAGE.parse()?;
        assert_eq!(image.galaxies().len(), 9);
        assert_eq!(image.galaxies()[0], Position::new(0, 3));
        assert_eq!(image.empty_rows(), &[3, 7]);
        assert_eq!(image.empty_cols(), &[2, 5, 8]);
        Ok(())
    }

    #[test]
    fn example_sums_by_search() -> TestResult {
        let image: SpaceImage = EXAMPLE_IMAGE.parse()?;
        assert_eq!(image.sum_galaxy_distances(2)?, 374);
        assert_eq!(image.sum_galaxy_distances(10)?, 1030);
        assert_eq!(image.sum_galaxy_distances(100)?, 8410);
        Ok(())
    }

    #[test]
    fn example_sums_by_closed_form() -> TestResult {
        let image: SpaceImage = EXAMPLE_IMAGE.parse()?;
        assert_eq!(image.sum_expanded_manhattan(2)?, 374);
        assert_eq!(image.sum_expanded_manhattan(10)?, 1030);
        assert_eq!(image.sum_expanded_manhattan(100)?, 8410);
        assert_eq!(image.sum_expanded_manhattan(1_000_000)?, 82_000_210);
        Ok(())
    }

    #[test]
    fn example_pair_distances() -> TestResult {
        let image: SpaceImage = EXAMPLE_IMAGE.parse()?;
        let grid = image.weighted(2)?;
        let galaxies = image.galaxies();
        // galaxies 5 and 9, 1 and 7, 3 and 6, 8 and 9 of the puzzle's numbering
        let pairs = [((4, 8), 9), ((0, 6), 15), ((2, 5), 17), ((7, 8), 5)];
        for ((a, b), expected) in pairs {
            assert_eq!(grid.distance(galaxies[a], galaxies[b])?, expected);
            assert_eq!(
                image.expanded_manhattan(galaxies[a], galaxies[b], 2)?,
                expected
            );
        }
        Ok(())
    }

    #[test]
    fn two_galaxy_cases() -> TestResult {
        for (input, expected) in [
            ("#.#", 1_000_001),
            ("#\n.\n.\n#", 2_000_001),
            ("#....\n.....\n....#", 4_000_002),
        ] {
            let image: SpaceImage = input.parse()?;
            assert_eq!(image.sum_expanded_manhattan(1_000_000)?, expected);
            assert_eq!(image.sum_galaxy_distances(1_000_000)?, expected);
        }
        Ok(())
    }

    #[test]
    fn counts_lines_strictly_between() {
        let sorted = [2, 5, 8];
        assert_eq!(count_between(&sorted, 0, 9), 3);
        assert_eq!(count_between(&sorted, 9, 0), 3);
        assert_eq!(count_between(&sorted, 3, 5), 0);
        assert_eq!(count_between(&sorted, 4, 4), 0);
    }

    #[test]
    fn unexpected_character_reports_row() {
        let result = "#.\n.x".parse::<SpaceImage>();
        match result {
            Err(SpaceImageError::InvalidRow(InvalidRow { row_index, source })) => {
                assert_eq!(row_index, 1);
                assert_eq!(source, UnexpectedChar('x'));
            }
            other => panic!("expected invalid row error, got {other:?}"),
        }
    }

    #[test]
    fn unequal_rows_are_an_error() {
        assert!(matches!(
            "#..\n#.".parse::<SpaceImage>(),
            Err(SpaceImageError::UnequalWidth { row_index: 1, .. })
        ));
    }

    #[test]
    fn zero_expansion_is_invalid() -> TestResult {
        let image: SpaceImage = "#.#".parse()?;
        assert_eq!(
            image.sum_expanded_manhattan(0),
            Err(DistanceError::InvalidExpansion)
        );
        assert_eq!(
            image.sum_galaxy_distances(0),
            Err(DistanceError::InvalidExpansion)
        );
        Ok(())
    }
}

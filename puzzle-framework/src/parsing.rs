//! Utility functions and errors for parsing input.

use thiserror::Error;

use crate::DynamicError;

/// A line in an input string caused a parsing error.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// The line index, zero based.
    /// This will be formatted to a one-based number for display.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    /// The zero based index of the line that failed.
    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line_index
    }
}

/// Parse lines with a closure, mapping any line's error with an [`InvalidLine`].
///
/// # Arguments
/// - `input` - The input string to parse.
/// - `parser` - A closure that takes a zero based line index and the line string, returning a
///   result.
///
/// # Errors
///
/// If parsing a line fails, an [`InvalidLine`] error is returned, sourcing the original error.
///
/// # Returns
///
/// An iterable of parsing results for each line.
pub fn parse_input_lines<T, E, F>(
    input: &str,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    E: Into<DynamicError>,
    F: FnMut(usize, &str) -> Result<T, E>,
{
    input.lines().enumerate().map(move |(line_index, line)| {
        parser(line_index, line).map_err(|error| InvalidLine {
            line_index,
            source: error.into(),
        })
    })
}

//! Framework of traits and utilities for puzzles that read text input and answer in two parts.
//!
//! # Quick Start
//!
//! 1. Define your input type and implement [`ParseData`]:
//!
//! ```
//! # use puzzle_framework::{DynamicResult, ParseData};
//! #
//! struct Rows(Vec<String>);
//!
//! impl ParseData for Rows {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         Ok(Self(input.lines().map(String::from).collect()))
//!     }
//! }
//! ```
//!
//! 2. Implement [`Solution`] for your part, choosing the context passed to every run:
//!
//! ```
//! # use puzzle_framework::{DynamicResult, ParseData, PartOne, Solution};
//! #
//! # struct Rows(Vec<String>);
//! # impl ParseData for Rows {
//! #     fn parse(input: &str) -> DynamicResult<Self> {
//! #         Ok(Self(input.lines().map(String::from).collect()))
//! #     }
//! # }
//! #
//! struct Height;
//!
//! impl Solution<PartOne> for Height {
//!     type Input = Rows;
//!     type Context = ();
//!     type Output = usize;
//!
//!     fn solve(input: &Self::Input, _context: &()) -> DynamicResult<usize> {
//!         Ok(input.0.len())
//!     }
//! }
//! ```
//!
//! 3. Use the [`runner`] module to execute your solution.
//!
//! # Example with a context
//!
//! A context carries run settings, like a factor chosen on the command line:
//!
//! ```
//! use puzzle_framework::{DynamicResult, PartTwo, Solution};
//!
//! struct Scale {
//!     factor: usize,
//! }
//!
//! struct ScaledWidth;
//!
//! impl Solution<PartTwo> for ScaledWidth {
//!     type Input = str;
//!     type Context = Scale;
//!     type Output = usize;
//!
//!     fn solve(input: &str, context: &Scale) -> DynamicResult<usize> {
//!         let width = input.lines().map(str::len).max().unwrap_or(0);
//!         Ok(width * context.factor)
//!     }
//! }
//! ```

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;

pub mod parsing;
pub mod runner;

mod private {
    /// A private sealed trait used to prevent external implementations of [`super::Part`].
    pub trait Sealed {}
}

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// An enum to identify a solution part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    One,
    Two,
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "Part 1"),
            Self::Two => write!(f, "Part 2"),
        }
    }
}

/// A marker trait used to identify a part for a solution.
///
/// Types implementing this trait are used as generic parameters to [`Solution<P>`] to indicate
/// which part the solution implements.
pub trait Part: private::Sealed {
    /// Get the related [`PartKind`] for this part.
    fn kind() -> PartKind;
}

/// Indicates a [`Solution`] implements part one.
pub struct PartOne;
impl private::Sealed for PartOne {}
impl Part for PartOne {
    fn kind() -> PartKind {
        PartKind::One
    }
}

/// Indicates a [`Solution`] implements part two.
pub struct PartTwo;
impl private::Sealed for PartTwo {}
impl Part for PartTwo {
    fn kind() -> PartKind {
        PartKind::Two
    }
}

/// A generic trait for a solution that solves for a [`Part`].
///
/// It is expected solutions implement for the marker structs [`PartOne`] or [`PartTwo`].
pub trait Solution<P: Part> {
    /// The input data type passed to the solution.
    ///
    /// For direct string input, set to `str`.
    type Input: ?Sized;

    /// Settings shared by every solution of a run, like factors or algorithm choices.
    ///
    /// Set to `()` when a solution takes no settings.
    type Context: ?Sized;

    /// The output data type returned from the solution.
    type Output: Display;

    /// Solve with the given input and context.
    ///
    /// # Errors
    ///
    /// A solution can encounter varying errors while solving, like invalid input or a logical
    /// error.
    /// It is returned as a dynamically dispatched error.
    fn solve(input: &Self::Input, context: &Self::Context) -> DynamicResult<Self::Output>;
}

/// A trait for data structures that are created by parsing string input.
///
/// Solutions can be passed parsed data constructed through this trait by setting
/// [`Solution::Input`] to the implementing struct.
pub trait ParseData {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically dispatched error.
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}

//! A grid region engine for character grids.
//!
//! Two kinds of grid are supported:
//!
//! - A [`PipeGrid`] of pipe [`Shape`]s with one start marker. [`trace_loop`] follows the closed
//!   loop of pipes through the start, and [`count_enclosed`] counts the cells the loop encloses
//!   using either [`EnclosureStrategy`].
//! - A [`WeightedGrid`] where some rows and columns are expanded, costing more to enter. Shortest
//!   path lengths between cells are found with [`WeightedGrid::distance`], and summed across all
//!   pairs of points with [`WeightedGrid::sum_pairwise_distances`] on a rayon pool.
//!
//! # Example
//!
//! ```
//! use grid_region::{EnclosureStrategy, PipeGrid, Shape, count_enclosed, trace_loop};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid: PipeGrid = ".....\n.S-7.\n.|.|.\n.L-J.\n.....".parse()?;
//! assert_eq!(grid.shape(grid.start()), Shape::SouthEast);
//!
//! let pipe_loop = trace_loop(&grid)?;
//! assert_eq!(pipe_loop.farthest_steps(), 4);
//! assert_eq!(count_enclosed(&grid, &pipe_loop, EnclosureStrategy::ScanlineParity), 1);
//! # Ok(())
//! # }
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

mod checked_sum;
mod enclosure;
mod pipe_grid;
mod shape;
mod space;
mod tracer;
mod weighted;

pub use checked_sum::{CheckedAddition, CheckedSum};
pub use enclosure::{
    EnclosureStrategy, count_enclosed, count_enclosed_by_scanline, enclosed_cells, render_loop,
};
pub use pipe_grid::{PipeGrid, PipeGridError};
pub use shape::{Cell, Direction, Position, Shape, ShapeFromCharError};
pub use space::{SpaceImage, SpaceImageError, UnexpectedChar};
pub use tracer::{LoopError, PipeLoop, trace_loop};
pub use weighted::{DistanceError, WeightedGrid};

/// A row of input failed to parse.
///
/// Rows are reported one-based, matching line numbers of the input text.
#[derive(thiserror::Error, Debug)]
#[error("failure parsing row {}", .row_index.saturating_add(1))]
pub struct InvalidRow<E>
where
    E: std::error::Error + 'static,
{
    /// The row index, zero based.
    pub row_index: usize,
    #[source]
    pub source: E,
}

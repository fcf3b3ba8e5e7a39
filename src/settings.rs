//! Settings shared by the solutions of a run.

use std::num::NonZeroUsize;

use clap::ValueEnum;
use grid_region::EnclosureStrategy;

/// How pairwise distances between galaxies are found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DistanceMethod {
    /// Shortest path search over the weighted grid.
    #[default]
    Search,
    /// Manhattan distance plus a count of the expanded lines crossed.
    ClosedForm,
}

/// The command line name for an [`EnclosureStrategy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EnclosureArg {
    CornerCasting,
    #[default]
    ScanlineParity,
}

impl From<EnclosureArg> for EnclosureStrategy {
    fn from(value: EnclosureArg) -> Self {
        match value {
            EnclosureArg::CornerCasting => Self::CornerCasting,
            EnclosureArg::ScanlineParity => Self::ScanlineParity,
        }
    }
}

/// The context passed to every solution part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The strategy classifying cells enclosed by the pipe loop.
    pub enclosure: EnclosureStrategy,
    /// The method summing galaxy distances.
    pub distance: DistanceMethod,
    /// The expansion factor of empty rows and columns for part one.
    pub part_one_expansion: u64,
    /// The expansion factor of empty rows and columns for part two.
    pub part_two_expansion: u64,
    /// A fixed worker count for pairwise distances, or `None` for the global pool.
    pub workers: Option<NonZeroUsize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enclosure: EnclosureStrategy::default(),
            distance: DistanceMethod::default(),
            part_one_expansion: 2,
            part_two_expansion: 1_000_000,
            workers: None,
        }
    }
}

//! defines different error types.

use core::fmt::{self, Display};
use std::error::Error;

/// Type that can never be (safly) initialized.
/// This is temporary, until [`never`](https://doc.rust-lang.org/std/primitive.never.html) is accepted into stable rust.
///
/// It is used as the error of operations that cannot fail, for instance
/// recording a step into a [`Vec`], see [`crate::report::Reporter`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Never {}

impl Display for Never {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for Never {}

/// Error while initialising a lattice
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LatticeInitializationError {
    /// The space dimension `D` must be at least 1.
    ZeroDimension,
    /// `dim`, the number of points per direction, must be at least 1.
    DimTooSmall,
    /// `dim^D` does not fit in a [`usize`].
    TooManyPoints,
}

impl Display for LatticeInitializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension => write!(
                f,
                "lattice initialization error : the dimension must be at least 1"
            ),
            Self::DimTooSmall => write!(
                f,
                "lattice initialization error : `dim` must be strictly greater than 0"
            ),
            Self::TooManyPoints => write!(
                f,
                "lattice initialization error : the number of sites overflows usize"
            ),
        }
    }
}

impl Error for LatticeInitializationError {}

/// Error while building a [`crate::lattice::NeighborTable`] from raw data.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TopologyError {
    /// The number of neighbors per site must be strictly positive.
    ZeroStride,
    /// The length of the data is not a multiple of the stride.
    IncompatibleLength {
        /// length of the data
        len: usize,
        /// number of neighbors per site
        stride: usize,
    },
    /// A neighbor entry point outside the lattice.
    NeighborOutOfRange {
        /// the site owning the entry
        site: usize,
        /// the invalid neighbor index
        neighbor: usize,
    },
}

impl Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroStride => write!(f, "a site must have at least one neighbor slot"),
            Self::IncompatibleLength { len, stride } => write!(
                f,
                "neighbor data of length {} is not a multiple of the stride {}",
                len, stride
            ),
            Self::NeighborOutOfRange { site, neighbor } => write!(
                f,
                "site {} has neighbor {} which is outside the lattice",
                site, neighbor
            ),
        }
    }
}

impl Error for TopologyError {}

/// Error while validating an occupation order.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PermutationError {
    /// An entry is not a valid site index.
    OutOfRange {
        /// position in the order
        position: usize,
        /// the invalid value
        value: usize,
    },
    /// A site appears twice.
    Duplicate {
        /// the repeated site
        site: usize,
    },
}

impl Display for PermutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { position, value } => write!(
                f,
                "entry {} at position {} is not a valid site index",
                value, position
            ),
            Self::Duplicate { site } => write!(f, "site {} appears more than once", site),
        }
    }
}

impl Error for PermutationError {}

/// Error while seeding a random number generator.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RngSeedError {
    /// A seed of 0 asked for a clock derived seed but the system clock is not available
    /// (it is set before the unix epoch).
    ClockUnavailable,
}

impl Display for RngSeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClockUnavailable => write!(
                f,
                "cannot derive a seed from the system clock, provide a non zero seed"
            ),
        }
    }
}

impl Error for RngSeedError {}

/// A broken invariant of the union-find forest. This is a bug of the engine, never of the input.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum InvariantViolation {
    /// A child points to a site outside the forest.
    ParentOutOfRange {
        /// the child
        site: usize,
        /// its parent
        parent: usize,
    },
    /// A child points to an empty site.
    ParentEmpty {
        /// the child
        site: usize,
        /// its parent
        parent: usize,
    },
    /// Following the parents from `site` never reaches a root.
    Cycle {
        /// the site where the cycle was detected
        site: usize,
    },
    /// The size stored at a root disagrees with the number of sites reaching it.
    WrongSize {
        /// the root
        root: usize,
        /// the size stored at the root
        stored: usize,
        /// the number of active sites whose root is `root`
        counted: usize,
    },
}

impl Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParentOutOfRange { site, parent } => write!(
                f,
                "site {} has parent {} outside of the forest",
                site, parent
            ),
            Self::ParentEmpty { site, parent } => {
                write!(f, "site {} has the empty site {} as parent", site, parent)
            }
            Self::Cycle { site } => write!(f, "the parents of site {} form a cycle", site),
            Self::WrongSize {
                root,
                stored,
                counted,
            } => write!(
                f,
                "root {} stores a size of {} but {} sites belong to its component",
                root, stored, counted
            ),
        }
    }
}

impl Error for InvariantViolation {}

/// Error while computing canonical averages, see [`crate::statistics`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatisticsError {
    /// The occupation probability must be in `[0, 1]`.
    InvalidProbability(f64),
    /// There is no microcanonical value to average.
    EmptyData,
    /// The step records do not cover the steps `1..=N` in order.
    IncompleteRun {
        /// number of sites `N`
        expected: usize,
        /// position of the first missing or misplaced record
        position: usize,
    },
    /// The curves to average do not have the same length.
    LengthMismatch {
        /// length of the first curve
        expected: usize,
        /// length of the offending curve
        found: usize,
    },
}

impl Display for StatisticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProbability(p) => {
                write!(f, "the probability {} is not in the interval [0, 1]", p)
            }
            Self::EmptyData => write!(f, "no data to average"),
            Self::IncompleteRun { expected, position } => write!(
                f,
                "the records of a run on {} sites are incomplete at position {}",
                expected, position
            ),
            Self::LengthMismatch { expected, found } => write!(
                f,
                "curves of length {} and {} cannot be averaged together",
                expected, found
            ),
        }
    }
}

impl Error for StatisticsError {}

/// Error while loading a [`crate::config::SimulationConfig`].
#[cfg(feature = "serde-serialize")]
#[non_exhaustive]
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(std::io::Error),
    /// The config file is not valid JSON for a [`crate::config::SimulationConfig`].
    Parse(serde_json::Error),
    /// The configured lattice is invalid.
    Lattice(LatticeInitializationError),
}

#[cfg(feature = "serde-serialize")]
impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "serde-serialize")]
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

#[cfg(feature = "serde-serialize")]
impl From<LatticeInitializationError> for ConfigError {
    fn from(err: LatticeInitializationError) -> Self {
        Self::Lattice(err)
    }
}

#[cfg(feature = "serde-serialize")]
impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read the config file: {}", err),
            Self::Parse(err) => write!(f, "invalid config: {}", err),
            Self::Lattice(err) => write!(f, "{}", err),
        }
    }
}

#[cfg(feature = "serde-serialize")]
impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Lattice(err) => Some(err),
        }
    }
}

/// Error while setting up a simulation run.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SimulationError {
    /// The occupation order and the topology do not have the same number of sites.
    IncompatibleSize {
        /// number of sites of the topology
        sites: usize,
        /// length of the occupation order
        order: usize,
    },
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleSize { sites, order } => write!(
                f,
                "the topology has {} sites but the occupation order has {} entries",
                sites, order
            ),
        }
    }
}

impl Error for SimulationError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            TopologyError::NeighborOutOfRange {
                site: 3,
                neighbor: 17
            }
            .to_string(),
            "site 3 has neighbor 17 which is outside the lattice"
        );
        assert_eq!(
            PermutationError::Duplicate { site: 2 }.to_string(),
            "site 2 appears more than once"
        );
        let err = SimulationError::IncompatibleSize { sites: 4, order: 3 };
        assert_eq!(
            err.to_string(),
            "the topology has 4 sites but the occupation order has 3 entries"
        );
        assert!(err.source().is_none());
    }
}

//! Directions on a hypercubic lattice.

use std::fmt::{self, Display};
use std::ops::Neg;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Represent a cardinal direction in dimension `D`: an axis and an orientation.
///
/// There are `2 D` directions. They are ordered axis by axis, the positive
/// orientation first: `+x, -x, +y, -y, ...`. This is the order of the neighbors
/// in a [`super::NeighborTable`] built from a [`super::LatticeCyclic`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Direction<const D: usize> {
    /// Axis of the direction
    index_dir: usize,
    /// Orientation
    is_positive: bool,
}

impl<const D: usize> Direction<D> {
    /// New direction from a direction as an idex and wether it is in the positive direction.
    ///
    /// Returns [`None`] if `index_dir >= D`.
    /// # Example
    /// ```
    /// # use newman_ziff::lattice::Direction;
    /// assert!(Direction::<2>::new(1, false).is_some());
    /// assert!(Direction::<2>::new(2, true).is_none());
    /// ```
    #[must_use]
    #[inline]
    #[allow(clippy::if_then_some_else_none)] // not possible for const fn
    pub const fn new(index_dir: usize, is_positive: bool) -> Option<Self> {
        if index_dir < D {
            Some(Self {
                index_dir,
                is_positive,
            })
        } else {
            None
        }
    }

    /// List all directions in the canonical neighbor order.
    #[must_use]
    #[inline]
    pub fn directions_vec() -> Vec<Self> {
        let mut x = Vec::with_capacity(2 * D);
        for index_dir in 0..D {
            x.push(Self {
                index_dir,
                is_positive: true,
            });
            x.push(Self {
                index_dir,
                is_positive: false,
            });
        }
        x
    }

    /// Number of directions, `2 D`.
    #[must_use]
    #[inline]
    pub const fn number_of_directions() -> usize {
        2 * D
    }

    /// Position of the direction in the canonical neighbor order.
    /// # Example
    /// ```
    /// # use newman_ziff::lattice::Direction;
    /// for (i, dir) in Direction::<3>::directions_vec().iter().enumerate() {
    ///     assert_eq!(dir.to_index(), i);
    /// }
    /// ```
    #[must_use]
    #[inline]
    pub const fn to_index(&self) -> usize {
        2 * self.index_dir + if self.is_positive { 0 } else { 1 }
    }

    getter_copy!(
        const,
        /// The axis of the direction.
        index_dir,
        usize
    );

    getter_copy!(
        const,
        /// Whether the direction is oriented along the positive axis.
        is_positive,
        bool
    );

    /// The positive direction along the same axis.
    #[must_use]
    #[inline]
    pub const fn to_positive(self) -> Self {
        Self {
            index_dir: self.index_dir,
            is_positive: true,
        }
    }
}

impl<const D: usize> Neg for Direction<D> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            index_dir: self.index_dir,
            is_positive: !self.is_positive,
        }
    }
}

impl<const D: usize> Display for Direction<D> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            if self.is_positive { "+" } else { "-" },
            self.index_dir
        )
    }
}

/// The four directions of the square lattice.
///
/// The rows of the lattice are along `x`. Site indices grow to the east along a row
/// and by `L` to the south from one row to the next.
#[allow(clippy::exhaustive_enums)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum DirectionEnum {
    /// Positive x direction, index `+1`.
    East,
    /// Negative x direction, index `-1`.
    West,
    /// Positive y direction, index `+L`.
    South,
    /// Negative y direction, index `-L`.
    North,
}

impl DirectionEnum {
    /// All the directions in the canonical neighbor order.
    pub const DIRECTIONS: [Self; 4] = [Self::East, Self::West, Self::South, Self::North];

    /// The opposite direction.
    #[must_use]
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::West => Self::East,
            Self::South => Self::North,
            Self::North => Self::South,
        }
    }
}

impl From<DirectionEnum> for Direction<2> {
    #[inline]
    fn from(d: DirectionEnum) -> Self {
        let (index_dir, is_positive) = match d {
            DirectionEnum::East => (0, true),
            DirectionEnum::West => (0, false),
            DirectionEnum::South => (1, true),
            DirectionEnum::North => (1, false),
        };
        Self {
            index_dir,
            is_positive,
        }
    }
}

impl From<Direction<2>> for DirectionEnum {
    #[inline]
    fn from(d: Direction<2>) -> Self {
        match (d.index_dir, d.is_positive) {
            (0, true) => Self::East,
            (0, false) => Self::West,
            (_, true) => Self::South,
            (_, false) => Self::North,
        }
    }
}

impl Display for DirectionEnum {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::East => "east",
            Self::West => "west",
            Self::South => "south",
            Self::North => "north",
        };
        write!(f, "{}", s)
    }
}

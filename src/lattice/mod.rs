//! Defines lattices and lattice component.
//!
//! [`LatticeCyclic`] is the structure that encode the lattice information like
//! the number of point and the dimension.
//! It is used to convert between [`LatticePoint`] and site index, and to build the
//! [`NeighborTable`] of the lattice.
//!
//! The percolation engine only sees the [`NeighborTable`]: sites are plain indices in
//! `0..N` and each site has a fixed, ordered list of neighbors.

mod direction;
mod lattice_cyclic;

use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

use nalgebra::SVector;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

pub use self::direction::{Direction, DirectionEnum};
pub use self::lattice_cyclic::{LatticeCyclic, SquareLattice};
use crate::error::TopologyError;

/// Represents point on a (any) lattice.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct LatticePoint<const D: usize> {
    data: SVector<usize, D>,
}

impl<const D: usize> LatticePoint<D> {
    /// Create a new lattice point.
    ///
    /// It can be outside a lattice.
    #[must_use]
    #[inline]
    pub const fn new(data: SVector<usize, D>) -> Self {
        Self { data }
    }

    /// Create a point at the origin
    #[must_use]
    #[inline]
    pub fn new_zero() -> Self {
        Self {
            data: SVector::zeros(),
        }
    }

    /// Create a point using the closure generate elements with the index as input.
    ///
    /// See [`nalgebra::base::Matrix::from_fn`].
    #[must_use]
    #[inline]
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize) -> usize,
    {
        Self::new(SVector::from_fn(|index, _| f(index)))
    }

    /// Number of elements in [`LatticePoint`]. This is `D`.
    #[allow(clippy::unused_self)]
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        D
    }

    /// Return if [`LatticePoint`] contain no data. True when the dimension is 0, false otherwise.
    #[allow(clippy::unused_self)]
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        D == 0
    }

    /// Get an iterator on the data.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.data.as_slice().iter()
    }

    getter!(
        const,
        /// Get the point as as [`nalgebra::SVector<usize, D>`]
        data,
        SVector<usize, D>
    );
}

impl<const D: usize> Default for LatticePoint<D> {
    #[inline]
    fn default() -> Self {
        Self::new_zero()
    }
}

impl<const D: usize> Display for LatticePoint<D> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

impl<const D: usize> Index<usize> for LatticePoint<D> {
    type Output = usize;

    /// Get the element at position `pos`
    /// # Panic
    /// Panics if the position is out of bound
    /// ```should_panic
    /// # use newman_ziff::lattice::LatticePoint;
    /// let point = LatticePoint::new([0; 2].into());
    /// let _ = point[2];
    /// ```
    #[inline]
    fn index(&self, pos: usize) -> &Self::Output {
        &self.data[pos]
    }
}

impl<const D: usize> IndexMut<usize> for LatticePoint<D> {
    /// Get the element at position `pos`
    /// # Panic
    /// Panics if the position is out of bound
    #[inline]
    fn index_mut(&mut self, pos: usize) -> &mut Self::Output {
        &mut self.data[pos]
    }
}

impl<const D: usize> From<[usize; D]> for LatticePoint<D> {
    #[inline]
    fn from(data: [usize; D]) -> Self {
        Self::new(data.into())
    }
}

impl<const D: usize> From<LatticePoint<D>> for [usize; D] {
    #[inline]
    fn from(point: LatticePoint<D>) -> Self {
        point.data.into()
    }
}

/// Fixed table of nearest neighbors: each of the `N` sites has the same number of
/// neighbor slots. Built once and read only afterward.
///
/// A slot can alias another slot of the same site (on a small torus two directions
/// reach the same site) or the site itself (for a lattice of one point).
///
/// # Example
/// ```
/// # use newman_ziff::lattice::NeighborTable;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // a ring of three sites
/// let table = NeighborTable::new(2, vec![1, 2, 2, 0, 0, 1])?;
/// assert_eq!(table.number_of_sites(), 3);
/// assert_eq!(table.neighbors(1), &[2, 0]);
/// assert!(NeighborTable::new(2, vec![1, 3]).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize))]
pub struct NeighborTable {
    /// number of neighbor slots per site
    stride: usize,
    data: Vec<usize>,
}

impl NeighborTable {
    /// Build a table from the flattened neighbor lists, `stride` entries per site.
    ///
    /// # Errors
    /// - [`TopologyError::ZeroStride`] if `stride == 0`;
    /// - [`TopologyError::IncompatibleLength`] if `data.len()` is not a multiple of `stride`;
    /// - [`TopologyError::NeighborOutOfRange`] if an entry is not a valid site index.
    pub fn new(stride: usize, data: Vec<usize>) -> Result<Self, TopologyError> {
        if stride == 0 {
            return Err(TopologyError::ZeroStride);
        }
        if data.len() % stride != 0 {
            return Err(TopologyError::IncompatibleLength {
                len: data.len(),
                stride,
            });
        }
        let number_of_sites = data.len() / stride;
        if let Some((position, neighbor)) = data
            .iter()
            .enumerate()
            .find(|(_, neighbor)| **neighbor >= number_of_sites)
        {
            return Err(TopologyError::NeighborOutOfRange {
                site: position / stride,
                neighbor: *neighbor,
            });
        }
        Ok(Self { stride, data })
    }

    /// Used by the lattice which only produces valid entries.
    pub(crate) fn from_trusted(stride: usize, data: Vec<usize>) -> Self {
        debug_assert!(stride > 0 && data.len() % stride == 0);
        Self { stride, data }
    }

    /// Number of sites `N`.
    #[must_use]
    #[inline]
    pub fn number_of_sites(&self) -> usize {
        self.data.len() / self.stride
    }

    /// Number of neighbor slots of each site.
    #[must_use]
    #[inline]
    pub const fn neighbors_per_site(&self) -> usize {
        self.stride
    }

    /// The ordered neighbors of `site`.
    ///
    /// # Panics
    /// Panics if `site` is not in `0..N`.
    #[must_use]
    #[inline]
    pub fn neighbors(&self, site: usize) -> &[usize] {
        assert!(
            site < self.number_of_sites(),
            "site {} out of range, the table has {} sites",
            site,
            self.number_of_sites()
        );
        &self.data[site * self.stride..(site + 1) * self.stride]
    }

    /// Iterator over the neighbor lists of all the sites, in site order.
    #[inline]
    pub fn iter(&self) -> std::slice::Chunks<'_, usize> {
        self.data.chunks(self.stride)
    }
}

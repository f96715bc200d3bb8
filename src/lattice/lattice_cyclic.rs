use std::fmt::{self, Display};

#[cfg(feature = "serde-serialize")]
use serde::Serialize;

use super::{Direction, LatticePoint, NeighborTable};
use crate::error::LatticeInitializationError;

/// A Cyclic lattice in space. Does not store the sites but is used to enumerate them
/// and to build the [`NeighborTable`].
///
/// The generic parameter `D` is the dimension.
///
/// This lattice is Cyclic more precisely if the lattice has L points in each direction.
/// Then we can move alongside a direction going though point 0, 1, ... L-1. The next step in
/// the same direction goes back to the point at 0. In dimension 2 this is a torus.
///
/// This contain very few data and can be copied at almost no cost.
// no `Deserialize`, it would bypass the checks of `LatticeCyclic::new`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize))]
pub struct LatticeCyclic<const D: usize> {
    /// The number of point *per* dimension.
    dim: usize,
    /// `dim^D`, cached as it is checked for overflow at creation.
    number_of_points: usize,
}

/// The `L x L` square lattice on a torus.
pub type SquareLattice = LatticeCyclic<2>;

impl<const D: usize> LatticeCyclic<D> {
    /// Number space dimension, this is the `D` parameter.
    ///
    /// Not to confuse with [`LatticeCyclic::dim`] which is the number of point per dimension.
    #[must_use]
    #[inline]
    pub const fn dim_st() -> usize {
        D
    }

    /// create a new lattice with `dim` the number of points in each dimension.
    ///
    /// # Errors
    /// - [`LatticeInitializationError::ZeroDimension`] if `D == 0`;
    /// - [`LatticeInitializationError::DimTooSmall`] if `dim == 0`;
    /// - [`LatticeInitializationError::TooManyPoints`] if `dim^D` overflows.
    ///
    /// # Example
    /// ```
    /// # use newman_ziff::{lattice::LatticeCyclic, error::LatticeInitializationError};
    /// assert!(LatticeCyclic::<2>::new(1).is_ok());
    /// assert_eq!(
    ///     LatticeCyclic::<2>::new(0),
    ///     Err(LatticeInitializationError::DimTooSmall)
    /// );
    /// assert_eq!(
    ///     LatticeCyclic::<0>::new(4),
    ///     Err(LatticeInitializationError::ZeroDimension)
    /// );
    /// assert_eq!(
    ///     LatticeCyclic::<2>::new(usize::MAX),
    ///     Err(LatticeInitializationError::TooManyPoints)
    /// );
    /// ```
    #[inline]
    pub fn new(dim: usize) -> Result<Self, LatticeInitializationError> {
        if D == 0 {
            return Err(LatticeInitializationError::ZeroDimension);
        }
        if dim == 0 {
            return Err(LatticeInitializationError::DimTooSmall);
        }
        let number_of_points = u32::try_from(D)
            .ok()
            .and_then(|exponent| dim.checked_pow(exponent))
            .ok_or(LatticeInitializationError::TooManyPoints)?;
        Ok(Self {
            dim,
            number_of_points,
        })
    }

    getter_copy!(
        const,
        /// Get the number of points in a single direction, `L`.
        ///
        /// use [`LatticeCyclic::number_of_points`] for the total number of points.
        /// Not to confuse with [`LatticeCyclic::dim_st`] which is the dimension of space.
        dim,
        usize
    );

    getter_copy!(
        const,
        /// Total number of point in the lattice, `N = L^D`.
        ///
        /// # Example
        /// ```
        /// # use newman_ziff::lattice::LatticeCyclic;
        /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
        /// let l = LatticeCyclic::<2>::new(128)?;
        /// assert_eq!(l.number_of_points(), 128 * 128);
        ///
        /// let l = LatticeCyclic::<3>::new(8)?;
        /// assert_eq!(l.number_of_points(), 8_usize.pow(3));
        /// # Ok(())
        /// # }
        /// ```
        number_of_points,
        usize
    );

    /// Get the next point in the lattice following the direction `dir`.
    /// It follows the Cyclic property of the lattice.
    ///
    /// # Example
    /// ```
    /// # use newman_ziff::lattice::{LatticeCyclic, DirectionEnum, LatticePoint};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let lattice = LatticeCyclic::<2>::new(4)?;
    /// let point = LatticePoint::<2>::from([1, 0]);
    /// assert_eq!(
    ///     lattice.add_point_direction(point, &DirectionEnum::East.into()),
    ///     LatticePoint::from([2, 0])
    /// );
    /// // In the following case we get [_, 3] because `dim = 4`, and this lattice is Cyclic.
    /// assert_eq!(
    ///     lattice.add_point_direction(point, &DirectionEnum::North.into()),
    ///     LatticePoint::from([1, 3])
    /// );
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    #[inline]
    pub fn add_point_direction(
        &self,
        mut point: LatticePoint<D>,
        dir: &Direction<D>,
    ) -> LatticePoint<D> {
        let axis = dir.index_dir();
        let coordinate = point[axis] % self.dim;
        point[axis] = if dir.is_positive() {
            (coordinate + 1) % self.dim
        } else if coordinate == 0 {
            self.dim - 1
        } else {
            coordinate - 1
        };
        point
    }

    /// Index of the site at `point`, coordinates are taken modulo `dim`.
    ///
    /// The first coordinate is the fastest: `index = x_0 + L x_1 + L^2 x_2 ...`.
    #[must_use]
    #[inline]
    pub fn point_to_index(&self, point: &LatticePoint<D>) -> usize {
        point
            .iter()
            .rev()
            .fold(0, |acc, coordinate| acc * self.dim + coordinate % self.dim)
    }

    /// The point of the site `index`, [`None`] if the index is not on the lattice.
    /// # Example
    /// ```
    /// # use newman_ziff::lattice::{LatticeCyclic, LatticePoint};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let lattice = LatticeCyclic::<2>::new(4)?;
    /// assert_eq!(lattice.index_to_point(6), Some(LatticePoint::from([2, 1])));
    /// assert_eq!(lattice.index_to_point(16), None);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    #[inline]
    pub fn index_to_point(&self, index: usize) -> Option<LatticePoint<D>> {
        (index < self.number_of_points).then(|| {
            LatticePoint::from_fn(|axis| {
                // dim^axis <= number_of_points for axis < D, it does not overflow
                let stride = (0..axis).fold(1, |acc, _| acc * self.dim);
                (index / stride) % self.dim
            })
        })
    }

    /// Iterator over the index of all sites.
    #[inline]
    pub fn sites(&self) -> std::ops::Range<usize> {
        0..self.number_of_points
    }

    /// Build the table of nearest neighbors.
    ///
    /// Each site has `2 D` neighbors given in the order of [`Direction::directions_vec`].
    /// For the square lattice this is east, west, south, north.
    ///
    /// # Example
    /// ```
    /// # use newman_ziff::lattice::SquareLattice;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let lattice = SquareLattice::new(3)?;
    /// let table = lattice.neighbor_table();
    /// // site 3 is on the west boundary of the second row
    /// assert_eq!(table.neighbors(3), &[4, 5, 6, 0]);
    /// // site 8 is the south east corner
    /// assert_eq!(table.neighbors(8), &[6, 7, 2, 5]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn neighbor_table(&self) -> NeighborTable {
        let directions = Direction::<D>::directions_vec();
        let mut data = Vec::with_capacity(self.number_of_points * directions.len());
        for index in self.sites() {
            // index < number_of_points
            let point = self.index_to_point(index).unwrap_or_default();
            data.extend(
                directions
                    .iter()
                    .map(|dir| self.point_to_index(&self.add_point_direction(point, dir))),
            );
        }
        NeighborTable::from_trusted(directions.len(), data)
    }
}

impl<const D: usize> Display for LatticeCyclic<D> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cyclic lattice with {}^{} points", self.dim, D)
    }
}

//! Random occupation order of the sites.
//!
//! The order is the only place where randomness enters a percolation run: for a fixed
//! uniform source the whole run is reproducible.

use std::ops::Index;

#[cfg(feature = "serde-serialize")]
use serde::Serialize;

use crate::error::PermutationError;
use crate::rng::UniformSource;

/// A permutation of `0..N`, the order in which the sites are occupied.
///
/// # Example
/// ```
/// # use newman_ziff::{permutation::OccupationOrder, rng::AdditiveRng};
/// let mut rng = AdditiveRng::with_seed(1);
/// let order = OccupationOrder::new(16, &mut rng);
/// assert_eq!(order.len(), 16);
/// assert!(order.is_permutation());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize))]
pub struct OccupationOrder {
    order: Vec<usize>,
}

impl OccupationOrder {
    /// Draw a uniformly random permutation of `0..n` with the Durstenfeld version of the
    /// Fisher-Yates shuffle.
    ///
    /// Exactly one value is drawn from `source` for every position `i` in `0..n`, the
    /// position `i` is swapped with `j = i + floor((n - i) u)`.
    pub fn new(n: usize, mut source: impl UniformSource) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        for i in 0..n {
            let u = source.next_uniform();
            let j = i + offset(n - i, u);
            order.swap(i, j);
        }
        Self { order }
    }

    /// The identity permutation, sites are occupied in index order.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
        }
    }

    /// Use a given order, for instance to replay a recorded run.
    ///
    /// # Errors
    /// Returns a [`PermutationError`] if `order` is not a permutation of `0..order.len()`.
    ///
    /// # Example
    /// ```
    /// # use newman_ziff::{permutation::OccupationOrder, error::PermutationError};
    /// assert!(OccupationOrder::from_vec(vec![2, 0, 1]).is_ok());
    /// assert_eq!(
    ///     OccupationOrder::from_vec(vec![2, 0, 2]),
    ///     Err(PermutationError::Duplicate { site: 2 })
    /// );
    /// ```
    pub fn from_vec(order: Vec<usize>) -> Result<Self, PermutationError> {
        check_permutation(&order)?;
        Ok(Self { order })
    }

    /// Checks that every index of `0..N` appears exactly once.
    #[must_use]
    pub fn is_permutation(&self) -> bool {
        check_permutation(&self.order).is_ok()
    }

    /// Number of sites.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether there is no site.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The order as a slice.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Iterator over the sites in occupation order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.order.iter()
    }

    /// Get back the underlying vector.
    #[must_use]
    #[inline]
    pub fn into_inner(self) -> Vec<usize> {
        self.order
    }
}

impl Index<usize> for OccupationOrder {
    type Output = usize;

    #[inline]
    fn index(&self, step: usize) -> &Self::Output {
        &self.order[step]
    }
}

impl AsRef<[usize]> for OccupationOrder {
    #[inline]
    fn as_ref(&self) -> &[usize] {
        &self.order
    }
}

impl<'a> IntoIterator for &'a OccupationOrder {
    type IntoIter = std::slice::Iter<'a, usize>;
    type Item = &'a usize;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// `floor(remaining u)` clamped to `remaining - 1`.
///
/// `u < 1` so the product is already below `remaining`, but rounding of the product
/// can reach it for large `remaining`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_precision_loss)]
fn offset(remaining: usize, u: f64) -> usize {
    debug_assert!(u > 0_f64 && u < 1_f64, "uniform value {} not in (0, 1)", u);
    ((remaining as f64 * u) as usize).min(remaining - 1)
}

fn check_permutation(order: &[usize]) -> Result<(), PermutationError> {
    let mut seen = vec![false; order.len()];
    for (position, value) in order.iter().enumerate() {
        match seen.get_mut(*value) {
            None => {
                return Err(PermutationError::OutOfRange {
                    position,
                    value: *value,
                })
            }
            Some(true) => return Err(PermutationError::Duplicate { site: *value }),
            Some(flag) => *flag = true,
        }
    }
    Ok(())
}

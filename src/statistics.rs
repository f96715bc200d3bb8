//! Canonical ensemble averages and statistics over runs.
//!
//! A percolation run gives a microcanonical observable `Q_n`: one value for each number `n`
//! of occupied sites. The observable at a fixed occupation probability `p` is obtained by the
//! convolution with the binomial distribution
//! `Q(p) = sum_n C(N, n) p^n (1 - p)^(N - n) Q_n`.
//!
//! # Example
//! ```
//! # use newman_ziff::{
//! #     lattice::SquareLattice,
//! #     percolation::{FindStrategy, NewmanZiff},
//! #     rng::AdditiveRng,
//! #     statistics::{canonical_curve, microcanonical_largest},
//! # };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let lattice = SquareLattice::new(32)?;
//! let table = lattice.neighbor_table();
//! let engine = NewmanZiff::from_source(&table, AdditiveRng::with_seed(3), FindStrategy::default());
//! let records: Vec<_> = engine.collect();
//!
//! let q_n = microcanonical_largest(&records, lattice.number_of_points())?;
//! let curve = canonical_curve(&q_n, &[0_f64, 0.5_f64, 1_f64])?;
//! assert_eq!(curve[0], 0_f64);
//! assert!((curve[2] - 1024_f64).abs() < 1E-9_f64);
//! # Ok(())
//! # }
//! ```

use std::ops::Mul;

use num_traits::Zero;
use rayon::prelude::*;

use crate::error::StatisticsError;
use crate::percolation::StepRecord;
use crate::Real;

/// Probabilities `C(n, k) p^k (1 - p)^(n - k)` of the binomial distribution for `k` in `0..=n`.
///
/// The weights are computed by recurrence from the mode of the distribution and then
/// normalized, so they stay finite for large `n`. Weights far in the tails underflow to 0.
///
/// # Errors
/// Returns [`StatisticsError::InvalidProbability`] if `p` is not in `[0, 1]`.
///
/// # Example
/// ```
/// # use newman_ziff::statistics::binomial_weights;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let weights = binomial_weights(2, 0.5)?;
/// assert_eq!(weights, vec![0.25, 0.5, 0.25]);
/// assert!(binomial_weights(2, 1.5).is_err());
/// # Ok(())
/// # }
/// ```
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn binomial_weights(n: usize, p: Real) -> Result<Vec<Real>, StatisticsError> {
    if !(0_f64..=1_f64).contains(&p) {
        return Err(StatisticsError::InvalidProbability(p));
    }
    let mut weights = vec![0_f64; n + 1];
    if p <= 0_f64 {
        weights[0] = 1_f64;
        return Ok(weights);
    }
    if p >= 1_f64 {
        weights[n] = 1_f64;
        return Ok(weights);
    }

    let ratio = p / (1_f64 - p);
    let mode = (((n + 1) as Real * p) as usize).min(n);
    weights[mode] = 1_f64;
    for k in mode + 1..=n {
        weights[k] = weights[k - 1] * ratio * (n - k + 1) as Real / k as Real;
    }
    for k in (0..mode).rev() {
        weights[k] = weights[k + 1] / ratio * (k + 1) as Real / (n - k) as Real;
    }

    let total: Real = weights.iter().sum();
    weights.iter_mut().for_each(|weight| *weight /= total);
    Ok(weights)
}

/// Canonical average at probability `p` of the microcanonical values `Q_n` for `n` in `0..=N`.
///
/// # Errors
/// - [`StatisticsError::EmptyData`] if `microcanonical` is empty;
/// - [`StatisticsError::InvalidProbability`] if `p` is not in `[0, 1]`.
///
/// # Example
/// ```
/// # use newman_ziff::statistics::canonical_average;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // the mean number of occupied sites is N p
/// let q: Vec<f64> = (0..=100).map(|n| n as f64).collect();
/// assert!((canonical_average(&q, 0.3)? - 30_f64).abs() < 1E-9);
/// # Ok(())
/// # }
/// ```
pub fn canonical_average<T>(microcanonical: &[T], p: Real) -> Result<T, StatisticsError>
where
    T: Zero + Clone + Mul<Real, Output = T>,
{
    let n = microcanonical
        .len()
        .checked_sub(1)
        .ok_or(StatisticsError::EmptyData)?;
    let weights = binomial_weights(n, p)?;
    Ok(microcanonical
        .iter()
        .zip(weights)
        .fold(T::zero(), |acc, (q, weight)| acc + q.clone() * weight))
}

/// [`canonical_average`] for every probability of `probabilities`, computed in parallel.
///
/// # Errors
/// Same as [`canonical_average`], the first error found is returned.
pub fn canonical_curve<T>(
    microcanonical: &[T],
    probabilities: &[Real],
) -> Result<Vec<T>, StatisticsError>
where
    T: Zero + Clone + Mul<Real, Output = T> + Send + Sync,
{
    probabilities
        .par_iter()
        .map(|p| canonical_average(microcanonical, *p))
        .collect()
}

/// Size of the largest component for `n` in `0..=N` occupied sites, from the records of a
/// complete run on `N` sites. The value for `n = 0` is 0.
///
/// # Errors
/// Returns [`StatisticsError::IncompleteRun`] if the records are not exactly the steps
/// `1..=N` in order.
#[allow(clippy::cast_precision_loss)]
pub fn microcanonical_largest(
    records: &[StepRecord],
    n: usize,
) -> Result<Vec<Real>, StatisticsError> {
    let mut curve = Vec::with_capacity(n + 1);
    curve.push(0_f64);
    for (position, record) in records.iter().enumerate() {
        if position >= n || record.step() != position + 1 {
            return Err(StatisticsError::IncompleteRun {
                expected: n,
                position,
            });
        }
        curve.push(record.largest() as Real);
    }
    if records.len() != n {
        return Err(StatisticsError::IncompleteRun {
            expected: n,
            position: records.len(),
        });
    }
    Ok(curve)
}

/// Mean and variance of a sample, the variance uses the `len - 1` normalization.
/// A single value has a variance of 0.
///
/// # Errors
/// Returns [`StatisticsError::EmptyData`] if `data` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn mean_and_variance(data: &[Real]) -> Result<[Real; 2], StatisticsError> {
    let len = data.len();
    if len == 0 {
        return Err(StatisticsError::EmptyData);
    }
    let mean = data.iter().sum::<Real>() / len as Real;
    if len == 1 {
        return Ok([mean, 0_f64]);
    }
    let variance = data
        .iter()
        .map(|el| (el - mean) * (el - mean))
        .sum::<Real>()
        / (len - 1) as Real;
    Ok([mean, variance])
}

/// Mean and statistical error `sqrt(variance / len)` of a sample.
///
/// # Errors
/// Returns [`StatisticsError::EmptyData`] if `data` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn mean_with_error(data: &[Real]) -> Result<[Real; 2], StatisticsError> {
    let [mean, variance] = mean_and_variance(data)?;
    Ok([mean, (variance / data.len() as Real).sqrt()])
}

/// Point by point mean and statistical error of curves from independent runs, for instance
/// the output of [`microcanonical_largest`] for several seeds. Points are computed in parallel.
///
/// # Errors
/// - [`StatisticsError::EmptyData`] if there is no curve;
/// - [`StatisticsError::LengthMismatch`] if the curves do not all have the same length.
pub fn average_curves(curves: &[Vec<Real>]) -> Result<Vec<[Real; 2]>, StatisticsError> {
    let len = curves.first().ok_or(StatisticsError::EmptyData)?.len();
    if let Some(curve) = curves.iter().find(|curve| curve.len() != len) {
        return Err(StatisticsError::LengthMismatch {
            expected: len,
            found: curve.len(),
        });
    }
    (0..len)
        .into_par_iter()
        .map(|index| {
            let column: Vec<Real> = curves.iter().map(|curve| curve[index]).collect();
            mean_with_error(&column)
        })
        .collect()
}

//! Uniform random number sources.
//!
//! The percolation engine only needs one thing from a random number generator:
//! a stream of doubles uniformly distributed in the open interval `(0, 1)`.
//! This is captured by the trait [`UniformSource`].
//!
//! Two implementations are provided
//! - [`AdditiveRng`], the additive lagged Fibonacci generator of Mitchell and Moore
//!   (lags 1279 and 418) seeded through a linear congruential generator.
//!   It is fast and reproducible but its statistical quality is weak,
//!   it is provided so that historical runs can be reproduced.
//! - [`RandSource`], an adaptor for any [`rand::Rng`]. For instance
//!   [`rand_xoshiro::Xoshiro256PlusPlus`](https://docs.rs/rand_xoshiro/0.6.0/rand_xoshiro/struct.Xoshiro256PlusPlus.html)
//!   which has good performance and statistical quality.
//!
//! [`AdditiveRng`] also implements [`rand::RngCore`] and [`rand::SeedableRng`] so it can
//! be used anywhere the rand ecosystem expects a generator.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Open01;
use rand::{Rng, RngCore, SeedableRng};

use crate::error::RngSeedError;
use crate::Real;

/// Length of the ring buffer, the long lag of the generator.
pub const RING_LENGTH: usize = 1279;
/// Short lag, initial position of the second index.
pub const SHORT_LAG: usize = 418;
/// Number of draws discarded after seeding.
pub const WARM_UP_DRAWS: usize = 1_000_000;

/// Multiplier of the seeding LCG.
const LCG_MULTIPLIER: u64 = 2416;
/// Increment of the seeding LCG.
const LCG_INCREMENT: u64 = 374_441;
/// Modulus of the seeding LCG.
const LCG_MODULUS: u64 = 1_771_875;
/// Maps `[0, LCG_MODULUS)` onto `[0, 2^32)`.
const LCG_TO_U32: Real = 2_423.967_433_368_61;
/// 2^-32
const U32_TO_UNIT: Real = 1_f64 / 4_294_967_296_f64;

/// A source of uniform random doubles in the open interval `(0, 1)`.
///
/// Implementation must be deterministic once seeded: the sequence of values only depends
/// on the seed.
pub trait UniformSource {
    /// Returns the next value, strictly between 0 and 1.
    fn next_uniform(&mut self) -> Real;
}

impl<T: UniformSource + ?Sized> UniformSource for &mut T {
    #[inline]
    fn next_uniform(&mut self) -> Real {
        (**self).next_uniform()
    }
}

/// Additive random number generator of Mitchell and Moore.
///
/// Each draw does `ring[p] += ring[pp]` (wrapping on 32 bits) where `p` and `pp` are
/// [`SHORT_LAG`] apart and both step backward cyclically through the [`RING_LENGTH`] entries.
///
/// # Example
/// ```
/// # use newman_ziff::rng::{AdditiveRng, UniformSource};
/// let mut rng_1 = AdditiveRng::with_seed(42);
/// let mut rng_2 = AdditiveRng::with_seed(42);
/// for _ in 0..100 {
///     let x = rng_1.next_uniform();
///     assert!(x > 0_f64 && x < 1_f64);
///     assert_eq!(x, rng_2.next_uniform());
/// }
/// ```
#[derive(Clone)]
pub struct AdditiveRng {
    ring: Box<[u32; RING_LENGTH]>,
    p: usize,
    pp: usize,
    seed: u64,
    is_reproducible: bool,
}

impl AdditiveRng {
    /// Create a generator from `seed`.
    ///
    /// A seed of `0` means that the seed is derived from the system clock.
    /// The run is then **not reproducible** unless the seed returned by [`AdditiveRng::seed`]
    /// is recorded.
    ///
    /// # Errors
    /// Returns [`RngSeedError::ClockUnavailable`] if the seed is `0` and the system clock
    /// cannot be read.
    pub fn new(seed: u64) -> Result<Self, RngSeedError> {
        if seed == 0 {
            let mut rng = Self::with_seed(clock_seed()?);
            rng.is_reproducible = false;
            Ok(rng)
        } else {
            Ok(Self::with_seed(seed))
        }
    }

    /// Create a generator using `seed` literally, a seed of 0 is **not** replaced by the clock.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = Self {
            ring: Box::new([0_u32; RING_LENGTH]),
            p: 0,
            pp: SHORT_LAG,
            seed,
            is_reproducible: true,
        };
        rng.fill_ring(seed);
        rng
    }

    /// Re-seed the generator in place, with the same semantic as [`AdditiveRng::new`].
    ///
    /// # Errors
    /// Returns [`RngSeedError::ClockUnavailable`] if the seed is `0` and the system clock
    /// cannot be read. In that case the generator is left untouched.
    pub fn reseed(&mut self, seed: u64) -> Result<(), RngSeedError> {
        *self = Self::new(seed)?;
        Ok(())
    }

    getter_copy!(
        const,
        /// The seed actually used, this is the clock derived seed if `0` was asked.
        seed,
        u64
    );

    getter_copy!(
        const,
        /// Whether the generator was seeded explicitly. It is false when the seed came from
        /// the clock.
        is_reproducible,
        bool
    );

    /// Fill the ring with the LCG and run off the warm-up.
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    #[allow(clippy::cast_precision_loss)]
    fn fill_ring(&mut self, seed: u64) {
        let mut lcg = seed;
        for entry in self.ring.iter_mut() {
            lcg = LCG_MULTIPLIER.wrapping_mul(lcg).wrapping_add(LCG_INCREMENT) % LCG_MODULUS;
            // lcg < LCG_MODULUS so the product is < 2^32
            *entry = (LCG_TO_U32 * lcg as Real) as u32;
        }
        self.p = 0;
        self.pp = SHORT_LAG;
        for _ in 0..WARM_UP_DRAWS {
            self.step();
        }
    }

    #[inline]
    const fn previous(index: usize) -> usize {
        if index == 0 {
            RING_LENGTH - 1
        } else {
            index - 1
        }
    }

    #[inline]
    fn step(&mut self) -> u32 {
        self.p = Self::previous(self.p);
        self.pp = Self::previous(self.pp);
        self.ring[self.p] = self.ring[self.p].wrapping_add(self.ring[self.pp]);
        self.ring[self.p]
    }

    /// Next raw 32 bits value.
    #[inline]
    pub fn next_raw(&mut self) -> u32 {
        self.step()
    }

    /// Next value in `(0, 1)`.
    ///
    /// The raw value `u` is mapped to `(u + 1/2) 2^-32` which is never 0 nor 1.
    #[inline]
    pub fn next_open01(&mut self) -> Real {
        (Real::from(self.step()) + 0.5_f64) * U32_TO_UNIT
    }
}

impl std::fmt::Debug for AdditiveRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdditiveRng")
            .field("p", &self.p)
            .field("pp", &self.pp)
            .field("seed", &self.seed)
            .field("is_reproducible", &self.is_reproducible)
            .finish_non_exhaustive()
    }
}

impl UniformSource for AdditiveRng {
    #[inline]
    fn next_uniform(&mut self) -> Real {
        self.next_open01()
    }
}

impl RngCore for AdditiveRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.step());
        let high = u64::from(self.step());
        (high << 32) | low
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for AdditiveRng {
    type Seed = [u8; 8];

    /// Seed literally with the little endian value of `seed`, see [`AdditiveRng::with_seed`].
    #[inline]
    fn from_seed(seed: Self::Seed) -> Self {
        Self::with_seed(u64::from_le_bytes(seed))
    }

    #[inline]
    fn seed_from_u64(state: u64) -> Self {
        Self::with_seed(state)
    }
}

/// A non zero seed derived from the system clock.
fn clock_seed() -> Result<u64, RngSeedError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| RngSeedError::ClockUnavailable)?;
    // mixing the seconds and the sub second part, the truncation is intended
    #[allow(clippy::cast_possible_truncation)]
    let seed = elapsed.as_nanos() as u64;
    Ok(seed.max(1))
}

/// Adaptor to use any [`rand::Rng`] as a [`UniformSource`].
///
/// Values are sampled with [`rand::distributions::Open01`].
///
/// # Example
/// ```
/// # use newman_ziff::rng::{RandSource, UniformSource};
/// use rand::SeedableRng;
///
/// let mut source = RandSource::new(rand::rngs::StdRng::seed_from_u64(7));
/// let x = source.next_uniform();
/// assert!(x > 0_f64 && x < 1_f64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandSource<R> {
    rng: R,
}

impl<R: Rng> RandSource<R> {
    /// Wrap `rng`.
    #[must_use]
    #[inline]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    getter!(
        /// Reference to the wrapped generator.
        rng,
        R
    );

    /// Get back the wrapped generator.
    #[allow(clippy::missing_const_for_fn)] // false positive
    #[must_use]
    #[inline]
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> UniformSource for RandSource<R> {
    #[inline]
    fn next_uniform(&mut self) -> Real {
        self.rng.sample(Open01)
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    use super::*;

    /// Same generator without the warm-up, to check the recurrence by hand.
    fn ring_after_lcg(seed: u64) -> Vec<u32> {
        let mut lcg = seed;
        (0..RING_LENGTH)
            .map(|_| {
                lcg = (LCG_MULTIPLIER * lcg + LCG_INCREMENT) % LCG_MODULUS;
                (LCG_TO_U32 * lcg as Real) as u32
            })
            .collect()
    }

    #[test]
    fn lcg_fills_the_full_u32_range() {
        let ring = ring_after_lcg(1);
        assert!(ring.iter().all(|el| *el < u32::MAX));
        assert!(ring.iter().any(|el| *el > u32::MAX / 2));
    }

    #[test]
    fn recurrence() {
        let mut rng = AdditiveRng::with_seed(12);
        let ring_before = *rng.ring;
        let (p, pp) = (rng.p, rng.pp);
        let value = rng.next_raw();
        let p_new = AdditiveRng::previous(p);
        let pp_new = AdditiveRng::previous(pp);
        assert_eq!(rng.p, p_new);
        assert_eq!(rng.pp, pp_new);
        assert_eq!(value, ring_before[p_new].wrapping_add(ring_before[pp_new]));
        assert_eq!((rng.p + SHORT_LAG) % RING_LENGTH, rng.pp);
    }

    #[test]
    fn indices_cycle_through_the_whole_ring() {
        let mut rng = AdditiveRng::with_seed(3);
        let p = rng.p;
        let mut visited = vec![false; RING_LENGTH];
        for _ in 0..RING_LENGTH {
            rng.next_raw();
            visited[rng.p] = true;
        }
        assert_eq!(rng.p, p);
        assert!(visited.iter().all(|el| *el));
    }

    #[test]
    fn reproducible() {
        let mut rng_1 = AdditiveRng::new(2022).expect("non zero seed");
        let mut rng_2 = AdditiveRng::with_seed(2022);
        assert!(rng_1.is_reproducible());
        assert_eq!(rng_1.seed(), 2022);
        for _ in 0..1_000 {
            assert_eq!(rng_1.next_raw(), rng_2.next_raw());
        }
        rng_1.reseed(2022).expect("non zero seed");
        let mut rng_3 = AdditiveRng::with_seed(2022);
        for _ in 0..1_000 {
            assert_eq!(rng_1.next_raw(), rng_3.next_raw());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut rng_1 = AdditiveRng::with_seed(1);
        let mut rng_2 = AdditiveRng::with_seed(2);
        let v1: Vec<u32> = (0..10).map(|_| rng_1.next_raw()).collect();
        let v2: Vec<u32> = (0..10).map(|_| rng_2.next_raw()).collect();
        assert_ne!(v1, v2);
    }

    #[test]
    fn clock_seed_is_flagged() {
        let rng = AdditiveRng::new(0).expect("the clock is available");
        assert!(!rng.is_reproducible());
        assert_ne!(rng.seed(), 0);
    }

    #[test]
    fn open_interval() {
        let mut rng = AdditiveRng::with_seed(5);
        let mut sum = 0_f64;
        let number_of_draws = 100_000;
        for _ in 0..number_of_draws {
            let x = rng.next_uniform();
            assert!(x > 0_f64 && x < 1_f64);
            sum += x;
        }
        let mean = sum / f64::from(number_of_draws);
        assert!((mean - 0.5_f64).abs() < 0.01_f64, "mean {}", mean);
        // extreme raw values
        assert!((0_f64 + 0.5_f64) * U32_TO_UNIT > 0_f64);
        assert!((Real::from(u32::MAX) + 0.5_f64) * U32_TO_UNIT < 1_f64);
    }

    #[test]
    fn seedable_rng() {
        let mut rng_1 = AdditiveRng::seed_from_u64(9);
        let mut rng_2 = AdditiveRng::from_seed(9_u64.to_le_bytes());
        assert_eq!(rng_1.next_u64(), rng_2.next_u64());
        let mut copy = rng_1.clone();
        let mut bytes = [0_u8; 13];
        rng_1.fill_bytes(&mut bytes);
        assert!(bytes.iter().any(|el| *el != 0));
        let expected: Vec<u8> = (0..4)
            .flat_map(|_| copy.next_u32().to_le_bytes())
            .take(13)
            .collect();
        assert_eq!(bytes[..], expected[..]);
        // both generators consumed four draws
        assert_eq!(rng_1.next_u32(), copy.next_u32());
    }

    #[test]
    fn rand_source() {
        let mut source_1 = RandSource::new(Xoshiro256PlusPlus::seed_from_u64(1));
        let mut source_2 = RandSource::new(Xoshiro256PlusPlus::seed_from_u64(1));
        for _ in 0..1_000 {
            let x = source_1.next_uniform();
            assert!(x > 0_f64 && x < 1_f64);
            assert_eq!(x, source_2.next_uniform());
        }
        let _rng: &Xoshiro256PlusPlus = source_1.rng();
        let _rng: Xoshiro256PlusPlus = source_1.into_inner();
    }
}

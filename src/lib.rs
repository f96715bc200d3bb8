//! ![](https://img.shields.io/badge/language-Rust-orange)
//!
//! Site percolation on periodic lattices with the algorithm of Newman and Ziff.
//!
//! Sites of an `L x L` torus are occupied one at a time in a random order. After each
//! occupation the clusters are updated with a weighted union-find and the size of the
//! largest cluster is reported. One run gives the largest cluster for every number of
//! occupied sites, which can then be turned into a function of the occupation probability
//! with [`statistics::canonical_curve`].
//!
//! **Features**:
//! - Generic dimension for the lattice, any topology through [`lattice::NeighborTable`];
//! - Reproducible runs from a seed with the long period additive generator [`rng::AdditiveRng`];
//! - Any [`rand::Rng`] can be used instead, through [`rng::RandSource`];
//! - Streaming of the results with [`report::Reporter`];
//! - Serde support;
//! - Native rust;
//!
//! ## Usage
//!
//! Add `newman-ziff = "0.1.0"` into your `cargo.toml`.
//!
//! A run on a 64 x 64 torus:
//! ```
//! use newman_ziff::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let lattice = SquareLattice::new(64)?;
//! let table = lattice.neighbor_table();
//!
//! let mut rng = AdditiveRng::with_seed(12_345);
//! let order = OccupationOrder::new(lattice.number_of_points(), &mut rng);
//!
//! let mut engine = NewmanZiff::new(&table, order, FindStrategy::PathHalving)?;
//! let mut records = Vec::new();
//! let largest = engine.run(&mut records)?;
//!
//! assert_eq!(largest, 64 * 64);
//! assert_eq!(records.len(), 64 * 64);
//! assert_eq!(records[0].to_string(), "1 1");
//! # Ok(())
//! # }
//! ```
//!
//! The engine is also an iterator over the steps, so a run can be stopped at any point.
//! ```
//! # use newman_ziff::prelude::*;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = SquareLattice::new(32)?.neighbor_table();
//! let engine = NewmanZiff::from_source(&table, AdditiveRng::with_seed(1), FindStrategy::default());
//! // first step where a cluster spans half of the lattice
//! let step = engine
//!     .skip_while(|record| record.largest() < 32 * 32 / 2)
//!     .map(|record| record.step())
//!     .next();
//! assert!(step.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Discussion about Random Number Generators (RNGs)
//!
//! The occupation order is the only random input of a run. [`rng::AdditiveRng`] is the
//! generator of reference: `ring[p] += ring[p - 418]` over a ring of 1279 words, seeded by
//! a linear congruential generator. A seed of 0 asks for a seed taken from the clock, the run is
//! then not reproducible unless the seed reported by [`rng::AdditiveRng::seed`] is recorded.
//!
//! Other generators can be used through [`rng::RandSource`], for instance
//! [`rand_xoshiro::Xoshiro256PlusPlus`](https://docs.rs/rand_xoshiro/0.6.0/rand_xoshiro/struct.Xoshiro256PlusPlus.html).

//#![warn(clippy::as_conversions)]
#![warn(clippy::cast_sign_loss)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::cast_possible_wrap)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::cognitive_complexity)]
//#![warn(clippy::default_numeric_fallback)]
#![warn(clippy::float_cmp_const)]
#![warn(clippy::implicit_hasher)]
#![warn(clippy::implicit_saturating_sub)]
#![warn(clippy::imprecise_flops)]
#![warn(clippy::large_types_passed_by_value)]
#![warn(clippy::macro_use_imports)]
#![warn(clippy::manual_ok_or)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::non_ascii_literal)]
//#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::todo)]
#![warn(clippy::trivially_copy_pass_by_ref)]
//#![warn(clippy::type_repetition_in_bounds)]
#![warn(clippy::unreadable_literal)]
#![warn(clippy::unseparated_literal_suffix)]
#![warn(clippy::unused_self)]
#![warn(clippy::missing_errors_doc)]
#![warn(missing_docs)]

pub use rand::{Rng, SeedableRng};

#[macro_use]
mod macro_def;
#[cfg(feature = "serde-serialize")]
pub mod config;
pub mod error;
pub mod lattice;
pub mod percolation;
pub mod permutation;
pub mod prelude;
pub mod report;
pub mod rng;
pub mod statistics;

#[cfg(test)]
mod test;

/// alias for [`f64`]
pub type Real = f64;

//! reexport for easy use,
//! `use newman_ziff::prelude::*`

#[cfg(feature = "serde-serialize")]
pub use super::config::SimulationConfig;
pub use super::{
    lattice::{LatticeCyclic, NeighborTable, SquareLattice},
    percolation::{EngineState, FindStrategy, NewmanZiff, StepRecord},
    permutation::OccupationOrder,
    report::{LineReporter, Reporter},
    rng::{AdditiveRng, RandSource, UniformSource},
    Real,
};

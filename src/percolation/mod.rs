//! Newman-Ziff site percolation.
//!
//! Sites are occupied one by one in the order of an [`OccupationOrder`]. After each
//! occupation the new site is merged with the components of its occupied neighbors
//! using a weighted union-find [`Forest`], and the size of the largest component is
//! reported. A whole run costs `O(N)` amortized union-find operations and gives the
//! largest component for every number of occupied sites at once.
//!
//! # Example
//! ```
//! # use newman_ziff::{
//! #     lattice::SquareLattice,
//! #     percolation::{FindStrategy, NewmanZiff, StepRecord},
//! #     permutation::OccupationOrder,
//! #     rng::AdditiveRng,
//! # };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let lattice = SquareLattice::new(16)?;
//! let table = lattice.neighbor_table();
//! let mut rng = AdditiveRng::with_seed(7);
//! let order = OccupationOrder::new(lattice.number_of_points(), &mut rng);
//! let engine = NewmanZiff::new(&table, order, FindStrategy::PathHalving)?;
//! let records: Vec<StepRecord> = engine.collect();
//! assert_eq!(records.len(), 256);
//! assert_eq!(records.last().map(|r| r.largest()), Some(256));
//! # Ok(())
//! # }
//! ```

mod forest;

use std::fmt::{self, Display};
use std::iter::FusedIterator;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

pub use self::forest::{FindStrategy, Forest, SiteState};
use crate::error::SimulationError;
use crate::lattice::NeighborTable;
use crate::permutation::OccupationOrder;
use crate::report::Reporter;
use crate::rng::UniformSource;

/// Result of one activation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct StepRecord {
    /// number of occupied sites, starting at 1
    step: usize,
    /// size of the largest component after the step
    largest: usize,
}

impl StepRecord {
    /// Create a new record.
    #[must_use]
    #[inline]
    pub const fn new(step: usize, largest: usize) -> Self {
        Self { step, largest }
    }

    getter_copy!(
        const,
        /// Number of occupied sites after the step, one based.
        step,
        usize
    );

    getter_copy!(
        const,
        /// Size of the largest component after the step.
        largest,
        usize
    );
}

/// `"<step> <largest>"`
impl Display for StepRecord {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.step, self.largest)
    }
}

/// Where an engine is in its run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum EngineState {
    /// No site is occupied yet.
    NotStarted,
    /// Some but not all sites are occupied.
    Running,
    /// All sites are occupied.
    Done,
}

/// Newman-Ziff percolation engine on a fixed topology.
///
/// The engine is an [`Iterator`] over the [`StepRecord`], it yields exactly one record
/// per site and then stops for good.
#[derive(Clone, Debug)]
pub struct NewmanZiff<'a> {
    neighbors: &'a NeighborTable,
    order: OccupationOrder,
    forest: Forest,
    largest: usize,
    steps_done: usize,
}

impl<'a> NewmanZiff<'a> {
    /// Create an engine occupying the sites of `neighbors` in the order `order`.
    ///
    /// # Errors
    /// Returns [`SimulationError::IncompatibleSize`] if the order and the table do not
    /// have the same number of sites.
    pub fn new(
        neighbors: &'a NeighborTable,
        order: OccupationOrder,
        strategy: FindStrategy,
    ) -> Result<Self, SimulationError> {
        let sites = neighbors.number_of_sites();
        if order.len() != sites {
            return Err(SimulationError::IncompatibleSize {
                sites,
                order: order.len(),
            });
        }
        Ok(Self {
            neighbors,
            order,
            forest: Forest::new(sites, strategy),
            largest: 0,
            steps_done: 0,
        })
    }

    /// Create an engine with a random occupation order drawn from `source`.
    #[must_use]
    pub fn from_source(
        neighbors: &'a NeighborTable,
        source: impl UniformSource,
        strategy: FindStrategy,
    ) -> Self {
        let sites = neighbors.number_of_sites();
        Self {
            neighbors,
            order: OccupationOrder::new(sites, source),
            forest: Forest::new(sites, strategy),
            largest: 0,
            steps_done: 0,
        }
    }

    /// The topology.
    #[must_use]
    #[inline]
    pub const fn neighbors(&self) -> &'a NeighborTable {
        self.neighbors
    }

    getter!(
        const,
        /// The occupation order.
        order,
        OccupationOrder
    );

    getter!(
        const,
        /// The union-find forest, it can be inspected between steps.
        forest,
        Forest
    );

    getter_copy!(
        const,
        /// Size of the largest component so far, 0 before the first step.
        largest,
        usize
    );

    getter_copy!(
        const,
        /// Number of steps done, which is the number of occupied sites.
        steps_done,
        usize
    );

    /// Total number of sites `N`, which is the number of steps of a run.
    #[must_use]
    #[inline]
    pub fn number_of_sites(&self) -> usize {
        self.order.len()
    }

    /// Where the engine is in its run.
    #[must_use]
    #[inline]
    pub fn state(&self) -> EngineState {
        if self.steps_done == 0 && !self.order.is_empty() {
            EngineState::NotStarted
        } else if self.steps_done < self.order.len() {
            EngineState::Running
        } else {
            EngineState::Done
        }
    }

    /// Occupy the next site of the order and merge it with its occupied neighbors.
    ///
    /// Returns [`None`] once all the sites are occupied.
    ///
    /// # Panics
    /// Panics if the topology refers to a site out of range.
    pub fn activate_next(&mut self) -> Option<StepRecord> {
        let site = *self.order.as_slice().get(self.steps_done)?;
        let neighbors: &'a NeighborTable = self.neighbors;

        self.forest.activate(site);
        self.largest = self.largest.max(1);
        let mut root = site;
        for &neighbor in neighbors.neighbors(site) {
            if !self.forest.is_active(neighbor) {
                continue;
            }
            let neighbor_root = self.forest.find(neighbor);
            if neighbor_root == root {
                continue;
            }
            root = self.forest.union(root, neighbor_root);
            self.largest = self.largest.max(self.forest.root_size(root));
        }

        self.steps_done += 1;
        Some(StepRecord::new(self.steps_done, self.largest))
    }

    /// Run the remaining steps, sending every record to `reporter`.
    /// Returns the size of the largest component at the end.
    ///
    /// # Errors
    /// Stops at the first error of the reporter and returns it. The engine can be
    /// resumed afterward, the step whose record failed is not replayed.
    pub fn run<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Result<usize, R::Error> {
        while let Some(record) = self.activate_next() {
            reporter.record(record)?;
        }
        Ok(self.largest)
    }
}

impl<'a> Iterator for NewmanZiff<'a> {
    type Item = StepRecord;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.activate_next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.order.len() - self.steps_done;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for NewmanZiff<'a> {}

impl<'a> FusedIterator for NewmanZiff<'a> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lattice::SquareLattice;
    use crate::rng::AdditiveRng;

    fn square_table(l: usize) -> NeighborTable {
        SquareLattice::new(l)
            .expect("valid lattice")
            .neighbor_table()
    }

    /// All the permutations of `0..n`, by Heap's algorithm.
    fn permutations(n: usize) -> Vec<Vec<usize>> {
        fn heap(k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
            if k <= 1 {
                out.push(current.clone());
                return;
            }
            for i in 0..k - 1 {
                heap(k - 1, current, out);
                if k % 2 == 0 {
                    current.swap(i, k - 1);
                } else {
                    current.swap(0, k - 1);
                }
            }
            heap(k - 1, current, out);
        }
        let mut out = Vec::new();
        heap(n, &mut (0..n).collect(), &mut out);
        out
    }

    #[test]
    fn single_site() {
        let table = square_table(1);
        let order = OccupationOrder::identity(1);
        let mut engine =
            NewmanZiff::new(&table, order, FindStrategy::PathHalving).expect("valid size");
        assert_eq!(engine.state(), EngineState::NotStarted);
        assert_eq!(engine.activate_next(), Some(StepRecord::new(1, 1)));
        assert_eq!(engine.forest().state(0), SiteState::Root { size: 1 });
        assert_eq!(engine.state(), EngineState::Done);
        assert_eq!(engine.activate_next(), None);
        assert_eq!(engine.next(), None);
    }

    #[test]
    fn two_by_two_torus() {
        let table = square_table(2);
        let all = permutations(4);
        assert_eq!(all.len(), 24);
        for strategy in [FindStrategy::PathHalving, FindStrategy::FullCompression] {
            for order in &all {
                let order = OccupationOrder::from_vec(order.clone()).expect("permutation");
                let engine = NewmanZiff::new(&table, order, strategy).expect("valid size");
                let records: Vec<_> = engine.collect();
                let largest: Vec<_> = records.iter().map(StepRecord::largest).collect();
                assert_eq!(largest[3], 4);
                assert!(largest[2] == 3, "{:?}", largest);
                assert!(largest[0] == 1);
            }
        }
    }

    #[test]
    fn aliased_neighbors_count_once() {
        // on the 2x2 torus site 0 has the slots [1, 1, 2, 2]
        let table = square_table(2);
        let order = OccupationOrder::from_vec(vec![1, 2, 0, 3]).expect("permutation");
        let mut engine =
            NewmanZiff::new(&table, order, FindStrategy::PathHalving).expect("valid size");
        assert_eq!(engine.activate_next(), Some(StepRecord::new(1, 1)));
        // 1 and 2 are diagonal
        assert_eq!(engine.activate_next(), Some(StepRecord::new(2, 1)));
        assert_eq!(engine.activate_next(), Some(StepRecord::new(3, 3)));
        assert_eq!(engine.forest().component_size(0), Some(3));
        assert!(engine.forest().check_consistency().is_ok());
        assert_eq!(engine.activate_next(), Some(StepRecord::new(4, 4)));
    }

    #[test]
    fn tie_keeps_the_activated_root() {
        let table = square_table(2);
        let order = OccupationOrder::from_vec(vec![0, 1, 2, 3]).expect("permutation");
        let mut engine =
            NewmanZiff::new(&table, order, FindStrategy::PathHalving).expect("valid size");
        let _ = engine.activate_next();
        let _ = engine.activate_next();
        assert_eq!(engine.forest().state(0), SiteState::Child { parent: 1 });
        assert_eq!(engine.forest().to_pointer_encoding(), vec![1, -2, -5, -5]);
    }

    #[test]
    fn invariants_along_a_run() {
        let table = square_table(12);
        for strategy in [FindStrategy::PathHalving, FindStrategy::FullCompression] {
            let mut engine =
                NewmanZiff::from_source(&table, AdditiveRng::with_seed(2022), strategy);
            assert!(engine.order().is_permutation());
            assert_eq!(engine.len(), 144);
            let mut previous = 0;
            while let Some(record) = engine.activate_next() {
                assert_eq!(record.step(), engine.steps_done());
                assert!(record.largest() >= previous);
                assert!(record.largest() <= record.step());
                previous = record.largest();

                let forest = engine.forest();
                assert!(forest.check_consistency().is_ok());
                let total: usize = forest.components().map(|(_, size)| size).sum();
                assert_eq!(total, record.step());
                assert_eq!(forest.number_of_active_sites(), record.step());
                let max = forest.components().map(|(_, size)| size).max();
                assert_eq!(max, Some(record.largest()));
            }
            assert_eq!(engine.state(), EngineState::Done);
            assert_eq!(engine.largest(), 144);
        }
    }

    #[test]
    fn strategies_agree() {
        let table = square_table(20);
        let run = |strategy| {
            NewmanZiff::from_source(&table, AdditiveRng::with_seed(5), strategy)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            run(FindStrategy::PathHalving),
            run(FindStrategy::FullCompression)
        );
    }

    #[test]
    fn deterministic() {
        let table = square_table(16);
        let run = |seed| {
            NewmanZiff::from_source(&table, AdditiveRng::with_seed(seed), FindStrategy::default())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
        assert_ne!(run(11), run(12));
    }

    #[test]
    fn run_with_reporter() {
        let table = square_table(4);
        let mut engine =
            NewmanZiff::from_source(&table, AdditiveRng::with_seed(1), FindStrategy::default());
        let _ = engine.activate_next();
        let mut records = Vec::new();
        let result = engine.run(&mut records);
        assert_eq!(result, Ok(16));
        assert_eq!(records.len(), 15);
        assert_eq!(records[0].step(), 2);
        assert_eq!(engine.size_hint(), (0, Some(0)));
    }

    #[test]
    fn incompatible_size() {
        let table = square_table(3);
        let result = NewmanZiff::new(
            &table,
            OccupationOrder::identity(4),
            FindStrategy::PathHalving,
        );
        assert_eq!(
            result.err(),
            Some(SimulationError::IncompatibleSize { sites: 9, order: 4 })
        );
    }

    #[test]
    #[should_panic]
    fn site_out_of_range() {
        let table = NeighborTable::new(1, vec![1, 0]).expect("valid table");
        let order = OccupationOrder::identity(2);
        let mut engine =
            NewmanZiff::new(&table, order, FindStrategy::PathHalving).expect("valid size");
        // site 1 is outside of this forest
        engine.forest = Forest::new(1, FindStrategy::PathHalving);
        let _ = engine.activate_next();
    }

    #[test]
    fn step_record_display() {
        assert_eq!(StepRecord::new(12, 7).to_string(), "12 7");
    }
}

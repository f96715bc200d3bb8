//! Module for tests across the modules of the crate.

use std::collections::VecDeque;
use std::error::Error;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::{
    error::*, lattice::*, percolation::*, permutation::*, report::*, rng::*, statistics::*, Real,
};


const SEED_RNG: u64 = 0x45_78_93_f4_4a_b0_67_f0;

/// Largest cluster among the `occupied` sites, by breadth first search.
fn largest_cluster_bfs(table: &NeighborTable, occupied: &[bool]) -> usize {
    let mut visited = vec![false; occupied.len()];
    let mut largest: usize = 0;
    for start in 0..occupied.len() {
        if !occupied[start] || visited[start] {
            continue;
        }
        visited[start] = true;
        let mut queue = VecDeque::from([start]);
        let mut size: usize = 0;
        while let Some(site) = queue.pop_front() {
            size += 1;
            for &neighbor in table.neighbors(site) {
                if occupied[neighbor] && !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        largest = largest.max(size);
    }
    largest
}

/// Check every step of a run against a search from scratch.
fn check_against_bfs(table: &NeighborTable, order: OccupationOrder, strategy: FindStrategy) {
    let mut occupied = vec![false; table.number_of_sites()];
    let sites = order.as_slice().to_vec();
    let engine = NewmanZiff::new(table, order, strategy).expect("same number of sites");
    for (site, record) in sites.into_iter().zip(engine) {
        occupied[site] = true;
        assert_eq!(
            record.largest(),
            largest_cluster_bfs(table, &occupied),
            "step {}",
            record.step()
        );
    }
}

#[test]
fn engine_matches_bfs_on_square_lattices() {
    let mut rng = AdditiveRng::with_seed(31_415);
    for l in [1, 2, 3, 5, 8, 13] {
        let table = SquareLattice::new(l)
            .expect("valid lattice")
            .neighbor_table();
        for strategy in [FindStrategy::PathHalving, FindStrategy::FullCompression] {
            let order = OccupationOrder::new(table.number_of_sites(), &mut rng);
            check_against_bfs(&table, order, strategy);
        }
    }
}

#[test]
fn engine_matches_bfs_on_other_topologies() {
    let mut source = RandSource::new(Xoshiro256PlusPlus::seed_from_u64(SEED_RNG));
    let table = LatticeCyclic::<3>::new(5)
        .expect("valid lattice")
        .neighbor_table();
    check_against_bfs(
        &table,
        OccupationOrder::new(table.number_of_sites(), &mut source),
        FindStrategy::PathHalving,
    );

    // an open chain of 50 sites, the ends only see themselves on the missing side
    let n: usize = 50;
    let data = (0..n)
        .flat_map(|i| [if i + 1 < n { i + 1 } else { i }, i.saturating_sub(1)])
        .collect();
    let table = NeighborTable::new(2, data).expect("valid table");
    check_against_bfs(
        &table,
        OccupationOrder::new(n, &mut source),
        FindStrategy::FullCompression,
    );
}

#[test]
fn chain_in_order() {
    // ring of 10 sites occupied in order: a single growing cluster
    let n = 10;
    let data = (0..n).flat_map(|i| [(i + 1) % n, (i + n - 1) % n]).collect();
    let table = NeighborTable::new(2, data).expect("valid table");
    let engine = NewmanZiff::new(&table, OccupationOrder::identity(n), FindStrategy::default())
        .expect("same number of sites");
    for record in engine {
        assert_eq!(record.largest(), record.step());
    }
}

#[test]
fn streamed_lines_match_records() {
    let table = SquareLattice::new(6)
        .expect("valid lattice")
        .neighbor_table();
    let records: Vec<StepRecord> =
        NewmanZiff::from_source(&table, AdditiveRng::with_seed(8), FindStrategy::default())
            .collect();

    let mut engine =
        NewmanZiff::from_source(&table, AdditiveRng::with_seed(8), FindStrategy::default());
    let mut reporter = LineReporter::new(Vec::new());
    let largest = engine.run(&mut reporter).expect("writing in a vec");
    assert_eq!(largest, 36);
    assert_eq!(reporter.lines(), 36);

    let text = String::from_utf8(reporter.into_inner()).expect("valid utf-8");
    let expected: String = records.iter().map(|r| format!("{}\n", r)).collect();
    assert_eq!(text, expected);
    assert!(text.starts_with("1 1\n"));
    assert!(text.ends_with("36 36\n"));
}

#[test]
fn replay_a_recorded_order() {
    let table = SquareLattice::new(10)
        .expect("valid lattice")
        .neighbor_table();
    let engine =
        NewmanZiff::from_source(&table, AdditiveRng::with_seed(77), FindStrategy::default());
    let recorded = engine.order().as_slice().to_vec();
    let first: Vec<_> = engine.collect();

    let order = OccupationOrder::from_vec(recorded).expect("valid permutation");
    let replay: Vec<_> = NewmanZiff::new(&table, order, FindStrategy::FullCompression)
        .expect("same number of sites")
        .collect();
    assert_eq!(first, replay);
}

#[test]
fn pointer_encoding_of_a_full_run() {
    let table = SquareLattice::new(4)
        .expect("valid lattice")
        .neighbor_table();
    let mut engine =
        NewmanZiff::from_source(&table, AdditiveRng::with_seed(4), FindStrategy::default());
    let empty = engine.forest().to_pointer_encoding();
    assert!(empty.iter().all(|value| *value == -17));
    while engine.next().is_some() {}
    let encoding = engine.forest().to_pointer_encoding();
    assert_eq!(encoding.iter().filter(|value| **value == -16).count(), 1);
    assert!(encoding
        .iter()
        .all(|value| *value == -16 || (0..16).contains(value)));
    assert_eq!(engine.forest().check_consistency(), Ok(()));
}

#[test]
fn percolation_transition() -> Result<(), StatisticsError> {
    let l = 64;
    let lattice = SquareLattice::new(l).expect("valid lattice");
    let table = lattice.neighbor_table();
    let n = lattice.number_of_points();

    let curves = (1_u64..=4)
        .map(|seed| {
            let records: Vec<_> = NewmanZiff::from_source(
                &table,
                AdditiveRng::with_seed(seed),
                FindStrategy::default(),
            )
            .collect();
            microcanonical_largest(&records, n)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let average: Vec<Real> = average_curves(&curves)?
        .into_iter()
        .map(|[mean, _]| mean / n as Real)
        .collect();

    let strength = canonical_curve(&average, &[0.3_f64, 0.8_f64, 1_f64])?;
    assert!(strength[0] < 0.05_f64, "{:?}", strength);
    assert!(strength[1] > 0.7_f64, "{:?}", strength);
    assert!((strength[2] - 1_f64).abs() < 1E-12_f64);
    Ok(())
}

#[test]
fn error_display() {
    let err = SimulationError::IncompatibleSize { sites: 9, order: 4 };
    assert_eq!(
        err.to_string(),
        "the topology has 9 sites but the occupation order has 4 entries"
    );
    assert!(err.source().is_none());
    assert_eq!(
        LatticeCyclic::<2>::new(0).map(|lattice| lattice.number_of_points()),
        Err(LatticeInitializationError::DimTooSmall)
    );
}

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use newman_ziff::{
    lattice::{NeighborTable, SquareLattice},
    percolation::{FindStrategy, NewmanZiff},
    permutation::OccupationOrder,
    rng::{AdditiveRng, RandSource, UniformSource},
    statistics::{canonical_curve, microcanonical_largest},
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn full_run(table: &NeighborTable, order: &OccupationOrder, strategy: FindStrategy) -> usize {
    let engine = NewmanZiff::new(table, order.clone(), strategy).unwrap();
    engine.last().map_or(0, |record| record.largest())
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("additive rng seeding", |b| {
        b.iter(|| AdditiveRng::with_seed(black_box(1)))
    });

    let mut rng = AdditiveRng::with_seed(1);
    c.bench_function("additive rng draw", |b| b.iter(|| rng.next_uniform()));
    let mut source = RandSource::new(Xoshiro256PlusPlus::seed_from_u64(1));
    c.bench_function("xoshiro draw", |b| b.iter(|| source.next_uniform()));

    c.bench_function("neighbor table 128", |b| {
        let lattice = SquareLattice::new(128).unwrap();
        b.iter(|| lattice.neighbor_table())
    });

    let mut group = c.benchmark_group("full run");
    for l in [32, 128, 256] {
        let table = SquareLattice::new(l).unwrap().neighbor_table();
        let order = OccupationOrder::new(table.number_of_sites(), &mut rng);
        for strategy in [FindStrategy::PathHalving, FindStrategy::FullCompression] {
            group.bench_with_input(BenchmarkId::new(format!("{:?}", strategy), l), &l, |b, _| {
                b.iter(|| full_run(&table, &order, strategy))
            });
        }
    }
    group.finish();

    let table = SquareLattice::new(128).unwrap().neighbor_table();
    let records: Vec<_> =
        NewmanZiff::from_source(&table, &mut rng, FindStrategy::default()).collect();
    let q_n = microcanonical_largest(&records, table.number_of_sites()).unwrap();
    let probabilities: Vec<f64> = (0..100).map(|i| f64::from(i) / 100_f64).collect();
    c.bench_function("canonical curve 128", |b| {
        b.iter(|| canonical_curve(&q_n, &probabilities).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

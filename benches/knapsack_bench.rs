//! Criterion benchmarks for the exact knapsack solvers.
//!
//! Uses seeded generated instances so runs are comparable across changes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_knapsack::backtracking::BacktrackingSolver;
use u_knapsack::bnb::{BnbConfig, BnbSolver};
use u_knapsack::dp::{DpConfig, DpSolver};
use u_knapsack::instance::{GeneratorConfig, Instance, InstanceGenerator};

fn instance(n: usize, capacity_weight: u64, capacity_volume: u64) -> Instance {
    let config = GeneratorConfig::new(n, capacity_weight, capacity_volume).with_seed(42);
    InstanceGenerator::generate(&config).unwrap()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_dp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dp");
    group.sample_size(10);

    for (n, w, v) in [(20usize, 50u64, 50u64), (50, 100, 100), (100, 200, 100)] {
        let inst = instance(n, w, v);
        let config = DpConfig::default();
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_W{}_V{}", n, w, v), n),
            &(inst, config),
            |b, (i, c)| {
                b.iter(|| {
                    let result = DpSolver::run(black_box(i), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_backtracking(c: &mut Criterion) {
    let mut group = c.benchmark_group("backtracking");
    group.sample_size(10);

    for &n in &[10usize, 15, 20] {
        let inst = instance(n, 50, 50);
        group.bench_with_input(BenchmarkId::from_parameter(n), &inst, |b, i| {
            b.iter(|| {
                let result = BacktrackingSolver::run(black_box(i));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_bnb(c: &mut Criterion) {
    let mut group = c.benchmark_group("branch_and_bound");
    group.sample_size(10);

    for &n in &[20usize, 50, 100] {
        let inst = instance(n, 100, 100);
        for warm in [false, true] {
            let config = BnbConfig::default().with_greedy_warm_start(warm);
            let label = if warm { "warm" } else { "cold" };
            group.bench_with_input(
                BenchmarkId::new(label, n),
                &(inst.clone(), config),
                |b, (i, c)| {
                    b.iter(|| {
                        let result = BnbSolver::run(black_box(i), black_box(c));
                        black_box(result)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_dp, bench_backtracking, bench_bnb);
criterion_main!(benches);

//! Criterion benchmarks for u-counterpoint.
//!
//! Measures the fitness evaluator on its own and full GA runs on the
//! church-mode presets.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_counterpoint::cantus::Mode;
use u_counterpoint::fitness::{score, FitnessWeights};
use u_counterpoint::ga::{GaConfig, GeneticAlgorithm};
use u_counterpoint::random::create_rng;

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let weights = FitnessWeights::default();
    let mut rng = create_rng(42);

    for &len in &[11usize, 50, 200] {
        let cantus: Vec<u8> = (0..len).map(|_| rng.random_range(1..=17)).collect();
        let candidate: Vec<u8> = (0..len).map(|_| rng.random_range(1..=17)).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(len),
            &(candidate, cantus),
            |b, (cp, cf)| b.iter(|| black_box(score(black_box(cp), black_box(cf), &weights))),
        );
    }
    group.finish();
}

fn bench_ga_presets(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_presets");
    group.sample_size(10);

    for mode in Mode::ALL {
        for (pop, gen) in [(50usize, 20usize), (200, 50)] {
            let config = GaConfig::default()
                .with_population_size(pop)
                .with_generations(gen)
                .with_seed(42);
            group.bench_with_input(
                BenchmarkId::new(format!("{mode}_p{pop}_g{gen}"), pop),
                &config,
                |b, c| {
                    b.iter(|| {
                        let result = GeneticAlgorithm::run(black_box(mode.notes()), black_box(c));
                        black_box(result)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_score, bench_ga_presets);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ccga::{
    evolution::{CoevolutionLauncher, CoevolutionOptions},
    functions::BenchmarkFunction,
    ga::{GaOptions, GeneticAlgorithm},
    local_search::HillClimbing,
    operators::{two_point_crossover, BitFlipMutation},
    population::Individual,
    rng::RandomNumberGenerator,
};

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("operators");

    group.bench_function("two_point_crossover", |b| {
        b.iter(|| two_point_crossover(black_box(61345), black_box(1235)))
    });

    let mutation = BitFlipMutation::new(1.0 / 320.0).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(1);
    let mut individual = Individual::with_collaboration(0, vec![0x1234; 20]).unwrap();
    group.bench_function("bit_flip_mutation_20_genes", |b| {
        b.iter(|| mutation.mutate(black_box(&mut individual), &mut rng))
    });

    group.finish();
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("algorithms");
    group.sample_size(10);

    for function in [BenchmarkFunction::Rastrigin, BenchmarkFunction::Schwefel] {
        let ccga_options = CoevolutionOptions::builder()
            .evaluation_budget(10_000)
            .species_count(function.dimensions())
            .population_size(50)
            .mutation_probability(function.mutation_probability())
            .build()
            .unwrap();
        let ga_options = GaOptions::builder()
            .evaluation_budget(10_000)
            .dimensions(function.dimensions())
            .population_size(50)
            .mutation_probability(function.mutation_probability())
            .build()
            .unwrap();

        let ccga = CoevolutionLauncher::new(function);
        group.bench_with_input(
            BenchmarkId::new("ccga", function.name()),
            &ccga_options,
            |b, options| {
                b.iter(|| {
                    let result = ccga.evolve(
                        black_box(options),
                        &mut RandomNumberGenerator::from_seed(42),
                    );
                    assert!(result.is_ok());
                })
            },
        );

        let ccga_hc = CoevolutionLauncher::new(function).with_local_search(HillClimbing::default());
        group.bench_with_input(
            BenchmarkId::new("ccga_hc", function.name()),
            &ccga_options,
            |b, options| {
                b.iter(|| {
                    let result = ccga_hc.evolve(
                        black_box(options),
                        &mut RandomNumberGenerator::from_seed(42),
                    );
                    assert!(result.is_ok());
                })
            },
        );

        let ga = GeneticAlgorithm::new(function);
        group.bench_with_input(
            BenchmarkId::new("ga", function.name()),
            &ga_options,
            |b, options| {
                b.iter(|| {
                    let result = ga.evolve(
                        black_box(options),
                        &mut RandomNumberGenerator::from_seed(42),
                    );
                    assert!(result.is_ok());
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_operators, bench_algorithms);
criterion_main!(benches);

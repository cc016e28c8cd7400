use ccga::{
    evolution::{Budget, CoevolutionLauncher, CoevolutionOptions},
    functions::BenchmarkFunction,
    local_search::{HillClimbing, LocalSearch},
    population::{Candidate, Individual},
    rng::RandomNumberGenerator,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn options(budget: Budget, species_count: usize) -> CoevolutionOptions {
    CoevolutionOptions::builder()
        .budget(budget)
        .species_count(species_count)
        .population_size(10)
        .build()
        .unwrap()
}

#[test]
fn test_hill_climbing_evaluations_are_charged() {
    init_tracing();
    let function = |genes: &[u16]| genes.iter().map(|&g| f64::from(g)).sum::<f64>();
    let launcher = CoevolutionLauncher::new(function).with_local_search(HillClimbing::default());

    let result = launcher
        .evolve(
            &options(Budget::Generations(1), 3),
            &mut RandomNumberGenerator::from_seed(12),
        )
        .unwrap();

    // Baseline and one generation of rescoring, plus at most 20 climbs per elite
    assert!(result.evaluations > 60);
    assert!(result.evaluations <= 60 + 3 * 20);
}

#[test]
fn test_ccga_hc_is_deterministic() {
    let launcher = CoevolutionLauncher::new(BenchmarkFunction::Griewangk)
        .with_local_search(HillClimbing::new(10, 2500.0).unwrap());
    let options = options(Budget::Evaluations(3_000), 10);

    let first = launcher
        .evolve(&options, &mut RandomNumberGenerator::from_seed(77))
        .unwrap();
    let second = launcher
        .evolve(&options, &mut RandomNumberGenerator::from_seed(77))
        .unwrap();

    assert_eq!(first, second);
    assert!(first.best_fitness <= first.history[0].fitness);
}

#[test]
fn test_ccga_hc_beats_its_baseline_on_rastrigin() {
    init_tracing();
    let function = BenchmarkFunction::Rastrigin;
    let launcher = CoevolutionLauncher::new(function).with_local_search(HillClimbing::default());
    let options = CoevolutionOptions::builder()
        .evaluation_budget(20_000)
        .species_count(function.dimensions())
        .population_size(30)
        .mutation_probability(function.mutation_probability())
        .build()
        .unwrap();

    let result = launcher
        .evolve(&options, &mut RandomNumberGenerator::from_seed(6))
        .unwrap();

    assert!(result.best_fitness < result.history[0].fitness);
    assert_eq!(function.evaluate(&result.best_collaboration), result.best_fitness);
}

#[test]
fn test_hill_climbing_on_a_benchmark_elite() {
    let function = BenchmarkFunction::Schwefel;
    let climber = HillClimbing::default();
    let mut rng = RandomNumberGenerator::from_seed(40);

    let collaboration: Vec<u16> = (1..=10).collect();
    let mut elite = Individual::with_collaboration(3, collaboration).unwrap();
    let start = function.evaluate(elite.collaboration());
    elite.record_fitness(start, 3000.0);

    let outcome = climber.search(&mut elite, &function, 3000.0, &mut rng).unwrap();

    assert!(elite.fitness() <= start);
    assert_eq!(outcome.improved, elite.fitness() < start);
    assert_eq!(function.evaluate(elite.collaboration()), elite.fitness());
    assert_eq!(elite.collaboration()[3], elite.gene());
    assert!((elite.scaled_fitness() - (3000.0 - elite.fitness()).abs()).abs() < 1e-9);
}

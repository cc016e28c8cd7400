pub mod launcher;
pub mod options;

pub use launcher::{CoevolutionLauncher, EvolutionResult, FitnessRecord};
pub use options::{Budget, CoevolutionOptions, CoevolutionOptionsBuilder, OffspringChoice};

use crate::error::Result;
use crate::fitness::Objective;
use crate::rng::RandomNumberGenerator;

/// Runs plain CCGA-1 with default operator settings.
///
/// Exactly one of `evaluation_budget` and `generation_budget` must be
/// non-zero. The run is fully determined by `seed`.
///
/// # Errors
///
/// Returns a configuration error for an invalid budget, shape or mutation
/// probability, and propagates objective failures.
///
/// ```rust
/// use ccga::evolution::run;
/// use ccga::functions::BenchmarkFunction;
///
/// let function = BenchmarkFunction::Schwefel;
/// let result = run(
///     0,
///     5,
///     20,
///     function.dimensions(),
///     function,
///     function.mutation_probability(),
///     7,
/// )
/// .unwrap();
///
/// assert_eq!(result.generations, 5);
/// assert_eq!(result.best_collaboration.len(), 10);
/// ```
pub fn run<O: Objective>(
    evaluation_budget: usize,
    generation_budget: usize,
    population_size: usize,
    species_count: usize,
    objective: O,
    mutation_probability: f64,
    seed: u64,
) -> Result<EvolutionResult> {
    let options = CoevolutionOptions::builder()
        .budget(Budget::from_limits(evaluation_budget, generation_budget)?)
        .population_size(population_size)
        .species_count(species_count)
        .mutation_probability(mutation_probability)
        .build()?;

    CoevolutionLauncher::new(objective)
        .evolve(&options, &mut RandomNumberGenerator::from_seed(seed))
}

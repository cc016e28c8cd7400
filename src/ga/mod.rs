//! # Monolithic GA
//!
//! The single-population baseline CCGA is measured against. A chromosome
//! carries the whole gene vector and is bred as one bit string; selection,
//! mutation and fitness scaling are shared with the coevolutionary engine.

pub mod chromosome;
pub mod options;

pub use chromosome::Chromosome;
pub use options::{GaOptions, GaOptionsBuilder};

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::{
    error::{GeneticError, OptionExt, Result},
    evolution::{EvolutionResult, FitnessRecord},
    fitness::{self, check_dimensions, Objective, ScalingWindow},
    operators::{two_point_crossover_genes, BitFlipMutation, Gene, Genome},
    population::{sort_by_fitness, Candidate},
    rng::RandomNumberGenerator,
    selection::RouletteWheelSelection,
};

/// Drives the monolithic genetic algorithm.
///
/// # Examples
///
/// ```rust
/// use ccga::functions::BenchmarkFunction;
/// use ccga::ga::{GaOptions, GeneticAlgorithm};
/// use ccga::rng::RandomNumberGenerator;
///
/// let function = BenchmarkFunction::Griewangk;
/// let options = GaOptions::builder()
///     .evaluation_budget(1_000)
///     .dimensions(function.dimensions())
///     .population_size(50)
///     .build()
///     .unwrap();
///
/// let result = GeneticAlgorithm::new(function)
///     .evolve(&options, &mut RandomNumberGenerator::from_seed(1))
///     .unwrap();
///
/// assert_eq!(result.evaluations, 1_000);
/// assert!(result.best_fitness <= result.history[0].fitness);
/// ```
#[derive(Debug)]
pub struct GeneticAlgorithm<O: Objective> {
    objective: O,
}

impl<O: Objective> GeneticAlgorithm<O> {
    pub fn new(objective: O) -> Self {
        Self { objective }
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Runs the GA until the budget in `options` is spent.
    ///
    /// Each generation crosses every non-elite chromosome with a
    /// roulette-selected partner (with the configured probability), mutates
    /// the non-elites, rescores the population and updates the scaling window.
    ///
    /// # Errors
    ///
    /// Fails if the objective's dimensionality differs from the configured
    /// one or if it returns a non-finite value.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            dimensions = options.get_dimensions(),
            population_size = options.get_population_size(),
        )
    )]
    pub fn evolve(
        &self,
        options: &GaOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult> {
        check_dimensions(&self.objective, options.get_dimensions())?;

        let mutation = BitFlipMutation::new(options.get_mutation_probability())?;
        let roulette = RouletteWheelSelection::new();
        let mut window = ScalingWindow::new(options.get_scaling_window())?;
        let parallel = options.get_population_size() >= options.get_parallel_threshold();

        let mut population: Vec<Chromosome> = (0..options.get_population_size())
            .map(|_| Chromosome::random(options.get_dimensions(), rng))
            .collect();

        info!(budget = ?options.get_budget(), parallel, "starting genetic algorithm");

        let mut evaluations = self.score(&mut population, 0.0, parallel)?;
        let (mut best_fitness, mut best_genes) = fittest(&population)?;
        let mut history = vec![FitnessRecord {
            generation: 0,
            evaluations,
            fitness: best_fitness,
        }];
        window.push_worst(worst(&population));

        let budget = options.get_budget();
        let mut generation = 0;

        while budget.allows(generation, evaluations) {
            roulette.setup(&mut population)?;
            let parents: Vec<Vec<Gene>> = population.iter().map(|c| c.genes().to_vec()).collect();

            for index in 1..population.len() {
                if !rng.chance(options.get_crossover_probability()) {
                    continue;
                }
                let partner = &parents[roulette.select_index(&population, rng)?];
                let (child_a, child_b) = two_point_crossover_genes(&parents[index], partner)?;
                population[index].set_genes(if rng.coin_flip() { child_a } else { child_b });
            }

            for chromosome in population.iter_mut().skip(1) {
                mutation.mutate(chromosome, rng);
            }

            evaluations += self.score(&mut population, window.f_max(), parallel)?;
            generation += 1;

            let (generation_best, generation_genes) = fittest(&population)?;
            if generation_best < best_fitness {
                best_fitness = generation_best;
                best_genes = generation_genes;
                history.push(FitnessRecord {
                    generation,
                    evaluations,
                    fitness: best_fitness,
                });
            }

            let f_max = window.push_worst(worst(&population));
            debug!(generation, evaluations, best_fitness, f_max, "generation complete");
        }

        info!(
            generations = generation,
            evaluations, best_fitness, "genetic algorithm finished"
        );

        Ok(EvolutionResult {
            history,
            best_fitness,
            best_collaboration: best_genes,
            evaluations,
            generations: generation,
        })
    }

    /// Scores and sorts the population, returning the evaluations spent.
    fn score(&self, population: &mut [Chromosome], f_max: f64, parallel: bool) -> Result<usize> {
        if parallel {
            population.par_iter_mut().try_for_each(|chromosome| {
                let fitness = fitness::evaluate(&self.objective, chromosome.genes())?;
                chromosome.record_fitness(fitness, f_max);
                Ok::<(), GeneticError>(())
            })?;
        } else {
            fitness::evaluate_all(&self.objective, population, f_max)?;
        }
        sort_by_fitness(population);
        Ok(population.len())
    }
}

fn fittest(population: &[Chromosome]) -> Result<(f64, Vec<Gene>)> {
    population
        .first()
        .map(|elite| (elite.fitness(), elite.genes().to_vec()))
        .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
}

fn worst(population: &[Chromosome]) -> f64 {
    population.last().map_or(f64::NEG_INFINITY, Candidate::fitness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::Budget;

    fn sum(genes: &[Gene]) -> f64 {
        genes.iter().map(|&g| f64::from(g)).sum()
    }

    fn options(budget: Budget, parallel_threshold: usize) -> GaOptions {
        GaOptions::builder()
            .budget(budget)
            .dimensions(4)
            .population_size(20)
            .parallel_threshold(parallel_threshold)
            .build()
            .unwrap()
    }

    #[test]
    fn test_generation_budget() {
        let ga = GeneticAlgorithm::new(sum);
        let result = ga
            .evolve(
                &options(Budget::Generations(7), 1000),
                &mut RandomNumberGenerator::from_seed(1),
            )
            .unwrap();

        assert_eq!(result.generations, 7);
        assert_eq!(result.evaluations, 20 * 8);
        assert_eq!(result.best_collaboration.len(), 4);
        assert_eq!(result.best_fitness, sum(&result.best_collaboration));
    }

    #[test]
    fn test_history_improves_monotonically() {
        let ga = GeneticAlgorithm::new(sum);
        let result = ga
            .evolve(
                &options(Budget::Evaluations(2_000), 1000),
                &mut RandomNumberGenerator::from_seed(2),
            )
            .unwrap();

        assert_eq!(result.history[0].evaluations, 20);
        assert!(result.history.windows(2).all(|pair| {
            pair[1].fitness < pair[0].fitness && pair[1].evaluations > pair[0].evaluations
        }));
        assert_eq!(result.history.last().unwrap().fitness, result.best_fitness);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let ga = GeneticAlgorithm::new(sum);
        let sequential = ga
            .evolve(
                &options(Budget::Generations(10), 1000),
                &mut RandomNumberGenerator::from_seed(5),
            )
            .unwrap();
        let parallel = ga
            .evolve(
                &options(Budget::Generations(10), 0),
                &mut RandomNumberGenerator::from_seed(5),
            )
            .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_rejects_mismatched_objective() {
        let ga = GeneticAlgorithm::new(crate::functions::BenchmarkFunction::Schwefel);
        let result = ga.evolve(
            &options(Budget::Generations(1), 1000),
            &mut RandomNumberGenerator::from_seed(1),
        );
        assert!(matches!(
            result,
            Err(GeneticError::DimensionMismatch {
                expected: 10,
                actual: 4
            })
        ));
    }
}

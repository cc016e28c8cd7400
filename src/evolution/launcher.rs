use rayon::prelude::*;
use tracing::{debug, info, instrument};

use super::options::{CoevolutionOptions, OffspringChoice};
use crate::{
    error::{GeneticError, OptionExt, Result},
    fitness::{self, check_dimensions, Objective, ScalingWindow},
    local_search::LocalSearch,
    operators::{two_point_crossover, BitFlipMutation, Gene},
    population::{compare_fitness, Candidate, Individual, Population, Species},
    rng::RandomNumberGenerator,
    selection::RouletteWheelSelection,
};

/// Best fitness known after a number of evaluations.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessRecord {
    /// Generations completed when the record was taken, 0 for the baseline.
    pub generation: usize,
    /// Objective evaluations spent when the record was taken.
    pub evaluations: usize,
    pub fitness: f64,
}

/// Represents the outcome of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// One record for the baseline and one for every generation that
    /// improved on the best fitness, in order.
    pub history: Vec<FitnessRecord>,
    /// Lowest objective value seen.
    pub best_fitness: f64,
    /// The gene vector that scored `best_fitness`.
    pub best_collaboration: Vec<Gene>,
    /// Total objective evaluations spent, baseline included.
    pub evaluations: usize,
    /// Generations run after the baseline.
    pub generations: usize,
}

/// What one species task hands back to the coordinator.
#[derive(Debug, Clone)]
struct SpeciesReport {
    evaluations: usize,
    elite_fitness: f64,
    elite_collaboration: Vec<Gene>,
    worst_fitness: f64,
}

impl SpeciesReport {
    fn from_population(population: &Population, evaluations: usize) -> Self {
        let elite = population.elite();
        Self {
            evaluations,
            elite_fitness: elite.fitness(),
            elite_collaboration: elite.collaboration().to_vec(),
            worst_fitness: population.worst().fitness(),
        }
    }
}

/// Drives the cooperative coevolutionary GA (CCGA-1).
///
/// Every problem dimension is evolved by its own species. Individuals are
/// scored in collaboration with the current elite of every other species, so
/// a species only ever improves by cooperating with the rest. Attaching a
/// [`LocalSearch`] turns the run into CCGA-HC: each generation first refines
/// the elite of every species.
///
/// # Examples
///
/// ```rust
/// use ccga::evolution::{CoevolutionLauncher, CoevolutionOptions};
/// use ccga::local_search::HillClimbing;
/// use ccga::rng::RandomNumberGenerator;
///
/// // Distance of every gene from 1000
/// let objective = |genes: &[u16]| {
///     genes.iter().map(|&g| (f64::from(g) - 1000.0).abs()).sum::<f64>()
/// };
///
/// let options = CoevolutionOptions::builder()
///     .evaluation_budget(2_000)
///     .species_count(3)
///     .population_size(10)
///     .build()
///     .unwrap();
///
/// let launcher = CoevolutionLauncher::new(objective).with_local_search(HillClimbing::default());
/// let result = launcher
///     .evolve(&options, &mut RandomNumberGenerator::from_seed(42))
///     .unwrap();
///
/// assert_eq!(result.best_collaboration.len(), 3);
/// assert!(result.evaluations >= 2_000);
/// ```
#[derive(Debug)]
pub struct CoevolutionLauncher<O: Objective> {
    objective: O,
    local_search: Option<Box<dyn LocalSearch>>,
}

impl<O: Objective> CoevolutionLauncher<O> {
    /// Creates a plain CCGA launcher for `objective`.
    pub fn new(objective: O) -> Self {
        Self {
            objective,
            local_search: None,
        }
    }

    /// Refines every species' elite with `local_search` at the start of each
    /// generation.
    pub fn with_local_search<L: LocalSearch + 'static>(mut self, local_search: L) -> Self {
        self.local_search = Some(Box::new(local_search));
        self
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Runs the coevolution until the budget in `options` is spent.
    ///
    /// # Arguments
    ///
    /// * `options` - Validated run configuration.
    /// * `rng` - Source of all randomness; the run is reproducible from its seed.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The objective declares a dimensionality other than the species count
    /// - The objective returns a non-finite value
    ///
    /// # Performance
    ///
    /// Species are processed as parallel rayon tasks once the total number of
    /// individuals reaches the parallel threshold. Each task draws from its own
    /// random stream, so results do not depend on the execution mode.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            species_count = options.get_species_count(),
            population_size = options.get_population_size(),
            hill_climbing = self.local_search.is_some(),
        )
    )]
    pub fn evolve(
        &self,
        options: &CoevolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult> {
        let species_count = options.get_species_count();
        check_dimensions(&self.objective, species_count)?;

        let mutation = BitFlipMutation::new(options.get_mutation_probability())?;
        let mut window = ScalingWindow::new(options.get_scaling_window())?;

        let mut species = Species::new(species_count, options.get_population_size(), rng)?;
        species.init_coevolutions(rng)?;
        let mut streams = rng.fork_streams(species_count);
        let parallel = options.individual_count() >= options.get_parallel_threshold();

        info!(
            budget = ?options.get_budget(),
            parallel,
            "starting coevolution"
        );

        // Baseline: score the random collaborations without scaling
        let reports = run_species_tasks(
            parallel,
            species.populations_mut(),
            &mut streams,
            |population, _| {
                let evaluations =
                    fitness::evaluate_all(&self.objective, population.individuals_mut(), 0.0)?;
                population.sort_by_fitness();
                Ok(SpeciesReport::from_population(population, evaluations))
            },
        )?;

        let mut evaluations = total_evaluations(&reports);
        let (mut best_fitness, mut best_collaboration) = fittest(&reports)?;
        let mut history = vec![FitnessRecord {
            generation: 0,
            evaluations,
            fitness: best_fitness,
        }];
        window.push_worst(worst(&reports));

        let budget = options.get_budget();
        let mut generation = 0;

        while budget.allows(generation, evaluations) {
            let f_max = window.f_max();
            evaluations += self.climb_elites(parallel, &mut species, &mut streams, f_max)?;
            let elites = species.elite_genes();

            let reports = run_species_tasks(
                parallel,
                species.populations_mut(),
                &mut streams,
                |population, rng| {
                    self.evolve_species(population, &elites, f_max, options, &mutation, rng)
                },
            )?;

            generation += 1;
            evaluations += total_evaluations(&reports);

            let (generation_best, generation_collaboration) = fittest(&reports)?;
            if generation_best < best_fitness {
                best_fitness = generation_best;
                best_collaboration = generation_collaboration;
                history.push(FitnessRecord {
                    generation,
                    evaluations,
                    fitness: best_fitness,
                });
            }

            let f_max = window.push_worst(worst(&reports));
            debug!(generation, evaluations, best_fitness, f_max, "generation complete");
        }

        info!(
            generations = generation,
            evaluations, best_fitness, "coevolution finished"
        );

        Ok(EvolutionResult {
            history,
            best_fitness,
            best_collaboration,
            evaluations,
            generations: generation,
        })
    }

    /// Refines the elite of every species with the attached local search and
    /// returns the evaluations spent. Runs before the elite snapshot is taken,
    /// so the rest of the generation collaborates with the refined elites.
    fn climb_elites(
        &self,
        parallel: bool,
        species: &mut Species,
        streams: &mut [RandomNumberGenerator],
        f_max: f64,
    ) -> Result<usize> {
        let Some(local_search) = &self.local_search else {
            return Ok(0);
        };

        let evaluations = run_species_tasks(
            parallel,
            species.populations_mut(),
            streams,
            |population, rng| {
                let outcome =
                    local_search.search(population.elite_mut(), &self.objective, f_max, rng)?;
                Ok(outcome.evaluations)
            },
        )?;

        Ok(evaluations.into_iter().sum())
    }

    /// One generation of one species. Writes only to `population`; the other
    /// species are seen through the `elites` snapshot.
    fn evolve_species(
        &self,
        population: &mut Population,
        elites: &[Gene],
        f_max: f64,
        options: &CoevolutionOptions,
        mutation: &BitFlipMutation,
        rng: &mut RandomNumberGenerator,
    ) -> Result<SpeciesReport> {
        let species_id = population.species_id();
        let mut evaluations = 0;

        let roulette = RouletteWheelSelection::new();
        roulette.setup(population.individuals_mut())?;

        // Partners are drawn from the genes as they stood before crossover
        let parents: Vec<Gene> = population.iter().map(Individual::gene).collect();

        for index in 1..population.len() {
            if !rng.chance(options.get_crossover_probability()) {
                continue;
            }

            let partner = parents[roulette.select_index(population.individuals(), rng)?];
            let (child_a, child_b) = two_point_crossover(parents[index], partner);

            let child = match options.get_offspring_choice() {
                OffspringChoice::Random => {
                    if rng.coin_flip() {
                        child_a
                    } else {
                        child_b
                    }
                }
                OffspringChoice::BestOfTwo => {
                    evaluations += 2;
                    self.fitter_child(species_id, elites, child_a, child_b)?
                }
            };

            population.individuals_mut()[index].set_gene(child);
        }

        for individual in population.non_elite_mut() {
            for (dimension, &elite) in elites.iter().enumerate() {
                if dimension != species_id {
                    individual.set_collaborator(dimension, elite)?;
                }
            }
            mutation.mutate(individual, rng);
        }

        evaluations += fitness::evaluate_all(&self.objective, population.individuals_mut(), f_max)?;
        population.sort_by_fitness();

        Ok(SpeciesReport::from_population(population, evaluations))
    }

    /// Scores both crossover children against the elites and returns the
    /// fitter one, `child_a` on a tie.
    fn fitter_child(
        &self,
        species_id: usize,
        elites: &[Gene],
        child_a: Gene,
        child_b: Gene,
    ) -> Result<Gene> {
        let mut collaboration = elites.to_vec();

        collaboration[species_id] = child_a;
        let fitness_a = fitness::evaluate(&self.objective, &collaboration)?;
        collaboration[species_id] = child_b;
        let fitness_b = fitness::evaluate(&self.objective, &collaboration)?;

        Ok(if fitness_b < fitness_a { child_b } else { child_a })
    }
}

/// Runs `task` once per species, on the rayon pool when `parallel` is set.
///
/// Each task gets exclusive access to one population and its own random
/// stream. Reports come back in species order either way.
fn run_species_tasks<T, F>(
    parallel: bool,
    populations: &mut [Population],
    streams: &mut [RandomNumberGenerator],
    task: F,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&mut Population, &mut RandomNumberGenerator) -> Result<T> + Send + Sync,
{
    if parallel {
        populations
            .par_iter_mut()
            .zip(streams.par_iter_mut())
            .map(|(population, rng)| task(population, rng))
            .collect()
    } else {
        populations
            .iter_mut()
            .zip(streams.iter_mut())
            .map(|(population, rng)| task(population, rng))
            .collect()
    }
}

fn total_evaluations(reports: &[SpeciesReport]) -> usize {
    reports.iter().map(|report| report.evaluations).sum()
}

/// Fittest elite over all species; the lowest species id wins ties.
fn fittest(reports: &[SpeciesReport]) -> Result<(f64, Vec<Gene>)> {
    reports
        .iter()
        .reduce(|best, report| {
            if compare_fitness(report.elite_fitness, best.elite_fitness).is_lt() {
                report
            } else {
                best
            }
        })
        .map(|report| (report.elite_fitness, report.elite_collaboration.clone()))
        .ok_or_else_genetic(|| {
            GeneticError::Evolution("No species reported a fitness".to_string())
        })
}

/// The generation's worst fitness: the largest last-place fitness of any species.
fn worst(reports: &[SpeciesReport]) -> f64 {
    reports
        .iter()
        .map(|report| report.worst_fitness)
        .fold(f64::NEG_INFINITY, f64::max)
}

use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::fitness::{self, Objective};
use crate::operators::Gene;
use crate::population::{Candidate, Individual};
use crate::rng::RandomNumberGenerator;

use super::{LocalSearch, SearchOutcome};

/// Resampling attempts for an offset before an iteration is given up.
const MAX_OFFSET_ATTEMPTS: usize = 16;

/// A stochastic hill climber over an individual's own gene.
///
/// Every iteration draws a normally distributed offset scaled by the step
/// size, applies it to the best gene found so far and keeps the result if it
/// strictly improves fitness. Offsets of zero or ones that leave the 16-bit
/// range are resampled; an iteration that finds no usable offset is skipped
/// and costs no evaluation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HillClimbing {
    iterations: usize,
    step_size: f64,
}

impl HillClimbing {
    /// Creates a hill climber.
    ///
    /// # Arguments
    ///
    /// * `iterations` - Candidate genes tried per call.
    /// * `step_size` - Multiplier applied to a standard normal sample.
    ///
    /// # Errors
    ///
    /// Returns an error if `iterations` is 0 or `step_size` is not a positive
    /// finite number.
    pub fn new(iterations: usize, step_size: f64) -> Result<Self> {
        if iterations == 0 {
            return Err(GeneticError::Configuration(
                "Hill climbing iterations must be greater than 0".to_string(),
            ));
        }
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(GeneticError::Configuration(format!(
                "Hill climbing step size must be positive, got {}",
                step_size
            )));
        }
        Ok(Self {
            iterations,
            step_size,
        })
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Draws a gene at a non-zero normal offset from `gene`, or `None` if
    /// every attempt fell outside the gene range.
    fn neighbour(&self, gene: Gene, rng: &mut RandomNumberGenerator) -> Option<Gene> {
        (0..MAX_OFFSET_ATTEMPTS).find_map(|_| {
            let offset = (rng.standard_normal() * self.step_size).round() as i64;
            if offset == 0 {
                return None;
            }
            Gene::try_from(i64::from(gene) + offset).ok()
        })
    }
}

impl Default for HillClimbing {
    fn default() -> Self {
        Self {
            iterations: 20,
            step_size: 5000.0,
        }
    }
}

impl LocalSearch for HillClimbing {
    fn search(
        &self,
        individual: &mut Individual,
        objective: &dyn Objective,
        f_max: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<SearchOutcome> {
        let species_id = individual.species_id();
        let initial_fitness = individual.fitness();
        let mut best_gene = individual.gene();
        let mut best_fitness = initial_fitness;
        let mut candidate = individual.collaboration().to_vec();
        let mut evaluations = 0;

        for _ in 0..self.iterations {
            let Some(gene) = self.neighbour(best_gene, rng) else {
                continue;
            };

            candidate[species_id] = gene;
            let fitness = fitness::evaluate(objective, &candidate)?;
            evaluations += 1;

            if fitness < best_fitness {
                trace!(species_id, gene, fitness, "hill climb step accepted");
                best_gene = gene;
                best_fitness = fitness;
            }
        }

        individual.set_gene(best_gene);
        individual.record_fitness(best_fitness, f_max);

        Ok(SearchOutcome {
            evaluations,
            improved: best_fitness < initial_fitness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance_to(target: Gene) -> impl Fn(&[Gene]) -> f64 + Send + Sync {
        move |genes: &[Gene]| (f64::from(genes[0]) - f64::from(target)).abs()
    }

    fn scored(objective: &dyn Objective, collaboration: Vec<Gene>) -> Individual {
        let mut individual = Individual::with_collaboration(0, collaboration).unwrap();
        let fitness = objective.evaluate(individual.collaboration());
        individual.record_fitness(fitness, 0.0);
        individual
    }

    #[test]
    fn test_new_rejects_invalid_parameters() {
        assert!(HillClimbing::new(0, 5000.0).is_err());
        assert!(HillClimbing::new(20, 0.0).is_err());
        assert!(HillClimbing::new(20, f64::NAN).is_err());
        assert!(HillClimbing::new(20, 5000.0).is_ok());
    }

    #[test]
    fn test_default_parameters() {
        let climber = HillClimbing::default();
        assert_eq!(climber.iterations(), 20);
        assert_eq!(climber.step_size(), 5000.0);
    }

    #[test]
    fn test_search_never_gets_worse() {
        let objective = distance_to(40_000);
        let climber = HillClimbing::default();

        for seed in 0..20 {
            let mut individual = scored(&objective, vec![10_000, 7]);
            let before = individual.fitness();
            let mut rng = RandomNumberGenerator::from_seed(seed);

            let outcome = climber
                .search(&mut individual, &objective, 100_000.0, &mut rng)
                .unwrap();

            assert!(individual.fitness() <= before);
            assert_eq!(outcome.improved, individual.fitness() < before);
            assert!(outcome.evaluations <= climber.iterations());
            assert!(individual.is_consistent());
            assert_eq!(individual.collaboration()[1], 7);
            // Recorded fitness matches the stored vector
            assert_eq!(individual.fitness(), objective(individual.collaboration()));
            assert_eq!(individual.scaled_fitness(), 100_000.0 - individual.fitness());
        }
    }

    #[test]
    fn test_search_improves_far_from_optimum() {
        let objective = distance_to(60_000);
        let climber = HillClimbing::new(200, 5000.0).unwrap();
        let mut individual = scored(&objective, vec![0]);
        let mut rng = RandomNumberGenerator::from_seed(11);

        let outcome = climber
            .search(&mut individual, &objective, 0.0, &mut rng)
            .unwrap();

        assert!(outcome.improved);
        assert!(outcome.evaluations > 0);
        assert!(individual.fitness() < 60_000.0);
    }

    #[test]
    fn test_neighbour_stays_in_range() {
        let climber = HillClimbing::default();
        let mut rng = RandomNumberGenerator::from_seed(5);

        for gene in [0, 1, Gene::MAX - 1, Gene::MAX, 32_768] {
            for _ in 0..100 {
                if let Some(neighbour) = climber.neighbour(gene, &mut rng) {
                    assert_ne!(neighbour, gene);
                }
            }
        }
    }

    #[test]
    fn test_search_propagates_objective_failure() {
        let objective = |_: &[Gene]| f64::NAN;
        let mut individual = Individual::with_collaboration(0, vec![100]).unwrap();
        individual.record_fitness(5.0, 0.0);
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result = HillClimbing::default().search(&mut individual, &objective, 0.0, &mut rng);
        assert!(matches!(result, Err(GeneticError::FitnessCalculation(_))));
    }
}

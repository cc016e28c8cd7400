//! # CoevolutionOptions
//!
//! Run configuration for the cooperative coevolutionary GA: the budget, the
//! shape of the species, operator probabilities and the scaling window.
//!
//! Options are assembled through [`CoevolutionOptionsBuilder`] and validated
//! when built, so a launcher never starts on a configuration it cannot
//! finish.
//!
//! ## Example
//!
//! ```rust
//! use ccga::evolution::options::{Budget, CoevolutionOptions, OffspringChoice};
//!
//! let options = CoevolutionOptions::builder()
//!     .evaluation_budget(100_000)
//!     .species_count(10)
//!     .population_size(100)
//!     .offspring_choice(OffspringChoice::BestOfTwo)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.get_budget(), Budget::Evaluations(100_000));
//! // One expected bit flip per collaboration vector unless configured
//! assert_eq!(options.get_mutation_probability(), 1.0 / 160.0);
//! ```

use crate::error::{check_probability, GeneticError, Result};
use crate::fitness::DEFAULT_SCALING_WINDOW;
use crate::operators::GENE_BITS;

/// Default number of individuals per species.
pub const DEFAULT_POPULATION_SIZE: usize = 100;

/// Default probability that a non-elite individual is crossed over.
pub const DEFAULT_CROSSOVER_PROBABILITY: f64 = 0.6;

/// Default number of individuals above which work is spread over threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// When a run stops. The two modes are mutually exclusive.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Run whole generations until at least this many objective evaluations
    /// have been spent.
    Evaluations(usize),
    /// Run exactly this many generations after the baseline evaluation.
    Generations(usize),
}

impl Budget {
    /// Picks the budget mode from a pair of limits where zero means unset.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless exactly one limit is non-zero.
    ///
    /// ```
    /// use ccga::evolution::options::Budget;
    ///
    /// assert_eq!(Budget::from_limits(0, 50).unwrap(), Budget::Generations(50));
    /// assert!(Budget::from_limits(1000, 50).is_err());
    /// assert!(Budget::from_limits(0, 0).is_err());
    /// ```
    pub fn from_limits(evaluations: usize, generations: usize) -> Result<Self> {
        match (evaluations, generations) {
            (0, 0) => Err(GeneticError::Configuration(
                "Either an evaluation or a generation budget must be set".to_string(),
            )),
            (evaluations, 0) => Ok(Budget::Evaluations(evaluations)),
            (0, generations) => Ok(Budget::Generations(generations)),
            _ => Err(GeneticError::Configuration(
                "Evaluation and generation budgets are mutually exclusive".to_string(),
            )),
        }
    }

    /// Whether a run that has spent `evaluations` over `generations` may
    /// start another generation.
    pub fn allows(&self, generations: usize, evaluations: usize) -> bool {
        match *self {
            Budget::Evaluations(limit) => evaluations < limit,
            Budget::Generations(limit) => generations < limit,
        }
    }
}

/// Which crossover child replaces a non-elite individual's own gene.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffspringChoice {
    /// Pick one of the two children uniformly at random.
    #[default]
    Random,
    /// Evaluate both children and keep the fitter one. Costs two extra
    /// evaluations per crossover.
    BestOfTwo,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CoevolutionOptions {
    budget: Budget,
    species_count: usize,
    population_size: usize,
    mutation_probability: f64,
    crossover_probability: f64,
    scaling_window: usize,
    offspring_choice: OffspringChoice,
    /// Minimum number of individuals before species run in parallel
    parallel_threshold: usize,
}

impl CoevolutionOptions {
    /// Creates validated options with default operator settings.
    ///
    /// # Errors
    ///
    /// Fails for the same reasons as [`CoevolutionOptionsBuilder::build`].
    pub fn new(budget: Budget, species_count: usize, population_size: usize) -> Result<Self> {
        Self::builder()
            .budget(budget)
            .species_count(species_count)
            .population_size(population_size)
            .build()
    }

    pub fn get_budget(&self) -> Budget {
        self.budget
    }

    pub fn get_species_count(&self) -> usize {
        self.species_count
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    pub fn get_crossover_probability(&self) -> f64 {
        self.crossover_probability
    }

    pub fn get_scaling_window(&self) -> usize {
        self.scaling_window
    }

    pub fn get_offspring_choice(&self) -> OffspringChoice {
        self.offspring_choice
    }

    /// Returns the minimum number of individuals processed in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Total number of individuals across all species.
    pub fn individual_count(&self) -> usize {
        self.species_count * self.population_size
    }

    /// Returns a builder for creating a `CoevolutionOptions` instance.
    pub fn builder() -> CoevolutionOptionsBuilder {
        CoevolutionOptionsBuilder::default()
    }
}

/// Builder for `CoevolutionOptions`.
///
/// Provides a fluent interface; unset fields fall back to defaults at
/// [`build`](Self::build) time, except the budget and the species count,
/// which are required.
#[derive(Debug, Clone, Default)]
pub struct CoevolutionOptionsBuilder {
    evaluation_budget: Option<usize>,
    generation_budget: Option<usize>,
    species_count: Option<usize>,
    population_size: Option<usize>,
    mutation_probability: Option<f64>,
    crossover_probability: Option<f64>,
    scaling_window: Option<usize>,
    offspring_choice: Option<OffspringChoice>,
    parallel_threshold: Option<usize>,
}

impl CoevolutionOptionsBuilder {
    /// Stops the run once this many objective evaluations have been spent.
    pub fn evaluation_budget(mut self, value: usize) -> Self {
        self.evaluation_budget = Some(value);
        self
    }

    /// Stops the run after this many generations.
    pub fn generation_budget(mut self, value: usize) -> Self {
        self.generation_budget = Some(value);
        self
    }

    /// Sets the budget, replacing any budget set before.
    pub fn budget(mut self, value: Budget) -> Self {
        match value {
            Budget::Evaluations(limit) => {
                self.evaluation_budget = Some(limit);
                self.generation_budget = None;
            }
            Budget::Generations(limit) => {
                self.generation_budget = Some(limit);
                self.evaluation_budget = None;
            }
        }
        self
    }

    /// Sets the number of species, one per problem dimension.
    pub fn species_count(mut self, value: usize) -> Self {
        self.species_count = Some(value);
        self
    }

    /// Sets the number of individuals per species.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the per-bit mutation probability.
    pub fn mutation_probability(mut self, value: f64) -> Self {
        self.mutation_probability = Some(value);
        self
    }

    pub fn crossover_probability(mut self, value: f64) -> Self {
        self.crossover_probability = Some(value);
        self
    }

    /// Sets how many recent generations feed the scaling reference.
    pub fn scaling_window(mut self, value: usize) -> Self {
        self.scaling_window = Some(value);
        self
    }

    pub fn offspring_choice(mut self, value: OffspringChoice) -> Self {
        self.offspring_choice = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Validates the configuration and builds the `CoevolutionOptions`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if
    /// - both or neither of the budgets are set (a zero budget counts as unset)
    /// - the species count is missing or zero
    /// - the population size is below 2
    /// - a probability lies outside `[0, 1]`
    /// - the scaling window is zero
    pub fn build(self) -> Result<CoevolutionOptions> {
        let budget = Budget::from_limits(
            self.evaluation_budget.unwrap_or(0),
            self.generation_budget.unwrap_or(0),
        )?;

        let species_count = self.species_count.unwrap_or(0);
        if species_count == 0 {
            return Err(GeneticError::Configuration(
                "Species count must be at least 1".to_string(),
            ));
        }

        let population_size = self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE);
        if population_size < 2 {
            return Err(GeneticError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }

        let mutation_probability = self
            .mutation_probability
            .unwrap_or_else(|| 1.0 / (f64::from(GENE_BITS) * species_count as f64));
        check_probability("Mutation probability", mutation_probability)?;

        let crossover_probability = self
            .crossover_probability
            .unwrap_or(DEFAULT_CROSSOVER_PROBABILITY);
        check_probability("Crossover probability", crossover_probability)?;

        let scaling_window = self.scaling_window.unwrap_or(DEFAULT_SCALING_WINDOW);
        if scaling_window == 0 {
            return Err(GeneticError::Configuration(
                "Scaling window width cannot be zero".to_string(),
            ));
        }

        Ok(CoevolutionOptions {
            budget,
            species_count,
            population_size,
            mutation_probability,
            crossover_probability,
            scaling_window,
            offspring_choice: self.offspring_choice.unwrap_or_default(),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CoevolutionOptions::builder()
            .generation_budget(10)
            .species_count(20)
            .build()
            .unwrap();

        assert_eq!(options.get_budget(), Budget::Generations(10));
        assert_eq!(options.get_population_size(), DEFAULT_POPULATION_SIZE);
        assert_eq!(options.get_mutation_probability(), 1.0 / 320.0);
        assert_eq!(options.get_crossover_probability(), 0.6);
        assert_eq!(options.get_scaling_window(), 5);
        assert_eq!(options.get_offspring_choice(), OffspringChoice::Random);
        assert_eq!(options.get_parallel_threshold(), 1000);
        assert_eq!(options.individual_count(), 2000);
    }

    #[test]
    fn test_budget_must_be_exclusive() {
        let both = CoevolutionOptions::builder()
            .evaluation_budget(100)
            .generation_budget(10)
            .species_count(2)
            .build();
        assert!(matches!(both, Err(GeneticError::Configuration(_))));

        let neither = CoevolutionOptions::builder().species_count(2).build();
        assert!(matches!(neither, Err(GeneticError::Configuration(_))));

        let zero = CoevolutionOptions::builder()
            .evaluation_budget(0)
            .species_count(2)
            .build();
        assert!(matches!(zero, Err(GeneticError::Configuration(_))));
    }

    #[test]
    fn test_budget_setter_replaces_previous() {
        let options = CoevolutionOptions::builder()
            .evaluation_budget(100)
            .budget(Budget::Generations(3))
            .species_count(2)
            .build()
            .unwrap();
        assert_eq!(options.get_budget(), Budget::Generations(3));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(CoevolutionOptions::new(Budget::Generations(1), 0, 10).is_err());
        assert!(CoevolutionOptions::new(Budget::Generations(1), 3, 1).is_err());
        assert!(CoevolutionOptions::new(Budget::Generations(1), 3, 0).is_err());
        assert!(CoevolutionOptions::new(Budget::Generations(1), 3, 2).is_ok());
    }

    #[test]
    fn test_rejects_bad_probabilities() {
        let base = || {
            CoevolutionOptions::builder()
                .generation_budget(1)
                .species_count(2)
        };

        assert!(base().mutation_probability(-0.1).build().is_err());
        assert!(base().mutation_probability(f64::NAN).build().is_err());
        assert!(base().crossover_probability(1.5).build().is_err());
        assert!(base().scaling_window(0).build().is_err());
        assert!(base().mutation_probability(1.0).crossover_probability(0.0).build().is_ok());
    }

    #[test]
    fn test_budget_allows() {
        assert!(Budget::Evaluations(100).allows(50, 99));
        assert!(!Budget::Evaluations(100).allows(0, 100));
        assert!(Budget::Generations(3).allows(2, 10_000));
        assert!(!Budget::Generations(3).allows(3, 0));
    }
}

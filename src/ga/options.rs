use crate::error::{check_probability, GeneticError, Result};
use crate::evolution::options::{
    Budget, DEFAULT_CROSSOVER_PROBABILITY, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_POPULATION_SIZE,
};
use crate::fitness::DEFAULT_SCALING_WINDOW;
use crate::operators::GENE_BITS;

/// Run configuration for the monolithic GA baseline.
///
/// ```rust
/// use ccga::ga::GaOptions;
///
/// let options = GaOptions::builder()
///     .generation_budget(50)
///     .dimensions(20)
///     .build()
///     .unwrap();
///
/// assert_eq!(options.get_population_size(), 100);
/// assert_eq!(options.get_mutation_probability(), 1.0 / 320.0);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GaOptions {
    budget: Budget,
    dimensions: usize,
    population_size: usize,
    mutation_probability: f64,
    crossover_probability: f64,
    scaling_window: usize,
    /// Minimum population size before chromosomes are scored in parallel
    parallel_threshold: usize,
}

impl GaOptions {
    pub fn get_budget(&self) -> Budget {
        self.budget
    }

    pub fn get_dimensions(&self) -> usize {
        self.dimensions
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

    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn builder() -> GaOptionsBuilder {
        GaOptionsBuilder::default()
    }
}

/// Builder for `GaOptions`. The budget and the dimensionality are required.
#[derive(Debug, Clone, Default)]
pub struct GaOptionsBuilder {
    evaluation_budget: Option<usize>,
    generation_budget: Option<usize>,
    dimensions: Option<usize>,
    population_size: Option<usize>,
    mutation_probability: Option<f64>,
    crossover_probability: Option<f64>,
    scaling_window: Option<usize>,
    parallel_threshold: Option<usize>,
}

impl GaOptionsBuilder {
    pub fn evaluation_budget(mut self, value: usize) -> Self {
        self.evaluation_budget = Some(value);
        self
    }

    pub fn generation_budget(mut self, value: usize) -> Self {
        self.generation_budget = Some(value);
        self
    }

    /// Sets the budget, replacing any budget set before.
    pub fn budget(mut self, value: Budget) -> Self {
        let (evaluations, generations) = match value {
            Budget::Evaluations(limit) => (Some(limit), None),
            Budget::Generations(limit) => (None, Some(limit)),
        };
        self.evaluation_budget = evaluations;
        self.generation_budget = generations;
        self
    }

    /// Sets the number of genes per chromosome.
    pub fn dimensions(mut self, value: usize) -> Self {
        self.dimensions = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn mutation_probability(mut self, value: f64) -> Self {
        self.mutation_probability = Some(value);
        self
    }

    pub fn crossover_probability(mut self, value: f64) -> Self {
        self.crossover_probability = Some(value);
        self
    }

    pub fn scaling_window(mut self, value: usize) -> Self {
        self.scaling_window = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Validates the configuration and builds the `GaOptions`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` for an ambiguous or missing
    /// budget, zero dimensions, a population below 2, probabilities outside
    /// `[0, 1]` or a zero scaling window.
    pub fn build(self) -> Result<GaOptions> {
        let budget = Budget::from_limits(
            self.evaluation_budget.unwrap_or(0),
            self.generation_budget.unwrap_or(0),
        )?;

        let dimensions = self.dimensions.unwrap_or(0);
        if dimensions == 0 {
            return Err(GeneticError::Configuration(
                "Dimensions must be at least 1".to_string(),
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
            .unwrap_or_else(|| 1.0 / (f64::from(GENE_BITS) * dimensions as f64));
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

        Ok(GaOptions {
            budget,
            dimensions,
            population_size,
            mutation_probability,
            crossover_probability,
            scaling_window,
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        })
    }
}

//! Cooperative coevolutionary genetic algorithms (CCGA-1 and CCGA-HC) for
//! minimizing box-constrained benchmark functions over 16-bit genes, together
//! with the monolithic GA they are compared against.
//!
//! ```rust
//! use ccga::{BenchmarkFunction, CoevolutionLauncher, CoevolutionOptions};
//! use ccga::local_search::HillClimbing;
//! use ccga::rng::RandomNumberGenerator;
//!
//! let function = BenchmarkFunction::Rastrigin;
//! let options = CoevolutionOptions::builder()
//!     .evaluation_budget(5_000)
//!     .species_count(function.dimensions())
//!     .population_size(20)
//!     .build()
//!     .unwrap();
//!
//! let result = CoevolutionLauncher::new(function)
//!     .with_local_search(HillClimbing::default())
//!     .evolve(&options, &mut RandomNumberGenerator::from_seed(3))
//!     .unwrap();
//!
//! assert!(result.best_fitness <= result.history[0].fitness);
//! ```
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod functions;
pub mod ga;
pub mod local_search;
pub mod operators;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{run, CoevolutionLauncher, CoevolutionOptions, EvolutionResult, FitnessRecord};
pub use fitness::Objective;
pub use functions::BenchmarkFunction;
pub use ga::{GaOptions, GeneticAlgorithm};

//! # Error Types
//!
//! This module defines the error type shared by the coevolutionary and the
//! monolithic genetic algorithm. Configuration problems are reported before a
//! run starts; objective failures abort the run that produced them.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use ccga::error::{GeneticError, Result};
//!
//! fn check_population(size: usize) -> Result<()> {
//!     if size < 2 {
//!         return Err(GeneticError::Configuration(
//!             "Population size must be at least 2".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_population(1).is_err());
//! assert!(check_population(20).is_ok());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use ccga::error::{GeneticError, OptionExt};
//!
//! fn best_fitness(fitness: &[f64]) -> ccga::error::Result<f64> {
//!     fitness
//!         .iter()
//!         .copied()
//!         .min_by(|a, b| a.total_cmp(b))
//!         .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_fitness(&[3.0, 1.0, 2.0]).unwrap(), 1.0);
//! ```

use thiserror::Error;

/// Represents errors that can occur while running a genetic algorithm.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when the objective produces an unusable score.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when a collaboration or chromosome has the wrong length.
    #[error("Dimension mismatch: expected {expected} genes, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Error that occurs when a benchmark function name cannot be resolved.
    #[error("Unknown benchmark function: {0}")]
    UnknownFunction(String),

    /// Error that occurs when an evolution process fails.
    #[error("Evolution error: {0}")]
    Evolution(String),
}

/// A specialized Result type for genetic algorithm operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
///
/// ```rust
/// use ccga::error::{GeneticError, OptionExt};
///
/// let empty: Option<u16> = None;
/// assert!(matches!(
///     empty.ok_or_else_genetic(|| GeneticError::EmptyPopulation),
///     Err(GeneticError::EmptyPopulation)
/// ));
/// ```
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Ensures a probability lies in `[0, 1]`.
pub(crate) fn check_probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GeneticError::Configuration(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

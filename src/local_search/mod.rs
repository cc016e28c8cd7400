//! # Local Search
//!
//! Local refinement layered on top of the coevolutionary step. A
//! [`LocalSearch`] works on a single, already scored individual (in practice
//! each species' elite) and reports how many objective evaluations it spent so
//! the launcher can charge them against the run's budget.

use std::fmt::Debug;

use crate::error::Result;
use crate::fitness::Objective;
use crate::population::Individual;
use crate::rng::RandomNumberGenerator;

pub mod hill_climbing;

pub use hill_climbing::HillClimbing;

/// What a local search pass did to its individual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Objective evaluations consumed.
    pub evaluations: usize,
    /// Whether the individual's fitness strictly improved.
    pub improved: bool,
}

/// A local search algorithm applied to one scored individual.
pub trait LocalSearch: Debug + Send + Sync {
    /// Refines `individual` in place.
    ///
    /// The individual's fitness must be current for its collaboration vector.
    /// On return its gene, collaboration and fitness describe the best point
    /// found, and its scaled fitness is recomputed against `f_max`.
    ///
    /// # Errors
    ///
    /// Propagates objective failures.
    fn search(
        &self,
        individual: &mut Individual,
        objective: &dyn Objective,
        f_max: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<SearchOutcome>;
}

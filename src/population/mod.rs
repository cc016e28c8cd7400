//! # Population Model
//!
//! CCGA keeps one [`Population`] of [`Individual`]s per problem dimension and
//! groups them into a [`Species`]. The monolithic GA reuses the same scoring
//! and selection machinery through the [`Candidate`] trait.
//!
//! ```text
//! Species ── Population (dimension 0) ── Individual { gene, collaboration, .. }
//!         ├─ Population (dimension 1) ── ...
//!         └─ ...
//! ```
pub mod individual;
pub mod species;

use std::cmp::Ordering;

pub use individual::Individual;
pub use species::{Population, Species};

use crate::operators::Genome;

/// A scored member of a population.
///
/// Lower raw fitness is better. Scaled fitness is the selection weight derived
/// from the raw fitness and the current scaling reference, and the selection
/// probability is the individual's cumulative position on the roulette wheel.
pub trait Candidate: Genome {
    fn fitness(&self) -> f64;

    fn scaled_fitness(&self) -> f64;

    fn selection_probability(&self) -> f64;

    fn set_selection_probability(&mut self, probability: f64);

    /// Stores a raw objective score and its scaled weight `|f_max - fitness|`.
    fn record_fitness(&mut self, fitness: f64, f_max: f64);
}

/// Sorts candidates from fittest (smallest) to least fit (largest).
///
/// The sort is stable, so an elite tied with a newcomer keeps index 0.
pub fn sort_by_fitness<C: Candidate>(candidates: &mut [C]) {
    candidates.sort_by(|a, b| compare_fitness(a.fitness(), b.fitness()));
}

pub(crate) fn compare_fitness(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| {
        // NaN sorts after every number
        if a.is_nan() && !b.is_nan() {
            Ordering::Greater
        } else if b.is_nan() && !a.is_nan() {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    })
}

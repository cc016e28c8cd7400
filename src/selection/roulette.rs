use tracing::debug;

use crate::error::{GeneticError, Result};
use crate::population::Candidate;
use crate::rng::RandomNumberGenerator;

/// Fitness proportionate selection over scaled fitness.
///
/// Selection is a two-step affair. [`setup`](Self::setup) writes every
/// candidate's cumulative position on the wheel into its selection
/// probability; [`select_index`](Self::select_index) then samples that table
/// as often as needed. Setup must run after evaluation and before the first
/// selection of a generation.
///
/// When the scaled fitness of the whole population sums to zero (every
/// candidate sits exactly on the scaling reference) the wheel falls back to
/// uniform selection.
///
/// # Examples
///
/// ```
/// use ccga::population::{Candidate, Individual};
/// use ccga::rng::RandomNumberGenerator;
/// use ccga::selection::RouletteWheelSelection;
///
/// let mut population: Vec<Individual> = [100.0, 700.0, 100.0, 100.0]
///     .iter()
///     .enumerate()
///     .map(|(gene, &weight)| {
///         let mut individual = Individual::new(0, gene as u16);
///         individual.record_fitness(weight, 0.0);
///         individual
///     })
///     .collect();
///
/// let roulette = RouletteWheelSelection::new();
/// roulette.setup(&mut population).unwrap();
///
/// assert!((population[1].selection_probability() - 0.8).abs() < 1e-9);
///
/// let mut rng = RandomNumberGenerator::from_seed(42);
/// let picked = roulette.select(&population, &mut rng).unwrap();
/// assert!(picked.gene() < 4);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    pub fn new() -> Self {
        Self
    }

    /// Assigns cumulative selection probabilities from scaled fitness.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` for an empty slice.
    pub fn setup<C: Candidate>(&self, candidates: &mut [C]) -> Result<()> {
        if candidates.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let sum: f64 = candidates.iter().map(Candidate::scaled_fitness).sum();
        let count = candidates.len() as f64;

        if sum > 0.0 && sum.is_finite() {
            let mut cumulative = 0.0;
            for candidate in candidates.iter_mut() {
                cumulative += candidate.scaled_fitness() / sum;
                candidate.set_selection_probability(cumulative);
            }
        } else {
            debug!(sum, "scaled fitness sum unusable, selecting uniformly");
            for (index, candidate) in candidates.iter_mut().enumerate() {
                candidate.set_selection_probability((index + 1) as f64 / count);
            }
        }

        // Pin the wheel's end against accumulated rounding error
        if let Some(last) = candidates.last_mut() {
            last.set_selection_probability(1.0);
        }

        Ok(())
    }

    /// Samples the wheel and returns the index of the first candidate whose
    /// cumulative probability exceeds a uniform draw from `[0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` for an empty slice.
    pub fn select_index<C: Candidate>(
        &self,
        candidates: &[C],
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        if candidates.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let draw = rng.uniform();
        let index = candidates.partition_point(|c| c.selection_probability() <= draw);

        Ok(index.min(candidates.len() - 1))
    }

    /// Like [`select_index`](Self::select_index), returning the candidate.
    pub fn select<'a, C: Candidate>(
        &self,
        candidates: &'a [C],
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a C> {
        let index = self.select_index(candidates, rng)?;
        Ok(&candidates[index])
    }
}

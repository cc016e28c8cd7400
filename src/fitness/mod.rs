//! # Fitness Evaluation
//!
//! An [`Objective`] scores a full collaboration vector. Lower is better.
//! Raw scores become selection weights through the [`ScalingWindow`], which
//! tracks the worst fitness of recent generations.
pub mod scaling;

pub use scaling::{calculate_f_max, ScalingWindow, DEFAULT_SCALING_WINDOW};

use crate::error::{GeneticError, Result};
use crate::operators::Gene;
use crate::population::Candidate;

/// A minimization objective over 16-bit genes.
///
/// Closures of the right shape are objectives too:
///
/// ```
/// use ccga::fitness::Objective;
///
/// let sum = |genes: &[u16]| genes.iter().map(|&g| f64::from(g)).sum::<f64>();
/// assert_eq!(sum.evaluate(&[1, 2, 3]), 6.0);
/// assert_eq!(sum.dimensions(), None);
/// ```
pub trait Objective: Send + Sync {
    fn evaluate(&self, genes: &[Gene]) -> f64;

    /// Number of genes the objective expects, if it is fixed.
    fn dimensions(&self) -> Option<usize> {
        None
    }
}

impl<F> Objective for F
where
    F: Fn(&[Gene]) -> f64 + Send + Sync,
{
    fn evaluate(&self, genes: &[Gene]) -> f64 {
        self(genes)
    }
}

/// Evaluates `genes`, rejecting non-finite scores.
///
/// # Errors
///
/// Returns `GeneticError::FitnessCalculation` if the objective yields NaN or
/// an infinity.
pub fn evaluate<O: Objective + ?Sized>(objective: &O, genes: &[Gene]) -> Result<f64> {
    let fitness = objective.evaluate(genes);
    if fitness.is_finite() {
        Ok(fitness)
    } else {
        Err(GeneticError::FitnessCalculation(format!(
            "Objective returned {} for genes {:?}",
            fitness, genes
        )))
    }
}

/// Scores every candidate against `f_max` and returns the number of
/// objective evaluations spent.
///
/// # Errors
///
/// Propagates the first non-finite score.
pub fn evaluate_all<O, C>(objective: &O, candidates: &mut [C], f_max: f64) -> Result<usize>
where
    O: Objective + ?Sized,
    C: Candidate,
{
    for candidate in candidates.iter_mut() {
        let fitness = evaluate(objective, candidate.genes())?;
        candidate.record_fitness(fitness, f_max);
    }
    Ok(candidates.len())
}

/// Checks that `objective` accepts vectors of `dimensions` genes.
///
/// # Errors
///
/// Returns `GeneticError::DimensionMismatch` if the objective declares a
/// different dimensionality.
pub fn check_dimensions<O: Objective + ?Sized>(objective: &O, dimensions: usize) -> Result<()> {
    match objective.dimensions() {
        Some(expected) if expected != dimensions => Err(GeneticError::DimensionMismatch {
            expected,
            actual: dimensions,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::Individual;

    struct Fixed;

    impl Objective for Fixed {
        fn evaluate(&self, genes: &[Gene]) -> f64 {
            genes.len() as f64
        }

        fn dimensions(&self) -> Option<usize> {
            Some(3)
        }
    }

    #[test]
    fn test_evaluate_rejects_non_finite() {
        let nan = |_: &[Gene]| f64::NAN;
        let inf = |_: &[Gene]| f64::INFINITY;

        assert!(matches!(
            evaluate(&nan, &[1]),
            Err(GeneticError::FitnessCalculation(_))
        ));
        assert!(matches!(
            evaluate(&inf, &[1]),
            Err(GeneticError::FitnessCalculation(_))
        ));
        assert_eq!(evaluate(&Fixed, &[1, 2, 3]).unwrap(), 3.0);
    }

    #[test]
    fn test_evaluate_all_scales_and_counts() {
        let objective = |genes: &[Gene]| genes.iter().map(|&g| f64::from(g)).sum::<f64>();
        let mut individuals = vec![
            Individual::with_collaboration(0, vec![10, 5]).unwrap(),
            Individual::with_collaboration(0, vec![40, 5]).unwrap(),
        ];

        let evaluations = evaluate_all(&objective, &mut individuals, 100.0).unwrap();

        assert_eq!(evaluations, 2);
        assert_eq!(individuals[0].fitness(), 15.0);
        assert_eq!(individuals[0].scaled_fitness(), 85.0);
        assert_eq!(individuals[1].fitness(), 45.0);
        assert_eq!(individuals[1].scaled_fitness(), 55.0);
    }

    #[test]
    fn test_check_dimensions() {
        assert!(check_dimensions(&Fixed, 3).is_ok());
        assert!(matches!(
            check_dimensions(&Fixed, 4),
            Err(GeneticError::DimensionMismatch {
                expected: 3,
                actual: 4
            })
        ));

        let open = |_: &[Gene]| 0.0;
        assert!(check_dimensions(&open, 17).is_ok());
    }
}

//! Benchmark minimization problems over 16-bit genes.
//!
//! Every function maps each gene linearly onto its own box, `0` to the lower
//! bound and `65535` to the upper bound, before scoring. All of them have a
//! global minimum of zero.
use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

use crate::error::{GeneticError, Result};
use crate::fitness::Objective;
use crate::operators::{Gene, GENE_BITS};

/// The fixed family of test problems, each with its own dimensionality and
/// search box.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BenchmarkFunction {
    /// `3N + Σ (x² − 3 cos 2πx)`, N = 20, x ∈ [−5.12, 5.12]
    Rastrigin,
    /// `418.9829 N − Σ x sin √|x|`, N = 10, x ∈ [−500, 500]
    Schwefel,
    /// `1 + Σ x²/4000 − Π cos(x / √i)`, N = 10, x ∈ [−600, 600]
    Griewangk,
    /// `20 + e − 20 exp(−0.2 √(Σx²/N)) − exp(Σ cos 2πx / N)`, N = 30, x ∈ [−30, 30]
    Ackley,
    /// Pairwise `(100 (x₁ − x₂))² + (x₁ − 1)²`, N = 40, x ∈ [−2.048, 2.048]
    Rosenbrock,
}

impl BenchmarkFunction {
    pub const ALL: [BenchmarkFunction; 5] = [
        BenchmarkFunction::Rastrigin,
        BenchmarkFunction::Schwefel,
        BenchmarkFunction::Griewangk,
        BenchmarkFunction::Ackley,
        BenchmarkFunction::Rosenbrock,
    ];

    /// Number of genes the function scores.
    pub fn dimensions(&self) -> usize {
        match self {
            BenchmarkFunction::Rastrigin => 20,
            BenchmarkFunction::Schwefel => 10,
            BenchmarkFunction::Griewangk => 10,
            BenchmarkFunction::Ackley => 30,
            BenchmarkFunction::Rosenbrock => 40,
        }
    }

    /// Lower and upper bound of every parameter.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            BenchmarkFunction::Rastrigin => (-5.12, 5.12),
            BenchmarkFunction::Schwefel => (-500.0, 500.0),
            BenchmarkFunction::Griewangk => (-600.0, 600.0),
            BenchmarkFunction::Ackley => (-30.0, 30.0),
            BenchmarkFunction::Rosenbrock => (-2.048, 2.048),
        }
    }

    /// Lowercase identifier accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            BenchmarkFunction::Rastrigin => "rastrigin",
            BenchmarkFunction::Schwefel => "schwefel",
            BenchmarkFunction::Griewangk => "griewangk",
            BenchmarkFunction::Ackley => "ackley",
            BenchmarkFunction::Rosenbrock => "rosenbrock",
        }
    }

    /// Human readable title, e.g. for chart legends.
    pub fn label(&self) -> &'static str {
        match self {
            BenchmarkFunction::Rastrigin => "Rastrigin Function",
            BenchmarkFunction::Schwefel => "Schwefel Function",
            BenchmarkFunction::Griewangk => "Griewangk Function",
            BenchmarkFunction::Ackley => "Ackley Function",
            BenchmarkFunction::Rosenbrock => "Rosenbrock Function",
        }
    }

    /// One expected bit flip per collaboration vector: `1 / (16 N)`.
    pub fn mutation_probability(&self) -> f64 {
        1.0 / (f64::from(GENE_BITS) * self.dimensions() as f64)
    }

    /// Scores `genes` after scaling them into the function's box.
    pub fn evaluate(&self, genes: &[Gene]) -> f64 {
        let (min, max) = self.bounds();
        let x = scale_genes(genes, min, max);
        let n = x.len() as f64;

        match self {
            BenchmarkFunction::Rastrigin => {
                3.0 * n
                    + x.iter()
                        .map(|&xi| xi.powi(2) - 3.0 * (2.0 * PI * xi).cos())
                        .sum::<f64>()
            }
            BenchmarkFunction::Schwefel => {
                418.9829 * n - x.iter().map(|&xi| xi * xi.abs().sqrt().sin()).sum::<f64>()
            }
            BenchmarkFunction::Griewangk => {
                let sigma: f64 = x.iter().map(|&xi| xi.powi(2) / 4000.0).sum();
                let product: f64 = x
                    .iter()
                    .enumerate()
                    .map(|(i, &xi)| (xi / ((i + 1) as f64).sqrt()).cos())
                    .product();
                1.0 + sigma - product
            }
            BenchmarkFunction::Ackley => {
                let squares = x.iter().map(|&xi| xi.powi(2)).sum::<f64>() / n;
                let cosines = x.iter().map(|&xi| (2.0 * PI * xi).cos()).sum::<f64>() / n;
                20.0 + E - 20.0 * (-0.2 * squares.sqrt()).exp() - cosines.exp()
            }
            BenchmarkFunction::Rosenbrock => x
                .chunks_exact(2)
                .map(|pair| (100.0 * (pair[0] - pair[1])).powi(2) + (pair[0] - 1.0).powi(2))
                .sum(),
        }
    }
}

impl Objective for BenchmarkFunction {
    fn evaluate(&self, genes: &[Gene]) -> f64 {
        BenchmarkFunction::evaluate(self, genes)
    }

    fn dimensions(&self) -> Option<usize> {
        Some(BenchmarkFunction::dimensions(self))
    }
}

impl fmt::Display for BenchmarkFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BenchmarkFunction {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|function| function.name() == wanted)
            .ok_or_else(|| GeneticError::UnknownFunction(s.to_string()))
    }
}

/// Maps one gene onto `[min, max]`.
pub fn scale_gene(gene: Gene, min: f64, max: f64) -> f64 {
    f64::from(gene) / f64::from(Gene::MAX) * (max - min) + min
}

/// Maps every gene onto `[min, max]`.
pub fn scale_genes(genes: &[Gene], min: f64, max: f64) -> Vec<f64> {
    genes.iter().map(|&gene| scale_gene(gene, min, max)).collect()
}

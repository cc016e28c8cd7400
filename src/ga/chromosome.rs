use crate::operators::{Gene, Genome};
use crate::population::Candidate;
use crate::rng::RandomNumberGenerator;

/// A complete candidate point for the monolithic GA: one gene per dimension.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<Gene>,
    fitness: f64,
    scaled_fitness: f64,
    selection_probability: f64,
}

impl Chromosome {
    /// Creates an unscored chromosome.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            fitness: 0.0,
            scaled_fitness: 0.0,
            selection_probability: 0.0,
        }
    }

    /// Creates an unscored chromosome of `dimensions` uniformly random genes.
    pub fn random(dimensions: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self::new((0..dimensions).map(|_| rng.gene()).collect())
    }

    pub fn set_genes(&mut self, genes: Vec<Gene>) {
        self.genes = genes;
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl Genome for Chromosome {
    fn genes(&self) -> &[Gene] {
        &self.genes
    }

    fn update_genes<F>(&mut self, f: F)
    where
        F: FnMut(&mut Gene),
    {
        self.genes.iter_mut().for_each(f);
    }
}

impl Candidate for Chromosome {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn scaled_fitness(&self) -> f64 {
        self.scaled_fitness
    }

    fn selection_probability(&self) -> f64 {
        self.selection_probability
    }

    fn set_selection_probability(&mut self, probability: f64) {
        self.selection_probability = probability;
    }

    fn record_fitness(&mut self, fitness: f64, f_max: f64) {
        self.fitness = fitness;
        self.scaled_fitness = (f_max - fitness).abs();
    }
}

use super::Candidate;
use crate::error::{GeneticError, Result};
use crate::operators::{Gene, Genome};

/// One candidate value for one species.
///
/// An individual is only ever scored as part of its collaboration vector, the
/// full candidate point holding one gene per species. The slot at the
/// individual's own species id always equals its gene: every write through
/// this type preserves `collaboration[species_id] == gene`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    species_id: usize,
    gene: Gene,
    fitness: f64,
    scaled_fitness: f64,
    selection_probability: f64,
    collaboration: Vec<Gene>,
}

impl Individual {
    /// Creates an unscored individual with an empty collaboration vector.
    pub fn new(species_id: usize, gene: Gene) -> Self {
        Self {
            species_id,
            gene,
            fitness: 0.0,
            scaled_fitness: 0.0,
            selection_probability: 0.0,
            collaboration: Vec::new(),
        }
    }

    /// Creates an unscored individual whose gene is taken from its own slot of
    /// `collaboration`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::DimensionMismatch` if `collaboration` has no slot
    /// for `species_id`.
    pub fn with_collaboration(species_id: usize, collaboration: Vec<Gene>) -> Result<Self> {
        let gene = *collaboration
            .get(species_id)
            .ok_or(GeneticError::DimensionMismatch {
                expected: species_id + 1,
                actual: collaboration.len(),
            })?;

        Ok(Self {
            collaboration,
            ..Self::new(species_id, gene)
        })
    }

    pub fn species_id(&self) -> usize {
        self.species_id
    }

    pub fn gene(&self) -> Gene {
        self.gene
    }

    pub fn collaboration(&self) -> &[Gene] {
        &self.collaboration
    }

    /// Gene used for `dimension` when this individual is scored.
    pub fn collaborator(&self, dimension: usize) -> Option<Gene> {
        self.collaboration.get(dimension).copied()
    }

    /// Replaces the whole collaboration vector, keeping the individual's own
    /// gene in its own slot.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::DimensionMismatch` if `collaboration` has no slot
    /// for this individual's species.
    pub fn set_collaboration(&mut self, mut collaboration: Vec<Gene>) -> Result<()> {
        match collaboration.get_mut(self.species_id) {
            Some(slot) => *slot = self.gene,
            None => {
                return Err(GeneticError::DimensionMismatch {
                    expected: self.species_id + 1,
                    actual: collaboration.len(),
                })
            }
        }
        self.collaboration = collaboration;
        Ok(())
    }

    /// Sets the gene used for `dimension`.
    ///
    /// Writing the individual's own dimension also replaces its gene.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::DimensionMismatch` if `dimension` is outside the
    /// collaboration vector.
    pub fn set_collaborator(&mut self, dimension: usize, gene: Gene) -> Result<()> {
        let length = self.collaboration.len();
        let slot = self.collaboration.get_mut(dimension).ok_or(
            GeneticError::DimensionMismatch {
                expected: dimension + 1,
                actual: length,
            },
        )?;
        *slot = gene;
        if dimension == self.species_id {
            self.gene = gene;
        }
        Ok(())
    }

    /// Replaces the individual's own gene, in its collaboration as well.
    pub fn set_gene(&mut self, gene: Gene) {
        self.gene = gene;
        if let Some(slot) = self.collaboration.get_mut(self.species_id) {
            *slot = gene;
        }
    }

    /// Whether the own-slot invariant holds.
    pub fn is_consistent(&self) -> bool {
        self.collaborator(self.species_id) == Some(self.gene)
    }
}

impl Genome for Individual {
    fn genes(&self) -> &[Gene] {
        &self.collaboration
    }

    fn update_genes<F>(&mut self, f: F)
    where
        F: FnMut(&mut Gene),
    {
        self.collaboration.iter_mut().for_each(f);
        if let Some(&gene) = self.collaboration.get(self.species_id) {
            self.gene = gene;
        }
    }
}

impl Candidate for Individual {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_collaboration_takes_own_gene() {
        let individual = Individual::with_collaboration(2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(individual.gene(), 3);
        assert!(individual.is_consistent());
    }

    #[test]
    fn test_with_collaboration_too_short() {
        let result = Individual::with_collaboration(3, vec![1, 2]);
        assert!(matches!(
            result,
            Err(GeneticError::DimensionMismatch {
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_set_collaboration_keeps_own_gene() {
        let mut individual = Individual::new(1, 0xABCD);
        individual.set_collaboration(vec![1, 2, 3]).unwrap();
        assert_eq!(individual.collaboration(), &[1, 0xABCD, 3]);
        assert!(individual.is_consistent());
    }

    #[test]
    fn test_set_collaborator_own_slot_updates_gene() {
        let mut individual = Individual::with_collaboration(0, vec![5, 6]).unwrap();

        individual.set_collaborator(1, 60).unwrap();
        assert_eq!(individual.gene(), 5);

        individual.set_collaborator(0, 50).unwrap();
        assert_eq!(individual.gene(), 50);
        assert!(individual.is_consistent());
    }

    #[test]
    fn test_set_collaborator_out_of_range() {
        let mut individual = Individual::with_collaboration(0, vec![5, 6]).unwrap();

        assert!(matches!(
            individual.set_collaborator(2, 60),
            Err(GeneticError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
        assert_eq!(individual.collaboration(), &[5, 6]);
    }

    #[test]
    fn test_set_gene_updates_collaboration() {
        let mut individual = Individual::with_collaboration(1, vec![5, 6]).unwrap();
        individual.set_gene(99);
        assert_eq!(individual.collaboration(), &[5, 99]);
    }

    #[test]
    fn test_record_fitness_scales_against_f_max() {
        let mut individual = Individual::new(0, 1);
        individual.record_fitness(2392.99, 3000.0);
        assert!((individual.fitness() - 2392.99).abs() < 1e-9);
        assert!((individual.scaled_fitness() - 607.01).abs() < 1e-9);

        individual.record_fitness(10.0, 0.0);
        assert_eq!(individual.scaled_fitness(), 10.0);
    }
}

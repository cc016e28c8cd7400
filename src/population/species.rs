use super::{sort_by_fitness, Individual};
use crate::error::{GeneticError, Result};
use crate::operators::Gene;
use crate::rng::RandomNumberGenerator;

/// The individuals of one species, ordered by fitness once evaluated.
///
/// A population is never empty. After sorting, index 0 holds the elite.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    species_id: usize,
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates `size` individuals with uniformly random genes.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if `size` is zero.
    pub fn random(species_id: usize, size: usize, rng: &mut RandomNumberGenerator) -> Result<Self> {
        let individuals = (0..size)
            .map(|_| Individual::new(species_id, rng.gene()))
            .collect();
        Self::from_individuals(species_id, individuals)
    }

    /// Wraps existing individuals.
    ///
    /// # Errors
    ///
    /// Fails if `individuals` is empty or contains a member of another species.
    pub fn from_individuals(species_id: usize, individuals: Vec<Individual>) -> Result<Self> {
        if individuals.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        if let Some(stray) = individuals.iter().find(|i| i.species_id() != species_id) {
            return Err(GeneticError::Configuration(format!(
                "Individual of species {} placed in population of species {}",
                stray.species_id(),
                species_id
            )));
        }
        Ok(Self {
            species_id,
            individuals,
        })
    }

    pub fn species_id(&self) -> usize {
        self.species_id
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    /// The fittest individual, assuming the population is sorted.
    pub fn elite(&self) -> &Individual {
        &self.individuals[0]
    }

    pub fn elite_mut(&mut self) -> &mut Individual {
        &mut self.individuals[0]
    }

    /// The least fit individual, assuming the population is sorted.
    pub fn worst(&self) -> &Individual {
        &self.individuals[self.individuals.len() - 1]
    }

    /// Everyone except the elite.
    pub fn non_elite_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals[1..]
    }

    pub fn sort_by_fitness(&mut self) {
        sort_by_fitness(&mut self.individuals);
    }
}

/// One population per problem dimension.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    populations: Vec<Population>,
}

impl Species {
    /// Generates `species_count` populations of `population_size` random
    /// individuals each.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `species_count` is zero or if
    /// `population_size` is below 2, since elitism needs at least one
    /// non-elite individual.
    pub fn new(
        species_count: usize,
        population_size: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        if species_count == 0 {
            return Err(GeneticError::Configuration(
                "Species count must be at least 1".to_string(),
            ));
        }
        if population_size < 2 {
            return Err(GeneticError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }

        let populations = (0..species_count)
            .map(|species_id| Population::random(species_id, population_size, rng))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { populations })
    }

    /// Assembles a species from existing populations.
    ///
    /// # Errors
    ///
    /// Fails if `populations` is empty or a population's species id does not
    /// match its position.
    pub fn from_populations(populations: Vec<Population>) -> Result<Self> {
        if populations.is_empty() {
            return Err(GeneticError::Configuration(
                "Species count must be at least 1".to_string(),
            ));
        }
        if let Some((index, population)) = populations
            .iter()
            .enumerate()
            .find(|(index, population)| population.species_id() != *index)
        {
            return Err(GeneticError::Configuration(format!(
                "Population of species {} found at position {}",
                population.species_id(),
                index
            )));
        }
        Ok(Self { populations })
    }

    /// Gives every individual its first collaboration vector: its own gene in
    /// its own slot and the gene of a uniformly chosen member of every other
    /// species elsewhere.
    ///
    /// Must run once, before the first evaluation.
    pub fn init_coevolutions(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
        let gene_table: Vec<Vec<Gene>> = self
            .populations
            .iter()
            .map(|population| population.iter().map(Individual::gene).collect())
            .collect();

        for population in &mut self.populations {
            for individual in population.individuals_mut() {
                let (own_dimension, own_gene) = (individual.species_id(), individual.gene());
                let collaboration = gene_table
                    .iter()
                    .enumerate()
                    .map(|(dimension, genes)| {
                        if dimension == own_dimension {
                            own_gene
                        } else {
                            genes[rng.index(genes.len())]
                        }
                    })
                    .collect();
                individual.set_collaboration(collaboration)?;
            }
        }
        Ok(())
    }

    pub fn species_count(&self) -> usize {
        self.populations.len()
    }

    /// Total number of individuals across all species.
    pub fn individual_count(&self) -> usize {
        self.populations.iter().map(Population::len).sum()
    }

    pub fn populations(&self) -> &[Population] {
        &self.populations
    }

    pub fn populations_mut(&mut self) -> &mut [Population] {
        &mut self.populations
    }

    pub fn population(&self, species_id: usize) -> Option<&Population> {
        self.populations.get(species_id)
    }

    /// Current elite gene of every species, in dimension order.
    pub fn elite_genes(&self) -> Vec<Gene> {
        self.populations.iter().map(|p| p.elite().gene()).collect()
    }

    /// Whether every individual satisfies `collaboration[species_id] == gene`
    /// and carries one collaborator per species.
    pub fn is_consistent(&self) -> bool {
        let species_count = self.species_count();
        self.populations.iter().flat_map(Population::iter).all(|individual| {
            individual.is_consistent() && individual.collaboration().len() == species_count
        })
    }
}

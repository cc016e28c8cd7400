use super::{Gene, Genome, GENE_BITS};
use crate::error::{check_probability, Result};
use crate::rng::RandomNumberGenerator;

/// Flips every bit of `gene` independently with the given probability.
pub fn flip_bits(gene: Gene, probability: f64, rng: &mut RandomNumberGenerator) -> Gene {
    (0..GENE_BITS).fold(gene, |gene, bit| {
        if rng.chance(probability) {
            gene ^ (1 << bit)
        } else {
            gene
        }
    })
}

/// Independent bit-flip mutation over every gene of a genome.
///
/// Callers are responsible for skipping elite individuals; the operator itself
/// mutates whatever it is handed.
///
/// # Examples
///
/// ```rust
/// use ccga::operators::BitFlipMutation;
/// use ccga::population::Individual;
/// use ccga::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let mut individual = Individual::with_collaboration(0, vec![0x0000, 0xFFFF]).unwrap();
///
/// BitFlipMutation::new(1.0).unwrap().mutate(&mut individual, &mut rng);
///
/// assert_eq!(individual.collaboration(), &[0xFFFF, 0x0000]);
/// assert_eq!(individual.gene(), 0xFFFF);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitFlipMutation {
    probability: f64,
}

impl BitFlipMutation {
    /// Creates a mutation operator with the given per-bit flip probability.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `probability` lies outside `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        check_probability("Mutation probability", probability)?;
        Ok(Self { probability })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Mutates every gene of `genome` in place.
    pub fn mutate<G: Genome>(&self, genome: &mut G, rng: &mut RandomNumberGenerator) {
        let probability = self.probability;
        genome.update_genes(|gene| *gene = flip_bits(*gene, probability, rng));
    }
}

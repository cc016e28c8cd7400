//! # Genetic Operators
//!
//! Crossover and mutation on 16-bit genes. Every real-valued parameter of a
//! benchmark problem is encoded as one `Gene`; the operators work on the raw
//! bits and never look at the decoded value.
pub mod crossover;
pub mod mutation;

pub use crossover::{two_point_crossover, two_point_crossover_genes};
pub use mutation::{flip_bits, BitFlipMutation};

/// A single 16-bit allele.
pub type Gene = u16;

/// Number of bits in a `Gene`.
pub const GENE_BITS: u32 = Gene::BITS;

/// Anything that carries a sequence of genes that mutation can rewrite.
///
/// Implementors that keep derived state in sync with their genes restore it
/// at the end of `update_genes`.
pub trait Genome {
    /// The genes scored by the objective, in dimension order.
    fn genes(&self) -> &[Gene];

    /// Applies `f` to every gene, then restores the implementor's invariants.
    fn update_genes<F>(&mut self, f: F)
    where
        F: FnMut(&mut Gene);
}

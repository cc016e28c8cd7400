//! # Two-Point Crossover
//!
//! The single-gene operator used by CCGA exchanges the middle byte band
//! (bits 4 to 11) of two parents:
//!
//! ```text
//!   inner mask  0000 1111 1111 0000   0x0FF0
//!   outer mask  1111 0000 0000 1111   0xF00F
//! ```
//!
//! The multi-gene operator used by the monolithic GA treats a whole chromosome
//! as one bit string, cuts it at one quarter and three quarters of its length
//! and exchanges the middle half.
//!
//! ```rust
//! use ccga::operators::two_point_crossover;
//!
//! assert_eq!(two_point_crossover(0xFFFF, 0x0000), (0x0FF0, 0xF00F));
//! ```

use super::{Gene, GENE_BITS};
use crate::error::{GeneticError, Result};

/// Bits 4 to 11 of a gene.
pub const TWO_POINT_INNER_MASK: Gene = 0x0FF0;

/// The complement of [`TWO_POINT_INNER_MASK`].
pub const TWO_POINT_OUTER_MASK: Gene = !TWO_POINT_INNER_MASK;

/// Crosses two genes, returning both children.
///
/// The first child takes the middle band of `parent_a` and the outer bands of
/// `parent_b`; the second child is its complement. Swapping the parents swaps
/// the children.
pub fn two_point_crossover(parent_a: Gene, parent_b: Gene) -> (Gene, Gene) {
    let child_a = (parent_a & TWO_POINT_INNER_MASK) ^ (parent_b & TWO_POINT_OUTER_MASK);
    let child_b = (parent_a & TWO_POINT_OUTER_MASK) ^ (parent_b & TWO_POINT_INNER_MASK);
    (child_a, child_b)
}

/// Crosses two chromosomes of equal length as one contiguous bit string.
///
/// The first child keeps `parent_a` outside the middle half and takes
/// `parent_b` inside it. Bits are numbered from the most significant bit of
/// the first gene.
///
/// # Errors
///
/// Returns `GeneticError::DimensionMismatch` if the parents differ in length.
pub fn two_point_crossover_genes(
    parent_a: &[Gene],
    parent_b: &[Gene],
) -> Result<(Vec<Gene>, Vec<Gene>)> {
    if parent_a.len() != parent_b.len() {
        return Err(GeneticError::DimensionMismatch {
            expected: parent_a.len(),
            actual: parent_b.len(),
        });
    }

    let total_bits = parent_a.len() * GENE_BITS as usize;
    let lower = total_bits / 4;
    let upper = total_bits * 3 / 4;

    let (child_a, child_b) = parent_a
        .iter()
        .zip(parent_b)
        .enumerate()
        .map(|(index, (&a, &b))| {
            let mask = middle_band_mask(index, lower, upper);
            ((a & !mask) | (b & mask), (b & !mask) | (a & mask))
        })
        .unzip();

    Ok((child_a, child_b))
}

/// Mask of the bits of gene `index` that fall inside `[lower, upper)`.
fn middle_band_mask(index: usize, lower: usize, upper: usize) -> Gene {
    let first_bit = index * GENE_BITS as usize;
    (0..GENE_BITS as usize)
        .filter(|offset| (lower..upper).contains(&(first_bit + offset)))
        .fold(0, |mask: Gene, offset| {
            mask | ((1 as Gene) << (GENE_BITS as usize - 1 - offset))
        })
}

//! Gene-level genetic operators.
//!
//! These work on plain `&mut [Note]` slices and know nothing about fitness
//! caching; [`Chromosome`](super::Chromosome) wraps them and takes care of
//! invalidation.
//!
//! # Crossover Operators
//!
//! - [`segment_swap`]: two-point exchange of an aligned segment, O(n)
//!
//! # Mutation Operators
//!
//! - [`two_point_mutation`]: rewrite two distinct positions with two distinct
//!   random notes, O(1) expected

use crate::cantus::{Note, MAX_NOTE, MIN_NOTE};
use crate::error::{CounterpointError, Result};
use crate::random::MAX_DRAW_ATTEMPTS;
use rand::Rng;
use std::ops::Range;

/// Draws a uniformly random note code in `[MIN_NOTE, MAX_NOTE]`.
pub fn random_note<R: Rng>(rng: &mut R) -> Note {
    rng.random_range(MIN_NOTE..=MAX_NOTE)
}

/// Draws `len` independent random note codes.
pub fn random_genes<R: Rng>(len: usize, rng: &mut R) -> Vec<Note> {
    (0..len).map(|_| random_note(rng)).collect()
}

/// Two-point crossover that exchanges an aligned segment in place.
///
/// Draws `start` uniformly from `[0, n)` and `end` uniformly from
/// `[start, n)`, then swaps `a[start..end]` with `b[start..end]`.
/// The segment may be empty. Returns the swapped range.
///
/// # Panics
/// Panics if the slices have different lengths or are empty.
pub fn segment_swap<R: Rng>(a: &mut [Note], b: &mut [Note], rng: &mut R) -> Range<usize> {
    let n = a.len();
    assert_eq!(n, b.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let start = rng.random_range(0..n);
    let end = rng.random_range(start..n);
    a[start..end].swap_with_slice(&mut b[start..end]);
    start..end
}

/// Rewrites two distinct positions with two distinct random notes.
///
/// Both the positions and the new values are drawn by rejection until
/// they differ. The new values may coincide with the old ones. Returns the
/// two positions in draw order.
///
/// # Errors
/// [`CounterpointError::DegenerateConfiguration`] if fewer than two genes
/// are given, or if a distinct draw is not found within
/// [`MAX_DRAW_ATTEMPTS`].
pub fn two_point_mutation<R: Rng>(genes: &mut [Note], rng: &mut R) -> Result<(usize, usize)> {
    let n = genes.len();
    if n < 2 {
        return Err(CounterpointError::DegenerateConfiguration(format!(
            "mutation needs at least 2 genes, got {n}"
        )));
    }

    let (first, second) = draw_distinct(rng, |rng| rng.random_range(0..n))
        .ok_or_else(|| exhausted("mutation positions"))?;
    let (first_note, second_note) =
        draw_distinct(rng, random_note).ok_or_else(|| exhausted("mutation values"))?;

    genes[first] = first_note;
    genes[second] = second_note;
    Ok((first, second))
}

/// Draws pairs from `draw` until the two values differ.
pub(crate) fn draw_distinct<R, T, F>(rng: &mut R, mut draw: F) -> Option<(T, T)>
where
    R: Rng,
    T: PartialEq,
    F: FnMut(&mut R) -> T,
{
    for _ in 0..MAX_DRAW_ATTEMPTS {
        let first = draw(rng);
        let second = draw(rng);
        if first != second {
            return Some((first, second));
        }
    }
    None
}

fn exhausted(what: &str) -> CounterpointError {
    CounterpointError::DegenerateConfiguration(format!(
        "no distinct {what} after {MAX_DRAW_ATTEMPTS} attempts"
    ))
}

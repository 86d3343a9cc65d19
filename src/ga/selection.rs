//! Binary tournament parent selection.
//!
//! Each parent slot is filled by sampling two distinct members and keeping
//! the fitter one. The pair is redrawn if both slots land on the same
//! member, so the two parents are always distinct individuals.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::chromosome::Chromosome;
use super::operators::draw_distinct;
use crate::error::{CounterpointError, Result};
use crate::random::MAX_DRAW_ATTEMPTS;
use crate::species::Species;
use rand::Rng;

/// Selects two distinct parent indices from `pool`.
///
/// Higher fitness under `species` wins a tournament; on a tie the second
/// sampled member wins. Fitness caches of sampled members are filled as a
/// side effect.
///
/// # Errors
/// [`CounterpointError::DegenerateConfiguration`] if the pool holds fewer
/// than two members or no distinct pair is found within
/// [`MAX_DRAW_ATTEMPTS`].
pub fn tournament_pair<R: Rng>(
    pool: &mut [Chromosome],
    species: Species,
    rng: &mut R,
) -> Result<(usize, usize)> {
    let n = pool.len();
    if n < 2 {
        return Err(CounterpointError::DegenerateConfiguration(format!(
            "tournament selection needs at least 2 members, got {n}"
        )));
    }

    for attempt in 0..MAX_DRAW_ATTEMPTS {
        let first = tournament(pool, species, rng)?;
        let second = tournament(pool, species, rng)?;
        if first != second {
            return Ok((first, second));
        }
        tracing::trace!(attempt, index = first, "both tournaments picked the same parent");
    }

    Err(CounterpointError::DegenerateConfiguration(format!(
        "no distinct parent pair after {MAX_DRAW_ATTEMPTS} attempts"
    )))
}

/// One binary tournament over two distinct random members.
fn tournament<R: Rng>(pool: &mut [Chromosome], species: Species, rng: &mut R) -> Result<usize> {
    let n = pool.len();
    let (a, b) = draw_distinct(rng, |rng| rng.random_range(0..n)).ok_or_else(|| {
        CounterpointError::DegenerateConfiguration(format!(
            "no distinct tournament entrants after {MAX_DRAW_ATTEMPTS} attempts"
        ))
    })?;

    let fitness_a = pool[a].fitness(species);
    let fitness_b = pool[b].fitness(species);
    Ok(if fitness_a > fitness_b { a } else { b })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cantus::CantusFirmus;
    use crate::fitness::FitnessWeights;
    use crate::random::create_rng;
    use std::sync::Arc;

    fn cantus() -> CantusFirmus {
        CantusFirmus::new(&[5, 6, 5]).unwrap()
    }

    fn make_pool(genes: &[[u8; 3]]) -> Vec<Chromosome> {
        let weights = Arc::new(FitnessWeights::default());
        genes
            .iter()
            .map(|g| Chromosome::with_genes(g, &cantus(), weights.clone()).unwrap())
            .collect()
    }

    #[test]
    fn test_parents_are_distinct() {
        let mut pool = make_pool(&[[1, 1, 1], [2, 2, 2], [3, 3, 3], [12, 11, 12]]);
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (a, b) = tournament_pair(&mut pool, Species::First, &mut rng).unwrap();
            assert_ne!(a, b);
            assert!(a < 4 && b < 4);
        }
    }

    #[test]
    fn test_favors_fittest() {
        let mut pool = make_pool(&[[1, 1, 1], [2, 2, 2], [3, 3, 3], [12, 11, 12]]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            let (a, b) = tournament_pair(&mut pool, Species::First, &mut rng).unwrap();
            counts[a] += 1;
            counts[b] += 1;
        }
        // The best member wins every tournament it enters and so appears
        // in roughly three quarters of the accepted pairs.
        assert!(
            counts[3] > counts[0],
            "best should be selected more often: {counts:?}"
        );
        assert!(counts[3] > 6500, "expected strong preference, got {counts:?}");
    }

    #[test]
    fn test_two_unequal_members_exhaust_attempts() {
        // Both tournaments always see both members, so the fitter one wins
        // each slot and no distinct pair exists.
        let mut pool = make_pool(&[[1, 1, 1], [12, 11, 12]]);
        let mut rng = create_rng(42);
        let err = tournament_pair(&mut pool, Species::First, &mut rng).unwrap_err();
        assert!(matches!(err, CounterpointError::DegenerateConfiguration(_)));
    }

    #[test]
    fn test_two_equal_members_never_exhausts() {
        // Ties go to the second entrant, so both members remain reachable.
        let mut pool = make_pool(&[[4, 4, 4], [4, 4, 4]]);
        let mut rng = create_rng(9);
        for _ in 0..100 {
            assert!(tournament_pair(&mut pool, Species::First, &mut rng).is_ok());
        }
    }

    #[test]
    fn test_pool_too_small() {
        let mut pool = make_pool(&[[1, 1, 1]]);
        let mut rng = create_rng(42);
        let err = tournament_pair(&mut pool, Species::First, &mut rng).unwrap_err();
        assert!(matches!(err, CounterpointError::DegenerateConfiguration(_)));

        let err = tournament_pair(&mut [], Species::First, &mut rng).unwrap_err();
        assert!(matches!(err, CounterpointError::DegenerateConfiguration(_)));
    }
}

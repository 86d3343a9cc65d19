//! Candidate melody with a lazily computed fitness cache.

use super::operators::{random_genes, segment_swap, two_point_mutation};
use crate::cantus::{CantusFirmus, Note, MAX_NOTE, MIN_NOTE};
use crate::error::{CounterpointError, Result};
use crate::fitness::{score_unchecked, FitnessWeights};
use crate::species::Species;
use rand::Rng;
use std::cmp::Ordering;
use std::ops::Range;
use std::sync::Arc;

/// A contrapunctus: one gene per cantus firmus note.
///
/// Fitness is cached per [`Species`] behind a dirty flag. Every operation
/// that changes the genes sets the flag; the next [`fitness`](Self::fitness)
/// call rescores all species and clears it.
#[derive(Debug, Clone)]
pub struct Chromosome {
    genes: Vec<Note>,
    cantus_firmus: CantusFirmus,
    weights: Arc<FitnessWeights>,
    fitness: [f64; Species::ALL.len()],
    dirty: bool,
}

impl Chromosome {
    /// Creates a chromosome with uniformly random genes.
    pub fn random<R: Rng>(
        cantus_firmus: &CantusFirmus,
        weights: Arc<FitnessWeights>,
        rng: &mut R,
    ) -> Self {
        Self::from_parts(random_genes(cantus_firmus.len(), rng), cantus_firmus, weights)
    }

    /// Creates a chromosome from explicit genes.
    ///
    /// # Errors
    /// [`CounterpointError::InvalidInput`] if the gene count differs from
    /// the cantus firmus length or a gene lies outside
    /// `[MIN_NOTE, MAX_NOTE]`.
    pub fn with_genes(
        genes: &[Note],
        cantus_firmus: &CantusFirmus,
        weights: Arc<FitnessWeights>,
    ) -> Result<Self> {
        if genes.len() != cantus_firmus.len() {
            return Err(CounterpointError::InvalidInput(format!(
                "expected {} genes, got {}",
                cantus_firmus.len(),
                genes.len()
            )));
        }
        if let Some((i, &g)) = genes
            .iter()
            .enumerate()
            .find(|(_, g)| !(MIN_NOTE..=MAX_NOTE).contains(*g))
        {
            return Err(CounterpointError::InvalidInput(format!(
                "gene {i} is {g}, expected a note code in [{MIN_NOTE}, {MAX_NOTE}]"
            )));
        }
        Ok(Self::from_parts(genes.to_vec(), cantus_firmus, weights))
    }

    fn from_parts(genes: Vec<Note>, cantus_firmus: &CantusFirmus, weights: Arc<FitnessWeights>) -> Self {
        Self {
            genes,
            cantus_firmus: cantus_firmus.clone(),
            weights,
            fitness: [0.0; Species::ALL.len()],
            dirty: true,
        }
    }

    /// Copy of the genes.
    pub fn genes(&self) -> Vec<Note> {
        self.genes.clone()
    }

    /// Borrowed view of the genes.
    pub fn gene_slice(&self) -> &[Note] {
        &self.genes
    }

    /// Copy of the cantus firmus.
    pub fn cantus_firmus(&self) -> Vec<Note> {
        self.cantus_firmus.to_vec()
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// True if the genes changed since fitness was last computed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the fitness under `species`, rescoring first if dirty.
    pub fn fitness(&mut self, species: Species) -> f64 {
        if self.dirty {
            let value = score_unchecked(&self.genes, &self.cantus_firmus, &self.weights);
            for s in Species::ALL {
                self.fitness[s.index()] = value;
            }
            self.dirty = false;
        }
        self.fitness[species.index()]
    }

    /// The cached fitness, or `None` while the cache is stale.
    pub fn cached_fitness(&self, species: Species) -> Option<f64> {
        (!self.dirty).then(|| self.fitness[species.index()])
    }

    /// Exchanges a random aligned segment between two chromosomes and
    /// returns the swapped range.
    ///
    /// Both are marked dirty, including when the drawn segment is empty.
    pub fn cross_over<R: Rng>(a: &mut Chromosome, b: &mut Chromosome, rng: &mut R) -> Range<usize> {
        let range = segment_swap(&mut a.genes, &mut b.genes, rng);
        a.dirty = true;
        b.dirty = true;
        range
    }

    /// Rewrites two distinct genes with two distinct random notes.
    pub fn mutate<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        two_point_mutation(&mut self.genes, rng)?;
        self.dirty = true;
        Ok(())
    }

    /// Ascending comparison by fitness under `species`.
    pub fn compare(&mut self, other: &mut Chromosome, species: Species) -> Ordering {
        let mine = self.fitness(species);
        let theirs = other.fitness(species);
        mine.partial_cmp(&theirs).unwrap_or(Ordering::Equal)
    }
}

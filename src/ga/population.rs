//! One generation of chromosomes and the reproduction step that builds the
//! next one.

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::selection::tournament_pair;
use crate::cantus::CantusFirmus;
use crate::error::Result;
use crate::fitness::FitnessWeights;
use crate::species::Species;
use rand::Rng;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

/// A fixed-size generation of chromosomes.
///
/// Members are sorted ascending by fitness on demand; the sort is memoized
/// until membership changes.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Chromosome>,
    size: usize,
    species: Species,
    cantus_firmus: CantusFirmus,
    weights: Arc<FitnessWeights>,
    crossover_rate: f64,
    mutation_rate: f64,
    parallel: bool,
    sorted: bool,
}

impl Population {
    /// Creates a generation of `config.population_size` random chromosomes.
    ///
    /// # Errors
    /// Any error from [`GaConfig::validate`].
    pub fn new<R: Rng>(cantus_firmus: &CantusFirmus, config: &GaConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let weights = Arc::new(config.weights);
        let members = random_members(config.population_size, cantus_firmus, &weights, rng);
        Ok(Self {
            members,
            size: config.population_size,
            species: config.species,
            cantus_firmus: cantus_firmus.clone(),
            weights,
            crossover_rate: config.crossover_rate,
            mutation_rate: config.mutation_rate,
            parallel: config.parallel,
            sorted: false,
        })
    }

    /// Same configuration, new members.
    fn with_members(&self, members: Vec<Chromosome>) -> Self {
        Self {
            members,
            size: self.size,
            species: self.species,
            cantus_firmus: self.cantus_firmus.clone(),
            weights: Arc::clone(&self.weights),
            crossover_rate: self.crossover_rate,
            mutation_rate: self.mutation_rate,
            parallel: self.parallel,
            sorted: false,
        }
    }

    /// Builds the next generation.
    ///
    /// 1. A fresh random generation is drawn. Parents are chosen by
    ///    tournament from that generation's own member list, which grows as
    ///    offspring are appended; each pair is copied, crossed over, and
    ///    appended while the offspring count is below
    ///    `size * crossover_rate`. At most `size - 1` offspring are kept so
    ///    the elite always fits.
    /// 2. The fresh random members are dropped and a copy of this
    ///    generation's best chromosome is appended.
    /// 3. Random members of this generation fill the remaining slots.
    /// 4. `floor(size * mutation_rate)` mutations hit random children.
    ///
    /// The result always holds exactly `size` members.
    ///
    /// # Errors
    /// [`CounterpointError::DegenerateConfiguration`](crate::CounterpointError)
    /// if selection or mutation cannot find distinct draws.
    pub fn reproduce<R: Rng>(&mut self, rng: &mut R) -> Result<Population> {
        let size = self.size;
        let offspring_cap = size - 1;
        let crossover_target = size as f64 * self.crossover_rate;

        let mut pool = random_members(size, &self.cantus_firmus, &self.weights, rng);
        warm_up(&mut pool, self.species, self.parallel);

        loop {
            let offspring = pool.len() - size;
            if offspring as f64 >= crossover_target || offspring >= offspring_cap {
                break;
            }
            let (first, second) = tournament_pair(&mut pool, self.species, rng)?;
            let mut child_a = pool[first].clone();
            let mut child_b = pool[second].clone();
            Chromosome::cross_over(&mut child_a, &mut child_b, rng);
            pool.push(child_a);
            if pool.len() - size < offspring_cap {
                pool.push(child_b);
            }
        }
        let mut children = pool.split_off(size);
        let crossed = children.len();

        children.push(self.best().clone());

        while children.len() < size {
            let index = rng.random_range(0..self.members.len());
            children.push(self.members[index].clone());
        }

        let mutations = (size as f64 * self.mutation_rate).floor() as usize;
        for _ in 0..mutations {
            let index = rng.random_range(0..children.len());
            children[index].mutate(rng)?;
        }

        tracing::trace!(size, crossed, mutations, "reproduced generation");
        Ok(self.with_members(children))
    }

    /// Returns the fittest member, sorting first if needed.
    pub fn best(&mut self) -> &Chromosome {
        self.sort();
        self.members.last().expect("population is never empty")
    }

    /// Fitness of the fittest member under `species`.
    pub fn best_fitness(&mut self, species: Species) -> f64 {
        self.sort();
        self.members
            .last_mut()
            .map_or(f64::NEG_INFINITY, |c| c.fitness(species))
    }

    /// The fittest member if the population is already sorted.
    pub fn sorted_best(&self) -> Option<&Chromosome> {
        if self.sorted {
            self.members.last()
        } else {
            None
        }
    }

    /// Stable ascending sort by fitness under the configured species.
    ///
    /// No-op if already sorted.
    pub fn sort(&mut self) {
        if self.sorted {
            return;
        }
        self.evaluate_all();
        let species = self.species;
        self.members.sort_by(|a, b| {
            a.cached_fitness(species)
                .partial_cmp(&b.cached_fitness(species))
                .unwrap_or(Ordering::Equal)
        });
        self.sorted = true;
    }

    /// Fills every member's fitness cache.
    ///
    /// Runs on the rayon pool when the population was configured as parallel.
    pub fn evaluate_all(&mut self) {
        warm_up(&mut self.members, self.species, self.parallel);
    }

    pub fn members(&self) -> &[Chromosome] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Configured capacity.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }
}

fn random_members<R: Rng>(
    count: usize,
    cantus_firmus: &CantusFirmus,
    weights: &Arc<FitnessWeights>,
    rng: &mut R,
) -> Vec<Chromosome> {
    (0..count)
        .map(|_| Chromosome::random(cantus_firmus, Arc::clone(weights), rng))
        .collect()
}

fn warm_up(members: &mut [Chromosome], species: Species, parallel: bool) {
    if parallel {
        members.par_iter_mut().for_each(|c| {
            c.fitness(species);
        });
    } else {
        for c in members.iter_mut() {
            c.fitness(species);
        }
    }
}

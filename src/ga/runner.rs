//! Evolution driver.
//!
//! [`GeneticAlgorithm`] builds every generation of a run up front:
//! random first generation → reproduce → reproduce → … → sort all.
//! The finished run is queried for its best-fitness trend and for the best
//! melody of any generation.

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::population::Population;
use crate::cantus::{CantusFirmus, Note};
use crate::error::{CounterpointError, Result};
use crate::random::rng_from_seed;
use crate::species::Species;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

/// A completed evolution run.
///
/// # Usage
///
/// ```
/// use u_counterpoint::ga::{GaConfig, GeneticAlgorithm};
///
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_generations(5)
///     .with_seed(42);
/// let run = GeneticAlgorithm::run(&[5, 7, 6, 5, 8, 7, 9, 8, 7, 6, 5], &config).unwrap();
/// assert_eq!(run.best_fitness_per_generation().len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm {
    config: GaConfig,
    cantus_firmus: CantusFirmus,
    generations: Vec<Population>,
    best_fitness: Vec<f64>,
}

impl GeneticAlgorithm {
    /// Runs the GA with a generator seeded from `config.seed`.
    ///
    /// # Errors
    /// [`CounterpointError::InvalidInput`] for an invalid cantus firmus or
    /// configuration, [`CounterpointError::DegenerateConfiguration`] if a
    /// random draw cannot complete.
    pub fn run(cantus_firmus: &[Note], config: &GaConfig) -> Result<Self> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(cantus_firmus, config, &mut rng)
    }

    /// Runs the GA drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<R: Rng>(cantus_firmus: &[Note], config: &GaConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let cantus_firmus = CantusFirmus::new(cantus_firmus)?;

        info!(
            population_size = config.population_size,
            generations = config.generations,
            crossover_rate = config.crossover_rate,
            mutation_rate = config.mutation_rate,
            species = %config.species,
            notes = cantus_firmus.len(),
            "starting counterpoint evolution"
        );

        let mut generations = Vec::with_capacity(config.generations);
        generations.push(Population::new(&cantus_firmus, config, rng)?);
        for g in 1..config.generations {
            let next = generations[g - 1].reproduce(rng)?;
            generations.push(next);
        }

        let mut best_fitness = Vec::with_capacity(generations.len());
        for (g, population) in generations.iter_mut().enumerate() {
            population.sort();
            let fitness = population.best_fitness(Species::First);
            debug!(generation = g, best_fitness = fitness, members = population.len(), "generation sorted");
            best_fitness.push(fitness);
        }

        info!(
            first = best_fitness.first().copied(),
            last = best_fitness.last().copied(),
            "counterpoint evolution finished"
        );

        Ok(Self {
            config: config.clone(),
            cantus_firmus,
            generations,
            best_fitness,
        })
    }

    /// Runs `runs` independent GAs on the same cantus firmus.
    ///
    /// With a seed, run `k` uses `seed + k`, so the batch is reproducible.
    /// Runs execute on the rayon pool when `config.parallel` is set.
    ///
    /// # Errors
    /// [`CounterpointError::InvalidInput`] if `runs` is zero, or the first
    /// error any run produces.
    pub fn run_many(cantus_firmus: &[Note], config: &GaConfig, runs: usize) -> Result<Vec<Self>> {
        if runs == 0 {
            return Err(CounterpointError::InvalidInput(
                "runs must be positive".into(),
            ));
        }
        let configs: Vec<GaConfig> = (0..runs)
            .map(|k| GaConfig {
                seed: config.seed.map(|s| s.wrapping_add(k as u64)),
                ..config.clone()
            })
            .collect();

        if config.parallel {
            configs
                .par_iter()
                .map(|c| Self::run(cantus_firmus, c))
                .collect()
        } else {
            configs.iter().map(|c| Self::run(cantus_firmus, c)).collect()
        }
    }

    /// Best fitness (first species) of each generation, in order.
    pub fn best_fitness_per_generation(&self) -> &[f64] {
        &self.best_fitness
    }

    /// Fittest chromosome of generation `g`, or `None` if out of range.
    pub fn best_of_generation(&self, g: usize) -> Option<&Chromosome> {
        self.generations.get(g).and_then(Population::sorted_best)
    }

    pub fn best_of_first_generation(&self) -> Option<&Chromosome> {
        self.generations.first().and_then(Population::sorted_best)
    }

    pub fn best_of_last_generation(&self) -> Option<&Chromosome> {
        self.generations.last().and_then(Population::sorted_best)
    }

    /// Every generation, oldest first. All are sorted.
    pub fn generations(&self) -> &[Population] {
        &self.generations
    }

    pub fn generation_count(&self) -> usize {
        self.generations.len()
    }

    pub fn cantus_firmus(&self) -> &CantusFirmus {
        &self.cantus_firmus
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }
}

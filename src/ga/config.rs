//! GA configuration.
//!
//! [`GaConfig`] holds every parameter that stays fixed for a run.

use crate::error::{CounterpointError, Result};
use crate::fitness::FitnessWeights;
use crate::species::Species;

/// Configuration for a counterpoint evolution run.
///
/// # Defaults
///
/// ```
/// use u_counterpoint::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.generations, 20);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_counterpoint::ga::GaConfig;
/// use u_counterpoint::Species;
///
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_generations(5)
///     .with_crossover_rate(0.9)
///     .with_mutation_rate(0.02)
///     .with_species(Species::First)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of chromosomes in every generation. Must be at least 3.
    ///
    /// With two members of unequal fitness every tournament returns the
    /// same winner, so no distinct parent pair exists.
    pub population_size: usize,

    /// Number of generations to build, including the random first one.
    pub generations: usize,

    /// Fraction of each new generation produced by crossover, in `(0, 1]`.
    pub crossover_rate: f64,

    /// Fraction of each new generation that receives a mutation, in `[0, 1]`.
    ///
    /// `floor(population_size * mutation_rate)` mutations are applied to
    /// randomly chosen children; a child may be hit more than once.
    pub mutation_rate: f64,

    /// Scoring variant used for selection and sorting.
    pub species: Species,

    /// Rewards and penalties for the fitness evaluator.
    pub weights: FitnessWeights,

    /// Whether to warm fitness caches in parallel using rayon.
    ///
    /// Scores are deterministic, so this never changes the outcome of a
    /// seeded run.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 20,
            crossover_rate: 0.9,
            mutation_rate: 0.02,
            species: Species::First,
            weights: FitnessWeights::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the scoring variant.
    pub fn with_species(mut self, species: Species) -> Self {
        self.species = species;
        self
    }

    /// Replaces the fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// - [`CounterpointError::InvalidInput`] for a zero population size, zero
    ///   generations, rates outside their ranges, or non-finite weights.
    /// - [`CounterpointError::DegenerateConfiguration`] for a population of
    ///   one or two, which cannot reliably supply two distinct parents.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(CounterpointError::InvalidInput(
                "population_size must be positive".into(),
            ));
        }
        if self.population_size < 3 {
            return Err(CounterpointError::DegenerateConfiguration(format!(
                "population_size must be at least 3 for tournament selection, got {}",
                self.population_size
            )));
        }
        if self.generations == 0 {
            return Err(CounterpointError::InvalidInput(
                "generations must be positive".into(),
            ));
        }
        if !(self.crossover_rate > 0.0 && self.crossover_rate <= 1.0) {
            return Err(CounterpointError::InvalidInput(format!(
                "crossover_rate must be in (0, 1], got {}",
                self.crossover_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(CounterpointError::InvalidInput(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        self.weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.generations, 20);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 0.02).abs() < 1e-10);
        assert_eq!(config.species, Species::First);
        assert_eq!(config.weights, FitnessWeights::default());
        assert!(!config.parallel);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_generations(5)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_species(Species::Second)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.population_size, 10);
        assert_eq!(config.generations, 5);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.species, Species::Second);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_crossover_rate(1.5)
            .with_mutation_rate(-2.0);
        assert!((config.crossover_rate - 1.0).abs() < 1e-10);
        assert!((config.mutation_rate - 0.0).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_population() {
        let err = GaConfig::default().with_population_size(0).validate();
        assert!(matches!(err, Err(CounterpointError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_single_member_population() {
        let err = GaConfig::default().with_population_size(1).validate();
        assert!(matches!(
            err,
            Err(CounterpointError::DegenerateConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_two_member_population() {
        let err = GaConfig::default().with_population_size(2).validate();
        assert!(matches!(
            err,
            Err(CounterpointError::DegenerateConfiguration(_))
        ));
        assert!(GaConfig::default().with_population_size(3).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_generations() {
        let err = GaConfig::default().with_generations(0).validate();
        assert!(matches!(err, Err(CounterpointError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_zero_crossover_rate() {
        let err = GaConfig::default().with_crossover_rate(0.0).validate();
        assert!(matches!(err, Err(CounterpointError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_nan_rate() {
        let config = GaConfig {
            mutation_rate: f64::NAN,
            ..GaConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_weights() {
        let weights = FitnessWeights {
            reward_first: f64::INFINITY,
            ..FitnessWeights::default()
        };
        let err = GaConfig::default().with_weights(weights).validate();
        assert!(matches!(err, Err(CounterpointError::InvalidInput(_))));
    }
}

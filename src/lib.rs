//! First-species counterpoint composed by a genetic algorithm.
//!
//! Given a fixed reference melody (the *cantus firmus*), the crate evolves a
//! second melodic line (the *contrapunctus*) whose fitness is a weighted set
//! of classical voice-leading heuristics.
//!
//! - **Fitness**: Pure scoring of a candidate line against the cantus firmus,
//!   parameterized by [`FitnessWeights`].
//! - **Genetic Algorithm**: Chromosomes with cached fitness, two-point
//!   crossover, two-gene mutation, binary tournament selection, elitism and
//!   random carry-over.
//! - **Cantus firmi**: Validated reference melodies and church-mode presets.
//!
//! All randomness comes from a caller-supplied generator, so a run is fully
//! reproducible from its seed.
//!
//! # Example
//!
//! ```
//! use u_counterpoint::cantus::Mode;
//! use u_counterpoint::ga::{GaConfig, GeneticAlgorithm};
//!
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_generations(10)
//!     .with_seed(7);
//! let run = GeneticAlgorithm::run(Mode::Dorian.notes(), &config).unwrap();
//! let best = run.best_of_last_generation().unwrap();
//! assert_eq!(best.genes().len(), 11);
//! ```

pub mod cantus;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod random;
pub mod species;

pub use cantus::{CantusFirmus, Note};
pub use error::{CounterpointError, Result};
pub use fitness::FitnessWeights;
pub use species::Species;

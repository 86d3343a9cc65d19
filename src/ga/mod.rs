//! Genetic algorithm for first-species counterpoint.
//!
//! A contrapunctus is evolved against a fixed cantus firmus. Each generation
//! is a [`Population`] of [`Chromosome`]s; the next generation is assembled
//! from tournament-selected crossover offspring, one elite copy of the
//! previous best, random carry-over from the previous generation, and a
//! fixed number of point mutations.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Run parameters (population size, generations, rates, seed)
//! - [`Chromosome`]: Candidate melody with a per-species fitness cache
//! - [`Population`]: One generation, with reproduction and best-member lookup
//! - [`GeneticAlgorithm`]: Builds and retains every generation of a run
//!
//! # Submodules
//!
//! - [`operators`]: Slice-level crossover and mutation
//! - [`selection`]: Binary tournament parent selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Horner & Goldberg (1991), "Genetic Algorithms and Computer-Assisted Music Composition"

mod chromosome;
mod config;
pub mod operators;
mod population;
mod runner;
pub mod selection;

pub use chromosome::Chromosome;
pub use config::GaConfig;
pub use population::Population;
pub use runner::GeneticAlgorithm;

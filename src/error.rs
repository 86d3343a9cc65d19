//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while configuring or running the counterpoint GA.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CounterpointError {
    /// Input data or parameters outside their valid domain.
    ///
    /// Raised for short or out-of-range cantus firmi, length mismatches
    /// handed to the fitness evaluator, and non-positive sizes or rates.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A configuration under which a randomized draw cannot terminate.
    ///
    /// Raised for populations too small to hold two distinct parents and
    /// for any reject-and-retry loop that exhausts its attempt budget.
    #[error("degenerate configuration: {0}")]
    DegenerateConfiguration(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CounterpointError>;

//! Scoring variants.

use crate::error::CounterpointError;
use std::fmt;
use std::str::FromStr;

/// Counterpoint species a chromosome can be scored under.
///
/// Both variants currently evaluate the same first-species rule set; the
/// fitness cache still tracks them separately so that a distinct
/// second-species rule set can be slotted in later without touching callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Species {
    /// One note against one note.
    #[default]
    First,
    /// Two notes against one note.
    Second,
}

impl Species {
    /// Every variant, in cache-slot order.
    pub const ALL: [Species; 2] = [Species::First, Species::Second];

    /// Slot of this variant in a per-species cache.
    pub fn index(self) -> usize {
        match self {
            Species::First => 0,
            Species::Second => 1,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::First => write!(f, "first"),
            Species::Second => write!(f, "second"),
        }
    }
}

impl FromStr for Species {
    type Err = CounterpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" | "1" => Ok(Species::First),
            "second" | "2" => Ok(Species::Second),
            other => Err(CounterpointError::InvalidInput(format!(
                "unknown species '{other}' (expected 'first' or 'second')"
            ))),
        }
    }
}

//! Note codes and the reference melody.
//!
//! Notes are diatonic scale positions: codes 1–16 climb from the G below
//! middle C to the A two octaves above it, and 17 is a rest. Differences
//! between codes are diatonic step counts, which is the unit every
//! counterpoint rule works in.

use crate::error::{CounterpointError, Result};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

/// A note code in `[MIN_NOTE, MAX_NOTE]`.
pub type Note = u8;

/// Lowest note code.
pub const MIN_NOTE: Note = 1;

/// Highest note code (the rest).
pub const MAX_NOTE: Note = 17;

/// Note code used for a rest.
pub const REST: Note = 17;

/// Shortest melody the fitness rules can be evaluated on.
pub const MIN_LENGTH: usize = 3;

const PITCH_NAMES: [&str; 17] = [
    "g", "a", "b", "c'", "d'", "e'", "f'", "g'", "a'", "b'", "c''", "d''", "e''", "f''", "g''",
    "a''", "r",
];

/// Returns the LilyPond-style pitch name for a note code.
///
/// ```
/// use u_counterpoint::cantus::pitch_name;
///
/// assert_eq!(pitch_name(4), Some("c'"));
/// assert_eq!(pitch_name(17), Some("r"));
/// assert_eq!(pitch_name(0), None);
/// ```
pub fn pitch_name(note: Note) -> Option<&'static str> {
    if !(MIN_NOTE..=MAX_NOTE).contains(&note) {
        return None;
    }
    PITCH_NAMES.get(usize::from(note - MIN_NOTE)).copied()
}

/// The fixed melody a contrapunctus is composed against.
///
/// Validated on construction and immutable afterwards. Clones share the
/// underlying notes, so every chromosome in a run can hold one cheaply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CantusFirmus {
    notes: Arc<[Note]>,
}

impl CantusFirmus {
    /// Validates and wraps a melody.
    ///
    /// # Errors
    /// [`CounterpointError::InvalidInput`] if the melody has fewer than
    /// [`MIN_LENGTH`] notes or any code lies outside `[1, 17]`.
    pub fn new(notes: &[Note]) -> Result<Self> {
        if notes.len() < MIN_LENGTH {
            return Err(CounterpointError::InvalidInput(format!(
                "cantus firmus needs at least {MIN_LENGTH} notes, got {}",
                notes.len()
            )));
        }
        if let Some((i, n)) = notes
            .iter()
            .enumerate()
            .find(|(_, n)| !(MIN_NOTE..=MAX_NOTE).contains(*n))
        {
            return Err(CounterpointError::InvalidInput(format!(
                "note {n} at index {i} is outside [{MIN_NOTE}, {MAX_NOTE}]"
            )));
        }
        Ok(Self {
            notes: Arc::from(notes),
        })
    }

    /// Number of notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false: construction rejects short melodies.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Borrowed view of the notes.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Owned copy of the notes.
    pub fn to_vec(&self) -> Vec<Note> {
        self.notes.to_vec()
    }
}

impl Deref for CantusFirmus {
    type Target = [Note];

    fn deref(&self) -> &[Note] {
        &self.notes
    }
}

impl TryFrom<Vec<Note>> for CantusFirmus {
    type Error = CounterpointError;

    fn try_from(notes: Vec<Note>) -> Result<Self> {
        Self::new(&notes)
    }
}

/// Church-mode cantus firmi shipped as ready-made inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    #[default]
    Dorian,
    Phrygian,
    Lydian,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Dorian, Mode::Phrygian, Mode::Lydian];

    /// Raw note codes of the preset melody.
    pub fn notes(self) -> &'static [Note] {
        match self {
            Mode::Dorian => &[5, 7, 6, 5, 8, 7, 9, 8, 7, 6, 5],
            Mode::Phrygian => &[6, 4, 5, 4, 2, 9, 8, 6, 7, 6],
            Mode::Lydian => &[7, 8, 9, 7, 5, 6, 7, 11, 9, 7, 8, 7],
        }
    }

    /// The preset as a validated [`CantusFirmus`].
    pub fn cantus_firmus(self) -> CantusFirmus {
        CantusFirmus {
            notes: Arc::from(self.notes()),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
        };
        f.write_str(name)
    }
}

impl FromStr for Mode {
    type Err = CounterpointError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dorian" => Ok(Mode::Dorian),
            "phrygian" => Ok(Mode::Phrygian),
            "lydian" => Ok(Mode::Lydian),
            other => Err(CounterpointError::InvalidInput(format!(
                "unknown mode '{other}'"
            ))),
        }
    }
}

//! First-species counterpoint fitness evaluation.
//!
//! Scores a contrapunctus against a cantus firmus with a fixed set of
//! voice-leading heuristics: how the line opens and closes, how it approaches
//! the final note, and how often it falls into parallel perfect intervals,
//! repeated notes, parallel thirds/sixths, similar motion, or wide leaps.
//!
//! All intervals are differences between note codes, i.e. diatonic steps.
//! Higher scores are better. The five rewards bound the score from above
//! (see [`FitnessWeights::max_reward`]); penalties are unbounded below.
//!
//! # References
//!
//! - Fux (1725), *Gradus ad Parnassum*
//! - Jeppesen (1939), *Counterpoint: The Polyphonic Vocal Style of the
//!   Sixteenth Century*

use crate::cantus::{Note, MIN_LENGTH};
use crate::error::{CounterpointError, Result};

const THIRD: i32 = 2;
const FIFTH: i32 = 4;
const OCTAVE: i32 = 7;

/// Melodic steps up to this size are not counted as leaps.
const LEAP_ALLOWANCE: i32 = 2;

/// Rewards and penalties applied by [`score`].
///
/// Every penalty is stored as a positive magnitude and subtracted.
///
/// ```
/// use u_counterpoint::fitness::FitnessWeights;
///
/// let weights = FitnessWeights::default();
/// assert_eq!(weights.max_reward(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessWeights {
    /// Opening on a fifth or an octave.
    pub reward_first: f64,
    pub punish_first: f64,

    /// Closing on an octave.
    pub reward_last: f64,
    pub punish_last: f64,

    /// Stepwise approach to the final note.
    pub reward_last_step: f64,
    pub punish_last_step: f64,

    /// Contrary motion into the final note.
    pub reward_last_motion: f64,
    pub punish_last_motion: f64,

    /// Penultimate note repeating its predecessor.
    pub punish_repeated_penultimate: f64,

    /// Approach to the penultimate note no wider than a step.
    pub reward_penultimate_preparation: f64,
    pub punish_penultimate_preparation: f64,

    /// Applied once per consecutive pair of perfect intervals.
    pub punish_parallel_fifths_octaves: f64,

    pub punish_repeats: f64,
    pub punish_thirds: f64,
    pub punish_sixths: f64,
    pub punish_parallel: f64,
    pub punish_leaps: f64,

    /// Fraction of the melody length that the repeat, thirds, sixths and
    /// similar-motion tallies may reach before being penalized.
    pub repeat_threshold_ratio: f64,

    /// Fraction of the melody length that accumulated leap excess may reach
    /// before being penalized.
    pub leap_threshold_ratio: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            reward_first: 1.0,
            punish_first: 0.1,
            reward_last: 1.0,
            punish_last: 0.1,
            reward_last_step: 1.0,
            punish_last_step: 0.7,
            reward_last_motion: 1.0,
            punish_last_motion: 0.1,
            punish_repeated_penultimate: 0.1,
            reward_penultimate_preparation: 1.0,
            punish_penultimate_preparation: 0.7,
            punish_parallel_fifths_octaves: 0.5,
            punish_repeats: 0.1,
            punish_thirds: 0.1,
            punish_sixths: 0.1,
            punish_parallel: 0.1,
            punish_leaps: 0.1,
            repeat_threshold_ratio: 0.5,
            leap_threshold_ratio: 0.3,
        }
    }
}

impl FitnessWeights {
    /// Sum of the five rewards: the best score any melody can reach.
    pub fn max_reward(&self) -> f64 {
        self.reward_first
            + self.reward_last
            + self.reward_last_step
            + self.reward_last_motion
            + self.reward_penultimate_preparation
    }

    /// Rejects weights that are NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.reward_first,
            self.punish_first,
            self.reward_last,
            self.punish_last,
            self.reward_last_step,
            self.punish_last_step,
            self.reward_last_motion,
            self.punish_last_motion,
            self.punish_repeated_penultimate,
            self.reward_penultimate_preparation,
            self.punish_penultimate_preparation,
            self.punish_parallel_fifths_octaves,
            self.punish_repeats,
            self.punish_thirds,
            self.punish_sixths,
            self.punish_parallel,
            self.punish_leaps,
            self.repeat_threshold_ratio,
            self.leap_threshold_ratio,
        ];
        if values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(CounterpointError::InvalidInput(
                "fitness weights must be finite".into(),
            ))
        }
    }
}

/// Scores `candidate` against `cantus_firmus`.
///
/// Deterministic: equal inputs always produce equal scores.
///
/// # Errors
/// [`CounterpointError::InvalidInput`] if either melody is shorter than
/// three notes or their lengths differ.
///
/// ```
/// use u_counterpoint::fitness::{score, FitnessWeights};
///
/// let weights = FitnessWeights::default();
/// let s = score(&[12, 11, 12], &[5, 6, 5], &weights).unwrap();
/// assert!((s - 4.5).abs() < 1e-9);
/// ```
pub fn score(candidate: &[Note], cantus_firmus: &[Note], weights: &FitnessWeights) -> Result<f64> {
    if cantus_firmus.len() < MIN_LENGTH {
        return Err(CounterpointError::InvalidInput(format!(
            "cantus firmus needs at least {MIN_LENGTH} notes, got {}",
            cantus_firmus.len()
        )));
    }
    if candidate.len() != cantus_firmus.len() {
        return Err(CounterpointError::InvalidInput(format!(
            "candidate has {} notes but cantus firmus has {}",
            candidate.len(),
            cantus_firmus.len()
        )));
    }
    Ok(score_unchecked(candidate, cantus_firmus, weights))
}

/// Returns true if both voices move in the same direction between two
/// `(contrapunctus, cantus firmus)` note pairs.
pub fn is_parallel(last: (i32, i32), current: (i32, i32)) -> bool {
    let upper = last.0 - current.0;
    let lower = last.1 - current.1;
    (upper < 0 && lower < 0) || (upper > 0 && lower > 0)
}

fn is_perfect(interval: i32) -> bool {
    interval == FIFTH || interval == OCTAVE
}

/// [`score`] without the length checks.
///
/// Callers must guarantee equal lengths of at least [`MIN_LENGTH`].
pub(crate) fn score_unchecked(
    candidate: &[Note],
    cantus_firmus: &[Note],
    weights: &FitnessWeights,
) -> f64 {
    let cp: Vec<i32> = candidate.iter().map(|&n| i32::from(n)).collect();
    let cf: Vec<i32> = cantus_firmus.iter().map(|&n| i32::from(n)).collect();
    let len = cp.len();
    let last = len - 1;

    let mut fitness = 0.0;

    // Opening on a fifth or octave.
    let first_interval = cp[0] - cf[0];
    if is_perfect(first_interval) {
        fitness += weights.reward_first;
    } else {
        fitness -= weights.punish_first;
    }

    // Closing on an octave.
    if cp[last] - cf[last] == OCTAVE {
        fitness += weights.reward_last;
    } else {
        fitness -= weights.punish_last;
    }

    // Stepwise onto the final note.
    let cp_motion = cp[last] - cp[last - 1];
    if cp_motion.abs() == 1 {
        fitness += weights.reward_last_step;
    } else {
        fitness -= weights.punish_last_step;
    }

    // Contrary motion onto the final note.
    let cf_motion = cf[last] - cf[last - 1];
    if (cf_motion < 0 && cp_motion > 0) || (cf_motion > 0 && cp_motion < 0) {
        fitness += weights.reward_last_motion;
    } else {
        fitness -= weights.punish_last_motion;
    }

    let preparation = (cp[last - 1] - cp[last - 2]).abs();
    if preparation == 0 {
        fitness -= weights.punish_repeated_penultimate;
    } else if preparation < LEAP_ALLOWANCE {
        fitness += weights.reward_penultimate_preparation;
    } else {
        fitness -= weights.punish_penultimate_preparation;
    }

    // Body scan. The "previous" state is seeded from the final pair, so the
    // opening note is compared against the close.
    let final_note = cp[last];
    let mut last_notes = (cp[last], cf[last]);
    let mut last_interval = last_notes.0 - last_notes.1;

    let mut repeats = 0u32;
    let mut thirds = 0u32;
    let mut sixths = 0u32;
    let mut parallel_motion = 0u32;
    let mut leaps = 0i32;

    for i in 0..last {
        let current_notes = (cp[i], cf[i]);
        let current_interval = current_notes.0 - current_notes.1;

        if is_perfect(current_interval) && is_perfect(last_interval) {
            fitness -= weights.punish_parallel_fifths_octaves;
        }

        if current_notes.0 == final_note {
            repeats += 1;
        }

        if current_interval == THIRD && last_interval == THIRD {
            thirds += 1;
        }

        // The sixths tally is keyed on the fifth-sized step.
        if current_interval == FIFTH && last_interval == FIFTH {
            sixths += 1;
        }

        if is_parallel(last_notes, current_notes) {
            parallel_motion += 1;
        }

        let leap = (current_notes.0 - last_notes.0).abs();
        if leap > LEAP_ALLOWANCE {
            leaps += leap - LEAP_ALLOWANCE;
        }

        last_notes = current_notes;
        last_interval = current_interval;
    }

    let repeat_threshold = len as f64 * weights.repeat_threshold_ratio;
    let leap_threshold = len as f64 * weights.leap_threshold_ratio;

    if f64::from(repeats) > repeat_threshold {
        fitness -= weights.punish_repeats;
    }
    if f64::from(thirds) > repeat_threshold {
        fitness -= weights.punish_thirds;
    }
    if f64::from(sixths) > repeat_threshold {
        fitness -= weights.punish_sixths;
    }
    if f64::from(parallel_motion) > repeat_threshold {
        fitness -= weights.punish_parallel;
    }
    if f64::from(leaps) > leap_threshold {
        fitness -= weights.punish_leaps;
    }

    fitness
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_score(cp: &[Note], cf: &[Note]) -> f64 {
        score(cp, cf, &FitnessWeights::default()).unwrap()
    }

    #[test]
    fn test_all_rewards_with_wrapped_opening() {
        // Opening and closing are both perfect, so the wrapped body scan
        // always charges one parallel-perfect penalty at index 0.
        let s = default_score(&[12, 11, 12], &[5, 6, 5]);
        assert!((s - 4.5).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_mixed_rewards_and_penalties() {
        // +1 open, +1 close, +1 step, -0.1 similar motion, -0.7 wide
        // preparation, -0.5 twice for parallel perfects, -0.1 leaps.
        let s = default_score(&[9, 13, 12], &[5, 6, 5]);
        assert!((s - 1.1).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_repeated_notes_everywhere() {
        let s = default_score(&[1, 1, 1, 1], &[1, 1, 1, 1]);
        assert!((s - -1.2).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_custom_weights_flow_through() {
        let weights = FitnessWeights {
            punish_first: 0.0,
            punish_last: 0.0,
            punish_last_step: 0.0,
            punish_last_motion: 0.0,
            punish_repeated_penultimate: 0.0,
            punish_repeats: 0.0,
            ..FitnessWeights::default()
        };
        let s = score(&[1, 1, 1, 1], &[1, 1, 1, 1], &weights).unwrap();
        assert_eq!(s, 0.0);

        let doubled = FitnessWeights {
            reward_first: 2.0,
            ..FitnessWeights::default()
        };
        let s = score(&[12, 11, 12], &[5, 6, 5], &doubled).unwrap();
        assert!((s - 5.5).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_minimal_length_uses_index_zero_for_preparation() {
        // Preparation reads index last-2 == 0 without going out of bounds.
        let s = default_score(&[3, 3, 4], &[1, 1, 1]);
        assert!(s.is_finite());
    }

    #[test]
    fn test_length_mismatch_is_invalid_input() {
        let err = score(&[1, 2, 3], &[1, 2, 3, 4], &FitnessWeights::default()).unwrap_err();
        assert!(matches!(err, CounterpointError::InvalidInput(_)));
    }

    #[test]
    fn test_short_melody_is_invalid_input() {
        let err = score(&[1, 2], &[1, 2], &FitnessWeights::default()).unwrap_err();
        assert!(matches!(err, CounterpointError::InvalidInput(_)));
    }

    #[test]
    fn test_deterministic() {
        let cf = [5, 7, 6, 5, 8, 7, 9, 8, 7, 6, 5];
        let cp = [9, 12, 10, 12, 10, 11, 13, 12, 11, 13, 12];
        assert_eq!(default_score(&cp, &cf), default_score(&cp, &cf));
    }

    #[test]
    fn test_is_parallel() {
        assert!(is_parallel((1, 1), (2, 3)));
        assert!(is_parallel((5, 5), (4, 2)));
        assert!(!is_parallel((1, 5), (2, 4)));
        assert!(!is_parallel((1, 1), (1, 2)));
        assert!(!is_parallel((3, 3), (3, 3)));
    }

    #[test]
    fn test_max_reward_and_validate() {
        let weights = FitnessWeights::default();
        assert_eq!(weights.max_reward(), 5.0);
        assert!(weights.validate().is_ok());

        let broken = FitnessWeights {
            punish_leaps: f64::NAN,
            ..weights
        };
        assert!(broken.validate().is_err());
    }
}

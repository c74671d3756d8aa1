//! Scoring collaborators
//!
//! A [`Scorer`] maps a string to its six [`SchemeScores`]. The crate treats
//! it as an opaque pure function; [`LetterScorer`] is the default.

pub mod letters;

pub use letters::LetterScorer;

use crate::errors::Result;
use crate::types::SchemeScores;

/// Computes the six scheme scores of a string.
///
/// Implementations must be pure: the same input always yields the same
/// scores or the same error.
pub trait Scorer: Send + Sync {
    fn score(&self, input: &str) -> Result<SchemeScores>;
}

impl<F> Scorer for F
where
    F: Fn(&str) -> Result<SchemeScores> + Send + Sync,
{
    fn score(&self, input: &str) -> Result<SchemeScores> {
        self(input)
    }
}

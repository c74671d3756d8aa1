//! Letter-value scoring over the six schemes
//!
//! Every ASCII letter carries a value per scheme; a string scores the sum of
//! its letters' values. Case is ignored. Digits, whitespace, punctuation and
//! non-ASCII characters contribute nothing.

use super::Scorer;
use crate::errors::{NgramError, Result};
use crate::types::SchemeScores;

/// Traditional values for a..z.
const JEWISH: [u64; 26] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 600, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 200, 700, 900, 300,
    400, 500,
];

/// The default [`Scorer`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterScorer;

impl LetterScorer {
    pub fn new() -> Self {
        Self
    }

    /// Per-scheme values of one letter, or `None` for anything else.
    fn letter_values(c: char) -> Option<SchemeScores> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let idx = (c.to_ascii_lowercase() as u8 - b'a') as usize;
        let ordinal = idx as u64 + 1;
        Some(SchemeScores {
            english: ordinal * 6,
            jewish: JEWISH[idx],
            simple: ordinal,
            mystery: 27 - ordinal,
            majestic: ordinal * 3,
            eights: ordinal * 8,
        })
    }
}

impl Scorer for LetterScorer {
    fn score(&self, input: &str) -> Result<SchemeScores> {
        let input = input.trim();
        if !input.chars().any(char::is_alphanumeric) {
            return Err(NgramError::scoring(input, "no letters or digits to score"));
        }

        let mut total = SchemeScores::default();
        for values in input.chars().filter_map(Self::letter_values) {
            total.english += values.english;
            total.jewish += values.jewish;
            total.simple += values.simple;
            total.mystery += values.mystery;
            total.majestic += values.majestic;
            total.eights += values.eights;
        }
        Ok(total)
    }
}

//! Abbreviation-tolerant sentence splitting
//!
//! Sentence bounds come from UAX #29. Two kinds of bound are not real
//! sentence ends and are carried over into the next segment:
//!
//! - a bound directly after a known abbreviation ("Dr.", "e.g.")
//! - a single line break inside hard-wrapped prose (UAX #29 breaks after
//!   every line break; a blank line still ends the sentence)

use super::SentenceSplitter;
use crate::errors::Result;
use rustc_hash::FxHashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Abbreviations recognized by [`UnicodeSentenceSplitter::new`].
///
/// Entries that often end a sentence ("St." for street, "Co." for company)
/// are left out, since a match suppresses a real boundary. Add them with
/// [`UnicodeSentenceSplitter::with_abbreviation`] where they mostly precede
/// a name.
pub const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "mt", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "corp", "dept", "approx", "fig", "gen", "gov", "sgt", "capt", "lt", "col", "rev", "u.s", "a.m",
    "p.m",
];

const TERMINATORS: &[char] = &['.', '!', '?', '\u{3002}', '\u{FF01}', '\u{FF1F}'];
const CLOSING: &[char] = &['"', '\'', ')', ']', '\u{2019}', '\u{201D}'];

/// A UAX #29 sentence splitter that does not break after abbreviations
#[derive(Debug, Clone)]
pub struct UnicodeSentenceSplitter {
    /// Lowercased abbreviations without their final period
    abbreviations: FxHashSet<String>,
}

impl Default for UnicodeSentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl UnicodeSentenceSplitter {
    /// Create a splitter with [`DEFAULT_ABBREVIATIONS`]
    pub fn new() -> Self {
        Self::with_abbreviations(DEFAULT_ABBREVIATIONS.iter().copied())
    }

    /// Create a splitter that only knows the given abbreviations.
    ///
    /// Entries are matched case-insensitively; a trailing period is optional.
    pub fn with_abbreviations<I, S>(abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let abbreviations = abbreviations
            .into_iter()
            .map(|a| a.as_ref().trim().trim_end_matches('.').to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        Self { abbreviations }
    }

    /// Add one abbreviation
    pub fn with_abbreviation(mut self, abbreviation: &str) -> Self {
        let abbreviation = abbreviation.trim().trim_end_matches('.').to_lowercase();
        if !abbreviation.is_empty() {
            self.abbreviations.insert(abbreviation);
        }
        self
    }

    /// Whether `segment` stops on a known abbreviation such as "Dr."
    fn ends_with_abbreviation(&self, segment: &str) -> bool {
        let Some(stem) = segment.strip_suffix('.') else {
            return false;
        };
        let last_word = stem
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or(stem)
            .trim_start_matches(|c: char| !c.is_alphanumeric());
        !last_word.is_empty() && self.abbreviations.contains(&last_word.to_lowercase())
    }

    /// Whether `segment` only ends because a wrapped line broke mid-sentence
    fn ends_with_soft_wrap(segment: &str) -> bool {
        let Some(line) = segment
            .strip_suffix("\r\n")
            .or_else(|| segment.strip_suffix('\n'))
            .or_else(|| segment.strip_suffix('\r'))
        else {
            return false;
        };
        let line = line.trim_end_matches([' ', '\t']);
        if line.is_empty() || line.ends_with(['\n', '\r']) {
            return false;
        }
        !line.trim_end_matches(CLOSING).ends_with(TERMINATORS)
    }

    fn push_sentence(sentences: &mut Vec<String>, segment: &str) {
        let trimmed = segment.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }
    }
}

impl SentenceSplitter for UnicodeSentenceSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        let mut sentences = Vec::new();
        let mut pending = String::new();

        for segment in text.split_sentence_bounds() {
            pending.push_str(segment);
            if Self::ends_with_soft_wrap(&pending)
                || self.ends_with_abbreviation(pending.trim_end())
            {
                continue;
            }
            Self::push_sentence(&mut sentences, &pending);
            pending.clear();
        }
        Self::push_sentence(&mut sentences, &pending);

        // If no sentences found, treat entire text as one sentence
        if sentences.is_empty() {
            sentences.push(text.trim().to_string());
        }

        Ok(sentences)
    }
}

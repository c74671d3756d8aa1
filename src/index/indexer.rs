//! Concurrent n-gram extraction
//!
//! Each sentence is handled by its own Rayon task with a private count map.
//! Once every task has finished, the partial maps are summed into a single
//! [`FrequencyIndex`] on the calling thread. Summation is commutative, so the
//! result does not depend on how the tasks were scheduled.

use crate::errors::{NgramError, Pass, Result};
use crate::nlp::Sanitizer;
use crate::types::{FrequencyIndex, MAX_WINDOW};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// What one sentence task produced.
#[derive(Debug, Default)]
pub struct SentenceTally {
    counts: FxHashMap<String, u64>,
    kept: usize,
    dropped: usize,
    failures: Vec<NgramError>,
}

impl SentenceTally {
    /// Cleaned n-gram → occurrences within the sentence
    pub fn counts(&self) -> &FxHashMap<String, u64> {
        &self.counts
    }

    /// Number of windows that cleaned to a non-empty n-gram
    pub fn kept(&self) -> usize {
        self.kept
    }

    /// Number of windows that cleaned to nothing
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Windows the sanitizer rejected
    pub fn failures(&self) -> &[NgramError] {
        &self.failures
    }
}

/// Splits sentences into word windows and counts them
pub struct NGramIndexer<'a> {
    sanitizer: &'a dyn Sanitizer,
    max_window: usize,
}

impl<'a> NGramIndexer<'a> {
    /// Create an indexer producing windows of 1..=[`MAX_WINDOW`] words
    pub fn new(sanitizer: &'a dyn Sanitizer) -> Self {
        Self {
            sanitizer,
            max_window: MAX_WINDOW,
        }
    }

    /// Limit windows to `max_window` words (clamped to 1..=[`MAX_WINDOW`])
    pub fn with_max_window(mut self, max_window: usize) -> Self {
        self.max_window = max_window.clamp(1, MAX_WINDOW);
        self
    }

    /// Every contiguous window of 1..=`max_window` words, joined by one space.
    ///
    /// Windows starting at word `i` come before those starting at `i + 1`;
    /// within a start position shorter windows come first.
    pub fn windows<'w>(
        words: &'w [&'w str],
        max_window: usize,
    ) -> impl Iterator<Item = String> + 'w {
        (0..words.len()).flat_map(move |i| {
            (i + 1..=usize::min(i + max_window, words.len())).map(move |j| words[i..j].join(" "))
        })
    }

    /// Canonical form of one window: sanitized, lowercased, trimmed.
    pub fn normalize(&self, window: &str) -> Result<String> {
        let cleaned = self.sanitizer.sanitize(window)?;
        Ok(cleaned.to_lowercase().trim().to_string())
    }

    /// Count every window of a single sentence into a private map.
    pub fn index_sentence(&self, sentence: &str) -> SentenceTally {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        let mut tally = SentenceTally::default();

        for window in Self::windows(&words, self.max_window) {
            match self.normalize(&window) {
                Ok(ngram) if ngram.is_empty() => tally.dropped += 1,
                Ok(ngram) => {
                    tally.kept += 1;
                    *tally.counts.entry(ngram).or_insert(0) += 1;
                }
                Err(err) => tally.failures.push(err),
            }
        }

        tally
    }

    /// Index all sentences in parallel and merge the results.
    ///
    /// Runs on whatever Rayon pool is current. Every task runs to
    /// completion; if any window failed to clean, the merged map is thrown
    /// away and all failures are returned together.
    pub fn index(&self, sentences: &[String]) -> Result<FrequencyIndex> {
        debug!(
            sentences = sentences.len(),
            max_window = self.max_window,
            "Extracting n-grams"
        );

        let tallies: Vec<SentenceTally> = sentences
            .par_iter()
            .map(|sentence| self.index_sentence(sentence))
            .collect();

        let mut frequencies = FrequencyIndex::new();
        let mut failures = Vec::new();
        let mut kept = 0usize;
        let mut dropped = 0usize;
        for tally in tallies {
            kept += tally.kept;
            dropped += tally.dropped;
            if !tally.failures.is_empty() {
                failures.extend(tally.failures);
                continue;
            }
            if failures.is_empty() {
                frequencies.merge(tally.counts);
            }
        }

        if !failures.is_empty() {
            warn!(failures = failures.len(), "Extraction pass failed");
            return Err(NgramError::pass_failed(Pass::Extraction, failures));
        }

        debug!(
            windows = kept,
            dropped,
            distinct = frequencies.len(),
            "Merged sentence tallies"
        );
        Ok(frequencies)
    }
}

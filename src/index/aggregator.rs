//! Score aggregation over a frozen frequency index
//!
//! Every distinct n-gram is scored once. Results are gathered into a fresh
//! [`ScoreCache`] and six fresh inverse indices; nothing is returned unless
//! every n-gram scored successfully.

use crate::errors::{NgramError, Pass, Result};
use crate::scoring::Scorer;
use crate::types::{FrequencyIndex, InverseIndices, SchemeScores, ScoreCache, ScoredIndex};
use rayon::prelude::*;
use tracing::{debug, warn};

/// The per-n-gram half of a scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    cache: ScoreCache,
    inverse: InverseIndices,
}

impl Aggregation {
    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }

    pub fn inverse(&self) -> &InverseIndices {
        &self.inverse
    }

    /// Attach the whole-document scores.
    pub fn with_document(self, document: SchemeScores) -> ScoredIndex {
        ScoredIndex {
            cache: self.cache,
            inverse: self.inverse,
            document,
        }
    }
}

/// Scores every key of a [`FrequencyIndex`]
pub struct ScoreAggregator<'a> {
    scorer: &'a dyn Scorer,
    parallel: bool,
}

impl<'a> ScoreAggregator<'a> {
    pub fn new(scorer: &'a dyn Scorer) -> Self {
        Self {
            scorer,
            parallel: false,
        }
    }

    /// Score keys on the current Rayon pool instead of serially
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn score_one(&self, ngram: &str) -> (String, Result<SchemeScores>) {
        let key = ngram.trim().to_string();
        let scores = self.scorer.score(&key);
        (key, scores)
    }

    /// Score every n-gram in `frequencies`.
    ///
    /// Failures are collected rather than short-circuiting, sorted by input,
    /// and returned together as one [`NgramError::PassFailed`].
    pub fn aggregate(&self, frequencies: &FrequencyIndex) -> Result<Aggregation> {
        debug!(
            ngrams = frequencies.len(),
            parallel = self.parallel,
            "Scoring n-grams"
        );

        let scored: Vec<(String, Result<SchemeScores>)> = if self.parallel {
            let keys: Vec<&str> = frequencies.keys().collect();
            keys.par_iter().map(|k| self.score_one(k)).collect()
        } else {
            frequencies.keys().map(|k| self.score_one(k)).collect()
        };

        let mut aggregation = Aggregation {
            cache: ScoreCache::with_capacity(scored.len()),
            inverse: InverseIndices::new(),
        };
        let mut failures = Vec::new();

        for (ngram, result) in scored {
            match result {
                Ok(scores) => {
                    aggregation.inverse.record(&ngram, &scores);
                    aggregation.cache.insert(ngram, scores);
                }
                Err(err) => failures.push((ngram, err)),
            }
        }

        if !failures.is_empty() {
            failures.sort_by(|a, b| a.0.cmp(&b.0));
            warn!(failures = failures.len(), "Scoring pass failed");
            return Err(NgramError::pass_failed(
                Pass::Scoring,
                failures.into_iter().map(|(_, err)| err).collect(),
            ));
        }

        // Map iteration order is arbitrary; buckets must not depend on it.
        aggregation.inverse.finalize();
        Ok(aggregation)
    }
}

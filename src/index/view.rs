//! Deterministic views over the built indices

use crate::types::{FrequencyIndex, InverseScoreIndex, NgramCount, ScoreCache, Scheme};
use std::fmt::Write;

/// All `(n-gram, count)` pairs, count descending, ties by n-gram ascending.
pub fn sorted_substrings(frequencies: &FrequencyIndex) -> Vec<NgramCount> {
    let mut sorted: Vec<NgramCount> = frequencies
        .iter()
        .map(|(ngram, count)| NgramCount::new(ngram, count))
        .collect();
    sorted.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.ngram.cmp(&b.ngram)));
    sorted
}

/// One line per n-gram in [`sorted_substrings`] order.
///
/// Lines read `"ngram": count`; when a score cache is supplied each line also
/// carries the six scheme scores. An empty index renders as an empty string.
pub fn render(frequencies: &FrequencyIndex, scores: Option<&ScoreCache>) -> String {
    let mut output = String::new();
    for entry in sorted_substrings(frequencies) {
        let _ = write!(output, "\"{}\": {}", entry.ngram, entry.count);
        if let Some(cache) = scores {
            let ngram_scores = cache.get(&entry.ngram).copied().unwrap_or_default();
            for scheme in Scheme::ALL {
                let _ = write!(output, " [{} {}]", scheme, ngram_scores.get(scheme));
            }
        }
        output.push('\n');
    }
    output
}

/// One line per score, ascending: `score: ngram, ngram, ...`.
pub fn render_inverse(index: &InverseScoreIndex) -> String {
    let mut output = String::new();
    for (score, ngrams) in index.iter() {
        let _ = writeln!(output, "{}: {}", score, ngrams.join(", "));
    }
    output
}

//! Core types for rapid_ngram
//!
//! This module defines the index structures built over a document (frequency
//! map, score cache, inverse score indices), the six scoring schemes, and the
//! indexing configuration.

use crate::errors::{NgramError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Longest n-gram window the indexer will produce.
pub const MAX_WINDOW: usize = 3;

// ============================================================================
// Schemes
// ============================================================================

/// One of the six independent letter-value scoring rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    English,
    Jewish,
    Simple,
    Mystery,
    Majestic,
    Eights,
}

impl Scheme {
    /// All schemes, in report order.
    pub const ALL: [Scheme; 6] = [
        Scheme::English,
        Scheme::Jewish,
        Scheme::Simple,
        Scheme::Mystery,
        Scheme::Majestic,
        Scheme::Eights,
    ];

    /// Position of this scheme in [`Scheme::ALL`].
    pub fn index(self) -> usize {
        match self {
            Scheme::English => 0,
            Scheme::Jewish => 1,
            Scheme::Simple => 2,
            Scheme::Mystery => 3,
            Scheme::Majestic => 4,
            Scheme::Eights => 5,
        }
    }

    /// Display name used in rendered reports.
    pub fn name(self) -> &'static str {
        match self {
            Scheme::English => "English",
            Scheme::Jewish => "Jewish",
            Scheme::Simple => "Simple",
            Scheme::Mystery => "Mystery",
            Scheme::Majestic => "Majestic",
            Scheme::Eights => "Eights",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The six scheme scores of one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemeScores {
    pub english: u64,
    pub jewish: u64,
    pub simple: u64,
    pub mystery: u64,
    pub majestic: u64,
    pub eights: u64,
}

impl SchemeScores {
    /// Score under a single scheme.
    pub fn get(&self, scheme: Scheme) -> u64 {
        match scheme {
            Scheme::English => self.english,
            Scheme::Jewish => self.jewish,
            Scheme::Simple => self.simple,
            Scheme::Mystery => self.mystery,
            Scheme::Majestic => self.majestic,
            Scheme::Eights => self.eights,
        }
    }

    /// Mutable access to a single scheme's score.
    pub fn get_mut(&mut self, scheme: Scheme) -> &mut u64 {
        match scheme {
            Scheme::English => &mut self.english,
            Scheme::Jewish => &mut self.jewish,
            Scheme::Simple => &mut self.simple,
            Scheme::Mystery => &mut self.mystery,
            Scheme::Majestic => &mut self.majestic,
            Scheme::Eights => &mut self.eights,
        }
    }

    /// `(scheme, score)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Scheme, u64)> + '_ {
        Scheme::ALL.iter().map(move |&s| (s, self.get(s)))
    }
}

// ============================================================================
// Frequency Index
// ============================================================================

/// A canonical n-gram and the number of times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramCount {
    #[serde(rename = "s")]
    pub ngram: String,
    #[serde(rename = "q")]
    pub count: u64,
}

impl NgramCount {
    pub fn new(ngram: impl Into<String>, count: u64) -> Self {
        Self {
            ngram: ngram.into(),
            count,
        }
    }
}

/// Canonical n-gram text → occurrence count.
///
/// Keys are lowercased, sanitized and trimmed; an empty key is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyIndex {
    counts: FxHashMap<String, u64>,
}

impl FrequencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `by` occurrences of `ngram`. Empty keys are ignored.
    pub fn add(&mut self, ngram: &str, by: u64) {
        if ngram.is_empty() || by == 0 {
            return;
        }
        if let Some(count) = self.counts.get_mut(ngram) {
            *count += by;
        } else {
            self.counts.insert(ngram.to_string(), by);
        }
    }

    /// Sum another map into this one.
    pub fn merge(&mut self, other: FxHashMap<String, u64>) {
        if self.counts.is_empty() {
            self.counts = other;
            self.counts.retain(|k, v| !k.is_empty() && *v > 0);
            return;
        }
        for (ngram, count) in other {
            if ngram.is_empty() || count == 0 {
                continue;
            }
            *self.counts.entry(ngram).or_insert(0) += count;
        }
    }

    pub fn get(&self, ngram: &str) -> Option<u64> {
        self.counts.get(ngram).copied()
    }

    pub fn contains(&self, ngram: &str) -> bool {
        self.counts.contains_key(ngram)
    }

    /// Number of distinct n-grams.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Copy into an ordered map.
    pub fn to_sorted(&self) -> BTreeMap<String, u64> {
        self.counts.iter().map(|(k, &v)| (k.clone(), v)).collect()
    }
}

impl FromIterator<(String, u64)> for FrequencyIndex {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut index = FrequencyIndex::new();
        for (ngram, count) in iter {
            index.add(&ngram, count);
        }
        index
    }
}

// ============================================================================
// Score Cache & Inverse Indices
// ============================================================================

/// Canonical n-gram text → its six scheme scores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreCache {
    scores: FxHashMap<String, SchemeScores>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            scores: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn insert(&mut self, ngram: impl Into<String>, scores: SchemeScores) {
        self.scores.insert(ngram.into(), scores);
    }

    pub fn get(&self, ngram: &str) -> Option<&SchemeScores> {
        self.scores.get(ngram)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemeScores)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy into an ordered map.
    pub fn to_sorted(&self) -> BTreeMap<String, SchemeScores> {
        self.scores.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }
}

/// Score → n-grams sharing that score under one scheme.
///
/// Buckets are only guaranteed sorted after [`InverseScoreIndex::finalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InverseScoreIndex {
    buckets: BTreeMap<u64, Vec<String>>,
}

impl InverseScoreIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, score: u64, ngram: impl Into<String>) {
        self.buckets.entry(score).or_default().push(ngram.into());
    }

    /// Sort every bucket lexicographically.
    pub fn finalize(&mut self) {
        for bucket in self.buckets.values_mut() {
            bucket.sort_unstable();
        }
    }

    /// N-grams sharing `score`, empty if none.
    pub fn get(&self, score: u64) -> &[String] {
        self.buckets.get(&score).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct scores.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total entries across all buckets.
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Buckets in ascending score order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[String])> {
        self.buckets.iter().map(|(&s, v)| (s, v.as_slice()))
    }
}

/// The six inverse indices, one per [`Scheme`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InverseIndices {
    indices: [InverseScoreIndex; 6],
}

impl InverseIndices {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `ngram` under each of its six scores.
    pub fn record(&mut self, ngram: &str, scores: &SchemeScores) {
        for (scheme, score) in scores.iter() {
            self.indices[scheme.index()].push(score, ngram);
        }
    }

    pub fn finalize(&mut self) {
        for index in &mut self.indices {
            index.finalize();
        }
    }

    pub fn get(&self, scheme: Scheme) -> &InverseScoreIndex {
        &self.indices[scheme.index()]
    }

    pub fn get_mut(&mut self, scheme: Scheme) -> &mut InverseScoreIndex {
        &mut self.indices[scheme.index()]
    }
}

/// Everything a successful scoring pass installs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoredIndex {
    /// Per-n-gram scores.
    pub cache: ScoreCache,
    /// Score → n-grams, per scheme.
    pub inverse: InverseIndices,
    /// Scores of the whole document input.
    pub document: SchemeScores,
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Where a document is in its build lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentState {
    /// Constructed, nothing built yet.
    #[default]
    Empty,
    /// Frequency index built, no scores.
    Indexed,
    /// Frequency index and scores built.
    Scored,
}

impl fmt::Display for DocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentState::Empty => f.write_str("empty"),
            DocumentState::Indexed => f.write_str("indexed"),
            DocumentState::Scored => f.write_str("scored"),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the extraction and scoring passes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Longest word window to extract (1..=3)
    #[serde(default = "default_max_window")]
    pub max_window: usize,
    /// Maximum number of Rayon threads; `None` uses the global pool
    #[serde(default)]
    pub max_threads: Option<usize>,
    /// Disable parallelism entirely (overrides `max_threads`)
    #[serde(default)]
    pub single_thread: bool,
    /// Fan the scoring pass out across the pool as well
    #[serde(default)]
    pub parallel_scoring: bool,
}

fn default_max_window() -> usize {
    MAX_WINDOW
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_window: MAX_WINDOW,
            max_threads: None,
            single_thread: false,
            parallel_scoring: false,
        }
    }
}

impl IndexConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WINDOW).contains(&self.max_window) {
            return Err(NgramError::invalid_config(format!(
                "max_window must be between 1 and {}, got {}",
                MAX_WINDOW, self.max_window
            )));
        }

        if self.max_threads == Some(0) {
            return Err(NgramError::invalid_config("max_threads must be > 0"));
        }

        Ok(())
    }

    /// Builder method: set the longest window
    pub fn with_max_window(mut self, max_window: usize) -> Self {
        self.max_window = max_window;
        self
    }

    /// Builder method: cap the Rayon thread count
    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = Some(max_threads);
        self
    }

    /// Builder method: run everything on one thread
    pub fn with_single_thread(mut self, single_thread: bool) -> Self {
        self.single_thread = single_thread;
        self
    }

    /// Builder method: parallelize the scoring pass
    pub fn with_parallel_scoring(mut self, parallel: bool) -> Self {
        self.parallel_scoring = parallel;
        self
    }

    /// Resolve the effective thread count.
    ///
    /// - `single_thread == true` → `Some(1)`
    /// - `max_threads == Some(n)` → `Some(n)`
    /// - otherwise → `None` (use Rayon default)
    pub fn effective_threads(&self) -> Option<usize> {
        if self.single_thread {
            Some(1)
        } else {
            self.max_threads
        }
    }

    /// Build a scoped Rayon thread pool matching this config.
    ///
    /// Returns `Ok(None)` when no thread limit is set (use global pool).
    pub fn build_thread_pool(&self) -> Result<Option<rayon::ThreadPool>> {
        match self.effective_threads() {
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map(Some)
                .map_err(|e| {
                    NgramError::invalid_config(format!("failed to build thread pool: {}", e))
                }),
            None => Ok(None),
        }
    }

    /// Execute `f` within a scoped Rayon thread pool matching this config.
    ///
    /// If no thread limit is set, `f` runs directly (using the global pool).
    pub fn scoped<R: Send>(&self, f: impl FnOnce() -> R + Send) -> Result<R> {
        Ok(match self.build_thread_pool()? {
            Some(pool) => pool.install(f),
            None => f(),
        })
    }
}

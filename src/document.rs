//! The document: input text plus its frequency and score indices
//!
//! A [`Document`] moves through three states:
//!
//! ```text
//! Empty --extract--> Indexed --score--> Scored
//!                       ^  |               |
//!                       +--+ extract       | extract (drops scores)
//!                       +------------------+
//! ```
//!
//! Each build pass computes its result off to the side and installs it with
//! one swap under the write lock, or installs nothing at all. Readers clone
//! the installed `Arc`s under the read lock and work on that snapshot, so
//! they never see a half-replaced index.

use crate::errors::{NgramError, Pass, Result};
use crate::index::{view, NGramIndexer, ScoreAggregator};
use crate::pipeline::Pipeline;
use crate::record::DocumentRecord;
use crate::types::{
    DocumentState, FrequencyIndex, InverseIndices, InverseScoreIndex, NgramCount, Scheme,
    SchemeScores, ScoreCache, ScoredIndex,
};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
struct IndexState {
    frequencies: Option<Arc<FrequencyIndex>>,
    scored: Option<Arc<ScoredIndex>>,
}

impl IndexState {
    fn lifecycle(&self) -> DocumentState {
        match (&self.frequencies, &self.scored) {
            (None, _) => DocumentState::Empty,
            (Some(_), None) => DocumentState::Indexed,
            (Some(_), Some(_)) => DocumentState::Scored,
        }
    }
}

/// Joined input text with its n-gram frequency and score indices
pub struct Document {
    input: String,
    pipeline: Pipeline,
    state: RwLock<IndexState>,
    /// Serializes build passes; readers never take it
    build: Mutex<()>,
}

impl Document {
    /// Join `fragments` with single spaces, then extract and score.
    ///
    /// Fails with [`NgramError::EmptyInput`] when no fragment is given, and
    /// with [`NgramError::Pipeline`] naming the pass that failed otherwise.
    pub fn new<I, S>(pipeline: Pipeline, fragments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let document = Self::from_fragments(pipeline, fragments)?;
        document
            .extract()
            .map_err(|e| NgramError::pipeline(Pass::Extraction, e))?;
        document
            .score()
            .map_err(|e| NgramError::pipeline(Pass::Scoring, e))?;
        Ok(document)
    }

    /// Join `fragments` with single spaces without building anything.
    pub fn from_fragments<I, S>(pipeline: Pipeline, fragments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments: Vec<S> = fragments.into_iter().collect();
        if fragments.is_empty() {
            return Err(NgramError::empty_input("no input fragments supplied"));
        }
        let input = fragments
            .iter()
            .map(|f| f.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");

        Ok(Self {
            input,
            pipeline,
            state: RwLock::new(IndexState::default()),
            build: Mutex::new(()),
        })
    }

    /// Restore a document from a validated record.
    pub fn from_record(pipeline: Pipeline, record: DocumentRecord) -> Result<Self> {
        record.validate()?;

        let mut state = IndexState::default();
        if record.state != DocumentState::Empty {
            state.frequencies = Some(Arc::new(
                record.frequencies.iter().map(|(k, &v)| (k.clone(), v)).collect(),
            ));
        }
        if record.state == DocumentState::Scored {
            let mut cache = ScoreCache::with_capacity(record.scores.len());
            for (ngram, scores) in &record.scores {
                cache.insert(ngram.clone(), *scores);
            }
            let mut inverse = InverseIndices::new();
            for scheme in Scheme::ALL {
                *inverse.get_mut(scheme) = record.inverse(scheme).clone();
            }
            state.scored = Some(Arc::new(ScoredIndex {
                cache,
                inverse,
                document: record.document_scores.unwrap_or_default(),
            }));
        }

        Ok(Self {
            input: record.input,
            pipeline,
            state: RwLock::new(state),
            build: Mutex::new(()),
        })
    }

    /// Parse a JSON record and restore the document.
    pub fn from_json(pipeline: Pipeline, json: &str) -> Result<Self> {
        Self::from_record(pipeline, DocumentRecord::from_json(json)?)
    }

    /// The joined input text
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn state(&self) -> DocumentState {
        self.state.read().lifecycle()
    }

    fn snapshot(&self) -> IndexState {
        self.state.read().clone()
    }

    // ------------------------------------------------------------------
    // Build passes
    // ------------------------------------------------------------------

    /// Rebuild the frequency index from the input.
    ///
    /// On success the document is `Indexed` and any previous scores are
    /// gone. On failure nothing changes.
    pub fn extract(&self) -> Result<()> {
        let _build = self.build.lock();
        let splitter = self.pipeline.splitter()?;
        let sanitizer = self.pipeline.sanitizer()?;
        let config = self.pipeline.config();

        let sentences = splitter.split(&self.input)?;
        let indexer = NGramIndexer::new(sanitizer).with_max_window(config.max_window);
        let frequencies = config.scoped(|| indexer.index(&sentences))??;

        info!(
            sentences = sentences.len(),
            distinct = frequencies.len(),
            total = frequencies.total(),
            "Installed frequency index"
        );
        *self.state.write() = IndexState {
            frequencies: Some(Arc::new(frequencies)),
            scored: None,
        };
        Ok(())
    }

    /// Score every indexed n-gram and the whole input.
    ///
    /// Scoring an `Empty` document scores an empty frequency index: the
    /// n-gram side trivially succeeds and the document becomes `Scored`
    /// with no entries. On failure nothing changes.
    pub fn score(&self) -> Result<()> {
        let _build = self.build.lock();
        let scorer = self.pipeline.scorer()?;
        let config = self.pipeline.config();

        let frequencies = self.snapshot().frequencies.unwrap_or_default();
        let aggregator = ScoreAggregator::new(scorer).with_parallel(config.parallel_scoring);
        let input = self.input.as_str();
        let (aggregated, document) = config.scoped(|| {
            (
                aggregator.aggregate(&frequencies),
                scorer.score(input.trim()),
            )
        })?;

        let scored = match (aggregated, document) {
            (Ok(aggregation), Ok(document)) => aggregation.with_document(document),
            (aggregated, document) => {
                let mut errors = match aggregated {
                    Err(NgramError::PassFailed { errors, .. }) => errors,
                    Err(other) => vec![other],
                    Ok(_) => Vec::new(),
                };
                if let Err(err) = document {
                    debug!(error = %err, "Document input failed to score");
                    errors.push(err);
                }
                return Err(NgramError::pass_failed(Pass::Scoring, errors));
            }
        };

        info!(
            ngrams = scored.cache.len(),
            "Installed score cache and inverse indices"
        );
        *self.state.write() = IndexState {
            frequencies: Some(frequencies),
            scored: Some(Arc::new(scored)),
        };
        Ok(())
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// `(n-gram, count)` pairs, count descending then n-gram ascending.
    ///
    /// Empty for an `Empty` document.
    pub fn sorted_substrings(&self) -> Vec<NgramCount> {
        match self.snapshot().frequencies {
            Some(frequencies) => view::sorted_substrings(&frequencies),
            None => Vec::new(),
        }
    }

    /// Textual report, one line per n-gram; scores are included once scored.
    pub fn render(&self) -> String {
        let snapshot = self.snapshot();
        match &snapshot.frequencies {
            Some(frequencies) => view::render(
                frequencies,
                snapshot.scored.as_deref().map(|s| &s.cache),
            ),
            None => String::new(),
        }
    }

    /// The installed frequency index, if any
    pub fn frequencies(&self) -> Option<Arc<FrequencyIndex>> {
        self.snapshot().frequencies
    }

    /// The installed scores, if any
    pub fn scored_index(&self) -> Option<Arc<ScoredIndex>> {
        self.snapshot().scored
    }

    /// Occurrences of a canonical n-gram
    pub fn count(&self, ngram: &str) -> Option<u64> {
        self.frequencies().and_then(|f| f.get(ngram))
    }

    /// Scheme scores of a canonical n-gram
    pub fn scores_for(&self, ngram: &str) -> Option<SchemeScores> {
        self.scored_index()
            .and_then(|s| s.cache.get(ngram).copied())
    }

    /// Scheme scores of the whole input
    pub fn document_scores(&self) -> Option<SchemeScores> {
        self.scored_index().map(|s| s.document)
    }

    /// A copy of the inverse index for `scheme`
    pub fn inverse_index(&self, scheme: Scheme) -> Option<InverseScoreIndex> {
        self.scored_index().map(|s| s.inverse.get(scheme).clone())
    }

    /// N-grams sharing `score` under `scheme`, sorted
    pub fn ngrams_with_score(&self, scheme: Scheme, score: u64) -> Vec<String> {
        self.scored_index()
            .map(|s| s.inverse.get(scheme).get(score).to_vec())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Interchange
    // ------------------------------------------------------------------

    /// Snapshot the document into an interchange record
    pub fn to_record(&self) -> DocumentRecord {
        let snapshot = self.snapshot();
        let mut record = DocumentRecord {
            state: snapshot.lifecycle(),
            input: self.input.clone(),
            ..Default::default()
        };
        if let Some(frequencies) = &snapshot.frequencies {
            record.frequencies = frequencies.to_sorted();
        }
        if let Some(scored) = &snapshot.scored {
            record.document_scores = Some(scored.document);
            record.scores = scored.cache.to_sorted();
            for scheme in Scheme::ALL {
                *record.inverse_mut(scheme) = scored.inverse.get(scheme).clone();
            }
        }
        record
    }

    pub fn to_json(&self) -> Result<String> {
        self.to_record().to_json()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("Document")
            .field("input_len", &self.input.len())
            .field("state", &snapshot.lifecycle())
            .field(
                "ngrams",
                &snapshot.frequencies.as_ref().map_or(0, |f| f.len()),
            )
            .finish()
    }
}

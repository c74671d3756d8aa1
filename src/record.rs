//! Interchange record for persisting a document
//!
//! Field keys are short to keep serialized indices compact. All maps are
//! ordered so the same document always serializes to the same bytes.

use crate::errors::{NgramError, Result};
use crate::types::{DocumentState, InverseScoreIndex, Scheme, SchemeScores};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serializable snapshot of a [`Document`](crate::Document)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Lifecycle state at snapshot time
    #[serde(rename = "st", default)]
    pub state: DocumentState,
    /// The joined input text
    #[serde(rename = "in")]
    pub input: String,
    /// Scores of the whole input (present once scored)
    #[serde(rename = "gem", default, skip_serializing_if = "Option::is_none")]
    pub document_scores: Option<SchemeScores>,
    /// N-gram → count
    #[serde(rename = "subs", default)]
    pub frequencies: BTreeMap<String, u64>,
    /// N-gram → scheme scores
    #[serde(rename = "gems", default)]
    pub scores: BTreeMap<String, SchemeScores>,
    #[serde(rename = "sen", default)]
    pub english: InverseScoreIndex,
    #[serde(rename = "sje", default)]
    pub jewish: InverseScoreIndex,
    #[serde(rename = "ssi", default)]
    pub simple: InverseScoreIndex,
    #[serde(rename = "smy", default)]
    pub mystery: InverseScoreIndex,
    #[serde(rename = "smj", default)]
    pub majestic: InverseScoreIndex,
    #[serde(rename = "sei", default)]
    pub eights: InverseScoreIndex,
}

impl DocumentRecord {
    /// The inverse index stored for `scheme`
    pub fn inverse(&self, scheme: Scheme) -> &InverseScoreIndex {
        match scheme {
            Scheme::English => &self.english,
            Scheme::Jewish => &self.jewish,
            Scheme::Simple => &self.simple,
            Scheme::Mystery => &self.mystery,
            Scheme::Majestic => &self.majestic,
            Scheme::Eights => &self.eights,
        }
    }

    pub fn inverse_mut(&mut self, scheme: Scheme) -> &mut InverseScoreIndex {
        match scheme {
            Scheme::English => &mut self.english,
            Scheme::Jewish => &mut self.jewish,
            Scheme::Simple => &mut self.simple,
            Scheme::Mystery => &mut self.mystery,
            Scheme::Majestic => &mut self.majestic,
            Scheme::Eights => &mut self.eights,
        }
    }

    fn has_score_data(&self) -> bool {
        self.document_scores.is_some()
            || !self.scores.is_empty()
            || Scheme::ALL.iter().any(|&s| !self.inverse(s).is_empty())
    }

    /// Check that the record describes a document that could have been built.
    pub fn validate(&self) -> Result<()> {
        if let Some((ngram, _)) = self
            .frequencies
            .iter()
            .find(|(ngram, count)| ngram.is_empty() || **count == 0)
        {
            return Err(NgramError::invalid_record(format!(
                "frequency entry {:?} must have a non-empty key and a positive count",
                ngram
            )));
        }

        match self.state {
            DocumentState::Empty if !self.frequencies.is_empty() || self.has_score_data() => {
                Err(NgramError::invalid_record("empty document carries index data"))
            }
            DocumentState::Indexed if self.has_score_data() => {
                Err(NgramError::invalid_record("indexed document carries score data"))
            }
            DocumentState::Scored => self.validate_scores(),
            _ => Ok(()),
        }
    }

    fn validate_scores(&self) -> Result<()> {
        if self.document_scores.is_none() {
            return Err(NgramError::invalid_record(
                "scored document is missing its document scores",
            ));
        }
        if self.scores.len() != self.frequencies.len()
            || self.scores.keys().any(|k| !self.frequencies.contains_key(k))
        {
            return Err(NgramError::invalid_record(
                "score cache keys differ from frequency keys",
            ));
        }

        for scheme in Scheme::ALL {
            let index = self.inverse(scheme);
            if index.entry_count() != self.scores.len() {
                return Err(NgramError::invalid_record(format!(
                    "{} index holds {} entries for {} n-grams",
                    scheme,
                    index.entry_count(),
                    self.scores.len()
                )));
            }
            let mut listed: FxHashSet<&str> = FxHashSet::default();
            for (score, ngrams) in index.iter() {
                if ngrams.windows(2).any(|w| w[0] >= w[1]) {
                    return Err(NgramError::invalid_record(format!(
                        "{} bucket {} is not strictly sorted",
                        scheme, score
                    )));
                }
                for ngram in ngrams {
                    if !listed.insert(ngram.as_str()) {
                        return Err(NgramError::invalid_record(format!(
                            "{} index lists {:?} more than once",
                            scheme, ngram
                        )));
                    }
                    match self.scores.get(ngram) {
                        Some(scores) if scores.get(scheme) == score => {}
                        _ => {
                            return Err(NgramError::invalid_record(format!(
                                "{} bucket {} lists {:?} inconsistently",
                                scheme, score, ngram
                            )))
                        }
                    }
                }
            }
            if let Some(missing) = self.scores.keys().find(|k| !listed.contains(k.as_str())) {
                return Err(NgramError::invalid_record(format!(
                    "{} index is missing {:?}",
                    scheme, missing
                )));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a record.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: DocumentRecord = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }
}

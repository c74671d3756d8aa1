//! Error types for rapid_ngram
//!
//! Every fallible operation in the crate returns [`NgramError`]. Failures are
//! grouped into a small taxonomy (see [`ErrorKind`]) so callers can tell a bad
//! argument from a missing collaborator or an unscoreable input without
//! matching on message text.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, NgramError>;

/// Stable classification of an [`NgramError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Empty or invalid input, configuration values or records.
    Argument,
    /// A required collaborator (splitter, sanitizer, scorer) is unavailable.
    Configuration,
    /// The scoring function rejected an input.
    Scoring,
    /// The sanitizer rejected a window.
    Sanitize,
    /// A stage of the construction entrypoint failed.
    Pipeline,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Argument => "argument",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Scoring => "scoring",
            ErrorKind::Sanitize => "sanitize",
            ErrorKind::Pipeline => "pipeline",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A build pass over a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// Sentence splitting + n-gram counting.
    Extraction,
    /// Per-n-gram scoring + inverse index construction.
    Scoring,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Extraction => f.write_str("extraction"),
            Pass::Scoring => f.write_str("scoring"),
        }
    }
}

/// Main error type for rapid_ngram
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NgramError {
    /// No fragments were supplied, or the joined input is blank
    #[error("Empty input: {message}")]
    EmptyInput { message: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A collaborator the pipeline needs was never configured
    #[error("Unconfigured: {component} is not available")]
    Unconfigured { component: &'static str },

    /// A single window could not be cleaned
    #[error("Sanitize error for {span:?}: {message}")]
    Sanitize { span: String, message: String },

    /// A single input could not be scored
    #[error("Scoring error for {input:?}: {message}")]
    Scoring { input: String, message: String },

    /// Every failure collected during one all-or-nothing pass
    #[error("{pass} pass failed with {} error(s): {}", .errors.len(), join_errors(.errors))]
    PassFailed { pass: Pass, errors: Vec<NgramError> },

    /// A stage of the construction entrypoint failed
    #[error("Pipeline failed during {stage}: {source}")]
    Pipeline {
        stage: Pass,
        #[source]
        source: Box<NgramError>,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// An interchange record violates the index invariants
    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },
}

fn join_errors(errors: &[NgramError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl NgramError {
    /// Create an empty input error
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an error for a missing collaborator
    pub fn unconfigured(component: &'static str) -> Self {
        Self::Unconfigured { component }
    }

    /// Create a sanitize error for one window
    pub fn sanitize(span: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Sanitize {
            span: span.into(),
            message: message.into(),
        }
    }

    /// Create a scoring error for one input
    pub fn scoring(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Scoring {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Combine the failures of one pass into a single error.
    ///
    /// A lone failure is still wrapped so callers always see which pass
    /// rejected the document.
    pub fn pass_failed(pass: Pass, errors: Vec<NgramError>) -> Self {
        Self::PassFailed { pass, errors }
    }

    /// Wrap a stage failure of the construction entrypoint
    pub fn pipeline(stage: Pass, source: NgramError) -> Self {
        Self::Pipeline {
            stage,
            source: Box::new(source),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an invalid record error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput { .. }
            | Self::InvalidConfig { .. }
            | Self::Serialization { .. }
            | Self::InvalidRecord { .. } => ErrorKind::Argument,
            Self::Unconfigured { .. } => ErrorKind::Configuration,
            Self::Sanitize { .. } => ErrorKind::Sanitize,
            Self::Scoring { .. } => ErrorKind::Scoring,
            Self::PassFailed { errors, .. } => errors
                .first()
                .map(NgramError::kind)
                .unwrap_or(ErrorKind::Argument),
            Self::Pipeline { .. } => ErrorKind::Pipeline,
        }
    }

    /// Individual failures carried by this error.
    ///
    /// Unwraps pipeline and pass wrappers; a leaf error yields itself.
    pub fn failures(&self) -> Vec<&NgramError> {
        match self {
            Self::Pipeline { source, .. } => source.failures(),
            Self::PassFailed { errors, .. } => errors.iter().flat_map(|e| e.failures()).collect(),
            other => vec![other],
        }
    }
}

impl From<serde_json::Error> for NgramError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

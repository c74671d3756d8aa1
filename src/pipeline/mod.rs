//! The collaborator bundle every document is built with.
//!
//! A [`Pipeline`] carries the sentence splitter, the sanitizer, the scorer
//! and the [`IndexConfig`] as one explicit value. Nothing in the crate reaches
//! for process-wide state; a document only ever uses the pipeline it was
//! constructed with.
//!
//! ## Submodules
//!
//! - [`builder`]: fluent construction with injected or omitted collaborators

pub mod builder;

pub use builder::PipelineBuilder;

use std::fmt;
use std::sync::Arc;

use crate::errors::{NgramError, Result};
use crate::nlp::{Sanitizer, SentenceSplitter};
use crate::scoring::Scorer;
use crate::types::IndexConfig;

/// Splitter, sanitizer, scorer and config, shared cheaply between documents.
#[derive(Clone)]
pub struct Pipeline {
    pub(crate) splitter: Option<Arc<dyn SentenceSplitter>>,
    pub(crate) sanitizer: Option<Arc<dyn Sanitizer>>,
    pub(crate) scorer: Option<Arc<dyn Scorer>>,
    pub(crate) config: IndexConfig,
}

impl Pipeline {
    /// Default collaborators and default config.
    pub fn standard() -> Result<Self> {
        PipelineBuilder::standard()?.build()
    }

    /// Start from an empty builder (no collaborators).
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The sentence splitter, or a configuration error if none was set.
    pub fn splitter(&self) -> Result<&dyn SentenceSplitter> {
        self.splitter
            .as_deref()
            .ok_or_else(|| NgramError::unconfigured("sentence splitter"))
    }

    /// The sanitizer, or a configuration error if none was set.
    pub fn sanitizer(&self) -> Result<&dyn Sanitizer> {
        self.sanitizer
            .as_deref()
            .ok_or_else(|| NgramError::unconfigured("sanitizer"))
    }

    /// The scorer, or a configuration error if none was set.
    pub fn scorer(&self) -> Result<&dyn Scorer> {
        self.scorer
            .as_deref()
            .ok_or_else(|| NgramError::unconfigured("scorer"))
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("splitter", &self.splitter.is_some())
            .field("sanitizer", &self.sanitizer.is_some())
            .field("scorer", &self.scorer.is_some())
            .field("config", &self.config)
            .finish()
    }
}

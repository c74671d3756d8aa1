//! Fluent builder for [`Pipeline`].
//!
//! # Usage
//!
//! ```ignore
//! let pipeline = PipelineBuilder::standard()?
//!     .with_config(IndexConfig::default().with_max_threads(4))
//!     .with_scorer(my_scorer)
//!     .build()?;
//! ```

use std::sync::Arc;

use super::Pipeline;
use crate::errors::Result;
use crate::nlp::{RegexSanitizer, Sanitizer, SentenceSplitter, UnicodeSentenceSplitter};
use crate::scoring::{LetterScorer, Scorer};
use crate::types::IndexConfig;

/// Assembles a [`Pipeline`]; validation happens in [`build`](Self::build).
#[derive(Default)]
pub struct PipelineBuilder {
    splitter: Option<Arc<dyn SentenceSplitter>>,
    sanitizer: Option<Arc<dyn Sanitizer>>,
    scorer: Option<Arc<dyn Scorer>>,
    config: IndexConfig,
}

impl PipelineBuilder {
    /// A builder with no collaborators set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-loaded with the default collaborators.
    pub fn standard() -> Result<Self> {
        Ok(Self::new()
            .with_splitter(UnicodeSentenceSplitter::new())
            .with_sanitizer(RegexSanitizer::new()?)
            .with_scorer(LetterScorer::new()))
    }

    pub fn with_splitter(mut self, splitter: impl SentenceSplitter + 'static) -> Self {
        self.splitter = Some(Arc::new(splitter));
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.sanitizer = Some(Arc::new(sanitizer));
        self
    }

    pub fn with_scorer(mut self, scorer: impl Scorer + 'static) -> Self {
        self.scorer = Some(Arc::new(scorer));
        self
    }

    /// Drop the splitter; extraction will fail with a configuration error.
    pub fn without_splitter(mut self) -> Self {
        self.splitter = None;
        self
    }

    /// Drop the sanitizer; extraction will fail with a configuration error.
    pub fn without_sanitizer(mut self) -> Self {
        self.sanitizer = None;
        self
    }

    /// Drop the scorer; scoring will fail with a configuration error.
    pub fn without_scorer(mut self) -> Self {
        self.scorer = None;
        self
    }

    pub fn with_config(mut self, config: IndexConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the config and freeze the pipeline.
    pub fn build(self) -> Result<Pipeline> {
        self.config.validate()?;
        Ok(Pipeline {
            splitter: self.splitter,
            sanitizer: self.sanitizer,
            scorer: self.scorer,
            config: self.config,
        })
    }
}

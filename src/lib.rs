//! # rapid_ngram
//!
//! Concurrent n-gram frequency indexing with letter-value scoring.
//!
//! Text is split into sentences, every window of one to three words inside a
//! sentence is cleaned and counted, and each distinct n-gram is then scored
//! under six letter-value schemes. For every scheme an inverse index maps a
//! score back to the n-grams that share it.
//!
//! ## Features
//!
//! - **Parallel**: one Rayon task per sentence, merged without contention
//! - **Deterministic**: sorted views and buckets never depend on hash order
//! - **All-or-nothing**: a build pass either installs a complete index or
//!   leaves the document exactly as it was
//! - **Pluggable**: splitter, sanitizer and scorer are traits (closures work)
//!
//! ```ignore
//! use rapid_ngram::{Document, Pipeline};
//!
//! let doc = Document::new(Pipeline::standard()?, ["The cat sat.", "The cat ran."])?;
//! assert_eq!(doc.count("the cat"), Some(2));
//! print!("{doc}");
//! ```

pub mod document;
pub mod errors;
pub mod index;
pub mod nlp;
pub mod pipeline;
pub mod record;
pub mod scoring;
pub mod types;

// Re-export commonly used types
pub use document::Document;
pub use errors::{ErrorKind, NgramError, Pass, Result};
pub use record::DocumentRecord;
pub use types::{
    DocumentState, FrequencyIndex, IndexConfig, InverseIndices, InverseScoreIndex, NgramCount,
    Scheme, SchemeScores, ScoreCache, ScoredIndex, MAX_WINDOW,
};

// Re-export main functionality
pub use index::{view, NGramIndexer, ScoreAggregator};
pub use nlp::{RegexSanitizer, Sanitizer, SentenceSplitter, UnicodeSentenceSplitter};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use scoring::{LetterScorer, Scorer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

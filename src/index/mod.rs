//! Index construction and views
//!
//! - [`indexer`]: per-sentence parallel n-gram counting
//! - [`aggregator`]: per-n-gram scoring into six inverse indices
//! - [`view`]: sorted and rendered output

pub mod aggregator;
pub mod indexer;
pub mod view;

pub use aggregator::{Aggregation, ScoreAggregator};
pub use indexer::{NGramIndexer, SentenceTally};

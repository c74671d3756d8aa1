//! Text collaborators: sentence splitting and span sanitizing
//!
//! Both stages sit behind a trait so the pipeline can be handed any
//! implementation, including a plain closure. The default implementations
//! are [`UnicodeSentenceSplitter`] and [`RegexSanitizer`].

pub mod sanitizer;
pub mod splitter;

pub use sanitizer::RegexSanitizer;
pub use splitter::UnicodeSentenceSplitter;

use crate::errors::Result;

/// Splits text into an ordered list of trimmed sentences.
///
/// # Contract
///
/// - Non-empty input never yields an empty list; input without any boundary
///   comes back as a single sentence.
/// - Order follows the input.
pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Result<Vec<String>>;
}

/// Reduces a raw span to letters, digits and whitespace.
///
/// # Contract
///
/// - Leading and trailing whitespace is trimmed before cleaning.
/// - Case is preserved; lowercasing belongs to the indexer.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, span: &str) -> Result<String>;
}

impl<F> SentenceSplitter for F
where
    F: Fn(&str) -> Result<Vec<String>> + Send + Sync,
{
    fn split(&self, text: &str) -> Result<Vec<String>> {
        self(text)
    }
}

impl<F> Sanitizer for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn sanitize(&self, span: &str) -> Result<String> {
        self(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::NgramError;

    #[test]
    fn test_closure_collaborators() {
        let splitter = |text: &str| -> Result<Vec<String>> {
            Ok(text.split('|').map(|s| s.trim().to_string()).collect())
        };
        assert_eq!(splitter.split("a | b").unwrap(), vec!["a", "b"]);

        let sanitizer = |span: &str| -> Result<String> {
            if span.contains('#') {
                Err(NgramError::sanitize(span, "hash not allowed"))
            } else {
                Ok(span.trim().to_string())
            }
        };
        assert_eq!(sanitizer.sanitize("  ok ").unwrap(), "ok");
        assert!(sanitizer.sanitize("#").is_err());
    }
}

//! Regex-backed span sanitizer

use super::Sanitizer;
use crate::errors::{NgramError, Result};
use regex::Regex;

/// Matches everything that is not a letter, a digit or whitespace.
pub const DEFAULT_STRIP_PATTERN: &str = r"[^\p{L}\p{N}\s]";

/// Removes every match of a strip pattern from a trimmed span
#[derive(Debug, Clone)]
pub struct RegexSanitizer {
    strip: Regex,
}

impl RegexSanitizer {
    /// Create a sanitizer with [`DEFAULT_STRIP_PATTERN`]
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_STRIP_PATTERN)
    }

    /// Create a sanitizer that strips whatever `pattern` matches
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let strip = Regex::new(pattern).map_err(|e| {
            NgramError::invalid_config(format!("invalid strip pattern {:?}: {}", pattern, e))
        })?;
        Ok(Self { strip })
    }

    /// The pattern in use
    pub fn pattern(&self) -> &str {
        self.strip.as_str()
    }
}

impl Sanitizer for RegexSanitizer {
    fn sanitize(&self, span: &str) -> Result<String> {
        Ok(self.strip.replace_all(span.trim(), "").into_owned())
    }
}

//! Compiled structural patterns.

use std::fmt;

use scraper::Selector;

/// Error returned when a pattern string isn't a valid CSS selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid pattern '{source_text}': {message}")]
pub struct InvalidPattern {
    pub source_text: String,
    pub message: String,
}

/// A structural node pattern, written as a CSS selector.
///
/// # Examples
///
/// ```
/// use transit_schedule::tree::Pattern;
///
/// let rows = Pattern::parse("tr.row").unwrap();
/// assert_eq!(rows.as_str(), "tr.row");
///
/// assert!(Pattern::parse("tr[").is_err());
/// ```
#[derive(Clone)]
pub struct Pattern {
    source: String,
    selector: Selector,
}

impl Pattern {
    /// Compile a pattern from CSS selector syntax.
    pub fn parse(source: &str) -> Result<Self, InvalidPattern> {
        let selector = Selector::parse(source).map_err(|e| InvalidPattern {
            source_text: source.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            source: source.to_string(),
            selector,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({})", self.source)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

//! Extraction error types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tree::InvalidPattern;

/// A metadata field that must be found for extraction to succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    ValidAsOf,
    Direction,
    AvailableDirections,
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetadataField::ValidAsOf => "validity date",
            MetadataField::Direction => "direction",
            MetadataField::AvailableDirections => "available directions",
        };
        f.write_str(name)
    }
}

/// Errors that stop an extraction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractError {
    /// A data row has no time cells at all
    #[error("no columns in data row {row}")]
    NoColumns { row: usize },

    /// A data row has more time cells than there are stations
    #[error("data row {row} has a time in column {column} but only {stations} stations")]
    RowOverflow {
        row: usize,
        column: usize,
        stations: usize,
    },

    /// Required metadata wasn't found anywhere on the page
    #[error("unresolved metadata: no {0} found")]
    UnresolvedMetadata(MetadataField),

    /// No station has a single stop
    #[error("schedule has no stop entries")]
    EmptySchedule,

    /// A configured selector doesn't compile
    #[error(transparent)]
    InvalidSelector(#[from] InvalidPattern),

    /// A configured regex doesn't compile
    #[error("invalid regex '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },
}

/// Conditions worth reporting that don't stop an extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "detail")]
pub enum ExtractWarning {
    /// A direction phrase matched but its word has no known code.
    AmbiguousDirectionWord(String),
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractWarning::AmbiguousDirectionWord(word) => {
                write!(f, "unrecognized direction word '{word}'")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ExtractError::NoColumns { row: 3 };
        assert_eq!(err.to_string(), "no columns in data row 3");

        let err = ExtractError::RowOverflow {
            row: 0,
            column: 2,
            stations: 2,
        };
        assert_eq!(
            err.to_string(),
            "data row 0 has a time in column 2 but only 2 stations"
        );

        let err = ExtractError::UnresolvedMetadata(MetadataField::ValidAsOf);
        assert_eq!(
            err.to_string(),
            "unresolved metadata: no validity date found"
        );

        let err = ExtractError::EmptySchedule;
        assert_eq!(err.to_string(), "schedule has no stop entries");
    }

    #[test]
    fn warning_display() {
        let w = ExtractWarning::AmbiguousDirectionWord("Inbound".into());
        assert_eq!(w.to_string(), "unrecognized direction word 'Inbound'");
    }

    #[test]
    fn warning_serde() {
        let w = ExtractWarning::AmbiguousDirectionWord("Up".into());
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"kind":"ambiguousDirectionWord","detail":"Up"}"#);
    }
}

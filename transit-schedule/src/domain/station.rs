//! Station label type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Suffix appended to a station label the second time a route visits it.
pub const RETURN_SUFFIX: &str = " (return)";

/// The label of a stop location, as printed in a schedule's header row.
///
/// Labels are kept verbatim apart from whitespace normalisation done by the
/// tree adapter. Within one [`Schedule`](super::Schedule) every label is
/// unique: a route that loops back through a stop it already listed gets a
/// second label carrying a return suffix.
///
/// # Examples
///
/// ```
/// use transit_schedule::domain::StationLabel;
///
/// let main = StationLabel::new("Main St");
/// assert_eq!(main.as_str(), "Main St");
/// assert_eq!(main.with_suffix(" (return)").as_str(), "Main St (return)");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationLabel(String);

impl StationLabel {
    /// Create a label from header text.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a new label with `suffix` appended.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{}", self.0, suffix))
    }
}

impl fmt::Debug for StationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationLabel({})", self.0)
    }
}

impl fmt::Display for StationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for StationLabel {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StationLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_suffix_appends() {
        let label = StationLabel::new("Union Station");
        assert_eq!(label.with_suffix(RETURN_SUFFIX), "Union Station (return)");
    }

    #[test]
    fn display_and_debug() {
        let label = StationLabel::new("Oak Ave");
        assert_eq!(format!("{}", label), "Oak Ave");
        assert_eq!(format!("{:?}", label), "StationLabel(Oak Ave)");
    }

    #[test]
    fn serializes_as_plain_string() {
        let label = StationLabel::new("Main St");
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"Main St\"");
    }
}

//! Schedule validity date.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date from which a schedule is in effect, as printed on the page.
///
/// The printed text (e.g. `"January 5, 2024"`) is the source of truth and is
/// what gets serialized. When the text is a real calendar date it is also
/// available as a [`NaiveDate`].
///
/// # Examples
///
/// ```
/// use transit_schedule::domain::ValidAsOf;
/// use chrono::NaiveDate;
///
/// let v = ValidAsOf::new("January 5, 2024");
/// assert_eq!(v.date(), NaiveDate::from_ymd_opt(2024, 1, 5));
///
/// let odd = ValidAsOf::new("Smarch 40, 2024");
/// assert_eq!(odd.date(), None);
/// assert_eq!(odd.as_str(), "Smarch 40, 2024");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct ValidAsOf {
    text: String,
    date: Option<NaiveDate>,
}

impl ValidAsOf {
    /// Create from the printed date text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let date = NaiveDate::parse_from_str(&text, "%B %d, %Y").ok();
        Self { text, date }
    }

    /// The date text as printed.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The calendar date, if the text names one.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Whether the schedule is in effect on `day`.
    ///
    /// Unparseable dates are treated as in effect.
    pub fn is_effective_on(&self, day: NaiveDate) -> bool {
        self.date.is_none_or(|from| from <= day)
    }
}

impl fmt::Debug for ValidAsOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidAsOf({})", self.text)
    }
}

impl fmt::Display for ValidAsOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<ValidAsOf> for String {
    fn from(v: ValidAsOf) -> Self {
        v.text
    }
}

impl From<String> for ValidAsOf {
    fn from(text: String) -> Self {
        ValidAsOf::new(text)
    }
}

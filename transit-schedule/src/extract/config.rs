//! Extraction configuration.

use crate::domain::RETURN_SUFFIX;

/// Default "no stop" cell text.
pub const NO_STOP_SENTINEL: &str = "--";

/// Default validity phrase. The first capture group is the date text.
pub const VALIDITY_PATTERN: &str = r"Schedule effective as of ([A-Z][a-z]+ \d{1,2}, \d{4})";

/// Default direction phrases, tried in order. The first capture group is
/// the direction word.
pub const DIRECTION_PATTERNS: &[&str] = &[
    r"(North|South|East|West) Bound",
    r"(Loop|Clockwise|Counterclockwise)",
];

/// Which generation of the grid algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Subroutes are detected by the mere presence of a label cell in the
    /// header row, and every time cell becomes a stop entry.
    Basic,

    /// Subroutes need a non-empty first label cell in the header row, and
    /// "no stop" cells are skipped.
    #[default]
    Refined,
}

impl Variant {
    /// Parse a variant name (`basic` or `refined`, any case).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "basic" => Some(Variant::Basic),
            "refined" => Some(Variant::Refined),
            _ => None,
        }
    }

    /// Lowercase name, as accepted by [`Variant::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::Refined => "refined",
        }
    }

    /// Whether "no stop" cells are skipped.
    pub fn skips_no_stop(self) -> bool {
        matches!(self, Variant::Refined)
    }
}

/// CSS selectors locating each part of a schedule page.
#[derive(Debug, Clone)]
pub struct Selectors {
    /// Station label cells of the header row.
    pub stations: String,
    /// The header row itself.
    pub header_row: String,
    /// Data rows, one per run.
    pub data_rows: String,
    /// Time cells, also used for the route label cell.
    pub time_cells: String,
    /// Prose blocks that may carry the validity phrase.
    pub headlines: String,
    /// Highlighted header cells that may carry a direction phrase.
    pub direction_cells: String,
    /// Hyperlinks; a direction cell containing one is a link to another
    /// direction, not the current one.
    pub links: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            stations: "div.scheduleStations".to_string(),
            header_row: "tr.headrow".to_string(),
            data_rows: "tr.row".to_string(),
            time_cells: "div.scheduleTimesGrey".to_string(),
            headlines: "div.headline".to_string(),
            direction_cells: "td.headHighlight".to_string(),
            links: "a".to_string(),
        }
    }
}

/// Configuration for schedule extraction.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Algorithm generation.
    pub variant: Variant,

    /// Where things live on the page.
    pub selectors: Selectors,

    /// Cell text meaning "this run doesn't serve this station".
    pub no_stop_sentinel: String,

    /// Appended to a station label on a repeat visit.
    pub return_suffix: String,

    /// Regex for the validity phrase.
    pub validity_pattern: String,

    /// Regexes for direction phrases, tried in order.
    pub direction_patterns: Vec<String>,
}

impl ExtractorConfig {
    /// Create a configuration with default selectors for the given variant.
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Set custom selectors.
    pub fn with_selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Set custom direction patterns.
    pub fn with_direction_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.direction_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set a custom validity pattern.
    pub fn with_validity_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.validity_pattern = pattern.into();
        self
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            selectors: Selectors::default(),
            no_stop_sentinel: NO_STOP_SENTINEL.to_string(),
            return_suffix: RETURN_SUFFIX.to_string(),
            validity_pattern: VALIDITY_PATTERN.to_string(),
            direction_patterns: DIRECTION_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

//! Schedule extraction from a document tree.
//!
//! An extraction runs four independent passes over the same tree and then
//! assembles their output:
//!
//! 1. metadata: validity date and directions from page prose
//! 2. station registry: header labels in order, made unique
//! 3. subroute detection: does each data row lead with a variant label?
//! 4. grid walk: time cells mapped onto stations by position
//!
//! Structural problems in the grid stop the extraction at once. Missing
//! metadata is only reported once every pass has run.

mod assemble;
mod config;
mod error;
mod grid;
mod metadata;
mod stations;
mod subroutes;


pub use assemble::{ScheduleResult, assemble};
pub use config::{
    DIRECTION_PATTERNS, ExtractorConfig, NO_STOP_SENTINEL, Selectors, VALIDITY_PATTERN, Variant,
};
pub use error::{ExtractError, ExtractWarning, MetadataField};
pub use grid::{GridRules, walk};
pub use metadata::{MetadataRules, ScheduleMetadata};
pub use stations::build_registry;
pub use subroutes::has_subroutes;

use regex::Regex;
use tracing::debug;

use crate::tree::{Pattern, TreeQuery};

/// Compile a configured regex, reporting failures as extraction errors.
fn compile_regex(pattern: &str) -> Result<Regex, ExtractError> {
    Regex::new(pattern).map_err(|e| ExtractError::InvalidRegex {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// A compiled, reusable schedule extractor.
///
/// Building an extractor compiles every selector and regex of its
/// configuration up front, so a bad configuration fails before any page is
/// read.
///
/// # Examples
///
/// ```
/// use transit_schedule::extract::{Extractor, ExtractorConfig};
/// use transit_schedule::tree::HtmlTree;
///
/// let page = HtmlTree::parse(r#"
///     <div class="headline">Schedule effective as of January 5, 2024</div>
///     <table>
///       <tr><td class="headHighlight">South Bound</td></tr>
///       <tr class="headrow"><td><div class="scheduleStations">Main St</div></td></tr>
///       <tr class="row"><td><div class="scheduleTimesGrey">8:00</div></td></tr>
///     </table>
/// "#);
///
/// let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
/// let result = extractor.extract(&page).unwrap();
/// assert_eq!(result.direction.code(), "S");
/// assert_eq!(result.schedules.get("Main St").unwrap()[0].time, "8:00");
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
    metadata: MetadataRules,
    stations: Pattern,
    header_row: Pattern,
    data_rows: Pattern,
    time_cells: Pattern,
}

impl Extractor {
    /// Compile an extractor from a configuration.
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractError> {
        let selectors = &config.selectors;

        Ok(Self {
            metadata: MetadataRules::new(&config)?,
            stations: Pattern::parse(&selectors.stations)?,
            header_row: Pattern::parse(&selectors.header_row)?,
            data_rows: Pattern::parse(&selectors.data_rows)?,
            time_cells: Pattern::parse(&selectors.time_cells)?,
            config,
        })
    }

    /// The configuration this extractor was built from.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a schedule from a tree.
    pub fn extract<T: TreeQuery>(&self, tree: &T) -> Result<ScheduleResult, ExtractError> {
        let variant = self.config.variant;

        let metadata = self.metadata.extract(tree);

        let mut schedule = build_registry(tree, &self.stations, &self.config.return_suffix);

        let has_subroutes = has_subroutes(tree, &self.header_row, &self.time_cells, variant);
        debug!(?variant, stations = schedule.len(), has_subroutes, "extracting grid");

        let rules = GridRules {
            has_subroutes,
            no_stop_sentinel: variant
                .skips_no_stop()
                .then_some(self.config.no_stop_sentinel.as_str()),
        };
        let subroutes = walk(tree, &self.data_rows, &self.time_cells, rules, &mut schedule)?;

        assemble(metadata, schedule, subroutes)
    }
}

//! Schedule metadata recovered from page prose.
//!
//! Two independent scans: headline blocks for the validity phrase, and
//! highlighted header cells for direction phrases. A page offers every
//! direction of a route as header cells, but only the one being displayed
//! is plain text; the others are links to their own pages.

use regex::Regex;
use tracing::{debug, trace, warn};

use crate::domain::{Direction, DirectionCodes, ValidAsOf};
use crate::tree::{Pattern, TreeQuery};

use super::config::ExtractorConfig;
use super::error::{ExtractError, ExtractWarning};
use super::compile_regex;

/// Metadata found on a page. Fields that weren't found are left empty;
/// deciding whether that's fatal is up to the assembler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleMetadata {
    /// First validity phrase found.
    pub valid_as_of: Option<ValidAsOf>,

    /// Direction of the displayed schedule (last unlinked match).
    pub direction: Option<Direction>,

    /// Every matched direction, in page order.
    pub available_directions: DirectionCodes,

    /// Recoverable anomalies seen while scanning.
    pub warnings: Vec<ExtractWarning>,
}

/// Compiled patterns for the metadata scans.
#[derive(Debug, Clone)]
pub struct MetadataRules {
    headlines: Pattern,
    direction_cells: Pattern,
    links: Pattern,
    validity: Regex,
    directions: Vec<Regex>,
}

impl MetadataRules {
    /// Compile the metadata patterns of a configuration.
    pub fn new(config: &ExtractorConfig) -> Result<Self, ExtractError> {
        let directions = config
            .direction_patterns
            .iter()
            .map(|p| compile_regex(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            headlines: Pattern::parse(&config.selectors.headlines)?,
            direction_cells: Pattern::parse(&config.selectors.direction_cells)?,
            links: Pattern::parse(&config.selectors.links)?,
            validity: compile_regex(&config.validity_pattern)?,
            directions,
        })
    }

    /// Scan a tree for validity date and directions.
    pub fn extract<T: TreeQuery>(&self, tree: &T) -> ScheduleMetadata {
        let valid_as_of = self.find_valid_as_of(tree);
        let mut metadata = ScheduleMetadata {
            valid_as_of,
            ..ScheduleMetadata::default()
        };
        self.scan_directions(tree, &mut metadata);

        debug!(
            valid_as_of = ?metadata.valid_as_of,
            direction = ?metadata.direction,
            available = %metadata.available_directions,
            "scanned schedule metadata"
        );

        metadata
    }

    /// The first headline carrying the validity phrase wins.
    fn find_valid_as_of<T: TreeQuery>(&self, tree: &T) -> Option<ValidAsOf> {
        tree.select(&self.headlines).into_iter().find_map(|node| {
            let text = tree.text(node);
            let captured = self.validity.captures(&text)?.get(1)?;
            trace!(headline = %text, "matched validity phrase");
            Some(ValidAsOf::new(captured.as_str()))
        })
    }

    fn scan_directions<T: TreeQuery>(&self, tree: &T, metadata: &mut ScheduleMetadata) {
        for node in tree.select(&self.direction_cells) {
            let text = tree.text(node);
            let Some(direction) = self.match_direction(&text) else {
                continue;
            };

            if let Direction::Unrecognized(word) = &direction {
                warn!(word = %word, cell = %text, "unrecognized direction word");
                metadata
                    .warnings
                    .push(ExtractWarning::AmbiguousDirectionWord(word.clone()));
            }

            let linked = tree.count_in(node, &self.links) > 0;
            trace!(cell = %text, code = %direction, linked, "matched direction phrase");

            if !linked {
                metadata.direction = Some(direction.clone());
            }
            metadata.available_directions.push(direction);
        }
    }

    /// Try each direction pattern in order; the first that matches decides.
    fn match_direction(&self, text: &str) -> Option<Direction> {
        self.directions.iter().find_map(|re| {
            let word = re.captures(text)?.get(1)?;
            Some(Direction::from_word(word.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::HtmlTree;

    fn rules() -> MetadataRules {
        MetadataRules::new(&ExtractorConfig::default()).unwrap()
    }

    fn page(body: &str) -> HtmlTree {
        HtmlTree::parse(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn first_validity_match_wins() {
        let tree = page(
            r#"<div class="headline">Route B</div>
               <div class="headline">Schedule effective as of January 5, 2024</div>
               <div class="headline">Schedule effective as of March 1, 2025</div>"#,
        );
        let v = rules().extract(&tree).valid_as_of.unwrap();
        assert_eq!(v.as_str(), "January 5, 2024");
    }

    #[test]
    fn missing_validity_is_none() {
        let tree = page(r#"<div class="headline">Route B</div>"#);
        assert!(rules().extract(&tree).valid_as_of.is_none());
    }

    #[test]
    fn validity_only_read_from_headlines() {
        let tree = page(r#"<p>Schedule effective as of January 5, 2024</p>"#);
        assert!(rules().extract(&tree).valid_as_of.is_none());
    }

    #[test]
    fn unlinked_direction_is_current() {
        let tree = page(
            r#"<table><tr>
                 <td class="headHighlight"><a href="?dir=N">North Bound</a></td>
                 <td class="headHighlight">South Bound</td>
               </tr></table>"#,
        );
        let m = rules().extract(&tree);
        assert_eq!(m.direction, Some(Direction::South));
        assert_eq!(m.available_directions.to_string(), "N-S");
        assert!(m.warnings.is_empty());
    }

    #[test]
    fn linked_only_leaves_direction_unset() {
        let tree = page(
            r#"<table><tr>
                 <td class="headHighlight"><a href="?dir=E">East Bound</a></td>
               </tr></table>"#,
        );
        let m = rules().extract(&tree);
        assert_eq!(m.direction, None);
        assert_eq!(m.available_directions.to_string(), "E");
    }

    #[test]
    fn last_unlinked_match_wins() {
        let tree = page(
            r#"<table><tr>
                 <td class="headHighlight">Clockwise</td>
                 <td class="headHighlight">Counterclockwise</td>
               </tr></table>"#,
        );
        let m = rules().extract(&tree);
        assert_eq!(m.direction, Some(Direction::Counterclockwise));
        assert_eq!(m.available_directions.to_string(), "CW-CCW");
    }

    #[test]
    fn cells_without_phrase_are_ignored() {
        let tree = page(
            r#"<table><tr>
                 <td class="headHighlight">Route 15</td>
                 <td class="headHighlight">Loop</td>
               </tr></table>"#,
        );
        let m = rules().extract(&tree);
        assert_eq!(m.direction, Some(Direction::Loop));
        assert_eq!(m.available_directions.len(), 1);
    }

    #[test]
    fn unrecognized_word_warns_and_accumulates() {
        let config = ExtractorConfig::default()
            .with_direction_patterns([r"(North|South|Up|Down) Bound"]);
        let rules = MetadataRules::new(&config).unwrap();
        let tree = page(
            r##"<table><tr>
                 <td class="headHighlight"><a href="#">Up Bound</a></td>
                 <td class="headHighlight">North Bound</td>
               </tr></table>"##,
        );

        let m = rules.extract(&tree);
        assert_eq!(m.direction, Some(Direction::North));
        assert_eq!(m.available_directions.to_string(), "? (Up)-N");
        assert_eq!(
            m.warnings,
            vec![ExtractWarning::AmbiguousDirectionWord("Up".into())]
        );
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let config = ExtractorConfig::default().with_direction_patterns(["(unclosed"]);
        assert!(matches!(
            MetadataRules::new(&config),
            Err(ExtractError::InvalidRegex { .. })
        ));
    }
}

//! Station registry: header labels in order, made unique.

use tracing::debug;

use crate::domain::{Schedule, StationLabel};
use crate::tree::{Pattern, TreeQuery};

/// Register every station label cell of the header, in document order.
///
/// A label seen before is registered with `return_suffix` appended, so a
/// route that loops back through a stop gets a separate column for the
/// return visit.
pub fn build_registry<T: TreeQuery>(tree: &T, stations: &Pattern, return_suffix: &str) -> Schedule {
    let mut schedule = Schedule::new();

    for node in tree.select(stations) {
        let label = StationLabel::new(tree.text(node));
        let registered = schedule.register(label.clone(), return_suffix);
        if registered != label {
            debug!(station = %label, registered = %registered, "station visited again");
        }
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RETURN_SUFFIX;
    use crate::tree::HtmlTree;

    fn header(labels: &[&str]) -> HtmlTree {
        let cells: String = labels
            .iter()
            .map(|l| format!(r#"<td><div class="scheduleStations">{l}</div></td>"#))
            .collect();
        HtmlTree::parse(&format!(
            r#"<table><tr class="headrow">{cells}</tr></table>"#
        ))
    }

    fn registry(labels: &[&str]) -> Vec<String> {
        registry_with_suffix(labels, RETURN_SUFFIX)
    }

    fn registry_with_suffix(labels: &[&str], suffix: &str) -> Vec<String> {
        let tree = header(labels);
        let pattern = Pattern::parse("div.scheduleStations").unwrap();
        build_registry(&tree, &pattern, suffix)
            .labels()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn keeps_header_order() {
        assert_eq!(
            registry(&["Main St", "Oak Ave", "Elm St"]),
            vec!["Main St", "Oak Ave", "Elm St"]
        );
    }

    #[test]
    fn duplicate_becomes_return() {
        assert_eq!(registry(&["A", "A"]), vec!["A", "A (return)"]);
    }

    #[test]
    fn loop_route_returns_through_start() {
        assert_eq!(
            registry(&["Downtown", "Campus", "Downtown"]),
            vec!["Downtown", "Campus", "Downtown (return)"]
        );
    }

    #[test]
    fn configured_suffix_is_used() {
        assert_eq!(
            registry_with_suffix(&["A", "B", "A", "A"], " [2]"),
            vec!["A", "B", "A [2]", "A [2] [2]"]
        );
    }

    #[test]
    fn no_station_cells() {
        assert!(registry(&[]).is_empty());
    }
}

//! Grid walk: data rows to per-station stop entries.
//!
//! Each data row is one run of the route. Its time cells line up with the
//! registered stations by position, optionally preceded by one cell naming
//! the route variant that makes the run.

use tracing::{debug, trace};

use crate::domain::{Schedule, StopEntry, SubrouteSet};
use crate::tree::{Pattern, TreeQuery};

use super::error::ExtractError;

/// How to read the cells of a data row.
#[derive(Debug, Clone, Copy)]
pub struct GridRules<'a> {
    /// Data rows start with a route variant label cell.
    pub has_subroutes: bool,

    /// Cells with this text are skipped ("no stop"). `None` appends every
    /// cell.
    pub no_stop_sentinel: Option<&'a str>,
}

/// Per-row walking state.
#[derive(Debug, Default)]
struct RowCursor {
    /// Station position of the next time cell.
    column: usize,
    /// Route variant of this row, once its label cell has been read.
    route: Option<String>,
    /// Whether the leading label cell has been consumed.
    label_consumed: bool,
}

/// Walk every data row, appending stop entries to `schedule`.
///
/// Returns the route variant labels seen, in first-seen order.
///
/// Fails on the first row with no time cells, or with more time cells than
/// registered stations.
pub fn walk<T: TreeQuery>(
    tree: &T,
    rows: &Pattern,
    cells: &Pattern,
    rules: GridRules<'_>,
    schedule: &mut Schedule,
) -> Result<SubrouteSet, ExtractError> {
    let mut subroutes = SubrouteSet::new();
    let stations = schedule.len();

    let data_rows = tree.select(rows);
    for (row_idx, row) in data_rows.iter().enumerate() {
        let row_cells = tree.select_in(*row, cells);
        if row_cells.is_empty() {
            return Err(ExtractError::NoColumns { row: row_idx });
        }

        let mut cursor = RowCursor::default();

        for cell in row_cells {
            let text = tree.text(cell);

            if rules.has_subroutes && !cursor.label_consumed {
                cursor.label_consumed = true;
                // A blank label cell still takes the label slot, but names no variant
                if !text.is_empty() {
                    subroutes.insert(&text);
                    cursor.route = Some(text);
                }
                continue;
            }

            let column = cursor.column;
            cursor.column += 1;

            let entries = schedule
                .column_mut(column)
                .ok_or(ExtractError::RowOverflow {
                    row: row_idx,
                    column,
                    stations,
                })?;

            if rules.no_stop_sentinel == Some(text.as_str()) {
                continue;
            }

            entries.push(StopEntry::new(text, cursor.route.clone()));
        }

        trace!(row = row_idx, route = ?cursor.route, cells = cursor.column, "walked data row");
    }

    debug!(
        rows = data_rows.len(),
        stations,
        entries = schedule.entry_count(),
        subroutes = subroutes.len(),
        "walked schedule grid"
    );

    Ok(subroutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RETURN_SUFFIX;
    use crate::tree::HtmlTree;

    const NO_STOP: GridRules<'static> = GridRules {
        has_subroutes: false,
        no_stop_sentinel: Some("--"),
    };

    fn grid(rows: &[&[&str]]) -> HtmlTree {
        let rows: String = rows
            .iter()
            .map(|cells| {
                let cells: String = cells
                    .iter()
                    .map(|c| format!(r#"<td><div class="scheduleTimesGrey">{c}</div></td>"#))
                    .collect();
                format!(r#"<tr class="row">{cells}</tr>"#)
            })
            .collect();
        HtmlTree::parse(&format!("<table>{rows}</table>"))
    }

    fn stations(labels: &[&str]) -> Schedule {
        let mut schedule = Schedule::new();
        for l in labels {
            schedule.register((*l).into(), RETURN_SUFFIX);
        }
        schedule
    }

    fn run(
        tree: &HtmlTree,
        rules: GridRules<'_>,
        schedule: &mut Schedule,
    ) -> Result<SubrouteSet, ExtractError> {
        walk(
            tree,
            &Pattern::parse("tr.row").unwrap(),
            &Pattern::parse("div.scheduleTimesGrey").unwrap(),
            rules,
            schedule,
        )
    }

    #[test]
    fn plain_times_align_by_position() {
        let tree = grid(&[&["8:00", "8:15"]]);
        let mut schedule = stations(&["Main St", "Oak Ave"]);

        let subroutes = run(&tree, NO_STOP, &mut schedule).unwrap();

        assert!(subroutes.is_empty());
        assert_eq!(schedule.get("Main St").unwrap(), &[StopEntry::new("8:00", None)]);
        assert_eq!(schedule.get("Oak Ave").unwrap(), &[StopEntry::new("8:15", None)]);
    }

    #[test]
    fn leading_cell_is_route_label() {
        let tree = grid(&[&["B", "8:00", "8:15"], &["BX", "9:00", "9:20"]]);
        let mut schedule = stations(&["Main St", "Oak Ave"]);
        let rules = GridRules {
            has_subroutes: true,
            ..NO_STOP
        };

        let subroutes = run(&tree, rules, &mut schedule).unwrap();

        assert_eq!(subroutes.into_vec(), vec!["B", "BX"]);
        assert_eq!(
            schedule.get("Oak Ave").unwrap(),
            &[
                StopEntry::new("8:15", Some("B".into())),
                StopEntry::new("9:20", Some("BX".into())),
            ]
        );
    }

    #[test]
    fn route_label_resets_per_row() {
        let tree = grid(&[&["B", "8:00"], &["B", "9:00"]]);
        let mut schedule = stations(&["Main St"]);
        let rules = GridRules {
            has_subroutes: true,
            ..NO_STOP
        };

        let subroutes = run(&tree, rules, &mut schedule).unwrap();

        assert_eq!(subroutes.len(), 1);
        assert_eq!(schedule.get("Main St").unwrap().len(), 2);
    }

    #[test]
    fn blank_route_label_is_consumed_but_not_recorded() {
        let tree = grid(&[&["&nbsp;", "8:00"], &["B", "9:00"]]);
        let mut schedule = stations(&["Main St"]);
        let rules = GridRules {
            has_subroutes: true,
            ..NO_STOP
        };

        let subroutes = run(&tree, rules, &mut schedule).unwrap();

        assert_eq!(subroutes.into_vec(), vec!["B"]);
        assert_eq!(
            schedule.get("Main St").unwrap(),
            &[
                StopEntry::new("8:00", None),
                StopEntry::new("9:00", Some("B".into())),
            ]
        );
    }

    #[test]
    fn sentinel_skips_station_but_keeps_alignment() {
        let tree = grid(&[&["8:00", "--", "8:30"]]);
        let mut schedule = stations(&["A", "B", "C"]);

        run(&tree, NO_STOP, &mut schedule).unwrap();

        assert_eq!(schedule.get("A").unwrap().len(), 1);
        assert!(schedule.get("B").unwrap().is_empty());
        assert_eq!(schedule.get("C").unwrap()[0].time, "8:30");
    }

    #[test]
    fn only_sentinel_leaves_station_empty() {
        let tree = grid(&[&["--"]]);
        let mut schedule = stations(&["Main St"]);

        run(&tree, NO_STOP, &mut schedule).unwrap();

        assert_eq!(schedule.get("Main St").unwrap(), &[] as &[StopEntry]);
    }

    #[test]
    fn without_sentinel_every_cell_is_kept() {
        let tree = grid(&[&["--"]]);
        let mut schedule = stations(&["Main St"]);
        let rules = GridRules {
            has_subroutes: false,
            no_stop_sentinel: None,
        };

        run(&tree, rules, &mut schedule).unwrap();

        assert_eq!(schedule.get("Main St").unwrap(), &[StopEntry::new("--", None)]);
    }

    #[test]
    fn row_without_cells_fails() {
        let tree = HtmlTree::parse(
            r#"<table>
                 <tr class="row"><td><div class="scheduleTimesGrey">8:00</div></td></tr>
                 <tr class="row"><td>no times here</td></tr>
               </table>"#,
        );
        let mut schedule = stations(&["A"]);

        let err = run(&tree, NO_STOP, &mut schedule).unwrap_err();
        assert!(matches!(err, ExtractError::NoColumns { row: 1 }));
    }

    #[test]
    fn too_many_cells_fails() {
        let tree = grid(&[&["8:00", "8:10", "8:20"]]);
        let mut schedule = stations(&["A", "B"]);

        let err = run(&tree, NO_STOP, &mut schedule).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::RowOverflow {
                row: 0,
                column: 2,
                stations: 2
            }
        ));
    }

    #[test]
    fn short_row_leaves_trailing_stations_alone() {
        let tree = grid(&[&["8:00"]]);
        let mut schedule = stations(&["A", "B"]);

        run(&tree, NO_STOP, &mut schedule).unwrap();

        assert_eq!(schedule.get("A").unwrap().len(), 1);
        assert!(schedule.get("B").unwrap().is_empty());
    }

    #[test]
    fn no_rows_is_fine() {
        let tree = grid(&[]);
        let mut schedule = stations(&["A"]);

        let subroutes = run(&tree, NO_STOP, &mut schedule).unwrap();
        assert!(subroutes.is_empty());
        assert_eq!(schedule.entry_count(), 0);
    }
}

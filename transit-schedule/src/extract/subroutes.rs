//! Route variant detection from the header row's shape.

use crate::tree::{Pattern, TreeQuery};

use super::config::Variant;

/// Whether data rows start with a route variant label cell.
///
/// Pages with variants (e.g. B/BF/BX) put a label cell at the head of the
/// header row. The basic variant treats any such cell as a signal; the
/// refined one requires the first to carry text, since some pages keep an
/// empty placeholder there.
pub fn has_subroutes<T: TreeQuery>(
    tree: &T,
    header_row: &Pattern,
    label_cells: &Pattern,
    variant: Variant,
) -> bool {
    let mut cells = tree
        .select(header_row)
        .into_iter()
        .flat_map(|row| tree.select_in(row, label_cells));

    match variant {
        Variant::Basic => cells.next().is_some(),
        Variant::Refined => cells.next().is_some_and(|cell| !tree.text(cell).is_empty()),
    }
}

//! Translating element-to-point tables through a commit.

use std::collections::BTreeMap;

use mesh_topo_change::IndexMapping;

/// Renumber a table of element index to added point index.
///
/// An entry survives only if both its element and its point still exist
/// after the commit.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use mesh_topo_change::IndexMapping;
/// use mesh_polysplit::translate_table;
///
/// // Faces 0 and 1 swap places; point 4 was added, point 5 dropped
/// let faces = IndexMapping::from_reverse(vec![Some(1), Some(0)], 2, 2);
/// let reverse = vec![Some(0), Some(1), Some(2), Some(3), Some(4), None];
/// let points = IndexMapping::from_reverse(reverse, 4, 5);
/// let table = BTreeMap::from([(0, 4), (1, 5)]);
///
/// assert_eq!(translate_table(&table, &faces, &points), BTreeMap::from([(1, 4)]));
/// ```
#[must_use]
pub fn translate_table(
    table: &BTreeMap<usize, usize>,
    elements: &IndexMapping,
    points: &IndexMapping,
) -> BTreeMap<usize, usize> {
    table
        .iter()
        .filter_map(|(&element, &point)| {
            Some((elements.new_index(element)?, points.new_index(point)?))
        })
        .collect()
}

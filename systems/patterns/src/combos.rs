//! Three-cell templates and the combination table.

use alchemy_grid_core::{CellCoord, ElementId};

/// Row and column offsets of a template; the second cell is the middle.
type Template = [(i64, i64); 3];

pub(crate) const TEMPLATES: [Template; 5] = [
    // horizontal
    [(0, 0), (0, 1), (0, 2)],
    // vertical
    [(0, 0), (1, 0), (2, 0)],
    // L down
    [(0, 0), (1, 0), (1, 1)],
    // L right
    [(0, 0), (0, 1), (1, 1)],
    // triangle
    [(1, 0), (0, 1), (1, 2)],
];

/// Ingredients sorted by name, with the resulting element and its bonus.
const COMBINATIONS: [([&str; 3], ElementId, u32); 4] = [
    (["earth", "fire", "metal"], ElementId::Forge, 300),
    (["earth", "water", "wood"], ElementId::Forest, 300),
    (["air", "cloud", "metal"], ElementId::Lightning, 400),
    (["earth", "steam", "water"], ElementId::Geyser, 350),
];

/// Resolves a template anchored at `anchor`, `None` when it leaves the grid.
pub(crate) fn place(anchor: CellCoord, template: &Template) -> Option<[CellCoord; 3]> {
    let [a, b, c] = template;
    Some([
        anchor.offset(a.0, a.1)?,
        anchor.offset(b.0, b.1)?,
        anchor.offset(c.0, c.1)?,
    ])
}

/// Combination produced by three elements in any arrangement; the first table entry wins.
pub(crate) fn combine(elements: [ElementId; 3]) -> Option<(ElementId, u32)> {
    let mut names = elements.map(ElementId::as_str);
    names.sort_unstable();
    COMBINATIONS
        .iter()
        .find(|(ingredients, _, _)| *ingredients == names)
        .map(|&(_, result, score)| (result, score))
}

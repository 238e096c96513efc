#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Structural pattern detection over the board.
//!
//! [`scan`] runs the five detectors in a fixed order and applies each match to
//! the grid before the next detector looks at it. Scanning is not idempotent:
//! a second scan of the same board awards lasting structures again, so callers
//! scan once per placement.

mod combos;

use alchemy_grid_core::{Cell, CellCoord, Direction, ElementId, Grid, PatternKind};
use log::debug;

const EARTH_SQUARE_SCORE: u32 = 200;
const METAL_FIRE_PATH_SCORE: u32 = 250;
const WATER_FLOW_SCORE: u32 = 300;
const FIRE_CIRCLE_SCORE: u32 = 400;

/// Minimum number of water cells with two water neighbours forming a circuit.
const WATER_FLOW_MIN_CELLS: usize = 4;
/// Minimum number of fire cells around an empty centre.
const FIRE_CIRCLE_MIN_FIRE: usize = 6;

/// Board change applied by a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternMutation {
    /// Earth cells became stable and gained strength.
    Reinforced,
    /// Metal cells became conductive and gained power.
    Energized,
    /// Three cells fused into a combination element at `cell`.
    Combined {
        /// Combination element written into the middle cell.
        element: ElementId,
        /// Middle cell of the template.
        cell: CellCoord,
    },
    /// Every water cell started flowing and gained power.
    Flowing,
    /// Plasma was placed in the empty centre of a fire ring.
    Ignited {
        /// Centre cell that received the plasma.
        cell: CellCoord,
    },
}

impl PatternMutation {
    /// Element the mutation created, if any.
    #[must_use]
    pub const fn created(&self) -> Option<ElementId> {
        match self {
            Self::Combined { element, .. } => Some(*element),
            Self::Ignited { .. } => Some(ElementId::Plasma),
            Self::Reinforced | Self::Energized | Self::Flowing => None,
        }
    }
}

/// A structural pattern found on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternMatch {
    /// Detector that produced the match.
    pub kind: PatternKind,
    /// Bonus awarded for the match.
    pub score: u32,
    /// Human readable summary.
    pub description: String,
    /// Cells forming the pattern; empty for board-wide patterns.
    pub cells: Vec<CellCoord>,
    /// Change applied to the board.
    pub mutation: PatternMutation,
}

/// Runs every detector over the grid, mutating it as matches are found.
pub fn scan(grid: &mut Grid) -> Vec<PatternMatch> {
    let mut matches = Vec::new();
    for kind in PatternKind::ALL {
        let before = matches.len();
        match kind {
            PatternKind::EarthSquare => earth_square(grid, &mut matches),
            PatternKind::MetalFirePath => metal_fire_path(grid, &mut matches),
            PatternKind::ThreeElementCombo => three_element_combo(grid, &mut matches),
            PatternKind::WaterFlowCircuit => water_flow_circuit(grid, &mut matches),
            PatternKind::FireCircle => fire_circle(grid, &mut matches),
        }
        for found in &matches[before..] {
            debug!("{}: {} (+{})", kind.as_str(), found.description, found.score);
        }
    }
    matches
}

fn earth_square(grid: &mut Grid, out: &mut Vec<PatternMatch>) {
    for anchor in grid.coords().collect::<Vec<_>>() {
        let block = [(0, 0), (0, 1), (1, 0), (1, 1)]
            .map(|(row, column)| anchor.offset(row, column).filter(|cell| grid.contains(*cell)));
        let [Some(a), Some(b), Some(c), Some(d)] = block else {
            continue;
        };
        let cells = vec![a, b, c, d];
        if !cells
            .iter()
            .all(|cell| grid.element_at(*cell) == Some(ElementId::Earth))
        {
            continue;
        }
        for cell in &cells {
            if let Some(earth) = grid.get_mut(*cell) {
                earth.flags.stable = true;
                earth.flags.strength = earth.flags.strength.saturating_add(1);
            }
        }
        out.push(PatternMatch {
            kind: PatternKind::EarthSquare,
            score: EARTH_SQUARE_SCORE,
            description: format!(
                "earth square at ({}, {}) reinforced",
                anchor.row(),
                anchor.column()
            ),
            cells,
            mutation: PatternMutation::Reinforced,
        });
    }
}

fn metal_fire_path(grid: &mut Grid, out: &mut Vec<PatternMatch>) {
    const FORWARD: [ElementId; 3] = [ElementId::Fire, ElementId::Metal, ElementId::Metal];
    const BACKWARD: [ElementId; 3] = [ElementId::Metal, ElementId::Metal, ElementId::Fire];

    for anchor in grid.coords().collect::<Vec<_>>() {
        for direction in [Direction::East, Direction::South] {
            let Some(run) = run_of_three(grid, anchor, direction) else {
                continue;
            };
            let elements = run.map(|cell| grid.element_at(cell));
            if elements != FORWARD.map(Some) && elements != BACKWARD.map(Some) {
                continue;
            }
            for cell in run {
                if let Some(metal) = grid.get_mut(cell).filter(|c| c.element == ElementId::Metal) {
                    metal.flags.conductive = true;
                    metal.flags.power = metal.flags.power.saturating_add(1);
                }
            }
            out.push(PatternMatch {
                kind: PatternKind::MetalFirePath,
                score: METAL_FIRE_PATH_SCORE,
                description: format!(
                    "metal conducts fire from ({}, {})",
                    anchor.row(),
                    anchor.column()
                ),
                cells: run.to_vec(),
                mutation: PatternMutation::Energized,
            });
        }
    }
}

fn run_of_three(grid: &Grid, anchor: CellCoord, direction: Direction) -> Option<[CellCoord; 3]> {
    let second = anchor.step(direction)?;
    let third = second.step(direction)?;
    grid.contains(third).then_some([anchor, second, third])
}

fn three_element_combo(grid: &mut Grid, out: &mut Vec<PatternMatch>) {
    for anchor in grid.coords().collect::<Vec<_>>() {
        for template in &combos::TEMPLATES {
            let Some(cells) = combos::place(anchor, template) else {
                continue;
            };
            let [Some(first), Some(middle), Some(last)] = cells.map(|cell| grid.element_at(cell))
            else {
                continue;
            };
            let Some((result, score)) = combos::combine([first, middle, last]) else {
                continue;
            };

            let [a, centre, c] = cells;
            let _ = grid.clear(a);
            let _ = grid.clear(c);
            let _ = grid.set(centre, Cell::new(result));
            out.push(PatternMatch {
                kind: PatternKind::ThreeElementCombo,
                score,
                description: format!("{first}, {middle} and {last} fused into {result}"),
                cells: cells.to_vec(),
                mutation: PatternMutation::Combined {
                    element: result,
                    cell: centre,
                },
            });
        }
    }
}

fn water_flow_circuit(grid: &mut Grid, out: &mut Vec<PatternMatch>) {
    let water: Vec<CellCoord> = grid
        .occupied()
        .filter(|(_, cell)| cell.element == ElementId::Water)
        .map(|(coord, _)| coord)
        .collect();
    let connected = water
        .iter()
        .filter(|cell| {
            grid.orthogonal_neighbors(**cell)
                .filter(|neighbor| grid.element_at(*neighbor) == Some(ElementId::Water))
                .count()
                >= 2
        })
        .count();
    if connected < WATER_FLOW_MIN_CELLS {
        return;
    }

    for cell in &water {
        if let Some(water) = grid.get_mut(*cell) {
            water.flags.flowing = true;
            water.flags.power = water.flags.power.saturating_add(1);
        }
    }
    out.push(PatternMatch {
        kind: PatternKind::WaterFlowCircuit,
        score: WATER_FLOW_SCORE,
        description: format!("{} water cells flow as a circuit", water.len()),
        cells: Vec::new(),
        mutation: PatternMutation::Flowing,
    });
}

fn fire_circle(grid: &mut Grid, out: &mut Vec<PatternMatch>) {
    let (rows, columns) = (grid.rows(), grid.columns());
    for centre in grid.coords().collect::<Vec<_>>() {
        let inside = centre.row() >= 2
            && centre.column() >= 2
            && centre.row() + 2 < rows
            && centre.column() + 2 < columns;
        if !inside || !grid.is_vacant(centre) {
            continue;
        }
        let ring: Vec<CellCoord> = grid
            .surrounding(centre)
            .filter(|cell| grid.element_at(*cell) == Some(ElementId::Fire))
            .collect();
        if ring.len() < FIRE_CIRCLE_MIN_FIRE {
            continue;
        }

        let _ = grid.set(centre, Cell::new(ElementId::Plasma));
        out.push(PatternMatch {
            kind: PatternKind::FireCircle,
            score: FIRE_CIRCLE_SCORE,
            description: format!(
                "ring of {} fire ignited plasma at ({}, {})",
                ring.len(),
                centre.row(),
                centre.column()
            ),
            cells: ring,
            mutation: PatternMutation::Ignited { cell: centre },
        });
    }
}

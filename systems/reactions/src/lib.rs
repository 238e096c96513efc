#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pair interaction lookup and the cascading chain reaction it drives.

use std::collections::{BTreeSet, HashSet};

use alchemy_grid_core::{
    Catalog, CellCoord, Direction, EffectRecord, ElementId, Grid, InteractionRule, PlacementError,
};
use alchemy_grid_system_effects::{apply_effect, EffectTuning};
use log::debug;
use rand::Rng;

/// Looks up the rule for two adjacent elements regardless of their order.
///
/// The stored order wins when both `(first, second)` and `(second, first)` are
/// defined.
#[must_use]
pub fn resolve(catalog: &Catalog, first: ElementId, second: ElementId) -> Option<&InteractionRule> {
    catalog
        .interaction(first, second)
        .or_else(|| catalog.interaction(second, first))
}

/// Single reaction performed while a chain spread across the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactionRecord {
    /// Element of the cell the chain spread from.
    pub first: ElementId,
    /// Element the neighbour held before reacting.
    pub second: ElementId,
    /// Element written into the neighbour.
    pub result: ElementId,
    /// Score awarded for the reaction.
    pub score: u32,
    /// Coordinate of the neighbour that changed.
    pub position: CellCoord,
}

/// Everything a chain reaction did to the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainReactionResult {
    /// Sum of the scores of every reaction.
    pub total_score: u32,
    /// Elements produced by the chain.
    pub new_elements: BTreeSet<ElementId>,
    /// Reactions in the order they happened.
    pub reactions: Vec<ReactionRecord>,
    /// Cells the traversal entered, in visiting order.
    pub visited: Vec<CellCoord>,
    /// Special effects triggered after the traversal.
    pub effects: Vec<EffectRecord>,
}

struct Frame {
    cell: CellCoord,
    next: usize,
}

/// Spreads reactions outward from `origin` and then runs the placed element's effects.
///
/// The traversal is depth-first in North, East, South, West order. A neighbour
/// that reacts takes the rule's result and the chain continues from it; each
/// cell is entered at most once, so a board of `n` cells performs at most
/// `n - 1` reactions. Once the traversal ends, the special effect of the
/// element at `origin` runs for every visited cell that still holds it.
pub fn process_chain<R>(
    grid: &mut Grid,
    catalog: &Catalog,
    origin: CellCoord,
    tuning: &EffectTuning,
    rng: &mut R,
) -> Result<ChainReactionResult, PlacementError>
where
    R: Rng + ?Sized,
{
    let origin = grid.check(origin)?;
    let mut result = ChainReactionResult::default();
    let Some(placed) = grid.element_at(origin) else {
        return Ok(result);
    };

    let mut seen = HashSet::new();
    let _ = seen.insert(origin);
    result.visited.push(origin);
    let mut stack = vec![Frame {
        cell: origin,
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = Direction::ORTHOGONAL.get(frame.next) else {
            let _ = stack.pop();
            continue;
        };
        frame.next += 1;
        let current = frame.cell;

        let Some(neighbor) = current
            .step(direction)
            .filter(|neighbor| grid.contains(*neighbor) && !seen.contains(neighbor))
        else {
            continue;
        };
        let (Some(first), Some(second)) = (grid.element_at(current), grid.element_at(neighbor))
        else {
            continue;
        };
        let Some(rule) = resolve(catalog, first, second) else {
            continue;
        };

        let reaction = ReactionRecord {
            first,
            second,
            result: rule.result,
            score: rule.score,
            position: neighbor,
        };
        debug!(
            "{first} + {second} -> {} at ({}, {}) for {}",
            reaction.result,
            neighbor.row(),
            neighbor.column(),
            reaction.score
        );
        if let Some(cell) = grid.get_mut(neighbor) {
            cell.element = reaction.result;
        }
        result.total_score = result.total_score.saturating_add(reaction.score);
        let _ = result.new_elements.insert(reaction.result);
        result.reactions.push(reaction);

        let _ = seen.insert(neighbor);
        result.visited.push(neighbor);
        stack.push(Frame {
            cell: neighbor,
            next: 0,
        });
    }

    for &cell in &result.visited {
        if grid.element_at(cell) == Some(placed) {
            let effects = apply_effect(grid, cell, placed, tuning, rng)?;
            result.effects.extend(effects);
        }
    }

    Ok(result)
}

//! Composition of a single placement: write, chain reaction, pattern scan.

use alchemy_grid_core::{Catalog, Cell, CellCoord, ElementId, Grid, PlacementError};
use alchemy_grid_system_effects::EffectTuning;
use alchemy_grid_system_patterns::{scan, PatternMatch};
use alchemy_grid_system_reactions::{process_chain, ChainReactionResult};
use log::info;
use rand::Rng;

/// Everything a placement did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementOutcome {
    /// Reactions and effects spread from the placed cell.
    pub chain: ChainReactionResult,
    /// Patterns found after the chain settled.
    pub patterns: Vec<PatternMatch>,
    /// Chain score plus every pattern bonus.
    pub score: u32,
}

/// Places `element` into the empty `cell` and resolves the consequences.
///
/// Out-of-range and occupied targets are rejected before anything changes.
/// Otherwise the element is written, the chain reaction runs from it, and the
/// board is scanned for patterns exactly once.
pub fn place_element<R>(
    grid: &mut Grid,
    catalog: &Catalog,
    cell: CellCoord,
    element: ElementId,
    tuning: &EffectTuning,
    rng: &mut R,
) -> Result<PlacementOutcome, PlacementError>
where
    R: Rng + ?Sized,
{
    let cell = grid.check(cell)?;
    if !grid.is_vacant(cell) {
        return Err(PlacementError::OccupiedCell { cell });
    }
    let _ = grid.set(cell, Cell::new(element))?;

    let chain = process_chain(grid, catalog, cell, tuning, rng)?;
    let patterns = scan(grid);
    let score = patterns
        .iter()
        .fold(chain.total_score, |total, found| total.saturating_add(found.score));

    info!(
        "placed {element} at ({}, {}): {} reactions, {} patterns, +{score}",
        cell.row(),
        cell.column(),
        chain.reactions.len(),
        patterns.len()
    );
    Ok(PlacementOutcome {
        chain,
        patterns,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn occupied_cells_are_rejected_without_mutation() {
        let mut grid = Grid::from_glyphs("F.").expect("valid board");
        let before = grid.clone();
        let result = place_element(
            &mut grid,
            &Catalog::builtin(),
            CellCoord::new(0, 0),
            ElementId::Water,
            &EffectTuning::default(),
            &mut ChaCha8Rng::seed_from_u64(1),
        );
        assert_eq!(
            result,
            Err(PlacementError::OccupiedCell {
                cell: CellCoord::new(0, 0)
            })
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn score_adds_chain_and_pattern_bonuses() {
        // Earth placed next to water becomes the anchor of an earth square,
        // while the water turns into wood.
        let mut grid = Grid::from_glyphs(
            "EE.
             E.W
             ...",
        )
        .expect("valid board");
        let outcome = place_element(
            &mut grid,
            &Catalog::builtin(),
            CellCoord::new(1, 1),
            ElementId::Earth,
            &EffectTuning::disabled(),
            &mut ChaCha8Rng::seed_from_u64(1),
        )
        .expect("vacant cell");

        assert_eq!(outcome.chain.total_score, 90);
        assert_eq!(outcome.patterns.len(), 1);
        assert_eq!(outcome.score, 290);
        assert_eq!(grid.render(), "EE.\nEEO\n...\n");
    }
}

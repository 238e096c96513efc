#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-element special effects that mutate the board after a placement.
//!
//! Every effect works on a borrowed [`Grid`] and reports each mutation it
//! performs as an [`EffectRecord`]. Probabilistic effects draw from the
//! injected random number generator, one independent draw per check, so a
//! seeded generator reproduces the same board.

use alchemy_grid_core::{Cell, CellCoord, Direction, EffectRecord, ElementId, Grid, PlacementError};
use log::debug;
use rand::{seq::SliceRandom, Rng};

/// Probabilities controlling the random special effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectTuning {
    /// Chance that fire converts each neighbouring wood cell.
    pub fire_spread_chance: f64,
    /// Chance that water spills into each empty side cell.
    pub water_spill_chance: f64,
    /// Chance that watered wood grows into an empty neighbour.
    pub wood_growth_chance: f64,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            fire_spread_chance: 0.2,
            water_spill_chance: 0.1,
            wood_growth_chance: 0.2,
        }
    }
}

impl EffectTuning {
    /// Tuning where every random effect always fires.
    #[must_use]
    pub const fn certain() -> Self {
        Self {
            fire_spread_chance: 1.0,
            water_spill_chance: 1.0,
            wood_growth_chance: 1.0,
        }
    }

    /// Tuning where no random effect ever fires.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            fire_spread_chance: 0.0,
            water_spill_chance: 0.0,
            wood_growth_chance: 0.0,
        }
    }
}

/// Applies the special effect of `element` located at `cell`.
///
/// Nothing happens when the cell no longer holds `element`. Elements without a
/// special effect return an empty record list.
pub fn apply_effect<R>(
    grid: &mut Grid,
    cell: CellCoord,
    element: ElementId,
    tuning: &EffectTuning,
    rng: &mut R,
) -> Result<Vec<EffectRecord>, PlacementError>
where
    R: Rng + ?Sized,
{
    let cell = grid.check(cell)?;
    let mut records = Vec::new();
    if grid.element_at(cell) != Some(element) {
        return Ok(records);
    }

    match element {
        ElementId::Fire => fire(grid, cell, tuning.fire_spread_chance, rng, &mut records),
        ElementId::Water => water(grid, cell, tuning.water_spill_chance, rng, &mut records)?,
        ElementId::Air => air(grid, cell, &mut records)?,
        ElementId::Crystal => crystal(grid, cell, &mut records),
        ElementId::Wood => wood(grid, cell, tuning.wood_growth_chance, rng, &mut records)?,
        _ => {}
    }

    for record in &records {
        debug!("{element} effect at ({}, {}): {record:?}", cell.row(), cell.column());
    }
    Ok(records)
}

fn roll<R>(rng: &mut R, chance: f64) -> bool
where
    R: Rng + ?Sized,
{
    rng.gen::<f64>() < chance
}

fn fire<R>(grid: &mut Grid, cell: CellCoord, chance: f64, rng: &mut R, out: &mut Vec<EffectRecord>)
where
    R: Rng + ?Sized,
{
    let neighbors: Vec<CellCoord> = grid.orthogonal_neighbors(cell).collect();
    for neighbor in neighbors {
        if grid.element_at(neighbor) != Some(ElementId::Wood) || !roll(rng, chance) {
            continue;
        }
        if let Some(target) = grid.get_mut(neighbor) {
            target.element = ElementId::Fire;
            target.flags.spreading = true;
            out.push(EffectRecord::FireSpread {
                from: cell,
                to: neighbor,
            });
        }
    }
}

fn water<R>(
    grid: &mut Grid,
    cell: CellCoord,
    chance: f64,
    rng: &mut R,
    out: &mut Vec<EffectRecord>,
) -> Result<(), PlacementError>
where
    R: Rng + ?Sized,
{
    let mut current = cell;
    if let Some(below) = cell.step(Direction::South).filter(|below| grid.is_vacant(*below)) {
        if grid.move_cell(cell, below)? {
            out.push(EffectRecord::WaterFell {
                from: cell,
                to: below,
            });
            current = below;
        }
    }

    for direction in [Direction::West, Direction::East] {
        let Some(side) = current.step(direction) else {
            continue;
        };
        if !grid.is_vacant(side) || !roll(rng, chance) {
            continue;
        }
        let mut spilled = Cell::new(ElementId::Water);
        spilled.flags.flowing = true;
        let _ = grid.set(side, spilled)?;
        out.push(EffectRecord::WaterSpilled {
            source: current,
            cell: side,
        });
    }
    Ok(())
}

fn air(grid: &mut Grid, cell: CellCoord, out: &mut Vec<EffectRecord>) -> Result<(), PlacementError> {
    let Some(above) = cell.step(Direction::North) else {
        return Ok(());
    };
    let Some(lifted) = grid
        .element_at(above)
        .filter(|element| matches!(element, ElementId::Fire | ElementId::Steam))
    else {
        return Ok(());
    };
    let Some(two_above) = above.step(Direction::North) else {
        return Ok(());
    };
    if grid.is_vacant(two_above) && grid.move_cell(above, two_above)? {
        out.push(EffectRecord::AirLifted {
            element: lifted,
            from: above,
            to: two_above,
        });
    }
    Ok(())
}

fn crystal(grid: &mut Grid, cell: CellCoord, out: &mut Vec<EffectRecord>) {
    let neighbors: Vec<CellCoord> = grid.orthogonal_neighbors(cell).collect();
    for neighbor in neighbors {
        if let Some(target) = grid.get_mut(neighbor) {
            target.flags.amplified = true;
            target.flags.power = target.flags.power.saturating_mul(2);
            out.push(EffectRecord::CrystalAmplified {
                source: cell,
                cell: neighbor,
                power: target.flags.power,
            });
        }
    }
}

fn wood<R>(
    grid: &mut Grid,
    cell: CellCoord,
    chance: f64,
    rng: &mut R,
    out: &mut Vec<EffectRecord>,
) -> Result<(), PlacementError>
where
    R: Rng + ?Sized,
{
    let watered = grid
        .orthogonal_neighbors(cell)
        .any(|neighbor| grid.element_at(neighbor) == Some(ElementId::Water));
    if !watered {
        return Ok(());
    }

    let empty: Vec<CellCoord> = grid
        .orthogonal_neighbors(cell)
        .filter(|neighbor| grid.is_vacant(*neighbor))
        .collect();
    if empty.is_empty() || !roll(rng, chance) {
        return Ok(());
    }

    if let Some(&target) = empty.choose(rng) {
        let mut grown = Cell::new(ElementId::Wood);
        grown.flags.growing = true;
        let _ = grid.set(target, grown)?;
        out.push(EffectRecord::WoodGrew {
            source: cell,
            cell: target,
        });
    }
    Ok(())
}

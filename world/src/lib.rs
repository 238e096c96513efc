#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board session for Alchemy Grid.
//!
//! The world owns the grid, the catalog and the seeded random source, and it
//! changes only through [`apply`]. Every observable change is reported as an
//! [`Event`]; adapters read the rest through [`query`].

mod objectives;
mod placement;

use alchemy_grid_core::{Catalog, Command, Event, Grid, Objective, WELCOME_BANNER};
use alchemy_grid_system_effects::EffectTuning;
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use objectives::{complete_objectives, Progress};

pub use placement::{place_element, PlacementOutcome};

const DEFAULT_SEED: u64 = 0x5eed_a1c3_e3f0_0d17;
const FIRST_LEVEL: u32 = 1;

/// Represents the authoritative Alchemy Grid session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    catalog: Catalog,
    tuning: EffectTuning,
    rng: ChaCha8Rng,
    score: u64,
    level: u32,
    progress: Progress,
    objectives: Vec<Objective>,
}

impl World {
    /// Creates a session with the builtin catalog, default tuning and a fixed seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Catalog::builtin(), EffectTuning::default(), DEFAULT_SEED)
    }

    /// Creates a session with the builtin catalog whose randomness follows `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(Catalog::builtin(), EffectTuning::default(), seed)
    }

    /// Creates a session from an explicit catalog, tuning and seed.
    #[must_use]
    pub fn with_config(catalog: Catalog, tuning: EffectTuning, seed: u64) -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: Grid::default(),
            catalog,
            tuning,
            rng: ChaCha8Rng::seed_from_u64(seed),
            score: 0,
            level: FIRST_LEVEL,
            progress: Progress::new(),
            objectives: Vec::new(),
        }
    }

    fn record_placement(&mut self, outcome: PlacementOutcome, out_events: &mut Vec<Event>) {
        for reaction in &outcome.chain.reactions {
            out_events.push(Event::ReactionOccurred {
                first: reaction.first,
                second: reaction.second,
                result: reaction.result,
                score: reaction.score,
                position: reaction.position,
            });
        }
        for effect in &outcome.chain.effects {
            out_events.push(Event::EffectApplied { effect: *effect });
        }

        let created = outcome
            .chain
            .new_elements
            .iter()
            .copied()
            .chain(outcome.patterns.iter().filter_map(|found| found.mutation.created()));
        for element in created {
            if self.progress.discover(element) {
                info!("discovered {element}");
                out_events.push(Event::ElementDiscovered { element });
            }
        }

        for found in outcome.patterns {
            self.progress.record_structure(found.kind);
            out_events.push(Event::PatternMatched {
                kind: found.kind,
                score: found.score,
                cells: found.cells,
            });
        }

        if outcome.score > 0 {
            self.score = self.score.saturating_add(u64::from(outcome.score));
            out_events.push(Event::ScoreChanged {
                delta: outcome.score,
                score: self.score,
            });
        }
    }

    fn evaluate_objectives(&mut self, out_events: &mut Vec<Event>) {
        complete_objectives(
            &mut self.objectives,
            &self.progress,
            &mut self.score,
            out_events,
        );
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureBoard { rows, columns } => {
            match Grid::new(rows, columns) {
                Ok(grid) => {
                    world.grid = grid;
                    info!("board configured to {rows}x{columns}");
                    out_events.push(Event::BoardConfigured { rows, columns });
                }
                Err(reason) => {
                    warn!("board {rows}x{columns} rejected: {reason}");
                    out_events.push(Event::BoardRejected {
                        rows,
                        columns,
                        reason,
                    });
                }
            }
        }
        Command::SetObjectives { objectives } => {
            world.objectives = objectives;
            world.evaluate_objectives(out_events);
        }
        Command::PlaceElement { cell, element } => {
            let result = place_element(
                &mut world.grid,
                &world.catalog,
                cell,
                element,
                &world.tuning,
                &mut world.rng,
            );
            match result {
                Ok(outcome) => {
                    world.progress.record_placement(element);
                    out_events.push(Event::ElementPlaced { cell, element });
                    world.record_placement(outcome, out_events);
                    world.evaluate_objectives(out_events);
                }
                Err(reason) => {
                    warn!("rejected {element} at ({}, {}): {reason}", cell.row(), cell.column());
                    out_events.push(Event::PlacementRejected {
                        cell,
                        element,
                        reason,
                    });
                }
            }
        }
        Command::RecordPuzzleSolved { puzzle } => {
            world.progress.record_puzzle(puzzle);
            out_events.push(Event::PuzzleRecorded { puzzle });
            world.evaluate_objectives(out_events);
        }
        Command::AdvanceLevel => {
            world.level = world.level.saturating_add(1);
            info!("advanced to level {}", world.level);
            out_events.push(Event::LevelAdvanced { level: world.level });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::collections::BTreeSet;

    use super::World;
    use alchemy_grid_core::{Catalog, ElementId, Grid, Objective};
    use alchemy_grid_system_effects::EffectTuning;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the board.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Running score of the session.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score
    }

    /// Elements known to the player, including the basic ones.
    #[must_use]
    pub fn discovered(world: &World) -> &BTreeSet<ElementId> {
        world.progress.discovered()
    }

    /// Objectives of the current session with their completion state.
    #[must_use]
    pub fn objectives(world: &World) -> &[Objective] {
        &world.objectives
    }

    /// Level the session is on.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.level
    }

    /// Catalog used to resolve reactions.
    #[must_use]
    pub fn catalog(world: &World) -> &Catalog {
        &world.catalog
    }

    /// Effect probabilities used by placements.
    #[must_use]
    pub fn tuning(world: &World) -> &EffectTuning {
        &world.tuning
    }

    /// Number of accepted placements of `element`.
    #[must_use]
    pub fn placements(world: &World, element: ElementId) -> u32 {
        world.progress.placements(element)
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Alchemy Grid engine.
//!
//! This crate defines the element catalog, the board grid and the message
//! surface that connects adapters, the authoritative world and the pure
//! systems. Adapters submit [`Command`] values describing desired mutations,
//! the world executes those commands via its `apply` entry point, and then
//! reports what happened as [`Event`] values. Systems operate on a borrowed
//! [`Grid`] and never keep references across calls.

mod catalog;
mod elements;
mod grid;

use serde::{Deserialize, Serialize};

pub use catalog::{Catalog, CatalogError, InteractionRule};
pub use elements::{ElementId, ElementProperties, ElementTier, UnknownElementName};
pub use grid::{Cell, CellCoord, CellFlags, Direction, Grid, GridError, PlacementError};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Alchemy Grid.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Replaces the board with an empty grid of the provided dimensions.
    ConfigureBoard {
        /// Number of rows in the new board.
        rows: u32,
        /// Number of columns in the new board.
        columns: u32,
    },
    /// Replaces the active objectives.
    SetObjectives {
        /// Objectives to track from now on.
        objectives: Vec<Objective>,
    },
    /// Requests placement of an element into an empty cell.
    PlaceElement {
        /// Target coordinate.
        cell: CellCoord,
        /// Element to place.
        element: ElementId,
    },
    /// Records that a sub-puzzle was solved by the player.
    RecordPuzzleSolved {
        /// Kind of puzzle that was solved.
        puzzle: PuzzleKind,
    },
    /// Moves the session to the next level.
    AdvanceLevel,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that a fresh board was created.
    BoardConfigured {
        /// Number of rows in the board.
        rows: u32,
        /// Number of columns in the board.
        columns: u32,
    },
    /// Reports that a board request was refused and the previous board kept.
    BoardRejected {
        /// Rows provided in the request.
        rows: u32,
        /// Columns provided in the request.
        columns: u32,
        /// Why the dimensions were refused.
        reason: GridError,
    },
    /// Reports that a placement request was rejected and nothing changed.
    PlacementRejected {
        /// Coordinate provided in the request.
        cell: CellCoord,
        /// Element provided in the request.
        element: ElementId,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that an element was written into the board.
    ElementPlaced {
        /// Coordinate that received the element.
        cell: CellCoord,
        /// Element that was placed.
        element: ElementId,
    },
    /// Reports a single pair reaction during a chain.
    ReactionOccurred {
        /// Element of the cell the reaction spread from.
        first: ElementId,
        /// Element of the neighbour before it reacted.
        second: ElementId,
        /// Element written into the neighbour.
        result: ElementId,
        /// Score awarded for the reaction.
        score: u32,
        /// Coordinate of the neighbour that changed.
        position: CellCoord,
    },
    /// Reports a board mutation performed by an element's special effect.
    EffectApplied {
        /// What the effect changed.
        effect: EffectRecord,
    },
    /// Announces an element created for the first time in this session.
    ElementDiscovered {
        /// Newly discovered element.
        element: ElementId,
    },
    /// Reports a structural pattern found after a placement.
    PatternMatched {
        /// Detector that produced the match.
        kind: PatternKind,
        /// Bonus awarded for the match.
        score: u32,
        /// Cells that formed the pattern.
        cells: Vec<CellCoord>,
    },
    /// Reports the running score after it changed.
    ScoreChanged {
        /// Points added by the triggering command.
        delta: u32,
        /// Score after the change.
        score: u64,
    },
    /// Confirms that a sub-puzzle result was recorded.
    PuzzleRecorded {
        /// Kind of puzzle that was solved.
        puzzle: PuzzleKind,
    },
    /// Announces that an objective became satisfied.
    ObjectiveCompleted {
        /// Identifier of the completed objective.
        objective: ObjectiveId,
        /// Points awarded for completing it.
        points: u32,
    },
    /// Announces that the session moved to a new level.
    LevelAdvanced {
        /// Level that became active.
        level: u32,
    },
}

/// Board mutation performed by a special effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectRecord {
    /// Fire converted a neighbouring wood cell.
    FireSpread {
        /// Burning cell.
        from: CellCoord,
        /// Wood cell that caught fire.
        to: CellCoord,
    },
    /// Water fell into the empty cell below it.
    WaterFell {
        /// Cell the water left.
        from: CellCoord,
        /// Cell the water now occupies.
        to: CellCoord,
    },
    /// Water spilled sideways into an empty cell.
    WaterSpilled {
        /// Water cell the spill came from.
        source: CellCoord,
        /// Cell that received the new water.
        cell: CellCoord,
    },
    /// Air lifted the fire or steam above it by one row.
    AirLifted {
        /// Element that was lifted.
        element: ElementId,
        /// Cell the element left.
        from: CellCoord,
        /// Cell the element now occupies.
        to: CellCoord,
    },
    /// Crystal amplified a neighbouring cell.
    CrystalAmplified {
        /// Crystal cell.
        source: CellCoord,
        /// Amplified neighbour.
        cell: CellCoord,
        /// Power of the neighbour after doubling.
        power: u32,
    },
    /// Wood grew into an empty neighbouring cell.
    WoodGrew {
        /// Wood cell that grew.
        source: CellCoord,
        /// Cell that received the new wood.
        cell: CellCoord,
    },
}

/// Structural patterns recognised on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// 2x2 block of earth.
    EarthSquare,
    /// Straight run of fire followed or preceded by two metal.
    MetalFirePath,
    /// Three adjacent elements fused into a combination element.
    ThreeElementCombo,
    /// Connected body of water cells.
    WaterFlowCircuit,
    /// Ring of fire around an empty cell.
    FireCircle,
}

impl PatternKind {
    /// Detectors in the order they run after every placement.
    pub const ALL: [PatternKind; 5] = [
        Self::EarthSquare,
        Self::MetalFirePath,
        Self::ThreeElementCombo,
        Self::WaterFlowCircuit,
        Self::FireCircle,
    ];

    /// Snake-case name used in logs and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EarthSquare => "earth_square",
            Self::MetalFirePath => "metal_fire_path",
            Self::ThreeElementCombo => "three_element_combo",
            Self::WaterFlowCircuit => "water_flow_circuit",
            Self::FireCircle => "fire_circle",
        }
    }
}

/// Sub-puzzles that gate level progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleKind {
    /// Letter-guessing puzzle.
    Word,
    /// Latin-square element puzzle.
    Logic,
}

/// Unique identifier assigned to an objective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectiveId(u32);

impl ObjectiveId {
    /// Creates a new objective identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Goal the player works towards during a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    /// Identifier reported when the objective completes.
    pub id: ObjectiveId,
    /// Condition that completes the objective.
    pub kind: ObjectiveKind,
    /// Whether the objective has been satisfied.
    pub completed: bool,
    /// Points awarded once on completion.
    pub points: u32,
}

impl Objective {
    /// Creates an incomplete objective.
    #[must_use]
    pub const fn new(id: ObjectiveId, kind: ObjectiveKind, points: u32) -> Self {
        Self {
            id,
            kind,
            completed: false,
            points,
        }
    }
}

/// Conditions an objective can track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectiveKind {
    /// Create a derived element at least once.
    CreateElement {
        /// Element that must be discovered.
        element: ElementId,
    },
    /// Create a combination element at least once.
    CreateCombination {
        /// Combination element that must be discovered.
        element: ElementId,
    },
    /// Place an element a number of times.
    PlaceElement {
        /// Element that must be placed.
        element: ElementId,
        /// Required number of placements.
        count: u32,
    },
    /// Build a structural pattern at least once.
    BuildStructure {
        /// Pattern that must be matched.
        pattern: PatternKind,
    },
    /// Solve a sub-puzzle.
    SolvePuzzle {
        /// Kind of puzzle that must be solved.
        puzzle: PuzzleKind,
    },
    /// Reach a score threshold.
    ReachScore {
        /// Minimum score.
        score: u64,
    },
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Latin-square element puzzles with box constraints.
//!
//! A board of side 4, 6 or 9 must hold every puzzle element exactly once in
//! each row, column and box. Solutions come from a randomized backtracking
//! search, and puzzles are carved out of a solution by emptying cells.

mod board;

use std::collections::HashSet;

use alchemy_grid_core::{CellCoord, ElementId};
use log::{info, warn};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

pub use board::{BoxShape, LogicGrid};

/// Upper bound on candidate trials spent by a single solution search.
pub const SEARCH_BUDGET: u64 = 1_000_000;

/// Largest fraction of cells a puzzle may have emptied.
pub const MAX_DIFFICULTY: f64 = 0.7;

/// Reasons a logic puzzle operation may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    /// The board, element list or size is inconsistent.
    #[error("malformed puzzle: {0}")]
    MalformedPuzzleState(String),
    /// The solution search gave up.
    #[error("no {size}x{size} solution found after {trials} candidate trials")]
    GenerationFailure {
        /// Side length that was requested.
        size: usize,
        /// Candidate trials spent before giving up.
        trials: u64,
    },
    /// The coordinate lies outside the board.
    #[error("cell ({row}, {column}) is outside the {size}x{size} board", row = .cell.row(), column = .cell.column())]
    InvalidCoordinate {
        /// Requested coordinate.
        cell: CellCoord,
        /// Side length of the board.
        size: usize,
    },
    /// The coordinate holds one of the puzzle's given elements.
    #[error("cell ({row}, {column}) is given and cannot change", row = .cell.row(), column = .cell.column())]
    GivenCell {
        /// Requested coordinate.
        cell: CellCoord,
    },
    /// The element is not one of the puzzle's elements.
    #[error("{0} is not part of this puzzle")]
    UnknownElement(ElementId),
}

/// Fraction of cells emptied for a level.
#[must_use]
pub fn difficulty_for_level(level: u32) -> f64 {
    (0.4 + f64::from(level) * 0.03).min(MAX_DIFFICULTY)
}

/// Generates a complete board where each element occurs once per row, column and box.
///
/// Cells are filled in row-major order, trying the elements in a freshly
/// shuffled order for every cell and backing up when a cell has no candidate
/// left. The search fails once [`SEARCH_BUDGET`] candidates were tried.
pub fn generate_solution<R>(
    size: usize,
    elements: &[ElementId],
    rng: &mut R,
) -> Result<LogicGrid, PuzzleError>
where
    R: Rng + ?Sized,
{
    let mut grid = LogicGrid::new(size)?;
    check_elements(size, elements)?;

    let cell_count = size * size;
    let mut trials = 0_u64;
    let mut pending: Vec<Vec<ElementId>> = vec![shuffled(elements, rng)];

    while !pending.is_empty() {
        let index = pending.len() - 1;
        let cell = grid.coord(index);
        let _ = grid.set(cell, None)?;

        let mut placed = false;
        while let Some(candidate) = pending[index].pop() {
            trials += 1;
            if trials > SEARCH_BUDGET {
                warn!("logic solution search for size {size} ran out of budget");
                return Err(PuzzleError::GenerationFailure { size, trials });
            }
            if is_valid_placement(&grid, cell, candidate)? {
                let _ = grid.set(cell, Some(candidate))?;
                placed = true;
                break;
            }
        }

        if !placed {
            let _ = pending.pop();
        } else if index + 1 == cell_count {
            return Ok(grid);
        } else {
            pending.push(shuffled(elements, rng));
        }
    }

    warn!("logic solution search for size {size} exhausted every candidate");
    Err(PuzzleError::GenerationFailure { size, trials })
}

fn shuffled<R>(elements: &[ElementId], rng: &mut R) -> Vec<ElementId>
where
    R: Rng + ?Sized,
{
    let mut order = elements.to_vec();
    order.shuffle(rng);
    order
}

fn check_elements(size: usize, elements: &[ElementId]) -> Result<(), PuzzleError> {
    if elements.len() != size {
        return Err(PuzzleError::MalformedPuzzleState(format!(
            "{} elements supplied for a board of size {size}",
            elements.len()
        )));
    }
    let distinct: HashSet<ElementId> = elements.iter().copied().collect();
    if distinct.len() != elements.len() {
        return Err(PuzzleError::MalformedPuzzleState(String::from(
            "puzzle elements must be distinct",
        )));
    }
    Ok(())
}

/// Empties `floor(size² × difficulty)` uniformly chosen filled cells of a copy of `solution`.
///
/// The difficulty is clamped to `[0, MAX_DIFFICULTY]`.
pub fn carve_puzzle<R>(solution: &LogicGrid, difficulty: f64, rng: &mut R) -> LogicGrid
where
    R: Rng + ?Sized,
{
    let difficulty = if difficulty.is_nan() {
        0.0
    } else {
        difficulty.clamp(0.0, MAX_DIFFICULTY)
    };
    let cell_count = solution.size() * solution.size();
    let remove = (cell_count as f64 * difficulty).floor() as usize;

    let mut filled: Vec<CellCoord> = solution
        .coords()
        .filter(|cell| matches!(solution.get(*cell), Ok(Some(_))))
        .collect();
    filled.shuffle(rng);

    let mut puzzle = solution.clone();
    for cell in filled.into_iter().take(remove) {
        let _ = puzzle.set(cell, None);
    }
    puzzle
}

/// Reports whether `element` is absent from every other cell of `cell`'s row, column and box.
pub fn is_valid_placement(
    grid: &LogicGrid,
    cell: CellCoord,
    element: ElementId,
) -> Result<bool, PuzzleError> {
    Ok(!grid.peers(cell)?.contains(&Some(element)))
}

/// Reports whether the board is full, free of duplicates and, when
/// `valid_elements` is given, uses only those elements.
pub fn is_solved(grid: &LogicGrid, valid_elements: Option<&[ElementId]>) -> Result<bool, PuzzleError> {
    if let Some(valid) = valid_elements {
        check_elements(grid.size(), valid)?;
    }
    if grid.empty_count() > 0 {
        return Ok(false);
    }
    if let Some(valid) = valid_elements {
        if grid.cells().iter().flatten().any(|e| !valid.contains(e)) {
            return Ok(false);
        }
    }
    Ok(find_conflicts(grid).is_empty())
}

/// Every filled cell whose element occurs again in its row, column or box, row-major.
#[must_use]
pub fn find_conflicts(grid: &LogicGrid) -> Vec<CellCoord> {
    grid.coords()
        .filter(|cell| match (grid.get(*cell), grid.peers(*cell)) {
            (Ok(Some(element)), Ok(peers)) => peers.contains(&Some(element)),
            _ => false,
        })
        .collect()
}

/// How much a hint reveals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintTier {
    /// Points at the cell to work on.
    Location,
    /// Also names the element that belongs there.
    Element,
    /// Writes the element into the board.
    Fill,
}

/// Hint produced for the player's board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicHint {
    /// Cell the hint is about.
    pub cell: CellCoord,
    /// Element that belongs in the cell, from [`HintTier::Element`] on.
    pub element: Option<ElementId>,
    /// Whether the hint wrote the element into the board.
    pub filled: bool,
}

/// A generated puzzle together with the player's working board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLogicPuzzle")]
pub struct LogicPuzzle {
    solution: LogicGrid,
    puzzle: LogicGrid,
    board: LogicGrid,
    valid_elements: Vec<ElementId>,
    difficulty: f64,
}

#[derive(Deserialize)]
struct RawLogicPuzzle {
    solution: LogicGrid,
    puzzle: LogicGrid,
    board: LogicGrid,
    valid_elements: Vec<ElementId>,
    difficulty: f64,
}

impl TryFrom<RawLogicPuzzle> for LogicPuzzle {
    type Error = PuzzleError;

    fn try_from(raw: RawLogicPuzzle) -> Result<Self, Self::Error> {
        let size = raw.solution.size();
        if raw.puzzle.size() != size || raw.board.size() != size {
            return Err(PuzzleError::MalformedPuzzleState(format!(
                "boards of size {size}, {} and {} do not match",
                raw.puzzle.size(),
                raw.board.size()
            )));
        }
        check_elements(size, &raw.valid_elements)?;
        if raw.solution.empty_count() > 0 {
            return Err(PuzzleError::MalformedPuzzleState(String::from(
                "solution has empty cells",
            )));
        }
        if !(0.0..=MAX_DIFFICULTY).contains(&raw.difficulty) {
            return Err(PuzzleError::MalformedPuzzleState(format!(
                "difficulty {} outside [0, {MAX_DIFFICULTY}]",
                raw.difficulty
            )));
        }
        Ok(Self {
            solution: raw.solution,
            puzzle: raw.puzzle,
            board: raw.board,
            valid_elements: raw.valid_elements,
            difficulty: raw.difficulty,
        })
    }
}

impl LogicPuzzle {
    /// Generates a puzzle using `elements`; the board side equals the number of elements.
    pub fn generate<R>(level: u32, elements: &[ElementId], rng: &mut R) -> Result<Self, PuzzleError>
    where
        R: Rng + ?Sized,
    {
        let size = elements.len();
        let solution = generate_solution(size, elements, rng)?;
        let difficulty = difficulty_for_level(level);
        let puzzle = carve_puzzle(&solution, difficulty, rng);
        info!(
            "logic puzzle for level {level}: {size}x{size}, {} of {} cells empty",
            puzzle.empty_count(),
            size * size
        );
        Ok(Self {
            board: puzzle.clone(),
            solution,
            puzzle,
            valid_elements: elements.to_vec(),
            difficulty,
        })
    }

    /// Side length of the board.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.solution.size()
    }

    /// Complete solution.
    #[must_use]
    pub const fn solution(&self) -> &LogicGrid {
        &self.solution
    }

    /// Carved puzzle as first presented; its filled cells are the givens.
    #[must_use]
    pub const fn puzzle(&self) -> &LogicGrid {
        &self.puzzle
    }

    /// Player's working board.
    #[must_use]
    pub const fn board(&self) -> &LogicGrid {
        &self.board
    }

    /// Elements the puzzle uses.
    #[must_use]
    pub fn valid_elements(&self) -> &[ElementId] {
        &self.valid_elements
    }

    /// Fraction of cells that were emptied.
    #[must_use]
    pub const fn difficulty(&self) -> f64 {
        self.difficulty
    }

    /// Writes or clears a non-given cell of the working board.
    pub fn place(&mut self, cell: CellCoord, element: Option<ElementId>) -> Result<(), PuzzleError> {
        if self.puzzle.get(cell)?.is_some() {
            return Err(PuzzleError::GivenCell { cell });
        }
        if let Some(element) = element.filter(|e| !self.valid_elements.contains(e)) {
            return Err(PuzzleError::UnknownElement(element));
        }
        let _ = self.board.set(cell, element)?;
        Ok(())
    }

    /// Cells of the working board that clash with another cell.
    #[must_use]
    pub fn conflicts(&self) -> Vec<CellCoord> {
        find_conflicts(&self.board)
    }

    /// Reports whether the working board is a valid solution.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        is_solved(&self.board, Some(self.valid_elements.as_slice())).unwrap_or(false)
    }

    /// Hint for the first wrong cell of the working board, else its first empty cell.
    ///
    /// Returns `None` when the board matches the solution.
    pub fn hint(&mut self, tier: HintTier) -> Option<LogicHint> {
        let cells = self.board.cells();
        let expected = self.solution.cells();
        let wrong = cells
            .iter()
            .zip(expected)
            .position(|(have, want)| have.is_some() && have != want);
        let index = wrong.or_else(|| cells.iter().position(Option::is_none))?;

        let cell = self.board.coord(index);
        let answer = expected[index];
        let mut hint = LogicHint {
            cell,
            element: None,
            filled: false,
        };
        match tier {
            HintTier::Location => {}
            HintTier::Element => hint.element = answer,
            HintTier::Fill => {
                hint.element = answer;
                hint.filled = self.board.set(cell, answer).is_ok();
            }
        }
        Some(hint)
    }
}

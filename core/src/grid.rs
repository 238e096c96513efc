//! Board grid, cells and coordinates.

use serde::{Deserialize, Serialize};

use crate::elements::ElementId;

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell. Rows grow downwards.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns the neighbouring coordinate in the provided direction.
    ///
    /// Stepping north of row zero or west of column zero yields `None`; the
    /// result is not checked against any grid bounds.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        self.offset(direction.row_delta(), direction.column_delta())
    }

    /// Returns the coordinate shifted by the provided deltas, if non-negative.
    #[must_use]
    pub fn offset(self, row_delta: i64, column_delta: i64) -> Option<CellCoord> {
        let row = i64::from(self.row).checked_add(row_delta)?;
        let column = i64::from(self.column).checked_add(column_delta)?;
        Some(CellCoord::new(
            u32::try_from(row).ok()?,
            u32::try_from(column).ok()?,
        ))
    }
}

/// Cardinal directions, listed in the order every system visits neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards decreasing row indices.
    North,
    /// Towards increasing column indices.
    East,
    /// Towards increasing row indices.
    South,
    /// Towards decreasing column indices.
    West,
}

impl Direction {
    /// Orthogonal directions in visiting order.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    const fn row_delta(self) -> i64 {
        match self {
            Self::North => -1,
            Self::South => 1,
            Self::East | Self::West => 0,
        }
    }

    const fn column_delta(self) -> i64 {
        match self {
            Self::East => 1,
            Self::West => -1,
            Self::North | Self::South => 0,
        }
    }
}

/// Effect annotations accumulated by a cell while it stays on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellFlags {
    /// Boosted by an adjacent crystal.
    pub amplified: bool,
    /// Energy multiplier, starts at one.
    pub power: u32,
    /// Part of a completed earth square.
    pub stable: bool,
    /// Number of earth squares the cell has been part of.
    pub strength: u32,
    /// Part of a metal conduction path.
    pub conductive: bool,
    /// Water that spilled sideways or joined a circuit.
    pub flowing: bool,
    /// Wood that grew next to water.
    pub growing: bool,
    /// Fire that spread onto wood.
    pub spreading: bool,
}

impl Default for CellFlags {
    fn default() -> Self {
        Self {
            amplified: false,
            power: 1,
            stable: false,
            strength: 0,
            conductive: false,
            flowing: false,
            growing: false,
            spreading: false,
        }
    }
}

/// Occupied grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Element held by the cell.
    pub element: ElementId,
    /// Annotations added by effects and patterns.
    pub flags: CellFlags,
}

impl Cell {
    /// Creates a cell with neutral flags.
    #[must_use]
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            flags: CellFlags::default(),
        }
    }
}

/// Reasons a grid access or placement request may be rejected.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum PlacementError {
    /// The coordinate lies outside the grid.
    #[error("cell ({row}, {column}) is outside the {rows}x{columns} grid", row = .cell.row(), column = .cell.column())]
    InvalidCoordinate {
        /// Requested coordinate.
        cell: CellCoord,
        /// Number of rows in the grid.
        rows: u32,
        /// Number of columns in the grid.
        columns: u32,
    },
    /// The target cell already holds an element.
    #[error("cell ({row}, {column}) is already occupied", row = .cell.row(), column = .cell.column())]
    OccupiedCell {
        /// Requested coordinate.
        cell: CellCoord,
    },
}

/// Reasons a grid cannot be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum GridError {
    /// No rows or no columns were supplied.
    #[error("grid must have at least one row and one column")]
    Empty,
    /// A side exceeds [`Grid::MAX_SIDE`].
    #[error("grid of {rows}x{columns} exceeds the {max}x{max} limit", max = Grid::MAX_SIDE)]
    TooLarge {
        /// Requested rows.
        rows: u32,
        /// Requested columns.
        columns: u32,
    },
    /// Stored cells do not cover the declared dimensions.
    #[error("grid declares {expected} cells but holds {found}")]
    CellCount {
        /// `rows * columns`.
        expected: usize,
        /// Cells actually present.
        found: usize,
    },
    /// A row has a different length from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A character does not name an element.
    #[error("unknown glyph '{glyph}' at row {row}, column {column}")]
    UnknownGlyph {
        /// Row of the glyph.
        row: usize,
        /// Column of the glyph.
        column: usize,
        /// The unrecognised character.
        glyph: char,
    },
}

/// Dense rectangular board stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<Option<Cell>>,
}

/// Wire shape of [`Grid`], checked before it becomes one.
#[derive(Deserialize)]
struct RawGrid {
    rows: u32,
    columns: u32,
    cells: Vec<Option<Cell>>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let expected = Self::capacity(raw.rows, raw.columns)?;
        if raw.cells.len() != expected {
            return Err(GridError::CellCount {
                expected,
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            rows: raw.rows,
            columns: raw.columns,
            cells: raw.cells,
        })
    }
}

impl Default for Grid {
    /// An empty [`Grid::DEFAULT_SIDE`] square board.
    fn default() -> Self {
        let side = Self::DEFAULT_SIDE as usize;
        Self {
            rows: Self::DEFAULT_SIDE,
            columns: Self::DEFAULT_SIDE,
            cells: vec![None; side * side],
        }
    }
}

impl Grid {
    /// Side length of a fresh session's board.
    pub const DEFAULT_SIDE: u32 = 8;

    /// Largest accepted number of rows or columns.
    pub const MAX_SIDE: u32 = 1024;

    /// Creates an empty grid with the provided dimensions.
    pub fn new(rows: u32, columns: u32) -> Result<Self, GridError> {
        let capacity = Self::capacity(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            cells: vec![None; capacity],
        })
    }

    fn capacity(rows: u32, columns: u32) -> Result<usize, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::Empty);
        }
        if rows > Self::MAX_SIDE || columns > Self::MAX_SIDE {
            return Err(GridError::TooLarge { rows, columns });
        }
        usize::try_from(u64::from(rows) * u64::from(columns))
            .map_err(|_| GridError::TooLarge { rows, columns })
    }

    /// Builds a grid from rows of optional elements.
    pub fn from_rows(rows: &[Vec<Option<ElementId>>]) -> Result<Self, GridError> {
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(GridError::Empty);
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(GridError::Ragged {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }

        let too_large = GridError::TooLarge {
            rows: u32::try_from(rows.len()).unwrap_or(u32::MAX),
            columns: u32::try_from(expected).unwrap_or(u32::MAX),
        };
        let row_count = u32::try_from(rows.len()).map_err(|_| too_large)?;
        let column_count = u32::try_from(expected).map_err(|_| too_large)?;
        let _ = Self::capacity(row_count, column_count)?;
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|element| element.map(Cell::new)))
            .collect();
        Ok(Self {
            rows: row_count,
            columns: column_count,
            cells,
        })
    }

    /// Builds a grid from the text produced by [`Grid::render`].
    ///
    /// Blank lines and surrounding whitespace are ignored; `.` marks an empty cell.
    pub fn from_glyphs(text: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for (row, line) in text.lines().map(str::trim).filter(|line| !line.is_empty()).enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (column, glyph) in line.chars().enumerate() {
                if glyph == '.' {
                    cells.push(None);
                    continue;
                }
                let element = ElementId::from_glyph(glyph)
                    .ok_or(GridError::UnknownGlyph { row, column, glyph })?;
                cells.push(Some(element));
            }
            rows.push(cells);
        }
        Self::from_rows(&rows)
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the grid has no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Returns the coordinate when it lies inside the grid.
    pub fn check(&self, cell: CellCoord) -> Result<CellCoord, PlacementError> {
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(PlacementError::InvalidCoordinate {
                cell,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    /// Returns the occupied cell at the coordinate, if any.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<&Cell> {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    /// Returns mutable access to the occupied cell at the coordinate, if any.
    pub fn get_mut(&mut self, cell: CellCoord) -> Option<&mut Cell> {
        let index = self.index(cell)?;
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    /// Element held at the coordinate, if any.
    #[must_use]
    pub fn element_at(&self, cell: CellCoord) -> Option<ElementId> {
        self.get(cell).map(|cell| cell.element)
    }

    /// Reports whether the coordinate is inside the grid and empty.
    #[must_use]
    pub fn is_vacant(&self, cell: CellCoord) -> bool {
        self.contains(cell) && self.get(cell).is_none()
    }

    /// Stores a cell, returning whatever occupied the coordinate before.
    pub fn set(&mut self, cell: CellCoord, value: Cell) -> Result<Option<Cell>, PlacementError> {
        let index = self.slot(cell)?;
        Ok(self.cells[index].replace(value))
    }

    /// Empties the coordinate, returning the removed cell.
    pub fn clear(&mut self, cell: CellCoord) -> Result<Option<Cell>, PlacementError> {
        let index = self.slot(cell)?;
        Ok(self.cells[index].take())
    }

    /// Moves the cell at `from` into the empty coordinate `to`, keeping its flags.
    ///
    /// Returns `false` without touching the grid when `from` is empty or `to`
    /// is occupied.
    pub fn move_cell(&mut self, from: CellCoord, to: CellCoord) -> Result<bool, PlacementError> {
        let source = self.slot(from)?;
        let target = self.slot(to)?;
        if self.cells[source].is_none() || self.cells[target].is_some() {
            return Ok(false);
        }
        self.cells[target] = self.cells[source].take();
        Ok(true)
    }

    /// In-bounds orthogonal neighbours in North, East, South, West order.
    pub fn orthogonal_neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        Direction::ORTHOGONAL
            .into_iter()
            .filter_map(move |direction| cell.step(direction))
            .filter(move |neighbor| self.contains(*neighbor))
    }

    /// In-bounds cells of the surrounding 3x3 block, centre excluded, row-major.
    pub fn surrounding(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        (-1_i64..=1)
            .flat_map(|row| (-1_i64..=1).map(move |column| (row, column)))
            .filter(|&(row, column)| row != 0 || column != 0)
            .filter_map(move |(row, column)| cell.offset(row, column))
            .filter(move |neighbor| self.contains(*neighbor))
    }

    /// Iterates every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(row, column)))
    }

    /// Iterates occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (CellCoord, &Cell)> + '_ {
        self.coords()
            .filter_map(move |coord| self.get(coord).map(|cell| (coord, cell)))
    }

    /// Counts cells holding the provided element.
    #[must_use]
    pub fn count(&self, element: ElementId) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.element == element)
            .count()
    }

    /// Renders the grid using one glyph per cell and `.` for empty cells.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rows as usize);
        for row in 0..self.rows {
            for column in 0..self.columns {
                let glyph = self
                    .element_at(CellCoord::new(row, column))
                    .map_or('.', ElementId::glyph);
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }

    fn slot(&self, cell: CellCoord) -> Result<usize, PlacementError> {
        let cell = self.check(cell)?;
        self.index(cell).ok_or(PlacementError::InvalidCoordinate {
            cell,
            rows: self.rows,
            columns: self.columns,
        })
    }

    /// Row-major index of an in-bounds coordinate; never past the end of `cells`.
    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column).filter(|index| *index < self.cells.len())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stops_at_zero_edges() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::North), None);
        assert_eq!(corner.step(Direction::West), None);
        assert_eq!(corner.step(Direction::South), Some(CellCoord::new(1, 0)));
        assert_eq!(corner.step(Direction::East), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn neighbours_follow_north_east_south_west() {
        let grid = Grid::new(3, 3).expect("valid dimensions");
        let neighbours: Vec<_> = grid.orthogonal_neighbors(CellCoord::new(1, 1)).collect();
        assert_eq!(
            neighbours,
            vec![
                CellCoord::new(0, 1),
                CellCoord::new(1, 2),
                CellCoord::new(2, 1),
                CellCoord::new(1, 0),
            ]
        );
        assert_eq!(grid.orthogonal_neighbors(CellCoord::new(2, 2)).count(), 2);
    }

    #[test]
    fn surrounding_skips_centre_and_clips_edges() {
        let grid = Grid::new(3, 3).expect("valid dimensions");
        assert_eq!(grid.surrounding(CellCoord::new(1, 1)).count(), 8);
        assert_eq!(grid.surrounding(CellCoord::new(0, 0)).count(), 3);
    }

    #[test]
    fn out_of_range_writes_are_rejected() {
        let mut grid = Grid::new(2, 3).expect("valid dimensions");
        let error = grid
            .set(CellCoord::new(2, 0), Cell::new(ElementId::Fire))
            .unwrap_err();
        assert_eq!(
            error,
            PlacementError::InvalidCoordinate {
                cell: CellCoord::new(2, 0),
                rows: 2,
                columns: 3,
            }
        );
        assert_eq!(grid.occupied().count(), 0, "rejected write must not mutate");
    }

    #[test]
    fn move_cell_keeps_flags_and_refuses_occupied_targets() {
        let mut grid = Grid::new(2, 1).expect("valid dimensions");
        let mut water = Cell::new(ElementId::Water);
        water.flags.power = 4;
        let _ = grid.set(CellCoord::new(0, 0), water).expect("in range");

        assert_eq!(grid.move_cell(CellCoord::new(0, 0), CellCoord::new(1, 0)), Ok(true));
        assert_eq!(grid.get(CellCoord::new(1, 0)), Some(&water));
        assert!(grid.is_vacant(CellCoord::new(0, 0)));

        let _ = grid
            .set(CellCoord::new(0, 0), Cell::new(ElementId::Earth))
            .expect("in range");
        assert_eq!(grid.move_cell(CellCoord::new(0, 0), CellCoord::new(1, 0)), Ok(false));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows = vec![vec![None, Some(ElementId::Fire)], vec![None]];
        assert_eq!(
            Grid::from_rows(&rows),
            Err(GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1,
            })
        );
        assert_eq!(Grid::from_rows(&[]), Err(GridError::Empty));
    }

    #[test]
    fn render_uses_glyphs() {
        let rows = vec![
            vec![Some(ElementId::Fire), None],
            vec![None, Some(ElementId::Water)],
        ];
        let grid = Grid::from_rows(&rows).expect("rectangular");
        assert_eq!(grid.render(), "F.\n.W\n");
        assert_eq!(grid.count(ElementId::Water), 1);
        assert_eq!(Grid::from_glyphs(&grid.render()), Ok(grid));
    }

    #[test]
    fn from_glyphs_reports_unknown_characters() {
        assert_eq!(
            Grid::from_glyphs("F.\n.?"),
            Err(GridError::UnknownGlyph {
                row: 1,
                column: 1,
                glyph: '?',
            })
        );
    }

    #[test]
    fn grid_round_trips_through_bincode() {
        let rows = vec![vec![Some(ElementId::Earth), None, Some(ElementId::Metal)]];
        let grid = Grid::from_rows(&rows).expect("rectangular");
        let bytes = bincode::serialize(&grid).expect("serialize");
        let restored: Grid = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, grid);
    }

    #[test]
    fn new_rejects_empty_and_oversized_boards() {
        assert_eq!(Grid::new(0, 4), Err(GridError::Empty));
        assert_eq!(
            Grid::new(Grid::MAX_SIDE + 1, 1),
            Err(GridError::TooLarge {
                rows: Grid::MAX_SIDE + 1,
                columns: 1,
            })
        );
        assert_eq!(
            Grid::new(u32::MAX, u32::MAX),
            Err(GridError::TooLarge {
                rows: u32::MAX,
                columns: u32::MAX,
            })
        );
        let widest = Grid::new(1, Grid::MAX_SIDE).expect("at the limit");
        assert_eq!(widest.len(), Grid::MAX_SIDE as usize);
    }

    #[test]
    fn decoding_rejects_cells_that_do_not_cover_the_board() {
        #[derive(Serialize)]
        struct Forged {
            rows: u32,
            columns: u32,
            cells: Vec<Option<Cell>>,
        }

        let short = bincode::serialize(&Forged {
            rows: 3,
            columns: 3,
            cells: Vec::new(),
        })
        .expect("serialize");
        assert!(bincode::deserialize::<Grid>(&short).is_err());

        let oversized = bincode::serialize(&Forged {
            rows: u32::MAX,
            columns: u32::MAX,
            cells: Vec::new(),
        })
        .expect("serialize");
        assert!(bincode::deserialize::<Grid>(&oversized).is_err());

        let exact = bincode::serialize(&Forged {
            rows: 1,
            columns: 2,
            cells: vec![Some(Cell::new(ElementId::Fire)), None],
        })
        .expect("serialize");
        let grid: Grid = bincode::deserialize(&exact).expect("consistent grid");
        assert_eq!(grid.element_at(CellCoord::new(0, 0)), Some(ElementId::Fire));
        assert!(grid.is_vacant(CellCoord::new(0, 1)));
    }

    #[test]
    fn default_board_is_an_empty_square() {
        let grid = Grid::default();
        assert_eq!((grid.rows(), grid.columns()), (Grid::DEFAULT_SIDE, Grid::DEFAULT_SIDE));
        assert_eq!(grid.occupied().count(), 0);
    }
}

//! Square puzzle boards and their box layout.

use alchemy_grid_core::{CellCoord, ElementId};
use serde::{Deserialize, Serialize};

use crate::PuzzleError;

/// Height and width of the boxes a board is divided into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxShape {
    height: usize,
    width: usize,
}

impl BoxShape {
    /// Box layout for a board side length of 4, 6 or 9.
    pub fn for_size(size: usize) -> Result<Self, PuzzleError> {
        let (height, width) = match size {
            4 => (2, 2),
            6 => (2, 3),
            9 => (3, 3),
            _ => {
                return Err(PuzzleError::MalformedPuzzleState(format!(
                    "unsupported board size {size}"
                )))
            }
        };
        Ok(Self { height, width })
    }

    /// Rows per box.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Columns per box.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }
}

/// Square board of optional elements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLogicGrid")]
pub struct LogicGrid {
    size: usize,
    shape: BoxShape,
    cells: Vec<Option<ElementId>>,
}

#[derive(Deserialize)]
struct RawLogicGrid {
    size: usize,
    shape: BoxShape,
    cells: Vec<Option<ElementId>>,
}

impl TryFrom<RawLogicGrid> for LogicGrid {
    type Error = PuzzleError;

    fn try_from(raw: RawLogicGrid) -> Result<Self, Self::Error> {
        let mut grid = Self::new(raw.size)?;
        if raw.shape != grid.shape {
            return Err(PuzzleError::MalformedPuzzleState(format!(
                "{}x{} boxes do not tile a board of size {}",
                raw.shape.height, raw.shape.width, raw.size
            )));
        }
        if raw.cells.len() != grid.cells.len() {
            return Err(PuzzleError::MalformedPuzzleState(format!(
                "board of size {} holds {} cells, expected {}",
                raw.size,
                raw.cells.len(),
                grid.cells.len()
            )));
        }
        grid.cells = raw.cells;
        Ok(grid)
    }
}

impl LogicGrid {
    /// Creates an empty board.
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        let shape = BoxShape::for_size(size)?;
        Ok(Self {
            size,
            shape,
            cells: vec![None; size * size],
        })
    }

    /// Builds a board from row data; the rows must form a square of a supported size.
    pub fn from_rows(rows: &[Vec<Option<ElementId>>]) -> Result<Self, PuzzleError> {
        let mut grid = Self::new(rows.len())?;
        for (row, values) in rows.iter().enumerate() {
            if values.len() != grid.size {
                return Err(PuzzleError::MalformedPuzzleState(format!(
                    "row {row} has {} cells, expected {}",
                    values.len(),
                    grid.size
                )));
            }
            let start = row * grid.size;
            grid.cells[start..start + grid.size].copy_from_slice(values);
        }
        Ok(grid)
    }

    /// Side length of the board.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Box layout of the board.
    #[must_use]
    pub const fn shape(&self) -> BoxShape {
        self.shape
    }

    /// Element at the coordinate.
    pub fn get(&self, cell: CellCoord) -> Result<Option<ElementId>, PuzzleError> {
        let index = self.index(cell)?;
        Ok(self.cells[index])
    }

    /// Writes the coordinate, returning its previous value.
    pub fn set(
        &mut self,
        cell: CellCoord,
        value: Option<ElementId>,
    ) -> Result<Option<ElementId>, PuzzleError> {
        let index = self.index(cell)?;
        Ok(std::mem::replace(&mut self.cells[index], value))
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let size = self.size as u32;
        (0..size).flat_map(move |row| (0..size).map(move |column| CellCoord::new(row, column)))
    }

    /// Renders the board with element glyphs and `.` for empty cells.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.size);
        for row in self.cells.chunks(self.size) {
            out.extend(row.iter().map(|cell| cell.map_or('.', ElementId::glyph)));
            out.push('\n');
        }
        out
    }

    /// Values of the other cells sharing a row, column or box with `cell`.
    pub(crate) fn peers(&self, cell: CellCoord) -> Result<Vec<Option<ElementId>>, PuzzleError> {
        let index = self.index(cell)?;
        let (row, column) = (index / self.size, index % self.size);
        let box_row = row - row % self.shape.height;
        let box_column = column - column % self.shape.width;

        let peers = (0..self.cells.len())
            .filter(|&other| other != index)
            .filter(|&other| {
                let (r, c) = (other / self.size, other % self.size);
                r == row
                    || c == column
                    || ((box_row..box_row + self.shape.height).contains(&r)
                        && (box_column..box_column + self.shape.width).contains(&c))
            })
            .map(|other| self.cells[other])
            .collect();
        Ok(peers)
    }

    pub(crate) fn cells(&self) -> &[Option<ElementId>] {
        &self.cells
    }

    pub(crate) fn index(&self, cell: CellCoord) -> Result<usize, PuzzleError> {
        let (row, column) = (cell.row() as usize, cell.column() as usize);
        if row < self.size && column < self.size {
            Ok(row * self.size + column)
        } else {
            Err(PuzzleError::InvalidCoordinate {
                cell,
                size: self.size,
            })
        }
    }

    pub(crate) fn coord(&self, index: usize) -> CellCoord {
        CellCoord::new((index / self.size) as u32, (index % self.size) as u32)
    }
}

use std::{error::Error, fmt, str::FromStr};

use alchemy_grid_core::{CellCoord, ElementId, UnknownElementName};

/// Separates the element name from the coordinate.
const ELEMENT_DELIMITER: char = '@';
/// Separates the row from the column.
const COORDINATE_DELIMITER: char = ',';

/// Placement requested on the command line as `element@row,column`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PlacementArg {
    /// Element to place.
    pub(crate) element: ElementId,
    /// Target cell.
    pub(crate) cell: CellCoord,
}

impl FromStr for PlacementArg {
    type Err = PlacementArgError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(PlacementArgError::Empty);
        }

        let (element, coordinate) = trimmed
            .split_once(ELEMENT_DELIMITER)
            .ok_or_else(|| PlacementArgError::MissingCell(trimmed.to_owned()))?;
        let element = element
            .trim()
            .parse::<ElementId>()
            .map_err(PlacementArgError::UnknownElement)?;
        let cell = parse_cell(coordinate)?;

        Ok(Self { element, cell })
    }
}

/// Errors that can occur while parsing placement arguments.
#[derive(Debug)]
pub(crate) enum PlacementArgError {
    /// The argument was empty or contained only whitespace.
    Empty,
    /// The argument had no `@row,column` part.
    MissingCell(String),
    /// The element name is not part of the catalog.
    UnknownElement(UnknownElementName),
    /// The coordinate could not be parsed.
    InvalidCell(String),
}

impl fmt::Display for PlacementArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "placement was empty"),
            Self::MissingCell(value) => {
                write!(f, "placement '{value}' is missing '@row,column'")
            }
            Self::UnknownElement(error) => write!(f, "{error}"),
            Self::InvalidCell(cell) => write!(f, "could not parse cell '{cell}'"),
        }
    }
}

impl Error for PlacementArgError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownElement(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_cell(coordinate: &str) -> Result<CellCoord, PlacementArgError> {
    let invalid = || PlacementArgError::InvalidCell(coordinate.to_owned());
    let (row, column) = coordinate
        .split_once(COORDINATE_DELIMITER)
        .ok_or_else(invalid)?;
    let row = row.trim().parse::<u32>().map_err(|_| invalid())?;
    let column = column.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok(CellCoord::new(row, column))
}

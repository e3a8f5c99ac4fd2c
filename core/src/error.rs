use thiserror::Error;

use crate::{Coord2, Region};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Coordinates {coords:?} are outside the grid")]
    OutOfBounds { coords: Coord2 },
    #[error("Grid and group dimensions must be positive")]
    InvalidDimensions,
    #[error("Region {region} would split a group or leave the grid")]
    InvalidRegion { region: Region },
    #[error("Cell at {coords:?} does not agree with its group")]
    CorruptGroup { coords: Coord2 },
}

pub type Result<T> = core::result::Result<T, GridError>;

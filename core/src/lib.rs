#![no_std]

//! Grid of square cells that flip individually or as rectangular groups.
//!
//! Group membership is encoded per cell (see [`Cell`]), so deciding whether a
//! rectangle can be flipped without splitting a group only needs the cells
//! inside that rectangle.

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use random::*;
pub use render::*;
pub use store::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod random;
mod render;
mod store;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// `(cols, rows)`.
    pub size: Coord2,
    /// Width and height of one cell in pixels; only renderers look at it.
    pub cell_size: f32,
}

impl GridConfig {
    pub const fn new_unchecked(size: Coord2, cell_size: f32) -> Self {
        Self { size, cell_size }
    }

    pub fn new(size: Coord2, cell_size: f32) -> Result<Self> {
        let config = Self::new_unchecked(size, cell_size);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (cols, rows) = self.size;
        if cols == 0 || rows == 0 || !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(GridError::InvalidDimensions);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

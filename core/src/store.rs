use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// One of the two double-buffered cell arrays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Visible,
    Hidden,
}

/// Row-major visible and hidden layers; a flip swaps a position between them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellStore {
    size: Coord2,
    visible: Array2<Cell>,
    hidden: Array2<Cell>,
}

impl CellStore {
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GridError::InvalidDimensions);
        }

        Ok(Self {
            size,
            visible: Array2::from_elem(size.to_nd_index(), Cell::empty()),
            hidden: Array2::from_elem(size.to_nd_index(), Cell::empty()),
        })
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GridError::OutOfBounds { coords })
        }
    }

    pub fn get(&self, layer: Layer, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.layer(layer)[coords.to_nd_index()])
    }

    pub fn set(&mut self, layer: Layer, coords: Coord2, cell: Cell) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.layer_mut(layer)[coords.to_nd_index()] = cell;
        Ok(())
    }

    /// Exchanges the visible and hidden cell at `coords` in place.
    pub fn swap(&mut self, coords: Coord2) -> Result<()> {
        let index = self.validate_coords(coords)?.to_nd_index();
        core::mem::swap(&mut self.visible[index], &mut self.hidden[index]);
        Ok(())
    }

    /// All cells of `layer` with their coordinates, in row-major order.
    pub fn iter(&self, layer: Layer) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.layer(layer)
            .indexed_iter()
            .map(|((y, x), cell)| ((x as Coord, y as Coord), cell))
    }

    fn layer(&self, layer: Layer) -> &Array2<Cell> {
        match layer {
            Layer::Visible => &self.visible,
            Layer::Hidden => &self.hidden,
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut Array2<Cell> {
        match layer {
            Layer::Visible => &mut self.visible,
            Layer::Hidden => &mut self.hidden,
        }
    }
}

/// Panics on out-of-range coordinates.
impl Index<(Layer, Coord2)> for CellStore {
    type Output = Cell;

    fn index(&self, (layer, coords): (Layer, Coord2)) -> &Self::Output {
        &self.layer(layer)[coords.to_nd_index()]
    }
}

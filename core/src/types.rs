use core::fmt;

use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u16;

/// Count type used for total-cell and occupied-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`, or a size `(cols, rows)`.
pub type Coord2 = (Coord, Coord);

/// Signed value of a cell's dual-purpose group fields.
///
/// Positive on an anchor (the group's width or height), zero or negative on a
/// member (the negated offset back to its anchor).
pub type Span = i32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Layers are stored row-major, so `(x, y)` maps to `[y, x]`.
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Rectangle of `size` cells whose top-left corner is `origin`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub origin: Coord2,
    pub size: Coord2,
}

impl Region {
    pub const fn new(origin: Coord2, size: Coord2) -> Self {
        Self { origin, size }
    }

    pub const fn unit(origin: Coord2) -> Self {
        Self::new(origin, (1, 1))
    }

    pub const fn is_empty(&self) -> bool {
        self.size.0 == 0 || self.size.1 == 0
    }

    pub const fn area(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Exclusive far corner, widened so it cannot overflow.
    pub const fn end(&self) -> (u32, u32) {
        (
            self.origin.0 as u32 + self.size.0 as u32,
            self.origin.1 as u32 + self.size.1 as u32,
        )
    }

    /// Whether every cell of the region lies inside a grid of `bounds`.
    pub const fn fits_within(&self, bounds: Coord2) -> bool {
        let (end_x, end_y) = self.end();
        end_x <= bounds.0 as u32 && end_y <= bounds.1 as u32
    }

    pub const fn contains(&self, (x, y): Coord2) -> bool {
        let (end_x, end_y) = self.end();
        x >= self.origin.0 && y >= self.origin.1 && (x as u32) < end_x && (y as u32) < end_y
    }

    /// Iterates `(coords, offset)` over the region's cells in row-major order.
    pub fn cells(&self) -> RegionCells {
        RegionCells {
            origin: self.origin,
            size: self.size,
            offset: (0, 0),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.size.0, self.size.1, self.origin.0, self.origin.1
        )
    }
}

#[derive(Debug)]
pub struct RegionCells {
    origin: Coord2,
    size: Coord2,
    offset: Coord2,
}

impl Iterator for RegionCells {
    type Item = (Coord2, Coord2);

    fn next(&mut self) -> Option<Self::Item> {
        let (size_x, size_y) = self.size;
        if size_x == 0 || self.offset.1 >= size_y {
            return None;
        }

        let offset = self.offset;
        self.offset.0 += 1;
        if self.offset.0 >= size_x {
            self.offset = (0, self.offset.1 + 1);
        }

        // regions hanging off the coordinate space simply end early
        let coords = (
            self.origin.0.checked_add(offset.0)?,
            self.origin.1.checked_add(offset.1)?,
        );
        Some((coords, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn cells_walk_rows_then_columns() {
        let cells: Vec<_> = Region::new((1, 2), (2, 2)).cells().collect();

        assert_eq!(
            cells,
            vec![
                ((1, 2), (0, 0)),
                ((2, 2), (1, 0)),
                ((1, 3), (0, 1)),
                ((2, 3), (1, 1)),
            ]
        );
    }

    #[test]
    fn empty_region_has_no_cells() {
        assert_eq!(Region::new((0, 0), (0, 3)).cells().count(), 0);
        assert_eq!(Region::new((0, 0), (3, 0)).cells().count(), 0);
    }

    #[test]
    fn fits_within_checks_far_edge() {
        assert!(Region::new((1, 1), (2, 2)).fits_within((3, 3)));
        assert!(!Region::new((2, 1), (2, 2)).fits_within((3, 3)));
        assert!(!Region::new((Coord::MAX, 0), (2, 1)).fits_within((Coord::MAX, 1)));
    }

    #[test]
    fn contains_is_half_open() {
        let region = Region::new((1, 1), (2, 3));

        assert!(region.contains((1, 1)));
        assert!(region.contains((2, 3)));
        assert!(!region.contains((3, 1)));
        assert!(!region.contains((1, 4)));
        assert!(!region.contains((0, 2)));
    }

    #[test]
    fn nd_index_is_row_major() {
        assert_eq!((3, 7).to_nd_index(), [7, 3]);
    }
}

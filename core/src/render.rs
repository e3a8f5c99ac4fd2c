use alloc::vec::Vec;
use core::mem;

use serde::{Deserialize, Serialize};

use crate::*;

/// Geometry a renderer needs to place one cell of a flipped group.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupFootprint {
    /// Size of the flipped region, in cells.
    pub group: Coord2,
    /// Position of this cell within the flipped region.
    pub offset: Coord2,
    /// Cells the rendered element covers: the whole group for an occupied anchor, otherwise one.
    pub extent: Coord2,
    /// Width and height of one cell, in pixels.
    pub cell_size: f32,
}

impl GroupFootprint {
    pub fn new(group: Coord2, offset: Coord2, cell: &Cell, cell_size: f32) -> Self {
        let extent = match cell.role() {
            Some(GroupRole::Anchor { size }) if cell.is_occupied() => size,
            _ => (1, 1),
        };
        Self {
            group,
            offset,
            extent,
            cell_size,
        }
    }

    /// Top-left pixel position of the cell at `coords`.
    pub fn pixel_position(&self, (x, y): Coord2) -> (f32, f32) {
        (f32::from(x) * self.cell_size, f32::from(y) * self.cell_size)
    }

    pub fn pixel_size(&self) -> (f32, f32) {
        (
            f32::from(self.extent.0) * self.cell_size,
            f32::from(self.extent.1) * self.cell_size,
        )
    }

    /// Pivot of the flip relative to this cell's top-left corner: the group's pixel center.
    pub fn transform_origin(&self) -> (f32, f32) {
        let center_x = f32::from(self.group.0) * self.cell_size / 2.0;
        let center_y = f32::from(self.group.1) * self.cell_size / 2.0;
        (
            center_x - f32::from(self.offset.0) * self.cell_size,
            center_y - f32::from(self.offset.1) * self.cell_size,
        )
    }
}

/// Visual side of a flip. The engine has already committed both layers when it
/// calls in, and nothing here may feed back into engine state.
pub trait Renderer {
    /// `cell` was displaced into the hidden layer and should animate away.
    fn on_cell_leave(&mut self, coords: Coord2, cell: &Cell, footprint: &GroupFootprint);

    /// `cell` is now visible and should animate in.
    fn on_cell_enter(&mut self, coords: Coord2, cell: &Cell, footprint: &GroupFootprint);
}

/// Renderer for headless use.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn on_cell_leave(&mut self, _coords: Coord2, _cell: &Cell, _footprint: &GroupFootprint) {}

    fn on_cell_enter(&mut self, _coords: Coord2, _cell: &Cell, _footprint: &GroupFootprint) {}
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderEvent {
    Leave {
        coords: Coord2,
        cell: Cell,
        footprint: GroupFootprint,
    },
    Enter {
        coords: Coord2,
        cell: Cell,
        footprint: GroupFootprint,
    },
}

impl RenderEvent {
    pub fn coords(&self) -> Coord2 {
        match self {
            Self::Leave { coords, .. } | Self::Enter { coords, .. } => *coords,
        }
    }
}

/// Renderer that keeps every notification it receives, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<RenderEvent> {
        mem::take(&mut self.events)
    }
}

impl Renderer for RecordingRenderer {
    fn on_cell_leave(&mut self, coords: Coord2, cell: &Cell, footprint: &GroupFootprint) {
        self.events.push(RenderEvent::Leave {
            coords,
            cell: cell.clone(),
            footprint: *footprint,
        });
    }

    fn on_cell_enter(&mut self, coords: Coord2, cell: &Cell, footprint: &GroupFootprint) {
        self.events.push(RenderEvent::Enter {
            coords,
            cell: cell.clone(),
            footprint: *footprint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_anchor_covers_whole_group() {
        let anchor = Cell::anchor((3, 2), "a.png".into());
        let footprint = GroupFootprint::new((3, 2), (0, 0), &anchor, 10.0);

        assert_eq!(footprint.pixel_size(), (30.0, 20.0));
        assert_eq!(footprint.transform_origin(), (15.0, 10.0));
    }

    #[test]
    fn member_pivots_around_group_center() {
        let member = Cell::member((2, 1));
        let footprint = GroupFootprint::new((3, 2), (2, 1), &member, 10.0);

        assert_eq!(footprint.pixel_size(), (10.0, 10.0));
        assert_eq!(footprint.transform_origin(), (-5.0, 0.0));
        assert_eq!(footprint.pixel_position((4, 3)), (40.0, 30.0));
    }

    #[test]
    fn cleared_cell_is_one_cell_wide() {
        let footprint = GroupFootprint::new((2, 2), (1, 0), &Cell::empty(), 8.0);

        assert_eq!(footprint.extent, (1, 1));
        assert_eq!(footprint.transform_origin(), (0.0, 8.0));
    }
}

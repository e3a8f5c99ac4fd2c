use std::fmt;
use std::sync::OnceLock;

use flipgrid_core::{Cell, Coord2, GroupFootprint, GroupRole, Renderer};

const EMPTY: char = '.';

#[derive(Debug)]
pub(crate) struct Transition {
    pub name: &'static str,
    pub millis: u32,
}

/// The two halves of a flip, shared by every renderer in the process.
#[derive(Debug)]
pub(crate) struct Transitions {
    pub leave: Transition,
    pub enter: Transition,
}

static TRANSITIONS: OnceLock<Transitions> = OnceLock::new();

impl Transitions {
    pub(crate) fn init() -> &'static Self {
        TRANSITIONS.get_or_init(|| {
            log::debug!("registering flip transitions");
            Self {
                leave: Transition {
                    name: "flip-back",
                    millis: 1000,
                },
                enter: Transition {
                    name: "flip-face",
                    millis: 1000,
                },
            }
        })
    }
}

/// Draws the grid as characters: one uppercase letter per group anchor, the
/// same letter in lowercase on its members, `.` for empty cells.
pub(crate) struct TextRenderer {
    cols: usize,
    canvas: Vec<char>,
    transitions: &'static Transitions,
    next_glyph: u8,
    cells_flipped: u64,
}

impl TextRenderer {
    pub(crate) fn new((cols, rows): Coord2) -> Self {
        let cols = usize::from(cols);
        Self {
            cols,
            canvas: vec![EMPTY; cols * usize::from(rows)],
            transitions: Transitions::init(),
            next_glyph: 0,
            cells_flipped: 0,
        }
    }

    pub(crate) fn cells_flipped(&self) -> u64 {
        self.cells_flipped
    }

    pub(crate) fn glyph_at(&self, coords: Coord2) -> char {
        self.canvas[self.index(coords)]
    }

    fn index(&self, (x, y): Coord2) -> usize {
        usize::from(y) * self.cols + usize::from(x)
    }

    fn glyph_for(&mut self, coords: Coord2, cell: &Cell) -> char {
        if !cell.is_occupied() {
            return EMPTY;
        }

        match cell.role() {
            Some(GroupRole::Anchor { .. }) => {
                let glyph = char::from(b'A' + self.next_glyph % 26);
                self.next_glyph = self.next_glyph.wrapping_add(1);
                glyph
            }
            Some(GroupRole::Member { offset }) => coords
                .0
                .checked_sub(offset.0)
                .zip(coords.1.checked_sub(offset.1))
                .map(|anchor| self.glyph_at(anchor).to_ascii_lowercase())
                .unwrap_or('?'),
            None => '?',
        }
    }
}

impl Renderer for TextRenderer {
    fn on_cell_leave(&mut self, coords: Coord2, cell: &Cell, footprint: &GroupFootprint) {
        log::trace!(
            "{} {:?} ({}ms) pivot {:?}, was {:?}",
            self.transitions.leave.name,
            coords,
            self.transitions.leave.millis,
            footprint.transform_origin(),
            cell.content(),
        );
    }

    fn on_cell_enter(&mut self, coords: Coord2, cell: &Cell, footprint: &GroupFootprint) {
        let glyph = self.glyph_for(coords, cell);
        let index = self.index(coords);
        self.canvas[index] = glyph;
        self.cells_flipped += 1;

        let (left, top) = footprint.pixel_position(coords);
        let (width, height) = footprint.pixel_size();
        log::debug!(
            "{} {:?} ({}ms) at {}x{} size {}x{} pivot {:?} -> {}",
            self.transitions.enter.name,
            coords,
            self.transitions.enter.millis,
            left,
            top,
            width,
            height,
            footprint.transform_origin(),
            glyph,
        );
    }
}

impl fmt::Display for TextRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.canvas.chunks(self.cols) {
            let line: String = row.iter().collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

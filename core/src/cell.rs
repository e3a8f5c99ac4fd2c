use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

/// Reference to what an occupied group shows, usually an image URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentRef {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for ContentRef {
    fn from(content: String) -> Self {
        Self(content)
    }
}

impl AsRef<str> for ContentRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoded meaning of a cell's group fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GroupRole {
    /// Top-left cell of a group `size` cells wide and tall. Ungrouped cells are 1x1 anchors.
    Anchor { size: Coord2 },
    /// Cell `offset` cells right of and below its anchor.
    Member { offset: Coord2 },
}

/// State of one grid position in one layer.
///
/// `group_cols`/`group_rows` hold the group size on an anchor and the negated
/// offset to the anchor on a member, so `offset + group_cols` is always the
/// group's far edge measured from wherever the scan started.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    occupied: bool,
    group_cols: Span,
    group_rows: Span,
    content: Option<ContentRef>,
}

impl Cell {
    pub const fn empty() -> Self {
        Self {
            occupied: false,
            group_cols: 1,
            group_rows: 1,
            content: None,
        }
    }

    pub fn anchor((cols, rows): Coord2, content: ContentRef) -> Self {
        Self {
            occupied: true,
            group_cols: cols.into(),
            group_rows: rows.into(),
            content: Some(content),
        }
    }

    pub fn member((dx, dy): Coord2) -> Self {
        Self {
            occupied: true,
            group_cols: -Span::from(dx),
            group_rows: -Span::from(dy),
            content: None,
        }
    }

    pub const fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub const fn group_cols(&self) -> Span {
        self.group_cols
    }

    pub const fn group_rows(&self) -> Span {
        self.group_rows
    }

    pub fn content(&self) -> Option<&ContentRef> {
        self.content.as_ref()
    }

    pub const fn is_ungrouped(&self) -> bool {
        !self.occupied && self.group_cols == 1 && self.group_rows == 1
    }

    /// Decodes the group fields, `None` when they could not have come from a flip.
    pub fn role(&self) -> Option<GroupRole> {
        let cols = self.group_cols;
        let rows = self.group_rows;
        if cols >= 1 && rows >= 1 {
            Some(GroupRole::Anchor {
                size: (span_to_coord(cols)?, span_to_coord(rows)?),
            })
        } else if cols <= 0 && rows <= 0 {
            Some(GroupRole::Member {
                offset: (span_to_coord(cols)?, span_to_coord(rows)?),
            })
        } else {
            None
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

fn span_to_coord(span: Span) -> Option<Coord> {
    span.unsigned_abs().try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cell_is_ungrouped_anchor() {
        let cell = Cell::empty();

        assert!(cell.is_ungrouped());
        assert!(!cell.is_occupied());
        assert_eq!(cell.role(), Some(GroupRole::Anchor { size: (1, 1) }));
    }

    #[test]
    fn member_stores_negated_offset() {
        let cell = Cell::member((2, 0));

        assert_eq!(cell.group_cols(), -2);
        assert_eq!(cell.group_rows(), 0);
        assert!(cell.is_occupied());
        assert_eq!(cell.content(), None);
        assert_eq!(cell.role(), Some(GroupRole::Member { offset: (2, 0) }));
    }

    #[test]
    fn single_occupied_cell_is_not_ungrouped() {
        let cell = Cell::anchor((1, 1), "a.png".into());

        assert!(!cell.is_ungrouped());
        assert_eq!(cell.content().map(ContentRef::as_str), Some("a.png"));
    }

    #[test]
    fn mixed_sign_fields_have_no_role() {
        let cell = Cell {
            occupied: true,
            group_cols: 2,
            group_rows: -1,
            content: None,
        };

        assert_eq!(cell.role(), None);
    }
}

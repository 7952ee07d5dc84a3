//! Keyboard selection cursor over the grid.
//!
//! The cursor clamps at the grid edges; it never wraps.

use crate::types::{Coord, GameAction, GRID_SIZE};

/// Cell highlighted for keyboard selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    col: u8,
    row: u8,
}

impl Cursor {
    /// Start at the bottom-left cell.
    pub fn new() -> Self {
        Self {
            col: 0,
            row: GRID_SIZE - 1,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord {
            col: self.col,
            row: self.row,
        }
    }

    /// Move the cursor for a cursor action. Returns true if it moved.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let (col, row) = (self.col, self.row);
        match action {
            GameAction::CursorLeft => self.col = self.col.saturating_sub(1),
            GameAction::CursorRight => self.col = (self.col + 1).min(GRID_SIZE - 1),
            GameAction::CursorUp => self.row = self.row.saturating_sub(1),
            GameAction::CursorDown => self.row = (self.row + 1).min(GRID_SIZE - 1),
            _ => return false,
        }
        (col, row) != (self.col, self.row)
    }

    /// Jump to a cell, e.g. after a mouse click.
    pub fn move_to(&mut self, coord: Coord) {
        self.col = coord.col.min(GRID_SIZE - 1);
        self.row = coord.row.min(GRID_SIZE - 1);
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

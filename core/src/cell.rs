use serde::{Deserialize, Serialize};

/// One position of the grid.
///
/// A mine cell is never marked opened: opening it detonates instead.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    adjacent_mines: u8,
    opened: bool,
    flagged: bool,
}

impl Cell {
    pub(crate) const fn new(mine: bool, adjacent_mines: u8) -> Self {
        Self {
            mine,
            adjacent_mines,
            opened: false,
            flagged: false,
        }
    }

    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_opened(self) -> bool {
        self.opened
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Marks the cell opened, dropping any flag. Returns whether a flag was dropped.
    pub(crate) fn open(&mut self) -> bool {
        self.opened = true;
        core::mem::replace(&mut self.flagged, false)
    }

    pub(crate) fn toggle_flag(&mut self) -> bool {
        self.flagged = !self.flagged;
        self.flagged
    }
}

/// What a player is allowed to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Opened(u8),
    Flagged,
    /// Only produced when mines are being revealed after a loss.
    Mine,
}

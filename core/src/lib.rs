#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use command::*;
pub use error::*;
pub use grid::*;
pub use session::*;
pub use types::*;

mod cell;
mod command;
mod error;
mod grid;
mod session;
mod types;

/// Validated parameters of a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    /// Checks `height, width >= MIN_SIDE` and `1 <= mines < height * width`.
    pub fn new((height, width): Coord2, mines: CellCount) -> Result<Self> {
        if height < MIN_SIDE || width < MIN_SIDE {
            return Err(GameError::InvalidDimensions);
        }
        let max = Self::max_mines((height, width));
        if mines == 0 || mines > max {
            return Err(GameError::InvalidMineCount { max });
        }
        Ok(Self {
            size: (height, width),
            mines,
        })
    }

    /// Largest mine count a grid of `size` accepts.
    pub const fn max_mines(size: Coord2) -> CellCount {
        mult(size.0, size.1).saturating_sub(1)
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

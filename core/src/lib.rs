#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use input::*;
pub use scene::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod input;
mod scene;
mod types;

/// Dimensions, mine count, and on-screen cell size of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    /// Edge length of one square cell, in pixels.
    pub cell_size: u32,
}

impl GameConfig {
    pub const fn new(rows: Coord, cols: Coord, mines: CellCount, cell_size: u32) -> Self {
        Self {
            rows,
            cols,
            mines,
            cell_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.cell_size == 0 {
            return Err(GameError::ZeroCellSize);
        }
        let cells = self.total_cells();
        if self.mines > cells {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Pixel width and height of the whole board.
    pub const fn pixel_size(&self) -> (u32, u32) {
        (
            (self.cols as u32).saturating_mul(self.cell_size),
            (self.rows as u32).saturating_mul(self.cell_size),
        )
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(30, 19, 50, 40)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

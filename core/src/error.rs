use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Too many mines: requested {mines} but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Cell size must be greater than zero")]
    ZeroCellSize,
    #[error("Mine layout mismatch: expected {expected} distinct mines on the board but {placed} were placed")]
    MineCountMismatch {
        expected: CellCount,
        placed: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;

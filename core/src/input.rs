use serde::{Deserialize, Serialize};

use crate::*;

/// Key that throws the current board away and deals a new one.
pub const RESTART_KEY: char = 'r';

/// Point on the rendered board, in pixels from its top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Reveal, usually the left mouse button.
    PrimaryClick(Position),
    /// Toggle a flag, usually the right mouse button.
    SecondaryClick(Position),
    Key(char),
}

impl GameConfig {
    /// Cell containing `pos`, with each cell covering `[k * cell_size, (k + 1) * cell_size)` on both axes.
    ///
    /// Positions left of or above the board, or past its far edges, belong to no cell.
    pub fn cell_at(&self, pos: Position) -> Option<Coord2> {
        let row = axis_index(pos.y, self.cell_size, self.rows)?;
        let col = axis_index(pos.x, self.cell_size, self.cols)?;
        Some((row, col))
    }
}

fn axis_index(offset: i64, cell_size: u32, count: Coord) -> Option<Coord> {
    let offset = u64::try_from(offset).ok()?;
    let index = offset.checked_div(u64::from(cell_size))?;
    Coord::try_from(index).ok().filter(|&index| index < count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::new(4, 3, 3, 50)
    }

    #[test]
    fn cell_at_maps_interior_points() {
        let config = config();

        assert_eq!(config.cell_at(Position::new(60, 140)), Some((2, 1)));
        assert_eq!(config.cell_at(Position::new(25, 25)), Some((0, 0)));
        assert_eq!(config.cell_at(Position::new(140, 55)), Some((1, 2)));
    }

    #[test]
    fn cell_at_assigns_grid_lines_to_the_next_cell() {
        let config = config();

        assert_eq!(config.cell_at(Position::new(0, 0)), Some((0, 0)));
        assert_eq!(config.cell_at(Position::new(100, 100)), Some((2, 2)));
        assert_eq!(config.cell_at(Position::new(49, 50)), Some((1, 0)));
        assert_eq!(config.cell_at(Position::new(149, 199)), Some((3, 2)));
    }

    #[test]
    fn cell_at_rejects_outside_points() {
        let config = config();

        assert_eq!(config.cell_at(Position::new(150, 10)), None);
        assert_eq!(config.cell_at(Position::new(10, 200)), None);
        assert_eq!(config.cell_at(Position::new(-1, 10)), None);
        assert_eq!(config.cell_at(Position::new(10, -30)), None);
    }

    #[test]
    fn cell_at_with_zero_cell_size_is_none() {
        let config = GameConfig::new(4, 3, 3, 0);

        assert_eq!(config.cell_at(Position::new(10, 10)), None);
    }
}

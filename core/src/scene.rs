use ndarray::Array2;
use serde::Serialize;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Color {
    Black,
    Blue,
    Gray,
    Green,
    Magenta,
    Orange,
    Red,
    White,
}

/// What a single cell looks like, derived from its state alone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Glyph {
    #[default]
    Hidden,
    Flag,
    Mine,
    Blank,
    Number(u8),
}

impl Glyph {
    /// Foreground color of the marker drawn on top of the cell, if any.
    pub const fn color(self) -> Option<Color> {
        use Glyph::*;
        match self {
            Hidden | Blank => None,
            Flag => Some(Color::Orange),
            Mine => Some(Color::Black),
            Number(count) => Some(number_color(count)),
        }
    }

    /// Background of the cell square.
    pub const fn background(self) -> Color {
        use Glyph::*;
        match self {
            Hidden | Flag => Color::Gray,
            Mine | Blank | Number(_) => Color::White,
        }
    }
}

pub const fn number_color(count: u8) -> Color {
    match count {
        1 => Color::Blue,
        2 => Color::Green,
        3 => Color::Orange,
        4 => Color::Red,
        5 => Color::Magenta,
        _ => Color::Black,
    }
}

/// End-of-game banner drawn centered over the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub text: &'static str,
    pub color: Color,
}

impl Overlay {
    pub const WIN: Self = Self {
        text: "YOU WIN",
        color: Color::Green,
    };
    pub const LOSE: Self = Self {
        text: "YOU LOSE",
        color: Color::Red,
    };

    pub const fn for_state(state: GameState) -> Option<Self> {
        match state {
            GameState::Playing => None,
            GameState::Won => Some(Self::WIN),
            GameState::Lost => Some(Self::LOSE),
        }
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    /// Indexed by `[row, col]`.
    pub glyphs: Array2<Glyph>,
    pub overlay: Option<Overlay>,
}

impl Scene {
    pub fn glyph_at(&self, coords: Coord2) -> Glyph {
        self.glyphs[coords.to_nd_index()]
    }
}

impl Board {
    /// Flags win over everything else, mines only show once revealed.
    pub fn glyph_at(&self, coords: Coord2) -> Glyph {
        let cell = &self[coords];
        if cell.is_flagged() {
            Glyph::Flag
        } else if cell.is_revealed() && cell.is_mine() {
            Glyph::Mine
        } else if !cell.is_revealed() {
            Glyph::Hidden
        } else {
            match self.adjacent_mine_count(coords) {
                0 => Glyph::Blank,
                count => Glyph::Number(count),
            }
        }
    }
}

impl<S: MineSampler> Game<S> {
    pub fn scene(&self) -> Scene {
        let config = self.config();
        let (width, height) = config.pixel_size();
        let board = self.board();
        let glyphs = Array2::from_shape_fn(config.size().to_nd_index(), |(row, col)| {
            board.glyph_at((row as Coord, col as Coord))
        });
        Scene {
            width,
            height,
            cell_size: config.cell_size,
            glyphs,
            overlay: Overlay::for_state(self.state()),
        }
    }
}

use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use sweeper_core::{CellCount, Coord, GameConfig};

/// Contents of the optional TOML settings file.
///
/// ```toml
/// seed = 7
///
/// [game]
/// rows = 16
/// cols = 30
/// mines = 99
/// cell_size = 20
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Fixed seed for reproducible boards, a random one is drawn when absent.
    pub seed: Option<u64>,
    pub game: GameConfig,
}

/// Command line overrides, applied on top of the settings file.
#[derive(Args, Clone, Debug, Default, PartialEq)]
pub(crate) struct GameArgs {
    /// Number of rows on the board
    #[arg(long)]
    pub rows: Option<Coord>,

    /// Number of columns on the board
    #[arg(long)]
    pub cols: Option<Coord>,

    /// Number of mines to place
    #[arg(short, long)]
    pub mines: Option<CellCount>,

    /// Size of a cell in pixels, used to map clicks to cells
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl Settings {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read settings from {}", path.display()))?;
        let settings = Self::parse(&text)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    pub(crate) fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub(crate) fn apply(&mut self, args: &GameArgs) {
        let game = &mut self.game;
        if let Some(rows) = args.rows {
            game.rows = rows;
        }
        if let Some(cols) = args.cols {
            game.cols = cols;
        }
        if let Some(mines) = args.mines {
            game.mines = mines;
        }
        if let Some(cell_size) = args.cell_size {
            game.cell_size = cell_size;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
    }
}

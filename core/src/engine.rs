use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Single-player game session: one board, its outcome, and the sampler that deals new boards.
#[derive(Clone, Debug)]
pub struct Game<S = RandomMineSampler> {
    config: GameConfig,
    board: Board,
    state: GameState,
    sampler: S,
}

impl Game<RandomMineSampler> {
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, RandomMineSampler::from_seed(seed))
    }
}

impl<S: MineSampler> Game<S> {
    /// Validates `config` and deals the first board. Nothing is built when validation fails.
    ///
    /// A board with no safe cells is won before the first click.
    pub fn new(config: GameConfig, mut sampler: S) -> Result<Self> {
        config.validate()?;
        let board = deal_board(&config, &mut sampler)?;
        log::info!(
            "New game: {}x{} with {} mines",
            config.rows,
            config.cols,
            config.mines
        );
        let state = initial_state(&config, &board);
        Ok(Self {
            config,
            board,
            state,
            sampler,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.config.mines) - i64::from(self.board.flag_count())
    }

    /// Reveals the cell at `coords`.
    ///
    /// Flagged cells, revealed cells, coordinates off the board, and any click after the game ended are ignored.
    pub fn primary_click(&mut self, coords: Coord2) -> RevealOutcome {
        if self.state.is_finished() {
            return RevealOutcome::NoChange;
        }
        let Some(cell) = self.board.get(coords) else {
            return RevealOutcome::NoChange;
        };
        if cell.is_flagged() || cell.is_revealed() {
            return RevealOutcome::NoChange;
        }

        if cell.is_mine() {
            log::debug!("Mine hit at {:?}", coords);
            self.board.reveal_all();
            self.state = GameState::Lost;
            return RevealOutcome::HitMine;
        }

        let revealed = self.board.reveal(coords);
        log::debug!("Revealed {} cells from {:?}", revealed, coords);

        if self.board.is_won(self.config.mines) {
            log::debug!("All safe cells revealed");
            self.state = GameState::Won;
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Toggles the flag at `coords`. Revealed cells and finished games are left alone.
    pub fn secondary_click(&mut self, coords: Coord2) -> MarkOutcome {
        if self.state.is_finished() {
            return MarkOutcome::NoChange;
        }
        match self.board.get_mut(coords) {
            Some(cell) if !cell.is_revealed() => {
                let flagged = !cell.is_flagged();
                cell.set_flag(flagged);
                MarkOutcome::Changed
            }
            _ => MarkOutcome::NoChange,
        }
    }

    /// Deals a fresh board with the same configuration and goes back to [`GameState::Playing`].
    ///
    /// The current game is kept untouched when the sampler produces a bad layout.
    pub fn restart(&mut self) -> Result<()> {
        self.board = deal_board(&self.config, &mut self.sampler)?;
        self.state = initial_state(&self.config, &self.board);
        log::info!("Game restarted");
        Ok(())
    }

    /// Dispatches a raw input event, returning whether anything changed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PrimaryClick(pos) => self
                .config
                .cell_at(pos)
                .is_some_and(|coords| self.primary_click(coords).has_update()),
            InputEvent::SecondaryClick(pos) => self
                .config
                .cell_at(pos)
                .is_some_and(|coords| self.secondary_click(coords).has_update()),
            InputEvent::Key(RESTART_KEY) => match self.restart() {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("Restart failed: {}", err);
                    false
                }
            },
            InputEvent::Key(key) => {
                log::trace!("Unbound key {:?}", key);
                false
            }
        }
    }
}

fn deal_board(config: &GameConfig, sampler: &mut impl MineSampler) -> Result<Board> {
    let mut board = Board::build(config.size());
    board.place_mines(sampler.sample(config.size(), config.mines));

    // duplicates and out-of-bounds picks collapse, leaving fewer mines than requested
    let placed = board.mine_count();
    if placed != config.mines {
        return Err(GameError::MineCountMismatch {
            expected: config.mines,
            placed,
        });
    }
    Ok(board)
}

fn initial_state(config: &GameConfig, board: &Board) -> GameState {
    if board.is_won(config.mines) {
        log::debug!("No safe cells to reveal");
        GameState::Won
    } else {
        GameState::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4 rows by 3 columns with mines at (1, 0), (1, 1) and (2, 0).
    fn sample_game() -> Game<FixedMineSampler> {
        let config = GameConfig::new(4, 3, 3, 50);
        Game::new(config, FixedMineSampler::new([(1, 0), (1, 1), (2, 0)])).unwrap()
    }

    #[test]
    fn new_game_starts_playing_with_exact_mines() {
        let game = sample_game();

        assert_eq!(game.state(), GameState::Playing);
        assert!(!game.is_finished());
        assert_eq!(game.board().mine_count(), 3);
        assert_eq!(game.board().count_satisfied(), 0);
    }

    #[test]
    fn new_game_rejects_too_many_mines() {
        let config = GameConfig::new(4, 3, 15, 10);

        let result = Game::with_seed(config, 0);

        assert_eq!(
            result.unwrap_err(),
            GameError::TooManyMines {
                mines: 15,
                cells: 12
            }
        );
    }

    #[test]
    fn click_numbered_corner_reveals_only_it() {
        let mut game = sample_game();

        assert_eq!(game.primary_click((0, 0)), RevealOutcome::Revealed);

        assert!(game.board()[(0, 0)].is_revealed());
        assert!(!game.board()[(0, 1)].is_revealed());
        assert!(!game.board().is_won(3));
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn click_zero_cell_flood_fills() {
        let mut game = sample_game();

        assert_eq!(game.primary_click((3, 2)), RevealOutcome::Revealed);

        for coords in [(2, 1), (2, 2), (3, 1), (3, 2)] {
            assert!(game.board()[coords].is_revealed(), "{:?} hidden", coords);
        }
        for coords in [(0, 0), (0, 1), (0, 2), (1, 2), (3, 0)] {
            assert!(!game.board()[coords].is_revealed(), "{:?} revealed", coords);
        }
    }

    #[test]
    fn click_mine_reveals_board_and_loses() {
        let mut game = sample_game();

        assert_eq!(game.primary_click((1, 0)), RevealOutcome::HitMine);

        assert_eq!(game.state(), GameState::Lost);
        assert!(game.board().iter().all(|(_, cell)| cell.is_revealed()));
    }

    #[test]
    fn revealing_every_safe_cell_wins() {
        let mut game = sample_game();

        for coords in [(3, 2), (0, 0), (0, 1), (0, 2), (1, 2)] {
            assert_eq!(game.primary_click(coords), RevealOutcome::Revealed);
        }
        assert_eq!(game.primary_click((3, 0)), RevealOutcome::Won);

        assert_eq!(game.state(), GameState::Won);
        assert!(!game.board()[(1, 0)].is_revealed());
    }

    #[test]
    fn flagged_cell_absorbs_primary_click() {
        let mut game = sample_game();

        assert_eq!(game.secondary_click((1, 0)), MarkOutcome::Changed);
        assert_eq!(game.primary_click((1, 0)), RevealOutcome::NoChange);

        assert_eq!(game.state(), GameState::Playing);
        assert!(!game.board()[(1, 0)].is_revealed());
    }

    #[test]
    fn secondary_click_toggles_only_hidden_cells() {
        let mut game = sample_game();

        assert_eq!(game.secondary_click((0, 2)), MarkOutcome::Changed);
        assert!(game.board()[(0, 2)].is_flagged());
        assert_eq!(game.mines_left(), 2);

        assert_eq!(game.secondary_click((0, 2)), MarkOutcome::Changed);
        assert!(!game.board()[(0, 2)].is_flagged());

        game.primary_click((0, 2));
        assert_eq!(game.secondary_click((0, 2)), MarkOutcome::NoChange);
        assert!(!game.board()[(0, 2)].is_flagged());
    }

    #[test]
    fn mines_left_goes_negative() {
        let mut game = sample_game();

        for coords in [(0, 0), (0, 1), (0, 2), (3, 0)] {
            game.secondary_click(coords);
        }

        assert_eq!(game.mines_left(), -1);
    }

    #[test]
    fn finished_game_ignores_clicks() {
        let mut game = sample_game();
        game.primary_click((2, 0));

        assert_eq!(game.primary_click((3, 2)), RevealOutcome::NoChange);
        assert_eq!(game.secondary_click((3, 2)), MarkOutcome::NoChange);
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn off_board_coordinates_are_ignored() {
        let mut game = sample_game();

        assert_eq!(game.primary_click((4, 0)), RevealOutcome::NoChange);
        assert_eq!(game.secondary_click((0, 3)), MarkOutcome::NoChange);
    }

    #[test]
    fn handle_event_maps_pixels_to_cells() {
        let mut game = sample_game();

        assert!(game.handle_event(InputEvent::SecondaryClick(Position::new(55, 55))));
        assert!(game.board()[(1, 1)].is_flagged());

        assert!(game.handle_event(InputEvent::PrimaryClick(Position::new(25, 25))));
        assert!(game.board()[(0, 0)].is_revealed());

        assert!(!game.handle_event(InputEvent::PrimaryClick(Position::new(25, 25))));
        assert!(!game.handle_event(InputEvent::PrimaryClick(Position::new(500, 25))));
        assert!(!game.handle_event(InputEvent::Key('a')));
    }

    #[test]
    fn restart_key_resets_lost_game() {
        let mut game = sample_game();
        game.primary_click((1, 0));

        assert!(game.handle_event(InputEvent::Key(RESTART_KEY)));

        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.board().count_satisfied(), 0);
        assert_eq!(game.board().flag_count(), 0);
        assert_eq!(game.board().mine_count(), 3);
    }

    #[test]
    fn restart_keeps_config_and_deals_new_layout() {
        let config = GameConfig::new(16, 16, 40, 20);
        let mut game = Game::with_seed(config, 3).unwrap();
        let first = game.board().clone();
        game.secondary_click((0, 0));
        game.primary_click((8, 8));

        game.restart().unwrap();

        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(*game.config(), config);
        assert_eq!(game.board().size(), (16, 16));
        assert_eq!(game.board().mine_count(), 40);
        assert_eq!(game.board().count_satisfied(), 0);
        assert_ne!(game.board(), &first);
    }

    #[test]
    fn same_seed_deals_same_board() {
        let config = GameConfig::new(9, 9, 10, 20);

        let first = Game::with_seed(config, 11).unwrap();
        let second = Game::with_seed(config, 11).unwrap();

        assert_eq!(first.board(), second.board());
    }

    #[test]
    fn duplicate_fixed_mines_are_rejected() {
        let config = GameConfig::new(1, 3, 2, 10);

        let result = Game::new(config, FixedMineSampler::new([(0, 0), (0, 0)]));

        assert_eq!(
            result.unwrap_err(),
            GameError::MineCountMismatch {
                expected: 2,
                placed: 1
            }
        );
    }

    #[test]
    fn short_fixed_layout_is_rejected() {
        let config = GameConfig::new(4, 3, 3, 50);

        let result = Game::new(config, FixedMineSampler::new([(1, 0), (9, 9)]));

        assert_eq!(
            result.unwrap_err(),
            GameError::MineCountMismatch {
                expected: 3,
                placed: 1
            }
        );
    }

    #[test]
    fn board_full_of_mines_is_won_immediately() {
        let config = GameConfig::new(2, 2, 4, 10);
        let mut game = Game::with_seed(config, 5).unwrap();

        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.primary_click((0, 0)), RevealOutcome::NoChange);
        assert_eq!(game.scene().overlay, Some(Overlay::WIN));

        game.restart().unwrap();
        assert_eq!(game.state(), GameState::Won);
    }
}

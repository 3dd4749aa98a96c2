use anyhow::Context;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use crossterm::{cursor, execute};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color as TermColor, Modifier, Style};
use ratatui::text::{Span, Spans, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};
use std::io;
use sweeper_core::{Color, Game, GameState, Glyph, InputEvent, Position, RESTART_KEY};

/// Terminal columns used to draw one cell, cells are one row tall.
const CELL_COLUMNS: u16 = 2;

/// Puts the terminal back into cooked mode when dropped, including on early error returns.
struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode().context("could not enable raw mode")?;
        let guard = Self {
            restore: restore_terminal,
        };
        execute!(io::stdout(), EnableMouseCapture, terminal::EnterAlternateScreen)
            .context("could not set up the terminal")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = (self.restore)() {
            log::error!("could not restore the terminal: {}", err);
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show
    )?;
    raw
}

pub(crate) fn run(game: &mut Game) -> anyhow::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    event_loop(&mut terminal, game)
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, game: &mut Game) -> anyhow::Result<()> {
    // top-left terminal cell of the board, known after the first frame
    let mut board_origin = None;

    loop {
        terminal.draw(|f| board_origin = draw(f, game))?;

        let input = match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
                KeyCode::Char(key) => Some(InputEvent::Key(key)),
                _ => None,
            },
            Event::Mouse(mouse) => board_origin
                .and_then(|origin| mouse_input(mouse, origin, game.config().cell_size)),
            _ => None,
        };

        if let Some(input) = input {
            let updated = game.handle_event(input);
            log::trace!("{:?} -> updated: {}", input, updated);
        }
    }
}

/// Translates a mouse press into board pixels relative to `origin`.
///
/// Terminal offsets fit in 17 bits and cell sizes in 32, so the products cannot overflow an `i64`.
fn mouse_input(mouse: MouseEvent, origin: (u16, u16), cell_size: u32) -> Option<InputEvent> {
    let cell_size = i64::from(cell_size);
    let column = i64::from(mouse.column) - i64::from(origin.0);
    let row = i64::from(mouse.row) - i64::from(origin.1);
    let pos = Position::new(
        (column * cell_size).div_euclid(i64::from(CELL_COLUMNS)),
        row * cell_size,
    );

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PrimaryClick(pos)),
        MouseEventKind::Down(MouseButton::Right) => Some(InputEvent::SecondaryClick(pos)),
        _ => None,
    }
}

fn draw<B: Backend>(f: &mut Frame<B>, game: &Game) -> Option<(u16, u16)> {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    let scene = game.scene();
    let (rows, cols) = scene.glyphs.dim();
    let board_width = (cols as u16).saturating_mul(CELL_COLUMNS).saturating_add(2);
    let board_height = (rows as u16).saturating_add(2);
    let board_area = center_rect(board_width, board_height, chunks[0]);

    let lines: Vec<Spans> = scene
        .glyphs
        .outer_iter()
        .map(|row| Spans::from(row.iter().map(|&glyph| glyph_span(glyph)).collect::<Vec<_>>()))
        .collect();
    let board = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Minesweeper ")
            .title_alignment(Alignment::Center),
    );
    f.render_widget(board, board_area);

    if let Some(overlay) = scene.overlay {
        let text = format!(" {} ", overlay.text);
        let banner_area = center_rect(text.len() as u16 + 2, 3, board_area);
        let banner = Paragraph::new(Spans::from(Span::styled(
            text,
            Style::default()
                .fg(term_color(overlay.color))
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(Clear, banner_area);
        f.render_widget(banner, banner_area);
    }

    let state = match game.state() {
        GameState::Playing => "Playing",
        GameState::Won => "Won",
        GameState::Lost => "Lost",
    };
    let status = Paragraph::new(Spans::from(vec![
        Span::raw(format!(" {}  Mines: {} ", state, game.mines_left())),
        Span::styled(
            format!(" L-Click reveal  R-Click flag  {}: restart  q: quit ", RESTART_KEY),
            Style::default().fg(TermColor::Yellow),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    Some((board_area.x + 1, board_area.y + 1))
}

fn glyph_span(glyph: Glyph) -> Span<'static> {
    let text = match glyph {
        Glyph::Hidden | Glyph::Blank => "  ".to_string(),
        Glyph::Flag => " ⚑".to_string(),
        Glyph::Mine => " ●".to_string(),
        Glyph::Number(count) => format!(" {}", count),
    };
    let mut style = Style::default().bg(term_color(glyph.background()));
    if let Some(color) = glyph.color() {
        style = style.fg(term_color(color)).add_modifier(Modifier::BOLD);
    }
    Span::styled(text, style)
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Black => TermColor::Black,
        Color::Blue => TermColor::Blue,
        Color::Gray => TermColor::Gray,
        Color::Green => TermColor::Green,
        Color::Magenta => TermColor::Magenta,
        Color::Orange => TermColor::Rgb(255, 140, 0),
        Color::Red => TermColor::Red,
        Color::White => TermColor::White,
    }
}

fn center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width - width) / 2;
    let y = r.y + (r.height - height) / 2;
    Rect::new(x, y, width, height)
}

use std::time::Duration;

use blockfall_engine::Game;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use log::{debug, info};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::Text,
    widgets::{Block as BlockWidget, BorderType},
};

use crate::ui::widgets::{BoardDisplay, BoardOverlay, StatsDisplay, style};

#[derive(Debug)]
pub struct PlayScreen {
    game: Game,
    is_paused: bool,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            is_paused: false,
            is_exiting: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    fn is_playing(&self) -> bool {
        !self.is_paused && !self.game.is_game_over()
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        let is_playing = self.is_playing();
        let is_game_over = self.game.is_game_over();
        match key.code {
            KeyCode::Left if is_playing => _ = self.game.move_left(),
            KeyCode::Right if is_playing => _ = self.game.move_right(),
            KeyCode::Down if is_playing => _ = self.game.soft_drop(),
            KeyCode::Up if is_playing => _ = self.game.rotate_piece(),
            KeyCode::Char(' ') if is_playing => _ = self.game.drop_piece(),
            KeyCode::Char('p' | 'P') if !is_game_over => {
                self.is_paused = !self.is_paused;
                debug!("paused: {}", self.is_paused);
            }
            KeyCode::Char('r' | 'R') if is_game_over => self.game.reset(),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
                info!("quit requested");
                self.is_exiting = true;
            }
            _ => {}
        }
    }

    pub fn update(&mut self, elapsed: Duration) {
        if !self.is_playing() {
            return;
        }
        _ = self.game.tick(elapsed);
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let overlay = if self.game.is_game_over() {
            Some(BoardOverlay::GameOver)
        } else if self.is_paused {
            Some(BoardOverlay::Paused)
        } else {
            None
        };

        let mut board_display = BoardDisplay::new(self.game.board(), self.game.config().cell_size)
            .block(BlockWidget::bordered().border_type(BorderType::Rounded))
            .overlay(overlay);
        if !self.game.is_game_over() {
            board_display = board_display
                .ghost(self.game.ghost_piece())
                .falling_piece(*self.game.current_piece());
        }
        let stats_display = StatsDisplay::new(self.game.stats())
            .block(BlockWidget::bordered().title(" STATS "));

        let help_text = if self.game.is_game_over() {
            "Controls: R (Restart) | Q (Quit)"
        } else if self.is_paused {
            "Controls: P (Resume) | Q (Quit)"
        } else {
            "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Hard Drop) | P (Pause) | Q (Quit)"
        };
        let help_text = Text::from(help_text).style(style::HELP).centered();

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(board_display.height()),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(frame.area());
        let [board_area, stats_area] = Layout::horizontal([
            Constraint::Length(board_display.width()),
            Constraint::Length(stats_display.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);
        let [stats_area, _] = Layout::vertical([
            Constraint::Length(stats_display.height()),
            Constraint::Fill(1),
        ])
        .areas(stats_area);

        frame.render_widget(board_display, board_area);
        frame.render_widget(stats_display, stats_area);
        frame.render_widget(help_text, help_area);
    }
}

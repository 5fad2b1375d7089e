use crate::ai::MinimaxAgent;
use crate::config::AppConfig;
use crate::error::{BoardError, MoveError};
use crate::game::{GameOutcome, GameState, Player};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    game_state: GameState,
    ai: MinimaxAgent,
    rows: usize,
    cols: usize,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, BoardError> {
        let rows = config.board.rows;
        let cols = config.board.cols;
        Ok(App {
            game_state: GameState::new(rows, cols)?,
            ai: MinimaxAgent::new(config.search.depth),
            rows,
            cols,
            selected_column: cols / 2, // Start in middle
            should_quit: false,
            message: None,
        })
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.cols {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        // Dimensions were validated when the app was built
        if let Ok(state) = GameState::new(self.rows, self.cols) {
            self.game_state = state;
        }
        self.selected_column = self.cols / 2;
        self.message = Some("New game started!".to_string());
    }

    /// Drop the human's piece in the selected column, then let the AI answer
    fn drop_piece(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        match self.game_state.apply_move(self.selected_column) {
            Ok(()) => {
                if !self.announce_outcome() {
                    self.ai_turn();
                }
            }
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn(_)) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    fn ai_turn(&mut self) {
        let Some(col) = self.ai.get_ai_move(self.game_state.board_mut()) else {
            return;
        };
        match self.game_state.apply_move(col) {
            Ok(()) => {
                if !self.announce_outcome() {
                    self.message = Some(format!("AI plays in column {col}"));
                }
            }
            Err(err) => {
                log::error!("AI chose column {col}: {err}");
                self.message = Some(format!("AI error: {err}"));
            }
        }
    }

    /// Set the end-of-game message. Returns true if the game is over.
    fn announce_outcome(&mut self) -> bool {
        let Some(outcome) = self.game_state.outcome() else {
            return false;
        };
        self.message = Some(match outcome {
            GameOutcome::Winner(Player::Human) => "You win!".to_string(),
            GameOutcome::Winner(Player::Ai) => "AI wins!".to_string(),
            GameOutcome::Draw => "It's a draw!".to_string(),
        });
        true
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let mode = format!("Human vs Minimax (depth {})", self.ai.depth());
        super::game_view::render(
            frame,
            &self.game_state,
            self.selected_column,
            &self.message,
            &mode,
        );
    }
}

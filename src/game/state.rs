use crate::error::{BoardError, MoveError};

use super::{Board, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// One game session: the board, whose turn it is, and the result once decided.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state on a standard board
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Human, // Human starts
            outcome: None,
        }
    }

    /// Create initial game state on a custom-sized board
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        Ok(GameState {
            board: Board::with_size(rows, cols)?,
            current_player: Player::Human,
            outcome: None,
        })
    }

    /// Hand the first move to `player` instead of the human.
    pub fn with_first_player(mut self, player: Player) -> Self {
        self.current_player = player;
        self
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Exclusive access for an engine's search. Agents restore the board
    /// before returning.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.valid_moves()
    }

    /// Play `column` for the current player, then settle the outcome and pass
    /// the turn.
    pub fn apply_move(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let mover = self.current_player;
        self.board.drop_piece(column, mover)?;

        if self.board.has_four_in_row(mover) {
            self.outcome = Some(GameOutcome::Winner(mover));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }
        if let Some(outcome) = self.outcome {
            log::info!("game over: {outcome:?}");
        }

        self.current_player = mover.other();

        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_player(), Player::Human);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_actions().len(), 7);
    }

    #[test]
    fn test_custom_size() {
        let state = GameState::new(5, 8).unwrap();
        assert_eq!(state.legal_actions().len(), 8);
        assert_eq!(state.board().rows(), 5);
        assert!(GameState::new(3, 3).is_err());
    }

    #[test]
    fn test_with_first_player() {
        let mut state = GameState::initial().with_first_player(Player::Ai);
        assert_eq!(state.current_player(), Player::Ai);
        state.apply_move(0).unwrap();
        assert_eq!(state.board().get(5, 0), Cell::Ai);
        assert_eq!(state.current_player(), Player::Human);
    }

    #[test]
    fn test_apply_move() {
        let mut state = GameState::initial();
        state.apply_move(3).unwrap();

        assert_eq!(state.current_player(), Player::Ai);
        assert_eq!(state.board().get(5, 3), Cell::Human);
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let mut state = GameState::initial();
        assert_eq!(state.apply_move(7), Err(MoveError::InvalidColumn(7)));
        assert_eq!(state.current_player(), Player::Human);
        assert_eq!(state.board(), &Board::new());
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::initial();

        // Human wins with horizontal line
        for col in 0..4 {
            state.apply_move(col).unwrap(); // Human
            if col < 3 {
                state.apply_move(col).unwrap(); // AI (different row)
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::Human)));
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.apply_move(5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw() {
        let mut state = GameState::new(4, 4).unwrap();

        // Final rows alternate XXOO / OOXX, so no line of four on any axis
        let pattern = [2, 0, 0, 1, 1, 2, 3, 3, 2, 0, 0, 1, 1, 2, 3, 3];
        for &col in &pattern {
            state.apply_move(col).unwrap();
        }

        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
    }
}

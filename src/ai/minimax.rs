use crate::game::{Board, Cell, Player, WINDOW};

use super::agent::Agent;

/// Terminal score for a decided game, positive when the AI has won.
pub const WIN_SCORE: i64 = 1_000_000_000;

/// Lookahead used when no depth is configured.
pub const DEFAULT_DEPTH: usize = 4;

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> i64;
}

/// Default heuristic: a center-column bonus plus a score for every 4-cell
/// window on the board.
pub struct WindowHeuristic;

impl WindowHeuristic {
    const CENTER_WEIGHT: i64 = 3;

    /// Score one window for `player`. Only the opponent's open three is
    /// penalized.
    pub fn evaluate_window(window: &[Cell; WINDOW], player: Player) -> i64 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();
        let own = window.iter().filter(|&&c| c == own_cell).count();
        let opp = window.iter().filter(|&&c| c == opp_cell).count();
        let empty = WINDOW - own - opp;

        if own == 4 {
            100
        } else if own == 3 && empty == 1 {
            5
        } else if own == 2 && empty == 2 {
            2
        } else if opp == 3 && empty == 1 {
            -4
        } else {
            0
        }
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i64 {
        let own_cell = player.to_cell();
        let center = board.center_column();

        let center_count = (0..board.rows())
            .filter(|&row| board.get(row, center) == own_cell)
            .count() as i64;
        let mut score = center_count * Self::CENTER_WEIGHT;

        for window in board.windows() {
            score += Self::evaluate_window(&window, player);
        }

        score
    }
}

/// Static evaluation of `board` for `player` with the default heuristic.
pub fn evaluate_board(board: &Board, player: Player) -> i64 {
    WindowHeuristic.evaluate(board, player)
}

/// Outcome of a full search from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Chosen column; `None` when the root is already decided or has no moves.
    pub column: Option<usize>,
    /// Score from the AI's point of view.
    pub score: i64,
    /// Nodes visited, leaves included.
    pub nodes: u64,
}

/// Minimax agent with alpha-beta pruning. Always searches as [`Player::Ai`],
/// the maximizing side, against [`Player::Human`].
pub struct MinimaxAgent {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
    nodes: u64,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        MinimaxAgent {
            depth,
            heuristic: Box::new(WindowHeuristic),
            nodes: 0,
        }
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            depth,
            heuristic,
            nodes: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Nodes visited by the most recent `get_ai_move` or `search`. Zero when
    /// the move came from the immediate win/block check.
    pub fn last_search_nodes(&self) -> u64 {
        self.nodes
    }

    /// Pick the AI's column: an immediate win, else a block of the human's
    /// immediate win, else the minimax choice. When the search root is a leaf
    /// (depth 0, or a game already decided) the first valid column is played.
    /// `None` only when no column is playable. The board is unchanged on return.
    pub fn get_ai_move(&mut self, board: &mut Board) -> Option<usize> {
        self.nodes = 0;

        if let Some(col) = immediate_win(board, Player::Ai) {
            log::debug!("taking immediate win in column {col}");
            return Some(col);
        }
        if let Some(col) = immediate_win(board, Player::Human) {
            log::debug!("blocking human win in column {col}");
            return Some(col);
        }

        let result = self.search(board);
        log::debug!(
            "minimax depth {} chose {:?} (score {}, {} nodes)",
            self.depth,
            result.column,
            result.score,
            result.nodes
        );
        result
            .column
            .or_else(|| board.valid_moves().first().copied())
    }

    /// Full-width alpha-beta search from the root at the configured depth.
    pub fn search(&mut self, board: &mut Board) -> SearchResult {
        self.nodes = 0;
        let (column, score) = self.minimax(board, self.depth, i64::MIN, i64::MAX, true);
        SearchResult {
            column,
            score,
            nodes: self.nodes,
        }
    }

    /// Minimax with alpha-beta pruning. `i64::MIN` / `i64::MAX` stand in for
    /// the infinite bounds. Leaves return no column.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: usize,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
    ) -> (Option<usize>, i64) {
        self.nodes += 1;

        if board.has_four_in_row(Player::Ai) {
            return (None, WIN_SCORE);
        }
        if board.has_four_in_row(Player::Human) {
            return (None, -WIN_SCORE);
        }
        if board.is_full() {
            return (None, 0);
        }
        if depth == 0 {
            return (None, self.heuristic.evaluate(board, Player::Ai));
        }

        let moves = board.valid_moves();
        let mut best_column = moves.first().copied();

        if maximizing {
            let mut value = i64::MIN;
            for col in moves {
                board.place(col, Player::Ai);
                let (_, score) = self.minimax(board, depth - 1, alpha, beta, false);
                board.undo(col);

                if score > value {
                    value = score;
                    best_column = Some(col);
                }
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
            (best_column, value)
        } else {
            let mut value = i64::MAX;
            for col in moves {
                board.place(col, Player::Human);
                let (_, score) = self.minimax(board, depth - 1, alpha, beta, true);
                board.undo(col);

                if score < value {
                    value = score;
                    best_column = Some(col);
                }
                beta = beta.min(value);
                if alpha >= beta {
                    break;
                }
            }
            (best_column, value)
        }
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, board: &mut Board) -> Option<usize> {
        self.get_ai_move(board)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

/// First column, in ascending order, where `player` completes four in a row.
fn immediate_win(board: &mut Board, player: Player) -> Option<usize> {
    for col in board.valid_moves() {
        board.place(col, player);
        let wins = board.has_four_in_row(player);
        board.undo(col);
        if wins {
            return Some(col);
        }
    }
    None
}

/// Choose the AI's column on `board` with a fresh agent of the given depth.
pub fn get_ai_move(board: &mut Board, depth: usize) -> Option<usize> {
    MinimaxAgent::new(depth).get_ai_move(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plain minimax without pruning, for comparing root scores.
    fn exhaustive(board: &mut Board, depth: usize, maximizing: bool, nodes: &mut u64) -> i64 {
        *nodes += 1;
        if board.has_four_in_row(Player::Ai) {
            return WIN_SCORE;
        }
        if board.has_four_in_row(Player::Human) {
            return -WIN_SCORE;
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return evaluate_board(board, Player::Ai);
        }
        let player = if maximizing { Player::Ai } else { Player::Human };
        let scores: Vec<i64> = board
            .valid_moves()
            .into_iter()
            .map(|col| {
                board.place(col, player);
                let score = exhaustive(board, depth - 1, !maximizing, nodes);
                board.undo(col);
                score
            })
            .collect();
        if maximizing {
            scores.into_iter().max().unwrap()
        } else {
            scores.into_iter().min().unwrap()
        }
    }

    struct Flat;

    impl Heuristic for Flat {
        fn evaluate(&self, _board: &Board, _player: Player) -> i64 {
            0
        }
    }

    // --- Heuristic tests ---

    #[test]
    fn heuristic_empty_board_is_zero() {
        let board = Board::new();
        assert_eq!(evaluate_board(&board, Player::Ai), 0);
        assert_eq!(evaluate_board(&board, Player::Human), 0);
    }

    #[test]
    fn window_scores() {
        use crate::game::Cell::{Ai as O, Empty as E, Human as X};
        let p = Player::Ai;
        assert_eq!(WindowHeuristic::evaluate_window(&[O, O, O, O], p), 100);
        assert_eq!(WindowHeuristic::evaluate_window(&[O, O, E, O], p), 5);
        assert_eq!(WindowHeuristic::evaluate_window(&[E, O, O, E], p), 2);
        assert_eq!(WindowHeuristic::evaluate_window(&[X, X, E, X], p), -4);
        assert_eq!(WindowHeuristic::evaluate_window(&[O, O, O, X], p), 0);
        assert_eq!(WindowHeuristic::evaluate_window(&[O, O, X, E], p), 0);
        assert_eq!(WindowHeuristic::evaluate_window(&[X, X, X, X], p), 0);
        assert_eq!(WindowHeuristic::evaluate_window(&[X, X, E, E], p), 0);
        assert_eq!(WindowHeuristic::evaluate_window(&[E, E, E, O], p), 0);
    }

    #[test]
    fn heuristic_center_bonus() {
        let mut board = Board::new();
        board.place(3, Player::Ai);
        assert_eq!(evaluate_board(&board, Player::Ai), 3);
        assert_eq!(evaluate_board(&board, Player::Human), 0);

        let mut edge = Board::new();
        edge.place(0, Player::Ai);
        assert_eq!(evaluate_board(&edge, Player::Ai), 0);
    }

    #[test]
    fn heuristic_three_in_a_row_exact() {
        let mut board = Board::new();
        for col in 0..3 {
            board.place(col, Player::Ai);
        }
        // OOO. scores 5, OO.. scores 2
        assert_eq!(evaluate_board(&board, Player::Ai), 7);
        // Seen by the human only the open three counts
        assert_eq!(evaluate_board(&board, Player::Human), -4);
    }

    #[test]
    fn heuristic_counts_every_axis() {
        let board = Board::from_rows(&[
            ".......",
            ".......",
            "...O...",
            "..OO...",
            ".OOO...",
            "OOOO...",
        ]);
        let score = evaluate_board(&board, Player::Ai);
        assert!(score > 100 * 3, "expected several completed windows, got {score}");
    }

    // --- Minimax leaf tests ---

    #[test]
    fn leaf_scores() {
        let mut agent = MinimaxAgent::new(4);

        let mut ai_won = Board::from_rows(&[".......", ".......", "O......", "O......", "OX.....", "OXX...."]);
        assert_eq!(agent.minimax(&mut ai_won, 4, i64::MIN, i64::MAX, true), (None, WIN_SCORE));

        let mut human_won = Board::from_rows(&[".......", ".......", ".......", ".......", "OOO....", "XXXX..."]);
        assert_eq!(
            agent.minimax(&mut human_won, 4, i64::MIN, i64::MAX, false),
            (None, -WIN_SCORE)
        );

        let mut drawn = Board::from_rows(&["XXOO", "OOXX", "XXOO", "OOXX"]);
        assert_eq!(agent.minimax(&mut drawn, 4, i64::MIN, i64::MAX, true), (None, 0));

        let mut open = Board::new();
        open.place(3, Player::Ai);
        assert_eq!(agent.minimax(&mut open, 0, i64::MIN, i64::MAX, false), (None, 3));
    }

    #[test]
    fn ai_win_takes_priority_over_human_win_at_leaf() {
        let mut board = Board::from_rows(&["O....", "O....", "O....", "OXXXX"]);
        assert!(board.has_four_in_row(Player::Ai));
        assert!(board.has_four_in_row(Player::Human));
        let mut agent = MinimaxAgent::new(2);
        assert_eq!(
            agent.minimax(&mut board, 2, i64::MIN, i64::MAX, false),
            (None, WIN_SCORE)
        );
    }

    // --- Move selection tests ---

    #[test]
    fn empty_board_opens_in_center() {
        let mut board = Board::new();
        assert_eq!(get_ai_move(&mut board, 4), Some(3));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn takes_winning_move_without_search() {
        // AI has three stacked in column 6; the human has nothing immediate
        let mut board = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            "......O",
            "...X..O",
            "..XX..O",
        ]);
        let mut agent = MinimaxAgent::new(4);
        assert_eq!(agent.get_ai_move(&mut board), Some(6));
        assert_eq!(agent.last_search_nodes(), 0);
    }

    #[test]
    fn prefers_win_over_block() {
        // The AI completes the bottom row in column 3 while the human
        // threatens column 6
        let mut board = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            "......X",
            "......X",
            "OOO...X",
        ]);
        let mut agent = MinimaxAgent::new(4);
        assert_eq!(agent.get_ai_move(&mut board), Some(3));
    }

    #[test]
    fn picks_lowest_winning_column() {
        // Columns 0 and 4 both finish the bottom row
        let mut board = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            ".......",
            ".X.X...",
            ".OOO.X.",
        ]);
        assert_eq!(get_ai_move(&mut board, 4), Some(0));
    }

    #[test]
    fn blocks_opponent_win() {
        // Human threatens column 3 on the bottom row; the AI cannot win at once
        let mut board = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            ".......",
            "OO.....",
            "XXX...O",
        ]);
        let mut agent = MinimaxAgent::new(4);
        assert_eq!(agent.get_ai_move(&mut board), Some(3));
        assert_eq!(agent.last_search_nodes(), 0);
    }

    #[test]
    fn blocks_first_of_two_threats() {
        let mut board = Board::from_rows(&[
            ".......",
            ".......",
            ".......",
            ".......",
            "..OO...",
            ".XXX.O.",
        ]);
        assert_eq!(get_ai_move(&mut board, 4), Some(0));
    }

    #[test]
    fn falls_back_to_search() {
        let mut board = Board::new();
        board.place(3, Player::Human);
        let mut agent = MinimaxAgent::new(3);
        let col = agent.get_ai_move(&mut board);
        assert!(col.is_some());
        assert!(agent.last_search_nodes() > 0);
    }

    #[test]
    fn depth_zero_still_moves() {
        let mut board = Board::new();
        assert_eq!(get_ai_move(&mut board, 0), Some(0));
        assert_eq!(board, Board::new());

        let mut board = Board::new();
        for _ in 0..board.rows() {
            board.place(0, Player::Ai);
            board.place(0, Player::Human);
        }
        assert_eq!(get_ai_move(&mut board, 0), Some(1));
    }

    #[test]
    fn random_positions_keep_board_and_pick_legal_column() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..60 {
            let rows = rng.random_range(4..=6);
            let cols = rng.random_range(4..=7);
            let mut board = Board::with_size(rows, cols).unwrap();
            let mut player = Player::Human;
            let moves = rng.random_range(0..rows * cols);
            for _ in 0..moves {
                let col = rng.random_range(0..cols);
                if board.place(col, player) {
                    player = player.other();
                }
            }

            let before = board.clone();
            let depth = rng.random_range(0..=3);
            let choice = get_ai_move(&mut board, depth);
            assert_eq!(board, before);
            match choice {
                Some(col) => assert!(board.is_valid_move(col)),
                None => assert!(board.is_full()),
            }
        }
    }

    #[test]
    fn full_board_has_no_move() {
        let mut board = Board::from_rows(&["XXOO", "OOXX", "XXOO", "OOXX"]);
        assert_eq!(get_ai_move(&mut board, 4), None);
        let mut agent = MinimaxAgent::new(4);
        let result = agent.search(&mut board);
        assert_eq!(result.column, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn ties_go_to_lowest_column() {
        let mut agent = MinimaxAgent::with_heuristic(2, Box::new(Flat));
        let mut board = Board::new();
        assert_eq!(agent.search(&mut board).column, Some(0));

        let mut player = Player::Human;
        for _ in 0..board.rows() {
            board.place(0, player);
            player = player.other();
        }
        board.place(1, Player::Ai);
        assert_eq!(agent.search(&mut board).column, Some(1));
    }

    // --- Board restoration and pruning tests ---

    #[test]
    fn search_leaves_board_unchanged() {
        let mut board = Board::from_rows(&[
            ".......",
            ".......",
            "...X...",
            "..OO...",
            "..XOX..",
            ".XOXO..",
        ]);
        let before = board.clone();
        let mut agent = MinimaxAgent::new(5);
        agent.search(&mut board);
        assert_eq!(board, before);
        agent.get_ai_move(&mut board);
        assert_eq!(board, before);
    }

    #[test]
    fn pruning_matches_exhaustive_scores() {
        let boards = [
            Board::new(),
            Board::from_rows(&[
                ".......",
                ".......",
                ".......",
                "...O...",
                "..XX...",
                ".OXOX..",
            ]),
            Board::from_rows(&["....", "....", ".X..", "OXO."]),
            Board::from_rows(&[".....", ".....", "..O..", "..X..", ".XOX."]),
        ];
        for (i, board) in boards.into_iter().enumerate() {
            for depth in 1..=4 {
                let mut pruned_board = board.clone();
                let mut agent = MinimaxAgent::new(depth);
                let pruned = agent.search(&mut pruned_board);

                let mut full_board = board.clone();
                let mut nodes = 0;
                let full = exhaustive(&mut full_board, depth, true, &mut nodes);

                assert_eq!(pruned.score, full, "board {i} depth {depth}");
                assert!(pruned.nodes <= nodes, "board {i} depth {depth}");
                assert_eq!(pruned_board, board);
            }
        }
    }

    #[test]
    fn pruning_skips_nodes() {
        let mut board = Board::new();
        let mut agent = MinimaxAgent::new(4);
        let pruned = agent.search(&mut board);

        let mut nodes = 0;
        exhaustive(&mut board, 4, true, &mut nodes);
        assert!(pruned.nodes < nodes, "{} should be fewer than {nodes}", pruned.nodes);
    }

    // --- Agent trait tests ---

    #[test]
    fn name_is_minimax() {
        let agent = MinimaxAgent::default();
        assert_eq!(agent.name(), "Minimax");
        assert_eq!(agent.depth(), DEFAULT_DEPTH);
    }
}

//! Move selection: the agent trait, the minimax search engine with its window
//! heuristic, and a random opponent.

mod agent;
pub mod minimax;
mod random;

pub use agent::Agent;
pub use minimax::{
    evaluate_board, get_ai_move, Heuristic, MinimaxAgent, SearchResult, WindowHeuristic,
    DEFAULT_DEPTH, WIN_SCORE,
};
pub use random::RandomAgent;

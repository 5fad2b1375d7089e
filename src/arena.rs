//! Headless games between two agents, used to measure the minimax player
//! against a random opponent.

use crate::ai::{Agent, MinimaxAgent, RandomAgent};
use crate::error::MatchError;
use crate::game::{GameOutcome, GameState, Player};

/// Win/loss/draw tally from the minimax agent's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl MatchSummary {
    pub fn games(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    pub fn win_rate(&self) -> f64 {
        if self.games() == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games() as f64
    }

    fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Winner(Player::Ai) => self.wins += 1,
            GameOutcome::Winner(Player::Human) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }
}

/// Play one game to completion. `ai` moves for [`Player::Ai`], `opponent` for
/// [`Player::Human`]; whoever `state` says is to move starts.
pub fn play_game(
    mut state: GameState,
    ai: &mut dyn Agent,
    opponent: &mut dyn Agent,
) -> Result<GameOutcome, MatchError> {
    loop {
        if let Some(outcome) = state.outcome() {
            return Ok(outcome);
        }

        let agent: &mut dyn Agent = match state.current_player() {
            Player::Ai => &mut *ai,
            Player::Human => &mut *opponent,
        };
        let column = agent
            .select_action(state.board_mut())
            .ok_or_else(|| MatchError::NoMove {
                agent: agent.name().to_string(),
            })?;
        state
            .apply_move(column)
            .map_err(|source| MatchError::IllegalMove {
                agent: agent.name().to_string(),
                source,
            })?;
    }
}

/// Play `games` games of minimax (at `depth`) against a random agent on a
/// `rows`x`cols` board, alternating who moves first.
pub fn play_match(
    rows: usize,
    cols: usize,
    depth: usize,
    games: usize,
    seed: Option<u64>,
) -> Result<MatchSummary, MatchError> {
    let mut minimax = MinimaxAgent::new(depth);
    let mut random = match seed {
        Some(seed) => RandomAgent::with_seed(seed),
        None => RandomAgent::new(),
    };
    let mut summary = MatchSummary::default();

    for game in 0..games {
        let first = if game % 2 == 0 { Player::Human } else { Player::Ai };
        let state = GameState::new(rows, cols)?.with_first_player(first);
        let outcome = play_game(state, &mut minimax, &mut random)?;
        log::debug!("game {} ({} first): {:?}", game + 1, first.name(), outcome);
        summary.record(outcome);
    }

    log::info!(
        "minimax depth {depth} vs random: {} wins, {} losses, {} draws",
        summary.wins,
        summary.losses,
        summary.draws
    );
    Ok(summary)
}

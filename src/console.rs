//! Line-oriented game against the AI over any reader/writer pair.

use std::io::{self, BufRead, Write};

use crate::ai::MinimaxAgent;
use crate::game::{Board, GameOutcome, GameState, Player};

const BANNER_WIDTH: usize = 30;

fn print_board<W: Write>(output: &mut W, board: &Board) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(output, "\n{rule}")?;
    writeln!(output, "  CONNECT FOUR GAME")?;
    writeln!(output, "{rule}")?;
    writeln!(output, "{board}\n")
}

/// Play `state` to the end, reading the human's columns from `input`.
/// Returns `None` if the human quits (`q` or end of input) first.
pub fn play<R: BufRead, W: Write>(
    state: &mut GameState,
    ai: &mut MinimaxAgent,
    input: R,
    output: &mut W,
) -> io::Result<Option<GameOutcome>> {
    let last_col = state.board().cols() - 1;
    writeln!(output, "Welcome to Connect Four!")?;
    writeln!(
        output,
        "You are {}, AI is {}",
        Player::Human.symbol(),
        Player::Ai.symbol()
    )?;
    writeln!(output, "Enter column numbers (0-{last_col}) to make your moves")?;

    let mut lines = input.lines();
    while !state.is_terminal() {
        print_board(output, state.board())?;

        match state.current_player() {
            Player::Human => {
                write!(output, "Your turn! Enter column (0-{last_col}): ")?;
                output.flush()?;

                let Some(line) = lines.next() else {
                    writeln!(output)?;
                    return Ok(None);
                };
                let line = line?;
                let line = line.trim();
                if line.eq_ignore_ascii_case("q") {
                    return Ok(None);
                }

                let Ok(number) = line.parse::<i64>() else {
                    writeln!(output, "Please enter a valid number!")?;
                    continue;
                };
                let applied = usize::try_from(number)
                    .ok()
                    .map(|col| state.apply_move(col));
                if !matches!(applied, Some(Ok(()))) {
                    writeln!(output, "Invalid move! Column is full or out of range.")?;
                    continue;
                }
            }
            Player::Ai => {
                writeln!(output, "AI is thinking...")?;
                let col = ai
                    .get_ai_move(state.board_mut())
                    .ok_or_else(|| io::Error::other("AI found no playable column"))?;
                state.apply_move(col).map_err(io::Error::other)?;
                writeln!(output, "AI plays in column {col}")?;
            }
        }
    }

    print_board(output, state.board())?;
    let outcome = state.outcome();
    match outcome {
        Some(GameOutcome::Winner(Player::Human)) => {
            writeln!(output, "🎉 Congratulations! You won!")?
        }
        Some(GameOutcome::Winner(Player::Ai)) => {
            writeln!(output, "🤖 AI wins! Better luck next time!")?
        }
        Some(GameOutcome::Draw) => writeln!(output, "It's a draw!")?,
        None => {}
    }
    Ok(outcome)
}

use crate::game::Board;

/// Universal interface for anything that can choose a column.
pub trait Agent {
    /// Select a column for the side to move on `board`, or `None` when no
    /// column is playable. The board must be left exactly as it was given.
    fn select_action(&mut self, board: &mut Board) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

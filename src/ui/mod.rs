//! Terminal UI: play Connect Four against the minimax AI with the keyboard.

mod app;
mod game_view;

pub use app::App;

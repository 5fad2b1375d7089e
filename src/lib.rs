//! # Connect Four
//!
//! A Connect Four game against a minimax AI with alpha-beta pruning. Play in a
//! terminal UI built with Ratatui, in a plain line-oriented console, or pit the
//! AI against a random opponent headlessly.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, game session
//! - [`ai`] — Agent trait, minimax search and window heuristic, random agent
//! - [`arena`] — Headless matches between agents
//! - [`console`] — Line-oriented game loop over any reader/writer
//! - [`ui`] — Terminal UI game view
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod ui;

//! Tic-Tac-Toe Core - Rules and perfect-play engine
//!
//! This crate provides the decision engine for 3x3 tic-tac-toe:
//! - Board model (cells, markers, coordinates, text form)
//! - Rules: turn order, legal moves, transitions, winner and terminal checks
//! - Exhaustive minimax search with root-level win/loss cutoff
//! - Agents and a runner for single games and multi-game matches

pub mod board;
pub mod error;
pub mod game;
pub mod search;
pub mod runner;

// Re-exports for convenient access
pub use board::{Action, Board, Cell, Player, BOARD_SIZE, LINES};
pub use error::GameError;
pub use game::Outcome;
pub use search::{best_move, max_value, min_value};
pub use runner::{
    play_game, run_match, Agent, AgentKind, GameRecord, MatchConfig, MatchGame, MatchResults,
    MinimaxAgent, RandomAgent,
};

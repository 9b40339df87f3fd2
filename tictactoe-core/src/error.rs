//! Error type for board construction and move application

use crate::board::Player;

/// Errors raised by the rules layer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid action ({row}, {col}): coordinates must lie in 0..=2")]
    InvalidAction { row: i8, col: i8 },

    #[error("cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: i8, col: i8 },

    #[error("utility requested for a board that is still in progress")]
    NotTerminal,

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("{player} produced no move on an unfinished board")]
    NoMove { player: Player },
}

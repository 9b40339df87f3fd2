//! Best-move command - query the engine for one position
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: analyze(), report()
//! - Level 3: formatting utilities

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use tictactoe_core::{best_move, Action, Board, Outcome, Player};

use crate::board_input::BoardArgs;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct BestMoveArgs {
    #[command(flatten)]
    pub input: BoardArgs,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
}

/// What the engine has to say about a position
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Analysis {
    InProgress { to_move: Player, action: Action },
    Finished { outcome: Outcome },
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: BestMoveArgs) -> Result<()> {
    let board = args.input.load()?;
    tracing::info!("Analyzing board:\n{}", board);

    let analysis = analyze(&board)?;
    report(&board, &analysis, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn analyze(board: &Board) -> Result<Analysis> {
    match best_move(board) {
        Some(action) => Ok(Analysis::InProgress {
            to_move: board.current_player(),
            action,
        }),
        None => Ok(Analysis::Finished {
            outcome: board.utility()?,
        }),
    }
}

fn report(board: &Board, analysis: &Analysis, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
        return Ok(());
    }

    println!("{}\n", board);
    match analysis {
        Analysis::InProgress { to_move, action } => {
            println!("{} to move: play row {}, col {}", to_move, action.row, action.col);
        }
        Analysis::Finished { outcome } => {
            println!("Game over: {}", describe_outcome(*outcome));
        }
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - UTILITIES
// ============================================================================

pub fn describe_outcome(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::XWins => "X wins",
        Outcome::OWins => "O wins",
        Outcome::Draw => "draw",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_in_progress() {
        let board: Board = "XX. OO. ...".parse().unwrap();
        let analysis = analyze(&board).unwrap();
        assert_eq!(
            analysis,
            Analysis::InProgress {
                to_move: Player::X,
                action: Action::new(0, 2),
            }
        );
    }

    #[test]
    fn test_analyze_finished() {
        let board: Board = "XOX XOO OXX".parse().unwrap();
        let analysis = analyze(&board).unwrap();
        assert_eq!(analysis, Analysis::Finished { outcome: Outcome::Draw });
    }

    #[test]
    fn test_analysis_json_shape() {
        let analysis = Analysis::InProgress {
            to_move: Player::O,
            action: Action::new(2, 1),
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["status"], "in_progress");
        assert_eq!(value["to_move"], "O");
        assert_eq!(value["action"]["row"], 2);
        assert_eq!(value["action"]["col"], 1);
    }
}

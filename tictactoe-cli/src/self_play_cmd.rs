//! Self-play command - the engine plays both sides from the empty board

use anyhow::Result;
use clap::Args;

use tictactoe_core::{play_game, Board, MinimaxAgent};

use crate::best_move_cmd::describe_outcome;

#[derive(Args)]
pub struct SelfPlayArgs {
    /// Output the game record as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SelfPlayArgs) -> Result<()> {
    let record = play_game(&mut MinimaxAgent, &mut MinimaxAgent, Board::initial())?;

    tracing::info!(
        "Self-play finished after {} moves: {:?}",
        record.moves.len(),
        record.outcome
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let moves: Vec<String> = record.moves.iter().map(|a| a.to_string()).collect();
    println!("Moves: {}", moves.join(" "));
    println!("\n{}\n", record.final_board);
    println!("Result: {}", describe_outcome(record.outcome));
    Ok(())
}

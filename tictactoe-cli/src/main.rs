//! Tic-Tac-Toe CLI - Command-line interface
//!
//! Commands:
//! - best-move: Ask the engine for the optimal move on a board
//! - self-play: Engine plays both sides from the empty board
//! - match: Run many games between engine and random agents
//! - play: Play against the engine on the terminal

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

mod best_move_cmd;
mod board_input;
mod match_cmd;
mod play_cmd;
mod self_play_cmd;

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(about = "Perfect-play tic-tac-toe engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the optimal move for a board
    BestMove(best_move_cmd::BestMoveArgs),
    /// Let the engine play itself
    SelfPlay(self_play_cmd::SelfPlayArgs),
    /// Play a series of games between agents
    Match(match_cmd::MatchArgs),
    /// Play against the engine interactively
    Play(play_cmd::PlayArgs),
}

/// Log formatter writing to `writer`; stdout stays reserved for command output
fn build_subscriber<W>(filter: EnvFilter, writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

fn main() -> anyhow::Result<()> {
    // Initialize logging on stderr so --json output stays parseable
    tracing::subscriber::set_global_default(build_subscriber(
        EnvFilter::from_default_env(),
        std::io::stderr,
    ))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::BestMove(args) => best_move_cmd::run(args),
        Commands::SelfPlay(args) => self_play_cmd::run(args),
        Commands::Match(args) => match_cmd::run(args),
        Commands::Play(args) => play_cmd::run(args),
    }
}

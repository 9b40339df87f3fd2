//! Match command - play a series of games between two agents
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), report_results()
//! - Level 3: (delegated to tictactoe_core::run_match)
//! - Level 4: formatting utilities

use anyhow::{ensure, Result};
use clap::{Args, ValueEnum};

use tictactoe_core::{run_match, AgentKind, MatchConfig, MatchResults};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Agent selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AgentChoice {
    Minimax,
    Random,
}

impl From<AgentChoice> for AgentKind {
    fn from(choice: AgentChoice) -> Self {
        match choice {
            AgentChoice::Minimax => AgentKind::Minimax,
            AgentChoice::Random => AgentKind::Random,
        }
    }
}

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Agent playing X
    #[arg(long, value_enum, default_value = "minimax")]
    pub x: AgentChoice,

    /// Agent playing O
    #[arg(long, value_enum, default_value = "random")]
    pub o: AgentChoice,

    /// Swap sides every other game
    #[arg(long)]
    pub alternate: bool,

    /// Play games in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Seed for random agents (reproducible matches)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Build the match configuration
/// 2. Play the match
/// 3. Report results
pub fn run(args: MatchArgs) -> Result<()> {
    let config = build_config(&args)?;

    tracing::info!(
        "Starting match: {:?} vs {:?} ({} games)",
        config.x_agent,
        config.o_agent,
        config.games
    );

    let results = run_match(&config)?;
    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &MatchArgs) -> Result<MatchConfig> {
    ensure!(args.games > 0, "--games must be at least 1");

    let mut config = MatchConfig::new(args.x.into(), args.o.into()).with_games(args.games);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.alternate {
        config = config.alternating();
    }
    if args.parallel {
        config = config.parallel();
    }
    Ok(config)
}

fn report_results(results: &MatchResults, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!("X wins:      {} ({:.1}%)", results.x_wins, percent(results.x_wins, total));
    println!("O wins:      {} ({:.1}%)", results.o_wins, percent(results.o_wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} (X) vs {:?} (O) -> {:?} in {} moves",
            game.game_number,
            game.x_agent,
            game.o_agent,
            game.record.outcome,
            game.record.moves.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> MatchArgs {
        MatchArgs {
            games: 4,
            x: AgentChoice::Random,
            o: AgentChoice::Minimax,
            alternate: true,
            parallel: false,
            seed: Some(9),
            json: false,
        }
    }

    #[test]
    fn test_build_config() {
        let config = build_config(&args()).unwrap();
        assert_eq!(config.games, 4);
        assert_eq!(config.x_agent, AgentKind::Random);
        assert_eq!(config.o_agent, AgentKind::Minimax);
        assert_eq!(config.seed, Some(9));
        assert!(config.alternate_colors);
        assert!(!config.parallel);
    }

    #[test]
    fn test_build_config_rejects_zero_games() {
        let mut a = args();
        a.games = 0;
        assert!(build_config(&a).is_err());
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}

//! Play command - human against the engine on stdin/stdout

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Args, ValueEnum};

use tictactoe_core::{play_game, Action, Agent, Board, GameError, GameRecord, MinimaxAgent};

use crate::best_move_cmd::describe_outcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    X,
    O,
}

#[derive(Args)]
pub struct PlayArgs {
    /// Side the human plays (X moves first)
    #[arg(long, value_enum, default_value = "x")]
    pub human: Side,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let Some(record) = play_session(args.human, stdin.lock(), io::stdout())? else {
        println!("\nInput closed, game abandoned.");
        return Ok(());
    };

    println!("\n{}\n", record.final_board);
    println!("Result: {}", describe_outcome(record.outcome));
    Ok(())
}

/// One human-vs-engine game. None when the human's input runs out.
fn play_session<R: BufRead, W: Write>(
    side: Side,
    input: R,
    output: W,
) -> Result<Option<GameRecord>> {
    let mut human = HumanAgent::new(input, output);
    let mut engine = MinimaxAgent;

    let result = match side {
        Side::X => play_game(&mut human, &mut engine, Board::initial()),
        Side::O => play_game(&mut engine, &mut human, Board::initial()),
    };

    match result {
        Ok(record) => Ok(Some(record)),
        // The engine always moves on an unfinished board, so this is the human
        Err(GameError::NoMove { player }) => {
            tracing::info!("No input for {}, ending game", player);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Reads moves as "row col" (or "row,col") lines
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, board: &Board) -> io::Result<Option<Action>> {
        let legal = board.legal_actions();
        writeln!(self.output, "\n{}\n", board)?;

        loop {
            write!(self.output, "{} to move (row col): ", board.current_player())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match parse_coordinates(&line) {
                Some(action) if legal.contains(&action) => return Ok(Some(action)),
                Some(action) => writeln!(self.output, "{} is not available", action)?,
                None => writeln!(self.output, "Enter two numbers between 0 and 2")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn choose(&mut self, board: &Board) -> Option<Action> {
        match self.prompt(board) {
            Ok(action) => action,
            Err(e) => {
                tracing::warn!("Failed to read move: {}", e);
                None
            }
        }
    }
}

/// Parse "r c", "r,c" or "r, c"
fn parse_coordinates(line: &str) -> Option<Action> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Action::new(row, col))
}

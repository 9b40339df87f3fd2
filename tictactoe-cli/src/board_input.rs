//! Shared board input: inline text or a JSON file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tictactoe_core::Board;

#[derive(Args, Clone, Debug, Default)]
pub struct BoardArgs {
    /// Board as 9 symbols, row-major (X, O, '.'); '/', '|' and spaces are ignored
    #[arg(long, conflicts_with = "board_file")]
    pub board: Option<String>,

    /// Board JSON file ({"cells": [[...], [...], [...]]})
    #[arg(long, value_name = "FILE")]
    pub board_file: Option<PathBuf>,
}

impl BoardArgs {
    /// Resolve the requested board, falling back to the empty grid
    pub fn load(&self) -> Result<Board> {
        if let Some(text) = &self.board {
            return text
                .parse::<Board>()
                .with_context(|| format!("Failed to parse board: {:?}", text));
        }

        if let Some(path) = &self.board_file {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read board file: {}", path.display()))?;
            let board: Board = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse board JSON: {}", path.display()))?;
            board
                .validate()
                .with_context(|| format!("Rejected board in {}", path.display()))?;
            return Ok(board);
        }

        Ok(Board::initial())
    }
}

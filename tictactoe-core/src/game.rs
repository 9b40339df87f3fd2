//! Game rules: turn order, move generation, transitions and outcomes

use serde::{Deserialize, Serialize};

use crate::board::{Action, Board, Cell, Player, BOARD_SIZE, LINES};
use crate::error::GameError;

// ============================================================================
// OUTCOME
// ============================================================================

/// Resolved result of a finished game.
///
/// Variants are declared in ascending value order so that `Ord` matches the
/// signed utility: X maximizes, O minimizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    OWins,
    Draw,
    XWins,
}

impl Outcome {
    /// Signed utility: +1 X wins, 0 draw, -1 O wins
    pub fn value(self) -> i8 {
        match self {
            Outcome::OWins => -1,
            Outcome::Draw => 0,
            Outcome::XWins => 1,
        }
    }

    pub fn from_winner(winner: Option<Player>) -> Self {
        match winner {
            Some(Player::X) => Outcome::XWins,
            Some(Player::O) => Outcome::OWins,
            None => Outcome::Draw,
        }
    }

    /// Winning side, None for a draw
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::XWins => Some(Player::X),
            Outcome::OWins => Some(Player::O),
            Outcome::Draw => None,
        }
    }

    /// The best result `player` can hope for
    pub fn best_for(player: Player) -> Self {
        match player {
            Player::X => Outcome::XWins,
            Player::O => Outcome::OWins,
        }
    }
}

// ============================================================================
// RULES
// ============================================================================

impl Board {
    /// Side to move: X when mark counts are equal, otherwise O
    pub fn current_player(&self) -> Player {
        if self.count(Cell::X) == self.count(Cell::O) {
            Player::X
        } else {
            Player::O
        }
    }

    /// All empty squares in row-major order
    pub fn legal_actions(&self) -> Vec<Action> {
        self.iter()
            .filter(|&(_, _, cell)| cell == Cell::Empty)
            .map(|(r, c, _)| Action::new(r as i8, c as i8))
            .collect()
    }

    /// New board with the mover's marker placed at `action`.
    ///
    /// Rejects off-board coordinates and occupied squares. `self` is untouched.
    pub fn apply_action(&self, action: Action) -> Result<Board, GameError> {
        let (row, col) = action.position().ok_or(GameError::InvalidAction {
            row: action.row,
            col: action.col,
        })?;

        if self.rows()[row][col] != Cell::Empty {
            return Err(GameError::OccupiedCell {
                row: action.row,
                col: action.col,
            });
        }

        Ok(self.with_cell(row, col, self.current_player().cell()))
    }

    /// Owner of the first complete line (rows, diagonals, then columns)
    pub fn winner(&self) -> Option<Player> {
        let cells = self.rows();
        LINES.iter().find_map(|line| {
            let [(r0, c0), (r1, c1), (r2, c2)] = *line;
            let first = cells[r0][c0];
            if first != Cell::Empty && first == cells[r1][c1] && first == cells[r2][c2] {
                first.player()
            } else {
                None
            }
        })
    }

    /// Game over: someone has won or no empty square remains
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Resolved outcome, None while the game is in progress
    pub fn outcome(&self) -> Option<Outcome> {
        match self.winner() {
            Some(player) => Some(Outcome::from_winner(Some(player))),
            None if self.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }

    /// Utility of a finished board; `NotTerminal` while play continues
    pub fn utility(&self) -> Result<Outcome, GameError> {
        self.outcome().ok_or(GameError::NotTerminal)
    }

    /// Every (action, child board) pair reachable in one move, row-major
    pub fn successors(&self) -> impl Iterator<Item = (Action, Board)> + '_ {
        let mark = self.current_player().cell();
        (0..BOARD_SIZE * BOARD_SIZE).filter_map(move |i| {
            let (row, col) = (i / BOARD_SIZE, i % BOARD_SIZE);
            (self.rows()[row][col] == Cell::Empty).then(|| {
                (
                    Action::new(row as i8, col as i8),
                    self.with_cell(row, col, mark),
                )
            })
        })
    }
}

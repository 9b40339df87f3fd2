//! 3x3 board geometry, cells and markers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Board side length
pub const BOARD_SIZE: usize = 3;

/// Every winning line as (row, col) triples.
/// Order: three rows, main diagonal, anti-diagonal, three columns.
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
];

// ============================================================================
// CELLS AND PLAYERS
// ============================================================================

/// Contents of a single square
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Parse a single board symbol. Separators are handled by the caller.
    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// Marker occupying this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }
}

/// Marker placed by a side. X always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cell().symbol())
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// A move: (row, col) coordinates of the square to mark.
///
/// Coordinates are signed so that out-of-range requests from callers can be
/// represented and rejected by [`Board::apply_action`](crate::Board::apply_action).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub row: i8,
    pub col: i8,
}

impl Action {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if both coordinates are on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE as i8).contains(&self.row) && (0..BOARD_SIZE as i8).contains(&self.col)
    }

    /// Unsigned (row, col), or None when off the board
    pub fn position(&self) -> Option<(usize, usize)> {
        self.is_valid()
            .then(|| (self.row as usize, self.col as usize))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Immutable 3x3 snapshot, row-major. Copy it to derive new positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// The empty starting grid
    pub const fn initial() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Build a board from explicit rows. No turn-order validation is done;
    /// use [`FromStr`] for checked construction.
    pub const fn from_rows(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Cell at (row, col), or None when off the board
    pub fn cell(&self, action: Action) -> Option<Cell> {
        action.position().map(|(r, c)| self.cells[r][c])
    }

    /// Iterate (row, col, cell) in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, &cell)| (r, c, cell))
        })
    }

    /// Number of squares holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.iter().filter(|&(_, _, c)| c == cell).count()
    }

    pub fn is_full(&self) -> bool {
        self.count(Cell::Empty) == 0
    }

    /// Copy of this board with one square overwritten
    pub(crate) fn with_cell(&self, row: usize, col: usize, cell: Cell) -> Board {
        let mut next = *self;
        next.cells[row][col] = cell;
        next
    }

    /// Check the X-first turn invariant: X count equals O count or exceeds it by one
    pub fn has_valid_counts(&self) -> bool {
        let x = self.count(Cell::X);
        let o = self.count(Cell::O);
        x == o || x == o + 1
    }

    /// Does `player` own at least one complete line
    fn has_line(&self, player: Player) -> bool {
        let mark = player.cell();
        LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| self.cells[r][c] == mark))
    }

    /// Reject positions legal play cannot produce: mark counts out of turn
    /// order, or complete lines for both sides
    pub fn validate(&self) -> Result<(), GameError> {
        if !self.has_valid_counts() {
            return Err(GameError::InvalidBoard(format!(
                "{} X marks and {} O marks cannot arise with X moving first",
                self.count(Cell::X),
                self.count(Cell::O)
            )));
        }
        if self.has_line(Player::X) && self.has_line(Player::O) {
            return Err(GameError::InvalidBoard(
                "both X and O have a complete line".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|c| c.symbol().to_string()).collect();
            write!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut symbols = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for c in s.chars() {
            if c.is_whitespace() || c == '/' || c == '|' {
                continue;
            }
            let cell = Cell::from_symbol(c)
                .ok_or_else(|| GameError::InvalidBoard(format!("unknown symbol '{}'", c)))?;
            symbols.push(cell);
        }

        if symbols.len() != BOARD_SIZE * BOARD_SIZE {
            return Err(GameError::InvalidBoard(format!(
                "expected {} cells, found {}",
                BOARD_SIZE * BOARD_SIZE,
                symbols.len()
            )));
        }

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (i, cell) in symbols.into_iter().enumerate() {
            cells[i / BOARD_SIZE][i % BOARD_SIZE] = cell;
        }

        let board = Board { cells };
        board.validate()?;
        Ok(board)
    }
}

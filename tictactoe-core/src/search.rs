//! Exhaustive minimax search
//!
//! The tree is always searched to terminal positions; there is no depth limit
//! and no heuristic evaluation. The only pruning is at the root: once a move
//! reaching the mover's best possible outcome is found, the remaining moves are
//! skipped.

use crate::board::{Action, Board, Player};
use crate::game::Outcome;

// ============================================================================
// RECURSIVE VALUE FUNCTIONS
// ============================================================================

/// Value of `board` when X (the maximizer) is to move
pub fn max_value(board: &Board) -> Outcome {
    if let Some(outcome) = board.outcome() {
        return outcome;
    }

    board
        .successors()
        .map(|(_, child)| min_value(&child))
        .fold(Outcome::OWins, Outcome::max)
}

/// Value of `board` when O (the minimizer) is to move
pub fn min_value(board: &Board) -> Outcome {
    if let Some(outcome) = board.outcome() {
        return outcome;
    }

    board
        .successors()
        .map(|(_, child)| max_value(&child))
        .fold(Outcome::XWins, Outcome::min)
}

// ============================================================================
// ROOT MOVE SELECTION
// ============================================================================

/// Optimal move for the side to move, None on a finished board.
///
/// Ties between equally valued moves go to the first in row-major order.
pub fn best_move(board: &Board) -> Option<Action> {
    let choice = search_root(board)?;
    tracing::debug!(
        player = %board.current_player(),
        action = %choice.action,
        value = ?choice.value,
        evaluated = choice.evaluated,
        "selected move"
    );
    Some(choice.action)
}

/// Outcome of the root loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RootChoice {
    action: Action,
    value: Outcome,
    /// Root candidates searched before stopping
    evaluated: usize,
}

fn search_root(board: &Board) -> Option<RootChoice> {
    if board.is_terminal() {
        return None;
    }

    let player = board.current_player();
    let target = Outcome::best_for(player);
    let mut best: Option<(Action, Outcome)> = None;
    let mut evaluated = 0usize;

    for (action, child) in board.successors() {
        let value = match player {
            Player::X => min_value(&child),
            Player::O => max_value(&child),
        };
        evaluated += 1;

        let improves = match best {
            None => true,
            Some((_, best_value)) => prefers(player, value, best_value),
        };
        if improves {
            best = Some((action, value));
        }

        // Nothing beats the mover's best possible outcome
        if value == target {
            break;
        }
    }

    best.map(|(action, value)| RootChoice {
        action,
        value,
        evaluated,
    })
}

/// Strictly better for `player`
fn prefers(player: Player, candidate: Outcome, incumbent: Outcome) -> bool {
    match player {
        Player::X => candidate > incumbent,
        Player::O => candidate < incumbent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_best_move_terminal_returns_none() {
        assert_eq!(best_move(&board("XXX OO. ...")), None);
        assert_eq!(best_move(&board("XOX XOO OXX")), None);
    }

    #[test]
    fn test_values_on_terminal_boards() {
        let won = board("XXX OO. ...");
        assert_eq!(max_value(&won), Outcome::XWins);
        assert_eq!(min_value(&won), Outcome::XWins);

        let drawn = board("XOX XOO OXX");
        assert_eq!(max_value(&drawn), Outcome::Draw);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        assert_eq!(max_value(&Board::initial()), Outcome::Draw);
    }

    #[test]
    fn test_first_move_is_corner_or_center() {
        let action = best_move(&Board::initial()).unwrap();
        let corners_and_center = [
            Action::new(0, 0),
            Action::new(0, 2),
            Action::new(1, 1),
            Action::new(2, 0),
            Action::new(2, 2),
        ];
        // Every opening draws, so the row-major tie-break picks (0, 0)
        assert!(corners_and_center.contains(&action));
        assert_eq!(action, Action::new(0, 0));
    }

    #[test]
    fn test_x_takes_immediate_win() {
        // X to move, (0, 2) completes the top row
        let b = board("XX. OO. ...");
        assert_eq!(best_move(&b), Some(Action::new(0, 2)));
    }

    #[test]
    fn test_o_takes_immediate_win() {
        // O to move, (1, 2) completes the middle row
        let b = board("XX. OO. X..");
        assert_eq!(b.current_player(), Player::O);
        assert_eq!(best_move(&b), Some(Action::new(1, 2)));
    }

    #[test]
    fn test_o_blocks_vertical_threat() {
        // X threatens column 0 at (2, 0); every other reply loses on the spot
        let b = board("X.. XO. ...");
        assert_eq!(b.current_player(), Player::O);
        assert_eq!(best_move(&b), Some(Action::new(2, 0)));

        for (action, child) in b.successors() {
            let expected = if action == Action::new(2, 0) {
                Outcome::Draw
            } else {
                Outcome::XWins
            };
            assert_eq!(max_value(&child), expected, "reply {}", action);
        }
    }

    #[test]
    fn test_equal_counts_means_x_completes_column() {
        // Two marks each, so X moves and finishes column 0
        let b = board("XO. XO. ...");
        assert_eq!(b.current_player(), Player::X);
        assert_eq!(best_move(&b), Some(Action::new(2, 0)));
    }

    #[test]
    fn test_root_stops_at_immediate_x_win() {
        // (0, 1) is X's first candidate and wins on the spot
        let b = board("X.X OO. ...");
        assert_eq!(b.current_player(), Player::X);
        let choice = search_root(&b).unwrap();
        assert_eq!(choice.action, Action::new(0, 1));
        assert_eq!(choice.value, Outcome::XWins);
        assert_eq!(choice.evaluated, 1);
        assert!(choice.evaluated < b.legal_actions().len());
    }

    #[test]
    fn test_root_stops_at_immediate_o_win() {
        let b = board("O.O XX. X..");
        assert_eq!(b.current_player(), Player::O);
        let choice = search_root(&b).unwrap();
        assert_eq!(choice.action, Action::new(0, 1));
        assert_eq!(choice.value, Outcome::OWins);
        assert!(choice.evaluated < b.legal_actions().len());
    }

    #[test]
    fn test_root_stops_after_win_mid_order() {
        // O's candidates: (0, 2) only draws, (1, 2) wins; (2, 1) and (2, 2) are skipped
        let b = board("XX. OO. X..");
        assert_eq!(b.legal_actions().len(), 4);
        let choice = search_root(&b).unwrap();
        assert_eq!(choice.action, Action::new(1, 2));
        assert_eq!(choice.evaluated, 2);
    }

    #[test]
    fn test_root_searches_everything_without_a_forced_win() {
        // Every opening draws, so no candidate reaches X's best outcome
        let choice = search_root(&Board::initial()).unwrap();
        assert_eq!(choice.value, Outcome::Draw);
        assert_eq!(choice.evaluated, 9);
    }

    #[test]
    fn test_prefers_is_strict() {
        assert!(prefers(Player::X, Outcome::XWins, Outcome::Draw));
        assert!(!prefers(Player::X, Outcome::Draw, Outcome::Draw));
        assert!(prefers(Player::O, Outcome::OWins, Outcome::Draw));
        assert!(!prefers(Player::O, Outcome::XWins, Outcome::Draw));
    }

    #[test]
    fn test_single_empty_cell() {
        let b = Board::from_rows([
            [Cell::X, Cell::O, Cell::X],
            [Cell::X, Cell::O, Cell::O],
            [Cell::O, Cell::X, Cell::Empty],
        ]);
        assert_eq!(b.current_player(), Player::X);
        assert_eq!(best_move(&b), Some(Action::new(2, 2)));
    }
}

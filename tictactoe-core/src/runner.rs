//! Game runner - agents, single games and multi-game matches

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::{Action, Board, Player};
use crate::error::GameError;
use crate::game::Outcome;
use crate::search::best_move;

// ============================================================================
// AGENTS
// ============================================================================

/// Anything that can pick a move for the side to play
pub trait Agent {
    fn name(&self) -> &str;

    /// Choose an action on a non-terminal board. None means no move.
    fn choose(&mut self, board: &Board) -> Option<Action>;
}

/// Perfect player backed by the exhaustive search
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimaxAgent;

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn choose(&mut self, board: &Board) -> Option<Action> {
        best_move(board)
    }
}

/// Uniformly random legal mover
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, board: &Board) -> Option<Action> {
        board.legal_actions().choose(&mut self.rng).copied()
    }
}

/// Agent selector used by match configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    #[default]
    Minimax,
    Random,
}

impl AgentKind {
    pub fn build(self, seed: u64) -> Box<dyn Agent + Send> {
        match self {
            AgentKind::Minimax => Box::new(MinimaxAgent),
            AgentKind::Random => Box::new(RandomAgent::new(seed)),
        }
    }
}

// ============================================================================
// SINGLE GAME
// ============================================================================

/// Complete record of one game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<Action>,
    pub final_board: Board,
    pub outcome: Outcome,
}

/// Play from `initial` until the board is terminal.
///
/// Agents are consulted by `current_player`; every choice goes through
/// [`Board::apply_action`] so an illegal move ends the game with an error.
pub fn play_game(
    x: &mut dyn Agent,
    o: &mut dyn Agent,
    initial: Board,
) -> Result<GameRecord, GameError> {
    let mut board = initial;
    let mut moves = Vec::new();

    while !board.is_terminal() {
        let player = board.current_player();
        let agent: &mut dyn Agent = match player {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };

        let action = agent.choose(&board).ok_or(GameError::NoMove { player })?;
        tracing::debug!(agent = agent.name(), %player, %action, "move");

        board = board.apply_action(action)?;
        moves.push(action);
    }

    let outcome = board.utility()?;
    Ok(GameRecord {
        moves,
        final_board: board,
        outcome,
    })
}

// ============================================================================
// MATCHES
// ============================================================================

/// Match configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of games to play
    pub games: usize,
    /// Agent moving first in even-numbered games
    pub x_agent: AgentKind,
    /// Agent moving second in even-numbered games
    pub o_agent: AgentKind,
    /// Swap sides every other game
    pub alternate_colors: bool,
    /// Base seed for random agents (None = 42)
    pub seed: Option<u64>,
    /// Run games on the rayon thread pool
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 10,
            x_agent: AgentKind::Minimax,
            o_agent: AgentKind::Random,
            alternate_colors: false,
            seed: None,
            parallel: false,
        }
    }
}

impl MatchConfig {
    pub fn new(x_agent: AgentKind, o_agent: AgentKind) -> Self {
        Self {
            x_agent,
            o_agent,
            ..Default::default()
        }
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn alternating(mut self) -> Self {
        self.alternate_colors = true;
        self
    }

    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }
}

/// One game of a match, with which configured agent held X
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGame {
    pub game_number: usize,
    pub x_agent: AgentKind,
    pub o_agent: AgentKind,
    pub record: GameRecord,
}

/// Aggregated match results
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResults {
    pub games: Vec<MatchGame>,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub avg_moves: f32,
}

impl MatchResults {
    /// Games lost by a given agent kind, whichever side it played
    pub fn losses_for(&self, kind: AgentKind) -> usize {
        self.games
            .iter()
            .filter(|g| match g.record.outcome {
                Outcome::XWins => g.o_agent == kind,
                Outcome::OWins => g.x_agent == kind,
                Outcome::Draw => false,
            })
            .count()
    }
}

/// Play every game in the match and aggregate the results
pub fn run_match(config: &MatchConfig) -> Result<MatchResults, GameError> {
    let base_seed = config.seed.unwrap_or(42);

    tracing::info!(
        games = config.games,
        x = ?config.x_agent,
        o = ?config.o_agent,
        parallel = config.parallel,
        "starting match"
    );

    let games = if config.parallel {
        (0..config.games)
            .into_par_iter()
            .map(|i| play_match_game(config, i, base_seed))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        (0..config.games)
            .map(|i| play_match_game(config, i, base_seed))
            .collect::<Result<Vec<_>, _>>()?
    };

    let results = compute_match_statistics(games);
    tracing::info!(
        x_wins = results.x_wins,
        o_wins = results.o_wins,
        draws = results.draws,
        "match finished"
    );
    Ok(results)
}

fn play_match_game(
    config: &MatchConfig,
    index: usize,
    base_seed: u64,
) -> Result<MatchGame, GameError> {
    let (x_kind, o_kind) = if config.alternate_colors && index % 2 == 1 {
        (config.o_agent, config.x_agent)
    } else {
        (config.x_agent, config.o_agent)
    };

    // Distinct streams for the two sides of the same game
    let seed = base_seed.wrapping_add(index as u64);
    let mut x = x_kind.build(seed);
    let mut o = o_kind.build(seed.wrapping_add(1 << 32));

    let record = play_game(x.as_mut(), o.as_mut(), Board::initial())?;
    tracing::debug!(game = index + 1, outcome = ?record.outcome, moves = record.moves.len(), "game finished");

    Ok(MatchGame {
        game_number: index + 1,
        x_agent: x_kind,
        o_agent: o_kind,
        record,
    })
}

fn compute_match_statistics(games: Vec<MatchGame>) -> MatchResults {
    let count = |outcome: Outcome| games.iter().filter(|g| g.record.outcome == outcome).count();
    let x_wins = count(Outcome::XWins);
    let o_wins = count(Outcome::OWins);
    let draws = count(Outcome::Draw);

    let total_moves: usize = games.iter().map(|g| g.record.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        x_wins,
        o_wins,
        draws,
        avg_moves,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always answers the same square, legal or not
    struct Stubborn(Action);

    impl Agent for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn choose(&mut self, _board: &Board) -> Option<Action> {
            Some(self.0)
        }
    }

    struct Silent;

    impl Agent for Silent {
        fn name(&self) -> &str {
            "silent"
        }

        fn choose(&mut self, _board: &Board) -> Option<Action> {
            None
        }
    }

    #[test]
    fn test_self_play_draws() {
        let record = play_game(&mut MinimaxAgent, &mut MinimaxAgent, Board::initial()).unwrap();
        assert_eq!(record.outcome, Outcome::Draw);
        assert_eq!(record.moves.len(), 9);
        assert!(record.final_board.is_full());
    }

    #[test]
    fn test_play_game_from_terminal_board() {
        let won: Board = "XXX OO. ...".parse().unwrap();
        let record = play_game(&mut MinimaxAgent, &mut MinimaxAgent, won).unwrap();
        assert!(record.moves.is_empty());
        assert_eq!(record.outcome, Outcome::XWins);
    }

    #[test]
    fn test_illegal_agent_move_is_an_error() {
        let mut x = Stubborn(Action::new(1, 1));
        let mut o = Stubborn(Action::new(1, 1));
        let err = play_game(&mut x, &mut o, Board::initial()).unwrap_err();
        assert_eq!(err, GameError::OccupiedCell { row: 1, col: 1 });

        let mut off_board = Stubborn(Action::new(5, 0));
        let err = play_game(&mut off_board, &mut MinimaxAgent, Board::initial()).unwrap_err();
        assert_eq!(err, GameError::InvalidAction { row: 5, col: 0 });
    }

    #[test]
    fn test_silent_agent_is_an_error() {
        let err = play_game(&mut MinimaxAgent, &mut Silent, Board::initial()).unwrap_err();
        assert_eq!(err, GameError::NoMove { player: Player::O });
    }

    #[test]
    fn test_random_agent_deterministic() {
        let board = Board::initial();
        let a = RandomAgent::new(7).choose(&board);
        let b = RandomAgent::new(7).choose(&board);
        assert_eq!(a, b);
        assert!(a.is_some_and(|action| action.is_valid()));
    }

    #[test]
    fn test_compute_match_statistics_empty() {
        let results = compute_match_statistics(vec![]);
        assert_eq!(results.x_wins, 0);
        assert_eq!(results.o_wins, 0);
        assert_eq!(results.draws, 0);
        assert_eq!(results.avg_moves, 0.0);
    }

    #[test]
    fn test_match_alternates_colors() {
        let config = MatchConfig::new(AgentKind::Minimax, AgentKind::Random)
            .with_games(4)
            .with_seed(3)
            .alternating();
        let results = run_match(&config).unwrap();

        assert_eq!(results.games.len(), 4);
        assert_eq!(results.games[0].x_agent, AgentKind::Minimax);
        assert_eq!(results.games[1].x_agent, AgentKind::Random);
        assert_eq!(results.x_wins + results.o_wins + results.draws, 4);
        assert_eq!(results.losses_for(AgentKind::Minimax), 0);
    }
}

//! The bot played against humans: alpha-beta search with a depth and randomness picked by difficulty.
use std::fmt::{Debug, Formatter};
use std::time::Instant;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::minimax::minimax;
use crate::ai::Bot;
use crate::board::{Board, BoardDone, Mark};
use crate::config::ConfigError;
use crate::games::uttt::{GameState, Move};
use crate::heuristic::uttt::{HeuristicWeights, UtttHeuristic};

/// Named bot strength.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Search parameters for each [Difficulty].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub easy_depth: u32,
    pub medium_depth: u32,
    pub hard_depth: u32,
    /// The probability that the easy bot ignores the search and plays a random move instead.
    pub easy_random_move_probability: f64,
    pub weights: HeuristicWeights,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            easy_depth: 1,
            medium_depth: 2,
            hard_depth: 3,
            easy_random_move_probability: 0.7,
            weights: HeuristicWeights::default(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in Difficulty::ALL {
            if self.depth(difficulty) == 0 {
                return Err(ConfigError::ZeroDepth(difficulty));
            }
        }
        let p = self.easy_random_move_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidProbability(p));
        }
        Ok(())
    }

    pub fn depth(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy_depth,
            Difficulty::Medium => self.medium_depth,
            Difficulty::Hard => self.hard_depth,
        }
    }

    pub fn random_move_probability(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy_random_move_probability,
            Difficulty::Medium | Difficulty::Hard => 0.0,
        }
    }

    /// Pick a move for `mark`, which must be the mark to move in `state`.
    /// Returns `None` only if the game is already over. `state` is never modified.
    ///
    /// The configured depth counts the replies searched after the bot's own move,
    /// so the search looks `depth + 1` plies ahead.
    ///
    /// Apart from the easy random moves the result is deterministic:
    /// the first move in [legal_moves](crate::games::uttt::legal_moves) order with the best score is picked.
    ///
    /// # Panics
    ///
    /// Panics if the game is not over and `mark` is not the mark to move,
    /// or if the depth for `difficulty` is 0.
    pub fn choose_move(&self, state: &GameState, mark: Mark, difficulty: Difficulty, rng: &mut impl Rng) -> Option<Move> {
        if state.is_done() {
            return None;
        }
        assert_eq!(
            state.next_player(),
            mark,
            "cannot choose a move for {} when {} is to move",
            mark,
            state.next_player()
        );

        let p = self.random_move_probability(difficulty);
        if p > 0.0 && rng.gen_bool(p) {
            let mv = state.random_available_move(rng).ok()?;
            debug!("{:?} bot for {} plays random move {}", difficulty, mark, mv);
            return Some(mv);
        }

        let depth = self.depth(difficulty);
        assert!(depth > 0, "requires depth>0 to find the best move");

        let heuristic = UtttHeuristic::new(mark, self.weights.clone());
        let start = Instant::now();
        let result = minimax(state, &heuristic, depth + 1);

        debug!(
            "{:?} bot for {} searched depth {} in {:?}: {:?} with value {}",
            difficulty,
            mark,
            depth,
            start.elapsed(),
            result.best_move,
            result.value
        );
        result.best_move
    }
}

/// Pick a move for `mark` with the default [SearchConfig].
///
/// # Panics
///
/// Panics if the game is not over and `mark` is not the mark to move.
pub fn choose_move(state: &GameState, mark: Mark, difficulty: Difficulty, rng: &mut impl Rng) -> Option<Move> {
    SearchConfig::default().choose_move(state, mark, difficulty, rng)
}

/// [Bot] wrapper around [SearchConfig::choose_move], playing for whoever is to move.
pub struct DifficultyBot<R: Rng> {
    difficulty: Difficulty,
    config: SearchConfig,
    rng: R,
}

impl<R: Rng> Debug for DifficultyBot<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DifficultyBot {{ difficulty: {:?}, depth: {} }}",
            self.difficulty,
            self.config.depth(self.difficulty)
        )
    }
}

impl<R: Rng> DifficultyBot<R> {
    pub fn new(difficulty: Difficulty, config: SearchConfig, rng: R) -> Self {
        assert!(config.depth(difficulty) > 0, "requires depth>0 to find the best move");
        DifficultyBot {
            difficulty,
            config,
            rng,
        }
    }
}

impl<R: Rng> Bot<GameState> for DifficultyBot<R> {
    fn select_move(&mut self, board: &GameState) -> Result<Move, BoardDone> {
        board.check_done()?;
        let mark = board.next_player();
        // SAFETY: unwrap is safe because choose_move only returns None for boards that are done.
        Ok(self
            .config
            .choose_move(board, mark, self.difficulty, &mut self.rng)
            .unwrap())
    }
}

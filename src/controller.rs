//! Turn orchestration for a single game, the only part of the crate UI and transport code talks to.
//!
//! All moves, whether they come from a human, the bot or a remote peer, go through
//! [GameController::submit_move]. The bot only proposes moves.
//!
//! The bot search can run on a background thread, see [GameController::start_bot_search].
//! At most one search is outstanding per controller, human moves are rejected while it runs,
//! and its result is checked against the position at the time it arrives before it is played.
use std::thread;

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ai::difficulty::Difficulty;
use crate::board::{Board, Mark, Outcome, PlayError};
use crate::config::{ConfigError, ControllerConfig};
use crate::games::uttt::{apply_move, legal_moves, GameState, Move, Snapshot, SnapshotError};

/// The externally visible state of a controller.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ControllerStatus {
    AwaitingMove(Mark),
    Terminal(Outcome),
}

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Play(#[from] PlayError),
    #[error("remote state rejected")]
    Snapshot(#[from] SnapshotError),
    #[error("a bot search is already in progress")]
    SearchInProgress,
    #[error("no bot search is in progress")]
    NoSearchPending,
    #[error("bot move {0} is no longer legal in the current position")]
    StaleSearchResult(Move),
    #[error("the game ended while the bot was searching")]
    SearchCancelled,
    #[error("the bot search thread stopped without a result")]
    SearchDisconnected,
    #[error("failed to start the bot search thread")]
    Spawn(#[from] std::io::Error),
}

#[derive(Debug)]
struct PendingSearch {
    mark: Mark,
    receiver: Receiver<Option<Move>>,
}

#[derive(Debug)]
pub struct GameController {
    config: ControllerConfig,
    state: GameState,
    history: Vec<(Mark, Move)>,
    pending: Option<PendingSearch>,
    rng: SmallRng,
}

impl GameController {
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Same as [GameController::new] but with a seeded rng, for reproducible easy bot moves.
    pub fn with_seed(config: ControllerConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: ControllerConfig, rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new().with_max_moves(config.max_moves);
        Ok(GameController {
            config,
            state,
            history: vec![],
            pending: None,
            rng,
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The moves played since the start of the game or the last remote sync.
    pub fn history(&self) -> &[(Mark, Move)] {
        &self.history
    }

    pub fn status(&self) -> ControllerStatus {
        match self.state.outcome() {
            Some(outcome) => ControllerStatus::Terminal(outcome),
            None => ControllerStatus::AwaitingMove(self.state.next_player()),
        }
    }

    pub fn is_bot_turn(&self) -> bool {
        !self.state.is_done() && self.config.bot == Some(self.state.next_player())
    }

    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    /// Play `mv` for `mover`. This is the only way moves are applied to the game.
    ///
    /// Rejected with [PlayError::WrongTurn] while a bot search is outstanding,
    /// otherwise errors from the rules engine are returned unchanged and the state is untouched.
    pub fn submit_move(&mut self, mover: Mark, mv: Move) -> Result<&GameState, ControllerError> {
        if self.pending.is_some() {
            debug!("rejecting {} by {} while the bot is searching", mv, mover);
            return Err(PlayError::WrongTurn.into());
        }

        self.state = apply_move(&self.state, mv, mover)?;
        self.history.push((mover, mv));
        debug!("{} played {}, now {:?}", mover, mv, self.status());

        if let Some(outcome) = self.state.outcome() {
            info!("game over after {} moves: {:?}", self.state.moves_played(), outcome);
        }
        Ok(&self.state)
    }

    /// Ask the bot for a move for the player to move, searching on the current thread.
    /// The move is not played, submit it with [GameController::submit_move].
    /// Returns `None` if the game is over.
    pub fn request_bot_move(&mut self, difficulty: Difficulty) -> Result<Option<Move>, ControllerError> {
        if self.pending.is_some() {
            return Err(ControllerError::SearchInProgress);
        }
        let mark = self.state.next_player();
        Ok(self.config.search.choose_move(&self.state, mark, difficulty, &mut self.rng))
    }

    /// Let the bot pick a move at the configured difficulty and play it.
    pub fn play_bot_turn(&mut self) -> Result<Move, ControllerError> {
        let mark = self.state.next_player();
        let mv = self
            .request_bot_move(self.config.difficulty)?
            .ok_or(PlayError::GameTerminal)?;
        self.submit_move(mark, mv)?;
        Ok(mv)
    }

    /// Start searching for a move for the player to move on a background thread.
    /// Collect the result with [GameController::poll_bot_search] or [GameController::wait_bot_search].
    pub fn start_bot_search(&mut self, difficulty: Difficulty) -> Result<(), ControllerError> {
        if self.pending.is_some() {
            return Err(ControllerError::SearchInProgress);
        }
        self.state.check_done().map_err(PlayError::from)?;

        let state = self.state.clone();
        let mark = state.next_player();
        let search = self.config.search.clone();
        let mut rng = SmallRng::seed_from_u64(self.rng.gen());
        let (sender, receiver) = crossbeam_channel::bounded(1);

        thread::Builder::new()
            .name("uttt-bot-search".to_owned())
            .spawn(move || {
                let mv = search.choose_move(&state, mark, difficulty, &mut rng);
                // the receiver is gone if the search was cancelled
                let _ = sender.send(mv);
            })?;

        debug!("started {:?} bot search for {}", difficulty, mark);
        self.pending = Some(PendingSearch { mark, receiver });
        Ok(())
    }

    /// Check whether the background search finished, and if so play its move.
    /// Returns `Ok(None)` while the search is still running.
    pub fn poll_bot_search(&mut self) -> Result<Option<Move>, ControllerError> {
        let (mark, received) = match &self.pending {
            None => return Err(ControllerError::NoSearchPending),
            Some(pending) => (pending.mark, pending.receiver.try_recv()),
        };

        match received {
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                Err(ControllerError::SearchDisconnected)
            }
            Ok(result) => {
                self.pending = None;
                self.finish_search(mark, result).map(Some)
            }
        }
    }

    /// Block until the background search finishes, then play its move.
    pub fn wait_bot_search(&mut self) -> Result<Move, ControllerError> {
        let (mark, received) = match &self.pending {
            None => return Err(ControllerError::NoSearchPending),
            Some(pending) => (pending.mark, pending.receiver.recv()),
        };
        self.pending = None;

        match received {
            Err(_) => Err(ControllerError::SearchDisconnected),
            Ok(result) => self.finish_search(mark, result),
        }
    }

    fn finish_search(&mut self, mark: Mark, result: Option<Move>) -> Result<Move, ControllerError> {
        if self.state.is_done() {
            warn!("discarding bot result {:?}, the game is already over", result);
            return Err(ControllerError::SearchCancelled);
        }
        let mv = match result {
            Some(mv) => mv,
            None => return Err(ControllerError::SearchCancelled),
        };

        if self.state.next_player() != mark || !legal_moves(&self.state).contains(&mv) {
            warn!("discarding stale bot move {} for {}", mv, mark);
            return Err(ControllerError::StaleSearchResult(mv));
        }

        self.submit_move(mark, mv)?;
        Ok(mv)
    }

    /// Replace the local state with one received from a remote peer.
    /// An outstanding search keeps running, its result is validated against the new state.
    pub fn sync_remote(&mut self, snapshot: &Snapshot, turn: Mark) -> Result<&GameState, ControllerError> {
        let state = GameState::from_snapshot(snapshot, turn)?.with_max_moves(self.config.max_moves);
        info!("replacing local state with remote state, {:?}", state);

        self.state = state;
        self.history.clear();
        Ok(&self.state)
    }

    /// Start a new game, cancelling any outstanding search.
    pub fn reset(&mut self) {
        if self.pending.take().is_some() {
            debug!("cancelled outstanding bot search");
        }
        self.state = GameState::new().with_max_moves(self.config.max_moves);
        self.history.clear();
    }
}

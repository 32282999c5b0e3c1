use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::ControlFlow;
use std::panic::{RefUnwindSafe, UnwindSafe};

use internal_iterator::InternalIterator;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One of the two players, identified by the mark they place.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

/// The absolute outcome for a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Outcome {
    WonBy(Mark),
    Draw,
}

/// Error returned when trying to query moves on a board that is already done.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, thiserror::Error)]
#[error("the game is already done")]
pub struct BoardDone;

/// The reasons a move can be rejected. A rejected move never modifies the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum PlayError {
    #[error("the target cell is already occupied")]
    OccupiedCell,
    #[error("the target sub-board is not the active board")]
    IllegalBoardTarget,
    #[error("the target sub-board has already been won")]
    SubBoardAlreadyWon,
    #[error("it is not this mark's turn")]
    WrongTurn,
    #[error("the game is already over")]
    GameTerminal,
    #[error("sub-board and cell indices must be in 0..9")]
    InvalidMoveShape,
}

impl From<BoardDone> for PlayError {
    fn from(_: BoardDone) -> Self {
        PlayError::GameTerminal
    }
}

/// Represents the state of a deterministic two player game.
/// The rules engine and the search code only talk to positions through this trait.
pub trait Board: 'static + Debug + Display + Clone + Eq + Hash + Send + Sync + UnwindSafe + RefUnwindSafe
where
    for<'a> Self: BoardMoves<'a, Self>,
{
    /// The type used to represent moves on this board.
    type Move: Debug + Display + Eq + Ord + Hash + Copy + Send + Sync + UnwindSafe + RefUnwindSafe;

    /// Return the next player to make a move.
    /// If the board is done this is the player that did not play the last move for consistency.
    fn next_player(&self) -> Mark;

    /// Return whether the given move is available.
    fn is_available_move(&self, mv: Self::Move) -> Result<bool, BoardDone>;

    /// Pick a random move from the `available_moves` with a uniform distribution.
    /// Can be overridden for better performance.
    fn random_available_move(&self, rng: &mut impl Rng) -> Result<Self::Move, BoardDone> {
        let count = self.available_moves()?.count();
        let index = rng.gen_range(0..count);
        // SAFETY: unwrap is safe because the index is less than the
        // length of the iterator.
        Ok(self.available_moves()?.nth(index).unwrap())
    }

    /// Play the move `mv` for the next player, modifying this board.
    /// On error the board is left untouched.
    fn play(&mut self, mv: Self::Move) -> Result<(), PlayError>;

    /// Clone this board, play `mv` on it and return the new board.
    fn clone_and_play(&self, mv: Self::Move) -> Result<Self, PlayError> {
        let mut next = self.clone();
        next.play(mv)?;
        Ok(next)
    }

    /// The outcome of this board, is `None` when this games is not done yet.
    fn outcome(&self) -> Option<Outcome>;

    /// Whether this games is done.
    fn is_done(&self) -> bool {
        self.outcome().is_some()
    }

    /// Return `Err(BoardDone)` if this board is done.
    fn check_done(&self) -> Result<(), BoardDone> {
        if self.is_done() {
            Err(BoardDone)
        } else {
            Ok(())
        }
    }
}

/// A helper trait to get the correct lifetimes for [BoardMoves::available_moves].
/// This is a workaround to get generic associated types, See <https://github.com/rust-lang/rust/issues/44265>.
pub trait BoardMoves<'a, B: Board> {
    type AllMovesIterator: InternalIterator<Item = B::Move>;
    type AvailableMovesIterator: InternalIterator<Item = B::Move>;

    /// All theoretically possible moves, for any possible board.
    /// Moves returned by `available_moves` will always be a subset of these moves.
    fn all_possible_moves() -> Self::AllMovesIterator;

    /// Return an iterator over available moves, is always nonempty.
    /// The ordering stays consistent when the board is not modified.
    fn available_moves(&'a self) -> Result<Self::AvailableMovesIterator, BoardDone>;
}

impl Mark {
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Mark::X => 0,
            Mark::O => 1,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Mark::X => 'x',
            Mark::O => 'o',
        }
    }

    pub fn sign<V: num_traits::One + std::ops::Neg<Output = V>>(self, pov: Mark) -> V {
        if self == pov {
            V::one()
        } else {
            -V::one()
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Visit the children of `board` in move order, stopping early if `f` breaks.
pub fn try_for_each_child<B: Board, R>(
    board: &B,
    mut f: impl FnMut(B::Move, B) -> ControlFlow<R>,
) -> Result<ControlFlow<R>, BoardDone> {
    Ok(board.available_moves()?.try_for_each(|mv: B::Move| {
        // SAFETY: unwrap is safe because `mv` comes from `available_moves`.
        let child = board.clone_and_play(mv).unwrap();
        f(mv, child)
    }))
}

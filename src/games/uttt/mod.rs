//! [Ultimate tic-tac-toe](https://en.wikipedia.org/wiki/Ultimate_tic-tac-toe).
//!
//! The board is a 3x3 grid of 3x3 sub-boards. The cell a move is played in selects the sub-board
//! the opponent has to play in next, unless that sub-board is already won, in which case they can
//! play anywhere. A sub-board that fills up without a winner is cleared and stays in play.
//! The game is won by winning three sub-boards in a line.
//!
//! The free functions in this module are the stateless rules interface,
//! [GameState] also implements [Board](crate::board::Board) so it can be used with the generic search code.
use internal_iterator::InternalIterator;

use crate::board::{Mark, PlayError};

pub use board::{AvailableMoves, Cell, GameState, Phase, SubBoard};
pub use io::{InvalidCompactString, Snapshot, SnapshotError};
pub use mv::{ActiveBoard, Move};

mod board;
mod io;
mod mv;

/// The 8 lines of a 3x3 grid, as row-major indices: rows, then columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The center sub-board index.
pub const CENTER: usize = 4;

/// The corner sub-board indices.
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// The mark completing the first full line in `marks`, if any.
///
/// Used both for the cells of a sub-board and for the winners of the nine sub-boards.
pub fn line_winner(marks: [Option<Mark>; 9]) -> Option<Mark> {
    winning_line(marks).map(|(mark, _)| mark)
}

/// Same as [line_winner], but also returns the indices of the completed line.
pub fn winning_line(marks: [Option<Mark>; 9]) -> Option<(Mark, [usize; 3])> {
    LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        match marks[a] {
            Some(mark) if marks[b] == Some(mark) && marks[c] == Some(mark) => Some((mark, line)),
            _ => None,
        }
    })
}

/// All legal moves for the player to move, ordered by sub-board and then by cell.
/// Empty if the game is over.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    match state.available_moves_iter() {
        Ok(moves) => moves.collect(),
        Err(_) => vec![],
    }
}

/// Play `mv` for `mark` on a copy of `state` and return the resulting state.
///
/// Fails without touching `state` if the game is over, the move is out of range,
/// it is not `mark`'s turn or the move is not legal in the current position.
pub fn apply_move(state: &GameState, mv: Move, mark: Mark) -> Result<GameState, PlayError> {
    state.check_move(mv, mark)?;
    let mut next = state.clone();
    next.play_unchecked(mv);
    Ok(next)
}

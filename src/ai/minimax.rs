use std::ops::{ControlFlow, Neg};

use crate::board::{try_for_each_child, Board};

pub trait Heuristic<B: Board> {
    /// The type used to represent the heuristic value of a board.
    type V: Copy + Ord + Neg<Output = Self::V>;

    /// Return the heuristic value for the given board from the next player POV.
    /// `length` is the number of moves played since the board the search was started on.
    /// Can be used to prefer faster wins or slower losses.
    fn value(&self, board: &B, length: u32) -> Self::V;
}

#[derive(Debug)]
pub struct MinimaxResult<V, M> {
    /// The value of this board.
    pub value: V,

    /// The best move to play, `None` if the board is done or the search depth was 0.
    pub best_move: Option<M>,
}

/// Evaluate the board using minimax with the given heuristic up to the given depth.
/// Return both the value and the best move.
///
/// If multiple moves have the same value the first one in `available_moves` order is picked,
/// so the result is deterministic for a given board.
/// The returned value is from the POV of `board.next_player`.
pub fn minimax<B: Board, H: Heuristic<B>>(board: &B, heuristic: &H, depth: u32) -> MinimaxResult<H::V, B::Move> {
    let result = negamax_recurse(heuristic, board, 0, depth, None, None, true);

    if result.best_move.is_none() {
        assert!(board.is_done() || depth == 0, "Implementation error in negamax");
    }

    result
}

/// Evaluate the board using minimax with the given heuristic up to the given depth.
/// Only returns the value without selecting a move.
pub fn minimax_value<B: Board, H: Heuristic<B>>(board: &B, heuristic: &H, depth: u32) -> H::V {
    negamax_recurse(heuristic, board, 0, depth, None, None, false).value
}

/// The core minimax implementation.
/// Alpha-Beta Negamax, implementation based on
/// <https://en.wikipedia.org/wiki/Negamax#Negamax_with_alpha_beta_pruning>
///
/// A move only replaces the current best one if it is strictly better. Children searched after the
/// first one get a window bounded by the best value so far, so an equal child can only
/// return a value that is not better, which keeps the earliest best move.
fn negamax_recurse<B: Board, H: Heuristic<B>>(
    heuristic: &H,
    board: &B,
    length: u32,
    depth_left: u32,
    alpha: Option<H::V>,
    beta: Option<H::V>,
    select_move: bool,
) -> MinimaxResult<H::V, B::Move> {
    if depth_left == 0 || board.is_done() {
        return MinimaxResult {
            value: heuristic.value(board, length),
            best_move: None,
        };
    }

    let mut best_value: Option<H::V> = None;
    let mut best_move: Option<B::Move> = None;
    let mut alpha = alpha;

    // SAFETY: unwrap is safe because the board is not done.
    let _ = try_for_each_child(board, |mv, child| {
        let child_value = -negamax_recurse(
            heuristic,
            &child,
            length + 1,
            depth_left - 1,
            beta.map(Neg::neg),
            alpha.map(Neg::neg),
            false,
        )
        .value;

        if best_value.map_or(true, |best| child_value > best) {
            best_value = Some(child_value);
            if select_move {
                best_move = Some(mv);
            }
        }

        // SAFETY: unwrap is safe because best_value was set above
        let best = best_value.unwrap();
        alpha = Some(alpha.map_or(best, |alpha| alpha.max(best)));

        if beta.map_or(false, |beta| best >= beta) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .unwrap();

    MinimaxResult {
        // SAFETY: unwrap is safe because a board that is not done has at least one available move.
        value: best_value.unwrap(),
        best_move,
    }
}

use serde::{Deserialize, Serialize};

use crate::ai::minimax::Heuristic;
use crate::board::{Board, Mark, Outcome};
use crate::games::uttt::{GameState, SubBoard, CENTER, CORNERS, LINES};

/// The absolute value of a won game, before subtracting the number of moves it took.
pub const WIN_VALUE: i32 = 100_000;

/// Weights used by [UtttHeuristic] to score positions that are not decided yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Own line with two marks and an empty cell.
    pub advance: i32,
    /// Own line with one mark and two empty cells.
    pub develop: i32,
    /// Opponent line with two marks and an empty cell, subtracted.
    /// Larger than `advance` so blocking is preferred over building.
    pub block: i32,
    /// Opponent line with one mark and two empty cells, subtracted.
    pub contain: i32,
    /// Each won sub-board.
    pub won_board: i32,
    /// Extra for owning the center sub-board.
    pub center: i32,
    /// Extra for owning each corner sub-board.
    pub corner: i32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        HeuristicWeights {
            advance: 10,
            develop: 2,
            block: 15,
            contain: 3,
            won_board: 200,
            center: 50,
            corner: 30,
        }
    }
}

/// Heuristic that scores positions from the POV of a fixed mark, the one the search is run for.
///
/// Decided games are worth [WIN_VALUE] minus the number of moves played since the start of the search,
/// so faster wins and slower losses are preferred.
#[derive(Debug, Clone)]
pub struct UtttHeuristic {
    pov: Mark,
    weights: HeuristicWeights,
}

impl UtttHeuristic {
    pub fn new(pov: Mark, weights: HeuristicWeights) -> Self {
        UtttHeuristic { pov, weights }
    }

    /// The value of `state` for the mark this heuristic was created for.
    pub fn evaluate(&self, state: &GameState, length: u32) -> i32 {
        match state.outcome() {
            Some(Outcome::WonBy(winner)) => winner.sign::<i32>(self.pov) * (WIN_VALUE - length as i32),
            Some(Outcome::Draw) => 0,
            None => self.evaluate_open(state),
        }
    }

    fn evaluate_open(&self, state: &GameState) -> i32 {
        let w = &self.weights;
        let mut total = 0;

        for (index, board) in state.sub_boards().iter().enumerate() {
            match board.winner() {
                Some(owner) => {
                    let sign = owner.sign::<i32>(self.pov);
                    total += sign * w.won_board;
                    if index == CENTER {
                        total += sign * w.center;
                    }
                    if CORNERS.contains(&index) {
                        total += sign * w.corner;
                    }
                }
                None => total += self.line_patterns(board),
            }
        }

        total
    }

    fn line_patterns(&self, board: &SubBoard) -> i32 {
        let w = &self.weights;
        let marks = board.marks();

        LINES
            .iter()
            .map(|line| {
                let (mut own, mut opp) = (0, 0);
                for &i in line {
                    match marks[i] {
                        Some(mark) if mark == self.pov => own += 1,
                        Some(_) => opp += 1,
                        None => {}
                    }
                }

                match (own, opp) {
                    (2, 0) => w.advance,
                    (1, 0) => w.develop,
                    (0, 2) => -w.block,
                    (0, 1) => -w.contain,
                    _ => 0,
                }
            })
            .sum()
    }
}

impl Heuristic<GameState> for UtttHeuristic {
    type V = i32;

    fn value(&self, board: &GameState, length: u32) -> i32 {
        let value = self.evaluate(board, length);
        if board.next_player() == self.pov {
            value
        } else {
            -value
        }
    }
}

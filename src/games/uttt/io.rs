//! Conversions between [GameState] and its external representations:
//! the JSON snapshot handed to persistence and transport, and a compact single-line notation.
//!
//! The compact notation lists the nine sub-boards separated by `/`, each as nine cells `x`, `o` or `.`,
//! followed by the active board (`-` for any) and the mark to move:
//!
//! ```
//! use ultimate_ttt::games::uttt::{ActiveBoard, GameState};
//! use ultimate_ttt::board::Mark;
//!
//! let state: GameState = "........./........./........./........./....x..../........./........./........./......... 4 o"
//!     .parse()
//!     .unwrap();
//! assert_eq!(state.active_board(), ActiveBoard::Board(4));
//! assert_eq!(state.turn(), Mark::O);
//! ```
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use nom::error::{Error, ErrorKind};
use nom::Finish;
use serde::{Deserialize, Serialize};

use crate::board::Mark;
use crate::games::uttt::{ActiveBoard, Cell, GameState, SubBoard};

/// The position as seen by persistence and transport:
/// `{ "boards": 9x9 of "X" | "O" | null, "activeBoard": 0-8 | null }`.
///
/// The turn and game status are tracked outside of the snapshot.
/// `miniBoardWinners` is derived, it is written out for readers but ignored when reading.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub boards: [[Option<Mark>; 9]; 9],
    pub active_board: Option<u8>,
    #[serde(default, skip_deserializing)]
    pub mini_board_winners: [Option<Mark>; 9],
}

/// A snapshot or set of sub-boards that could not have been reached through play.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("sub-board {sub_board} has a completed line for both marks")]
    ConflictingLines { sub_board: u8 },
    #[error("sub-board {sub_board} is full without a winner")]
    FullUndecided { sub_board: u8 },
    #[error("active board {0} is out of range")]
    ActiveOutOfRange(u8),
    #[error("active board {sub_board} has already been won")]
    ActiveBoardWon { sub_board: u8 },
    #[error("malformed snapshot json")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidCompactString {
    #[error("failed to parse compact string at {input:?} ({kind:?})")]
    Syntax { input: String, kind: ErrorKind },
    #[error("compact string describes an invalid position")]
    State(#[source] SnapshotError),
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Snapshot, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl GameState {
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            boards: self.sub_boards().map(|b| b.marks()),
            active_board: self.active_board().index(),
            mini_board_winners: self.sub_winners(),
        }
    }

    /// Rebuild a state from a snapshot and the externally tracked turn.
    /// The move limit is not part of the snapshot, see [GameState::with_max_moves].
    pub fn from_snapshot(snapshot: &Snapshot, turn: Mark) -> Result<GameState, SnapshotError> {
        let boards = snapshot.boards.map(SubBoard::from_marks);
        GameState::from_parts(boards, ActiveBoard::from_index(snapshot.active_board), turn)
    }

    pub fn to_compact_string(&self) -> String {
        let boards = self
            .sub_boards()
            .iter()
            .map(|b| b.cells().iter().map(|&c| cell_to_char(c)).collect::<String>())
            .join("/");
        format!("{} {} {}", boards, self.active_board(), self.turn().to_char())
    }

    pub fn from_compact_str(s: &str) -> Result<GameState, InvalidCompactString> {
        let (boards, active, turn) = match parse::state(s).finish() {
            Ok((_, parts)) => parts,
            Err(Error { input, code }) => {
                return Err(InvalidCompactString::Syntax {
                    input: input.to_string(),
                    kind: code,
                })
            }
        };
        GameState::from_parts(boards, active, turn).map_err(InvalidCompactString::State)
    }
}

mod parse {
    use nom::branch::alt;
    use nom::character::complete::{char, one_of};
    use nom::combinator::{eof, map};
    use nom::multi::count;
    use nom::sequence::{preceded, terminated, tuple};
    use nom::IResult;

    use super::*;

    fn cell(input: &str) -> IResult<&str, Cell> {
        map(one_of("xo."), |c| match c {
            'x' => Cell::Marked(Mark::X),
            'o' => Cell::Marked(Mark::O),
            '.' => Cell::Empty,
            _ => unreachable!(),
        })(input)
    }

    fn sub_board(input: &str) -> IResult<&str, SubBoard> {
        map(count(cell, 9), |cells: Vec<Cell>| {
            let mut array = [Cell::Empty; 9];
            array.copy_from_slice(&cells);
            SubBoard::from_cells(array)
        })(input)
    }

    fn boards(input: &str) -> IResult<&str, [SubBoard; 9]> {
        map(
            tuple((sub_board, count(preceded(char('/'), sub_board), 8))),
            |(first, rest)| {
                let mut array = [SubBoard::EMPTY; 9];
                array[0] = first;
                array[1..].copy_from_slice(&rest);
                array
            },
        )(input)
    }

    fn active(input: &str) -> IResult<&str, ActiveBoard> {
        alt((
            map(char('-'), |_| ActiveBoard::Any),
            map(one_of("012345678"), |c| ActiveBoard::Board(c as u8 - b'0')),
        ))(input)
    }

    fn mark(input: &str) -> IResult<&str, Mark> {
        map(one_of("xo"), |c| if c == 'x' { Mark::X } else { Mark::O })(input)
    }

    pub(super) fn state(input: &str) -> IResult<&str, ([SubBoard; 9], ActiveBoard, Mark)> {
        terminated(
            tuple((boards, preceded(char(' '), active), preceded(char(' '), mark))),
            eof,
        )(input)
    }
}

impl FromStr for GameState {
    type Err = InvalidCompactString;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameState::from_compact_str(s)
    }
}

fn cell_to_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Marked(mark) => mark.to_char(),
    }
}

impl Debug for SubBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let cells: String = self.cells().iter().map(|&c| cell_to_char(c)).collect();
        write!(f, "SubBoard({})", cells)
    }
}

impl Debug for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GameState({:?}, phase: {:?}, moves_played: {}, max_moves: {:?})",
            self.to_compact_string(),
            self.phase(),
            self.moves_played(),
            self.max_moves()
        )
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let boards = self.sub_boards();

        for big_row in 0..3 {
            if big_row != 0 {
                writeln!(f, "---+---+---")?;
            }
            for small_row in 0..3 {
                for big_col in 0..3 {
                    if big_col != 0 {
                        write!(f, "|")?;
                    }
                    let board = &boards[big_row * 3 + big_col];
                    for small_col in 0..3 {
                        write!(f, "{}", cell_to_char(board.cells()[small_row * 3 + small_col]))?;
                    }
                }
                writeln!(f)?;
            }
        }

        writeln!(
            f,
            "turn: {}, active: {}, phase: {:?}",
            self.turn(),
            self.active_board(),
            self.phase()
        )
    }
}

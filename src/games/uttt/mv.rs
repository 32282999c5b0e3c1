use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::board::PlayError;

/// A move: the sub-board to play in and the cell within that sub-board, both in `0..9`, row-major.
///
/// The fields are public so moves coming from a UI or the network can be represented as-is,
/// the rules engine rejects out of range indices with [PlayError::InvalidMoveShape].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub sub_board: u8,
    pub cell: u8,
}

/// The sub-board the next move is constrained to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ActiveBoard {
    #[default]
    Any,
    Board(u8),
}

impl Move {
    /// Panics if either index is out of range, use [Move::try_new] for untrusted input.
    pub fn new(sub_board: u8, cell: u8) -> Move {
        assert!(sub_board < 9 && cell < 9, "invalid move ({}, {})", sub_board, cell);
        Move { sub_board, cell }
    }

    pub fn try_new(sub_board: u8, cell: u8) -> Result<Move, PlayError> {
        let mv = Move { sub_board, cell };
        if mv.is_valid_shape() {
            Ok(mv)
        } else {
            Err(PlayError::InvalidMoveShape)
        }
    }

    /// Build a move from its index in `0..81`, the order used when enumerating moves.
    pub fn from_index(index: u8) -> Move {
        assert!(index < 81);
        Move::new(index / 9, index % 9)
    }

    pub fn index(self) -> u8 {
        self.sub_board * 9 + self.cell
    }

    pub fn is_valid_shape(self) -> bool {
        self.sub_board < 9 && self.cell < 9
    }
}

impl ActiveBoard {
    pub fn index(self) -> Option<u8> {
        match self {
            ActiveBoard::Any => None,
            ActiveBoard::Board(index) => Some(index),
        }
    }

    pub fn from_index(index: Option<u8>) -> ActiveBoard {
        match index {
            None => ActiveBoard::Any,
            Some(index) => ActiveBoard::Board(index),
        }
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Move({}, {})", self.sub_board, self.cell)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.sub_board, self.cell)
    }
}

impl Display for ActiveBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ActiveBoard::Any => write!(f, "-"),
            ActiveBoard::Board(index) => write!(f, "{}", index),
        }
    }
}

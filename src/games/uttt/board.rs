use std::iter::Map;
use std::ops::{ControlFlow, Range};

use internal_iterator::{Internal, InternalIterator, IteratorExt};
use rand::Rng;

use crate::board::{Board, BoardDone, BoardMoves, Mark, Outcome, PlayError};
use crate::games::uttt::{line_winner, winning_line, ActiveBoard, Move, SnapshotError};

/// A single cell of a sub-board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

/// One of the nine inner 3x3 boards. The winner is derived from the cells and never stored.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SubBoard {
    cells: [Cell; 9],
}

/// Whether the game is still going on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Phase {
    InProgress,
    Won(Mark),
    Drawn,
}

/// The full state of an ultimate tic-tac-toe game.
///
/// States are only ever changed by playing legal moves, either in place through [Board::play]
/// or functionally through [apply_move](crate::games::uttt::apply_move).
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct GameState {
    boards: [SubBoard; 9],
    active: ActiveBoard,
    turn: Mark,
    phase: Phase,
    moves_played: u32,
    max_moves: Option<u32>,
}

impl Cell {
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(mark),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Option<Mark>> for Cell {
    fn from(mark: Option<Mark>) -> Self {
        match mark {
            None => Cell::Empty,
            Some(mark) => Cell::Marked(mark),
        }
    }
}

impl SubBoard {
    pub const EMPTY: SubBoard = SubBoard { cells: [Cell::Empty; 9] };

    pub fn from_cells(cells: [Cell; 9]) -> SubBoard {
        SubBoard { cells }
    }

    pub fn from_marks(marks: [Option<Mark>; 9]) -> SubBoard {
        SubBoard {
            cells: marks.map(Cell::from),
        }
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    pub fn cell(&self, index: u8) -> Cell {
        self.cells[index as usize]
    }

    pub fn marks(&self) -> [Option<Mark>; 9] {
        self.cells.map(Cell::mark)
    }

    pub fn winner(&self) -> Option<Mark> {
        line_winner(self.marks())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    pub fn count(&self, mark: Mark) -> u32 {
        self.cells.iter().filter(|&&c| c == Cell::Marked(mark)).count() as u32
    }

    /// Whether both marks complete a line, which can never happen through play.
    pub(super) fn has_conflicting_lines(&self) -> bool {
        let mut winners = crate::games::uttt::LINES.iter().filter_map(|&[a, b, c]| {
            let mark = self.cells[a].mark()?;
            (self.cells[b] == self.cells[a] && self.cells[c] == self.cells[a]).then_some(mark)
        });
        match winners.next() {
            None => false,
            Some(first) => winners.any(|other| other != first),
        }
    }
}

impl GameState {
    /// The starting position: all cells empty, any sub-board can be played and `X` moves first.
    /// There is no move limit.
    pub fn new() -> GameState {
        GameState {
            boards: [SubBoard::EMPTY; 9],
            active: ActiveBoard::Any,
            turn: Mark::X,
            phase: Phase::InProgress,
            moves_played: 0,
            max_moves: None,
        }
    }

    /// Set the move limit, after which the game ends in a draw if nobody won yet.
    /// Because drawn sub-boards are cleared a game could otherwise go on forever.
    pub fn with_max_moves(mut self, max_moves: Option<u32>) -> GameState {
        assert!(max_moves != Some(0), "move limit must be positive");
        self.max_moves = max_moves;
        self.phase = self.compute_phase();
        self
    }

    /// Build a state from its parts, checking every invariant that play would maintain.
    /// `moves_played` is initialized to the number of marks on the board.
    pub fn from_parts(boards: [SubBoard; 9], active: ActiveBoard, turn: Mark) -> Result<GameState, SnapshotError> {
        for (index, board) in boards.iter().enumerate() {
            if board.has_conflicting_lines() {
                return Err(SnapshotError::ConflictingLines { sub_board: index as u8 });
            }
            if board.winner().is_none() && board.is_full() {
                return Err(SnapshotError::FullUndecided { sub_board: index as u8 });
            }
        }

        if let ActiveBoard::Board(index) = active {
            if index >= 9 {
                return Err(SnapshotError::ActiveOutOfRange(index));
            }
            if boards[index as usize].winner().is_some() {
                return Err(SnapshotError::ActiveBoardWon { sub_board: index });
            }
        }

        let moves_played = boards.iter().map(|b| b.count(Mark::X) + b.count(Mark::O)).sum();

        let mut state = GameState {
            boards,
            active,
            turn,
            phase: Phase::InProgress,
            moves_played,
            max_moves: None,
        };
        state.phase = state.compute_phase();
        Ok(state)
    }

    pub fn sub_boards(&self) -> &[SubBoard; 9] {
        &self.boards
    }

    pub fn sub_board(&self, index: u8) -> &SubBoard {
        &self.boards[index as usize]
    }

    pub fn cell(&self, mv: Move) -> Cell {
        self.boards[mv.sub_board as usize].cell(mv.cell)
    }

    pub fn active_board(&self) -> ActiveBoard {
        self.active
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    pub fn max_moves(&self) -> Option<u32> {
        self.max_moves
    }

    /// The winner of each sub-board.
    pub fn sub_winners(&self) -> [Option<Mark>; 9] {
        self.boards.map(|b| b.winner())
    }

    /// The winner of the whole game, derived from the sub-board winners.
    pub fn winner(&self) -> Option<Mark> {
        line_winner(self.sub_winners())
    }

    /// The winner together with the three sub-boards forming the winning line.
    pub fn winning_line(&self) -> Option<(Mark, [usize; 3])> {
        winning_line(self.sub_winners())
    }

    /// The sub-board the next move is forced into, if any.
    /// The active board only constrains the move if it is still open,
    /// otherwise all undecided sub-boards are allowed.
    pub fn forced_board(&self) -> Option<u8> {
        match self.active {
            ActiveBoard::Any => None,
            ActiveBoard::Board(index) => {
                let board = &self.boards[index as usize];
                (board.winner().is_none() && !board.is_full()).then_some(index)
            }
        }
    }

    /// Check whether `mark` can play `mv` right now, without changing anything.
    pub fn check_move(&self, mv: Move, mark: Mark) -> Result<(), PlayError> {
        self.check_done()?;
        if !mv.is_valid_shape() {
            return Err(PlayError::InvalidMoveShape);
        }
        if mark != self.turn {
            return Err(PlayError::WrongTurn);
        }

        let board = &self.boards[mv.sub_board as usize];
        if board.winner().is_some() {
            return Err(PlayError::SubBoardAlreadyWon);
        }
        if let Some(forced) = self.forced_board() {
            if forced != mv.sub_board {
                return Err(PlayError::IllegalBoardTarget);
            }
        }
        if !board.cell(mv.cell).is_empty() {
            return Err(PlayError::OccupiedCell);
        }

        Ok(())
    }

    /// Apply a move that already passed [GameState::check_move].
    pub(super) fn play_unchecked(&mut self, mv: Move) {
        let board = &mut self.boards[mv.sub_board as usize];
        board.cells[mv.cell as usize] = Cell::Marked(self.turn);

        if board.winner().is_none() && board.is_full() {
            *board = SubBoard::EMPTY;
        }

        self.active = if self.boards[mv.cell as usize].winner().is_some() {
            ActiveBoard::Any
        } else {
            ActiveBoard::Board(mv.cell)
        };

        self.moves_played += 1;
        self.turn = self.turn.other();
        self.phase = self.compute_phase();
    }

    fn compute_phase(&self) -> Phase {
        if let Some(winner) = self.winner() {
            return Phase::Won(winner);
        }
        if self.max_moves.map_or(false, |max| self.moves_played >= max) {
            return Phase::Drawn;
        }

        let any_open = self.forced_board().is_some()
            || self.boards.iter().any(|b| b.winner().is_none() && !b.is_full());
        if any_open {
            Phase::InProgress
        } else {
            Phase::Drawn
        }
    }

    pub(super) fn available_moves_iter(&self) -> Result<AvailableMoves<'_>, BoardDone> {
        self.check_done()?;
        Ok(AvailableMoves { state: self })
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

impl Board for GameState {
    type Move = Move;

    fn next_player(&self) -> Mark {
        self.turn
    }

    fn is_available_move(&self, mv: Self::Move) -> Result<bool, BoardDone> {
        self.check_done()?;
        Ok(self.check_move(mv, self.turn).is_ok())
    }

    fn random_available_move(&self, rng: &mut impl Rng) -> Result<Self::Move, BoardDone> {
        let moves: Vec<Move> = self.available_moves_iter()?.collect();
        Ok(moves[rng.gen_range(0..moves.len())])
    }

    fn play(&mut self, mv: Self::Move) -> Result<(), PlayError> {
        self.check_move(mv, self.turn)?;
        self.play_unchecked(mv);
        Ok(())
    }

    fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::InProgress => None,
            Phase::Won(mark) => Some(Outcome::WonBy(mark)),
            Phase::Drawn => Some(Outcome::Draw),
        }
    }
}

impl<'a> BoardMoves<'a, GameState> for GameState {
    type AllMovesIterator = Internal<Map<Range<u8>, fn(u8) -> Move>>;
    type AvailableMovesIterator = AvailableMoves<'a>;

    fn all_possible_moves() -> Self::AllMovesIterator {
        let f: fn(u8) -> Move = Move::from_index;
        (0..81).map(f).into_internal()
    }

    fn available_moves(&'a self) -> Result<Self::AvailableMovesIterator, BoardDone> {
        self.available_moves_iter()
    }
}

/// The available moves of a [GameState], ordered by sub-board and then by cell.
#[derive(Debug)]
pub struct AvailableMoves<'a> {
    state: &'a GameState,
}

impl InternalIterator for AvailableMoves<'_> {
    type Item = Move;

    fn try_for_each<R, F>(self, mut f: F) -> ControlFlow<R>
    where
        F: FnMut(Self::Item) -> ControlFlow<R>,
    {
        let state = self.state;
        let boards = match state.forced_board() {
            Some(index) => index..index + 1,
            None => 0..9,
        };

        for sub_board in boards {
            let board = &state.boards[sub_board as usize];
            if board.winner().is_some() {
                continue;
            }
            for cell in 0..9 {
                if board.cell(cell).is_empty() {
                    if let ControlFlow::Break(r) = f(Move::new(sub_board, cell)) {
                        return ControlFlow::Break(r);
                    }
                }
            }
        }

        ControlFlow::Continue(())
    }
}

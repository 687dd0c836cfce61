//! Rule engine: placement legality, capture resolution, ko, termination, and
//! scoring.
//!
//! Legality is decided by [`check_placement`], a pure function over a scratch
//! copy of the board. [`Position`] owns the authoritative board and applies a
//! move only once it has been validated, so a rejected move never mutates
//! anything.
//!
//! The ko guard remembers a single previous board and is armed whenever the
//! most recent placement captured something. Termination by passing compares
//! the board against that same remembered board instead of counting passes.

use tracing::debug;

use crate::board::{Board, Point, Stone};
use crate::constants::{KOMI, MAX_MOVES};

/// A move produced by an agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Place { row: usize, col: usize, stone: Stone },
    Pass(Stone),
}

impl Move {
    pub fn stone(&self) -> Stone {
        match *self {
            Move::Place { stone, .. } => stone,
            Move::Pass(stone) => stone,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass(_))
    }
}

/// Reason a placement was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("illegal move at ({0}, {1}): out of bounds")]
    OutOfBounds(usize, usize),
    #[error("illegal move at ({0}, {1}): point not empty")]
    Occupied(usize, usize),
    #[error("illegal move at ({0}, {1}): suicide")]
    Suicide(usize, usize),
    #[error("illegal move at ({0}, {1}): repeats the previous board (ko)")]
    Ko(usize, usize),
}

/// The board a legal placement produces, with the opponent stones it removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub board: Board,
    pub captured: Vec<Point>,
}

/// Decide whether `stone` may be placed at `(row, col)`.
///
/// Checks run in order: bounds, occupancy, liberty of the placed group,
/// liberty after removing dead opponent groups (suicide), and finally the
/// single-previous-board ko check. The ko check is only reached when the
/// placed group had no liberty before captures, and only applies when
/// `ko_armed` is set.
pub fn check_placement(
    board: &Board,
    previous: &Board,
    ko_armed: bool,
    row: usize,
    col: usize,
    stone: Stone,
) -> Result<Placement, MoveError> {
    if !Board::in_bounds(row, col) {
        return Err(MoveError::OutOfBounds(row, col));
    }
    if board.get(row, col).is_some() {
        return Err(MoveError::Occupied(row, col));
    }

    let mut scratch = *board;
    scratch.place(row, col, stone);
    let captured = scratch.dead_stones(stone.opponent());

    if scratch.has_liberty(row, col) {
        scratch.remove_stones(&captured);
        return Ok(Placement {
            board: scratch,
            captured,
        });
    }

    scratch.remove_stones(&captured);
    if !scratch.has_liberty(row, col) {
        return Err(MoveError::Suicide(row, col));
    }
    if ko_armed && scratch == *previous {
        return Err(MoveError::Ko(row, col));
    }
    Ok(Placement {
        board: scratch,
        captured,
    })
}

/// Result of a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Stone),
    Tie,
}

impl Outcome {
    /// `0` for a tie, otherwise the winner's piece type.
    pub fn code(self) -> i32 {
        match self {
            Outcome::Winner(s) => s.code() as i32,
            Outcome::Tie => 0,
        }
    }
}

/// A game in progress.
#[derive(Clone, Debug)]
pub struct Position {
    /// Authoritative board
    pub board: Board,
    /// Board before the last completed ply
    pub previous: Board,
    /// Number of plies played
    pub n_move: usize,
    /// Colour to move
    pub to_play: Stone,
    /// Stones removed by the most recent placement
    pub last_captured: Vec<Point>,
    /// Set when the last ply was a pass made on an unchanged board
    pub pass_closed: bool,
    /// Points added to White's score
    pub komi: f64,
    /// Ply limit
    pub max_moves: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Empty board, Black to play.
    pub fn new() -> Self {
        Position {
            board: Board::new(),
            previous: Board::new(),
            n_move: 0,
            to_play: Stone::Black,
            last_captured: Vec::new(),
            pass_closed: false,
            komi: KOMI,
            max_moves: MAX_MOVES,
        }
    }

    /// Rebuild a position from an interchange record.
    ///
    /// Stones of `to_play` present on `previous` but gone from `board` were
    /// captured by the opponent's last move and arm the ko guard.
    pub fn from_interchange(to_play: Stone, previous: Board, board: Board) -> Self {
        let last_captured = previous
            .cells()
            .filter(|&((r, c), cell)| cell == Some(to_play) && board.get(r, c) != Some(to_play))
            .map(|(pt, _)| pt)
            .collect();
        Position {
            board,
            previous,
            to_play,
            last_captured,
            ..Position::new()
        }
    }

    /// Check a placement against the live board without changing anything.
    pub fn check_placement(
        &self,
        row: usize,
        col: usize,
        stone: Stone,
    ) -> Result<Placement, MoveError> {
        check_placement(
            &self.board,
            &self.previous,
            !self.last_captured.is_empty(),
            row,
            col,
            stone,
        )
    }

    pub fn is_legal(&self, row: usize, col: usize, stone: Stone) -> bool {
        self.check_placement(row, col, stone).is_ok()
    }

    /// Apply a move to the board without touching the move counter or turn.
    ///
    /// Returns the captured stones. A pass copies the current board into
    /// `previous`; a placement snapshots the pre-placement board first.
    pub fn apply(&mut self, mv: Move) -> Result<Vec<Point>, MoveError> {
        match mv {
            Move::Place { row, col, stone } => {
                let placement = self.check_placement(row, col, stone)?;
                self.previous = self.board;
                self.board = placement.board;
                self.last_captured = placement.captured.clone();
                self.pass_closed = false;
                if !placement.captured.is_empty() {
                    debug!(
                        stone = %stone,
                        row,
                        col,
                        captured = placement.captured.len(),
                        "capture"
                    );
                }
                Ok(placement.captured)
            }
            Move::Pass(_) => {
                self.pass_closed = self.board == self.previous;
                self.previous = self.board;
                Ok(Vec::new())
            }
        }
    }

    /// Apply a move and hand the turn to the opponent.
    pub fn play(&mut self, mv: Move) -> Result<Vec<Point>, MoveError> {
        let captured = self.apply(mv)?;
        self.n_move += 1;
        self.to_play = self.to_play.opponent();
        Ok(captured)
    }

    /// True once the ply limit is reached, or the last ply was a pass on a
    /// board identical to the remembered previous board.
    pub fn game_end(&self) -> bool {
        self.n_move >= self.max_moves || self.pass_closed
    }

    /// Number of stones of the given colour on the board.
    pub fn score(&self, stone: Stone) -> usize {
        self.board.count(stone)
    }

    /// Compare stone counts with komi added to White.
    pub fn judge_winner(&self) -> Outcome {
        let black = self.score(Stone::Black) as f64;
        let white = self.score(Stone::White) as f64 + self.komi;
        if black > white {
            Outcome::Winner(Stone::Black)
        } else if black < white {
            Outcome::Winner(Stone::White)
        } else {
            Outcome::Tie
        }
    }
}

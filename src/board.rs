//! Board state and group/liberty analysis.
//!
//! The board is a plain `N x N` grid of optional stones stored row-major.
//! It is `Copy`, so the rule engine simulates moves on a scratch value
//! instead of cloning any surrounding game state.

use std::collections::BTreeSet;
use std::fmt;

use crate::constants::{BOARD_CELLS, N};
use crate::error::BoardParseError;

/// Stone colour. Black (`1`, shown as `X`) always moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    /// The other colour.
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// Numeric piece type used in interchange files and table keys.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Stone::Black => 1,
            Stone::White => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Stone> {
        match code {
            1 => Some(Stone::Black),
            2 => Some(Stone::White),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Stone::Black => 'X',
            Stone::White => 'O',
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A cell coordinate as `(row, col)`.
pub type Point = (usize, usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Stone>; BOARD_CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    #[inline]
    fn idx(row: usize, col: usize) -> usize {
        row * N + col
    }

    #[inline]
    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < N && col < N
    }

    /// Stone at `(row, col)`, or `None` for an empty or out-of-bounds cell.
    pub fn get(&self, row: usize, col: usize) -> Option<Stone> {
        if !Self::in_bounds(row, col) {
            return None;
        }
        self.cells[Self::idx(row, col)]
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        Self::in_bounds(row, col) && self.get(row, col).is_none()
    }

    /// Overwrite a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, cell: Option<Stone>) {
        if Self::in_bounds(row, col) {
            self.cells[Self::idx(row, col)] = cell;
        }
    }

    pub fn place(&mut self, row: usize, col: usize, stone: Stone) {
        self.set(row, col, Some(stone));
    }

    pub fn remove_stones(&mut self, points: &[Point]) {
        for &(r, c) in points {
            self.set(r, c, None);
        }
    }

    /// All cells in row-major order with their contents.
    pub fn cells(&self) -> impl Iterator<Item = (Point, Option<Stone>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| ((i / N, i % N), cell))
    }

    /// Up to four orthogonally adjacent in-bounds cells (up, down, left, right).
    pub fn neighbors(row: usize, col: usize) -> impl Iterator<Item = Point> {
        let mut v = Vec::with_capacity(4);
        if row > 0 {
            v.push((row - 1, col));
        }
        if row + 1 < N {
            v.push((row + 1, col));
        }
        if col > 0 {
            v.push((row, col - 1));
        }
        if col + 1 < N {
            v.push((row, col + 1));
        }
        v.into_iter()
    }

    /// The connected group of same-coloured stones containing `(row, col)`.
    ///
    /// Depth-first flood fill; each cell is visited at most once. An empty
    /// seed yields the connected region of empty cells, which callers in
    /// this crate never ask for.
    pub fn group(&self, row: usize, col: usize) -> BTreeSet<Point> {
        let mut members = BTreeSet::new();
        if !Self::in_bounds(row, col) {
            return members;
        }
        let color = self.get(row, col);
        let mut stack = vec![(row, col)];
        let mut visited = [false; BOARD_CELLS];

        while let Some((r, c)) = stack.pop() {
            let i = Self::idx(r, c);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            members.insert((r, c));
            for (nr, nc) in Self::neighbors(r, c) {
                if !visited[Self::idx(nr, nc)] && self.get(nr, nc) == color {
                    stack.push((nr, nc));
                }
            }
        }
        members
    }

    /// True iff some stone in the group at `(row, col)` touches an empty cell.
    ///
    /// Only meaningful for occupied cells.
    pub fn has_liberty(&self, row: usize, col: usize) -> bool {
        self.group(row, col).into_iter().any(|(r, c)| {
            Self::neighbors(r, c).any(|(nr, nc)| self.get(nr, nc).is_none())
        })
    }

    /// Every stone of `stone`'s colour whose group has no liberty, row-major.
    pub fn dead_stones(&self, stone: Stone) -> Vec<Point> {
        let mut settled = [false; BOARD_CELLS];
        let mut dead = Vec::new();
        for row in 0..N {
            for col in 0..N {
                if settled[Self::idx(row, col)] || self.get(row, col) != Some(stone) {
                    continue;
                }
                let group = self.group(row, col);
                let alive = self.has_liberty(row, col);
                for &(r, c) in &group {
                    settled[Self::idx(r, c)] = true;
                }
                if !alive {
                    dead.extend(group);
                }
            }
        }
        dead.sort_unstable();
        dead
    }

    /// Number of stones of the given colour.
    pub fn count(&self, stone: Stone) -> usize {
        self.cells.iter().filter(|&&c| c == Some(stone)).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Canonical serialization: one digit per cell (`0` empty, `1`/`2`
    /// stones) in row-major order. Used as the value table key.
    pub fn key(&self) -> String {
        self.cells.iter().map(|&c| cell_digit(c)).collect()
    }

    /// The board as `N` strings of `N` digits.
    pub fn to_digit_rows(&self) -> Vec<String> {
        (0..N)
            .map(|r| (0..N).map(|c| cell_digit(self.get(r, c))).collect())
            .collect()
    }

    /// Parse `N` rows of `N` digits in `{0, 1, 2}`.
    pub fn from_digit_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardParseError> {
        if rows.len() != N {
            return Err(BoardParseError::RowCount {
                expected: N,
                found: rows.len(),
            });
        }
        let mut board = Board::new();
        for (r, line) in rows.iter().enumerate() {
            let line = line.as_ref().trim_end();
            if line.chars().count() != N {
                return Err(BoardParseError::RowLength {
                    row: r,
                    expected: N,
                    found: line.chars().count(),
                });
            }
            for (c, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '0' => None,
                    '1' => Some(Stone::Black),
                    '2' => Some(Stone::White),
                    other => return Err(BoardParseError::BadCell { row: r, col: c, found: other }),
                };
                board.set(r, c, cell);
            }
        }
        Ok(board)
    }
}

fn cell_digit(cell: Option<Stone>) -> char {
    match cell {
        None => '0',
        Some(s) => (b'0' + s.code()) as char,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(N * 2);
        writeln!(f, "{rule}")?;
        for r in 0..N {
            for c in 0..N {
                let ch = match self.get(r, c) {
                    Some(s) => s.symbol(),
                    None => '-',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{rule}")
    }
}

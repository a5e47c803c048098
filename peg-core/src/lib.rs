//! English peg solitaire logic with bit-based board representation.
//!
//! # Board Encoding (64-bit)
//!
//! ```text
//! Bits 0-48:  7 × 7 grid, row-major, bit index = row * 7 + col
//! Bits 49-63: Unused (always zero)
//!
//! A set bit is a peg. Only the 33 cells of the cross are playable:
//!
//!         2  3  4
//!         9 10 11
//!   14 15 16 17 18 19 20
//!   21 22 23 24 25 26 27
//!   28 29 30 31 32 33 34
//!        37 38 39
//!        44 45 46
//! ```
//!
//! # Move Encoding
//!
//! A jump touches three colinear cells and is stored as three masks:
//!
//! ```text
//! landing: the cell that holds a peg after the forward jump (1 bit)
//! vacated: the two cells emptied by the forward jump (2 bits)
//! all:     landing | vacated, toggled with a single XOR
//! ```
//!
//! # Search
//!
//! The solver runs backwards from the goal (single center peg) to the
//! initial board (center empty). See [`search`].

pub mod error;
pub mod search;
pub mod solution;
pub mod stats;
#[cfg(feature = "wasm")]
pub mod wasm;

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub use error::{PathError, SolveError};
pub use search::Searcher;
pub use solution::Solution;
pub use stats::SearchStats;

/// Side length of the square grid the cross is embedded in.
pub const SIDE: u8 = 7;

/// Number of playable cells on the English board.
pub const PLAYABLE_CELLS: usize = 33;

/// Number of jumps on the English board (38 runs × 2 directions).
pub const MOVE_COUNT: usize = 76;

/// Cell index on the 7×7 grid (0-48).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct Cell(pub u8);

impl Cell {
    /// Create a cell from row and column (0-6 each).
    #[inline]
    pub const fn from_row_col(row: u8, col: u8) -> Cell {
        debug_assert!(row < SIDE && col < SIDE);
        Cell(row * SIDE + col)
    }

    /// Get the row (0-6).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / SIDE
    }

    /// Get the column (0-6).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % SIDE
    }

    /// Single-bit board for this cell. Indices past the grid give an empty
    /// board.
    #[inline]
    pub const fn bit(self) -> Board {
        if self.0 < SIDE * SIDE {
            Board(1 << self.0)
        } else {
            Board::EMPTY
        }
    }

    /// Whether the cell belongs to the cross. The four 2×2 corners are cut away.
    #[inline]
    pub const fn is_playable(self) -> bool {
        if self.0 >= SIDE * SIDE {
            return false;
        }
        let (row, col) = (self.row(), self.col());
        (row >= 2 && row <= 4) || (col >= 2 && col <= 4)
    }

    /// Iterate over the 33 playable cells in index order.
    pub fn playable() -> impl Iterator<Item = Cell> {
        (0..SIDE * SIDE).map(Cell).filter(|c| c.is_playable())
    }
}

/// Compact board state - fits in a single u64.
///
/// See module documentation for encoding details.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board(pub u64);

impl Board {
    /// Every playable cell holds a peg.
    pub const VALID_CELLS: Board = Board(0x70E7_FFFF_CE1C);
    /// Starting position: all playable cells except the center.
    pub const INITIAL: Board = Board(0x70E7_FEFF_CE1C);
    /// Target position: a single peg in the center.
    pub const GOAL: Board = Board(1 << 24);
    /// No pegs.
    pub const EMPTY: Board = Board(0);

    /// Create a board from a raw u64 encoding.
    #[inline]
    pub const fn from_u64(bits: u64) -> Board {
        Board(bits)
    }

    /// Get the raw u64 encoding.
    #[inline]
    pub const fn to_u64(self) -> u64 {
        self.0
    }

    /// Create a board with a peg on each of the given cells.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Board {
        cells.into_iter().fold(Board::EMPTY, |b, c| b | c.bit())
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn peg_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Check whether a peg sits on the cell.
    #[inline]
    pub const fn contains(self, cell: Cell) -> bool {
        self.0 & cell.bit().0 != 0
    }

    /// True if no peg sits outside the cross.
    #[inline]
    pub const fn is_within_board(self) -> bool {
        self.0 & !Self::VALID_CELLS.0 == 0
    }

    /// Iterate over the occupied cells in index order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let idx = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(Cell(idx))
        })
    }
}

impl BitAnd for Board {
    type Output = Board;

    #[inline]
    fn bitand(self, rhs: Board) -> Board {
        Board(self.0 & rhs.0)
    }
}

impl BitOr for Board {
    type Output = Board;

    #[inline]
    fn bitor(self, rhs: Board) -> Board {
        Board(self.0 | rhs.0)
    }
}

impl BitXor for Board {
    type Output = Board;

    #[inline]
    fn bitxor(self, rhs: Board) -> Board {
        Board(self.0 ^ rhs.0)
    }
}

impl Not for Board {
    type Output = Board;

    #[inline]
    fn not(self) -> Board {
        Board(!self.0)
    }
}

impl From<u64> for Board {
    fn from(bits: u64) -> Board {
        Board(bits)
    }
}

impl From<Board> for u64 {
    fn from(board: Board) -> u64 {
        board.0
    }
}

/// A single jump over three colinear cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Move {
    /// Cell occupied after the forward jump.
    pub landing: Board,
    /// The two cells emptied by the forward jump.
    pub vacated: Board,
    /// All three cells.
    pub all: Board,
}

impl Move {
    /// Both jump directions over the run `a, b, c`.
    ///
    /// Assumes the three cells are consecutive along one line.
    pub const fn pair(a: Cell, b: Cell, c: Cell) -> [Move; 2] {
        let all = Board(a.bit().0 | b.bit().0 | c.bit().0);
        [
            Move {
                landing: a.bit(),
                vacated: Board(b.bit().0 | c.bit().0),
                all,
            },
            Move {
                landing: c.bit(),
                vacated: Board(a.bit().0 | b.bit().0),
                all,
            },
        ]
    }

    /// Check if the forward jump can be played on `board`.
    #[inline]
    pub const fn is_legal_forward(&self, board: Board) -> bool {
        board.0 & self.vacated.0 == self.vacated.0 && board.0 & self.landing.0 == 0
    }

    /// Check if the jump can be undone on `board`.
    ///
    /// The vacated test goes first.
    #[inline]
    pub const fn is_legal_reverse(&self, board: Board) -> bool {
        (self.vacated.0 & board.0) == 0 && (self.landing.0 & board.0) != 0
    }

    /// Toggle all three cells. Only meaningful after a legality check.
    #[inline]
    pub const fn toggle(&self, board: Board) -> Board {
        Board(board.0 ^ self.all.0)
    }
}

/// Line direction of a run of three cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    /// West-east, along a row.
    Horizontal,
    /// North-south, along a column.
    Vertical,
}

impl Axis {
    /// Index distance between neighbouring cells.
    #[inline]
    pub const fn step(self) -> u8 {
        match self {
            Axis::Horizontal => 1,
            Axis::Vertical => SIDE,
        }
    }

    /// Cells of the three-cell run starting at `start`, if it fits on the board.
    pub fn run(self, start: Cell) -> Option<[Cell; 3]> {
        let fits = match self {
            Axis::Horizontal => start.col() + 2 < SIDE,
            Axis::Vertical => start.row() + 2 < SIDE,
        };
        if !fits {
            return None;
        }
        let step = self.step();
        let run = [start, Cell(start.0 + step), Cell(start.0 + 2 * step)];
        run.iter().all(|c| c.is_playable()).then_some(run)
    }
}

/// Every cell from which a run of three playable cells extends along `axis`.
///
/// Derived from the board shape, ascending. Yields 19 starts per axis.
pub fn run_starts(axis: Axis) -> Vec<Cell> {
    Cell::playable()
        .filter(|&c| axis.run(c).is_some())
        .collect()
}

/// How the move table is ordered before the search.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOrder {
    /// Generation order: rows first, then columns.
    Natural,
    /// Shuffled with a reproducible seed.
    Seeded(u64),
    /// Shuffled with the process-default random source. Not available on
    /// wasm32, where callers pass a seed instead.
    #[cfg(not(target_arch = "wasm32"))]
    Random,
}

impl Default for MoveOrder {
    #[cfg(not(target_arch = "wasm32"))]
    fn default() -> Self {
        MoveOrder::Random
    }

    #[cfg(target_arch = "wasm32")]
    fn default() -> Self {
        MoveOrder::Natural
    }
}

/// Fixed-size table of all 76 jumps.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveTable {
    moves: [Move; MOVE_COUNT],
}

impl MoveTable {
    /// Build the table in generation order: horizontal runs, then vertical
    /// runs, each ascending by start cell, two directions per run.
    pub fn generate() -> MoveTable {
        let empty = Move {
            landing: Board::EMPTY,
            vacated: Board::EMPTY,
            all: Board::EMPTY,
        };
        let mut moves = [empty; MOVE_COUNT];
        let mut len = 0;

        for axis in [Axis::Horizontal, Axis::Vertical] {
            for start in run_starts(axis) {
                // run_starts only yields cells whose run fits
                let Some([a, b, c]) = axis.run(start) else {
                    continue;
                };
                for mv in Move::pair(a, b, c) {
                    moves[len] = mv;
                    len += 1;
                }
            }
        }
        debug_assert_eq!(len, MOVE_COUNT);

        MoveTable { moves }
    }

    /// Generate the table and arrange it according to `order`.
    pub fn arranged(order: MoveOrder) -> MoveTable {
        let mut table = MoveTable::generate();
        match order {
            MoveOrder::Natural => {}
            MoveOrder::Seeded(seed) => table.shuffle(&mut StdRng::seed_from_u64(seed)),
            #[cfg(not(target_arch = "wasm32"))]
            MoveOrder::Random => table.shuffle(&mut rand::rng()),
        }
        table
    }

    /// Uniformly permute the table in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.moves.shuffle(rng);
    }

    /// Apply an arbitrary permutation to the table.
    pub fn permute(&mut self, f: impl FnOnce(&mut [Move])) {
        f(&mut self.moves);
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> + '_ {
        self.moves.iter()
    }

    /// Find the move whose three cells are exactly `all`, oriented so that it
    /// turns `before` into `after` going forward.
    pub fn find_jump(&self, before: Board, after: Board) -> Option<Move> {
        let changed = before ^ after;
        self.moves
            .iter()
            .copied()
            .find(|m| m.all == changed && m.is_legal_forward(before) && m.toggle(before) == after)
    }
}

impl Default for MoveTable {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            for col in 0..SIDE {
                let cell = Cell::from_row_col(row, col);
                let glyph = if !cell.is_playable() {
                    ' '
                } else if self.contains(cell) {
                    'X'
                } else {
                    'o'
                };
                write!(f, "{}", glyph)?;
            }
            if row + 1 < SIDE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW_STARTS: [u8; 19] = [
        2, 9, 14, 15, 16, 17, 18, 21, 22, 23, 24, 25, 28, 29, 30, 31, 32, 37, 44,
    ];
    const COLUMN_STARTS: [u8; 19] = [
        2, 3, 4, 9, 10, 11, 14, 15, 16, 17, 18, 19, 20, 23, 24, 25, 30, 31, 32,
    ];

    #[test]
    fn test_cell_row_col() {
        let cell = Cell::from_row_col(3, 3);
        assert_eq!(cell, Cell(24));
        assert_eq!(cell.row(), 3);
        assert_eq!(cell.col(), 3);
        assert_eq!(Cell(46).row(), 6);
        assert_eq!(Cell(46).col(), 4);
    }

    #[test]
    fn test_playable_count() {
        assert_eq!(Cell::playable().count(), PLAYABLE_CELLS);
        assert!(!Cell(0).is_playable());
        assert!(!Cell(8).is_playable());
        assert!(Cell(14).is_playable());
        assert!(!Cell(49).is_playable());
    }

    #[test]
    fn test_cell_past_grid() {
        assert_eq!(Cell(48).bit(), Board(1 << 48));
        assert_eq!(Cell(49).bit(), Board::EMPTY);
        assert_eq!(Cell(200).bit(), Board::EMPTY);
        assert!(!Board(u64::MAX).contains(Cell(64)));
        assert!(!Board(u64::MAX).contains(Cell(255)));
    }

    #[test]
    fn test_valid_cells_matches_geometry() {
        assert_eq!(Board::from_cells(Cell::playable()), Board::VALID_CELLS);
        assert_eq!(Board::VALID_CELLS.0, 124141734710812);
    }

    #[test]
    fn test_initial_and_goal() {
        let center = Cell::from_row_col(3, 3);
        assert_eq!(Board::INITIAL, Board::VALID_CELLS ^ center.bit());
        assert_eq!(Board::GOAL, center.bit());
        assert_eq!(Board::INITIAL.0, 124141717933596);
        assert_eq!(Board::GOAL.0, 16777216);
        assert_eq!(Board::INITIAL.peg_count(), 32);
        assert_eq!(Board::GOAL.peg_count(), 1);
    }

    #[test]
    fn test_board_cells_iter() {
        let board = Board::from_cells([Cell(2), Cell(24), Cell(46)]);
        let cells: Vec<Cell> = board.cells().collect();
        assert_eq!(cells, vec![Cell(2), Cell(24), Cell(46)]);
        assert!(board.contains(Cell(24)));
        assert!(!board.contains(Cell(25)));
    }

    #[test]
    fn test_within_board() {
        assert!(Board::INITIAL.is_within_board());
        assert!(!Board::from_cells([Cell(0)]).is_within_board());
        assert!(!Board(1 << 49).is_within_board());
    }

    #[test]
    fn test_run_starts_match_known_lists() {
        let rows: Vec<u8> = run_starts(Axis::Horizontal).iter().map(|c| c.0).collect();
        let cols: Vec<u8> = run_starts(Axis::Vertical).iter().map(|c| c.0).collect();
        assert_eq!(rows, ROW_STARTS);
        assert_eq!(cols, COLUMN_STARTS);
    }

    #[test]
    fn test_run_does_not_wrap_rows() {
        // 19 is in the middle band, but 19, 20, 21 would wrap onto the next row
        assert!(Axis::Horizontal.run(Cell(19)).is_none());
        assert!(Axis::Horizontal.run(Cell(18)).is_some());
        // 40 and 47 are cut corners
        assert!(Axis::Vertical.run(Cell(33)).is_none());
    }

    #[test]
    fn test_move_count() {
        assert_eq!(MoveTable::generate().as_slice().len(), 76);
    }

    #[test]
    fn test_move_masks() {
        for mv in MoveTable::generate().iter() {
            assert_eq!(mv.landing.peg_count(), 1, "{:?}", mv);
            assert_eq!(mv.vacated.peg_count(), 2, "{:?}", mv);
            assert!((mv.landing & mv.vacated).is_empty(), "{:?}", mv);
            assert_eq!(mv.all, mv.landing | mv.vacated);
            assert!(mv.all.is_within_board(), "{:?}", mv);
        }
    }

    #[test]
    fn test_moves_distinct() {
        let table = MoveTable::generate();
        let moves = table.as_slice();
        for (i, a) in moves.iter().enumerate() {
            for b in &moves[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_generation_order() {
        let table = MoveTable::generate();
        let moves = table.as_slice();
        // First run is 2, 3, 4 along the top row
        assert_eq!(moves[0].landing, Cell(2).bit());
        assert_eq!(moves[0].vacated, Board::from_cells([Cell(3), Cell(4)]));
        assert_eq!(moves[1].landing, Cell(4).bit());
        assert_eq!(moves[1].vacated, Board::from_cells([Cell(2), Cell(3)]));
        // Column runs start at index 38 with 2, 9, 16
        assert_eq!(moves[38].all, Board::from_cells([Cell(2), Cell(9), Cell(16)]));
    }

    #[test]
    fn test_generate_deterministic() {
        assert_eq!(MoveTable::generate(), MoveTable::generate());
        assert_eq!(MoveTable::arranged(MoveOrder::Natural), MoveTable::generate());
    }

    #[test]
    fn test_seeded_order_reproducible() {
        let a = MoveTable::arranged(MoveOrder::Seeded(7));
        let b = MoveTable::arranged(MoveOrder::Seeded(7));
        assert_eq!(a, b);
        assert_ne!(a, MoveTable::generate());
    }

    #[test]
    fn test_default_order_is_random() {
        assert_eq!(MoveOrder::default(), MoveOrder::Random);
        // Seeded orders only need the std_rng feature
        let table = MoveTable::arranged(MoveOrder::Seeded(1));
        assert_eq!(table, MoveTable::arranged(MoveOrder::Seeded(1)));
    }

    #[test]
    fn test_random_order_keeps_moves() {
        let table = MoveTable::arranged(MoveOrder::Random);
        let natural = MoveTable::generate();
        assert_eq!(table.as_slice().len(), MOVE_COUNT);
        for mv in natural.iter() {
            assert!(table.iter().any(|m| m == mv));
        }
    }

    #[test]
    fn test_permute_reverses() {
        let mut table = MoveTable::generate();
        table.permute(|m| m.reverse());
        assert_eq!(table.as_slice()[0], MoveTable::generate().as_slice()[75]);
    }

    #[test]
    fn test_forward_and_reverse_legality() {
        let table = MoveTable::generate();
        // Only jumps into the center are legal from the initial board
        let opening: Vec<Move> = table
            .iter()
            .copied()
            .filter(|m| m.is_legal_forward(Board::INITIAL))
            .collect();
        assert_eq!(opening.len(), 4);
        for mv in &opening {
            assert_eq!(mv.landing, Board::GOAL);
            let after = mv.toggle(Board::INITIAL);
            assert_eq!(after.peg_count(), 31);
            assert!(mv.is_legal_reverse(after));
            assert_eq!(mv.toggle(after), Board::INITIAL);
        }
    }

    #[test]
    fn test_find_jump() {
        let table = MoveTable::generate();
        let [toward_top, toward_center] = Move::pair(Cell(10), Cell(17), Cell(24));
        assert!(!toward_top.is_legal_forward(Board::INITIAL));
        // Both directions toggle the same cells; only one is a legal jump
        let after = toward_top.toggle(Board::INITIAL);
        assert_eq!(table.find_jump(Board::INITIAL, after), Some(toward_center));
        // Going back up adds pegs, which no jump does
        assert!(table.find_jump(after, Board::INITIAL).is_none());
        assert!(table.find_jump(Board::INITIAL, Board::INITIAL).is_none());
    }

    #[test]
    fn test_display() {
        let text = Board::GOAL.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "  ooo  ");
        assert_eq!(lines[3], "oooXooo");
        assert_eq!(lines[6], "  ooo  ");
    }
}

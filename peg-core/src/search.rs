//! Reverse backtracking search with a visited set.
//!
//! A forward jump removes two pegs and adds one. Undoing a jump removes one
//! peg and adds two, which is the same three-cell XOR under a different
//! legality test:
//!
//! ```text
//! (vacated & board) == 0   both cells the jump emptied are empty
//! (landing & board) != 0   the cell the jump filled holds a peg
//! ```
//!
//! Both tests are single mask operations. Checking "two pegs present" for a
//! forward jump would need an extra comparison, so the search starts at the
//! goal and undoes jumps until it reaches the initial board.

use std::collections::HashSet;

use xxhash_rust::xxh64::Xxh64Builder;

use crate::error::SolveError;
use crate::solution::Solution;
use crate::stats::SearchStats;
use crate::{Board, Move, PLAYABLE_CELLS};

/// Boards already reached by a reverse move.
pub type VisitedSet = HashSet<Board, Xxh64Builder>;

/// Log progress every 2^20 expanded boards.
const PROGRESS_MASK: u64 = (1 << 20) - 1;

/// One search session: the move order, the visited set and the path.
///
/// Nothing is shared between sessions, so independent searches can run side
/// by side.
pub struct Searcher<'a> {
    moves: &'a [Move],
    initial: Board,
    goal: Board,
    visited: VisitedSet,
    path: Vec<Board>,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    /// Session for the standard puzzle: center-empty cross to center peg.
    pub fn new(moves: &'a [Move]) -> Self {
        Self::with_endpoints(moves, Board::INITIAL, Board::GOAL)
    }

    /// Session between arbitrary endpoints, searched from `goal` back to `initial`.
    pub fn with_endpoints(moves: &'a [Move], initial: Board, goal: Board) -> Self {
        Self {
            moves,
            initial,
            goal,
            visited: HashSet::with_hasher(Xxh64Builder::new(0)),
            path: Vec::with_capacity(PLAYABLE_CELLS),
            stats: SearchStats::new(),
        }
    }

    pub fn initial(&self) -> Board {
        self.initial
    }

    pub fn goal(&self) -> Board {
        self.goal
    }

    /// Boards recorded so far. After a successful [`solve`](Self::solve) this
    /// is empty; the boards have moved into the [`Solution`].
    pub fn path(&self) -> &[Board] {
        &self.path
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search backwards from `board` for the initial board.
    ///
    /// Moves are tried in table order. On success every level of the
    /// recursion appends the board it was expanding, so the deepest board
    /// (one jump after the initial board) is appended first and `board`
    /// itself last. The initial board is never appended here.
    pub fn search(&mut self, board: Board) -> bool {
        self.descend(board, 0)
    }

    fn descend(&mut self, board: Board, depth: u32) -> bool {
        self.stats.expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        if self.stats.expanded & PROGRESS_MASK == 0 {
            self.stats.log_progress(self.visited.len(), depth);
        }

        let moves = self.moves;
        for mv in moves {
            if !mv.is_legal_reverse(board) {
                continue;
            }
            self.stats.reverse_moves += 1;

            let next = mv.toggle(board);
            if !self.visited.insert(next) {
                self.stats.revisits += 1;
                continue;
            }

            if next == self.initial || self.descend(next, depth + 1) {
                self.path.push(board);
                return true;
            }
        }
        false
    }

    /// Run a complete search and return the path from the initial board to
    /// the goal.
    ///
    /// Resets the visited set, so a session can be solved more than once;
    /// with the same move order the result is the same each time.
    pub fn solve(&mut self) -> Result<Solution, SolveError> {
        self.visited.clear();
        self.path.clear();
        self.stats = SearchStats::new();
        self.stats.start();

        // The initial board is the one board the recursion never appends
        self.path.push(self.initial);

        let found = self.initial == self.goal || self.search(self.goal);
        self.stats.finish(self.visited.len());

        if found {
            Ok(Solution::new(std::mem::take(&mut self.path)))
        } else {
            self.path.clear();
            Err(SolveError::Exhausted {
                explored: self.stats.expanded,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, MoveOrder, MoveTable};

    fn cells(idx: &[u8]) -> Board {
        Board::from_cells(idx.iter().map(|&i| Cell(i)))
    }

    /// Jump along row 2: 15 over 16 into 17.
    fn east_15() -> Move {
        Move::pair(Cell(15), Cell(16), Cell(17))[1]
    }

    /// Jump along row 2: 18 over 17 into 16.
    fn west_18() -> Move {
        Move::pair(Cell(16), Cell(17), Cell(18))[0]
    }

    #[test]
    fn test_single_jump() {
        let moves = [east_15()];
        let mut searcher = Searcher::with_endpoints(&moves, cells(&[15, 16]), cells(&[17]));
        let solution = searcher.solve().unwrap();
        assert_eq!(solution.boards(), &[cells(&[15, 16]), cells(&[17])]);
    }

    #[test]
    fn test_two_jumps_path_order() {
        let moves = [east_15(), west_18()];
        let initial = cells(&[15, 16, 18]);
        let goal = cells(&[16]);
        let mut searcher = Searcher::with_endpoints(&moves, initial, goal);

        // Raw search: the caller seeds the initial board
        assert!(searcher.search(goal));
        assert_eq!(searcher.path(), &[cells(&[17, 18]), goal]);

        let solution = searcher.solve().unwrap();
        assert_eq!(solution.boards(), &[initial, cells(&[17, 18]), goal]);
        assert!(searcher.path().is_empty());
    }

    #[test]
    fn test_exhausted() {
        // Only the jump into 17 is available, so 16 cannot be reached
        let moves = [east_15()];
        let mut searcher = Searcher::with_endpoints(&moves, cells(&[15, 16, 18]), cells(&[16]));
        let err = searcher.solve().unwrap_err();
        assert_eq!(err, SolveError::Exhausted { explored: 1 });
        assert!(searcher.path().is_empty());
    }

    #[test]
    fn test_identical_endpoints() {
        let table = MoveTable::generate();
        let mut searcher = Searcher::with_endpoints(table.as_slice(), Board::GOAL, Board::GOAL);
        let solution = searcher.solve().unwrap();
        assert_eq!(solution.boards(), &[Board::GOAL]);
        assert_eq!(searcher.stats().expanded, 0);
    }

    #[test]
    fn test_visited_prevents_reexpansion() {
        // Two disjoint jumps undone in either order reach the same board
        let into_16 = Move::pair(Cell(14), Cell(15), Cell(16))[1];
        let into_18 = Move::pair(Cell(18), Cell(19), Cell(20))[0];
        let moves = [into_16, into_18];
        // Unreachable start so the whole space is explored
        let mut searcher = Searcher::with_endpoints(&moves, cells(&[2]), cells(&[16, 18]));
        assert!(searcher.solve().is_err());

        let stats = searcher.stats();
        assert_eq!(searcher.visited().len(), 3);
        assert_eq!(stats.expanded, 4);
        assert_eq!(stats.revisits, 1);
        assert_eq!(stats.reverse_moves, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.visited, 3);
    }

    #[test]
    fn test_illegal_reverse_not_applied() {
        // Cell 16 is occupied, so the jump 15 -> 17 cannot be undone
        let moves = [east_15()];
        let mut searcher = Searcher::with_endpoints(&moves, cells(&[15, 16]), cells(&[16, 17]));
        assert!(!searcher.search(cells(&[16, 17])));
        assert_eq!(searcher.stats().reverse_moves, 0);
    }

    #[test]
    fn test_standard_puzzle_seeded() {
        let table = MoveTable::arranged(MoveOrder::Seeded(42));
        let mut searcher = Searcher::new(table.as_slice());
        let solution = searcher.solve().unwrap();

        assert_eq!(solution.len(), 32);
        assert_eq!(solution.boards()[0], Board::INITIAL);
        assert_eq!(solution.boards()[31], Board::GOAL);
        solution.verify(&table).unwrap();
        // Dead ends with 32 pegs are expanded at depth 31
        assert!(searcher.stats().max_depth <= 31);
    }

    #[test]
    fn test_depth_bounded_by_peg_count() {
        let table = MoveTable::arranged(MoveOrder::Seeded(42));
        let mut searcher = Searcher::new(table.as_slice());
        searcher.solve().unwrap();

        // A board at depth d holds d + 1 pegs, and a board with a single hole
        // cannot be undone into the full board.
        let max_depth = searcher.stats().max_depth;
        assert!(max_depth >= 30);
        assert!((max_depth as usize) < PLAYABLE_CELLS - 1);
    }
}

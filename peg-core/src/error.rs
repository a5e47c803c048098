//! Error types for solving and path verification.

use thiserror::Error;

use crate::Board;

/// The search ran out of moves without reaching the initial board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("search exhausted after expanding {explored} boards without reaching the initial board")]
    Exhausted { explored: u64 },
}

/// A solution path that is not a legal game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("solution path is empty")]
    Empty,

    #[error("path starts at {found:?}, expected {expected:?}")]
    WrongStart { found: Board, expected: Board },

    #[error("path ends at {found:?}, expected {expected:?}")]
    WrongEnd { found: Board, expected: Board },

    #[error("board {step} has pegs outside the cross: {board:?}")]
    OutsideBoard { step: usize, board: Board },

    #[error("step {step} goes from {before} to {after} pegs")]
    PegCount { step: usize, before: u32, after: u32 },

    #[error("step {step} changes cells {changed:?}, which is not a legal jump")]
    IllegalJump { step: usize, changed: Board },
}

//! Solution path and its verification.

use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::{Board, Move, MoveTable};

/// Boards from the initial position to the goal, one jump apart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    boards: Vec<Board>,
}

impl Solution {
    /// Wrap a path. The first board is the initial position.
    pub fn new(boards: Vec<Board>) -> Self {
        Self { boards }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn into_boards(self) -> Vec<Board> {
        self.boards
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Number of jumps played.
    pub fn jump_count(&self) -> usize {
        self.boards.len().saturating_sub(1)
    }

    /// Consecutive `(before, after)` pairs.
    pub fn steps(&self) -> impl Iterator<Item = (Board, Board)> + '_ {
        self.boards.windows(2).map(|w| (w[0], w[1]))
    }

    /// The forward jump played at each step.
    pub fn jumps(&self, table: &MoveTable) -> Result<Vec<Move>, PathError> {
        self.steps()
            .enumerate()
            .map(|(i, (before, after))| {
                table.find_jump(before, after).ok_or(PathError::IllegalJump {
                    step: i + 1,
                    changed: before ^ after,
                })
            })
            .collect()
    }

    /// Check the path solves the standard puzzle.
    pub fn verify(&self, table: &MoveTable) -> Result<(), PathError> {
        self.verify_between(table, Board::INITIAL, Board::GOAL)
    }

    /// Check the path is a legal game from `initial` to `goal`.
    pub fn verify_between(
        &self,
        table: &MoveTable,
        initial: Board,
        goal: Board,
    ) -> Result<(), PathError> {
        let (Some(&first), Some(&last)) = (self.boards.first(), self.boards.last()) else {
            return Err(PathError::Empty);
        };
        if first != initial {
            return Err(PathError::WrongStart {
                found: first,
                expected: initial,
            });
        }
        if last != goal {
            return Err(PathError::WrongEnd {
                found: last,
                expected: goal,
            });
        }

        if let Some((step, &board)) = self
            .boards
            .iter()
            .enumerate()
            .find(|(_, b)| !b.is_within_board())
        {
            return Err(PathError::OutsideBoard { step, board });
        }

        for (i, (before, after)) in self.steps().enumerate() {
            let step = i + 1;
            if after.peg_count() + 1 != before.peg_count() {
                return Err(PathError::PegCount {
                    step,
                    before: before.peg_count(),
                    after: after.peg_count(),
                });
            }
            if table.find_jump(before, after).is_none() {
                return Err(PathError::IllegalJump {
                    step,
                    changed: before ^ after,
                });
            }
        }
        Ok(())
    }
}

/// Play `jumps` forward from `start` by toggling each jump's cells.
pub fn replay(start: Board, jumps: &[Move]) -> Board {
    jumps.iter().fold(start, |board, mv| mv.toggle(board))
}

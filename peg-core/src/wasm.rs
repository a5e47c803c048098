//! WASM bindings for peg-core
//!
//! Provides a JavaScript-friendly API for the solver.

use wasm_bindgen::prelude::*;

use crate::{Board, Cell, MoveOrder, MoveTable, Searcher, SIDE};

/// WASM-friendly wrapper around a seeded move table
#[wasm_bindgen]
pub struct WasmSolver {
    table: MoveTable,
}

#[wasm_bindgen]
impl WasmSolver {
    /// Create a solver whose move order is shuffled with `seed`
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WasmSolver {
        WasmSolver {
            table: MoveTable::arranged(MoveOrder::Seeded(seed)),
        }
    }

    /// Create a solver that keeps the generated move order
    pub fn natural() -> WasmSolver {
        WasmSolver {
            table: MoveTable::generate(),
        }
    }

    /// Number of moves in the table (76)
    #[wasm_bindgen(js_name = moveCount)]
    pub fn move_count(&self) -> usize {
        self.table.as_slice().len()
    }

    /// Solve the standard puzzle.
    /// Returns the boards from initial to goal as an array of u64 encodings.
    pub fn solve(&self) -> Result<JsValue, JsError> {
        let mut searcher = Searcher::new(self.table.as_slice());
        let solution = searcher.solve()?;
        solution.verify(&self.table)?;
        Ok(serde_wasm_bindgen::to_value(&solution.into_boards())?)
    }
}

/// Board with every playable cell filled
#[wasm_bindgen(js_name = validCells)]
pub fn valid_cells() -> u64 {
    Board::VALID_CELLS.to_u64()
}

/// Starting board (center empty)
#[wasm_bindgen(js_name = initialBoard)]
pub fn initial_board() -> u64 {
    Board::INITIAL.to_u64()
}

/// Goal board (center peg only)
#[wasm_bindgen(js_name = goalBoard)]
pub fn goal_board() -> u64 {
    Board::GOAL.to_u64()
}

/// Cell contents as 49 codes, row-major: 0 = off board, 1 = hole, 2 = peg
#[wasm_bindgen(js_name = boardCells)]
pub fn board_cells(bits: u64) -> Vec<u8> {
    let board = Board::from_u64(bits);
    (0..SIDE * SIDE)
        .map(Cell)
        .map(|cell| match (cell.is_playable(), board.contains(cell)) {
            (false, _) => 0,
            (true, false) => 1,
            (true, true) => 2,
        })
        .collect()
}

//! Terminal rendering of boards, moves and solution paths.
//!
//! Each board is drawn as 7 lines of 7 glyphs: a space for cells off the
//! cross, `X` for a peg and `o` for an empty hole. Paths are laid out side by
//! side in blocks, each block closed by a separator line.

use colored::Colorize;
use peg_core::{Board, Cell, Move, SIDE};

const PEG: char = 'X';
const HOLE: char = 'o';

const GAP: &str = "   ";
const SEPARATOR: &str = "-------------";

#[derive(Clone, Copy, Debug)]
pub struct DisplayOptions {
    /// Boards per block
    pub per_row: usize,
    /// Color cells that changed since the previous board
    pub highlight: bool,
}

/// Render one row of `board`.
///
/// With `highlight`, cells that differ from `prev` are colored: a peg that
/// just landed in red, a hole that was just emptied in blue.
pub fn render_line(board: Board, prev: Option<Board>, row: u8, highlight: bool) -> String {
    let changed = prev.map_or(Board::EMPTY, |p| p ^ board);
    let mut line = String::with_capacity(SIDE as usize);

    for col in 0..SIDE {
        let cell = Cell::from_row_col(row, col);
        if !cell.is_playable() {
            line.push(' ');
            continue;
        }

        let occupied = board.contains(cell);
        let glyph = if occupied { PEG } else { HOLE };
        if highlight && changed.contains(cell) {
            let text = glyph.to_string();
            let styled = if occupied {
                text.red().bold()
            } else {
                text.blue()
            };
            line.push_str(&styled.to_string());
        } else {
            line.push(glyph);
        }
    }
    line
}

/// Render a single board, one line per row.
pub fn render_board(board: Board) -> String {
    let mut out = String::new();
    for row in 0..SIDE {
        out.push_str(&render_line(board, None, row, false));
        out.push('\n');
    }
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}

/// Render a path as blocks of `per_row` boards side by side.
pub fn render_path(boards: &[Board], opts: DisplayOptions) -> String {
    let per_row = opts.per_row.max(1);
    let mut out = String::new();

    for (block, chunk) in boards.chunks(per_row).enumerate() {
        for row in 0..SIDE {
            let lines: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(i, &board)| {
                    let idx = block * per_row + i;
                    let prev = idx.checked_sub(1).map(|p| boards[p]);
                    render_line(board, prev, row, opts.highlight)
                })
                .collect();
            out.push_str(&lines.join(GAP));
            out.push('\n');
        }
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out
}

/// Render a move as its landing, vacated and combined masks side by side.
pub fn render_move(mv: &Move) -> String {
    let mut out = String::new();
    for row in 0..SIDE {
        let masks = [mv.landing, mv.vacated, mv.all];
        let lines: Vec<String> = masks
            .iter()
            .map(|&mask| render_line(mask, None, row, false))
            .collect();
        out.push_str(&lines.join(GAP));
        out.push('\n');
    }
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}

//! Render solution boards to SVG.
//!
//! Usage:
//!   # Every step of a seeded solution
//!   cargo run --release --bin render -- --seed 7 --output-dir ./frames/
//!
//!   # A single step
//!   cargo run --release --bin render -- --seed 7 --step 12 -o step.svg
//!
//!   # From a board encoding
//!   cargo run --release --bin render -- --position 124141717933596 -o board.svg

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use peg_core::{Board, Cell, MoveOrder, MoveTable, Searcher, SIDE};
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Layout and colors
// ============================================================================

const CELL_SIZE: f32 = 48.0;
const CELL_GAP: f32 = 6.0;
const BOARD_PADDING: f32 = 16.0;
const CELL_RADIUS: f32 = 8.0;
const BOARD_RADIUS: f32 = 12.0;
const IMAGE_PADDING: f32 = 16.0;
const PEG_DIAMETER: f32 = 34.0;
const HOLE_DIAMETER: f32 = 12.0;

const BG_COLOR: &str = "#1a1a1a";
const BOARD_BG: &str = "#2a2a2a";
const CELL_BG: &str = "#3a3a3a";
const HOLE_COLOR: &str = "#1f1f1f";
const PEG_GRADIENT_START: &str = "#e74c3c";
const PEG_GRADIENT_END: &str = "#c0392b";
const HIGHLIGHT_CHANGED: &str = "#f39c12";

// ============================================================================
// SVG generation
// ============================================================================

/// Options for rendering
#[derive(Clone, Copy, Debug)]
struct RenderOptions {
    /// Cells to outline, usually those changed by the last jump
    highlight: Board,
    /// Scale factor (1.0 = 48px cells)
    scale: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            highlight: Board::EMPTY,
            scale: 1.0,
        }
    }
}

/// Generate SVG for a board state
fn render_board_svg(board: Board, opts: &RenderOptions) -> String {
    let scale = if opts.scale > 0.0 { opts.scale } else { 1.0 };

    let board_inner = SIDE as f32 * CELL_SIZE + (SIDE - 1) as f32 * CELL_GAP;
    let board_outer = board_inner + 2.0 * BOARD_PADDING;
    let size = board_outer + 2.0 * IMAGE_PADDING;
    let scaled = size * scale;

    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        scaled, scaled, size, size
    ));
    svg.push('\n');

    svg.push_str("  <defs>\n");
    svg.push_str(&format!(
        r#"    <linearGradient id="peg-grad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:{}"/>
      <stop offset="100%" style="stop-color:{}"/>
    </linearGradient>
"#,
        PEG_GRADIENT_START, PEG_GRADIENT_END
    ));
    svg.push_str("  </defs>\n");

    svg.push_str(&format!(
        r#"  <rect width="{}" height="{}" fill="{}"/>"#,
        size, size, BG_COLOR
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}"/>"#,
        IMAGE_PADDING, IMAGE_PADDING, board_outer, board_outer, BOARD_RADIUS, BOARD_BG
    ));
    svg.push('\n');

    for cell in Cell::playable() {
        let x = IMAGE_PADDING + BOARD_PADDING + cell.col() as f32 * (CELL_SIZE + CELL_GAP);
        let y = IMAGE_PADDING + BOARD_PADDING + cell.row() as f32 * (CELL_SIZE + CELL_GAP);

        let (stroke, stroke_width) = if opts.highlight.contains(cell) {
            (HIGHLIGHT_CHANGED, 3.0)
        } else {
            ("transparent", 0.0)
        };

        svg.push_str(&format!(
            r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            x, y, CELL_SIZE, CELL_SIZE, CELL_RADIUS, CELL_BG, stroke, stroke_width
        ));
        svg.push('\n');

        let cx = x + CELL_SIZE / 2.0;
        let cy = y + CELL_SIZE / 2.0;
        if board.contains(cell) {
            svg.push_str(&format!(
                r#"  <circle cx="{}" cy="{}" r="{}" fill="url(#peg-grad)" stroke="rgba(0,0,0,0.2)" stroke-width="2"/>"#,
                cx, cy, PEG_DIAMETER / 2.0
            ));
        } else {
            svg.push_str(&format!(
                r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                cx, cy, HOLE_DIAMETER / 2.0, HOLE_COLOR
            ));
        }
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_svg(path: &Path, svg: &str) -> Result<()> {
    fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

// ============================================================================
// CLI
// ============================================================================

/// Render English peg solitaire boards to SVG.
#[derive(Parser, Debug)]
#[command(name = "render", version, about)]
struct Args {
    /// Seed for the move-order shuffle (random if omitted)
    #[arg(long, env = "PEG_SEED", conflicts_with = "natural")]
    seed: Option<u64>,

    /// Keep the generated move order instead of shuffling
    #[arg(long)]
    natural: bool,

    /// Render a raw board encoding instead of solving
    #[arg(long, conflicts_with_all = ["seed", "natural", "step"])]
    position: Option<u64>,

    /// Render only this step of the solution (0 = initial board)
    #[arg(long)]
    step: Option<usize>,

    /// Output file for single-board modes
    #[arg(short, long, default_value = "board.svg")]
    output: PathBuf,

    /// Output directory for all frames
    #[arg(long, default_value = "frames")]
    output_dir: PathBuf,

    /// Do not outline cells changed by the last jump
    #[arg(long)]
    no_highlight: bool,

    /// Scale factor
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let base = RenderOptions {
        scale: args.scale,
        ..RenderOptions::default()
    };

    // Single position mode
    if let Some(bits) = args.position {
        let board = Board::from_u64(bits);
        if !board.is_within_board() {
            bail!("position {} has pegs outside the board", bits);
        }
        return write_svg(&args.output, &render_board_svg(board, &base));
    }

    let order = if args.natural {
        MoveOrder::Natural
    } else {
        MoveOrder::Seeded(args.seed.unwrap_or_else(|| rand::rng().random()))
    };
    info!(?order, "solving");

    let table = MoveTable::arranged(order);
    let solution = Searcher::new(table.as_slice()).solve()?;
    let boards = solution.boards();

    let frame_opts = |idx: usize| RenderOptions {
        highlight: match idx.checked_sub(1) {
            Some(prev) if !args.no_highlight => boards[prev] ^ boards[idx],
            _ => Board::EMPTY,
        },
        ..base
    };

    if let Some(step) = args.step {
        let Some(&board) = boards.get(step) else {
            bail!("step {} out of range (solution has {} boards)", step, boards.len());
        };
        return write_svg(&args.output, &render_board_svg(board, &frame_opts(step)));
    }

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;
    for (idx, &board) in boards.iter().enumerate() {
        let path = args.output_dir.join(format!("step-{:02}.svg", idx));
        write_svg(&path, &render_board_svg(board, &frame_opts(idx)))?;
    }
    info!("rendered {} frames", boards.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_counts() {
        let svg = render_board_svg(Board::INITIAL, &RenderOptions::default());
        // Background, board, and one rect per playable cell
        assert_eq!(svg.matches("<rect").count(), 2 + 33);
        assert_eq!(svg.matches("url(#peg-grad)").count(), 32);
        assert!(!svg.contains(HIGHLIGHT_CHANGED));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_svg_highlight() {
        let changed = Cell(22).bit() | Cell(23).bit() | Cell(24).bit();
        let opts = RenderOptions {
            highlight: changed,
            ..RenderOptions::default()
        };
        let svg = render_board_svg(Board::INITIAL ^ changed, &opts);
        assert_eq!(svg.matches(HIGHLIGHT_CHANGED).count(), 3);
        assert_eq!(svg.matches("url(#peg-grad)").count(), 31);
    }

    #[test]
    fn test_svg_scale() {
        let opts = RenderOptions {
            scale: 2.0,
            ..RenderOptions::default()
        };
        let svg = render_board_svg(Board::GOAL, &opts);
        let size = 2.0 * IMAGE_PADDING + 2.0 * BOARD_PADDING + 7.0 * CELL_SIZE + 6.0 * CELL_GAP;
        assert!(svg.contains(&format!(r#"width="{}""#, size * 2.0)));
        assert!(svg.contains(&format!(r#"viewBox="0 0 {} {}""#, size, size)));
    }

    #[test]
    fn test_args_position_conflicts_with_step() {
        assert!(Args::try_parse_from(["render", "--position", "16777216", "--step", "2"]).is_err());
    }
}

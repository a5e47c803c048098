//! Peg Solitaire Solver
//!
//! Finds one solution of English peg solitaire by searching backwards from
//! the single center peg to the starting board.

mod display;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use peg_core::{MoveOrder, MoveTable, Searcher, SolveError};
use rand::Rng;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::display::DisplayOptions;

/// Find a solution to the 33-hole English peg solitaire.
#[derive(Parser, Debug)]
#[command(name = "solver", version, about)]
struct Args {
    /// Seed for the move-order shuffle (random if omitted)
    #[arg(long, env = "PEG_SEED", conflicts_with = "natural")]
    seed: Option<u64>,

    /// Keep the generated move order instead of shuffling
    #[arg(long)]
    natural: bool,

    /// Boards printed side by side
    #[arg(long, default_value_t = 16)]
    per_row: usize,

    /// Do not color cells that changed since the previous board
    #[arg(long)]
    no_color: bool,

    /// Print the move table before searching
    #[arg(long)]
    show_moves: bool,

    /// Print the solution as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Without a seed, draw one so the run can be reproduced.
    fn move_order(&self) -> MoveOrder {
        if self.natural {
            MoveOrder::Natural
        } else {
            MoveOrder::Seeded(self.seed.unwrap_or_else(|| rand::rng().random()))
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let order = args.move_order();
    info!(?order, "peg solitaire solver");

    let table = MoveTable::arranged(order);
    if args.show_moves {
        for mv in table.iter() {
            print!("{}", display::render_move(mv));
        }
    }

    let mut searcher = Searcher::new(table.as_slice());
    debug!("searching back from\n{}", display::render_board(searcher.goal()));
    let result = searcher.solve();
    searcher.stats().log_summary();

    let solution = match result {
        Ok(solution) => solution,
        Err(SolveError::Exhausted { explored }) => {
            warn!(explored, "search exhausted");
            println!("No solution found.");
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Err(e) = solution.verify(&table) {
        warn!(error = %e, "solution failed verification");
    }
    info!(jumps = solution.jump_count(), "solution found");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        let opts = DisplayOptions {
            per_row: args.per_row,
            highlight: !args.no_color,
        };
        print!("{}", display::render_path(solution.boards(), opts));
    }

    Ok(ExitCode::SUCCESS)
}

//! Dividend Ledger CLI
//!
//! Replays a CSV of token operations (`op,caller,from,to,amount`) and prints
//! one statement row per account that held tokens or received value.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > statements.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: `debug` shows every applied operation, `warn` only rejections

use dividend_ledger::{LedgerError, ReplayEngine, Result};
use log::info;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let input_path = env::args().nth(1).ok_or(LedgerError::MissingArgument)?;
    let reader = BufReader::new(File::open(&input_path)?);

    let mut engine = ReplayEngine::new();
    engine.process_csv(reader)?;

    let token = engine.token();
    info!(
        "Replayed {}: supply {}, reserve {}",
        input_path,
        token.total_supply(),
        token.reserve()
    );

    engine.write_output(io::stdout().lock())
}

//! Wallet Engine CLI
//!
//! Command-line interface for applying wallet operations from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- workload.csv > balances.csv
//! RUST_LOG=wallet_engine=debug cargo run -- workload.csv > balances.csv
//! ```
//!
//! The program reads operation records (op, user, amount) from the input
//! CSV file, applies them through the wallet engine in file order, and
//! writes the final balances to stdout. Malformed records and rejected
//! operations are logged to stderr and do not abort the run.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (missing arguments, file not found, output I/O error)

use std::process;

use tracing_subscriber::EnvFilter;
use wallet_engine::cli;
use wallet_engine::runner::process_workload;

fn main() {
    let args = cli::parse_args();

    // Logs go to stderr so the balances CSV on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wallet_engine=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("Error: failed to create runtime: {}", error);
            process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    match runtime.block_on(process_workload(&args.input_file, &mut stdout)) {
        Ok(applied) => {
            tracing::info!(applied, "workload complete");
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

use clap::Parser;
use std::path::PathBuf;

/// Apply wallet credits and debits from a workload CSV
#[derive(Parser, Debug)]
#[command(name = "wallet-engine")]
#[command(about = "Apply wallet credits and debits from a workload CSV", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing operation records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,
}

/// Parse command-line arguments
///
/// Exits with a usage message on invalid arguments (clap default).
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

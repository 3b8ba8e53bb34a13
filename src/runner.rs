//! Workload processing pipeline
//!
//! Glue between the I/O layer and the engine: streams operation records
//! from a CSV file, applies them in file order, and writes the final
//! balances as CSV.
//!
//! # Error Handling
//!
//! Fatal errors (file not found, output I/O) are returned immediately.
//! Per-record failures, whether malformed CSV rows or rejected operations
//! such as an insufficient-balance debit, are logged and processing
//! continues with the next record.

use std::io::Write;
use std::path::Path;

use crate::core::WalletEngine;
use crate::io::csv_format::{write_balances_csv, OperationReader};
use crate::types::{OperationType, WalletError};

/// Process a workload file and write final balances to `output`
///
/// Operations are applied in file order through a fresh engine, so each
/// user's credits and debits take effect in the order they appear. The
/// resulting balance table is sorted by user id.
///
/// # Arguments
///
/// * `input_path` - Path to the workload CSV (columns: op, user, amount)
/// * `output` - Writer receiving the balances CSV (columns: user, balance)
///
/// # Returns
///
/// The number of operations applied successfully, or a fatal error.
pub async fn process_workload(
    input_path: &Path,
    output: &mut dyn Write,
) -> Result<usize, WalletError> {
    let reader = OperationReader::from_path(input_path)?;
    let engine = WalletEngine::new();
    let mut applied = 0;

    for record in reader {
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(%error, "skipping malformed record");
                continue;
            }
        };

        let result = match record.op {
            OperationType::Credit => engine.credit(&record.user, record.amount).await,
            OperationType::Debit => engine.debit(&record.user, record.amount).await,
        };

        match result {
            Ok(_) => applied += 1,
            Err(error) => {
                tracing::warn!(user = %record.user, op = ?record.op, %error, "operation rejected")
            }
        }
    }

    write_balances_csv(&engine.accounts(), output)?;
    Ok(applied)
}

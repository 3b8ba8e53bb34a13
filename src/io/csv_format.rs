//! CSV format handling for workload records and balance output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - A streaming reader over operation records
//! - Balance output serialization

use crate::types::{Account, OperationRecord, OperationType, WalletError};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: op, user, amount.
/// The amount stays a raw string here so malformed values produce a
/// per-record error instead of failing the whole deserialization pass.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    pub user: String,
    pub amount: Option<String>,
}

/// Convert a CsvRecord to an OperationRecord
///
/// This function:
/// - Parses the operation string into an OperationType
/// - Parses the amount string into a Decimal
/// - Validates that an amount is present
///
/// Sign and emptiness checks stay with the engine; this layer only cares
/// about shape.
pub fn convert_csv_record(csv_record: CsvRecord, line: u64) -> Result<OperationRecord, WalletError> {
    let op = match csv_record.op.to_lowercase().as_str() {
        "credit" => OperationType::Credit,
        "debit" => OperationType::Debit,
        other => {
            return Err(WalletError::Parse {
                line: Some(line),
                message: format!("Invalid operation type '{}'", other),
            })
        }
    };

    let amount = match csv_record.amount {
        Some(raw) if !raw.trim().is_empty() => {
            Decimal::from_str(raw.trim()).map_err(|_| WalletError::Parse {
                line: Some(line),
                message: format!("Invalid amount '{}'", raw),
            })?
        }
        _ => {
            return Err(WalletError::Parse {
                line: Some(line),
                message: format!("{:?} operation requires an amount", op),
            })
        }
    };

    Ok(OperationRecord {
        op,
        user: csv_record.user,
        amount,
    })
}

/// Streaming CSV reader over operation records
///
/// Yields one `Result<OperationRecord, WalletError>` per CSV row, so a
/// malformed row can be reported and skipped while the rest of the file
/// keeps streaming. Memory usage is O(1) per record.
#[derive(Debug)]
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
    line_num: u64,
}

impl OperationReader<File> {
    /// Open a workload CSV file for streaming
    ///
    /// Fatal errors (file not found, permissions) surface here; per-record
    /// errors surface from the iterator.
    pub fn from_path(path: &Path) -> Result<Self, WalletError> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> OperationReader<R> {
    /// Create a reader over any byte source
    ///
    /// The CSV reader trims whitespace and tolerates a missing amount
    /// field, which is reported per record rather than as a stream error.
    pub fn new(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            reader,
            line_num: 1,
        }
    }
}

impl<R: Read> Iterator for OperationReader<R> {
    type Item = Result<OperationRecord, WalletError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut raw = csv::StringRecord::new();
        match self.reader.read_record(&mut raw) {
            Ok(false) => None,
            Ok(true) => {
                self.line_num += 1;
                let headers = match self.reader.headers() {
                    Ok(headers) => headers.clone(),
                    Err(error) => return Some(Err(error.into())),
                };
                let record: CsvRecord = match raw.deserialize(Some(&headers)) {
                    Ok(record) => record,
                    Err(error) => return Some(Err(error.into())),
                };
                Some(convert_csv_record(record, self.line_num))
            }
            Err(error) => {
                self.line_num += 1;
                Some(Err(error.into()))
            }
        }
    }
}

/// Write account balances to CSV format
///
/// Writes accounts with columns: user, balance. Callers pass accounts
/// already sorted by user id for deterministic output.
pub fn write_balances_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), WalletError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["user", "balance"])?;

    for account in accounts {
        writer.write_record([account.user_id.as_str(), &account.balance.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(input: &str) -> Vec<Result<OperationRecord, WalletError>> {
        OperationReader::new(input.as_bytes()).collect()
    }

    #[test]
    fn test_reads_valid_operations() {
        let input = "op,user,amount\ncredit,u1,100.00\ndebit,u1,30.5\n";

        let records: Vec<OperationRecord> =
            read_all(input).into_iter().map(Result::unwrap).collect();

        assert_eq!(
            records,
            vec![
                OperationRecord {
                    op: OperationType::Credit,
                    user: "u1".to_string(),
                    amount: Decimal::new(10000, 2),
                },
                OperationRecord {
                    op: OperationType::Debit,
                    user: "u1".to_string(),
                    amount: Decimal::new(305, 1),
                },
            ]
        );
    }

    #[test]
    fn test_operation_type_is_case_insensitive() {
        let input = "op,user,amount\nCREDIT,u1,1\n";

        let records = read_all(input);

        assert_eq!(records[0].as_ref().unwrap().op, OperationType::Credit);
    }

    #[test]
    fn test_invalid_operation_yields_error_with_line() {
        let input = "op,user,amount\ncredit,u1,1\ntransfer,u1,1\n";

        let records = read_all(input);

        assert!(records[0].is_ok());
        assert_eq!(
            records[1],
            Err(WalletError::Parse {
                line: Some(3),
                message: "Invalid operation type 'transfer'".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_amount_yields_error() {
        let input = "op,user,amount\ncredit,u1,\n";

        let records = read_all(input);

        assert!(matches!(records[0], Err(WalletError::Parse { .. })));
    }

    #[test]
    fn test_malformed_amount_yields_error() {
        let input = "op,user,amount\ncredit,u1,abc\n";

        let records = read_all(input);

        assert_eq!(
            records[0],
            Err(WalletError::Parse {
                line: Some(2),
                message: "Invalid amount 'abc'".to_string(),
            })
        );
    }

    #[test]
    fn test_error_does_not_stop_the_stream() {
        let input = "op,user,amount\nbogus,u1,1\ndebit,u2,5\n";

        let records = read_all(input);

        assert_eq!(records.len(), 2);
        assert!(records[0].is_err());
        assert_eq!(records[1].as_ref().unwrap().user, "u2");
    }

    #[test]
    fn test_write_balances_csv() {
        let accounts = vec![
            Account {
                user_id: "u1".to_string(),
                balance: Decimal::new(7000, 2),
            },
            Account {
                user_id: "u2".to_string(),
                balance: Decimal::ZERO,
            },
        ];
        let mut output = Vec::new();

        write_balances_csv(&accounts, &mut output).unwrap();

        let written = String::from_utf8(output).unwrap();
        assert_eq!(written, "user,balance\nu1,70.00\nu2,0\n");
    }

    #[test]
    fn test_write_balances_csv_empty() {
        let mut output = Vec::new();

        write_balances_csv(&[], &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "user,balance\n");
    }
}
